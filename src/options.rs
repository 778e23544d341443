use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::inspect::WellKnown;
use crate::output::Sink;
use crate::renderer::RenderContext;

/// Options for a top-level render.
///
/// ```
/// let options = grok::Options::new().colour(false).max_depth(3);
/// let text = grok::to_string(&vec![1, 2, 3], &options);
/// assert!(text.starts_with("value []i32 = ["));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Options {
    context: RenderContext,
    sink: Sink,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables ANSI colour codes.
    pub fn colour(mut self, enabled: bool) -> Self {
        self.context.colour = enabled;
        self
    }

    /// Sets the indentation unit.
    pub fn tabstop(mut self, tabstop: impl Into<String>) -> Self {
        self.context.tabstop = tabstop.into();
        self
    }

    /// Sets the depth offset of the top-level node.
    pub fn depth(mut self, depth: usize) -> Self {
        self.context = self.context.with_depth(depth);
        self
    }

    /// Depth at which descent is replaced by a truncation marker; 0 disables.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.context.max_depth = max_depth;
        self
    }

    /// Byte length after which strings are cut; 0 disables.
    pub fn max_length(mut self, max_length: usize) -> Self {
        self.context.max_length = max_length;
        self
    }

    /// Name shown on the top-level line; empty for a bare line.
    pub fn root_name(mut self, name: impl Into<String>) -> Self {
        self.context.root_name = name.into();
        self
    }

    pub fn well_known(mut self, registry: WellKnown) -> Self {
        self.context.well_known = Arc::new(registry);
        self
    }

    pub fn sink(mut self, sink: Sink) -> Self {
        self.sink = sink;
        self
    }

    /// Sends output to a shared writer.
    pub fn writer(self, writer: Arc<Mutex<dyn Write + Send>>) -> Self {
        self.sink(Sink::Shared(writer))
    }

    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    pub fn destination(&self) -> &Sink {
        &self.sink
    }
}
