use std::sync::Arc;

use crate::inspect::{Grok, WellKnown};
use crate::renderer::renderer::ValueRenderer;

/// Configuration for one top-level render. Never mutated mid-traversal.
#[derive(Debug, Clone)]
pub struct RenderContext {
    /// Depth offset of the top-level node.
    pub depth: usize,
    pub colour: bool,
    /// Indentation unit, repeated once per depth level.
    pub tabstop: String,
    /// Depth at which descent stops; 0 means unlimited.
    pub max_depth: usize,
    /// Byte length after which strings are cut; 0 means unlimited.
    pub max_length: usize,
    /// Name shown on the top-level line.
    pub root_name: String,
    pub well_known: Arc<WellKnown>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self {
            depth: 0,
            colour: true,
            tabstop: "  ".to_string(),
            max_depth: 0,
            max_length: 0,
            root_name: "value".to_string(),
            well_known: Arc::new(WellKnown::default()),
        }
    }

    pub fn with_depth(&self, depth: usize) -> Self {
        Self {
            depth,
            ..self.clone()
        }
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Core rendering trait, available on every [`Grok`] value.
pub trait Render {
    fn render(&self, context: &RenderContext) -> String;
}

impl<T: Grok> Render for T {
    fn render(&self, context: &RenderContext) -> String {
        ValueRenderer::new(context).render(self)
    }
}
