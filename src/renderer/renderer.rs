use tracing::trace;

use crate::inspect::{Grok, Shape};
use crate::renderer::classifier::Classifier;
use crate::renderer::components::*;
use crate::renderer::renders::default_text;
use crate::renderer::traits::*;

/// Name shown in front of a node's type label.
#[derive(Debug, Clone, Copy)]
pub enum NodeName<'a> {
    /// Field names, map keys and the top-level name.
    Named(&'a str),
    /// Sequence position.
    Index(usize),
}

/// Recursive value-to-text traversal.
pub struct ValueRenderer<'c> {
    pub(crate) context: &'c RenderContext,
    pub(crate) palette: Palette,
    pub(crate) indenter: Indenter<'c>,
    classifier: Classifier,
}

impl<'c> ValueRenderer<'c> {
    pub fn new(context: &'c RenderContext) -> Self {
        let palette = Palette::new(context.colour);
        Self {
            context,
            palette,
            indenter: Indenter::new(&context.tabstop),
            classifier: Classifier::new(palette),
        }
    }

    /// Renders `value` as the top-level node.
    pub fn render(&self, value: &dyn Grok) -> String {
        let mut output = String::new();
        self.render_node(
            &mut output,
            NodeName::Named(&self.context.root_name),
            value,
            self.context.depth,
        );
        output
    }

    pub(crate) fn render_node(
        &self,
        output: &mut String,
        name: NodeName<'_>,
        value: &dyn Grok,
        depth: usize,
    ) {
        if matches!(value.shape(), Shape::Invalid) {
            output.push_str(&self.indenter.indent("<invalid>\n", depth));
            return;
        }

        let classified = self.classifier.classify(value);
        self.render_prefix(output, name, &classified.label, depth);

        let Some(target) = classified.target else {
            output.push_str(&self.palette.paint(Colour::Grey, "<nil>"));
            output.push('\n');
            return;
        };

        match target.shape() {
            Shape::Bool(b) => output.push_str(&self.palette.paint(Colour::Green, b)),
            Shape::Number(n) => output.push_str(&self.palette.paint(Colour::Green, n)),
            Shape::Str(s) => self.render_str(output, s),
            Shape::Seq(items) => {
                if items.is_empty() {
                    output.push_str("[]\n");
                    return;
                }
                self.render_seq(output, &items, depth);
            }
            Shape::Map(entries) => {
                if entries.is_empty() {
                    output.push_str("[]\n");
                    return;
                }
                self.render_map(output, entries, depth);
            }
            Shape::Record(record) => {
                if record.fields.is_empty() {
                    output.push_str("{}\n");
                    return;
                }
                self.render_record(output, target, &record, depth);
            }
            Shape::Chan(addr) | Shape::Func(addr) | Shape::RawPointer(addr) => {
                output.push_str(&self.palette.paint(Colour::Green, format!("{:p}", addr)))
            }
            Shape::Interface(inner) => {
                output.push_str(&self.palette.paint(Colour::Green, default_text(inner)))
            }
            Shape::Nil | Shape::Invalid => {
                output.push_str(&self.palette.paint(Colour::Grey, "<nil>"))
            }
            Shape::Pointer(_) => output.push_str(
                &self
                    .palette
                    .paint(Colour::Red, format!("??? {}", classified.kind)),
            ),
        }
        output.push('\n');
    }

    fn render_prefix(&self, output: &mut String, name: NodeName<'_>, label: &str, depth: usize) {
        let indent = self.indenter.indent_for_depth(depth);
        let name = match name {
            NodeName::Named(name) if name.is_empty() => None,
            NodeName::Named(name) => Some(self.palette.paint(Colour::Yellow, name)),
            NodeName::Index(index) => Some(self.palette.paint(Colour::Red, index)),
        };

        match name {
            Some(name) => output.push_str(&format!("{}{} {} = ", indent, name, label)),
            None => output.push_str(&indent),
        }
    }

    /// Writes `open`, the children one level deeper (or the truncation
    /// marker), then `close` at the parent's depth.
    pub(crate) fn render_composite(
        &self,
        output: &mut String,
        open: &str,
        close: &str,
        depth: usize,
        children: impl FnOnce(&mut String, usize),
    ) {
        output.push_str(open);
        output.push('\n');

        let child_depth = depth + 1;
        if self.context.max_depth > 0 && child_depth >= self.context.max_depth {
            trace!(depth = child_depth, "max depth reached");
            self.render_placeholder(output, "max depth reached", child_depth);
        } else {
            children(output, child_depth);
        }

        output.push_str(&self.indenter.indent(close, depth));
    }

    /// A muted `... <text>` line standing in for children.
    pub(crate) fn render_placeholder(&self, output: &mut String, text: &str, depth: usize) {
        let line = self.palette.paint(Colour::Grey, format!("... {}", text));
        output.push_str(&self.indenter.indent(&line, depth));
        output.push('\n');
    }
}
