use tracing::trace;

use crate::inspect::{Grok, Record, Shape};
use crate::renderer::components::*;
use crate::renderer::renderer::{NodeName, ValueRenderer};

impl ValueRenderer<'_> {
    /// Quoted (and possibly cut) string followed by its original byte length.
    pub(crate) fn render_str(&self, output: &mut String, s: &str) {
        let length = s.len();
        let max_length = self.context.max_length;
        let shown = if max_length > 0 && length > max_length {
            trace!(length, max_length, "truncating string");
            format!("{}...", truncate(s, max_length))
        } else {
            s.to_string()
        };

        output.push_str(&self.palette.paint(Colour::Green, format!("{:?} ", shown)));
        output.push_str(&self.palette.paint(Colour::Grey, length));
    }

    pub(crate) fn render_seq(&self, output: &mut String, items: &[&dyn Grok], depth: usize) {
        self.render_composite(output, "[", "]", depth, |output, child_depth| {
            for (index, item) in items.iter().enumerate() {
                self.render_node(output, NodeName::Index(index), *item, child_depth);
            }
        });
    }

    /// Entries are visited in the order of their keys' default text, so the
    /// output does not depend on the map's iteration order.
    pub(crate) fn render_map(
        &self,
        output: &mut String,
        entries: Vec<(&dyn Grok, &dyn Grok)>,
        depth: usize,
    ) {
        self.render_composite(output, "[", "]", depth, |output, child_depth| {
            let mut keyed: Vec<(String, &dyn Grok)> = entries
                .into_iter()
                .map(|(key, value)| (default_text(key), value))
                .collect();
            keyed.sort_by(|a, b| a.0.cmp(&b.0));

            for (key, value) in keyed {
                self.render_node(output, NodeName::Named(&key), value, child_depth);
            }
        });
    }

    pub(crate) fn render_record(
        &self,
        output: &mut String,
        value: &dyn Grok,
        record: &Record<'_>,
        depth: usize,
    ) {
        self.render_composite(output, "{", "}", depth, |output, child_depth| {
            if let Some(describe) = value.as_describe() {
                self.render_placeholder(output, &describe.describe(), child_depth);
                return;
            }

            // Well-known types are summarised only below the top level.
            if child_depth > 1 {
                let summary = value
                    .as_any()
                    .and_then(|any| self.context.well_known.summarize(any));
                if let Some(summary) = summary {
                    self.render_placeholder(output, &summary, child_depth);
                    return;
                }
            }

            for field in &record.fields {
                match field.get() {
                    Some(field_value) => self.render_node(
                        output,
                        NodeName::Named(field.name),
                        field_value,
                        child_depth,
                    ),
                    None => self.render_placeholder(output, "???", child_depth),
                }
            }
        });
    }
}

/// Largest prefix of `s` of at most `max` bytes that ends on a char boundary.
pub fn truncate(s: &str, max: usize) -> &str {
    if max >= s.len() {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Uncoloured one-line text form of a value, used for map keys and leaves.
pub fn default_text(value: &dyn Grok) -> String {
    match value.shape() {
        Shape::Invalid => "<invalid>".to_string(),
        Shape::Nil => "<nil>".to_string(),
        Shape::Bool(b) => b.to_string(),
        Shape::Number(n) => n.to_string(),
        Shape::Str(s) => s.to_string(),
        Shape::Seq(items) => {
            let item_strs: Vec<String> = items.iter().map(|item| default_text(*item)).collect();
            format!("[{}]", item_strs.join(" "))
        }
        Shape::Map(entries) => {
            let mut pair_strs: Vec<String> = entries
                .iter()
                .map(|(key, value)| format!("{}:{}", default_text(*key), default_text(*value)))
                .collect();
            pair_strs.sort();
            format!("map[{}]", pair_strs.join(" "))
        }
        Shape::Record(record) => {
            if let Some(describe) = value.as_describe() {
                return describe.describe();
            }
            let field_strs: Vec<String> = record
                .fields
                .iter()
                .map(|field| field.get().map_or_else(|| "?".to_string(), default_text))
                .collect();
            format!("{{{}}}", field_strs.join(" "))
        }
        Shape::Pointer(target) => format!("&{}", default_text(target)),
        Shape::Interface(inner) => default_text(inner),
        Shape::Chan(addr) | Shape::Func(addr) | Shape::RawPointer(addr) => format!("{:p}", addr),
    }
}
