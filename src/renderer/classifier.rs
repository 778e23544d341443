use crate::inspect::{Grok, Kind, Shape, TypeDesc};
use crate::renderer::components::{Colour, Palette};

/// A value resolved to its kind and type label.
pub struct Classified<'v> {
    pub kind: Kind,
    pub label: String,
    /// The value to render after unwrapping indirections; `None` when null.
    pub target: Option<&'v dyn Grok>,
}

/// Resolves the structural kind and coloured type label of a value.
#[derive(Debug, Clone, Copy)]
pub struct Classifier {
    palette: Palette,
}

impl Classifier {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    pub fn classify<'v>(&self, value: &'v dyn Grok) -> Classified<'v> {
        let declared = value.type_desc();
        let shape = value.shape();
        let kind = match &declared {
            TypeDesc::Any(_) => Kind::Polymorphic,
            TypeDesc::Pointer(_) => Kind::Indirection,
            TypeDesc::Seq(_) | TypeDesc::Array { .. } => Kind::Sequence,
            TypeDesc::Map { .. } => Kind::Map,
            TypeDesc::Chan(..) => Kind::Queue,
            TypeDesc::Func => Kind::Callable,
            TypeDesc::RawPointer(_) => Kind::RawHandle,
            TypeDesc::Named(_) | TypeDesc::Tuple(_) => shape.kind(),
        };

        let (label, target) = match &declared {
            TypeDesc::Any(name) => {
                let mut target = match shape {
                    Shape::Interface(inner) => Some(inner),
                    Shape::Nil | Shape::Invalid => None,
                    _ => Some(value),
                };
                let concrete = target.map_or_else(|| declared.clone(), |t| t.type_desc());
                // One level of indirection is looked through to name the concrete type.
                let concrete = match concrete {
                    TypeDesc::Pointer(pointee) => {
                        target = target.and_then(deref);
                        *pointee
                    }
                    other => other,
                };

                let mut label = self.palette.paint(Colour::Blue, format!("any{}", name));
                if concrete != declared {
                    label = format!(
                        "{}{}{}",
                        self.palette.paint(Colour::Blue, &concrete),
                        self.palette.paint(Colour::Red, " as "),
                        label
                    );
                }
                (label, target)
            }
            TypeDesc::Pointer(pointee) => {
                let label = format!(
                    "{}{}",
                    self.palette.paint(Colour::Red, "*"),
                    self.palette.paint(Colour::Blue, pointee)
                );
                let target = match shape {
                    Shape::Pointer(inner) => Some(inner),
                    _ => None,
                };
                (label, target)
            }
            other => {
                let target = match shape {
                    Shape::Nil | Shape::Invalid => None,
                    _ => Some(value),
                };
                (self.label(other), target)
            }
        };

        Classified {
            kind,
            label,
            target,
        }
    }

    fn label(&self, desc: &TypeDesc) -> String {
        match desc {
            TypeDesc::Seq(elem) => {
                format!("{}{}", self.palette.paint(Colour::Red, "[]"), self.element(elem))
            }
            TypeDesc::Map { key, value } => {
                let value = match value.as_ref() {
                    TypeDesc::Any(_) => self.palette.paint(Colour::Blue, "any"),
                    other => self.element(other),
                };
                format!(
                    "{}{}{}{}",
                    self.palette.paint(Colour::Red, "map["),
                    self.element(key),
                    self.palette.paint(Colour::Red, "]"),
                    value
                )
            }
            TypeDesc::Chan(dir, elem) => format!(
                "{} {}",
                self.palette.paint(Colour::Red, dir),
                self.palette.paint(Colour::Blue, elem)
            ),
            TypeDesc::Func => self.palette.paint(Colour::Red, "func"),
            TypeDesc::RawPointer(inner) => format!(
                "{}{}",
                self.palette.paint(Colour::Red, "unsafe*"),
                self.palette.paint(Colour::Blue, inner)
            ),
            other => self.palette.paint(Colour::Blue, other),
        }
    }

    /// Element and key types: pointers keep their `*` markup, everything else
    /// (polymorphic slots included) is shown by declared name.
    fn element(&self, desc: &TypeDesc) -> String {
        match desc {
            TypeDesc::Pointer(inner) => format!(
                "{}{}",
                self.palette.paint(Colour::Red, "*"),
                self.palette.paint(Colour::Blue, inner)
            ),
            other => self.palette.paint(Colour::Blue, other),
        }
    }
}

fn deref(value: &dyn Grok) -> Option<&dyn Grok> {
    match value.shape() {
        Shape::Pointer(inner) => Some(inner),
        _ => None,
    }
}
