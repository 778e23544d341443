use serde_json::{Map, Number, Value};

use crate::inspect::types::*;

/// A JSON value is a polymorphic slot over its variants.
impl Grok for Value {
    fn declared() -> TypeDesc {
        TypeDesc::any()
    }

    fn type_desc(&self) -> TypeDesc {
        Self::declared()
    }

    fn shape(&self) -> Shape<'_> {
        match self {
            Value::Null => Shape::Nil,
            Value::Bool(b) => Shape::Interface(b),
            Value::Number(n) => Shape::Interface(n),
            Value::String(s) => Shape::Interface(s),
            Value::Array(items) => Shape::Interface(items),
            Value::Object(map) => Shape::Interface(map),
        }
    }
}

impl Grok for Number {
    fn declared() -> TypeDesc {
        TypeDesc::named("Number")
    }

    fn type_desc(&self) -> TypeDesc {
        Self::declared()
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Number(self)
    }
}

impl Grok for Map<String, Value> {
    fn declared() -> TypeDesc {
        TypeDesc::map(String::declared(), Value::declared())
    }

    fn type_desc(&self) -> TypeDesc {
        Self::declared()
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Map(
            self.iter()
                .map(|(key, value)| (key as &dyn Grok, value as &dyn Grok))
                .collect(),
        )
    }
}
