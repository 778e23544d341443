use std::any::Any;
use std::borrow::Cow;
use std::fmt;

/// A value that can be walked by the renderer.
///
/// Implementations describe their declared type and expose a structural
/// [`Shape`]. Most user types should go through [`grok_record!`](crate::grok_record)
/// rather than implementing this by hand.
pub trait Grok {
    /// Declared type, available without an instance.
    fn declared() -> TypeDesc
    where
        Self: Sized;

    /// Declared type of this particular value.
    fn type_desc(&self) -> TypeDesc;

    /// Structural view of the value.
    fn shape(&self) -> Shape<'_>;

    /// Self-describing capability, replaces field enumeration when present.
    fn as_describe(&self) -> Option<&dyn Describe> {
        None
    }

    /// Hook for the well-known type registry.
    fn as_any(&self) -> Option<&dyn Any> {
        None
    }
}

/// One-line custom summary for a record.
pub trait Describe {
    fn describe(&self) -> String;
}

/// Direction of a queue/channel handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChanDir {
    Send,
    Recv,
    Both,
}

impl fmt::Display for ChanDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChanDir::Send => write!(f, "chan<-"),
            ChanDir::Recv => write!(f, "<-chan"),
            ChanDir::Both => write!(f, "chan"),
        }
    }
}

/// Declared type of a value, used to build type labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDesc {
    Named(Cow<'static, str>),
    Pointer(Box<TypeDesc>),
    Seq(Box<TypeDesc>),
    Array {
        elem: Box<TypeDesc>,
        len: usize,
    },
    Map {
        key: Box<TypeDesc>,
        value: Box<TypeDesc>,
    },
    /// Polymorphic slot; the string is the slot's declared name (often empty).
    Any(Cow<'static, str>),
    Chan(ChanDir, Box<TypeDesc>),
    Func,
    RawPointer(Box<TypeDesc>),
    Tuple(Vec<TypeDesc>),
}

impl TypeDesc {
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        TypeDesc::Named(name.into())
    }

    pub fn pointer(inner: TypeDesc) -> Self {
        TypeDesc::Pointer(Box::new(inner))
    }

    pub fn seq(elem: TypeDesc) -> Self {
        TypeDesc::Seq(Box::new(elem))
    }

    pub fn map(key: TypeDesc, value: TypeDesc) -> Self {
        TypeDesc::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn any() -> Self {
        TypeDesc::Any(Cow::Borrowed(""))
    }

    /// Types whose values can already be null, so `Option` adds no extra level.
    pub fn is_nullable(&self) -> bool {
        matches!(
            self,
            TypeDesc::Pointer(_) | TypeDesc::Any(_) | TypeDesc::Chan(..) | TypeDesc::Func
        )
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDesc::Named(name) => write!(f, "{}", name),
            TypeDesc::Pointer(inner) => write!(f, "*{}", inner),
            TypeDesc::Seq(elem) => write!(f, "[]{}", elem),
            TypeDesc::Array { elem, len } => write!(f, "[{}]{}", len, elem),
            TypeDesc::Map { key, value } => write!(f, "map[{}]{}", key, value),
            TypeDesc::Any(name) => write!(f, "any{}", name),
            TypeDesc::Chan(dir, elem) => write!(f, "{} {}", dir, elem),
            TypeDesc::Func => write!(f, "func"),
            TypeDesc::RawPointer(inner) => write!(f, "unsafe*{}", inner),
            TypeDesc::Tuple(elements) => {
                let element_strs: Vec<String> = elements.iter().map(|e| e.to_string()).collect();
                write!(f, "({})", element_strs.join(", "))
            }
        }
    }
}

/// Coarse structural category of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Invalid,
    Bool,
    Number,
    String,
    Sequence,
    Map,
    Record,
    Indirection,
    Polymorphic,
    Callable,
    Queue,
    RawHandle,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Invalid => "invalid",
            Kind::Bool => "bool",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::Sequence => "sequence",
            Kind::Map => "map",
            Kind::Record => "record",
            Kind::Indirection => "indirection",
            Kind::Polymorphic => "polymorphic",
            Kind::Callable => "callable",
            Kind::Queue => "queue",
            Kind::RawHandle => "raw handle",
        };
        write!(f, "{}", name)
    }
}

/// Structural view of a value, borrowed from it.
pub enum Shape<'a> {
    /// No value at all.
    Invalid,
    /// A null handle (pointer, polymorphic slot, channel, function).
    Nil,
    Bool(bool),
    Number(&'a dyn fmt::Display),
    Str(&'a str),
    Seq(Vec<&'a dyn Grok>),
    Map(Vec<(&'a dyn Grok, &'a dyn Grok)>),
    Record(Record<'a>),
    Pointer(&'a dyn Grok),
    /// Concrete value held by a polymorphic slot.
    Interface(&'a dyn Grok),
    Chan(*const ()),
    Func(*const ()),
    RawPointer(*const ()),
}

impl Shape<'_> {
    pub fn kind(&self) -> Kind {
        match self {
            Shape::Invalid | Shape::Nil => Kind::Invalid,
            Shape::Bool(_) => Kind::Bool,
            Shape::Number(_) => Kind::Number,
            Shape::Str(_) => Kind::String,
            Shape::Seq(_) => Kind::Sequence,
            Shape::Map(_) => Kind::Map,
            Shape::Record(_) => Kind::Record,
            Shape::Pointer(_) => Kind::Indirection,
            Shape::Interface(_) => Kind::Polymorphic,
            Shape::Chan(_) => Kind::Queue,
            Shape::Func(_) => Kind::Callable,
            Shape::RawPointer(_) => Kind::RawHandle,
        }
    }
}

/// Fields of an aggregate, in declaration order.
pub struct Record<'a> {
    pub fields: Vec<Field<'a>>,
}

impl<'a> Record<'a> {
    pub fn new(fields: Vec<Field<'a>>) -> Self {
        Self { fields }
    }

    pub fn empty() -> Self {
        Self { fields: Vec::new() }
    }
}

pub struct Field<'a> {
    pub name: &'a str,
    pub value: FieldValue<'a>,
}

pub enum FieldValue<'a> {
    Borrowed(&'a dyn Grok),
    /// Value computed on demand, e.g. from an accessor.
    Computed(Box<dyn Grok + 'a>),
    /// Present but not readable from outside the type.
    Hidden,
}

impl<'a> Field<'a> {
    pub fn new(name: &'a str, value: &'a dyn Grok) -> Self {
        Self {
            name,
            value: FieldValue::Borrowed(value),
        }
    }

    pub fn computed(name: &'a str, value: impl Grok + 'a) -> Self {
        Self {
            name,
            value: FieldValue::Computed(Box::new(value)),
        }
    }

    pub fn hidden(name: &'a str) -> Self {
        Self {
            name,
            value: FieldValue::Hidden,
        }
    }

    /// The readable value, if any.
    pub fn get(&self) -> Option<&dyn Grok> {
        match &self.value {
            FieldValue::Borrowed(value) => Some(*value),
            FieldValue::Computed(value) => Some(value.as_ref()),
            FieldValue::Hidden => None,
        }
    }
}
