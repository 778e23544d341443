use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::marker::PhantomData;
use std::rc::Rc;
use std::sync::mpsc::{Receiver, Sender, SyncSender};
use std::sync::Arc;

use crate::inspect::types::*;

macro_rules! grok_number {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Grok for $ty {
                fn declared() -> TypeDesc {
                    TypeDesc::named(stringify!($ty))
                }

                fn type_desc(&self) -> TypeDesc {
                    Self::declared()
                }

                fn shape(&self) -> Shape<'_> {
                    Shape::Number(self)
                }
            }
        )*
    };
}

grok_number!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, char);

impl Grok for bool {
    fn declared() -> TypeDesc {
        TypeDesc::named("bool")
    }

    fn type_desc(&self) -> TypeDesc {
        Self::declared()
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Bool(*self)
    }
}

/// `()` carries no value, so it renders as `<invalid>`.
impl Grok for () {
    fn declared() -> TypeDesc {
        TypeDesc::named("()")
    }

    fn type_desc(&self) -> TypeDesc {
        Self::declared()
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Invalid
    }
}

impl<T: ?Sized> Grok for PhantomData<T> {
    fn declared() -> TypeDesc {
        TypeDesc::named("PhantomData")
    }

    fn type_desc(&self) -> TypeDesc {
        Self::declared()
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Record(Record::empty())
    }
}

// Strings

impl Grok for String {
    fn declared() -> TypeDesc {
        TypeDesc::named("String")
    }

    fn type_desc(&self) -> TypeDesc {
        Self::declared()
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Str(self)
    }
}

impl Grok for &str {
    fn declared() -> TypeDesc {
        TypeDesc::named("str")
    }

    fn type_desc(&self) -> TypeDesc {
        Self::declared()
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Str(self)
    }
}

impl Grok for Box<str> {
    fn declared() -> TypeDesc {
        TypeDesc::named("Box<str>")
    }

    fn type_desc(&self) -> TypeDesc {
        Self::declared()
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Str(self)
    }
}

impl Grok for Cow<'_, str> {
    fn declared() -> TypeDesc {
        TypeDesc::named("Cow<str>")
    }

    fn type_desc(&self) -> TypeDesc {
        Self::declared()
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Str(self.as_ref())
    }
}

// Sequences

macro_rules! grok_seq {
    ($($ty:ty),* $(,)?) => {
        $(
            impl<T: Grok> Grok for $ty {
                fn declared() -> TypeDesc {
                    TypeDesc::seq(T::declared())
                }

                fn type_desc(&self) -> TypeDesc {
                    Self::declared()
                }

                fn shape(&self) -> Shape<'_> {
                    Shape::Seq(self.iter().map(|item| item as &dyn Grok).collect())
                }
            }
        )*
    };
}

grok_seq!(Vec<T>, VecDeque<T>, &[T], Box<[T]>);

impl<T: Grok, const N: usize> Grok for [T; N] {
    fn declared() -> TypeDesc {
        TypeDesc::Array {
            elem: Box::new(T::declared()),
            len: N,
        }
    }

    fn type_desc(&self) -> TypeDesc {
        Self::declared()
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Seq(self.iter().map(|item| item as &dyn Grok).collect())
    }
}

// Maps

impl<K: Grok, V: Grok, S> Grok for HashMap<K, V, S> {
    fn declared() -> TypeDesc {
        TypeDesc::map(K::declared(), V::declared())
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

impl<K: Grok, V: Grok> Grok for BTreeMap<K, V> {
    fn declared() -> TypeDesc {
        TypeDesc::map(K::declared(), V::declared())
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

// Indirections

/// Plain references add nothing to the picture and are looked through.
impl<T: Grok> Grok for &T {
    fn declared() -> TypeDesc {
        T::declared()
    }

    fn type_desc(&self) -> TypeDesc {
        (**self).type_desc()
    }

    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }

    fn as_describe(&self) -> Option<&dyn Describe> {
        (**self).as_describe()
    }

    fn as_any(&self) -> Option<&dyn std::any::Any> {
        (**self).as_any()
    }
}

macro_rules! grok_pointer {
    ($($ptr:ident),* $(,)?) => {
        $(
            impl<T: Grok> Grok for $ptr<T> {
                fn declared() -> TypeDesc {
                    TypeDesc::pointer(T::declared())
                }

                fn type_desc(&self) -> TypeDesc {
                    Self::declared()
                }

                fn shape(&self) -> Shape<'_> {
                    Shape::Pointer(&**self)
                }
            }
        )*
    };
}

grok_pointer!(Box, Rc, Arc);

/// `Option` is a nullable indirection, and transparent over handles that can
/// already be null.
impl<T: Grok> Grok for Option<T> {
    fn declared() -> TypeDesc {
        let inner = T::declared();
        if inner.is_nullable() {
            inner
        } else {
            TypeDesc::pointer(inner)
        }
    }

    fn type_desc(&self) -> TypeDesc {
        Self::declared()
    }

    fn shape(&self) -> Shape<'_> {
        match self {
            None => Shape::Nil,
            Some(value) if T::declared().is_nullable() => value.shape(),
            Some(value) => Shape::Pointer(value),
        }
    }
}

// Polymorphic slots

macro_rules! grok_dyn {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Grok for $ty {
                fn declared() -> TypeDesc {
                    TypeDesc::any()
                }

                fn type_desc(&self) -> TypeDesc {
                    Self::declared()
                }

                fn shape(&self) -> Shape<'_> {
                    Shape::Interface(&**self)
                }
            }
        )*
    };
}

grok_dyn!(
    &dyn Grok,
    Box<dyn Grok>,
    Box<dyn Grok + Send>,
    Box<dyn Grok + Send + Sync>,
    Rc<dyn Grok>,
    Arc<dyn Grok + Send + Sync>,
);

// Queue handles

macro_rules! grok_chan {
    ($($ty:ident => $dir:expr),* $(,)?) => {
        $(
            impl<T: Grok> Grok for $ty<T> {
                fn declared() -> TypeDesc {
                    TypeDesc::Chan($dir, Box::new(T::declared()))
                }

                fn type_desc(&self) -> TypeDesc {
                    Self::declared()
                }

                fn shape(&self) -> Shape<'_> {
                    Shape::Chan(self as *const Self as *const ())
                }
            }
        )*
    };
}

grok_chan!(Sender => ChanDir::Send, SyncSender => ChanDir::Send, Receiver => ChanDir::Recv);

// Callables

macro_rules! grok_fn {
    ($($arg:ident),*) => {
        impl<R, $($arg),*> Grok for fn($($arg),*) -> R {
            fn declared() -> TypeDesc {
                TypeDesc::Func
            }

            fn type_desc(&self) -> TypeDesc {
                Self::declared()
            }

            fn shape(&self) -> Shape<'_> {
                Shape::Func(*self as *const ())
            }
        }
    };
}

grok_fn!();
grok_fn!(A);
grok_fn!(A, B);
grok_fn!(A, B, C);

// Raw memory handles

impl<T: Grok> Grok for *const T {
    fn declared() -> TypeDesc {
        TypeDesc::RawPointer(Box::new(T::declared()))
    }

    fn type_desc(&self) -> TypeDesc {
        Self::declared()
    }

    fn shape(&self) -> Shape<'_> {
        Shape::RawPointer(*self as *const ())
    }
}

impl<T: Grok> Grok for *mut T {
    fn declared() -> TypeDesc {
        TypeDesc::RawPointer(Box::new(T::declared()))
    }

    fn type_desc(&self) -> TypeDesc {
        Self::declared()
    }

    fn shape(&self) -> Shape<'_> {
        Shape::RawPointer(*self as *const ())
    }
}

// Tuples render as records with positional field names.

macro_rules! grok_tuple {
    ($($idx:tt $name:ident),+) => {
        impl<$($name: Grok),+> Grok for ($($name,)+) {
            fn declared() -> TypeDesc {
                TypeDesc::Tuple(vec![$($name::declared()),+])
            }

            fn type_desc(&self) -> TypeDesc {
                Self::declared()
            }

            fn shape(&self) -> Shape<'_> {
                Shape::Record(Record::new(vec![
                    $(Field::new(stringify!($idx), &self.$idx)),+
                ]))
            }
        }
    };
}

grok_tuple!(0 A, 1 B);
grok_tuple!(0 A, 1 B, 2 C);
grok_tuple!(0 A, 1 B, 2 C, 3 D);

/// Implements [`Grok`] for a plain struct by listing its fields.
///
/// ```
/// use grok::grok_record;
///
/// struct Person {
///     name: String,
///     age: u32,
/// }
///
/// grok_record!(Person { name, age });
/// ```
///
/// Fields that should not be read are marked `field: hidden` and render as
/// `... ???` in their declared position. A trailing `describe` routes the
/// value through its [`Describe`](crate::Describe) implementation instead of
/// enumerating fields.
#[macro_export]
macro_rules! grok_record {
    (@impl $ty:ident, [$($field:ident $(: $marker:ident)?),*], [$($describe:ident)?]) => {
        impl $crate::Grok for $ty {
            fn declared() -> $crate::TypeDesc {
                $crate::TypeDesc::named(stringify!($ty))
            }

            fn type_desc(&self) -> $crate::TypeDesc {
                <Self as $crate::Grok>::declared()
            }

            fn shape(&self) -> $crate::Shape<'_> {
                $crate::Shape::Record($crate::Record::new(vec![
                    $($crate::grok_record!(@field self, $field $(: $marker)?),)*
                ]))
            }

            fn as_any(&self) -> Option<&dyn ::std::any::Any> {
                Some(self)
            }

            $crate::grok_record!(@describe $($describe)?);
        }
    };
    (@field $this:tt, $field:ident) => {
        $crate::Field::new(stringify!($field), &$this.$field)
    };
    (@field $this:tt, $field:ident : hidden) => {
        $crate::Field::hidden(stringify!($field))
    };
    (@describe describe) => {
        fn as_describe(&self) -> Option<&dyn $crate::Describe> {
            Some(self)
        }
    };
    (@describe) => {};
    ($ty:ident { $($field:ident $(: $marker:ident)?),* $(,)? }) => {
        $crate::grok_record!(@impl $ty, [$($field $(: $marker)?),*], []);
    };
    ($ty:ident { $($field:ident $(: $marker:ident)?),* $(,)? } describe) => {
        $crate::grok_record!(@impl $ty, [$($field $(: $marker)?),*], [describe]);
    };
}
