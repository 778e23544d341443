//! Library types that get a one-line summary instead of field enumeration
//! once they are nested inside another value.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, Utc};

use crate::inspect::types::*;

type Summarizer = Arc<dyn Fn(&dyn Any) -> Option<String> + Send + Sync>;

/// Registry mapping a concrete type to its summary renderer.
#[derive(Clone)]
pub struct WellKnown {
    summarizers: HashMap<TypeId, Summarizer>,
}

impl WellKnown {
    /// A registry with nothing in it.
    pub fn empty() -> Self {
        Self {
            summarizers: HashMap::new(),
        }
    }

    /// Registers (or replaces) the summary for `T`.
    pub fn register<T, F>(&mut self, summarize: F)
    where
        T: Any,
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        let summarizer: Summarizer =
            Arc::new(move |value: &dyn Any| value.downcast_ref::<T>().map(&summarize));
        self.summarizers.insert(TypeId::of::<T>(), summarizer);
    }

    pub fn summarize(&self, value: &dyn Any) -> Option<String> {
        self.summarizers
            .get(&value.type_id())
            .and_then(|summarize| summarize(value))
    }
}

impl Default for WellKnown {
    fn default() -> Self {
        let mut registry = Self::empty();

        registry.register(|t: &DateTime<Utc>| t.to_string());
        registry.register(|t: &DateTime<Local>| t.to_string());
        registry.register(|t: &DateTime<FixedOffset>| t.to_string());
        registry.register(|t: &NaiveDateTime| t.to_string());

        registry.register(|_: &Utc| "UTC".to_string());
        registry.register(|_: &Local| "Local".to_string());
        registry.register(|tz: &FixedOffset| tz.to_string());

        registry.register(|r: &reqwest::Request| {
            request_summary(
                r.method().as_str(),
                r.url().as_str(),
                body_length(r.body().map(|b| b.as_bytes())),
            )
        });
        registry.register(|r: &reqwest::blocking::Request| {
            request_summary(
                r.method().as_str(),
                r.url().as_str(),
                body_length(r.body().map(|b| b.as_bytes())),
            )
        });
        registry.register(|r: &reqwest::Response| {
            response_summary(&status_line(r.status()), known_length(r.content_length()))
        });
        registry.register(|r: &reqwest::blocking::Response| {
            response_summary(&status_line(r.status()), known_length(r.content_length()))
        });

        registry
    }
}

impl fmt::Debug for WellKnown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WellKnown")
            .field("types", &self.summarizers.len())
            .finish()
    }
}

/// First non-empty string, or an empty one.
pub fn coalesce<'a>(values: &[&'a str]) -> &'a str {
    values.iter().copied().find(|v| !v.is_empty()).unwrap_or("")
}

/// `<METHOD> <URI> <content-length>`
pub fn request_summary(method: &str, uri: &str, content_length: i64) -> String {
    format!(
        "{} {} {}",
        coalesce(&[method, "GET"]),
        coalesce(&[uri, "<request-uri>"]),
        content_length
    )
}

/// `<status-line> <content-length>`
pub fn response_summary(status: &str, content_length: i64) -> String {
    format!(
        "{} {}",
        coalesce(&[status, "<status-code> <status>"]),
        content_length
    )
}

fn status_line(status: reqwest::StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_str(), reason),
        None => status.as_str().to_string(),
    }
}

/// No body is zero, a streaming body is unknown (-1).
fn body_length(body: Option<Option<&[u8]>>) -> i64 {
    match body {
        None => 0,
        Some(Some(bytes)) => bytes.len() as i64,
        Some(None) => -1,
    }
}

fn known_length(length: Option<u64>) -> i64 {
    length.map_or(-1, |n| n as i64)
}

// Generic views, used when these types are rendered at the top level.

macro_rules! grok_datetime {
    ($($tz:ident),*) => {
        $(
            impl Grok for DateTime<$tz> {
                fn declared() -> TypeDesc {
                    TypeDesc::named(concat!("DateTime<", stringify!($tz), ">"))
                }

                fn type_desc(&self) -> TypeDesc {
                    Self::declared()
                }

                fn shape(&self) -> Shape<'_> {
                    Shape::Record(Record::new(vec![
                        Field::computed("timestamp", self.timestamp()),
                        Field::computed("nanos", self.timestamp_subsec_nanos()),
                        Field::computed("offset", self.offset().to_string()),
                    ]))
                }

                fn as_any(&self) -> Option<&dyn Any> {
                    Some(self)
                }
            }
        )*
    };
}

grok_datetime!(Utc, Local, FixedOffset);

impl Grok for NaiveDateTime {
    fn declared() -> TypeDesc {
        TypeDesc::named("NaiveDateTime")
    }

    fn type_desc(&self) -> TypeDesc {
        Self::declared()
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Record(Record::new(vec![
            Field::computed("date", self.date().to_string()),
            Field::computed("time", self.time().to_string()),
        ]))
    }

    fn as_any(&self) -> Option<&dyn Any> {
        Some(self)
    }
}

macro_rules! grok_unit_zone {
    ($($tz:ident => $name:literal),*) => {
        $(
            impl Grok for $tz {
                fn declared() -> TypeDesc {
                    TypeDesc::named(stringify!($tz))
                }

                fn type_desc(&self) -> TypeDesc {
                    Self::declared()
                }

                fn shape(&self) -> Shape<'_> {
                    Shape::Record(Record::new(vec![Field::computed("name", $name)]))
                }

                fn as_any(&self) -> Option<&dyn Any> {
                    Some(self)
                }
            }
        )*
    };
}

grok_unit_zone!(Utc => "UTC", Local => "Local");

impl Grok for FixedOffset {
    fn declared() -> TypeDesc {
        TypeDesc::named("FixedOffset")
    }

    fn type_desc(&self) -> TypeDesc {
        Self::declared()
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Record(Record::new(vec![Field::computed(
            "seconds",
            self.local_minus_utc(),
        )]))
    }

    fn as_any(&self) -> Option<&dyn Any> {
        Some(self)
    }
}

macro_rules! grok_request {
    ($($ty:ty => $name:literal),*) => {
        $(
            impl Grok for $ty {
                fn declared() -> TypeDesc {
                    TypeDesc::named($name)
                }

                fn type_desc(&self) -> TypeDesc {
                    Self::declared()
                }

                fn shape(&self) -> Shape<'_> {
                    Shape::Record(Record::new(vec![
                        Field::computed("method", self.method().to_string()),
                        Field::computed("url", self.url().to_string()),
                        Field::computed(
                            "content_length",
                            body_length(self.body().map(|b| b.as_bytes())),
                        ),
                    ]))
                }

                fn as_any(&self) -> Option<&dyn Any> {
                    Some(self)
                }
            }
        )*
    };
}

grok_request!(
    reqwest::Request => "reqwest::Request",
    reqwest::blocking::Request => "reqwest::blocking::Request"
);

macro_rules! grok_response {
    ($($ty:ty => $name:literal),*) => {
        $(
            impl Grok for $ty {
                fn declared() -> TypeDesc {
                    TypeDesc::named($name)
                }

                fn type_desc(&self) -> TypeDesc {
                    Self::declared()
                }

                fn shape(&self) -> Shape<'_> {
                    Shape::Record(Record::new(vec![
                        Field::computed("status", self.status().as_u16()),
                        Field::computed("url", self.url().to_string()),
                        Field::computed("content_length", self.content_length()),
                    ]))
                }

                fn as_any(&self) -> Option<&dyn Any> {
                    Some(self)
                }
            }
        )*
    };
}

grok_response!(
    reqwest::Response => "reqwest::Response",
    reqwest::blocking::Response => "reqwest::blocking::Response"
);
