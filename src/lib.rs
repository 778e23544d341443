//! # grok
//!
//! Renders any value implementing [`Grok`] as a deterministic, indented and
//! optionally colourized text tree.
//!
//! ```
//! use grok::{grok_record, Options};
//!
//! struct Person {
//!     name: String,
//!     age: u32,
//! }
//!
//! grok_record!(Person { name, age });
//!
//! let person = Person { name: "Ann".to_string(), age: 7 };
//! let text = grok::to_string(&person, &Options::new().colour(false));
//! assert_eq!(
//!     text,
//!     "value Person = {\n  name String = \"Ann\" 3\n  age u32 = 7\n}\n"
//! );
//! ```

use std::io::Write;

use tracing::debug;

pub mod config;
pub mod error;
pub mod input;
pub mod inspect;
pub mod options;
pub mod output;
pub mod renderer;

#[cfg(test)]
mod tests;

pub use config::FileConfig;
pub use error::{Error, Result};
pub use inspect::{
    ChanDir, Describe, Field, FieldValue, Grok, Kind, Record, Shape, TypeDesc, WellKnown,
};
pub use options::Options;
pub use output::Sink;
pub use renderer::{Render, RenderContext};

/// Prints `value` to stdout with the default options.
pub fn value<T: Grok>(value: &T) -> Result<()> {
    value_with(value, &Options::default())
}

/// Prints `value` to the sink configured in `options`.
pub fn value_with<T: Grok>(value: &T, options: &Options) -> Result<()> {
    let _guard = output::RENDER_LOCK.lock();
    let rendered = to_string(value, options);
    options.destination().write_all(rendered.as_bytes())?;
    Ok(())
}

/// Writes `value` to `writer`, holding the render lock until it is written.
pub fn write<W, T>(writer: &mut W, value: &T, options: &Options) -> Result<()>
where
    W: Write + ?Sized,
    T: Grok,
{
    let _guard = output::RENDER_LOCK.lock();
    let rendered = to_string(value, options);
    writer.write_all(rendered.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Renders `value` to a string without writing it anywhere.
pub fn to_string<T: Grok>(value: &T, options: &Options) -> String {
    let context = options.context();
    debug!(
        max_depth = context.max_depth,
        max_length = context.max_length,
        colour = context.colour,
        "rendering value"
    );
    value.render(context)
}
