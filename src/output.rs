use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;

/// Only one top-level render is written at a time.
pub(crate) static RENDER_LOCK: Mutex<()> = parking_lot::const_mutex(());

/// Destination for rendered output.
#[derive(Clone, Default)]
pub enum Sink {
    #[default]
    Stdout,
    Stderr,
    Shared(Arc<Mutex<dyn Write + Send>>),
}

impl Sink {
    pub fn write_all(&self, bytes: &[u8]) -> io::Result<()> {
        match self {
            Sink::Stdout => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(bytes)?;
                stdout.flush()
            }
            Sink::Stderr => {
                let mut stderr = io::stderr().lock();
                stderr.write_all(bytes)?;
                stderr.flush()
            }
            Sink::Shared(writer) => {
                let mut writer = writer.lock();
                writer.write_all(bytes)?;
                writer.flush()
            }
        }
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sink::Stdout => write!(f, "Stdout"),
            Sink::Stderr => write!(f, "Stderr"),
            Sink::Shared(_) => write!(f, "Shared(..)"),
        }
    }
}
