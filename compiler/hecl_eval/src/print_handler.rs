//! Output destination for `puts`.
//!
//! Scripts write through a [`SharedPrintHandler`] owned by the interpreter:
//! stdout by default, a capture buffer for tests and embedders that
//! display output themselves, or nothing at all.

use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;

/// Where printed text goes. Enum dispatch, no trait objects.
#[derive(Debug)]
pub enum PrintHandler {
    Stdout,
    /// Accumulates everything written.
    Buffer(Mutex<String>),
    /// Drops all output.
    Silent,
}

impl PrintHandler {
    /// Write `msg` followed by a newline.
    pub fn println(&self, msg: &str) {
        match self {
            Self::Stdout => {
                // A closed stdout is not a script error
                let _ = writeln!(std::io::stdout().lock(), "{msg}");
            }
            Self::Buffer(buffer) => {
                let mut buffer = buffer.lock();
                buffer.push_str(msg);
                buffer.push('\n');
            }
            Self::Silent => {}
        }
    }

    /// Captured output. Empty unless this is a buffer.
    pub fn output(&self) -> String {
        match self {
            Self::Buffer(buffer) => buffer.lock().clone(),
            Self::Stdout | Self::Silent => String::new(),
        }
    }

    pub fn clear(&self) {
        if let Self::Buffer(buffer) = self {
            buffer.lock().clear();
        }
    }
}

/// Handler shared between an interpreter and its embedder.
pub type SharedPrintHandler = Arc<PrintHandler>;

pub fn stdout_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Stdout)
}

pub fn buffer_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Buffer(Mutex::new(String::new())))
}

pub fn silent_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Silent)
}
