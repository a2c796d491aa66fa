//! I/O abstraction for the REPL.
//!
//! The core talks to the operator only through [`IoHost`], so the same loop
//! runs against a reedline terminal or an in-memory host in tests.

pub mod types;

#[cfg(test)]
pub mod test_host;

pub use types::*;

#[cfg(test)]
pub use test_host::TestHost;

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("I/O error: {0}")]
    Io(String),
}

/// Host interface for REPL I/O.
pub trait IoHost {
    /// Block until a line or a signal is available.
    ///
    /// Afterwards `read_input()` or `read_signal()` returns it.
    fn wait_for_input(&mut self) -> Result<(), IoError>;

    /// The next input line, or `None` if nothing is ready.
    fn read_input(&mut self) -> Result<Option<InputLine>, IoError>;

    /// A pending Ctrl+C or Ctrl+D, if any.
    fn read_signal(&mut self) -> Result<Option<Signal>, IoError>;

    fn write_output(&mut self, output: Output) -> Result<(), IoError>;

    /// Update what the host renders before the next input.
    fn write_prompt(&mut self, config: PromptConfig) -> Result<(), IoError>;

    fn flush(&mut self) -> Result<(), IoError> {
        Ok(())
    }
}
