//! Interactive hosts for the REPL.

pub mod terminal;

pub use terminal::TerminalHost;
