//! # catalog-repl
//!
//! An interactive terminal client for the product catalog service.
//!
//! The terminal stands in for the catalog's web form: slots are filled with
//! `set`, buttons are pressed by naming the operation, and each operation
//! prints its result table and status line.
//!
//! ## Usage
//!
//! ```bash
//! catalog --base-url http://localhost:8080
//!
//! # Inside the REPL:
//! > set name Fire Truck
//! > set category Toy
//! > set price 19.99
//! > create
//! > set search_category Toy
//! > set price_range 10-50
//! > search
//! ```
//!
//! Vi mode is picked up from EDITOR, VISUAL or `.inputrc`, and can be forced
//! with `CATALOG_EDIT_MODE`.

pub mod commands;
pub mod completer;
pub mod context;
pub mod highlighter;
pub mod host;
pub mod io;
pub mod repl;

pub use context::CatalogContext;
pub use repl::{run, ReplCore, ReplError};
