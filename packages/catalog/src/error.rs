//! Error types for the catalog client.
//!
//! Server rejections and transport failures are not errors here: they are
//! outcomes that end in a notification. These variants cover problems
//! detected before a request is issued.

use crate::dispatch::Operation;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Transport error: {0}")]
    Http(#[from] catalog_http::Error),

    #[error("A product id is required to {operation}")]
    MissingId { operation: Operation },

    #[error("Invalid configuration: {message}")]
    Config { message: String },

    #[error("Unknown form field: {name}")]
    UnknownField { name: String },

    #[error("Unknown operation: {name}")]
    UnknownOperation { name: String },
}
