//! # catalog-http
//!
//! The transport capability used by the product catalog client.
//!
//! Callers describe a request with [`HttpRequest`] and hand it to an
//! [`HttpExecutor`]. The executor resolves to an [`HttpResponse`] when the
//! server answered (any status), or to an [`Error`] when no response was
//! obtained at all.
//!
//! ```ignore
//! use catalog_http::{HttpExecutor, HttpRequest, ReqwestExecutor};
//!
//! let executor = ReqwestExecutor::with_default_timeout("http://localhost:8080")?;
//!
//! let response = executor.execute(
//!     &HttpRequest::get("/products").with_query("category", "Toy"),
//! )?;
//! assert!(response.is_success());
//! ```

pub mod error;
pub mod executor;
pub mod types;

pub use error::Error;
pub use executor::{HttpExecutor, ReqwestExecutor};
pub use types::{HttpRequest, HttpResponse, Method};

#[cfg(any(test, feature = "mock"))]
pub use executor::mock::MockExecutor;
