//! # catalog-core
//!
//! Request orchestration for a product-catalog REST client.
//!
//! The operator fills a [`FormState`] and triggers an [`Operation`]. The
//! [`RequestDispatcher`] turns the form into an HTTP request, sends it
//! through an injected [`catalog_http::HttpExecutor`], and folds the outcome
//! back into a [`Session`]: the form, the [`ResultTable`] and the single
//! status line held by the [`Notifier`].
//!
//! ```ignore
//! use catalog_core::{ClientConfig, FormField, Operation, RequestDispatcher, Session};
//!
//! let config = ClientConfig::from_env()?;
//! let dispatcher = RequestDispatcher::new(config.executor()?, config);
//! let mut session = Session::new();
//!
//! session.form.set(FormField::SearchCategory, "Toy");
//! session.form.set(FormField::PriceRange, "5-20");
//! dispatcher.dispatch(Operation::Search, &mut session)?;
//!
//! println!("{}", session.results);
//! println!("{}", session.notifier.message().unwrap_or_default());
//! ```

pub mod config;
pub mod dispatch;
pub mod error;
pub mod form;
pub mod notify;
pub mod payload;
pub mod product;
pub mod query;
pub mod results;

pub use config::{ClientConfig, RangeRouting};
pub use dispatch::{FailureKind, Operation, Outcome, RequestDispatcher, Session};
pub use error::Error;
pub use form::{FormField, FormState, PurchaseInputs};
pub use notify::Notifier;
pub use product::{Product, ProductFields, ProductId, PurchaseOrder};
pub use query::{PriceRange, QueryStringBuilder, SearchCriteria};
pub use results::{ResultSetRenderer, ResultTable};
