//! Request dispatch and response reconciliation.
//!
//! Each operation runs in two steps. [`RequestDispatcher::prepare`] reads
//! the form and builds the request; [`Session::apply`] folds the outcome
//! back into the form, the result table and the notifier. Nothing orders
//! two overlapping operations: whichever outcome is applied last owns the
//! form.
//!
//! | Operation | Request | Failure message |
//! |---|---|---|
//! | Create | `POST {prefix}` | server `message` |
//! | Retrieve | `GET {prefix}/{id}` | server `message` |
//! | Update | `PUT {prefix}/{id}` | server `message` |
//! | Delete | `DELETE {prefix}/{id}` | always generic |
//! | Purchase | `POST {prefix}/{id}/purchase` | always generic |
//! | Search | `GET {prefix}` or `GET {prefix}/price`, plus query | server `message` |

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use catalog_http::{HttpExecutor, HttpRequest, HttpResponse};

use crate::config::{ClientConfig, RangeRouting};
use crate::error::Error;
use crate::form::FormState;
use crate::notify::{self, Notifier};
use crate::payload;
use crate::product::{Product, ProductId};
use crate::query::{QueryStringBuilder, SearchCriteria};
use crate::results::{ResultSetRenderer, ResultTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Retrieve,
    Update,
    Delete,
    Purchase,
    Search,
}

impl Operation {
    pub const ALL: [Operation; 6] = [
        Operation::Create,
        Operation::Retrieve,
        Operation::Update,
        Operation::Delete,
        Operation::Purchase,
        Operation::Search,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Retrieve => "retrieve",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::Purchase => "purchase",
            Operation::Search => "search",
        }
    }

    /// Whether a failure shows the server's `message`.
    ///
    /// Delete and Purchase always show the generic text, even when the
    /// server sent a message.
    pub fn shows_server_message(&self) -> bool {
        !matches!(self, Operation::Delete | Operation::Purchase)
    }

    fn success_message(&self) -> &'static str {
        match self {
            Operation::Create => notify::CREATED,
            Operation::Retrieve => notify::RETRIEVED,
            Operation::Update => notify::UPDATED,
            Operation::Delete => notify::DELETED,
            Operation::Purchase => notify::PURCHASED,
            Operation::Search => notify::SEARCHED,
        }
    }

    /// The text to show for a failure carrying `message`.
    pub fn failure_message<'a>(&self, message: Option<&'a str>) -> &'a str {
        match message {
            Some(message) if self.shows_server_message() => message,
            _ => notify::SERVER_ERROR,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "create" => Ok(Operation::Create),
            "retrieve" | "get" => Ok(Operation::Retrieve),
            "update" => Ok(Operation::Update),
            "delete" => Ok(Operation::Delete),
            "purchase" | "buy" => Ok(Operation::Purchase),
            "search" | "list" => Ok(Operation::Search),
            _ => Err(Error::UnknownOperation {
                name: s.to_string(),
            }),
        }
    }
}

/// Why an operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The server declined the request (4xx other than 404).
    Validation,
    /// The addressed product does not exist (404).
    NotFound,
    /// The server answered with a non-success status outside 4xx.
    Server,
    /// No response was obtained.
    Transport,
}

/// The tagged result of one request.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(Value),
    Failure {
        kind: FailureKind,
        /// The `message` field of the error body, when present.
        message: Option<String>,
    },
}

impl Outcome {
    pub fn from_response(response: HttpResponse) -> Self {
        if response.is_success() {
            return Outcome::Success(response.body);
        }

        let kind = match response.status {
            404 => FailureKind::NotFound,
            _ if response.is_client_error() => FailureKind::Validation,
            _ => FailureKind::Server,
        };
        Outcome::Failure {
            kind,
            message: response.message().map(str::to_string),
        }
    }

    pub fn from_transport(result: Result<HttpResponse, catalog_http::Error>) -> Self {
        match result {
            Ok(response) => Self::from_response(response),
            Err(error) => {
                tracing::warn!(%error, "no response from catalog service");
                Outcome::Failure {
                    kind: FailureKind::Transport,
                    message: None,
                }
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }
}

/// Everything an operation may touch once its response arrives.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub form: FormState,
    pub results: ResultTable,
    pub notifier: Notifier,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// The Clear action. No request is issued.
    pub fn clear(&mut self) {
        self.form.clear();
    }

    /// Fold the outcome of `operation` into the session.
    pub fn apply(&mut self, operation: Operation, outcome: Outcome) {
        match outcome {
            Outcome::Success(body) => self.apply_success(operation, body),
            Outcome::Failure { kind, message } => {
                tracing::warn!(%operation, ?kind, ?message, "operation failed");
                if operation == Operation::Retrieve {
                    self.form.clear();
                    self.results = ResultTable::empty();
                }
                let text = operation.failure_message(message.as_deref()).to_string();
                self.notifier.notify(text);
            }
        }
    }

    fn apply_success(&mut self, operation: Operation, body: Value) {
        let applied = match operation {
            Operation::Create | Operation::Update => {
                serde_json::from_value::<Product>(body).map(|product| self.form.replace(&product))
            }
            Operation::Retrieve => serde_json::from_value::<Product>(body).map(|product| {
                self.results = ResultSetRenderer::render_single(&product, &mut self.form);
            }),
            Operation::Delete | Operation::Purchase => {
                self.form.clear();
                Ok(())
            }
            Operation::Search => serde_json::from_value::<Vec<Product>>(body).map(|products| {
                tracing::debug!(count = products.len(), "search returned");
                self.results = ResultSetRenderer::render(&products, &mut self.form);
            }),
        };

        match applied {
            Ok(()) => {
                tracing::info!(%operation, "operation succeeded");
                self.notifier.notify(operation.success_message());
            }
            Err(error) => {
                tracing::warn!(%operation, %error, "unexpected response body");
                self.notifier.notify(notify::SERVER_ERROR);
            }
        }
    }
}

/// Issues operations through an injected transport.
pub struct RequestDispatcher<E> {
    executor: E,
    config: ClientConfig,
}

impl<E: HttpExecutor> RequestDispatcher<E> {
    pub fn new(executor: E, config: ClientConfig) -> Self {
        Self { executor, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Build the request for `operation` from the current form.
    pub fn prepare(&self, operation: Operation, form: &FormState) -> Result<HttpRequest, Error> {
        let config = &self.config;

        let request = match operation {
            Operation::Create => HttpRequest::post(config.collection_path())
                .with_json_body(payload::product_body(&form.product_fields())),
            Operation::Retrieve => {
                HttpRequest::get(config.item_path(&required(operation, form.product_id())?))
            }
            Operation::Update => {
                HttpRequest::put(config.item_path(&required(operation, form.product_id())?))
                    .with_json_body(payload::product_body(&form.product_fields()))
            }
            Operation::Delete => {
                HttpRequest::delete(config.item_path(&required(operation, form.product_id())?))
            }
            Operation::Purchase => {
                let id = required(operation, form.purchase_product_id())?;
                HttpRequest::post(config.purchase_path(&id))
                    .with_json_body(payload::purchase_body(&form.purchase_order()))
            }
            Operation::Search => self.search_request(&form.search_criteria()),
        };

        tracing::debug!(%operation, method = %request.method, uri = %request.target(), "prepared request");
        Ok(request)
    }

    fn search_request(&self, criteria: &SearchCriteria) -> HttpRequest {
        let builder = QueryStringBuilder::new(criteria);
        let path = match self.config.range_routing {
            RangeRouting::Dedicated if builder.has_price_filter() => self.config.price_path(),
            _ => self.config.collection_path(),
        };

        builder.apply(HttpRequest::get(path))
    }

    /// Send an already prepared request.
    pub fn send(&self, request: &HttpRequest) -> Outcome {
        Outcome::from_transport(self.executor.execute(request))
    }

    /// Prepare, send and apply `operation` against `session`.
    ///
    /// Server and transport failures end up in the notifier and are not
    /// returned as errors. An `Err` means no request was sent; its text is
    /// also shown through the notifier.
    pub fn dispatch(&self, operation: Operation, session: &mut Session) -> Result<(), Error> {
        let request = match self.prepare(operation, &session.form) {
            Ok(request) => request,
            Err(error) => {
                session.notifier.notify(error.to_string());
                return Err(error);
            }
        };

        let outcome = self.send(&request);
        session.apply(operation, outcome);
        Ok(())
    }
}

fn required(operation: Operation, id: Option<ProductId>) -> Result<ProductId, Error> {
    id.ok_or(Error::MissingId { operation })
}
