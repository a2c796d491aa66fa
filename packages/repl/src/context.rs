//! Session state behind the REPL.

use catalog_core::{ClientConfig, Error, Operation, RequestDispatcher, Session};
use catalog_http::{HttpExecutor, HttpRequest};

/// The dispatcher plus the one session it acts on.
pub struct CatalogContext<E> {
    dispatcher: RequestDispatcher<E>,
    session: Session,
}

impl<E: HttpExecutor> CatalogContext<E> {
    pub fn new(executor: E, config: ClientConfig) -> Self {
        Self {
            dispatcher: RequestDispatcher::new(executor, config),
            session: Session::new(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        self.dispatcher.config()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// The collection URL, for the prompt.
    pub fn endpoint(&self) -> String {
        let config = self.config();
        format!(
            "{}{}",
            config.base_url.trim_end_matches('/'),
            config.collection_path()
        )
    }

    pub fn run(&mut self, operation: Operation) -> Result<(), Error> {
        self.dispatcher.dispatch(operation, &mut self.session)
    }

    /// The request `operation` would send right now.
    pub fn preview(&self, operation: Operation) -> Result<HttpRequest, Error> {
        self.dispatcher.prepare(operation, &self.session.form)
    }
}
