//! Platform-independent REPL core.

use catalog_core::{ClientConfig, FormField};
use catalog_http::{HttpExecutor, ReqwestExecutor};

use crate::commands::{self, CommandResult};
use crate::context::CatalogContext;
use crate::host::TerminalHost;
use crate::io::{ExitReason, IoError, IoHost, Output, PromptConfig, Signal};

#[derive(Debug, thiserror::Error)]
pub enum ReplError {
    #[error(transparent)]
    Catalog(#[from] catalog_core::Error),

    #[error(transparent)]
    Io(#[from] IoError),

    #[error("Terminal setup failed: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Run an interactive session against the configured server.
pub fn run(config: ClientConfig) -> Result<ExitReason, ReplError> {
    let executor = config.executor()?;
    tracing::info!(base_url = %config.base_url, prefix = %config.api_prefix, "starting session");

    let mut core = ReplCore::new(CatalogContext::new(executor, config));
    let mut host = TerminalHost::new()?;
    Ok(core.run(&mut host)?)
}

/// The REPL loop, independent of where input comes from.
pub struct ReplCore<E = ReqwestExecutor> {
    ctx: CatalogContext<E>,
}

impl<E: HttpExecutor> ReplCore<E> {
    pub fn new(ctx: CatalogContext<E>) -> Self {
        Self { ctx }
    }

    /// Read and execute commands until `exit` or end of input.
    pub fn run(&mut self, io: &mut impl IoHost) -> Result<ExitReason, IoError> {
        io.write_output(Output::banner(BANNER))?;

        loop {
            self.update_prompt(io)?;
            io.wait_for_input()?;

            if let Some(signal) = io.read_signal()? {
                match signal {
                    Signal::Eof => {
                        io.write_output(Output::info("Goodbye!"))?;
                        io.flush()?;
                        return Ok(ExitReason::Eof);
                    }
                    Signal::Interrupt => {
                        io.write_output(Output::info("^C (use 'exit' to quit)"))?;
                        continue;
                    }
                }
            }

            let input = match io.read_input()? {
                Some(input) => input,
                None => continue,
            };

            match commands::execute(&input.line, &mut self.ctx) {
                CommandResult::Ok { display, notice } => {
                    if let Some(display) = display {
                        io.write_output(Output::normal(display))?;
                    }
                    if let Some(notice) = notice {
                        io.write_output(Output::info(notice))?;
                    }
                }
                CommandResult::Error(msg) => {
                    io.write_output(Output::error(msg))?;
                }
                CommandResult::Help => {
                    io.write_output(Output::normal(commands::format_help()))?;
                }
                CommandResult::Exit => {
                    io.write_output(Output::info("Goodbye!"))?;
                    io.flush()?;
                    return Ok(ExitReason::UserExit);
                }
            }

            io.flush()?;
        }
    }

    pub fn context(&self) -> &CatalogContext<E> {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut CatalogContext<E> {
        &mut self.ctx
    }

    fn update_prompt(&self, io: &mut impl IoHost) -> Result<(), IoError> {
        let id = self.ctx.session().form.get(FormField::Id).trim();

        io.write_prompt(PromptConfig {
            endpoint: self.ctx.endpoint(),
            product_id: (!id.is_empty()).then(|| id.to_string()),
        })
    }
}

const BANNER: &str = r#"
catalog - product catalog client

Fill the form with 'set <slot> <value>', then run an operation
(create, retrieve, update, delete, purchase, search).
Type 'help' for available commands, 'exit' to quit.
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::TestHost;
    use catalog_core::notify;
    use catalog_http::{HttpResponse, MockExecutor};
    use serde_json::json;

    fn core(executor: &MockExecutor) -> ReplCore<&MockExecutor> {
        ReplCore::new(CatalogContext::new(executor, ClientConfig::api_profile()))
    }

    #[test]
    fn test_exit_command() {
        let executor = MockExecutor::new();
        let mut core = core(&executor);
        let mut host = TestHost::new();
        host.queue_input("exit");

        let result = core.run(&mut host);

        assert!(matches!(result, Ok(ExitReason::UserExit)));
        assert!(host.infos().contains(&"Goodbye!"));
    }

    #[test]
    fn test_eof_signal() {
        let executor = MockExecutor::new();
        let mut core = core(&executor);
        let mut host = TestHost::new();
        host.queue_signal(Signal::Eof);

        assert!(matches!(core.run(&mut host), Ok(ExitReason::Eof)));
    }

    #[test]
    fn test_interrupt_keeps_running() {
        let executor = MockExecutor::new();
        let mut core = core(&executor);
        let mut host = TestHost::new();
        host.queue_signal(Signal::Interrupt);
        host.queue_input("exit");

        assert!(matches!(core.run(&mut host), Ok(ExitReason::UserExit)));
        assert!(host.output_text().contains("^C"));
    }

    #[test]
    fn test_create_then_retrieve_session() {
        let executor = MockExecutor::new()
            .with_response(
                "POST /api/products",
                HttpResponse::json_body(
                    201,
                    json!({"id": 7, "name": "Doll", "description": "d", "category": "Toy", "price": 4.5}),
                ),
            )
            .with_response(
                "GET /api/products/7",
                MockExecutor::success_response(
                    json!({"id": 7, "name": "Doll", "description": "d", "category": "Toy", "price": 4.5}),
                ),
            );
        let mut core = core(&executor);
        let mut host = TestHost::new();
        host.queue_inputs([
            "set name Doll",
            "set description d",
            "set category Toy",
            "set price 4.5",
            "create",
            "retrieve",
            "exit",
        ]);

        core.run(&mut host).unwrap();

        let infos = host.infos();
        assert!(infos.contains(&notify::CREATED));
        assert!(infos.contains(&notify::RETRIEVED));
        assert!(host.output_text().contains("Toy"));
        assert_eq!(
            host.last_prompt().unwrap().product_id.as_deref(),
            Some("7")
        );
        assert_eq!(
            host.last_prompt().unwrap().endpoint,
            "http://localhost:8080/api/products"
        );
    }

    #[test]
    fn test_retrieve_failure_shows_server_message() {
        let executor = MockExecutor::new().with_response(
            "/api/products/9",
            MockExecutor::error_response(404, "Product with id '9' was not found."),
        );
        let mut core = core(&executor);
        let mut host = TestHost::new();
        host.queue_inputs(["set id 9", "retrieve"]);

        assert!(matches!(core.run(&mut host), Ok(ExitReason::Eof)));

        assert!(host
            .infos()
            .contains(&"Product with id '9' was not found."));
        assert_eq!(host.last_prompt().unwrap().product_id, None);
    }

    #[test]
    fn test_missing_id_is_reported_as_error() {
        let executor = MockExecutor::new();
        let mut core = core(&executor);
        let mut host = TestHost::new();
        host.queue_input("update");

        core.run(&mut host).unwrap();

        assert_eq!(host.errors(), vec!["A product id is required to update"]);
        assert!(executor.recorded_requests().is_empty());
    }

    #[test]
    fn test_unreachable_server_shows_generic_message() {
        let executor = MockExecutor::new().fail_with("connection refused");
        let mut core = core(&executor);
        let mut host = TestHost::new();
        host.queue_input("search");

        core.run(&mut host).unwrap();

        assert!(host.infos().contains(&notify::SERVER_ERROR));
    }

    #[test]
    fn test_help_output() {
        let executor = MockExecutor::new();
        let mut core = core(&executor);
        let mut host = TestHost::new();
        host.queue_input("help");

        core.run(&mut host).unwrap();

        assert!(host.output_text().contains("price_range"));
    }
}
