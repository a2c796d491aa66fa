//! REPL command parsing and execution.
//!
//! Commands:
//! - `set <slot> <value...>` - Fill a form slot
//! - `unset <slot>` - Empty a form slot
//! - `show` - Print the form and the current notification
//! - `create`, `retrieve`/`get`, `update`, `delete`, `purchase`/`buy`,
//!   `search`/`list` - Press the matching button
//! - `clear` - Empty the form without contacting the server
//! - `results` - Print the last result table
//! - `preview <operation>` - Print the request an operation would send
//! - `help` - Show help
//! - `exit` - Exit the REPL

use nu_ansi_term::{Color, Style};

use catalog_core::{FormField, Operation};
use catalog_http::HttpExecutor;

use crate::context::CatalogContext;

/// Command words with their one-line descriptions, in help order.
pub const COMMANDS: &[(&str, &str)] = &[
    ("set", "Fill a form slot"),
    ("unset", "Empty a form slot"),
    ("show", "Print the form"),
    ("create", "Create a product from the form"),
    ("retrieve", "Fetch the product with the form's id"),
    ("get", "Fetch the product with the form's id"),
    ("update", "Replace the product with the form's id"),
    ("delete", "Delete the product with the form's id"),
    ("purchase", "Purchase using the purchase slots"),
    ("search", "Query products by the search slots"),
    ("clear", "Empty the form"),
    ("results", "Print the last result table"),
    ("preview", "Print the request an operation would send"),
    ("help", "Show help"),
    ("exit", "Exit the REPL"),
    ("quit", "Exit the REPL"),
];

/// Whether `word` starts a command, counting aliases.
pub fn is_command(word: &str) -> bool {
    let word = word.to_lowercase();
    COMMANDS.iter().any(|(command, _)| *command == word)
        || matches!(word.as_str(), "?" | "q")
        || word.parse::<Operation>().is_ok()
}

pub enum CommandResult {
    /// Command succeeded. `display` is printed as is, `notice` as a status line.
    Ok {
        display: Option<String>,
        notice: Option<String>,
    },
    Error(String),
    Exit,
    Help,
}

impl CommandResult {
    fn ok_display(display: impl Into<String>) -> Self {
        CommandResult::Ok {
            display: Some(display.into()),
            notice: None,
        }
    }

    fn ok_notice(notice: impl Into<String>) -> Self {
        CommandResult::Ok {
            display: None,
            notice: Some(notice.into()),
        }
    }

    fn ok_none() -> Self {
        CommandResult::Ok {
            display: None,
            notice: None,
        }
    }
}

/// Parse and execute a command line.
pub fn execute<E: HttpExecutor>(input: &str, ctx: &mut CatalogContext<E>) -> CommandResult {
    let input = input.trim();

    if input.is_empty() {
        return CommandResult::ok_none();
    }

    let (command, args) = split_word(input);

    match command.to_lowercase().as_str() {
        "help" | "?" => CommandResult::Help,
        "exit" | "quit" | "q" => CommandResult::Exit,
        "set" => cmd_set(args, ctx),
        "unset" => cmd_unset(args, ctx),
        "show" => cmd_show(ctx),
        "clear" => {
            ctx.session_mut().clear();
            CommandResult::ok_notice("Form cleared")
        }
        "results" => CommandResult::ok_display(ctx.session().results.to_string()),
        "preview" => cmd_preview(args, ctx),
        other => match other.parse::<Operation>() {
            Ok(operation) => cmd_operation(operation, ctx),
            Err(_) => CommandResult::Error(format!(
                "Unknown command: {}. Type 'help' for available commands.",
                command
            )),
        },
    }
}

/// Split off the first whitespace-delimited word.
fn split_word(input: &str) -> (&str, &str) {
    match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (input, ""),
    }
}

fn parse_field(name: &str) -> Result<FormField, CommandResult> {
    if name.is_empty() {
        return Err(CommandResult::Error(format!(
            "Missing slot name. Slots: {}",
            slot_names()
        )));
    }
    name.parse::<FormField>().map_err(|e| {
        CommandResult::Error(format!("{}. Slots: {}", e, slot_names()))
    })
}

fn slot_names() -> String {
    FormField::ALL
        .iter()
        .map(FormField::name)
        .collect::<Vec<_>>()
        .join(", ")
}

fn cmd_set<E: HttpExecutor>(args: &str, ctx: &mut CatalogContext<E>) -> CommandResult {
    let (name, value) = split_word(args);
    let field = match parse_field(name) {
        Ok(field) => field,
        Err(result) => return result,
    };

    ctx.session_mut().form.set(field, value);
    CommandResult::ok_none()
}

fn cmd_unset<E: HttpExecutor>(args: &str, ctx: &mut CatalogContext<E>) -> CommandResult {
    let field = match parse_field(args) {
        Ok(field) => field,
        Err(result) => return result,
    };

    ctx.session_mut().form.set(field, "");
    CommandResult::ok_none()
}

fn cmd_show<E: HttpExecutor>(ctx: &CatalogContext<E>) -> CommandResult {
    let session = ctx.session();
    let width = FormField::ALL
        .iter()
        .map(|field| field.name().len())
        .max()
        .unwrap_or(0);

    let mut lines: Vec<String> = session
        .form
        .slots()
        .map(|(field, value)| {
            let label = Color::Cyan.paint(format!("{:<width$}", field.name(), width = width));
            if value.is_empty() {
                format!("{}  {}", label, Color::DarkGray.paint("-"))
            } else {
                format!("{}  {}", label, value)
            }
        })
        .collect();

    if let Some(message) = session.notifier.message() {
        lines.push(String::new());
        lines.push(format!("{}  {}", Style::new().bold().paint("status"), message));
    }

    CommandResult::ok_display(lines.join("\n"))
}

fn cmd_operation<E: HttpExecutor>(
    operation: Operation,
    ctx: &mut CatalogContext<E>,
) -> CommandResult {
    if let Err(e) = ctx.run(operation) {
        return CommandResult::Error(e.to_string());
    }

    let session = ctx.session();
    let display = matches!(operation, Operation::Retrieve | Operation::Search)
        .then(|| session.results.to_string());

    CommandResult::Ok {
        display,
        notice: session.notifier.message().map(str::to_string),
    }
}

fn cmd_preview<E: HttpExecutor>(args: &str, ctx: &CatalogContext<E>) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Error("Usage: preview <operation>".to_string());
    }

    let operation = match args.parse::<Operation>() {
        Ok(operation) => operation,
        Err(e) => return CommandResult::Error(e.to_string()),
    };

    let request = match ctx.preview(operation) {
        Ok(request) => request,
        Err(e) => return CommandResult::Error(e.to_string()),
    };

    let mut text = format!(
        "{} {}",
        Color::Green.bold().paint(request.method.as_str()),
        request.target()
    );
    if let Some(body) = &request.body {
        match serde_json::to_string_pretty(body) {
            Ok(pretty) => {
                text.push('\n');
                text.push_str(&pretty);
            }
            Err(e) => return CommandResult::Error(format!("Failed to format body: {}", e)),
        }
    }

    CommandResult::ok_display(text)
}

pub fn format_help() -> String {
    let bold = Style::new().bold();
    let mut help = format!("{}\n", bold.paint("Commands:"));

    for (command, description) in COMMANDS {
        let usage = match *command {
            "set" => "set <slot> <value>",
            "unset" => "unset <slot>",
            "preview" => "preview <operation>",
            other => other,
        };
        help.push_str(&format!(
            "  {} {}\n",
            Color::Cyan.paint(format!("{:<22}", usage)),
            description
        ));
    }

    help.push_str(&format!("\n{}\n", bold.paint("Slots:")));
    help.push_str(&format!("  {}\n", slot_names()));
    help.push_str(&format!(
        "\n{}\n  {}\n",
        bold.paint("Price range:"),
        "set price_range 10-50   (either bound may be left empty)"
    ));

    help
}
