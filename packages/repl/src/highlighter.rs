use catalog_core::{FormField, Operation};
use nu_ansi_term::{Color, Style};
use reedline::{Highlighter, StyledText};

use crate::commands;

/// Syntax highlighter for the REPL
#[derive(Debug, Default)]
pub struct ReplHighlighter;

impl ReplHighlighter {
    pub fn new() -> Self {
        Self
    }
}

impl Highlighter for ReplHighlighter {
    fn highlight(&self, line: &str, _cursor: usize) -> StyledText {
        let mut styled = StyledText::new();

        if line.is_empty() {
            return styled;
        }

        let (command, rest) = split_at_whitespace(line);

        let cmd_style = if commands::is_command(command) {
            Style::new().bold().fg(Color::Cyan)
        } else {
            Style::new().fg(Color::Red)
        };
        styled.push((cmd_style, command.to_string()));

        if rest.is_empty() {
            return styled;
        }

        match command.to_lowercase().as_str() {
            "set" | "unset" => {
                // Leading whitespace stays with the slot name.
                let body = rest.trim_start();
                let lead = &rest[..rest.len() - body.len()];
                let (slot, value) = split_at_whitespace(body);

                let slot_style = if slot.parse::<FormField>().is_ok() {
                    Style::new().fg(Color::Yellow)
                } else {
                    Style::new().fg(Color::Red)
                };
                styled.push((slot_style, format!("{}{}", lead, slot)));

                if !value.is_empty() {
                    styled.push((Style::new().fg(Color::Green), value.to_string()));
                }
            }
            "preview" => {
                let style = if rest.trim().parse::<Operation>().is_ok() {
                    Style::new().fg(Color::Yellow)
                } else {
                    Style::new().fg(Color::Red)
                };
                styled.push((style, rest.to_string()));
            }
            _ => {
                styled.push((Style::new(), rest.to_string()));
            }
        }

        styled
    }
}

fn split_at_whitespace(text: &str) -> (&str, &str) {
    match text.find(char::is_whitespace) {
        Some(pos) => (&text[..pos], &text[pos..]),
        None => (text, ""),
    }
}
