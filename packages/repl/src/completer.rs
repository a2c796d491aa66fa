use catalog_core::{FormField, Operation};
use reedline::{Completer, Span, Suggestion};

use crate::commands::COMMANDS;

/// Completes command words, slot names after `set`/`unset`, and
/// operation names after `preview`.
#[derive(Debug, Default)]
pub struct ReplCompleter;

impl ReplCompleter {
    pub fn new() -> Self {
        Self
    }
}

impl Completer for ReplCompleter {
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let line_to_pos = &line[..pos];
        let words: Vec<&str> = line_to_pos.split_whitespace().collect();
        let typing_new_word = line_to_pos.ends_with(char::is_whitespace);

        // The word under the cursor and where it starts.
        let (prefix, index) = if typing_new_word || words.is_empty() {
            ("", words.len())
        } else {
            (words[words.len() - 1], words.len() - 1)
        };
        let start = pos - prefix.len();
        let span = Span::new(start, pos);

        let candidates: Vec<(&str, String)> = match index {
            0 => COMMANDS
                .iter()
                .map(|(command, description)| (*command, description.to_string()))
                .collect(),
            1 => match words[0].to_lowercase().as_str() {
                "set" | "unset" => FormField::ALL
                    .iter()
                    .map(|field| (field.name(), "form slot".to_string()))
                    .collect(),
                "preview" => Operation::ALL
                    .iter()
                    .map(|operation| (operation.name(), "operation".to_string()))
                    .collect(),
                _ => Vec::new(),
            },
            _ => Vec::new(),
        };

        candidates
            .into_iter()
            .filter(|(value, _)| value.starts_with(prefix))
            .map(|(value, description)| Suggestion {
                value: value.to_string(),
                description: Some(description),
                style: None,
                extra: None,
                span,
                append_whitespace: true,
                match_indices: None,
            })
            .collect()
    }
}
