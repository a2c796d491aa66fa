//! In-memory [`IoHost`] for driving the REPL loop from tests.

use std::collections::VecDeque;

use super::{InputLine, IoError, IoHost, Output, OutputStyle, PromptConfig, Signal};

/// Queued input, captured output.
///
/// Lines and signals are consumed in order. Every prompt the core renders
/// is kept so tests can follow the form's product id between commands.
#[derive(Debug, Default)]
pub struct TestHost {
    input_queue: VecDeque<String>,
    signal_queue: VecDeque<Signal>,
    output_buffer: Vec<Output>,
    prompts: Vec<PromptConfig>,
    flush_count: usize,
}

impl TestHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue_input(&mut self, line: impl Into<String>) {
        self.input_queue.push_back(line.into());
    }

    pub fn queue_inputs(&mut self, lines: impl IntoIterator<Item = impl Into<String>>) {
        for line in lines {
            self.queue_input(line);
        }
    }

    pub fn queue_signal(&mut self, signal: Signal) {
        self.signal_queue.push_back(signal);
    }

    pub fn output(&self) -> &[Output] {
        &self.output_buffer
    }

    /// All output text, one entry per line.
    pub fn output_text(&self) -> String {
        self.output_buffer
            .iter()
            .map(|o| o.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn output_with_style(&self, style: OutputStyle) -> Vec<&str> {
        self.output_buffer
            .iter()
            .filter(|o| o.style == style)
            .map(|o| o.text.as_str())
            .collect()
    }

    pub fn errors(&self) -> Vec<&str> {
        self.output_with_style(OutputStyle::Error)
    }

    /// Notifications and other status lines.
    pub fn infos(&self) -> Vec<&str> {
        self.output_with_style(OutputStyle::Info)
    }

    pub fn last_prompt(&self) -> Option<&PromptConfig> {
        self.prompts.last()
    }

    pub fn prompts(&self) -> &[PromptConfig] {
        &self.prompts
    }

    pub fn flush_count(&self) -> usize {
        self.flush_count
    }

    pub fn has_pending_input(&self) -> bool {
        !self.input_queue.is_empty()
    }
}

impl IoHost for TestHost {
    fn wait_for_input(&mut self) -> Result<(), IoError> {
        // A drained queue behaves like Ctrl+D so a test can never spin.
        if self.input_queue.is_empty() && self.signal_queue.is_empty() {
            self.signal_queue.push_back(Signal::Eof);
        }
        Ok(())
    }

    fn read_input(&mut self) -> Result<Option<InputLine>, IoError> {
        Ok(self.input_queue.pop_front().map(|line| InputLine { line }))
    }

    fn read_signal(&mut self) -> Result<Option<Signal>, IoError> {
        Ok(self.signal_queue.pop_front())
    }

    fn write_output(&mut self, output: Output) -> Result<(), IoError> {
        self.output_buffer.push(output);
        Ok(())
    }

    fn write_prompt(&mut self, config: PromptConfig) -> Result<(), IoError> {
        self.prompts.push(config);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), IoError> {
        self.flush_count += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inputs_are_returned_in_order() {
        let mut host = TestHost::new();
        host.queue_inputs(["set name Doll", "create"]);

        assert_eq!(host.read_input().unwrap().unwrap().line, "set name Doll");
        assert_eq!(host.read_input().unwrap().unwrap().line, "create");
        assert!(host.read_input().unwrap().is_none());
    }

    #[test]
    fn drained_queue_signals_eof() {
        let mut host = TestHost::new();
        host.wait_for_input().unwrap();
        assert!(matches!(host.read_signal().unwrap(), Some(Signal::Eof)));
    }

    #[test]
    fn pending_input_suppresses_eof() {
        let mut host = TestHost::new();
        host.queue_input("show");
        host.wait_for_input().unwrap();
        assert!(host.read_signal().unwrap().is_none());
        assert!(host.has_pending_input());
    }

    #[test]
    fn output_is_filtered_by_style() {
        let mut host = TestHost::new();
        host.write_output(Output::normal("table")).unwrap();
        host.write_output(Output::info("Product has been Created!")).unwrap();
        host.write_output(Output::error("A product id is required")).unwrap();

        assert_eq!(host.infos(), vec!["Product has been Created!"]);
        assert_eq!(host.errors(), vec!["A product id is required"]);
        assert_eq!(
            host.output_text(),
            "table\nProduct has been Created!\nA product id is required"
        );
    }

    #[test]
    fn prompts_are_kept() {
        let mut host = TestHost::new();
        assert!(host.last_prompt().is_none());

        host.write_prompt(PromptConfig {
            endpoint: "http://localhost:8080/api/products".to_string(),
            product_id: None,
        })
        .unwrap();
        host.write_prompt(PromptConfig {
            endpoint: "http://localhost:8080/api/products".to_string(),
            product_id: Some("7".to_string()),
        })
        .unwrap();

        assert_eq!(host.prompts().len(), 2);
        assert_eq!(host.last_prompt().unwrap().product_id.as_deref(), Some("7"));
    }

    #[test]
    fn flush_is_counted() {
        let mut host = TestHost::new();
        host.flush().unwrap();
        host.flush().unwrap();
        assert_eq!(host.flush_count(), 2);
    }
}
