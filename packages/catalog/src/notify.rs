//! The single status line shown to the operator.

pub const CREATED: &str = "Product has been Created!";
pub const RETRIEVED: &str = "Product has been Retrieved!";
pub const UPDATED: &str = "Product has been Updated!";
pub const DELETED: &str = "Product has been Deleted!";
pub const PURCHASED: &str = "Product has been Purchased!";
pub const SEARCHED: &str = "Queried Products have been Returned!";
/// Shown whenever no server-supplied message is used.
pub const SERVER_ERROR: &str = "Server error!";

/// Holds exactly one current message; each notification replaces the last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notifier {
    current: Option<String>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notify(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!(%message, "notification");
        self.current = Some(message);
    }

    pub fn message(&self) -> Option<&str> {
        self.current.as_deref()
    }
}
