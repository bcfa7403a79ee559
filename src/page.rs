//! In-memory model of the admin page.
//!
//! The host document owns the elements; the controller owns their content.
//! Each region is addressed by the element identifier the host page uses.

use serde::{Deserialize, Serialize};

/// Fixed element identifiers of the host page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementId {
    ServerStatus,
    RequestStats,
    ActiveBots,
    BotList,
    BotSelect,
    ModelSelection,
    ModelSelect,
    TestMessage,
    SendTest,
    TestResult,
    TestResponse,
    ConnectionStatus,
}

impl ElementId {
    pub const ALL: [ElementId; 12] = [
        ElementId::ServerStatus,
        ElementId::RequestStats,
        ElementId::ActiveBots,
        ElementId::BotList,
        ElementId::BotSelect,
        ElementId::ModelSelection,
        ElementId::ModelSelect,
        ElementId::TestMessage,
        ElementId::SendTest,
        ElementId::TestResult,
        ElementId::TestResponse,
        ElementId::ConnectionStatus,
    ];

    /// The DOM id of this element.
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementId::ServerStatus => "serverStatus",
            ElementId::RequestStats => "requestStats",
            ElementId::ActiveBots => "activeBots",
            ElementId::BotList => "botList",
            ElementId::BotSelect => "botSelect",
            ElementId::ModelSelection => "modelSelection",
            ElementId::ModelSelect => "modelSelect",
            ElementId::TestMessage => "testMessage",
            ElementId::SendTest => "sendTest",
            ElementId::TestResult => "testResult",
            ElementId::TestResponse => "testResponse",
            ElementId::ConnectionStatus => "connectionStatus",
        }
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of the connection indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    /// No poll has completed yet
    #[default]
    Unknown,
    Connected,
    Disconnected,
}

/// The send button: enabled flag plus label text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendButton {
    pub disabled: bool,
    pub label: String,
}

impl SendButton {
    pub const IDLE_LABEL: &'static str = "Send Message";
    pub const BUSY_LABEL: &'static str = "Sending...";

    pub fn idle() -> Self {
        Self {
            disabled: false,
            label: Self::IDLE_LABEL.to_string(),
        }
    }

    pub fn busy() -> Self {
        Self {
            disabled: true,
            label: Self::BUSY_LABEL.to_string(),
        }
    }

    /// Inner markup of the button, with a spinner while busy.
    pub fn markup(&self) -> String {
        if self.disabled {
            format!(r#"<i class="fas fa-spinner fa-spin mr-2"></i>{}"#, self.label)
        } else {
            self.label.clone()
        }
    }
}

impl Default for SendButton {
    fn default() -> Self {
        Self::idle()
    }
}

/// Rendered content of every page region plus the prompts raised so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub server_status: String,
    pub request_stats: String,
    pub active_bots: String,
    pub bot_list: String,
    pub bot_select: String,
    pub model_selection_visible: bool,
    pub model_select: String,
    pub test_message: String,
    pub send_button: SendButton,
    pub test_result_visible: bool,
    pub test_response: String,
    pub connection: ConnectionStatus,
    pub connection_status: String,
    /// Bot identifiers from the last successful poll, in server order
    pub bots: Vec<String>,
    /// Blocking prompts shown to the operator, oldest first
    pub prompts: Vec<String>,
}

impl Page {
    /// Inner markup or text of a region.
    ///
    /// Visibility-only containers (`modelSelection`, `testResult`) have no
    /// content of their own and yield `None`; see [`Page::is_visible`].
    pub fn region(&self, id: ElementId) -> Option<String> {
        match id {
            ElementId::ServerStatus => Some(self.server_status.clone()),
            ElementId::RequestStats => Some(self.request_stats.clone()),
            ElementId::ActiveBots => Some(self.active_bots.clone()),
            ElementId::BotList => Some(self.bot_list.clone()),
            ElementId::BotSelect => Some(self.bot_select.clone()),
            ElementId::ModelSelect => Some(self.model_select.clone()),
            ElementId::TestMessage => Some(self.test_message.clone()),
            ElementId::SendTest => Some(self.send_button.markup()),
            ElementId::TestResponse => Some(self.test_response.clone()),
            ElementId::ConnectionStatus => Some(self.connection_status.clone()),
            ElementId::ModelSelection | ElementId::TestResult => None,
        }
    }

    /// Whether a region is currently shown.
    pub fn is_visible(&self, id: ElementId) -> bool {
        match id {
            ElementId::ModelSelection => self.model_selection_visible,
            ElementId::TestResult => self.test_result_visible,
            _ => true,
        }
    }

    /// Number of rendered bot entries in the bot list.
    pub fn bot_list_len(&self) -> usize {
        self.bot_list.matches("<h3").count()
    }
}
