//! Inputs that drive the controller.

/// An event from one of the three sources: page load, the poll timer, or
/// operator input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Initial load; triggers the first refresh
    PageLoaded,
    /// Poll timer fired
    TimerTick,
    /// Bot-select control changed; an empty value means the placeholder
    BotSelected(String),
    /// Model-select control changed
    ModelSelected(String),
    /// Message field edited
    MessageInput(String),
    /// Send button clicked
    SendClicked,
    /// Key pressed in the message field
    KeyPressed { key: String, shift: bool },
}

impl Event {
    /// Whether a key press submits the message: Enter without Shift.
    pub fn is_submit_key(key: &str, shift: bool) -> bool {
        key == "Enter" && !shift
    }
}
