//! Operator selection state owned by a controller instance.

use crate::page::Page;

/// What the operator has chosen in the test panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Selected bot; `None` while the placeholder option is chosen
    pub bot: Option<String>,
    /// Selected model for model-selection bots
    pub model: Option<String>,
    /// Current content of the message field
    pub message: String,
}

impl Selection {
    /// Selection with the given model preselected.
    pub fn with_model(model: Option<String>) -> Self {
        Self {
            model,
            ..Default::default()
        }
    }
}

/// Everything a controller renders into or reads from, behind one lock.
#[derive(Debug, Clone, Default)]
pub(crate) struct ViewState {
    pub page: Page,
    pub selection: Selection,
}
