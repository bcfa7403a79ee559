//! The admin panel controller.
//!
//! A [`DashboardController`] owns the page regions and the operator's
//! selection. It refreshes the bot catalog from `GET /health`, reacts to
//! selection changes, and sends test messages to `POST /bot/{id}`. All I/O
//! goes through the injected [`Transport`] and [`Clock`].

mod event;
mod poller;
mod state;


pub use event::Event;
pub use poller::Poller;
pub use state::Selection;

use crate::api::{self, ServerHealth, TestPayload, TestReply};
use crate::clock::Clock;
use crate::config::DashboardConfig;
use crate::error::{DashboardError, VALIDATION_PROMPT};
use crate::page::{ConnectionStatus, Page, SendButton};
use crate::render::{self, Renderer};
use crate::transport::Transport;
use state::ViewState;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};

/// Orchestrates polling, rendering and the test-send flow for one page.
pub struct DashboardController {
    transport: Arc<dyn Transport>,
    clock: Arc<dyn Clock>,
    renderer: Renderer,
    /// Bots that accept a model choice
    model_selection_bots: HashSet<String>,
    /// Models offered by the model-select control
    models: Vec<String>,
    /// Page regions and selection; never held across a network call
    view: Mutex<ViewState>,
    /// Optional page snapshot broadcast for watchers
    broadcast: Option<broadcast::Sender<Page>>,
}

impl DashboardController {
    /// Create a controller with an initial, not yet connected page.
    pub fn new(
        transport: Arc<dyn Transport>,
        clock: Arc<dyn Clock>,
        config: &DashboardConfig,
    ) -> Result<Self, DashboardError> {
        let renderer = Renderer::new()?;
        let models = config.models.clone();
        let selection = Selection::with_model(models.first().cloned());

        let page = Page {
            bot_select: renderer.bot_options(&[], None)?,
            model_select: renderer.model_options(&models, selection.model.as_deref())?,
            connection_status: render::connection_markup(ConnectionStatus::Unknown).to_string(),
            ..Default::default()
        };

        Ok(Self {
            transport,
            clock,
            renderer,
            model_selection_bots: config.model_selection_set(),
            models,
            view: Mutex::new(ViewState { page, selection }),
            broadcast: None,
        })
    }

    /// Publish a page snapshot after every change.
    pub fn with_broadcast(mut self, sender: broadcast::Sender<Page>) -> Self {
        self.broadcast = Some(sender);
        self
    }

    /// Whether `bot` takes a model choice.
    pub fn is_model_selection_bot(&self, bot: &str) -> bool {
        self.model_selection_bots.contains(bot)
    }

    /// Models offered by the model-select control.
    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// Snapshot of the current page.
    pub async fn page(&self) -> Page {
        self.view.lock().await.page.clone()
    }

    /// Snapshot of the current selection.
    pub async fn selection(&self) -> Selection {
        self.view.lock().await.selection.clone()
    }

    fn publish(&self, page: &Page) {
        if let Some(sender) = &self.broadcast {
            // Ignore error if no receivers are listening
            let _ = sender.send(page.clone());
        }
    }

    async fn fetch_health(&self) -> Result<ServerHealth, DashboardError> {
        let body = self.transport.get_json(api::HEALTH_PATH).await?;
        serde_json::from_value(body).map_err(|e| DashboardError::InvalidResponse(e.to_string()))
    }

    /// Poll `GET /health` and re-render the status regions.
    ///
    /// Failures are rendered as a disconnected page and also returned, so
    /// callers may inspect them; nothing else needs to handle them. The
    /// operator's selection is never reset.
    pub async fn refresh_status(&self) -> Result<ServerHealth, DashboardError> {
        let result = self.fetch_health().await;
        let mut view = self.view.lock().await;

        match result {
            Ok(health) => {
                tracing::debug!(
                    status = %health.status,
                    total_requests = health.total_requests,
                    bots = health.available_bots.len(),
                    "Health check response"
                );

                let bot_list = self.renderer.bot_list(&health, &self.model_selection_bots)?;
                let bot_select = self
                    .renderer
                    .bot_options(&health.available_bots, view.selection.bot.as_deref())?;

                let page = &mut view.page;
                page.server_status = health.status.clone();
                page.request_stats = render::request_stats(health.total_requests);
                page.active_bots = render::active_bots(health.available_bots.len());
                page.bot_list = bot_list;
                page.bot_select = bot_select;
                page.bots = health.available_bots.clone();
                page.connection = ConnectionStatus::Connected;
                page.connection_status =
                    render::connection_markup(ConnectionStatus::Connected).to_string();

                self.publish(page);
                Ok(health)
            }
            Err(error) => {
                tracing::warn!(error = %error, kind = error.kind(), "Error fetching server info");

                let page = &mut view.page;
                page.connection = ConnectionStatus::Disconnected;
                page.connection_status =
                    render::connection_markup(ConnectionStatus::Disconnected).to_string();
                page.bot_list = render::BOT_LIST_ERROR.to_string();

                self.publish(page);
                Err(error)
            }
        }
    }

    /// Record the selected bot and show the model control only for
    /// model-selection bots. An empty value selects the placeholder.
    pub async fn on_bot_selection_changed(&self, selected: &str) -> Result<(), DashboardError> {
        let mut view = self.view.lock().await;

        view.selection.bot = (!selected.is_empty()).then(|| selected.to_string());
        view.page.model_selection_visible = self.is_model_selection_bot(selected);
        view.page.bot_select = self
            .renderer
            .bot_options(&view.page.bots, view.selection.bot.as_deref())?;

        tracing::debug!(
            bot = selected,
            model_selection = view.page.model_selection_visible,
            "Bot selection changed"
        );
        self.publish(&view.page);
        Ok(())
    }

    /// Record the selected model.
    pub async fn on_model_selection_changed(&self, model: &str) -> Result<(), DashboardError> {
        let mut view = self.view.lock().await;

        view.selection.model = (!model.is_empty()).then(|| model.to_string());
        view.page.model_select = self
            .renderer
            .model_options(&self.models, view.selection.model.as_deref())?;

        self.publish(&view.page);
        Ok(())
    }

    /// Record the message field content.
    pub async fn on_message_input(&self, text: &str) {
        let mut view = self.view.lock().await;
        view.selection.message = text.to_string();
        view.page.test_message = text.to_string();
        self.publish(&view.page);
    }

    /// Send a test message to `bot` and render the reply.
    ///
    /// An empty bot or message raises a prompt and sends nothing. Otherwise
    /// the send button is disabled for the duration of the request and is
    /// always re-enabled afterwards. A successful send triggers an immediate
    /// refresh of the status regions.
    pub async fn send_test_message(
        &self,
        bot: &str,
        message: &str,
        model: Option<&str>,
    ) -> Result<TestReply, DashboardError> {
        if bot.is_empty() || message.is_empty() {
            tracing::debug!(bot, "Test message blocked: bot or message missing");
            let mut view = self.view.lock().await;
            view.page.prompts.push(VALIDATION_PROMPT.to_string());
            self.publish(&view.page);
            return Err(DashboardError::Validation);
        }

        let model = if self.is_model_selection_bot(bot) {
            Some(
                model
                    .map(str::to_string)
                    .or_else(|| self.models.first().cloned())
                    .unwrap_or_default(),
            )
        } else {
            None
        };

        {
            let mut view = self.view.lock().await;
            view.page.send_button = SendButton::busy();
            self.publish(&view.page);
        }

        let outcome = self.deliver(bot, message, model.as_deref()).await;

        let panel = match &outcome {
            Ok(reply) => self
                .renderer
                .test_response(bot, model.as_deref(), reply.first_text()),
            Err(error) => {
                tracing::warn!(bot, error = %error, kind = error.kind(), "Error sending test message");
                self.renderer.test_error(&error.to_string())
            }
        };

        {
            let mut view = self.view.lock().await;
            match &panel {
                Ok(html) => {
                    view.page.test_result_visible = true;
                    view.page.test_response = html.clone();
                }
                Err(error) => tracing::error!(error = %error, "Failed to render test result"),
            }
            view.page.send_button = SendButton::idle();
            self.publish(&view.page);
        }

        let reply = outcome?;
        // Status reflects the request just made; failures are already rendered
        let _ = self.refresh_status().await;
        panel.map(|_| reply)
    }

    async fn deliver(
        &self,
        bot: &str,
        message: &str,
        model: Option<&str>,
    ) -> Result<TestReply, DashboardError> {
        let payload = TestPayload::new(message, model, self.clock.now_micros());
        let body =
            serde_json::to_value(&payload).map_err(|e| DashboardError::Render(e.to_string()))?;

        tracing::info!(bot, model = ?model, "Sending test message");
        let response = self.transport.post_json(&api::bot_path(bot), &body).await?;
        let reply: TestReply = serde_json::from_value(response)
            .map_err(|e| DashboardError::InvalidResponse(e.to_string()))?;

        tracing::debug!(bot, chunks = reply.0.len(), "Bot response received");
        Ok(reply)
    }

    /// Send using the current selection and message field.
    pub async fn send_current_selection(&self) -> Result<TestReply, DashboardError> {
        let selection = self.selection().await;
        self.send_test_message(
            selection.bot.as_deref().unwrap_or_default(),
            &selection.message,
            selection.model.as_deref(),
        )
        .await
    }

    /// Dispatch a single event.
    ///
    /// Failures are already reflected in the page, so this never errors.
    pub async fn handle(&self, event: Event) {
        let result = match event {
            Event::PageLoaded | Event::TimerTick => self.refresh_status().await.map(|_| ()),
            Event::BotSelected(bot) => self.on_bot_selection_changed(&bot).await,
            Event::ModelSelected(model) => self.on_model_selection_changed(&model).await,
            Event::MessageInput(text) => {
                self.on_message_input(&text).await;
                Ok(())
            }
            Event::SendClicked => {
                let busy = self.view.lock().await.page.send_button.disabled;
                if busy {
                    tracing::debug!("Send button disabled, click ignored");
                    return;
                }
                self.send_current_selection().await.map(|_| ())
            }
            Event::KeyPressed { key, shift } => {
                if !Event::is_submit_key(&key, shift) {
                    return;
                }
                self.send_current_selection().await.map(|_| ())
            }
        };

        if let Err(error) = result {
            tracing::trace!(kind = error.kind(), "Event completed with a handled failure");
        }
    }
}
