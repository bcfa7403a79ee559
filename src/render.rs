//! HTML fragments for the page regions.
//!
//! Fragments are rendered from minijinja templates with HTML auto-escaping,
//! so bot names, descriptions and replies coming from the server are inert
//! text. Identical input always yields identical markup.

use crate::api::ServerHealth;
use crate::error::DashboardError;
use crate::page::ConnectionStatus;
use minijinja::{context, AutoEscape, Environment};
use serde::Serialize;
use std::collections::HashSet;

pub const NO_BOTS_PLACEHOLDER: &str = "No bots available";
pub const NO_DESCRIPTION_PLACEHOLDER: &str = "No description available";
pub const NO_RESPONSE_PLACEHOLDER: &str = "No response received";
pub const MODEL_SELECTION_BADGE: &str = "Supports model selection";
pub const BOT_LIST_ERROR: &str =
    r#"<div class="text-red-500 p-4">Error loading bots. Please check server connection.</div>"#;

const BOT_LIST_TEMPLATE: &str = r#"{% for bot in bots %}
<div class="flex items-center justify-between p-4 border rounded-lg hover:bg-gray-50">
    <div class="flex-grow">
        <h3 class="font-semibold text-gray-700">{{ bot.display_name }}</h3>
        <p class="text-sm text-gray-500">{{ bot.description }}</p>
        {%- if bot.model_selection %}
        <p class="text-xs text-indigo-600 mt-1">{{ badge }}</p>
        {%- endif %}
    </div>
    <div class="flex items-center space-x-2">
        <span class="px-3 py-1 text-sm text-green-700 bg-green-100 rounded-full">Active</span>
    </div>
</div>
{%- endfor %}"#;

const OPTIONS_TEMPLATE: &str = r#"{% if placeholder %}<option value="">{{ placeholder }}</option>{% endif %}
{%- for option in options %}
<option value="{{ option.value }}"{% if option.selected %} selected{% endif %}>{{ option.label }}</option>
{%- endfor %}"#;

const TEST_RESPONSE_TEMPLATE: &str = r#"<div class="space-y-2">
    <div class="text-gray-500 text-sm">Bot: {{ bot }}</div>
    {%- if model is not none %}
    <div class="text-gray-500 text-sm">Model: {{ model }}</div>
    {%- endif %}
    <div class="whitespace-pre-wrap">{{ text }}</div>
</div>"#;

const TEST_ERROR_TEMPLATE: &str = r#"<div class="text-red-500">
    Error: {{ message }}
</div>"#;

/// Placeholder option leading the bot-select control.
pub const BOT_SELECT_PLACEHOLDER: &str = "Choose a bot...";

#[derive(Serialize)]
struct BotEntry<'a> {
    display_name: String,
    description: &'a str,
    model_selection: bool,
}

#[derive(Serialize)]
struct OptionEntry<'a> {
    value: &'a str,
    label: String,
    selected: bool,
}

/// Capitalize the first character of a bot identifier.
pub fn display_name(bot: &str) -> String {
    let mut chars = bot.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Text of the request counter.
pub fn request_stats(total_requests: u64) -> String {
    format!("{} requests processed", total_requests)
}

/// Text of the active bot counter.
pub fn active_bots(count: usize) -> String {
    format!("{} bots available", count)
}

/// Markup of the connection indicator.
pub fn connection_markup(status: ConnectionStatus) -> &'static str {
    match status {
        ConnectionStatus::Unknown => {
            r#"<i class="fas fa-circle text-xs mr-2 text-gray-400"></i>Connecting..."#
        }
        ConnectionStatus::Connected => {
            r#"<i class="fas fa-circle text-xs mr-2 text-green-400"></i>Connected"#
        }
        ConnectionStatus::Disconnected => {
            r#"<i class="fas fa-circle text-xs mr-2 text-red-500"></i>Disconnected"#
        }
    }
}

/// Template environment for the page fragments.
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    pub fn new() -> Result<Self, DashboardError> {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::Html);
        env.add_template("bot_list.html", BOT_LIST_TEMPLATE)?;
        env.add_template("options.html", OPTIONS_TEMPLATE)?;
        env.add_template("test_response.html", TEST_RESPONSE_TEMPLATE)?;
        env.add_template("test_error.html", TEST_ERROR_TEMPLATE)?;
        Ok(Self { env })
    }

    /// Bot list entries in server order, or the placeholder when empty.
    pub fn bot_list(
        &self,
        health: &ServerHealth,
        model_selection_bots: &HashSet<String>,
    ) -> Result<String, DashboardError> {
        if health.available_bots.is_empty() {
            return Ok(NO_BOTS_PLACEHOLDER.to_string());
        }

        let bots: Vec<BotEntry> = health
            .available_bots
            .iter()
            .map(|bot| BotEntry {
                display_name: display_name(bot),
                description: health.description(bot).unwrap_or(NO_DESCRIPTION_PLACEHOLDER),
                model_selection: model_selection_bots.contains(bot),
            })
            .collect();

        let template = self.env.get_template("bot_list.html")?;
        Ok(template.render(context! { bots => bots, badge => MODEL_SELECTION_BADGE })?)
    }

    /// Bot-select options: placeholder first, then one option per bot.
    pub fn bot_options(&self, bots: &[String], selected: Option<&str>) -> Result<String, DashboardError> {
        let options: Vec<OptionEntry> = bots
            .iter()
            .map(|bot| OptionEntry {
                value: bot,
                label: display_name(bot),
                selected: selected == Some(bot.as_str()),
            })
            .collect();
        self.options(&options, Some(BOT_SELECT_PLACEHOLDER))
    }

    /// Model-select options, no placeholder.
    pub fn model_options(&self, models: &[String], selected: Option<&str>) -> Result<String, DashboardError> {
        let options: Vec<OptionEntry> = models
            .iter()
            .map(|model| OptionEntry {
                value: model,
                label: model.clone(),
                selected: selected == Some(model.as_str()),
            })
            .collect();
        self.options(&options, None)
    }

    fn options(&self, options: &[OptionEntry], placeholder: Option<&str>) -> Result<String, DashboardError> {
        let template = self.env.get_template("options.html")?;
        Ok(template.render(context! { options => options, placeholder => placeholder })?)
    }

    /// Result panel for a successful send.
    pub fn test_response(
        &self,
        bot: &str,
        model: Option<&str>,
        text: Option<&str>,
    ) -> Result<String, DashboardError> {
        let template = self.env.get_template("test_response.html")?;
        Ok(template.render(context! {
            bot => display_name(bot),
            model => model,
            text => text.unwrap_or(NO_RESPONSE_PLACEHOLDER),
        })?)
    }

    /// Result panel for a failed send.
    pub fn test_error(&self, message: &str) -> Result<String, DashboardError> {
        let template = self.env.get_template("test_error.html")?;
        Ok(template.render(context! { message => message })?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn health(bots: &[&str], descriptions: &[(&str, &str)]) -> ServerHealth {
        ServerHealth {
            status: "ok".to_string(),
            total_requests: 0,
            available_bots: bots.iter().map(|b| b.to_string()).collect(),
            bot_descriptions: descriptions
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        }
    }

    fn model_bots() -> HashSet<String> {
        ["enterprise", "app-creator"].iter().map(|b| b.to_string()).collect()
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("support"), "Support");
        assert_eq!(display_name("app-creator"), "App-creator");
        assert_eq!(display_name("Echo"), "Echo");
        assert_eq!(display_name(""), "");
        assert_eq!(display_name("été"), "Été");
    }

    #[test]
    fn test_counters() {
        assert_eq!(request_stats(5), "5 requests processed");
        assert_eq!(active_bots(2), "2 bots available");
    }

    #[test]
    fn test_connection_markup() {
        assert!(connection_markup(ConnectionStatus::Connected).ends_with("Connected"));
        assert!(connection_markup(ConnectionStatus::Connected).contains("text-green-400"));
        assert!(connection_markup(ConnectionStatus::Disconnected).ends_with("Disconnected"));
        assert!(connection_markup(ConnectionStatus::Disconnected).contains("text-red-500"));
    }

    #[test]
    fn test_bot_list_entries() {
        let renderer = Renderer::new().unwrap();
        let html = renderer
            .bot_list(&health(&["support", "enterprise"], &[("support", "Help desk")]), &model_bots())
            .unwrap();

        assert_eq!(html.matches("<h3").count(), 2);
        assert!(html.contains(">Support</h3>"));
        assert!(html.contains(">Help desk</p>"));
        assert!(html.contains(">Enterprise</h3>"));
        assert!(html.contains(NO_DESCRIPTION_PLACEHOLDER));
        assert_eq!(html.matches(MODEL_SELECTION_BADGE).count(), 1);
        // support renders before enterprise
        assert!(html.find("Support").unwrap() < html.find("Enterprise").unwrap());
    }

    #[test]
    fn test_bot_list_empty_placeholder() {
        let renderer = Renderer::new().unwrap();
        let html = renderer.bot_list(&health(&[], &[]), &model_bots()).unwrap();
        assert_eq!(html, NO_BOTS_PLACEHOLDER);
    }

    #[test]
    fn test_bot_list_escapes_server_text() {
        let renderer = Renderer::new().unwrap();
        let html = renderer
            .bot_list(&health(&["evil"], &[("evil", "<script>alert(1)</script>")]), &model_bots())
            .unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_bot_options() {
        let renderer = Renderer::new().unwrap();
        let bots = vec!["support".to_string(), "enterprise".to_string()];
        let html = renderer.bot_options(&bots, None).unwrap();

        assert!(html.starts_with(r#"<option value="">Choose a bot...</option>"#));
        assert_eq!(html.matches("<option").count(), 3);
        assert!(html.contains(r#"<option value="support">Support</option>"#));
        assert!(html.contains(r#"<option value="enterprise">Enterprise</option>"#));
        assert!(!html.contains("selected"));
    }

    #[test]
    fn test_bot_options_keep_selection() {
        let renderer = Renderer::new().unwrap();
        let bots = vec!["support".to_string(), "enterprise".to_string()];
        let html = renderer.bot_options(&bots, Some("enterprise")).unwrap();
        assert!(html.contains(r#"<option value="enterprise" selected>Enterprise</option>"#));
        assert_eq!(html.matches(" selected").count(), 1);
    }

    #[test]
    fn test_model_options() {
        let renderer = Renderer::new().unwrap();
        let models = vec!["GPT-4".to_string(), "Claude-3-Opus".to_string()];
        let html = renderer.model_options(&models, Some("GPT-4")).unwrap();
        assert_eq!(html.matches("<option").count(), 2);
        assert!(html.contains(r#"<option value="GPT-4" selected>GPT-4</option>"#));
        assert!(!html.contains("Choose a bot"));
    }

    #[test]
    fn test_response_with_model() {
        let renderer = Renderer::new().unwrap();
        let html = renderer
            .test_response("enterprise", Some("GPT-4"), Some("Hi there"))
            .unwrap();
        assert!(html.contains("Bot: Enterprise"));
        assert!(html.contains("Model: GPT-4"));
        assert!(html.contains(">Hi there</div>"));
    }

    #[test]
    fn test_response_without_model_or_text() {
        let renderer = Renderer::new().unwrap();
        let html = renderer.test_response("echo", None, None).unwrap();
        assert!(html.contains("Bot: Echo"));
        assert!(!html.contains("Model:"));
        assert!(html.contains(NO_RESPONSE_PLACEHOLDER));
    }

    #[test]
    fn test_error_panel() {
        let renderer = Renderer::new().unwrap();
        let html = renderer.test_error("HTTP error! status: 500").unwrap();
        assert!(html.contains("text-red-500"));
        assert!(html.contains("Error: HTTP error! status: 500"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let renderer = Renderer::new().unwrap();
        let h = health(
            &["a", "b", "enterprise"],
            &[("a", "first"), ("b", "second"), ("enterprise", "wrapper")],
        );
        let first = renderer.bot_list(&h, &model_bots()).unwrap();
        let second = renderer.bot_list(&h, &model_bots()).unwrap();
        assert_eq!(first, second);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_bot_list_count_and_badges(
                bots in proptest::collection::vec("[a-z][a-z-]{0,11}", 0..12),
                flagged in proptest::collection::vec(any::<bool>(), 12),
            ) {
                let renderer = Renderer::new().unwrap();
                let model_bots: HashSet<String> = bots
                    .iter()
                    .zip(flagged.iter())
                    .filter(|(_, f)| **f)
                    .map(|(b, _)| b.clone())
                    .collect();
                let h = ServerHealth {
                    status: "ok".to_string(),
                    total_requests: 0,
                    available_bots: bots.clone(),
                    bot_descriptions: HashMap::new(),
                };

                let html = renderer.bot_list(&h, &model_bots).unwrap();
                if bots.is_empty() {
                    prop_assert_eq!(html, NO_BOTS_PLACEHOLDER);
                } else {
                    prop_assert_eq!(html.matches("<h3").count(), bots.len());
                    let expected_badges = bots.iter().filter(|b| model_bots.contains(*b)).count();
                    prop_assert_eq!(html.matches(MODEL_SELECTION_BADGE).count(), expected_badges);
                }
            }
        }
    }
}
