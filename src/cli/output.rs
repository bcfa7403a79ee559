//! Output formatting helpers for CLI commands

use crate::api::{ServerHealth, TestReply};
use crate::page::{ConnectionStatus, Page};
use crate::render::{self, display_name};
use colored::{ColoredString, Colorize};
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use std::collections::HashSet;
use std::fmt::Write;

/// Colored label for the connection indicator
pub fn connection_label(status: ConnectionStatus) -> ColoredString {
    match status {
        ConnectionStatus::Unknown => "Connecting".yellow(),
        ConnectionStatus::Connected => "Connected".green(),
        ConnectionStatus::Disconnected => "Disconnected".red(),
    }
}

/// Format the bot catalog as a table
pub fn format_bots_table(health: &ServerHealth, model_selection_bots: &HashSet<String>) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Bot", "Description", "Model Selection"]);

    for bot in &health.available_bots {
        let model_selection = if model_selection_bots.contains(bot) {
            "yes".cyan().to_string()
        } else {
            "-".to_string()
        };

        table.add_row(vec![
            Cell::new(display_name(bot)),
            Cell::new(
                health
                    .description(bot)
                    .unwrap_or(render::NO_DESCRIPTION_PLACEHOLDER),
            ),
            Cell::new(model_selection),
        ]);
    }

    table.to_string()
}

/// Format a health document as pretty text
pub fn format_health_pretty(
    health: &ServerHealth,
    model_selection_bots: &HashSet<String>,
) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Status: {}", health.status.bold());
    let _ = writeln!(output, "Requests: {}", render::request_stats(health.total_requests));
    let _ = writeln!(output, "Bots: {}", render::active_bots(health.available_bots.len()));
    let _ = writeln!(output);

    if health.available_bots.is_empty() {
        let _ = writeln!(output, "{}", render::NO_BOTS_PLACEHOLDER);
    } else {
        let _ = writeln!(output, "{}", format_bots_table(health, model_selection_bots));
    }

    output
}

/// Format a page snapshot for `watch`
pub fn format_page_pretty(page: &Page) -> String {
    let mut output = String::new();

    let _ = writeln!(
        output,
        "[{}] {}",
        chrono::Local::now().format("%H:%M:%S"),
        connection_label(page.connection)
    );

    if page.connection == ConnectionStatus::Disconnected {
        let _ = writeln!(output, "  Error loading bots. Please check server connection.");
    }
    if !page.server_status.is_empty() {
        let _ = writeln!(output, "  Status: {}", page.server_status);
        let _ = writeln!(output, "  {}", page.request_stats);
        let _ = writeln!(output, "  {}", page.active_bots);
    }
    if !page.bots.is_empty() {
        let names: Vec<String> = page.bots.iter().map(|b| display_name(b)).collect();
        let _ = writeln!(output, "  {}", names.join(", "));
    }

    output
}

/// Format a bot reply as pretty text
pub fn format_reply_pretty(bot: &str, model: Option<&str>, reply: &TestReply) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Bot: {}", display_name(bot));
    if let Some(model) = model {
        let _ = writeln!(output, "Model: {}", model);
    }
    let _ = writeln!(output);
    let _ = writeln!(
        output,
        "{}",
        reply.first_text().unwrap_or(render::NO_RESPONSE_PLACEHOLDER)
    );

    output
}
