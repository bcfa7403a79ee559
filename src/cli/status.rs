//! Status command implementation

use crate::cli::output::format_health_pretty;
use crate::cli::StatusArgs;
use crate::config::AdminConfig;
use crate::controller::DashboardController;

/// Refresh once and format the result
pub async fn render_status(
    controller: &DashboardController,
    config: &AdminConfig,
    json: bool,
) -> Result<String, Box<dyn std::error::Error>> {
    let health = controller.refresh_status().await?;

    if json {
        Ok(serde_json::to_string_pretty(&health)?)
    } else {
        Ok(format_health_pretty(
            &health,
            &config.dashboard.model_selection_set(),
        ))
    }
}

/// Handle `bot-admin status` command
pub async fn handle_status(args: &StatusArgs) -> Result<String, Box<dyn std::error::Error>> {
    let config = super::load_config(&args.connection)?;
    crate::logging::init_tracing(&config.logging)?;

    let controller = super::build_controller(&config)?;
    render_status(&controller, &config, args.json).await
}
