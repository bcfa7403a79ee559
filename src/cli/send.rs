//! Send command implementation

use crate::cli::output::format_reply_pretty;
use crate::cli::SendArgs;
use crate::controller::{DashboardController, Event};

/// Drive the controller through the same steps an operator takes: pick a
/// bot, pick a model, type the message, press send.
pub async fn send_and_format(
    controller: &DashboardController,
    args: &SendArgs,
) -> Result<String, Box<dyn std::error::Error>> {
    controller.handle(Event::BotSelected(args.bot.clone())).await;
    if let Some(ref model) = args.model {
        controller.handle(Event::ModelSelected(model.clone())).await;
    }
    controller.handle(Event::MessageInput(args.message.clone())).await;

    let reply = controller.send_current_selection().await?;

    if args.json {
        return Ok(serde_json::to_string_pretty(&reply)?);
    }

    let model = if controller.is_model_selection_bot(&args.bot) {
        controller.selection().await.model
    } else {
        None
    };
    Ok(format_reply_pretty(&args.bot, model.as_deref(), &reply))
}

/// Handle `bot-admin send` command
pub async fn handle_send(args: &SendArgs) -> Result<String, Box<dyn std::error::Error>> {
    let config = super::load_config(&args.connection)?;
    crate::logging::init_tracing(&config.logging)?;

    let controller = super::build_controller(&config)?;
    send_and_format(&controller, args).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ConnectionArgs;
    use crate::clock::ManualClock;
    use crate::config::DashboardConfig;
    use crate::transport::HttpTransport;
    use std::path::PathBuf;
    use std::sync::Arc;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn send_args(bot: &str, message: &str, model: Option<&str>) -> SendArgs {
        SendArgs {
            connection: ConnectionArgs {
                config: PathBuf::from("bot-admin.toml"),
                url: None,
                log_level: None,
            },
            bot: bot.to_string(),
            message: message.to_string(),
            model: model.map(str::to_string),
            json: false,
        }
    }

    async fn setup() -> (MockServer, DashboardController) {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "healthy",
                "total_requests": 1,
                "available_bots": ["echo", "enterprise"]
            })))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(&server.uri(), None).unwrap();
        let controller = DashboardController::new(
            Arc::new(transport),
            Arc::new(ManualClock::new(0)),
            &DashboardConfig::default(),
        )
        .unwrap();
        (server, controller)
    }

    #[tokio::test]
    async fn test_send_plain_bot() {
        let (server, controller) = setup().await;
        Mock::given(method("POST"))
            .and(path("/bot/echo"))
            .and(body_partial_json(serde_json::json!({
                "query": [{"content": "hello"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"text": "hello"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let output = send_and_format(&controller, &send_args("echo", "hello", None))
            .await
            .unwrap();
        assert!(output.contains("Bot: Echo"));
        assert!(!output.contains("Model:"));
        assert!(output.contains("hello"));
    }

    #[tokio::test]
    async fn test_send_model_bot() {
        let (server, controller) = setup().await;
        Mock::given(method("POST"))
            .and(path("/bot/enterprise"))
            .and(body_partial_json(serde_json::json!({
                "query": [{"content": "{\"model\":\"Claude-3-Opus\"}\nhi"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"text": "Hello from Claude"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let output = send_and_format(
            &controller,
            &send_args("enterprise", "hi", Some("Claude-3-Opus")),
        )
        .await
        .unwrap();
        assert!(output.contains("Model: Claude-3-Opus"));
        assert!(output.contains("Hello from Claude"));
    }

    #[tokio::test]
    async fn test_send_empty_message_is_rejected() {
        let (server, controller) = setup().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = send_and_format(&controller, &send_args("echo", "", None))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Please select a bot and enter a message");
    }
}
