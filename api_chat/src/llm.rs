//! Client for an OpenAI-compatible chat-completion endpoint.

use common::{
    env_config::LlmConfig,
    error::{AppError, Res},
};
use db::models::chat::ChatMessage;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const SYSTEM_PROMPT: &str = "You are ARAS AI, an intelligent sales automation assistant. \
You help with sales strategy and lead generation, voice calling campaigns and automation, \
performance analytics and insights, sales conversation optimization, and customer targeting \
and segmentation. Answer concisely and in the language the user writes in.";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompletionMessage {
    pub role: String,
    pub content: String,
}

impl CompletionMessage {
    pub fn system(content: &str) -> Self {
        Self {
            role: "system".to_string(),
            content: content.to_string(),
        }
    }
}

impl From<&ChatMessage> for CompletionMessage {
    fn from(message: &ChatMessage) -> Self {
        Self {
            role: if message.is_ai { "assistant" } else { "user" }.to_string(),
            content: message.message.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [CompletionMessage],
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Builds the prompt: the system prompt followed by the session history,
/// oldest first.
pub fn build_context(history: &[ChatMessage]) -> Vec<CompletionMessage> {
    std::iter::once(CompletionMessage::system(SYSTEM_PROMPT))
        .chain(history.iter().map(CompletionMessage::from))
        .collect()
}

#[derive(Debug, Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl LlmClient {
    pub fn new(config: &LlmConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        }
    }

    /// Sends the conversation and returns the assistant's reply text.
    pub async fn complete(&self, messages: &[CompletionMessage]) -> Res<String> {
        log::debug!(
            "Completion request: model={} messages={}",
            self.model,
            messages.len()
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&CompletionRequest {
                model: &self.model,
                messages,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Internal(format!(
                "Completion API returned {}: {}",
                status, body
            )));
        }

        let completion: CompletionResponse = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AppError::Internal("Completion API returned no choices".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
    use chrono::Utc;
    use serde_json::{Value, json};
    use uuid::Uuid;

    use super::*;

    fn message(text: &str, is_ai: bool) -> ChatMessage {
        ChatMessage {
            id: Uuid::new_v4(),
            session_id: Uuid::nil(),
            user_id: Uuid::nil(),
            message: text.to_string(),
            is_ai,
            timestamp: Utc::now().naive_utc(),
        }
    }

    #[test]
    fn context_starts_with_system_prompt_and_maps_roles() {
        let history = vec![
            message("Wie finde ich Leads?", false),
            message("Starte mit deinem ICP.", true),
            message("Und dann?", false),
        ];
        let context = build_context(&history);

        assert_eq!(context.len(), 4);
        assert_eq!(context[0].role, "system");
        assert_eq!(context[0].content, SYSTEM_PROMPT);
        assert_eq!(
            context[1..]
                .iter()
                .map(|m| m.role.as_str())
                .collect::<Vec<_>>(),
            vec!["user", "assistant", "user"]
        );
        assert_eq!(context[3].content, "Und dann?");
    }

    /// Mock completion endpoint: echoes the last message and the model back,
    /// or fails when the last message is "fail".
    async fn mock_completions(req: HttpRequest, body: web::Json<Value>) -> HttpResponse {
        let auth = req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let last = body["messages"]
            .as_array()
            .and_then(|m| m.last())
            .and_then(|m| m["content"].as_str())
            .unwrap_or_default()
            .to_string();

        if last == "fail" {
            return HttpResponse::ServiceUnavailable().body("overloaded");
        }
        if last == "empty" {
            return HttpResponse::Ok().json(json!({ "choices": [] }));
        }
        HttpResponse::Ok().json(json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": format!("{}|{}|{}", body["model"].as_str().unwrap_or_default(), auth, last)
                }
            }]
        }))
    }

    fn spawn_mock() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let server = HttpServer::new(|| {
            App::new().route("/v1/chat/completions", web::post().to(mock_completions))
        })
        .workers(1)
        .listen(listener)
        .unwrap()
        .run();
        tokio::spawn(server);
        format!("http://127.0.0.1:{}/v1", port)
    }

    fn client(base_url: String) -> LlmClient {
        LlmClient::new(&LlmConfig {
            api_key: "sk-test".to_string(),
            base_url,
            model: "gpt-4".to_string(),
            history_limit: 10,
        })
    }

    #[actix_web::test]
    async fn complete_returns_first_choice() {
        let llm = client(spawn_mock());
        let reply = llm
            .complete(&build_context(&[message("hallo", false)]))
            .await
            .unwrap();
        assert_eq!(reply, "gpt-4|Bearer sk-test|hallo");
    }

    #[actix_web::test]
    async fn upstream_error_status_is_internal() {
        let llm = client(spawn_mock());
        let err = llm
            .complete(&[CompletionMessage {
                role: "user".to_string(),
                content: "fail".to_string(),
            }])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Internal(ref m) if m.contains("503")));
    }

    #[actix_web::test]
    async fn empty_choices_is_internal() {
        let llm = client(spawn_mock());
        let err = llm
            .complete(&[CompletionMessage {
                role: "user".to_string(),
                content: "empty".to_string(),
            }])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[actix_web::test]
    async fn unreachable_endpoint_is_reqwest_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let llm = client(format!("http://127.0.0.1:{}/v1", port));
        let err = llm
            .complete(&build_context(&[]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Reqwest(_)));
    }
}
