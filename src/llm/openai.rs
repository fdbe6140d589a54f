//! OpenAI 兼容 API 客户端
//!
//! 通过 async_openai 调用任意 OpenAI 兼容端点（可配置 base_url）；支持 Groq、OpenAI、自建代理等。

use std::time::Duration;

use async_openai::config::OpenAIConfig;
use async_openai::error::OpenAIError;
use async_openai::types::chat::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_openai::Client;
use async_trait::async_trait;

use crate::llm::{ChatRequest, LlmClient, LlmError, Message, Role};

/// OpenAI 兼容客户端：持有 Client 与请求超时，chat 时转 Message 为 API 格式并取首条 content
pub struct OpenAiClient {
    client: Client<OpenAIConfig>,
    request_timeout: Duration,
}

impl OpenAiClient {
    pub fn new(base_url: Option<&str>, api_key: &str, request_timeout_secs: u64) -> Self {
        let config = if let Some(url) = base_url {
            OpenAIConfig::new().with_api_base(url).with_api_key(api_key)
        } else {
            OpenAIConfig::new().with_api_key(api_key)
        };

        Self {
            client: Client::with_config(config),
            request_timeout: Duration::from_secs(request_timeout_secs),
        }
    }

    fn to_openai_messages(
        &self,
        messages: &[Message],
    ) -> Result<Vec<ChatCompletionRequestMessage>, LlmError> {
        messages
            .iter()
            .map(|m| match m.role {
                Role::System => ChatCompletionRequestSystemMessageArgs::default()
                    .content(m.content.clone())
                    .build()
                    .map(ChatCompletionRequestMessage::System),
                Role::User => ChatCompletionRequestUserMessageArgs::default()
                    .content(m.content.clone())
                    .build()
                    .map(ChatCompletionRequestMessage::User),
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| LlmError::InvalidRequest(e.to_string()))
    }
}

fn map_openai_error(err: OpenAIError) -> LlmError {
    match err {
        OpenAIError::ApiError(api) => LlmError::Api(api.message),
        OpenAIError::Reqwest(e) => LlmError::Transport(e.to_string()),
        other => LlmError::Api(other.to_string()),
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn chat(&self, request: &ChatRequest) -> Result<String, LlmError> {
        let api_request = CreateChatCompletionRequestArgs::default()
            .model(&request.model)
            .messages(self.to_openai_messages(&request.messages)?)
            .temperature(request.temperature)
            .max_completion_tokens(request.max_tokens)
            .build()
            .map_err(|e| LlmError::InvalidRequest(e.to_string()))?;

        let response = tokio::time::timeout(self.request_timeout, self.client.chat().create(api_request))
            .await
            .map_err(|_| LlmError::Timeout(self.request_timeout.as_secs()))?
            .map_err(map_openai_error)?;

        if let Some(usage) = &response.usage {
            tracing::debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "chat completion"
            );
        }

        first_completion(response.choices.into_iter().map(|c| c.message.content))
    }
}

/// 取第一条 completion 的文本；没有 choice 或内容为空都算 API 错误
fn first_completion(
    contents: impl IntoIterator<Item = Option<String>>,
) -> Result<String, LlmError> {
    match contents.into_iter().next() {
        None => Err(LlmError::Api("no completion returned".to_string())),
        Some(Some(text)) if !text.trim().is_empty() => Ok(text),
        Some(_) => Err(LlmError::Api("completion has no content".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_completion_requires_a_choice() {
        assert_eq!(
            first_completion(Vec::<Option<String>>::new()),
            Err(LlmError::Api("no completion returned".to_string()))
        );
        assert!(matches!(first_completion(vec![None]), Err(LlmError::Api(_))));
        assert!(matches!(
            first_completion(vec![Some("  \n".to_string())]),
            Err(LlmError::Api(_))
        ));
    }

    #[test]
    fn test_first_completion_takes_first_text_verbatim() {
        let got = first_completion(vec![Some(" DNS failed.\n".to_string()), Some("x".to_string())]);
        assert_eq!(got, Ok(" DNS failed.\n".to_string()));
    }

    #[test]
    fn test_message_conversion_keeps_order() {
        let client = OpenAiClient::new(Some("http://localhost:1"), "sk-test", 5);
        let msgs = vec![Message::system("s"), Message::user("u")];
        let converted = client.to_openai_messages(&msgs).unwrap();
        assert_eq!(converted.len(), 2);
        assert!(matches!(converted[0], ChatCompletionRequestMessage::System(_)));
        assert!(matches!(converted[1], ChatCompletionRequestMessage::User(_)));
    }
}
