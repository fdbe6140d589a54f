//! Mock LLM 客户端（用于测试与离线演示，无需 API）
//!
//! 取最后一条 User 消息原样回显，便于本地跑通翻译流程。

use async_trait::async_trait;

use crate::llm::{ChatRequest, LlmClient, LlmError};

/// Mock 客户端：回显用户消息
#[derive(Debug, Default)]
pub struct MockLlmClient;

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn chat(&self, request: &ChatRequest) -> Result<String, LlmError> {
        let last_user = request.user();
        if last_user.is_empty() {
            return Ok("(no input)".to_string());
        }
        Ok(format!("Echo from Mock: {}", last_user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_echoes_user_message() {
        let req = ChatRequest::new("sys", "Analyze this network error: boom", "m", 0.3, 10);
        let out = MockLlmClient.chat(&req).await.unwrap();
        assert!(out.contains("Analyze this network error: boom"));
    }
}
