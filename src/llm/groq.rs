//! Groq API 客户端（OpenAI 兼容格式）
//!
//! Groq 提供与 OpenAI 兼容的 Chat Completions 接口。
//! - Base URL: https://api.groq.com/openai/v1
//! - 默认模型: llama-3.3-70b-versatile

use crate::llm::OpenAiClient;

/// Groq API 常量
pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const GROQ_DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// 创建 Groq 客户端；API Key 由调用方从环境变量读取并校验
pub fn create_groq_client(api_key: &str, request_timeout_secs: u64) -> OpenAiClient {
    OpenAiClient::new(Some(GROQ_BASE_URL), api_key, request_timeout_secs)
}
