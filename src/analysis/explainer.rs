//! 解释请求：按语言拼 system prompt + 用户错误描述，调用模型一次并原样返回首条回复
//!
//! 不重试：失败直接以 ExplainError 交给调用方。

use std::sync::Arc;

use thiserror::Error;

use crate::config::LlmSection;
use crate::language::{prompt_for, ANALYSIS_SUFFIX};
use crate::llm::{ChatRequest, LlmClient, LlmError, GROQ_DEFAULT_MODEL};

/// 用户消息前缀
pub const USER_PREFIX: &str = "Analyze this network error: ";

/// 模型调用失败（网络 / API / 超时）
#[derive(Error, Debug, Clone, PartialEq)]
#[error("explanation request failed: {cause}")]
pub struct ExplainError {
    pub cause: LlmError,
}

/// 固定采样参数：低温度、较大的输出预算、固定模型
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingParams {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            model: GROQ_DEFAULT_MODEL.to_string(),
            temperature: 0.3,
            max_tokens: 1500,
        }
    }
}

impl From<&LlmSection> for SamplingParams {
    fn from(llm: &LlmSection) -> Self {
        Self {
            model: llm.model.clone(),
            temperature: llm.temperature,
            max_tokens: llm.max_tokens,
        }
    }
}

/// 组装两条消息的请求：语言 prompt + 固定要求 / 前缀 + 用户文本
pub fn compose_request(text: &str, prompt_code: &str, params: &SamplingParams) -> ChatRequest {
    let system = format!("{}{}", prompt_for(prompt_code), ANALYSIS_SUFFIX);
    let user = format!("{}{}", USER_PREFIX, text);
    ChatRequest::new(system, user, params.model.clone(), params.temperature, params.max_tokens)
}

/// 用默认采样参数请求一次解释
pub async fn explain(
    client: &dyn LlmClient,
    text: &str,
    prompt_code: &str,
) -> Result<String, ExplainError> {
    request_explanation(client, text, prompt_code, &SamplingParams::default()).await
}

async fn request_explanation(
    client: &dyn LlmClient,
    text: &str,
    prompt_code: &str,
    params: &SamplingParams,
) -> Result<String, ExplainError> {
    let request = compose_request(text, prompt_code, params);
    tracing::debug!(model = %request.model, prompt_code, "requesting explanation");
    client
        .chat(&request)
        .await
        .map_err(|cause| ExplainError { cause })
}

/// Explainer：持有模型客户端与采样参数，供编排器使用
pub struct Explainer {
    llm: Arc<dyn LlmClient>,
    params: SamplingParams,
}

impl Explainer {
    pub fn new(llm: Arc<dyn LlmClient>, params: SamplingParams) -> Self {
        Self { llm, params }
    }

    pub async fn explain(&self, text: &str, prompt_code: &str) -> Result<String, ExplainError> {
        request_explanation(self.llm.as_ref(), text, prompt_code, &self.params).await
    }
}
