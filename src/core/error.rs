//! 错误类型与界面提示
//!
//! 所有错误都在编排器边界被转换成 Notice 显示给用户，不会终止进程。

use serde::Serialize;
use thiserror::Error;

use crate::analysis::ExplainError;
use crate::integrations::SpeechError;

/// 一次交互中可能出现的错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    /// 缺少 API Key 等启动期配置问题；整个会话无法分析
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Please enter a network error description first")]
    EmptyInput,

    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    #[error("Unknown common error preset: {0}")]
    UnknownPreset(usize),

    #[error("No speech detected, please try again")]
    SpeechTimeout,

    #[error("Could not understand the audio, please try again")]
    SpeechUnrecognized,

    #[error("Voice input is not available in this environment, using text input")]
    SpeechUnavailable,

    #[error("Speech capture failed: {0}")]
    SpeechFailed(String),

    #[error("Could not get an explanation: {}", .0.cause)]
    Explain(#[from] ExplainError),
}

impl From<SpeechError> for AppError {
    fn from(err: SpeechError) -> Self {
        match err {
            SpeechError::Timeout(_) => AppError::SpeechTimeout,
            SpeechError::Unrecognized => AppError::SpeechUnrecognized,
            SpeechError::Unavailable => AppError::SpeechUnavailable,
            SpeechError::Failed(msg) => AppError::SpeechFailed(msg),
        }
    }
}

/// 提示级别（决定界面颜色）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// 界面底部的一行提示
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }
}

impl AppError {
    /// 可恢复的输入类问题为 Warning，配置与服务失败为 Error
    pub fn level(&self) -> NoticeLevel {
        match self {
            AppError::Configuration(_) | AppError::Explain(_) | AppError::SpeechFailed(_) => {
                NoticeLevel::Error
            }
            AppError::EmptyInput
            | AppError::UnknownLanguage(_)
            | AppError::UnknownPreset(_)
            | AppError::SpeechTimeout
            | AppError::SpeechUnrecognized
            | AppError::SpeechUnavailable => NoticeLevel::Warning,
        }
    }

    pub fn to_notice(&self) -> Notice {
        Notice {
            level: self.level(),
            text: self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::LlmError;

    #[test]
    fn test_speech_errors_map_to_taxonomy() {
        assert_eq!(AppError::from(SpeechError::Timeout(5)), AppError::SpeechTimeout);
        assert_eq!(AppError::from(SpeechError::Unrecognized), AppError::SpeechUnrecognized);
        assert_eq!(AppError::from(SpeechError::Unavailable), AppError::SpeechUnavailable);
    }

    #[test]
    fn test_notice_levels() {
        assert_eq!(AppError::EmptyInput.level(), NoticeLevel::Warning);
        assert_eq!(
            AppError::Configuration("GROQ_API_KEY is not set".into()).level(),
            NoticeLevel::Error
        );
    }

    #[test]
    fn test_explain_notice_mentions_cause() {
        let err = AppError::from(ExplainError {
            cause: LlmError::Api("quota exceeded".into()),
        });
        let notice = err.to_notice();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert!(notice.text.contains("quota exceeded"));
    }
}
