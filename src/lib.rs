//! Netlog - Network Log Translator
//!
//! 模块划分：
//! - **analysis**: 关键词分类、严重程度、快速修复、常见错误预设、解释请求
//! - **config**: 应用配置加载（TOML + 环境变量）
//! - **core**: 编排、状态投影、会话上下文、错误与提示
//! - **integrations**: 外部协作方（语音采集、剪贴板）
//! - **language**: 语言档案与多语言 system prompt
//! - **llm**: LLM 客户端抽象与实现（OpenAI 兼容 / Groq / Mock）
//! - **memory**: 会话内分析历史
//! - **observability**: 日志初始化
//! - **ui**: Ratatui TUI 界面

pub mod analysis;
pub mod config;
pub mod core;
pub mod integrations;
pub mod language;
pub mod llm;
pub mod memory;
pub mod observability;
pub mod ui;

pub use crate::core::{create_translator, Command, Translator, TranslatorBuilder};
