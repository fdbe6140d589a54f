//! 核心编排层：错误与提示、状态投影、会话上下文、构建器、主控循环

pub mod builder;
pub mod error;
pub mod orchestrator;
pub mod session;
pub mod state;

pub use builder::TranslatorBuilder;
pub use error::{AppError, Notice, NoticeLevel};
pub use orchestrator::{create_llm_from_config, create_translator, Command, Translator};
pub use session::SessionContext;
pub use state::{Analysis, InputMode, Phase, UiState};
