//! 记忆层：会话内的分析历史（不持久化）

pub mod history;

pub use history::{HistoryEntry, SessionHistory};
