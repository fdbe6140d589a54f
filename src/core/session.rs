//! 会话上下文：一次交互会话的全部可变状态
//!
//! 会话开始时创建，结束时随 Translator 一起丢弃；不落盘。
//! 当前输入可以随时清空，历史只追加。

use crate::core::{Analysis, InputMode};
use crate::language::LanguageProfile;
use crate::memory::SessionHistory;

#[derive(Debug, Clone)]
pub struct SessionContext {
    current_input: String,
    /// 每次由会话一侧改写输入（预设、语音、清空）时递增
    input_revision: u64,
    pub language: LanguageProfile,
    pub input_mode: InputMode,
    pub history: SessionHistory,
    pub last_result: Option<Analysis>,
}

impl SessionContext {
    pub fn new(language: LanguageProfile) -> Self {
        Self {
            current_input: String::new(),
            input_revision: 0,
            language,
            input_mode: InputMode::Text,
            history: SessionHistory::new(),
            last_result: None,
        }
    }

    pub fn current_input(&self) -> &str {
        &self.current_input
    }

    pub fn input_revision(&self) -> u64 {
        self.input_revision
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.current_input = text.into();
        self.input_revision += 1;
    }

    /// 清空当前输入，不影响历史
    pub fn clear_input(&mut self) {
        self.set_input(String::new());
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new(LanguageProfile::english())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{Category, ErrorReport, Severity};
    use crate::memory::HistoryEntry;

    #[test]
    fn test_clear_input_keeps_history() {
        let mut session = SessionContext::default();
        session.history.append(HistoryEntry::new(
            ErrorReport::new("dns", Category::Dns, Severity::Info),
            "explanation",
        ));
        session.set_input("Connection Refused");
        assert_eq!(session.current_input(), "Connection Refused");

        session.clear_input();
        assert_eq!(session.current_input(), "");
        assert_eq!(session.history.len(), 1);
        assert_eq!(session.input_revision(), 2);
    }
}
