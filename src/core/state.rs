//! 状态定义：交互阶段、分析结果与 UiState 投影
//!
//! UI 只持有轻量的 UiState（阶段、输入、结果、最近历史、提示）；完整会话由 Translator 维护并投影到 UiState。

use serde::Serialize;

use crate::analysis::{ErrorReport, QuickFix};
use crate::core::Notice;
use crate::language::LanguageProfile;
use crate::memory::HistoryEntry;

/// 一次分析请求的阶段
///
/// `Idle -> InputCaptured -> Explaining -> Classifying -> Classified -> Displayed`，
/// 下一次请求时 `Displayed -> Idle`；语音采集期间为 `Listening`。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Phase {
    Idle,
    Listening,
    InputCaptured,
    Explaining,
    Classifying,
    Classified,
    Displayed,
}

impl Phase {
    /// 等待外部调用期间锁定输入
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            Phase::Listening | Phase::InputCaptured | Phase::Explaining | Phase::Classifying
        )
    }
}

/// 输入方式
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum InputMode {
    Text,
    Voice,
}

/// 最近一次成功分析的结果
#[derive(Clone, Debug, Serialize)]
pub struct Analysis {
    pub report: ErrorReport,
    pub explanation: String,
    pub quick_fix: Option<QuickFix>,
}

/// UI 看到的「投影」状态
#[derive(Clone, Debug, Serialize)]
pub struct UiState {
    pub phase: Phase,
    pub language: LanguageProfile,
    pub input_mode: InputMode,
    pub speech_available: bool,
    /// 当前输入；input_revision 变化时 UI 用它覆盖本地输入缓冲
    pub input: String,
    pub input_revision: u64,
    pub result: Option<Analysis>,
    /// 最近几条历史，新的在前
    pub recent: Vec<HistoryEntry>,
    pub history_len: usize,
    pub notice: Option<Notice>,
}

impl UiState {
    pub fn input_locked(&self) -> bool {
        self.phase.is_busy()
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            language: LanguageProfile::english(),
            input_mode: InputMode::Text,
            speech_available: false,
            input: String::new(),
            input_revision: 0,
            result: None,
            recent: Vec::new(),
            history_len: 0,
            notice: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_busy_phases_lock_input() {
        assert!(Phase::Explaining.is_busy());
        assert!(Phase::Listening.is_busy());
        assert!(!Phase::Idle.is_busy());
        assert!(!Phase::Displayed.is_busy());
        assert!(!UiState::default().input_locked());
    }
}
