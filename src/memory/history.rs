//! 会话历史：只追加、不去重；存储不设上限，显示时只取最近几条（新的在前）
//!
//! 生命周期与交互会话一致，没有清空操作。

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::analysis::{Category, ErrorReport, Severity};

/// 一次成功分析的记录
#[derive(Clone, Debug, Serialize)]
pub struct HistoryEntry {
    report: ErrorReport,
    explanation: String,
    pub created_at: DateTime<Local>,
}

impl HistoryEntry {
    pub fn new(report: ErrorReport, explanation: impl Into<String>) -> Self {
        Self {
            report,
            explanation: explanation.into(),
            created_at: Local::now(),
        }
    }

    pub fn input_text(&self) -> &str {
        self.report.raw_text()
    }

    pub fn explanation_text(&self) -> &str {
        &self.explanation
    }

    pub fn category(&self) -> Category {
        self.report.category()
    }

    pub fn severity(&self) -> Severity {
        self.report.severity()
    }
}

#[derive(Clone, Debug, Default)]
pub struct SessionHistory {
    entries: Vec<HistoryEntry>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// 最近 n 条，新的在前
    pub fn recent(&self, n: usize) -> Vec<HistoryEntry> {
        self.entries.iter().rev().take(n).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
