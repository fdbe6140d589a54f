//! 严重程度检测：小写后依次检查 critical → warning → severe

use crate::analysis::Severity;

const RULES: &[(&str, Severity)] = &[
    ("critical", Severity::Critical),
    ("warning", Severity::Warning),
    ("severe", Severity::Critical),
];

/// 都不命中时为 Info
pub fn severity(text: &str) -> Severity {
    let lower = text.to_lowercase();
    RULES
        .iter()
        .find(|(needle, _)| lower.contains(needle))
        .map(|(_, level)| *level)
        .unwrap_or(Severity::Info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_levels() {
        assert_eq!(severity("CRITICAL failure"), Severity::Critical);
        assert_eq!(severity("a Warning was logged"), Severity::Warning);
        assert_eq!(severity("severe outage"), Severity::Critical);
        assert_eq!(severity("all good"), Severity::Info);
    }

    #[test]
    fn test_critical_checked_before_warning() {
        assert_eq!(severity("warning: critical path down"), Severity::Critical);
    }

    #[test]
    fn test_warning_checked_before_severe() {
        assert_eq!(severity("severe warning"), Severity::Warning);
    }
}
