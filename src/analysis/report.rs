//! 错误报告：原始文本 + 类别 + 严重程度，分类后不可变

use std::fmt;

use serde::Serialize;

/// 网络错误的粗粒度类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    #[serde(rename = "DNS")]
    Dns,
    #[serde(rename = "SSL")]
    Ssl,
    Connection,
    /// 未命中任何关键词时的默认类别
    Network,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::Dns => "DNS",
            Category::Ssl => "SSL",
            Category::Connection => "Connection",
            Category::Network => "Network",
        };
        f.write_str(s)
    }
}

/// 粗粒度的紧急程度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Severity {
    Critical,
    Warning,
    /// 默认
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Critical => "Critical",
            Severity::Warning => "Warning",
            Severity::Info => "Info",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    raw_text: String,
    category: Category,
    severity: Severity,
}

impl ErrorReport {
    pub fn new(raw_text: impl Into<String>, category: Category, severity: Severity) -> Self {
        Self {
            raw_text: raw_text.into(),
            category,
            severity,
        }
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_labels() {
        assert_eq!(Category::Dns.to_string(), "DNS");
        assert_eq!(Category::Ssl.to_string(), "SSL");
        assert_eq!(Severity::Critical.to_string(), "Critical");
    }

    #[test]
    fn test_serialize_uses_labels() {
        let report = ErrorReport::new("x", Category::Dns, Severity::Info);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["category"], "DNS");
        assert_eq!(json["severity"], "Info");
        assert_eq!(json["raw_text"], "x");
    }
}
