//! 常见网络错误预设：界面上的快捷按钮，点击后把描述填入输入框

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommonError {
    pub label: &'static str,
    pub description: &'static str,
}

pub const COMMON_ERRORS: [CommonError; 5] = [
    CommonError {
        label: "DNS_PROBE_FINISHED_NO_INTERNET",
        description: "DNS resolution failed. Unable to connect to internet.",
    },
    CommonError {
        label: "Connection Timed Out",
        description: "Network connection could not be established within expected timeframe.",
    },
    CommonError {
        label: "No Route to Host",
        description: "Network path to destination is unavailable.",
    },
    CommonError {
        label: "Connection Refused",
        description: "Remote server rejected connection attempt.",
    },
    CommonError {
        label: "SSL Handshake Failed",
        description: "Secure connection could not be established.",
    },
];

impl CommonError {
    /// 填入输入框的文本：标签 + 描述
    pub fn input_text(&self) -> String {
        format!("{}: {}", self.label, self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_text_contains_label_and_description() {
        let text = COMMON_ERRORS[4].input_text();
        assert!(text.starts_with("SSL Handshake Failed"));
        assert!(text.contains("Secure connection"));
    }
}
