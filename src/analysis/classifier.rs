//! 错误分类器：小写后按 DNS → SSL → Connection 的优先级做关键词包含匹配

use crate::analysis::Category;

const DNS_KEYWORDS: &[&str] = &["dns", "domain", "server"];
const SSL_KEYWORDS: &[&str] = &["ssl", "certificate", "handshake"];
const CONNECTION_KEYWORDS: &[&str] = &["connection", "timeout", "refused", "route"];

/// 优先级顺序，先命中先返回
const RULES: &[(Category, &[&str])] = &[
    (Category::Dns, DNS_KEYWORDS),
    (Category::Ssl, SSL_KEYWORDS),
    (Category::Connection, CONNECTION_KEYWORDS),
];

/// 将任意文本映射到类别；都不命中时为 Network
pub fn classify(text: &str) -> Category {
    let lower = text.to_lowercase();
    RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::Network)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_dns() {
        assert_eq!(classify("DNS_PROBE_FINISHED_NO_INTERNET"), Category::Dns);
        assert_eq!(classify("The Domain could not be found"), Category::Dns);
        assert_eq!(classify("upstream SERVER unreachable"), Category::Dns);
    }

    #[test]
    fn test_classify_ssl() {
        assert_eq!(classify("SSL Handshake Failed"), Category::Ssl);
        assert_eq!(classify("expired certificate"), Category::Ssl);
    }

    #[test]
    fn test_classify_connection() {
        assert_eq!(classify("Connection Timed Out"), Category::Connection);
        assert_eq!(classify("No Route to Host"), Category::Connection);
        assert_eq!(classify("request timeout"), Category::Connection);
    }

    #[test]
    fn test_classify_priority_order() {
        // DNS 优先于 SSL 与 Connection
        assert_eq!(classify("server refused ssl handshake"), Category::Dns);
        // SSL 优先于 Connection
        assert_eq!(classify("handshake timeout"), Category::Ssl);
    }

    #[test]
    fn test_classify_default_network() {
        assert_eq!(classify(""), Category::Network);
        assert_eq!(classify("packet loss on wifi"), Category::Network);
    }

    #[test]
    fn test_classify_is_deterministic() {
        let text = "Remote server rejected connection attempt.";
        assert_eq!(classify(text), classify(text));
    }
}
