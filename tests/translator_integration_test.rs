//! 翻译流程集成测试：通过公开 API 驱动编排器

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use netlog::analysis::{classify, severity, Category, Severity, COMMON_ERRORS};
use netlog::core::{Command, NoticeLevel, Phase};
use netlog::integrations::Clipboard;
use netlog::llm::{ChatRequest, LlmClient, LlmError, MockLlmClient};
use netlog::TranslatorBuilder;

/// 记录请求并计数，回显 user 消息
#[derive(Default)]
struct CountingEcho {
    calls: AtomicUsize,
    systems: Mutex<Vec<String>>,
}

#[async_trait]
impl LlmClient for CountingEcho {
    async fn chat(&self, request: &ChatRequest) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.systems.lock().unwrap().push(request.system().to_string());
        Ok(request.user().to_string())
    }
}

struct DownClient;

#[async_trait]
impl LlmClient for DownClient {
    async fn chat(&self, _request: &ChatRequest) -> Result<String, LlmError> {
        Err(LlmError::Transport("dns error: failed to lookup address".to_string()))
    }
}

struct NullClipboard;

#[async_trait]
impl Clipboard for NullClipboard {
    async fn copy(&self, _text: &str) {}
}

#[tokio::test]
async fn test_preset_then_analyze_with_mock() {
    let mut t = TranslatorBuilder::new(Arc::new(MockLlmClient))
        .with_clipboard(NullClipboard)
        .build();

    t.handle(Command::LoadPreset(4)).await;
    let input = t.session().current_input().to_string();
    t.handle(Command::Analyze(input.clone())).await;

    let state = t.snapshot();
    assert_eq!(state.phase, Phase::Displayed);
    let result = state.result.expect("result");
    assert!(result.explanation.contains(COMMON_ERRORS[4].label));
    // 回显文本里有 "SSL Handshake Failed"
    assert_eq!(result.report.category(), Category::Ssl);
    assert_eq!(state.recent.len(), 1);
}

#[tokio::test]
async fn test_language_selection_changes_system_prompt() {
    let client = Arc::new(CountingEcho::default());
    let mut t = TranslatorBuilder::new(client.clone())
        .with_clipboard(NullClipboard)
        .build();

    t.handle(Command::SelectLanguage("Spanish".into())).await;
    t.handle(Command::Analyze("Connection Timed Out".into())).await;

    let systems = client.systems.lock().unwrap();
    assert!(systems[0].starts_with(netlog::language::prompt_for("es")));
}

#[tokio::test]
async fn test_whitespace_input_never_calls_model() {
    let client = Arc::new(CountingEcho::default());
    let mut t = TranslatorBuilder::new(client.clone())
        .with_clipboard(NullClipboard)
        .build();

    t.handle(Command::Analyze("  ".into())).await;
    t.handle(Command::Analyze(String::new())).await;

    assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    assert_eq!(t.snapshot().history_len, 0);
}

#[tokio::test]
async fn test_service_outage_is_reported_not_raised() {
    let mut t = TranslatorBuilder::new(Arc::new(DownClient))
        .with_clipboard(NullClipboard)
        .build();

    let keep_running = t.handle(Command::Analyze("No Route to Host".into())).await;

    assert!(keep_running);
    let state = t.snapshot();
    assert_eq!(state.history_len, 0);
    assert_eq!(state.phase, Phase::Idle);
    assert_eq!(state.notice.map(|n| n.level), Some(NoticeLevel::Error));
}

#[tokio::test]
async fn test_history_view_after_four_analyses() {
    let mut t = TranslatorBuilder::new(Arc::new(CountingEcho::default()))
        .with_clipboard(NullClipboard)
        .build();
    for i in 1..=4 {
        t.handle(Command::Analyze(format!("report {i}"))).await;
    }
    let recent = t.session().history.recent(3);
    let inputs: Vec<&str> = recent.iter().map(|e| e.input_text()).collect();
    assert_eq!(inputs, vec!["report 4", "report 3", "report 2"]);
    assert!(!inputs.contains(&"report 1"));
}

#[test]
fn test_unmatched_text_defaults() {
    for text in ["", "packet loss", "latency spikes on wifi"] {
        assert_eq!(classify(text), Category::Network);
        assert_eq!(severity(text), Severity::Info);
    }
}
