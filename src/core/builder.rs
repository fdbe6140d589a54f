//! Translator 构建器：统一的初始化逻辑
//!
//! TUI 与测试共用：从配置创建 LLM、语音、剪贴板，也可逐项替换为自定义实现。

use std::sync::Arc;

use crate::analysis::{Explainer, SamplingParams};
use crate::config::AppConfig;
use crate::core::orchestrator::{create_llm_from_config, sampling_params};
use crate::core::{AppError, SessionContext, Translator};
use crate::integrations::{
    create_clipboard, create_speech_capture, Clipboard, CommandClipboard, NoSpeech, SpeechCapture,
};
use crate::language::{resolve, LanguageProfile};
use crate::llm::LlmClient;

/// Translator 构建器
pub struct TranslatorBuilder {
    llm: Result<Arc<dyn LlmClient>, AppError>,
    params: SamplingParams,
    speech: Box<dyn SpeechCapture>,
    clipboard: Arc<dyn Clipboard>,
    language: LanguageProfile,
    history_display: usize,
    listen_secs: u64,
    /// 启动时就应告知用户的问题（如配置文件解析失败）
    startup_error: Option<AppError>,
}

impl TranslatorBuilder {
    /// 以给定模型客户端创建，其余为默认（无语音、平台剪贴板、English、显示 3 条历史）
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self {
            llm: Ok(llm),
            params: SamplingParams::default(),
            speech: Box::new(NoSpeech),
            clipboard: Arc::new(CommandClipboard::platform_default()),
            language: LanguageProfile::english(),
            history_display: 3,
            listen_secs: 5,
            startup_error: None,
        }
    }

    /// 从配置创建；缺少 API Key 时 Translator 照常构建，但所有分析返回配置错误
    pub fn from_config(cfg: &AppConfig) -> Self {
        let language = resolve(&cfg.app.default_language).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "default language not supported, using English");
            LanguageProfile::english()
        });
        let llm = create_llm_from_config(cfg);
        if let Err(e) = &llm {
            tracing::error!(error = %e, "model client not configured");
        }
        Self {
            llm,
            params: sampling_params(cfg),
            speech: create_speech_capture(&cfg.speech),
            clipboard: create_clipboard(&cfg.clipboard),
            language,
            history_display: cfg.app.history_display,
            listen_secs: cfg.speech.listen_secs,
            startup_error: None,
        }
    }

    /// 从 load_config 的结果创建；解析错误成为会话开始时的提示
    pub fn from_loaded(cfg: &AppConfig, load_error: Option<config::ConfigError>) -> Self {
        let mut builder = Self::from_config(cfg);
        builder.startup_error = load_error.map(|e| {
            tracing::error!(error = %e, "config could not be parsed");
            AppError::Configuration(format!("{}; affected settings use defaults", e))
        });
        builder
    }

    /// 以配置错误创建（分析被阻止）
    pub fn unconfigured(err: AppError) -> Self {
        let mut builder = Self::new(Arc::new(crate::llm::MockLlmClient));
        builder.llm = Err(err);
        builder
    }

    pub fn with_speech(mut self, speech: impl SpeechCapture + 'static) -> Self {
        self.speech = Box::new(speech);
        self
    }

    pub fn with_clipboard(mut self, clipboard: impl Clipboard + 'static) -> Self {
        self.clipboard = Arc::new(clipboard);
        self
    }

    pub fn build(self) -> Translator {
        let params = self.params;
        let explainer = self.llm.map(|llm| Explainer::new(llm, params));
        Translator::from_parts(
            explainer,
            self.speech,
            self.clipboard,
            SessionContext::new(self.language),
            self.history_display,
            self.listen_secs,
            self.startup_error,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;
    use crate::core::NoticeLevel;
    use std::io::Write;

    #[test]
    fn test_from_config_with_mock_provider() {
        let mut cfg = AppConfig::default();
        cfg.llm.provider = "mock".to_string();
        cfg.app.default_language = "Xhosa".to_string();
        let translator = TranslatorBuilder::from_config(&cfg).build();
        assert!(translator.notice().is_none());
        assert_eq!(translator.session().language.speech_locale, "xh-ZA");
        assert!(!translator.speech_available());
    }

    #[test]
    fn test_missing_api_key_surfaces_at_startup() {
        let mut cfg = AppConfig::default();
        cfg.llm.api_key_env = "NETLOG_TEST_KEY_THAT_IS_NEVER_SET".to_string();
        let translator = TranslatorBuilder::from_config(&cfg).build();
        let notice = translator.notice().expect("configuration notice");
        assert!(notice.text.contains("NETLOG_TEST_KEY_THAT_IS_NEVER_SET"));
    }

    #[test]
    fn test_unsupported_default_language_falls_back() {
        let mut cfg = AppConfig::default();
        cfg.llm.provider = "mock".to_string();
        cfg.app.default_language = "Klingon".to_string();
        let translator = TranslatorBuilder::from_config(&cfg).build();
        assert_eq!(translator.session().language.display_name, "English");
    }

    #[test]
    fn test_config_parse_error_surfaces_at_startup() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[app]\nhistory_display = \"not-a-number\"\n\n[llm]\nprovider = \"mock\"\n"
        )
        .unwrap();

        let (cfg, err) = load_config(Some(file.path().to_path_buf()));
        let translator = TranslatorBuilder::from_loaded(&cfg, err).build();
        let notice = translator.notice().expect("config notice");
        assert_eq!(notice.level, NoticeLevel::Error);
        assert!(notice.text.contains("not-a-number"));
        // provider = "mock" 仍然生效，不会再报缺少 API Key
        assert!(!notice.text.contains("GROQ_API_KEY"));
    }

    #[test]
    fn test_config_parse_error_and_missing_key_both_shown() {
        let mut cfg = AppConfig::default();
        cfg.llm.api_key_env = "NETLOG_TEST_KEY_THAT_IS_NEVER_SET".to_string();
        let err = config::ConfigError::Message("bad value".to_string());
        let translator = TranslatorBuilder::from_loaded(&cfg, Some(err)).build();
        let text = &translator.notice().expect("config notice").text;
        assert!(text.contains("bad value"));
        assert!(text.contains("NETLOG_TEST_KEY_THAT_IS_NEVER_SET"));
    }
}
