//! 交互编排器：主控循环
//!
//! Translator 负责一次分析请求的完整流程：检查输入 → 解析语言 → 请求解释 → 对解释文本分类 →
//! 写入历史 → 查找快速修复。create_translator 建立 cmd/state 两通道，后台任务逐条消费用户命令，
//! 同一时间只处理一个请求。

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use crate::analysis::{
    classify, quick_fix_for, severity, ErrorReport, Explainer, SamplingParams, COMMON_ERRORS,
};
use crate::config::{load_config, AppConfig};
use crate::core::{
    Analysis, AppError, InputMode, Notice, NoticeLevel, Phase, SessionContext, TranslatorBuilder,
    UiState,
};
use crate::integrations::{Clipboard, SpeechCapture};
use crate::language::{resolve, LanguageProfile};
use crate::llm::LlmClient;
use crate::memory::HistoryEntry;

/// 从 UI 发往编排器的用户命令
#[derive(Debug, Clone)]
pub enum Command {
    /// 分析输入框中的文本
    Analyze(String),
    /// 录一段语音，转写后立即分析
    Listen,
    SelectLanguage(String),
    /// 把第 i 个常见错误填入输入框
    LoadPreset(usize),
    ToggleInputMode,
    /// 清空当前输入（历史保留）
    ClearInput,
    /// 复制最近结果的快速修复命令
    CopyQuickFix,
    /// 退出应用
    Quit,
}

/// 会话级编排器
pub struct Translator {
    /// 配置错误时为 Err，所有分析被拒绝
    explainer: Result<Explainer, AppError>,
    speech: Box<dyn SpeechCapture>,
    /// 复制在独立任务中进行，不阻塞命令循环
    clipboard: Arc<dyn Clipboard>,
    session: SessionContext,
    phase: Phase,
    notice: Option<Notice>,
    history_display: usize,
    listen_secs: u64,
    state_tx: Option<watch::Sender<UiState>>,
}

impl Translator {
    pub(crate) fn from_parts(
        explainer: Result<Explainer, AppError>,
        speech: Box<dyn SpeechCapture>,
        clipboard: Arc<dyn Clipboard>,
        session: SessionContext,
        history_display: usize,
        listen_secs: u64,
        startup_error: Option<AppError>,
    ) -> Self {
        // 配置错误在会话开始时立即可见
        let notice = match (startup_error, explainer.as_ref().err()) {
            (Some(startup), Some(blocked)) => Some(Notice {
                level: NoticeLevel::Error,
                text: format!("{}; {}", startup, blocked),
            }),
            (Some(startup), None) => Some(startup.to_notice()),
            (None, blocked) => blocked.map(AppError::to_notice),
        };
        Self {
            explainer,
            speech,
            clipboard,
            session,
            phase: Phase::Idle,
            notice,
            history_display,
            listen_secs,
            state_tx: None,
        }
    }

    /// 每次阶段变化时把快照推给 UI
    pub fn with_state_sender(mut self, state_tx: watch::Sender<UiState>) -> Self {
        self.state_tx = Some(state_tx);
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn speech_available(&self) -> bool {
        self.speech.is_available()
    }

    /// 投影为 UI 状态
    pub fn snapshot(&self) -> UiState {
        UiState {
            phase: self.phase,
            language: self.session.language,
            input_mode: self.session.input_mode,
            speech_available: self.speech.is_available(),
            input: self.session.current_input().to_string(),
            input_revision: self.session.input_revision(),
            result: self.session.last_result.clone(),
            recent: self.session.history.recent(self.history_display),
            history_len: self.session.history.len(),
            notice: self.notice.clone(),
        }
    }

    fn publish(&self) {
        if let Some(tx) = &self.state_tx {
            let _ = tx.send(self.snapshot());
        }
    }

    fn set_phase(&mut self, phase: Phase) {
        tracing::debug!(from = ?self.phase, to = ?phase, "phase transition");
        self.phase = phase;
        self.publish();
    }

    /// 错误在此转为提示，回到 Idle
    fn report(&mut self, err: AppError) {
        tracing::warn!(error = %err, "request failed");
        self.notice = Some(err.to_notice());
        self.set_phase(Phase::Idle);
    }

    /// 处理一条命令；返回 false 表示退出
    pub async fn handle(&mut self, cmd: Command) -> bool {
        match cmd {
            Command::Analyze(text) => self.analyze(&text).await,
            Command::Listen => self.listen().await,
            Command::SelectLanguage(name) => self.select_language(&name),
            Command::LoadPreset(index) => self.load_preset(index),
            Command::ToggleInputMode => self.toggle_input_mode(),
            Command::ClearInput => self.clear_input(),
            Command::CopyQuickFix => self.copy_quick_fix(),
            Command::Quit => return false,
        }
        self.publish();
        true
    }

    /// 分析一段文本：成功停在 Displayed，失败回到 Idle 并给出提示
    pub async fn analyze(&mut self, text: &str) {
        if self.phase == Phase::Displayed {
            self.set_phase(Phase::Idle);
        }
        self.notice = None;
        match self.run_analysis(text).await {
            Ok(analysis) => {
                tracing::info!(
                    category = %analysis.report.category(),
                    severity = %analysis.report.severity(),
                    history_len = self.session.history.len(),
                    "analysis displayed"
                );
                self.session.last_result = Some(analysis);
                self.set_phase(Phase::Displayed);
            }
            Err(err) => self.report(err),
        }
    }

    async fn run_analysis(&mut self, text: &str) -> Result<Analysis, AppError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::EmptyInput);
        }
        if self.session.current_input() != text {
            self.session.set_input(text);
        }
        self.set_phase(Phase::InputCaptured);

        if let Err(err) = &self.explainer {
            return Err(err.clone());
        }
        let language = self.session.language;

        self.set_phase(Phase::Explaining);
        let explanation = self
            .explainer
            .as_ref()
            .map_err(|e| e.clone())?
            .explain(text, language.prompt_code)
            .await?;

        self.set_phase(Phase::Classifying);
        // 分类针对模型的解释文本，而非用户原始输入
        let report = ErrorReport::new(text, classify(&explanation), severity(&explanation));

        self.set_phase(Phase::Classified);
        self.session
            .history
            .append(HistoryEntry::new(report.clone(), explanation.clone()));
        let quick_fix = quick_fix_for(report.category());

        Ok(Analysis {
            report,
            explanation,
            quick_fix,
        })
    }

    /// 语音输入：不可用时回退文本模式；转写为空时提示重试
    pub async fn listen(&mut self) {
        if !self.speech.is_available() {
            self.session.input_mode = InputMode::Text;
            self.report(AppError::SpeechUnavailable);
            return;
        }
        if self.phase == Phase::Displayed {
            self.set_phase(Phase::Idle);
        }
        self.notice = None;
        self.set_phase(Phase::Listening);

        let locale = self.session.language.speech_locale;
        match self.speech.listen(locale, self.listen_secs).await {
            Ok(transcript) => {
                self.session.set_input(transcript.clone());
                self.set_phase(Phase::Idle);
                self.analyze(&transcript).await;
            }
            Err(err) => self.report(err.into()),
        }
    }

    /// 切换输出语言；未知语言回退到 English
    pub fn select_language(&mut self, display_name: &str) {
        match resolve(display_name) {
            Ok(profile) => {
                tracing::info!(language = profile.display_name, "language selected");
                self.session.language = profile;
            }
            Err(err) => {
                tracing::warn!(error = %err, "falling back to English");
                self.session.language = LanguageProfile::english();
                self.notice = Some(err.to_notice());
            }
        }
    }

    pub fn load_preset(&mut self, index: usize) {
        match COMMON_ERRORS.get(index) {
            Some(preset) => {
                self.session.set_input(preset.input_text());
                self.notice = None;
            }
            None => self.notice = Some(AppError::UnknownPreset(index).to_notice()),
        }
    }

    pub fn toggle_input_mode(&mut self) {
        self.session.input_mode = match self.session.input_mode {
            InputMode::Text if self.speech.is_available() => InputMode::Voice,
            InputMode::Text => {
                self.notice = Some(AppError::SpeechUnavailable.to_notice());
                InputMode::Text
            }
            InputMode::Voice => InputMode::Text,
        };
    }

    pub fn clear_input(&mut self) {
        self.session.clear_input();
        self.notice = None;
    }

    /// 把快速修复交给剪贴板后立即返回；复制结果只记日志
    pub fn copy_quick_fix(&mut self) {
        let fix = self
            .session
            .last_result
            .as_ref()
            .and_then(|r| r.quick_fix);
        match fix {
            Some(fix) => {
                let clipboard = Arc::clone(&self.clipboard);
                tokio::spawn(async move {
                    clipboard.copy(fix.command).await;
                });
                self.notice = Some(Notice::info(format!("Sent to clipboard: {}", fix.command)));
            }
            None => self.notice = Some(Notice::info("No quick fix for this result")),
        }
    }
}

/// 根据配置选择 LLM 后端（Groq / OpenAI 兼容 / Mock）；缺少 API Key 为配置错误
pub fn create_llm_from_config(cfg: &AppConfig) -> Result<Arc<dyn LlmClient>, AppError> {
    let provider = cfg.llm.provider.to_lowercase();
    if provider == "mock" {
        tracing::warn!("Using Mock LLM, explanations echo the input");
        return Ok(Arc::new(crate::llm::MockLlmClient));
    }

    let api_key = std::env::var(&cfg.llm.api_key_env)
        .ok()
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| {
            AppError::Configuration(format!(
                "{} is not set; add it to the environment to enable analysis",
                cfg.llm.api_key_env
            ))
        })?;
    let timeout = cfg.llm.timeouts.request;

    match provider.as_str() {
        "groq" => {
            tracing::info!("Using Groq LLM ({})", cfg.llm.model);
            Ok(Arc::new(crate::llm::create_groq_client(&api_key, timeout)))
        }
        "openai" => {
            tracing::info!("Using OpenAI-compatible LLM ({})", cfg.llm.model);
            Ok(Arc::new(crate::llm::OpenAiClient::new(
                cfg.llm.base_url.as_deref(),
                &api_key,
                timeout,
            )))
        }
        other => Err(AppError::Configuration(format!(
            "unknown LLM provider '{}'",
            other
        ))),
    }
}

pub(crate) fn sampling_params(cfg: &AppConfig) -> SamplingParams {
    SamplingParams::from(&cfg.llm)
}

/// 创建翻译器运行时：返回命令发送端、状态接收端；后台任务逐条消费命令并更新 state。
/// 配置解析错误不会中止启动，而是作为第一条提示显示。
pub async fn create_translator(
    config_path: Option<PathBuf>,
) -> anyhow::Result<(mpsc::UnboundedSender<Command>, watch::Receiver<UiState>)> {
    let (cfg, load_error) = load_config(config_path);
    let translator = TranslatorBuilder::from_loaded(&cfg, load_error).build();

    // 两通道：UI -> Core 命令；Core -> UI 状态快照
    let (cmd_tx, mut cmd_rx) = mpsc::unbounded_channel::<Command>();
    let (state_tx, state_rx) = watch::channel(translator.snapshot());
    let mut translator = translator.with_state_sender(state_tx);

    tokio::spawn(async move {
        while let Some(cmd) = cmd_rx.recv().await {
            if !translator.handle(cmd).await {
                break;
            }
        }
        tracing::info!("translator session ended");
    });

    Ok((cmd_tx, state_rx))
}
