//! 语音输入：通过外部识别命令录音并转写
//!
//! 命令参数中的 {locale} / {timeout} 会被替换；stdout 可以是纯文本，也可以是带 "text" 字段的 JSON。
//! 未配置命令或命令不在 PATH 中时视为不可用（沙箱 / 云端环境），编排器回退到纯文本输入。

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;

use crate::config::SpeechSection;

/// 进程启动与结束的额外宽限时间（秒）
const GRACE_SECS: u64 = 2;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpeechError {
    #[error("no speech detected within {0}s")]
    Timeout(u64),

    #[error("speech was not recognized")]
    Unrecognized,

    #[error("speech capture is not available in this environment")]
    Unavailable,

    #[error("speech capture failed: {0}")]
    Failed(String),
}

/// 语音采集抽象
#[async_trait]
pub trait SpeechCapture: Send + Sync {
    /// 当前环境是否能录音；为 false 时不得调用 listen
    fn is_available(&self) -> bool;

    /// 在固定窗口内监听一次并返回转写文本
    async fn listen(&self, locale: &str, timeout_secs: u64) -> Result<String, SpeechError>;
}

/// 不支持语音的环境
#[derive(Debug, Default)]
pub struct NoSpeech;

#[async_trait]
impl SpeechCapture for NoSpeech {
    fn is_available(&self) -> bool {
        false
    }

    async fn listen(&self, _locale: &str, _timeout_secs: u64) -> Result<String, SpeechError> {
        Err(SpeechError::Unavailable)
    }
}

/// 调用外部识别程序
#[derive(Debug, Clone)]
pub struct CommandSpeechCapture {
    program: String,
    args: Vec<String>,
}

impl CommandSpeechCapture {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    fn render_args(&self, locale: &str, timeout_secs: u64) -> Vec<String> {
        self.args
            .iter()
            .map(|a| {
                a.replace("{locale}", locale)
                    .replace("{timeout}", &timeout_secs.to_string())
            })
            .collect()
    }
}

/// 根据配置创建语音采集器；未配置命令时返回 NoSpeech
pub fn create_speech_capture(cfg: &SpeechSection) -> Box<dyn SpeechCapture> {
    match cfg.command.as_deref().map(str::trim) {
        Some(program) if !program.is_empty() => {
            Box::new(CommandSpeechCapture::new(program, cfg.args.clone()))
        }
        _ => Box::new(NoSpeech),
    }
}

/// 程序是否可执行：含路径分隔符时检查文件，否则在 PATH 中查找
pub(crate) fn program_exists(program: &str) -> bool {
    if program.contains(std::path::MAIN_SEPARATOR) || program.contains('/') {
        return Path::new(program).is_file();
    }
    let Some(paths) = std::env::var_os("PATH") else {
        return false;
    };
    std::env::split_paths(&paths).any(|dir| {
        let candidate = dir.join(program);
        candidate.is_file() || (cfg!(windows) && candidate.with_extension("exe").is_file())
    })
}

/// 解析识别器输出：JSON 取 "text" 字段，否则按纯文本
pub fn parse_transcript(stdout: &str) -> String {
    let trimmed = stdout.trim();
    if trimmed.starts_with('{') {
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
            return value
                .get("text")
                .and_then(|t| t.as_str())
                .unwrap_or("")
                .trim()
                .to_string();
        }
    }
    trimmed.to_string()
}

#[async_trait]
impl SpeechCapture for CommandSpeechCapture {
    fn is_available(&self) -> bool {
        program_exists(&self.program)
    }

    async fn listen(&self, locale: &str, timeout_secs: u64) -> Result<String, SpeechError> {
        let args = self.render_args(locale, timeout_secs);
        tracing::info!(program = %self.program, locale, timeout_secs, "speech capture start");

        let mut cmd = Command::new(&self.program);
        cmd.args(&args).kill_on_drop(true);

        let output = tokio::time::timeout(
            Duration::from_secs(timeout_secs + GRACE_SECS),
            cmd.output(),
        )
        .await
        .map_err(|_| SpeechError::Timeout(timeout_secs))?
        .map_err(|e| SpeechError::Failed(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SpeechError::Failed(format!(
                "exit {:?}: {}",
                output.status.code(),
                stderr.trim()
            )));
        }

        let transcript = parse_transcript(&String::from_utf8_lossy(&output.stdout));
        if transcript.is_empty() {
            return Err(SpeechError::Unrecognized);
        }
        Ok(transcript)
    }
}
