//! 剪贴板：把快速修复命令交给系统复制工具（pbcopy / wl-copy / xclip / clip）
//!
//! 只管发送，失败仅记录日志；复制工具卡住时超时后杀掉子进程。

use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::config::ClipboardSection;

/// 复制工具的最长运行时间
const COPY_TIMEOUT: Duration = Duration::from_secs(5);

#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn copy(&self, text: &str);
}

/// 通过外部命令写剪贴板，文本经 stdin 传入
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandClipboard {
    /// 解析 "xclip -selection clipboard" 这类命令行
    pub fn from_command_line(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace().map(String::from);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
            timeout: COPY_TIMEOUT,
        })
    }

    /// 平台默认命令
    pub fn platform_default() -> Self {
        let line = if cfg!(target_os = "macos") {
            "pbcopy"
        } else if cfg!(target_os = "windows") {
            "clip"
        } else if std::env::var_os("WAYLAND_DISPLAY").is_some() {
            "wl-copy"
        } else {
            "xclip -selection clipboard"
        };
        Self::from_command_line(line).unwrap_or(Self {
            program: line.to_string(),
            args: Vec::new(),
            timeout: COPY_TIMEOUT,
        })
    }

    async fn try_copy(&self, text: &str) -> std::io::Result<()> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()?;
        let run = async {
            // stdin 在 wait 之前关闭，复制工具才能读到 EOF
            if let Some(mut stdin) = child.stdin.take() {
                stdin.write_all(text.as_bytes()).await?;
            }
            child.wait().await
        };
        let status = tokio::time::timeout(self.timeout, run)
            .await
            .map_err(|_| {
                std::io::Error::new(
                    std::io::ErrorKind::TimedOut,
                    format!("no exit within {:?}", self.timeout),
                )
            })??;
        if !status.success() {
            return Err(std::io::Error::other(format!("exit {:?}", status.code())));
        }
        Ok(())
    }
}

#[async_trait]
impl Clipboard for CommandClipboard {
    async fn copy(&self, text: &str) {
        match self.try_copy(text).await {
            Ok(()) => tracing::info!(program = %self.program, "copied to clipboard"),
            Err(e) => tracing::warn!(program = %self.program, error = %e, "clipboard copy failed"),
        }
    }
}

pub fn create_clipboard(cfg: &ClipboardSection) -> Arc<dyn Clipboard> {
    let clipboard = cfg
        .command
        .as_deref()
        .and_then(CommandClipboard::from_command_line)
        .unwrap_or_else(CommandClipboard::platform_default);
    Arc::new(clipboard)
}
