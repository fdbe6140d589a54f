//! 事件处理
//!
//! 轮询 crossterm 键盘事件，将全局快捷键（Ctrl+R/Ctrl+T/Ctrl+L/Ctrl+Y/Ctrl+Q/Esc）转为 Command，
//! 其余按键交给 run_app 按焦点处理。

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;

use crate::core::Command;

/// 应用事件：来自快捷键的 Command 或原始 KeyEvent
#[derive(Debug, Clone)]
pub enum AppEvent {
    Command(Command),
    Key(KeyEvent),
}

/// 事件处理器：持有 cmd_tx，poll 时读键盘并返回 AppEvent，send 发送命令
pub struct EventHandler {
    cmd_tx: mpsc::UnboundedSender<Command>,
}

impl EventHandler {
    pub fn new(cmd_tx: mpsc::UnboundedSender<Command>) -> Self {
        Self { cmd_tx }
    }

    pub fn poll(&self) -> anyhow::Result<Option<AppEvent>> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(Some(map_key(key)));
                }
            }
        }
        Ok(None)
    }

    pub fn send(&self, cmd: Command) {
        let _ = self.cmd_tx.send(cmd);
    }
}

/// 全局快捷键映射
pub fn map_key(key: KeyEvent) -> AppEvent {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('q') if ctrl => AppEvent::Command(Command::Quit),
        KeyCode::Esc => AppEvent::Command(Command::Quit),
        KeyCode::Char('r') if ctrl => AppEvent::Command(Command::Listen),
        KeyCode::Char('t') if ctrl => AppEvent::Command(Command::ToggleInputMode),
        KeyCode::Char('l') if ctrl => AppEvent::Command(Command::ClearInput),
        KeyCode::Char('y') if ctrl => AppEvent::Command(Command::CopyQuickFix),
        _ => AppEvent::Key(key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortcuts_map_to_commands() {
        let ctrl = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL);
        assert!(matches!(map_key(ctrl('l')), AppEvent::Command(Command::ClearInput)));
        assert!(matches!(map_key(ctrl('r')), AppEvent::Command(Command::Listen)));
        assert!(matches!(map_key(ctrl('y')), AppEvent::Command(Command::CopyQuickFix)));
        assert!(matches!(
            map_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)),
            AppEvent::Command(Command::Quit)
        ));
    }

    #[test]
    fn test_plain_chars_pass_through() {
        let key = KeyEvent::new(KeyCode::Char('l'), KeyModifiers::NONE);
        assert!(matches!(map_key(key), AppEvent::Key(_)));
    }
}
