//! TUI 应用主循环
//!
//! 进入全屏/原始模式，轮询 state_rx 与键盘事件，将用户输入与快捷键转为 Command 发送给编排器，
//! 每帧用 draw 渲染 UiState 与本地 ViewState。

use std::io::{self, Stdout};

use crossterm::event::KeyCode;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::{mpsc, watch};

use crate::analysis::COMMON_ERRORS;
use crate::core::{Command, InputMode, UiState};
use crate::language::LANGUAGES;
use crate::ui::event::{AppEvent, EventHandler};
use crate::ui::render::{draw, Focus, ViewState};

/// 运行 TUI：启用原始模式与全屏，循环 poll 事件 + 渲染，退出时恢复终端
pub async fn run_app(
    state_rx: watch::Receiver<UiState>,
    cmd_tx: mpsc::UnboundedSender<Command>,
) -> anyhow::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, state_rx, EventHandler::new(cmd_tx)).await;

    restore_terminal(&mut terminal)?;
    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state_rx: watch::Receiver<UiState>,
    events: EventHandler,
) -> anyhow::Result<()> {
    let mut view = ViewState::default();
    let mut seen = SeenState::default();

    loop {
        let state = state_rx.borrow().clone();
        seen.sync(&state, &mut view);

        if let Some(ev) = events.poll()? {
            match ev {
                AppEvent::Command(Command::Quit) => {
                    events.send(Command::Quit);
                    break;
                }
                AppEvent::Command(cmd) if !state.input_locked() => events.send(cmd),
                AppEvent::Key(key) if !state.input_locked() => {
                    handle_key(key.code, &state, &mut view, &events)
                }
                _ => {}
            }
        }

        terminal.draw(|f| draw(f, &state, &view))?;

        tokio::task::yield_now().await;
    }
    Ok(())
}

/// 上一帧看到的会话侧状态，变化时改写本地 ViewState
struct SeenState {
    input_revision: u64,
    history_len: usize,
    language: &'static str,
}

impl Default for SeenState {
    fn default() -> Self {
        Self {
            input_revision: u64::MAX,
            history_len: usize::MAX,
            language: "",
        }
    }
}

impl SeenState {
    fn sync(&mut self, state: &UiState, view: &mut ViewState) {
        // 会话一侧改写了输入（预设、语音、清空）
        if state.input_revision != self.input_revision {
            self.input_revision = state.input_revision;
            view.input_buffer = state.input.clone();
        }
        if state.history_len != self.history_len {
            self.history_len = state.history_len;
            view.result_scroll = 0;
        }
        // 会话一侧改了语言（如未知语言回退 English）
        if state.language.display_name != self.language {
            self.language = state.language.display_name;
            view.language_index = language_index(state);
        }
    }
}

/// 按焦点处理普通按键
fn handle_key(code: KeyCode, state: &UiState, view: &mut ViewState, events: &EventHandler) {
    match code {
        KeyCode::Enter => match view.focus {
            Focus::Input => {
                if state.input_mode == InputMode::Voice {
                    events.send(Command::Listen);
                } else {
                    events.send(Command::Analyze(view.input_buffer.clone()));
                }
            }
            Focus::Presets => {
                events.send(Command::LoadPreset(view.preset_index));
                view.focus = Focus::Input;
            }
            Focus::Languages => {
                events.send(Command::SelectLanguage(
                    LANGUAGES[view.language_index].display_name.to_string(),
                ));
            }
        },
        KeyCode::Tab => view.focus = view.focus.next(),
        KeyCode::BackTab => view.focus = view.focus.prev(),
        KeyCode::Backspace => {
            if view.focus == Focus::Input {
                view.input_buffer.pop();
            }
        }
        KeyCode::Char(c) => {
            if view.focus == Focus::Input {
                view.input_buffer.push(c);
            }
        }
        KeyCode::Up => match view.focus {
            Focus::Presets => view.preset_index = view.preset_index.saturating_sub(1),
            Focus::Languages => {
                view.language_index = view.language_index.saturating_sub(1);
                select_language(view, events);
            }
            Focus::Input => view.result_scroll = view.result_scroll.saturating_sub(1),
        },
        KeyCode::Down => match view.focus {
            Focus::Presets => {
                view.preset_index = (view.preset_index + 1).min(COMMON_ERRORS.len() - 1)
            }
            Focus::Languages => {
                view.language_index = (view.language_index + 1).min(LANGUAGES.len() - 1);
                select_language(view, events);
            }
            Focus::Input => view.result_scroll = view.result_scroll.saturating_add(1),
        },
        KeyCode::PageUp => view.result_scroll = view.result_scroll.saturating_sub(10),
        KeyCode::PageDown => view.result_scroll = view.result_scroll.saturating_add(10),
        KeyCode::Home => view.result_scroll = 0,
        _ => {}
    }
}

fn language_index(state: &UiState) -> usize {
    LANGUAGES
        .iter()
        .position(|p| p.display_name == state.language.display_name)
        .unwrap_or(0)
}

fn select_language(view: &ViewState, events: &EventHandler) {
    events.send(Command::SelectLanguage(
        LANGUAGES[view.language_index].display_name.to_string(),
    ));
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
