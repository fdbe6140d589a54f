//! 界面渲染
//!
//! 左侧为常见错误预设与语言列表，右侧自上而下为输入框、分析结果（类别 / 严重程度 / 解释 / 快速修复）、
//! 最近历史，底部一行显示提示或快捷键。

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::analysis::{Severity, COMMON_ERRORS};
use crate::core::{InputMode, NoticeLevel, Phase, UiState};
use crate::language::LANGUAGES;

/// 历史条目中解释的显示上限
const MAX_HISTORY_CHARS: usize = 90;

/// 当前焦点区域
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Input,
    Presets,
    Languages,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Input => Focus::Presets,
            Focus::Presets => Focus::Languages,
            Focus::Languages => Focus::Input,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Input => Focus::Languages,
            Focus::Presets => Focus::Input,
            Focus::Languages => Focus::Presets,
        }
    }
}

/// 仅属于界面的本地状态
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub input_buffer: String,
    pub focus: Focus,
    pub preset_index: usize,
    pub language_index: usize,
    pub result_scroll: u16,
}

/// 截断为单行显示
fn truncate_for_display(content: &str, limit: usize) -> String {
    let flat = content.split_whitespace().collect::<Vec<_>>().join(" ");
    let chars: Vec<char> = flat.chars().collect();
    if chars.len() <= limit {
        return flat;
    }
    let head: String = chars.iter().take(limit).collect();
    format!("{}…", head)
}

fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "Ready",
        Phase::Listening => "Listening…",
        Phase::InputCaptured => "Input captured",
        Phase::Explaining => "Asking the model…",
        Phase::Classifying => "Classifying…",
        Phase::Classified => "Classified",
        Phase::Displayed => "Done",
    }
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Critical => Color::Red,
        Severity::Warning => Color::Yellow,
        Severity::Info => Color::Green,
    }
}

fn focus_border(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Blue)
    }
}

/// 绘制一帧
pub fn draw(f: &mut Frame, state: &UiState, view: &ViewState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(1)])
        .split(f.area());
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(36), Constraint::Min(40)])
        .split(rows[0]);

    draw_sidebar(f, columns[0], state, view);
    draw_main(f, columns[1], state, view);
    draw_status(f, rows[1], state);
}

fn draw_sidebar(f: &mut Frame, area: Rect, state: &UiState, view: &ViewState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(COMMON_ERRORS.len() as u16 + 2),
            Constraint::Min(4),
        ])
        .split(area);

    let presets: Vec<ListItem> = COMMON_ERRORS
        .iter()
        .map(|e| ListItem::new(e.label))
        .collect();
    let presets = List::new(presets)
        .block(
            Block::default()
                .title(" Common errors ")
                .borders(Borders::ALL)
                .border_style(focus_border(view.focus == Focus::Presets)),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut preset_state = ListState::default();
    if view.focus == Focus::Presets {
        preset_state.select(Some(view.preset_index));
    }
    f.render_stateful_widget(presets, chunks[0], &mut preset_state);

    let languages: Vec<ListItem> = LANGUAGES
        .iter()
        .map(|p| {
            let marker = if p.display_name == state.language.display_name {
                "● "
            } else {
                "  "
            };
            ListItem::new(format!("{}{} ({})", marker, p.display_name, p.speech_locale))
        })
        .collect();
    let languages = List::new(languages)
        .block(
            Block::default()
                .title(" Language ")
                .borders(Borders::ALL)
                .border_style(focus_border(view.focus == Focus::Languages)),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut language_state = ListState::default();
    language_state.select(Some(view.language_index));
    f.render_stateful_widget(languages, chunks[1], &mut language_state);
}

fn draw_main(f: &mut Frame, area: Rect, state: &UiState, view: &ViewState) {
    let history_height = (state.recent.len().max(1) as u16) * 2 + 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(6),
            Constraint::Length(history_height),
        ])
        .split(area);

    // 输入框
    let mode = match state.input_mode {
        InputMode::Text => "Text",
        InputMode::Voice => "Voice",
    };
    let input_title = format!(
        " Netlog │ {} │ {} │ {} input ",
        phase_label(state.phase),
        state.language.display_name,
        mode
    );
    let input = Paragraph::new(view.input_buffer.as_str())
        .block(
            Block::default()
                .title(input_title)
                .borders(Borders::ALL)
                .border_style(focus_border(view.focus == Focus::Input)),
        )
        .wrap(Wrap { trim: false })
        .style(if state.input_locked() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        });
    f.render_widget(input, chunks[0]);

    // 分析结果
    let mut lines: Vec<Line> = Vec::new();
    let mut result_title = " Analysis ".to_string();
    if let Some(result) = &state.result {
        let severity = result.report.severity();
        result_title = format!(
            " Analysis │ {} │ {} ",
            result.report.category(),
            severity
        );
        lines.push(Line::from(vec![
            Span::styled("Category: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(result.report.category().to_string()),
            Span::raw("   "),
            Span::styled("Severity: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                severity.to_string(),
                Style::default().fg(severity_color(severity)),
            ),
        ]));
        if let Some(fix) = &result.quick_fix {
            lines.push(Line::from(vec![
                Span::styled("Quick fix: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(fix.command, Style::default().fg(Color::Cyan)),
                Span::styled("  (Ctrl+Y copy)", Style::default().fg(Color::DarkGray)),
            ]));
        }
        lines.push(Line::from(""));
        for l in result.explanation.lines() {
            lines.push(Line::from(l.to_string()));
        }
    } else {
        lines.push(Line::from(Span::styled(
            "Type a network error, pick a common error, or press Ctrl+R to speak.",
            Style::default().fg(Color::DarkGray),
        )));
    }
    let result = Paragraph::new(Text::from(lines))
        .block(Block::default().title(result_title).borders(Borders::ALL))
        .wrap(Wrap { trim: false })
        .scroll((view.result_scroll, 0));
    f.render_widget(result, chunks[1]);

    // 最近历史
    let mut history_lines: Vec<Line> = Vec::new();
    for entry in &state.recent {
        history_lines.push(Line::from(vec![
            Span::styled(
                format!("{} ", entry.created_at.format("%H:%M:%S")),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                format!("[{} / {}] ", entry.category(), entry.severity()),
                Style::default().fg(severity_color(entry.severity())),
            ),
            Span::raw(truncate_for_display(entry.input_text(), MAX_HISTORY_CHARS)),
        ]));
        history_lines.push(Line::from(Span::styled(
            format!(
                "    {}",
                truncate_for_display(entry.explanation_text(), MAX_HISTORY_CHARS)
            ),
            Style::default().fg(Color::Gray),
        )));
    }
    let history_title = format!(" Recent ({} total) ", state.history_len);
    let history = Paragraph::new(Text::from(history_lines))
        .block(Block::default().title(history_title).borders(Borders::ALL));
    f.render_widget(history, chunks[2]);
}

fn draw_status(f: &mut Frame, area: Rect, state: &UiState) {
    let line = match &state.notice {
        Some(notice) => {
            let color = match notice.level {
                NoticeLevel::Info => Color::Green,
                NoticeLevel::Warning => Color::Yellow,
                NoticeLevel::Error => Color::Red,
            };
            Line::from(Span::styled(notice.text.clone(), Style::default().fg(color)))
        }
        None => {
            let voice = if state.speech_available {
                "Ctrl+R speak │ Ctrl+T mode │ "
            } else {
                ""
            };
            Line::from(Span::styled(
                format!(
                    " Enter analyze │ Tab focus │ {}Ctrl+L clear │ Ctrl+Y copy fix │ PgUp/PgDn scroll │ Esc quit ",
                    voice
                ),
                Style::default().fg(Color::DarkGray),
            ))
        }
    };
    f.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_for_display() {
        assert_eq!(truncate_for_display("a\n b", 10), "a b");
        let long = "x".repeat(20);
        assert_eq!(truncate_for_display(&long, 5), "xxxxx…");
    }

    #[test]
    fn test_focus_cycle() {
        assert_eq!(Focus::Input.next().next().next(), Focus::Input);
        assert_eq!(Focus::Input.prev(), Focus::Languages);
    }
}
