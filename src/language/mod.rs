//! 语言层：界面语言名 → 语音识别 locale 与提示词语言码，以及各语言的 system prompt

pub mod profiles;
pub mod prompts;

pub use profiles::{resolve, LanguageProfile, LANGUAGES};
pub use prompts::{prompt_for, ANALYSIS_SUFFIX};
