//! 外部协作方：语音采集、剪贴板

pub mod clipboard;
pub mod speech;

pub use clipboard::{create_clipboard, Clipboard, CommandClipboard};
pub use speech::{create_speech_capture, CommandSpeechCapture, NoSpeech, SpeechCapture, SpeechError};
