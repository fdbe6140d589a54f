//! 应用配置：从 config/default.toml 与环境变量加载
//!
//! 加载顺序：先读 TOML 文件，再用环境变量 `NETLOG__*` 覆盖（双下划线表示嵌套，如 `NETLOG__LLM__PROVIDER=mock`）。

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Deserialize;

/// 应用配置根（对应 config/default.toml 的顶层）
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSection,
    #[serde(default)]
    pub llm: LlmSection,
    #[serde(default)]
    pub speech: SpeechSection,
    #[serde(default)]
    pub clipboard: ClipboardSection,
}

/// [app] 段：历史显示条数、默认语言、日志文件
#[derive(Debug, Clone, Deserialize)]
pub struct AppSection {
    /// 历史面板显示的最近条数
    #[serde(default = "default_history_display")]
    pub history_display: usize,
    #[serde(default = "default_language")]
    pub default_language: String,
    /// TUI 占用 stdout，日志写入文件
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            history_display: default_history_display(),
            default_language: default_language(),
            log_file: default_log_file(),
        }
    }
}

fn default_history_display() -> usize {
    3
}

fn default_language() -> String {
    "English".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("logs/netlog.log")
}

/// [llm] 段：后端选择、模型、采样参数与超时
#[derive(Debug, Clone, Deserialize)]
pub struct LlmSection {
    /// 后端：groq / openai / mock
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_model")]
    pub model: String,
    pub base_url: Option<String>,
    /// 保存 API Key 的环境变量名
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default)]
    pub timeouts: LlmTimeoutsSection,
}

impl Default for LlmSection {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            base_url: None,
            api_key_env: default_api_key_env(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeouts: LlmTimeoutsSection::default(),
        }
    }
}

fn default_provider() -> String {
    "groq".to_string()
}

fn default_model() -> String {
    crate::llm::GROQ_DEFAULT_MODEL.to_string()
}

fn default_api_key_env() -> String {
    "GROQ_API_KEY".to_string()
}

fn default_temperature() -> f32 {
    0.3
}

fn default_max_tokens() -> u32 {
    1500
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmTimeoutsSection {
    #[serde(default = "default_request_timeout")]
    pub request: u64,
}

impl Default for LlmTimeoutsSection {
    fn default() -> Self {
        Self {
            request: default_request_timeout(),
        }
    }
}

fn default_request_timeout() -> u64 {
    60
}

/// [speech] 段：外部识别命令、参数模板（{locale} / {timeout}）、监听时长
#[derive(Debug, Clone, Deserialize)]
pub struct SpeechSection {
    pub command: Option<String>,
    #[serde(default = "default_speech_args")]
    pub args: Vec<String>,
    #[serde(default = "default_listen_secs")]
    pub listen_secs: u64,
}

impl Default for SpeechSection {
    fn default() -> Self {
        Self {
            command: None,
            args: default_speech_args(),
            listen_secs: default_listen_secs(),
        }
    }
}

fn default_speech_args() -> Vec<String> {
    vec![
        "--locale".into(),
        "{locale}".into(),
        "--timeout".into(),
        "{timeout}".into(),
    ]
}

fn default_listen_secs() -> u64 {
    5
}

/// [clipboard] 段：复制命令（如 `xclip -selection clipboard`），未设置时按平台选择
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ClipboardSection {
    pub command: Option<String>,
}

/// 依次叠加配置源
///
/// 1. 按顺序查找 config/default.toml、../config/default.toml、default.toml，找到则作为第一源
/// 2. 若传入 config_path 且文件存在，则追加该文件（可覆盖前面的键）
/// 3. 最后叠加环境变量 NETLOG__*（双下划线表示嵌套键）
fn build_sources(config_path: Option<PathBuf>) -> Result<config::Config, config::ConfigError> {
    let mut builder = config::Config::builder();

    let default_names = ["config/default", "../config/default", "default"];
    for name in default_names {
        let path = format!("{}.toml", name);
        if std::path::Path::new(&path).exists() {
            builder = builder.add_source(config::File::with_name(name).required(false));
            break;
        }
    }

    if let Some(ref path) = config_path {
        if path.exists() {
            builder = builder.add_source(config::File::from(path.clone()).required(false));
        }
    }

    builder = builder.add_source(
        config::Environment::with_prefix("NETLOG")
            .separator("__")
            .try_parsing(true),
    );

    builder.build()
}

/// 从 config 目录与环境变量 NETLOG__* 加载配置
///
/// 某一段无法解析时只有该段回退默认值，其余段照常生效；解析错误随配置一起返回，
/// 由调用方展示给用户。
pub fn load_config(config_path: Option<PathBuf>) -> (AppConfig, Option<config::ConfigError>) {
    let sources = match build_sources(config_path) {
        Ok(sources) => sources,
        Err(e) => return (AppConfig::default(), Some(e)),
    };
    match sources.clone().try_deserialize::<AppConfig>() {
        Ok(cfg) => (cfg, None),
        Err(e) => {
            let cfg = AppConfig {
                app: section(&sources, "app"),
                llm: section(&sources, "llm"),
                speech: section(&sources, "speech"),
                clipboard: section(&sources, "clipboard"),
            };
            (cfg, Some(e))
        }
    }
}

fn section<T: DeserializeOwned + Default>(sources: &config::Config, key: &str) -> T {
    sources.get(key).unwrap_or_else(|e| {
        tracing::warn!(section = key, error = %e, "config section invalid, using defaults");
        T::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.app.history_display, 3);
        assert_eq!(cfg.app.default_language, "English");
        assert_eq!(cfg.llm.provider, "groq");
        assert_eq!(cfg.llm.api_key_env, "GROQ_API_KEY");
        assert!((cfg.llm.temperature - 0.3).abs() < f32::EPSILON);
        assert_eq!(cfg.llm.max_tokens, 1500);
        assert_eq!(cfg.speech.listen_secs, 5);
        assert!(cfg.speech.command.is_none());
    }

    #[test]
    fn test_load_explicit_file_overrides() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[app]
default_language = "Zulu"

[llm]
provider = "mock"
max_tokens = 1200

[speech]
command = "listen-once"
listen_secs = 7
"#
        )
        .unwrap();

        let (cfg, err) = load_config(Some(file.path().to_path_buf()));
        assert!(err.is_none());
        assert_eq!(cfg.app.default_language, "Zulu");
        assert_eq!(cfg.llm.provider, "mock");
        assert_eq!(cfg.llm.max_tokens, 1200);
        assert_eq!(cfg.speech.command.as_deref(), Some("listen-once"));
        assert_eq!(cfg.speech.listen_secs, 7);
        // 未出现的段落保持默认
        assert_eq!(cfg.app.history_display, 3);
    }

    #[test]
    fn test_malformed_value_keeps_other_sections() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[app]
history_display = "not-a-number"
default_language = "Zulu"

[llm]
provider = "mock"
"#
        )
        .unwrap();

        let (cfg, err) = load_config(Some(file.path().to_path_buf()));
        let err = err.expect("parse error is reported");
        assert!(err.to_string().contains("not-a-number"));
        // 出错的 [app] 段整体回退，[llm] 段保留
        assert_eq!(cfg.app.history_display, 3);
        assert_eq!(cfg.app.default_language, "English");
        assert_eq!(cfg.llm.provider, "mock");
    }
}
