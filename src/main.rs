//! Netlog - Network Log Translator
//!
//! 入口：加载配置、初始化日志、创建翻译器与 TUI，并运行主循环。

use anyhow::Context;
use netlog::{config::load_config, create_translator, ui::run_app};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 日志路径来自配置；配置解析错误由 create_translator 作为启动提示显示
    let (cfg, _) = load_config(None);
    netlog::observability::init(&cfg.app.log_file).context("Failed to init logging")?;

    let (cmd_tx, state_rx) = create_translator(None)
        .await
        .context("Failed to create translator")?;

    run_app(state_rx, cmd_tx).await.context("App run failed")?;

    Ok(())
}
