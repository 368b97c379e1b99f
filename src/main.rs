//! PDF一括リネーム - メインエントリポイント

use anyhow::Result;
use clap::Parser;
use pdf_bulk_renamer::cli::{self, Cli, Command};
use pdf_bulk_renamer::config::Settings;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // 環境変数の読み込み
    dotenvy::dotenv().ok();

    // ロギング初期化
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let settings = Settings::from_env();

    // サブコマンドなしはGUI
    let command = Cli::parse().command.unwrap_or(Command::Gui);
    cli::run(command, &settings)
}
