//! コマンドライン - プレビュー、ローカルリネーム、ZIP作成

use crate::archive::{package_files, DEFAULT_ARCHIVE_NAME};
use crate::batch::{RenamePlan, Summary};
use crate::config::Settings;
use crate::local::{commit, scan_directory, CommitOptions, RenameReport};
use crate::naming::{Rule, Side};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pdf_bulk_renamer", version, about = "PDFファイルを一括リネーム")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// 変更内容を表示（ディスクは変更しない）
    Preview {
        #[command(flatten)]
        target: TargetArgs,
        #[command(flatten)]
        rule: RuleArgs,
        /// JSONで出力
        #[arg(long)]
        json: bool,
    },
    /// フォルダ内のファイルをリネーム
    Rename {
        #[command(flatten)]
        target: TargetArgs,
        #[command(flatten)]
        rule: RuleArgs,
        /// ドライラン（変更しない）。`--dry-run false` で設定を上書きして実行
        #[arg(long, num_args = 0..=1, default_missing_value = "true")]
        dry_run: Option<bool>,
        /// バックアップ済みであることを確認
        #[arg(short, long)]
        yes: bool,
        #[arg(long)]
        json: bool,
    },
    /// ファイルを新しい名前でZIPにまとめる（元のファイルは変更しない）
    Zip {
        /// 入力ファイル
        #[arg(required = true)]
        files: Vec<PathBuf>,
        #[arg(short, long, default_value = DEFAULT_ARCHIVE_NAME)]
        output: PathBuf,
        #[command(flatten)]
        rule: RuleArgs,
    },
    /// GUIを起動
    Gui,
}

#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// 対象フォルダ（既定: RENAMER_DIR）
    #[arg(short, long)]
    pub dir: Option<PathBuf>,
    /// ファイルパターン（既定: *.pdf）
    #[arg(short, long)]
    pub pattern: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct RuleArgs {
    /// 数字抽出ルールを使う（最初の `_` より前の数字）
    #[arg(long)]
    pub digits: bool,
    /// 数字の最大桁数（0 = すべて）
    #[arg(long, requires = "digits")]
    pub max_digits: Option<usize>,
    /// 区切り文字
    #[arg(short, long, conflicts_with = "digits")]
    pub separator: Option<String>,
    /// 使う側: before / after
    #[arg(long, conflicts_with = "digits")]
    pub side: Option<Side>,
    /// 点 (.) を残す
    #[arg(long, conflicts_with = "digits")]
    pub keep_dots: Option<bool>,
    /// 先頭N文字のみ残す（0 = すべて）
    #[arg(long, conflicts_with = "digits")]
    pub max_length: Option<usize>,
}

impl RuleArgs {
    /// コマンドライン指定を設定値に重ねてルールを作る
    pub fn to_rule(&self, settings: &Settings) -> Rule {
        if self.digits {
            return Rule::Digits {
                max_digits: self.max_digits.filter(|&n| n > 0),
            };
        }

        let max_length = self.max_length.unwrap_or(settings.max_length);
        Rule::Separator {
            separator: self.separator.clone().unwrap_or_else(|| settings.separator.clone()),
            side: self.side.unwrap_or(settings.side),
            keep_dots: self.keep_dots.unwrap_or(settings.keep_dots),
            max_length: (max_length > 0).then_some(max_length),
        }
    }
}

impl TargetArgs {
    fn resolve(&self, settings: &Settings) -> Result<(PathBuf, String)> {
        let dir = self
            .dir
            .clone()
            .or_else(|| settings.directory.clone())
            .context("フォルダを指定してください (--dir または RENAMER_DIR)")?;
        let pattern = self.pattern.clone().unwrap_or_else(|| settings.pattern.clone());
        Ok((dir, pattern))
    }
}

/// `--dry-run` 指定があれば設定より優先
fn commit_options(dry_run: Option<bool>, yes: bool, settings: &Settings) -> CommitOptions {
    CommitOptions {
        dry_run: dry_run.unwrap_or(settings.dry_run),
        confirmed: yes,
    }
}

/// サブコマンドを実行
pub fn run(command: Command, settings: &Settings) -> Result<()> {
    match command {
        Command::Preview { target, rule, json } => {
            let (dir, pattern) = target.resolve(settings)?;
            let plan = scan_directory(&dir, &pattern)?.plan(&rule.to_rule(settings));
            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                print_plan(&plan);
            }
        }
        Command::Rename { target, rule, dry_run, yes, json } => {
            let (dir, pattern) = target.resolve(settings)?;
            let plan = scan_directory(&dir, &pattern)?.plan(&rule.to_rule(settings));
            let options = commit_options(dry_run, yes, settings);
            let report = commit(&dir, &plan, options)
                .context("リネームを実行できません（バックアップ確認は --yes）")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }
        Command::Zip { files, output, rule } => {
            let packaged = package_files(&files, &rule.to_rule(settings))?;
            std::fs::write(&output, &packaged.bytes)
                .with_context(|| format!("ZIPの保存に失敗: {:?}", output))?;
            print_summary(&packaged.summary());
            for (old, err) in packaged.errors_sample() {
                eprintln!("エラー: {} ({})", old, err);
            }
            println!("保存先: {}", output.display());
        }
        Command::Gui => crate::gui::run(settings.clone())?,
    }
    Ok(())
}

fn print_plan(plan: &RenamePlan) {
    for row in &plan.rows {
        match &row.resolved {
            Some(new) => println!("{}  →  {}", row.original, new),
            None => println!("{}  →  (スキップ)", row.original),
        }
    }
    let summary = plan.summary();
    println!("ファイル数: {} — スキップ: {}", plan.len(), summary.skipped);
}

fn print_report(report: &RenameReport) {
    print_summary(&report.summary());
    if report.dry_run {
        println!("(ドライラン: ディスクは変更されていません)");
    }
    for (old, new) in report.renamed_sample() {
        println!("  {}  →  {}", old, new);
    }
    if !report.skipped.is_empty() {
        println!("スキップ（候補名なし）:");
        for old in report.skipped_sample() {
            println!("  {}", old);
        }
    }
    if !report.errors.is_empty() {
        eprintln!("リネームエラー:");
        for (old, err) in report.errors_sample() {
            eprintln!("  {}: {}", old, err);
        }
    }
}

fn print_summary(summary: &Summary) {
    println!(
        "完了: {} 件処理, {} 件スキップ, {} 件エラー",
        summary.processed, summary.skipped, summary.errored
    );
}
