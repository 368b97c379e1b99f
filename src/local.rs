//! ローカルフォルダ処理 - ファイル列挙とディスク上のリネーム

use crate::batch::{PlanRow, RenamePlan, Summary};
use crate::error::{RenameError, Result};
use crate::naming::{unique_on_disk, Rule};
use regex::{Regex, RegexBuilder};
use serde::Serialize;
use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::Path;

/// 表示用サンプル数
pub const SAMPLE_RENAMED: usize = 50;
pub const SAMPLE_SKIPPED: usize = 100;
pub const SAMPLE_ERRORS: usize = 10;

/// リネーム実行オプション
#[derive(Debug, Clone, Copy, Default)]
pub struct CommitOptions {
    /// ドライラン（ディスクを変更しない）
    pub dry_run: bool,
    /// バックアップ確認済み
    pub confirmed: bool,
}

/// リネーム結果
#[derive(Debug, Clone, Default, Serialize)]
pub struct RenameReport {
    pub dry_run: bool,
    /// (旧名, 新名)
    pub renamed: Vec<(String, String)>,
    /// 既に目的の名前だったファイル
    pub unchanged: Vec<String>,
    /// 候補名が無かったファイル
    pub skipped: Vec<String>,
    /// (旧名, エラー内容)
    pub errors: Vec<(String, String)>,
}

impl RenameReport {
    pub fn summary(&self) -> Summary {
        Summary {
            processed: self.renamed.len() + self.unchanged.len(),
            skipped: self.skipped.len(),
            errored: self.errors.len(),
        }
    }

    pub fn renamed_sample(&self) -> &[(String, String)] {
        &self.renamed[..self.renamed.len().min(SAMPLE_RENAMED)]
    }

    pub fn skipped_sample(&self) -> &[String] {
        &self.skipped[..self.skipped.len().min(SAMPLE_SKIPPED)]
    }

    pub fn errors_sample(&self) -> &[(String, String)] {
        &self.errors[..self.errors.len().min(SAMPLE_ERRORS)]
    }
}

/// `*` と `?` のグロブを大文字小文字を区別しない正規表現に変換
fn glob_to_regex(pattern: &str) -> Result<Regex> {
    let mut re = String::from("^");
    for c in pattern.chars() {
        match c {
            '*' => re.push_str(".*"),
            '?' => re.push('.'),
            other => re.push_str(&regex::escape(&other.to_string())),
        }
    }
    re.push('$');

    RegexBuilder::new(&re)
        .case_insensitive(true)
        .build()
        .map_err(|source| RenameError::Pattern { pattern: pattern.to_string(), source })
}

/// フォルダの列挙結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryScan {
    /// 対象ファイル（名前順）
    pub names: Vec<String>,
    /// UTF-8 でない名前（表示用に変換済み、リネーム対象外）
    pub non_utf8: Vec<String>,
}

impl DirectoryScan {
    /// リネーム計画を作成。UTF-8 でない名前はスキップ行として末尾に付ける
    pub fn plan(&self, rule: &Rule) -> RenamePlan {
        let mut plan = RenamePlan::build(&self.names, rule);
        plan.rows.extend(self.non_utf8.iter().map(|name| PlanRow {
            original: name.clone(),
            proposed: None,
            resolved: None,
        }));
        plan
    }
}

/// フォルダ直下のファイルをパターンで列挙（名前順）
pub fn scan_directory(directory: &Path, pattern: &str) -> Result<DirectoryScan> {
    if !directory.is_dir() {
        return Err(RenameError::NotADirectory(directory.to_path_buf()));
    }

    let matcher = glob_to_regex(pattern)?;
    let entries = std::fs::read_dir(directory)
        .map_err(|e| RenameError::io(format!("フォルダの読み込みに失敗: {:?}", directory), e))?;

    let mut scan = DirectoryScan::default();
    for entry in entries {
        let entry = entry.map_err(|e| RenameError::io("フォルダ項目の読み込みに失敗", e))?;
        if !entry.file_type().is_ok_and(|t| t.is_file()) {
            continue;
        }
        let file_name = entry.file_name();
        match file_name.to_str() {
            Some(name) if matcher.is_match(name) => scan.names.push(name.to_string()),
            Some(_) => {}
            None => {
                let lossy = file_name.to_string_lossy().into_owned();
                if matcher.is_match(&lossy) {
                    tracing::warn!(name = %lossy, "UTF-8でないファイル名はスキップ");
                    scan.non_utf8.push(lossy);
                }
            }
        }
    }

    scan.names.sort();
    scan.non_utf8.sort();
    tracing::info!(
        dir = ?directory,
        pattern,
        found = scan.names.len(),
        non_utf8 = scan.non_utf8.len(),
        "ファイルを列挙"
    );
    Ok(scan)
}

/// 既存ファイルを上書きしないリネーム
///
/// `to` が既にあれば `AlreadyExists` で失敗する。ハードリンクを作ってから
/// 元の名前を削除する。ハードリンクが使えないファイルシステムでは
/// 存在確認のうえ通常のリネームを行う（確認とリネームの間は保護されない）。
pub fn rename_no_replace(from: &Path, to: &Path) -> std::io::Result<()> {
    match std::fs::hard_link(from, to) {
        Ok(()) => {
            if let Err(e) = std::fs::remove_file(from) {
                // 元に戻す
                let _ = std::fs::remove_file(to);
                return Err(e);
            }
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Err(e),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(e),
        Err(e) => {
            tracing::debug!(error = %e, "ハードリンク不可、通常のリネームを使用");
            if to.exists() {
                return Err(ErrorKind::AlreadyExists.into());
            }
            std::fs::rename(from, to)
        }
    }
}

/// 計画に従ってフォルダ内のファイルをリネーム
///
/// バッチ内の重複回避は計画作成時に済んでいる。ここではディスク上の
/// 既存ファイルとの衝突をもう一度確認する。1件の失敗は記録して続行する。
pub fn commit(directory: &Path, plan: &RenamePlan, options: CommitOptions) -> Result<RenameReport> {
    if !options.dry_run && !options.confirmed {
        return Err(RenameError::NotConfirmed);
    }
    if !directory.is_dir() {
        return Err(RenameError::NotADirectory(directory.to_path_buf()));
    }

    let mut taken: HashSet<String> = plan.rows.iter().filter_map(|r| r.resolved.clone()).collect();
    let mut report = RenameReport { dry_run: options.dry_run, ..Default::default() };

    for row in &plan.rows {
        let Some(resolved) = row.resolved.as_deref() else {
            tracing::debug!(file = %row.original, "候補名なし、スキップ");
            report.skipped.push(row.original.clone());
            continue;
        };

        if resolved == row.original {
            report.unchanged.push(row.original.clone());
            continue;
        }

        let target = match unique_on_disk(directory, resolved, &taken) {
            Ok(name) => name,
            Err(e) => {
                tracing::warn!(file = %row.original, error = %e, "リネーム先を決定できません");
                report.errors.push((row.original.clone(), e.to_string()));
                continue;
            }
        };
        taken.insert(target.clone());

        if options.dry_run {
            report.renamed.push((row.original.clone(), target));
            continue;
        }

        match rename_no_replace(&directory.join(&row.original), &directory.join(&target)) {
            Ok(()) => {
                tracing::info!(from = %row.original, to = %target, "リネーム完了");
                report.renamed.push((row.original.clone(), target));
            }
            Err(e) => {
                tracing::warn!(file = %row.original, error = %e, "リネームエラー");
                report.errors.push((row.original.clone(), e.to_string()));
            }
        }
    }

    let summary = report.summary();
    tracing::info!(
        dry_run = options.dry_run,
        processed = summary.processed,
        skipped = summary.skipped,
        errored = summary.errored,
        "リネーム処理完了"
    );
    Ok(report)
}
