//! 設定 - 既定値と環境変数（.env 対応）

use crate::naming::{Rule, Side};
use std::path::PathBuf;
use std::str::FromStr;

/// アプリケーション設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// 対象フォルダ
    pub directory: Option<PathBuf>,
    /// 対象ファイルのパターン
    pub pattern: String,
    pub separator: String,
    pub side: Side,
    pub keep_dots: bool,
    /// 先頭N文字（0 = すべて）
    pub max_length: usize,
    pub dry_run: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            directory: None,
            pattern: "*.pdf".to_string(),
            separator: "_".to_string(),
            side: Side::Before,
            keep_dots: true,
            max_length: 0,
            dry_run: false,
        }
    }
}

impl Settings {
    /// 環境変数から読み込む
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 任意の取得関数から読み込む。不正な値は警告して既定値を使う
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            directory: lookup("RENAMER_DIR")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
            pattern: lookup("RENAMER_PATTERN")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.pattern),
            separator: lookup("RENAMER_SEPARATOR").unwrap_or(defaults.separator),
            side: parse_or(&lookup, "RENAMER_SIDE", defaults.side),
            keep_dots: parse_bool_or(&lookup, "RENAMER_KEEP_DOTS", defaults.keep_dots),
            max_length: parse_or(&lookup, "RENAMER_MAX_LENGTH", defaults.max_length),
            dry_run: parse_bool_or(&lookup, "RENAMER_DRY_RUN", defaults.dry_run),
        }
    }

    /// 区切り文字ルールを作成
    pub fn separator_rule(&self) -> Rule {
        Rule::Separator {
            separator: self.separator.clone(),
            side: self.side,
            keep_dots: self.keep_dots,
            max_length: (self.max_length > 0).then_some(self.max_length),
        }
    }
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "不正な設定値、既定値を使用");
            default
        }),
        None => default,
    }
}

fn parse_bool_or(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: bool) -> bool {
    match lookup(key).map(|s| s.trim().to_ascii_lowercase()) {
        Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => true,
        Some(v) if matches!(v.as_str(), "0" | "false" | "no" | "off") => false,
        Some(v) => {
            tracing::warn!(key, value = %v, "不正な設定値、既定値を使用");
            default
        }
        None => default,
    }
}
