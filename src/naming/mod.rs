//! 名前導出モジュール - 元のファイル名から新しいファイル名を作る

mod digits;
mod separator;
mod unique;

use serde::{Deserialize, Serialize};

pub use unique::{resolve_unique, unique_on_disk, variant};

/// 区切り文字のどちら側を使うか
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// 区切り文字より前
    #[default]
    Before,
    /// 区切り文字より後
    After,
}

impl std::str::FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "before" | "før" => Ok(Side::Before),
            "after" | "etter" => Ok(Side::After),
            other => Err(format!("不明な側: {}", other)),
        }
    }
}

/// 名前導出ルール
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Rule {
    /// 区切り文字で分割して片側を使う
    Separator {
        separator: String,
        side: Side,
        keep_dots: bool,
        /// 先頭N文字のみ残す（None または 0 = すべて）
        max_length: Option<usize>,
    },
    /// 最初の `_` より前の数字だけを使う（出力拡張子は常に `.pdf`）
    Digits {
        max_digits: Option<usize>,
    },
}

impl Default for Rule {
    fn default() -> Self {
        Rule::Separator {
            separator: "_".to_string(),
            side: Side::Before,
            keep_dots: true,
            max_length: None,
        }
    }
}

impl Rule {
    /// ファイル名から候補名を導出する。使える部分がなければ `None`
    pub fn derive(&self, filename: &str) -> Option<String> {
        match self {
            Rule::Separator { separator: sep, side, keep_dots, max_length } => {
                separator::derive(filename, sep, *side, *keep_dots, *max_length)
            }
            Rule::Digits { max_digits } => digits::derive(filename, *max_digits),
        }
    }
}

/// 候補名を導出する（`Rule::derive` の関数版）
pub fn derive(filename: &str, rule: &Rule) -> Option<String> {
    rule.derive(filename)
}

/// ファイル名を語幹と拡張子に分ける
///
/// 拡張子は最後の `.` 以降。先頭や末尾の `.` は拡張子とみなさない
/// (`.bashrc` や `name.` は拡張子なし)。
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < name.len() => name.split_at(idx),
        _ => (name, ""),
    }
}

/// 先頭N文字に切り詰める（0 または None は切り詰めなし）
fn truncate_chars(text: &str, limit: Option<usize>) -> String {
    match limit {
        Some(n) if n > 0 => text.chars().take(n).collect(),
        _ => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_extension_uses_last_dot() {
        assert_eq!(split_extension("44.14.1_20251112.pdf"), ("44.14.1_20251112", ".pdf"));
        assert_eq!(split_extension("archive.tar.gz"), ("archive.tar", ".gz"));
        assert_eq!(split_extension("README"), ("README", ""));
        assert_eq!(split_extension(".bashrc"), (".bashrc", ""));
        assert_eq!(split_extension("name."), ("name.", ""));
        assert_eq!(split_extension(""), ("", ""));
    }

    #[test]
    fn side_parses_english_and_norwegian() {
        assert_eq!("before".parse::<Side>(), Ok(Side::Before));
        assert_eq!("Etter".parse::<Side>(), Ok(Side::After));
        assert!("middle".parse::<Side>().is_err());
    }

    #[test]
    fn derive_is_deterministic() {
        let rule = Rule::default();
        let first = derive("A.B_c.pdf", &rule);
        assert_eq!(first, derive("A.B_c.pdf", &rule));
        assert_eq!(first.as_deref(), Some("A.B.pdf"));
    }

    #[test]
    fn truncation_counts_characters() {
        assert_eq!(truncate_chars("æøåabc", Some(2)), "æø");
        assert_eq!(truncate_chars("abc", Some(0)), "abc");
        assert_eq!(truncate_chars("abc", None), "abc");
    }

    #[test]
    fn rule_serializes_with_kind_tag() {
        let rule = Rule::Digits { max_digits: Some(4) };
        let json = serde_json::to_string(&rule).unwrap();
        assert_eq!(json, r#"{"kind":"digits","max_digits":4}"#);
    }
}
