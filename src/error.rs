//! エラー定義

use std::path::PathBuf;
use thiserror::Error;

/// リネーム処理のエラー
///
/// 候補名が無いこと（スキップ）はエラーではなく `None` で表す。
#[derive(Debug, Error)]
pub enum RenameError {
    #[error("フォルダが見つかりません: {0:?}")]
    NotADirectory(PathBuf),

    #[error("バックアップの確認がないためリネームを実行しません")]
    NotConfirmed,

    #[error("空いている連番名が見つかりません: {0}")]
    CollisionExhausted(String),

    #[error("不正なパターン '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("ZIP作成エラー: {0}")]
    Zip(#[from] zip::result::ZipError),
}

impl RenameError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        RenameError::Io { context: context.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, RenameError>;
