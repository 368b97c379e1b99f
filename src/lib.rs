//! PDF一括リネーム - 区切り文字による分割または数字抽出でファイル名を作成
//!
//! # 機能
//! - 区切り文字の前/後を使う名前導出（点の除去、先頭N文字）
//! - 最初の `_` より前の数字を使う名前導出
//! - バッチ内の重複回避（`_1`, `_2` ...）とディスク上の衝突確認
//! - ローカルフォルダのリネーム（ドライラン対応）とアップロードファイルのZIP化
//! - コマンドラインとドラッグ＆ドロップ対応GUI

pub mod archive;
pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod gui;
pub mod local;
pub mod naming;

pub use batch::{RenamePlan, Summary};
pub use error::RenameError;
pub use naming::{derive, resolve_unique, Rule, Side};
