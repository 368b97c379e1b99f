//! リネーム計画 - 名前導出と重複回避をバッチ全体に適用

use crate::naming::{resolve_unique, Rule};
use serde::Serialize;

/// プレビューの1行
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanRow {
    /// 元のファイル名
    pub original: String,
    /// 導出された候補名
    pub proposed: Option<String>,
    /// 重複回避後の名前
    pub resolved: Option<String>,
}

/// バッチ全体のリネーム計画（入力順を保持）
#[derive(Debug, Clone, Default, Serialize)]
pub struct RenamePlan {
    pub rows: Vec<PlanRow>,
}

/// 件数のまとめ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub processed: usize,
    pub skipped: usize,
    pub errored: usize,
}

impl RenamePlan {
    /// ファイル名一覧から計画を作成
    pub fn build<S: AsRef<str>>(names: &[S], rule: &Rule) -> Self {
        let proposed: Vec<Option<String>> = names.iter().map(|n| rule.derive(n.as_ref())).collect();
        let resolved = resolve_unique(&proposed);

        let rows: Vec<PlanRow> = names
            .iter()
            .zip(proposed)
            .zip(resolved)
            .map(|((original, proposed), resolved)| PlanRow {
                original: original.as_ref().to_string(),
                proposed,
                resolved,
            })
            .collect();

        tracing::debug!(total = rows.len(), "リネーム計画を作成");
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 候補名が無くスキップされるファイル
    pub fn skipped(&self) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .filter(|r| r.resolved.is_none())
            .map(|r| r.original.as_str())
    }

    /// プレビュー時点の件数（エラーはまだ発生しない）
    pub fn summary(&self) -> Summary {
        let skipped = self.skipped().count();
        Summary {
            processed: self.rows.len() - skipped,
            skipped,
            errored: 0,
        }
    }
}
