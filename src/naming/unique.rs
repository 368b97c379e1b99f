//! 重複回避 - 同名がある場合は `_1`, `_2` ... を付与

use super::split_extension;
use crate::error::RenameError;
use std::collections::HashSet;
use std::path::Path;

/// `{語幹}_{n}{拡張子}` 形式の連番名
pub fn variant(name: &str, n: u64) -> String {
    let (stem, ext) = split_extension(name);
    format!("{}_{}{}", stem, n, ext)
}

/// バッチ内で名前を一意にする
///
/// 入力順に処理し、最初に現れた名前がそのままの形を得る。
/// `None` はそのまま `None` を返し、使用済み集合には影響しない。
/// 使用済みの連番は高々 `n` 個なので、探索は必ず終わる。
pub fn resolve_unique(candidates: &[Option<String>]) -> Vec<Option<String>> {
    let mut taken: HashSet<String> = HashSet::with_capacity(candidates.len());

    candidates
        .iter()
        .map(|candidate| {
            let name = candidate.as_ref()?;
            let mut chosen = name.clone();
            let mut counter = 1u64;
            while taken.contains(&chosen) {
                chosen = variant(name, counter);
                counter += 1;
            }
            taken.insert(chosen.clone());
            Some(chosen)
        })
        .collect()
}

/// ディスク上の既存ファイルとも衝突しない名前を取得
///
/// `resolved` 自体はディスクのみと比較する（`taken` にはバッチ内で決めた
/// 名前が入っており、自分自身も含まれるため）。連番候補は `taken` と
/// ディスクの両方で空いている必要がある。
pub fn unique_on_disk(
    directory: &Path,
    resolved: &str,
    taken: &HashSet<String>,
) -> Result<String, RenameError> {
    if !directory.join(resolved).exists() {
        return Ok(resolved.to_string());
    }

    let mut counter = 1u64;
    loop {
        let candidate = variant(resolved, counter);
        if !taken.contains(&candidate) && !directory.join(&candidate).exists() {
            return Ok(candidate);
        }
        counter = counter
            .checked_add(1)
            .ok_or_else(|| RenameError::CollisionExhausted(resolved.to_string()))?;
    }
}
