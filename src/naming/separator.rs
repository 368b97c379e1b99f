//! 区切り文字による分割ルール

use super::{split_extension, truncate_chars, Side};

/// 区切り文字で語幹を分割し、選んだ側を新しい名前にする
///
/// 分割は最初の区切り文字でのみ行う。区切り文字が無い場合は語幹全体が
/// 唯一の部分になり、`After` には対応する部分が無いので `None`。
pub fn derive(
    filename: &str,
    separator: &str,
    side: Side,
    keep_dots: bool,
    max_length: Option<usize>,
) -> Option<String> {
    let (base, ext) = split_extension(filename);

    let part = if separator.is_empty() {
        base
    } else {
        match (base.split_once(separator), side) {
            (Some((left, _)), Side::Before) => left,
            (Some((_, right)), Side::After) => right,
            (None, Side::Before) => base,
            (None, Side::After) => return None,
        }
    };

    let part = part.trim();
    let part = if keep_dots {
        part.to_string()
    } else {
        part.replace('.', "")
    };
    let part = truncate_chars(&part, max_length);

    if part.is_empty() {
        return None;
    }

    Some(format!("{}{}", part, ext))
}
