//! 数字抽出ルール

use super::{split_extension, truncate_chars};

/// このルールの出力拡張子。元の拡張子に関係なく固定
pub const OUTPUT_EXTENSION: &str = ".pdf";

/// 最初の `_` より前の部分から数字だけを取り出す
pub fn derive(filename: &str, max_digits: Option<usize>) -> Option<String> {
    let (base, _ext) = split_extension(filename);
    let head = base.split_once('_').map_or(base, |(head, _)| head);

    let digits: String = head.chars().filter(|c| c.is_ascii_digit()).collect();
    let digits = truncate_chars(&digits, max_digits);

    if digits.is_empty() {
        return None;
    }

    Some(format!("{}{}", digits, OUTPUT_EXTENSION))
}
