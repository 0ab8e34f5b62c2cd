//! 文字列検索

use super::ExtractError;
use crate::pdf::Fragments;

/// `needle` を含む唯一の断片のテキストを返す
///
/// 一致なし・複数一致はどちらもエラー。
pub fn find_string<'a>(fragments: &'a Fragments, needle: &str) -> Result<&'a str, ExtractError> {
    let mut matches = fragments.containing(needle);

    let Some(first) = matches.next() else {
        return Err(ExtractError::NoMatch(needle.to_string()));
    };

    let rest = matches.count();
    if rest > 0 {
        return Err(ExtractError::AmbiguousMatch {
            needle: needle.to_string(),
            count: rest + 1,
        });
    }

    Ok(&first.text)
}

/// "ISIN: XX0000000000" からISIN部分（2番目のトークン）を取り出す
pub fn isin_token(text: &str) -> Result<String, ExtractError> {
    text.split_whitespace()
        .nth(1)
        .map(str::to_string)
        .ok_or_else(|| ExtractError::MissingToken(text.to_string()))
}
