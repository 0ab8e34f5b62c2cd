//! 日付抽出モジュール

use super::ExtractError;
use std::fmt;

/// dd.mm.yyyy 形式から読み取った日付（値の範囲チェックはしない）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedDate {
    pub year: String,
    pub month: String,
    pub day: String,
}

impl ExtractedDate {
    /// ファイル名用の yyyymmdd 形式
    pub fn compact(&self) -> String {
        format!("{}{}{}", self.year, self.month, self.day)
    }
}

impl fmt::Display for ExtractedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.year, self.month, self.day)
    }
}

/// "… dd.mm.yyyy …" を含む文字列から日付を読む
///
/// 最初の "." の直前2文字を日、次のトークンを月、2番目の "." の後の先頭4文字を年とする。
/// 位置だけで読むので、99日のような値もそのまま通る。
pub fn format_date(raw: &str) -> Result<ExtractedDate, ExtractError> {
    let mut parts = raw.split('.');
    let (Some(day_part), Some(month), Some(year_part)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(ExtractError::MalformedDate(raw.to_string()));
    };

    let day_chars: Vec<char> = day_part.chars().collect();
    let day: String = day_chars[day_chars.len().saturating_sub(2)..].iter().collect();
    let year: String = year_part.chars().take(4).collect();

    Ok(ExtractedDate {
        year,
        month: month.to_string(),
        day,
    })
}
