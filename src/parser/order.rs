//! 注文情報抽出モジュール

use super::ExtractError;
use crate::pdf::Fragments;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// ページ表示 "1 von N"（右上の注文番号ブロックの目印）
static FIRST_PAGE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^1 von [0-9]").expect("valid regex"));

/// 売買区分
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderType {
    Kauf,
    Verkauf,
}

impl OrderType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Kauf => "Kauf",
            Self::Verkauf => "Verkauf",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// "Kauf" / "Verkauf" の出現から売買区分を決める
pub fn find_order_type(fragments: &Fragments) -> Result<OrderType, ExtractError> {
    let kauf = fragments.contains(OrderType::Kauf.as_str());
    let verkauf = fragments.contains(OrderType::Verkauf.as_str());

    match (kauf, verkauf) {
        (true, true) => Err(ExtractError::AmbiguousOrderType),
        (true, false) => Ok(OrderType::Kauf),
        (false, true) => Ok(OrderType::Verkauf),
        (false, false) => Err(ExtractError::NoOrderType),
    }
}

/// 注文番号と執行番号を抽出
///
/// "1 von N" の2つ後が注文番号、3つ後が執行番号（1つ後は作成日）。
pub fn find_order_and_execution(fragments: &Fragments) -> Result<(String, String), ExtractError> {
    const EXTRACTOR: &str = "find_order_and_execution";

    let marker = fragments
        .iter()
        .find(|f| FIRST_PAGE_MARKER.is_match(&f.text))
        .ok_or(ExtractError::PatternNotFound(EXTRACTOR))?;

    match (fragments.relative(marker.index, 2), fragments.relative(marker.index, 3)) {
        (Some(order_nr), Some(execution)) => Ok((
            order_nr.text.trim().to_string(),
            execution.text.trim().to_string(),
        )),
        _ => Err(ExtractError::InsufficientTrailingFragments {
            extractor: EXTRACTOR,
            index: marker.index,
            needed: 3,
        }),
    }
}
