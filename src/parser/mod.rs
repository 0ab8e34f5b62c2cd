//! テキスト解析モジュール - 明細書の種別判定とファイル名生成

mod classify;
mod date;
mod isin;
mod order;
mod product;
mod text;

pub use classify::{BROKER_MARKER, Classification, classify};
pub use date::{ExtractedDate, format_date};
pub use isin::{check_isin, find_isin_match};
pub use order::{OrderType, find_order_and_execution, find_order_type};
pub use product::find_product_name;
pub use text::{find_string, isin_token};

use crate::pdf::Fragments;
use thiserror::Error;

/// フィールド抽出エラー（その文書はスキップされる）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("No matches found for \"{0}\".")]
    NoMatch(String),

    #[error("Too many matches found for \"{needle}\" ({count} matches).")]
    AmbiguousMatch { needle: String, count: usize },

    #[error("Cannot determine order type (both \"Kauf\" and \"Verkauf\" found)")]
    AmbiguousOrderType,

    #[error("No \"Kauf\" or \"Verkauf\" found")]
    NoOrderType,

    #[error("{0}() couldn't match its search pattern")]
    PatternNotFound(&'static str),

    #[error("{extractor}() matched fragment {index} but fewer than {needed} fragments follow it")]
    InsufficientTrailingFragments {
        extractor: &'static str,
        index: usize,
        needed: usize,
    },

    #[error("No value token after label in \"{0}\"")]
    MissingToken(String),

    #[error("Cannot read a dd.mm.yyyy date from \"{0}\"")]
    MalformedDate(String),
}

/// 判定済みの文書種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentType {
    /// ABRECHNUNG ZINSEN
    InterestStatement,
    /// WERTPAPIERABRECHNUNG
    SecuritySettlement,
    /// DIVIDENDE
    Dividend,
    /// ABRECHNUNG CRYPTOGESCHÄFT
    CryptoSettlement,
    /// STEUERLICHE OPTIMIERUNG
    TaxOptimization,
}

impl DocumentType {
    /// 新しいファイル名を生成
    ///
    /// 必要なフィールドが1つでも取れなければエラーを返す（部分的な名前は作らない）。
    pub fn build_filename(self, fragments: &Fragments) -> Result<String, ExtractError> {
        match self {
            Self::InterestStatement => {
                let date = date_after(fragments, "zum ")?;
                Ok(format!("TR_Zinsen_{}.pdf", date.compact()))
            }
            Self::SecuritySettlement => {
                let order_type = find_order_type(fragments)?;
                let isin = isin_token(find_string(fragments, "ISIN: ")?)?;
                let (order_nr, execution) = find_order_and_execution(fragments)?;
                // "Kauf am" / "Verkauf am"
                let date = date_after(fragments, "auf am ")?;
                Ok(format!(
                    "TR_Abrechnung_{order_type}_{isin}_Order_{order_nr}_{execution}_{}.pdf",
                    date.compact()
                ))
            }
            Self::Dividend => {
                let date = date_after(fragments, "mit Ex-Datum")?;
                let isin = find_isin_match(fragments)?;
                Ok(format!("TR_Dividende_{isin}_{}.pdf", date.compact()))
            }
            Self::CryptoSettlement => {
                let order_type = find_order_type(fragments)?;
                let product = find_product_name(fragments)?;
                let (order_nr, execution) = find_order_and_execution(fragments)?;
                let date = date_after(fragments, "auf am ")?;
                Ok(format!(
                    "TR_Abrechnung_Cryptogeschaeft_{order_type}_{product}_Order_{order_nr}_{execution}_{}.pdf",
                    date.compact()
                ))
            }
            Self::TaxOptimization => {
                let date = date_after(fragments, "Steuerliche Optimierung am ")?;
                Ok(format!("TR_Steuerliche_Optimierung_{}.pdf", date.compact()))
            }
        }
    }
}

/// `needle` を含む唯一の断片から日付を読む
fn date_after(fragments: &Fragments, needle: &str) -> Result<ExtractedDate, ExtractError> {
    format_date(find_string(fragments, needle)?)
}
