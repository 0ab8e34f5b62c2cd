//! 文書種別の判定

use super::DocumentType;
use crate::pdf::Fragments;

/// 発行元の確認用マーカー
pub const BROKER_MARKER: &str = "TRADE REPUBLIC";

/// 種別マーカー（上から順に判定）
const TYPE_MARKERS: &[(&str, DocumentType)] = &[
    ("ABRECHNUNG ZINSEN", DocumentType::InterestStatement),
    ("WERTPAPIERABRECHNUNG", DocumentType::SecuritySettlement),
    ("DIVIDENDE", DocumentType::Dividend),
    ("ABRECHNUNG CRYPTOGESCHÄFT", DocumentType::CryptoSettlement),
    ("STEUERLICHE OPTIMIERUNG", DocumentType::TaxOptimization),
];

/// 判定結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// 発行元マーカーがない
    ForeignIssuer,
    /// 発行元は一致したが種別マーカーがない
    Unrecognized,
    Known(DocumentType),
}

/// 断片列から文書種別を判定
pub fn classify(fragments: &Fragments) -> Classification {
    if !fragments.contains(BROKER_MARKER) {
        return Classification::ForeignIssuer;
    }

    TYPE_MARKERS
        .iter()
        .find(|(marker, _)| fragments.contains(marker))
        .map_or(Classification::Unrecognized, |&(_, doc_type)| {
            Classification::Known(doc_type)
        })
}
