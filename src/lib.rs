//! TR明細リネーマー - Trade Republic のPDF明細を内容に基づいてリネームするツール
//!
//! # 機能
//! - lopdf でPDFからテキスト断片を抽出
//! - マーカー文字列による文書種別（利息・証券取引・配当・暗号資産取引・税最適化）の判定
//! - 日付・ISIN・注文番号などを抽出して規定のファイル名にリネーム
//! - ドライラン対応、既存ファイルは上書きしない

pub mod cli;
pub mod parser;
pub mod pdf;
pub mod renamer;

pub use parser::{Classification, DocumentType};
pub use renamer::{FileOutcome, RenamePlan, RunConfig};
