//! PDF処理モジュール - PDFからテキスト断片を抽出

mod fragments;
mod layout;

pub use fragments::{Fragments, TextFragment};

use lopdf::Document;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// PDF読み込みエラー
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to load PDF {path:?}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },

    #[error("PDF {0:?} is encrypted")]
    Encrypted(PathBuf),

    #[error("Failed to extract text from page {page}: {source}")]
    Extract {
        page: u32,
        #[source]
        source: lopdf::Error,
    },
}

/// テキスト断片の供給元
///
/// 値がドロップされた時点でファイルハンドルも解放されていること。
pub trait TextFragmentSource: Sized {
    /// ファイルを読み込んでレイアウトを解析
    fn load(path: &Path) -> Result<Self, PdfError>;

    /// 全テキスト断片（レイアウト順）
    fn fragments(&self) -> &Fragments;
}

/// lopdf で読み込んだPDF文書
#[derive(Debug)]
pub struct PdfDocument {
    fragments: Fragments,
}

impl TextFragmentSource for PdfDocument {
    fn load(path: &Path) -> Result<Self, PdfError> {
        // Document::load はファイル全体を読んでからハンドルを閉じる
        let doc = Document::load(path).map_err(|source| PdfError::Load {
            path: path.to_path_buf(),
            source,
        })?;

        if doc.is_encrypted() {
            return Err(PdfError::Encrypted(path.to_path_buf()));
        }

        let mut lines = Vec::new();
        for (page, page_id) in doc.get_pages() {
            let page_lines =
                layout::page_lines(&doc, page_id).map_err(|source| PdfError::Extract { page, source })?;
            lines.extend(page_lines);
        }

        tracing::debug!("{:?}: {} text fragments", path, lines.len());

        Ok(Self {
            fragments: Fragments::from_lines(lines),
        })
    }

    fn fragments(&self) -> &Fragments {
        &self.fragments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::parser::{Classification, DocumentType, classify};
    use lopdf::content::{Content, Operation};
    use lopdf::{Object, Stream, dictionary};

    /// 1ページのPDFを書き出す
    fn write_pdf(path: &Path, operations: Vec<Operation>) {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.save(path).unwrap();
    }

    fn show(text: &str) -> Operation {
        Operation::new("Tj", vec![Object::string_literal(text)])
    }

    fn next_line() -> Operation {
        Operation::new("Td", vec![0.into(), (-12).into()])
    }

    #[test]
    fn loads_lines_of_one_text_block_as_separate_fragments() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settlement.pdf");
        write_pdf(
            &path,
            vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 10.into()]),
                Operation::new("Td", vec![400.into(), 800.into()]),
                show("TRADE REPUBLIC BANK GMBH"),
                next_line(),
                show("1 von 3"),
                next_line(),
                show("03.01.2022"),
                next_line(),
                show("a1b2-c3d4"),
                next_line(),
                show("e5f6-0001"),
                Operation::new("ET", vec![]),
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![50.into(), 600.into()]),
                show("WERTPAPIERABRECHNUNG"),
                next_line(),
                show("ISIN: US0378331005"),
                next_line(),
                show("Kauf am "),
                Operation::new("Td", vec![40.into(), 0.into()]),
                show("01.01.2022"),
                Operation::new("ET", vec![]),
            ],
        );

        let document = PdfDocument::load(&path).unwrap();
        let texts: Vec<&str> = document.fragments().iter().map(|f| f.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "TRADE REPUBLIC BANK GMBH",
                "1 von 3",
                "03.01.2022",
                "a1b2-c3d4",
                "e5f6-0001",
                "WERTPAPIERABRECHNUNG",
                "ISIN: US0378331005",
                "Kauf am 01.01.2022",
            ]
        );

        assert_eq!(
            classify(document.fragments()),
            Classification::Known(DocumentType::SecuritySettlement)
        );
        assert_eq!(
            DocumentType::SecuritySettlement
                .build_filename(document.fragments())
                .unwrap(),
            "TR_Abrechnung_Kauf_US0378331005_Order_a1b2-c3d4_e5f6-0001_20220101.pdf"
        );
    }

    #[test]
    fn load_rejects_non_pdf_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.pdf");
        std::fs::write(&path, "not a pdf").unwrap();

        let err = PdfDocument::load(&path).unwrap_err();
        assert!(matches!(err, PdfError::Load { .. }));
    }
}
