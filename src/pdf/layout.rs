//! コンテンツストリームから行単位のテキスト断片を組み立てる

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId};
use std::collections::BTreeMap;

/// 同じ行とみなすベースラインのずれ
const Y_TOLERANCE: f32 = 0.5;

/// TJ 配列でこれより大きく詰める値は単語間の空白とみなす
const TJ_SPACE_THRESHOLD: f32 = -100.0;

/// 1ページ分のテキスト行をレイアウト順に返す
///
/// BT…ET ブロックの終わりと、ベースラインが変わる位置指定（Td/TD/Tm/T*/'/"）で行を区切る。
/// 同じベースライン上での横移動は同じ行として連結する。
pub fn page_lines(doc: &Document, page_id: ObjectId) -> lopdf::Result<Vec<String>> {
    let encodings: BTreeMap<Vec<u8>, &str> = doc
        .get_page_fonts(page_id)
        .into_iter()
        .map(|(name, font)| (name, font.get_font_encoding()))
        .collect();

    let content = Content::decode(&doc.get_page_content(page_id)?)?;

    let mut lines = LineCollector::default();
    let mut encoding: Option<&str> = None;

    for operation in &content.operations {
        match operation.operator.as_str() {
            "BT" => lines.begin_text(),
            "ET" => lines.flush(),
            "Tf" => {
                encoding = operation
                    .operands
                    .first()
                    .and_then(|font| font.as_name().ok())
                    .and_then(|font| encodings.get(font).copied());
            }
            "TL" => lines.leading = number(operation, 0),
            "Td" => lines.move_line(number(operation, 1)),
            "TD" => {
                let ty = number(operation, 1);
                lines.leading = -ty;
                lines.move_line(ty);
            }
            "Tm" => lines.set_line(number(operation, 5)),
            "T*" => lines.next_line(),
            "Tj" | "TJ" => lines.show(encoding, &operation.operands),
            "'" | "\"" => {
                lines.next_line();
                // " は語間・字間の2オペランドの後に文字列が来る
                if let Some(text) = operation.operands.last() {
                    lines.show(encoding, std::slice::from_ref(text));
                }
            }
            _ => {}
        }
    }
    lines.flush();

    Ok(lines.finish())
}

fn number(operation: &Operation, index: usize) -> f32 {
    operation
        .operands
        .get(index)
        .and_then(|operand| operand.as_float().ok())
        .unwrap_or(0.0)
}

/// 現在行のテキストとベースラインを追跡する
#[derive(Debug, Default)]
struct LineCollector {
    lines: Vec<String>,
    current: String,
    line_y: f32,
    leading: f32,
}

impl LineCollector {
    fn begin_text(&mut self) {
        self.flush();
        self.line_y = 0.0;
    }

    fn move_line(&mut self, ty: f32) {
        self.set_line(self.line_y + ty);
    }

    fn set_line(&mut self, y: f32) {
        if (y - self.line_y).abs() > Y_TOLERANCE {
            self.flush();
        }
        self.line_y = y;
    }

    fn next_line(&mut self) {
        self.flush();
        self.line_y -= self.leading;
    }

    fn show(&mut self, encoding: Option<&str>, operands: &[Object]) {
        for operand in operands {
            match operand {
                Object::String(bytes, _) => {
                    self.current.push_str(&Document::decode_text(encoding, bytes));
                }
                Object::Array(items) => self.show(encoding, items),
                Object::Integer(_) | Object::Real(_) => {
                    if operand.as_float().is_ok_and(|adjust| adjust < TJ_SPACE_THRESHOLD) {
                        self.current.push(' ');
                    }
                }
                _ => {}
            }
        }
    }

    fn flush(&mut self) {
        let line = self.current.trim_end();
        if !line.trim().is_empty() {
            self.lines.push(line.to_string());
        }
        self.current.clear();
    }

    fn finish(self) -> Vec<String> {
        self.lines
    }
}
