//! テキスト断片 - PDFから読み取った行単位のテキスト

use std::slice::Iter;

/// レイアウト順に並んだテキスト断片1つ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFragment {
    /// 文書内での位置（0始まり）
    pub index: usize,
    /// 断片の文字列
    pub text: String,
}

/// 1文書分のテキスト断片列（読み取り専用）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragments {
    items: Vec<TextFragment>,
}

impl Fragments {
    /// 文字列の列から断片列を作成
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items = lines
            .into_iter()
            .enumerate()
            .map(|(index, text)| TextFragment {
                index,
                text: text.into(),
            })
            .collect();
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, TextFragment> {
        self.items.iter()
    }

    /// `index` から `offset` 個後ろの断片（範囲外なら None）
    pub fn relative(&self, index: usize, offset: usize) -> Option<&TextFragment> {
        index.checked_add(offset).and_then(|i| self.items.get(i))
    }

    /// `needle` を含む断片をすべて返す
    pub fn containing<'a, 'n>(&'a self, needle: &'n str) -> impl Iterator<Item = &'a TextFragment> {
        self.items.iter().filter(move |f| f.text.contains(needle))
    }

    /// `needle` を含む断片が1つでもあるか
    pub fn contains(&self, needle: &str) -> bool {
        self.containing(needle).next().is_some()
    }
}

impl<'a> IntoIterator for &'a Fragments {
    type Item = &'a TextFragment;
    type IntoIter = Iter<'a, TextFragment>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
