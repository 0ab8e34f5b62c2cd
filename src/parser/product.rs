//! 銘柄名抽出モジュール

use super::ExtractError;
use crate::pdf::Fragments;

const POSITION_HEADER: &str = "POSITION";

/// 最初の "POSITION" 見出しの次の断片から銘柄名を取る
///
/// "POSITION" は文書内に複数回出ることがあるので、最初のものだけを見る。
pub fn find_product_name(fragments: &Fragments) -> Result<String, ExtractError> {
    const EXTRACTOR: &str = "find_product_name";

    let header = fragments
        .iter()
        .find(|f| f.text.starts_with(POSITION_HEADER))
        .ok_or(ExtractError::PatternNotFound(EXTRACTOR))?;

    let name = fragments
        .relative(header.index, 1)
        .ok_or(ExtractError::InsufficientTrailingFragments {
            extractor: EXTRACTOR,
            index: header.index,
            needed: 1,
        })?;

    Ok(name.text.trim().replace(' ', "_"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takes_fragment_after_first_header() {
        let fragments = Fragments::from_lines(["POSITION", " Bitcoin Cash ", "POSITION", "Ethereum"]);
        assert_eq!(find_product_name(&fragments).unwrap(), "Bitcoin_Cash");
    }

    #[test]
    fn header_must_be_prefix() {
        let fragments = Fragments::from_lines(["ANZAHL POSITION", "Bitcoin"]);
        assert_eq!(
            find_product_name(&fragments).unwrap_err(),
            ExtractError::PatternNotFound("find_product_name")
        );
    }

    #[test]
    fn header_as_last_fragment() {
        let fragments = Fragments::from_lines(["Bitcoin", "POSITION"]);
        assert!(matches!(
            find_product_name(&fragments),
            Err(ExtractError::InsufficientTrailingFragments { index: 1, .. })
        ));
    }
}
