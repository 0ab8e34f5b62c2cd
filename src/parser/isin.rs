//! ISIN抽出モジュール

use super::ExtractError;
use crate::pdf::Fragments;
use regex::Regex;
use std::sync::LazyLock;

/// 英数字の連続（ISINはこの連続全体と一致する必要がある）
static ALNUM_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9]+").expect("valid regex"));

/// ISINの形: 国コード2文字 + 9文字 + チェックディジット
static ISIN_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2}[0-9A-Z]{9}[0-9]$").expect("valid regex"));

/// ISINのチェックディジットを検証
pub fn check_isin(isin: &str) -> bool {
    let chars: Vec<char> = isin.chars().collect();
    if chars.len() != 12 {
        return false;
    }

    let Some(check_digit) = chars[11].to_digit(10) else {
        return false;
    };

    // 文字を数字列に変換（A=10 … Z=35 は2桁になる）
    let mut digits = Vec::with_capacity(22);
    for c in &chars[..11] {
        match c {
            '0'..='9' => digits.push(*c as u32 - '0' as u32),
            'A'..='Z' => {
                let value = *c as u32 - 'A' as u32 + 10;
                digits.push(value / 10);
                digits.push(value % 10);
            }
            _ => return false,
        }
    }

    // 右端から1つおきに2倍（Luhn）
    let digit_sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 0 {
                let doubled = d * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                d
            }
        })
        .sum();

    (check_digit + digit_sum) % 10 == 0
}

/// 文書内の有効なISINを1つだけ探す
///
/// 同じISINが何度出てきても1件と数える。異なるISINが2つ以上あればエラー。
pub fn find_isin_match(fragments: &Fragments) -> Result<String, ExtractError> {
    let mut matches: Vec<&str> = Vec::new();

    for fragment in fragments {
        for run in ALNUM_RUN.find_iter(&fragment.text) {
            let candidate = run.as_str();
            if ISIN_SHAPE.is_match(candidate) && check_isin(candidate) && !matches.contains(&candidate) {
                matches.push(candidate);
            }
        }
    }

    match matches.as_slice() {
        [] => Err(ExtractError::NoMatch("ISIN".to_string())),
        [isin] => Ok(isin.to_string()),
        _ => Err(ExtractError::AmbiguousMatch {
            needle: "ISIN".to_string(),
            count: matches.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_real_isins() {
        for isin in ["US0378331005", "DE0005140008", "IE00B4L5Y983", "AU0000XVGZA3", "US5949181045", "DE0007164600"] {
            assert!(check_isin(isin), "{isin}");
        }
    }

    #[test]
    fn rejects_wrong_check_digit() {
        for wrong in ["US0378331000", "US0378331001", "US0378331009"] {
            assert!(!check_isin(wrong), "{wrong}");
        }
    }

    #[test]
    fn rejects_wrong_length_and_charset() {
        assert!(!check_isin("US037833100"));
        assert!(!check_isin("US03783310055"));
        assert!(!check_isin("us0378331005"));
        assert!(!check_isin("US037833100X"));
        assert!(!check_isin(""));
    }

    #[test]
    fn finds_isin_next_to_punctuation_and_fragment_edges() {
        let fragments = Fragments::from_lines(["US0378331005", "ISIN:US0378331005,", "(US0378331005)"]);
        assert_eq!(find_isin_match(&fragments).unwrap(), "US0378331005");
    }

    #[test]
    fn ignores_runs_extended_by_letters_or_digits() {
        let fragments = Fragments::from_lines(["XUS0378331005", "US03783310051", "aUS0378331005"]);
        assert_eq!(
            find_isin_match(&fragments).unwrap_err(),
            ExtractError::NoMatch("ISIN".to_string())
        );
    }

    #[test]
    fn ignores_shaped_strings_with_bad_check_digit() {
        let fragments = Fragments::from_lines(["US0378331000", "DE0005140008"]);
        assert_eq!(find_isin_match(&fragments).unwrap(), "DE0005140008");
    }

    #[test]
    fn two_distinct_isins_are_ambiguous() {
        let fragments = Fragments::from_lines(["US0378331005 DE0005140008"]);
        assert_eq!(
            find_isin_match(&fragments).unwrap_err(),
            ExtractError::AmbiguousMatch {
                needle: "ISIN".to_string(),
                count: 2
            }
        );
    }
}
