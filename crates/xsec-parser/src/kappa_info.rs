//! The `kappa_g_info.dat` header table shipped with each k-table folder.
//!
//! One title line, then whitespace-delimited numeric columns. The first
//! column holds the bin frequencies (Hz) in the file's native order.

use crate::error::{ParseError, ParseResult};

/// Lines skipped before the numeric table starts.
const HEADER_LINES: usize = 1;

/// Parsed header table.
#[derive(Debug, Clone, PartialEq)]
pub struct KappaGInfo {
    /// First column, native order.
    pub frequencies: Vec<f64>,
    /// Number of columns per row.
    pub columns: usize,
}

impl KappaGInfo {
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }
}

/// Parse the header table text.
///
/// Blank lines and `#` comments are ignored. Every row must be fully
/// numeric and have the same number of columns as the first row.
pub fn parse_kappa_g_info(text: &str) -> ParseResult<KappaGInfo> {
    let mut frequencies = Vec::new();
    let mut columns = 0;

    for (idx, line) in text.lines().enumerate().skip(HEADER_LINES) {
        let line_no = idx + 1;
        let content = line.split('#').next().unwrap_or("").trim();
        if content.is_empty() {
            continue;
        }

        let row = content
            .split_whitespace()
            .map(|token| {
                token.parse::<f64>().map_err(|e| ParseError::InvalidHeader {
                    line: line_no,
                    reason: format!("'{}': {}", token, e),
                })
            })
            .collect::<ParseResult<Vec<f64>>>()?;

        if columns == 0 {
            columns = row.len();
        } else if row.len() != columns {
            return Err(ParseError::InvalidHeader {
                line: line_no,
                reason: format!("expected {} columns, found {}", columns, row.len()),
            });
        }

        frequencies.push(row[0]);
    }

    Ok(KappaGInfo {
        frequencies,
        columns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skips_title_line() {
        let text = "freq  width  left  right\n3.0e14 1.0 2.0 3.0\n2.0e14 1.0 2.0 3.0\n";
        let info = parse_kappa_g_info(text).unwrap();
        assert_eq!(info.frequencies, vec![3.0e14, 2.0e14]);
        assert_eq!(info.columns, 4);
    }

    #[test]
    fn test_ignores_blank_and_comment_lines() {
        let text = "title\n\n# comment\n1.0 2.0\n  \n3.0 4.0 # trailing\n";
        let info = parse_kappa_g_info(text).unwrap();
        assert_eq!(info.frequencies, vec![1.0, 3.0]);
    }

    #[test]
    fn test_rejects_non_numeric() {
        let err = parse_kappa_g_info("title\n1.0 abc\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidHeader { line: 2, .. }));
    }

    #[test]
    fn test_rejects_ragged_rows() {
        let err = parse_kappa_g_info("title\n1.0 2.0\n3.0\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidHeader { line: 3, .. }));
    }

    #[test]
    fn test_title_only_is_empty() {
        assert!(parse_kappa_g_info("title\n").unwrap().is_empty());
    }
}
