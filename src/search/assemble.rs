//! Final result assembly

use super::ProductMatch;
use std::collections::HashSet;

/// Strict matches followed by close matches, capped at `max_results`
///
/// The relaxation stage already excludes strict titles; titles are checked
/// again here so a result never lists the same product twice.
pub fn assemble(
    strict: Vec<ProductMatch>,
    relaxed: Vec<ProductMatch>,
    max_results: usize,
) -> Vec<ProductMatch> {
    let mut seen = HashSet::new();

    strict
        .into_iter()
        .chain(relaxed)
        .filter(|m| seen.insert(m.product.title.clone()))
        .take(max_results)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::product;

    fn strict(title: &str) -> ProductMatch {
        ProductMatch::strict(product(title, "x", 1))
    }

    fn close(title: &str) -> ProductMatch {
        ProductMatch::close(product(title, "x", 1), "close")
    }

    #[test]
    fn test_strict_precede_relaxed() {
        let result = assemble(vec![strict("a"), strict("b")], vec![close("c")], 10);

        let flags: Vec<bool> = result.iter().map(|m| m.is_close_match).collect();
        assert_eq!(flags, vec![false, false, true]);
    }

    #[test]
    fn test_capped() {
        let strict: Vec<_> = (0..8).map(|i| strict(&format!("s{}", i))).collect();
        let relaxed: Vec<_> = (0..8).map(|i| close(&format!("r{}", i))).collect();

        let result = assemble(strict, relaxed, 10);
        assert_eq!(result.len(), 10);
        assert_eq!(result[7].product.title, "s7");
        assert_eq!(result[8].product.title, "r0");
    }

    #[test]
    fn test_duplicate_titles_dropped() {
        let result = assemble(vec![strict("a")], vec![close("a"), close("b")], 10);

        let titles: Vec<&str> = result.iter().map(|m| m.product.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b"]);
    }
}
