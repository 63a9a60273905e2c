//! Keyword scoring of candidates
//!
//! Scores live in a vector parallel to the candidates; products are never
//! mutated.

use crate::catalog::Product;

/// Lowercased text a product is matched against
pub fn keyword_blob(product: &Product) -> String {
    format!(
        "{} {} {}",
        product.title,
        product.description,
        product.features.join(" ")
    )
    .to_lowercase()
}

/// Number of `keywords` found in each candidate, case-insensitively
pub fn score_candidates(candidates: &[&Product], keywords: &[String]) -> Vec<usize> {
    let keywords: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();

    candidates
        .iter()
        .map(|product| {
            let blob = keyword_blob(product);
            keywords.iter().filter(|k| blob.contains(k.as_str())).count()
        })
        .collect()
}

/// Drop zero-score candidates and order the rest by descending score
///
/// The sort is stable, so equal scores keep catalog order.
pub fn rank_by_keywords<'a>(candidates: Vec<&'a Product>, keywords: &[String]) -> Vec<&'a Product> {
    let scores = score_candidates(&candidates, keywords);

    let mut scored: Vec<(usize, &'a Product)> = scores
        .into_iter()
        .zip(candidates)
        .filter(|(score, _)| *score > 0)
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    scored.into_iter().map(|(_, product)| product).collect()
}
