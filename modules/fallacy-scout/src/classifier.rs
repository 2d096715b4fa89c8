//! Keyword-scoring fallacy classifier.
//!
//! Each category scores one point per keyword that appears anywhere in the
//! lower-cased text (repeats don't count twice). Highest score wins; ties,
//! including the all-zero case, go to the category declared first.

use fallacy_common::FallacyCategory;

pub fn classify(text: &str) -> FallacyCategory {
    let lower = text.to_lowercase();

    let mut best = FallacyCategory::ALL[0];
    let mut best_score = score_lowered(&lower, best);
    for category in FallacyCategory::ALL.into_iter().skip(1) {
        let score = score_lowered(&lower, category);
        if score > best_score {
            best = category;
            best_score = score;
        }
    }
    best
}

fn score_lowered(lower: &str, category: FallacyCategory) -> usize {
    category
        .keywords()
        .iter()
        .filter(|keyword| lower.contains(*keyword))
        .count()
}
