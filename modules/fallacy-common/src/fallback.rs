use crate::types::{Example, FallacyCategory};

/// The five hand-written examples the corpus starts from, one per category.
/// Served until the first successful run replaces them and kept as the
/// tail of the corpus afterwards.
pub fn fallback_examples() -> Vec<Example> {
    vec![
        seed(
            "Don't listen to Dr. Smith's climate research. He drives an SUV, so he's a hypocrite.",
            "Twitter discussion on climate policy",
            FallacyCategory::AdHominem,
            "This attacks Dr. Smith personally rather than addressing his research.",
        ),
        seed(
            "If we allow same-sex marriage, next people will want to marry their pets!",
            "Political debate on marriage equality",
            FallacyCategory::SlipperySlope,
            "This suggests an extreme outcome without evidence of the connection.",
        ),
        seed(
            "Scientists say we should trust the vaccine, but scientists have been wrong before.",
            "Health forum discussion",
            FallacyCategory::AppealToAuthority,
            "This misuses appeals to authority by suggesting that being wrong once invalidates expertise.",
        ),
        seed(
            "My opponent wants to regulate businesses, which means they want full government control of the economy.",
            "Economic policy debate",
            FallacyCategory::StrawMan,
            "This misrepresents the position to make it easier to attack.",
        ),
        seed(
            "Either we cut taxes or the economy will collapse.",
            "Budget discussion",
            FallacyCategory::FalseDichotomy,
            "This presents only two options when many others exist.",
        ),
    ]
}

fn seed(text: &str, source: &str, fallacy_type: FallacyCategory, explanation: &str) -> Example {
    Example {
        text: text.to_string(),
        source: source.to_string(),
        url: None,
        fallacy_type,
        explanation: explanation.to_string(),
    }
}
