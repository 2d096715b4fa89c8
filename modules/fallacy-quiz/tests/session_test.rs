//! Long-running quiz sessions over the fallback corpus.
//!
//! Run with: cargo test -p fallacy-quiz --test session_test

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::SeedableRng;

use fallacy_common::{fallback_examples, FallacyCategory};
use fallacy_quiz::{QuizSession, QuizState, OPTION_COUNT};

#[test]
fn thousand_rounds_over_fallback_corpus() {
    let corpus = fallback_examples();
    let seeded: HashSet<FallacyCategory> = corpus.iter().map(|e| e.fallacy_type).collect();
    let mut session = QuizSession::with_rng(StdRng::seed_from_u64(2024));
    let mut seen = HashSet::new();

    for _ in 0..1000 {
        let round = session.next(&corpus).unwrap();

        assert!(seeded.contains(&round.example.fallacy_type));
        assert_eq!(round.options.len(), OPTION_COUNT);
        let distinct: HashSet<_> = round.options.iter().collect();
        assert_eq!(distinct.len(), OPTION_COUNT);
        assert!(round.options.contains(&round.example.fallacy_type));

        seen.insert(round.example.text.clone());
    }

    assert_eq!(session.rounds_played(), 1000);
    // uniform choice over five items reaches all of them in 1000 draws
    assert_eq!(seen.len(), corpus.len());
}

#[test]
fn score_and_streak_follow_answers() {
    let corpus = fallback_examples();
    let mut session = QuizSession::with_rng(StdRng::seed_from_u64(99));
    let mut expected_score = 0;
    let mut expected_streak = 0;

    // alternate: three right, one wrong
    for i in 0..40 {
        let round = session.next(&corpus).unwrap();
        let actual = round.example.fallacy_type;
        let choice = if i % 4 == 3 {
            *round.options.iter().find(|c| **c != actual).unwrap()
        } else {
            actual
        };

        let feedback = session.answer(choice).unwrap();
        if choice == actual {
            assert!(feedback.is_correct);
            expected_score += 10;
            expected_streak += 1;
        } else {
            assert!(!feedback.is_correct);
            expected_streak = 0;
        }

        assert_eq!(session.score(), expected_score);
        assert_eq!(session.streak(), expected_streak);
        assert_eq!(session.state(), QuizState::Answered);
    }

    assert_eq!(session.score(), 300);
}
