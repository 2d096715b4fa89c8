//! Quiz round state machine.
//!
//! A session is Idle until the first `next()`. Each round accepts exactly one
//! answer; after that only `next()` moves the session on.

use std::fmt;

use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};
use tracing::debug;

use fallacy_common::{Example, FallacyCategory};

use crate::error::QuizError;

/// Options offered per round: the true category plus distractors.
pub const OPTION_COUNT: usize = 4;

const POINTS_PER_CORRECT: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    Idle,
    Active,
    Answered,
}

impl fmt::Display for QuizState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Active => "active",
            Self::Answered => "answered",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub is_correct: bool,
    pub message: String,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizRound {
    pub example: Example,
    /// Distinct, shuffled, always containing `example.fallacy_type`.
    pub options: Vec<FallacyCategory>,
    pub selected_option: Option<FallacyCategory>,
    pub feedback: Option<Feedback>,
}

pub struct QuizSession<R = StdRng> {
    rng: R,
    current: Option<QuizRound>,
    score: u32,
    streak: u32,
    rounds_played: u32,
}

impl QuizSession<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }
}

impl Default for QuizSession<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> QuizSession<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            current: None,
            score: 0,
            streak: 0,
            rounds_played: 0,
        }
    }

    pub fn state(&self) -> QuizState {
        match &self.current {
            None => QuizState::Idle,
            Some(round) if round.feedback.is_some() => QuizState::Answered,
            Some(_) => QuizState::Active,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn current(&self) -> Option<&QuizRound> {
        self.current.as_ref()
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    /// Start a new round from `corpus`, discarding any previous one.
    pub fn next(&mut self, corpus: &[Example]) -> Result<&QuizRound, QuizError> {
        let example = corpus
            .choose(&mut self.rng)
            .ok_or(QuizError::EmptyCorpus)?
            .clone();
        let options = self.options_for(example.fallacy_type);
        self.rounds_played += 1;

        debug!(
            round = self.rounds_played,
            fallacy_type = %example.fallacy_type,
            corpus_size = corpus.len(),
            "New quiz round"
        );

        Ok(&*self.current.insert(QuizRound {
            example,
            options,
            selected_option: None,
            feedback: None,
        }))
    }

    /// Submit the answer for the current round. Valid once per round.
    pub fn answer(&mut self, option: FallacyCategory) -> Result<&Feedback, QuizError> {
        let state = self.state();
        let round = match self.current.as_mut() {
            Some(round) if state == QuizState::Active => round,
            _ => {
                return Err(QuizError::InvalidState {
                    state,
                    operation: "answer",
                })
            }
        };

        let actual = round.example.fallacy_type;
        let is_correct = option == actual;
        let message = if is_correct {
            self.score += POINTS_PER_CORRECT;
            self.streak += 1;
            format!("Correct! This is an example of {}.", actual.display_name())
        } else {
            self.streak = 0;
            format!(
                "Incorrect. This is an example of {}, not {}.",
                actual.display_name(),
                option.display_name()
            )
        };

        debug!(is_correct, score = self.score, streak = self.streak, "Answer recorded");

        round.selected_option = Some(option);
        Ok(&*round.feedback.insert(Feedback {
            is_correct,
            message,
            explanation: round.example.explanation.clone(),
        }))
    }

    fn options_for(&mut self, correct: FallacyCategory) -> Vec<FallacyCategory> {
        let others: Vec<FallacyCategory> = FallacyCategory::ALL
            .into_iter()
            .filter(|c| *c != correct)
            .collect();

        let mut options: Vec<FallacyCategory> = others
            .choose_multiple(&mut self.rng, OPTION_COUNT - 1)
            .copied()
            .collect();
        options.push(correct);
        options.shuffle(&mut self.rng);
        options
    }
}
