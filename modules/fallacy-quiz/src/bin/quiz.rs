use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

use fallacy_common::FallacyCategory;
use fallacy_quiz::{QuizSession, RemoteCorpus};

#[derive(Parser)]
#[command(name = "quiz", about = "Spot the logical fallacy in real discussion snippets")]
struct Cli {
    /// Base URL of the fallacy API
    #[arg(long, env = "FALLACY_API_URL", default_value = "http://localhost:3000")]
    api_url: String,

    /// Seconds between corpus re-fetches
    #[arg(long, default_value_t = 3600)]
    refresh_interval: u64,

    /// Seed for example and option order
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Debug, PartialEq, Eq)]
enum Choice {
    Pick(FallacyCategory),
    Quit,
    Invalid,
}

fn parse_choice(input: &str, options: &[FallacyCategory]) -> Choice {
    let input = input.trim();
    if input.eq_ignore_ascii_case("q") {
        return Choice::Quit;
    }
    match input.parse::<usize>() {
        Ok(n) if (1..=options.len()).contains(&n) => Choice::Pick(options[n - 1]),
        _ => Choice::Invalid,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they don't interleave with the quiz.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("fallacy=warn".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut remote = RemoteCorpus::new(&cli.api_url, Duration::from_secs(cli.refresh_interval))
        .context("Failed to build HTTP client")?;
    let mut session = match cli.seed {
        Some(seed) => QuizSession::with_rng(StdRng::seed_from_u64(seed)),
        None => QuizSession::new(),
    };

    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    println!("Fallacy Trainer: identify the fallacy in each snippet.");

    'rounds: loop {
        let examples = remote.examples().await;
        let round = session.next(examples)?;
        let options = round.options.clone();

        println!();
        println!("\"{}\"", round.example.text);
        println!("  Source: {}", round.example.source);
        if let Some(url) = &round.example.url {
            println!("  {url}");
        }
        println!();
        for (i, option) in options.iter().enumerate() {
            println!("  {}. {} ({})", i + 1, option.display_name(), option.description());
        }

        let chosen = loop {
            stdout.write_all(b"\nYour answer (1-4, q to quit): ").await?;
            stdout.flush().await?;

            let Some(line) = stdin.next_line().await? else {
                break 'rounds;
            };
            match parse_choice(&line, &options) {
                Choice::Pick(category) => break category,
                Choice::Quit => break 'rounds,
                Choice::Invalid => println!("Please enter a number from 1 to {}.", options.len()),
            }
        };

        let feedback = session.answer(chosen)?;
        println!();
        println!("{}", feedback.message);
        println!("{}", feedback.explanation);
        println!("Score: {}  Streak: {}", session.score(), session.streak());
    }

    println!();
    println!(
        "Final score: {} over {} rounds.",
        session.score(),
        session.rounds_played()
    );
    Ok(())
}
