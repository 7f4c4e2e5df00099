use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use trivia_quiz::{
    logging, OrderKind, Quiz, QuizConfig, QuestionKind, QuestionQuery, DEFAULT_AMOUNT,
    DEFAULT_API_URL, DEFAULT_CATEGORY, DEFAULT_TIME_LIMIT,
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of questions to fetch
    #[arg(long, default_value_t = DEFAULT_AMOUNT, value_parser = clap::value_parser!(u32).range(1..=50))]
    amount: u32,

    /// Open Trivia DB category id
    #[arg(long, default_value_t = DEFAULT_CATEGORY)]
    category: u32,

    /// Question type
    #[arg(long = "type", value_enum, default_value_t = KindArg::Multiple)]
    kind: KindArg,

    /// Question provider endpoint
    #[arg(long, env = "TRIVIA_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Seconds allowed per question
    #[arg(long, default_value_t = DEFAULT_TIME_LIMIT, value_parser = clap::value_parser!(u32).range(1..))]
    time_limit: u32,

    /// Seconds before a question request is abandoned
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    request_timeout: u64,

    /// How answer options are ordered
    #[arg(long, value_enum, default_value_t = OrderArg::Sorted)]
    order: OrderArg,

    /// Seed for the shuffled order
    #[arg(long)]
    seed: Option<u64>,

    /// File to write logs to (filtered by RUST_LOG)
    #[arg(long, env = "TRIVIA_LOG_FILE")]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum KindArg {
    Multiple,
    Boolean,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OrderArg {
    Sorted,
    Shuffled,
}

impl From<Args> for QuizConfig {
    fn from(args: Args) -> Self {
        let kind = match args.kind {
            KindArg::Multiple => QuestionKind::Multiple,
            KindArg::Boolean => QuestionKind::Boolean,
        };
        let order = match args.order {
            OrderArg::Sorted => OrderKind::Sorted,
            OrderArg::Shuffled => OrderKind::Shuffled,
        };

        QuizConfig {
            query: QuestionQuery {
                amount: args.amount,
                category: args.category,
                kind,
            },
            api_url: args.api_url,
            request_timeout: Duration::from_secs(args.request_timeout),
            time_limit: args.time_limit,
            order,
            seed: args.seed,
            log_file: args.log_file,
        }
    }
}

#[tokio::main]
async fn main() {
    let config = QuizConfig::from(Args::parse());

    if let Err(e) = logging::init(config.log_file.as_deref()) {
        eprintln!("Failed to open log file: {}", e);
        std::process::exit(1);
    }

    let quiz = match Quiz::from_config(&config) {
        Ok(quiz) => quiz,
        Err(e) => {
            eprintln!("Error setting up quiz: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = quiz.run().await {
        eprintln!("Error running quiz: {}", e);
        std::process::exit(1);
    }
}
