//! LearnBot - question/answer chat assistant
//!
//! Answers typed questions from a small JSON knowledge base using
//! approximate matching, and learns new answers on a miss.

use anyhow::Result;
use clap::{Parser, Subcommand};
use learnbot::{
    config::LearnBotConfig,
    repl,
    session::{ChatSession, Conversation, TeachReport},
    AskOutcome,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "learnbot")]
#[command(author = "A3S Lab Team")]
#[command(version)]
#[command(about = "Question/answer chat assistant that learns new answers")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "LEARNBOT_CONFIG")]
    config: Option<PathBuf>,

    /// Knowledge base file (overrides the config file)
    #[arg(short, long, env = "LEARNBOT_KNOWLEDGE")]
    knowledge: Option<PathBuf>,

    /// Similarity cutoff between 0.0 and 1.0 (overrides the config file)
    #[arg(long)]
    cutoff: Option<f64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat (default)
    Chat,

    /// Ask a single question
    Ask {
        /// Question text
        question: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Teach an answer for a question
    Teach {
        /// Question text
        question: String,

        /// Answer text
        answer: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the closest known questions with their scores
    Match {
        /// Question text
        question: String,
    },

    /// List all known questions and answers
    List,

    /// Show configuration
    Config {
        /// Show default configuration
        #[arg(long)]
        default: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("learnbot={}", log_level).into());
    let registry = tracing_subscriber::registry().with(filter);
    if cli.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    // Load configuration
    let mut config = LearnBotConfig::load(cli.config.as_deref())?;
    if let Some(path) = cli.knowledge {
        config.knowledge.path = path;
    }
    if let Some(cutoff) = cli.cutoff {
        config.matching.cutoff = cutoff;
    }
    config.validate()?;

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => run_chat(&config)?,
        Commands::Ask { question, json } => ask(&config, &question, json)?,
        Commands::Teach {
            question,
            answer,
            json,
        } => teach(&config, &question, &answer, json)?,
        Commands::Match { question } => show_matches(&config, &question)?,
        Commands::List => list(&config)?,
        Commands::Config { default } => {
            show_config(if default { None } else { Some(&config) })?;
        }
    }

    Ok(())
}

fn run_chat(config: &LearnBotConfig) -> Result<()> {
    let mut conversation = Conversation::new(ChatSession::open(config)?);
    tracing::info!(
        "Chat started with {} known questions (type 'quit' to exit)",
        conversation.session().store().knowledge().len()
    );

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    repl::run(&mut conversation, &config.chat, stdin.lock(), stdout.lock())?;
    Ok(())
}

fn ask(config: &LearnBotConfig, question: &str, json: bool) -> Result<()> {
    let session = ChatSession::open(config)?;
    let outcome = session.ask(question);

    if json {
        println!("{}", serde_json::to_string(&outcome)?);
        return Ok(());
    }
    match outcome {
        AskOutcome::Answer { answer } => println!("{}", answer),
        AskOutcome::Unknown { .. } => println!("{}", config.chat.fallback_answer),
    }
    Ok(())
}

fn teach(config: &LearnBotConfig, question: &str, answer: &str, json: bool) -> Result<()> {
    let mut session = ChatSession::open(config)?;
    let result = session.teach(question, answer);

    if json {
        println!("{}", serde_json::to_string(&TeachReport::from(&result))?);
        if result.is_err() {
            std::process::exit(1);
        }
        return Ok(());
    }

    result?;
    println!("{}", config.chat.learned_message);
    Ok(())
}

fn show_matches(config: &LearnBotConfig, question: &str) -> Result<()> {
    let session = ChatSession::open(config)?;
    let matches = session.suggestions(question);
    if matches.is_empty() {
        println!(
            "No known question scores at least {}",
            session.engine().cutoff()
        );
        return Ok(());
    }
    for m in matches {
        println!("{:.3}  [{}] {}", m.score, m.index, m.question);
    }
    Ok(())
}

fn list(config: &LearnBotConfig) -> Result<()> {
    let session = ChatSession::open(config)?;
    let kb = session.store().knowledge();
    if kb.is_empty() {
        println!("Knowledge base {} is empty", session.store().path().display());
        return Ok(());
    }
    for (i, entry) in kb.entries().iter().enumerate() {
        println!("{}. {}", i + 1, entry.question);
        println!("   {}", entry.answer);
    }
    Ok(())
}

fn show_config(config: Option<&LearnBotConfig>) -> Result<()> {
    let config = config.cloned().unwrap_or_default();
    let toml = toml::to_string_pretty(&config)?;
    println!("{}", toml);
    Ok(())
}
