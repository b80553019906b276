//! dinebot CLI: restaurant chat assistant.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use dinebot::assistant::Assistant;
use dinebot::config::NluConfig;
use dinebot::data::RestaurantData;
use dinebot::nlu::{MenuCorpus, search_faq};

#[derive(Parser)]
#[command(name = "dinebot", version, about = "Restaurant chat assistant")]
struct Cli {
    /// Directory holding menu.json, faq.json and friends.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// NLU config file (defaults to the bundled tables).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the intent of a message.
    Classify {
        /// The message to classify.
        message: String,
    },

    /// Show per-intent scores and the deciding rule as JSON.
    Scores {
        /// The message to score.
        message: String,
    },

    /// Answer a single message.
    Ask {
        /// The message to answer.
        message: String,

        /// Also print the detected intent and quick actions.
        #[arg(long)]
        verbose: bool,
    },

    /// Resolve a message to a menu item.
    MatchItem {
        /// Free-text mention of a dish.
        message: String,
    },

    /// Resolve a message to a FAQ answer.
    MatchFaq {
        /// The question.
        message: String,
    },

    /// Interactive chat on stdin.
    Chat,
}

fn load_assistant(cli: &Cli) -> Result<Assistant> {
    let config = NluConfig::load_or_bundled(cli.config.as_deref())?;
    let data = RestaurantData::open(cli.data_dir.as_deref())?;
    Ok(Assistant::from_config(&config, Arc::new(data)))
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Classify { message } => {
            let config = NluConfig::load_or_bundled(cli.config.as_deref())?;
            println!("{}", config.classifier().classify(message));
        }

        Commands::Scores { message } => {
            let config = NluConfig::load_or_bundled(cli.config.as_deref())?;
            let explained = config.classifier().explain(message);
            let json = serde_json::to_string_pretty(&explained).into_diagnostic()?;
            println!("{json}");
        }

        Commands::Ask { message, verbose } => {
            let assistant = load_assistant(&cli)?;
            let reply = assistant.reply(message);
            if *verbose {
                println!("intent: {}", reply.intent);
                if !reply.actions.is_empty() {
                    println!("actions: {}", reply.actions.join(" | "));
                }
                println!();
            }
            println!("{}", reply.answer);
        }

        Commands::MatchItem { message } => {
            let data = RestaurantData::open(cli.data_dir.as_deref())?;
            let corpus = MenuCorpus::build(&data.catalog);
            match corpus.best_match(message) {
                Some((entry, score)) => {
                    println!("best:  {} ({score})", entry.text);
                    match corpus.search(message) {
                        Some(item) => println!("item:  {}", item.name),
                        None => println!("item:  (below threshold)"),
                    }
                }
                None => println!("The menu is empty."),
            }
        }

        Commands::MatchFaq { message } => {
            let data = RestaurantData::open(cli.data_dir.as_deref())?;
            match search_faq(message, &data.faqs) {
                Some(entry) => {
                    println!("Q: {}", entry.question);
                    println!("A: {}", entry.answer);
                }
                None => println!("No FAQ entry matches."),
            }
        }

        Commands::Chat => {
            let assistant = load_assistant(&cli)?;
            println!(
                "Chatting with {}. Type 'quit' to leave.",
                assistant.data().restaurant_name
            );
            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            loop {
                print!("you> ");
                stdout.flush().into_diagnostic()?;

                let mut line = String::new();
                if stdin.lock().read_line(&mut line).into_diagnostic()? == 0 {
                    break;
                }
                let message = line.trim();
                if matches!(message.to_lowercase().as_str(), "quit" | "exit" | "q") {
                    break;
                }
                if message.is_empty() {
                    continue;
                }
                println!("bot> {}\n", assistant.reply(message).answer);
            }
        }
    }

    Ok(())
}
