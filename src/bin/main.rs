use std::io::{self, BufRead, Write};

use tracing::info;
use triage_consultant::composer;
use triage_consultant::Consultant;

/// Commands that end the conversation.
const EXIT_COMMANDS: &[&str] = &["exit", "quit", "bye", "goodbye", "q", "stop", "end", "done"];

/// Commands that print usage help.
const HELP_COMMANDS: &[&str] = &["help", "?", "commands"];

#[tokio::main]
async fn main() {
    // Load .env file if present; API key is optional.
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    println!("{}", "=".repeat(70));
    println!("AI Primary Care Consultation System");
    println!("{}", "=".repeat(70));
    println!("\nNote: This is a prototype for demonstration purposes.");
    println!("For real medical concerns, please consult with a healthcare provider.");
    println!("\nTip: Type 'exit', 'quit', 'q', or 'bye' at any time to end the conversation.");
    println!("{}", "=".repeat(70));
    println!();

    let mut consultant = Consultant::from_env();
    info!("Consultation engine ready");

    if !consultant.backend_enabled() {
        println!("Running in rule-based mode (no LLM API key found).");
        println!("To enable LLM mode, set OPENAI_API_KEY environment variable.");
        println!();
    }

    println!("{}", consultant.initial_greeting());
    println!();

    let stdin = io::stdin();
    loop {
        print!("\nYou: ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => {
                println!("\nAI: {}", composer::farewell());
                break;
            }
            Ok(_) => {}
        }

        let user_input = line.trim();

        if EXIT_COMMANDS.contains(&user_input.to_lowercase().as_str()) {
            println!("\nAI: {}", composer::farewell());
            break;
        }

        if HELP_COMMANDS.contains(&user_input.to_lowercase().as_str()) {
            println!("\nAI: {}", composer::help_response());
            continue;
        }

        // Boundary layer: any engine error becomes a generic apology,
        // never a crash.
        match consultant.process_turn(user_input).await {
            Ok(response) => println!("\nAI: {}", response),
            Err(error) => {
                println!("\nAI: {}", composer::apology());
                info!("Turn processing failed: {}", error);
            }
        }
    }
}
