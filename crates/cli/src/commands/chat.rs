//! `liteclaw chat` — Interactive or single-message chat mode.
//!
//! The interactive loop intercepts `/reset` and `/facts` before the agent
//! ever sees them; slash commands are a transport concern, not something the
//! model should reason about.

use liteclaw_config::AppConfig;
use std::io::{BufRead, Write};

pub async fn run(
    message: Option<String>,
    chat_id: i64,
    user_id: i64,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    if config.provider.api_key.is_none() {
        eprintln!();
        eprintln!("  ERROR: No API key configured!");
        eprintln!();
        eprintln!("  Set one of these environment variables:");
        eprintln!("    export GROQ_API_KEY=gsk_...     (recommended)");
        eprintln!("    export OPENAI_API_KEY=sk-...    (for OpenAI direct)");
        eprintln!();
        eprintln!("  Or add it to your config file:");
        eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    }

    let service = super::build_service(&config).await?;

    if let Some(msg) = message {
        let response = service.handle_message(user_id, chat_id, &msg).await?;
        println!("{response}");
        return Ok(());
    }

    println!();
    println!("  LiteClaw — Interactive Mode");
    println!();
    println!("  Provider:  {}", config.provider.name);
    println!("  Model:     {}", config.provider.model);
    println!("  User:      {user_id}  Chat: {chat_id}");
    println!();
    println!("  /facts to list what I remember, /reset to clear this chat.");
    println!("  Type 'exit' or Ctrl+D to quit.");
    println!();

    let stdin = std::io::stdin();
    loop {
        print!("  You > ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();

        match input {
            "" => continue,
            "exit" | "quit" => break,
            "/reset" => {
                service.reset(chat_id).await?;
                println!("  History cleared.");
                continue;
            }
            "/facts" => {
                let facts = service.facts_for(user_id).await?;
                if facts.is_empty() {
                    println!("  No facts stored yet.");
                } else {
                    for fact in facts {
                        println!("  {fact}");
                    }
                }
                continue;
            }
            _ => {}
        }

        match service.handle_message(user_id, chat_id, input).await {
            Ok(response) => println!("\n  {response}\n"),
            Err(e) => eprintln!("\n  Something went wrong: {e}\n"),
        }
    }

    println!("  Bye!");
    Ok(())
}
