//! `liteclaw onboard` — First-time setup.

use liteclaw_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_dir = AppConfig::config_dir();
    let config_path = config_dir.join("config.toml");

    println!("LiteClaw — First-Time Setup");
    println!("===========================\n");

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
        println!("Created config directory: {}", config_dir.display());
    } else {
        println!("Config directory exists: {}", config_dir.display());
    }

    if config_path.exists() {
        println!("\nConfig already exists at: {}", config_path.display());
        println!("Edit it manually or delete and re-run onboard.");
    } else {
        std::fs::write(&config_path, AppConfig::default_toml())?;
        println!("Created config.toml at: {}", config_path.display());
        println!("\nNext steps:");
        println!("  1. Set an API key:");
        println!("       export GROQ_API_KEY=gsk_...     (recommended)");
        println!("       export OPENAI_API_KEY=sk-...    (for OpenAI)");
        println!("  2. Optionally enable web search:");
        println!("       export TAVILY_API_KEY=tvly-...");
        println!("  3. Start chatting:");
        println!("       liteclaw chat");
    }

    Ok(())
}
