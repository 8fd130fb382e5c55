//! `liteclaw reset` — Wipe a conversation's history.

use liteclaw_config::AppConfig;

pub async fn run(chat_id: i64) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let (_facts, history) = super::build_stores(&config).await?;

    history.clear_history(chat_id).await?;
    println!("History cleared for chat {chat_id}. Facts are kept.");

    Ok(())
}
