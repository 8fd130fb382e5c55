//! `liteclaw facts` — Show everything remembered about a user.

use liteclaw_config::AppConfig;

pub async fn run(user_id: i64, raw: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let (facts, _history) = super::build_stores(&config).await?;

    if raw {
        let dump = facts.raw_facts(user_id).await?;
        if dump.is_empty() {
            println!("No facts stored for user {user_id}.");
            return Ok(());
        }
        println!("Core ({}):", dump.core.len());
        for fact in &dump.core {
            println!("  {fact}");
        }
        println!("General ({}):", dump.general.len());
        for fact in &dump.general {
            println!("  {fact}");
        }
        println!("Legacy ({}):", dump.legacy.len());
        for fact in &dump.legacy {
            println!("  {fact}");
        }
        return Ok(());
    }

    let rendered = facts.get_facts(user_id).await?;
    if rendered.is_empty() {
        println!("No facts stored for user {user_id}.");
    } else {
        for fact in rendered {
            println!("{fact}");
        }
    }

    Ok(())
}
