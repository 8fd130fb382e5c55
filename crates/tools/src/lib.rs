//! Built-in tool implementations for LiteClaw.
//!
//! Tools give the agent the ability to act in the world: search the web,
//! persist facts and skills, fetch a page, and dump stored facts for
//! diagnostics.
//!
//! Each tool catches its own failures and converts them into a descriptive
//! text result, so the turn loop always has a result turn to append. The
//! registry is constructed once per request, closing over that request's
//! [`ToolContext`] and the shared fact store.

pub mod browse;
pub mod debug_facts;
pub mod retrieve_skill;
pub mod save_fact;
pub mod save_skill;
pub mod search;

use liteclaw_core::tool::{ToolContext, ToolRegistry};
use liteclaw_store::FactStore;
use std::sync::Arc;

/// Create the registry of built-in tools for one request.
///
/// Only this fixed subset is wired into the dispatch path — tool names the
/// model invents resolve to a not-implemented text result instead.
pub fn default_registry(
    ctx: ToolContext,
    facts: Arc<FactStore>,
    tavily_api_key: Option<String>,
    client: reqwest::Client,
) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(search::SearchTool::new(
        tavily_api_key,
        client.clone(),
    )));
    registry.register(Box::new(save_fact::SaveFactTool::new(ctx, facts.clone())));
    registry.register(Box::new(save_skill::SaveSkillTool::new(ctx, facts.clone())));
    registry.register(Box::new(retrieve_skill::RetrieveSkillTool));
    registry.register(Box::new(browse::BrowseTool::new(client)));
    registry.register(Box::new(debug_facts::DebugFactsTool::new(ctx, facts)));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use liteclaw_store::MemoryKv;

    #[test]
    fn registry_contains_all_builtins() {
        let facts = Arc::new(FactStore::new(Arc::new(MemoryKv::new())));
        let ctx = ToolContext { user_id: 1, chat_id: 1 };
        let registry = default_registry(ctx, facts, None, reqwest::Client::new());

        for name in [
            "search",
            "save_fact",
            "save_skill",
            "retrieve_skill",
            "browse",
            "debug_facts",
        ] {
            assert!(registry.get(name).is_some(), "missing tool: {name}");
        }
    }
}
