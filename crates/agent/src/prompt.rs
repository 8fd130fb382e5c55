//! System-prompt assembly.
//!
//! One string, three blocks: the persona/instruction text, the rendered
//! known-facts section, and a short mission statement. The persona block
//! carries the tool-usage protocol for text-only completion providers — the
//! literal invocation syntax here must agree byte-for-byte with what the
//! parser scans for.

use liteclaw_core::tool::ToolSpec;
use std::path::Path;

/// Built-in persona used when no persona file is configured.
const DEFAULT_PERSONA: &str = "\
# IDENTITY
You are LiteClaw, a personal assistant with persistent memory. You are
direct, resourceful, and concise. You remember what users tell you and use
your tools proactively when a request needs real-world information or when
something is worth remembering.

# BEHAVIOR
- Answer plainly; skip filler and disclaimers.
- When the user shares a lasting fact about themselves, save it.
- When you need current information, search before guessing.
- Never invent tool names or tool output.";

/// Assembles the system prompt for one request.
pub struct PromptAssembler {
    persona: String,
}

impl PromptAssembler {
    pub fn new() -> Self {
        Self {
            persona: DEFAULT_PERSONA.to_string(),
        }
    }

    /// Load the persona block from a file, falling back to the default if
    /// the file cannot be read.
    pub fn from_file(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(persona) => Self { persona },
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Persona file unreadable, using default");
                Self::new()
            }
        }
    }

    /// Build the full system prompt for one request.
    pub fn build(&self, user_id: i64, facts: &[String], tools: &[ToolSpec]) -> String {
        let mut prompt = String::with_capacity(2048);
        prompt.push_str(&self.persona);

        prompt.push_str("\n\n# TOOLS\nYou can use the following tools:\n");
        let mut sorted: Vec<&ToolSpec> = tools.iter().collect();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));
        for tool in sorted {
            prompt.push_str(&format!("- {}: {}\n", tool.name, tool.description));
        }
        prompt.push_str(
            "\nTo use a tool, write a line in exactly this form:\n\
             TOOL: tool_name({\"param\": \"value\"})\n\
             Each result will be sent back to you as:\n\
             TOOL_OUTPUT (tool_name): <result>\n\
             After reading tool output, either call another tool or answer the user.",
        );

        prompt.push_str(&format!("\n\n# USER CONTEXT\n- User ID: {user_id}\n- Known Facts:\n"));
        if facts.is_empty() {
            prompt.push_str("(None yet)\n");
        } else {
            for fact in facts {
                prompt.push_str(&format!("- {fact}\n"));
            }
        }

        prompt.push_str(
            "\n# CURRENT MISSION\nYou are responding to a chat message. Be concise. Use tools if necessary.\n",
        );

        prompt
    }
}

impl Default for PromptAssembler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: &str, description: &str) -> ToolSpec {
        ToolSpec {
            name: name.into(),
            description: description.into(),
            parameters: serde_json::json!({"type": "object", "properties": {}}),
        }
    }

    #[test]
    fn prompt_contains_all_blocks() {
        let assembler = PromptAssembler::new();
        let prompt = assembler.build(
            7,
            &["[GENERAL] likes coffee".into()],
            &[spec("search", "Search the web")],
        );

        assert!(prompt.contains("# IDENTITY"));
        assert!(prompt.contains("# TOOLS"));
        assert!(prompt.contains("- search: Search the web"));
        assert!(prompt.contains("TOOL: tool_name("));
        assert!(prompt.contains("TOOL_OUTPUT (tool_name):"));
        assert!(prompt.contains("User ID: 7"));
        assert!(prompt.contains("- [GENERAL] likes coffee"));
        assert!(prompt.contains("# CURRENT MISSION"));
    }

    #[test]
    fn empty_facts_render_placeholder() {
        let assembler = PromptAssembler::new();
        let prompt = assembler.build(7, &[], &[]);
        assert!(prompt.contains("(None yet)"));
    }

    #[test]
    fn instructed_syntax_is_parseable() {
        // The assembler and parser must agree on the wire syntax: an output
        // following the prompt's example must be picked up by the scanner.
        let example = "TOOL: tool_name({\"param\": \"value\"})";
        let calls = crate::parser::parse_tool_calls(example);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].name, "tool_name");
    }

    #[test]
    fn missing_persona_file_falls_back() {
        let assembler = PromptAssembler::from_file(Path::new("/nonexistent/persona.md"));
        let prompt = assembler.build(1, &[], &[]);
        assert!(prompt.contains("LiteClaw"));
    }
}
