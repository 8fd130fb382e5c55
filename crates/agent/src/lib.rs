//! The core turn loop — the heart of LiteClaw.
//!
//! The agent follows a **Generate → Parse → Execute** cycle:
//!
//! 1. **Receive** a user message (from the transport layer)
//! 2. **Build context** (persona + known facts + conversation history)
//! 3. **Generate** a completion from the configured provider
//! 4. **Parse** the free-text output for `TOOL: name(args)` invocations
//! 5. **If tool calls**: execute them, append results, loop back to step 3
//! 6. **If plain text**: persist it as the assistant's turn and return it
//!
//! The loop continues until the model responds with no tool calls or the
//! fixed turn ceiling is reached. The model side of the contract is pure
//! text — no structured tool-calling protocol is assumed, which keeps the
//! runtime portable across providers that lack one.

pub mod parser;
pub mod prompt;
pub mod service;
pub mod turn_loop;

#[cfg(test)]
mod test_helpers;

pub use parser::{parse_tool_calls, resolve_arguments};
pub use prompt::PromptAssembler;
pub use service::AgentService;
pub use turn_loop::{LoopOutcome, TurnLoop};
