//! The bounded generate-parse-execute loop.
//!
//! One invocation of [`TurnLoop::run`] handles one user message end to end:
//! it asks the provider for a completion, scans the text for tool calls,
//! dispatches them, feeds the results back as synthetic turns, and repeats
//! until the model answers with plain text or the generation ceiling is hit.

use crate::parser::{parse_tool_calls, resolve_arguments};
use chrono::Utc;
use liteclaw_core::{CompletionProvider, DomainEvent, EventBus, Error, ToolRegistry, Turn};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Default ceiling on provider generations per user message.
const DEFAULT_MAX_TURNS: u32 = 5;

/// What one loop run produced.
#[derive(Debug, Clone)]
pub struct LoopOutcome {
    /// The text to show the user.
    pub final_text: String,
    /// How many provider generations were made.
    pub generations: u32,
    /// How many tool invocations were dispatched.
    pub tool_calls_made: usize,
}

/// Runs the reason-then-act cycle for a single message.
pub struct TurnLoop {
    provider: Arc<dyn CompletionProvider>,
    event_bus: Arc<EventBus>,
    max_turns: u32,
}

impl TurnLoop {
    pub fn new(provider: Arc<dyn CompletionProvider>, event_bus: Arc<EventBus>) -> Self {
        Self {
            provider,
            event_bus,
            max_turns: DEFAULT_MAX_TURNS,
        }
    }

    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns.max(1);
        self
    }

    /// Run the loop to completion over the given conversation buffer.
    ///
    /// `buffer` holds the prior history plus the incoming user turn; the
    /// loop appends two synthetic turns per dispatched tool call (the raw
    /// assistant output and a `TOOL_OUTPUT (<name>): <result>` turn) so the
    /// next generation can see what happened.
    ///
    /// Exhausting the ceiling is not an error: the last generated text is
    /// returned as the answer.
    pub async fn run(
        &self,
        chat_id: i64,
        system_prompt: &str,
        registry: &ToolRegistry,
        mut buffer: Vec<Turn>,
    ) -> Result<LoopOutcome, Error> {
        let mut generations = 0u32;
        let mut tool_calls_made = 0usize;
        let mut last_text = String::new();

        while generations < self.max_turns {
            generations += 1;

            let output = self.provider.generate(system_prompt, &buffer).await?;
            self.event_bus.publish(DomainEvent::ResponseGenerated {
                chat_id,
                turn_number: generations,
                timestamp: Utc::now(),
            });

            let invocations = parse_tool_calls(&output);
            if invocations.is_empty() {
                debug!(chat_id, generations, tool_calls_made, "Loop finished with plain text");
                return Ok(LoopOutcome {
                    final_text: output,
                    generations,
                    tool_calls_made,
                });
            }

            last_text = output.clone();

            for invocation in invocations {
                let arguments = resolve_arguments(&invocation.name, &invocation.raw_args);
                info!(chat_id, tool = %invocation.name, "Dispatching tool call");

                let started = Instant::now();
                let result = registry.dispatch(&invocation.name, arguments).await;
                let duration_ms = started.elapsed().as_millis() as u64;
                tool_calls_made += 1;

                self.event_bus.publish(DomainEvent::ToolExecuted {
                    tool_name: invocation.name.clone(),
                    success: result.success,
                    duration_ms,
                    timestamp: Utc::now(),
                });

                buffer.push(Turn::assistant(output.clone()));
                buffer.push(Turn::user(format!(
                    "TOOL_OUTPUT ({}): {}",
                    invocation.name, result.output
                )));
            }
        }

        warn!(chat_id, max_turns = self.max_turns, "Turn ceiling reached, returning last output");
        Ok(LoopOutcome {
            final_text: last_text,
            generations,
            tool_calls_made,
        })
    }
}
