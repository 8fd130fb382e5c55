//! Shared test doubles for loop and service tests.

use async_trait::async_trait;
use liteclaw_core::error::ProviderError;
use liteclaw_core::{CompletionProvider, Turn};
use std::sync::Mutex;

/// A provider that replays a fixed script of completions.
///
/// Each call records the conversation buffer it was handed, so tests can
/// assert exactly which synthetic turns the loop injected between
/// generations. An exhausted script yields a provider error; a repeating
/// script yields the same output forever.
pub struct ScriptedProvider {
    script: Mutex<Vec<String>>,
    repeat: Option<String>,
    calls: Mutex<Vec<Vec<Turn>>>,
}

impl ScriptedProvider {
    pub fn new(script: Vec<&str>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().map(String::from).collect()),
            repeat: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn repeating(output: &str) -> Self {
        Self {
            script: Mutex::new(Vec::new()),
            repeat: Some(output.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// The conversation buffers seen by each generate call, in order.
    pub fn calls(&self) -> Vec<Vec<Turn>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(
        &self,
        _system_prompt: &str,
        turns: &[Turn],
    ) -> Result<String, ProviderError> {
        self.calls.lock().unwrap().push(turns.to_vec());

        let mut script = self.script.lock().unwrap();
        if !script.is_empty() {
            return Ok(script.remove(0));
        }
        match &self.repeat {
            Some(output) => Ok(output.clone()),
            None => Err(ProviderError::ApiError {
                status_code: 500,
                message: "script exhausted".into(),
            }),
        }
    }
}
