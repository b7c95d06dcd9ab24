//! Dialogue state for one chat session.
//!
//! Tracks which multi-step command is being filled in, the current step,
//! and the field values collected so far.

use std::collections::BTreeMap;

use crate::command::{CommandName, FlowSpec};

/// Per-session dialogue state.
///
/// Invariant: `active_command` is `None` exactly when `step == 0`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialogueState {
    active_command: Option<CommandName>,
    step: u8,
    collected_fields: BTreeMap<String, String>,
}

/// A multi-step command whose fields are all collected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedFlow {
    pub command: CommandName,
    pub fields: BTreeMap<String, String>,
}

impl CompletedFlow {
    pub fn field(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }
}

/// Result of feeding one value into an active flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// More fields are needed; carries the next prompt.
    NextPrompt(&'static str),
    Complete(CompletedFlow),
}

impl DialogueState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_idle(&self) -> bool {
        self.step == 0
    }

    pub fn active_command(&self) -> Option<CommandName> {
        self.active_command
    }

    pub fn step(&self) -> u8 {
        self.step
    }

    pub fn collected_fields(&self) -> &BTreeMap<String, String> {
        &self.collected_fields
    }

    /// Start collecting fields for `flow`, discarding anything in progress.
    pub fn begin(&mut self, flow: &'static FlowSpec) {
        self.active_command = Some(flow.command);
        self.step = 1;
        self.collected_fields.clear();
    }

    /// Store `value` under the current step's field and advance.
    ///
    /// Returns `None` when idle. On the final step the collected fields are
    /// handed back and the state resets to idle.
    pub fn record(&mut self, value: &str) -> Option<StepOutcome> {
        let command = self.active_command?;
        let flow = command.flow()?;
        let field = flow.field(self.step)?;

        self.collected_fields
            .insert(field.name.to_string(), value.to_string());

        match flow.field(self.step + 1) {
            Some(next) => {
                self.step += 1;
                Some(StepOutcome::NextPrompt(next.prompt))
            }
            None => {
                let fields = std::mem::take(&mut self.collected_fields);
                self.reset();
                Some(StepOutcome::Complete(CompletedFlow { command, fields }))
            }
        }
    }

    pub fn reset(&mut self) {
        self.active_command = None;
        self.step = 0;
        self.collected_fields.clear();
    }
}
