//! Terminal dialogue engine for EVICHAIN.
//!
//! Interprets one line of input at a time, walks multi-step evidence
//! commands, and reveals scripted transcript lines frame by frame.

pub mod command;
pub mod context;
pub mod engine;
pub mod error;
pub mod reveal;
pub mod script;
pub mod types;

pub use command::{CommandName, FieldSpec, FlowSpec};
pub use context::{CompletedFlow, DialogueState, StepOutcome};
pub use engine::{Collaborators, DialogueEngine, NullObserver, SessionObserver};
pub use error::ChatError;
pub use reveal::{FrameAction, LineReveal, RevealFrame, RevealTiming, CURSOR};
pub use script::ScriptLine;
pub use types::{LineKind, SessionContext, TranscriptLine};
