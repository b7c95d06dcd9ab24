//! Dialogue engine: one chat session, from open to close.
//!
//! Input is handled synchronously and only queues script lines. The queued
//! lines are released one [`RevealFrame`] at a time through [`advance`],
//! which the embedding UI calls after waiting [`next_frame_delay`]. While
//! frames are pending the session is busy and rejects further input.
//!
//! [`advance`]: DialogueEngine::advance
//! [`next_frame_delay`]: DialogueEngine::next_frame_delay

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use uuid::Uuid;

use evichain_core::access_log::{AccessLogEntry, AccessLogSink, MemoryAccessLog};
use evichain_core::config::TerminalConfig;
use evichain_core::ledger::{pseudo_hash_key, EvidenceKey, EvidenceKeyring, QrPayload};
use evichain_core::types::Notification;

use crate::command::{CommandName, FIELD_EVIDENCE_ID};
use crate::context::{CompletedFlow, DialogueState, StepOutcome};
use crate::error::ChatError;
use crate::reveal::{FrameAction, LineReveal, RevealFrame, RevealTiming};
use crate::script::{self, ScriptLine};
use crate::types::{LineKind, SessionContext, TranscriptLine};

// =============================================================================
// Observer and collaborators
// =============================================================================

/// Callbacks from the engine to the embedding UI.
pub trait SessionObserver: Send + Sync {
    /// The transcript gained a line or the in-progress line changed.
    fn on_transcript_changed(&self, _lines: &[TranscriptLine]) {}

    fn on_notify(&self, _notification: &Notification) {}

    /// Fired once, after the exit script and its delay.
    fn on_session_end(&self) {}
}

/// Observer that ignores everything.
pub struct NullObserver;

impl SessionObserver for NullObserver {}

/// Capabilities the engine consumes but does not own.
#[derive(Clone)]
pub struct Collaborators {
    pub access_log: Arc<dyn AccessLogSink>,
    pub keyring: Arc<EvidenceKeyring>,
}

impl Collaborators {
    pub fn new(access_log: Arc<dyn AccessLogSink>) -> Self {
        Self {
            access_log,
            keyring: Arc::new(EvidenceKeyring::new()),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryAccessLog::new()))
    }
}

// =============================================================================
// DialogueEngine
// =============================================================================

enum Pending {
    Line(ScriptLine),
    Notify(Notification),
    EndSession(Duration),
}

/// A single chat session.
pub struct DialogueEngine {
    session_id: Uuid,
    config: TerminalConfig,
    timing: RevealTiming,
    context: SessionContext,
    collaborators: Collaborators,
    observer: Arc<dyn SessionObserver>,
    state: DialogueState,
    transcript: Vec<TranscriptLine>,
    next_line_id: u64,
    queue: VecDeque<Pending>,
    current: Option<(LineKind, LineReveal)>,
    /// Next frame to apply. `Some` exactly while the session is busy.
    staged: Option<(LineKind, RevealFrame)>,
    closed: bool,
}

impl DialogueEngine {
    /// Open a session and queue the greeting if enabled.
    pub fn open(
        config: TerminalConfig,
        context: SessionContext,
        collaborators: Collaborators,
        observer: Arc<dyn SessionObserver>,
    ) -> Self {
        let timing = RevealTiming::from(&config);
        let mut engine = Self {
            session_id: Uuid::new_v4(),
            config,
            timing,
            context,
            collaborators,
            observer,
            state: DialogueState::new(),
            transcript: Vec::new(),
            next_line_id: 1,
            queue: VecDeque::new(),
            current: None,
            staged: None,
            closed: false,
        };

        tracing::info!(
            session_id = %engine.session_id,
            user = ?engine.context.current_user.as_ref().map(|u| u.username.as_str()),
            "Chat session opened"
        );

        if engine.config.show_greeting {
            engine.enqueue(script::greeting());
        }
        engine.stage();
        engine
    }

    /// Interpret one line of input.
    ///
    /// The echo line is appended immediately. Everything the engine says in
    /// reply is queued for reveal.
    pub fn submit_line(&mut self, input: &str) -> Result<(), ChatError> {
        self.ensure_accepting()?;
        if input.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        let max = self.config.max_input_length;
        if input.chars().count() > max {
            return Err(ChatError::MessageTooLong(max));
        }

        self.push_line(script::echo(input), LineKind::User);

        // An active flow takes the input as a field value, even when it
        // spells a command name.
        match self.state.record(input) {
            Some(StepOutcome::NextPrompt(prompt)) => self.enqueue(script::prompt(prompt)),
            Some(StepOutcome::Complete(done)) => self.complete(done),
            None => self.dispatch(input),
        }

        self.stage();
        Ok(())
    }

    /// Check a scanned QR payload against the keys issued this session.
    ///
    /// Answers with a single transcript line. Dialogue state is untouched.
    pub fn verify_access(&mut self, raw_payload: &str) -> Result<(), ChatError> {
        self.ensure_accepting()?;
        if raw_payload.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let payload = match QrPayload::parse(raw_payload) {
            Ok(p) => p,
            Err(e) => {
                tracing::debug!(error = %e, "Rejected QR payload");
                self.queue
                    .push_back(Pending::Line(script::invalid_qr_payload()));
                self.stage();
                return Ok(());
            }
        };

        let username = match self.context.current_user.as_ref() {
            Some(user) => user.username.clone(),
            None => {
                self.queue
                    .push_back(Pending::Line(script::authentication_required()));
                self.stage();
                return Ok(());
            }
        };

        if self
            .collaborators
            .keyring
            .holds(&payload.evidence_id, &payload.hash_key)
        {
            self.queue
                .push_back(Pending::Line(script::access_granted(&payload.evidence_id)));
        } else {
            tracing::warn!(
                evidence_id = %payload.evidence_id,
                user = %username,
                "Unauthorized evidence access attempt"
            );
            self.queue
                .push_back(Pending::Line(script::access_denied(&payload.evidence_id)));
            self.queue.push_back(Pending::Notify(Notification::critical(format!(
                "SECURITY ALERT: Unauthorized access attempt to evidence {} by {}",
                payload.evidence_id, username
            ))));
        }

        self.stage();
        Ok(())
    }

    /// Delay to wait before the next [`advance`](Self::advance), or `None`
    /// when nothing is pending.
    pub fn next_frame_delay(&self) -> Option<Duration> {
        self.staged.as_ref().map(|(_, frame)| frame.delay)
    }

    /// Apply the next pending frame. Returns `false` when there was none.
    pub fn advance(&mut self) -> bool {
        let Some((kind, frame)) = self.staged.take() else {
            return false;
        };

        match frame.action {
            FrameAction::Partial(text) => self.show_partial(text, kind),
            FrameAction::Final(text) => self.finalize(text, kind),
            FrameAction::Notify(notification) => self.observer.on_notify(&notification),
            FrameAction::EndSession => {
                self.close();
                self.observer.on_session_end();
                return true;
            }
        }

        self.stage();
        true
    }

    /// Apply every pending frame without waiting. Returns the frame count.
    pub fn run_until_idle(&mut self) -> usize {
        let mut applied = 0;
        while self.advance() {
            applied += 1;
        }
        applied
    }

    /// Tear the session down. Pending frames are dropped, so nothing
    /// reaches the observer afterwards. Safe to call repeatedly.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.queue.clear();
        self.current = None;
        self.staged = None;
        tracing::info!(
            session_id = %self.session_id,
            lines = self.transcript.len(),
            "Chat session closed"
        );
    }

    pub fn is_busy(&self) -> bool {
        self.staged.is_some()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn state(&self) -> &DialogueState {
        &self.state
    }

    pub fn transcript(&self) -> &[TranscriptLine] {
        &self.transcript
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    /// QR keys issued to the session user so far.
    pub fn issued_keys(&self) -> Vec<EvidenceKey> {
        self.collaborators.keyring.keys()
    }

    // -- Private helpers --

    fn ensure_accepting(&self) -> Result<(), ChatError> {
        if self.closed {
            Err(ChatError::SessionClosed)
        } else if self.is_busy() {
            Err(ChatError::RevealInProgress)
        } else {
            Ok(())
        }
    }

    fn dispatch(&mut self, input: &str) {
        let Some(command) = CommandName::parse(input) else {
            tracing::debug!(input, "Unknown command");
            self.enqueue(script::unknown_command(input));
            return;
        };

        tracing::debug!(command = %command, "Dispatching command");
        match command {
            CommandName::Help => self.enqueue(script::help()),
            CommandName::Contact => self.enqueue(script::contact()),
            CommandName::Login => {
                let lines = script::login(self.context.current_user.as_ref());
                self.enqueue(lines);
            }
            CommandName::Exit => {
                self.enqueue(script::exit());
                self.queue
                    .push_back(Pending::EndSession(self.config.exit_delay()));
            }
            CommandName::AddEvidence
            | CommandName::TransferCustody
            | CommandName::ViewHistory
            | CommandName::QrCode => {
                if let Some(flow) = command.flow() {
                    self.state.begin(flow);
                    self.enqueue(script::flow_intro(flow));
                }
            }
        }
    }

    fn complete(&mut self, done: CompletedFlow) {
        let evidence_id = done.field(FIELD_EVIDENCE_ID).to_string();
        tracing::info!(command = %done.command, evidence_id = %evidence_id, "Command completed");

        self.enqueue(script::completion(&done));

        match done.command {
            CommandName::AddEvidence => self.queue.push_back(Pending::Notify(
                Notification::informational(format!(
                    "Evidence {} added successfully via chatbot",
                    evidence_id
                )),
            )),
            CommandName::TransferCustody => self.queue.push_back(Pending::Notify(
                Notification::informational(format!(
                    "Evidence {} custody transferred via chatbot",
                    evidence_id
                )),
            )),
            CommandName::QrCode => {
                if let Err(e) = self.issue_qr_key(&evidence_id) {
                    tracing::warn!(error = %e, evidence_id = %evidence_id, "QR key issue failed");
                    self.queue
                        .push_back(Pending::Line(script::collaborator_failure(&e.to_string())));
                }
            }
            CommandName::ViewHistory
            | CommandName::Help
            | CommandName::Contact
            | CommandName::Login
            | CommandName::Exit => {}
        }
    }

    /// Issue a hash key for the session user and log the access. Anonymous
    /// sessions get the script only.
    ///
    /// The key only enters the keyring once its access record is written.
    fn issue_qr_key(&self, evidence_id: &str) -> Result<Option<EvidenceKey>, ChatError> {
        let Some(user) = self.context.current_user.as_ref() else {
            return Ok(None);
        };

        let hash_key = pseudo_hash_key();
        self.collaborators
            .access_log
            .append(&AccessLogEntry::access_attempt(
                evidence_id,
                &hash_key,
                &user.username,
            ))?;
        let key = self.collaborators.keyring.insert(evidence_id, &hash_key)?;

        tracing::debug!(evidence_id, user = %user.username, "QR key issued");
        Ok(Some(key))
    }

    fn enqueue(&mut self, lines: Vec<ScriptLine>) {
        self.queue.extend(lines.into_iter().map(Pending::Line));
    }

    /// Pull the next frame off the queue into `staged`.
    fn stage(&mut self) {
        if self.staged.is_some() || self.closed {
            return;
        }

        loop {
            if let Some((kind, reveal)) = self.current.as_mut() {
                if let Some(frame) = reveal.next() {
                    self.staged = Some((*kind, frame));
                    return;
                }
                self.current = None;
            }

            match self.queue.pop_front() {
                None => return,
                Some(Pending::Line(line)) => {
                    self.current = Some((line.kind, LineReveal::new(&line.text, self.timing)));
                }
                Some(Pending::Notify(notification)) => {
                    self.staged = Some((
                        LineKind::System,
                        RevealFrame {
                            delay: Duration::ZERO,
                            action: FrameAction::Notify(notification),
                        },
                    ));
                    return;
                }
                Some(Pending::EndSession(delay)) => {
                    self.staged = Some((
                        LineKind::System,
                        RevealFrame {
                            delay,
                            action: FrameAction::EndSession,
                        },
                    ));
                    return;
                }
            }
        }
    }

    fn push_line(&mut self, text: String, kind: LineKind) {
        let line = self.new_line(text, kind, false);
        self.transcript.push(line);
        self.observer.on_transcript_changed(&self.transcript);
    }

    fn show_partial(&mut self, text: String, kind: LineKind) {
        match self.transcript.last_mut() {
            Some(last) if last.in_progress => last.text = text,
            _ => {
                let line = self.new_line(text, kind, true);
                self.transcript.push(line);
            }
        }
        self.observer.on_transcript_changed(&self.transcript);
    }

    fn finalize(&mut self, text: String, kind: LineKind) {
        match self.transcript.last_mut() {
            Some(last) if last.in_progress => {
                last.text = text;
                last.in_progress = false;
            }
            _ => {
                let line = self.new_line(text, kind, false);
                self.transcript.push(line);
            }
        }
        self.observer.on_transcript_changed(&self.transcript);
    }

    fn new_line(&mut self, text: String, kind: LineKind, in_progress: bool) -> TranscriptLine {
        let id = self.next_line_id;
        self.next_line_id += 1;
        TranscriptLine {
            id,
            text,
            kind,
            created_at: Utc::now(),
            in_progress,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
