//! Console rendering and input routing.

use std::io::Write;
use std::sync::Mutex;

use evichain_chat::{SessionObserver, TranscriptLine};
use evichain_core::types::{Notification, Severity};

const CLEAR_LINE: &str = "\r\x1b[2K";

/// What a line typed at the console asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleInput<'a> {
    /// Plain chat input for the dialogue engine.
    Chat(&'a str),
    /// `:scan <payload>`: check a QR payload.
    Scan(&'a str),
    /// `:keys`: list the QR payloads issued this session.
    Keys,
}

impl<'a> ConsoleInput<'a> {
    pub fn classify(line: &'a str) -> Self {
        let trimmed = line.trim_start();
        if let Some(payload) = trimmed.strip_prefix(":scan ") {
            return ConsoleInput::Scan(payload.trim());
        }
        if trimmed.trim_end() == ":keys" {
            return ConsoleInput::Keys;
        }
        ConsoleInput::Chat(line)
    }
}

#[derive(Default)]
struct Cursor {
    last_final: Option<u64>,
    partial_open: bool,
}

/// Observer that draws the transcript on a terminal.
///
/// The in-progress line is redrawn in place; finalized lines are printed
/// once each.
pub struct ConsoleObserver<W: Write + Send> {
    out: Mutex<(W, Cursor)>,
}

impl<W: Write + Send> ConsoleObserver<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new((out, Cursor::default())),
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok((out, _)) => out,
            Err(poisoned) => poisoned.into_inner().0,
        }
    }

    fn draw(out: &mut W, cursor: &mut Cursor, line: &TranscriptLine) -> std::io::Result<()> {
        if cursor.partial_open {
            write!(out, "{}", CLEAR_LINE)?;
        }
        if line.in_progress {
            write!(out, "{}", line.text)?;
            cursor.partial_open = true;
        } else if cursor.last_final != Some(line.id) {
            writeln!(out, "{}", line.text)?;
            cursor.last_final = Some(line.id);
            cursor.partial_open = false;
        }
        out.flush()
    }
}

impl<W: Write + Send> SessionObserver for ConsoleObserver<W> {
    fn on_transcript_changed(&self, lines: &[TranscriptLine]) {
        let Some(line) = lines.last() else {
            return;
        };
        let Ok(mut guard) = self.out.lock() else {
            return;
        };
        let (out, cursor) = &mut *guard;
        if let Err(e) = Self::draw(out, cursor, line) {
            tracing::debug!(error = %e, "Console write failed");
        }
    }

    fn on_notify(&self, notification: &Notification) {
        let Ok(mut guard) = self.out.lock() else {
            return;
        };
        let (out, _) = &mut *guard;
        let prefix = match notification.severity {
            Severity::Critical => "⚠️ ",
            Severity::Informational => "🔔 ",
        };
        if let Err(e) = writeln!(out, "{}{}", prefix, notification.message) {
            tracing::debug!(error = %e, "Console write failed");
        }
    }

    fn on_session_end(&self) {
        tracing::debug!("Session end signalled");
    }
}
