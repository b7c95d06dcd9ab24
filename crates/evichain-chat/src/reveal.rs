//! Word-by-word reveal of transcript lines.
//!
//! A line is revealed as a sequence of frames, each carrying the delay the
//! driver should wait before applying it. The engine never sleeps; whoever
//! embeds it decides how to honor the delays (timers in the binary, nothing
//! at all in tests).

use std::time::Duration;

use evichain_core::config::TerminalConfig;
use evichain_core::types::Notification;

/// Glyph appended to a line while it is still being revealed.
pub const CURSOR: char = '█';

/// Delays used when revealing a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealTiming {
    /// Before the first word of a line.
    pub line_delay: Duration,
    /// Between words, and before the final frame.
    pub word_delay: Duration,
}

impl RevealTiming {
    /// No waiting at all.
    pub fn instant() -> Self {
        Self {
            line_delay: Duration::ZERO,
            word_delay: Duration::ZERO,
        }
    }
}

impl From<&TerminalConfig> for RevealTiming {
    fn from(config: &TerminalConfig) -> Self {
        Self {
            line_delay: config.line_delay(),
            word_delay: config.word_delay(),
        }
    }
}

/// What applying a frame does to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameAction {
    /// Show the partial text (already ending in [`CURSOR`]).
    Partial(String),
    /// Replace the partial line with its full text and finalize it.
    Final(String),
    /// Deliver a notification to the observer.
    Notify(Notification),
    /// Tell the embedding UI to close the session.
    EndSession,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RevealFrame {
    pub delay: Duration,
    pub action: FrameAction,
}

/// Iterator over the frames revealing one line.
///
/// For a line of `n` words this yields `n` partial frames followed by one
/// final frame. Words are split on single spaces, so an empty line still
/// shows a lone cursor before finalizing.
#[derive(Debug, Clone)]
pub struct LineReveal {
    text: String,
    words: Vec<String>,
    shown: usize,
    finished: bool,
    timing: RevealTiming,
}

impl LineReveal {
    pub fn new(text: &str, timing: RevealTiming) -> Self {
        Self {
            text: text.to_string(),
            words: text.split(' ').map(str::to_string).collect(),
            shown: 0,
            finished: false,
            timing,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Iterator for LineReveal {
    type Item = RevealFrame;

    fn next(&mut self) -> Option<RevealFrame> {
        if self.finished {
            return None;
        }

        if self.shown < self.words.len() {
            let delay = if self.shown == 0 {
                self.timing.line_delay
            } else {
                self.timing.word_delay
            };
            self.shown += 1;
            let mut partial = self.words[..self.shown].join(" ");
            partial.push(CURSOR);
            return Some(RevealFrame {
                delay,
                action: FrameAction::Partial(partial),
            });
        }

        self.finished = true;
        Some(RevealFrame {
            delay: self.timing.word_delay,
            action: FrameAction::Final(self.text.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timing() -> RevealTiming {
        RevealTiming {
            line_delay: Duration::from_millis(300),
            word_delay: Duration::from_millis(50),
        }
    }

    fn actions(text: &str) -> Vec<FrameAction> {
        LineReveal::new(text, timing()).map(|f| f.action).collect()
    }

    #[test]
    fn test_reveal_grows_word_by_word() {
        assert_eq!(
            actions("> Status: SUCCESS"),
            vec![
                FrameAction::Partial(">█".to_string()),
                FrameAction::Partial("> Status:█".to_string()),
                FrameAction::Partial("> Status: SUCCESS█".to_string()),
                FrameAction::Final("> Status: SUCCESS".to_string()),
            ]
        );
    }

    #[test]
    fn test_reveal_delays() {
        let delays: Vec<Duration> = LineReveal::new("a b c", timing()).map(|f| f.delay).collect();
        assert_eq!(
            delays,
            vec![
                Duration::from_millis(300),
                Duration::from_millis(50),
                Duration::from_millis(50),
                Duration::from_millis(50),
            ]
        );
    }

    #[test]
    fn test_reveal_is_deterministic() {
        let text = ":: WELCOME TO EVICHAIN :: Blockchain Evidence Interface";
        assert_eq!(actions(text), actions(text));
    }

    #[test]
    fn test_final_frame_has_no_cursor() {
        let last = LineReveal::new("> Connection Terminated", timing())
            .last()
            .unwrap();
        match last.action {
            FrameAction::Final(text) => {
                assert_eq!(text, "> Connection Terminated");
                assert!(!text.ends_with(CURSOR));
            }
            other => panic!("expected final frame, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_line_shows_cursor_then_empty() {
        assert_eq!(
            actions(""),
            vec![
                FrameAction::Partial("█".to_string()),
                FrameAction::Final(String::new()),
            ]
        );
    }

    #[test]
    fn test_repeated_spaces_preserved_in_final_text() {
        let text = "> help        → Show commands";
        let frames = actions(text);
        assert_eq!(frames.last(), Some(&FrameAction::Final(text.to_string())));
        // Every empty "word" between the spaces is its own partial frame.
        assert_eq!(frames.len(), text.split(' ').count() + 1);
    }

    #[test]
    fn test_iterator_is_fused_after_final() {
        let mut reveal = LineReveal::new("done", timing());
        assert!(reveal.next().is_some());
        assert!(reveal.next().is_some());
        assert!(reveal.next().is_none());
        assert!(reveal.next().is_none());
    }

    #[test]
    fn test_timing_from_terminal_config() {
        let config = TerminalConfig {
            line_delay_ms: 10,
            word_delay_ms: 2,
            ..TerminalConfig::default()
        };
        let timing = RevealTiming::from(&config);
        assert_eq!(timing.line_delay, Duration::from_millis(10));
        assert_eq!(timing.word_delay, Duration::from_millis(2));
        assert_eq!(RevealTiming::instant().line_delay, Duration::ZERO);
    }
}
