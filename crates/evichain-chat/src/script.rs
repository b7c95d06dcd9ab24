//! Fixed transcript scripts.
//!
//! Every reply the terminal gives is one of these scripts. They are pure
//! functions of their inputs so the same command always yields the same
//! lines.

use evichain_core::types::UserProfile;

use crate::command::{
    CommandName, FlowSpec, FIELD_EVIDENCE_ID, FIELD_LOCATION, FIELD_NEW_LOCATION,
};
use crate::context::CompletedFlow;
use crate::types::LineKind;

/// A line waiting to be revealed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    pub text: String,
    pub kind: LineKind,
}

impl ScriptLine {
    pub fn new(text: impl Into<String>, kind: LineKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::new(text, LineKind::System)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(text, LineKind::Success)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, LineKind::Error)
    }

    pub fn input(text: impl Into<String>) -> Self {
        Self::new(text, LineKind::Input)
    }
}

/// Text of the echo line for a submission.
pub fn echo(input: &str) -> String {
    format!("> {}", input)
}

pub fn greeting() -> Vec<ScriptLine> {
    vec![
        ScriptLine::system("> INITIALIZING CHATBOT NODE..."),
        ScriptLine::success(":: CONNECTION SECURE [✓]"),
        ScriptLine::system(":: WELCOME TO EVICHAIN :: Blockchain Evidence Interface"),
        ScriptLine::system("> How can I assist you today?"),
        ScriptLine::system("> Type 'help' to see available commands."),
    ]
}

pub fn help() -> Vec<ScriptLine> {
    vec![
        ScriptLine::system(":: COMMAND MENU"),
        ScriptLine::system("> add_evidence        → Submit new digital evidence"),
        ScriptLine::system("> transfer_custody    → Change evidence ownership location"),
        ScriptLine::system("> view_history        → View chain of custody"),
        ScriptLine::system("> qr_code             → Generate QR code for evidence ID"),
        ScriptLine::system("> contact             → Show EVICHAIN support details"),
        ScriptLine::system("> login               → Authenticate as verified officer"),
        ScriptLine::system("> exit                → End session"),
    ]
}

pub fn contact() -> Vec<ScriptLine> {
    vec![
        banner(CommandName::Contact),
        ScriptLine::system(":: EVICHAIN Support Node Online ::"),
        ScriptLine::system(""),
        ScriptLine::system("📞 Phone: +91 98729 99283"),
        ScriptLine::system("📧 Email: info@evicain.com"),
        ScriptLine::system("📍 Address: Dehradun, Uttarakhand, India"),
        ScriptLine::system(":: Available 24/7 for verified legal inquiries."),
    ]
}

pub fn login(user: Option<&UserProfile>) -> Vec<ScriptLine> {
    match user {
        Some(user) => vec![
            banner(CommandName::Login),
            ScriptLine::success(":: Authentication Status: ALREADY LOGGED IN"),
            ScriptLine::system(format!(":: Current User: {}", user.display_name)),
            ScriptLine::success(format!(":: Access Level: {} [✓]", user.role)),
        ],
        None => vec![
            banner(CommandName::Login),
            ScriptLine::system(":: Please use the main login interface"),
            authentication_required(),
        ],
    }
}

pub fn exit() -> Vec<ScriptLine> {
    vec![
        banner(CommandName::Exit),
        ScriptLine::system(":: Ending Session..."),
        ScriptLine::system(":: LOGGING OFF EVICHAIN NODE █"),
        ScriptLine::system("> Connection Terminated [🔒]"),
    ]
}

pub fn unknown_command(input: &str) -> Vec<ScriptLine> {
    vec![
        ScriptLine::error(format!(":: ERROR: Unknown command '{}' [403]", input)),
        ScriptLine::system("> Please type 'help' for a list of valid commands."),
    ]
}

/// Banner, intro, and first prompt for a multi-step command.
pub fn flow_intro(flow: &FlowSpec) -> Vec<ScriptLine> {
    let mut lines = vec![banner(flow.command), ScriptLine::system(flow.intro)];
    if let Some(first) = flow.field(1) {
        lines.push(ScriptLine::input(first.prompt));
    }
    lines
}

pub fn prompt(text: &str) -> Vec<ScriptLine> {
    vec![ScriptLine::input(text)]
}

/// Success script for a finished multi-step command.
pub fn completion(done: &CompletedFlow) -> Vec<ScriptLine> {
    let evidence_id = done.field(FIELD_EVIDENCE_ID);
    match done.command {
        CommandName::AddEvidence => vec![
            ScriptLine::system(":: Submitting evidence..."),
            ScriptLine::success(":: Hash generated ✅"),
            ScriptLine::system(format!(
                ":: Evidence {} from {} stored securely on the blockchain.",
                evidence_id,
                done.field(FIELD_LOCATION)
            )),
            ScriptLine::success("> Status: SUCCESS ✅"),
        ],
        CommandName::TransferCustody => vec![
            ScriptLine::system(format!(
                ":: Transferring custody of {} to {}...",
                evidence_id,
                done.field(FIELD_NEW_LOCATION)
            )),
            ScriptLine::system(":: Blockchain updated with new hash reference."),
            ScriptLine::success("> Status: TRANSFER COMPLETE ✅"),
        ],
        CommandName::ViewHistory => vec![
            ScriptLine::system(format!(":: Fetching custody log for {}...", evidence_id)),
            ScriptLine::system(":: Rendering transaction history..."),
            ScriptLine::system(""),
            ScriptLine::success("[✓] Jan 01 2025 – Created by Officer #002"),
            ScriptLine::success("[✓] Jan 03 2025 – Transferred to Digital Lab A"),
            ScriptLine::success("[✓] Jan 04 2025 – Reviewed by Legal Team"),
            ScriptLine::system("> End of log."),
        ],
        CommandName::QrCode => vec![
            ScriptLine::system(format!(":: Generating QR Code for {}...", evidence_id)),
            ScriptLine::success("[🧾 QR_CODE_GENERATED]"),
            ScriptLine::system("> Use this QR to scan and verify evidence on-site."),
        ],
        CommandName::Help | CommandName::Contact | CommandName::Login | CommandName::Exit => {
            Vec::new()
        }
    }
}

pub fn authentication_required() -> ScriptLine {
    ScriptLine::error(":: Authentication Required")
}

pub fn invalid_qr_payload() -> ScriptLine {
    ScriptLine::error(":: ERROR: Invalid QR code format")
}

pub fn access_granted(evidence_id: &str) -> ScriptLine {
    ScriptLine::success(format!(":: Access Granted: evidence {}", evidence_id))
}

pub fn access_denied(evidence_id: &str) -> ScriptLine {
    ScriptLine::error(format!(":: Access Denied: evidence {}", evidence_id))
}

pub fn collaborator_failure(detail: &str) -> ScriptLine {
    ScriptLine::error(format!(":: ERROR: {}", detail))
}

fn banner(command: CommandName) -> ScriptLine {
    ScriptLine::system(format!("> COMMAND: {}", command))
}
