//! Top-level command table.
//!
//! The command set is closed. Multi-step commands carry a static
//! [`FlowSpec`] describing the fields they collect, in order.

use std::fmt;

/// Every command the terminal recognizes at the top level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandName {
    Help,
    AddEvidence,
    TransferCustody,
    ViewHistory,
    QrCode,
    Contact,
    Login,
    Exit,
}

impl CommandName {
    pub const ALL: [CommandName; 8] = [
        CommandName::Help,
        CommandName::AddEvidence,
        CommandName::TransferCustody,
        CommandName::ViewHistory,
        CommandName::QrCode,
        CommandName::Contact,
        CommandName::Login,
        CommandName::Exit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CommandName::Help => "help",
            CommandName::AddEvidence => "add_evidence",
            CommandName::TransferCustody => "transfer_custody",
            CommandName::ViewHistory => "view_history",
            CommandName::QrCode => "qr_code",
            CommandName::Contact => "contact",
            CommandName::Login => "login",
            CommandName::Exit => "exit",
        }
    }

    /// Match raw input against the command set, ignoring case and
    /// surrounding whitespace.
    pub fn parse(input: &str) -> Option<Self> {
        let normalized = input.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == normalized)
    }

    /// The field-collection flow for multi-step commands, `None` for
    /// single-shot ones.
    pub fn flow(&self) -> Option<&'static FlowSpec> {
        match self {
            CommandName::AddEvidence => Some(&ADD_EVIDENCE),
            CommandName::TransferCustody => Some(&TRANSFER_CUSTODY),
            CommandName::ViewHistory => Some(&VIEW_HISTORY),
            CommandName::QrCode => Some(&QR_CODE),
            CommandName::Help | CommandName::Contact | CommandName::Login | CommandName::Exit => {
                None
            }
        }
    }

    pub fn is_multi_step(&self) -> bool {
        self.flow().is_some()
    }
}

impl fmt::Display for CommandName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One field collected by a multi-step command.
#[derive(Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub prompt: &'static str,
}

/// Static definition of a multi-step command.
#[derive(Debug, PartialEq, Eq)]
pub struct FlowSpec {
    pub command: CommandName,
    /// Shown between the command banner and the first prompt.
    pub intro: &'static str,
    pub fields: &'static [FieldSpec],
}

impl FlowSpec {
    pub fn step_count(&self) -> u8 {
        self.fields.len() as u8
    }

    /// Field for a 1-based step number.
    pub fn field(&self, step: u8) -> Option<&'static FieldSpec> {
        let idx = usize::from(step).checked_sub(1)?;
        self.fields.get(idx)
    }
}

pub const FIELD_EVIDENCE_ID: &str = "evidence_id";
pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_LOCATION: &str = "location";
pub const FIELD_NEW_LOCATION: &str = "new_location";

const EVIDENCE_ID_PROMPT: &str = "> Evidence ID: ";

static ADD_EVIDENCE: FlowSpec = FlowSpec {
    command: CommandName::AddEvidence,
    intro: ":: Please provide the following:",
    fields: &[
        FieldSpec {
            name: FIELD_EVIDENCE_ID,
            prompt: EVIDENCE_ID_PROMPT,
        },
        FieldSpec {
            name: FIELD_DESCRIPTION,
            prompt: "> Description: ",
        },
        FieldSpec {
            name: FIELD_LOCATION,
            prompt: "> Location of Incident: ",
        },
    ],
};

static TRANSFER_CUSTODY: FlowSpec = FlowSpec {
    command: CommandName::TransferCustody,
    intro: ":: Provide the evidence details below.",
    fields: &[
        FieldSpec {
            name: FIELD_EVIDENCE_ID,
            prompt: EVIDENCE_ID_PROMPT,
        },
        FieldSpec {
            name: FIELD_NEW_LOCATION,
            prompt: "> New Custodian Location: ",
        },
    ],
};

static VIEW_HISTORY: FlowSpec = FlowSpec {
    command: CommandName::ViewHistory,
    intro: ":: Please enter the Evidence ID:",
    fields: &[FieldSpec {
        name: FIELD_EVIDENCE_ID,
        prompt: EVIDENCE_ID_PROMPT,
    }],
};

static QR_CODE: FlowSpec = FlowSpec {
    command: CommandName::QrCode,
    intro: ":: Enter Evidence ID to generate secure QR:",
    fields: &[FieldSpec {
        name: FIELD_EVIDENCE_ID,
        prompt: EVIDENCE_ID_PROMPT,
    }],
};
