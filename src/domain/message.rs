use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Cents;

pub type MessageId = Uuid;

/// Classification tag of a ledger message. Direction of money movement is
/// carried here, never by the sign of the amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    /// Money entering the ledger ("entrada")
    #[serde(rename = "entrada")]
    Income,
    /// Money leaving the ledger ("saida")
    #[serde(rename = "saida")]
    Expense,
    /// Automatic acknowledgment produced in conversational mode
    #[serde(rename = "assistente")]
    AssistantReply,
    /// Boundary that truncates aggregation scope to messages after it
    #[serde(rename = "reset")]
    Reset,
    /// Free text that matched no keyword set
    #[serde(rename = "none")]
    Unclassified,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Income => "entrada",
            Kind::Expense => "saida",
            Kind::AssistantReply => "assistente",
            Kind::Reset => "reset",
            Kind::Unclassified => "none",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "entrada" => Some(Kind::Income),
            "saida" => Some(Kind::Expense),
            "assistente" => Some(Kind::AssistantReply),
            "reset" => Some(Kind::Reset),
            "none" => Some(Kind::Unclassified),
            _ => None,
        }
    }

    /// Returns true if messages of this kind move the balance.
    pub fn moves_balance(&self) -> bool {
        matches!(self, Kind::Income | Kind::Expense)
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One immutable ledger entry. Messages are append-only and totally ordered
/// by sequence number; corrections happen by appending, never by editing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    /// Monotonically increasing sequence number for ordering
    pub sequence: i64,
    /// Original user-entered text, trimmed
    pub text: String,
    pub kind: Kind,
    /// Amount in cents, always >= 0; zero when absent or unparsable
    pub amount_cents: Cents,
    pub timestamp: DateTime<Utc>,
    /// Month partition label, derived from the timestamp at creation
    pub month: String,
}

impl Message {
    /// Create a new message. Sequence number must be assigned on append.
    pub fn new(
        text: impl Into<String>,
        kind: Kind,
        amount_cents: Cents,
        timestamp: DateTime<Utc>,
    ) -> Self {
        assert!(amount_cents >= 0, "Message amount must be non-negative");
        let month = month_label(timestamp);
        Self {
            id: Uuid::new_v4(),
            sequence: 0, // Will be set on append
            text: text.into().trim().to_string(),
            kind,
            amount_cents,
            timestamp,
            month,
        }
    }

    /// Override the derived month partition. Used for assistant replies,
    /// which inherit the month of the message that triggered them.
    pub fn with_month(mut self, month: impl Into<String>) -> Self {
        self.month = month.into();
        self
    }
}

/// Portuguese month names, used for partition labels.
pub const MONTHS_PT: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

/// Derive the month partition label for a timestamp.
/// Example: 2025-01-15 -> "Janeiro 2025"
pub fn month_label(timestamp: DateTime<Utc>) -> String {
    format!(
        "{} {}",
        MONTHS_PT[timestamp.month0() as usize],
        timestamp.year()
    )
}

/// The last 12 month labels counting back from `now`, current month first.
/// These are the selectable aggregation filters ("month tabs").
pub fn month_tabs(now: DateTime<Utc>) -> Vec<String> {
    let mut year = now.year();
    let mut month = now.month() as i32;
    let mut tabs = Vec::with_capacity(12);
    for _ in 0..12 {
        tabs.push(format!("{} {}", MONTHS_PT[(month - 1) as usize], year));
        month -= 1;
        if month == 0 {
            month = 12;
            year -= 1;
        }
    }
    tabs
}
