use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::domain::{
    classify, compute_totals, extract_amount, month_tabs, respond, Kind, Message, Totals,
};
use crate::storage::Repository;

use super::AppError;

/// Pacing delay before the assistant reply is materialized.
const REPLY_DELAY: Duration = Duration::from_millis(800);

/// Illustrative messages seeded into an empty ledger, so a fresh start shows
/// how the chat surface is meant to be used.
const SEED_MESSAGES: &[(&str, Kind, i64)] = &[
    ("Recebi salário: R$ 3.500,00", Kind::Income, 350000),
    ("Paguei mercado: R$ 850,00", Kind::Expense, 85000),
];

/// Application service running the full interpreter pipeline:
/// classify -> extract -> append -> persist -> aggregate.
/// This is the primary interface for any client (CLI, TUI, etc.).
pub struct ChatService {
    repo: Repository,
    messages: Vec<Message>,
    next_sequence: i64,
    conversational: bool,
    reply_delay: Duration,
}

/// Result of one submission: the recorded message and, in conversational
/// mode, the assistant reply appended after it.
#[derive(Debug)]
pub struct SubmitResult {
    pub message: Message,
    pub reply: Option<Message>,
}

impl ChatService {
    /// Create a service over an empty, un-rehydrated log.
    pub fn new(repo: Repository) -> Self {
        Self {
            repo,
            messages: Vec::new(),
            next_sequence: 1,
            conversational: true,
            reply_delay: REPLY_DELAY,
        }
    }

    /// Override the pacing delay before assistant replies. Hosts that need
    /// no perceived pacing (and tests) can set it to zero.
    pub fn with_reply_delay(mut self, delay: Duration) -> Self {
        self.reply_delay = delay;
        self
    }

    /// Initialize a new database at the given path and rehydrate.
    pub async fn init(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}?mode=rwc", database_path);
        let repo = Repository::init(&db_url).await?;
        let mut service = Self::new(repo);
        service.rehydrate().await?;
        Ok(service)
    }

    /// Connect to an existing database and rehydrate.
    pub async fn connect(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}", database_path);
        let repo = Repository::connect(&db_url).await?;
        let mut service = Self::new(repo);
        service.rehydrate().await?;
        Ok(service)
    }

    /// Load the persisted log. A missing or corrupt blob degrades to an
    /// empty log, which is then seeded with the illustrative messages.
    pub async fn rehydrate(&mut self) -> Result<(), AppError> {
        self.messages = self.repo.load_log().await?;
        self.next_sequence = self
            .messages
            .iter()
            .map(|m| m.sequence)
            .max()
            .unwrap_or(0)
            + 1;

        if self.messages.is_empty() {
            let now = Utc::now();
            for (text, kind, amount_cents) in SEED_MESSAGES {
                self.append(Message::new(*text, *kind, *amount_cents, now))
                    .await?;
            }
        }
        Ok(())
    }

    /// Enable or disable conversational mode for subsequent submissions.
    pub fn set_conversational(&mut self, on: bool) {
        self.conversational = on;
    }

    pub fn is_conversational(&self) -> bool {
        self.conversational
    }

    // ========================
    // Submission pipeline
    // ========================

    /// Run one user submission through the pipeline, stamped with now.
    pub async fn submit(&mut self, text: &str) -> Result<SubmitResult, AppError> {
        self.submit_at(text, Utc::now()).await
    }

    /// Run one user submission with an explicit timestamp (backdating).
    ///
    /// Reset messages bypass amount extraction entirely. In conversational
    /// mode the assistant reply is materialized after a fixed pacing delay,
    /// always appended after the triggering message and tagged with its
    /// month partition.
    pub async fn submit_at(
        &mut self,
        text: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<SubmitResult, AppError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::EmptyMessage);
        }

        let kind = classify(text);
        let amount_cents = if kind == Kind::Reset {
            0
        } else {
            extract_amount(text)
        };

        let message = self
            .append(Message::new(text, kind, amount_cents, timestamp))
            .await?;

        let reply = if self.conversational {
            let reply_text = respond(kind, amount_cents);
            tokio::time::sleep(self.reply_delay).await;
            let reply = Message::new(reply_text, Kind::AssistantReply, 0, Utc::now())
                .with_month(message.month.clone());
            Some(self.append(reply).await?)
        } else {
            None
        };

        Ok(SubmitResult { message, reply })
    }

    /// Append a message, assigning its sequence number, and persist the
    /// whole log.
    async fn append(&mut self, mut message: Message) -> Result<Message, AppError> {
        message.sequence = self.next_sequence;
        self.next_sequence += 1;
        self.messages.push(message.clone());
        self.repo.save_log(&self.messages).await?;
        Ok(message)
    }

    // ========================
    // Queries
    // ========================

    /// The full ordered log.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The log restricted to one month partition, preserving order.
    pub fn messages_for_month(&self, month: &str) -> Vec<&Message> {
        self.messages.iter().filter(|m| m.month == month).collect()
    }

    /// Balance / income / expense totals for the given month filter,
    /// scoped to the most recent reset boundary.
    pub fn totals(&self, month_filter: Option<&str>) -> Totals {
        compute_totals(&self.messages, month_filter)
    }

    /// Selectable month partitions: the last 12 months, current first.
    pub fn months(&self) -> Vec<String> {
        month_tabs(Utc::now())
    }
}
