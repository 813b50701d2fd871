use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};

use crate::application::{ChatService, SubmitResult};
use crate::domain::{format_brl, month_label, Message};

/// Saldo - Chat-style Personal Finance Ledger
#[derive(Parser)]
#[command(name = "saldo")]
#[command(about = "A local-first personal finance ledger driven by chat messages")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(short, long, default_value = "saldo.db")]
    pub database: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new database
    Init,

    /// Record one chat message (e.g. "Recebi salário: R$ 3.500,00")
    Send {
        /// The message text
        text: Vec<String>,

        /// Disable the automatic assistant reply for this submission
        #[arg(long)]
        no_reply: bool,

        /// Date of the message (ISO 8601 format: YYYY-MM-DD, defaults to now)
        #[arg(long)]
        date: Option<String>,
    },

    /// Interactive chat session (blank line skips, "sair" or EOF exits)
    Chat {
        /// Disable automatic assistant replies for the session
        #[arg(long)]
        no_reply: bool,
    },

    /// Show balance, income and expense totals
    Balance {
        /// Month partition to aggregate (e.g. "Janeiro 2025", defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,

        /// Aggregate the whole log instead of one month
        #[arg(long)]
        all: bool,
    },

    /// List recorded messages
    Log {
        /// Month partition to list (defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,

        /// List the whole log instead of one month
        #[arg(long)]
        all: bool,

        /// Maximum number of messages to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// List the selectable month partitions
    Months,

    /// Zero the balance for the current month (records "zerar saldo")
    Reset,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let verbose = self.verbose;

        match self.command {
            Commands::Init => {
                ChatService::init(&self.database).await?;
                println!("Database initialized: {}", self.database);
            }

            Commands::Send {
                text,
                no_reply,
                date,
            } => {
                let mut service = ChatService::connect(&self.database).await?;
                service.set_conversational(!no_reply);

                let text = text.join(" ");
                let timestamp = match date {
                    Some(date_str) => parse_date(&date_str).with_context(|| {
                        format!("Invalid date format '{}'. Use YYYY-MM-DD", date_str)
                    })?,
                    None => Utc::now(),
                };

                let result = service.submit_at(&text, timestamp).await?;
                print_submit_result(&result, verbose);
            }

            Commands::Chat { no_reply } => {
                let mut service = ChatService::connect(&self.database).await?;
                service.set_conversational(!no_reply);
                run_chat_loop(&mut service, verbose).await?;
            }

            Commands::Balance { month, all } => {
                let service = ChatService::connect(&self.database).await?;
                let filter = month_filter(month, all);

                let totals = service.totals(filter.as_deref());
                match &filter {
                    Some(month) => println!("Mês: {}", month),
                    None => println!("Mês: todos"),
                }
                println!("{:<16} {}", "Saldo Total", format_brl(totals.balance));
                println!("{:<16} {}", "Total Entradas", format_brl(totals.total_income));
                println!("{:<16} {}", "Total Saídas", format_brl(totals.total_expense));
            }

            Commands::Log { month, all, limit } => {
                let service = ChatService::connect(&self.database).await?;
                let filter = month_filter(month, all);

                let messages: Vec<&Message> = match filter.as_deref() {
                    Some(month) => service.messages_for_month(month),
                    None => service.messages().iter().collect(),
                };

                if messages.is_empty() {
                    println!("No messages found.");
                } else {
                    let start = limit
                        .map(|n| messages.len().saturating_sub(n))
                        .unwrap_or(0);
                    for message in &messages[start..] {
                        print_message(message);
                    }
                }
            }

            Commands::Months => {
                let service = ChatService::connect(&self.database).await?;
                for month in service.months() {
                    println!("{}", month);
                }
            }

            Commands::Reset => {
                let mut service = ChatService::connect(&self.database).await?;
                let result = service.submit("zerar saldo").await?;
                print_submit_result(&result, verbose);
            }
        }

        Ok(())
    }
}

async fn run_chat_loop(service: &mut ChatService, verbose: bool) -> Result<()> {
    let stdin = io::stdin();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("sair") {
            break;
        }

        let result = service.submit(input).await?;
        print_submit_result(&result, verbose);
    }

    Ok(())
}

fn print_submit_result(result: &SubmitResult, verbose: bool) {
    print_message(&result.message);
    if verbose {
        eprintln!(
            "[classified] kind={} amount={}",
            result.message.kind,
            format_brl(result.message.amount_cents)
        );
    }
    if let Some(reply) = &result.reply {
        print_message(reply);
    }
}

/// Resolve the month filter: explicit month wins, `--all` lifts the filter,
/// otherwise default to the current month (the original default tab).
fn month_filter(month: Option<String>, all: bool) -> Option<String> {
    if all {
        None
    } else {
        month.or_else(|| Some(month_label(Utc::now())))
    }
}

fn print_message(message: &Message) {
    let time = message.timestamp.format("%H:%M");
    if message.kind.moves_balance() && message.amount_cents > 0 {
        println!(
            "{} [{}] {} ({})",
            time,
            message.kind,
            message.text,
            format_brl(message.amount_cents)
        );
    } else {
        println!("{} [{}] {}", time, message.kind, message.text);
    }
}

/// Parse a YYYY-MM-DD date string into a UTC timestamp at midnight.
fn parse_date(date_str: &str) -> Result<chrono::DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .context("Invalid date")?
        .and_hms_opt(0, 0, 0)
        .context("Invalid time")?
        .and_utc();
    Ok(date)
}
