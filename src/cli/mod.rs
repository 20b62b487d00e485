use std::fs::File;
use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::{Parser, Subcommand};

use crate::application::{LedgerStore, TransactionFilter};
use crate::domain::{
    Category, TransactionDraft, TransactionId, TransactionType, format_amount,
    format_relative_date, format_signed, summarize_by_category,
};
use crate::io::{ExportFormat, Exporter};
use crate::storage::{FileStorage, SLOT_KEY, Storage};

/// Tally - Income & Expense Ledger
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Record income and expenses and keep a running balance")]
#[command(version)]
pub struct Cli {
    /// Ledger file path
    #[arg(short, long, default_value_t = format!("{SLOT_KEY}.json"), global = true)]
    pub file: String,

    /// Currency symbol used when printing amounts
    #[arg(long, default_value = "₹", global = true)]
    pub currency: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record a new transaction
    Add {
        /// Amount (e.g., "250.00" or "250")
        amount: String,

        /// What the money was for
        #[arg(short, long)]
        description: String,

        /// Category: food, transport, entertainment, shopping, bills, health, salary, other
        #[arg(short, long)]
        category: String,

        /// Transaction type: income or expense
        #[arg(short = 't', long = "type")]
        kind: String,
    },

    /// List transactions, newest first
    List {
        /// Only show income or expense
        #[arg(short = 't', long = "type")]
        kind: Option<String>,

        /// Only show one category
        #[arg(short, long)]
        category: Option<String>,

        /// Maximum number of transactions to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Delete a transaction by id
    Delete {
        /// Transaction id (as shown by `list`)
        id: TransactionId,
    },

    /// Delete all transactions
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show income, expense and balance totals
    Summary {
        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Category breakdown for income or expense
    Report {
        /// Transaction type: income or expense
        #[arg(short = 't', long = "type", default_value = "expense")]
        kind: String,

        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Export transactions to CSV or JSON
    Export {
        /// Format: csv, json
        format: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let mut store = LedgerStore::load(FileStorage::new(&self.file));
        if let Some(error) = store.persistence_error() {
            eprintln!("Warning: could not load {}: {}", self.file, error);
        }

        match self.command {
            Commands::Add {
                amount,
                description,
                category,
                kind,
            } => {
                let draft = TransactionDraft::parse(&description, &amount, &category, &kind)?;
                let tx = store.add(draft)?;
                println!(
                    "Added {} {} {} ({})",
                    tx.category.emoji(),
                    tx.description,
                    format_signed(tx, &self.currency),
                    tx.id
                );
            }

            Commands::List {
                kind,
                category,
                limit,
            } => {
                let filter = TransactionFilter {
                    kind: kind.as_deref().map(parse_kind).transpose()?,
                    category: category.as_deref().map(parse_category).transpose()?,
                    limit,
                };
                run_list_command(&store, &filter, &self.currency);
            }

            Commands::Delete { id } => match store.remove(id) {
                Some(tx) => println!("Deleted: {} ({})", tx.description, tx.id),
                None => println!("No transaction with id {}", id),
            },

            Commands::Clear { yes } => {
                if store.is_empty() {
                    println!("No transactions to clear.");
                } else if yes || confirm("Are you sure you want to delete all transactions?")? {
                    let count = store.clear();
                    println!("Deleted {} transaction(s)", count);
                } else {
                    println!("Cancelled.");
                }
            }

            Commands::Summary { format } => {
                run_summary_command(&store, &format, &self.currency)?
            }

            Commands::Report { kind, format } => {
                run_report_command(&store, parse_kind(&kind)?, &format, &self.currency)?
            }

            Commands::Export { format, output } => {
                let export_format = ExportFormat::from_str(&format)
                    .with_context(|| format!("Unknown export format '{}'. Use csv or json", format))?;
                let exporter = Exporter::new(store.list());

                let count = match output {
                    Some(path) => {
                        let file = File::create(&path)
                            .with_context(|| format!("Failed to create {}", path))?;
                        exporter.export(export_format, file)?
                    }
                    None => exporter.export(export_format, io::stdout().lock())?,
                };
                eprintln!("Exported {} transaction(s)", count);
            }
        }

        if let Some(error) = store.persistence_error() {
            eprintln!("Warning: changes were not saved: {}", error);
        }

        Ok(())
    }
}

fn parse_kind(s: &str) -> Result<TransactionType> {
    TransactionType::from_str(s)
        .with_context(|| format!("Unknown type '{}'. Use income or expense", s))
}

fn parse_category(s: &str) -> Result<Category> {
    match Category::from_str(s) {
        Some(category) => Ok(category),
        None => {
            let known: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
            bail!("Unknown category '{}'. Use one of: {}", s, known.join(", "))
        }
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn run_list_command<S: Storage>(
    store: &LedgerStore<S>,
    filter: &TransactionFilter,
    currency: &str,
) {
    let transactions = store.filter(filter);
    if transactions.is_empty() {
        println!("No transactions yet");
        println!("Start by adding your first transaction!");
        return;
    }

    let now = Utc::now();
    println!(
        "{:<14} {:<30} {:<24} {:>14}",
        "ID", "DESCRIPTION", "CATEGORY", "AMOUNT"
    );
    println!("{}", "-".repeat(85));
    for tx in transactions {
        println!(
            "{:<14} {:<30} {:<24} {:>14}",
            tx.id,
            format!("{} {}", tx.category.emoji(), tx.description),
            format!("{} • {}", tx.category.label(), format_relative_date(tx.date, now)),
            format_signed(tx, currency)
        );
    }
}

fn run_summary_command<S: Storage>(
    store: &LedgerStore<S>,
    format: &str,
    currency: &str,
) -> Result<()> {
    let summary = store.summary();
    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
            return Ok(());
        }
        "table" => {}
        other => bail!("Unknown output format '{}'. Use table or json", other),
    }

    println!("Total Income:   {:>15}", format_amount(summary.income, currency));
    println!("Total Expense:  {:>15}", format_amount(summary.expense, currency));
    println!("{}", "-".repeat(32));
    println!(
        "Balance:        {:>15}{}",
        format_amount(summary.balance, currency),
        if summary.is_negative() { "  (overspent)" } else { "" }
    );
    Ok(())
}

fn run_report_command<S: Storage>(
    store: &LedgerStore<S>,
    kind: TransactionType,
    format: &str,
    currency: &str,
) -> Result<()> {
    let breakdown = summarize_by_category(store.list(), kind);
    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&breakdown)?);
            return Ok(());
        }
        "table" => {}
        other => bail!("Unknown output format '{}'. Use table or json", other),
    }

    if breakdown.is_empty() {
        println!("No {} transactions.", kind);
        return Ok(());
    }

    println!(
        "{:<20} {:>14} {:>8} {:>8}",
        "CATEGORY", "TOTAL", "COUNT", "SHARE"
    );
    println!("{}", "-".repeat(53));
    for entry in &breakdown {
        println!(
            "{:<20} {:>14} {:>8} {:>7.1}%",
            format!("{} {}", entry.category.emoji(), entry.category.label()),
            format_amount(entry.total, currency),
            entry.count,
            entry.percentage
        );
    }
    println!("{}", "-".repeat(53));
    let total = breakdown
        .iter()
        .fold(0, |sum: i64, e| sum.saturating_add(e.total));
    println!("{:<20} {:>14}", "TOTAL", format_amount(total, currency));
    Ok(())
}
