use std::io::Write;

use anyhow::{Context, Result};

use crate::domain::{Transaction, format_cents};

/// Output formats supported by [`Exporter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Some(ExportFormat::Csv),
            "json" => Some(ExportFormat::Json),
            _ => None,
        }
    }
}

/// Exporter for writing ledger data out in various formats
pub struct Exporter<'a> {
    transactions: &'a [Transaction],
}

impl<'a> Exporter<'a> {
    pub fn new(transactions: &'a [Transaction]) -> Self {
        Self { transactions }
    }

    pub fn export<W: Write>(&self, format: ExportFormat, writer: W) -> Result<usize> {
        match format {
            ExportFormat::Csv => self.export_csv(writer),
            ExportFormat::Json => self.export_json(writer),
        }
    }

    /// Export transactions to CSV, newest first. Amounts are plain decimals.
    pub fn export_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["id", "date", "description", "category", "type", "amount"])?;

        for tx in self.transactions {
            csv_writer.write_record([
                tx.id.to_string(),
                tx.date.to_rfc3339(),
                tx.description.clone(),
                tx.category.as_str().to_string(),
                tx.kind.as_str().to_string(),
                format_cents(tx.amount_cents),
            ])?;
        }

        csv_writer.flush().context("Failed to flush CSV output")?;
        Ok(self.transactions.len())
    }

    /// Export transactions as pretty-printed JSON in the persisted shape.
    pub fn export_json<W: Write>(&self, mut writer: W) -> Result<usize> {
        serde_json::to_writer_pretty(&mut writer, self.transactions)
            .context("Failed to serialize transactions")?;
        writeln!(writer)?;
        Ok(self.transactions.len())
    }
}
