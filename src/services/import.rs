//! CSV import
//!
//! Bank exports are headerless CSV files laid out as
//! `date, description, amount[, anything else...]`. Rows are normalized into
//! [`Transaction`]s, auto-categorized, and stored in the bucket of their own
//! month with duplicate detection.

use std::path::Path;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, info, warn};

use crate::categorizer::Categorizer;
use crate::config::Settings;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Money, MonthKey, Transaction, TransactionType};
use crate::storage::Storage;

const DATE_COLUMN: usize = 0;
const DESCRIPTION_COLUMN: usize = 1;
const AMOUNT_COLUMN: usize = 2;

/// Date formats tried in order; month-first wins over day-first
const DATE_FORMATS: [&str; 9] = [
    "%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y", "%d/%m/%Y", "%Y/%m/%d", "%m-%d-%Y", "%d-%m-%Y",
    "%b %d, %Y", "%d %b %Y",
];

/// A row that could not be turned into a transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based line of the record in the payload
    pub line: u64,
    pub reason: String,
}

/// Result of parsing one CSV payload
#[derive(Debug, Clone, Default)]
pub struct ParsedBatch {
    pub transactions: Vec<Transaction>,
    pub skipped: Vec<SkippedRow>,
}

impl ParsedBatch {
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

/// Parse a date the way bank exports write them
///
/// Timestamps such as `2025-06-01 00:00:00` are cut to their date part.
/// Years outside 1900-2199 are rejected so that two-digit years fall
/// through to the `%y` formats.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let plausible = |d: NaiveDate| {
        use chrono::Datelike;
        (1900..2200).contains(&d.year())
    };

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            if plausible(date) {
                return Some(date);
            }
        }
    }

    // ISO timestamp: keep the leading date
    if s.len() > 10 && s.is_char_boundary(10) {
        if let Ok(date) = NaiveDate::parse_from_str(&s[..10], "%Y-%m-%d") {
            if plausible(date) {
                return Some(date);
            }
        }
    }

    None
}

fn parse_record(
    record: &StringRecord,
    transaction_type: TransactionType,
    categorizer: &Categorizer,
) -> Result<Transaction, String> {
    let date_str = record.get(DATE_COLUMN).unwrap_or("");
    let date = parse_date(date_str).ok_or_else(|| format!("Could not parse date: '{}'", date_str))?;

    let amount_str = record
        .get(AMOUNT_COLUMN)
        .ok_or_else(|| "Missing amount column".to_string())?;
    let amount = Money::parse(amount_str).map_err(|e| e.to_string())?;

    let description = record.get(DESCRIPTION_COLUMN).unwrap_or("").trim().to_string();
    let category = categorizer.categorize(&description);

    Ok(Transaction::new(
        date,
        description,
        amount,
        category,
        transaction_type,
    ))
}

/// Parse a raw CSV payload into categorized transactions
///
/// Blank payloads produce an empty batch. Rows whose date or amount does
/// not parse (including any header row) are dropped and reported in
/// [`ParsedBatch::skipped`].
pub fn parse_csv(
    payload: &str,
    transaction_type: TransactionType,
    categorizer: &Categorizer,
) -> ExpenseResult<ParsedBatch> {
    let payload = payload.trim_start_matches('\u{feff}');
    let mut batch = ParsedBatch::default();
    if payload.trim().is_empty() {
        return Ok(batch);
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .quote(b'"')
        .from_reader(payload.as_bytes());

    for (idx, result) in reader.records().enumerate() {
        let fallback_line = idx as u64 + 1;
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                let line = e
                    .position()
                    .map(|p| p.line())
                    .unwrap_or(fallback_line);
                batch.skipped.push(SkippedRow {
                    line,
                    reason: format!("Error reading CSV record: {}", e),
                });
                continue;
            }
        };

        if record.iter().all(|f| f.is_empty()) {
            continue;
        }

        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(fallback_line);

        match parse_record(&record, transaction_type, categorizer) {
            Ok(txn) => batch.transactions.push(txn),
            Err(reason) => {
                debug!("dropping line {}: {}", line, reason);
                batch.skipped.push(SkippedRow { line, reason });
            }
        }
    }

    Ok(batch)
}

/// Result of a completed import
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    /// Type the rows were imported as
    pub transaction_type: Option<TransactionType>,
    /// Number of transactions stored
    pub imported: usize,
    /// Rows skipped because they were already stored
    pub duplicates_skipped: usize,
    /// Rows that did not parse
    pub skipped: Vec<SkippedRow>,
    /// Months that received new transactions, newest first
    pub months: Vec<MonthKey>,
}

/// Service for CSV import
pub struct ImportService<'a> {
    storage: &'a Storage,
    settings: &'a Settings,
}

impl<'a> ImportService<'a> {
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        Self { storage, settings }
    }

    /// Categorizer over the current memory and configured rules
    pub fn categorizer(&self) -> ExpenseResult<Categorizer> {
        Ok(Categorizer::from_settings(
            self.settings,
            self.storage.memory.get()?,
        ))
    }

    /// Parse without storing anything
    pub fn preview(
        &self,
        payload: &str,
        transaction_type: TransactionType,
    ) -> ExpenseResult<ParsedBatch> {
        parse_csv(payload, transaction_type, &self.categorizer()?)
    }

    /// Parse a payload and store its transactions
    pub fn import_payload(
        &self,
        payload: &str,
        transaction_type: TransactionType,
    ) -> ExpenseResult<ImportResult> {
        let batch = self.preview(payload, transaction_type)?;
        for row in &batch.skipped {
            warn!("skipped line {}: {}", row.line, row.reason);
        }

        let outcome = self.storage.transactions.insert_new(batch.transactions)?;
        if !outcome.inserted.is_empty() {
            self.storage.transactions.save()?;
        }

        let mut months: Vec<MonthKey> = outcome.inserted.iter().map(Transaction::month).collect();
        months.sort_unstable_by(|a, b| b.cmp(a));
        months.dedup();

        info!(
            "imported {} {} transaction(s), {} duplicate(s), {} skipped",
            outcome.inserted.len(),
            transaction_type,
            outcome.duplicates.len(),
            batch.skipped.len()
        );

        Ok(ImportResult {
            transaction_type: Some(transaction_type),
            imported: outcome.inserted.len(),
            duplicates_skipped: outcome.duplicates.len(),
            skipped: batch.skipped,
            months,
        })
    }

    /// Import a CSV file
    ///
    /// Without an explicit type the file name decides: names containing
    /// "credit" are credit exports, anything else is debit.
    pub fn import_file(
        &self,
        path: &Path,
        transaction_type: Option<TransactionType>,
    ) -> ExpenseResult<ImportResult> {
        if !path.exists() {
            return Err(ExpenseError::Import(format!(
                "File not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ExpenseError::Import(format!("Failed to read {}: {}", path.display(), e)))?;

        let transaction_type = transaction_type.unwrap_or_else(|| {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            TransactionType::from_file_name(&name)
        });

        self.import_payload(&content, transaction_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::ExpensePaths;
    use crate::models::CategoryMemory;
    use tempfile::TempDir;

    fn plain() -> Categorizer {
        Categorizer::with_memory(CategoryMemory::new())
    }

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_parse_date_formats() {
        let june1 = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert_eq!(parse_date("2025-06-01"), Some(june1));
        assert_eq!(parse_date("06/01/2025"), Some(june1));
        assert_eq!(parse_date("06/01/25"), Some(june1));
        assert_eq!(parse_date("2025/06/01"), Some(june1));
        assert_eq!(parse_date("Jun 01, 2025"), Some(june1));
        assert_eq!(parse_date("2025-06-01 00:00:00"), Some(june1));
        assert_eq!(parse_date("25/06/2025"), NaiveDate::from_ymd_opt(2025, 6, 25));
        assert_eq!(parse_date("Date"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_blank_payload() {
        let batch = parse_csv("  \n \n", TransactionType::Debit, &plain()).unwrap();
        assert!(batch.is_empty());
        assert!(batch.skipped.is_empty());
    }

    #[test]
    fn test_parse_debit_rows() {
        let csv = "2025-06-01,\"WALMART, STORE #12\",45.20,,1234.00\n\
                   2025-06-03, UBER TRIP ,-12.50\n";
        let batch = parse_csv(csv, TransactionType::Debit, &plain()).unwrap();

        assert_eq!(batch.transactions.len(), 2);
        let first = &batch.transactions[0];
        assert_eq!(first.description, "WALMART, STORE #12");
        assert_eq!(first.amount.cents(), -4520);
        assert_eq!(first.category, "Groceries");
        assert_eq!(first.month().to_string(), "2025-06");
        assert!(first.is_debit());

        let second = &batch.transactions[1];
        assert_eq!(second.description, "UBER TRIP");
        assert_eq!(second.amount.cents(), -1250);
        assert_eq!(second.category, "Public Transportation");
    }

    #[test]
    fn test_credit_keeps_sign() {
        let csv = "06/02/2025,PAYMENT THANK YOU,-300.00\n06/05/2025,NETFLIX.COM,16.99\n";
        let batch = parse_csv(csv, TransactionType::Credit, &plain()).unwrap();

        assert_eq!(batch.transactions[0].amount.cents(), -30000);
        assert_eq!(batch.transactions[1].amount.cents(), 1699);
        assert_eq!(batch.transactions[1].category, "Subscriptions");
        assert!(batch.transactions[1].is_credit());
    }

    #[test]
    fn test_bad_rows_are_skipped() {
        let csv = "Date,Description,Amount\n\
                   not-a-date,COFFEE,3.00\n\
                   2025-06-01,COFFEE,abc\n\
                   2025-06-01,ONLY TWO\n\
                   2025-06-02,STARBUCKS,5.75\n";
        let batch = parse_csv(csv, TransactionType::Debit, &plain()).unwrap();

        assert_eq!(batch.transactions.len(), 1);
        assert_eq!(batch.transactions[0].category, "Dining Out");
        assert_eq!(batch.skipped.len(), 4);
        assert_eq!(batch.skipped[0].line, 1);
        assert_eq!(batch.skipped[3].reason, "Missing amount column");
    }

    #[test]
    fn test_memory_applies_during_parse() {
        let mut memory = CategoryMemory::new();
        memory.set("loblaws store", "Groceries");
        let categorizer = Categorizer::with_memory(memory);

        let batch = parse_csv("2025-06-01,LOBLAWS STORE 1012,80.00", TransactionType::Debit, &categorizer)
            .unwrap();
        assert_eq!(batch.transactions[0].category, "Groceries");
    }

    #[test]
    fn test_import_payload_dedups_and_persists() {
        let (temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let service = ImportService::new(&storage, &settings);

        let csv = "2025-05-31,RENT MAY,1500.00\n2025-06-01,SPOTIFY,11.99\n";
        let first = service.import_payload(csv, TransactionType::Debit).unwrap();
        assert_eq!(first.imported, 2);
        assert_eq!(first.months.len(), 2);
        assert_eq!(first.months[0].to_string(), "2025-06");

        let again = service.import_payload(csv, TransactionType::Debit).unwrap();
        assert_eq!(again.imported, 0);
        assert_eq!(again.duplicates_skipped, 2);

        assert!(temp_dir.path().join("data").join("transactions.json").exists());
    }

    #[test]
    fn test_import_file_detects_type() {
        let (temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let service = ImportService::new(&storage, &settings);

        let path = temp_dir.path().join("june_Credit_card.csv");
        std::fs::write(&path, "\u{feff}2025-06-10,CAFE NERO,4.50\n").unwrap();

        let result = service.import_file(&path, None).unwrap();
        assert_eq!(result.transaction_type, Some(TransactionType::Credit));
        assert_eq!(result.imported, 1);

        let missing = service.import_file(&temp_dir.path().join("nope.csv"), None);
        assert!(matches!(missing, Err(ExpenseError::Import(_))));
    }
}
