//! Transaction model
//!
//! A single normalized bank row: date, description, amount, category and
//! whether it came from a credit or a debit export.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::TransactionId;
use super::money::Money;
use super::month::MonthKey;

/// Which kind of bank export a transaction came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TransactionType {
    Credit,
    Debit,
}

impl TransactionType {
    /// Infer the type from an uploaded file's name
    ///
    /// Names containing "credit" (any case) are credit exports; everything
    /// else is treated as debit.
    pub fn from_file_name(name: &str) -> Self {
        if name.to_lowercase().contains("credit") {
            Self::Credit
        } else {
            Self::Debit
        }
    }

    /// Apply the sign convention for this type
    ///
    /// Debit amounts are always stored as outflows; credit amounts keep the
    /// sign the bank wrote.
    pub fn normalize_amount(&self, amount: Money) -> Money {
        match self {
            Self::Credit => amount,
            Self::Debit => -amount.abs(),
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Credit => write!(f, "Credit"),
            Self::Debit => write!(f, "Debit"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "credit" => Ok(Self::Credit),
            "debit" => Ok(Self::Debit),
            other => Err(format!("Unknown transaction type '{}', expected credit or debit", other)),
        }
    }
}

/// A stored transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Transaction date
    pub date: NaiveDate,

    /// Bank description text
    pub description: String,

    /// Amount (debits are negative)
    pub amount: Money,

    /// Assigned category name
    pub category: String,

    /// Credit or debit export
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
}

impl Transaction {
    /// Create a new transaction, applying the sign convention of its type
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        amount: Money,
        category: impl Into<String>,
        transaction_type: TransactionType,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            date,
            description: description.into(),
            amount: transaction_type.normalize_amount(amount),
            category: category.into(),
            transaction_type,
        }
    }

    /// The month bucket this transaction belongs to
    pub fn month(&self) -> MonthKey {
        MonthKey::from_date(self.date)
    }

    pub fn is_debit(&self) -> bool {
        self.transaction_type == TransactionType::Debit
    }

    pub fn is_credit(&self) -> bool {
        self.transaction_type == TransactionType::Credit
    }

    /// Same bank row as another transaction, ignoring id and category
    pub fn same_row_as(&self, other: &Transaction) -> bool {
        self.date == other.date
            && self.amount == other.amount
            && self.transaction_type == other.transaction_type
            && self.description.trim() == other.description.trim()
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} [{}]",
            self.date, self.description, self.amount, self.category
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_type_from_file_name() {
        assert_eq!(TransactionType::from_file_name("Visa_CREDIT_june.csv"), TransactionType::Credit);
        assert_eq!(TransactionType::from_file_name("chequing.csv"), TransactionType::Debit);
        assert_eq!(TransactionType::from_file_name("debit.csv"), TransactionType::Debit);
    }

    #[test]
    fn test_debit_amounts_are_negative() {
        let txn = Transaction::new(
            date(2025, 6, 3),
            "WALMART",
            Money::from_cents(4520),
            "Groceries",
            TransactionType::Debit,
        );
        assert_eq!(txn.amount.cents(), -4520);

        let already_negative = Transaction::new(
            date(2025, 6, 3),
            "WALMART",
            Money::from_cents(-4520),
            "Groceries",
            TransactionType::Debit,
        );
        assert_eq!(already_negative.amount.cents(), -4520);
    }

    #[test]
    fn test_credit_amount_keeps_sign() {
        let refund = Transaction::new(
            date(2025, 6, 3),
            "REFUND",
            Money::from_cents(-1000),
            "Other",
            TransactionType::Credit,
        );
        assert_eq!(refund.amount.cents(), -1000);
    }

    #[test]
    fn test_month() {
        let txn = Transaction::new(
            date(2025, 1, 31),
            "x",
            Money::zero(),
            "Other",
            TransactionType::Credit,
        );
        assert_eq!(txn.month().to_string(), "2025-01");
    }

    #[test]
    fn test_same_row_ignores_id_and_category() {
        let a = Transaction::new(date(2025, 6, 1), "UBER TRIP", Money::from_cents(1200), "Other", TransactionType::Debit);
        let mut b = a.clone();
        b.id = TransactionId::new();
        b.category = "Public Transportation".into();
        assert!(a.same_row_as(&b));

        b.amount = Money::from_cents(-1300);
        assert!(!a.same_row_as(&b));
    }

    #[test]
    fn test_serialization_uses_type_key() {
        let txn = Transaction::new(date(2025, 6, 1), "x", Money::from_cents(100), "Other", TransactionType::Credit);
        let json = serde_json::to_value(&txn).unwrap();
        assert_eq!(json["type"], "Credit");
        assert_eq!(json["date"], "2025-06-01");
        assert_eq!(json["amount"], 100);
    }

    #[test]
    fn test_type_from_str() {
        assert_eq!("CREDIT".parse::<TransactionType>().unwrap(), TransactionType::Credit);
        assert!("savings".parse::<TransactionType>().is_err());
    }
}
