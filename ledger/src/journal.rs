//! Append-only transaction journal.

use qpbank_common::{Dollars, RecordId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Type of journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Money added to one account.
    Deposit,
    /// Money taken out of one account.
    Withdrawal,
    /// Money moved between checking and savings.
    Transfer,
}

impl TransactionKind {
    /// Capitalized name used in messages and history lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "Deposit",
            TransactionKind::Withdrawal => "Withdrawal",
            TransactionKind::Transfer => "Transfer",
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single immutable entry in the journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Unique entry ID.
    pub id: RecordId,
    /// When the mutation happened.
    pub timestamp: Timestamp,
    /// Entry type.
    pub kind: TransactionKind,
    /// Amount moved.
    pub amount: Decimal,
    /// Affected account(s), e.g. `Savings Account from Checking Account`.
    pub description: String,
}

impl TransactionRecord {
    /// One-line summary, e.g. `Deposit $100.00 - Checking Account`.
    pub fn detail(&self) -> String {
        format!("{} {} - {}", self.kind, Dollars(self.amount), self.description)
    }
}

/// Ordered log of records, oldest first.
///
/// Records can only be appended; nothing is ever edited or removed.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    records: Vec<TransactionRecord>,
}

impl Journal {
    /// Create an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record and return it.
    ///
    /// `timestamp` is clamped so it never precedes the previous record.
    pub fn append(
        &mut self,
        kind: TransactionKind,
        amount: Decimal,
        description: impl Into<String>,
        timestamp: Timestamp,
    ) -> &TransactionRecord {
        let timestamp = match self.last_timestamp() {
            Some(last) if last > timestamp => last,
            _ => timestamp,
        };

        self.records.push(TransactionRecord {
            id: RecordId::new(),
            timestamp,
            kind,
            amount,
            description: description.into(),
        });

        &self.records[self.records.len() - 1]
    }

    /// All records in recording order.
    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    /// Timestamp of the newest record.
    pub fn last_timestamp(&self) -> Option<Timestamp> {
        self.records.last().map(|r| r.timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn test_append_keeps_order() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let mut journal = Journal::new();

        journal.append(TransactionKind::Deposit, Decimal::from(100), "Checking Account", start);
        journal.append(TransactionKind::Withdrawal, Decimal::from(30), "Checking Account", start);

        assert_eq!(journal.records().len(), 2);
        let kinds: Vec<_> = journal.records().iter().map(|r| r.kind).collect();
        assert_eq!(kinds, vec![TransactionKind::Deposit, TransactionKind::Withdrawal]);
    }

    #[test]
    fn test_same_second_records_do_not_collide() {
        let instant = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let mut journal = Journal::new();

        for _ in 0..5 {
            journal.append(TransactionKind::Deposit, Decimal::ONE, "Savings Account", instant);
        }

        assert_eq!(journal.records().len(), 5);
        assert!(journal.records().iter().all(|r| r.timestamp == instant));
    }

    #[test]
    fn test_timestamp_clamped_when_clock_steps_back() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let mut journal = Journal::new();

        journal.append(TransactionKind::Deposit, Decimal::ONE, "Checking Account", start);
        let record = journal.append(
            TransactionKind::Deposit,
            Decimal::ONE,
            "Checking Account",
            start - Duration::seconds(30),
        );

        assert_eq!(record.timestamp, start);
    }

    #[test]
    fn test_record_detail() {
        let mut journal = Journal::new();
        let record = journal.append(
            TransactionKind::Transfer,
            Decimal::from(20),
            "Savings Account from Checking Account",
            Utc::now(),
        );
        assert_eq!(
            record.detail(),
            "Transfer $20.00 - Savings Account from Checking Account"
        );
    }

    #[test]
    fn test_record_serializes() {
        let mut journal = Journal::new();
        journal.append(TransactionKind::Deposit, Decimal::new(1050, 2), "Checking Account", Utc::now());

        let json = serde_json::to_value(&journal.records()[0]).unwrap();
        assert_eq!(json["kind"], "Deposit");
        assert_eq!(json["amount"], "10.50");
        assert_eq!(json["description"], "Checking Account");
    }
}
