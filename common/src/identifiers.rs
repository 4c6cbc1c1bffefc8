//! Identifier types for accounts, transfer routes and journal records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::BankError;

/// Unique identifier for a transaction record.
/// Uses UUID v7 for time-ordered identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Create a new record ID.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of the two sub-balances held by a ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    /// Checking account.
    Checking,
    /// Savings account.
    Savings,
}

impl AccountKind {
    /// Selector string accepted from the shell.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Checking => "checking",
            AccountKind::Savings => "savings",
        }
    }

    /// Short capitalized name, e.g. `Checking`.
    pub fn title(&self) -> &'static str {
        match self {
            AccountKind::Checking => "Checking",
            AccountKind::Savings => "Savings",
        }
    }

    /// Label used in journal descriptions, e.g. `Checking Account`.
    pub fn label(&self) -> &'static str {
        match self {
            AccountKind::Checking => "Checking Account",
            AccountKind::Savings => "Savings Account",
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AccountKind {
    type Err = BankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let selector = s.trim();
        if selector.eq_ignore_ascii_case("checking") {
            Ok(AccountKind::Checking)
        } else if selector.eq_ignore_ascii_case("savings") {
            Ok(AccountKind::Savings)
        } else {
            Err(BankError::InvalidAccountSelector(selector.to_string()))
        }
    }
}

/// An ordered pair of distinct accounts that funds move between.
///
/// Only `checking -> savings` and `savings -> checking` exist; a route can
/// never name the same account twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TransferRoute {
    from: AccountKind,
    to: AccountKind,
}

impl TransferRoute {
    /// Build a route, rejecting same-account pairs.
    pub fn new(from: AccountKind, to: AccountKind) -> Result<Self, BankError> {
        if from == to {
            return Err(BankError::InvalidAccountPair {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        Ok(Self { from, to })
    }

    /// Parse a route from two selector strings.
    ///
    /// Any unrecognized selector is reported as an invalid pair rather than
    /// an invalid selector.
    pub fn parse(from: &str, to: &str) -> Result<Self, BankError> {
        let invalid = || BankError::InvalidAccountPair {
            from: from.trim().to_string(),
            to: to.trim().to_string(),
        };

        let from_kind = from.parse::<AccountKind>().map_err(|_| invalid())?;
        let to_kind = to.parse::<AccountKind>().map_err(|_| invalid())?;
        Self::new(from_kind, to_kind)
    }

    /// Source account.
    pub fn from(&self) -> AccountKind {
        self.from
    }

    /// Destination account.
    pub fn to(&self) -> AccountKind {
        self.to
    }

    /// Journal description, e.g. `Savings Account from Checking Account`.
    pub fn description(&self) -> String {
        format!("{} from {}", self.to.label(), self.from.label())
    }
}

impl fmt::Display for TransferRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.from, self.to)
    }
}
