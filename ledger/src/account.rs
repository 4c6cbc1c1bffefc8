//! Account holder definitions for the ledger.

use std::fmt;

use qpbank_common::Timestamp;

/// A PIN stored verbatim at account creation.
///
/// The ledger never checks it; the teller may, when configured to.
#[derive(Clone, PartialEq, Eq)]
pub struct Pin(String);

impl Pin {
    /// Wrap a PIN as entered.
    pub fn new(pin: impl Into<String>) -> Self {
        Self(pin.into())
    }

    /// Compare against an attempt, byte for byte.
    pub fn matches(&self, attempt: &str) -> bool {
        self.0 == attempt
    }
}

impl fmt::Debug for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Pin(****)")
    }
}

/// The person who owns a ledger.
#[derive(Debug, Clone)]
pub struct AccountHolder {
    /// Holder name as entered.
    pub name: String,
    /// Stored PIN.
    pub pin: Pin,
    /// When the account was created.
    pub created_at: Timestamp,
}

impl AccountHolder {
    /// Create a new account holder.
    pub fn new(name: impl Into<String>, pin: impl Into<String>, created_at: Timestamp) -> Self {
        Self {
            name: name.into(),
            pin: Pin::new(pin),
            created_at,
        }
    }

    /// Name with the first letter upper-cased and the rest lower-cased,
    /// e.g. `jane doe` becomes `Jane doe`.
    pub fn display_name(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => first
                .to_uppercase()
                .chain(chars.flat_map(char::to_lowercase))
                .collect(),
            None => String::new(),
        }
    }
}
