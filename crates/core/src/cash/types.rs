//! Cash position domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Currencies a cash position can be held in.
///
/// Balances are kept per currency and never converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CashCurrency {
    /// Ghana Cedi
    Ghs,
    /// US Dollar
    Usd,
    /// British Pound
    Gbp,
    /// Euro
    Eur,
}

impl CashCurrency {
    /// Parses a currency code.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "GHS" => Some(Self::Ghs),
            "USD" => Some(Self::Usd),
            "GBP" => Some(Self::Gbp),
            "EUR" => Some(Self::Eur),
            _ => None,
        }
    }

    /// Returns the currency code.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ghs => "GHS",
            Self::Usd => "USD",
            Self::Gbp => "GBP",
            Self::Eur => "EUR",
        }
    }
}

impl std::fmt::Display for CashCurrency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One raw per-currency balance snapshot row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CashBalance {
    /// Bank account name.
    pub account_name: String,
    /// Currency the balance is held in.
    pub currency: CashCurrency,
    /// Snapshot balance.
    pub balance: Decimal,
}

/// One grouped report row: an account with its four currency columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashAccountRow {
    /// Bank account name.
    pub account_name: String,
    /// Ghana Cedi balance.
    pub ghs: Decimal,
    /// US Dollar balance.
    pub usd: Decimal,
    /// British Pound balance.
    pub gbp: Decimal,
    /// Euro balance.
    pub eur: Decimal,
}

impl CashAccountRow {
    /// A zeroed row for the given account.
    #[must_use]
    pub fn zeroed(account_name: impl Into<String>) -> Self {
        Self {
            account_name: account_name.into(),
            ghs: Decimal::ZERO,
            usd: Decimal::ZERO,
            gbp: Decimal::ZERO,
            eur: Decimal::ZERO,
        }
    }

    /// Adds a balance into the matching currency column.
    pub fn accumulate(&mut self, currency: CashCurrency, balance: Decimal) {
        match currency {
            CashCurrency::Ghs => self.ghs += balance,
            CashCurrency::Usd => self.usd += balance,
            CashCurrency::Gbp => self.gbp += balance,
            CashCurrency::Eur => self.eur += balance,
        }
    }
}

/// Grand-total row over every account, one column per currency.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashTotals {
    /// Total Ghana Cedi.
    pub ghs: Decimal,
    /// Total US Dollar.
    pub usd: Decimal,
    /// Total British Pound.
    pub gbp: Decimal,
    /// Total Euro.
    pub eur: Decimal,
}
