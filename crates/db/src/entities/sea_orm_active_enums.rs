//! `SeaORM` active enums mapped to PostgreSQL enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle status stored on financial records.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "record_status")]
pub enum RecordStatus {
    /// Newly created, awaiting review.
    #[sea_orm(string_value = "Pending")]
    Pending,
    /// Checked by a reviewer; no longer editable.
    #[sea_orm(string_value = "Reviewed")]
    Reviewed,
    /// Approved; terminal and immutable.
    #[sea_orm(string_value = "Approved")]
    Approved,
}

impl From<RecordStatus> for fiscora_core::workflow::RecordStatus {
    fn from(status: RecordStatus) -> Self {
        match status {
            RecordStatus::Pending => Self::Pending,
            RecordStatus::Reviewed => Self::Reviewed,
            RecordStatus::Approved => Self::Approved,
        }
    }
}

impl From<fiscora_core::workflow::RecordStatus> for RecordStatus {
    fn from(status: fiscora_core::workflow::RecordStatus) -> Self {
        match status {
            fiscora_core::workflow::RecordStatus::Pending => Self::Pending,
            fiscora_core::workflow::RecordStatus::Reviewed => Self::Reviewed,
            fiscora_core::workflow::RecordStatus::Approved => Self::Approved,
        }
    }
}

/// User role stored on user accounts.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_role")]
pub enum UserRole {
    /// Full access across all organizations.
    #[sea_orm(string_value = "admin")]
    Admin,
    /// Can approve reviewed records within their organization.
    #[sea_orm(string_value = "approver")]
    Approver,
    /// Can review pending records within their organization.
    #[sea_orm(string_value = "reviewer")]
    Reviewer,
    /// Can create expenditure, revenue, and cash records.
    #[sea_orm(string_value = "data_entry")]
    DataEntry,
}

impl From<UserRole> for fiscora_core::access::UserRole {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Admin => Self::Admin,
            UserRole::Approver => Self::Approver,
            UserRole::Reviewer => Self::Reviewer,
            UserRole::DataEntry => Self::DataEntry,
        }
    }
}

/// Currency a cash position is held in.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "cash_currency")]
pub enum CashCurrency {
    /// Ghana Cedi
    #[sea_orm(string_value = "GHS")]
    Ghs,
    /// US Dollar
    #[sea_orm(string_value = "USD")]
    Usd,
    /// British Pound
    #[sea_orm(string_value = "GBP")]
    Gbp,
    /// Euro
    #[sea_orm(string_value = "EUR")]
    Eur,
}

impl From<CashCurrency> for fiscora_core::cash::CashCurrency {
    fn from(currency: CashCurrency) -> Self {
        match currency {
            CashCurrency::Ghs => Self::Ghs,
            CashCurrency::Usd => Self::Usd,
            CashCurrency::Gbp => Self::Gbp,
            CashCurrency::Eur => Self::Eur,
        }
    }
}

impl From<fiscora_core::cash::CashCurrency> for CashCurrency {
    fn from(currency: fiscora_core::cash::CashCurrency) -> Self {
        match currency {
            fiscora_core::cash::CashCurrency::Ghs => Self::Ghs,
            fiscora_core::cash::CashCurrency::Usd => Self::Usd,
            fiscora_core::cash::CashCurrency::Gbp => Self::Gbp,
            fiscora_core::cash::CashCurrency::Eur => Self::Eur,
        }
    }
}
