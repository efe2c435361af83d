//! Cash position repository for cash database operations.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, Set, SqlErr,
};
use uuid::Uuid;

use fiscora_core::access::{Caller, OrgScope};
use fiscora_core::cash::{CashAccountRow, CashBalance, CashCurrency, CashService, CashTotals};
use fiscora_core::workflow::{RecordStatus, WorkflowError, WorkflowService};
use fiscora_shared::AppError;

use crate::entities::{
    cash_positions,
    sea_orm_active_enums::{CashCurrency as DbCashCurrency, RecordStatus as DbRecordStatus},
};

/// Error types for cash position operations.
#[derive(Debug, thiserror::Error)]
pub enum CashError {
    /// A required field is missing or empty.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// A snapshot already exists for this account, currency, and date.
    #[error("Cash position already exists for this account, currency, and date")]
    DuplicatePosition,

    /// A lifecycle transition was rejected.
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// Cash position record not found.
    #[error("Cash position record not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<CashError> for AppError {
    fn from(err: CashError) -> Self {
        match err {
            CashError::MissingField(_) => Self::Validation(err.to_string()),
            CashError::DuplicatePosition => Self::Conflict(err.to_string()),
            CashError::NotFound(_) => Self::NotFound(err.to_string()),
            CashError::Workflow(ref inner) => match inner {
                WorkflowError::AlreadyReviewed(_) | WorkflowError::AlreadyApproved => {
                    Self::Conflict(err.to_string())
                }
                WorkflowError::ImmutableRecord(_) => Self::BusinessRule(err.to_string()),
                WorkflowError::NotRecordOwner => Self::Forbidden(err.to_string()),
            },
            CashError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Input for creating a cash position snapshot.
#[derive(Debug, Clone)]
pub struct CreateCashPositionInput {
    /// Snapshot date.
    pub as_at_date: NaiveDate,
    /// Bank account name.
    pub account_name: String,
    /// Currency the balance is held in.
    pub currency: CashCurrency,
    /// Snapshot balance.
    pub balance: Decimal,
}

/// Cash position report: one row per account plus currency totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CashPositionReport {
    /// Grouped account rows in account-name order.
    pub accounts: Vec<CashAccountRow>,
    /// Grand totals per currency.
    pub totals: CashTotals,
}

/// Cash position repository.
#[derive(Debug, Clone)]
pub struct CashRepository {
    db: DatabaseConnection,
}

impl CashRepository {
    /// Creates a new cash position repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates one cash position snapshot for the caller's organization.
    ///
    /// # Errors
    ///
    /// Returns a duplicate error when a snapshot already exists for the
    /// (organization, date, account, currency) tuple.
    pub async fn create(
        &self,
        input: CreateCashPositionInput,
        caller: &Caller,
    ) -> Result<cash_positions::Model, CashError> {
        if input.account_name.trim().is_empty() {
            return Err(CashError::MissingField("accountName"));
        }

        let now = Utc::now().into();
        let model = cash_positions::ActiveModel {
            id: Set(Uuid::new_v4()),
            organization: Set(caller.organization.clone()),
            as_at_date: Set(input.as_at_date),
            account_name: Set(input.account_name),
            currency: Set(DbCashCurrency::from(input.currency)),
            balance: Set(input.balance),
            status: Set(DbRecordStatus::Pending),
            reviewed_by: Set(None),
            reviewed_at: Set(None),
            review_comment: Set(None),
            approved_by: Set(None),
            approved_at: Set(None),
            created_by: Set(caller.id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        model.insert(&self.db).await.map_err(|err| {
            if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                CashError::DuplicatePosition
            } else {
                CashError::Database(err)
            }
        })
    }

    /// Builds the cash position report for one snapshot date.
    ///
    /// Raw per-currency rows are grouped into one row per account with
    /// the four fixed currency columns, plus a grand-total row.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn position_report(
        &self,
        as_at_date: NaiveDate,
        scope: &OrgScope,
    ) -> Result<CashPositionReport, DbErr> {
        let mut query = cash_positions::Entity::find()
            .filter(cash_positions::Column::AsAtDate.eq(as_at_date))
            .order_by_asc(cash_positions::Column::AccountName);

        if let Some(organization) = &scope.organization {
            query = query.filter(cash_positions::Column::Organization.eq(organization));
        }

        let raw: Vec<CashBalance> = query
            .all(&self.db)
            .await?
            .into_iter()
            .map(|model| CashBalance {
                account_name: model.account_name,
                currency: model.currency.into(),
                balance: model.balance,
            })
            .collect();

        let accounts = CashService::group_positions(&raw);
        let totals = CashService::position_totals(&accounts);

        Ok(CashPositionReport { accounts, totals })
    }

    /// Marks a pending cash position as reviewed.
    ///
    /// # Errors
    ///
    /// Returns a workflow error when the record was already reviewed or
    /// approved.
    pub async fn review(
        &self,
        id: Uuid,
        caller: &Caller,
        comment: Option<String>,
    ) -> Result<cash_positions::Model, CashError> {
        let record = cash_positions::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(CashError::NotFound(id))?;

        let status: RecordStatus = record.status.clone().into();
        let stamp = WorkflowService::review(status, &caller.name, comment)?;

        let mut active = record.into_active_model();
        active.status = Set(DbRecordStatus::Reviewed);
        active.reviewed_by = Set(Some(stamp.reviewed_by));
        active.reviewed_at = Set(Some(stamp.reviewed_at.into()));
        active.review_comment = Set(stamp.comment);
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Approves a pending or reviewed cash position.
    ///
    /// # Errors
    ///
    /// Returns a workflow error when the record was already approved.
    pub async fn approve(
        &self,
        id: Uuid,
        caller: &Caller,
    ) -> Result<cash_positions::Model, CashError> {
        let record = cash_positions::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(CashError::NotFound(id))?;

        let status: RecordStatus = record.status.clone().into();
        let stamp = WorkflowService::approve(status, &caller.name)?;

        let mut active = record.into_active_model();
        active.status = Set(DbRecordStatus::Approved);
        active.approved_by = Set(Some(stamp.approved_by));
        active.approved_at = Set(Some(stamp.approved_at.into()));
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Deletes a pending cash position.
    ///
    /// # Errors
    ///
    /// Returns a workflow error for reviewed/approved records or
    /// non-owner callers.
    pub async fn delete(&self, id: Uuid, caller: &Caller) -> Result<(), CashError> {
        let record = cash_positions::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(CashError::NotFound(id))?;

        WorkflowService::ensure_can_modify(record.created_by, caller.id, caller.role)?;
        WorkflowService::ensure_editable(record.status.clone().into())?;

        cash_positions::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_mapping_to_app_error() {
        assert_eq!(
            AppError::from(CashError::DuplicatePosition).error_code(),
            "CONFLICT"
        );
        assert_eq!(
            AppError::from(CashError::MissingField("accountName")).error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(
            AppError::from(CashError::Workflow(WorkflowError::AlreadyApproved)).error_code(),
            "CONFLICT"
        );
    }
}
