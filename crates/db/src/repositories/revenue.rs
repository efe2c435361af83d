//! Revenue repository for revenue database operations.
//!
//! Retention and consolidated-fund payment amounts are derived
//! server-side from the organization's configured retention rate; the
//! caller can never set them directly.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, QuerySelect, Set, SqlErr,
};
use uuid::Uuid;

use fiscora_core::access::{Caller, OrgScope, UserRole};
use fiscora_core::fiscal::Quarter;
use fiscora_core::revenue::{
    RetentionTable, RevenueAggregate, RevenueError, RevenueReportRow, RevenueReportTotals,
    RevenueService,
};
use fiscora_core::workflow::{RecordStatus, WorkflowError, WorkflowService};
use fiscora_shared::AppError;

use crate::entities::{revenues, sea_orm_active_enums::RecordStatus as DbRecordStatus};

/// Error types for revenue operations.
#[derive(Debug, thiserror::Error)]
pub enum RevenueRepositoryError {
    /// A required field is missing or empty.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// No retention rate configured for the caller's organization.
    #[error("Retention rate not configured for this organization")]
    RateNotConfigured,

    /// A revenue record already exists for this date and category.
    #[error("Revenue record already exists for this date and category")]
    DuplicateRecord,

    /// The retention computation rejected the inputs.
    #[error(transparent)]
    Computation(#[from] RevenueError),

    /// A lifecycle transition was rejected.
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// Revenue record not found.
    #[error("Revenue record not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<RevenueRepositoryError> for AppError {
    fn from(err: RevenueRepositoryError) -> Self {
        match err {
            RevenueRepositoryError::MissingField(_)
            | RevenueRepositoryError::RateNotConfigured
            | RevenueRepositoryError::Computation(_) => Self::Validation(err.to_string()),
            RevenueRepositoryError::DuplicateRecord => Self::Conflict(err.to_string()),
            RevenueRepositoryError::NotFound(_) => Self::NotFound(err.to_string()),
            RevenueRepositoryError::Workflow(ref inner) => match inner {
                WorkflowError::AlreadyReviewed(_) | WorkflowError::AlreadyApproved => {
                    Self::Conflict(err.to_string())
                }
                WorkflowError::ImmutableRecord(_) => Self::BusinessRule(err.to_string()),
                WorkflowError::NotRecordOwner => Self::Forbidden(err.to_string()),
            },
            RevenueRepositoryError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Input for creating a revenue record.
#[derive(Debug, Clone)]
pub struct CreateRevenueInput {
    /// Collection date.
    pub date: NaiveDate,
    /// Revenue category.
    pub category: String,
    /// Actual collection amount.
    pub actual_collection: Decimal,
    /// Budget projection for the category.
    pub budget_projection: Decimal,
    /// Optional remarks.
    pub remarks: Option<String>,
}

/// Input for updating a pending revenue record.
#[derive(Debug, Clone, Default)]
pub struct UpdateRevenueInput {
    /// New collection date.
    pub date: Option<NaiveDate>,
    /// New category.
    pub category: Option<String>,
    /// New actual collection; triggers a retention recomputation.
    pub actual_collection: Option<Decimal>,
    /// New remarks.
    pub remarks: Option<Option<String>>,
}

/// Quarterly revenue report: grouped rows plus footer totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevenueReport {
    /// Rows in presentation shape, one per category.
    pub rows: Vec<RevenueReportRow>,
    /// Footer totals.
    pub totals: RevenueReportTotals,
}

/// Revenue repository.
#[derive(Debug, Clone)]
pub struct RevenueRepository {
    db: DatabaseConnection,
    retention: RetentionTable,
}

impl RevenueRepository {
    /// Creates a new revenue repository with the retention-rate table.
    #[must_use]
    pub const fn new(db: DatabaseConnection, retention: RetentionTable) -> Self {
        Self { db, retention }
    }

    /// Creates one revenue record for the caller's organization.
    ///
    /// The retention rate is looked up from the configured table and
    /// copied onto the record; retention and payment amounts are
    /// derived from it.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the category is empty or no rate
    /// is configured, and a duplicate error for an existing
    /// (organization, date, category) record.
    pub async fn create(
        &self,
        input: CreateRevenueInput,
        caller: &Caller,
    ) -> Result<revenues::Model, RevenueRepositoryError> {
        if input.category.trim().is_empty() {
            return Err(RevenueRepositoryError::MissingField("revenueCategory"));
        }

        let rate = self
            .retention
            .rate_for(&caller.organization)
            .ok_or(RevenueRepositoryError::RateNotConfigured)?;

        let existing = revenues::Entity::find()
            .filter(revenues::Column::Organization.eq(&caller.organization))
            .filter(revenues::Column::Date.eq(input.date))
            .filter(revenues::Column::Category.eq(&input.category))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(RevenueRepositoryError::DuplicateRecord);
        }

        let split = RevenueService::split_collection(input.actual_collection, rate)?;

        let now = Utc::now().into();
        let model = revenues::ActiveModel {
            id: Set(Uuid::new_v4()),
            organization: Set(caller.organization.clone()),
            date: Set(input.date),
            category: Set(input.category),
            retention_rate: Set(rate),
            actual_collection: Set(input.actual_collection),
            budget_projection: Set(input.budget_projection),
            retention_amount: Set(split.retention_amount),
            payment_amount: Set(split.payment_amount),
            remarks: Set(input.remarks),
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
                RevenueRepositoryError::DuplicateRecord
            } else {
                RevenueRepositoryError::Database(err)
            }
        })
    }

    /// Lists revenue records within the resolved scope, newest first.
    ///
    /// Data-entry users only see their own records.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        scope: &OrgScope,
        caller: &Caller,
    ) -> Result<Vec<revenues::Model>, DbErr> {
        let mut query =
            revenues::Entity::find().order_by_desc(revenues::Column::CreatedAt);

        if let Some(organization) = &scope.organization {
            query = query.filter(revenues::Column::Organization.eq(organization));
        }
        if caller.role == UserRole::DataEntry {
            query = query.filter(revenues::Column::CreatedBy.eq(caller.id));
        }

        query.all(&self.db).await
    }

    /// Updates a pending revenue record.
    ///
    /// Derived fields are always recomputed from the stored retention
    /// rate when the collection changes; caller-supplied retention or
    /// payment amounts are never accepted.
    ///
    /// # Errors
    ///
    /// Returns a workflow error once the record is reviewed/approved or
    /// when the caller is neither creator nor admin.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateRevenueInput,
        caller: &Caller,
    ) -> Result<revenues::Model, RevenueRepositoryError> {
        let record = revenues::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(RevenueRepositoryError::NotFound(id))?;

        WorkflowService::ensure_can_modify(record.created_by, caller.id, caller.role)?;
        WorkflowService::ensure_editable(record.status.clone().into())?;

        let rate = record.retention_rate;
        let mut active = record.into_active_model();

        if let Some(date) = input.date {
            active.date = Set(date);
        }
        if let Some(category) = input.category {
            active.category = Set(category);
        }
        if let Some(remarks) = input.remarks {
            active.remarks = Set(remarks);
        }
        if let Some(collection) = input.actual_collection {
            let split = RevenueService::split_collection(collection, rate)?;
            active.actual_collection = Set(collection);
            active.retention_amount = Set(split.retention_amount);
            active.payment_amount = Set(split.payment_amount);
        }
        active.updated_at = Set(Utc::now().into());

        active.update(&self.db).await.map_err(|err| {
            if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                RevenueRepositoryError::DuplicateRecord
            } else {
                RevenueRepositoryError::Database(err)
            }
        })
    }

    /// Deletes a pending revenue record.
    ///
    /// # Errors
    ///
    /// Returns a workflow error once the record is reviewed/approved or
    /// when the caller is neither creator nor admin.
    pub async fn delete(&self, id: Uuid, caller: &Caller) -> Result<(), RevenueRepositoryError> {
        let record = revenues::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(RevenueRepositoryError::NotFound(id))?;

        WorkflowService::ensure_can_modify(record.created_by, caller.id, caller.role)?;
        WorkflowService::ensure_editable(record.status.clone().into())?;

        revenues::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }

    /// Marks a pending revenue record as reviewed.
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
    ) -> Result<revenues::Model, RevenueRepositoryError> {
        let record = revenues::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(RevenueRepositoryError::NotFound(id))?;

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

    /// Approves a pending or reviewed revenue record.
    ///
    /// # Errors
    ///
    /// Returns a workflow error when the record was already approved.
    pub async fn approve(
        &self,
        id: Uuid,
        caller: &Caller,
    ) -> Result<revenues::Model, RevenueRepositoryError> {
        let record = revenues::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(RevenueRepositoryError::NotFound(id))?;

        let status: RecordStatus = record.status.clone().into();
        let stamp = WorkflowService::approve(status, &caller.name)?;

        let mut active = record.into_active_model();
        active.status = Set(DbRecordStatus::Approved);
        active.approved_by = Set(Some(stamp.approved_by));
        active.approved_at = Set(Some(stamp.approved_at.into()));
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Builds the quarterly revenue report: records are summed per
    /// category (case-insensitive), reshaped into presentation rows,
    /// and totalled.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn revenue_summary(
        &self,
        scope: &OrgScope,
        year: i32,
        quarter: Quarter,
    ) -> Result<RevenueReport, DbErr> {
        let (start, end) = quarter.date_range(year);

        // categories are grouped case-insensitively
        let lowered: SimpleExpr = Func::lower(Expr::col(revenues::Column::Category)).into();

        let mut query = revenues::Entity::find()
            .select_only()
            .column_as(lowered.clone(), "category")
            .column_as(revenues::Column::ActualCollection.sum(), "total_actual")
            .column_as(revenues::Column::PaymentAmount.sum(), "total_payment")
            .column_as(revenues::Column::RetentionAmount.sum(), "total_retention")
            .column_as(revenues::Column::Remarks.max(), "remarks")
            .filter(revenues::Column::Date.between(start, end))
            .group_by(lowered);

        if let Some(organization) = &scope.organization {
            query = query.filter(revenues::Column::Organization.eq(organization));
        }

        let raw: Vec<(
            String,
            Option<Decimal>,
            Option<Decimal>,
            Option<Decimal>,
            Option<String>,
        )> = query.into_tuple().all(&self.db).await?;

        let aggregates: Vec<RevenueAggregate> = raw
            .into_iter()
            .map(
                |(category, actual, payment, retention, remarks)| RevenueAggregate {
                    category,
                    total_actual: actual.unwrap_or(Decimal::ZERO),
                    total_payment: payment.unwrap_or(Decimal::ZERO),
                    total_retention: retention.unwrap_or(Decimal::ZERO),
                    remarks,
                },
            )
            .collect();

        let rows = RevenueService::group_revenue(&aggregates);
        let totals = RevenueService::revenue_totals(&rows);

        Ok(RevenueReport { rows, totals })
    }
}
