//! Expenditure repository for expenditure database operations.
//!
//! Creation runs the balance-validation guard: duplicate check,
//! allocation lookup, prior-consumption sums, and the balance decision
//! all execute inside one transaction so that a failure leaves zero
//! residual rows and concurrent entries against the same budget line
//! cannot jointly exceed the allotment.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, QuerySelect, Set, SqlErr, TransactionTrait,
};
use tracing::instrument;
use uuid::Uuid;

use fiscora_core::access::{Caller, OrgScope};
use fiscora_core::budget::{
    AllocationAmounts, BudgetError, BudgetService, ConsumptionBasis, PriorConsumption,
    ProposedAmounts,
};
use fiscora_core::fiscal::Quarter;
use fiscora_core::report::{ExecutionAggregate, FundingFilter};
use fiscora_core::workflow::{RecordStatus, WorkflowError, WorkflowService};
use fiscora_shared::AppError;

use crate::entities::{
    allocations, expenditures, sea_orm_active_enums::RecordStatus as DbRecordStatus,
};

/// Error types for expenditure operations.
#[derive(Debug, thiserror::Error)]
pub enum ExpenditureError {
    /// A required field is missing or empty.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// An amount is negative.
    #[error("{0} must be a valid non-negative number")]
    NegativeAmount(&'static str),

    /// An expenditure already exists for this activity and date.
    #[error("Record already exists for this activity and date")]
    DuplicateActivityDate,

    /// No allocation loaded for this budget line.
    #[error("No allocation for this budget line")]
    AllocationNotFound,

    /// The balance check rejected the entry.
    #[error(transparent)]
    Balance(#[from] BudgetError),

    /// A lifecycle transition was rejected.
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// Expenditure record not found.
    #[error("Expenditure record not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<ExpenditureError> for AppError {
    fn from(err: ExpenditureError) -> Self {
        match err {
            ExpenditureError::MissingField(_) | ExpenditureError::NegativeAmount(_) => {
                Self::Validation(err.to_string())
            }
            ExpenditureError::DuplicateActivityDate => Self::Conflict(err.to_string()),
            ExpenditureError::AllocationNotFound | ExpenditureError::NotFound(_) => {
                Self::NotFound(err.to_string())
            }
            ExpenditureError::Balance(_) => Self::BusinessRule(err.to_string()),
            ExpenditureError::Workflow(ref inner) => match inner {
                WorkflowError::AlreadyReviewed(_) | WorkflowError::AlreadyApproved => {
                    Self::Conflict(err.to_string())
                }
                WorkflowError::ImmutableRecord(_) => Self::BusinessRule(err.to_string()),
                WorkflowError::NotRecordOwner => Self::Forbidden(err.to_string()),
            },
            ExpenditureError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Input for creating an expenditure.
///
/// Appropriation, allotment, and balance are NOT accepted here; they
/// are derived from the allocation inside the guard.
#[derive(Debug, Clone)]
pub struct CreateExpenditureInput {
    /// Activity description (unique with the date).
    pub activity: String,
    /// Entry date.
    pub date: NaiveDate,
    /// Economic classification.
    pub economic_classification: String,
    /// Funding source code.
    pub funding_source: String,
    /// Natural account number.
    pub natural_account: String,
    /// Free-form description.
    pub description: String,
    /// Cash release requested by this entry.
    pub releases: Decimal,
    /// Actual expenditure recorded by this entry.
    pub actual_expenditure: Decimal,
    /// Actual payment recorded by this entry.
    pub actual_payment: Decimal,
}

/// Expenditure repository.
#[derive(Debug, Clone)]
pub struct ExpenditureRepository {
    db: DatabaseConnection,
}

impl ExpenditureRepository {
    /// Creates a new expenditure repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Validates and records one expenditure.
    ///
    /// Steps, in order, inside a single transaction:
    /// 1. required-field validation
    /// 2. duplicate (activity, date) check
    /// 3. allocation lookup with a `FOR UPDATE` row lock; the lock
    ///    serializes concurrent creations for the same budget line so
    ///    two entries cannot both pass the check and jointly exceed the
    ///    allotment
    /// 4. prior-consumption sums for the line
    /// 5. balance decision
    /// 6. insert with the computed snapshots
    ///
    /// Any failure rolls the transaction back with no partial writes.
    ///
    /// # Errors
    ///
    /// Returns the step's error: validation, conflict, missing
    /// allocation, or the balance rule that rejected the entry.
    #[instrument(skip(self, input), fields(activity = %input.activity, organization = %caller.organization))]
    pub async fn create(
        &self,
        input: CreateExpenditureInput,
        caller: &Caller,
    ) -> Result<expenditures::Model, ExpenditureError> {
        validate_expenditure(&input)?;

        let txn = self.db.begin().await?;

        let existing = expenditures::Entity::find()
            .filter(expenditures::Column::Activity.eq(&input.activity))
            .filter(expenditures::Column::Date.eq(input.date))
            .one(&txn)
            .await?;
        if existing.is_some() {
            return Err(ExpenditureError::DuplicateActivityDate);
        }

        let allocation = allocations::Entity::find()
            .filter(allocations::Column::Organization.eq(&caller.organization))
            .filter(
                allocations::Column::EconomicClassification.eq(&input.economic_classification),
            )
            .filter(allocations::Column::FundingSource.eq(&input.funding_source))
            .filter(allocations::Column::NaturalAccount.eq(&input.natural_account))
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(ExpenditureError::AllocationNotFound)?;

        let prior = prior_consumption(&txn, &caller.organization, &input).await?;

        let basis =
            ConsumptionBasis::for_line(&input.economic_classification, &input.funding_source);
        let balance = BudgetService::allotment_balance(
            &AllocationAmounts {
                appropriation: allocation.appropriation,
                allotment: allocation.allotment,
            },
            &prior,
            &ProposedAmounts {
                releases: input.releases,
                actual_expenditure: input.actual_expenditure,
            },
            basis,
        )?;

        let now = Utc::now().into();
        let model = expenditures::ActiveModel {
            id: Set(Uuid::new_v4()),
            activity: Set(input.activity),
            date: Set(input.date),
            economic_classification: Set(input.economic_classification),
            funding_source: Set(input.funding_source),
            natural_account: Set(input.natural_account),
            description: Set(input.description),
            appropriation: Set(allocation.appropriation),
            allotment: Set(allocation.allotment),
            allotment_balance: Set(balance),
            releases: Set(input.releases),
            actual_expenditure: Set(input.actual_expenditure),
            actual_payment: Set(input.actual_payment),
            status: Set(DbRecordStatus::Pending),
            reviewed_by: Set(None),
            reviewed_at: Set(None),
            review_comment: Set(None),
            approved_by: Set(None),
            approved_at: Set(None),
            organization: Set(caller.organization.clone()),
            created_by: Set(caller.id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = model.insert(&txn).await.map_err(|err| {
            // lost the duplicate-check race to a concurrent insert
            if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                ExpenditureError::DuplicateActivityDate
            } else {
                ExpenditureError::Database(err)
            }
        })?;

        txn.commit().await?;
        Ok(inserted)
    }

    /// Lists expenditures within the resolved scope, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, scope: &OrgScope) -> Result<Vec<expenditures::Model>, DbErr> {
        let mut query = expenditures::Entity::find()
            .order_by_desc(expenditures::Column::CreatedAt);

        if let Some(organization) = &scope.organization {
            query = query.filter(expenditures::Column::Organization.eq(organization));
        }

        query.all(&self.db).await
    }

    /// Marks a pending expenditure as reviewed.
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
    ) -> Result<expenditures::Model, ExpenditureError> {
        let record = expenditures::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ExpenditureError::NotFound(id))?;

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

    /// Approves a pending or reviewed expenditure.
    ///
    /// # Errors
    ///
    /// Returns a workflow error when the record was already approved.
    pub async fn approve(
        &self,
        id: Uuid,
        caller: &Caller,
    ) -> Result<expenditures::Model, ExpenditureError> {
        let record = expenditures::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ExpenditureError::NotFound(id))?;

        let status: RecordStatus = record.status.clone().into();
        let stamp = WorkflowService::approve(status, &caller.name)?;

        let mut active = record.into_active_model();
        active.status = Set(DbRecordStatus::Approved);
        active.approved_by = Set(Some(stamp.approved_by));
        active.approved_at = Set(Some(stamp.approved_at.into()));
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Deletes a pending expenditure.
    ///
    /// Only the creator or an admin may delete, and only while the
    /// record is still pending.
    ///
    /// # Errors
    ///
    /// Returns a workflow error for reviewed/approved records or
    /// non-owner callers.
    pub async fn delete(&self, id: Uuid, caller: &Caller) -> Result<(), ExpenditureError> {
        let record = expenditures::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ExpenditureError::NotFound(id))?;

        WorkflowService::ensure_can_modify(record.created_by, caller.id, caller.role)?;
        WorkflowService::ensure_editable(record.status.clone().into())?;

        expenditures::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }

    /// Sums execution activity by (classification, funding source)
    /// within a quarter's date window, scoped by organization and
    /// optionally one funding source.
    ///
    /// No ordering is guaranteed; canonical ordering is the report
    /// sort layer's job.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn execution_summary(
        &self,
        scope: &OrgScope,
        year: i32,
        quarter: Quarter,
        funding: &FundingFilter,
    ) -> Result<Vec<ExecutionAggregate>, DbErr> {
        let (start, end) = quarter.date_range(year);

        let mut query = expenditures::Entity::find()
            .select_only()
            .column(expenditures::Column::EconomicClassification)
            .column(expenditures::Column::FundingSource)
            .column_as(expenditures::Column::Releases.sum(), "total_releases")
            .column_as(
                expenditures::Column::ActualExpenditure.sum(),
                "total_expenditure",
            )
            .column_as(expenditures::Column::ActualPayment.sum(), "total_payment")
            .filter(expenditures::Column::Date.between(start, end))
            .group_by(expenditures::Column::EconomicClassification)
            .group_by(expenditures::Column::FundingSource);

        if let Some(organization) = &scope.organization {
            query = query.filter(expenditures::Column::Organization.eq(organization));
        }
        if let FundingFilter::Source(source) = funding {
            query = query.filter(expenditures::Column::FundingSource.eq(source));
        }

        let rows: Vec<(
            String,
            String,
            Option<Decimal>,
            Option<Decimal>,
            Option<Decimal>,
        )> = query.into_tuple().all(&self.db).await?;

        Ok(rows
            .into_iter()
            .map(
                |(economic_classification, funding_source, releases, expenditure, payment)| {
                    ExecutionAggregate {
                        economic_classification,
                        funding_source,
                        total_releases: releases.unwrap_or(Decimal::ZERO),
                        total_expenditure: expenditure.unwrap_or(Decimal::ZERO),
                        total_payment: payment.unwrap_or(Decimal::ZERO),
                    }
                },
            )
            .collect())
    }
}

/// Sums previous releases and actual expenditure for the budget line,
/// inside the guard's transaction.
async fn prior_consumption<C: ConnectionTrait>(
    conn: &C,
    organization: &str,
    input: &CreateExpenditureInput,
) -> Result<PriorConsumption, DbErr> {
    let sums: Option<(Option<Decimal>, Option<Decimal>)> = expenditures::Entity::find()
        .select_only()
        .column_as(expenditures::Column::Releases.sum(), "total_releases")
        .column_as(
            expenditures::Column::ActualExpenditure.sum(),
            "total_expenditure",
        )
        .filter(expenditures::Column::Organization.eq(organization))
        .filter(
            expenditures::Column::EconomicClassification.eq(&input.economic_classification),
        )
        .filter(expenditures::Column::FundingSource.eq(&input.funding_source))
        .filter(expenditures::Column::NaturalAccount.eq(&input.natural_account))
        .into_tuple()
        .one(conn)
        .await?;

    let (releases, actual) = sums.unwrap_or((None, None));
    Ok(PriorConsumption {
        releases: releases.unwrap_or(Decimal::ZERO),
        actual_expenditure: actual.unwrap_or(Decimal::ZERO),
    })
}

fn validate_expenditure(input: &CreateExpenditureInput) -> Result<(), ExpenditureError> {
    let required = [
        ("activity", input.activity.as_str()),
        (
            "economicClassification",
            input.economic_classification.as_str(),
        ),
        ("sourceOfFunding", input.funding_source.as_str()),
        ("naturalAccount", input.natural_account.as_str()),
        ("description", input.description.as_str()),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(ExpenditureError::MissingField(field));
        }
    }

    let amounts = [
        ("releases", input.releases),
        ("actualExpenditure", input.actual_expenditure),
        ("actualPayment", input.actual_payment),
    ];
    for (field, value) in amounts {
        if value.is_sign_negative() {
            return Err(ExpenditureError::NegativeAmount(field));
        }
    }

    Ok(())
}
