//! Allocation repository for budget allocation database operations.
//!
//! Allocations are loaded administratively (manual entry or bulk
//! spreadsheet import) and read by the expenditure guard and the
//! appropriation aggregator.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QuerySelect, Set, SqlErr, TransactionTrait,
};
use uuid::Uuid;

use fiscora_core::access::OrgScope;
use fiscora_core::budget::BudgetLineKey;
use fiscora_core::report::{AppropriationAggregate, FundingFilter};
use fiscora_shared::AppError;

use crate::entities::{allocations, expenditures};

/// Error types for allocation operations.
#[derive(Debug, thiserror::Error)]
pub enum AllocationError {
    /// A required field is missing or empty.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// An amount is negative.
    #[error("{0} must be a valid non-negative number")]
    NegativeAmount(&'static str),

    /// An allocation already exists for this budget line and year.
    #[error("Allocation already exists for this budget line")]
    DuplicateLine,

    /// No allocation found for the requested budget line.
    #[error("No allocation found")]
    LineNotFound,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<AllocationError> for AppError {
    fn from(err: AllocationError) -> Self {
        match err {
            AllocationError::MissingField(_) | AllocationError::NegativeAmount(_) => {
                Self::Validation(err.to_string())
            }
            AllocationError::DuplicateLine => Self::Conflict(err.to_string()),
            AllocationError::LineNotFound => Self::NotFound(err.to_string()),
            AllocationError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Input for creating an allocation.
#[derive(Debug, Clone)]
pub struct CreateAllocationInput {
    /// Owning organization code.
    pub organization: String,
    /// Economic classification.
    pub economic_classification: String,
    /// Funding source code.
    pub funding_source: String,
    /// Natural account number.
    pub natural_account: String,
    /// Fiscal year.
    pub year: i32,
    /// Approved budget ceiling.
    pub appropriation: Decimal,
    /// In-year release ceiling.
    pub allotment: Decimal,
    /// User loading the allocation.
    pub created_by: Uuid,
}

/// Appropriation, allotment, and running balance for one budget line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetValues {
    /// Approved budget ceiling.
    pub appropriation: Decimal,
    /// In-year release ceiling.
    pub allotment: Decimal,
    /// Allotment minus cumulative releases.
    pub balance: Decimal,
}

/// Allocation repository.
#[derive(Debug, Clone)]
pub struct AllocationRepository {
    db: DatabaseConnection,
}

impl AllocationRepository {
    /// Creates a new allocation repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates one allocation.
    ///
    /// # Errors
    ///
    /// Returns a validation error for empty fields or negative amounts,
    /// and a duplicate error when the budget line is already loaded for
    /// the year.
    pub async fn create(
        &self,
        input: CreateAllocationInput,
    ) -> Result<allocations::Model, AllocationError> {
        validate_allocation(&input)?;

        let now = Utc::now().into();
        let model = allocations::ActiveModel {
            id: Set(Uuid::new_v4()),
            organization: Set(input.organization),
            economic_classification: Set(input.economic_classification),
            funding_source: Set(input.funding_source),
            natural_account: Set(input.natural_account),
            year: Set(input.year),
            appropriation: Set(input.appropriation),
            allotment: Set(input.allotment),
            created_by: Set(input.created_by),
            created_at: Set(now),
            updated_at: Set(now),
        };

        model.insert(&self.db).await.map_err(|err| {
            if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                AllocationError::DuplicateLine
            } else {
                AllocationError::Database(err)
            }
        })
    }

    /// Inserts a batch of allocations from a bulk import.
    ///
    /// All rows are validated first and inserted inside one transaction;
    /// a single bad row aborts the whole batch.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure, or a duplicate error when
    /// any row collides with an existing budget line.
    pub async fn bulk_create(
        &self,
        inputs: Vec<CreateAllocationInput>,
    ) -> Result<usize, AllocationError> {
        for input in &inputs {
            validate_allocation(input)?;
        }

        let count = inputs.len();
        let now: sea_orm::prelude::DateTimeWithTimeZone = Utc::now().into();

        let models: Vec<allocations::ActiveModel> = inputs
            .into_iter()
            .map(|input| allocations::ActiveModel {
                id: Set(Uuid::new_v4()),
                organization: Set(input.organization),
                economic_classification: Set(input.economic_classification),
                funding_source: Set(input.funding_source),
                natural_account: Set(input.natural_account),
                year: Set(input.year),
                appropriation: Set(input.appropriation),
                allotment: Set(input.allotment),
                created_by: Set(input.created_by),
                created_at: Set(now),
                updated_at: Set(now),
            })
            .collect();

        let txn = self.db.begin().await?;
        allocations::Entity::insert_many(models)
            .exec(&txn)
            .await
            .map_err(|err| {
                if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                    AllocationError::DuplicateLine
                } else {
                    AllocationError::Database(err)
                }
            })?;
        txn.commit().await?;

        Ok(count)
    }

    /// Finds the unique allocation for a budget line.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_line(
        &self,
        key: &BudgetLineKey,
    ) -> Result<Option<allocations::Model>, DbErr> {
        allocations::Entity::find()
            .filter(allocations::Column::Organization.eq(&key.organization))
            .filter(
                allocations::Column::EconomicClassification.eq(&key.economic_classification),
            )
            .filter(allocations::Column::FundingSource.eq(&key.funding_source))
            .filter(allocations::Column::NaturalAccount.eq(&key.natural_account))
            .one(&self.db)
            .await
    }

    /// Distinct natural accounts loaded for an organization's
    /// classification and funding source.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn natural_accounts(
        &self,
        organization: &str,
        economic_classification: &str,
        funding_source: &str,
    ) -> Result<Vec<String>, DbErr> {
        allocations::Entity::find()
            .select_only()
            .column(allocations::Column::NaturalAccount)
            .filter(allocations::Column::Organization.eq(organization))
            .filter(
                allocations::Column::EconomicClassification
                    .eq(economic_classification.trim()),
            )
            .filter(allocations::Column::FundingSource.eq(funding_source.trim()))
            .distinct()
            .into_tuple()
            .all(&self.db)
            .await
    }

    /// Appropriation, allotment, and running balance for a budget line.
    ///
    /// The balance is the allotment minus cumulative releases recorded
    /// against the line; it feeds the entry form, not the guard (the
    /// guard recomputes inside its own transaction).
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError::LineNotFound`] when no allocation is
    /// loaded for the key.
    pub async fn budget_values(
        &self,
        key: &BudgetLineKey,
    ) -> Result<BudgetValues, AllocationError> {
        let allocation = self
            .find_line(key)
            .await?
            .ok_or(AllocationError::LineNotFound)?;

        let total_releases: Option<Option<Decimal>> = expenditures::Entity::find()
            .select_only()
            .column_as(expenditures::Column::Releases.sum(), "total_releases")
            .filter(expenditures::Column::Organization.eq(&key.organization))
            .filter(
                expenditures::Column::EconomicClassification
                    .eq(&key.economic_classification),
            )
            .filter(expenditures::Column::FundingSource.eq(&key.funding_source))
            .filter(expenditures::Column::NaturalAccount.eq(&key.natural_account))
            .into_tuple()
            .one(&self.db)
            .await?;

        let released = total_releases.flatten().unwrap_or(Decimal::ZERO);

        Ok(BudgetValues {
            appropriation: allocation.appropriation,
            allotment: allocation.allotment,
            balance: allocation.allotment - released,
        })
    }

    /// Sums appropriations by (classification, funding source) within
    /// the resolved organization scope, optionally restricted to one
    /// year and one funding source.
    ///
    /// No ordering is guaranteed; canonical ordering is the report
    /// sort layer's job.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn appropriation_summary(
        &self,
        scope: &OrgScope,
        year: Option<i32>,
        funding: &FundingFilter,
    ) -> Result<Vec<AppropriationAggregate>, DbErr> {
        let mut query = allocations::Entity::find()
            .select_only()
            .column(allocations::Column::EconomicClassification)
            .column(allocations::Column::FundingSource)
            .column_as(
                allocations::Column::Appropriation.sum(),
                "total_appropriation",
            )
            .group_by(allocations::Column::EconomicClassification)
            .group_by(allocations::Column::FundingSource);

        if let Some(organization) = &scope.organization {
            query = query.filter(allocations::Column::Organization.eq(organization));
        }
        if let Some(year) = year {
            query = query.filter(allocations::Column::Year.eq(year));
        }
        if let FundingFilter::Source(source) = funding {
            query = query.filter(allocations::Column::FundingSource.eq(source));
        }

        let rows: Vec<(String, String, Option<Decimal>)> =
            query.into_tuple().all(&self.db).await?;

        Ok(rows
            .into_iter()
            .map(
                |(economic_classification, funding_source, total)| AppropriationAggregate {
                    economic_classification,
                    funding_source,
                    total_appropriation: total.unwrap_or(Decimal::ZERO),
                },
            )
            .collect())
    }
}

fn validate_allocation(input: &CreateAllocationInput) -> Result<(), AllocationError> {
    let required = [
        ("organization", input.organization.as_str()),
        (
            "economicClassification",
            input.economic_classification.as_str(),
        ),
        ("sourceOfFunding", input.funding_source.as_str()),
        ("naturalAccount", input.natural_account.as_str()),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(AllocationError::MissingField(field));
        }
    }

    if input.appropriation.is_sign_negative() {
        return Err(AllocationError::NegativeAmount("appropriation"));
    }
    if input.allotment.is_sign_negative() {
        return Err(AllocationError::NegativeAmount("allotment"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn input() -> CreateAllocationInput {
        CreateAllocationInput {
            organization: "MOF".to_string(),
            economic_classification: "Use of Goods and Services".to_string(),
            funding_source: "GoG".to_string(),
            natural_account: "2210101".to_string(),
            year: 2025,
            appropriation: dec!(500000),
            allotment: dec!(200000),
            created_by: Uuid::new_v4(),
        }
    }

    #[test]
    fn test_validate_accepts_complete_input() {
        assert!(validate_allocation(&input()).is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_fields() {
        let mut bad = input();
        bad.natural_account = "  ".to_string();
        assert!(matches!(
            validate_allocation(&bad),
            Err(AllocationError::MissingField("naturalAccount"))
        ));
    }

    #[test]
    fn test_validate_rejects_negative_amounts() {
        let mut bad = input();
        bad.allotment = dec!(-1);
        assert!(matches!(
            validate_allocation(&bad),
            Err(AllocationError::NegativeAmount("allotment"))
        ));
    }

    #[test]
    fn test_error_mapping_to_app_error() {
        assert_eq!(
            AppError::from(AllocationError::DuplicateLine).error_code(),
            "CONFLICT"
        );
        assert_eq!(
            AppError::from(AllocationError::LineNotFound).error_code(),
            "NOT_FOUND"
        );
        assert_eq!(
            AppError::from(AllocationError::MissingField("organization")).error_code(),
            "VALIDATION_ERROR"
        );
    }
}
