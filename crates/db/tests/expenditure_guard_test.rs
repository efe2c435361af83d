//! Integration tests for the expenditure creation guard.
//!
//! These tests need a live PostgreSQL instance; set `DATABASE_URL` and
//! run with `cargo test -- --ignored`. The database is recreated from
//! scratch with the migrator.

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, Set};
use sea_orm_migration::MigratorTrait;
use uuid::Uuid;

use fiscora_core::access::{Caller, OrgScope, UserRole};
use fiscora_core::fiscal::Quarter;
use fiscora_core::report::FundingFilter;
use fiscora_db::entities::{sea_orm_active_enums, users};
use fiscora_db::migration::Migrator;
use fiscora_db::repositories::{
    AllocationRepository, CreateAllocationInput, CreateExpenditureInput, ExpenditureError,
    ExpenditureRepository, ReportRepository,
};

async fn setup() -> (sea_orm::DatabaseConnection, Caller) {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let db = fiscora_db::connect(&url).await.expect("connect");
    Migrator::fresh(&db).await.expect("fresh migrations");

    let user_id = Uuid::new_v4();
    let now = chrono::Utc::now().into();
    users::ActiveModel {
        id: Set(user_id),
        name: Set("Ama Mensah".to_string()),
        email: Set("ama@mof.gov.gh".to_string()),
        username: Set("amensah".to_string()),
        role: Set(sea_orm_active_enums::UserRole::DataEntry),
        organization: Set("MOF".to_string()),
        designation: Set("Budget Officer".to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&db)
    .await
    .expect("seed user");

    let caller = Caller {
        id: user_id,
        name: "Ama Mensah".to_string(),
        role: UserRole::DataEntry,
        organization: "MOF".to_string(),
    };

    (db, caller)
}

fn expenditure_input(activity: &str, day: u32, actual: rust_decimal::Decimal) -> CreateExpenditureInput {
    CreateExpenditureInput {
        activity: activity.to_string(),
        date: NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
        economic_classification: "Use of Goods and Services".to_string(),
        funding_source: "GoG".to_string(),
        natural_account: "2210101".to_string(),
        description: "integration scenario".to_string(),
        releases: dec!(0),
        actual_expenditure: actual,
        actual_payment: actual,
    }
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance via DATABASE_URL"]
async fn expenditure_guard_end_to_end() {
    let (db, caller) = setup().await;
    let allocations = AllocationRepository::new(db.clone());
    let expenditures = ExpenditureRepository::new(db.clone());

    allocations
        .create(CreateAllocationInput {
            organization: "MOF".to_string(),
            economic_classification: "Use of Goods and Services".to_string(),
            funding_source: "GoG".to_string(),
            natural_account: "2210101".to_string(),
            year: 2025,
            appropriation: dec!(500000),
            allotment: dec!(200000),
            created_by: caller.id,
        })
        .await
        .expect("load allocation");

    // First entry fits: balance = 200000 - 150000
    let first = expenditures
        .create(expenditure_input("Fuel Purchase", 1, dec!(150000)), &caller)
        .await
        .expect("first entry accepted");
    assert_eq!(first.allotment_balance, dec!(50000));
    assert_eq!(first.appropriation, dec!(500000));

    // Second entry would push cumulative actual to 210000 > 200000
    let err = expenditures
        .create(expenditure_input("Stationery", 2, dec!(60000)), &caller)
        .await
        .expect_err("overrun rejected");
    assert!(matches!(err, ExpenditureError::Balance(_)));

    // The rejected transaction left no residual rows
    let rows = expenditures
        .list(&OrgScope::single("MOF"))
        .await
        .expect("list");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].activity, "Fuel Purchase");

    // Duplicate (activity, date) is a conflict; the first row is unchanged
    let err = expenditures
        .create(expenditure_input("Fuel Purchase", 1, dec!(10)), &caller)
        .await
        .expect_err("duplicate rejected");
    assert!(matches!(err, ExpenditureError::DuplicateActivityDate));

    // Review then approve; a second review must conflict
    let reviewer = Caller {
        id: Uuid::new_v4(),
        name: "Kofi Boateng".to_string(),
        role: UserRole::Reviewer,
        organization: "MOF".to_string(),
    };
    let reviewed = expenditures
        .review(first.id, &reviewer, Some("checked against PO".to_string()))
        .await
        .expect("review");
    assert_eq!(reviewed.reviewed_by.as_deref(), Some("Kofi Boateng"));

    let err = expenditures
        .review(first.id, &reviewer, None)
        .await
        .expect_err("re-review rejected");
    assert!(matches!(err, ExpenditureError::Workflow(_)));

    let approved = expenditures
        .approve(first.id, &reviewer)
        .await
        .expect("approve");
    assert_eq!(approved.approved_by.as_deref(), Some("Kofi Boateng"));

    // Deleting an approved record is rejected
    let err = expenditures
        .delete(first.id, &caller)
        .await
        .expect_err("approved record immutable");
    assert!(matches!(err, ExpenditureError::Workflow(_)));

    // The quarterly report reconciles the allocation with the one entry
    let reports = ReportRepository::new(db);
    let report = reports
        .economic_report(2025, Quarter::Q1, &FundingFilter::All, &OrgScope::all())
        .await
        .expect("report");

    assert_eq!(report.rows.len(), 1);
    let row = &report.rows[0];
    assert_eq!(row.title, "Use of Goods and Services");
    assert_eq!(row.total_budget, dec!(500000));
    assert_eq!(row.actual_expenditure, dec!(150000));
    assert_eq!(report.totals.total_budget, dec!(500000));
}
