//! Initial database migration.
//!
//! Creates the enums, core tables, and uniqueness constraints for the
//! budget execution schema.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: USERS
        // ============================================================
        db.execute_unprepared(USERS_SQL).await?;

        // ============================================================
        // PART 3: BUDGET ALLOCATIONS
        // ============================================================
        db.execute_unprepared(ALLOCATIONS_SQL).await?;

        // ============================================================
        // PART 4: EXPENDITURES
        // ============================================================
        db.execute_unprepared(EXPENDITURES_SQL).await?;

        // ============================================================
        // PART 5: REVENUES
        // ============================================================
        db.execute_unprepared(REVENUES_SQL).await?;

        // ============================================================
        // PART 6: CASH POSITIONS
        // ============================================================
        db.execute_unprepared(CASH_POSITIONS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- Lifecycle status for financial records
CREATE TYPE record_status AS ENUM (
    'Pending',
    'Reviewed',
    'Approved'
);

-- User roles
CREATE TYPE user_role AS ENUM (
    'admin',
    'approver',
    'reviewer',
    'data_entry'
);

-- Currencies a cash position can be held in
CREATE TYPE cash_currency AS ENUM (
    'GHS',
    'USD',
    'GBP',
    'EUR'
);
";

const USERS_SQL: &str = r"
CREATE TABLE users (
    id UUID PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    email VARCHAR(255) NOT NULL UNIQUE,
    username VARCHAR(100) NOT NULL UNIQUE,
    role user_role NOT NULL DEFAULT 'data_entry',
    organization VARCHAR(100) NOT NULL,
    designation VARCHAR(255) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_users_organization ON users(organization);
";

const ALLOCATIONS_SQL: &str = r"
CREATE TABLE allocations (
    id UUID PRIMARY KEY,
    organization VARCHAR(100) NOT NULL,
    economic_classification VARCHAR(255) NOT NULL,
    funding_source VARCHAR(50) NOT NULL,
    natural_account VARCHAR(50) NOT NULL,
    year INTEGER NOT NULL,
    appropriation NUMERIC(15, 2) NOT NULL CHECK (appropriation >= 0),
    allotment NUMERIC(15, 2) NOT NULL DEFAULT 0 CHECK (allotment >= 0),
    created_by UUID NOT NULL REFERENCES users(id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT uq_allocations_budget_line UNIQUE (
        organization, economic_classification, funding_source,
        natural_account, year
    )
);

CREATE INDEX idx_allocations_organization ON allocations(organization);
CREATE INDEX idx_allocations_line ON allocations(
    organization, economic_classification, funding_source, natural_account
);
";

const EXPENDITURES_SQL: &str = r"
CREATE TABLE expenditures (
    id UUID PRIMARY KEY,
    activity VARCHAR(255) NOT NULL,
    date DATE NOT NULL,
    economic_classification VARCHAR(255) NOT NULL,
    funding_source VARCHAR(50) NOT NULL,
    natural_account VARCHAR(50) NOT NULL,
    description VARCHAR(255) NOT NULL,
    appropriation NUMERIC(15, 2) NOT NULL CHECK (appropriation >= 0),
    allotment NUMERIC(15, 2) NOT NULL CHECK (allotment >= 0),
    allotment_balance NUMERIC(15, 2) NOT NULL CHECK (allotment_balance >= 0),
    releases NUMERIC(15, 2) NOT NULL DEFAULT 0 CHECK (releases >= 0),
    actual_expenditure NUMERIC(15, 2) NOT NULL DEFAULT 0 CHECK (actual_expenditure >= 0),
    actual_payment NUMERIC(15, 2) NOT NULL DEFAULT 0 CHECK (actual_payment >= 0),
    status record_status NOT NULL DEFAULT 'Pending',
    reviewed_by VARCHAR(255),
    reviewed_at TIMESTAMPTZ,
    review_comment TEXT,
    approved_by VARCHAR(255),
    approved_at TIMESTAMPTZ,
    organization VARCHAR(100) NOT NULL,
    created_by UUID NOT NULL REFERENCES users(id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT uq_expenditures_activity_date UNIQUE (activity, date)
);

CREATE INDEX idx_expenditures_organization ON expenditures(organization);
CREATE INDEX idx_expenditures_date ON expenditures(date);
CREATE INDEX idx_expenditures_line ON expenditures(
    organization, economic_classification, funding_source, natural_account
);
";

const REVENUES_SQL: &str = r"
CREATE TABLE revenues (
    id UUID PRIMARY KEY,
    organization VARCHAR(100) NOT NULL,
    date DATE NOT NULL,
    category VARCHAR(100) NOT NULL,
    retention_rate NUMERIC(5, 2) NOT NULL CHECK (retention_rate >= 0),
    actual_collection NUMERIC(12, 2) NOT NULL CHECK (actual_collection >= 0),
    budget_projection NUMERIC(12, 2) NOT NULL DEFAULT 0,
    retention_amount NUMERIC(12, 2) NOT NULL,
    payment_amount NUMERIC(12, 2) NOT NULL,
    remarks TEXT,
    status record_status NOT NULL DEFAULT 'Pending',
    reviewed_by VARCHAR(255),
    reviewed_at TIMESTAMPTZ,
    review_comment TEXT,
    approved_by VARCHAR(255),
    approved_at TIMESTAMPTZ,
    created_by UUID NOT NULL REFERENCES users(id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT uq_revenues_org_date_category UNIQUE (organization, date, category)
);

CREATE INDEX idx_revenues_organization ON revenues(organization);
CREATE INDEX idx_revenues_date ON revenues(date);
";

const CASH_POSITIONS_SQL: &str = r"
CREATE TABLE cash_positions (
    id UUID PRIMARY KEY,
    organization VARCHAR(100) NOT NULL,
    as_at_date DATE NOT NULL,
    account_name VARCHAR(255) NOT NULL,
    currency cash_currency NOT NULL,
    balance NUMERIC(14, 2) NOT NULL,
    status record_status NOT NULL DEFAULT 'Pending',
    reviewed_by VARCHAR(255),
    reviewed_at TIMESTAMPTZ,
    review_comment TEXT,
    approved_by VARCHAR(255),
    approved_at TIMESTAMPTZ,
    created_by UUID NOT NULL REFERENCES users(id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT uq_cash_positions_snapshot UNIQUE (
        organization, as_at_date, account_name, currency
    )
);

CREATE INDEX idx_cash_positions_org_date ON cash_positions(organization, as_at_date);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS cash_positions;
DROP TABLE IF EXISTS revenues;
DROP TABLE IF EXISTS expenditures;
DROP TABLE IF EXISTS allocations;
DROP TABLE IF EXISTS users;

DROP TYPE IF EXISTS cash_currency;
DROP TYPE IF EXISTS user_role;
DROP TYPE IF EXISTS record_status;
";
