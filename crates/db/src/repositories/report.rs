//! Report repository composing the aggregators and the report builder.
//!
//! The economic report produced here is the single structure consumed
//! by the JSON endpoint, the spreadsheet writer, and the PDF writer;
//! the sinks receive already-computed rows and totals.

use sea_orm::{DatabaseConnection, DbErr};
use tracing::instrument;

use fiscora_core::access::OrgScope;
use fiscora_core::fiscal::Quarter;
use fiscora_core::report::{
    sort_report, EconomicReportRow, FundingFilter, ReportService, ReportTotals,
};

use super::allocation::AllocationRepository;
use super::expenditure::ExpenditureRepository;

/// A complete quarterly economic report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EconomicReport {
    /// Fiscal year.
    pub year: i32,
    /// Quarter label, e.g. `"Q1 2025"`.
    pub quarter_label: String,
    /// Funding source the report was filtered to, or `"ALL"`.
    pub funding_source: String,
    /// Organization the report was scoped to, or `"ALL"`.
    pub organization: String,
    /// Classification rows in canonical order.
    pub rows: Vec<EconomicReportRow>,
    /// Flat grand totals.
    pub totals: ReportTotals,
}

/// Report repository.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    allocations: AllocationRepository,
    expenditures: ExpenditureRepository,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            allocations: AllocationRepository::new(db.clone()),
            expenditures: ExpenditureRepository::new(db),
        }
    }

    /// Builds the quarterly economic report.
    ///
    /// Appropriations are aggregated for the year and execution for the
    /// quarter window, both within the resolved organization scope.
    /// The two aggregate sets are merged, filtered to the requested
    /// funding source, sorted into canonical order, and totalled.
    ///
    /// Read-only; safe to run concurrently with expenditure writes.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    #[instrument(skip(self), fields(quarter = quarter.number()))]
    pub async fn economic_report(
        &self,
        year: i32,
        quarter: Quarter,
        funding: &FundingFilter,
        scope: &OrgScope,
    ) -> Result<EconomicReport, DbErr> {
        // Both aggregators fetch unfiltered by funding source; the
        // builder applies the filter after merging so parents keep
        // totals consistent with their visible breakdown.
        let appropriations = self
            .allocations
            .appropriation_summary(scope, Some(year), &FundingFilter::All)
            .await?;
        let execution = self
            .expenditures
            .execution_summary(scope, year, quarter, &FundingFilter::All)
            .await?;

        let mut rows =
            ReportService::build_economic_report(&appropriations, &execution, funding);
        sort_report(&mut rows);
        let totals = ReportService::report_totals(&rows);

        let funding_source = match funding {
            FundingFilter::All => "ALL".to_string(),
            FundingFilter::Source(source) => source.clone(),
        };
        let organization = scope
            .organization
            .clone()
            .unwrap_or_else(|| "ALL".to_string());

        Ok(EconomicReport {
            year,
            quarter_label: quarter.label(year),
            funding_source,
            organization,
            rows,
            totals,
        })
    }
}
