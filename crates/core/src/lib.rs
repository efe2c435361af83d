//! Core business logic for Fiscora.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `access` - Role-based organization scope resolution
//! - `budget` - Allotment balance validation for expenditure entry
//! - `fiscal` - Calendar quarter windows and labels
//! - `report` - Economic report merge, grouping, and canonical ordering
//! - `revenue` - Retention split and revenue report grouping
//! - `cash` - Multi-currency cash position grouping
//! - `workflow` - Review/approval lifecycle for financial records

pub mod access;
pub mod budget;
pub mod cash;
pub mod fiscal;
pub mod report;
pub mod revenue;
pub mod workflow;
