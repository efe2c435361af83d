//! `SeaORM` entity definitions.

pub mod allocations;
pub mod cash_positions;
pub mod expenditures;
pub mod revenues;
pub mod sea_orm_active_enums;
pub mod users;
