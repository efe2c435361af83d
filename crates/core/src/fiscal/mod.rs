//! Calendar quarter windows and labels.

pub mod quarter;

pub use quarter::{FiscalError, Quarter};
