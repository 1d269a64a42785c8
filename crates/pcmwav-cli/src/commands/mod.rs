//! CLI command implementations

pub mod convert;
pub mod info;
pub mod tone;

mod reporting;
