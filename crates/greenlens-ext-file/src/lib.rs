//! # Greenlens Ext File
//!
//! File-facing extensions for Greenlens.
//!
//! This crate provides:
//! - JSON dataset loading into [`ReferenceData`] and an [`InMemoryPortfolioStore`]
//! - Dataset saving, so store mutations can be written back
//! - CSV export of comparison subjects, breakdowns and KPIs
//!
//! The aggregation engine itself never touches the file system.
//!
//! [`ReferenceData`]: greenlens_core::ReferenceData
//! [`InMemoryPortfolioStore`]: greenlens_core::InMemoryPortfolioStore

#![warn(missing_docs)]
#![warn(clippy::all)]

mod dataset;
mod error;
mod export;

pub use dataset::*;
pub use error::{FileError, FileResult};
pub use export::*;
