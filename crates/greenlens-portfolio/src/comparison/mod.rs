//! Comparison of bonds, portfolios and issuers.
//!
//! A [`SubjectAdapter`] turns one entity into a [`ComparisonSubject`]; the
//! filters in this module derive what the resolved subjects have in common.

mod filters;
mod resolver;
mod subject;

pub use filters::*;
pub use resolver::*;
pub use subject::*;
