//! Comparability filters over resolved subjects.
//!
//! Use-of-proceeds categories and SDGs use union semantics: a row appears when
//! any subject has it. KPIs are stricter and only appear when enough distinct
//! subjects report the same name and unit.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::subject::ComparisonSubject;

/// How widely an SDG is shared among the compared subjects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PresenceStatus {
    /// Present in every subject (and there is more than one).
    Shared,
    /// Present in exactly one subject.
    Unique,
    /// Present in some but not all subjects.
    Partial,
}

/// An SDG present in at least one subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdgPresence {
    /// SDG number (1-17).
    pub sdg_number: u8,

    /// SDG name.
    pub sdg_name: String,

    /// Number of subjects reporting the SDG.
    pub subject_count: usize,

    /// Presence label.
    pub status: PresenceStatus,
}

/// A KPI reported by enough subjects to be compared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparableKpi {
    /// Indicator name.
    pub name: String,

    /// Unit.
    pub unit: String,

    /// Number of distinct subjects reporting it.
    pub subject_count: usize,
}

/// Returns every use-of-proceeds category present in any subject, sorted.
#[must_use]
pub fn all_uop_categories(subjects: &[ComparisonSubject]) -> Vec<String> {
    subjects
        .iter()
        .flat_map(|s| s.uop_allocation.iter().map(|c| c.category.clone()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Returns every SDG present in any subject, sorted by number.
#[must_use]
pub fn all_sdgs(subjects: &[ComparisonSubject]) -> Vec<SdgPresence> {
    let mut seen: BTreeMap<u8, (String, usize)> = BTreeMap::new();

    for subject in subjects {
        let numbers: BTreeSet<u8> = subject.sdg_allocation.iter().map(|s| s.sdg_number).collect();
        for sdg in &subject.sdg_allocation {
            seen.entry(sdg.sdg_number)
                .or_insert_with(|| (sdg.sdg_name.clone(), 0));
        }
        for number in numbers {
            if let Some(entry) = seen.get_mut(&number) {
                entry.1 += 1;
            }
        }
    }

    let total = subjects.len();
    seen.into_iter()
        .map(|(sdg_number, (sdg_name, subject_count))| SdgPresence {
            sdg_number,
            sdg_name,
            subject_count,
            status: presence_status(subject_count, total),
        })
        .collect()
}

fn presence_status(count: usize, total: usize) -> PresenceStatus {
    if count == total && total > 1 {
        PresenceStatus::Shared
    } else if count == 1 {
        PresenceStatus::Unique
    } else {
        PresenceStatus::Partial
    }
}

/// Returns the KPIs reported by at least `min_subjects` distinct subjects.
///
/// A subject counts once per `(name, unit)` key however many times it reports
/// it. Results are sorted by name, then unit.
#[must_use]
pub fn comparable_kpis(subjects: &[ComparisonSubject], min_subjects: usize) -> Vec<ComparableKpi> {
    let mut counts: BTreeMap<(&str, &str), usize> = BTreeMap::new();

    for subject in subjects {
        let keys: BTreeSet<(&str, &str)> = subject
            .impact_kpis
            .iter()
            .map(|k| (k.name.as_str(), k.unit.as_str()))
            .collect();
        for key in keys {
            *counts.entry(key).or_default() += 1;
        }
    }

    counts
        .into_iter()
        .filter(|(_, count)| *count >= min_subjects)
        .map(|((name, unit), subject_count)| ComparableKpi {
            name: name.to_string(),
            unit: unit.to_string(),
            subject_count,
        })
        .collect()
}
