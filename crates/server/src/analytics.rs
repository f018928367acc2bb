//! Aggregates over any record set. Every function is pure and returns a
//! zero or empty result for empty input.

use shared_types::{
    AnalyticsReport, AnalyticsScope, CaseRecord, CategoricalField, OutcomeClass, OutcomeSummary,
    ValueCount, YearCount, YearSpread,
};
use std::collections::{BTreeMap, HashMap};

use crate::filter::FilteredView;

pub fn total_count<'a>(records: impl IntoIterator<Item = &'a CaseRecord>) -> usize {
    records.into_iter().count()
}

/// `count` as a percentage of `total`; `0.0` when `total` is zero.
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    }
}

pub fn outcome_summary<'a>(records: impl IntoIterator<Item = &'a CaseRecord>) -> OutcomeSummary {
    let (mut total, mut accepted, mut rejected) = (0, 0, 0);
    for record in records {
        total += 1;
        match record.outcome() {
            OutcomeClass::Accepted => accepted += 1,
            OutcomeClass::Rejected => rejected += 1,
            OutcomeClass::Other => {}
        }
    }
    OutcomeSummary {
        total,
        accepted,
        rejected,
        accepted_pct: percentage(accepted, total),
        rejected_pct: percentage(rejected, total),
    }
}

/// Cases per filing year, ascending. Records without a year are skipped.
pub fn yearly_distribution<'a>(
    records: impl IntoIterator<Item = &'a CaseRecord>,
) -> Vec<YearCount> {
    let mut by_year: BTreeMap<i32, usize> = BTreeMap::new();
    for year in records.into_iter().filter_map(CaseRecord::filing_year) {
        *by_year.entry(year).or_default() += 1;
    }
    by_year
        .into_iter()
        .map(|(year, count)| YearCount { year, count })
        .collect()
}

/// Box-plot statistics of the defined filing years.
pub fn year_spread<'a>(records: impl IntoIterator<Item = &'a CaseRecord>) -> Option<YearSpread> {
    let mut years: Vec<i32> = records
        .into_iter()
        .filter_map(CaseRecord::filing_year)
        .collect();
    years.sort_unstable();

    let (&min, &max) = (years.first()?, years.last()?);
    Some(YearSpread {
        count: years.len(),
        min,
        q1: quantile(&years, 0.25),
        median: quantile(&years, 0.5),
        q3: quantile(&years, 0.75),
        max,
    })
}

/// Linear interpolation between closest ranks. `sorted` must be non-empty.
fn quantile(sorted: &[i32], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let (a, b) = (f64::from(sorted[lo]), f64::from(sorted[hi]));
    a + (b - a) * (pos - lo as f64)
}

/// Per-value counts in first-seen order.
fn tally<'a>(
    records: impl IntoIterator<Item = &'a CaseRecord>,
    field: CategoricalField,
) -> Vec<ValueCount> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<ValueCount> = Vec::new();
    for value in records.into_iter().filter_map(|r| r.categorical(field)) {
        let slot = *slots.entry(value).or_insert_with(|| {
            counts.push(ValueCount {
                value: value.to_string(),
                count: 0,
            });
            counts.len() - 1
        });
        counts[slot].count += 1;
    }
    counts
}

/// Ranked view: ascending by count, ties by value.
pub fn categorical_counts<'a>(
    records: impl IntoIterator<Item = &'a CaseRecord>,
    field: CategoricalField,
) -> Vec<ValueCount> {
    let mut counts = tally(records, field);
    counts.sort_by(|a, b| a.count.cmp(&b.count).then_with(|| a.value.cmp(&b.value)));
    counts
}

/// Share view: descending by count, ties in first-seen order.
pub fn value_distribution<'a>(
    records: impl IntoIterator<Item = &'a CaseRecord>,
    field: CategoricalField,
) -> Vec<ValueCount> {
    let mut counts = tally(records, field);
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Everything the analytics charts need, over one record set.
pub fn analytics_report(view: &FilteredView<'_>, scope: AnalyticsScope) -> AnalyticsReport {
    AnalyticsReport {
        scope,
        total: total_count(view.iter()),
        outcomes: outcome_summary(view.iter()),
        cases_per_year: yearly_distribution(view.iter()),
        year_spread: year_spread(view.iter()),
        case_types: value_distribution(view.iter(), CategoricalField::CaseType),
        judgment_outcomes: categorical_counts(view.iter(), CategoricalField::JudgmentOutcome),
        court_levels: value_distribution(view.iter(), CategoricalField::CourtLevel),
    }
}
