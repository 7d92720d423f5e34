//! Calendar aggregation over interventions.
//!
//! Interventions are bucketed by the **local** calendar date of their
//! `date_intervention`, derived by converting the timestamp into the
//! viewer's time zone. Two processes in different zones may disagree
//! about which day an intervention belongs to; the grouping follows
//! the viewer, not the store.
//!
//! The index is a pure, derived view with no persistence. Building it
//! once per intervention set is the only caching involved; rebuild it
//! whenever the set changes, correctness never depends on a stale
//! index.

use std::collections::BTreeMap;

use jiff::civil::Date;
use jiff::tz::TimeZone;

use crate::error::{Result, TrackerError};
use crate::models::Intervention;

/// Mapping from local calendar date to the interventions of that day.
#[derive(Debug, Clone, Default)]
pub struct CalendarIndex {
    buckets: BTreeMap<Date, Vec<Intervention>>,
}

impl CalendarIndex {
    /// Buckets `interventions` by the calendar date of their
    /// `date_intervention` in time zone `tz`. Every intervention lands
    /// in exactly one bucket.
    pub fn new(interventions: &[Intervention], tz: &TimeZone) -> Self {
        let mut buckets: BTreeMap<Date, Vec<Intervention>> = BTreeMap::new();
        for intervention in interventions {
            let date = intervention.date_intervention.to_zoned(tz.clone()).date();
            buckets.entry(date).or_default().push(intervention.clone());
        }
        Self { buckets }
    }

    /// The interventions of a given day; empty when none.
    pub fn bucket(&self, date: Date) -> &[Intervention] {
        self.buckets.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Days that have at least one intervention, ascending.
    pub fn dates(&self) -> impl Iterator<Item = Date> + '_ {
        self.buckets.keys().copied()
    }

    /// Total number of bucketed interventions.
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Produces the cell grid for one month, Monday-first.
///
/// Leading `None` cells cover the offset of day 1 from Monday, and
/// trailing `None` cells pad the grid so its length is always a
/// multiple of 7. The `Some` cells are the month's consecutive dates.
///
/// # Errors
///
/// Returns `TrackerError::InvalidInput` when `year`/`month` do not
/// name a valid month.
pub fn month_grid(year: i16, month: i8) -> Result<Vec<Option<Date>>> {
    let first = Date::new(year, month, 1)
        .map_err(|e| TrackerError::invalid_input("month", e.to_string()))?;

    let mut cells: Vec<Option<Date>> = Vec::with_capacity(42);
    for _ in 0..first.weekday().to_monday_zero_offset() {
        cells.push(None);
    }

    let mut current = first;
    loop {
        cells.push(Some(current));
        if current.day() == current.days_in_month() {
            break;
        }
        current = current
            .tomorrow()
            .map_err(|e| TrackerError::invalid_input("month", e.to_string()))?;
    }

    while cells.len() % 7 != 0 {
        cells.push(None);
    }
    Ok(cells)
}
