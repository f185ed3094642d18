//! Broken shift detection.
//!
//! A broken shift is a day on which one employee group works two blocks of
//! time separated by an unpaid gap longer than the configured minimum.

use std::collections::BTreeMap;

use crate::models::{BrokenShift, DayOfWeek, EmploymentType, Shift};

/// Finds every broken shift in a roster.
///
/// Shifts are grouped by day, employment type and level, then sorted by
/// start time. Within a group the latest end seen so far is tracked, so a
/// short shift nested inside a long one never opens a gap. A gap counts
/// only when it is strictly longer than `minimum_gap_minutes`.
///
/// Overnight shifts end at their span, past minute 1440 of the rostered day.
/// Zero-length shifts take no part in detection.
pub fn detect_broken_shifts(shifts: &[Shift], minimum_gap_minutes: i64) -> Vec<BrokenShift> {
    let mut groups: BTreeMap<(DayOfWeek, EmploymentType, u8), Vec<&Shift>> = BTreeMap::new();
    for shift in shifts.iter().filter(|shift| shift.span_minutes() > 0) {
        groups
            .entry((shift.day, shift.employment_type, shift.level))
            .or_default()
            .push(shift);
    }

    let mut broken = Vec::new();
    for ((day, employment_type, level), mut group) in groups {
        group.sort_by_key(|shift| shift.start_minute());

        let mut latest: Option<(&Shift, i64)> = None;
        for shift in group {
            let start = shift.start_minute();
            let end = start + shift.span_minutes();

            if let Some((previous, latest_end)) = latest {
                let gap = start - latest_end;
                if gap > minimum_gap_minutes {
                    broken.push(BrokenShift {
                        day,
                        employment_type,
                        level,
                        first_shift_id: previous.id.clone(),
                        second_shift_id: shift.id.clone(),
                        gap_minutes: gap,
                    });
                }
                if end > latest_end {
                    latest = Some((shift, end));
                }
            } else {
                latest = Some((shift, end));
            }
        }
    }

    broken
}

/// Returns the sorted, de-duplicated days that have a broken shift.
pub fn broken_shift_days(broken: &[BrokenShift]) -> Vec<DayOfWeek> {
    let mut days: Vec<DayOfWeek> = broken.iter().map(|b| b.day).collect();
    days.sort();
    days.dedup();
    days
}
