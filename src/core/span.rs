//! End-time resolution from a slot cell's column span.
//!
//! The header row of the weekly grid labels irregular bands of the day
//! (`08h00-09h30`, `09h45-11h`, ...), each covering one or more grid columns.
//! A slot cell only knows which grid column it ends on, so its end time is
//! read back from the header cell whose running span reaches that column.

use crate::core::clock::{parse_clock, parse_hour};
use crate::utils::error::{EdtError, Result};
use chrono::NaiveTime;

/// Leading header cells that are not time slots (day label, spacer).
pub const SKIPPED_HEADER_CELLS: usize = 2;

/// Width of one grid column, in minutes.
pub const GRID_STEP_MINUTES: i64 = 15;

/// One `th` of the header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSlot {
    pub label: String,
    pub span: u32,
}

impl HeaderSlot {
    pub fn new(label: impl Into<String>, span: u32) -> Self {
        Self {
            label: label.into(),
            span,
        }
    }

    /// The part of the `start-end` label after the separator.
    pub fn end_label(&self) -> Option<&str> {
        self.label.trim().split('-').nth(1).map(str::trim)
    }
}

/// Resolves the wall-clock end of a cell ending on grid column `target_col`.
///
/// Header cells are consumed left to right, accumulating their spans:
/// - landing exactly on `target_col` ends at the current header's end;
/// - overshooting ends at the previous header's end, when it has one;
/// - otherwise the end is approximated from the header two cells back, assuming
///   15-minute columns: `hour h (60 - 15 * overshoot)`.
pub fn resolve_end_time(headers: &[HeaderSlot], target_col: u32) -> Result<NaiveTime> {
    let mut index = SKIPPED_HEADER_CELLS;
    let mut total: u32 = 0;
    let current = loop {
        let slot = headers.get(index).ok_or_else(|| {
            EdtError::malformed(
                "header",
                format!(
                    "header row ends at column {} before reaching column {}",
                    total, target_col
                ),
            )
        })?;
        total = total.checked_add(slot.span).ok_or_else(|| {
            EdtError::malformed(
                "header",
                format!("column span overflow at '{}' ({})", slot.label, slot.span),
            )
        })?;
        if total >= target_col {
            break slot;
        }
        index += 1;
    };

    if total == target_col {
        let end = current.end_label().ok_or_else(|| missing_range(current))?;
        return parse_clock(end);
    }

    // index >= SKIPPED_HEADER_CELLS, so both lookbacks stay in bounds
    if let Some(end) = headers[index - 1].end_label() {
        return parse_clock(end);
    }

    let fallback = &headers[index - 2];
    let delta = i64::from(total - target_col);
    let minutes = 60 - GRID_STEP_MINUTES * delta;
    tracing::debug!(
        "Approximating end from header '{}' ({} columns short, {} min)",
        fallback.label,
        delta,
        minutes
    );

    let hour = parse_hour(fallback.end_label().ok_or_else(|| missing_range(fallback))?)?;
    u32::try_from(minutes)
        .ok()
        .and_then(|m| NaiveTime::from_hms_opt(hour, m, 0))
        .ok_or_else(|| {
            EdtError::malformed(
                "header",
                format!("cannot approximate an end {} columns before '{}'", delta, fallback.label),
            )
        })
}

fn missing_range(slot: &HeaderSlot) -> EdtError {
    EdtError::malformed(
        "header",
        format!("'{}' is not an HHhMM-HHhMM range", slot.label),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn header(slots: &[(&str, u32)]) -> Vec<HeaderSlot> {
        let mut headers = vec![HeaderSlot::new("", 1), HeaderSlot::new("", 1)];
        headers.extend(slots.iter().map(|(label, span)| HeaderSlot::new(*label, *span)));
        headers
    }

    #[test]
    fn test_exact_boundary_uses_current_header() {
        let headers = header(&[("08h00-09h30", 6), ("09h45-11h15", 6)]);
        assert_eq!(resolve_end_time(&headers, 6).unwrap(), time(9, 30));
        assert_eq!(resolve_end_time(&headers, 12).unwrap(), time(11, 15));
    }

    #[test]
    fn test_exact_boundary_normalizes_hour_only_label() {
        let headers = header(&[("08h00-09h", 4), ("09h-10h", 4)]);
        assert_eq!(resolve_end_time(&headers, 4).unwrap(), time(9, 0));
        assert_eq!(resolve_end_time(&headers, 8).unwrap(), time(10, 0));
    }

    #[test]
    fn test_overshoot_uses_previous_header() {
        let headers = header(&[("08h00-09h30", 6), ("09h45-11h15", 6), ("11h30-12h30", 4)]);
        // column 9 sits inside the second band
        assert_eq!(resolve_end_time(&headers, 9).unwrap(), time(9, 30));
        assert_eq!(resolve_end_time(&headers, 14).unwrap(), time(11, 15));
    }

    #[test]
    fn test_overshoot_without_previous_approximates_from_grid() {
        let headers = vec![
            HeaderSlot::new("Semaine-08h", 1),
            HeaderSlot::new("", 1),
            HeaderSlot::new("08h00-09h", 4),
        ];
        // ends one column short of the first band: 08h + (60 - 15)
        assert_eq!(resolve_end_time(&headers, 3).unwrap(), time(8, 45));
        assert_eq!(resolve_end_time(&headers, 1).unwrap(), time(8, 15));
    }

    #[test]
    fn test_overshoot_without_usable_fallback_fails() {
        let headers = header(&[("08h00-09h", 4)]);
        assert!(matches!(
            resolve_end_time(&headers, 2),
            Err(EdtError::MalformedInput { .. })
        ));
    }

    #[test]
    fn test_target_beyond_header_fails() {
        let headers = header(&[("08h00-09h", 4)]);
        assert!(matches!(
            resolve_end_time(&headers, 5),
            Err(EdtError::MalformedInput { .. })
        ));
        assert!(resolve_end_time(&headers[..2], 1).is_err());
    }

    #[test]
    fn test_span_overflow_is_malformed_input() {
        let headers = header(&[("08h00-09h", u32::MAX - 5), ("09h-10h", 10)]);
        assert!(matches!(
            resolve_end_time(&headers, u32::MAX),
            Err(EdtError::MalformedInput { .. })
        ));
    }

    #[test]
    fn test_end_label() {
        assert_eq!(HeaderSlot::new(" 08h00-09h30 ", 1).end_label(), Some("09h30"));
        assert_eq!(HeaderSlot::new("Lundi", 1).end_label(), None);
    }
}
