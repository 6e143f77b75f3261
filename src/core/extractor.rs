use crate::core::clock::{find_clock, find_date, localize, parse_clock};
use crate::core::span::{resolve_end_time, HeaderSlot};
use crate::domain::model::Event;
use crate::domain::ports::DocumentNode;
use crate::utils::error::{EdtError, Result};
use chrono::{NaiveDate, NaiveTime};
use chrono_tz::Tz;

/// Cell classes marking a class slot (generic, lecture, lab, exercise).
pub const SLOT_CLASSES: [&str; 4] = ["Slot-EDT", "Slot-CM", "Slot-TP", "Slot-TD"];

/// Separator the EdT pages put between fields of a sub-cell.
const FIELD_SEPARATOR: char = '\u{a0}';

pub struct TimetableExtractor {
    timezone: Tz,
}

impl TimetableExtractor {
    pub fn new(timezone: Tz) -> Self {
        Self { timezone }
    }

    /// Every slot of the rows tagged `row-group-<group>`, in row then cell order.
    ///
    /// A slot whose wall-clock start or end falls in a spring-forward DST gap is
    /// rejected with `EdtError::TimezoneError` rather than shifted past the gap.
    pub fn extract_all<N: DocumentNode>(&self, document: &N, group: u32) -> Result<Vec<Event>> {
        let row_class = format!("row-group-{}", group);
        let rows = document.find_all("tr", &[row_class.as_str()]);
        tracing::debug!("Found {} rows for group {}", rows.len(), group);

        let mut events = Vec::new();
        for (row_index, row) in rows.iter().enumerate() {
            let date = row_date(row, row_index)?;
            let slots = row.find_all("td", &SLOT_CLASSES);
            if slots.is_empty() {
                continue;
            }

            let table = row.closest("table").ok_or_else(|| {
                EdtError::malformed(format!("row {}", row_index + 1), "row is not inside a table")
            })?;
            let headers = header_slots(&table)?;

            for slot in &slots {
                let event = self.extract_event(slot, date, &headers)?;
                tracing::debug!("  {}", event);
                events.push(event);
            }
            tracing::debug!("{}: {} slots", date, slots.len());
        }

        Ok(events)
    }

    /// End time of `slot_cell`, read from the header row of `weekly_table`.
    pub fn resolve_end_time<N: DocumentNode>(&self, weekly_table: &N, slot_cell: &N) -> Result<NaiveTime> {
        let headers = header_slots(weekly_table)?;
        resolve_end_time(&headers, target_column(slot_cell)?)
    }

    fn extract_event<N: DocumentNode>(
        &self,
        slot: &N,
        date: NaiveDate,
        headers: &[HeaderSlot],
    ) -> Result<Event> {
        let sub_cells = slot.find_all("td", &[]);
        let title = sub_cells
            .first()
            .map(|cell| cell.text().trim().to_string())
            .ok_or_else(|| EdtError::malformed(slot_context(slot), "slot has no title cell"))?;

        let text = slot.text();
        let start_clock = find_clock(&text).ok_or_else(|| {
            EdtError::malformed(slot_context(slot), format!("no HHhMM start time in '{}'", text.trim()))
        })?;
        let start = localize(date, parse_clock(start_clock)?, self.timezone)?;
        let end = localize(date, resolve_end_time(headers, target_column(slot)?)?, self.timezone)?;

        let location = sub_cells.get(1).and_then(|cell| {
            cell.text()
                .trim()
                .split(FIELD_SEPARATOR)
                .nth(1)
                .map(str::to_string)
        });
        let description = sub_cells.get(2).map(|cell| {
            cell.text()
                .trim()
                .split(FIELD_SEPARATOR)
                .collect::<Vec<_>>()
                .join(" ")
        });

        Ok(Event::new(title, start, end, location, description))
    }
}

fn row_date<N: DocumentNode>(row: &N, row_index: usize) -> Result<NaiveDate> {
    let context = format!("row {}", row_index + 1);
    let text = row
        .first_child_element()
        .map(|cell| cell.text())
        .ok_or_else(|| EdtError::malformed(&context, "row has no cells"))?;
    find_date(&text)?.ok_or_else(|| {
        EdtError::malformed(&context, format!("no DD/MM/YYYY date in '{}'", text.trim()))
    })
}

fn header_slots<N: DocumentNode>(table: &N) -> Result<Vec<HeaderSlot>> {
    let header_row = table
        .find_all("tr", &["header"])
        .into_iter()
        .next()
        .ok_or_else(|| EdtError::malformed("header", "table has no header row"))?;

    header_row
        .find_all("th", &[])
        .iter()
        .map(|cell| {
            Ok(HeaderSlot::new(
                cell.text().trim(),
                span_attr(cell, "header")?,
            ))
        })
        .collect()
}

/// Grid column a slot ends on: the start column (second-to-last `-` segment of
/// its id) plus its colspan.
fn target_column<N: DocumentNode>(slot: &N) -> Result<u32> {
    let id = slot
        .attr("id")
        .ok_or_else(|| EdtError::malformed("slot", "slot cell has no id"))?;
    let start_col: u32 = id
        .rsplit('-')
        .nth(1)
        .and_then(|segment| segment.parse().ok())
        .ok_or_else(|| EdtError::malformed("slot", format!("no start column in id '{}'", id)))?;
    let span = span_attr(slot, "slot")?;
    start_col.checked_add(span).ok_or_else(|| {
        EdtError::malformed("slot", format!("column {} + colspan {} overflows in '{}'", start_col, span, id))
    })
}

fn span_attr<N: DocumentNode>(cell: &N, context: &str) -> Result<u32> {
    match cell.attr("colspan") {
        None => Ok(1),
        Some(value) => value.trim().parse().map_err(|_| {
            EdtError::malformed(context, format!("invalid colspan '{}'", value))
        }),
    }
}

fn slot_context<N: DocumentNode>(slot: &N) -> String {
    match slot.attr("id") {
        Some(id) => format!("slot {}", id),
        None => "slot".to_string(),
    }
}
