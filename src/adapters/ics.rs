use crate::domain::model::Event;
use crate::domain::ports::CalendarWriter;
use crate::utils::error::Result;
use chrono::Utc;
use icalendar::{Calendar, Component, EventLike};

/// Renders events as an iCalendar document, one VEVENT per event in input order.
#[derive(Debug, Clone, Default)]
pub struct IcsWriter {
    calendar_name: Option<String>,
}

impl IcsWriter {
    pub fn new(calendar_name: Option<String>) -> Self {
        Self { calendar_name }
    }
}

impl CalendarWriter for IcsWriter {
    fn render(&self, events: &[Event]) -> Result<String> {
        let mut calendar = Calendar::new();
        if let Some(name) = &self.calendar_name {
            calendar.name(name);
        }

        for event in events {
            let mut vevent = icalendar::Event::new();
            vevent
                .uid(&event.identity().to_string())
                .summary(event.title())
                .starts(event.start().with_timezone(&Utc))
                .ends(event.end().with_timezone(&Utc));
            if let Some(location) = event.location() {
                vevent.location(location);
            }
            if let Some(description) = event.description() {
                vevent.description(description);
            }
            calendar.push(vevent.done());
        }

        tracing::debug!("Rendered {} VEVENT components", events.len());
        Ok(calendar.done().to_string())
    }
}
