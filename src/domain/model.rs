use chrono::{DateTime, Duration};
use chrono_tz::Tz;
use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// Timestamp rendering used when deriving an event identity.
/// Matches the `YYYY-MM-DD HH:MM:SS+HH:MM` form produced by other EdT exporters,
/// so the same class gets the same UID whichever tool wrote the calendar.
const IDENTITY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%:z";

/// One scheduled occurrence extracted from the timetable.
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    title: String,
    start: DateTime<Tz>,
    end: DateTime<Tz>,
    location: Option<String>,
    description: Option<String>,
    identity: Uuid,
}

impl Event {
    pub fn new(
        title: impl Into<String>,
        start: DateTime<Tz>,
        end: DateTime<Tz>,
        location: Option<String>,
        description: Option<String>,
    ) -> Self {
        let title = title.into();
        let identity = derive_identity(&title, &start, &end);
        Self {
            title,
            start,
            end,
            location,
            description,
            identity,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn start(&self) -> DateTime<Tz> {
        self.start
    }

    pub fn end(&self) -> DateTime<Tz> {
        self.end
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn identity(&self) -> Uuid {
        self.identity
    }

    /// `end - start`. Negative when the source data is inconsistent.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Touching intervals (one ends exactly when the other starts) do not overlap.
    pub fn overlaps(&self, other: &Event) -> bool {
        self.start < other.end && self.end > other.start
    }
}

fn derive_identity(title: &str, start: &DateTime<Tz>, end: &DateTime<Tz>) -> Uuid {
    let name = format!(
        "{}-{}-{}",
        title,
        start.format(IDENTITY_TIME_FORMAT),
        end.format(IDENTITY_TIME_FORMAT)
    );
    Uuid::new_v5(&Uuid::NAMESPACE_DNS, name.as_bytes())
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.identity == other.identity
    }
}

impl Eq for Event {}

impl Hash for Event {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity.hash(state);
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{} → {}]",
            self.title,
            self.start.format("%Y-%m-%d %H:%M"),
            self.end.format("%H:%M")
        )?;
        if let Some(location) = &self.location {
            write!(f, " @ {}", location)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Europe::Paris;
    use std::collections::HashSet;

    fn at(hour: u32, minute: u32) -> DateTime<Tz> {
        Paris.with_ymd_and_hms(2025, 9, 1, hour, minute, 0).unwrap()
    }

    fn event(title: &str, start: DateTime<Tz>, end: DateTime<Tz>) -> Event {
        Event::new(title, start, end, None, None)
    }

    #[test]
    fn test_identity_ignores_location_and_description() {
        let a = Event::new("Algo", at(8, 0), at(9, 30), Some("501.337".into()), None);
        let b = Event::new("Algo", at(8, 0), at(9, 30), None, Some("M. Dupont".into()));
        assert_eq!(a.identity(), b.identity());
        assert_eq!(a, b);

        let set: HashSet<Event> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_identity_changes_with_each_key_field() {
        let base = event("Algo", at(8, 0), at(9, 30));
        assert_ne!(base.identity(), event("Algo ", at(8, 0), at(9, 30)).identity());
        assert_ne!(base.identity(), event("Algo", at(8, 15), at(9, 30)).identity());
        assert_ne!(base.identity(), event("Algo", at(8, 0), at(9, 45)).identity());
        assert_ne!(base, event("Réseaux", at(8, 0), at(9, 30)));
    }

    #[test]
    fn test_identity_is_uuid_v5_over_canonical_string() {
        let e = event("Algo", at(8, 0), at(9, 30));
        let expected = Uuid::new_v5(
            &Uuid::NAMESPACE_DNS,
            b"Algo-2025-09-01 08:00:00+02:00-2025-09-01 09:30:00+02:00",
        );
        assert_eq!(e.identity(), expected);
        assert_eq!(e.identity().get_version_num(), 5);
    }

    #[test]
    fn test_duration() {
        assert_eq!(event("A", at(8, 0), at(9, 30)).duration(), Duration::minutes(90));
        assert_eq!(event("A", at(8, 0), at(8, 0)).duration(), Duration::zero());
        assert_eq!(event("A", at(9, 0), at(8, 0)).duration(), Duration::hours(-1));
    }

    #[test]
    fn test_touching_events_do_not_overlap() {
        let a = event("A", at(10, 0), at(11, 0));
        let b = event("B", at(11, 0), at(12, 0));
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let a = event("A", at(10, 0), at(11, 0));
        let b = event("B", at(10, 30), at(11, 30));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_display() {
        let e = Event::new("Algo", at(8, 0), at(9, 30), Some("501.337".into()), None);
        assert_eq!(e.to_string(), "Algo [2025-09-01 08:00 → 09:30] @ 501.337");
    }
}
