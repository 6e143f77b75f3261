use crate::domain::model::Event;
use crate::utils::error::Result;

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn group(&self) -> u32;
    fn timezone(&self) -> &str;
    fn calendar_name(&self) -> Option<&str>;
}

/// Read the saved page, turn it into events, write the calendar.
pub trait Pipeline {
    fn extract(&self) -> Result<String>;
    fn transform(&self, html: String) -> Result<Vec<Event>>;
    fn load(&self, events: &[Event]) -> Result<String>;
}

/// Minimal view of a parsed HTML element.
///
/// The extractor only needs these lookups, so any HTML library can sit behind it.
pub trait DocumentNode: Sized {
    /// Descendant elements (excluding `self`) named `tag` that carry at least one
    /// of `classes`, in document order. An empty `classes` matches every `tag`.
    fn find_all(&self, tag: &str, classes: &[&str]) -> Vec<Self>;

    fn first_child_element(&self) -> Option<Self>;

    /// Nearest strict ancestor named `tag`.
    fn closest(&self, tag: &str) -> Option<Self>;

    fn attr(&self, name: &str) -> Option<String>;

    /// Concatenated text of all descendants, untrimmed.
    fn text(&self) -> String;
}

pub trait CalendarWriter {
    fn render(&self, events: &[Event]) -> Result<String>;
}
