use crate::adapters::html::HtmlDocument;
use crate::core::extractor::TimetableExtractor;
use crate::core::{CalendarWriter, ConfigProvider, Event, Pipeline, Storage};
use crate::utils::error::Result;
use crate::utils::validation::parse_timezone;

/// Saved EdT page in, `.ics` file out.
pub struct TimetablePipeline<S: Storage, C: ConfigProvider, W: CalendarWriter> {
    storage: S,
    config: C,
    writer: W,
}

impl<S: Storage, C: ConfigProvider, W: CalendarWriter> TimetablePipeline<S, C, W> {
    pub fn new(storage: S, config: C, writer: W) -> Self {
        Self {
            storage,
            config,
            writer,
        }
    }
}

impl<S: Storage, C: ConfigProvider, W: CalendarWriter> Pipeline for TimetablePipeline<S, C, W> {
    fn extract(&self) -> Result<String> {
        let bytes = self.storage.read_file(self.config.input_path())?;
        // 瀏覽器另存的頁面偶爾夾帶非 UTF-8 位元組
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn transform(&self, html: String) -> Result<Vec<Event>> {
        let timezone = parse_timezone(self.config.timezone())?;
        let document = HtmlDocument::parse(&html);
        TimetableExtractor::new(timezone).extract_all(&document.root(), self.config.group())
    }

    fn load(&self, events: &[Event]) -> Result<String> {
        let output_path = self.config.output_path();
        let calendar = self.writer.render(events)?;
        self.storage.write_file(output_path, calendar.as_bytes())?;
        Ok(output_path.to_string())
    }
}
