use crate::core::{Event, Pipeline};
use crate::utils::error::Result;
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub events: Vec<Event>,
    pub output_path: String,
}

pub struct ExportEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ExportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn run(&self) -> Result<ExportSummary> {
        let started = Instant::now();
        let events = self.preview()?;

        tracing::info!("Writing calendar...");
        let output_path = self.pipeline.load(&events)?;
        tracing::info!(
            "Saved {} events to {} in {:?}",
            events.len(),
            output_path,
            started.elapsed()
        );

        Ok(ExportSummary {
            events,
            output_path,
        })
    }

    /// Extract and transform only; nothing is written.
    pub fn preview(&self) -> Result<Vec<Event>> {
        tracing::info!("Reading timetable...");
        let html = self.pipeline.extract()?;
        tracing::debug!("Read {} bytes of HTML", html.len());

        tracing::info!("Extracting events...");
        let events = self.pipeline.transform(html)?;
        tracing::info!("Extracted {} events", events.len());

        Ok(events)
    }
}
