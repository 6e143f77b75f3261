pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::{html::HtmlDocument, ics::IcsWriter};
pub use crate::config::{cli::LocalStorage, toml_config::TomlConfig, CliConfig};
pub use crate::core::{
    engine::{ExportEngine, ExportSummary},
    extractor::TimetableExtractor,
    pipeline::TimetablePipeline,
};
pub use crate::domain::model::Event;
pub use crate::utils::error::{EdtError, Result};
