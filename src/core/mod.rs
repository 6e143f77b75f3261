pub mod clock;
pub mod engine;
pub mod extractor;
pub mod pipeline;
pub mod span;

pub use crate::domain::model::Event;
pub use crate::domain::ports::{CalendarWriter, ConfigProvider, DocumentNode, Pipeline, Storage};
pub use crate::utils::error::Result;
