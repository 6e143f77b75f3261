pub mod cli;
pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};

pub const DEFAULT_INPUT_PATH: &str = "EdT - 4IF@ADE.html";
pub const DEFAULT_OUTPUT_PATH: &str = "timetable.ics";
pub const DEFAULT_TIMEZONE: &str = "Europe/Paris";

pub const INPUT_EXTENSIONS: [&str; 2] = ["html", "htm"];
pub const OUTPUT_EXTENSIONS: [&str; 1] = ["ics"];
pub const MAX_GROUP: u32 = 99;

#[cfg_attr(feature = "cli", derive(clap::Parser))]
#[cfg_attr(feature = "cli", command(name = "edt-ics"))]
#[cfg_attr(
    feature = "cli",
    command(about = "Export an EdT timetable page to an iCalendar file")
)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Saved timetable page
    #[cfg_attr(feature = "cli", arg(default_value = DEFAULT_INPUT_PATH))]
    pub input_path: String,

    /// Row group to export (row-group-<N>)
    #[cfg_attr(feature = "cli", arg(short, long))]
    pub group: u32,

    #[cfg_attr(feature = "cli", arg(short, long, default_value = DEFAULT_OUTPUT_PATH))]
    pub output_path: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = DEFAULT_TIMEZONE))]
    pub timezone: String,

    /// X-WR-CALNAME of the generated calendar
    #[cfg_attr(feature = "cli", arg(long))]
    pub calendar_name: Option<String>,

    /// Print the extracted events as JSON instead of writing the calendar
    #[cfg_attr(feature = "cli", arg(long))]
    pub dry_run: bool,

    #[cfg_attr(feature = "cli", arg(short, long, help = "Enable verbose output"))]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn group(&self) -> u32 {
        self.group
    }

    fn timezone(&self) -> &str {
        &self.timezone
    }

    fn calendar_name(&self) -> Option<&str> {
        self.calendar_name.as_deref()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}

/// Checks shared by every configuration front-end.
pub fn validate_provider<C: ConfigProvider>(config: &C) -> Result<()> {
    validation::validate_path("input_path", config.input_path())?;
    validation::validate_file_extension("input_path", config.input_path(), &INPUT_EXTENSIONS)?;
    validation::validate_path("output_path", config.output_path())?;
    validation::validate_file_extension("output_path", config.output_path(), &OUTPUT_EXTENSIONS)?;
    validation::validate_range("group", config.group(), 1, MAX_GROUP)?;
    validation::validate_timezone("timezone", config.timezone())?;
    Ok(())
}
