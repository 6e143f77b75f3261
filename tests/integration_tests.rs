use anyhow::Result;
use edt_ics::{
    CliConfig, EdtError, ExportEngine, IcsWriter, LocalStorage, TimetablePipeline, TomlConfig,
};
use tempfile::TempDir;

const WEEK_PAGE: &str = r#"<!DOCTYPE html>
<html><head><meta charset="utf-8"><title>EdT - 4IF@ADE</title></head>
<body>
<table class="week">
  <tr class="header"><th>Semaine 36</th><th></th><th colspan="6">08h00-09h30</th><th colspan="6">09h45-11h15</th><th colspan="4">11h30-12h30</th></tr>
  <tr class="row-group-1"><td>Lundi 01/09/2025</td><td class="Slot-CM" id="cell-1-0-6" colspan="6"><table><tr><td>Algorithmique</td></tr><tr><td>08h00&nbsp;501.337</td></tr><tr><td>M.&nbsp;Dupont</td></tr></table></td><td class="Slot-TD" id="cell-1-6-6" colspan="6"><table><tr><td>Réseaux 09h45</td></tr></table></td></tr>
  <tr class="row-group-2"><td>Lundi 01/09/2025</td><td class="Slot-TP" id="cell-2-0-12" colspan="12"><table><tr><td>TP Systèmes 08h00</td></tr></table></td></tr>
  <tr class="row-group-1"><td>Mardi 02/09/2025</td><td class="Slot-TP" id="cell-3-6-10" colspan="10"><table><tr><td>Projet 09h45</td></tr><tr><td>Salle&nbsp;TP-B</td></tr></table></td></tr>
</table>
</body></html>"#;

fn cli_config(temp_dir: &TempDir, group: u32) -> CliConfig {
    CliConfig {
        input_path: temp_dir.path().join("edt.html").to_string_lossy().into_owned(),
        group,
        output_path: "timetable.ics".to_string(),
        timezone: "Europe/Paris".to_string(),
        calendar_name: Some("4IF".to_string()),
        dry_run: false,
        verbose: false,
    }
}

#[test]
fn test_end_to_end_export_writes_calendar() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(temp_dir.path().join("edt.html"), WEEK_PAGE)?;

    let config = cli_config(&temp_dir, 1);
    let pipeline = TimetablePipeline::new(
        LocalStorage::new(temp_dir.path()),
        config,
        IcsWriter::new(Some("4IF".to_string())),
    );
    let summary = ExportEngine::new(pipeline).run()?;

    assert_eq!(summary.output_path, "timetable.ics");
    let titles: Vec<&str> = summary.events.iter().map(|e| e.title()).collect();
    assert_eq!(titles, vec!["Algorithmique", "Réseaux 09h45", "Projet 09h45"]);

    let ics = std::fs::read_to_string(temp_dir.path().join("timetable.ics"))?;
    assert_eq!(ics.matches("BEGIN:VEVENT").count(), 3);
    assert!(ics.contains("SUMMARY:Algorithmique"));
    assert!(ics.contains("LOCATION:501.337"));
    // Paris is UTC+2 in September
    assert!(ics.contains("DTSTART:20250901T060000Z"));
    assert!(ics.contains("DTEND:20250901T073000Z"));
    assert!(ics.contains("X-WR-CALNAME:4IF"));
    Ok(())
}

#[test]
fn test_end_times_follow_header_spans() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(temp_dir.path().join("edt.html"), WEEK_PAGE)?;

    let pipeline = TimetablePipeline::new(
        LocalStorage::new(temp_dir.path()),
        cli_config(&temp_dir, 1),
        IcsWriter::default(),
    );
    let events = ExportEngine::new(pipeline).preview()?;

    let times: Vec<String> = events
        .iter()
        .map(|e| format!("{}-{}", e.start().format("%d %H:%M"), e.end().format("%H:%M")))
        .collect();
    assert_eq!(times, vec!["01 08:00-09:30", "01 09:45-11:15", "02 09:45-12:30"]);

    assert_eq!(events[2].location(), Some("TP-B"));
    assert_eq!(events[2].description(), None);
    assert_eq!(events[0].description(), Some("M. Dupont"));
    Ok(())
}

#[test]
fn test_other_group_is_selected_by_config() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(temp_dir.path().join("edt.html"), WEEK_PAGE)?;

    let pipeline = TimetablePipeline::new(
        LocalStorage::new(temp_dir.path()),
        cli_config(&temp_dir, 2),
        IcsWriter::default(),
    );
    let events = ExportEngine::new(pipeline).preview()?;

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].title(), "TP Systèmes 08h00");
    assert_eq!(events[0].end().format("%H:%M").to_string(), "11:15");
    Ok(())
}

#[test]
fn test_missing_input_file_is_io_error() -> Result<()> {
    let temp_dir = TempDir::new()?;

    let pipeline = TimetablePipeline::new(
        LocalStorage::new(temp_dir.path()),
        cli_config(&temp_dir, 1),
        IcsWriter::default(),
    );
    let err = ExportEngine::new(pipeline).run().unwrap_err();

    assert!(matches!(err, EdtError::IoError(_)));
    assert!(!temp_dir.path().join("timetable.ics").exists());
    Ok(())
}

#[test]
fn test_malformed_page_writes_nothing() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let broken = WEEK_PAGE.replace("Mardi 02/09/2025", "Mardi");
    std::fs::write(temp_dir.path().join("edt.html"), broken)?;

    let pipeline = TimetablePipeline::new(
        LocalStorage::new(temp_dir.path()),
        cli_config(&temp_dir, 1),
        IcsWriter::default(),
    );
    let err = ExportEngine::new(pipeline).run().unwrap_err();

    assert!(matches!(err, EdtError::MalformedInput { .. }));
    assert!(!temp_dir.path().join("timetable.ics").exists());
    Ok(())
}

#[test]
fn test_toml_config_drives_export() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(temp_dir.path().join("edt.html"), WEEK_PAGE)?;

    let config = TomlConfig::from_toml_str(
        r#"
[source]
input_path = "edt.html"
group = 1

[output]
path = "out/4if.ics"
"#,
    )?;
    let pipeline = TimetablePipeline::new(
        LocalStorage::new(temp_dir.path()),
        config,
        IcsWriter::default(),
    );
    let summary = ExportEngine::new(pipeline).run()?;

    assert_eq!(summary.events.len(), 3);
    assert!(temp_dir.path().join("out/4if.ics").exists());
    Ok(())
}
