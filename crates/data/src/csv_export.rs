use anyhow::{Context, Result};
use csv::Writer;
use std::fs::File;

use crate::models::StudyWithAgent;

/// Column order of the study export, consumed by the download UI.
const HEADER: [&str; 12] = [
    "Study Date",
    "Agent Name",
    "Task Description",
    "Time Without AI (min)",
    "Time With AI (min)",
    "Time Saved (min)",
    "Usage Count",
    "Usage Discount %",
    "Net Usage",
    "Cost Per Hour",
    "Net Time Saved (hours)",
    "Potential Savings",
];

pub struct CsvExport;

impl CsvExport {
    /// Renders studies to CSV in memory, for HTTP download.
    ///
    /// Values are taken verbatim from stored fields; derived fields
    /// default to 0 when absent. Embedded commas, quotes, and newlines
    /// in text fields are quoted per RFC 4180.
    ///
    /// # Errors
    /// Returns error if CSV serialization fails.
    pub fn studies_to_string(studies: &[StudyWithAgent]) -> Result<String> {
        let mut writer = Writer::from_writer(Vec::new());
        Self::write_rows(&mut writer, studies)?;
        let bytes = writer.into_inner().context("Failed to flush CSV buffer")?;
        Ok(String::from_utf8(bytes)?)
    }

    /// Writes studies to a CSV file, for headless export.
    ///
    /// # Errors
    /// Returns error if file cannot be created or writing fails.
    pub fn write_studies(path: &str, studies: &[StudyWithAgent]) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create CSV file: {path}"))?;
        let mut writer = Writer::from_writer(file);
        Self::write_rows(&mut writer, studies)?;
        writer.flush()?;
        Ok(())
    }

    fn write_rows<W: std::io::Write>(
        writer: &mut Writer<W>,
        studies: &[StudyWithAgent],
    ) -> Result<()> {
        writer.write_record(HEADER)?;

        for study in studies {
            writer.write_record(&[
                study.study_date.to_string(),
                study.agent_name.clone(),
                study.task_description.clone(),
                study.time_without_ai_mins.to_string(),
                study.time_with_ai_mins.to_string(),
                study.time_saved_mins.unwrap_or(0.0).to_string(),
                study.usage_count.to_string(),
                study.usage_discount_pct.to_string(),
                study.net_usage.unwrap_or(0.0).to_string(),
                study.cost_per_hour.to_string(),
                study.net_time_saved_hours.unwrap_or(0.0).to_string(),
                study.potential_savings.unwrap_or(0.0).to_string(),
            ])?;
        }

        Ok(())
    }
}
