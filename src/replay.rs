//! Sample source replaying a LibreView glucose export.
//!
//! The export is a CSV file with one metadata line above the header. Only
//! three columns are read:
//!
//! | Column | Use |
//! |--------|-----|
//! | `Device Timestamp` | `DD/MM/YYYY HH:MM`, orders the readings |
//! | `Historic Glucose mmol/L` | preferred reading |
//! | `Scan Glucose mmol/L` | fallback when the historic cell is empty |
//!
//! Readings are converted to mg/dL (x18, rounded) and only those within
//! `span` of the newest timestamp are kept. The replay hands them out oldest
//! first and reports the source as unavailable once they run out.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{NaiveDateTime, TimeDelta};
use glucose_trend_common::{AcquisitionError, Sample, SampleSource};
use log::info;
use serde::Deserialize;

/// mg/dL per mmol/L of glucose.
pub const MG_DL_PER_MMOL_L: f64 = 18.0;

const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M";

#[derive(Debug, Deserialize)]
struct Record {
    #[serde(rename = "Device Timestamp")]
    timestamp: String,
    #[serde(rename = "Historic Glucose mmol/L")]
    historic: Option<f64>,
    #[serde(rename = "Scan Glucose mmol/L")]
    scan: Option<f64>,
}

/// One converted row of the export.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Reading {
    pub at: NaiveDateTime,
    pub value: Sample,
}

/// Convert a mmol/L reading to whole mg/dL.
pub fn to_mg_dl(mmol_l: f64) -> Sample {
    // `as` saturates for out-of-range floats
    (mmol_l * MG_DL_PER_MMOL_L).round() as Sample
}

/// Read every usable row of an export, sorted oldest first.
///
/// Rows with neither a historic nor a scan value are skipped.
pub fn read_export<R: Read>(reader: R) -> Result<Vec<Reading>> {
    let mut reader = BufReader::new(reader);
    let mut metadata = String::new();
    reader.read_line(&mut metadata).context("cannot read export metadata line")?;

    let mut csv = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut readings = Vec::new();
    for (row, record) in csv.deserialize::<Record>().enumerate() {
        // 1-based file line: metadata and header come first
        let line = row + 3;
        let record = record.with_context(|| format!("malformed export row at line {line}"))?;
        let Some(mmol_l) = record.historic.or(record.scan) else {
            continue;
        };
        let at = NaiveDateTime::parse_from_str(&record.timestamp, TIMESTAMP_FORMAT)
            .with_context(|| format!("bad timestamp '{}' at line {line}", record.timestamp))?;
        readings.push(Reading {
            at,
            value: to_mg_dl(mmol_l),
        });
    }

    readings.sort_by_key(|r| r.at);
    Ok(readings)
}

/// Readings no older than `span` before the newest one.
pub fn latest_span(
    readings: &[Reading],
    span: TimeDelta,
) -> &[Reading] {
    let Some(newest) = readings.last() else {
        return readings;
    };
    let cutoff = newest.at.checked_sub_signed(span).unwrap_or(NaiveDateTime::MIN);
    let start = readings.partition_point(|r| r.at < cutoff);
    &readings[start..]
}

/// Replays the recent part of a glucose export, oldest reading first.
pub struct ReplaySource {
    readings: VecDeque<Sample>,
}

impl ReplaySource {
    pub fn from_reader<R: Read>(
        reader: R,
        span: TimeDelta,
    ) -> Result<Self> {
        let readings = read_export(reader)?;
        let recent = latest_span(&readings, span);
        if let (Some(first), Some(last)) = (recent.first(), recent.last()) {
            info!("Replaying {} readings from {} to {}", recent.len(), first.at, last.at);
        }
        Ok(Self {
            readings: recent.iter().map(|r| r.value).collect(),
        })
    }

    pub fn from_path(
        path: &Path,
        span: TimeDelta,
    ) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("cannot open export '{}'", path.display()))?;
        Self::from_reader(file, span).with_context(|| format!("invalid export '{}'", path.display()))
    }
}

impl SampleSource for ReplaySource {
    fn next_sample(&mut self) -> Result<Sample, AcquisitionError> {
        self.readings.pop_front().ok_or(AcquisitionError::Unavailable)
    }
}
