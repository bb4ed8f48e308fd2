//! Raw sequence record decoding
//!
//! The loader collaborator hands over rows exactly as they appear in the CSV
//! exports: timestamps in mixed formats, codes as quoted numerics. Decoding
//! is lossy by design - a row with an unparseable timestamp or a non-numeric
//! code is dropped and counted, never fatal.

use brolga_domain::constants::NAIVE_TIMESTAMP_FORMATS;
use brolga_domain::{RawSequenceRecord, SequenceEvent};
use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::debug;

/// Decoded event stream plus the number of rows dropped on the way
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedSequence {
    /// Successfully decoded events, in input order
    pub events: Vec<SequenceEvent>,
    /// Rows dropped for an unparseable timestamp or a non-numeric code
    pub dropped_rows: usize,
}

/// Decode raw sequence rows into typed events
///
/// Timestamps are tried as RFC 3339 first, then against the accepted naive
/// layouts (naive values are taken as UTC). Codes accept integer text and
/// float text with a zero fraction (the exports occasionally quote codes as
/// `"2002.0"`).
pub fn decode_records(records: &[RawSequenceRecord]) -> DecodedSequence {
    let mut events = Vec::with_capacity(records.len());
    let mut dropped_rows = 0usize;

    for record in records {
        let (Some(timestamp), Some(code)) =
            (parse_timestamp(&record.timestamp), parse_code(&record.code))
        else {
            dropped_rows += 1;
            debug!(
                timestamp = %record.timestamp,
                code = %record.code,
                "dropping malformed sequence row"
            );
            continue;
        };

        events.push(SequenceEvent { timestamp, code, message: record.message.clone() });
    }

    DecodedSequence { events, dropped_rows }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }

    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(|naive| naive.and_utc())
}

fn parse_code(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if let Ok(code) = trimmed.parse::<i64>() {
        return Some(code);
    }

    // Exports sometimes round-trip codes through floats ("2002.0")
    let as_float = trimmed.parse::<f64>().ok()?;
    if as_float.fract() == 0.0 && as_float.abs() < i64::MAX as f64 {
        return Some(as_float as i64);
    }
    None
}
