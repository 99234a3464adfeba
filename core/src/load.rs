//! Loading — reads the three JSON-lines resources into typed tables.
//!
//! Resource names are fixed: `portfolio.json`, `profile.json`, and
//! `transcript.json`, each holding one JSON object per line. No
//! transformation is applied here; a missing or malformed resource fails
//! the whole load and the error carries the offending path (and line).

use crate::config::PrepConfig;
use crate::error::{PrepError, PrepResult};
use crate::types::{OfferId, PersonId};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const PORTFOLIO_RESOURCE: &str = "portfolio.json";
pub const PROFILE_RESOURCE: &str = "profile.json";
pub const TRANSCRIPT_RESOURCE: &str = "transcript.json";

// ── Row types ────────────────────────────────────────────────────────────────

/// One offer definition from `portfolio.json`. Offer attributes pass
/// through the pipeline untransformed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioRow {
    pub id:         OfferId,
    pub offer_type: String,
    pub difficulty: u32,
    pub reward:     u32,
    pub duration:   u32,
    pub channels:   Vec<String>,
}

/// One user record from `profile.json`.
///
/// `age` 118 is the upstream sentinel for "never recorded"; rows carrying
/// it also ship null `gender` and `income`, which are nullable here for
/// that reason. `became_member_on` arrives as a packed `YYYYMMDD` integer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRow {
    pub id:     PersonId,
    pub age:    u32,
    pub gender: Option<String>,
    pub income: Option<f64>,
    #[serde(with = "packed_date")]
    pub became_member_on: NaiveDate,
}

/// One raw event from `transcript.json`. The `value` map's keys vary by
/// event type: offer events carry `"offer id"` or `"offer_id"`, transaction
/// events carry `"amount"`, completions may carry both an id and a reward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptRow {
    pub person: PersonId,
    pub event:  String,
    pub time:   u64,
    pub value:  serde_json::Map<String, serde_json::Value>,
}

// ── Loading ──────────────────────────────────────────────────────────────────

/// Load the three tables from the configured data directory.
pub fn load(
    config: &PrepConfig,
) -> PrepResult<(Vec<PortfolioRow>, Vec<ProfileRow>, Vec<TranscriptRow>)> {
    let portfolio: Vec<PortfolioRow> = read_jsonl(&config.resource(PORTFOLIO_RESOURCE))?;
    let profile: Vec<ProfileRow> = read_jsonl(&config.resource(PROFILE_RESOURCE))?;
    let transcript: Vec<TranscriptRow> = read_jsonl(&config.resource(TRANSCRIPT_RESOURCE))?;

    log::info!(
        "loaded {} offers, {} profiles, {} transcript events from {}",
        portfolio.len(),
        profile.len(),
        transcript.len(),
        config.data_dir.display(),
    );

    Ok((portfolio, profile, transcript))
}

/// Parse a record-oriented JSON-lines file: one object per non-empty line.
fn read_jsonl<T: DeserializeOwned>(path: &Path) -> PrepResult<Vec<T>> {
    let content = std::fs::read_to_string(path).map_err(|source| PrepError::Read {
        path: path.display().to_string(),
        source,
    })?;

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str(line).map_err(|source| PrepError::Parse {
                path: path.display().to_string(),
                line: idx + 1,
                source,
            })
        })
        .collect()
}

/// Serde adapter for `became_member_on`: the upstream field is a packed
/// `YYYYMMDD` integer (e.g. 20170212) and round-trips back to one.
mod packed_date {
    use chrono::{Datelike, NaiveDate};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, ser: S) -> Result<S::Ok, S::Error> {
        let packed = date.year() as u32 * 10_000 + date.month() * 100 + date.day();
        ser.serialize_u32(packed)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<NaiveDate, D::Error> {
        let packed = u32::deserialize(de)?;
        let (year, month, day) = (packed / 10_000, packed / 100 % 100, packed % 100);
        NaiveDate::from_ymd_opt(year as i32, month, day)
            .ok_or_else(|| de::Error::custom(format!("invalid packed date {packed}")))
    }
}
