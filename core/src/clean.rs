//! Cleaning — profile sentinel filtering and transcript flattening.
//!
//! RULE: Cleaning never invents rows and never reorders the rows it keeps.

use crate::load::{ProfileRow, TranscriptRow};
use crate::types::{OfferId, PersonId};
use serde::{Deserialize, Serialize};

/// Upstream sentinel meaning "age was never recorded".
pub const UNKNOWN_AGE: u32 = 118;

/// A transcript event after cleaning: the heterogeneous `value` map is
/// replaced by two scalar fields. `offer_id` is absent for pure-transaction
/// events; `transaction_amount` is 0 for pure offer events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEventRow {
    pub person: PersonId,
    pub event:  String,
    pub time:   u64,
    pub offer_id: Option<OfferId>,
    pub transaction_amount: f64,
}

/// Clean the profile and transcript tables.
///
/// Profile rows carrying the unknown-age sentinel are dropped; every other
/// field passes through unchanged. Each transcript row's `value` map is
/// flattened into scalar fields and then discarded.
pub fn clean(
    profile: Vec<ProfileRow>,
    transcript: Vec<TranscriptRow>,
) -> (Vec<ProfileRow>, Vec<TranscriptEventRow>) {
    let profile_cleaned: Vec<ProfileRow> = profile
        .into_iter()
        .filter(|p| p.age != UNKNOWN_AGE)
        .collect();

    let transcript_cleaned: Vec<TranscriptEventRow> =
        transcript.into_iter().map(flatten_value).collect();

    (profile_cleaned, transcript_cleaned)
}

/// Flatten one raw event's `value` map into scalar fields.
///
/// The offer identifier is looked up under `"offer id"` first and
/// `"offer_id"` second — the upstream dataset uses both spellings, and the
/// spaced one wins when a row somehow carries both. The amount defaults to
/// 0 when no `"amount"` key exists. A map with neither key is a valid
/// state: offer-view events reference no amount and transactions no offer.
fn flatten_value(row: TranscriptRow) -> TranscriptEventRow {
    let offer_id = string_value(&row.value, "offer id")
        .or_else(|| string_value(&row.value, "offer_id"));

    let transaction_amount = row
        .value
        .get("amount")
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);

    TranscriptEventRow {
        person: row.person,
        event: row.event,
        time: row.time,
        offer_id,
        transaction_amount,
    }
}

fn string_value(
    value: &serde_json::Map<String, serde_json::Value>,
    key: &str,
) -> Option<String> {
    value.get(key).and_then(|v| v.as_str()).map(str::to_owned)
}
