use chrono::NaiveDate;
use offerprep_core::clean::{clean, UNKNOWN_AGE};
use offerprep_core::load::{ProfileRow, TranscriptRow};
use serde_json::json;

// ── Test helpers ────────────────────────────────────────────────────────────

fn profile(id: &str, age: u32) -> ProfileRow {
    ProfileRow {
        id: id.into(),
        age,
        gender: Some("F".into()),
        income: Some(55_000.0),
        became_member_on: NaiveDate::from_ymd_opt(2017, 4, 25).unwrap(),
    }
}

fn event(person: &str, kind: &str, time: u64, value: serde_json::Value) -> TranscriptRow {
    TranscriptRow {
        person: person.into(),
        event: kind.into(),
        time,
        value: value.as_object().cloned().expect("value must be an object"),
    }
}

// ── Profile cleaning ────────────────────────────────────────────────────────

/// Rows carrying the unknown-age sentinel are removed; everything else
/// survives in its original order.
#[test]
fn sentinel_profiles_removed() {
    let profiles = vec![
        profile("U1", UNKNOWN_AGE),
        profile("U2", 40),
        profile("U3", UNKNOWN_AGE),
        profile("U4", 25),
    ];

    let (cleaned, _) = clean(profiles, vec![]);

    let ids: Vec<&str> = cleaned.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["U2", "U4"], "kept rows must preserve input order");
    assert!(
        cleaned.iter().all(|p| p.age != UNKNOWN_AGE),
        "no cleaned row may carry the sentinel age"
    );
}

/// Surviving profile rows pass through field for field — cleaning only
/// filters, it never rewrites.
#[test]
fn surviving_profiles_unchanged() {
    let keeper = ProfileRow {
        id: "U7".into(),
        age: 61,
        gender: None,
        income: Some(93_000.0),
        became_member_on: NaiveDate::from_ymd_opt(2016, 1, 3).unwrap(),
    };

    let (cleaned, _) = clean(vec![profile("U1", UNKNOWN_AGE), keeper.clone()], vec![]);

    assert_eq!(cleaned, vec![keeper]);
}

// ── Transcript flattening ───────────────────────────────────────────────────

/// The spaced spelling wins when a value somehow carries both keys.
#[test]
fn offer_id_prefers_spaced_spelling() {
    let rows = vec![event(
        "U2",
        "offer received",
        0,
        json!({"offer id": "A", "offer_id": "B"}),
    )];

    let (_, cleaned) = clean(vec![], rows);

    assert_eq!(cleaned[0].offer_id.as_deref(), Some("A"));
}

/// Completion records use the underscore spelling; it is picked up when the
/// spaced key is absent.
#[test]
fn offer_id_falls_back_to_underscore_spelling() {
    let rows = vec![event(
        "U2",
        "offer completed",
        132,
        json!({"offer_id": "B", "reward": 5}),
    )];

    let (_, cleaned) = clean(vec![], rows);

    assert_eq!(cleaned[0].offer_id.as_deref(), Some("B"));
}

/// A pure-transaction value has no offer key at all — that is a valid
/// state, not an error.
#[test]
fn transaction_value_yields_no_offer_id() {
    let rows = vec![event("U2", "transaction", 6, json!({"amount": 3.53}))];

    let (_, cleaned) = clean(vec![], rows);

    assert_eq!(cleaned[0].offer_id, None);
    assert_eq!(cleaned[0].transaction_amount, 3.53);
}

/// The amount defaults to exactly 0 when no "amount" key exists.
#[test]
fn amount_defaults_to_zero() {
    let rows = vec![event("U2", "offer viewed", 12, json!({"offer id": "A"}))];

    let (_, cleaned) = clean(vec![], rows);

    assert_eq!(cleaned[0].transaction_amount, 0.0);
}

/// An empty value map flattens to (no offer, zero amount).
#[test]
fn empty_value_map_is_tolerated() {
    let rows = vec![event("U9", "transaction", 0, json!({}))];

    let (_, cleaned) = clean(vec![], rows);

    assert_eq!(cleaned[0].offer_id, None);
    assert_eq!(cleaned[0].transaction_amount, 0.0);
}

/// A non-string offer id is treated as absent, so the lookup falls through
/// to the underscore spelling.
#[test]
fn non_string_offer_id_treated_as_absent() {
    let rows = vec![event(
        "U2",
        "offer received",
        0,
        json!({"offer id": 42, "offer_id": "B"}),
    )];

    let (_, cleaned) = clean(vec![], rows);

    assert_eq!(cleaned[0].offer_id.as_deref(), Some("B"));
}

/// Flattening keeps the event's own fields and row order intact.
#[test]
fn flattening_preserves_event_fields_and_order() {
    let rows = vec![
        event("U2", "offer received", 0, json!({"offer id": "A"})),
        event("U3", "transaction", 6, json!({"amount": 12.0})),
    ];

    let (_, cleaned) = clean(vec![], rows);

    assert_eq!(cleaned.len(), 2);
    assert_eq!(cleaned[0].person, "U2");
    assert_eq!(cleaned[0].event, "offer received");
    assert_eq!(cleaned[0].time, 0);
    assert_eq!(cleaned[1].person, "U3");
    assert_eq!(cleaned[1].time, 6);
}
