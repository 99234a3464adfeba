//! Merging — two keyed joins producing the wide analysis table.
//!
//! Step 1 inner-joins cleaned transcript events to cleaned profiles on
//! `person == profile.id`; events for unknown or filtered-out users are
//! silently dropped. Step 2 left-joins the result to the portfolio on
//! `offer_id == offer.id`; events without a matching offer keep no offer
//! attributes. Key mismatches are data policy here, never errors.

use crate::clean::TranscriptEventRow;
use crate::load::{PortfolioRow, ProfileRow};
use crate::segment::AgeGroup;
use crate::types::{OfferId, PersonId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One denormalized output row: a cleaned transcript event joined with its
/// user profile and, where the event references a known offer, the
/// portfolio entry.
///
/// Identifier disambiguation: the event's own key stays at the top level
/// as `person`; the joined sides keep their `id` fields at `profile.id`
/// and `offer.id`, so all three remain addressable.
///
/// `age_group` is unset until [`segment`](crate::segment::segment) runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedRow {
    pub person: PersonId,
    pub event:  String,
    pub time:   u64,
    pub offer_id: Option<OfferId>,
    pub transaction_amount: f64,
    pub profile: ProfileRow,
    pub offer: Option<PortfolioRow>,
    pub age_group: Option<AgeGroup>,
}

/// Join the three tables. Transcript order is preserved; the inner join
/// never grows the row count and the left join never changes it.
pub fn merge(
    transcript: Vec<TranscriptEventRow>,
    profile: Vec<ProfileRow>,
    portfolio: Vec<PortfolioRow>,
) -> Vec<MergedRow> {
    let profiles: HashMap<PersonId, ProfileRow> =
        profile.into_iter().map(|p| (p.id.clone(), p)).collect();
    let offers: HashMap<OfferId, PortfolioRow> =
        portfolio.into_iter().map(|o| (o.id.clone(), o)).collect();

    transcript
        .into_iter()
        .filter_map(|event| {
            let profile = profiles.get(&event.person)?.clone();
            let offer = event
                .offer_id
                .as_ref()
                .and_then(|id| offers.get(id))
                .cloned();

            Some(MergedRow {
                person: event.person,
                event: event.event,
                time: event.time,
                offer_id: event.offer_id,
                transaction_amount: event.transaction_amount,
                profile,
                offer,
                age_group: None,
            })
        })
        .collect()
}
