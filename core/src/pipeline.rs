//! Pipeline orchestration — clean, merge, segment, in that order.
//!
//! EXECUTION ORDER (fixed):
//!   1. clean    — drop sentinel profiles, flatten transcript values
//!   2. merge    — inner join to profiles, left join to portfolio
//!   3. segment  — derive the age group column
//!
//! Pure composition; no logic of its own beyond progress logging.

use crate::clean::clean;
use crate::load::{PortfolioRow, ProfileRow, TranscriptRow};
use crate::merge::{merge, MergedRow};
use crate::segment::segment;

/// Run the full preparation pipeline over already-loaded tables and
/// return the merged, segmented table.
pub fn preprocess(
    portfolio: Vec<PortfolioRow>,
    profile: Vec<ProfileRow>,
    transcript: Vec<TranscriptRow>,
) -> Vec<MergedRow> {
    let profile_total = profile.len();
    let transcript_total = transcript.len();

    let (profile_cleaned, transcript_cleaned) = clean(profile, transcript);
    log::info!(
        "clean: profiles {profile_total} -> {}, transcript events {transcript_total} -> {}",
        profile_cleaned.len(),
        transcript_cleaned.len(),
    );

    let events_cleaned = transcript_cleaned.len();
    let merged = merge(transcript_cleaned, profile_cleaned, portfolio);
    log::info!(
        "merge: {} of {events_cleaned} events matched a profile",
        merged.len(),
    );

    let segmented = segment(merged);
    log::debug!("segment: age groups assigned on {} rows", segmented.len());

    segmented
}
