//! Deterministic synthetic dataset generator.
//!
//! Writes the three JSON-lines resources with the shapes the pipeline
//! expects from production exports: a share of profiles carrying the
//! unknown-age sentinel (with null gender and income), both `"offer id"`
//! and `"offer_id"` spellings across transcript values, and
//! pure-transaction events that carry only an `"amount"` key.
//!
//! RULE: No platform RNG. All randomness flows through one seeded stream —
//! same seed, same files, byte for byte.

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use offerprep_core::clean::UNKNOWN_AGE;
use offerprep_core::load::{
    PortfolioRow, ProfileRow, TranscriptRow, PORTFOLIO_RESOURCE, PROFILE_RESOURCE,
    TRANSCRIPT_RESOURCE,
};
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use uuid::Uuid;

// ── Generator RNG ────────────────────────────────────────────────────────────

/// Seeded generator stream.
struct GenRng {
    inner: Pcg64Mcg,
}

impl GenRng {
    fn new(seed: u64) -> Self {
        Self {
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    /// Roll a float in [0.0, 1.0).
    fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    /// Roll a u64 in [0, n).
    fn next_u64_below(&mut self, n: u64) -> u64 {
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Bernoulli trial: returns true with probability p.
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Sample from a simplified Pareto distribution.
    fn pareto(&mut self, x_min: f64, alpha: f64) -> f64 {
        let u = self.next_f64().max(1e-10);
        x_min * u.powf(-1.0 / alpha)
    }

    /// A 32-hex-char identifier in the upstream id format.
    fn entity_id(&mut self) -> String {
        Uuid::from_u64_pair(self.next_u64(), self.next_u64())
            .simple()
            .to_string()
    }
}

// ── Generation ───────────────────────────────────────────────────────────────

pub struct GenSpec {
    pub seed: u64,
    pub offers: usize,
    pub profiles: usize,
    pub events: usize,
}

/// Share of profiles generated with the unknown-age sentinel.
const UNKNOWN_AGE_SHARE: f64 = 0.13;

/// Transcript timestamps span this many hours.
const TIME_SPAN_HOURS: u64 = 715;

/// Generate the three resources into `data_dir`, overwriting existing files.
pub fn generate(data_dir: &Path, spec: &GenSpec) -> Result<()> {
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Cannot create {}", data_dir.display()))?;

    let mut rng = GenRng::new(spec.seed);
    let portfolio = gen_portfolio(&mut rng, spec.offers);
    let profiles = gen_profiles(&mut rng, spec.profiles);
    let transcript = gen_transcript(&mut rng, &portfolio, &profiles, spec.events);

    write_jsonl(&data_dir.join(PORTFOLIO_RESOURCE), &portfolio)?;
    write_jsonl(&data_dir.join(PROFILE_RESOURCE), &profiles)?;
    write_jsonl(&data_dir.join(TRANSCRIPT_RESOURCE), &transcript)?;

    log::info!(
        "generated {} offers, {} profiles, {} events (seed {})",
        portfolio.len(),
        profiles.len(),
        transcript.len(),
        spec.seed,
    );

    Ok(())
}

fn gen_portfolio(rng: &mut GenRng, count: usize) -> Vec<PortfolioRow> {
    const OFFER_TYPES: &[&str] = &["bogo", "discount", "informational"];
    const DIFFICULTIES: &[u32] = &[5, 7, 10, 20];
    const REWARDS: &[u32] = &[2, 3, 5, 10];

    (0..count)
        .map(|i| {
            let offer_type = OFFER_TYPES[i % OFFER_TYPES.len()];
            // Informational offers carry no spend requirement and no reward.
            let (difficulty, reward) = if offer_type == "informational" {
                (0, 0)
            } else {
                (
                    DIFFICULTIES[rng.next_u64_below(DIFFICULTIES.len() as u64) as usize],
                    REWARDS[rng.next_u64_below(REWARDS.len() as u64) as usize],
                )
            };

            let mut channels = vec!["email".to_string()];
            if rng.chance(0.8) {
                channels.push("web".to_string());
            }
            if rng.chance(0.9) {
                channels.push("mobile".to_string());
            }
            if rng.chance(0.6) {
                channels.push("social".to_string());
            }

            PortfolioRow {
                id: rng.entity_id(),
                offer_type: offer_type.to_string(),
                difficulty,
                reward,
                duration: 3 + rng.next_u64_below(8) as u32,
                channels,
            }
        })
        .collect()
}

fn gen_profiles(rng: &mut GenRng, count: usize) -> Vec<ProfileRow> {
    let membership_start = NaiveDate::from_ymd_opt(2013, 7, 29).expect("valid date");

    (0..count)
        .map(|_| {
            let id = rng.entity_id();
            let became_member_on =
                membership_start + Duration::days(rng.next_u64_below(1824) as i64);

            if rng.chance(UNKNOWN_AGE_SHARE) {
                // Sentinel rows ship with null demographics across the board.
                return ProfileRow {
                    id,
                    age: UNKNOWN_AGE,
                    gender: None,
                    income: None,
                    became_member_on,
                };
            }

            let gender = if rng.chance(0.57) {
                "F"
            } else if rng.chance(0.96) {
                "M"
            } else {
                "O"
            };

            ProfileRow {
                id,
                age: 18 + rng.next_u64_below(84) as u32,
                gender: Some(gender.to_string()),
                income: Some((30 + rng.next_u64_below(91)) as f64 * 1000.0),
                became_member_on,
            }
        })
        .collect()
}

fn gen_transcript(
    rng: &mut GenRng,
    portfolio: &[PortfolioRow],
    profiles: &[ProfileRow],
    count: usize,
) -> Vec<TranscriptRow> {
    let mut rows: Vec<TranscriptRow> = (0..count)
        .map(|_| {
            let person = profiles[rng.next_u64_below(profiles.len() as u64) as usize]
                .id
                .clone();
            let time = rng.next_u64_below(TIME_SPAN_HOURS);
            let offer = &portfolio[rng.next_u64_below(portfolio.len() as u64) as usize];

            let mut value = serde_json::Map::new();
            let event = if rng.chance(0.35) {
                let amount = (rng.pareto(1.0, 1.6).min(500.0) * 100.0).round() / 100.0;
                value.insert("amount".to_string(), amount.into());
                "transaction"
            } else if rng.chance(0.55) {
                value.insert("offer id".to_string(), offer.id.clone().into());
                "offer received"
            } else if rng.chance(0.6) {
                value.insert("offer id".to_string(), offer.id.clone().into());
                "offer viewed"
            } else {
                // Completion records use the underscore spelling upstream
                // and carry the reward alongside the id.
                value.insert("offer_id".to_string(), offer.id.clone().into());
                value.insert("reward".to_string(), offer.reward.into());
                "offer completed"
            };

            TranscriptRow {
                person,
                event: event.to_string(),
                time,
                value,
            }
        })
        .collect();

    rows.sort_by_key(|r| r.time);
    rows
}

/// Write rows as record-oriented JSON lines, one object per line.
pub fn write_jsonl<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Cannot create {}", path.display()))?;
    let mut writer = std::io::BufWriter::new(file);

    for row in rows {
        let line = serde_json::to_string(row)?;
        writeln!(writer, "{line}")?;
    }

    Ok(())
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use offerprep_core::config::PrepConfig;
    use offerprep_core::pipeline::preprocess;

    fn read(dir: &Path, name: &str) -> String {
        std::fs::read_to_string(dir.join(name)).unwrap()
    }

    /// Same seed, same files, byte for byte.
    #[test]
    fn generation_is_deterministic() {
        let spec = GenSpec {
            seed: 7,
            offers: 5,
            profiles: 40,
            events: 200,
        };

        let dir_a = tempfile::tempdir().unwrap();
        let dir_b = tempfile::tempdir().unwrap();
        generate(dir_a.path(), &spec).unwrap();
        generate(dir_b.path(), &spec).unwrap();

        for name in [PORTFOLIO_RESOURCE, PROFILE_RESOURCE, TRANSCRIPT_RESOURCE] {
            assert_eq!(
                read(dir_a.path(), name),
                read(dir_b.path(), name),
                "{name} diverged between identically seeded runs"
            );
        }
    }

    /// Generated datasets must load and survive the full pipeline.
    #[test]
    fn generated_data_feeds_the_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        let spec = GenSpec {
            seed: 42,
            offers: 8,
            profiles: 100,
            events: 1000,
        };
        generate(dir.path(), &spec).unwrap();

        let config = PrepConfig::new(dir.path());
        let (portfolio, profile, transcript) = offerprep_core::load::load(&config).unwrap();
        assert_eq!(portfolio.len(), 8);
        assert_eq!(profile.len(), 100);
        assert_eq!(transcript.len(), 1000);

        let merged = preprocess(portfolio, profile, transcript);
        assert!(!merged.is_empty(), "expected surviving merged rows");
        assert!(
            merged.iter().all(|r| r.profile.age != UNKNOWN_AGE),
            "sentinel-age rows must not reach the merged table"
        );
    }
}
