//! Shared primitive types used across the preparation pipeline.

/// A stable, unique identifier for a user profile. Transcript events
/// reference profiles through their `person` field.
pub type PersonId = String;

/// A stable, unique identifier for a portfolio offer.
pub type OfferId = String;
