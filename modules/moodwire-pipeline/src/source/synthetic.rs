//! Synthetic raw batches for when the live source is unavailable.
//!
//! Output is random and non-reproducible; tests assert structure and
//! bounds, never values.

use chrono::{Duration, Utc};
use moodwire_common::RawItem;
use rand::seq::{IndexedRandom, IteratorRandom};
use rand::Rng;

/// Every synthetic id starts with this, so substitute batches stay
/// distinguishable from live data all the way into the warehouse.
pub const SYNTHETIC_ID_PREFIX: &str = "synthetic_";

/// Generated timestamps fall within this many hours before now.
pub const MAX_AGE_HOURS: i64 = 72;

const FAVORABLE_PHRASES: [&str; 5] = [
    "I love how",
    "Great progress on",
    "Exciting developments in",
    "Impressive advances with",
    "Optimistic about",
];

const UNFAVORABLE_PHRASES: [&str; 5] = [
    "Concerned about",
    "Disappointed with",
    "Worried that",
    "Frustrated by",
    "Skeptical of",
];

/// Subject-keyed tag pools; any key contained in the subject contributes
/// its pool.
const TAG_POOLS: [(&str, [&str; 4]); 3] = [
    (
        "climate change",
        ["ClimateAction", "GlobalWarming", "ClimateEmergency", "SaveEarth"],
    ),
    (
        "renewable energy",
        ["CleanEnergy", "SolarPower", "WindEnergy", "Sustainability"],
    ),
    (
        "sustainability",
        ["EcoFriendly", "GreenLiving", "ZeroWaste", "SustainableFuture"],
    ),
];

const DEFAULT_TAGS: [&str; 4] = ["Future", "Innovation", "Technology", "Progress"];

const LOCATIONS: [&str; 7] = ["New York", "London", "Tokyo", "Berlin", "Sydney", "", "Remote"];

/// Generate `count` plausible raw items about a subject. Favorable and
/// unfavorable phrasing is chosen with even odds per item.
pub fn generate(subject: &str, count: usize) -> Vec<RawItem> {
    let mut rng = rand::rng();
    let now = Utc::now();
    let batch_stamp = now.timestamp();
    let tag_pool = tag_pool_for(subject);

    (0..count)
        .map(|i| {
            let favorable = rng.random_bool(0.5);
            let phrases = if favorable {
                &FAVORABLE_PHRASES
            } else {
                &UNFAVORABLE_PHRASES
            };
            let phrase = phrases.choose(&mut rng).unwrap();
            let closer = if favorable {
                "This could be a game changer!"
            } else {
                "We need better solutions."
            };
            let body = format!("{phrase} {subject}. {closer}");

            let tag_count = rng.random_range(0..=3usize.min(tag_pool.len()));
            let tags: Vec<String> = tag_pool
                .iter()
                .choose_multiple(&mut rng, tag_count)
                .into_iter()
                .map(|t| t.to_string())
                .collect();

            let created = now - Duration::hours(rng.random_range(1..=MAX_AGE_HOURS));

            RawItem {
                // Batch-local uniqueness only; not a global id.
                id: format!("{SYNTHETIC_ID_PREFIX}{i}_{batch_stamp}"),
                created_utc: created.timestamp(),
                body,
                author: format!("user_{}", rng.random_range(1000..10000)),
                author_location: LOCATIONS.choose(&mut rng).unwrap().to_string(),
                engagement_primary: rng.random_range(0..=1000),
                engagement_secondary: rng.random_range(0..=500),
                tags,
                source_query: subject.to_string(),
            }
        })
        .collect()
}

fn tag_pool_for(subject: &str) -> Vec<&'static str> {
    let subject = subject.to_lowercase();
    let mut pool: Vec<&'static str> = TAG_POOLS
        .iter()
        .filter(|(key, _)| subject.contains(key))
        .flat_map(|(_, tags)| tags.iter().copied())
        .collect();
    if pool.is_empty() {
        pool = DEFAULT_TAGS.to_vec();
    }
    pool
}
