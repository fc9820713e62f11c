//! Built-in delay profiles
//!
//! Weights are the literal values used at sampling time.

use once_cell::sync::Lazy;

use super::{Bucket, DelayProfile};

/// Short gap between two ordinary actions
pub const ACTION: &str = "action";
/// Gap inside a quick burst of inputs
pub const SHORT_ACTION: &str = "short_action";
/// Bank interface interactions
pub const BANK: &str = "bank";
/// Brief attention drift
pub const AFK_SHORT: &str = "afk_short";
/// Long look-away
pub const AFK_LONG: &str = "afk_long";
/// Reaction to an on-screen event
pub const REACTION: &str = "reaction";

static PRESETS: Lazy<Vec<DelayProfile>> = Lazy::new(|| {
    let table: [(&str, Vec<Bucket>); 6] = [
        // 60 / 30 / 10
        (
            ACTION,
            vec![
                Bucket::ticks(1, 2, 60),
                Bucket::ticks(3, 4, 30),
                Bucket::ticks(5, 8, 10),
            ],
        ),
        // 75 / 20 / 5
        (
            SHORT_ACTION,
            vec![
                Bucket::ticks(1, 1, 75),
                Bucket::ticks(2, 2, 20),
                Bucket::ticks(3, 4, 5),
            ],
        ),
        // 50 / 35 / 12 / 3
        (
            BANK,
            vec![
                Bucket::ticks(1, 2, 50),
                Bucket::ticks(2, 3, 35),
                Bucket::ticks(4, 6, 12),
                Bucket::millis(4000, 9000, 3),
            ],
        ),
        // 55 / 35 / 10
        (
            AFK_SHORT,
            vec![
                Bucket::millis(1200, 3000, 55),
                Bucket::millis(3000, 6000, 35),
                Bucket::millis(6000, 12_000, 10),
            ],
        ),
        // 40 / 40 / 15 / 5
        (
            AFK_LONG,
            vec![
                Bucket::millis(10_000, 30_000, 40),
                Bucket::millis(30_000, 60_000, 40),
                Bucket::millis(60_000, 120_000, 15),
                Bucket::millis(120_000, 240_000, 5),
            ],
        ),
        // 70 / 25 / 5
        (
            REACTION,
            vec![
                Bucket::millis(250, 600, 70),
                Bucket::millis(600, 1200, 25),
                Bucket::millis(1200, 2400, 5),
            ],
        ),
    ];

    table
        .into_iter()
        .filter_map(|(name, buckets)| match DelayProfile::new(name, buckets) {
            Ok(profile) => Some(profile),
            Err(e) => {
                log::warn!("Dropping built-in delay profile: {}", e);
                None
            }
        })
        .collect()
});

/// All built-in profiles
pub fn all() -> &'static [DelayProfile] {
    &PRESETS
}

/// Look up a built-in profile by name
pub fn get(name: &str) -> Option<&'static DelayProfile> {
    PRESETS.iter().find(|p| p.name() == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_presets_valid() {
        assert_eq!(all().len(), 6);
        for profile in all() {
            assert!(profile.total_weight() > 0);
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(get(BANK).map(|p| p.buckets().len()), Some(4));
        assert!(get("missing").is_none());
    }
}
