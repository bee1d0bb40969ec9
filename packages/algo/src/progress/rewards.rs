//! Reward tiers.
//!
//! A tier is earned iff its star threshold is at or below the learner's total stars.
//! Nothing is stored: the earned set is recomputed from the total on every read.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardTier {
    pub id: String,
    pub stars_required: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub description: String,
}

impl RewardTier {
    pub fn new(id: &str, stars_required: i64, name: &str, icon: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            stars_required,
            name: name.to_string(),
            icon: icon.to_string(),
            description: description.to_string(),
        }
    }

    pub fn default_table() -> Vec<RewardTier> {
        vec![
            RewardTier::new("sprout", 25, "Sprout", "🌱", "Your first 25 stars"),
            RewardTier::new("explorer", 50, "Explorer", "🧭", "50 stars collected"),
            RewardTier::new("star_catcher", 100, "Star Catcher", "⭐", "100 stars collected"),
            RewardTier::new("rocket", 200, "Rocket", "🚀", "200 stars collected"),
            RewardTier::new("champion", 400, "Champion", "🏆", "400 stars collected"),
            RewardTier::new("legend", 800, "Legend", "👑", "800 stars collected"),
        ]
    }
}

/// Sort a tier table ascending by threshold; equal thresholds keep their table order.
pub fn normalize_tiers(mut tiers: Vec<RewardTier>) -> Vec<RewardTier> {
    tiers.sort_by_key(|t| t.stars_required);
    tiers
}

/// Tiers earned at `total_stars`, plus the lowest unearned tier.
pub fn derive_tiers(tiers: &[RewardTier], total_stars: i64) -> (Vec<RewardTier>, Option<RewardTier>) {
    let mut earned: Vec<RewardTier> = tiers
        .iter()
        .filter(|t| t.stars_required <= total_stars)
        .cloned()
        .collect();
    earned.sort_by_key(|t| t.stars_required);

    let next = tiers
        .iter()
        .filter(|t| t.stars_required > total_stars)
        .min_by_key(|t| t.stars_required)
        .cloned();

    (earned, next)
}

/// A tier annotated with whether it is earned.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierStatus {
    #[serde(flatten)]
    pub tier: RewardTier,
    pub earned: bool,
    /// Stars still missing, zero once earned
    pub stars_missing: i64,
}

pub fn tier_statuses(tiers: &[RewardTier], total_stars: i64) -> Vec<TierStatus> {
    let mut statuses: Vec<TierStatus> = tiers
        .iter()
        .map(|tier| TierStatus {
            tier: tier.clone(),
            earned: tier.stars_required <= total_stars,
            stars_missing: (tier.stars_required - total_stars).max(0),
        })
        .collect();
    statuses.sort_by_key(|s| s.tier.stars_required);
    statuses
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiers() -> Vec<RewardTier> {
        vec![
            RewardTier::new("t100", 100, "", "", ""),
            RewardTier::new("t25", 25, "", "", ""),
            RewardTier::new("t50", 50, "", "", ""),
        ]
    }

    fn thresholds(tiers: &[RewardTier]) -> Vec<i64> {
        tiers.iter().map(|t| t.stars_required).collect()
    }

    #[test]
    fn test_boundary_49() {
        let (earned, next) = derive_tiers(&tiers(), 49);
        assert_eq!(thresholds(&earned), vec![25]);
        assert_eq!(next.unwrap().stars_required, 50);
    }

    #[test]
    fn test_boundary_50() {
        let (earned, next) = derive_tiers(&tiers(), 50);
        assert_eq!(thresholds(&earned), vec![25, 50]);
        assert_eq!(next.unwrap().stars_required, 100);
    }

    #[test]
    fn test_all_earned() {
        let (earned, next) = derive_tiers(&tiers(), 1000);
        assert_eq!(earned.len(), 3);
        assert!(next.is_none());
    }

    #[test]
    fn test_none_earned() {
        let (earned, next) = derive_tiers(&tiers(), 0);
        assert!(earned.is_empty());
        assert_eq!(next.unwrap().id, "t25");
    }

    #[test]
    fn test_normalize_sorts() {
        assert_eq!(thresholds(&normalize_tiers(tiers())), vec![25, 50, 100]);
    }

    #[test]
    fn test_default_table_is_sorted() {
        let table = RewardTier::default_table();
        assert_eq!(table, normalize_tiers(table.clone()));
    }

    #[test]
    fn test_tier_statuses() {
        let statuses = tier_statuses(&tiers(), 30);
        assert!(statuses[0].earned);
        assert_eq!(statuses[0].stars_missing, 0);
        assert!(!statuses[1].earned);
        assert_eq!(statuses[1].stars_missing, 20);
    }
}
