use serde::{Deserialize, Serialize};

use super::domain::AggregateProfile;

/// Normalized metrics reduced from an aggregate profile. Pure, no I/O, no
/// rounding: formatting is a presentation concern.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    pub win_rate: f64,
    pub kda: f64,
    pub avg_cspm: f64,
    pub avg_gpm: f64,
    pub avg_damage_share: f64,
}

impl MetricSummary {
    /// `None` when the profile holds no valid matches; the classifier reports
    /// insufficient data instead of fabricating a 0% win rate.
    pub fn from_profile(profile: &AggregateProfile) -> Option<Self> {
        if profile.valid == 0 {
            return None;
        }
        let valid = f64::from(profile.valid);
        // Deaths floored to 1 by policy: a deathless game must not produce an
        // infinite KDA.
        let deaths = profile.deaths.max(1);

        Some(Self {
            win_rate: f64::from(profile.wins) / valid * 100.0,
            kda: f64::from(profile.kills + profile.assists) / f64::from(deaths),
            avg_cspm: profile.cspm_sum / valid,
            avg_gpm: profile.gpm_sum / valid,
            avg_damage_share: profile.damage_share_sum / valid,
        })
    }
}
