use super::anomaly::{self, ConductFlag};
use super::domain::{
    AggregateProfile, MetricDisplay, PlayerIdentity, ProfileSnapshot, Verdict, VerdictStatus,
};
use super::metrics::MetricSummary;
use super::policy::{RankTier, ScreeningPolicy};

/// Compares computed metrics and conduct flags against the active tier
/// policy and produces the terminal verdict with its reason trail.
pub struct TieredClassifier<'a> {
    policy: &'a ScreeningPolicy,
}

impl<'a> TieredClassifier<'a> {
    pub fn new(policy: &'a ScreeningPolicy) -> Self {
        Self { policy }
    }

    pub fn classify(
        &self,
        identity: &PlayerIdentity,
        profile: &AggregateProfile,
        metrics: &MetricSummary,
        known_rank: Option<RankTier>,
    ) -> Verdict {
        let tier = &self.policy.tier;
        let mut reasons = Vec::new();

        if metrics.win_rate >= tier.win_rate {
            reasons.push(format!(
                "win rate {:.1}% meets the {} tier bound {:.1}%",
                metrics.win_rate,
                tier.tier.label(),
                tier.win_rate
            ));
        }
        if metrics.kda >= tier.kda {
            reasons.push(format!(
                "KDA {:.1} meets the {} tier bound {:.1}",
                metrics.kda,
                tier.tier.label(),
                tier.kda
            ));
        }
        if metrics.avg_cspm >= tier.cspm {
            reasons.push(format!(
                "CS per minute {:.1} meets the {} tier bound {:.1}",
                metrics.avg_cspm,
                tier.tier.label(),
                tier.cspm
            ));
        }
        if metrics.avg_gpm >= tier.gpm {
            reasons.push(format!(
                "gold per minute {:.1} meets the {} tier bound {:.1}",
                metrics.avg_gpm,
                tier.tier.label(),
                tier.gpm
            ));
        }
        if metrics.avg_damage_share >= tier.damage_share {
            reasons.push(format!(
                "damage share {:.1}% meets the {} tier bound {:.1}%",
                metrics.avg_damage_share,
                tier.tier.label(),
                tier.damage_share
            ));
        }

        // The lone lower-bound check: a fresh account is a smurf signal.
        if identity.account_level < self.policy.level.floor {
            reasons.push(format!(
                "account level {} below floor {}",
                identity.account_level, self.policy.level.floor
            ));
        }

        let flags = anomaly::aggregate_flags(profile);
        for flag in &flags {
            reasons.push(flag.label().to_string());
        }

        if let Some(form) = self.policy.recent_form {
            let window = form.window.min(profile.recent_results.len());
            let wins = profile.recent_results[..window]
                .iter()
                .filter(|won| **won)
                .count();
            if window > 0 && wins >= form.min_wins {
                reasons.push(format!("won {wins} of last {window} matches"));
            }
        }

        let over_ceiling = match (self.policy.rank_ceiling, known_rank) {
            (Some(ceiling), Some(rank)) if rank > ceiling => {
                reasons.push(format!(
                    "known rank {rank} above the community ceiling {ceiling}"
                ));
                true
            }
            _ => false,
        };

        let status = if over_ceiling {
            VerdictStatus::Ban
        } else if reasons.is_empty() {
            VerdictStatus::Approve
        } else {
            VerdictStatus::Review
        };

        Verdict {
            status,
            reasons,
            snapshot: Some(self.snapshot(identity, profile, metrics, &flags)),
        }
    }

    fn snapshot(
        &self,
        identity: &PlayerIdentity,
        profile: &AggregateProfile,
        metrics: &MetricSummary,
        flags: &[ConductFlag],
    ) -> ProfileSnapshot {
        let tier = &self.policy.tier;
        let conduct = if flags.is_empty() {
            "none".to_string()
        } else {
            flags
                .iter()
                .map(|flag| flag.label())
                .collect::<Vec<_>>()
                .join(" / ")
        };

        ProfileSnapshot {
            riot_id: identity.riot_id.to_string(),
            profile_url: identity.riot_id.profile_url(),
            account_level: identity.account_level,
            matches: profile.valid,
            level: MetricDisplay::low_side(identity.account_level, self.policy.level.floor),
            win_rate: MetricDisplay::high_side(metrics.win_rate, tier.win_rate, "%"),
            kda: MetricDisplay::high_side(metrics.kda, tier.kda, ""),
            cspm: MetricDisplay::high_side(metrics.avg_cspm, tier.cspm, ""),
            gpm: MetricDisplay::high_side(metrics.avg_gpm, tier.gpm, ""),
            damage_share: MetricDisplay::high_side(
                metrics.avg_damage_share,
                tier.damage_share,
                "%",
            ),
            conduct,
        }
    }
}
