use tracing::debug;

use super::anomaly;
use super::domain::{AggregateProfile, MatchRecord};
use super::fetcher::ResilientFetcher;
use super::policy::PacingPolicy;
use super::provider::MatchStatsProvider;

/// Largest match window a screening considers.
pub const MATCH_WINDOW: usize = 20;
/// Matches shorter than this are remakes and carry no signal.
pub const MIN_MATCH_SECONDS: u32 = 300;

/// Result of aggregating a match window.
#[derive(Debug, Clone, PartialEq)]
pub enum AggregateOutcome {
    Profile(AggregateProfile),
    /// Every match was filtered or failed; distinct from a zero-filled
    /// profile so the classifier reports insufficient data.
    NoValidMatches,
}

/// Iterates a bounded window of match ids and accumulates raw counters.
///
/// One bad match never aborts the batch: individual fetch failures are
/// logged and skipped. Pacing between detail fetches is this caller's
/// discipline, not the fetcher's.
pub struct MatchAggregator<'a, P> {
    fetcher: &'a ResilientFetcher<P>,
    pacing: PacingPolicy,
}

impl<'a, P: MatchStatsProvider> MatchAggregator<'a, P> {
    pub fn new(fetcher: &'a ResilientFetcher<P>, pacing: PacingPolicy) -> Self {
        Self { fetcher, pacing }
    }

    pub async fn aggregate(&self, puuid: &str, match_ids: &[String]) -> AggregateOutcome {
        let mut profile = AggregateProfile::default();

        for (index, match_id) in match_ids.iter().take(MATCH_WINDOW).enumerate() {
            if index > 0 {
                tokio::time::sleep(self.pacing.min_interval).await;
            }

            let record = match self.fetcher.match_by_id(match_id).await {
                Ok(record) => record,
                Err(err) => {
                    debug!(%match_id, error = %err, "skipping match after fetch failure");
                    continue;
                }
            };

            fold_match(&mut profile, puuid, &record);
        }

        if profile.valid == 0 {
            AggregateOutcome::NoValidMatches
        } else {
            AggregateOutcome::Profile(profile)
        }
    }
}

fn fold_match(profile: &mut AggregateProfile, puuid: &str, record: &MatchRecord) {
    if record.duration_secs < MIN_MATCH_SECONDS {
        debug!(match_id = %record.match_id, duration = record.duration_secs, "discarding remake");
        return;
    }

    let Some(me) = record
        .participants
        .iter()
        .find(|participant| participant.puuid == puuid)
    else {
        debug!(match_id = %record.match_id, "target participant absent, discarding match");
        return;
    };

    let duration_min = f64::from(record.duration_secs) / 60.0;
    let team_damage: u64 = record
        .participants
        .iter()
        .filter(|participant| participant.team_id == me.team_id)
        .map(|participant| u64::from(participant.damage_to_champions))
        .sum();

    profile.valid += 1;
    if me.win {
        profile.wins += 1;
    }
    profile.kills += me.kills;
    profile.deaths += me.deaths;
    profile.assists += me.assists;
    profile.cspm_sum += f64::from(me.creep_score()) / duration_min;
    profile.gpm_sum += f64::from(me.gold_earned) / duration_min;

    let damage_share = if team_damage > 0 {
        Some(f64::from(me.damage_to_champions) / team_damage as f64 * 100.0)
    } else {
        None
    };
    if let Some(share) = damage_share {
        profile.damage_share_sum += share;
    }

    let conduct = anomaly::match_conduct(me, record.duration_secs, damage_share);
    profile.excess_death_games += u32::from(conduct.excess_deaths);
    profile.no_item_games += u32::from(conduct.item_abandonment);
    profile.low_damage_games += u32::from(conduct.damage_withholding);
    profile.early_forfeit_games += u32::from(conduct.early_forfeit);

    profile.recent_results.push(me.win);
}
