use serde::{Deserialize, Serialize};

use super::domain::{AggregateProfile, ParticipantStat};

/// Deaths in a single match that mark it as an excess-death game.
pub const EXCESS_DEATHS_PER_MATCH: u32 = 12;
/// Minimum occupied item slots expected once a match runs long enough.
const MIN_ITEM_SLOTS: usize = 2;
const ITEM_CHECK_MIN_SECONDS: u32 = 600;
const LOW_DAMAGE_SHARE_PCT: f64 = 5.0;
/// A loss shorter than this counts as an early forfeit.
pub const EARLY_FORFEIT_SECONDS: u32 = 1200;

const EXCESS_DEATH_GAME_RATIO: f64 = 0.3;
const LOW_DAMAGE_GAME_MIN: u32 = 2;
const EARLY_FORFEIT_LOSS_RATIO: f64 = 0.5;

/// Per-match conduct predicates, evaluated while aggregating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchConduct {
    pub excess_deaths: bool,
    pub item_abandonment: bool,
    pub damage_withholding: bool,
    pub early_forfeit: bool,
}

/// `damage_share` is `None` when the team dealt zero damage; such matches are
/// excluded from the withholding predicate entirely.
pub fn match_conduct(
    stat: &ParticipantStat,
    duration_secs: u32,
    damage_share: Option<f64>,
) -> MatchConduct {
    MatchConduct {
        excess_deaths: stat.deaths >= EXCESS_DEATHS_PER_MATCH,
        item_abandonment: stat.items_equipped() < MIN_ITEM_SLOTS
            && duration_secs > ITEM_CHECK_MIN_SECONDS,
        damage_withholding: damage_share
            .map(|share| share < LOW_DAMAGE_SHARE_PCT)
            .unwrap_or(false),
        early_forfeit: !stat.win && duration_secs < EARLY_FORFEIT_SECONDS,
    }
}

/// Conduct concern raised over a full match window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConductFlag {
    ExcessDeaths,
    ItemAbandonment,
    DamageWithholding,
    EarlyForfeit,
}

impl ConductFlag {
    pub const fn label(self) -> &'static str {
        match self {
            ConductFlag::ExcessDeaths => "excess deaths",
            ConductFlag::ItemAbandonment => "item abandonment",
            ConductFlag::DamageWithholding => "damage withholding",
            ConductFlag::EarlyForfeit => "early forfeit",
        }
    }
}

/// Aggregate flag rules over the whole batch. Flags are independent and the
/// evaluation order never changes the result set.
pub fn aggregate_flags(profile: &AggregateProfile) -> Vec<ConductFlag> {
    let mut flags = Vec::new();

    if f64::from(profile.excess_death_games) >= f64::from(profile.valid) * EXCESS_DEATH_GAME_RATIO
        && profile.excess_death_games > 0
    {
        flags.push(ConductFlag::ExcessDeaths);
    }
    if profile.no_item_games >= 1 {
        flags.push(ConductFlag::ItemAbandonment);
    }
    if profile.low_damage_games >= LOW_DAMAGE_GAME_MIN {
        flags.push(ConductFlag::DamageWithholding);
    }

    // The forfeit ratio is meaningless without losses; skip, never flag.
    let losses = profile.losses();
    if losses > 0
        && f64::from(profile.early_forfeit_games) / f64::from(losses) >= EARLY_FORFEIT_LOSS_RATIO
    {
        flags.push(ConductFlag::EarlyForfeit);
    }

    flags
}
