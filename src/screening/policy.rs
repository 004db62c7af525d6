use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Skill band a community admits; selects the threshold bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillTier {
    Beginner,
    Intermediate,
    Advanced,
}

impl SkillTier {
    pub const fn label(self) -> &'static str {
        match self {
            SkillTier::Beginner => "beginner",
            SkillTier::Intermediate => "intermediate",
            SkillTier::Advanced => "advanced",
        }
    }
}

impl fmt::Display for SkillTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SkillTier {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            other => Err(format!(
                "unknown tier '{other}', expected beginner/intermediate/advanced"
            )),
        }
    }
}

/// Statistical thresholds for one skill tier. All five are upper bounds:
/// meeting or exceeding one flags the player as too strong for the tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierPolicy {
    pub tier: SkillTier,
    pub win_rate: f64,
    pub kda: f64,
    pub cspm: f64,
    pub gpm: f64,
    pub damage_share: f64,
}

impl TierPolicy {
    pub fn for_tier(tier: SkillTier) -> Self {
        match tier {
            SkillTier::Beginner => Self {
                tier,
                win_rate: 60.0,
                kda: 4.0,
                cspm: 7.0,
                gpm: 450.0,
                damage_share: 30.0,
            },
            SkillTier::Intermediate => Self {
                tier,
                win_rate: 60.0,
                kda: 4.5,
                cspm: 7.5,
                gpm: 500.0,
                damage_share: 32.0,
            },
            SkillTier::Advanced => Self {
                tier,
                win_rate: 65.0,
                kda: 5.0,
                cspm: 8.5,
                gpm: 550.0,
                damage_share: 35.0,
            },
        }
    }
}

/// Ranked ladder tiers, ascending. Used only for the optional hard-ceiling
/// ban path when the caller supplies a known-rank signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankTier {
    Iron,
    Bronze,
    Silver,
    Gold,
    Platinum,
    Emerald,
    Diamond,
    Master,
    Grandmaster,
    Challenger,
}

impl RankTier {
    pub const fn label(self) -> &'static str {
        match self {
            RankTier::Iron => "iron",
            RankTier::Bronze => "bronze",
            RankTier::Silver => "silver",
            RankTier::Gold => "gold",
            RankTier::Platinum => "platinum",
            RankTier::Emerald => "emerald",
            RankTier::Diamond => "diamond",
            RankTier::Master => "master",
            RankTier::Grandmaster => "grandmaster",
            RankTier::Challenger => "challenger",
        }
    }
}

impl fmt::Display for RankTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RankTier {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "iron" => Ok(Self::Iron),
            "bronze" => Ok(Self::Bronze),
            "silver" => Ok(Self::Silver),
            "gold" => Ok(Self::Gold),
            "platinum" => Ok(Self::Platinum),
            "emerald" => Ok(Self::Emerald),
            "diamond" => Ok(Self::Diamond),
            "master" => Ok(Self::Master),
            "grandmaster" => Ok(Self::Grandmaster),
            "challenger" => Ok(Self::Challenger),
            other => Err(format!("unknown rank tier '{other}'")),
        }
    }
}

/// Account-level bounds: the ceiling graduates an account out of the
/// community, the floor marks suspiciously fresh accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelPolicy {
    pub ceiling: u32,
    pub floor: u32,
}

impl Default for LevelPolicy {
    fn default() -> Self {
        Self {
            ceiling: 200,
            floor: 50,
        }
    }
}

/// Retry budget for provider calls. Fixed delay, no backoff growth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(2),
        }
    }
}

/// Minimum interval between successive match-detail fetches in one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacingPolicy {
    pub min_interval: Duration,
}

impl Default for PacingPolicy {
    fn default() -> Self {
        Self {
            min_interval: Duration::from_millis(500),
        }
    }
}

/// Optional hot-streak signal: at least `min_wins` wins inside the most
/// recent `window` valid matches contributes one extra review reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentFormPolicy {
    pub window: usize,
    pub min_wins: usize,
}

/// Full policy bundle for one screening call. Supplied by the caller and
/// never mutated by the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreeningPolicy {
    pub tier: TierPolicy,
    pub level: LevelPolicy,
    pub rank_ceiling: Option<RankTier>,
    pub recent_form: Option<RecentFormPolicy>,
    pub pacing: PacingPolicy,
}

impl ScreeningPolicy {
    pub fn for_tier(tier: SkillTier) -> Self {
        Self {
            tier: TierPolicy::for_tier(tier),
            level: LevelPolicy::default(),
            rank_ceiling: None,
            recent_form: None,
            pacing: PacingPolicy::default(),
        }
    }
}
