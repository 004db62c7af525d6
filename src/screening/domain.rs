use std::fmt;

use serde::{Deserialize, Serialize};

/// Player-supplied identity in the `Name#Tag` form.
///
/// Display names may legally contain `#`; the tag may not, so parsing splits
/// on the last `#`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RiotId {
    pub game_name: String,
    pub tag_line: String,
}

impl RiotId {
    pub fn parse(raw: &str) -> Result<Self, RiotIdParseError> {
        let trimmed = raw.trim();
        let (name, tag) = trimmed
            .rsplit_once('#')
            .ok_or(RiotIdParseError::MissingTag)?;
        if name.is_empty() {
            return Err(RiotIdParseError::EmptyName);
        }
        if tag.is_empty() {
            return Err(RiotIdParseError::EmptyTag);
        }
        Ok(Self {
            game_name: name.to_string(),
            tag_line: tag.to_string(),
        })
    }

    /// Public profile link included in snapshots for reviewers.
    pub fn profile_url(&self) -> String {
        format!(
            "https://www.op.gg/summoners/jp/{}-{}",
            self.game_name.replace(' ', "%20"),
            self.tag_line
        )
    }
}

impl fmt::Display for RiotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.game_name, self.tag_line)
    }
}

impl std::str::FromStr for RiotId {
    type Err = RiotIdParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::parse(raw)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RiotIdParseError {
    #[error("riot id must be in the form Name#Tag")]
    MissingTag,
    #[error("riot id name part is empty")]
    EmptyName,
    #[error("riot id tag part is empty")]
    EmptyTag,
}

/// Resolved identity for a single screening run. Never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerIdentity {
    pub riot_id: RiotId,
    pub puuid: String,
    pub summoner_id: Option<String>,
    pub account_level: u32,
}

/// Provider-owned match detail, immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub match_id: String,
    pub duration_secs: u32,
    pub participants: Vec<ParticipantStat>,
}

/// Per-player-per-match projection of a MatchRecord.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantStat {
    pub puuid: String,
    pub win: bool,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub minions_killed: u32,
    pub neutral_minions_killed: u32,
    pub gold_earned: u32,
    pub damage_to_champions: u32,
    pub team_id: u32,
    pub item_slots: [bool; 6],
}

impl ParticipantStat {
    pub fn creep_score(&self) -> u32 {
        self.minions_killed + self.neutral_minions_killed
    }

    pub fn items_equipped(&self) -> usize {
        self.item_slots.iter().filter(|slot| **slot).count()
    }
}

/// Accumulator over the valid subset of a fetched match window.
///
/// Built fresh per screening invocation and discarded with the verdict.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateProfile {
    pub valid: u32,
    pub wins: u32,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub cspm_sum: f64,
    pub gpm_sum: f64,
    pub damage_share_sum: f64,
    pub excess_death_games: u32,
    pub no_item_games: u32,
    pub low_damage_games: u32,
    pub early_forfeit_games: u32,
    /// Win/loss of each valid match in fetch order (most recent first).
    pub recent_results: Vec<bool>,
}

impl AggregateProfile {
    pub fn losses(&self) -> u32 {
        self.valid.saturating_sub(self.wins)
    }
}

/// Terminal classification of a screening run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictStatus {
    Approve,
    Review,
    Ban,
    Graduate,
    Error,
}

impl VerdictStatus {
    pub const fn label(self) -> &'static str {
        match self {
            VerdictStatus::Approve => "approve",
            VerdictStatus::Review => "review",
            VerdictStatus::Ban => "ban",
            VerdictStatus::Graduate => "graduate",
            VerdictStatus::Error => "error",
        }
    }
}

/// Verdict returned to the caller; the core never re-enters it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub status: VerdictStatus,
    pub reasons: Vec<String>,
    pub snapshot: Option<ProfileSnapshot>,
}

impl Verdict {
    pub fn error(reason: impl Into<String>) -> Self {
        Self {
            status: VerdictStatus::Error,
            reasons: vec![reason.into()],
            snapshot: None,
        }
    }

    pub fn graduate(reason: impl Into<String>) -> Self {
        Self {
            status: VerdictStatus::Graduate,
            reasons: vec![reason.into()],
            snapshot: None,
        }
    }

    pub fn insufficient_data() -> Self {
        Self {
            status: VerdictStatus::Review,
            reasons: vec![INSUFFICIENT_DATA_REASON.to_string()],
            snapshot: None,
        }
    }
}

/// Reason string for screenings that produced no usable matches. Absence of
/// data routes to review, never to an error.
pub const INSUFFICIENT_DATA_REASON: &str = "insufficient data";

/// Formatted metric value with a marker for values that crossed their bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricDisplay {
    pub text: String,
    pub flagged: bool,
}

impl MetricDisplay {
    /// Upper-bound metric: flagged when the value meets or exceeds the bound.
    pub fn high_side(value: f64, threshold: f64, unit: &str) -> Self {
        Self {
            text: format!("{value:.1}{unit}"),
            flagged: value >= threshold,
        }
    }

    /// Lower-bound metric: flagged when the value falls below the bound.
    pub fn low_side(value: u32, floor: u32) -> Self {
        Self {
            text: value.to_string(),
            flagged: value < floor,
        }
    }
}

impl fmt::Display for MetricDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.flagged {
            write!(f, "{} [!]", self.text)
        } else {
            write!(f, "{}", self.text)
        }
    }
}

/// Reviewer-facing snapshot attached to classified verdicts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    pub riot_id: String,
    pub profile_url: String,
    pub account_level: u32,
    pub matches: u32,
    pub level: MetricDisplay,
    pub win_rate: MetricDisplay,
    pub kda: MetricDisplay,
    pub cspm: MetricDisplay,
    pub gpm: MetricDisplay,
    pub damage_share: MetricDisplay,
    pub conduct: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn riot_id_splits_on_last_hash() {
        let id = RiotId::parse("odd#name#JP1").expect("parses");
        assert_eq!(id.game_name, "odd#name");
        assert_eq!(id.tag_line, "JP1");
    }

    #[test]
    fn riot_id_rejects_missing_tag() {
        assert_eq!(RiotId::parse("plainname"), Err(RiotIdParseError::MissingTag));
        assert_eq!(RiotId::parse("name#"), Err(RiotIdParseError::EmptyTag));
        assert_eq!(RiotId::parse("#tag"), Err(RiotIdParseError::EmptyName));
    }

    #[test]
    fn profile_url_encodes_spaces() {
        let id = RiotId::parse("two words#JP1").expect("parses");
        assert_eq!(
            id.profile_url(),
            "https://www.op.gg/summoners/jp/two%20words-JP1"
        );
    }

    #[test]
    fn metric_display_markers() {
        let high = MetricDisplay::high_side(64.7058, 60.0, "%");
        assert_eq!(high.text, "64.7%");
        assert!(high.flagged);
        assert_eq!(high.to_string(), "64.7% [!]");

        let low = MetricDisplay::low_side(42, 50);
        assert_eq!(low.text, "42");
        assert!(low.flagged);

        let fine = MetricDisplay::high_side(28.0, 32.0, "%");
        assert!(!fine.flagged);
        assert_eq!(fine.to_string(), "28.0%");
    }
}
