use super::common::*;
use crate::screening::classify::TieredClassifier;
use crate::screening::domain::{AggregateProfile, PlayerIdentity, VerdictStatus};
use crate::screening::metrics::MetricSummary;
use crate::screening::policy::{RankTier, RecentFormPolicy, SkillTier};

fn identity(level: u32) -> PlayerIdentity {
    PlayerIdentity {
        riot_id: riot_id(),
        puuid: PUUID.to_string(),
        summoner_id: Some("summoner-1".to_string()),
        account_level: level,
    }
}

fn quiet_profile() -> AggregateProfile {
    AggregateProfile {
        valid: 10,
        wins: 5,
        kills: 30,
        deaths: 40,
        assists: 50,
        recent_results: vec![true, false, true, false, true, false, true, false, true, false],
        ..AggregateProfile::default()
    }
}

fn quiet_metrics() -> MetricSummary {
    MetricSummary {
        win_rate: 50.0,
        kda: 2.0,
        avg_cspm: 5.5,
        avg_gpm: 380.0,
        avg_damage_share: 22.0,
    }
}

#[test]
fn within_bounds_and_clean_conduct_approves() {
    let policy = policy(SkillTier::Intermediate);
    let classifier = TieredClassifier::new(&policy);

    let verdict = classifier.classify(&identity(120), &quiet_profile(), &quiet_metrics(), None);

    assert_eq!(verdict.status, VerdictStatus::Approve);
    assert!(verdict.reasons.is_empty());
    let snapshot = verdict.snapshot.expect("classified verdicts carry a snapshot");
    assert_eq!(snapshot.conduct, "none");
    assert!(!snapshot.win_rate.flagged);
}

#[test]
fn each_crossed_threshold_contributes_one_reason() {
    let policy = policy(SkillTier::Intermediate);
    let classifier = TieredClassifier::new(&policy);

    let metrics = MetricSummary {
        win_rate: 64.7,
        kda: 5.8,
        avg_cspm: 7.8,
        avg_gpm: 470.0,
        avg_damage_share: 28.0,
    };

    let verdict = classifier.classify(&identity(120), &quiet_profile(), &metrics, None);

    assert_eq!(verdict.status, VerdictStatus::Review);
    assert_eq!(verdict.reasons.len(), 3);
    assert!(verdict.reasons[0].contains("win rate"));
    assert!(verdict.reasons[1].contains("KDA"));
    assert!(verdict.reasons[2].contains("CS per minute"));
}

#[test]
fn account_level_floor_is_the_lone_lower_bound() {
    let policy = policy(SkillTier::Intermediate);
    let classifier = TieredClassifier::new(&policy);

    let verdict = classifier.classify(&identity(42), &quiet_profile(), &quiet_metrics(), None);

    assert_eq!(verdict.status, VerdictStatus::Review);
    assert_eq!(verdict.reasons, vec!["account level 42 below floor 50".to_string()]);
    let snapshot = verdict.snapshot.expect("snapshot");
    assert!(snapshot.level.flagged);
}

#[test]
fn anomaly_flags_are_appended_verbatim() {
    let policy = policy(SkillTier::Intermediate);
    let classifier = TieredClassifier::new(&policy);

    let mut profile = quiet_profile();
    profile.no_item_games = 1;

    let verdict = classifier.classify(&identity(120), &profile, &quiet_metrics(), None);

    assert_eq!(verdict.status, VerdictStatus::Review);
    assert_eq!(verdict.reasons, vec!["item abandonment".to_string()]);
    assert_eq!(verdict.snapshot.expect("snapshot").conduct, "item abandonment");
}

#[test]
fn known_rank_above_the_ceiling_bans() {
    let mut policy = policy(SkillTier::Beginner);
    policy.rank_ceiling = Some(RankTier::Gold);
    let classifier = TieredClassifier::new(&policy);

    let verdict = classifier.classify(
        &identity(120),
        &quiet_profile(),
        &quiet_metrics(),
        Some(RankTier::Diamond),
    );

    assert_eq!(verdict.status, VerdictStatus::Ban);
    assert!(verdict
        .reasons
        .iter()
        .any(|reason| reason.contains("known rank diamond")));
}

#[test]
fn missing_rank_signal_defaults_to_review_not_ban() {
    let mut policy = policy(SkillTier::Beginner);
    policy.rank_ceiling = Some(RankTier::Gold);
    let classifier = TieredClassifier::new(&policy);

    let metrics = MetricSummary {
        win_rate: 70.0,
        ..quiet_metrics()
    };
    let verdict = classifier.classify(&identity(120), &quiet_profile(), &metrics, None);

    assert_eq!(verdict.status, VerdictStatus::Review);
}

#[test]
fn rank_at_the_ceiling_does_not_ban() {
    let mut policy = policy(SkillTier::Beginner);
    policy.rank_ceiling = Some(RankTier::Gold);
    let classifier = TieredClassifier::new(&policy);

    let verdict = classifier.classify(
        &identity(120),
        &quiet_profile(),
        &quiet_metrics(),
        Some(RankTier::Gold),
    );

    assert_eq!(verdict.status, VerdictStatus::Approve);
}

#[test]
fn recent_form_is_an_opt_in_extension() {
    let mut policy = policy(SkillTier::Intermediate);
    policy.recent_form = Some(RecentFormPolicy {
        window: 5,
        min_wins: 4,
    });
    let classifier = TieredClassifier::new(&policy);

    let mut profile = quiet_profile();
    profile.recent_results = vec![true, true, true, true, false, false, true, false, true, false];

    let verdict = classifier.classify(&identity(120), &profile, &quiet_metrics(), None);

    assert_eq!(verdict.status, VerdictStatus::Review);
    assert_eq!(verdict.reasons, vec!["won 4 of last 5 matches".to_string()]);

    // Without the opt-in the same profile approves.
    let baseline = super::common::policy(SkillTier::Intermediate);
    let verdict = TieredClassifier::new(&baseline).classify(
        &identity(120),
        &profile,
        &quiet_metrics(),
        None,
    );
    assert_eq!(verdict.status, VerdictStatus::Approve);
}
