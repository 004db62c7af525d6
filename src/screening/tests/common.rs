use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use crate::screening::domain::{MatchRecord, ParticipantStat, RiotId};
use crate::screening::policy::{ScreeningPolicy, SkillTier};
use crate::screening::provider::{
    AccountIdentity, MatchStatsProvider, ProviderError, SummonerInfo,
};
use crate::screening::service::{ScreeningRequest, ScreeningService};

pub(super) const PUUID: &str = "puuid-under-test";

pub(super) fn riot_id() -> RiotId {
    RiotId::parse("Screened Player#JP1").expect("valid riot id")
}

pub(super) fn request() -> ScreeningRequest {
    ScreeningRequest {
        riot_id: riot_id(),
        exempt_from_ceiling: false,
        known_rank: None,
    }
}

pub(super) fn policy(tier: SkillTier) -> ScreeningPolicy {
    ScreeningPolicy::for_tier(tier)
}

pub(super) fn account() -> AccountIdentity {
    AccountIdentity {
        puuid: PUUID.to_string(),
    }
}

pub(super) fn summoner(level: u32) -> SummonerInfo {
    SummonerInfo {
        summoner_id: Some("summoner-1".to_string()),
        level,
    }
}

/// Participant with unremarkable defaults; tests override what they probe.
pub(super) fn participant(puuid: &str, team_id: u32, win: bool) -> ParticipantStat {
    ParticipantStat {
        puuid: puuid.to_string(),
        win,
        kills: 4,
        deaths: 4,
        assists: 6,
        minions_killed: 150,
        neutral_minions_killed: 30,
        gold_earned: 10_000,
        damage_to_champions: 12_000,
        team_id,
        item_slots: [true; 6],
    }
}

/// Full ten-player match around `me`: four allies dealing `ally_damage`
/// each, five enemies on the opposing team.
pub(super) fn five_v_five(
    match_id: &str,
    duration_secs: u32,
    me: ParticipantStat,
    ally_damage: u32,
) -> MatchRecord {
    let my_team = me.team_id;
    let enemy_team = if my_team == 100 { 200 } else { 100 };

    let mut participants = vec![me];
    for index in 0..4 {
        let mut ally = participant(&format!("ally-{index}"), my_team, participants[0].win);
        ally.damage_to_champions = ally_damage;
        participants.push(ally);
    }
    for index in 0..5 {
        participants.push(participant(
            &format!("enemy-{index}"),
            enemy_team,
            !participants[0].win,
        ));
    }

    MatchRecord {
        match_id: match_id.to_string(),
        duration_secs,
        participants,
    }
}

enum ScriptedMatch {
    Record(MatchRecord),
    NotFound,
}

/// In-memory provider replaying scripted responses, mirroring how the
/// repository seam is faked elsewhere in the test suite.
#[derive(Default)]
pub(super) struct ScriptedProvider {
    accounts: Mutex<VecDeque<Result<AccountIdentity, ProviderError>>>,
    summoners: Mutex<VecDeque<Result<SummonerInfo, ProviderError>>>,
    match_ids: Mutex<VecDeque<Result<Vec<String>, ProviderError>>>,
    matches: Mutex<HashMap<String, ScriptedMatch>>,
    account_calls: AtomicU32,
    summoner_calls: AtomicU32,
    ids_calls: AtomicU32,
    match_calls: AtomicU32,
}

impl ScriptedProvider {
    pub(super) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(super) fn push_account(&self, result: Result<AccountIdentity, ProviderError>) {
        self.accounts
            .lock()
            .expect("account script poisoned")
            .push_back(result);
    }

    pub(super) fn push_summoner(&self, result: Result<SummonerInfo, ProviderError>) {
        self.summoners
            .lock()
            .expect("summoner script poisoned")
            .push_back(result);
    }

    pub(super) fn push_match_ids(&self, result: Result<Vec<String>, ProviderError>) {
        self.match_ids
            .lock()
            .expect("match-id script poisoned")
            .push_back(result);
    }

    pub(super) fn insert_match(&self, record: MatchRecord) {
        self.matches
            .lock()
            .expect("match script poisoned")
            .insert(record.match_id.clone(), ScriptedMatch::Record(record));
    }

    pub(super) fn fail_match(&self, match_id: &str) {
        self.matches
            .lock()
            .expect("match script poisoned")
            .insert(match_id.to_string(), ScriptedMatch::NotFound);
    }

    pub(super) fn account_calls(&self) -> u32 {
        self.account_calls.load(Ordering::Relaxed)
    }

    pub(super) fn ids_calls(&self) -> u32 {
        self.ids_calls.load(Ordering::Relaxed)
    }

    pub(super) fn match_calls(&self) -> u32 {
        self.match_calls.load(Ordering::Relaxed)
    }
}

fn exhausted() -> ProviderError {
    ProviderError::Transport("script exhausted".to_string())
}

impl MatchStatsProvider for Arc<ScriptedProvider> {
    async fn account_by_riot_id(&self, _riot_id: &RiotId) -> Result<AccountIdentity, ProviderError> {
        self.account_calls.fetch_add(1, Ordering::Relaxed);
        self.accounts
            .lock()
            .expect("account script poisoned")
            .pop_front()
            .unwrap_or_else(|| Err(exhausted()))
    }

    async fn summoner_by_puuid(&self, _puuid: &str) -> Result<SummonerInfo, ProviderError> {
        self.summoner_calls.fetch_add(1, Ordering::Relaxed);
        self.summoners
            .lock()
            .expect("summoner script poisoned")
            .pop_front()
            .unwrap_or_else(|| Err(exhausted()))
    }

    async fn recent_match_ids(
        &self,
        _puuid: &str,
        _count: usize,
    ) -> Result<Vec<String>, ProviderError> {
        self.ids_calls.fetch_add(1, Ordering::Relaxed);
        self.match_ids
            .lock()
            .expect("match-id script poisoned")
            .pop_front()
            .unwrap_or_else(|| Err(exhausted()))
    }

    async fn match_by_id(&self, match_id: &str) -> Result<MatchRecord, ProviderError> {
        self.match_calls.fetch_add(1, Ordering::Relaxed);
        match self
            .matches
            .lock()
            .expect("match script poisoned")
            .get(match_id)
        {
            Some(ScriptedMatch::Record(record)) => Ok(record.clone()),
            Some(ScriptedMatch::NotFound) | None => Err(ProviderError::NotFound),
        }
    }
}

pub(super) fn service_with(provider: Arc<ScriptedProvider>) -> ScreeningService<Arc<ScriptedProvider>> {
    ScreeningService::new(provider)
}
