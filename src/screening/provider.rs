use std::future::Future;
use std::time::Duration;

use serde::Deserialize;

use crate::config::ProviderConfig;

use super::domain::{MatchRecord, ParticipantStat, RiotId};

/// Upstream failure classification. Retry eligibility and the user-facing
/// reason both hang off this taxonomy.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("account or match not found")]
    NotFound,
    #[error("provider rejected the API credential")]
    Unauthorized,
    #[error("provider rate limit exceeded")]
    RateLimited,
    #[error("provider upstream failure (status {0})")]
    UpstreamDown(u16),
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("malformed provider response: {0}")]
    Decode(String),
}

impl ProviderError {
    /// Not-found and credential failures are permanent; everything else is
    /// worth another attempt.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, ProviderError::NotFound | ProviderError::Unauthorized)
    }

    /// Reason surfaced to the end user. Diagnostic detail stays in the logs.
    pub fn user_reason(&self) -> &'static str {
        match self {
            ProviderError::NotFound => "account not found",
            ProviderError::Unauthorized => "provider credential rejected",
            ProviderError::RateLimited => "provider rate limit hit, try again later",
            ProviderError::UpstreamDown(_) => "stats provider is currently unavailable",
            ProviderError::Transport(_) | ProviderError::Decode(_) => {
                "stats lookup failed, try again later"
            }
        }
    }
}

/// Stable account resolution result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountIdentity {
    pub puuid: String,
}

/// Platform-scoped summoner data. The summoner id is absent on some shards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummonerInfo {
    pub summoner_id: Option<String>,
    pub level: u32,
}

/// Seam to the external game-statistics provider so the pipeline can be
/// exercised against scripted in-memory implementations.
pub trait MatchStatsProvider: Send + Sync {
    fn account_by_riot_id(
        &self,
        riot_id: &RiotId,
    ) -> impl Future<Output = Result<AccountIdentity, ProviderError>> + Send;

    fn summoner_by_puuid(
        &self,
        puuid: &str,
    ) -> impl Future<Output = Result<SummonerInfo, ProviderError>> + Send;

    fn recent_match_ids(
        &self,
        puuid: &str,
        count: usize,
    ) -> impl Future<Output = Result<Vec<String>, ProviderError>> + Send;

    fn match_by_id(
        &self,
        match_id: &str,
    ) -> impl Future<Output = Result<MatchRecord, ProviderError>> + Send;
}

/// Riot HTTP API client. One instance is shared read-only across concurrent
/// screenings; reqwest pools the underlying connections.
pub struct RiotApiClient {
    http: reqwest::Client,
    api_key: String,
    account_base: String,
    platform_base: String,
}

impl RiotApiClient {
    pub fn new(
        api_key: &str,
        account_region: &str,
        platform_region: &str,
    ) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|err| ProviderError::Transport(err.to_string()))?;

        Ok(Self {
            http,
            api_key: api_key.to_string(),
            account_base: format!("https://{account_region}.api.riotgames.com"),
            platform_base: format!("https://{platform_region}.api.riotgames.com"),
        })
    }

    pub fn from_config(config: &ProviderConfig, api_key: &str) -> Result<Self, ProviderError> {
        Self::new(api_key, &config.account_region, &config.platform_region)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: String,
    ) -> Result<T, ProviderError> {
        let response = self
            .http
            .get(&url)
            .header("X-Riot-Token", &self.api_key)
            .send()
            .await
            .map_err(|err| ProviderError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(classify_status(status));
        }

        response
            .json::<T>()
            .await
            .map_err(|err| ProviderError::Decode(err.to_string()))
    }
}

fn classify_status(status: reqwest::StatusCode) -> ProviderError {
    match status.as_u16() {
        404 => ProviderError::NotFound,
        401 | 403 => ProviderError::Unauthorized,
        429 => ProviderError::RateLimited,
        code if status.is_server_error() => ProviderError::UpstreamDown(code),
        code => ProviderError::Transport(format!("unexpected status {code}")),
    }
}

impl MatchStatsProvider for RiotApiClient {
    async fn account_by_riot_id(&self, riot_id: &RiotId) -> Result<AccountIdentity, ProviderError> {
        let url = format!(
            "{}/riot/account/v1/accounts/by-riot-id/{}/{}",
            self.account_base,
            urlencoding::encode(&riot_id.game_name),
            urlencoding::encode(&riot_id.tag_line),
        );
        let dto: AccountDto = self.get_json(url).await?;
        Ok(AccountIdentity { puuid: dto.puuid })
    }

    async fn summoner_by_puuid(&self, puuid: &str) -> Result<SummonerInfo, ProviderError> {
        let url = format!(
            "{}/lol/summoner/v4/summoners/by-puuid/{}",
            self.platform_base,
            urlencoding::encode(puuid),
        );
        let dto: SummonerDto = self.get_json(url).await?;
        Ok(SummonerInfo {
            summoner_id: dto.id,
            level: dto.summoner_level,
        })
    }

    async fn recent_match_ids(
        &self,
        puuid: &str,
        count: usize,
    ) -> Result<Vec<String>, ProviderError> {
        let url = format!(
            "{}/lol/match/v5/matches/by-puuid/{}/ids?count={}",
            self.account_base,
            urlencoding::encode(puuid),
            count,
        );
        self.get_json(url).await
    }

    async fn match_by_id(&self, match_id: &str) -> Result<MatchRecord, ProviderError> {
        let url = format!(
            "{}/lol/match/v5/matches/{}",
            self.account_base,
            urlencoding::encode(match_id),
        );
        let dto: MatchDto = self.get_json(url).await?;
        Ok(dto.into())
    }
}

#[derive(Debug, Deserialize)]
struct AccountDto {
    puuid: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummonerDto {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    summoner_level: u32,
}

#[derive(Debug, Deserialize)]
struct MatchDto {
    metadata: MatchMetadataDto,
    info: MatchInfoDto,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MatchMetadataDto {
    match_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MatchInfoDto {
    game_duration: u32,
    participants: Vec<ParticipantDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ParticipantDto {
    puuid: String,
    win: bool,
    kills: u32,
    deaths: u32,
    assists: u32,
    #[serde(default)]
    total_minions_killed: u32,
    #[serde(default)]
    neutral_minions_killed: u32,
    #[serde(default)]
    gold_earned: u32,
    #[serde(default)]
    total_damage_dealt_to_champions: u32,
    team_id: u32,
    #[serde(default)]
    item0: u32,
    #[serde(default)]
    item1: u32,
    #[serde(default)]
    item2: u32,
    #[serde(default)]
    item3: u32,
    #[serde(default)]
    item4: u32,
    #[serde(default)]
    item5: u32,
}

impl From<MatchDto> for MatchRecord {
    fn from(dto: MatchDto) -> Self {
        MatchRecord {
            match_id: dto.metadata.match_id,
            duration_secs: dto.info.game_duration,
            participants: dto
                .info
                .participants
                .into_iter()
                .map(ParticipantStat::from)
                .collect(),
        }
    }
}

impl From<ParticipantDto> for ParticipantStat {
    fn from(dto: ParticipantDto) -> Self {
        ParticipantStat {
            puuid: dto.puuid,
            win: dto.win,
            kills: dto.kills,
            deaths: dto.deaths,
            assists: dto.assists,
            minions_killed: dto.total_minions_killed,
            neutral_minions_killed: dto.neutral_minions_killed,
            gold_earned: dto.gold_earned,
            damage_to_champions: dto.total_damage_dealt_to_champions,
            team_id: dto.team_id,
            item_slots: [
                dto.item0 != 0,
                dto.item1 != 0,
                dto.item2 != 0,
                dto.item3 != 0,
                dto.item4 != 0,
                dto.item5 != 0,
            ],
        }
    }
}
