use std::future::Future;

use tracing::warn;

use super::domain::{MatchRecord, RiotId};
use super::policy::RetryPolicy;
use super::provider::{AccountIdentity, MatchStatsProvider, ProviderError, SummonerInfo};

/// Wraps every provider operation in a bounded retry loop.
///
/// Permanent failures (not-found, unauthorized) surface immediately; anything
/// else gets up to `max_attempts` tries with a fixed inter-attempt delay.
/// After exhausting the budget the original error is returned unchanged.
pub struct ResilientFetcher<P> {
    provider: P,
    retry: RetryPolicy,
}

impl<P: MatchStatsProvider> ResilientFetcher<P> {
    pub fn new(provider: P) -> Self {
        Self::with_retry(provider, RetryPolicy::default())
    }

    pub fn with_retry(provider: P, retry: RetryPolicy) -> Self {
        Self { provider, retry }
    }

    async fn attempt<T, F, Fut>(
        &self,
        operation: &'static str,
        mut call: F,
    ) -> Result<T, ProviderError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ProviderError>>,
    {
        let mut attempt = 1u32;
        loop {
            match call().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_retryable() && attempt < self.retry.max_attempts => {
                    warn!(operation, attempt, error = %err, "provider call failed, retrying");
                    tokio::time::sleep(self.retry.delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    pub async fn account_by_riot_id(
        &self,
        riot_id: &RiotId,
    ) -> Result<AccountIdentity, ProviderError> {
        self.attempt("resolve-account", || {
            self.provider.account_by_riot_id(riot_id)
        })
        .await
    }

    pub async fn summoner_by_puuid(&self, puuid: &str) -> Result<SummonerInfo, ProviderError> {
        self.attempt("get-summoner", || self.provider.summoner_by_puuid(puuid))
            .await
    }

    pub async fn recent_match_ids(
        &self,
        puuid: &str,
        count: usize,
    ) -> Result<Vec<String>, ProviderError> {
        self.attempt("list-match-ids", || {
            self.provider.recent_match_ids(puuid, count)
        })
        .await
    }

    pub async fn match_by_id(&self, match_id: &str) -> Result<MatchRecord, ProviderError> {
        self.attempt("get-match", || self.provider.match_by_id(match_id))
            .await
    }
}
