use tracing::{error, info};

use super::aggregate::{AggregateOutcome, MatchAggregator, MATCH_WINDOW};
use super::classify::TieredClassifier;
use super::domain::{PlayerIdentity, RiotId, Verdict};
use super::fetcher::ResilientFetcher;
use super::metrics::MetricSummary;
use super::policy::{RankTier, RetryPolicy, ScreeningPolicy};
use super::provider::{MatchStatsProvider, ProviderError};

/// One screening request. Policy is passed separately so concurrent
/// screenings can run different tiers against the same service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreeningRequest {
    pub riot_id: RiotId,
    /// Bypasses the account-level ceiling (e.g. a moderator-granted role).
    pub exempt_from_ceiling: bool,
    /// Caller-supplied ranked signal, when one exists.
    pub known_rank: Option<RankTier>,
}

/// Facade running the full pipeline: level check, match fetch, aggregation,
/// metric reduction, classification. Stateless across calls; each screening
/// owns its profile for the duration of the call and discards it with the
/// verdict.
pub struct ScreeningService<P> {
    fetcher: ResilientFetcher<P>,
}

impl<P: MatchStatsProvider> ScreeningService<P> {
    pub fn new(provider: P) -> Self {
        Self {
            fetcher: ResilientFetcher::new(provider),
        }
    }

    pub fn with_retry(provider: P, retry: RetryPolicy) -> Self {
        Self {
            fetcher: ResilientFetcher::with_retry(provider, retry),
        }
    }

    /// Screen one player. Never fails: unrecoverable provider errors fold
    /// into an `ERROR` verdict after being logged.
    pub async fn screen(&self, request: &ScreeningRequest, policy: &ScreeningPolicy) -> Verdict {
        let account = match self.fetcher.account_by_riot_id(&request.riot_id).await {
            Ok(account) => account,
            Err(err) => return provider_failure("resolve-account", err),
        };

        let summoner = match self.fetcher.summoner_by_puuid(&account.puuid).await {
            Ok(summoner) => summoner,
            Err(err) => return provider_failure("get-summoner", err),
        };

        let identity = PlayerIdentity {
            riot_id: request.riot_id.clone(),
            puuid: account.puuid,
            summoner_id: summoner.summoner_id,
            account_level: summoner.level,
        };

        // Graduation short-circuits all further analysis; no match fetching.
        if !request.exempt_from_ceiling && identity.account_level >= policy.level.ceiling {
            info!(riot_id = %identity.riot_id, level = identity.account_level, "account graduated by level ceiling");
            return Verdict::graduate(format!(
                "account level {} at or above ceiling {}",
                identity.account_level, policy.level.ceiling
            ));
        }

        let match_ids = match self
            .fetcher
            .recent_match_ids(&identity.puuid, MATCH_WINDOW)
            .await
        {
            Ok(ids) => ids,
            Err(err) => return provider_failure("list-match-ids", err),
        };
        if match_ids.is_empty() {
            return Verdict::insufficient_data();
        }

        let aggregator = MatchAggregator::new(&self.fetcher, policy.pacing);
        let profile = match aggregator.aggregate(&identity.puuid, &match_ids).await {
            AggregateOutcome::Profile(profile) => profile,
            AggregateOutcome::NoValidMatches => return Verdict::insufficient_data(),
        };

        let Some(metrics) = MetricSummary::from_profile(&profile) else {
            return Verdict::insufficient_data();
        };

        TieredClassifier::new(policy).classify(&identity, &profile, &metrics, request.known_rank)
    }
}

fn provider_failure(operation: &'static str, err: ProviderError) -> Verdict {
    error!(operation, error = %err, "screening aborted by provider failure");
    Verdict::error(err.user_reason())
}
