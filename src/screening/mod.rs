//! Match-history screening pipeline.
//!
//! Data flows strictly downward: resilient fetcher -> match aggregator ->
//! metric calculator -> anomaly detector -> tiered classifier -> verdict.
//! The pipeline is stateless across invocations; everything it builds lives
//! and dies inside one screening call.

pub mod aggregate;
pub mod anomaly;
pub mod classify;
pub mod domain;
pub mod fetcher;
pub mod metrics;
pub mod policy;
pub mod provider;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use aggregate::{AggregateOutcome, MatchAggregator, MATCH_WINDOW, MIN_MATCH_SECONDS};
pub use anomaly::ConductFlag;
pub use classify::TieredClassifier;
pub use domain::{
    AggregateProfile, MatchRecord, MetricDisplay, ParticipantStat, PlayerIdentity,
    ProfileSnapshot, RiotId, RiotIdParseError, Verdict, VerdictStatus, INSUFFICIENT_DATA_REASON,
};
pub use fetcher::ResilientFetcher;
pub use metrics::MetricSummary;
pub use policy::{
    LevelPolicy, PacingPolicy, RankTier, RecentFormPolicy, RetryPolicy, ScreeningPolicy, SkillTier,
    TierPolicy,
};
pub use provider::{
    AccountIdentity, MatchStatsProvider, ProviderError, RiotApiClient, SummonerInfo,
};
pub use router::screening_router;
pub use service::{ScreeningRequest, ScreeningService};
