use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::config::ScreeningDefaults;

use super::domain::RiotId;
use super::policy::{RankTier, ScreeningPolicy, SkillTier};
use super::provider::MatchStatsProvider;
use super::service::{ScreeningRequest, ScreeningService};

/// Screening request body. Tier and level bounds fall back to the service
/// defaults when omitted.
#[derive(Debug, Deserialize)]
pub struct ScreeningHttpRequest {
    pub riot_id: String,
    #[serde(default)]
    pub tier: Option<SkillTier>,
    #[serde(default)]
    pub exempt: bool,
    #[serde(default)]
    pub known_rank: Option<RankTier>,
}

pub struct ScreeningState<P> {
    service: Arc<ScreeningService<P>>,
    defaults: ScreeningDefaults,
}

impl<P> Clone for ScreeningState<P> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            defaults: self.defaults.clone(),
        }
    }
}

/// Router builder exposing the screening endpoint.
pub fn screening_router<P>(
    service: Arc<ScreeningService<P>>,
    defaults: ScreeningDefaults,
) -> Router
where
    P: MatchStatsProvider + 'static,
{
    Router::new()
        .route("/api/v1/screenings", post(screen_handler::<P>))
        .with_state(ScreeningState { service, defaults })
}

pub(crate) async fn screen_handler<P>(
    State(state): State<ScreeningState<P>>,
    Json(payload): Json<ScreeningHttpRequest>,
) -> Response
where
    P: MatchStatsProvider + 'static,
{
    let riot_id = match RiotId::parse(&payload.riot_id) {
        Ok(riot_id) => riot_id,
        Err(err) => {
            let body = json!({ "error": err.to_string() });
            return (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response();
        }
    };

    let tier = payload.tier.unwrap_or(state.defaults.default_tier);
    let mut policy = ScreeningPolicy::for_tier(tier);
    policy.level.ceiling = state.defaults.level_ceiling;
    policy.level.floor = state.defaults.level_floor;

    let request = ScreeningRequest {
        riot_id,
        exempt_from_ceiling: payload.exempt,
        known_rank: payload.known_rank,
    };

    let verdict = state.service.screen(&request, &policy).await;
    (StatusCode::OK, Json(verdict)).into_response()
}
