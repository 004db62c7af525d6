use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use rift_gatekeeper::config::AppConfig;
use rift_gatekeeper::error::AppError;
use rift_gatekeeper::screening::{
    screening_router, RankTier, RiotApiClient, RiotId, ScreeningPolicy, ScreeningRequest,
    ScreeningService, SkillTier, Verdict,
};
use rift_gatekeeper::telemetry;
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Rift Gatekeeper",
    about = "Screen a player's recent match history for community admission review",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Run a single screening from the command line
    Screen(ScreenArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug)]
struct ScreenArgs {
    /// Riot ID in the form Name#Tag
    #[arg(long)]
    riot_id: RiotId,
    /// Tier policy to screen against (beginner/intermediate/advanced)
    #[arg(long)]
    tier: Option<SkillTier>,
    /// Bypass the account-level ceiling
    #[arg(long)]
    exempt: bool,
    /// Known ranked tier for this player, when one exists
    #[arg(long)]
    known_rank: Option<RankTier>,
    /// Hard rank ceiling; a known rank above it bans instead of reviewing
    #[arg(long)]
    rank_ceiling: Option<RankTier>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Screen(args) => run_screen(args).await,
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let api_key = config.provider.require_api_key()?.to_string();
    let client = RiotApiClient::from_config(&config.provider, &api_key)?;
    let service = Arc::new(ScreeningService::new(client));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(screening_router(service, config.screening.clone()))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "screening service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

async fn run_screen(args: ScreenArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let api_key = config.provider.require_api_key()?.to_string();
    let client = RiotApiClient::from_config(&config.provider, &api_key)?;
    let service = ScreeningService::new(client);

    let tier = args.tier.unwrap_or(config.screening.default_tier);
    let mut policy = ScreeningPolicy::for_tier(tier);
    policy.level.ceiling = config.screening.level_ceiling;
    policy.level.floor = config.screening.level_floor;
    policy.rank_ceiling = args.rank_ceiling;

    let request = ScreeningRequest {
        riot_id: args.riot_id,
        exempt_from_ceiling: args.exempt,
        known_rank: args.known_rank,
    };

    let verdict = service.screen(&request, &policy).await;
    render_verdict(&request.riot_id, tier, &verdict);
    Ok(())
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

fn render_verdict(riot_id: &RiotId, tier: SkillTier, verdict: &Verdict) {
    let screened_at = Local::now().format("%Y-%m-%d %H:%M");
    println!("Screening result for {riot_id} ({tier} tier) at {screened_at}");
    println!("Verdict: {}", verdict.status.label());

    if verdict.reasons.is_empty() {
        println!("Reasons: none");
    } else {
        println!("Reasons:");
        for reason in &verdict.reasons {
            println!("- {reason}");
        }
    }

    if let Some(snapshot) = &verdict.snapshot {
        println!("\nProfile snapshot ({} valid matches)", snapshot.matches);
        println!("- Level: {}", snapshot.level);
        println!("- Win rate: {}", snapshot.win_rate);
        println!("- KDA: {}", snapshot.kda);
        println!("- CS/min: {}", snapshot.cspm);
        println!("- Gold/min: {}", snapshot.gpm);
        println!("- Damage share: {}", snapshot.damage_share);
        println!("- Conduct: {}", snapshot.conduct);
        println!("- Profile: {}", snapshot.profile_url);
    }
}
