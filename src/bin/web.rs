//! Single binary web server: JSON API over the tournament scheduler.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.

use actix_web::{
    delete, get, post, put,
    web::{self, Bytes, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use racquet_tournament::{
    generate_groups, get_scheduling_summary, parse_courts, preview_summary, read_teams_csv,
    start_tournament, write_schedule_csv, GroupSizing, SchedulingConfig, SchedulingError, TeamId,
    Timestamp, Tournament, TournamentId,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Per-tournament entry: tournament data + last activity time (for auto-cleanup).
struct TournamentEntry {
    tournament: Tournament,
    last_activity: Instant,
}

/// In-memory drafts by id. Entries are removed after `INACTIVITY_TIMEOUT`; the
/// persistence layer stores confirmed tournaments.
type AppState = Data<RwLock<HashMap<TournamentId, TournamentEntry>>>;

/// Inactivity threshold: tournaments not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct ParseCourtsBody {
    #[serde(default)]
    input: String,
}

#[derive(Deserialize)]
struct SummaryBody {
    total_matches: usize,
    available_courts: usize,
    #[serde(flatten)]
    config: SchedulingConfig,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    #[serde(default)]
    name: String,
    start_time: Timestamp,
    #[serde(default)]
    courts: String,
    #[serde(flatten)]
    config: SchedulingConfig,
    #[serde(default)]
    group_sizing: GroupSizing,
}

#[derive(Deserialize)]
struct AddTeamBody {
    player1: String,
    player2: String,
}

#[derive(Deserialize)]
struct UpdateConfigBody {
    courts: Option<String>,
    start_time: Option<Timestamp>,
    match_duration_minutes: Option<u32>,
    buffer_minutes: Option<u32>,
    group_sizing: Option<GroupSizing>,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and team id (e.g. /api/tournaments/{id}/teams/{team_id})
#[derive(Deserialize)]
struct TournamentTeamPath {
    id: TournamentId,
    team_id: TeamId,
}

fn error_response(e: SchedulingError) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

/// Look up a tournament, refresh its activity time and build a response from it.
/// Every access, read or write, counts as activity. 404 if unknown.
fn with_entry<F>(state: &AppState, id: TournamentId, respond: F) -> HttpResponse
where
    F: FnOnce(&mut Tournament) -> HttpResponse,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            respond(&mut entry.tournament)
        }
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    }
}

/// Apply `action` to a tournament. Responds with the updated tournament or 400 on a scheduling error.
fn with_tournament<F>(state: &AppState, id: TournamentId, action: F) -> HttpResponse
where
    F: FnOnce(&mut Tournament) -> Result<(), SchedulingError>,
{
    with_entry(state, id, |t| match action(t) {
        Ok(()) => HttpResponse::Ok().json(&*t),
        Err(e) => error_response(e),
    })
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "racquet-tournament",
    })
}

/// Parse a court specification ("1-4", "1, 2, Stadium A") without storing it.
#[post("/api/courts/parse")]
async fn api_parse_courts(body: Json<ParseCourtsBody>) -> HttpResponse {
    HttpResponse::Ok().json(parse_courts(&body.input))
}

/// Duration preview from counts alone.
#[post("/api/schedule/summary")]
async fn api_summary(body: Json<SummaryBody>) -> HttpResponse {
    if let Err(e) = body.config.validate() {
        return error_response(e);
    }
    let summary = get_scheduling_summary(body.total_matches, body.available_courts, body.config);
    HttpResponse::Ok().json(serde_json::json!({
        "summary": summary,
        "description": summary.describe(),
    }))
}

/// Create a new tournament (returns it with id; client stores id for subsequent requests).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let body = body.into_inner();
    let mut tournament = Tournament::new(body.name, body.start_time);
    tournament.group_sizing = body.group_sizing;
    let configured = tournament
        .set_config(body.config)
        .and_then(|()| tournament.set_courts(body.courts));
    if let Err(e) = configured {
        return error_response(e);
    }
    let id = tournament.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let response = HttpResponse::Ok().json(&tournament);
    g.insert(
        id,
        TournamentEntry {
            tournament,
            last_activity: Instant::now(),
        },
    );
    log::info!("Created tournament {}", id);
    response
}

/// Get a tournament by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |_| Ok(()))
}

/// Register a team (before start; discards any group draft).
#[post("/api/tournaments/{id}/teams")]
async fn api_add_team(state: AppState, path: Path<TournamentPath>, body: Json<AddTeamBody>) -> HttpResponse {
    with_tournament(&state, path.id, |t| t.add_team(body.player1.as_str(), body.player2.as_str()).map(|_| ()))
}

/// Import teams from a `player1,player2` CSV body. Incomplete rows are kept but not drawn.
#[post("/api/tournaments/{id}/teams/import")]
async fn api_import_teams(state: AppState, path: Path<TournamentPath>, body: Bytes) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        for team in read_teams_csv(body.as_ref())? {
            t.push_team(team)?;
        }
        Ok(())
    })
}

/// Remove a team by id (before start; discards any group draft).
#[delete("/api/tournaments/{id}/teams/{team_id}")]
async fn api_remove_team(state: AppState, path: Path<TournamentTeamPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| t.remove_team(path.team_id))
}

/// Update courts, start time, match length, buffer or group sizing (before start).
#[put("/api/tournaments/{id}/config")]
async fn api_update_config(state: AppState, path: Path<TournamentPath>, body: Json<UpdateConfigBody>) -> HttpResponse {
    let body = body.into_inner();
    with_tournament(&state, path.id, |t| {
        // config first: a rejected duration leaves the rest untouched
        let config = SchedulingConfig {
            match_duration_minutes: body.match_duration_minutes.unwrap_or(t.config.match_duration_minutes),
            buffer_minutes: body.buffer_minutes.unwrap_or(t.config.buffer_minutes),
        };
        t.set_config(config)?;
        if let Some(courts) = body.courts {
            t.set_courts(courts)?;
        }
        if let Some(start_time) = body.start_time {
            t.set_start_time(start_time)?;
        }
        if let Some(sizing) = body.group_sizing {
            t.set_group_sizing(sizing)?;
        }
        Ok(())
    })
}

/// Duration preview for the tournament's current roster or draft.
#[get("/api/tournaments/{id}/preview")]
async fn api_preview(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_entry(&state, path.id, |t| {
        let summary = preview_summary(t);
        HttpResponse::Ok().json(serde_json::json!({
            "summary": summary,
            "description": summary.describe(),
        }))
    })
}

/// Draw (or redraw) groups with a fresh shuffle.
#[post("/api/tournaments/{id}/groups/generate")]
async fn api_generate_groups(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| generate_groups(t, &mut rand::thread_rng()))
}

/// Discard the group draft (back to Setup).
#[delete("/api/tournaments/{id}/groups")]
async fn api_discard_groups(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| t.discard_groups())
}

/// Confirm the draft: generate and schedule all group matches.
#[post("/api/tournaments/{id}/start")]
async fn api_start_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, start_tournament)
}

/// Scheduled matches as CSV.
#[get("/api/tournaments/{id}/schedule.csv")]
async fn api_schedule_csv(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_entry(&state, path.id, |t| {
        let mut out = Vec::new();
        match write_schedule_csv(&t.matches, &mut out) {
            Ok(()) => HttpResponse::Ok().content_type("text/csv; charset=utf-8").body(out),
            Err(e) => error_response(e),
        }
    })
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(HashMap::<TournamentId, TournamentEntry>::new()));

    // Background task: every 30 minutes, remove tournaments inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.len();
            if removed > 0 {
                log::info!(
                    "Cleaned up {} inactive tournament(s) (no activity for {}h)",
                    removed,
                    INACTIVITY_TIMEOUT.as_secs() / 3600
                );
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_parse_courts)
            .service(api_summary)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_add_team)
            .service(api_import_teams)
            .service(api_remove_team)
            .service(api_update_config)
            .service(api_preview)
            .service(api_generate_groups)
            .service(api_discard_groups)
            .service(api_start_tournament)
            .service(api_schedule_csv)
            .route("/", web::get().to(|| async { HttpResponse::Ok().body("racquet-tournament API") }))
    })
    .bind(bind)?
    .run()
    .await
}
