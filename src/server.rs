use crate::error::ServiceError;
use crate::msg::{InsuranceParams, StartRequest};
use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::web;
use actix_web::App;
use actix_web::HttpResponse;
use actix_web::HttpServer;
use blackjack::Round;
use std::sync::Mutex;
use std::sync::MutexGuard;

/// One round for the whole process, serialized behind a lock. Concurrent
/// callers queue; there is no per-session state.
pub type SharedRound = web::Data<Mutex<Round>>;

pub struct Server;

impl Server {
    pub async fn run(round: Round, bind: &str) -> Result<(), std::io::Error> {
        let state = web::Data::new(Mutex::new(round));
        log::info!("starting blackjack api on {bind}");
        HttpServer::new(move || {
            App::new()
                .wrap(Logger::new("%r %s %Ts"))
                .wrap(
                    Cors::default()
                        .allow_any_origin()
                        .allow_any_method()
                        .allow_any_header(),
                )
                .app_data(state.clone())
                .app_data(json_config())
                .configure(routes)
        })
        .bind(bind)?
        .run()
        .await
    }
}

/// Route table, separate from `run` so tests can mount it on a bare `App`.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/start", web::post().to(start))
        .route("/api/hit", web::post().to(hit))
        .route("/api/stand", web::post().to(stand))
        .route("/api/double-down", web::post().to(double_down))
        .route("/api/split", web::post().to(split))
        .route("/api/insurance", web::post().to(insurance))
        .route("/api/state", web::get().to(state));
}

/// A body that fails to parse keeps the service's single failure shape
/// instead of actix's default 400.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _| ServiceError::BadRequest(err.to_string()).into())
}

async fn start(
    round: SharedRound,
    body: web::Json<StartRequest>,
) -> Result<HttpResponse, ServiceError> {
    let mut round = lock(&round)?;
    round.start(body.bet_amount);
    log::debug!("new round dealt, bet {}", body.bet_amount);
    trace_shoe(&round);
    Ok(snapshot_response(&round))
}

async fn hit(round: SharedRound) -> Result<HttpResponse, ServiceError> {
    let mut round = lock(&round)?;
    if !round.hit() {
        log::debug!("hit ignored in phase {}", round.phase().as_str());
    }
    trace_shoe(&round);
    Ok(snapshot_response(&round))
}

async fn stand(round: SharedRound) -> Result<HttpResponse, ServiceError> {
    let mut round = lock(&round)?;
    if !round.stand() {
        log::debug!("stand ignored in phase {}", round.phase().as_str());
    }
    trace_shoe(&round);
    Ok(snapshot_response(&round))
}

async fn double_down(round: SharedRound) -> Result<HttpResponse, ServiceError> {
    let mut round = lock(&round)?;
    if !round.double_down() {
        log::debug!("double down ignored in phase {}", round.phase().as_str());
    }
    trace_shoe(&round);
    Ok(snapshot_response(&round))
}

async fn split(round: SharedRound) -> Result<HttpResponse, ServiceError> {
    let mut round = lock(&round)?;
    if !round.split() {
        log::debug!("split ignored in phase {}", round.phase().as_str());
    }
    trace_shoe(&round);
    Ok(snapshot_response(&round))
}

async fn insurance(
    round: SharedRound,
    query: web::Query<InsuranceParams>,
) -> Result<HttpResponse, ServiceError> {
    let mut round = lock(&round)?;
    if !round.insurance(&query.response) {
        log::debug!("insurance ignored in phase {}", round.phase().as_str());
    }
    Ok(snapshot_response(&round))
}

async fn state(round: SharedRound) -> Result<HttpResponse, ServiceError> {
    let round = lock(&round)?;
    Ok(snapshot_response(&round))
}

fn lock(round: &SharedRound) -> Result<MutexGuard<'_, Round>, ServiceError> {
    round.lock().map_err(|_| ServiceError::LockPoisoned)
}

fn snapshot_response(round: &Round) -> HttpResponse {
    HttpResponse::Ok().json(round.snapshot())
}

fn trace_shoe(round: &Round) {
    log::debug!(
        "shoe at {:.0}% penetration, running count {}",
        round.shoe().penetration() * 100.0,
        round.shoe().running_count()
    );
}
