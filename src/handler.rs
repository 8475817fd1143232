// HTTP handler bindings for the move calculation API
//
// This module provides thin wrapper functions that bind Rocket HTTP routes
// to the Bot's core logic methods. Handlers are responsible for:
// - Deserializing incoming JSON requests
// - Extracting Bot instance from Rocket's managed state
// - Running the CPU-bound search off the async executor
// - Mapping engine errors to HTTP status codes

use log::{error, warn};
use rocket::fairing::AdHoc;
use rocket::http::Status;
use rocket::serde::json::{Error as JsonError, Json};
use rocket::{Build, Rocket, State};
use serde_json::{json, Value};

use crate::bot::Bot;
use crate::debug_logger::DebugLogger;
use crate::error::EngineError;
use crate::types::{CalculateMoveRequest, MoveResponse};

type ErrorResponse = (Status, Json<Value>);

/// GET / endpoint
/// Returns engine metadata
#[get("/")]
pub fn index(bot: &State<Bot>) -> Json<Value> {
    Json(bot.info())
}

/// POST /move endpoint
/// Computes the best move for the snapshot's active player
#[post("/move", format = "json", data = "<move_req>")]
pub async fn calculate_move(
    bot: &State<Bot>,
    logger: &State<DebugLogger>,
    move_req: Result<Json<CalculateMoveRequest>, JsonError<'_>>,
) -> Result<Json<MoveResponse>, ErrorResponse> {
    let request = move_req
        .map_err(|e| error_response(&EngineError::MalformedRequest(e.to_string())))?
        .into_inner();
    let engine = bot.inner().clone();
    let task_request = request.clone();

    let outcome = tokio::task::spawn_blocking(move || engine.calculate_move(&task_request))
        .await
        .map_err(|e| {
            error!("Move calculation task failed: {}", e);
            (
                Status::InternalServerError,
                Json(json!({ "error": "move calculation failed" })),
            )
        })?;

    match outcome {
        Ok(response) => {
            logger.log_move(request, response.chosen);
            Ok(Json(response))
        }
        Err(e) => Err(error_response(&e)),
    }
}

fn error_response(e: &EngineError) -> ErrorResponse {
    let status = if e.is_logic_error() {
        error!("Engine defect: {}", e);
        Status::InternalServerError
    } else {
        warn!("Rejected request: {}", e);
        Status::UnprocessableEntity
    };

    (status, Json(json!({ "error": e.to_string() })))
}

/// Builds the Rocket instance serving `bot`
pub fn build_rocket(bot: Bot, logger: DebugLogger) -> Rocket<Build> {
    rocket::build()
        .manage(bot)
        .manage(logger)
        .attach(AdHoc::on_response("Server ID Middleware", |_, res| {
            Box::pin(async move {
                res.set_raw_header("Server", "multiplayer-chess-ai");
            })
        }))
        .mount("/", routes![index, calculate_move])
}
