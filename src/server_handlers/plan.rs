use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use std::sync::{Arc, OnceLock};
use tokio::sync::Semaphore;

use crate::algorithm::plan_with_strategy;
use crate::api_json::PlanRequest;
use crate::server::AppState;

/// POST /plan
///
/// La búsqueda es CPU-bound: corre en el pool bloqueante de tokio, con a lo
/// sumo `num_cpus` planes en paralelo.
pub async fn plan_handler(state: web::Data<AppState>, body: web::Json<serde_json::Value>) -> impl Responder {
    let req: PlanRequest = match serde_json::from_value(body.into_inner()) {
        Ok(r) => r,
        Err(e) => return HttpResponse::BadRequest().json(json!({"error": format!("failed to parse input: {}", e)})),
    };
    let params = match req.to_params() {
        Ok(p) => p,
        Err(e) => return HttpResponse::BadRequest().json(json!({"error": format!("invalid plan request: {}", e)})),
    };
    let config = req.planner_config(&state.config.planner);
    let strategy = req.strategy;

    static GLOBAL_SEM: OnceLock<Arc<Semaphore>> = OnceLock::new();
    let sem = GLOBAL_SEM
        .get_or_init(|| Arc::new(Semaphore::new(std::cmp::max(1, num_cpus::get()))))
        .clone();
    let permit = match sem.acquire_owned().await {
        Ok(p) => p,
        Err(_) => return HttpResponse::InternalServerError().json(json!({"error": "failed to acquire semaphore"})),
    };

    let store = Arc::clone(&state.store);
    let start = std::time::Instant::now();
    let blocking = tokio::task::spawn_blocking(move || {
        let _permit = permit;
        plan_with_strategy(&store, &params, &config, strategy)
    });

    match blocking.await {
        Ok(Ok(plan)) => {
            log::info!(
                "[plan] {} ({:?}) listo en {} ms",
                plan.name,
                strategy,
                start.elapsed().as_millis()
            );
            HttpResponse::Ok().json(json!({
                "plan": plan,
                "generated_at": chrono::Utc::now().to_rfc3339(),
            }))
        }
        Ok(Err(e)) => HttpResponse::UnprocessableEntity().json(json!({"error": format!("planner error: {}", e)})),
        Err(e) => HttpResponse::InternalServerError().json(json!({"error": format!("task join error: {}", e)})),
    }
}
