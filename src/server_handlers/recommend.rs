use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::algorithm::recommend;
use crate::api_json::RecommendRequest;
use crate::server::AppState;

/// POST /recommend
pub async fn recommend_handler(state: web::Data<AppState>, body: web::Json<serde_json::Value>) -> impl Responder {
    let req: RecommendRequest = match serde_json::from_value(body.into_inner()) {
        Ok(r) => r,
        Err(e) => return HttpResponse::BadRequest().json(json!({"error": format!("failed to parse input: {}", e)})),
    };

    let profile = req.to_profile();
    let top_n = req.top_n.unwrap_or(state.config.default_top_n);
    let recommendations = recommend(&state.store, &profile, top_n);

    HttpResponse::Ok().json(json!({
        "count": recommendations.len(),
        "top_n": top_n,
        "recommendations": recommendations,
        "generated_at": chrono::Utc::now().to_rfc3339(),
    }))
}
