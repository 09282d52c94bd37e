use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use std::collections::HashMap;

use crate::algorithm::scoring::lab_category;
use crate::server::AppState;

/// GET /courses
///
/// `?electives=true` deja sólo los electivos; `?q=texto` filtra por código,
/// nombres o tópicos.
pub async fn courses_handler(
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let electives_only = query.get("electives").is_some_and(|v| v == "true" || v == "1");
    let needle = query.get("q").map(|q| q.trim().to_lowercase()).filter(|q| !q.is_empty());

    let courses: Vec<serde_json::Value> = state
        .store
        .courses()
        .iter()
        .filter(|c| !electives_only || !c.is_mandatory())
        .filter(|c| match &needle {
            Some(n) => c.code.to_lowercase().contains(n.as_str()) || c.haystack(false).contains(n.as_str()),
            None => true,
        })
        .map(|c| {
            json!({
                "code": c.code,
                "names": c.names,
                "credits": c.credits,
                "kind": c.kind,
                "mandatory": c.is_mandatory(),
                "lab": lab_category(&c.kind).map(|l| l.code()),
                "topics": c.topics,
                "offered_terms": c.offered_terms,
                "prerequisites": state.store.rule(&c.code).map(|r| &r.prerequisites),
            })
        })
        .collect();

    HttpResponse::Ok().json(json!({"count": courses.len(), "courses": courses}))
}

/// GET /health
pub async fn health_handler(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "courses": state.store.len(),
        "prerequisite_rules": state.store.rules().len(),
        "careers": state.store.career_keywords().len(),
    }))
}
