use actix_web::{HttpResponse, Responder};
use serde_json::json;

use crate::api_json::{NumberList, PlanRequest, RecommendRequest, TermInput, TextList};
use crate::models::PlanStrategy;

pub async fn help_handler() -> impl Responder {
    let recommend_example = RecommendRequest {
        courses_taken: TextList::Many(vec!["MII21-1201".to_string(), "MII21-1203".to_string()]),
        interests: TextList::Many(vec!["AI".to_string(), "Data Science".to_string()]),
        target_career: Some("Data Scientist".to_string()),
        sks_preference: Some(NumberList::Many(vec![2, 3])),
        sks_must_match: false,
        term_preference: Some(TermInput::Text("gasal".to_string())),
        current_semester: Some(TermInput::Number(4)),
        top_n: Some(5),
    };

    let plan_example = PlanRequest {
        name: Some("Rina".to_string()),
        courses_taken: TextList::Joined("MII21-1201, MII21-1203".to_string()),
        interests: TextList::Many(vec!["AI".to_string()]),
        target_career: Some("Data Scientist".to_string()),
        current_semester: Some(TermInput::Number(5)),
        per_semester_caps: Some(NumberList::Joined("9, 6".to_string())),
        strategy: PlanStrategy::Search,
        top_candidates: None,
        max_expansions: None,
    };

    let help = json!({
        "description": "API de recomendación de electivos. POST /recommend devuelve los top-N electivos elegibles con sus razones; POST /plan arma un plan semestre a semestre hasta la graduación.",
        "recommend_example": recommend_example,
        "plan_example": plan_example,
        "strategies": ["search", "graph"],
        "term_tokens": {"odd": ["odd", "ganjil", "gasal"], "even": ["even", "genap"]},
        "note": "Las listas aceptan arreglo JSON o texto separado por comas. current_semester es obligatorio y numérico en /plan.",
        "endpoints": ["POST /recommend", "POST /plan", "GET /courses", "GET /help", "GET /health"]
    });

    HttpResponse::Ok().json(help)
}
