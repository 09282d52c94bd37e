mod common;

use actix_web::{test, web, App};
use matkulfinder::config::AppConfig;
use matkulfinder::server::{configure_routes, AppState};
use serde_json::{json, Value};
use std::sync::Arc;

fn state() -> web::Data<AppState> {
    web::Data::new(AppState::new(Arc::new(common::sample_store()), AppConfig::default()))
}

#[actix_web::test]
async fn test_recommend_endpoint() {
    let app = test::init_service(App::new().app_data(state()).configure(configure_routes)).await;
    let req = test::TestRequest::post()
        .uri("/recommend")
        .set_json(json!({
            "courses_taken": "MII21-1201, mii21-1203",
            "interests": ["AI", "Data Science"],
            "target_career": "Data Scientist",
            "sks_preference": "2,3"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["count"], 5);
    assert_eq!(body["recommendations"][0]["code"], "MII21-3601");
    assert_eq!(body["recommendations"][0]["score"], 115);
    assert!(body["generated_at"].is_string());
}

#[actix_web::test]
async fn test_recommend_rejects_wrong_shape() {
    let app = test::init_service(App::new().app_data(state()).configure(configure_routes)).await;
    let req = test::TestRequest::post()
        .uri("/recommend")
        .set_json(json!({"courses_taken": {"code": 1}}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().is_some_and(|e| e.contains("failed to parse input")));
}

#[actix_web::test]
async fn test_plan_endpoint() {
    let app = test::init_service(App::new().app_data(state()).configure(configure_routes)).await;
    let req = test::TestRequest::post()
        .uri("/plan")
        .set_json(json!({
            "name": "Rina",
            "courses_taken": ["MII21-1201", "MII21-1203", "MII21-2401"],
            "interests": "AI",
            "current_semester": 5,
            "per_semester_caps": "9, 6"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    let plan = &body["plan"];
    assert_eq!(plan["name"], "Rina");
    assert_eq!(plan["strategy"], "search");
    assert_eq!(plan["complete"], true);
    let terms: Vec<u64> = plan["schedule"]
        .as_array()
        .expect("schedule debe ser arreglo")
        .iter()
        .filter_map(|t| t["term"].as_u64())
        .collect();
    assert_eq!(terms, vec![6, 7]);
}

#[actix_web::test]
async fn test_plan_requires_current_semester() {
    let app = test::init_service(App::new().app_data(state()).configure(configure_routes)).await;
    let req = test::TestRequest::post()
        .uri("/plan")
        .set_json(json!({"courses_taken": ["MII21-1201"], "current_semester": "genap"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);
}

#[actix_web::test]
async fn test_plan_rejects_term_past_graduation() {
    let app = test::init_service(App::new().app_data(state()).configure(configure_routes)).await;
    let req = test::TestRequest::post()
        .uri("/plan")
        .set_json(json!({"courses_taken": ["MII21-1201"], "current_semester": 4294967295u64}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());
}

#[actix_web::test]
async fn test_courses_health_and_help() {
    let app = test::init_service(App::new().app_data(state()).configure(configure_routes)).await;

    let req = test::TestRequest::get().uri("/courses?electives=true").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let courses = body["courses"].as_array().expect("courses debe ser arreglo");
    assert_eq!(body["count"], 16);
    assert!(courses.iter().all(|c| c["mandatory"] == false));

    let req = test::TestRequest::get().uri("/courses?q=robot").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["courses"][0]["lab"], "computer-systems-and-networks");

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["courses"], 20);

    let req = test::TestRequest::get().uri("/help").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["recommend_example"].is_object());
    assert!(body["plan_example"].is_object());
}
