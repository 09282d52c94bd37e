use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::knowledge::KnowledgeStore;
use crate::server_handlers::{
    courses_handler, health_handler, help_handler, plan_handler, recommend_handler,
};

/// Estado compartido por todos los workers: la base de conocimiento congelada
/// y la configuración del proceso.
pub struct AppState {
    pub store: Arc<KnowledgeStore>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(store: Arc<KnowledgeStore>, config: AppConfig) -> Self {
        AppState { store, config }
    }
}

/// Rutas de la API. Separado de `run_server` para poder montarlo en tests.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/recommend", web::post().to(recommend_handler))
        .route("/plan", web::post().to(plan_handler))
        .route("/courses", web::get().to(courses_handler))
        .route("/help", web::get().to(help_handler))
        .route("/health", web::get().to(health_handler));
}

pub async fn run_server(config: AppConfig, store: Arc<KnowledgeStore>) -> std::io::Result<()> {
    let bind_addr = config.bind.clone();
    let state = web::Data::new(AppState::new(store, config));
    log::info!("Iniciando servidor en http://{}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Cors::permissive())
            .wrap(middleware::Logger::default())
            .configure(configure_routes)
    })
    .bind(bind_addr)?
    .run()
    .await
}
