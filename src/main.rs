// --- Recomendador de electivos - Archivo principal ---

use std::sync::Arc;

use matkulfinder::algorithm::find_prerequisite_cycle;
use matkulfinder::config::AppConfig;
use matkulfinder::knowledge::{resolve_data_dir, KnowledgeStore};
use matkulfinder::run_server;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    let config = AppConfig::from_env();

    log::info!("=== Recomendador de electivos (API) ===");
    let data_dir = resolve_data_dir(config.data_dir.as_deref());
    let store = KnowledgeStore::load_from_dir(&data_dir);
    if store.is_empty() {
        log::warn!("catálogo vacío en {}; las recomendaciones serán vacías", data_dir.display());
    }
    if let Some(code) = find_prerequisite_cycle(&store) {
        log::warn!("ciclo de prerequisitos en {}; la estrategia 'graph' fallará", code);
    }

    run_server(config, Arc::new(store)).await
}
