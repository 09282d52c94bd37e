// Biblioteca raíz del crate `matkulfinder`.
// Reexporta los módulos principales y los puntos de entrada del núcleo
// (`recommend`, `plan_until_graduation`) y del servidor HTTP.
pub mod models;
pub mod error;
pub mod config;
pub mod knowledge;
pub mod algorithm;
pub mod api_json;
pub mod server;
mod server_handlers;

pub use algorithm::{plan_until_graduation, plan_with_prerequisite_graph, recommend};
pub use knowledge::KnowledgeStore;

/// Ejecuta el servidor HTTP (reexport para facilitar uso desde `main`)
pub use server::run_server;
