//! Configuración de proceso leída desde el entorno (`.env` incluido).
//!
//! | variable                  | default          |
//! |---------------------------|------------------|
//! | `MATKUL_BIND`             | `127.0.0.1:8080` |
//! | `MATKUL_DATA_DIR`         | `data`           |
//! | `MATKUL_TOP_N`            | `5`              |
//! | `MATKUL_TOP_CANDIDATES`   | `15`             |
//! | `MATKUL_MAX_EXPANSIONS`   | `20000`          |
//! | `MATKUL_DEFAULT_TERM_CAP` | `20`             |

use std::env;
use std::str::FromStr;

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
pub const DEFAULT_TOP_N: usize = 5;

/// Constantes de la búsqueda multi-semestre.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Candidatos (top-K por puntaje) expandidos en cada transición "agregar".
    pub top_candidates: usize,
    /// Tope de expansiones de estado.
    pub max_expansions: usize,
    /// Costo base de avanzar de semestre.
    pub advance_base_cost: u64,
    /// Descuento por cada SKS tomado en el semestre que se cierra.
    pub credit_bonus: u64,
    /// SKS máximos para semestres sin tope explícito.
    pub default_term_cap: u32,
    /// Descartar candidatos con puntaje 0.
    pub require_positive_score: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        PlannerConfig {
            top_candidates: 15,
            max_expansions: 20_000,
            advance_base_cost: 1000,
            credit_bonus: 60,
            default_term_cap: 20,
            require_positive_score: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind: String,
    pub data_dir: Option<String>,
    pub default_top_n: usize,
    pub planner: PlannerConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            bind: DEFAULT_BIND.to_string(),
            data_dir: None,
            default_top_n: DEFAULT_TOP_N,
            planner: PlannerConfig::default(),
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => match raw.trim().parse::<T>() {
            Ok(v) => v,
            Err(_) => {
                log::warn!("[config] {}={:?} inválido; usando valor por defecto", key, raw);
                default
            }
        },
        Err(_) => default,
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = PlannerConfig::default();
        AppConfig {
            bind: env::var("MATKUL_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string()),
            data_dir: env::var("MATKUL_DATA_DIR").ok().filter(|s| !s.trim().is_empty()),
            default_top_n: env_or("MATKUL_TOP_N", DEFAULT_TOP_N),
            planner: PlannerConfig {
                top_candidates: env_or("MATKUL_TOP_CANDIDATES", defaults.top_candidates),
                max_expansions: env_or("MATKUL_MAX_EXPANSIONS", defaults.max_expansions),
                default_term_cap: env_or("MATKUL_DEFAULT_TERM_CAP", defaults.default_term_cap),
                ..defaults
            },
        }
    }
}
