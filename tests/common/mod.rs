#![allow(dead_code)]

use matkulfinder::knowledge::KnowledgeStore;
use matkulfinder::models::{CreditPreference, StudentProfile};
use std::path::PathBuf;

pub fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

pub fn sample_store() -> KnowledgeStore {
    let store = KnowledgeStore::load_from_dir(data_dir());
    assert!(!store.is_empty(), "Debe leer el catálogo de ejemplo en data/");
    store
}

/// Estudiante de ciencia de datos con Pemrograman Dasar y Matematika Diskrit aprobados.
pub fn data_science_student() -> StudentProfile {
    StudentProfile::new(["MII21-1201", "MII21-1203"])
        .with_interests(["AI", "Data Science"])
        .with_career("Data Scientist")
        .with_credit_preference([2, 3].into_iter().collect::<CreditPreference>(), false)
}
