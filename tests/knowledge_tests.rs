mod common;

use matkulfinder::algorithm::find_prerequisite_cycle;
use matkulfinder::knowledge::KnowledgeStore;
use matkulfinder::models::LabCategory;

#[test]
fn test_sample_catalog_loads() {
    let store = common::sample_store();
    assert_eq!(store.len(), 20);
    assert_eq!(store.rules().len(), 19);

    let graphics = store.course("MII21-3615").expect("Debe existir Grafika Komputer");
    assert_eq!(graphics.credits, None, "sks 'tiga' se descarta");

    let cloud = store.course("mii21-3610".to_uppercase().as_str()).expect("Debe existir Komputasi Awan");
    assert!(cloud.offered_terms.is_empty());
    assert!(cloud.is_offered_in(3) && cloud.is_offered_in(8));

    assert!(store.course("MII21-1002").is_some_and(|c| c.is_mandatory()));
    assert!(store.rule("MII21-3611").is_none());
    assert!(store.rule("MII21-3612").is_some_and(|r| r.is_empty()));
}

#[test]
fn test_builtin_career_tables() {
    let store = common::sample_store();
    assert_eq!(
        store.lab_preferences().preferences_for("Data Scientist").first(),
        Some(&LabCategory::IntelligentSystems)
    );
    assert!(store.career_keywords().keywords_for("data scientist").any(|k| k == "data"));
}

#[test]
fn test_sample_catalog_has_no_cycles() {
    assert!(find_prerequisite_cycle(&common::sample_store()).is_none());
}

#[test]
fn test_missing_directory_degrades_to_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = KnowledgeStore::load_from_dir(dir.path().join("no-existe"));
    assert!(store.is_empty());
    assert!(store.rules().is_empty());
    // las tablas de carrera caen a los valores por defecto
    assert!(!store.career_keywords().is_empty());
}
