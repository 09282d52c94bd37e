//! Errores del crate.
//!
//! `KnowledgeError` cubre la lectura de los ficheros JSON de la base de
//! conocimiento, `ParseError` el parseo de campos numéricos y tokens de
//! entrada, y `PlanError` los fallos del planificador alternativo.

use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum KnowledgeError {
    #[error("failed to read knowledge file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse knowledge file {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("not a number: {0:?}")]
    InvalidNumber(String),

    #[error("value must be positive, got {0}")]
    NonPositive(i64),

    #[error("unknown term token: {0:?}")]
    UnknownTermToken(String),

    #[error("term {0} is past the last term {1}")]
    TermOutOfRange(u32, u32),

    #[error("current term is required to build a plan")]
    MissingCurrentTerm,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("prerequisite cycle detected at course {0}")]
    PrerequisiteCycle(String),
}
