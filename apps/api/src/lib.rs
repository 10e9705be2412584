//! Résumé parsing and cover letter services.
//!
//! Two thin HTTP pipelines around a single model call each. The binaries in
//! `src/bin` wire a provider client into `routes::build_router`.

pub mod config;
pub mod cover_letter;
pub mod errors;
pub mod extraction;
pub mod llm_client;
pub mod logging;
pub mod models;
pub mod routes;
pub mod server;
pub mod state;
