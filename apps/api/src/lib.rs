pub mod config;
pub mod errors;
pub mod extraction;
pub mod llm_client;
pub mod proposal;
pub mod routes;
pub mod state;

pub use routes::build_router;
pub use state::AppState;
