// Read-only JSON API consumed by the portfolio frontend

pub mod handlers;
pub mod models;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
