//! HTTP API handlers for ambient-dash

pub mod buildinfo;
pub mod dashboard;
pub mod health;
pub mod mood;
pub mod session;
pub mod ui;

pub use buildinfo::get_build_info;
pub use dashboard::get_dashboard;
pub use health::health_routes;
pub use mood::get_mood;
pub use session::ProviderSession;
pub use ui::serve_index;
