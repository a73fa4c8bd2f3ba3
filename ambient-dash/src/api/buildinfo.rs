//! Build identification for the dashboard footer and bug reports
//!
//! Values are baked in by `build.rs`; `git_hash` is "unknown" when the
//! crate was built outside a git checkout.

use axum::response::Json;
use serde::Serialize;

/// `GET /api/buildinfo` body
#[derive(Debug, Serialize)]
pub struct BuildInfo {
    pub module: &'static str,
    pub version: &'static str,
    pub git_hash: &'static str,
    pub build_timestamp: &'static str,
    pub build_profile: &'static str,
}

impl BuildInfo {
    /// Identification of the running binary
    pub fn current() -> Self {
        Self {
            module: "ambient-dash",
            version: env!("CARGO_PKG_VERSION"),
            git_hash: env!("GIT_HASH"),
            build_timestamp: env!("BUILD_TIMESTAMP"),
            build_profile: env!("BUILD_PROFILE"),
        }
    }
}

pub async fn get_build_info() -> Json<BuildInfo> {
    Json(BuildInfo::current())
}
