//! # Ambient Common Library
//!
//! Shared code for the Ambient dashboard crates:
//! - Error type and result alias
//! - Bootstrap configuration loading (CLI → ENV → TOML → defaults)
//! - Request-scoped session and mood result types

pub mod config;
pub mod error;
pub mod mood;
pub mod session;

pub use error::{Error, Result};
pub use mood::{Mood, MoodResult};
pub use session::Session;
