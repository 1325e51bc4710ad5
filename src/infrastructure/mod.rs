//! Infrastructure layer - External service implementations

pub mod auth;
pub mod cache;
pub mod logging;
pub mod rate_limit;
pub mod services;
pub mod storage;
