//! Authentication infrastructure module
//!
//! This module provides JWT token management for bearer authentication.

mod jwt;

pub use jwt::{JwtClaims, JwtConfig, JwtGenerator, JwtService};
