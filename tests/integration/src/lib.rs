//! Shared fixtures for inertia-web integration tests.
//!
//! [`app`] assembles a small application (routes, layout templates, session
//! and protocol middleware) exercising every prop variant. [`ssr_stub`] is a
//! minimal HTTP server standing in for the pre-render service.

pub mod app;
pub mod models;
pub mod ssr_stub;

pub use app::{TestApp, build_app};
