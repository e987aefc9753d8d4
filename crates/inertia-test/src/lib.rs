//! Testing utilities for inertia-web.
//!
//! - [`RequestFactory`]: requests for host `testserver`, with protocol header shortcuts
//! - [`TestClient`]: in-process client with a cookie jar and redirect following
//! - [`RecordingRenderer`]: template renderer capturing first-load pages
//! - [`assertions`]: props, template data, component and JSON response checks
//! - [`inertia_page`] / [`inertia_div`]: expected payloads
//!
//! ```rust
//! use std::sync::Arc;
//! use inertia_core::{InertiaConfig, Props};
//! use inertia_render::Inertia;
//! use inertia_test::{RecordingRenderer, RequestFactory, assertions::assert_has_exact_props};
//! use serde_json::json;
//!
//! # tokio_test::block_on(async {
//! let renderer = RecordingRenderer::new();
//! let inertia = Inertia::new(InertiaConfig::default().with_layout("layout.html"))
//!     .unwrap()
//!     .with_templates(Arc::new(renderer.clone()));
//!
//! let request = RequestFactory::new().get("/props/").build().unwrap();
//! inertia
//!     .render(&request, "TestComponent", Props::new().with("name", "Brandon"))
//!     .await
//!     .unwrap();
//!
//! assert_has_exact_props(&renderer, json!({"name": "Brandon"}));
//! # });
//! ```

pub mod assertions;
pub mod client;
pub mod factory;
pub mod logging;
pub mod page;
pub mod renderer;

pub use client::{TestClient, TestResponse};
pub use factory::{RequestFactory, TEST_HOST, TestRequestBuilder};
pub use logging::init_test_logging;
pub use page::{inertia_div, inertia_page};
pub use renderer::{RecordingRenderer, RenderCall};
