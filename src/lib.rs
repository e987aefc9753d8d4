//! # inertia-web
//!
//! Server-side adapter for the Inertia protocol: a server-driven single-page
//! application model where handlers return a component name and its props,
//! and the client runtime swaps pages without full reloads.
//!
//! The crate computes the page payload for each request (full loads, partial
//! reloads, deferred and merge props), delivers it in the representation the
//! request asks for, and enforces the protocol's redirect and asset-version
//! rules in middleware.
//!
//! ## Feature Flags
//!
//! - `ssr` (default): remote pre-rendering client built on reqwest
//! - `templates` (default): Tera-backed layout renderer
//! - `test-utils`: request factory, test client and assertions under [`test`]
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use inertia::prelude::*;
//!
//! # tokio_test::block_on(async {
//! let config = InertiaConfig::default().with_layout("layout.html");
//! let inertia = Arc::new(
//!     Inertia::new(config.clone())
//!         .unwrap()
//!         .with_templates(Arc::new(
//!             TeraRenderer::from_templates([("layout.html", "{{ inertia | safe }}")]).unwrap(),
//!         )),
//! );
//!
//! let view = InertiaView::new(inertia, "Teams/Index", |_: &Request| {
//!     Ok(ViewOutput::from(
//!         Props::new()
//!             .with("team", "Bulls")
//!             .with("stats", defer(|| 42)),
//!     ))
//! });
//!
//! let app = MiddlewareChain::new(Arc::new(view))
//!     .with_middleware(Arc::new(SessionMiddleware::default()))
//!     .with_middleware(Arc::new(InertiaMiddleware::new(config)));
//!
//! let request = Request::builder()
//!     .uri("/teams/")
//!     .header("X-Inertia", "true")
//!     .build()
//!     .unwrap();
//! let response = app.handle(request).await.unwrap();
//! assert_eq!(response.header("X-Inertia"), Some("true"));
//! # });
//! ```

pub use inertia_core as core;
pub use inertia_http as http;
pub use inertia_middleware as middleware;
pub use inertia_render as render;

#[cfg(feature = "test-utils")]
pub use inertia_test as test;

pub use inertia_core::{
	Deferred, Form, InertiaConfig, InertiaModel, Page, PageBuilder, Prop, Props, callable,
	clear_history, deep_transform, defer, encrypt_history, inertia_validate, lazy, merge,
	model_to_value, models_to_value, optional, share, share_all,
};
pub use inertia_http::{
	Error, FieldErrors, Handler, InertiaValidationError, Middleware, MiddlewareChain, Request,
	Response, Result, Session, StatusCode,
};
pub use inertia_middleware::{
	CsrfToken, InertiaMiddleware, SessionConfig, SessionMiddleware, SessionStore, ShareMiddleware,
};
pub use inertia_render::{
	Inertia, InertiaListView, InertiaResponse, InertiaView, PageHandler, SsrClient, SsrFailure,
	SsrOutcome, TemplateRenderer, ViewOutput, location,
};

#[cfg(feature = "ssr")]
pub use inertia_render::HttpSsrClient;
#[cfg(feature = "templates")]
pub use inertia_render::TeraRenderer;

/// Common imports for applications
pub mod prelude {
	pub use crate::{
		Error, Form, Handler, Inertia, InertiaConfig, InertiaListView, InertiaMiddleware,
		InertiaModel, InertiaResponse, InertiaView, Middleware, MiddlewareChain, Prop, Props,
		Request, Response, Result, Session, SessionMiddleware, ShareMiddleware, StatusCode,
		ViewOutput, callable, clear_history, defer, encrypt_history, inertia_validate, location,
		merge, optional, share, share_all,
	};

	#[cfg(feature = "templates")]
	pub use crate::TeraRenderer;
}
