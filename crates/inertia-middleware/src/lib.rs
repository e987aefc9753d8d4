//! Middleware for inertia-web.
//!
//! - [`InertiaMiddleware`]: CSRF cookie, `303` rewriting, stale-version `409`,
//!   validation-error stashing
//! - [`SessionMiddleware`]: cookie-backed in-memory sessions
//! - [`ShareMiddleware`]: per-request shared props
//!
//! A typical chain, outermost first:
//!
//! ```rust
//! use std::sync::Arc;
//! use inertia_core::{InertiaConfig, Props};
//! use inertia_http::{Handler, MiddlewareChain, Request, Response, Result};
//! use inertia_middleware::{InertiaMiddleware, SessionMiddleware, ShareMiddleware};
//!
//! struct Home;
//!
//! #[async_trait::async_trait]
//! impl Handler for Home {
//!     async fn handle(&self, _request: Request) -> Result<Response> {
//!         Ok(Response::ok())
//!     }
//! }
//!
//! let chain = MiddlewareChain::new(Arc::new(Home))
//!     .with_middleware(Arc::new(SessionMiddleware::default()))
//!     .with_middleware(Arc::new(InertiaMiddleware::new(InertiaConfig::default())))
//!     .with_middleware(Arc::new(ShareMiddleware::new(|_| Ok(Props::new()))));
//! ```

pub mod csrf;
pub mod inertia;
pub mod session;
pub mod share;

pub use csrf::{CsrfToken, CsrfTokenIssuer};
pub use inertia::InertiaMiddleware;
pub use session::{SessionConfig, SessionMiddleware, SessionStore};
pub use share::ShareMiddleware;
