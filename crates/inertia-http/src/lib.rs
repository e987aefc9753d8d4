//! HTTP primitives for inertia-web.
//!
//! This crate carries the pieces every other crate in the workspace is built on:
//!
//! - [`Request`] / [`Response`]: owned request and response values
//! - [`Handler`] / [`Middleware`] / [`MiddlewareChain`]: async request processing
//! - [`Extensions`]: type-keyed, request-scoped storage shared between middleware and handlers
//! - [`Session`]: request-scoped handle onto session data
//! - [`Error`] / [`Result`]: the crate-wide error type
//!
//! ## Example
//!
//! ```rust
//! use inertia_http::{Handler, Request, Response, Result};
//! use async_trait::async_trait;
//!
//! struct Hello;
//!
//! #[async_trait]
//! impl Handler for Hello {
//!     async fn handle(&self, _request: Request) -> Result<Response> {
//!         Ok(Response::ok().with_body("Hello!"))
//!     }
//! }
//!
//! # tokio_test::block_on(async {
//! let request = Request::builder().uri("/").build().unwrap();
//! let response = Hello.handle(request).await.unwrap();
//! assert_eq!(response.body, "Hello!");
//! # });
//! ```

pub mod error;
pub mod extensions;
pub mod middleware;
pub mod request;
pub mod response;
pub mod session;

pub use error::{Error, FieldErrors, InertiaValidationError, Result};
pub use extensions::Extensions;
pub use middleware::{Handler, Middleware, MiddlewareChain};
pub use request::{Request, RequestBuilder};
pub use response::Response;
pub use session::{Session, SessionData};

// Re-export the HTTP vocabulary types so downstream crates agree on versions.
pub use hyper::{HeaderMap, Method, StatusCode, Uri, Version};
