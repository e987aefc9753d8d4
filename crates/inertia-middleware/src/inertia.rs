//! Protocol middleware: redirect rewriting, asset freshness and CSRF issuance.
//!
//! Per request, after the inner handler produced a response:
//!
//! 1. a validation failure becomes a session stash plus its redirect
//! 2. the CSRF cookie is attached
//! 3. for protocol requests only, same-origin `301`/`302` answers to the
//!    configured methods become `303 See Other`
//! 4. for protocol requests carrying a stale asset version, the response is
//!    replaced by an empty `409 Conflict` with `X-Inertia-Location`

use std::sync::Arc;

use async_trait::async_trait;
use hyper::header::SET_COOKIE;
use inertia_core::protocol::X_INERTIA_LOCATION;
use inertia_core::validation::stash_validation_errors;
use inertia_core::{InertiaConfig, InertiaRequest};
use inertia_http::{Error, Handler, Middleware, Request, Response, Result, Session, StatusCode};
use tracing::{debug, warn};
use url::Url;

use crate::csrf::CsrfTokenIssuer;

/// What the middleware needs to know about the request once it is consumed
struct RequestFacts {
	is_inertia: bool,
	is_stale: bool,
	rewrites_redirect: bool,
	absolute_uri: String,
	session: Option<Session>,
}

/// Middleware enforcing the protocol's redirect and freshness rules
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use inertia_core::InertiaConfig;
/// use inertia_http::{Handler, Method, Middleware, Request, Response, Result, StatusCode};
/// use inertia_middleware::InertiaMiddleware;
///
/// struct Redirect;
///
/// #[async_trait::async_trait]
/// impl Handler for Redirect {
///     async fn handle(&self, _request: Request) -> Result<Response> {
///         Ok(Response::temporary_redirect("/teams/"))
///     }
/// }
///
/// # tokio_test::block_on(async {
/// let middleware = InertiaMiddleware::new(InertiaConfig::default());
/// let request = Request::builder()
///     .method(Method::PATCH)
///     .uri("/teams/1/")
///     .header("X-Inertia", "true")
///     .build()
///     .unwrap();
///
/// let response = middleware.process(request, Arc::new(Redirect)).await.unwrap();
/// assert_eq!(response.status, StatusCode::SEE_OTHER);
/// # });
/// ```
pub struct InertiaMiddleware {
	config: Arc<InertiaConfig>,
	csrf: CsrfTokenIssuer,
}

impl InertiaMiddleware {
	pub fn new(config: InertiaConfig) -> Self {
		Self::from_arc(Arc::new(config))
	}

	/// Share a configuration with the negotiator
	pub fn from_arc(config: Arc<InertiaConfig>) -> Self {
		let csrf = CsrfTokenIssuer::new(config.csrf_cookie_name.clone())
			.with_secure(config.csrf_cookie_secure);
		Self { config, csrf }
	}

	pub fn config(&self) -> &InertiaConfig {
		&self.config
	}

	fn facts(&self, request: &Request) -> RequestFacts {
		let inertia = InertiaRequest::new(request);
		RequestFacts {
			is_inertia: inertia.is_inertia(),
			is_stale: inertia.is_stale(&self.config.version),
			rewrites_redirect: self.config.rewrites_redirect_for(request.method.as_str()),
			absolute_uri: request.build_absolute_uri(None),
			session: Session::from_request(request),
		}
	}

	/// Turn a validation failure into its redirect, stashing the errors
	fn recover(&self, result: Result<Response>, session: Option<&Session>) -> Result<Response> {
		match result {
			Err(Error::Validation(failure)) => {
				match session {
					Some(session) => stash_validation_errors(session, &failure)?,
					None => warn!("Validation errors dropped: no session on request"),
				}
				debug!(fields = failure.errors.len(), "Redirecting after validation failure");
				Ok(failure.redirect)
			}
			other => other,
		}
	}
}

#[async_trait]
impl Middleware for InertiaMiddleware {
	async fn process(&self, request: Request, next: Arc<dyn Handler>) -> Result<Response> {
		let facts = self.facts(&request);
		let token = self.csrf.ensure(&request);

		let result = next.handle(request).await;
		let mut response = self.recover(result, facts.session.as_ref())?;
		response.append_cookie(&self.csrf.cookie_header(&token))?;

		if !facts.is_inertia {
			return Ok(response);
		}

		if facts.rewrites_redirect
			&& response.is_redirect()
			&& response
				.location()
				.is_some_and(|location| is_same_origin(location, &facts.absolute_uri))
		{
			debug!(from = response.status.as_u16(), "Rewriting redirect to 303");
			response.status = StatusCode::SEE_OTHER;
		}

		if facts.is_stale {
			debug!(location = %facts.absolute_uri, "Asset version is stale, forcing a full visit");
			let mut conflict = Response::conflict().with_header(X_INERTIA_LOCATION, &facts.absolute_uri);
			for cookie in response.headers.get_all(SET_COOKIE) {
				conflict.headers.append(SET_COOKIE, cookie.clone());
			}
			return Ok(conflict);
		}

		Ok(response)
	}
}

/// Whether `location` points at the same scheme and host as `request_uri`
///
/// Relative locations are always same-origin.
///
/// # Examples
///
/// ```
/// use inertia_middleware::inertia::is_same_origin;
///
/// assert!(is_same_origin("/teams/", "http://testserver/teams/1/"));
/// assert!(is_same_origin("http://testserver/teams/", "http://testserver/teams/1/"));
/// assert!(!is_same_origin("https://auth.example.com/login", "http://testserver/teams/1/"));
/// ```
pub fn is_same_origin(location: &str, request_uri: &str) -> bool {
	let Ok(base) = Url::parse(request_uri) else {
		return false;
	};
	match Url::parse(location) {
		Ok(target) => target.origin() == base.origin(),
		Err(url::ParseError::RelativeUrlWithoutBase) => true,
		Err(_) => false,
	}
}
