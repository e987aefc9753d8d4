//! Props shared with every page of a request.

use std::sync::Arc;

use async_trait::async_trait;
use inertia_core::{Props, share_all};
use inertia_http::{Handler, Middleware, Request, Response, Result};

type Sharer = Arc<dyn Fn(&Request) -> Result<Props> + Send + Sync>;

/// Shares the props computed by a closure before the handler runs
///
/// # Examples
///
/// ```
/// use inertia_core::props::{Props, callable};
/// use inertia_middleware::ShareMiddleware;
///
/// let middleware = ShareMiddleware::new(|request| {
///     let path = request.path().to_string();
///     Ok(Props::new().with("current_path", callable(move || path.clone())))
/// });
/// ```
pub struct ShareMiddleware {
	sharer: Sharer,
}

impl ShareMiddleware {
	pub fn new<F>(sharer: F) -> Self
	where
		F: Fn(&Request) -> Result<Props> + Send + Sync + 'static,
	{
		Self {
			sharer: Arc::new(sharer),
		}
	}
}

#[async_trait]
impl Middleware for ShareMiddleware {
	async fn process(&self, request: Request, next: Arc<dyn Handler>) -> Result<Response> {
		share_all(&request, (self.sharer)(&request)?);
		next.handle(request).await
	}
}
