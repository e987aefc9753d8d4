//! The application under test
//!
//! Every route renders `TestComponent` unless noted, through the session and
//! protocol middleware, with a recording renderer around Tera templates.

use std::sync::Arc;

use async_trait::async_trait;
use inertia::core::CLEAR_HISTORY_SESSION_KEY;
use inertia::test::{RecordingRenderer, TestClient};
use inertia::{
	Error, FieldErrors, Form, Handler, Inertia, InertiaConfig, InertiaListView, InertiaMiddleware,
	InertiaResponse, InertiaView, MiddlewareChain, Props, Request, Response, Result, Session,
	SessionMiddleware, ShareMiddleware, SsrClient, TeraRenderer, ViewOutput, callable,
	clear_history, defer, encrypt_history, inertia_validate, lazy, location, merge, optional,
};
use serde::Deserialize;

use crate::models::{Sport, sports};

pub const COMPONENT: &str = "TestComponent";

/// Layout for first loads without pre-rendering.
pub const LAYOUT: &str = "<!DOCTYPE html>\n<html>\n<body>\n{{ inertia | safe }}\n</body>\n</html>\n";

/// Layout filled with pre-render output.
pub const SSR_LAYOUT: &str =
	"<!DOCTYPE html>\n<html>\n<head>head--{{ head | safe }}--head</head>\n<body>{{ body | safe }}</body>\n</html>\n";

/// Default configuration for the app: version `1.0`, Tera layouts
pub fn test_config() -> InertiaConfig {
	InertiaConfig::default()
		.with_layout("layout.html")
		.with_ssr_template("ssr.html")
}

/// Handler built from a plain function
struct FnHandler<F>(F);

#[async_trait]
impl<F> Handler for FnHandler<F>
where
	F: Fn(&Request) -> Result<Response> + Send + Sync,
{
	async fn handle(&self, request: Request) -> Result<Response> {
		(self.0)(&request)
	}
}

fn plain<F>(f: F) -> Arc<dyn Handler>
where
	F: Fn(&Request) -> Result<Response> + Send + Sync + 'static,
{
	Arc::new(FnHandler(f))
}

/// Exact-path router
struct Routes {
	routes: Vec<(&'static str, Arc<dyn Handler>)>,
}

#[async_trait]
impl Handler for Routes {
	async fn handle(&self, request: Request) -> Result<Response> {
		let path = request.path().to_string();
		match self.routes.iter().find(|(route, _)| *route == path) {
			Some((_, handler)) => handler.handle(request).await,
			None => Err(Error::NotFound(format!("No route for {}", path))),
		}
	}
}

#[derive(Debug, Deserialize)]
struct SignupForm {
	#[serde(default)]
	name: String,
	#[serde(default)]
	email: String,
}

impl Form for SignupForm {
	type Cleaned = (String, String);

	fn clean(&self) -> std::result::Result<Self::Cleaned, FieldErrors> {
		let mut errors = FieldErrors::new();
		if self.name.trim().is_empty() {
			errors.insert("name".into(), vec!["This field is required.".into()]);
		}
		if !self.email.contains('@') {
			errors.insert(
				"email".into(),
				vec![
					"Enter a valid email address.".into(),
					"Email is required.".into(),
				],
			);
		}
		if errors.is_empty() {
			Ok((self.name.trim().to_string(), self.email.clone()))
		} else {
			Err(errors)
		}
	}
}

/// The assembled application and its inspection points
pub struct TestApp {
	pub handler: Arc<dyn Handler>,
	pub renderer: RecordingRenderer,
	pub inertia: Arc<Inertia>,
}

impl TestApp {
	/// Client for direct browser visits
	pub fn client(&self) -> TestClient {
		TestClient::new(self.handler.clone())
	}

	/// Client for protocol visits
	pub fn inertia_client(&self) -> TestClient {
		TestClient::inertia(self.handler.clone())
	}
}

/// Build the app with `config`
pub fn build_app(config: InertiaConfig) -> TestApp {
	build_app_with_ssr(config, None)
}

/// Build the app, replacing the pre-render client when `ssr` is given
pub fn build_app_with_ssr(config: InertiaConfig, ssr: Option<Arc<dyn SsrClient>>) -> TestApp {
	let templates = TeraRenderer::from_templates([("layout.html", LAYOUT), ("ssr.html", SSR_LAYOUT)])
		.expect("test templates parse");
	let renderer = RecordingRenderer::wrapping(Arc::new(templates));

	let mut inertia = Inertia::new(config.clone())
		.expect("negotiator builds")
		.with_templates(Arc::new(renderer.clone()));
	if let Some(ssr) = ssr {
		inertia = inertia.with_ssr_client(ssr);
	}
	let inertia = Arc::new(inertia);

	let handler = MiddlewareChain::new(Arc::new(routes(&inertia)))
		.with_middleware(Arc::new(SessionMiddleware::default()))
		.with_middleware(Arc::new(InertiaMiddleware::new(config)));

	TestApp {
		handler: Arc::new(handler),
		renderer,
		inertia,
	}
}

fn page<F>(inertia: &Arc<Inertia>, f: F) -> Arc<dyn Handler>
where
	F: Fn(&Request) -> Result<ViewOutput> + Send + Sync + 'static,
{
	Arc::new(InertiaView::new(inertia.clone(), COMPONENT, f))
}

fn props(props: Props) -> Result<ViewOutput> {
	Ok(ViewOutput::Props(props))
}

fn routes(inertia: &Arc<Inertia>) -> Routes {
	let share_view: Arc<dyn Handler> = Arc::new(
		MiddlewareChain::new(page(inertia, |_| props(Props::new().with("name", "Brandon"))))
			.with_middleware(Arc::new(ShareMiddleware::new(|_| {
				Ok(Props::new()
					.with("position", callable(|| "goalie"))
					.with("number", 29))
			}))),
	);

	let sports_view: Arc<dyn Handler> = Arc::new(
		InertiaListView::new(inertia.clone(), "Sports", |_: &Request| Ok(sports()))
			.with_fields(["id", "name"])
			.with_context_object_name("sports"),
	);

	let empty_sports: Arc<dyn Handler> = Arc::new(
		InertiaListView::new(inertia.clone(), "Sports", |_: &Request| Ok(Vec::<Sport>::new()))
			.with_fields(["id", "name"])
			.with_allow_empty(false),
	);

	Routes {
		routes: vec![
			("/test/", plain(|_| Ok(Response::ok().with_body("Hey good stuff")))),
			("/empty/", page(inertia, |_| props(Props::new()))),
			("/redirect/", plain(|_| Ok(Response::temporary_redirect("/empty/")))),
			(
				"/inertia-redirect/",
				page(inertia, |_| Ok(ViewOutput::from(Response::temporary_redirect("/empty/")))),
			),
			(
				"/external-redirect/",
				plain(|request| Ok(location(request, "http://foobar.com/"))),
			),
			(
				"/props/",
				page(inertia, |_| {
					props(Props::new().with("name", "Brandon").with("sport", "Hockey"))
				}),
			),
			(
				"/template_data/",
				page(inertia, |_| {
					Ok(ViewOutput::from(
						InertiaResponse::new(COMPONENT)
							.with_template_data("name", "Brian")
							.with_template_data("sport", "Basketball"),
					))
				}),
			),
			(
				"/lazy/",
				page(inertia, |_| {
					props(
						Props::new()
							.with("name", "Brian")
							.with("sport", lazy(|| "Basketball"))
							.with("grit", lazy(|| "intense")),
					)
				}),
			),
			(
				"/optional/",
				page(inertia, |_| {
					props(
						Props::new()
							.with("name", "Brian")
							.with("sport", optional(|| "Basketball"))
							.with("grit", optional(|| "intense")),
					)
				}),
			),
			(
				"/defer/",
				page(inertia, |_| {
					props(
						Props::new()
							.with("name", "Brian")
							.with("sport", defer(|| "Basketball")),
					)
				}),
			),
			(
				"/defer-group/",
				page(inertia, |_| {
					props(
						Props::new()
							.with("name", "Brian")
							.with("sport", defer(|| "Basketball").group("group"))
							.with("team", defer(|| "Bulls").group("group"))
							.with("grit", defer(|| "intense")),
					)
				}),
			),
			(
				"/merge/",
				page(inertia, |_| {
					props(
						Props::new()
							.with("name", "Brandon")
							.with("sport", merge(|| "Hockey"))
							.with("team", defer(|| "Penguins").merge(true)),
					)
				}),
			),
			(
				"/complex-props/",
				page(inertia, |_| {
					props(Props::new().with(
						"person",
						Props::new().with("name", callable(|| "Brandon")),
					))
				}),
			),
			("/share/", share_view),
			(
				"/encrypt-history/",
				page(inertia, |request| {
					encrypt_history(request, true);
					props(Props::new())
				}),
			),
			(
				"/no-encrypt-history/",
				page(inertia, |request| {
					encrypt_history(request, false);
					props(Props::new())
				}),
			),
			(
				"/clear-history/",
				page(inertia, |request| {
					clear_history(request)?;
					props(Props::new())
				}),
			),
			(
				"/clear-history-redirect/",
				page(inertia, |request| {
					clear_history(request)?;
					Ok(ViewOutput::from(Response::temporary_redirect("/empty/")))
				}),
			),
			(
				"/clear-history-type-error/",
				page(inertia, |request| {
					if let Some(session) = Session::from_request(request) {
						session.set(CLEAR_HISTORY_SESSION_KEY, "foo")?;
					}
					props(Props::new())
				}),
			),
			(
				"/form/",
				page(inertia, |request| {
					if request.method != inertia::http::Method::GET {
						let form: SignupForm = serde_json::from_slice(&request.body)?;
						let (name, _) =
							inertia_validate(&form, Response::temporary_redirect("/form/"))?;
						tracing::debug!(name = %name, "Signup accepted");
						return Ok(ViewOutput::from(Response::temporary_redirect("/empty/")));
					}
					props(Props::new())
				}),
			),
			("/sports/", sports_view),
			("/no-sports/", empty_sports),
		],
	}
}
