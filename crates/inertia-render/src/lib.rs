//! Response negotiation for inertia-web.
//!
//! The [`Inertia`] negotiator turns a component and its props into the
//! representation a request asks for:
//!
//! - protocol requests (`X-Inertia: true`) receive the page as JSON
//! - first loads are pre-rendered by a remote service when enabled
//! - otherwise the page is embedded in the local layout template
//!
//! ## Feature Flags
//!
//! - `ssr` (default): reqwest-backed [`ssr::HttpSsrClient`]
//! - `templates` (default): Tera-backed [`template::TeraRenderer`]

pub mod negotiator;
pub mod ssr;
pub mod template;
pub mod views;

pub use negotiator::{Inertia, InertiaResponse, location};
pub use ssr::{SsrClient, SsrFailure, SsrOutcome};
pub use template::{TemplateRenderer, escape_html, root_element};
pub use views::{InertiaListView, InertiaView, PageHandler, ViewOutput};

#[cfg(feature = "ssr")]
pub use ssr::HttpSsrClient;
#[cfg(feature = "templates")]
pub use template::TeraRenderer;
