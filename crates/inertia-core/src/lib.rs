//! Page payload pipeline for inertia-web.
//!
//! Handlers declare their props as a [`Props`] mapping of [`Prop`] wrappers.
//! The [`PageBuilder`] merges them with props shared on the request, decides
//! what a given request should receive (full load or partial reload), resolves
//! lazy values and produces the [`Page`] descriptor.
//!
//! ```rust
//! use inertia_core::{InertiaConfig, PageBuilder};
//! use inertia_core::props::{Props, defer, optional};
//! use inertia_http::Request;
//!
//! let request = Request::builder()
//!     .uri("/teams/")
//!     .header("X-Inertia", "true")
//!     .build()
//!     .unwrap();
//!
//! let props = Props::new()
//!     .with("name", "Brian")
//!     .with("sport", optional(|| "Basketball"))
//!     .with("team", defer(|| "Bulls"));
//!
//! let page = PageBuilder::new(&request, "TestComponent", &props)
//!     .build_page(&InertiaConfig::default())
//!     .unwrap();
//!
//! assert_eq!(page.props.len(), 1);
//! assert_eq!(page.deferred_props.unwrap()["default"], vec!["team".to_string()]);
//! ```

pub mod builder;
pub mod config;
pub mod encoder;
pub mod history;
pub mod page;
pub mod props;
pub mod protocol;
pub mod resolve;
pub mod share;
pub mod validation;

pub use builder::PageBuilder;
pub use config::InertiaConfig;
pub use encoder::{InertiaModel, model_to_value, models_to_value};
pub use history::{CLEAR_HISTORY_SESSION_KEY, clear_history};
pub use page::Page;
pub use props::{Deferred, Prop, Props, callable, defer, lazy, merge, optional};
pub use protocol::InertiaRequest;
pub use resolve::deep_transform;
pub use share::{InertiaContext, encrypt_history, share, share_all};
pub use validation::{Form, VALIDATION_ERRORS_SESSION_KEY, inertia_validate};
