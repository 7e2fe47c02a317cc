//! # Gardn embeddable widgets
//!
//! Renders a user's plant card or the grid of users they picked ("roll")
//! into host elements on a third-party page, using JSON from the Gardn API.
//!
//! ## Features
//! - Host discovery by marker attribute (`data-gardn`, `data-gardn-roll`)
//! - One independent fetch per host, with a link-only fallback on any failure
//! - Markup built through [`html::Element`], which escapes every text and attribute value
//! - A single shared stylesheet injected at most once per document
//! - Pluggable document and HTTP capabilities ([`Dom`], [`HttpClient`])
//!
//! ## Example
//! ```ignore
//! use gardn_embed::{MemoryDocument, Orchestrator, ReqwestClient, WidgetConfig};
//!
//! let doc = MemoryDocument::new();
//! doc.add_host(&[("data-gardn", "alice")]);
//!
//! let config = WidgetConfig::from_env();
//! let client = ReqwestClient::new();
//! let reports = Orchestrator::new(&doc, &client, &config).run().await;
//! ```

pub mod config;
pub mod dom;
pub mod error;
pub mod escape;
pub mod html;
pub mod http;
pub mod model;
pub mod orchestrator;
pub mod render;
pub mod snapshot;
pub mod style;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::WidgetConfig;
pub use dom::{Dom, HostContent, HostId, MemoryDocument};
pub use error::{EmbedError, EmbedResult};
pub use escape::{encode_uri_component, escape_html, normalize_url};
pub use html::{Element, Html, Node};
pub use http::{HttpClient, HttpResponse, ReqwestClient};
pub use model::{EntityRecord, RollPayload};
pub use orchestrator::{Binding, BindingOutcome, BindingReport, Orchestrator, WidgetKind};

/// Attribute marking a host for the single plant card. Value is the username.
pub const PLANT_MARKER: &str = "data-gardn";

/// Attribute marking a host for the roll grid. Value is the username whose roll is shown.
pub const ROLL_MARKER: &str = "data-gardn-roll";
