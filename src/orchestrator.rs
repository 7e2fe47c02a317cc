//! Host discovery and fetch-then-render dispatch.
//!
//! Each binding gets exactly one request and exactly one render: the live
//! renderer when the payload decodes, the fallback link otherwise. Bindings
//! never wait on each other and nothing is retried.

use crate::config::WidgetConfig;
use crate::dom::Dom;
use crate::error::{EmbedError, EmbedResult};
use crate::http::HttpClient;
use crate::model::{decode_object, EntityRecord, RollPayload};
use crate::render;
use crate::style::ensure_widget_styles;
use crate::{PLANT_MARKER, ROLL_MARKER};
use futures::future::join_all;
use serde::de::DeserializeOwned;

/// Which widget a host asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    Plant,
    Roll,
}

impl WidgetKind {
    pub fn marker(self) -> &'static str {
        match self {
            WidgetKind::Plant => PLANT_MARKER,
            WidgetKind::Roll => ROLL_MARKER,
        }
    }
}

/// A discovered host element and the username it asked for.
#[derive(Debug, Clone)]
pub struct Binding<N> {
    pub node: N,
    pub kind: WidgetKind,
    pub username: String,
}

/// What a binding ended up showing.
#[derive(Debug, Clone, PartialEq)]
pub enum BindingOutcome {
    Rendered,
    Fallback(EmbedError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BindingReport {
    pub kind: WidgetKind,
    pub username: String,
    pub outcome: BindingOutcome,
    /// Set when the DOM adapter rejected the final write.
    pub dom_error: Option<EmbedError>,
}

impl BindingReport {
    pub fn is_rendered(&self) -> bool {
        self.outcome == BindingOutcome::Rendered
    }
}

pub struct Orchestrator<'a, D: Dom, C: HttpClient> {
    dom: &'a D,
    client: &'a C,
    config: &'a WidgetConfig,
}

impl<'a, D: Dom, C: HttpClient> Orchestrator<'a, D, C> {
    pub fn new(dom: &'a D, client: &'a C, config: &'a WidgetConfig) -> Self {
        Self { dom, client, config }
    }

    /// Collect plant hosts, then roll hosts. A host carrying both markers is
    /// bound once, as a plant.
    pub fn discover(&self) -> Vec<Binding<D::Node>> {
        let mut bindings = Vec::new();
        for kind in [WidgetKind::Plant, WidgetKind::Roll] {
            for node in self.dom.query_marked(kind.marker()) {
                if kind == WidgetKind::Roll && self.dom.attribute(&node, PLANT_MARKER).is_some() {
                    continue;
                }
                let username = self.dom.attribute(&node, kind.marker()).unwrap_or_default();
                bindings.push(Binding { node, kind, username });
            }
        }
        tracing::debug!(count = bindings.len(), "discovered widget hosts");
        bindings
    }

    /// Install the stylesheet, then resolve every binding concurrently.
    ///
    /// Reports come back in discovery order, independent of completion order.
    pub async fn run(&self) -> Vec<BindingReport> {
        if let Err(e) = ensure_widget_styles(self.dom) {
            tracing::error!(error = %e, "failed to install widget styles");
        }
        let bindings = self.discover();
        join_all(bindings.iter().map(|b| self.resolve(b))).await
    }

    /// Fetch and render one binding.
    pub async fn resolve(&self, binding: &Binding<D::Node>) -> BindingReport {
        let Binding { node, kind, username } = binding;
        let (outcome, written) = match kind {
            WidgetKind::Plant => {
                let url = self.config.plant_json_url(username);
                match self.fetch_json::<EntityRecord>(&url).await {
                    Ok(data) => (
                        BindingOutcome::Rendered,
                        render::render_plant(self.dom, node, &data),
                    ),
                    Err(e) => (
                        BindingOutcome::Fallback(e),
                        render::render_plant_fallback(self.dom, node, self.config, username),
                    ),
                }
            }
            WidgetKind::Roll => {
                let url = self.config.roll_json_url(username);
                match self.fetch_json::<RollPayload>(&url).await {
                    Ok(data) => (
                        BindingOutcome::Rendered,
                        render::render_roll(self.dom, node, &data),
                    ),
                    Err(e) => (
                        BindingOutcome::Fallback(e),
                        render::render_roll_fallback(self.dom, node, self.config, username),
                    ),
                }
            }
        };

        match &outcome {
            BindingOutcome::Rendered => {
                tracing::debug!(?kind, %username, "rendered widget");
            }
            BindingOutcome::Fallback(e) => {
                tracing::warn!(?kind, %username, reason = e.kind(), error = %e, "widget fell back to profile link");
            }
        }
        let dom_error = written.err();
        if let Some(e) = &dom_error {
            tracing::error!(?kind, %username, error = %e, "failed to write widget content");
        }

        BindingReport {
            kind: *kind,
            username: username.clone(),
            outcome,
            dom_error,
        }
    }

    /// GET `url`; a non-2xx status fails without looking at the body.
    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> EmbedResult<T> {
        let response = self.client.get(url).await?;
        if !response.is_success() {
            return Err(EmbedError::HttpStatus {
                url: url.to_string(),
                status: response.status_code,
            });
        }
        decode_object(&response.body).map_err(|e| EmbedError::Payload {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}
