//! Document capability used by the renderers and the orchestrator, plus an
//! in-memory document for tests and static snapshots.

use crate::error::{EmbedError, EmbedResult};
use crate::html::Element;
use std::cell::RefCell;

/// The parts of a page the widget reads and writes.
///
/// Methods take `&self`: implementations are single-threaded handles
/// (a browser document, or [`MemoryDocument`] with interior mutability).
pub trait Dom {
    /// Handle to a host element.
    type Node: Clone;

    /// Every element carrying `attribute`, in document order.
    fn query_marked(&self, attribute: &str) -> Vec<Self::Node>;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    /// Whether any element with this `id` exists.
    fn element_exists(&self, id: &str) -> bool;

    /// Append `<style id=..>css</style>` to the document head.
    fn append_head_style(&self, id: &str, css: &str) -> EmbedResult<()>;

    /// Replace the host's children with `markup`.
    fn replace_markup(&self, node: &Self::Node, markup: &Element) -> EmbedResult<()>;

    /// Replace the host's children with a single text node.
    fn replace_text(&self, node: &Self::Node, text: &str) -> EmbedResult<()>;
}

/// Index of a host inside a [`MemoryDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HostId(usize);

/// Current children of a host.
#[derive(Debug, Clone, PartialEq)]
pub enum HostContent {
    Empty,
    Text(String),
    Markup(Element),
}

#[derive(Debug, Clone)]
pub(crate) struct MemoryHost {
    pub(crate) attributes: Vec<(String, String)>,
    pub(crate) content: HostContent,
    pub(crate) writes: usize,
}

#[derive(Debug, Default)]
struct MemoryInner {
    head: Vec<(String, String)>,
    hosts: Vec<MemoryHost>,
}

/// A flat document: a head holding style blocks and a body of host `<div>`s.
#[derive(Debug, Default)]
pub struct MemoryDocument {
    inner: RefCell<MemoryInner>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a host `<div>` with the given attributes to the body.
    pub fn add_host(&self, attributes: &[(&str, &str)]) -> HostId {
        let mut inner = self.inner.borrow_mut();
        inner.hosts.push(MemoryHost {
            attributes: attributes
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            content: HostContent::Empty,
            writes: 0,
        });
        HostId(inner.hosts.len() - 1)
    }

    /// Set initial host content, e.g. placeholder text written by the embedding page.
    pub fn set_placeholder(&self, host: HostId, text: &str) {
        if let Some(h) = self.inner.borrow_mut().hosts.get_mut(host.0) {
            h.content = HostContent::Text(text.to_string());
        }
    }

    pub fn content(&self, host: HostId) -> HostContent {
        self.inner
            .borrow()
            .hosts
            .get(host.0)
            .map(|h| h.content.clone())
            .unwrap_or(HostContent::Empty)
    }

    /// Number of times the widget replaced this host's content.
    pub fn write_count(&self, host: HostId) -> usize {
        self.inner
            .borrow()
            .hosts
            .get(host.0)
            .map(|h| h.writes)
            .unwrap_or(0)
    }

    /// `(id, css)` of every style block in the head.
    pub fn head_styles(&self) -> Vec<(String, String)> {
        self.inner.borrow().head.clone()
    }

    pub fn style_count(&self, id: &str) -> usize {
        self.inner.borrow().head.iter().filter(|(i, _)| i == id).count()
    }

    pub(crate) fn hosts(&self) -> Vec<MemoryHost> {
        self.inner.borrow().hosts.clone()
    }

    fn write(&self, node: &HostId, content: HostContent) -> EmbedResult<()> {
        let mut inner = self.inner.borrow_mut();
        let host = inner
            .hosts
            .get_mut(node.0)
            .ok_or_else(|| EmbedError::Dom(format!("host {} not found", node.0)))?;
        host.content = content;
        host.writes += 1;
        Ok(())
    }
}

impl Dom for MemoryDocument {
    type Node = HostId;

    fn query_marked(&self, attribute: &str) -> Vec<HostId> {
        self.inner
            .borrow()
            .hosts
            .iter()
            .enumerate()
            .filter(|(_, h)| h.attributes.iter().any(|(k, _)| k == attribute))
            .map(|(i, _)| HostId(i))
            .collect()
    }

    fn attribute(&self, node: &HostId, name: &str) -> Option<String> {
        self.inner
            .borrow()
            .hosts
            .get(node.0)?
            .attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    }

    fn element_exists(&self, id: &str) -> bool {
        let inner = self.inner.borrow();
        inner.head.iter().any(|(i, _)| i == id)
            || inner
                .hosts
                .iter()
                .any(|h| h.attributes.iter().any(|(k, v)| k == "id" && v == id))
    }

    fn append_head_style(&self, id: &str, css: &str) -> EmbedResult<()> {
        self.inner
            .borrow_mut()
            .head
            .push((id.to_string(), css.to_string()));
        Ok(())
    }

    fn replace_markup(&self, node: &HostId, markup: &Element) -> EmbedResult<()> {
        self.write(node, HostContent::Markup(markup.clone()))
    }

    fn replace_text(&self, node: &HostId, text: &str) -> EmbedResult<()> {
        self.write(node, HostContent::Text(text.to_string()))
    }
}
