//! Browser entry point: [`Dom`] over `web_sys::Document` and the exported `mount`.

use crate::config::WidgetConfig;
use crate::dom::Dom;
use crate::error::{EmbedError, EmbedResult};
use crate::html::Element;
use crate::http::ReqwestClient;
use crate::orchestrator::Orchestrator;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

fn js_error(err: JsValue) -> EmbedError {
    EmbedError::Dom(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

/// The live page document.
pub struct WebDocument {
    document: web_sys::Document,
}

impl WebDocument {
    pub fn from_window() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self { document })
    }
}

impl Dom for WebDocument {
    type Node = web_sys::Element;

    fn query_marked(&self, attribute: &str) -> Vec<web_sys::Element> {
        let Ok(list) = self.document.query_selector_all(&format!("[{}]", attribute)) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
            .collect()
    }

    fn attribute(&self, node: &web_sys::Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn element_exists(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
    }

    fn append_head_style(&self, id: &str, css: &str) -> EmbedResult<()> {
        let head = self
            .document
            .head()
            .ok_or_else(|| EmbedError::Dom("document has no head".to_string()))?;
        let style = self.document.create_element("style").map_err(js_error)?;
        style.set_id(id);
        style.set_text_content(Some(css));
        head.append_child(&style).map_err(js_error)?;
        Ok(())
    }

    fn replace_markup(&self, node: &web_sys::Element, markup: &Element) -> EmbedResult<()> {
        node.set_inner_html(markup.to_html().as_str());
        Ok(())
    }

    fn replace_text(&self, node: &web_sys::Element, text: &str) -> EmbedResult<()> {
        node.set_text_content(Some(text));
        Ok(())
    }
}

/// Discover widget hosts on the current page and render them.
///
/// `public_base` is the Gardn site root the page was served with.
#[wasm_bindgen]
pub fn mount(public_base: &str) {
    let config = WidgetConfig::new(public_base);
    wasm_bindgen_futures::spawn_local(async move {
        let Some(document) = WebDocument::from_window() else {
            return;
        };
        let client = ReqwestClient::new();
        Orchestrator::new(&document, &client, &config).run().await;
    });
}
