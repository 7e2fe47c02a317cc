use crate::config::WidgetConfig;
use crate::dom::Dom;
use crate::error::EmbedResult;
use crate::escape::normalize_url;
use crate::html::Element;
use crate::model::{EntityRecord, RollPayload};

/// Plain-text content for a roll with no entries.
pub const EMPTY_ROLL_TEXT: &str = "No picks yet.";

// The domain label comes from the link target here, unlike the plant card
// which prefers `identity_domain`. Roll entries do not carry that field.
fn roll_card(row: &EntityRecord) -> Element {
    let domain = normalize_url(row.me_url.as_str());
    Element::top_link(&row.me_url)
        .class("gardn-roll-card")
        .child(
            Element::new("img")
                .attr("src", &row.plant_svg_url)
                .attr("alt", format!("Plant for {}", domain))
                .attr("loading", "lazy")
                .attr("width", "120")
                .attr("height", "94"),
        )
        .child(Element::new("strong").text(row.display_label()))
        .child(Element::new("small").text(domain))
}

/// Build the grid, one card per entry in payload order. `None` when empty.
pub fn roll_grid(data: &RollPayload) -> Option<Element> {
    if data.is_empty() {
        return None;
    }
    Some(
        Element::new("div")
            .class("gardn-roll")
            .children(data.roll.iter().map(roll_card)),
    )
}

pub fn render_roll<D: Dom>(dom: &D, host: &D::Node, data: &RollPayload) -> EmbedResult<()> {
    match roll_grid(data) {
        Some(grid) => dom.replace_markup(host, &grid),
        None => dom.replace_text(host, EMPTY_ROLL_TEXT),
    }
}

pub fn render_roll_fallback<D: Dom>(
    dom: &D,
    host: &D::Node,
    config: &WidgetConfig,
    username: &str,
) -> EmbedResult<()> {
    super::render_fallback(dom, host, config, username)
}
