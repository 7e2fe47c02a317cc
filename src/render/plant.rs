use crate::config::WidgetConfig;
use crate::dom::Dom;
use crate::error::EmbedResult;
use crate::html::Element;
use crate::model::EntityRecord;

pub const PICKED_TEXT: &str = "You picked this";
pub const LOGIN_TO_PICK_TEXT: &str = "Login to pick";

/// Build the single plant card.
///
/// URLs are used exactly as served. A missing `login_to_pick_url` yields an
/// empty `href` rather than an error.
pub fn plant_card(data: &EntityRecord) -> Element {
    let name = Element::new("p").child(Element::top_link(&data.me_url).text(data.display_label()));

    let image = Element::new("p").child(
        Element::top_link(&data.me_url).class("plant-link").child(
            Element::new("img")
                .class("plant-img")
                .attr("src", &data.plant_svg_url)
                .attr("alt", format!("Plant for {}", data.domain_label()))
                .attr("loading", "lazy")
                .attr("width", "180")
                .attr("height", "140"),
        ),
    );

    let action = if data.has_picked {
        Element::new("span").class("btn").text(PICKED_TEXT)
    } else {
        Element::top_link(data.login_to_pick_url.as_deref().unwrap_or_default())
            .class("btn")
            .text(LOGIN_TO_PICK_TEXT)
    };

    let pick_box = Element::new("div")
        .class("pick-box")
        .child(
            Element::new("p")
                .class("pick-count")
                .text(format!("Picks: {}", data.pick_count)),
        )
        .child(action);

    Element::new("div").class("gardn-widget").child(
        Element::new("article")
            .class("card compact")
            .child(name)
            .child(image)
            .child(pick_box),
    )
}

pub fn render_plant<D: Dom>(dom: &D, host: &D::Node, data: &EntityRecord) -> EmbedResult<()> {
    dom.replace_markup(host, &plant_card(data))
}

pub fn render_plant_fallback<D: Dom>(
    dom: &D,
    host: &D::Node,
    config: &WidgetConfig,
    username: &str,
) -> EmbedResult<()> {
    super::render_fallback(dom, host, config, username)
}
