//! Data-to-markup mapping for both widget modes and the shared fallback link.
//!
//! Every `render_*` function replaces the host's content in a single write.

pub mod plant;
pub mod roll;

pub use plant::{plant_card, render_plant, render_plant_fallback};
pub use roll::{render_roll, render_roll_fallback, roll_grid, EMPTY_ROLL_TEXT};

use crate::config::WidgetConfig;
use crate::dom::Dom;
use crate::error::EmbedResult;
use crate::html::Element;

/// Label of the link shown when live data is unavailable.
pub const FALLBACK_TEXT: &str = "View this garden on Gardn";

/// Link to the user's profile page on the public site.
pub fn fallback_link(config: &WidgetConfig, username: &str) -> Element {
    Element::top_link(config.profile_url(username)).text(FALLBACK_TEXT)
}

pub(crate) fn render_fallback<D: Dom>(
    dom: &D,
    host: &D::Node,
    config: &WidgetConfig,
    username: &str,
) -> EmbedResult<()> {
    dom.replace_markup(host, &fallback_link(config, username))
}
