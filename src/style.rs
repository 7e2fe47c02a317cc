//! Shared widget stylesheet and its idempotent injection.

use crate::dom::Dom;
use crate::error::EmbedResult;

/// Id of the `<style>` element; its presence means the stylesheet is installed.
pub const STYLE_ID: &str = "gardn-widget-style";

/// Single plant card rules (`.gardn-widget`).
pub const PLANT_CSS: &str = ".gardn-widget{max-width:380px;font-family:'Avenir Next','Trebuchet MS','Gill Sans',sans-serif;color:#1e2f2a}\
.gardn-widget .card{display:block;background:#fff;border:1px solid #c8d3b6;border-radius:16px;padding:.75rem;box-shadow:0 10px 30px rgba(35,69,43,.12)}\
.gardn-widget p{margin:.2rem 0}\
.gardn-widget .plant-link{display:inline-block}\
.gardn-widget .plant-img{display:block;max-width:100%;height:auto}\
.gardn-widget .pick-box{border-top:1px dashed #cad7bc;margin-top:.6rem;padding-top:.6rem}\
.gardn-widget .pick-count{margin:0 0 .5rem}\
.gardn-widget .btn{display:inline-flex;align-items:center;justify-content:center;background:linear-gradient(180deg,#2f7a4a,#185a35);color:#fff;border:0;border-radius:10px;padding:.52rem .82rem;text-decoration:none;font-weight:600}";

/// Roll grid rules (`.gardn-roll`).
pub const ROLL_CSS: &str = ".gardn-roll{display:grid;grid-template-columns:repeat(auto-fill,minmax(140px,1fr));gap:.75rem;font-family:'Avenir Next','Trebuchet MS','Gill Sans',sans-serif;color:#1e2f2a}\
.gardn-roll .gardn-roll-card{display:flex;flex-direction:column;align-items:center;gap:.25rem;background:#fff;border:1px solid #c8d3b6;border-radius:14px;padding:.6rem;text-decoration:none;color:inherit;box-shadow:0 6px 18px rgba(35,69,43,.1)}\
.gardn-roll img{display:block;max-width:100%;height:auto}\
.gardn-roll strong{font-size:.95rem;text-align:center}\
.gardn-roll small{font-size:.75rem;color:#5b6f63;text-align:center;word-break:break-all}";

/// Full stylesheet covering both layouts.
pub fn widget_stylesheet() -> String {
    format!("{}{}", PLANT_CSS, ROLL_CSS)
}

/// Install the shared stylesheet unless an element with [`STYLE_ID`] already exists.
///
/// Returns `true` when this call inserted it.
pub fn ensure_widget_styles<D: Dom>(dom: &D) -> EmbedResult<bool> {
    if dom.element_exists(STYLE_ID) {
        return Ok(false);
    }
    dom.append_head_style(STYLE_ID, &widget_stylesheet())?;
    Ok(true)
}
