//! Serialise a [`MemoryDocument`] to a standalone HTML page.

use crate::dom::{HostContent, MemoryDocument};
use crate::escape::escape_html;
use std::fmt::Write;

/// Full page with the head styles and every host `<div>` in body order.
pub fn render_page(doc: &MemoryDocument, title: &str) -> Result<String, std::fmt::Error> {
    let mut head = String::new();
    for (id, css) in doc.head_styles() {
        // CSS is crate-owned, only the id needs escaping.
        writeln!(head, "<style id=\"{}\">{}</style>", escape_html(id.as_str()), css)?;
    }

    let mut body = String::new();
    for host in doc.hosts() {
        body.push_str("<div");
        for (name, value) in &host.attributes {
            write!(body, " {}=\"{}\"", escape_html(name.as_str()), escape_html(value.as_str()))?;
        }
        body.push('>');
        match &host.content {
            HostContent::Empty => {}
            HostContent::Text(t) => body.push_str(&escape_html(t.as_str())),
            HostContent::Markup(el) => write!(body, "{}", el)?,
        }
        body.push_str("</div>\n");
    }

    let mut html = String::new();
    write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{}</title>
{}</head>
<body>
{}</body>
</html>
"#,
        escape_html(title),
        head,
        body
    )?;
    Ok(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Dom;
    use crate::html::Element;
    use crate::style::{ensure_widget_styles, STYLE_ID};

    #[test]
    fn test_page_contains_styles_and_hosts() {
        let doc = MemoryDocument::new();
        ensure_widget_styles(&doc).unwrap();
        let a = doc.add_host(&[("data-gardn", "a\"b")]);
        let b = doc.add_host(&[("data-gardn-roll", "c")]);
        doc.replace_markup(&a, &Element::new("p").text("x<y")).unwrap();
        doc.replace_text(&b, "No picks yet.").unwrap();

        let page = render_page(&doc, "Gardn <preview>").unwrap();
        assert!(page.contains("<title>Gardn &lt;preview&gt;</title>"));
        assert!(page.contains(&format!("<style id=\"{}\">.gardn-widget{{", STYLE_ID)));
        assert!(page.contains("<div data-gardn=\"a&quot;b\"><p>x&lt;y</p></div>"));
        assert!(page.contains("<div data-gardn-roll=\"c\">No picks yet.</div>"));
    }
}
