//! Loading slideshow markup into a [`Document`] and writing it back.
//!
//! Markup must be well-formed (XHTML style). The host layout is not computed
//! here: an element's natural box comes from its `data-box` attribute
//! (`"left top width height"`), and inline `style` overrides are parsed into the
//! element's [`Style`](crate::dom::Style).

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::debug;

use crate::constants::BOX_ATTR;
use crate::dom::{Document, NodeId, NodeKind, Style};
use crate::error::{MorphError, MorphResult};
use crate::geometry::Rect;
use crate::html::{Html, escape};

pub fn parse(markup: &str) -> MorphResult<Document> {
    let mut reader = Reader::from_str(markup);
    reader.config_mut().trim_text(false);

    let mut document = Document::new();
    let mut stack = vec![document.root()];
    let mut pending_text = String::new();

    loop {
        let event = reader.read_event().map_err(|e| {
            MorphError::Markup(format!("at byte {}: {e}", reader.buffer_position()))
        })?;
        match event {
            Event::Start(ref e) => {
                flush_text(&mut document, &stack, &mut pending_text)?;
                let id = open_element(&mut document, &stack, e)?;
                stack.push(id);
            }
            Event::Empty(ref e) => {
                flush_text(&mut document, &stack, &mut pending_text)?;
                open_element(&mut document, &stack, e)?;
            }
            Event::End(ref e) => {
                flush_text(&mut document, &stack, &mut pending_text)?;
                if stack.len() <= 1 {
                    let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                    return Err(MorphError::Markup(format!("unexpected closing tag </{name}>")));
                }
                stack.pop();
            }
            Event::Text(ref t) => {
                pending_text.push_str(&String::from_utf8_lossy(t));
            }
            Event::GeneralRef(ref r) => {
                pending_text.push('&');
                pending_text.push_str(&String::from_utf8_lossy(r));
                pending_text.push(';');
            }
            Event::CData(ref t) => {
                let text = String::from_utf8_lossy(t).to_string();
                flush_text(&mut document, &stack, &mut pending_text)?;
                let node = document.create_text(&text);
                append_to_top(&mut document, &stack, node)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }
    flush_text(&mut document, &stack, &mut pending_text)?;

    if stack.len() > 1 {
        return Err(MorphError::Markup(format!("{} unclosed element(s)", stack.len() - 1)));
    }
    debug!(nodes = document.len(), "parsed slideshow markup");
    Ok(document)
}

fn append_to_top(document: &mut Document, stack: &[NodeId], node: NodeId) -> MorphResult<()> {
    let parent = stack.last().copied().unwrap_or_else(|| document.root());
    document.append_child(parent, node)
}

fn open_element(document: &mut Document, stack: &[NodeId], start: &BytesStart) -> MorphResult<NodeId> {
    let tag = String::from_utf8_lossy(start.name().as_ref()).to_string();
    let id = document.create_element(&tag);

    for attr in start.attributes() {
        let attr = attr.map_err(|e| MorphError::Markup(format!("bad attribute on <{tag}>: {e}")))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let raw = String::from_utf8_lossy(&attr.value);
        let value = unescape(&raw)?;
        match key.as_str() {
            "style" => *document.style_mut(id)? = Style::from_css(&value),
            BOX_ATTR => {
                document.set_natural_box(id, parse_box(&value)?)?;
                document.set_attribute(id, &key, &value)?;
            }
            _ => document.set_attribute(id, &key, &value)?,
        }
    }

    append_to_top(document, stack, id)?;
    Ok(id)
}

fn flush_text(document: &mut Document, stack: &[NodeId], pending: &mut String) -> MorphResult<()> {
    if pending.is_empty() {
        return Ok(());
    }
    let raw = std::mem::take(pending);
    if raw.trim().is_empty() {
        return Ok(());
    }
    let text = unescape(&raw)?;
    let node = document.create_text(&text);
    append_to_top(document, stack, node)
}

fn unescape(raw: &str) -> MorphResult<String> {
    quick_xml::escape::unescape(raw)
        .map(|text| text.into_owned())
        .map_err(|e| MorphError::Markup(format!("bad entity in {raw:?}: {e}")))
}

/// Parses `"left top width height"`.
pub fn parse_box(value: &str) -> MorphResult<Rect> {
    let numbers = value
        .split_whitespace()
        .map(|n| n.trim_end_matches("px").parse::<f32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| MorphError::Markup(format!("bad {BOX_ATTR} {value:?}: {e}")))?;
    match numbers.as_slice() {
        &[left, top, width, height] => Ok(Rect::new(left, top, width, height)),
        _ => Err(MorphError::Markup(format!(
            "bad {BOX_ATTR} {value:?}: expected 4 numbers"
        ))),
    }
}

/// Writes the document back as markup, style overrides inlined.
pub fn serialize(document: &Document) -> Html {
    let mut out = Html::default();
    for &child in document.children(document.root()) {
        write_node(document, child, &mut out);
    }
    out
}

fn write_node(document: &Document, id: NodeId, out: &mut Html) {
    let Ok(node) = document.node(id) else {
        return;
    };
    match &node.kind {
        NodeKind::Text(text) => out.push(text),
        NodeKind::Document => {
            for &child in &node.children {
                write_node(document, child, out);
            }
        }
        NodeKind::Element(el) => {
            out.push_raw("<");
            out.push_raw(&el.tag);
            for (key, value) in &el.attributes {
                out.push_raw(" ");
                out.push_raw(key);
                out.push_raw("=\"");
                out.push(escape(value));
                out.push_raw("\"");
            }
            if !el.style.is_empty() {
                out.push_raw(" style=\"");
                out.push(el.style.to_css());
                out.push_raw("\"");
            }
            out.push_raw(">");
            for &child in &node.children {
                write_node(document, child, out);
            }
            out.push_raw("</");
            out.push_raw(&el.tag);
            out.push_raw(">");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Position;

    #[test]
    fn test_parse_tree() {
        let doc = parse(
            r#"<ol class="slideshow">
                 <li data-box="0 0 100 50"><h1 data-ss-id="title">Tom &amp; Jerry</h1></li>
                 <li><p>two</p><br/></li>
               </ol>"#,
        )
        .unwrap();

        let list = doc.element_children(doc.root())[0];
        assert_eq!(doc.tag_name(list), Some("ol"));
        let slides = doc.element_children(list);
        assert_eq!(slides.len(), 2);
        assert_eq!(doc.natural_box(slides[0]).unwrap(), Rect::new(0.0, 0.0, 100.0, 50.0));
        assert_eq!(doc.text_content(slides[0]), "Tom & Jerry");
        assert_eq!(doc.descendant_elements(slides[1]).len(), 2);
    }

    #[test]
    fn test_parse_inline_style() {
        let doc = parse(r#"<div style="position: absolute; left: 5px; opacity: 0.5"></div>"#).unwrap();
        let div = doc.element_children(doc.root())[0];
        let style = doc.style(div).unwrap();
        assert_eq!(style.position, Some(Position::Absolute));
        assert_eq!(style.left, Some(5.0));
        assert_eq!(style.opacity, Some(0.5));
        assert_eq!(doc.attribute(div, "style"), None);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse("<ol><li></ol>"), Err(MorphError::Markup(_))));
        assert!(matches!(parse("<ol>"), Err(MorphError::Markup(_))));
        assert!(matches!(parse(r#"<li data-box="1 2 3"></li>"#), Err(MorphError::Markup(_))));
    }

    #[test]
    fn test_parse_box() {
        assert_eq!(parse_box("1 2px 3 4").unwrap(), Rect::new(1.0, 2.0, 3.0, 4.0));
        assert!(parse_box("a b c d").is_err());
    }

    #[test]
    fn test_serialize_escapes_and_inlines_style() {
        let mut doc = parse(r#"<ol class="slideshow"><li title="a&quot;b">x &lt; y</li></ol>"#).unwrap();
        let list = doc.element_children(doc.root())[0];
        let slide = doc.element_children(list)[0];
        doc.style_mut(slide).unwrap().opacity = Some(0.5);

        assert_eq!(
            serialize(&doc).as_str(),
            r#"<ol class="slideshow"><li title="a&#34;b" style="opacity: 0.5;">x &#60; y</li></ol>"#
        );
    }
}
