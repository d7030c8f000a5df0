//! Conversion from `html5ever`'s reference-counted DOM into owned nodes.

use std::io::Read;

use html5ever::ParseOpts;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use tz_core::{Document, Element, Node};

use crate::HtmlError;

/// Parses an HTML document from a string.
pub fn parse_document(html: &str) -> Document {
    let dom = html5ever::parse_document(RcDom::default(), ParseOpts::default()).one(html);
    convert(&dom)
}

/// Parses an HTML document from a UTF-8 byte stream.
pub fn read_document<R: Read>(reader: &mut R) -> Result<Document, HtmlError> {
    let dom = html5ever::parse_document(RcDom::default(), ParseOpts::default())
        .from_utf8()
        .read_from(reader)?;
    Ok(convert(&dom))
}

fn convert(dom: &RcDom) -> Document {
    let children = convert_children(&dom.document);
    tracing::debug!(top_level = children.len(), "parsed HTML document");
    Document::new(children)
}

fn convert_children(handle: &Handle) -> Vec<Node> {
    handle
        .children
        .borrow()
        .iter()
        .filter_map(convert_node)
        .collect()
}

fn convert_node(handle: &Handle) -> Option<Node> {
    match &handle.data {
        NodeData::Doctype { name, .. } => Some(Node::Doctype(name.to_string())),
        NodeData::Text { contents } => Some(Node::Text(contents.borrow().to_string())),
        NodeData::Comment { contents } => Some(Node::Comment(contents.to_string())),
        NodeData::Element {
            name,
            attrs,
            template_contents,
            ..
        } => {
            let mut element = Element::new(name.local.to_string());
            element.attrs = attrs
                .borrow()
                .iter()
                .map(|attr| {
                    let local = attr.name.local.to_string();
                    let name = match &attr.name.prefix {
                        Some(prefix) => format!("{prefix}:{local}"),
                        None => local,
                    };
                    (name, attr.value.to_string())
                })
                .collect();
            element.children = match template_contents.borrow().as_ref() {
                Some(contents) => convert_children(contents),
                None => convert_children(handle),
            };
            Some(Node::Element(element))
        }
        NodeData::Document | NodeData::ProcessingInstruction { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(doc: &Document) -> &Element {
        let html = doc
            .children
            .iter()
            .find_map(Node::as_element)
            .expect("html element");
        html.children
            .iter()
            .filter_map(Node::as_element)
            .find(|e| e.tag == "body")
            .expect("body element")
    }

    #[test]
    fn builds_html_head_body() {
        let doc = parse_document("<!DOCTYPE html><p>hi</p>");
        assert_eq!(doc.children[0], Node::Doctype("html".to_string()));

        let body = body(&doc);
        let p = body.children[0].as_element().unwrap();
        assert_eq!(p.tag, "p");
        assert_eq!(p.children, vec![Node::text("hi")]);
    }

    #[test]
    fn keeps_attributes_in_order() {
        let doc = parse_document(r#"<a href="/x" title="t" data-id="7">x</a>"#);
        let a = body(&doc).children[0].as_element().unwrap();
        assert_eq!(
            a.attrs,
            vec![
                ("href".to_string(), "/x".to_string()),
                ("title".to_string(), "t".to_string()),
                ("data-id".to_string(), "7".to_string()),
            ]
        );
    }

    #[test]
    fn decodes_entities_in_text() {
        let doc = parse_document("<p>a &amp; b &lt; 2024-02-08T20:03:14Z</p>");
        let p = body(&doc).children[0].as_element().unwrap();
        assert_eq!(p.children, vec![Node::text("a & b < 2024-02-08T20:03:14Z")]);
    }

    #[test]
    fn inlines_template_contents() {
        let doc = parse_document("<template><p>t</p></template>");
        let html = doc.children[0].as_element().unwrap();
        let head = html.children[0].as_element().unwrap();
        let template = head.children[0].as_element().unwrap();
        assert_eq!(template.tag, "template");
        assert_eq!(template.children.len(), 1);
    }

    #[test]
    fn reads_from_stream() {
        let mut input = "<p>2024-02-08T20:03:14Z</p>".as_bytes();
        let doc = read_document(&mut input).unwrap();
        assert_eq!(doc.text_content(), "2024-02-08T20:03:14Z");
    }
}
