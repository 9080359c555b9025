//! Test support: reading serialized XML back into node trees
//!
//! A small namespace-aware reader on top of quick-xml. It keeps namespace
//! declarations as attributes and records the prefix every name was written
//! with, so a re-read tree serializes the way its source did.

#![allow(dead_code)]

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use xmlserializer::dom::{Attr, Document, DocumentType, Element, Node};
use xmlserializer::XML_NAMESPACE;

/// Bindings introduced by one element: prefix (None for default) to URI
type Scope = HashMap<Option<String>, String>;

struct TreeBuilder {
    scopes: Vec<Scope>,
    stack: Vec<Element>,
    top: Vec<Node>,
}

impl TreeBuilder {
    fn resolve(&self, prefix: Option<&str>) -> Option<String> {
        if prefix == Some("xml") {
            return Some(XML_NAMESPACE.to_string());
        }
        let key = prefix.map(str::to_string);
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(&key))
            .filter(|uri| !uri.is_empty())
            .cloned()
    }

    fn push_node(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.top.push(node),
        }
    }

    fn open(&mut self, start: &BytesStart) -> Element {
        let raw_attrs: Vec<(String, String)> = start
            .attributes()
            .map(|a| {
                let a = a.expect("attribute");
                let key = String::from_utf8(a.key.as_ref().to_vec()).expect("utf-8 name");
                let value = a.unescape_value().expect("attribute value").into_owned();
                (key, value)
            })
            .collect();

        let mut scope = Scope::new();
        for (key, value) in &raw_attrs {
            if key == "xmlns" {
                scope.insert(None, value.clone());
            } else if let Some(prefix) = key.strip_prefix("xmlns:") {
                scope.insert(Some(prefix.to_string()), value.clone());
            }
        }
        self.scopes.push(scope);

        let name = String::from_utf8(start.name().as_ref().to_vec()).expect("utf-8 name");
        let (prefix, local_name) = split(&name);
        let mut element = Element::new(local_name);
        element.prefix = prefix.map(str::to_string);
        element.namespace_uri = self.resolve(prefix);

        for (key, value) in raw_attrs {
            let attr = if key == "xmlns" {
                Attr::xmlns_default(value)
            } else if let Some(prefix) = key.strip_prefix("xmlns:") {
                Attr::xmlns_prefix(prefix, value)
            } else {
                match split(&key) {
                    (Some(prefix), local) => {
                        let namespace = self.resolve(Some(prefix)).expect("bound prefix");
                        Attr::namespaced(namespace, Some(prefix), local, value)
                    }
                    (None, local) => Attr::new(local, value),
                }
            };
            element.attributes.push(attr);
        }

        element
    }
}

fn split(name: &str) -> (Option<&str>, &str) {
    match name.split_once(':') {
        Some((prefix, local)) => (Some(prefix), local),
        None => (None, name),
    }
}

fn text_of(bytes: &[u8]) -> String {
    String::from_utf8(bytes.to_vec()).expect("utf-8 content")
}

/// Route serializer logs through the test harness, once per test binary
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Read serialized XML into a tree
///
/// Input starting with an XML declaration becomes a document node, anything
/// else a document fragment.
pub fn read_tree(xml: &str) -> Node {
    let mut reader = Reader::from_str(xml);
    let mut builder = TreeBuilder {
        scopes: Vec::new(),
        stack: Vec::new(),
        top: Vec::new(),
    };
    let mut character_set = None;

    loop {
        match reader.read_event().expect("well-formed test input") {
            Event::Decl(decl) => {
                let encoding = decl
                    .encoding()
                    .map(|e| text_of(&e.expect("encoding")))
                    .unwrap_or_else(|| "UTF-8".to_string());
                // DOM parsers report the canonical charset name
                let encoding = encoding.to_ascii_uppercase();
                character_set = Some(encoding);
            }
            Event::Start(start) => {
                let element = builder.open(&start);
                builder.stack.push(element);
            }
            Event::Empty(start) => {
                let element = builder.open(&start);
                builder.scopes.pop();
                builder.push_node(element.into());
            }
            Event::End(_) => {
                let element = builder.stack.pop().expect("open element");
                builder.scopes.pop();
                builder.push_node(element.into());
            }
            Event::Text(text) => {
                let data = text.unescape().expect("text").into_owned();
                if builder.stack.is_empty() && data.trim().is_empty() {
                    continue;
                }
                builder.push_node(Node::text(data));
            }
            Event::CData(cdata) => {
                builder.push_node(Node::text(text_of(&cdata.into_inner())));
            }
            Event::Comment(comment) => {
                builder.push_node(Node::comment(text_of(&comment.into_inner())));
            }
            Event::PI(pi) => {
                let content = text_of(&pi.into_inner());
                let (target, data) = content
                    .split_once(char::is_whitespace)
                    .map(|(t, d)| (t.to_string(), d.to_string()))
                    .unwrap_or((content.clone(), String::new()));
                builder.push_node(Node::processing_instruction(target, data));
            }
            Event::DocType(doctype) => {
                builder.push_node(Node::DocumentType(parse_doctype(&text_of(
                    &doctype.into_inner(),
                ))));
            }
            Event::Eof => break,
        }
    }

    match character_set {
        Some(character_set) => Node::Document(Document {
            character_set,
            children: builder.top,
        }),
        None => Node::fragment(builder.top),
    }
}

/// Parse the inside of `<!DOCTYPE ...>` as written by the serializer
fn parse_doctype(content: &str) -> DocumentType {
    let content = content.trim();
    let (name, rest) = content
        .split_once(char::is_whitespace)
        .unwrap_or((content, ""));
    let quoted: Vec<&str> = rest.split('"').skip(1).step_by(2).collect();

    let (public_id, system_id) = if rest.trim_start().starts_with("PUBLIC") {
        (
            quoted.first().copied().unwrap_or(""),
            quoted.get(1).copied().unwrap_or(""),
        )
    } else if rest.trim_start().starts_with("SYSTEM") {
        ("", quoted.first().copied().unwrap_or(""))
    } else {
        ("", "")
    };

    DocumentType {
        name: name.to_string(),
        public_id: Some(public_id.to_string()),
        system_id: Some(system_id.to_string()),
    }
}

/// Serialized form of the sample document used across the integration tests
pub const SAMPLE_DOCUMENT: &str = r#"<?xml version="1.0" encoding="utf-8" ?>
<!DOCTYPE root PUBLIC "-//W3C//DTD XHTML 1.0 Transitional//EN"
"http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd">
<?xml-stylesheet href="classic.css" alternate="yes" title="Classic" media="screen, print" type="text/css"?>
<root xmlns:h="http://www.w3.org/TR/html4/" xmlns:f="https://www.w3schools.com/furniture">
    <!--this is a comment node-->
    <h:table xmlns:h="http://www.w3.org/TR/html4/" xmlns:f="https://www.w3schools.com/furniture">
        <h:tr>
            <h:td />
            <h:td>Apples</h:td>
            <h:td>Bananas</h:td>
        </h:tr>
    </h:table>

    <f:table xmlns:f="https://www.w3schools.com/furniture">
        <f:name>African Coffee Table</f:name>
        <f:width>80</f:width>
        <f:length>120</f:length>
    </f:table>

    <!--html section-->
    <html xmlns="http://www.w3.org/1999/xhtml">
        <head>
            <meta name="description" content="this is html section" />
            <base href="http://localhost" />
        </head>
        <body>
            <p>this is a paragraph text</p>
            <hr />
            <template>
                <p>this is a template</p>
            </template>
        </body>
    </html>

    <svg:svg xmlns:svg="http://www.w3.org/2000/svg">
        <svg:style></svg:style>
        <title>my title</title>
    </svg:svg>

</root>
"#;

/// Expected serialization of [`SAMPLE_DOCUMENT`] with whitespace trimming
pub const SAMPLE_DOCUMENT_SERIALIZED: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8"?>"#,
    r#"<!DOCTYPE root PUBLIC "-//W3C//DTD XHTML 1.0 Transitional//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd">"#,
    r#"<?xml-stylesheet href="classic.css" alternate="yes" title="Classic" media="screen, print" type="text/css"?>"#,
    r#"<root xmlns:h="http://www.w3.org/TR/html4/" xmlns:f="https://www.w3schools.com/furniture">"#,
    r#"<!--this is a comment node-->"#,
    r#"<h:table><h:tr><h:td/><h:td>Apples</h:td><h:td>Bananas</h:td></h:tr></h:table>"#,
    r#"<f:table><f:name>African Coffee Table</f:name><f:width>80</f:width><f:length>120</f:length></f:table>"#,
    r#"<!--html section-->"#,
    r#"<html xmlns="http://www.w3.org/1999/xhtml"><head>"#,
    r#"<meta name="description" content="this is html section" /><base href="http://localhost" />"#,
    r#"</head><body><p>this is a paragraph text</p><hr />"#,
    r#"<template><p>this is a template</p></template></body></html>"#,
    r#"<svg:svg xmlns:svg="http://www.w3.org/2000/svg"><svg:style/><title>my title</title></svg:svg>"#,
    r#"</root>"#
);
