//! # xmlserializer
//!
//! A Rust implementation of the XML serialization algorithm from the
//! [W3C DOM Parsing and Serialization](https://www.w3.org/TR/DOM-Parsing/) specification.
//!
//! ## Features
//!
//! - Serialization of documents, fragments, elements, text, comments,
//!   processing instructions and doctypes to a single string
//! - Namespace prefix reconciliation (inherited defaults, duplicate
//!   declaration suppression, generated `ns<N>` prefixes)
//! - Optional well-formedness enforcement at serialization time
//! - HTML void elements and `template` contents
//! - Node trees loadable from JSON
//!
//! ## Example
//!
//! ```rust
//! use xmlserializer::dom::{Element, Node};
//! use xmlserializer::{XmlSerializer, HTML_NAMESPACE};
//!
//! let page = Node::document(vec![
//!     Node::doctype("HTML", "", ""),
//!     Element::new("html")
//!         .with_namespace(HTML_NAMESPACE)
//!         .with_child(Element::new("br").with_namespace(HTML_NAMESPACE))
//!         .into(),
//! ]);
//!
//! let xml = XmlSerializer::default().serialize_to_string(&page, true)?;
//! assert_eq!(
//!     xml,
//!     concat!(
//!         r#"<?xml version="1.0" encoding="UTF-8"?><!DOCTYPE html>"#,
//!         r#"<html xmlns="http://www.w3.org/1999/xhtml"><br /></html>"#
//!     )
//! );
//! # Ok::<(), xmlserializer::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;

pub mod names;
pub mod namespaces;
pub mod escape;

pub mod dom;
pub mod serializer;

// Re-exports for convenience
pub use dom::{Node, NodeKind};
pub use error::{Error, Result};
pub use serializer::{SerializerConfig, XmlSerializer};

/// Version of the xmlserializer library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// XML namespace
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// XMLNS namespace
pub const XMLNS_NAMESPACE: &str = "http://www.w3.org/2000/xmlns/";

/// HTML namespace
pub const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";
