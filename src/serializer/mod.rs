//! XML serialization of node trees
//!
//! This module implements the XML serialization algorithm of the W3C DOM
//! Parsing specification: a recursive walk over the tree that reconciles
//! namespace prefixes, produces markup per node kind and, on request, rejects
//! trees that would not serialize to well-formed XML.
//!
//! ## Example
//!
//! ```rust
//! use xmlserializer::dom::{Attr, Element, Node};
//! use xmlserializer::XmlSerializer;
//!
//! let tree = Node::from(
//!     Element::new("greeting")
//!         .with_attribute(Attr::new("lang", "en"))
//!         .with_child(Node::text("hello & welcome")),
//! );
//!
//! let xml = XmlSerializer::default().serialize_to_string(&tree, true).unwrap();
//! assert_eq!(xml, r#"<greeting lang="en">hello &amp; welcome</greeting>"#);
//! ```

mod attributes;
mod element;
mod nodes;

use crate::dom::{Node, NodeKind};
use crate::error::{Error, Result};
use crate::namespaces::{NamespacePrefixMap, Prefix, PrefixIndex};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Configuration for serializers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SerializerConfig {
    /// Whether text, processing instruction and doctype strings are written as-is.
    /// When false they are trimmed of surrounding whitespace.
    pub preserve_whitespace: bool,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            preserve_whitespace: true,
        }
    }
}

impl SerializerConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whitespace preservation
    pub fn with_preserve_whitespace(mut self, preserve: bool) -> Self {
        self.preserve_whitespace = preserve;
        self
    }
}

/// Produces the XML serialization of node trees
///
/// A serializer only holds its configuration. Every call starts from fresh
/// namespace and prefix state, so one serializer can be shared between threads.
#[derive(Debug, Clone, Default)]
pub struct XmlSerializer {
    config: SerializerConfig,
}

impl XmlSerializer {
    /// Create a serializer with the given configuration
    pub fn new(config: SerializerConfig) -> Self {
        Self { config }
    }

    /// Create a serializer that preserves or trims whitespace
    pub fn with_preserve_whitespace(preserve: bool) -> Self {
        Self::new(SerializerConfig::new().with_preserve_whitespace(preserve))
    }

    /// Get the configuration
    pub fn config(&self) -> &SerializerConfig {
        &self.config
    }

    /// Serialize `root` and everything below it
    ///
    /// With `require_well_formed` set, the first construct that cannot be
    /// represented as well-formed XML aborts the call with its error. Without
    /// it, the tree is written as-is and only unsupported node kinds fail.
    pub fn serialize_to_string(&self, root: &Node, require_well_formed: bool) -> Result<String> {
        log::debug!(
            "serializing {} node (require_well_formed: {}, preserve_whitespace: {})",
            root.kind(),
            require_well_formed,
            self.config.preserve_whitespace
        );

        let mut context =
            SerializationContext::new(require_well_formed, self.config.preserve_whitespace);
        context.serialize_node(root, None, &NamespacePrefixMap::new())
    }
}

/// State of one serialization call
#[derive(Debug)]
pub(crate) struct SerializationContext {
    prefix_index: PrefixIndex,
    /// Prefixes the element being serialized redeclares with an unchanged binding
    duplicate_prefixes: IndexSet<Prefix>,
    require_well_formed: bool,
    preserve_whitespace: bool,
}

impl SerializationContext {
    pub(crate) fn new(require_well_formed: bool, preserve_whitespace: bool) -> Self {
        Self {
            prefix_index: PrefixIndex::new(),
            duplicate_prefixes: IndexSet::new(),
            require_well_formed,
            preserve_whitespace,
        }
    }

    /// Serialize one node under the given context namespace and prefix map
    pub(crate) fn serialize_node<'n>(
        &mut self,
        node: &'n Node,
        namespace: Option<&'n str>,
        prefix_map: &NamespacePrefixMap,
    ) -> Result<String> {
        match node {
            Node::Element(element) => self.serialize_element(element, namespace, prefix_map),
            Node::Document(document) => self.serialize_document(document, namespace, prefix_map),
            Node::Comment(comment) => self.serialize_comment(comment),
            Node::Text(text) => self.serialize_text(text),
            Node::DocumentFragment(fragment) => {
                self.serialize_children(&fragment.children, namespace, prefix_map)
            }
            Node::DocumentType(doctype) => self.serialize_document_type(doctype),
            Node::ProcessingInstruction(pi) => self.serialize_processing_instruction(pi),
            Node::Attribute(_) => Err(Error::UnsupportedNode(NodeKind::Attribute)),
        }
    }

    fn serialize_children<'n>(
        &mut self,
        children: &'n [Node],
        namespace: Option<&'n str>,
        prefix_map: &NamespacePrefixMap,
    ) -> Result<String> {
        let mut markup = String::new();
        for child in children {
            markup.push_str(&self.serialize_node(child, namespace, prefix_map)?);
        }
        Ok(markup)
    }

    fn whitespace<'a>(&self, value: &'a str) -> &'a str {
        if self.preserve_whitespace {
            value
        } else {
            value.trim()
        }
    }
}
