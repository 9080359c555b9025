//! Node trees handed to the serializer
//!
//! This module defines the read-only document tree the serialization algorithm
//! walks: a closed set of node kinds, each carrying exactly the fields the
//! algorithm reads. Hosts either build trees with the constructors below or load
//! them from JSON.
//!
//! Character data a host may leave unset is `Option<String>`. `None` never
//! passes a well-formedness check and serializes as the empty string otherwise.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Read;

/// The kinds of node a tree can contain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    /// Element node
    Element,
    /// Attribute node
    Attribute,
    /// Text node
    Text,
    /// Processing instruction node
    ProcessingInstruction,
    /// Comment node
    Comment,
    /// Document node
    Document,
    /// Document type node
    DocumentType,
    /// Document fragment node
    DocumentFragment,
}

impl NodeKind {
    /// The DOM `nodeType` code of this kind
    pub fn node_type(self) -> u16 {
        match self {
            NodeKind::Element => 1,
            NodeKind::Attribute => 2,
            NodeKind::Text => 3,
            NodeKind::ProcessingInstruction => 7,
            NodeKind::Comment => 8,
            NodeKind::Document => 9,
            NodeKind::DocumentType => 10,
            NodeKind::DocumentFragment => 11,
        }
    }

    /// Look up a kind by DOM `nodeType` code
    ///
    /// Codes for kinds this crate does not model (CDATA sections, entities,
    /// notations) return `None`.
    pub fn from_node_type(code: u16) -> Option<Self> {
        match code {
            1 => Some(NodeKind::Element),
            2 => Some(NodeKind::Attribute),
            3 => Some(NodeKind::Text),
            7 => Some(NodeKind::ProcessingInstruction),
            8 => Some(NodeKind::Comment),
            9 => Some(NodeKind::Document),
            10 => Some(NodeKind::DocumentType),
            11 => Some(NodeKind::DocumentFragment),
            _ => None,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Element => "element",
            NodeKind::Attribute => "attribute",
            NodeKind::Text => "text",
            NodeKind::ProcessingInstruction => "processing instruction",
            NodeKind::Comment => "comment",
            NodeKind::Document => "document",
            NodeKind::DocumentType => "document type",
            NodeKind::DocumentFragment => "document fragment",
        };
        f.write_str(name)
    }
}

/// A node of the tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Node {
    /// Element node
    Element(Element),
    /// Attribute node outside of an element
    Attribute(Attr),
    /// Text node
    Text(Text),
    /// Processing instruction node
    ProcessingInstruction(ProcessingInstruction),
    /// Comment node
    Comment(Comment),
    /// Document node
    Document(Document),
    /// Document type node
    DocumentType(DocumentType),
    /// Document fragment node
    DocumentFragment(DocumentFragment),
}

impl Node {
    /// Create a text node
    pub fn text(data: impl Into<String>) -> Self {
        Node::Text(Text {
            data: Some(data.into()),
        })
    }

    /// Create a comment node
    pub fn comment(data: impl Into<String>) -> Self {
        Node::Comment(Comment {
            data: Some(data.into()),
        })
    }

    /// Create a processing instruction node
    pub fn processing_instruction(target: impl Into<String>, data: impl Into<String>) -> Self {
        Node::ProcessingInstruction(ProcessingInstruction {
            target: Some(target.into()),
            data: Some(data.into()),
        })
    }

    /// Create a document type node
    pub fn doctype(
        name: impl Into<String>,
        public_id: impl Into<String>,
        system_id: impl Into<String>,
    ) -> Self {
        Node::DocumentType(DocumentType {
            name: name.into(),
            public_id: Some(public_id.into()),
            system_id: Some(system_id.into()),
        })
    }

    /// Create a UTF-8 document node
    pub fn document(children: Vec<Node>) -> Self {
        Node::Document(Document {
            children,
            ..Document::default()
        })
    }

    /// Create a document fragment node
    pub fn fragment(children: Vec<Node>) -> Self {
        Node::DocumentFragment(DocumentFragment { children })
    }

    /// Load a tree from its JSON representation
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a tree from a reader yielding JSON
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Dump the tree as pretty-printed JSON
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The kind of this node
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Element(_) => NodeKind::Element,
            Node::Attribute(_) => NodeKind::Attribute,
            Node::Text(_) => NodeKind::Text,
            Node::ProcessingInstruction(_) => NodeKind::ProcessingInstruction,
            Node::Comment(_) => NodeKind::Comment,
            Node::Document(_) => NodeKind::Document,
            Node::DocumentType(_) => NodeKind::DocumentType,
            Node::DocumentFragment(_) => NodeKind::DocumentFragment,
        }
    }

    /// Child nodes in document order; empty for leaf kinds
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element(e) => &e.children,
            Node::Document(d) => &d.children,
            Node::DocumentFragment(f) => &f.children,
            _ => &[],
        }
    }

    /// Check if this is an element node
    pub fn is_element(&self) -> bool {
        self.kind() == NodeKind::Element
    }

    /// Check if this is an attribute node
    pub fn is_attribute(&self) -> bool {
        self.kind() == NodeKind::Attribute
    }

    /// Check if this is a text node
    pub fn is_text(&self) -> bool {
        self.kind() == NodeKind::Text
    }

    /// Check if this is a processing instruction node
    pub fn is_processing_instruction(&self) -> bool {
        self.kind() == NodeKind::ProcessingInstruction
    }

    /// Check if this is a comment node
    pub fn is_comment(&self) -> bool {
        self.kind() == NodeKind::Comment
    }

    /// Check if this is a document node
    pub fn is_document(&self) -> bool {
        self.kind() == NodeKind::Document
    }

    /// Check if this is a document type node
    pub fn is_document_type(&self) -> bool {
        self.kind() == NodeKind::DocumentType
    }

    /// Check if this is a document fragment node
    pub fn is_document_fragment(&self) -> bool {
        self.kind() == NodeKind::DocumentFragment
    }
}

/// XML Element in the document tree
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    /// Local name
    pub local_name: String,
    /// Namespace URI (None for no namespace)
    #[serde(default, rename = "namespaceURI")]
    pub namespace_uri: Option<String>,
    /// Prefix the element was created with
    #[serde(default)]
    pub prefix: Option<String>,
    /// Attributes in document order, namespace declarations included
    #[serde(default)]
    pub attributes: Vec<Attr>,
    /// Child nodes in document order
    #[serde(default)]
    pub children: Vec<Node>,
    /// Template contents of an HTML `template` element
    #[serde(default)]
    pub content: Option<Box<Node>>,
}

impl Element {
    /// Create an element without namespace
    pub fn new(local_name: impl Into<String>) -> Self {
        Self {
            local_name: local_name.into(),
            ..Self::default()
        }
    }

    /// Set the namespace URI
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace_uri = Some(namespace.into());
        self
    }

    /// Set the prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Append an attribute
    pub fn with_attribute(mut self, attr: Attr) -> Self {
        self.attributes.push(attr);
        self
    }

    /// Append a child node
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Set the template contents
    pub fn with_content(mut self, content: impl Into<Node>) -> Self {
        self.content = Some(Box::new(content.into()));
        self
    }

    /// Check whether the element has child nodes
    pub fn has_child_nodes(&self) -> bool {
        !self.children.is_empty()
    }

    /// Get an attribute value by local name
    pub fn get_attribute(&self, local_name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.local_name == local_name)
            .and_then(|a| a.value.as_deref())
    }
}

/// Attribute of an element
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attr {
    /// Namespace URI (None for no namespace)
    #[serde(default, rename = "namespaceURI")]
    pub namespace_uri: Option<String>,
    /// Prefix the attribute was created with
    #[serde(default)]
    pub prefix: Option<String>,
    /// Local name
    pub local_name: String,
    /// Attribute value
    #[serde(default)]
    pub value: Option<String>,
}

impl Attr {
    /// Create an attribute without namespace
    pub fn new(local_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            local_name: local_name.into(),
            value: Some(value.into()),
            ..Self::default()
        }
    }

    /// Create a namespaced attribute
    pub fn namespaced(
        namespace: impl Into<String>,
        prefix: Option<&str>,
        local_name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            namespace_uri: Some(namespace.into()),
            prefix: prefix.map(str::to_string),
            local_name: local_name.into(),
            value: Some(value.into()),
        }
    }

    /// Create an `xmlns:prefix="namespace"` declaration
    pub fn xmlns_prefix(prefix: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self::namespaced(crate::XMLNS_NAMESPACE, Some("xmlns"), prefix, namespace)
    }

    /// Create an `xmlns="namespace"` declaration
    pub fn xmlns_default(namespace: impl Into<String>) -> Self {
        Self::namespaced(crate::XMLNS_NAMESPACE, None, "xmlns", namespace)
    }
}

/// Text node
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Text {
    /// Character data
    #[serde(default)]
    pub data: Option<String>,
}

/// Comment node
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Comment {
    /// Comment text
    #[serde(default)]
    pub data: Option<String>,
}

/// Processing instruction node
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProcessingInstruction {
    /// Target application
    #[serde(default)]
    pub target: Option<String>,
    /// Instruction data
    #[serde(default)]
    pub data: Option<String>,
}

/// Document type node
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentType {
    /// Doctype name
    pub name: String,
    /// Public identifier
    #[serde(default)]
    pub public_id: Option<String>,
    /// System identifier
    #[serde(default)]
    pub system_id: Option<String>,
}

/// Document node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Declared character set, written into the XML declaration
    #[serde(default = "default_character_set")]
    pub character_set: String,
    /// Child nodes in document order
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Document {
    /// The first element child, if any
    pub fn document_element(&self) -> Option<&Element> {
        self.children.iter().find_map(|child| match child {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }
}

impl Default for Document {
    fn default() -> Self {
        Self {
            character_set: default_character_set(),
            children: Vec::new(),
        }
    }
}

fn default_character_set() -> String {
    "UTF-8".to_string()
}

/// Document fragment node
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DocumentFragment {
    /// Child nodes in document order
    #[serde(default)]
    pub children: Vec<Node>,
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<Attr> for Node {
    fn from(attr: Attr) -> Self {
        Node::Attribute(attr)
    }
}

impl From<Document> for Node {
    fn from(document: Document) -> Self {
        Node::Document(document)
    }
}

impl From<DocumentType> for Node {
    fn from(doctype: DocumentType) -> Self {
        Node::DocumentType(doctype)
    }
}

impl From<DocumentFragment> for Node {
    fn from(fragment: DocumentFragment) -> Self {
        Node::DocumentFragment(fragment)
    }
}
