//! XML namespace handling
//!
//! This module provides the namespace prefix bookkeeping the serializer needs:
//! the namespace-URI to prefix map, synthetic prefix generation, per-element
//! namespace declaration recording, and expanded-name (QName) identity.

use crate::dom::Element;
use crate::XMLNS_NAMESPACE;
use indexmap::{IndexMap, IndexSet};

/// XML Namespace URI
pub type NamespaceUri = String;

/// Namespace prefix
pub type Prefix = String;

/// Qualified name (QName) - combination of namespace and local name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    /// Namespace URI (None for no namespace)
    pub namespace: Option<NamespaceUri>,
    /// Local name
    pub local_name: String,
}

impl QName {
    /// Create a new QName
    pub fn new(namespace: Option<impl Into<String>>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.map(|s| s.into()),
            local_name: local_name.into(),
        }
    }

    /// Create a QName without a namespace
    pub fn local(local_name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            local_name: local_name.into(),
        }
    }

    /// Create a QName with a namespace
    pub fn namespaced(namespace: impl Into<String>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            local_name: local_name.into(),
        }
    }

    /// Get the name in Clark notation (`{namespace}local`)
    pub fn to_clark(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{{{}}}{}", ns, self.local_name),
            None => self.local_name.clone(),
        }
    }
}

/// Mapping from namespace URI to the single prefix currently bound to it
///
/// A fresh map holds exactly one entry: the XMLNS namespace bound to `xmlns`.
/// Elements work on their own clone, so bindings made inside one subtree are
/// never visible to its siblings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespacePrefixMap {
    prefixes: IndexMap<NamespaceUri, Prefix>,
}

impl NamespacePrefixMap {
    /// Create a map seeded with the `xmlns` binding
    pub fn new() -> Self {
        let mut prefixes = IndexMap::new();
        prefixes.insert(XMLNS_NAMESPACE.to_string(), "xmlns".to_string());
        Self { prefixes }
    }

    /// Get the prefix bound to a namespace
    pub fn get(&self, namespace: &str) -> Option<&str> {
        self.prefixes.get(namespace).map(|s| s.as_str())
    }

    /// Check whether a namespace is bound to exactly this prefix
    pub fn has(&self, namespace: &str, prefix: &str) -> bool {
        self.get(namespace) == Some(prefix)
    }

    /// Bind a namespace to a prefix, replacing any previous binding
    pub fn insert(&mut self, namespace: impl Into<String>, prefix: impl Into<String>) {
        self.prefixes.insert(namespace.into(), prefix.into());
    }

    /// Number of bound namespaces
    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    /// Whether the map is empty
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    /// Iterate over `(namespace, prefix)` bindings in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prefixes.iter().map(|(ns, p)| (ns.as_str(), p.as_str()))
    }
}

impl Default for NamespacePrefixMap {
    fn default() -> Self {
        Self::new()
    }
}

/// Counter minting synthetic `ns<N>` prefixes
///
/// Starts at 1 for every serialization call and only ever grows, so every
/// generated prefix within one call is distinct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixIndex(u32);

impl PrefixIndex {
    /// Create a counter starting at 1
    pub fn new() -> Self {
        Self(1)
    }

    /// The number the next generated prefix will carry
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Mint a new prefix, bind it to `namespace` in `map` and return it
    pub fn generate_prefix(&mut self, map: &mut NamespacePrefixMap, namespace: &str) -> Prefix {
        let prefix = format!("ns{}", self.0);
        self.0 += 1;
        log::trace!("generated prefix {} for namespace {}", prefix, namespace);
        map.insert(namespace, prefix.clone());
        prefix
    }
}

impl Default for PrefixIndex {
    fn default() -> Self {
        Self::new()
    }
}

/// Record the namespace declarations found on an element
///
/// Walks the element's attributes in document order. A default namespace
/// declaration (`xmlns="..."`) is returned; the last one wins. A prefixed
/// declaration (`xmlns:p="..."`) either binds the URI to `p` in `prefix_map` or,
/// when that exact binding already exists, is recorded in `duplicates`. Every
/// declared prefix is appended to `element_prefixes`.
///
/// `prefix_map` must already be the element's own copy of its parent's map.
pub fn record_namespace_info<'n>(
    element: &'n Element,
    prefix_map: &mut NamespacePrefixMap,
    element_prefixes: &mut Vec<Prefix>,
    duplicates: &mut IndexSet<Prefix>,
) -> Option<&'n str> {
    let mut default_namespace = None;

    for attr in element
        .attributes
        .iter()
        .filter(|a| a.namespace_uri.as_deref() == Some(XMLNS_NAMESPACE))
    {
        if attr.prefix.is_none() {
            default_namespace = attr.value.as_deref();
            continue;
        }

        let prefix = attr.local_name.as_str();
        let namespace = attr.value.as_deref().unwrap_or("");

        if prefix_map.has(namespace, prefix) {
            duplicates.insert(prefix.to_string());
        } else {
            prefix_map.insert(namespace, prefix);
        }

        element_prefixes.push(prefix.to_string());
    }

    default_namespace
}

/// Check whether an expanded name is already present in `records`
pub fn tuple_exists(records: &[QName], tuple: &QName) -> bool {
    records.iter().any(|record| record == tuple)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Attr;

    const XHTML: &str = "http://www.w3.org/1999/xhtml";

    #[test]
    fn test_qname_to_clark() {
        let qname = QName::namespaced("http://example.com", "element");
        assert_eq!(qname.to_clark(), "{http://example.com}element");

        let qname_local = QName::local("element");
        assert_eq!(qname_local.to_clark(), "element");
    }

    #[test]
    fn test_prefix_map_is_seeded() {
        let map = NamespacePrefixMap::new();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(XMLNS_NAMESPACE), Some("xmlns"));
    }

    #[test]
    fn test_prefix_map_clone_is_independent() {
        let parent = NamespacePrefixMap::new();
        let mut child = parent.clone();
        child.insert(XHTML, "h");

        assert_eq!(child.get(XHTML), Some("h"));
        assert_eq!(parent.get(XHTML), None);
    }

    #[test]
    fn test_generate_prefix() {
        let mut map = NamespacePrefixMap::new();
        let mut index = PrefixIndex::new();

        assert_eq!(index.generate_prefix(&mut map, XHTML), "ns1");
        assert_eq!(map.get(XHTML), Some("ns1"));
        assert_eq!(index.value(), 2);
        assert_eq!(index.generate_prefix(&mut map, "urn:other"), "ns2");
    }

    #[test]
    fn test_record_default_namespace() {
        let element = Element::new("div").with_attribute(Attr::xmlns_default(XHTML));
        let mut map = NamespacePrefixMap::new();
        let mut prefixes = Vec::new();
        let mut duplicates = IndexSet::new();

        let default_ns = record_namespace_info(&element, &mut map, &mut prefixes, &mut duplicates);
        assert_eq!(default_ns, Some(XHTML));
        assert!(prefixes.is_empty());
        assert_eq!(map, NamespacePrefixMap::new());
    }

    #[test]
    fn test_record_prefixed_namespace() {
        let element = Element::new("div").with_attribute(Attr::xmlns_prefix("html", XHTML));
        let mut map = NamespacePrefixMap::new();
        let mut prefixes = Vec::new();
        let mut duplicates = IndexSet::new();

        let default_ns = record_namespace_info(&element, &mut map, &mut prefixes, &mut duplicates);
        assert_eq!(default_ns, None);
        assert_eq!(map.get(XHTML), Some("html"));
        assert_eq!(prefixes, vec!["html".to_string()]);
        assert!(duplicates.is_empty());
    }

    #[test]
    fn test_record_duplicate_prefix() {
        let element = Element::new("div").with_attribute(Attr::xmlns_prefix("html", XHTML));
        let mut map = NamespacePrefixMap::new();
        map.insert(XHTML, "html");
        let mut prefixes = Vec::new();
        let mut duplicates = IndexSet::new();

        record_namespace_info(&element, &mut map, &mut prefixes, &mut duplicates);
        assert_eq!(duplicates.len(), 1);
        assert!(duplicates.contains("html"));
        assert_eq!(prefixes, vec!["html".to_string()]);
    }

    #[test]
    fn test_record_rebinds_namespace_to_new_prefix() {
        let element = Element::new("div").with_attribute(Attr::xmlns_prefix("x", XHTML));
        let mut map = NamespacePrefixMap::new();
        map.insert(XHTML, "html");
        let mut prefixes = Vec::new();
        let mut duplicates = IndexSet::new();

        record_namespace_info(&element, &mut map, &mut prefixes, &mut duplicates);
        assert_eq!(map.get(XHTML), Some("x"));
        assert!(duplicates.is_empty());
    }

    #[test]
    fn test_record_skips_ordinary_attributes() {
        let element = Element::new("div").with_attribute(Attr::new("name", "harrison"));
        let mut map = NamespacePrefixMap::new();
        let mut prefixes = Vec::new();
        let mut duplicates = IndexSet::new();

        assert_eq!(
            record_namespace_info(&element, &mut map, &mut prefixes, &mut duplicates),
            None
        );
        assert_eq!(map, NamespacePrefixMap::new());
        assert!(prefixes.is_empty());
    }

    #[test]
    fn test_tuple_exists() {
        let records = vec![
            QName::namespaced(XMLNS_NAMESPACE, "xml"),
            QName::namespaced(XHTML, "html"),
        ];

        assert!(tuple_exists(&records, &QName::namespaced(XMLNS_NAMESPACE, "xml")));
        assert!(tuple_exists(&records, &QName::namespaced(XHTML, "html")));

        assert!(!tuple_exists(&records, &QName::namespaced(XMLNS_NAMESPACE, "xmlns")));
        assert!(!tuple_exists(&records, &QName::namespaced(XHTML, "xhtml")));
        assert!(!tuple_exists(&records, &QName::local("html")));
    }
}
