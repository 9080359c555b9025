//! Element serialization

use super::SerializationContext;
use crate::dom::{Element, NodeKind};
use crate::error::{Error, Result};
use crate::namespaces::{record_namespace_info, NamespacePrefixMap};
use crate::{names, HTML_NAMESPACE, XML_NAMESPACE};

/// HTML elements that never have children and are always self-closed
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "basefont", "bgsound", "br", "col", "embed", "frame", "hr", "img", "input",
    "keygen", "link", "menuitem", "meta", "param", "source", "track", "wbr",
];

fn is_void_element(local_name: &str) -> bool {
    VOID_ELEMENTS
        .iter()
        .any(|void| void.eq_ignore_ascii_case(local_name))
}

impl SerializationContext {
    pub(crate) fn serialize_element<'n>(
        &mut self,
        element: &'n Element,
        namespace: Option<&'n str>,
        prefix_map: &NamespacePrefixMap,
    ) -> Result<String> {
        let local_name = element.local_name.as_str();
        if self.require_well_formed && !names::is_tag_name(local_name) {
            return Err(Error::invalid_name(NodeKind::Element, local_name));
        }

        let mut markup = String::from("<");
        let mut ignore_namespace_definition = false;
        let mut map = prefix_map.clone();
        let mut element_prefixes = Vec::new();

        self.duplicate_prefixes.clear();
        let local_default_namespace = record_namespace_info(
            element,
            &mut map,
            &mut element_prefixes,
            &mut self.duplicate_prefixes,
        );

        let mut inherited_namespace = namespace;
        let ns = element.namespace_uri.as_deref();
        let mut declaration = None;

        let qualified_name = if inherited_namespace == ns {
            // A default declaration on this element restates the inherited one
            if local_default_namespace.is_some() {
                ignore_namespace_definition = true;
            }
            if ns == Some(XML_NAMESPACE) {
                format!("xml:{}", local_name)
            } else {
                local_name.to_string()
            }
        } else if let Some(candidate) = ns.and_then(|uri| map.get(uri)).map(str::to_string) {
            if local_default_namespace.is_some() {
                inherited_namespace = ns;
            }
            format!("{}:{}", candidate, local_name)
        } else if let (Some(prefix), Some(uri), None) =
            (element.prefix.as_deref(), ns, local_default_namespace)
        {
            let prefix = if element_prefixes.iter().any(|p| p == prefix) {
                self.prefix_index.generate_prefix(&mut map, uri)
            } else {
                map.insert(uri, prefix);
                prefix.to_string()
            };
            declaration = Some(format!(
                " xmlns:{}=\"{}\"",
                prefix,
                self.serialize_attr_value(Some(uri))?
            ));
            format!("{}:{}", prefix, local_name)
        } else if local_default_namespace.is_none() || local_default_namespace != ns {
            ignore_namespace_definition = true;
            inherited_namespace = ns;
            declaration = Some(format!(
                " xmlns=\"{}\"",
                self.serialize_attr_value(Some(ns.unwrap_or("")))?
            ));
            local_name.to_string()
        } else {
            inherited_namespace = ns;
            local_name.to_string()
        };

        markup.push_str(&qualified_name);
        if let Some(declaration) = declaration {
            markup.push_str(&declaration);
        }
        markup.push_str(&self.serialize_attributes(element, &mut map, ignore_namespace_definition)?);

        let is_html = ns == Some(HTML_NAMESPACE);
        if !element.has_child_nodes() {
            if is_html && is_void_element(local_name) {
                markup.push_str(" />");
                return Ok(markup);
            }
            if !is_html {
                markup.push_str("/>");
                return Ok(markup);
            }
        }
        markup.push('>');

        match &element.content {
            Some(content) if is_html && local_name.eq_ignore_ascii_case("template") => {
                markup.push_str(&self.serialize_node(content, inherited_namespace, &map)?);
            }
            _ => {
                markup.push_str(&self.serialize_children(
                    &element.children,
                    inherited_namespace,
                    &map,
                )?);
            }
        }

        markup.push_str("</");
        markup.push_str(&qualified_name);
        markup.push('>');
        Ok(markup)
    }
}
