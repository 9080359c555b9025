//! Attribute list serialization

use super::SerializationContext;
use crate::dom::{Element, NodeKind};
use crate::error::{Error, Result};
use crate::escape::escape_attr_value;
use crate::namespaces::{tuple_exists, NamespacePrefixMap, QName};
use crate::{names, XMLNS_NAMESPACE, XML_NAMESPACE};
use std::borrow::Cow;

impl SerializationContext {
    /// Serialize the attributes of `element`, each preceded by a single space
    ///
    /// Namespace declarations already accounted for by the element (an ignored
    /// default declaration, duplicate prefix declarations) are left out.
    /// Attributes in a namespace without a known prefix get a generated one,
    /// declared right before the attribute.
    pub(crate) fn serialize_attributes(
        &mut self,
        element: &Element,
        map: &mut NamespacePrefixMap,
        ignore_namespace_definition: bool,
    ) -> Result<String> {
        let mut result = String::new();
        let mut local_name_set: Vec<QName> = Vec::with_capacity(element.attributes.len());

        for attr in &element.attributes {
            let local_name = attr.local_name.as_str();
            let attr_namespace = attr.namespace_uri.as_deref();

            let tuple = QName::new(attr_namespace, local_name);
            if self.require_well_formed && tuple_exists(&local_name_set, &tuple) {
                return Err(Error::DuplicateAttribute {
                    namespace: tuple.namespace,
                    local_name: tuple.local_name,
                });
            }
            local_name_set.push(tuple);

            let mut candidate_prefix = None;
            if let Some(attr_namespace) = attr_namespace {
                if attr_namespace == XMLNS_NAMESPACE {
                    let suppressed = match attr.prefix {
                        None => ignore_namespace_definition,
                        Some(_) => self.duplicate_prefixes.contains(local_name),
                    };
                    if suppressed {
                        log::trace!("dropping redundant namespace declaration {}", local_name);
                        continue;
                    }
                }

                if attr_namespace == XML_NAMESPACE {
                    candidate_prefix = Some("xml".to_string());
                } else if attr.prefix.is_none() && attr_namespace == XMLNS_NAMESPACE {
                    // xmlns="..." stays unqualified
                } else if let Some(prefix) = map.get(attr_namespace) {
                    candidate_prefix = Some(prefix.to_string());
                } else {
                    let prefix = self.prefix_index.generate_prefix(map, attr_namespace);
                    result.push_str(&format!(
                        " xmlns:{}=\"{}\"",
                        prefix,
                        escape_attr_value(attr_namespace)
                    ));
                    candidate_prefix = Some(prefix);
                }
            }

            result.push(' ');
            if let Some(prefix) = candidate_prefix {
                result.push_str(&prefix);
                result.push(':');
            }

            if self.require_well_formed && !names::is_attr_name(local_name, attr_namespace) {
                return Err(Error::invalid_name(NodeKind::Attribute, local_name));
            }

            result.push_str(local_name);
            result.push_str("=\"");
            result.push_str(&self.serialize_attr_value(attr.value.as_deref())?);
            result.push('"');
        }

        Ok(result)
    }

    /// Escape an attribute value for use between double quotes
    ///
    /// A missing value serializes as the empty string.
    pub(crate) fn serialize_attr_value<'a>(&self, value: Option<&'a str>) -> Result<Cow<'a, str>> {
        if self.require_well_formed && !names::is_char(value) {
            return Err(Error::invalid_data(NodeKind::Attribute, value));
        }
        Ok(value.map_or(Cow::Borrowed(""), escape_attr_value))
    }
}
