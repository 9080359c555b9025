//! Serialization of non-element nodes

use super::SerializationContext;
use crate::dom::{Comment, Document, DocumentType, NodeKind, ProcessingInstruction, Text};
use crate::error::{Error, Result};
use crate::escape::escape_text;
use crate::names;
use crate::namespaces::NamespacePrefixMap;

impl SerializationContext {
    pub(crate) fn serialize_document<'n>(
        &mut self,
        document: &'n Document,
        namespace: Option<&'n str>,
        prefix_map: &NamespacePrefixMap,
    ) -> Result<String> {
        if self.require_well_formed && document.document_element().is_none() {
            return Err(Error::MissingDocumentElement);
        }

        let mut markup = format!(
            "<?xml version=\"1.0\" encoding=\"{}\"?>",
            document.character_set
        );
        markup.push_str(&self.serialize_children(&document.children, namespace, prefix_map)?);
        Ok(markup)
    }

    pub(crate) fn serialize_text(&self, text: &Text) -> Result<String> {
        let data = text.data.as_deref();
        if self.require_well_formed && !names::is_char(data) {
            return Err(Error::invalid_data(NodeKind::Text, data));
        }

        let data = self.whitespace(data.unwrap_or(""));
        Ok(escape_text(data).into_owned())
    }

    pub(crate) fn serialize_comment(&self, comment: &Comment) -> Result<String> {
        let data = comment.data.as_deref();
        if self.require_well_formed && !names::is_comment(data) {
            return Err(Error::invalid_data(NodeKind::Comment, data));
        }

        Ok(format!("<!--{}-->", data.unwrap_or("")))
    }

    pub(crate) fn serialize_processing_instruction(
        &self,
        pi: &ProcessingInstruction,
    ) -> Result<String> {
        let target = pi.target.as_deref();
        if self.require_well_formed && !names::is_pi_target(target) {
            return Err(Error::invalid_data(NodeKind::ProcessingInstruction, target));
        }
        let data = pi.data.as_deref();
        if self.require_well_formed && !names::is_pi_data(data) {
            return Err(Error::invalid_data(NodeKind::ProcessingInstruction, data));
        }

        let target = self.whitespace(target.unwrap_or(""));
        let data = self.whitespace(data.unwrap_or(""));
        if data.is_empty() {
            Ok(format!("<?{}?>", target))
        } else {
            Ok(format!("<?{} {}?>", target, data))
        }
    }

    pub(crate) fn serialize_document_type(&self, doctype: &DocumentType) -> Result<String> {
        let public_id = doctype.public_id.as_deref();
        if self.require_well_formed && !names::is_public_id(public_id) {
            return Err(Error::InvalidPublicId {
                public_id: public_id.map(str::to_string),
            });
        }
        let system_id = doctype.system_id.as_deref();
        if self.require_well_formed && !names::is_system_id(system_id) {
            return Err(Error::invalid_data(NodeKind::DocumentType, system_id));
        }

        let public_id = self.whitespace(public_id.unwrap_or(""));
        let system_id = self.whitespace(system_id.unwrap_or(""));

        let mut markup = String::from("<!DOCTYPE ");
        if public_id.is_empty() && system_id.is_empty() && doctype.name.eq_ignore_ascii_case("html")
        {
            markup.push_str(&doctype.name.to_ascii_lowercase());
        } else {
            markup.push_str(&doctype.name);
        }

        if !public_id.is_empty() {
            markup.push_str(&format!(" PUBLIC \"{}\"", public_id));
        }
        if !system_id.is_empty() && public_id.is_empty() {
            markup.push_str(" SYSTEM");
        }
        if !system_id.is_empty() {
            markup.push_str(&format!(" \"{}\"", system_id));
        }
        markup.push('>');
        Ok(markup)
    }
}
