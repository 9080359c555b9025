//! Error types for xmlserializer
//!
//! This module defines all error types used throughout the library.
//! The first five variants are well-formedness failures; they are only ever
//! raised when a serialization call requires well-formed output.

use crate::dom::NodeKind;
use thiserror::Error;

/// Result type alias using xmlserializer Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for xmlserializer operations
#[derive(Error, Debug)]
pub enum Error {
    /// A tag or attribute local name fails the Name production or its extra constraint
    #[error("invalid name: '{name}' is not a valid {node} name")]
    InvalidName {
        /// Kind of the node carrying the name
        node: NodeKind,
        /// The offending name
        name: String,
    },

    /// Character data contains characters outside the XML Char production or breaks
    /// a structural constraint of its construct
    #[error("invalid character data: {} is not valid {node} data", quoted(.data))]
    InvalidCharacterData {
        /// Kind of the node carrying the data
        node: NodeKind,
        /// The offending data, `None` when the host left it unset
        data: Option<String>,
    },

    /// Doctype public identifier contains characters outside PubidChar
    #[error("invalid public id: {} contains invalid characters", quoted(.public_id))]
    InvalidPublicId {
        /// The offending public identifier
        public_id: Option<String>,
    },

    /// Document node without a document element
    #[error("document has no document element")]
    MissingDocumentElement,

    /// Two attributes of one element share namespace and local name
    #[error(
        "duplicate attribute: element cannot have two attributes with namespace {} and local name '{local_name}'",
        quoted(.namespace)
    )]
    DuplicateAttribute {
        /// Shared namespace URI
        namespace: Option<String>,
        /// Shared local name
        local_name: String,
    },

    /// A node kind the serialization algorithm has no rule for
    #[error("unsupported node: {0} nodes cannot be serialized")]
    UnsupportedNode(NodeKind),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Node tree (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns true for the errors raised by well-formedness checks
    pub fn is_well_formedness(&self) -> bool {
        matches!(
            self,
            Error::InvalidName { .. }
                | Error::InvalidCharacterData { .. }
                | Error::InvalidPublicId { .. }
                | Error::MissingDocumentElement
                | Error::DuplicateAttribute { .. }
        )
    }

    pub(crate) fn invalid_name(node: NodeKind, name: &str) -> Self {
        Error::InvalidName {
            node,
            name: name.to_string(),
        }
    }

    pub(crate) fn invalid_data(node: NodeKind, data: Option<&str>) -> Self {
        Error::InvalidCharacterData {
            node,
            data: data.map(str::to_string),
        }
    }
}

fn quoted(value: &Option<String>) -> String {
    match value {
        Some(v) => format!("'{}'", v),
        None => "null".to_string(),
    }
}
