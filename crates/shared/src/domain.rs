use std::fmt;

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

id_newtype!(DialectId);
id_newtype!(ClaimId);

impl DialectId {
    /// The API addresses a dialect's nested claim collection by the unpadded
    /// standard base64 of its URI, not by the URI itself.
    pub fn from_uri(dialect_uri: &str) -> Self {
        Self(STANDARD_NO_PAD.encode(dialect_uri.as_bytes()))
    }
}

/// The user store every deployment ships with; it cannot be listed or removed.
pub const PRIMARY_USER_STORE: &str = "PRIMARY";

/// Name pattern enforced for the primary user store when a secondary store
/// does not supply its own.
pub const DEFAULT_NAME_PATTERN: &str = r"^\S{3,30}$";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    ClaimDialects,
    ExternalClaims { dialect_id: DialectId },
    Groups,
    UserStores,
}

impl ResourceKind {
    pub fn collection_path(&self) -> String {
        match self {
            Self::ClaimDialects => "claim-dialects".to_string(),
            Self::ExternalClaims { dialect_id } => {
                format!("claim-dialects/{dialect_id}/claims")
            }
            Self::Groups => "Groups".to_string(),
            Self::UserStores => "userstores".to_string(),
        }
    }

    /// Path of the collection's search endpoint, used for count queries.
    pub fn search_path(&self) -> String {
        format!("{}/.search", self.collection_path())
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::ClaimDialects => "claim dialect",
            Self::ExternalClaims { .. } => "external claim",
            Self::Groups => "group",
            Self::UserStores => "user store",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    Eq,
    Co,
    Sw,
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            Self::Eq => "eq",
            Self::Co => "co",
            Self::Sw => "sw",
        };
        f.write_str(op)
    }
}

/// A single-attribute filter rendered in the API's SCIM-style syntax,
/// e.g. `displayName eq Sales`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterExpression {
    pub attribute: String,
    pub operator: FilterOperator,
    pub value: String,
}

impl FilterExpression {
    pub fn new(
        attribute: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<String>,
    ) -> Self {
        Self {
            attribute: attribute.into(),
            operator,
            value: value.into(),
        }
    }

    pub fn eq(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(attribute, FilterOperator::Eq, value)
    }
}

impl fmt::Display for FilterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.attribute, self.operator, self.value)
    }
}
