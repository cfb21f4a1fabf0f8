use serde::{Deserialize, Serialize};

use crate::domain::{ClaimId, DialectId};

pub const SCIM_GROUP_SCHEMA: &str = "urn:ietf:params:scim:schemas:core:2.0:Group";
pub const SCIM_SEARCH_REQUEST_SCHEMA: &str = "urn:ietf:params:scim:api:messages:2.0:SearchRequest";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimDialect {
    pub id: DialectId,
    #[serde(rename = "dialectURI")]
    pub dialect_uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddDialectRequest {
    #[serde(rename = "dialectURI")]
    pub dialect_uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalClaim {
    pub id: ClaimId,
    #[serde(rename = "claimURI")]
    pub claim_uri: String,
    #[serde(rename = "claimDialectURI")]
    pub claim_dialect_uri: String,
    #[serde(rename = "mappedLocalClaimURI")]
    pub mapped_local_claim_uri: String,
}

/// Claim mapping collected by the wizard before the dialect exists; the
/// server assigns the id on create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddExternalClaim {
    #[serde(rename = "claimURI")]
    pub claim_uri: String,
    #[serde(rename = "mappedLocalClaimURI")]
    pub mapped_local_claim_uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGroupPayload {
    pub schemas: Vec<String>,
    #[serde(rename = "displayName")]
    pub display_name: String,
}

impl CreateGroupPayload {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            schemas: vec![SCIM_GROUP_SCHEMA.to_string()],
            display_name: display_name.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub schemas: Vec<String>,
    pub filter: String,
    #[serde(rename = "startIndex")]
    pub start_index: u64,
}

impl SearchRequest {
    pub fn new(filter: impl Into<String>) -> Self {
        Self {
            schemas: vec![SCIM_SEARCH_REQUEST_SCHEMA.to_string()],
            filter: filter.into(),
            start_index: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(rename = "totalResults")]
    pub total_results: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserStore {
    pub name: String,
    #[serde(
        rename = "rolenameRegEx",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub rolename_regex: Option<String>,
}

/// Result of a create call. The API reports the new resource through the
/// `Location` response header when it assigns an id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceHandle {
    pub location: Option<String>,
}

impl ResourceHandle {
    pub fn with_location(location: impl Into<String>) -> Self {
        Self {
            location: Some(location.into()),
        }
    }

    /// Trailing path segment of the location header, i.e. the created
    /// resource's id.
    pub fn created_id(&self) -> Option<&str> {
        let location = self.location.as_deref()?;
        let id = location.rsplit('/').next()?;
        (!id.is_empty()).then_some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_id_is_last_location_segment() {
        let handle =
            ResourceHandle::with_location("https://idp.example.com/t/carbon.super/Groups/9f3a");
        assert_eq!(handle.created_id(), Some("9f3a"));
    }

    #[test]
    fn created_id_absent_without_location() {
        assert_eq!(ResourceHandle::default().created_id(), None);
        let trailing_slash = ResourceHandle::with_location("https://idp.example.com/Groups/");
        assert_eq!(trailing_slash.created_id(), None);
    }
}
