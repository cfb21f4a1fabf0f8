//! Claim-dialect listing for the console's landing screen.

use shared::domain::ResourceKind;
use shared::protocol::ClaimDialect;
use tracing::warn;

use crate::capabilities::ConsoleContext;
use crate::error::RemoteError;
use crate::list::ListRecord;

pub const SORT_BY_DIALECT_URI: &str = "dialectURI";

impl ListRecord for ClaimDialect {
    fn sort_value(&self, key: &str) -> Option<&str> {
        match key {
            SORT_BY_DIALECT_URI => Some(&self.dialect_uri),
            _ => None,
        }
    }
}

/// All registered dialects; malformed entries are skipped rather than
/// failing the listing.
pub async fn fetch_dialects(ctx: &ConsoleContext) -> Result<Vec<ClaimDialect>, RemoteError> {
    let values = ctx.client.fetch_all(ResourceKind::ClaimDialects).await?;
    let mut dialects = Vec::with_capacity(values.len());
    for value in values {
        match serde_json::from_value::<ClaimDialect>(value) {
            Ok(dialect) => dialects.push(dialect),
            Err(err) => warn!("skipping malformed dialect entry: {err}"),
        }
    }
    Ok(dialects)
}
