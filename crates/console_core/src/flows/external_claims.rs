//! External-claims list screen: search, sort, and pagination over the claims
//! of one dialect, plus the add-claim action.

use shared::domain::{DialectId, ResourceKind};
use shared::protocol::{AddExternalClaim, ExternalClaim};
use tracing::{info, warn};

use crate::capabilities::{ConsoleContext, NotificationLevel};
use crate::error::RemoteError;
use crate::flows::{encode_payload, FlowError};
use crate::list::{FilterPredicate, ListPresenter, ListRecord, PageView};

pub const SORT_BY_CLAIM_URI: &str = "claimURI";
pub const SORT_BY_MAPPED_LOCAL_CLAIM: &str = "mappedLocalClaimURI";

impl ListRecord for ExternalClaim {
    fn sort_value(&self, key: &str) -> Option<&str> {
        match key {
            SORT_BY_CLAIM_URI => Some(&self.claim_uri),
            SORT_BY_MAPPED_LOCAL_CLAIM => Some(&self.mapped_local_claim_uri),
            _ => None,
        }
    }
}

pub struct ExternalClaimsScreen {
    dialect_id: DialectId,
    claims: Vec<ExternalClaim>,
    presenter: ListPresenter<ExternalClaim>,
}

impl ExternalClaimsScreen {
    pub fn new(dialect_id: DialectId, claims: Vec<ExternalClaim>) -> Self {
        Self {
            dialect_id,
            claims,
            presenter: ListPresenter::new(SORT_BY_CLAIM_URI),
        }
    }

    /// Replaces the default attribute filter with a caller-supplied one.
    pub fn with_predicate(mut self, predicate: FilterPredicate<ExternalClaim>) -> Self {
        self.presenter = self.presenter.with_predicate(predicate);
        self
    }

    pub fn dialect_id(&self) -> &DialectId {
        &self.dialect_id
    }

    pub fn claims(&self) -> &[ExternalClaim] {
        &self.claims
    }

    /// Applies a search query and probes it once: a failing predicate is
    /// surfaced as a single error notification while the screen falls back
    /// to the unfiltered list.
    pub fn search(&mut self, ctx: &ConsoleContext, query: impl Into<String>) {
        self.presenter.set_query(query);
        let (_, filter_error) = self.presenter.visible_page(&self.claims);
        if let Some(err) = filter_error {
            warn!(query = self.presenter.query(), "claim filter failed: {err}");
            ctx.notifier.notify(
                NotificationLevel::Error,
                &ctx.translator
                    .lookup("claims.external.advanced_search.error", &[]),
                &err.to_string(),
            );
        }
    }

    pub fn clear_search(&mut self) {
        self.presenter.set_query("");
    }

    pub fn set_sort(&mut self, key: impl Into<String>, ascending: bool) {
        self.presenter.set_sort(key, ascending);
    }

    pub fn set_page(&mut self, page_number: usize) {
        self.presenter.set_page(page_number);
    }

    pub fn set_page_size(&mut self, size: usize) {
        self.presenter.set_page_size(size);
    }

    /// Current page of the derived view. Filter failures were already
    /// reported by [`Self::search`], so this read stays quiet.
    pub fn page(&self) -> PageView<ExternalClaim> {
        let (page, _) = self.presenter.visible_page(&self.claims);
        page
    }

    /// Creates one claim mapping under the screen's dialect, then refreshes
    /// the local list from the server.
    pub async fn add_claim(
        &mut self,
        ctx: &ConsoleContext,
        claim: AddExternalClaim,
    ) -> Result<(), FlowError> {
        let kind = ResourceKind::ExternalClaims {
            dialect_id: self.dialect_id.clone(),
        };
        let payload = encode_payload(&claim)?;

        match ctx.client.create(kind, payload).await {
            Ok(_) => {
                info!(
                    dialect = %self.dialect_id,
                    claim_uri = %claim.claim_uri,
                    "external claim added"
                );
                ctx.notifier.notify(
                    NotificationLevel::Success,
                    &ctx.translator
                        .lookup("claims.external.notifications.add_claim.success", &[]),
                    &claim.claim_uri,
                );
            }
            Err(err) => {
                ctx.notifier.notify(
                    NotificationLevel::Error,
                    &ctx.translator
                        .lookup("claims.external.notifications.add_claim.error", &[]),
                    &err.detail(),
                );
                return Err(err.into());
            }
        }

        self.refresh(ctx).await?;
        Ok(())
    }

    /// Re-fetches the dialect's claims; malformed entries are skipped rather
    /// than failing the whole listing.
    pub async fn refresh(&mut self, ctx: &ConsoleContext) -> Result<(), RemoteError> {
        let kind = ResourceKind::ExternalClaims {
            dialect_id: self.dialect_id.clone(),
        };
        let values = ctx.client.fetch_all(kind).await?;
        let mut claims = Vec::with_capacity(values.len());
        for value in values {
            match serde_json::from_value::<ExternalClaim>(value) {
                Ok(claim) => claims.push(claim),
                Err(err) => warn!(dialect = %self.dialect_id, "skipping malformed claim: {err}"),
            }
        }
        self.claims = claims;
        Ok(())
    }
}
