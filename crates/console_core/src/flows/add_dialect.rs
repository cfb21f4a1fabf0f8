//! Three-step wizard that registers a claim dialect and its initial external
//! claim mappings.

use futures::future::join_all;
use shared::domain::{DialectId, ResourceKind};
use shared::protocol::{AddDialectRequest, AddExternalClaim};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::capabilities::{ConsoleContext, NotificationLevel};
use crate::error::ValidationError;
use crate::flows::{encode_payload, FlowError, SubmitOutcome};
use crate::wizard::{StepDefinition, StepOutcome, WizardController, WizardError};

pub const STEP_DETAILS: usize = 0;
pub const STEP_CLAIMS: usize = 1;
pub const STEP_SUMMARY: usize = 2;

/// Payload captured per wizard step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialectWizardData {
    Details { dialect_uri: String },
    ExternalClaims(Vec<AddExternalClaim>),
    Summary,
}

pub struct AddDialectWizard {
    controller: WizardController<DialectWizardData>,
}

impl Default for AddDialectWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl AddDialectWizard {
    pub fn new() -> Self {
        let steps = vec![
            StepDefinition::new("claims.dialects.wizard.steps.dialect_uri"),
            StepDefinition::new("claims.dialects.wizard.steps.external_attribute"),
            StepDefinition::new("claims.dialects.wizard.steps.summary"),
        ];
        Self {
            controller: WizardController::new(steps),
        }
    }

    pub fn controller(&self) -> &WizardController<DialectWizardData> {
        &self.controller
    }

    pub fn current_index(&self) -> usize {
        self.controller.current_index()
    }

    /// First step: the dialect URI, syntax-checked before it is accepted.
    pub fn submit_details(&mut self, dialect_uri: &str) -> Result<StepOutcome, FlowError> {
        let dialect_uri = dialect_uri.trim();
        url::Url::parse(dialect_uri).map_err(|err| ValidationError::InvalidUri {
            uri: dialect_uri.to_string(),
            reason: err.to_string(),
        })?;
        let outcome = self.controller.complete_step(
            STEP_DETAILS,
            DialectWizardData::Details {
                dialect_uri: dialect_uri.to_string(),
            },
        )?;
        Ok(outcome)
    }

    /// Second step: the external claims to map under the new dialect. An
    /// empty list is allowed; claims can also be added from the edit screen
    /// later.
    pub fn submit_claims(&mut self, claims: Vec<AddExternalClaim>) -> Result<StepOutcome, FlowError> {
        let outcome = self
            .controller
            .complete_step(STEP_CLAIMS, DialectWizardData::ExternalClaims(claims))?;
        Ok(outcome)
    }

    /// Terminal step: the summary carries no data of its own; completing it
    /// makes the session submittable.
    pub fn confirm_summary(&mut self) -> Result<StepOutcome, FlowError> {
        let outcome = self
            .controller
            .complete_step(STEP_SUMMARY, DialectWizardData::Summary)?;
        Ok(outcome)
    }

    pub fn go_back(&mut self) -> bool {
        self.controller.go_back()
    }

    pub fn dialect_uri(&self) -> Option<&str> {
        match self.controller.step_result(STEP_DETAILS)? {
            DialectWizardData::Details { dialect_uri } => Some(dialect_uri),
            _ => None,
        }
    }

    pub fn claims(&self) -> &[AddExternalClaim] {
        match self.controller.step_result(STEP_CLAIMS) {
            Some(DialectWizardData::ExternalClaims(claims)) => claims,
            _ => &[],
        }
    }

    /// Runs the terminal action: create the dialect, then dispatch every
    /// collected claim create concurrently and wait for the batch to settle.
    /// A failed dialect create keeps the session open for resubmission; claim
    /// failures are reported as one aggregate warning and the dialog still
    /// closes and refreshes.
    pub async fn submit(&self, ctx: &ConsoleContext) -> Result<SubmitOutcome, FlowError> {
        if !self.controller.is_complete() {
            return Err(WizardError::NotReady.into());
        }
        let Some(dialect_uri) = self.dialect_uri() else {
            return Err(WizardError::NotReady.into());
        };
        let claims = self.claims();

        let payload = encode_payload(&AddDialectRequest {
            dialect_uri: dialect_uri.to_string(),
        })?;
        let handle = match ctx.client.create(ResourceKind::ClaimDialects, payload).await {
            Ok(handle) => handle,
            Err(err) => {
                error!(
                    session = %self.controller.session_id(),
                    dialect_uri,
                    "dialect create failed: {err}"
                );
                ctx.notifier.notify(
                    NotificationLevel::Error,
                    &ctx.translator
                        .lookup("claims.dialects.notifications.add_dialect.error", &[]),
                    &err.detail(),
                );
                return Err(err.into());
            }
        };

        let dialect_id = DialectId::from_uri(dialect_uri);
        let creates = claims.iter().map(|claim| {
            let kind = ResourceKind::ExternalClaims {
                dialect_id: dialect_id.clone(),
            };
            let payload = encode_payload(claim);
            async move {
                match payload {
                    Ok(payload) => ctx.client.create(kind, payload).await,
                    Err(err) => Err(err),
                }
            }
        });
        let settled = join_all(creates).await;
        let failed = settled.iter().filter(|result| result.is_err()).count();

        if failed == 0 {
            info!(
                session = %self.controller.session_id(),
                dialect_uri,
                claims = claims.len(),
                "dialect created"
            );
            ctx.notifier.notify(
                NotificationLevel::Success,
                &ctx.translator
                    .lookup("claims.dialects.notifications.add_dialect.success.message", &[]),
                &ctx.translator.lookup(
                    "claims.dialects.notifications.add_dialect.success.description",
                    &[],
                ),
            );
        } else {
            warn!(
                session = %self.controller.session_id(),
                dialect_uri,
                failed,
                total = claims.len(),
                "dialect created but some claim mappings failed"
            );
            ctx.notifier.notify(
                NotificationLevel::Warning,
                &ctx.translator.lookup(
                    "claims.dialects.notifications.add_dialect.partial.message",
                    &[],
                ),
                &ctx.translator.lookup(
                    "claims.dialects.notifications.add_dialect.partial.description",
                    &[("failed", &failed.to_string())],
                ),
            );
        }

        // The dialog closes on either branch; only where it lands differs.
        if let Some(id) = handle.created_id() {
            let path = format!("claim-dialects/{id}/edit");
            ctx.navigator.navigate_to(&path);
            Ok(SubmitOutcome::NavigatedToEdit {
                resource_id: id.to_string(),
            })
        } else {
            Ok(SubmitOutcome::ClosedAndRefreshed)
        }
    }

    /// Fire-and-track submit: the dialog may be dropped before the network
    /// settles; the returned handle is the only way to observe the outcome.
    pub fn dispatch_submit(self, ctx: ConsoleContext) -> JoinHandle<Result<SubmitOutcome, FlowError>> {
        tokio::spawn(async move { self.submit(&ctx).await })
    }
}
