//! Group provisioning: basics capture with async-derived name validation,
//! then a summary step and the SCIM create.

use regex::Regex;
use shared::domain::{
    FilterExpression, ResourceKind, DEFAULT_NAME_PATTERN, PRIMARY_USER_STORE,
};
use shared::protocol::{CreateGroupPayload, UserStore};
use tracing::{error, info, warn};

use crate::capabilities::{ConsoleContext, NotificationLevel};
use crate::error::ValidationError;
use crate::flows::{encode_payload, FlowError, SubmitOutcome};
use crate::wizard::{StepDefinition, StepOutcome, WizardController, WizardError};

pub const STEP_BASICS: usize = 0;
pub const STEP_SUMMARY: usize = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupBasics {
    pub domain: String,
    pub group_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupWizardData {
    Basics(GroupBasics),
    Summary,
}

/// User stores a group may be provisioned into. The primary store is always
/// present even when the server-side listing is empty or unreachable.
pub async fn load_user_stores(ctx: &ConsoleContext) -> Vec<UserStore> {
    let mut stores = vec![UserStore {
        name: PRIMARY_USER_STORE.to_string(),
        rolename_regex: None,
    }];

    match ctx.client.fetch_all(ResourceKind::UserStores).await {
        Ok(values) => {
            for value in values {
                match serde_json::from_value::<UserStore>(value) {
                    Ok(store) => stores.push(store),
                    Err(err) => warn!("skipping malformed user store entry: {err}"),
                }
            }
        }
        Err(err) => warn!("user store listing failed, offering the primary store only: {err}"),
    }

    stores
}

pub struct CreateGroupWizard {
    controller: WizardController<GroupWizardData>,
    user_stores: Vec<UserStore>,
}

impl CreateGroupWizard {
    pub fn new(user_stores: Vec<UserStore>) -> Self {
        let steps = vec![
            StepDefinition::new("groups.wizard.steps.basics"),
            StepDefinition::new("groups.wizard.steps.summary"),
        ];
        Self {
            controller: WizardController::new(steps),
            user_stores,
        }
    }

    pub fn controller(&self) -> &WizardController<GroupWizardData> {
        &self.controller
    }

    pub fn user_stores(&self) -> &[UserStore] {
        &self.user_stores
    }

    /// SCIM display name: unqualified in the primary store, `DOMAIN/name`
    /// elsewhere.
    pub fn qualified_name(basics: &GroupBasics) -> String {
        if basics.domain.eq_ignore_ascii_case(PRIMARY_USER_STORE) {
            basics.group_name.clone()
        } else {
            format!("{}/{}", basics.domain, basics.group_name)
        }
    }

    /// Validates the basics form: non-empty name, a known user store, the
    /// store's name pattern, and name uniqueness via a server-side count.
    /// Validation failures surface inline and never abort the session.
    pub async fn validate_basics(
        &self,
        ctx: &ConsoleContext,
        basics: &GroupBasics,
    ) -> Result<(), FlowError> {
        if basics.group_name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }

        let store = self
            .user_stores
            .iter()
            .find(|store| store.name.eq_ignore_ascii_case(&basics.domain))
            .ok_or_else(|| ValidationError::UnknownUserStore {
                domain: basics.domain.clone(),
            })?;

        let pattern = store.rolename_regex.as_deref().unwrap_or(DEFAULT_NAME_PATTERN);
        let matches = match Regex::new(pattern) {
            Ok(regex) => regex.is_match(&basics.group_name),
            Err(err) => {
                warn!(
                    store = %store.name,
                    pattern, "user store carries an uncompilable name pattern: {err}"
                );
                false
            }
        };
        if !matches {
            return Err(ValidationError::InvalidNamePattern {
                domain: store.name.clone(),
                name: basics.group_name.clone(),
            }
            .into());
        }

        let filter = FilterExpression::eq("displayName", Self::qualified_name(basics));
        let existing = ctx.client.query(ResourceKind::Groups, &filter).await?;
        if existing > 0 {
            return Err(ValidationError::DuplicateName {
                resource: "group",
                name: Self::qualified_name(basics),
            }
            .into());
        }

        Ok(())
    }

    /// Re-validates and completes the basics step; moving forward always
    /// re-validates the current form.
    pub async fn submit_basics(
        &mut self,
        ctx: &ConsoleContext,
        basics: GroupBasics,
    ) -> Result<StepOutcome, FlowError> {
        self.validate_basics(ctx, &basics).await?;
        let outcome = self
            .controller
            .complete_step(STEP_BASICS, GroupWizardData::Basics(basics))?;
        Ok(outcome)
    }

    pub fn confirm_summary(&mut self) -> Result<StepOutcome, FlowError> {
        let outcome = self
            .controller
            .complete_step(STEP_SUMMARY, GroupWizardData::Summary)?;
        Ok(outcome)
    }

    pub fn go_back(&mut self) -> bool {
        self.controller.go_back()
    }

    pub fn basics(&self) -> Option<&GroupBasics> {
        match self.controller.step_result(STEP_BASICS)? {
            GroupWizardData::Basics(basics) => Some(basics),
            _ => None,
        }
    }

    pub async fn submit(&self, ctx: &ConsoleContext) -> Result<SubmitOutcome, FlowError> {
        if !self.controller.is_complete() {
            return Err(WizardError::NotReady.into());
        }
        let Some(basics) = self.basics() else {
            return Err(WizardError::NotReady.into());
        };

        let display_name = Self::qualified_name(basics);
        let payload = encode_payload(&CreateGroupPayload::new(display_name.clone()))?;

        let handle = match ctx.client.create(ResourceKind::Groups, payload).await {
            Ok(handle) => handle,
            Err(err) => {
                error!(
                    session = %self.controller.session_id(),
                    display_name = %display_name,
                    "group create failed: {err}"
                );
                ctx.notifier.notify(
                    NotificationLevel::Error,
                    &ctx.translator
                        .lookup("groups.notifications.create_group.error", &[]),
                    &err.detail(),
                );
                return Err(err.into());
            }
        };

        info!(
            session = %self.controller.session_id(),
            display_name = %display_name,
            "group created"
        );
        ctx.notifier.notify(
            NotificationLevel::Success,
            &ctx.translator
                .lookup("groups.notifications.create_group.success.message", &[]),
            &ctx.translator.lookup(
                "groups.notifications.create_group.success.description",
                &[("name", &display_name)],
            ),
        );

        if let Some(id) = handle.created_id() {
            let path = format!("groups/{id}/edit");
            ctx.navigator.navigate_to(&path);
            Ok(SubmitOutcome::NavigatedToEdit {
                resource_id: id.to_string(),
            })
        } else {
            Ok(SubmitOutcome::ClosedAndRefreshed)
        }
    }
}
