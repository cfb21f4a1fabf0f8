//! Console flows: concrete wizard and list screens composed from the core
//! components and the capability seams.

pub mod add_dialect;
pub mod add_group;
pub mod dialects;
pub mod external_claims;

use serde::Serialize;
use thiserror::Error;

use crate::error::{RemoteError, ValidationError};
use crate::wizard::WizardError;

/// Encodes a typed request DTO for [`crate::ResourceClient::create`].
pub(crate) fn encode_payload<T: Serialize>(value: &T) -> Result<serde_json::Value, RemoteError> {
    serde_json::to_value(value)
        .map_err(|err| RemoteError::UnexpectedResponse(format!("unencodable request payload: {err}")))
}

#[derive(Debug, Error)]
pub enum FlowError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Wizard(#[from] WizardError),
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// How a successful wizard submit ended the dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Dialog dismissed; the caller should re-fetch its list.
    ClosedAndRefreshed,
    /// Dialog dismissed and the navigator pointed at the created resource's
    /// edit screen.
    NavigatedToEdit { resource_id: String },
}
