//! Core building blocks for the identity admin console: the list-presentation
//! engine, the linear wizard controller, the capability seams to the
//! management API, and the console flows built on top of them.

pub mod capabilities;
pub mod error;
pub mod flows;
pub mod list;
pub mod rest;
pub mod wizard;

pub use capabilities::{
    ConsoleContext, MissingNavigator, MissingResourceClient, Navigator, NotificationLevel,
    Notifier, PassthroughTranslator, ResourceClient, StaticTranslator, TracingNotifier, Translator,
};
pub use error::{RemoteError, ValidationError};
pub use list::{FilterError, FilterPredicate, ListPresenter, ListRecord, PageView};
pub use rest::RestResourceClient;
pub use wizard::{StepDefinition, StepOutcome, WizardController, WizardError};

#[cfg(test)]
mod tests;
