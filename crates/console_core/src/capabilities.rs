//! Capability seams between the console core and the outside world, with
//! null-object defaults for contexts where a collaborator is absent.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use shared::domain::{FilterExpression, ResourceKind};
use shared::protocol::ResourceHandle;
use tracing::{error, info, warn};

use crate::error::RemoteError;

/// Management-API surface the console depends on. Persistence is entirely the
/// server's concern; the console only creates, counts, and lists.
#[async_trait]
pub trait ResourceClient: Send + Sync {
    async fn create(
        &self,
        kind: ResourceKind,
        payload: Value,
    ) -> Result<ResourceHandle, RemoteError>;

    /// Number of resources matching the filter, for uniqueness checks.
    async fn query(&self, kind: ResourceKind, filter: &FilterExpression)
        -> Result<u64, RemoteError>;

    async fn fetch_all(&self, kind: ResourceKind) -> Result<Vec<Value>, RemoteError>;
}

pub struct MissingResourceClient;

#[async_trait]
impl ResourceClient for MissingResourceClient {
    async fn create(
        &self,
        _kind: ResourceKind,
        _payload: Value,
    ) -> Result<ResourceHandle, RemoteError> {
        Err(RemoteError::Unavailable)
    }

    async fn query(
        &self,
        _kind: ResourceKind,
        _filter: &FilterExpression,
    ) -> Result<u64, RemoteError> {
        Err(RemoteError::Unavailable)
    }

    async fn fetch_all(&self, _kind: ResourceKind) -> Result<Vec<Value>, RemoteError> {
        Err(RemoteError::Unavailable)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Warning,
    Error,
}

/// Fire-and-forget user notifications; the core never observes a result.
pub trait Notifier: Send + Sync {
    fn notify(&self, level: NotificationLevel, message: &str, description: &str);
}

/// Default notifier: routes notifications into the log stream.
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, level: NotificationLevel, message: &str, description: &str) {
        match level {
            NotificationLevel::Success => info!(summary = message, description, "notification"),
            NotificationLevel::Warning => warn!(summary = message, description, "notification"),
            NotificationLevel::Error => error!(summary = message, description, "notification"),
        }
    }
}

/// Pure, synchronous message lookup. Missing keys fall back to the key
/// itself so untranslated screens stay legible.
pub trait Translator: Send + Sync {
    fn lookup(&self, key: &str, params: &[(&str, &str)]) -> String;
}

pub struct PassthroughTranslator;

impl Translator for PassthroughTranslator {
    fn lookup(&self, key: &str, _params: &[(&str, &str)]) -> String {
        key.to_string()
    }
}

/// Table-backed translator; `{name}` placeholders in a template are replaced
/// by the matching parameter.
pub struct StaticTranslator {
    table: HashMap<String, String>,
}

impl StaticTranslator {
    pub fn new(table: HashMap<String, String>) -> Self {
        Self { table }
    }
}

impl Translator for StaticTranslator {
    fn lookup(&self, key: &str, params: &[(&str, &str)]) -> String {
        let Some(template) = self.table.get(key) else {
            return key.to_string();
        };
        let mut message = template.clone();
        for (name, value) in params {
            message = message.replace(&format!("{{{name}}}"), value);
        }
        message
    }
}

/// Post-submit navigation target, used once per successful wizard submit.
pub trait Navigator: Send + Sync {
    fn navigate_to(&self, path: &str);
}

pub struct MissingNavigator;

impl Navigator for MissingNavigator {
    fn navigate_to(&self, path: &str) {
        warn!(path, "navigation requested but no navigator is configured");
    }
}

/// Bundle of capabilities handed to flows. Cheap to clone; every member is
/// shared behind an `Arc`.
#[derive(Clone)]
pub struct ConsoleContext {
    pub client: Arc<dyn ResourceClient>,
    pub notifier: Arc<dyn Notifier>,
    pub translator: Arc<dyn Translator>,
    pub navigator: Arc<dyn Navigator>,
}

impl ConsoleContext {
    pub fn new(
        client: Arc<dyn ResourceClient>,
        notifier: Arc<dyn Notifier>,
        translator: Arc<dyn Translator>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            client,
            notifier,
            translator,
            navigator,
        }
    }

    /// Context with null-object collaborators only; useful for callers that
    /// exercise the pure components without a server.
    pub fn detached() -> Self {
        Self {
            client: Arc::new(MissingResourceClient),
            notifier: Arc::new(TracingNotifier),
            translator: Arc::new(PassthroughTranslator),
            navigator: Arc::new(MissingNavigator),
        }
    }
}
