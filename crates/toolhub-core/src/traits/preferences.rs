use crate::CollaboratorResult;
use async_trait::async_trait;

/// String key/value storage standing in for browser local storage.
///
/// `namespace` separates callers (a user id, or `anonymous`). Values are
/// stored verbatim; interpretation belongs to [`crate::settings`].
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn get(&self, namespace: &str, key: &str) -> CollaboratorResult<Option<String>>;

    async fn set(&self, namespace: &str, key: &str, value: &str) -> CollaboratorResult<()>;
}
