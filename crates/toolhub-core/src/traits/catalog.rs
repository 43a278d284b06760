use crate::{AccessToken, CollaboratorResult, Tool, ToolDraft};
use async_trait::async_trait;

/// Source of tool rows. Reads are anonymous; writes carry the caller's token
/// so the collaborator's row policies decide whether they are allowed.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn list_tools(&self) -> CollaboratorResult<Vec<Tool>>;

    async fn get_tool(&self, id: &str) -> CollaboratorResult<Option<Tool>>;

    async fn insert_tool(&self, token: &AccessToken, draft: ToolDraft) -> CollaboratorResult<Tool>;

    async fn update_tool(
        &self,
        token: &AccessToken,
        id: &str,
        draft: ToolDraft,
    ) -> CollaboratorResult<Tool>;

    async fn delete_tool(&self, token: &AccessToken, id: &str) -> CollaboratorResult<()>;
}
