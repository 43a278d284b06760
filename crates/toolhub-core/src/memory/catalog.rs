use super::MemoryBackend;
use crate::{AccessToken, CatalogRepository, CollaboratorError, CollaboratorResult, Tool, ToolDraft};
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
impl CatalogRepository for MemoryBackend {
    async fn list_tools(&self) -> CollaboratorResult<Vec<Tool>> {
        self.check()?;
        Ok(self.read().tools.clone())
    }

    async fn get_tool(&self, id: &str) -> CollaboratorResult<Option<Tool>> {
        self.check()?;
        Ok(self.read().tools.iter().find(|t| t.id == id).cloned())
    }

    async fn insert_tool(&self, token: &AccessToken, draft: ToolDraft) -> CollaboratorResult<Tool> {
        self.check()?;
        let mut state = self.write();
        state.require_admin(token)?;
        let tool = draft.into_tool(Uuid::new_v4().to_string());
        state.tools.push(tool.clone());
        Ok(tool)
    }

    async fn update_tool(
        &self,
        token: &AccessToken,
        id: &str,
        draft: ToolDraft,
    ) -> CollaboratorResult<Tool> {
        self.check()?;
        let mut state = self.write();
        state.require_admin(token)?;
        let slot = state
            .tools
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| CollaboratorError::NotFound(format!("tool {id}")))?;
        *slot = draft.into_tool(id);
        Ok(slot.clone())
    }

    async fn delete_tool(&self, token: &AccessToken, id: &str) -> CollaboratorResult<()> {
        self.check()?;
        let mut state = self.write();
        state.require_admin(token)?;
        let before = state.tools.len();
        state.tools.retain(|t| t.id != id);
        if state.tools.len() == before {
            return Err(CollaboratorError::NotFound(format!("tool {id}")));
        }
        state.favorites.retain(|f| f.tool_id != id);
        Ok(())
    }
}
