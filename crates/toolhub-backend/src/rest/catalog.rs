use super::RETURN_REPRESENTATION;
use crate::client::{eq, SupabaseClient};
use async_trait::async_trait;
use reqwest::Method;
use toolhub_core::{
    AccessToken, CatalogRepository, CollaboratorError, CollaboratorResult, Tool, ToolDraft,
};

const TOOLS: &str = "ai_tools";

fn single(mut rows: Vec<Tool>, id: &str) -> CollaboratorResult<Tool> {
    if rows.is_empty() {
        Err(CollaboratorError::NotFound(format!("tool {id}")))
    } else {
        Ok(rows.swap_remove(0))
    }
}

#[async_trait]
impl CatalogRepository for SupabaseClient {
    async fn list_tools(&self) -> CollaboratorResult<Vec<Tool>> {
        let url = self.rest_url(TOOLS, "select=*");
        self.fetch(self.request(Method::GET, &url, None)).await
    }

    async fn get_tool(&self, id: &str) -> CollaboratorResult<Option<Tool>> {
        let url = self.rest_url(TOOLS, &format!("select=*&{}&limit=1", eq("id", id)));
        let rows: Vec<Tool> = self.fetch(self.request(Method::GET, &url, None)).await?;
        Ok(rows.into_iter().next())
    }

    async fn insert_tool(&self, token: &AccessToken, draft: ToolDraft) -> CollaboratorResult<Tool> {
        let url = self.rest_url(TOOLS, "");
        let rows: Vec<Tool> = self
            .fetch(
                self.request(Method::POST, &url, Some(token))
                    .header("Prefer", RETURN_REPRESENTATION)
                    .json(&draft),
            )
            .await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| CollaboratorError::decode("insert returned no row"))
    }

    async fn update_tool(
        &self,
        token: &AccessToken,
        id: &str,
        draft: ToolDraft,
    ) -> CollaboratorResult<Tool> {
        let url = self.rest_url(TOOLS, &eq("id", id));
        let rows = self
            .fetch(
                self.request(Method::PATCH, &url, Some(token))
                    .header("Prefer", RETURN_REPRESENTATION)
                    .json(&draft),
            )
            .await?;
        single(rows, id)
    }

    async fn delete_tool(&self, token: &AccessToken, id: &str) -> CollaboratorResult<()> {
        let url = self.rest_url(TOOLS, &eq("id", id));
        let rows = self
            .fetch(
                self.request(Method::DELETE, &url, Some(token))
                    .header("Prefer", RETURN_REPRESENTATION),
            )
            .await?;
        single(rows, id).map(|_| ())
    }
}
