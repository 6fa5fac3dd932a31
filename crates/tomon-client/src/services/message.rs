//! Message service

use tomon_common::ClientResult;
use tomon_core::{Message, Snowflake};
use tomon_rest::AttachmentFile;
use tracing::instrument;

use super::context::ServiceContext;

/// Sends messages; messages are never cached
pub struct MessageService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MessageService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Post a text message
    #[instrument(skip(self, content), fields(len = content.len()))]
    pub async fn create_message(&self, channel_id: Snowflake, content: &str) -> ClientResult<Message> {
        Ok(self.ctx.rest().create_message(channel_id, content).await?)
    }

    /// Post a message made of uploaded files
    #[instrument(skip(self, files), fields(files = files.len()))]
    pub async fn create_attachment_message(
        &self,
        channel_id: Snowflake,
        files: Vec<AttachmentFile>,
    ) -> ClientResult<Message> {
        Ok(self
            .ctx
            .rest()
            .create_attachment_message(channel_id, files)
            .await?)
    }
}
