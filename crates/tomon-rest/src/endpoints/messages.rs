//! Message endpoints

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::multipart::{Form, Part};
use serde::Serialize;
use tokio::io::{AsyncRead, AsyncReadExt};
use tomon_core::{Message, Snowflake};

use crate::client::RestClient;
use crate::error::{RestError, RestResult};

#[derive(Debug, Serialize)]
struct MessagePayload<'a> {
    content: &'a str,
    nonce: String,
}

impl<'a> MessagePayload<'a> {
    fn new(content: &'a str) -> Self {
        Self {
            content,
            nonce: nonce(),
        }
    }
}

/// Client-side message nonce: the current time in nanoseconds
fn nonce() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default()
        .to_string()
}

enum AttachmentSource {
    Bytes(Vec<u8>),
    Reader(Box<dyn AsyncRead + Send + Unpin>),
}

/// A named file to upload with a message
pub struct AttachmentFile {
    name: String,
    source: AttachmentSource,
}

impl AttachmentFile {
    /// File whose contents are already in memory
    #[must_use]
    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            source: AttachmentSource::Bytes(bytes.into()),
        }
    }

    /// File read to the end from an async stream when the message is sent
    #[must_use]
    pub fn from_reader(name: impl Into<String>, reader: impl AsyncRead + Send + Unpin + 'static) -> Self {
        Self {
            name: name.into(),
            source: AttachmentSource::Reader(Box::new(reader)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    async fn into_part(self) -> RestResult<Part> {
        let bytes = match self.source {
            AttachmentSource::Bytes(bytes) => bytes,
            AttachmentSource::Reader(mut reader) => {
                let mut buf = Vec::new();
                reader
                    .read_to_end(&mut buf)
                    .await
                    .map_err(|source| RestError::Attachment {
                        name: self.name.clone(),
                        source,
                    })?;
                buf
            }
        };
        Ok(Part::bytes(bytes).file_name(self.name))
    }
}

impl fmt::Debug for AttachmentFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match &self.source {
            AttachmentSource::Bytes(b) => format!("{} bytes", b.len()),
            AttachmentSource::Reader(_) => "reader".to_string(),
        };
        f.debug_struct("AttachmentFile")
            .field("name", &self.name)
            .field("source", &source)
            .finish()
    }
}

impl RestClient {
    /// `POST /channels/{id}/messages` with a text body
    pub async fn create_message(&self, channel_id: Snowflake, content: &str) -> RestResult<Message> {
        let payload = MessagePayload::new(content);
        tracing::debug!(channel_id = %channel_id, nonce = %payload.nonce, "Sending message");
        self.post_json(&format!("/channels/{channel_id}/messages"), &payload)
            .await
    }

    /// `POST /channels/{id}/messages` as multipart: a `payload_json` field
    /// followed by one `files` part per attachment
    pub async fn create_attachment_message(
        &self,
        channel_id: Snowflake,
        files: Vec<AttachmentFile>,
    ) -> RestResult<Message> {
        let payload = MessagePayload::new("");
        let payload_json = serde_json::to_string(&payload).map_err(RestError::Encode)?;

        tracing::debug!(
            channel_id = %channel_id,
            files = files.len(),
            nonce = %payload.nonce,
            "Sending attachment message"
        );

        let mut form = Form::new().text("payload_json", payload_json);
        for file in files {
            form = form.part("files", file.into_part().await?);
        }

        self.post_multipart(&format!("/channels/{channel_id}/messages"), form)
            .await
    }
}
