use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use super::ClientError;
use crate::dto::strategy::StrategyCatalog;

/// A file picked in the upload form.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn mime_type(&self) -> &'static str {
        if self.name.to_ascii_lowercase().ends_with(".pdf") {
            "application/pdf"
        } else {
            "application/octet-stream"
        }
    }
}

/// Fields posted to `/api/chunk`. Parameter values are sent exactly as typed.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkForm {
    pub text: String,
    pub strategy: String,
    pub params: Vec<(String, String)>,
}

/// Whatever `/api/upload` answered. Error bodies decode with `text: None`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadReply {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChunkReply {
    #[serde(default)]
    pub chunks: Option<Vec<ChunkSummary>>,
}

/// The part of a returned chunk the page shows. `size` and `overlap` are
/// displayed as received.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChunkSummary {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub size: serde_json::Value,
    #[serde(default)]
    pub overlap: serde_json::Value,
}

#[async_trait]
pub trait ChunkApi: Send + Sync {
    async fn strategies(&self) -> Result<StrategyCatalog, ClientError>;

    async fn upload(&self, file: &SelectedFile) -> Result<UploadReply, ClientError>;

    async fn chunk(&self, form: &ChunkForm) -> Result<ChunkReply, ClientError>;
}

/// [`ChunkApi`] over HTTP. Like the browser's `fetch`, the status code is not
/// inspected: any JSON body is handed back for the caller to judge.
pub struct HttpChunkApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpChunkApi {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            client: reqwest::Client::new(),
            base_url: Url::parse(base_url)?,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base_url.join(path)?)
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        let status = response.status();
        let body = response.bytes().await?;
        tracing::debug!("{status}: {} bytes", body.len());
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl ChunkApi for HttpChunkApi {
    async fn strategies(&self) -> Result<StrategyCatalog, ClientError> {
        let response = self
            .client
            .get(self.endpoint("/api/strategies")?)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn upload(&self, file: &SelectedFile) -> Result<UploadReply, ClientError> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(file.mime_type())?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(self.endpoint("/api/upload")?)
            .multipart(form)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn chunk(&self, form: &ChunkForm) -> Result<ChunkReply, ClientError> {
        let mut multipart = Form::new()
            .text("text", form.text.clone())
            .text("strategy", form.strategy.clone());
        for (name, value) in &form.params {
            multipart = multipart.text(name.clone(), value.clone());
        }

        let response = self
            .client
            .post(self.endpoint("/api/chunk")?)
            .multipart(multipart)
            .send()
            .await?;
        Self::decode(response).await
    }
}
