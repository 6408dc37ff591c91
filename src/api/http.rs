// src/api/http.rs

//! `reqwest` implementation of [`DashboardBackend`].

use std::time::Duration;

use anyhow::anyhow;
use reqwest::header::CONTENT_DISPOSITION;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::api::backend::{action_path, BackendFuture, DashboardBackend, FetchSource, UploadFile};
use crate::errors::{DashboardError, Result};
use crate::status::{Download, MessageResponse, RunTasksResponse, Statistics};
use crate::types::{ResourceAction, ResourceId, ResourceKind};

#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    /// `base_url` must end with `/`; endpoint paths are joined onto it.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    async fn send(&self, method: Method, path: &str) -> Result<Response> {
        let url = self.endpoint(path)?;
        debug!(%method, %url, "backend request");
        let response = self.client.request(method, url).send().await?;
        check_status(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(Method::GET, path).await?;
        Ok(response.json::<T>().await?)
    }
}

fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(DashboardError::BackendStatus {
            status: status.as_u16(),
            url: response.url().to_string(),
        })
    }
}

impl DashboardBackend for HttpBackend {
    fn fetch_collection(&self, source: FetchSource) -> BackendFuture<'_, Vec<Value>> {
        Box::pin(async move {
            let mut body: Value = self.get_json(source.path).await?;
            match body.get_mut(source.data_src).map(Value::take) {
                Some(Value::Array(items)) => Ok(items),
                Some(other) => Err(DashboardError::MalformedResponse(format!(
                    "field '{}' of {} is not an array: {}",
                    source.data_src, source.path, other
                ))),
                None => Err(DashboardError::MalformedResponse(format!(
                    "response of {} has no '{}' field",
                    source.path, source.data_src
                ))),
            }
        })
    }

    fn statistics(&self) -> BackendFuture<'_, Statistics> {
        Box::pin(async move { self.get_json("tasks/statistics").await })
    }

    fn run_tasks(&self, files: Vec<UploadFile>, name: String) -> BackendFuture<'_, RunTasksResponse> {
        Box::pin(async move {
            let count = files.len();
            let mut form = Form::new();
            for file in files {
                form = form.part("files", Part::bytes(file.bytes).file_name(file.file_name));
            }
            form = form.text("name", name);

            let url = self.endpoint("run_tasks")?;
            debug!(%url, files = count, "submitting upload");
            let response = self.client.post(url).multipart(form).send().await?;
            let response = check_status(response)?;
            Ok(response.json::<RunTasksResponse>().await?)
        })
    }

    fn mutate(
        &self,
        kind: ResourceKind,
        id: ResourceId,
        action: ResourceAction,
    ) -> BackendFuture<'_, MessageResponse> {
        Box::pin(async move {
            let method = match action {
                ResourceAction::Delete => Method::DELETE,
                ResourceAction::Restart => Method::POST,
                ResourceAction::Download => {
                    return Err(DashboardError::Other(anyhow!(
                        "download is not a mutating action"
                    )));
                }
            };
            let response = self.send(method, &action_path(kind, id, action)).await?;
            Ok(response.json::<MessageResponse>().await?)
        })
    }

    fn download(&self, kind: ResourceKind, id: ResourceId) -> BackendFuture<'_, Download> {
        Box::pin(async move {
            let path = action_path(kind, id, ResourceAction::Download);
            let response = self.send(Method::GET, &path).await?;
            let file_name = response
                .headers()
                .get(CONTENT_DISPOSITION)
                .and_then(|v| v.to_str().ok())
                .and_then(content_disposition_file_name);
            let bytes = response.bytes().await?.to_vec();
            Ok(Download { file_name, bytes })
        })
    }
}

/// Extract the file name from a `Content-Disposition` header value.
///
/// Handles `filename="a.zip"`, `filename=a.zip` and the RFC 5987
/// `filename*=utf-8''a.zip` form; the extended form wins when both exist.
pub fn content_disposition_file_name(header: &str) -> Option<String> {
    let mut plain = None;
    let mut extended = None;

    for param in header.split(';').map(str::trim) {
        let Some((key, value)) = param.split_once('=') else {
            continue;
        };
        match key.trim().to_ascii_lowercase().as_str() {
            "filename" => plain = Some(value.trim().trim_matches('"').to_string()),
            "filename*" => {
                let value = value.trim().trim_matches('"');
                let encoded = value.rsplit("''").next().unwrap_or(value);
                let decoded = urlencoding::decode_binary(encoded.as_bytes());
                extended = Some(String::from_utf8_lossy(&decoded).into_owned());
            }
            _ => {}
        }
    }

    extended
        .or(plain)
        .map(|name| sanitize_file_name(&name))
        .filter(|name| !name.is_empty())
}

/// Keep only the final path component so a server-provided name can never
/// escape the download directory.
fn sanitize_file_name(name: &str) -> String {
    name.rsplit(['/', '\\']).next().unwrap_or("").trim().to_string()
}
