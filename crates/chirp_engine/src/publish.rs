use std::path::Path;
use std::time::Duration;

use chirp_logging::{chirp_debug, chirp_info};
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::oauth::{Credentials, OAuthSigner};
use crate::{FailureKind, MediaId, PublishError, PublishStage};

#[derive(Debug, Clone)]
pub struct PublishSettings {
    pub upload_url: String,
    pub post_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_media_bytes: u64,
}

impl Default for PublishSettings {
    fn default() -> Self {
        Self {
            upload_url: "https://upload.twitter.com/1.1/media/upload.json".to_string(),
            post_url: "https://api.twitter.com/2/tweets".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
            max_media_bytes: 5 * 1024 * 1024,
        }
    }
}

/// Single-shot publishing capability: upload one file and post it.
///
/// Implementations never retry; retry policy belongs to the workflow.
#[async_trait::async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, path: &Path) -> Result<MediaId, PublishError>;
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    media_id_string: String,
}

#[derive(Debug, Serialize)]
struct CreatePostRequest<'a> {
    text: &'a str,
    media: PostMedia<'a>,
}

#[derive(Debug, Serialize)]
struct PostMedia<'a> {
    media_ids: [&'a str; 1],
}

#[derive(Debug, Deserialize)]
struct CreatePostResponse {
    data: CreatedPost,
}

#[derive(Debug, Deserialize)]
struct CreatedPost {
    id: String,
}

/// Publisher for the X (Twitter) API: v1.1 media upload, v2 post creation.
#[derive(Debug, Clone)]
pub struct XPublisher {
    settings: PublishSettings,
    signer: OAuthSigner,
}

impl XPublisher {
    pub fn new(credentials: Credentials, settings: PublishSettings) -> Self {
        Self {
            settings,
            signer: OAuthSigner::new(credentials),
        }
    }

    fn authenticate(&self) -> Result<reqwest::Client, PublishError> {
        let missing = self.signer.credentials().missing();
        if !missing.is_empty() {
            return Err(PublishError::new(
                PublishStage::Authenticate,
                FailureKind::MissingCredentials,
                format!("not set: {}", missing.join(", ")),
            ));
        }

        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| {
                PublishError::new(PublishStage::Authenticate, FailureKind::Network, err.to_string())
            })
    }

    async fn upload(&self, client: &reqwest::Client, path: &Path) -> Result<MediaId, PublishError> {
        let stage = PublishStage::Upload;
        let unreadable =
            |err: std::io::Error| PublishError::new(stage, FailureKind::MediaUnreadable, err.to_string());

        let size = tokio::fs::metadata(path).await.map_err(unreadable)?.len();
        if size > self.settings.max_media_bytes {
            return Err(PublishError::new(
                stage,
                FailureKind::TooLarge {
                    max_bytes: self.settings.max_media_bytes,
                    actual: size,
                },
                path.display().to_string(),
            ));
        }
        let bytes = tokio::fs::read(path).await.map_err(unreadable)?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "media".to_string());
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime.essence_str())
            .map_err(|err| PublishError::new(stage, FailureKind::MediaUnreadable, err.to_string()))?;

        let url = parse_url(stage, &self.settings.upload_url)?;
        let response = client
            .post(url.clone())
            .header(AUTHORIZATION, self.signer.authorization("POST", &url))
            .multipart(Form::new().part("media", part))
            .send()
            .await
            .map_err(|err| map_reqwest_error(stage, err))?;

        let body: UploadResponse = read_json(stage, response).await?;
        chirp_debug!("Uploaded {:?} as media {}", path, body.media_id_string);
        Ok(body.media_id_string)
    }

    async fn create_post(&self, client: &reqwest::Client, media_id: &str) -> Result<String, PublishError> {
        let stage = PublishStage::CreatePost;
        let url = parse_url(stage, &self.settings.post_url)?;
        let request = CreatePostRequest {
            text: "",
            media: PostMedia {
                media_ids: [media_id],
            },
        };

        let response = client
            .post(url.clone())
            .header(AUTHORIZATION, self.signer.authorization("POST", &url))
            .json(&request)
            .send()
            .await
            .map_err(|err| map_reqwest_error(stage, err))?;

        let body: CreatePostResponse = read_json(stage, response).await?;
        Ok(body.data.id)
    }
}

#[async_trait::async_trait]
impl Publisher for XPublisher {
    async fn publish(&self, path: &Path) -> Result<MediaId, PublishError> {
        let client = self.authenticate()?;
        let media_id = self.upload(&client, path).await?;
        let post_id = self.create_post(&client, &media_id).await?;
        chirp_info!("Successfully posted with media ID: {} (post {})", media_id, post_id);
        Ok(media_id)
    }
}

fn parse_url(stage: PublishStage, raw: &str) -> Result<Url, PublishError> {
    Url::parse(raw).map_err(|err| PublishError::new(stage, FailureKind::InvalidUrl, err.to_string()))
}

async fn read_json<T: serde::de::DeserializeOwned>(
    stage: PublishStage,
    response: reqwest::Response,
) -> Result<T, PublishError> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|err| map_reqwest_error(stage, err))?;

    if !status.is_success() {
        let kind = match status.as_u16() {
            401 | 403 => FailureKind::Unauthorized,
            code => FailureKind::HttpStatus(code),
        };
        return Err(PublishError::new(stage, kind, format!("{status}: {}", text.trim())));
    }

    serde_json::from_str(&text)
        .map_err(|err| PublishError::new(stage, FailureKind::InvalidResponse, err.to_string()))
}

fn map_reqwest_error(stage: PublishStage, err: reqwest::Error) -> PublishError {
    if err.is_timeout() {
        return PublishError::new(stage, FailureKind::Timeout, err.to_string());
    }
    PublishError::new(stage, FailureKind::Network, err.to_string())
}
