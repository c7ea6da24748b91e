use std::net::IpAddr;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::{StatusCode, Url};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::FirestoreConfig;
use crate::error::StoreError;
use crate::model::document::{DocumentId, VocabDocument};
use crate::services::store::DocumentStore;

const DATABASE: &str = "(default)";
const MAX_ERROR_BODY: usize = 400;

/// Cloud Firestore over the REST v1 API.
pub struct FirestoreStore {
    client: Client,
    base_url: Url,
    project_id: String,
    access_token: Option<String>,
}

impl FirestoreStore {
    pub fn new(cfg: &FirestoreConfig) -> Result<Self, StoreError> {
        let base_url = Url::parse(&cfg.base_url)
            .ok()
            .filter(|u| !u.cannot_be_a_base())
            .ok_or_else(|| StoreError::InvalidBaseUrl {
                url: cfg.base_url.clone(),
            })?;

        let mut builder = Client::builder().timeout(Duration::from_secs(cfg.timeout_secs));
        // Emulator traffic never goes through a proxy.
        if is_loopback(&base_url) {
            builder = builder.no_proxy();
        }
        let client = builder.build().map_err(StoreError::Client)?;

        if cfg.access_token.is_none() {
            warn!("no Firestore access token configured; requests are unauthenticated");
        }

        Ok(Self {
            client,
            base_url,
            project_id: cfg.project_id.clone(),
            access_token: cfg.access_token.clone(),
        })
    }

    /// REST resource of `collection/id`, each segment percent-encoded.
    ///
    /// Empty, `.` and `..` segments are refused; URL normalisation would
    /// otherwise drop them and address a different resource.
    pub fn document_url(&self, collection: &str, id: &DocumentId) -> Result<Url, StoreError> {
        for segment in [collection, id.as_str()] {
            if matches!(segment, "" | "." | "..") {
                return Err(StoreError::InvalidPathSegment {
                    segment: segment.to_string(),
                });
            }
        }

        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend([
                "v1",
                "projects",
                self.project_id.as_str(),
                "databases",
                DATABASE,
                "documents",
                collection,
                id.as_str(),
            ]);
        }
        Ok(url)
    }
}

impl DocumentStore for FirestoreStore {
    fn set(
        &self,
        collection: &str,
        id: &DocumentId,
        document: &VocabDocument,
    ) -> Result<(), StoreError> {
        // PATCH without an updateMask replaces the whole document.
        let url = self.document_url(collection, id)?;
        debug!(%url, "writing document");

        let mut req = self.client.patch(url).json(&encode_fields(document));
        if let Some(token) = &self.access_token {
            req = req.bearer_auth(token);
        }

        let resp = req.send()?;
        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }

        let text = resp.text().unwrap_or_default();
        Err(classify_failure(status, &text))
    }
}

/// Firestore `Document` body; only `fields` is sent.
#[derive(Debug, Serialize)]
pub struct FirestoreDocument<'a> {
    pub fields: DocumentFields<'a>,
}

#[derive(Debug, Serialize)]
pub struct DocumentFields<'a> {
    pub word: StringValue<'a>,
    pub definition: StringValue<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StringValue<'a> {
    pub string_value: &'a str,
}

pub fn encode_fields(document: &VocabDocument) -> FirestoreDocument<'_> {
    FirestoreDocument {
        fields: DocumentFields {
            word: StringValue {
                string_value: &document.word,
            },
            definition: StringValue {
                string_value: &document.definition,
            },
        },
    }
}

fn classify_failure(status: StatusCode, body_text: &str) -> StoreError {
    let message = extract_error_message(body_text);
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            StoreError::Unauthorized { status, message }
        }
        StatusCode::TOO_MANY_REQUESTS => StoreError::RateLimited { message },
        _ => StoreError::Status { status, message },
    }
}

fn extract_error_message(body_text: &str) -> String {
    // Google APIs answer { "error": { "message": "..." } }
    if let Ok(v) = serde_json::from_str::<Value>(body_text) {
        if let Some(msg) = v
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
        {
            return msg.to_string();
        }
    }

    let trimmed = body_text.trim();
    match trimmed.char_indices().nth(MAX_ERROR_BODY) {
        Some((cut, _)) => format!("{}...", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}

fn is_loopback(url: &Url) -> bool {
    match url.host_str() {
        Some("localhost") => true,
        Some(host) => host
            .trim_start_matches('[')
            .trim_end_matches(']')
            .parse::<IpAddr>()
            .map(|ip| ip.is_loopback())
            .unwrap_or(false),
        None => false,
    }
}
