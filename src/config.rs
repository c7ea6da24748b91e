use std::path::PathBuf;

/// Vocabulary export uploaded on every run.
pub const CSV_FILE_PATH: &str = "medical_terms_for_english_study.csv";

pub const PROJECT_ID: &str = "study-tool-fr1";

pub const COLLECTION_NAME: &str = "Med_voca";

pub const FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com";

const TIMEOUT_SECS: u64 = 30;

/// Token the Firestore emulator accepts as an admin credential.
const EMULATOR_TOKEN: &str = "owner";

/// What to upload and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadConfig {
    pub csv_path: PathBuf,
    pub project_id: String,
    pub collection: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from(CSV_FILE_PATH),
            project_id: PROJECT_ID.to_string(),
            collection: COLLECTION_NAME.to_string(),
        }
    }
}

/// Connection settings for the Firestore REST endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirestoreConfig {
    pub base_url: String,
    pub project_id: String,
    pub access_token: Option<String>,
    pub timeout_secs: u64,
}

impl FirestoreConfig {
    pub fn new(project_id: &str) -> Self {
        Self {
            base_url: FIRESTORE_BASE_URL.to_string(),
            project_id: project_id.to_string(),
            access_token: None,
            timeout_secs: TIMEOUT_SECS,
        }
    }

    /// Reads credentials and the emulator host from the process environment.
    ///
    /// - `FIRESTORE_ACCESS_TOKEN`, then `GOOGLE_OAUTH_ACCESS_TOKEN`: bearer token
    /// - `FIRESTORE_EMULATOR_HOST`: `host:port` of a local emulator
    pub fn from_env(project_id: &str) -> Self {
        Self::from_lookup(project_id, |key| std::env::var(key).ok())
    }

    /// Same as [`FirestoreConfig::from_env`] with an explicit variable source.
    pub fn from_lookup<F>(project_id: &str, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut cfg = Self::new(project_id);
        cfg.access_token =
            var("FIRESTORE_ACCESS_TOKEN").or_else(|| var("GOOGLE_OAUTH_ACCESS_TOKEN"));

        if let Some(host) = var("FIRESTORE_EMULATOR_HOST") {
            cfg.base_url = format!("http://{}", host.trim());
            if cfg.access_token.is_none() {
                cfg.access_token = Some(EMULATOR_TOKEN.to_string());
            }
        }

        cfg
    }
}
