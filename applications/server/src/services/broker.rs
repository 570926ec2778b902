/// Credential broker - storage session auth and scoped download tokens
///
/// Exchanges the long-lived key pair for a short-lived session
/// authorization and caches it; callers only ever see prefix-scoped
/// download tokens. The broker is an owned component with an injected
/// clock, so expiry is testable without wall-clock waits.
use crate::config::StorageSettings;
use crate::error::{Result, ServerError};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Session authorizations are reused for this long before re-authorizing
const SESSION_AUTH_TTL_MINUTES: i64 = 50;

/// Validity window of scoped download authorizations, in seconds
pub const DOWNLOAD_AUTH_TTL_SECS: u64 = 3600;

/// Time source for cache expiry decisions
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock implementation of [`Clock`]
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A cached account-level session authorization
#[derive(Debug, Clone)]
pub struct SessionAuth {
    pub api_url: String,
    pub download_url: String,
    pub token: String,
    pub account_id: String,
    fetched_at: DateTime<Utc>,
}

impl SessionAuth {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now - self.fetched_at < Duration::minutes(SESSION_AUTH_TTL_MINUTES)
    }
}

/// A download authorization scoped to a file-name prefix
#[derive(Debug, Clone)]
pub struct DownloadAuthorization {
    pub download_url: String,
    pub token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthorizeResponse {
    api_url: String,
    download_url: String,
    authorization_token: String,
    account_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DownloadAuthResponse {
    authorization_token: String,
}

/// Broker for storage credentials
pub struct CredentialBroker {
    http: reqwest::Client,
    settings: StorageSettings,
    clock: Arc<dyn Clock>,
    cached: Mutex<Option<SessionAuth>>,
}

impl CredentialBroker {
    pub fn new(settings: StorageSettings, http: reqwest::Client, clock: Arc<dyn Clock>) -> Self {
        Self {
            http,
            settings,
            clock,
            cached: Mutex::new(None),
        }
    }

    /// Obtain a session authorization, reusing a fresh cached one
    pub async fn authorize(&self) -> Result<SessionAuth> {
        let now = self.clock.now();
        {
            let cached = self.cached.lock().await;
            if let Some(auth) = cached.as_ref() {
                if auth.is_fresh(now) {
                    return Ok(auth.clone());
                }
            }
        }

        let key_id = require(&self.settings.key_id, "storage.key_id")?;
        let application_key = require(&self.settings.application_key, "storage.application_key")?;
        let basic = BASE64.encode(format!("{key_id}:{application_key}"));

        let response = self
            .http
            .get(format!(
                "{}/b2api/v2/b2_authorize_account",
                self.settings.auth_url
            ))
            .header(AUTHORIZATION, format!("Basic {basic}"))
            .send()
            .await?;

        if !response.status().is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ServerError::Auth(format!("authorize failed: {message}")));
        }

        let data: AuthorizeResponse = response.json().await?;
        let auth = SessionAuth {
            api_url: data.api_url,
            download_url: data.download_url,
            token: data.authorization_token,
            account_id: data.account_id,
            fetched_at: now,
        };

        tracing::debug!(account = %auth.account_id, "storage session authorized");
        *self.cached.lock().await = Some(auth.clone());
        Ok(auth)
    }

    /// Request a download authorization restricted to a file-name prefix
    pub async fn download_authorization(
        &self,
        file_name_prefix: &str,
    ) -> Result<DownloadAuthorization> {
        let bucket_id = require(&self.settings.bucket_id, "storage.bucket_id")?;
        let auth = self.authorize().await?;

        let response = self
            .http
            .post(format!(
                "{}/b2api/v2/b2_get_download_authorization",
                auth.api_url
            ))
            .header(AUTHORIZATION, &auth.token)
            .json(&json!({
                "bucketId": bucket_id,
                "fileNamePrefix": file_name_prefix,
                "validDurationInSeconds": DOWNLOAD_AUTH_TTL_SECS,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ServerError::Auth(format!(
                "download authorization failed: {message}"
            )));
        }

        let data: DownloadAuthResponse = response.json().await?;
        Ok(DownloadAuthorization {
            download_url: auth.download_url,
            token: data.authorization_token,
        })
    }
}

fn require<'a>(value: &'a str, name: &str) -> Result<&'a str> {
    if value.is_empty() {
        Err(ServerError::Auth(format!("missing {name} in configuration")))
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex as StdMutex;

    struct ManualClock {
        now: StdMutex<DateTime<Utc>>,
    }

    impl ManualClock {
        fn new(start: DateTime<Utc>) -> Self {
            Self {
                now: StdMutex::new(start),
            }
        }

        fn advance(&self, delta: Duration) {
            let mut now = self.now.lock().unwrap();
            *now += delta;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.now.lock().unwrap()
        }
    }

    fn start_time() -> DateTime<Utc> {
        "2024-06-01T00:00:00Z".parse().unwrap()
    }

    fn session_auth(fetched_at: DateTime<Utc>) -> SessionAuth {
        SessionAuth {
            api_url: "https://api.example".to_string(),
            download_url: "https://dl.example".to_string(),
            token: "session-token".to_string(),
            account_id: "acct".to_string(),
            fetched_at,
        }
    }

    fn settings_with_creds() -> StorageSettings {
        StorageSettings {
            key_id: "key".to_string(),
            application_key: "secret".to_string(),
            bucket_id: "bucket".to_string(),
            bucket_name: "bucket-name".to_string(),
            index_path: "/dev/null".into(),
            // Unroutable: any test that reaches the network is a bug.
            auth_url: "http://127.0.0.1:1".to_string(),
        }
    }

    #[test]
    fn session_auth_freshness_window() {
        let fetched = start_time();
        let auth = session_auth(fetched);

        assert!(auth.is_fresh(fetched));
        assert!(auth.is_fresh(fetched + Duration::minutes(49)));
        assert!(!auth.is_fresh(fetched + Duration::minutes(50)));
        assert!(!auth.is_fresh(fetched + Duration::hours(2)));
    }

    #[tokio::test]
    async fn authorize_fails_fast_on_missing_credentials() {
        let mut settings = settings_with_creds();
        settings.key_id = String::new();
        let broker = CredentialBroker::new(
            settings,
            reqwest::Client::new(),
            Arc::new(ManualClock::new(start_time())),
        );

        let err = broker.authorize().await.unwrap_err();
        assert!(matches!(err, ServerError::Auth(_)));
    }

    #[tokio::test]
    async fn download_authorization_requires_bucket_id() {
        let mut settings = settings_with_creds();
        settings.bucket_id = String::new();
        let broker = CredentialBroker::new(
            settings,
            reqwest::Client::new(),
            Arc::new(ManualClock::new(start_time())),
        );

        let err = broker.download_authorization("tracks/").await.unwrap_err();
        assert!(matches!(err, ServerError::Auth(_)));
    }

    #[tokio::test]
    async fn fresh_cache_short_circuits_the_network() {
        let clock = Arc::new(ManualClock::new(start_time()));
        let broker = CredentialBroker::new(
            settings_with_creds(),
            reqwest::Client::new(),
            Arc::clone(&clock) as Arc<dyn Clock>,
        );
        *broker.cached.lock().await = Some(session_auth(start_time()));

        clock.advance(Duration::minutes(30));
        let auth = broker.authorize().await.unwrap();
        assert_eq!(auth.token, "session-token");
    }

    #[tokio::test]
    async fn expired_cache_triggers_reauthorization() {
        let clock = Arc::new(ManualClock::new(start_time()));
        let mut settings = settings_with_creds();
        // No credentials: a re-authorization attempt is observable as an
        // auth error instead of a cache hit.
        settings.key_id = String::new();
        let broker = CredentialBroker::new(
            settings,
            reqwest::Client::new(),
            Arc::clone(&clock) as Arc<dyn Clock>,
        );
        *broker.cached.lock().await = Some(session_auth(start_time()));

        clock.advance(Duration::minutes(51));
        let err = broker.authorize().await.unwrap_err();
        assert!(matches!(err, ServerError::Auth(_)));
    }
}
