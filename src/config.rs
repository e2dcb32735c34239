use crate::error::HandoffError;
use crate::types::{Credential, CredentialKind, ProjectTarget};
use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Deserializer, de};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use tracing::warn;
use url::Url;

pub const SUPABASE_DASHBOARD_URL: &str = "https://app.supabase.com";
pub const DEFAULT_SQL_FILE: &str = "fix-database-errors.sql";
pub const DEFAULT_PREVIEW_WIDTH: usize = 60;

/// Keys whose values are taken verbatim. Figment would otherwise turn `000123` into `123`.
pub const STRING_ENV_KEYS: &[&str] = &[
    "EXPO_PUBLIC_SUPABASE_URL",
    "EXPO_PUBLIC_SUPABASE_SERVICE_ROLE_KEY",
    "SUPABASE_SERVICE_ROLE_KEY",
    "EXPO_PUBLIC_SUPABASE_ANON_KEY",
    "SQL_FILE",
    "LOGLEVEL",
    "PROXY",
];

/// Keys parsed by figment's `Env` provider.
pub const TYPED_ENV_KEYS: &[&str] = &["PREVIEW_WIDTH", "CHECK_CONNECTION"];

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(rename = "expo_public_supabase_url")]
    pub supabase_url: Option<String>,
    #[serde(rename = "expo_public_supabase_service_role_key")]
    pub public_service_role_key: Option<String>,
    #[serde(rename = "supabase_service_role_key")]
    pub service_role_key: Option<String>,
    #[serde(rename = "expo_public_supabase_anon_key")]
    pub anon_key: Option<String>,
    pub sql_file: PathBuf,
    pub preview_width: usize,
    pub loglevel: String,
    #[serde(deserialize_with = "flag")]
    pub check_connection: bool,
    /// Only parsed when the connection check runs.
    pub proxy: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            supabase_url: None,
            public_service_role_key: None,
            service_role_key: None,
            anon_key: None,
            sql_file: PathBuf::from(DEFAULT_SQL_FILE),
            preview_width: DEFAULT_PREVIEW_WIDTH,
            loglevel: "info".to_string(),
            check_connection: false,
            proxy: None,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |key: &Option<String>| key.as_ref().map(|_| "<redacted>");
        f.debug_struct("Config")
            .field("supabase_url", &self.supabase_url)
            .field("public_service_role_key", &redact(&self.public_service_role_key))
            .field("service_role_key", &redact(&self.service_role_key))
            .field("anon_key", &redact(&self.anon_key))
            .field("sql_file", &self.sql_file)
            .field("preview_width", &self.preview_width)
            .field("loglevel", &self.loglevel)
            .field("check_connection", &self.check_connection)
            .field("proxy", &self.proxy)
            .finish()
    }
}

impl Config {
    pub fn figment() -> Figment {
        let raw: BTreeMap<String, String> = Env::raw()
            .only(STRING_ENV_KEYS)
            .iter()
            .map(|(key, value)| (key.as_str().to_ascii_lowercase(), value))
            .collect();

        Figment::from(Env::raw().only(TYPED_ENV_KEYS)).merge(Serialized::defaults(raw))
    }

    /// Extract from the process environment. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn load() -> Result<Self, HandoffError> {
        Ok(Self::figment().extract()?)
    }

    /// Endpoint plus credential, failing fast when either is unavailable.
    pub fn resolve_target(&self) -> Result<ProjectTarget, HandoffError> {
        let raw = non_empty(&self.supabase_url).ok_or(HandoffError::MissingEndpoint)?;
        let endpoint = Url::parse(raw).map_err(HandoffError::InvalidEndpoint)?;
        let credential = self
            .resolve_credential()
            .ok_or(HandoffError::MissingCredential)?;
        Ok(ProjectTarget {
            endpoint,
            credential,
        })
    }

    /// Service-role keys first, then the anon key.
    pub fn resolve_credential(&self) -> Option<Credential> {
        if let Some(key) =
            non_empty(&self.public_service_role_key).or_else(|| non_empty(&self.service_role_key))
        {
            return Some(Credential::new(CredentialKind::ServiceRole, key));
        }

        let key = non_empty(&self.anon_key)?;
        warn!("Service role key not found. Using anon key instead.");
        Some(Credential::new(CredentialKind::Anon, key))
    }
}

/// Accepts `true`/`false`, `1`/`0`, `yes`/`no` and `on`/`off`.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    struct FlagVisitor;

    impl de::Visitor<'_> for FlagVisitor {
        type Value = bool;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a boolean, 1/0, yes/no or on/off")
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<bool, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<bool, E> {
            match v {
                0 => Ok(false),
                1 => Ok(true),
                _ => Err(E::invalid_value(de::Unexpected::Unsigned(v), &self)),
            }
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<bool, E> {
            match v {
                0 => Ok(false),
                1 => Ok(true),
                _ => Err(E::invalid_value(de::Unexpected::Signed(v), &self)),
            }
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<bool, E> {
            match v.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Ok(true),
                "false" | "0" | "no" | "off" | "" => Ok(false),
                _ => Err(E::invalid_value(de::Unexpected::Str(v), &self)),
            }
        }
    }

    deserializer.deserialize_any(FlagVisitor)
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
