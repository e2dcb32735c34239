use std::fmt;
use url::Url;

/// Privilege level of the key that was resolved from the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialKind {
    ServiceRole,
    Anon,
}

impl CredentialKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialKind::ServiceRole => "service_role",
            CredentialKind::Anon => "anon",
        }
    }
}

impl fmt::Display for CredentialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub kind: CredentialKind,
    pub key: String,
}

impl Credential {
    pub fn new(kind: CredentialKind, key: impl Into<String>) -> Self {
        Self {
            kind,
            key: key.into(),
        }
    }
}

// Keys are never written to logs.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("kind", &self.kind)
            .field("key", &"<redacted>")
            .finish()
    }
}

/// Hosted backend instance plus the credential used to reach it.
#[derive(Debug, Clone)]
pub struct ProjectTarget {
    pub endpoint: Url,
    pub credential: Credential,
}

impl ProjectTarget {
    /// Project reference for `<ref>.supabase.co` hosts.
    pub fn project_ref(&self) -> Option<&str> {
        let host = self.endpoint.host_str()?;
        let project_ref = host.strip_suffix(".supabase.co")?;
        (!project_ref.is_empty() && !project_ref.contains('.')).then_some(project_ref)
    }
}
