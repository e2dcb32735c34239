pub mod credential;

pub use credential::{Credential, CredentialKind, ProjectTarget};
