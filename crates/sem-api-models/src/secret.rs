//! Secret resource (`v1beta`): environment variables and files injected into jobs.

use serde::{Deserialize, Serialize};

use crate::meta::ObjectMeta;
use crate::resource::{Resource, ResourceList};

/// A named bundle of environment variables and files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secret {
    /// API version tag; defaults to `v1beta`.
    #[serde(rename = "apiVersion", default)]
    pub api_version: String,
    /// Kind tag; defaults to `Secret`.
    #[serde(default)]
    pub kind: String,
    /// Identity and timestamps.
    #[serde(default)]
    pub metadata: ObjectMeta,
    /// Secret payload.
    #[serde(default)]
    pub data: SecretData,
}

/// Payload of a secret. Entries keep their order; duplicates are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretData {
    /// Environment variables exported into jobs.
    #[serde(default)]
    pub env_vars: Vec<EnvVar>,
    /// Files written into the job environment.
    #[serde(default)]
    pub files: Vec<SecretFile>,
}

/// A single environment variable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvVar {
    /// Variable name.
    #[serde(default)]
    pub name: String,
    /// Variable value.
    #[serde(default)]
    pub value: String,
}

/// A file materialised at `path`; `content` is base64 encoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretFile {
    /// Destination path inside the job environment.
    #[serde(default)]
    pub path: String,
    /// Base64-encoded file content.
    #[serde(default)]
    pub content: String,
}

/// Wrapper returned by `GET /secrets`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretList {
    /// Secrets in server order.
    #[serde(default)]
    pub secrets: Vec<Secret>,
}

impl Secret {
    /// Append an environment variable.
    pub fn add_env_var(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.data.env_vars.push(EnvVar {
            name: name.into(),
            value: value.into(),
        });
    }

    /// Append a file entry whose content is already base64 encoded.
    pub fn add_file(&mut self, path: impl Into<String>, content: impl Into<String>) {
        self.data.files.push(SecretFile {
            path: path.into(),
            content: content.into(),
        });
    }
}

impl Resource for Secret {
    const KIND: &'static str = "Secret";
    const API_VERSION: &'static str = "v1beta";
    const PLURAL: &'static str = "secrets";

    type List = SecretList;

    fn name(&self) -> &str {
        &self.metadata.name
    }

    fn set_name(&mut self, name: String) {
        self.metadata.name = name;
    }

    fn id(&self) -> Option<&str> {
        self.metadata.id.as_deref()
    }

    fn type_tags_mut(&mut self) -> (&mut String, &mut String) {
        (&mut self.api_version, &mut self.kind)
    }
}

impl ResourceList for SecretList {
    type Item = Secret;

    fn items(&self) -> &[Secret] {
        &self.secrets
    }

    fn items_mut(&mut self) -> &mut Vec<Secret> {
        &mut self.secrets
    }

    fn into_items(self) -> Vec<Secret> {
        self.secrets
    }
}
