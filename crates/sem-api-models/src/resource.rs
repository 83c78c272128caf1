//! Capability traits implemented by every resource kind.
//!
//! # Design
//! - A resource kind is described once (kind name, path segment, API version)
//!   and the generic client derives every verb from it.
//! - JSON decoding is permissive so newer servers can add fields; YAML
//!   manifests are strict because they are written by hand.
//! - `apiVersion`/`kind` are back-filled after every decode, including each
//!   element of a list payload.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ModelError, ModelResult};
use crate::strict;

/// A resource kind exposed by the API.
pub trait Resource: Serialize + DeserializeOwned + Default + Clone {
    /// Value of the `kind` field, e.g. `Secret`.
    const KIND: &'static str;
    /// API version the kind lives under, e.g. `v1beta`.
    const API_VERSION: &'static str;
    /// URL path segment for the collection, e.g. `secrets`.
    const PLURAL: &'static str;

    /// Collection wrapper returned by list calls.
    type List: ResourceList<Item = Self>;

    /// `metadata.name`.
    fn name(&self) -> &str;

    /// Replace `metadata.name`.
    fn set_name(&mut self, name: String);

    /// `metadata.id`, when the server has assigned one.
    fn id(&self) -> Option<&str>;

    /// Mutable access to the `apiVersion` and `kind` tags.
    fn type_tags_mut(&mut self) -> (&mut String, &mut String);

    /// Build an empty resource with defaulted tags and the given name.
    #[must_use]
    fn named(name: impl Into<String>) -> Self {
        let mut resource = Self::default();
        resource.set_name(name.into());
        resource.apply_defaults();
        resource
    }

    /// Fill in `apiVersion` and `kind` when they are empty.
    fn apply_defaults(&mut self) {
        let (api_version, kind) = self.type_tags_mut();
        if api_version.is_empty() {
            *api_version = Self::API_VERSION.to_string();
        }
        if kind.is_empty() {
            *kind = Self::KIND.to_string();
        }
    }

    /// Check the resource is addressable before it is written upstream.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::BlankName`] when `metadata.name` is empty.
    fn validate(&self) -> ModelResult<()> {
        if self.name().is_empty() {
            return Err(ModelError::BlankName { kind: Self::KIND });
        }
        Ok(())
    }

    /// Identifier used to address updates: the id when set, otherwise the name.
    fn identifier(&self) -> &str {
        self.id()
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| self.name())
    }

    /// Display label such as `Secrets/db-password`.
    fn object_name(&self) -> String {
        format!("{}s/{}", Self::KIND, self.name())
    }

    /// Decode a JSON payload, ignoring unknown fields.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::JsonDecode`] when the payload does not match the shape.
    fn from_json(bytes: &[u8]) -> ModelResult<Self> {
        let mut resource: Self = serde_json::from_slice(bytes).map_err(|detail| {
            ModelError::JsonDecode {
                kind: Self::KIND,
                detail,
            }
        })?;
        resource.apply_defaults();
        Ok(resource)
    }

    /// Decode a YAML manifest, rejecting fields the resource does not define.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::YamlDecode`] for malformed documents and
    /// [`ModelError::UnknownField`] for fields outside the resource shape.
    fn from_yaml(bytes: &[u8]) -> ModelResult<Self> {
        let (mut resource, unknown) =
            strict::from_slice::<Self>(bytes).map_err(|detail| ModelError::YamlDecode {
                kind: Self::KIND,
                detail,
            })?;
        if let Some(path) = unknown {
            return Err(ModelError::UnknownField {
                kind: Self::KIND,
                path,
            });
        }
        resource.apply_defaults();
        Ok(resource)
    }

    /// Encode as compact JSON, the form sent upstream.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::JsonEncode`] when serialization fails.
    fn to_json(&self) -> ModelResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|detail| ModelError::JsonEncode {
            kind: Self::KIND,
            detail,
        })
    }

    /// Encode as a YAML document.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::YamlEncode`] when serialization fails.
    fn to_yaml(&self) -> ModelResult<String> {
        serde_yaml::to_string(self).map_err(|detail| ModelError::YamlEncode {
            kind: Self::KIND,
            detail,
        })
    }
}

/// Collection wrapper returned by list endpoints.
pub trait ResourceList: Serialize + DeserializeOwned + Default {
    /// Element type.
    type Item: Resource;

    /// Borrow the decoded elements.
    fn items(&self) -> &[Self::Item];

    /// Mutable access to the stored elements.
    fn items_mut(&mut self) -> &mut Vec<Self::Item>;

    /// Consume the wrapper and return its elements.
    fn into_items(self) -> Vec<Self::Item>;

    /// Decode a list payload and back-fill defaults on every element.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::JsonDecode`] when the payload does not match the shape.
    fn from_json(bytes: &[u8]) -> ModelResult<Self> {
        let mut list: Self =
            serde_json::from_slice(bytes).map_err(|detail| ModelError::JsonDecode {
                kind: Self::Item::KIND,
                detail,
            })?;
        for item in list.items_mut() {
            item.apply_defaults();
        }
        Ok(list)
    }
}
