//! Unknown-field detection for hand-written manifests.
//!
//! The manifest is decoded through `serde_ignored`, which reports every key
//! that none of the model's declared fields claimed, whatever its value.

use serde::de::DeserializeOwned;
use serde_ignored::Path;

/// Decode `bytes` and return the dotted path of the first unclaimed key.
pub(crate) fn from_slice<T: DeserializeOwned>(
    bytes: &[u8],
) -> Result<(T, Option<String>), serde_yaml::Error> {
    let mut first_unknown = None;
    let value = serde_ignored::deserialize(serde_yaml::Deserializer::from_slice(bytes), |path| {
        first_unknown.get_or_insert_with(|| dotted(&path));
    })?;
    Ok((value, first_unknown))
}

fn dotted(path: &Path<'_>) -> String {
    match path {
        Path::Root => String::new(),
        Path::Seq { parent, index } => format!("{}[{index}]", dotted(parent)),
        Path::Map { parent, key } => {
            let parent = dotted(parent);
            if parent.is_empty() {
                key.clone()
            } else {
                format!("{parent}.{key}")
            }
        }
        Path::Some { parent } | Path::NewtypeStruct { parent } | Path::NewtypeVariant { parent } => {
            dotted(parent)
        }
    }
}
