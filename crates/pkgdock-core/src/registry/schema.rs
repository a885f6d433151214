//! Wire schemas for the two registries
//!
//! Both endpoints return a bare JSON array. The Unity registry lists every
//! published version with its download URL; Verdaccio's search endpoint only
//! reports the latest version.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Envelope the Unity registry array is wrapped into before deserializing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnityPackageRegistry {
    pub packages: Vec<UnityPackageRecord>,
}

/// A package as listed by the Unity registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnityPackageRecord {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,

    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Version string to download URL; the URL may be null.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub versions: BTreeMap<String, Option<String>>,
}

impl UnityPackageRecord {
    /// Lexicographically greatest version key.
    ///
    /// Plain ordinal string comparison, so `"2.0.0"` outranks `"10.0.0"`.
    pub fn latest_version(&self) -> Option<&str> {
        self.versions.keys().next_back().map(String::as_str)
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Uniform envelope for the Verdaccio search results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerdaccioRegistry {
    pub packages: Vec<VerdaccioPackageRecord>,
}

/// A package as listed by Verdaccio's search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerdaccioPackageRecord {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,

    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub version: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unity_record(versions: &[&str]) -> UnityPackageRecord {
        UnityPackageRecord {
            name: "com.example.tools".to_string(),
            display_name: Some("Tools".to_string()),
            description: None,
            versions: versions
                .iter()
                .map(|v| (v.to_string(), Some(format!("https://cdn.example/{v}.tgz"))))
                .collect(),
        }
    }

    #[test]
    fn test_latest_version_is_lexicographic() {
        let record = unity_record(&["1.0.0", "2.0.0", "10.0.0"]);
        assert_eq!(record.latest_version(), Some("2.0.0"));
    }

    #[test]
    fn test_latest_version_empty_map() {
        let record = unity_record(&[]);
        assert_eq!(record.latest_version(), None);
    }

    #[test]
    fn test_unity_record_parses_camel_case() {
        let json = r#"{
            "name": "com.example.ui",
            "displayName": "Example UI",
            "description": "Widgets",
            "versions": {"0.1.0": "https://cdn.example/ui-0.1.0.tgz"}
        }"#;
        let record: UnityPackageRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.display_name.as_deref(), Some("Example UI"));
        assert_eq!(record.latest_version(), Some("0.1.0"));
    }

    #[test]
    fn test_unity_record_null_versions() {
        let json = r#"{"name": "com.example.empty", "versions": null}"#;
        let record: UnityPackageRecord = serde_json::from_str(json).unwrap();
        assert!(record.versions.is_empty());
    }

    #[test]
    fn test_unity_record_null_download_url() {
        let json = r#"{
            "name": "com.example.partial",
            "versions": {"1.0.0": null, "1.1.0": "https://cdn.example/1.1.0.tgz"}
        }"#;
        let record: UnityPackageRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.versions.len(), 2);
        assert_eq!(record.versions["1.0.0"], None);
        assert_eq!(record.latest_version(), Some("1.1.0"));
    }

    #[test]
    fn test_unity_record_without_name() {
        let json = r#"{"displayName": "Nameless", "versions": {"0.1.0": null}}"#;
        let record: UnityPackageRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.name, "");
        assert_eq!(record.display_name.as_deref(), Some("Nameless"));
    }

    #[test]
    fn test_verdaccio_record_without_display_name() {
        let json = r#"{"name": "@studio/net", "version": "3.1.4", "description": "Networking"}"#;
        let record: VerdaccioPackageRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.display_name, None);
        assert_eq!(record.version.as_deref(), Some("3.1.4"));
    }
}
