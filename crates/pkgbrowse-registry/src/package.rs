//! Package records as they appear in a catalog snapshot.
//!
//! A snapshot carries two shapes of the same data: the lightweight [`Package`]
//! entries of the flat `packages` list, and the [`PackageDetail`] records of the
//! `details` map whose fields all may be missing. The deserializers here accept
//! the quirks of the snapshot producer:
//!
//! - Empty strings in optional fields are normalized to `None`
//! - Size and timestamp fields accept integers, floats or numeric strings
//! - `null` or missing identity fields become empty strings

use std::fmt;

use serde::{
    de::{self, Visitor},
    Deserialize, Deserializer, Serialize,
};

fn empty_is_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.is_empty()))
}

fn null_is_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.unwrap_or_default())
}

fn optional_number<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    struct OptU64Visitor;

    impl<'de> Visitor<'de> for OptU64Visitor {
        type Value = Option<u64>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a non-negative number, string, or null")
        }

        fn visit_none<E>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok((v >= 0).then_some(v as u64))
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok((v.is_finite() && v >= 0.0).then_some(v as u64))
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v.trim().parse::<u64>().ok())
        }
    }

    deserializer.deserialize_any(OptU64Visitor)
}

/// A package entry from the snapshot's flat `packages` list.
///
/// `name` is the primary key of the consolidated catalog. Entries whose name is
/// empty are kept at this level and dropped during consolidation.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Package {
    #[serde(default, deserialize_with = "null_is_empty")]
    pub name: String,

    #[serde(default, deserialize_with = "null_is_empty")]
    pub version: String,

    #[serde(default, deserialize_with = "null_is_empty")]
    pub description: String,

    /// Logical repository bucket, e.g. `main` or `community`.
    #[serde(default, deserialize_with = "null_is_empty")]
    pub repo: String,

    /// Raw source feed the entry was ingested from; ranked by `repo_priority`.
    #[serde(
        default,
        deserialize_with = "empty_is_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub source_repo: Option<String>,

    #[serde(
        default,
        deserialize_with = "empty_is_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub architecture: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub architectures: Option<Vec<String>>,

    #[serde(
        default,
        deserialize_with = "empty_is_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub url: Option<String>,

    #[serde(
        default,
        deserialize_with = "empty_is_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub license: Option<String>,

    #[serde(
        default,
        deserialize_with = "optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub package_size: Option<u64>,

    #[serde(
        default,
        deserialize_with = "optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub installed_size: Option<u64>,

    #[serde(
        default,
        deserialize_with = "empty_is_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub origin: Option<String>,

    #[serde(
        default,
        deserialize_with = "empty_is_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub maintainer: Option<String>,

    /// Build timestamp in unix seconds.
    #[serde(
        default,
        deserialize_with = "optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub build_time: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provides: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install_if: Option<Vec<String>>,

    #[serde(
        default,
        deserialize_with = "empty_is_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub checksum: Option<String>,
}

/// An extended record from the snapshot's `details` map.
///
/// Every field is optional; a field that is present overrides the matching
/// field of the base [`Package`] when the two are merged.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PackageDetail {
    #[serde(default, deserialize_with = "empty_is_none")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "empty_is_none")]
    pub version: Option<String>,

    #[serde(default, deserialize_with = "empty_is_none")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "empty_is_none")]
    pub repo: Option<String>,

    #[serde(default, deserialize_with = "empty_is_none")]
    pub source_repo: Option<String>,

    #[serde(default, deserialize_with = "empty_is_none")]
    pub architecture: Option<String>,

    #[serde(default)]
    pub architectures: Option<Vec<String>>,

    #[serde(default, deserialize_with = "empty_is_none")]
    pub url: Option<String>,

    #[serde(default, deserialize_with = "empty_is_none")]
    pub license: Option<String>,

    #[serde(default, deserialize_with = "optional_number")]
    pub package_size: Option<u64>,

    #[serde(default, deserialize_with = "optional_number")]
    pub installed_size: Option<u64>,

    #[serde(default, deserialize_with = "empty_is_none")]
    pub origin: Option<String>,

    #[serde(default, deserialize_with = "empty_is_none")]
    pub maintainer: Option<String>,

    #[serde(default, deserialize_with = "optional_number")]
    pub build_time: Option<u64>,

    #[serde(default)]
    pub dependencies: Option<Vec<String>>,

    #[serde(default)]
    pub provides: Option<Vec<String>>,

    #[serde(default)]
    pub install_if: Option<Vec<String>>,

    #[serde(default, deserialize_with = "empty_is_none")]
    pub checksum: Option<String>,
}
