//! Serde data model for the `cargo audit --json` report.
//!
//! The top-level shell is decoded with typed structs, but the vulnerability
//! list elements and each record's `affected` sub-structure stay as raw
//! [`serde_json::Value`]s: they are decoded one at a time by the transformer
//! so that a single malformed record (or malformed affected block) cannot
//! fail the whole report.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

/// Root of the decoded audit report.
#[derive(Debug, Deserialize)]
pub struct AuditReport {
    #[serde(default)]
    pub lockfile: Option<Lockfile>,
    #[serde(default)]
    pub vulnerabilities: Option<VulnerabilitySection>,
}

/// Lockfile summary. `dependency-count` is the scanned component count.
#[derive(Debug, Deserialize)]
pub struct Lockfile {
    #[serde(default, rename = "dependency-count")]
    pub dependency_count: Option<u64>,
}

/// The `vulnerabilities` section of the report.
#[derive(Debug, Deserialize)]
pub struct VulnerabilitySection {
    #[serde(default)]
    pub found: bool,
    /// Raw records, decoded individually by the transformer.
    #[serde(default)]
    pub list: Vec<Value>,
}

/// One vulnerability finding: an advisory against a concrete package version.
#[derive(Debug, Deserialize)]
pub struct VulnerabilityRecord {
    pub advisory: Advisory,
    pub package: PackageInfo,
    pub versions: VersionInfo,
    /// Optional and nullable upstream; decoded independently so that a
    /// malformed block degrades the record instead of rejecting it.
    #[serde(default)]
    pub affected: Option<Value>,
}

/// The disclosed weakness, independent of the affected package version.
#[derive(Debug, Deserialize)]
pub struct Advisory {
    pub id: String,
    pub package: String,
    pub title: String,
    pub description: String,
    pub date: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub references: Vec<String>,
    /// Originating registry, e.g. `registry+https://github.com/rustsec/advisory-db`.
    pub source: Option<String>,
    pub url: Option<String>,
    pub withdrawn: Option<bool>,
}

/// The vulnerable dependency instance.
#[derive(Debug, Deserialize)]
pub struct PackageInfo {
    pub version: String,
    /// Source registry URL; a null source makes the record malformed.
    pub source: String,
}

/// Version remediation info for the advisory.
#[derive(Debug, Deserialize)]
pub struct VersionInfo {
    #[serde(default)]
    pub patched: Vec<String>,
    #[serde(default)]
    pub unaffected: Vec<String>,
}

/// The optional `affected` sub-record. All three keys must be present;
/// their lists may be empty.
#[derive(Debug, Deserialize)]
pub struct AffectedInfo {
    pub arch: Vec<String>,
    pub os: Vec<String>,
    /// Affected function path mapped to the version ranges it is affected in,
    /// in source order.
    pub functions: IndexMap<String, Vec<String>>,
}
