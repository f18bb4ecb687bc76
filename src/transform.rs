//! Report transformer: decoded audit report → flat, ordered spreadsheet rows.
//!
//! Each vulnerability record is transformed independently. A record whose
//! mandatory fields fail to decode is skipped with a warning carrying its
//! positional index; a failure inside the optional `affected` block only
//! drops the affected columns for that record. One bad record never aborts
//! the batch.

use std::fmt;
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{info, warn};

use crate::error::{AuditError, Result};
use crate::report::{AffectedInfo, AuditReport, VulnerabilityRecord};
use crate::schema;

/// A single display value placed into a spreadsheet cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Text(String),
    Bool(bool),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// One tabular record ready for spreadsheet placement, keyed by the schema
/// registry's column names in registry order. Affected-info keys are absent
/// (not empty) when the record carries no affected block.
pub type FlatRow = IndexMap<&'static str, CellValue>;

/// The scanned component count, or a placeholder when the report does not
/// carry one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentCount {
    Known(u64),
    Unknown,
}

impl fmt::Display for ComponentCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentCount::Known(count) => write!(f, "{}", count),
            ComponentCount::Unknown => write!(f, "unknown"),
        }
    }
}

/// Transformer output: the component count and one row per well-formed
/// vulnerability record, in input order.
#[derive(Debug)]
pub struct ParsedReport {
    pub component_count: ComponentCount,
    pub rows: Vec<FlatRow>,
}

/// Read and transform a `cargo audit --json` report.
///
/// An unreadable path or invalid JSON is fatal. Everything below that is
/// tolerant: a missing component count becomes [`ComponentCount::Unknown`],
/// an absent or empty vulnerabilities section yields zero rows, and
/// malformed records are skipped individually.
pub fn parse_report(path: &Path) -> Result<ParsedReport> {
    let content = fs::read_to_string(path).map_err(|e| AuditError::ReportReadError {
        path: path.to_path_buf(),
        details: e.to_string(),
    })?;

    let report: AuditReport =
        serde_json::from_str(&content).map_err(|e| AuditError::ReportParseError {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;

    info!("Opened audit report: {}", path.display());

    let component_count = match report.lockfile.and_then(|l| l.dependency_count) {
        Some(count) => ComponentCount::Known(count),
        None => {
            warn!("Component count not found in report; substituting placeholder");
            ComponentCount::Unknown
        }
    };

    let rows = match report.vulnerabilities {
        Some(section) if section.found => flatten_records(&section.list),
        Some(_) => {
            info!("No vulnerabilities were found within the audit report");
            Vec::new()
        }
        None => {
            info!("The `vulnerabilities` key was not found within the audit report");
            Vec::new()
        }
    };

    Ok(ParsedReport {
        component_count,
        rows,
    })
}

/// Transform every record independently, in input order. Records whose
/// mandatory fields fail to decode contribute nothing.
pub fn flatten_records(list: &[Value]) -> Vec<FlatRow> {
    let mut rows = Vec::with_capacity(list.len());

    for (index, raw) in list.iter().enumerate() {
        match flatten_record(index, raw) {
            Some(row) => rows.push(row),
            None => continue,
        }
    }

    info!("Parsed {} of {} vulnerability records", rows.len(), list.len());
    rows
}

/// Transform one raw record into a FlatRow, or `None` if its mandatory
/// fields are malformed. Affected-info failure is logged but keeps the row.
fn flatten_record(index: usize, raw: &Value) -> Option<FlatRow> {
    let record: VulnerabilityRecord = match serde_json::from_value(raw.clone()) {
        Ok(record) => record,
        Err(e) => {
            warn!("Skipping vulnerability record at index {}: {}", index, e);
            return None;
        }
    };

    let advisory = &record.advisory;
    let mut row = FlatRow::new();
    row.insert(schema::VULNERABILITY_ID, text(&advisory.id));
    row.insert(schema::PACKAGE_NAME, text(&advisory.package));
    row.insert(schema::PACKAGE_VERSION, text(&record.package.version));
    row.insert(schema::VULNERABILITY_TITLE, text(&advisory.title));
    row.insert(schema::DESCRIPTION, text(&advisory.description));
    row.insert(
        schema::PACKAGE_SOURCE_URL,
        CellValue::Text(strip_registry_prefix(&record.package.source)),
    );
    row.insert(schema::DATE_FIRST_DISCOVERED, text(&advisory.date));
    row.insert(
        schema::VULNERABILITY_ALIASES,
        CellValue::Text(join_lines(&advisory.aliases)),
    );
    row.insert(
        schema::VULNERABILITY_CATEGORIES,
        CellValue::Text(join_lines(&advisory.categories)),
    );
    row.insert(
        schema::VULNERABILITY_REFERENCES,
        CellValue::Text(join_lines(&advisory.references)),
    );
    row.insert(
        schema::VULNERABILITY_SOURCE,
        CellValue::Text(
            advisory
                .source
                .as_deref()
                .map(strip_registry_prefix)
                .unwrap_or_default(),
        ),
    );
    row.insert(
        schema::VULNERABILITY_URL,
        CellValue::Text(advisory.url.clone().unwrap_or_default()),
    );
    row.insert(
        schema::VULNERABILITY_WITHDRAWN,
        match advisory.withdrawn {
            Some(withdrawn) => CellValue::Bool(withdrawn),
            None => CellValue::Text(String::new()),
        },
    );
    row.insert(
        schema::PATCHED_VERSIONS,
        CellValue::Text(join_lines(&record.versions.patched)),
    );
    row.insert(
        schema::UNAFFECTED_VERSIONS,
        CellValue::Text(join_lines(&record.versions.unaffected)),
    );

    // The affected block is nullable upstream; null means "no affected info",
    // not a malformed record.
    if let Some(affected) = record.affected.filter(|v| !v.is_null()) {
        match serde_json::from_value::<AffectedInfo>(affected) {
            Ok(affected) => {
                row.insert(
                    schema::AFFECTED_ARCHITECTURE,
                    CellValue::Text(join_lines(&affected.arch)),
                );
                row.insert(
                    schema::AFFECTED_OSES,
                    CellValue::Text(join_lines(&affected.os)),
                );
                row.insert(
                    schema::AFFECTED_FUNCTIONS,
                    CellValue::Text(affected_functions_string(&affected.functions)),
                );
            }
            Err(e) => {
                warn!(
                    "Failed to parse `affected` for vulnerability record at index {}: {}",
                    index, e
                );
            }
        }
    }

    Some(row)
}

fn text(value: &str) -> CellValue {
    CellValue::Text(value.to_string())
}

/// Join list elements with newlines, in source order. An empty list renders
/// as the empty string.
fn join_lines(items: &[String]) -> String {
    items.join("\n")
}

/// Strip the literal `registry+` prefix from a source URL if present.
fn strip_registry_prefix(source: &str) -> String {
    source.strip_prefix("registry+").unwrap_or(source).to_string()
}

/// Render the affected-functions map: each function name immediately followed
/// by its newline-joined version ranges, entries separated by newlines.
fn affected_functions_string(functions: &IndexMap<String, Vec<String>>) -> String {
    functions
        .iter()
        .map(|(function, versions)| format!("{}{}", function, versions.join("\n")))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_json(id: &str) -> Value {
        serde_json::json!({
            "advisory": {
                "id": id,
                "package": "time",
                "title": "Potential segfault",
                "description": "Unsound call",
                "date": "2020-11-18",
                "aliases": ["CVE-2020-26235"],
                "categories": ["code-execution"],
                "references": [],
                "source": "registry+https://github.com/rustsec/advisory-db",
                "url": "https://rustsec.org/advisories/RUSTSEC-2020-0071",
                "withdrawn": null
            },
            "package": {
                "version": "0.1.45",
                "source": "registry+https://github.com/rust-lang/crates.io-index"
            },
            "versions": {
                "patched": [">=0.2.23"],
                "unaffected": ["=0.2.0"]
            }
        })
    }

    #[test]
    fn test_all_well_formed_records_produce_rows_in_order() {
        let list = vec![record_json("RUSTSEC-1"), record_json("RUSTSEC-2")];
        let rows = flatten_records(&list);
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0][schema::VULNERABILITY_ID],
            CellValue::Text("RUSTSEC-1".to_string())
        );
        assert_eq!(
            rows[1][schema::VULNERABILITY_ID],
            CellValue::Text("RUSTSEC-2".to_string())
        );
    }

    #[test]
    fn test_malformed_record_is_skipped_without_index_shift() {
        let mut bad = record_json("RUSTSEC-BAD");
        bad["advisory"].as_object_mut().unwrap().remove("id");
        let list = vec![record_json("RUSTSEC-1"), bad, record_json("RUSTSEC-3")];

        let rows = flatten_records(&list);
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0][schema::VULNERABILITY_ID],
            CellValue::Text("RUSTSEC-1".to_string())
        );
        assert_eq!(
            rows[1][schema::VULNERABILITY_ID],
            CellValue::Text("RUSTSEC-3".to_string())
        );
    }

    #[test]
    fn test_aliases_join_with_newline() {
        let mut record = record_json("RUSTSEC-1");
        record["advisory"]["aliases"] = serde_json::json!(["CVE-1", "CVE-2"]);
        let rows = flatten_records(&[record]);
        assert_eq!(
            rows[0][schema::VULNERABILITY_ALIASES],
            CellValue::Text("CVE-1\nCVE-2".to_string())
        );
    }

    #[test]
    fn test_empty_list_fields_render_as_empty_string() {
        let mut record = record_json("RUSTSEC-1");
        record["advisory"]["aliases"] = serde_json::json!([]);
        let rows = flatten_records(&[record]);
        assert_eq!(
            rows[0][schema::VULNERABILITY_ALIASES],
            CellValue::Text(String::new())
        );
        assert_eq!(
            rows[0][schema::VULNERABILITY_REFERENCES],
            CellValue::Text(String::new())
        );
    }

    #[test]
    fn test_registry_prefix_is_stripped() {
        let mut record = record_json("RUSTSEC-1");
        record["package"]["source"] = serde_json::json!("registry+https://github.com/x/y");
        let rows = flatten_records(&[record]);
        assert_eq!(
            rows[0][schema::PACKAGE_SOURCE_URL],
            CellValue::Text("https://github.com/x/y".to_string())
        );
    }

    #[test]
    fn test_missing_registry_prefix_is_a_noop() {
        assert_eq!(
            strip_registry_prefix("https://github.com/x/y"),
            "https://github.com/x/y"
        );
    }

    #[test]
    fn test_withdrawn_true_renders_as_bool() {
        let mut record = record_json("RUSTSEC-1");
        record["advisory"]["withdrawn"] = serde_json::json!(true);
        let rows = flatten_records(&[record]);
        assert_eq!(
            rows[0][schema::VULNERABILITY_WITHDRAWN],
            CellValue::Bool(true)
        );
    }

    #[test]
    fn test_affected_fields_absent_without_affected_block() {
        let rows = flatten_records(&[record_json("RUSTSEC-1")]);
        assert!(!rows[0].contains_key(schema::AFFECTED_ARCHITECTURE));
        assert!(!rows[0].contains_key(schema::AFFECTED_OSES));
        assert!(!rows[0].contains_key(schema::AFFECTED_FUNCTIONS));
    }

    #[test]
    fn test_null_affected_block_is_treated_as_absent() {
        let mut record = record_json("RUSTSEC-1");
        record["affected"] = Value::Null;
        let rows = flatten_records(&[record]);
        assert!(!rows[0].contains_key(schema::AFFECTED_ARCHITECTURE));
    }

    #[test]
    fn test_affected_block_adds_columns() {
        let mut record = record_json("RUSTSEC-1");
        record["affected"] = serde_json::json!({
            "arch": ["x86_64", "aarch64"],
            "os": [],
            "functions": {
                "time::at": ["<0.2.23"],
                "time::now": ["<0.2.23", ">=0.1.0"]
            }
        });
        let rows = flatten_records(&[record]);
        assert_eq!(
            rows[0][schema::AFFECTED_ARCHITECTURE],
            CellValue::Text("x86_64\naarch64".to_string())
        );
        assert_eq!(
            rows[0][schema::AFFECTED_OSES],
            CellValue::Text(String::new())
        );
        assert_eq!(
            rows[0][schema::AFFECTED_FUNCTIONS],
            CellValue::Text("time::at<0.2.23\ntime::now<0.2.23\n>=0.1.0".to_string())
        );
    }

    #[test]
    fn test_malformed_affected_keeps_mandatory_fields() {
        let mut record = record_json("RUSTSEC-1");
        record["affected"] = serde_json::json!({"arch": ["x86_64"]});
        let rows = flatten_records(&[record]);
        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0][schema::VULNERABILITY_ID],
            CellValue::Text("RUSTSEC-1".to_string())
        );
        assert!(!rows[0].contains_key(schema::AFFECTED_ARCHITECTURE));
    }

    #[test]
    fn test_row_columns_follow_registry_order() {
        let mut record = record_json("RUSTSEC-1");
        record["affected"] =
            serde_json::json!({"arch": [], "os": [], "functions": {}});
        let rows = flatten_records(&[record]);
        let expected: Vec<&str> = crate::schema::all_columns()
            .iter()
            .map(|c| c.name)
            .collect();
        let actual: Vec<&str> = rows[0].keys().copied().collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_component_count_display() {
        assert_eq!(ComponentCount::Known(431).to_string(), "431");
        assert_eq!(ComponentCount::Unknown.to_string(), "unknown");
    }

    #[test]
    fn test_parse_report_missing_count_and_no_vulnerabilities() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.json");
        std::fs::write(&path, r#"{"vulnerabilities": {"found": false, "list": []}}"#).unwrap();

        let parsed = parse_report(&path).unwrap();
        assert_eq!(parsed.component_count, ComponentCount::Unknown);
        assert!(parsed.rows.is_empty());
    }

    #[test]
    fn test_parse_report_full_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.json");
        let report = serde_json::json!({
            "lockfile": {"dependency-count": 431},
            "vulnerabilities": {"found": true, "list": [record_json("RUSTSEC-1")]}
        });
        std::fs::write(&path, report.to_string()).unwrap();

        let parsed = parse_report(&path).unwrap();
        assert_eq!(parsed.component_count, ComponentCount::Known(431));
        assert_eq!(parsed.rows.len(), 1);
    }

    #[test]
    fn test_parse_report_invalid_json_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(parse_report(&path).is_err());
    }

    #[test]
    fn test_parse_report_missing_file_is_fatal() {
        assert!(parse_report(Path::new("/nonexistent/audit.json")).is_err());
    }
}
