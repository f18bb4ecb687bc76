//! Static catalog of the output columns and their descriptions.
//!
//! The ordering here is the single source of truth for both the transformer
//! (FlatRow key names) and the workbook writer (header placement and the
//! descriptor glossary sheet). Keep the two in agreement by only ever
//! referring to columns through the constants below.

/// A (column name, description) pair for one output column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub name: &'static str,
    pub description: &'static str,
}

pub const VULNERABILITY_ID: &str = "Vulnerability ID";
pub const PACKAGE_NAME: &str = "Package Name";
pub const PACKAGE_VERSION: &str = "Package Version";
pub const VULNERABILITY_TITLE: &str = "Vulnerability Title";
pub const DESCRIPTION: &str = "Description";
pub const PACKAGE_SOURCE_URL: &str = "Package Source (URL)";
pub const DATE_FIRST_DISCOVERED: &str = "Date First Discovered";
pub const VULNERABILITY_ALIASES: &str = "Vulnerability Aliases";
pub const VULNERABILITY_CATEGORIES: &str = "Vulnerability Categories";
pub const VULNERABILITY_REFERENCES: &str = "Vulnerability References";
pub const VULNERABILITY_SOURCE: &str = "Vulnerability Source";
pub const VULNERABILITY_URL: &str = "Vulnerability URL";
pub const VULNERABILITY_WITHDRAWN: &str = "Vulnerability Withdrawn";
pub const PATCHED_VERSIONS: &str = "Patched Versions";
pub const UNAFFECTED_VERSIONS: &str = "Unaffected Versions";

pub const AFFECTED_ARCHITECTURE: &str = "Affected Architecture";
pub const AFFECTED_OSES: &str = "Affected OS(es)";
pub const AFFECTED_FUNCTIONS: &str = "Affected Functions";

const VULNERABILITY_COLUMNS: [ColumnDescriptor; 15] = [
    ColumnDescriptor {
        name: VULNERABILITY_ID,
        description: "The ID of the vulnerability.",
    },
    ColumnDescriptor {
        name: PACKAGE_NAME,
        description: "The name of the vulnerable package.",
    },
    ColumnDescriptor {
        name: PACKAGE_VERSION,
        description: "The version of the vulnerable package.",
    },
    ColumnDescriptor {
        name: VULNERABILITY_TITLE,
        description: "The title of the vulnerability.",
    },
    ColumnDescriptor {
        name: DESCRIPTION,
        description: "A description of the vulnerability.",
    },
    ColumnDescriptor {
        name: PACKAGE_SOURCE_URL,
        description: "The URL of the package. Most frequently a GH link.",
    },
    ColumnDescriptor {
        name: DATE_FIRST_DISCOVERED,
        description: "The date the vulnerability was first discovered in the wild.",
    },
    ColumnDescriptor {
        name: VULNERABILITY_ALIASES,
        description: "A list of any known vulnerability aliases, separated by `\\n`.",
    },
    ColumnDescriptor {
        name: VULNERABILITY_CATEGORIES,
        description: "A list of categories that fit the vulnerability, separated by `\\n`.",
    },
    ColumnDescriptor {
        name: VULNERABILITY_REFERENCES,
        description: "Any vulnerability references, separated by `\\n`.",
    },
    ColumnDescriptor {
        name: VULNERABILITY_SOURCE,
        description: "Registry source where the vulnerability is created.",
    },
    ColumnDescriptor {
        name: VULNERABILITY_URL,
        description: "URL of the security advisory, if any exists.",
    },
    ColumnDescriptor {
        name: VULNERABILITY_WITHDRAWN,
        description: "Whether or not the vulnerability has been withdrawn.",
    },
    ColumnDescriptor {
        name: PATCHED_VERSIONS,
        description: "A list of patched versions for the component, if any exist.",
    },
    ColumnDescriptor {
        name: UNAFFECTED_VERSIONS,
        description: "A list of known unaffected versions, if any exist.",
    },
];

const AFFECTED_COLUMNS: [ColumnDescriptor; 3] = [
    ColumnDescriptor {
        name: AFFECTED_ARCHITECTURE,
        description: "A list of any known affected architectures, delimited by `\\n`.",
    },
    ColumnDescriptor {
        name: AFFECTED_OSES,
        description: "A list of any known affected OSes, delimited by `\\n`.",
    },
    ColumnDescriptor {
        name: AFFECTED_FUNCTIONS,
        description: "A list of any known affected functions, delimited by `\\n`.",
    },
];

/// Columns extracted from every well-formed vulnerability record.
pub fn vulnerability_columns() -> &'static [ColumnDescriptor] {
    &VULNERABILITY_COLUMNS
}

/// Columns extracted from the optional `affected` sub-record.
pub fn affected_columns() -> &'static [ColumnDescriptor] {
    &AFFECTED_COLUMNS
}

/// All output columns in canonical order: vulnerability columns first,
/// affected columns after.
pub fn all_columns() -> Vec<ColumnDescriptor> {
    let mut columns = Vec::with_capacity(VULNERABILITY_COLUMNS.len() + AFFECTED_COLUMNS.len());
    columns.extend_from_slice(&VULNERABILITY_COLUMNS);
    columns.extend_from_slice(&AFFECTED_COLUMNS);
    columns
}
