//! The audit report: a fixed-width, secrecy-aware summary of every bound
//! field.
//!
//! One row per keyed leaf, in traversal order. The value column renders the
//! literal current value only for fields whose tag carries the `report`
//! flag; everything else — an explicit `noreport` or no flag at all — shows
//! the `(OMITTED)` placeholder, so nothing sensitive leaks by default.
//!
//! ```text
//! FIELD NAME:        TYPE:   ENV:       REQUIRED:  VALUE:
//! HostInfo.ip        String  HOST_IP    true       (OMITTED)
//! HostInfo.port      u16     HOST_PORT  false      8080
//! ```

use std::io::Write;

use crate::error::Error;
use crate::tag::FieldDescriptor;
use crate::walk::EnvBind;

/// Placeholder rendered in place of a redacted value.
pub const OMITTED: &str = "(OMITTED)";

/// Header row, one label per column.
const HEADERS: [&str; 5] = ["FIELD NAME:", "TYPE:", "ENV:", "REQUIRED:", "VALUE:"];

/// Minimum padding between columns.
const COLUMN_GAP: usize = 2;

/// One report row, produced by the report pass for a keyed leaf.
#[derive(Clone, Debug)]
pub struct ReportRow {
    /// `OwnerTypeName.field_name` path of the leaf.
    pub path: String,

    /// The leaf's kind label.
    pub type_label: String,

    /// The external key, uppercased for display.
    pub key: String,

    /// Whether the field is required.
    pub required: bool,

    /// The rendered value: the literal value, or [`OMITTED`] when the
    /// field's report policy resolves to omission.
    pub value: String,
}

impl ReportRow {
    /// Builds a row from a descriptor, applying the report policy to the
    /// serialized value.
    #[must_use]
    pub fn new(desc: &FieldDescriptor, type_label: String, key: &str, value: String) -> Self {
        Self {
            path: format!("{}.{}", desc.owner, desc.field),
            type_label,
            key: key.to_uppercase(),
            required: desc.required,
            value: if desc.reveals_value() {
                value
            } else {
                OMITTED.to_string()
            },
        }
    }
}

/// Renders rows as a column-aligned table with the fixed header row.
fn render(rows: &[ReportRow]) -> String {
    let mut widths: [usize; 5] = [0; 5];

    for (i, header) in HEADERS.iter().enumerate() {
        widths[i] = header.len();
    }

    for row in rows {
        let cells = row_cells(row);
        for (i, cell) in cells.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let mut out = String::new();
    write_line(&mut out, &HEADERS.map(str::to_string), &widths);

    for row in rows {
        write_line(&mut out, &row_cells(row), &widths);
    }

    out
}

fn row_cells(row: &ReportRow) -> [String; 5] {
    [
        row.path.clone(),
        row.type_label.clone(),
        row.key.clone(),
        row.required.to_string(),
        row.value.clone(),
    ]
}

fn write_line(out: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
    for (i, cell) in cells.iter().enumerate() {
        if i + 1 == cells.len() {
            // Last column is never padded.
            out.push_str(cell);
        } else {
            let width = widths[i] + COLUMN_GAP;
            out.push_str(&format!("{cell:<width$}"));
        }
    }

    out.push('\n');
}

/// Writes the formatted report for `tree` to the given sink.
///
/// # Errors
///
/// Fails only when the sink rejects the write.
pub fn write_report<T: EnvBind>(tree: &T, out: &mut dyn Write) -> Result<(), Error> {
    out.write_all(report_to_string(tree).as_bytes())
        .map_err(|source| Error::Report { source })
}

/// Renders the formatted report for `tree` as a string.
#[must_use]
pub fn report_to_string<T: EnvBind>(tree: &T) -> String {
    let mut rows = Vec::new();
    tree.report_fields(&mut rows);
    render(&rows)
}
