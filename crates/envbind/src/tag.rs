//! Tag descriptor parsing for `#[env("KEY,flag,...")]` annotations.
//!
//! The annotation grammar is deliberately small:
//!
//! ```text
//! KEY[,flag]*     flag ∈ { required, report, noreport }   (case-insensitive)
//! ```
//!
//! The first comma-separated segment is the external key name, trimmed of
//! surrounding whitespace. Every following segment is matched against the
//! known flags; anything else is silently ignored so that annotations stay
//! forward-compatible. Parsing therefore never fails.
//!
//! Descriptors are rebuilt on every traversal from the literal captured by
//! the derive macro; they carry no state between walks.

/// Whether a field's value is shown or redacted in the audit report.
///
/// The report renders a field's literal value only when its tag carries the
/// `report` flag. Both `ForceOmit` (an explicit `noreport`) and `Default`
/// (no flag at all) render the `(OMITTED)` placeholder.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ReportPolicy {
    /// Neither `report` nor `noreport` was declared. Treated as omitted.
    #[default]
    Default,

    /// The tag carries `report`: always render the literal value.
    ForceReport,

    /// The tag carries `noreport`: always render the placeholder.
    ForceOmit,
}

/// The parsed form of one field's tag annotation.
///
/// Derived fresh on each walk from the tag literal the derive macro captured
/// at compile time, together with the owning struct and field names used by
/// the report pass.
#[derive(Clone, Debug)]
pub struct FieldDescriptor {
    /// External key name. `None` when the annotation had no key segment;
    /// such a field is skipped by all three passes.
    pub key: Option<String>,

    /// Whether an absent or empty external value is a violation.
    pub required: bool,

    /// Report redaction policy for this field.
    pub policy: ReportPolicy,

    /// Name of the struct that declares the field.
    pub owner: &'static str,

    /// Declared field name.
    pub field: &'static str,
}

impl FieldDescriptor {
    /// Parses a tag annotation into a descriptor.
    ///
    /// `tag` is the raw literal from `#[env("...")]`, or `None` for a field
    /// without an annotation. Unknown flag segments are ignored.
    #[must_use]
    pub fn parse(tag: Option<&str>, owner: &'static str, field: &'static str) -> Self {
        let mut desc = Self {
            key: None,
            required: false,
            policy: ReportPolicy::Default,
            owner,
            field,
        };

        let Some(tag) = tag else {
            return desc;
        };

        let mut segments = tag.split(',');

        if let Some(first) = segments.next() {
            let key = first.trim();
            if !key.is_empty() {
                desc.key = Some(key.to_string());
            }
        }

        for flag in segments {
            match flag.trim().to_ascii_lowercase().as_str() {
                "required" => desc.required = true,
                "report" => desc.policy = ReportPolicy::ForceReport,
                "noreport" => desc.policy = ReportPolicy::ForceOmit,
                // Unknown flags are no-ops on purpose.
                _ => {}
            }
        }

        desc
    }

    /// Whether the report pass shows this field's literal value.
    #[must_use]
    pub fn reveals_value(&self) -> bool {
        self.policy == ReportPolicy::ForceReport
    }
}
