//! Record normalizer: raw stored document -> [`ApplicationView`].
//!
//! Stored submissions have accumulated several generations of field names.
//! Every canonical field is resolved through an explicit alias table: the
//! canonical key if it holds a value, else the legacy key, else a typed
//! default. A value counts as present when it is not `null`, `false`, `0` or
//! the empty string, so an emptied canonical field still falls through to its
//! legacy counterpart.
//!
//! The ownership check runs before any field is read; a foreign record never
//! yields a partially populated view.

use serde_json::Value;

use crate::application::{
    ApplicationFiles, ApplicationStatus, ApplicationView, CompetitionCategory, CrewMember,
    Education, FileDescriptor, Submitter,
};
use crate::error::CoreError;
use crate::timestamp::parse_timestamp;
use crate::types::RawRecord;

/// Entity name used in [`CoreError::NotFound`] for submissions.
pub const ENTITY_APPLICATION: &str = "Application";

// ---------------------------------------------------------------------------
// Alias tables
// ---------------------------------------------------------------------------

/// Typed fallback used when neither the canonical nor the legacy key holds a
/// value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDefault {
    /// The field stays absent (`None` in the view).
    Absent,
    EmptyText,
    Zero,
    EmptyList,
    Text(&'static str),
}

impl FieldDefault {
    fn value(self) -> Value {
        match self {
            Self::Absent => Value::Null,
            Self::EmptyText => Value::String(String::new()),
            Self::Zero => Value::from(0),
            Self::EmptyList => Value::Array(Vec::new()),
            Self::Text(s) => Value::String(s.to_string()),
        }
    }
}

/// One `(canonical, legacy, default)` entry.
#[derive(Debug, Clone, Copy)]
pub struct FieldAlias {
    pub canonical: &'static str,
    pub legacy: Option<&'static str>,
    pub default: FieldDefault,
}

const fn field(canonical: &'static str, default: FieldDefault) -> FieldAlias {
    FieldAlias {
        canonical,
        legacy: None,
        default,
    }
}

const fn aliased(
    canonical: &'static str,
    legacy: &'static str,
    default: FieldDefault,
) -> FieldAlias {
    FieldAlias {
        canonical,
        legacy: Some(legacy),
        default,
    }
}

/// Top-level submission fields.
pub const APPLICATION_FIELDS: &[FieldAlias] = &[
    field("applicationId", FieldDefault::Absent),
    aliased("competitionCategory", "category", FieldDefault::Absent),
    field("status", FieldDefault::Text("draft")),
    field("filmTitle", FieldDefault::EmptyText),
    field("filmTitleTh", FieldDefault::Absent),
    field("genres", FieldDefault::EmptyList),
    field("format", FieldDefault::EmptyText),
    field("duration", FieldDefault::Zero),
    field("synopsis", FieldDefault::EmptyText),
    field("chiangmaiConnection", FieldDefault::Absent),
    aliased("submitterName", "directorName", FieldDefault::EmptyText),
    aliased("submitterNameTh", "directorNameTh", FieldDefault::Absent),
    aliased("submitterAge", "directorAge", FieldDefault::Absent),
    aliased("submitterPhone", "directorPhone", FieldDefault::Absent),
    aliased("submitterEmail", "directorEmail", FieldDefault::Absent),
    aliased("submitterRole", "directorRole", FieldDefault::Absent),
    aliased("submitterCustomRole", "directorCustomRole", FieldDefault::Absent),
    field("schoolName", FieldDefault::Absent),
    field("studentId", FieldDefault::Absent),
    field("universityName", FieldDefault::Absent),
    field("faculty", FieldDefault::Absent),
    field("universityId", FieldDefault::Absent),
    field("crewMembers", FieldDefault::EmptyList),
    field("submittedAt", FieldDefault::Absent),
    field("createdAt", FieldDefault::Absent),
    field("lastModified", FieldDefault::Absent),
];

/// Storage object fields -> canonical descriptor fields.
pub const FILE_FIELDS: &[FieldAlias] = &[
    aliased("downloadURL", "url", FieldDefault::EmptyText),
    aliased("fileName", "name", FieldDefault::EmptyText),
    aliased("fileSize", "size", FieldDefault::Zero),
];

/// Crew member entry fields.
pub const CREW_FIELDS: &[FieldAlias] = &[
    aliased("fullName", "name", FieldDefault::EmptyText),
    aliased("fullNameTh", "nameTh", FieldDefault::Absent),
    field("role", FieldDefault::EmptyText),
    field("customRole", FieldDefault::Absent),
    field("age", FieldDefault::Absent),
    field("phone", FieldDefault::Absent),
    field("email", FieldDefault::Absent),
    field("schoolName", FieldDefault::Absent),
    field("studentId", FieldDefault::Absent),
];

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64() != Some(0.0),
        _ => true,
    }
}

/// Look up a present value under `key`.
fn present<'a>(obj: &'a RawRecord, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| is_present(v))
}

/// Resolve `canonical` against `table`: canonical value, legacy value, or the
/// entry's default.
///
/// # Panics
///
/// Panics if `canonical` has no entry in `table`; every lookup in this module
/// uses a key from the table it passes.
fn resolve(obj: &RawRecord, table: &[FieldAlias], canonical: &str) -> Value {
    let alias = table
        .iter()
        .find(|a| a.canonical == canonical)
        .unwrap_or_else(|| panic!("no alias entry for '{canonical}'"));

    present(obj, alias.canonical)
        .or_else(|| alias.legacy.and_then(|legacy| present(obj, legacy)))
        .cloned()
        .unwrap_or_else(|| alias.default.value())
}

fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

fn as_opt_text(value: &Value) -> Option<String> {
    Some(as_text(value)).filter(|s| !s.is_empty())
}

fn as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_u32(value: &Value) -> Option<u32> {
    as_u64(value).and_then(|n| u32::try_from(n).ok())
}

fn as_string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(as_opt_text).collect(),
        _ => Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// Nested structures
// ---------------------------------------------------------------------------

fn file_descriptor(obj: &RawRecord) -> FileDescriptor {
    FileDescriptor {
        url: as_text(&resolve(obj, FILE_FIELDS, "downloadURL")),
        name: as_text(&resolve(obj, FILE_FIELDS, "fileName")),
        size: as_u64(&resolve(obj, FILE_FIELDS, "fileSize")).unwrap_or(0),
    }
}

fn files(raw: &RawRecord) -> ApplicationFiles {
    let files = raw.get("files").and_then(Value::as_object);
    let entry = |key: &str| {
        files
            .and_then(|f| present(f, key))
            .and_then(Value::as_object)
    };

    ApplicationFiles {
        film_file: entry("filmFile").map(file_descriptor).unwrap_or_default(),
        poster_file: entry("posterFile").map(file_descriptor).unwrap_or_default(),
        proof_file: entry("proofFile").map(file_descriptor),
    }
}

fn crew_member(obj: &RawRecord) -> CrewMember {
    let text = |key| as_text(&resolve(obj, CREW_FIELDS, key));
    let opt = |key| as_opt_text(&resolve(obj, CREW_FIELDS, key));

    CrewMember {
        full_name: text("fullName"),
        full_name_th: opt("fullNameTh"),
        role: text("role"),
        custom_role: opt("customRole"),
        age: as_u32(&resolve(obj, CREW_FIELDS, "age")),
        phone: opt("phone"),
        email: opt("email"),
        school_name: opt("schoolName"),
        student_id: opt("studentId"),
    }
}

fn crew_members(raw: &RawRecord) -> Vec<CrewMember> {
    match resolve(raw, APPLICATION_FIELDS, "crewMembers") {
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_object)
            .map(crew_member)
            .collect(),
        _ => Vec::new(),
    }
}

fn status(raw: &RawRecord) -> Result<ApplicationStatus, CoreError> {
    match resolve(raw, APPLICATION_FIELDS, "status") {
        Value::String(s) => ApplicationStatus::from_name(&s),
        other => Err(CoreError::Validation(format!(
            "Application status must be a string, got {other}"
        ))),
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Confirm that `raw` belongs to `current_user`.
pub fn ensure_owner(raw: &RawRecord, record_id: &str, current_user: &str) -> Result<(), CoreError> {
    match raw.get("userId").and_then(Value::as_str) {
        Some(owner) if owner == current_user => Ok(()),
        _ => Err(CoreError::Forbidden(format!(
            "User {current_user} may not access application {record_id}"
        ))),
    }
}

/// Normalize a stored submission for `current_user`.
///
/// - `record == None` fails with [`CoreError::NotFound`].
/// - A record owned by anyone else fails with [`CoreError::Forbidden`].
/// - An unrecognized `status` fails with [`CoreError::Validation`].
///
/// The result depends only on the inputs.
pub fn normalize(
    record: Option<&RawRecord>,
    record_id: &str,
    current_user: &str,
) -> Result<ApplicationView, CoreError> {
    let raw = record.ok_or_else(|| CoreError::NotFound {
        entity: ENTITY_APPLICATION,
        id: record_id.to_string(),
    })?;

    ensure_owner(raw, record_id, current_user)?;

    let get = |key| resolve(raw, APPLICATION_FIELDS, key);
    let text = |key| as_text(&get(key));
    let opt = |key| as_opt_text(&get(key));

    let competition_category = get("competitionCategory")
        .as_str()
        .and_then(|name| CompetitionCategory::from_name(name).ok());

    Ok(ApplicationView {
        id: record_id.to_string(),
        user_id: current_user.to_string(),
        application_id: opt("applicationId").unwrap_or_else(|| record_id.to_string()),
        competition_category,
        status: status(raw)?,
        film_title: text("filmTitle"),
        film_title_th: opt("filmTitleTh"),
        genres: as_string_list(&get("genres")),
        format: text("format"),
        duration: as_u32(&get("duration")).unwrap_or(0),
        synopsis: text("synopsis"),
        chiangmai_connection: opt("chiangmaiConnection"),
        submitter: Submitter {
            name: text("submitterName"),
            name_th: opt("submitterNameTh"),
            age: as_u32(&get("submitterAge")),
            phone: opt("submitterPhone"),
            email: opt("submitterEmail"),
            role: opt("submitterRole"),
            custom_role: opt("submitterCustomRole"),
        },
        education: Education {
            school_name: opt("schoolName"),
            student_id: opt("studentId"),
            university_name: opt("universityName"),
            faculty: opt("faculty"),
            university_id: opt("universityId"),
        },
        crew_members: crew_members(raw),
        files: files(raw),
        submitted_at: parse_timestamp(&get("submittedAt")),
        created_at: parse_timestamp(&get("createdAt")),
        last_modified: parse_timestamp(&get("lastModified")),
    })
}
