//! Application view-model types.
//!
//! [`ApplicationView`] is the reconciled, strongly-shaped form of a stored
//! submission document. It is produced exclusively by
//! [`crate::normalize::normalize`] and consumed by every projection the portal
//! hands to the web client.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;
use crate::types::{RecordId, Timestamp, UserId};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Competition category the film is entered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum CompetitionCategory {
    Youth,
    Future,
    World,
}

impl CompetitionCategory {
    /// All categories in display order.
    pub const ALL: [Self; 3] = [Self::Youth, Self::Future, Self::World];

    /// Parse from the stored field value.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "youth" => Ok(Self::Youth),
            "future" => Ok(Self::Future),
            "world" => Ok(Self::World),
            other => Err(CoreError::Validation(format!(
                "Unknown competition category '{other}'"
            ))),
        }
    }

    /// Stored field value.
    pub fn name(self) -> &'static str {
        match self {
            Self::Youth => "youth",
            Self::Future => "future",
            Self::World => "world",
        }
    }
}

/// Submission lifecycle status. `Draft -> Submitted` is one-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum ApplicationStatus {
    Draft,
    Submitted,
}

impl ApplicationStatus {
    /// Parse from the stored field value.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "draft" => Ok(Self::Draft),
            "submitted" => Ok(Self::Submitted),
            other => Err(CoreError::Validation(format!(
                "Unknown application status '{other}'"
            ))),
        }
    }

    /// Stored field value.
    pub fn name(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
        }
    }

    /// Only drafts may be edited, saved, submitted or deleted.
    pub fn is_mutable(self) -> bool {
        self == Self::Draft
    }
}

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

/// Canonical descriptor of an uploaded object.
///
/// Storage documents use `downloadURL` / `fileName` / `fileSize`; the
/// normalizer maps them onto this shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FileDescriptor {
    pub url: String,
    pub name: String,
    #[ts(type = "number")]
    pub size: u64,
}

impl FileDescriptor {
    /// `true` for the placeholder substituted when storage has no file.
    pub fn is_empty(&self) -> bool {
        self.url.is_empty() && self.name.is_empty() && self.size == 0
    }
}

/// The files attached to a submission.
///
/// `film_file` and `poster_file` are always present (possibly empty);
/// `proof_file` stays absent when storage has none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ApplicationFiles {
    pub film_file: FileDescriptor,
    pub poster_file: FileDescriptor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub proof_file: Option<FileDescriptor>,
}

// ---------------------------------------------------------------------------
// People
// ---------------------------------------------------------------------------

/// The person who filed the submission (stored as `submitter*` or the older
/// `director*` fields).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Submitter {
    pub name: String,
    pub name_th: Option<String>,
    pub age: Option<u32>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub custom_role: Option<String>,
}

/// School or university details. Which fields are filled depends on the
/// competition category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Education {
    pub school_name: Option<String>,
    pub student_id: Option<String>,
    pub university_name: Option<String>,
    pub faculty: Option<String>,
    pub university_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CrewMember {
    pub full_name: String,
    pub full_name_th: Option<String>,
    pub role: String,
    pub custom_role: Option<String>,
    pub age: Option<u32>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub school_name: Option<String>,
    pub student_id: Option<String>,
}

// ---------------------------------------------------------------------------
// View
// ---------------------------------------------------------------------------

/// The reconciled view of one submission, as seen by its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ApplicationView {
    pub id: RecordId,
    pub user_id: UserId,
    pub application_id: String,
    pub competition_category: Option<CompetitionCategory>,
    pub status: ApplicationStatus,
    pub film_title: String,
    pub film_title_th: Option<String>,
    pub genres: Vec<String>,
    pub format: String,
    pub duration: u32,
    pub synopsis: String,
    pub chiangmai_connection: Option<String>,
    pub submitter: Submitter,
    pub education: Education,
    pub crew_members: Vec<CrewMember>,
    pub files: ApplicationFiles,
    pub submitted_at: Option<Timestamp>,
    pub created_at: Option<Timestamp>,
    pub last_modified: Option<Timestamp>,
}

impl ApplicationView {
    pub fn is_draft(&self) -> bool {
        self.status == ApplicationStatus::Draft
    }
}
