//! Edited field sets written back to the store.
//!
//! Writes always use the canonical field names; legacy aliases are only ever
//! read.

use serde::Deserialize;
use serde_json::{json, Value};
use validator::Validate;

use crate::application::{ApplicationStatus, CrewMember};
use crate::error::CoreError;
use crate::timestamp::to_store_value;
use crate::types::{RawRecord, Timestamp};

/// Longest accepted running time, in minutes.
pub const MAX_DURATION_MINS: u32 = 600;

/// Fields the owner may change while the application is a draft.
/// `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationPatch {
    #[validate(length(min = 1, max = 200))]
    pub film_title: Option<String>,
    #[validate(length(max = 200))]
    pub film_title_th: Option<String>,
    #[validate(length(max = 10))]
    pub genres: Option<Vec<String>>,
    #[validate(length(max = 50))]
    pub format: Option<String>,
    #[validate(range(min = 1, max = MAX_DURATION_MINS))]
    pub duration: Option<u32>,
    #[validate(length(max = 5000))]
    pub synopsis: Option<String>,
    #[validate(length(max = 2000))]
    pub chiangmai_connection: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub submitter_name: Option<String>,
    pub submitter_name_th: Option<String>,
    pub submitter_phone: Option<String>,
    #[validate(email)]
    pub submitter_email: Option<String>,
    pub crew_members: Option<Vec<CrewMember>>,
}

impl ApplicationPatch {
    /// Validate and convert into the stored field set, stamping `lastModified`.
    pub fn into_fields(self, now: Timestamp) -> Result<RawRecord, CoreError> {
        self.validate()
            .map_err(|e| CoreError::Validation(e.to_string()))?;

        let mut fields = RawRecord::new();
        let mut put = |key: &str, value: Option<Value>| {
            if let Some(value) = value {
                fields.insert(key.to_string(), value);
            }
        };

        put("filmTitle", self.film_title.map(Value::from));
        put("filmTitleTh", self.film_title_th.map(Value::from));
        put("genres", self.genres.map(Value::from));
        put("format", self.format.map(Value::from));
        put("duration", self.duration.map(Value::from));
        put("synopsis", self.synopsis.map(Value::from));
        put("chiangmaiConnection", self.chiangmai_connection.map(Value::from));
        put("submitterName", self.submitter_name.map(Value::from));
        put("submitterNameTh", self.submitter_name_th.map(Value::from));
        put("submitterPhone", self.submitter_phone.map(Value::from));
        put("submitterEmail", self.submitter_email.map(Value::from));
        put("crewMembers", self.crew_members.map(|crew| json!(crew)));
        put("lastModified", Some(to_store_value(now)));

        Ok(fields)
    }
}

/// Field set for the one-way `draft -> submitted` transition.
pub fn submission_fields(now: Timestamp) -> RawRecord {
    let mut fields = RawRecord::new();
    fields.insert(
        "status".into(),
        Value::from(ApplicationStatus::Submitted.name()),
    );
    fields.insert("submittedAt".into(), to_store_value(now));
    fields.insert("lastModified".into(), to_store_value(now));
    fields
}
