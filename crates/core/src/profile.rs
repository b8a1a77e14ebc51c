//! Submitter profile, edited from the profile page.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::Validate;

use crate::error::CoreError;
use crate::types::{Timestamp, UserId};

/// Digits with an optional leading `+`, 9 to 15 digits long. Spaces and
/// dashes are stripped before matching.
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9]{9,15}$").expect("phone pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UserProfile {
    pub user_id: UserId,
    #[serde(rename = "fullNameEN")]
    pub full_name_en: String,
    #[serde(rename = "fullNameTH")]
    pub full_name_th: Option<String>,
    pub birth_date: NaiveDate,
    pub phone_number: String,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(rename = "fullNameEN")]
    #[validate(length(min = 1, max = 100))]
    pub full_name_en: String,
    #[serde(rename = "fullNameTH")]
    #[validate(length(max = 100))]
    pub full_name_th: Option<String>,
    pub birth_date: NaiveDate,
    pub phone_number: String,
}

fn normalize_phone(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect()
}

impl ProfileUpdate {
    /// Validate and build the stored profile for `user_id`.
    pub fn into_profile(self, user_id: &str, now: Timestamp) -> Result<UserProfile, CoreError> {
        self.validate()
            .map_err(|e| CoreError::Validation(e.to_string()))?;

        let full_name_en = self.full_name_en.trim().to_string();
        if full_name_en.is_empty() {
            return Err(CoreError::Validation("fullNameEN must not be blank".into()));
        }

        if self.birth_date > now.date_naive() {
            return Err(CoreError::Validation(
                "birthDate must not be in the future".into(),
            ));
        }

        let phone_number = normalize_phone(&self.phone_number);
        if !PHONE_PATTERN.is_match(&phone_number) {
            return Err(CoreError::Validation(format!(
                "Invalid phone number '{}'",
                self.phone_number
            )));
        }

        Ok(UserProfile {
            user_id: user_id.to_string(),
            full_name_en,
            full_name_th: self
                .full_name_th
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            birth_date: self.birth_date,
            phone_number,
            updated_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    use super::*;

    fn update() -> ProfileUpdate {
        ProfileUpdate {
            full_name_en: "  Somchai Jaidee ".into(),
            full_name_th: Some("".into()),
            birth_date: NaiveDate::from_ymd_opt(2007, 3, 14).unwrap(),
            phone_number: "081-234 5678".into(),
        }
    }

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn valid_update_is_normalized() {
        let profile = update().into_profile("u1", now()).unwrap();
        assert_eq!(profile.full_name_en, "Somchai Jaidee");
        assert_eq!(profile.full_name_th, None);
        assert_eq!(profile.phone_number, "0812345678");
        assert_eq!(profile.user_id, "u1");
    }

    #[test]
    fn future_birth_date_is_rejected() {
        let mut input = update();
        input.birth_date = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        assert_matches!(
            input.into_profile("u1", now()),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn bad_phone_is_rejected() {
        let mut input = update();
        input.phone_number = "call me".into();
        assert!(input.into_profile("u1", now()).is_err());
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut input = update();
        input.full_name_en = "   ".into();
        assert!(input.into_profile("u1", now()).is_err());
    }

    #[test]
    fn serializes_with_original_field_names() {
        let profile = update().into_profile("u1", now()).unwrap();
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["fullNameEN"], "Somchai Jaidee");
        assert!(json.get("fullNameTH").is_some());
        assert_eq!(json["birthDate"], "2007-03-14");
    }
}
