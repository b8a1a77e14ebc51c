//! Localized text for the portal (`en` and `th`).
//!
//! Every user-visible string is taken from the [`Content`] dictionary of the
//! active [`Locale`]. The normalizer and the action layer never embed display
//! text; they report [`MessageKey`]s which are resolved here.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::application::{ApplicationStatus, CompetitionCategory};
use crate::types::Timestamp;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Th,
}

impl Locale {
    /// Parse a language tag (`th`, `th-TH`, `en-US`, ...). Unknown tags are `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let primary = tag.trim().split(['-', '_']).next()?.to_ascii_lowercase();
        match primary.as_str() {
            "en" => Some(Self::En),
            "th" => Some(Self::Th),
            _ => None,
        }
    }

    /// Pick the first supported language from an `Accept-Language` header value.
    pub fn from_accept_language(header: &str) -> Option<Self> {
        header
            .split(',')
            .map(|part| part.split(';').next().unwrap_or(""))
            .find_map(Self::from_tag)
    }

    pub fn content(self) -> &'static Content {
        match self {
            Self::En => &EN,
            Self::Th => &TH,
        }
    }
}

/// Identifies a user-facing message independently of the locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    PermissionDenied,
    NotFound,
    LoadFailed,
    SaveFailed,
    SubmitFailed,
    DeleteFailed,
    NotEditable,
    ConfirmationRequired,
    ConfirmSubmit,
    ConfirmDelete,
    ActionInProgress,
    InvalidInput,
    SignInRequired,
}

/// One locale's dictionary.
#[derive(Debug)]
pub struct Content {
    draft: &'static str,
    submitted: &'static str,
    category_youth: &'static str,
    category_future: &'static str,
    category_world: &'static str,
    confirm_submit: &'static str,
    confirm_delete: &'static str,
    permission_denied: &'static str,
    not_found: &'static str,
    load_failed: &'static str,
    save_failed: &'static str,
    submit_failed: &'static str,
    delete_failed: &'static str,
    not_editable: &'static str,
    confirmation_required: &'static str,
    action_in_progress: &'static str,
    invalid_input: &'static str,
    sign_in_required: &'static str,
    months: [&'static str; 12],
}

impl Content {
    pub fn message(&self, key: MessageKey) -> &'static str {
        match key {
            MessageKey::PermissionDenied => self.permission_denied,
            MessageKey::NotFound => self.not_found,
            MessageKey::LoadFailed => self.load_failed,
            MessageKey::SaveFailed => self.save_failed,
            MessageKey::SubmitFailed => self.submit_failed,
            MessageKey::DeleteFailed => self.delete_failed,
            MessageKey::NotEditable => self.not_editable,
            MessageKey::ConfirmationRequired => self.confirmation_required,
            MessageKey::ConfirmSubmit => self.confirm_submit,
            MessageKey::ConfirmDelete => self.confirm_delete,
            MessageKey::ActionInProgress => self.action_in_progress,
            MessageKey::InvalidInput => self.invalid_input,
            MessageKey::SignInRequired => self.sign_in_required,
        }
    }

    pub fn category(&self, category: CompetitionCategory) -> &'static str {
        match category {
            CompetitionCategory::Youth => self.category_youth,
            CompetitionCategory::Future => self.category_future,
            CompetitionCategory::World => self.category_world,
        }
    }

    pub fn status(&self, status: ApplicationStatus) -> &'static str {
        match status {
            ApplicationStatus::Draft => self.draft,
            ApplicationStatus::Submitted => self.submitted,
        }
    }
}

pub static EN: Content = Content {
    draft: "Draft",
    submitted: "Submitted",
    category_youth: "Youth Fantastic Short Film Award",
    category_future: "Future Fantastic Short Film Award",
    category_world: "World Fantastic Short Film Award",
    confirm_submit: "Submit this application? Submitted applications can no longer be edited.",
    confirm_delete: "Delete this application? This cannot be undone.",
    permission_denied: "You do not have permission to access this application",
    not_found: "Application not found",
    load_failed: "Error loading application data",
    save_failed: "Could not save your changes. Please try again.",
    submit_failed: "Could not submit your application. Please try again.",
    delete_failed: "Could not delete your application. Please try again.",
    not_editable: "Submitted applications can no longer be changed",
    confirmation_required: "Please confirm this action",
    action_in_progress: "This application is already being processed",
    invalid_input: "Some fields are invalid",
    sign_in_required: "Please sign in to continue",
    months: [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ],
};

pub static TH: Content = Content {
    draft: "ร่าง",
    submitted: "ส่งแล้ว",
    category_youth: "รางวัลหนังสั้นแฟนตาสติกเยาวชน",
    category_future: "รางวัลหนังสั้นแฟนตาสติกอนาคต",
    category_world: "รางวัลหนังสั้นแฟนตาสติกโลก",
    confirm_submit: "ยืนยันการส่งใบสมัคร? ใบสมัครที่ส่งแล้วจะไม่สามารถแก้ไขได้",
    confirm_delete: "ยืนยันการลบใบสมัคร? ไม่สามารถย้อนกลับได้",
    permission_denied: "คุณไม่มีสิทธิ์เข้าถึงใบสมัครนี้",
    not_found: "ไม่พบใบสมัครที่ระบุ",
    load_failed: "เกิดข้อผิดพลาดในการโหลดข้อมูล",
    save_failed: "ไม่สามารถบันทึกการเปลี่ยนแปลงได้ กรุณาลองใหม่อีกครั้ง",
    submit_failed: "ไม่สามารถส่งใบสมัครได้ กรุณาลองใหม่อีกครั้ง",
    delete_failed: "ไม่สามารถลบใบสมัครได้ กรุณาลองใหม่อีกครั้ง",
    not_editable: "ใบสมัครที่ส่งแล้วไม่สามารถแก้ไขได้",
    confirmation_required: "กรุณายืนยันการดำเนินการ",
    action_in_progress: "ใบสมัครนี้กำลังดำเนินการอยู่",
    invalid_input: "ข้อมูลบางช่องไม่ถูกต้อง",
    sign_in_required: "กรุณาเข้าสู่ระบบเพื่อดำเนินการต่อ",
    months: [
        "มกราคม",
        "กุมภาพันธ์",
        "มีนาคม",
        "เมษายน",
        "พฤษภาคม",
        "มิถุนายน",
        "กรกฎาคม",
        "สิงหาคม",
        "กันยายน",
        "ตุลาคม",
        "พฤศจิกายน",
        "ธันวาคม",
    ],
};

/// Thai dates use the Buddhist era.
const BUDDHIST_ERA_OFFSET: i32 = 543;

/// Long-form date for display, e.g. `June 1, 2025` / `1 มิถุนายน 2568`.
pub fn format_date(ts: Timestamp, locale: Locale) -> String {
    let date = ts.date_naive();
    let month = locale.content().months[date.month0() as usize];
    match locale {
        Locale::En => format!("{month} {}, {}", date.day(), date.year()),
        Locale::Th => format!("{} {month} {}", date.day(), date.year() + BUDDHIST_ERA_OFFSET),
    }
}
