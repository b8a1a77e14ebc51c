//! "My applications" listing: filtering, ordering and card projection.

use std::cmp::Reverse;

use serde::Serialize;
use serde_json::Value;
use ts_rs::TS;

use crate::application::{ApplicationStatus, ApplicationView, CompetitionCategory};
use crate::i18n::{format_date, Locale};
use crate::navigation::Route;
use crate::types::RawRecord;

/// Fields a stored record must carry to appear in the listing.
const REQUIRED_FIELDS: &[&[&str]] = &[
    &["filmTitle"],
    &["competitionCategory", "category"],
    &["files"],
];

/// Whether a stored record has enough data to be listed.
///
/// Records missing a title, a category (under either name) or a files block
/// are half-created drafts and are skipped.
pub fn is_listable(raw: &RawRecord) -> bool {
    REQUIRED_FIELDS.iter().all(|keys| {
        keys.iter().any(|key| match raw.get(*key) {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.is_empty(),
            Some(_) => true,
        })
    })
}

/// Order views by `last_modified`, newest first. Views without a timestamp
/// sort last; ties keep their input order.
pub fn sort_by_last_modified_desc(views: &mut [ApplicationView]) {
    views.sort_by_key(|view| Reverse(view.last_modified));
}

/// One listing entry, with display text in the request locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ApplicationCard {
    pub id: String,
    pub title: String,
    pub status: ApplicationStatus,
    pub status_label: String,
    pub competition_category: Option<CompetitionCategory>,
    pub category_label: Option<String>,
    pub poster_url: String,
    pub genres: Vec<String>,
    pub format: String,
    pub duration: u32,
    pub last_modified: Option<String>,
    pub submitted_at: Option<String>,
    pub link: String,
    /// Edit page target, only for drafts.
    pub edit_link: Option<String>,
}

impl ApplicationCard {
    pub fn from_view(view: &ApplicationView, locale: Locale) -> Self {
        let content = locale.content();
        let title = match (&view.film_title_th, locale) {
            (Some(th), Locale::Th) => th.clone(),
            _ => view.film_title.clone(),
        };

        Self {
            id: view.id.clone(),
            title,
            status: view.status,
            status_label: content.status(view.status).to_string(),
            competition_category: view.competition_category,
            category_label: view
                .competition_category
                .map(|c| content.category(c).to_string()),
            poster_url: view.files.poster_file.url.clone(),
            genres: view.genres.clone(),
            format: view.format.clone(),
            duration: view.duration,
            last_modified: view.last_modified.map(|ts| format_date(ts, locale)),
            submitted_at: view.submitted_at.map(|ts| format_date(ts, locale)),
            link: Route::ApplicationDetail(view.id.clone()).to_string(),
            edit_link: view
                .is_draft()
                .then(|| Route::ApplicationEdit(view.id.clone()).to_string()),
        }
    }
}
