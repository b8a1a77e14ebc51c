//! Navigation targets handed back to the web client.
//!
//! The client routes on hash fragments; the service only names the
//! destination.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::types::RecordId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    MyApplications,
    ApplicationDetail(RecordId),
    ApplicationEdit(RecordId),
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MyApplications => f.write_str("#my-applications"),
            Self::ApplicationDetail(id) => write!(f, "#application-detail/{id}"),
            Self::ApplicationEdit(id) => write!(f, "#application-edit/{id}"),
        }
    }
}

impl Serialize for Route {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_render_as_hash_targets() {
        assert_eq!(Route::MyApplications.to_string(), "#my-applications");
        assert_eq!(
            Route::ApplicationDetail("abc".into()).to_string(),
            "#application-detail/abc"
        );
        assert_eq!(
            serde_json::to_value(Route::ApplicationEdit("abc".into())).unwrap(),
            "#application-edit/abc"
        );
    }
}
