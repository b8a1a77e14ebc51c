//! Action gating and the detail-page state machine.
//!
//! Drafts are the only mutable records: edit, save, submit and delete are all
//! refused for a submitted application before any store access happens.
//! Submit and delete additionally require an explicit confirmation.
//!
//! [`DetailPage`] replaces ad-hoc `loading` / `editing` / `processing` flags
//! with two small state machines, `PageState` for the fetch lifecycle and
//! `ActionState` for the single mutating action allowed at a time.

use serde::Serialize;

use crate::application::{ApplicationStatus, ApplicationView};
use crate::error::CoreError;
use crate::i18n::MessageKey;

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    EditToggle,
    SaveDraft,
    Submit,
    Delete,
}

impl Action {
    pub fn name(self) -> &'static str {
        match self {
            Self::EditToggle => "edit",
            Self::SaveDraft => "save",
            Self::Submit => "submit",
            Self::Delete => "delete",
        }
    }

    /// Submit and delete are irreversible and must be confirmed by the user.
    pub fn requires_confirmation(self) -> bool {
        matches!(self, Self::Submit | Self::Delete)
    }

    /// Whether the action writes to the record store.
    pub fn persists(self) -> bool {
        !matches!(self, Self::EditToggle)
    }

    /// The question put to the user before an irreversible action.
    pub fn confirmation_prompt(self) -> Option<MessageKey> {
        match self {
            Self::Submit => Some(MessageKey::ConfirmSubmit),
            Self::Delete => Some(MessageKey::ConfirmDelete),
            Self::EditToggle | Self::SaveDraft => None,
        }
    }

    /// Message shown when the store rejects this action.
    pub fn failure_message(self) -> MessageKey {
        match self {
            Self::EditToggle => MessageKey::NotEditable,
            Self::SaveDraft => MessageKey::SaveFailed,
            Self::Submit => MessageKey::SubmitFailed,
            Self::Delete => MessageKey::DeleteFailed,
        }
    }
}

/// Refuse `action` unless the record is still a draft.
pub fn ensure_permitted(status: ApplicationStatus, action: Action) -> Result<(), CoreError> {
    if status.is_mutable() {
        Ok(())
    } else {
        Err(CoreError::Conflict(format!(
            "Cannot {} an application with status '{}'",
            action.name(),
            status.name()
        )))
    }
}

/// Refuse an irreversible action that was not confirmed.
pub fn ensure_confirmed(action: Action, confirmed: bool) -> Result<(), CoreError> {
    if action.requires_confirmation() && !confirmed {
        Err(CoreError::ConfirmationRequired {
            action: action.name(),
        })
    } else {
        Ok(())
    }
}

/// Map a domain error to the message the page displays.
///
/// `action` is the mutation that failed, or `None` for the initial fetch.
pub fn message_for(err: &CoreError, action: Option<Action>) -> MessageKey {
    match err {
        CoreError::NotFound { .. } => MessageKey::NotFound,
        CoreError::Forbidden(_) => MessageKey::PermissionDenied,
        CoreError::Unauthorized(_) => MessageKey::SignInRequired,
        CoreError::Validation(_) => MessageKey::InvalidInput,
        CoreError::Conflict(_) => MessageKey::NotEditable,
        CoreError::ConfirmationRequired { .. } => action
            .and_then(Action::confirmation_prompt)
            .unwrap_or(MessageKey::ConfirmationRequired),
        CoreError::Internal(_) => action.map_or(MessageKey::LoadFailed, Action::failure_message),
    }
}

// ---------------------------------------------------------------------------
// State machines
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    Idle,
    Loading,
    Ready { editing: bool },
    Error(MessageKey),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionState {
    Idle,
    InFlight(Action),
}

impl ActionState {
    pub fn is_in_flight(self) -> bool {
        matches!(self, Self::InFlight(_))
    }
}

/// Which controls the client may render for the current state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Affordances {
    pub editing: bool,
    pub processing: bool,
    pub can_edit: bool,
    pub can_save: bool,
    pub can_submit: bool,
    pub can_delete: bool,
}

impl Affordances {
    /// The same controls while an action on the record is running elsewhere.
    pub fn with_processing(self) -> Self {
        Self {
            editing: self.editing,
            processing: true,
            ..Self::default()
        }
    }
}

/// Lifecycle of one application detail page.
///
/// Mutations are only accepted once a view is loaded, so the fetch always
/// precedes any write issued from the page.
#[derive(Debug, Clone)]
pub struct DetailPage {
    state: PageState,
    action: ActionState,
    view: Option<ApplicationView>,
}

impl Default for DetailPage {
    fn default() -> Self {
        Self::new()
    }
}

impl DetailPage {
    pub fn new() -> Self {
        Self {
            state: PageState::Idle,
            action: ActionState::Idle,
            view: None,
        }
    }

    /// A page already holding `view`.
    pub fn loaded(view: ApplicationView) -> Self {
        let mut page = Self::new();
        page.begin_load();
        page.finish_load(Ok(view));
        page
    }

    pub fn state(&self) -> PageState {
        self.state
    }

    pub fn action(&self) -> ActionState {
        self.action
    }

    pub fn view(&self) -> Option<&ApplicationView> {
        self.view.as_ref()
    }

    pub fn into_view(self) -> Option<ApplicationView> {
        self.view
    }

    pub fn begin_load(&mut self) {
        self.state = PageState::Loading;
        self.action = ActionState::Idle;
        self.view = None;
    }

    pub fn finish_load(&mut self, result: Result<ApplicationView, CoreError>) {
        match result {
            Ok(view) => {
                self.view = Some(view);
                self.state = PageState::Ready { editing: false };
            }
            Err(err) => {
                self.view = None;
                self.state = PageState::Error(message_for(&err, None));
            }
        }
    }

    fn ready_draft(&self, action: Action) -> Result<&ApplicationView, CoreError> {
        let view = match (self.state, &self.view) {
            (PageState::Ready { .. }, Some(view)) => view,
            _ => {
                return Err(CoreError::Conflict(format!(
                    "Cannot {} before the application is loaded",
                    action.name()
                )))
            }
        };
        ensure_permitted(view.status, action)?;
        Ok(view)
    }

    /// Flip edit mode. Returns the new editing flag.
    pub fn toggle_edit(&mut self) -> Result<bool, CoreError> {
        self.ready_draft(Action::EditToggle)?;
        let PageState::Ready { editing } = self.state else {
            unreachable!("ready_draft guarantees a ready page");
        };
        self.state = PageState::Ready { editing: !editing };
        Ok(!editing)
    }

    /// Enter `InFlight` for a persisting action.
    ///
    /// Rejected while another action is in flight, for unconfirmed
    /// irreversible actions, and for non-draft records.
    pub fn begin_action(&mut self, action: Action, confirmed: bool) -> Result<(), CoreError> {
        if !action.persists() {
            return Err(CoreError::Internal(format!(
                "'{}' is not a persisting action",
                action.name()
            )));
        }
        if let ActionState::InFlight(current) = self.action {
            return Err(CoreError::Conflict(format!(
                "Cannot {} while {} is in progress",
                action.name(),
                current.name()
            )));
        }
        self.ready_draft(action)?;
        ensure_confirmed(action, confirmed)?;
        self.action = ActionState::InFlight(action);
        Ok(())
    }

    /// Leave `InFlight`.
    ///
    /// On success the refreshed view replaces the current one (`None` after a
    /// delete) and edit mode ends. On failure everything else is left as it
    /// was so the user can retry.
    pub fn finish_action(&mut self, result: Result<Option<ApplicationView>, CoreError>) {
        let ActionState::InFlight(action) = self.action else {
            return;
        };
        self.action = ActionState::Idle;

        if let Ok(view) = result {
            match view {
                Some(view) => {
                    self.view = Some(view);
                    self.state = PageState::Ready { editing: false };
                }
                None if action == Action::Delete => {
                    self.view = None;
                    self.state = PageState::Idle;
                }
                None => {}
            }
        }
    }

    pub fn affordances(&self) -> Affordances {
        let (PageState::Ready { editing }, Some(view)) = (self.state, &self.view) else {
            return Affordances::default();
        };
        let processing = self.action.is_in_flight();
        let mutable = view.status.is_mutable() && !processing;

        Affordances {
            editing,
            processing,
            can_edit: mutable,
            can_save: mutable && editing,
            can_submit: mutable,
            can_delete: mutable,
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;
    use crate::normalize::normalize;

    fn view(status: &str) -> ApplicationView {
        let raw = json!({"userId": "u1", "filmTitle": "X", "status": status});
        normalize(raw.as_object(), "doc-1", "u1").unwrap()
    }

    #[test]
    fn only_drafts_are_permitted() {
        assert!(ensure_permitted(ApplicationStatus::Draft, Action::Submit).is_ok());
        assert_matches!(
            ensure_permitted(ApplicationStatus::Submitted, Action::Submit),
            Err(CoreError::Conflict(_))
        );
        assert_matches!(
            ensure_permitted(ApplicationStatus::Submitted, Action::Delete),
            Err(CoreError::Conflict(_))
        );
    }

    #[test]
    fn irreversible_actions_need_confirmation() {
        assert_matches!(
            ensure_confirmed(Action::Submit, false),
            Err(CoreError::ConfirmationRequired { action: "submit" })
        );
        assert_matches!(
            ensure_confirmed(Action::Delete, false),
            Err(CoreError::ConfirmationRequired { action: "delete" })
        );
        assert!(ensure_confirmed(Action::SaveDraft, false).is_ok());
        assert!(ensure_confirmed(Action::Submit, true).is_ok());
    }

    #[test]
    fn load_failure_records_message() {
        let mut page = DetailPage::new();
        page.begin_load();
        assert_eq!(page.state(), PageState::Loading);

        page.finish_load(Err(CoreError::Forbidden("nope".into())));
        assert_eq!(page.state(), PageState::Error(MessageKey::PermissionDenied));
        assert!(page.view().is_none());
        assert_eq!(page.affordances(), Affordances::default());
    }

    #[test]
    fn edit_toggle_only_on_drafts() {
        let mut page = DetailPage::loaded(view("draft"));
        assert!(page.toggle_edit().unwrap());
        assert_eq!(page.state(), PageState::Ready { editing: true });
        assert!(!page.toggle_edit().unwrap());

        let mut submitted = DetailPage::loaded(view("submitted"));
        assert_matches!(submitted.toggle_edit(), Err(CoreError::Conflict(_)));
        assert_eq!(submitted.state(), PageState::Ready { editing: false });
    }

    #[test]
    fn edit_toggle_requires_loaded_page() {
        let mut page = DetailPage::new();
        assert_matches!(page.toggle_edit(), Err(CoreError::Conflict(_)));
    }

    #[test]
    fn second_action_is_rejected_while_in_flight() {
        let mut page = DetailPage::loaded(view("draft"));
        page.begin_action(Action::Submit, true).unwrap();
        assert!(page.affordances().processing);
        assert!(!page.affordances().can_submit);

        assert_matches!(
            page.begin_action(Action::Submit, true),
            Err(CoreError::Conflict(_))
        );
    }

    #[test]
    fn failed_action_leaves_state_for_retry() {
        let mut page = DetailPage::loaded(view("draft"));
        page.toggle_edit().unwrap();
        page.begin_action(Action::SaveDraft, false).unwrap();
        page.finish_action(Err(CoreError::Internal("store down".into())));

        assert_eq!(page.action(), ActionState::Idle);
        assert_eq!(page.state(), PageState::Ready { editing: true });
        assert!(page.begin_action(Action::SaveDraft, false).is_ok());
    }

    #[test]
    fn successful_submit_replaces_view() {
        let mut page = DetailPage::loaded(view("draft"));
        page.begin_action(Action::Submit, true).unwrap();
        page.finish_action(Ok(Some(view("submitted"))));

        let affordances = page.affordances();
        assert!(!affordances.can_edit);
        assert!(!affordances.can_delete);
        assert_matches!(
            page.begin_action(Action::Delete, true),
            Err(CoreError::Conflict(_))
        );
    }

    #[test]
    fn delete_clears_the_page() {
        let mut page = DetailPage::loaded(view("draft"));
        page.begin_action(Action::Delete, true).unwrap();
        page.finish_action(Ok(None));
        assert_eq!(page.state(), PageState::Idle);
        assert!(page.view().is_none());
    }

    #[test]
    fn unconfirmed_submit_does_not_enter_flight() {
        let mut page = DetailPage::loaded(view("draft"));
        assert_matches!(
            page.begin_action(Action::Submit, false),
            Err(CoreError::ConfirmationRequired { .. })
        );
        assert_eq!(page.action(), ActionState::Idle);
    }

    #[test]
    fn processing_elsewhere_disables_every_control() {
        let mut page = DetailPage::loaded(view("draft"));
        page.toggle_edit().unwrap();
        let affordances = page.affordances().with_processing();
        assert!(affordances.editing);
        assert!(affordances.processing);
        assert!(!affordances.can_save && !affordances.can_submit && !affordances.can_delete);
    }

    #[test]
    fn unconfirmed_action_asks_its_own_question() {
        let err = CoreError::ConfirmationRequired { action: "delete" };
        assert_eq!(
            message_for(&err, Some(Action::Delete)),
            MessageKey::ConfirmDelete
        );
        assert_eq!(
            message_for(&err, Some(Action::Submit)),
            MessageKey::ConfirmSubmit
        );
        assert_eq!(message_for(&err, None), MessageKey::ConfirmationRequired);
    }

    #[test]
    fn internal_errors_map_to_action_messages() {
        let err = CoreError::Internal("boom".into());
        assert_eq!(message_for(&err, None), MessageKey::LoadFailed);
        assert_eq!(
            message_for(&err, Some(Action::Submit)),
            MessageKey::SubmitFailed
        );
    }
}
