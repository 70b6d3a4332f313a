//! State of the test list view.
//!
//! [`TestListState`] is a plain value. Every transition is a method that only touches the
//! state itself, so the list, modal and draft logic can be tested without a backend or a
//! renderer. Network calls live in [`crate::view::TestListView`], which applies these
//! transitions once a response arrives.

use api_shared::{TestReq, TestRes};
use std::str::FromStr;

/// The record an edit or delete is currently targeting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Target {
    #[default]
    None,
    /// The edit modal is open for this record.
    Editing(TestRes),
    /// The delete confirmation is open for this record.
    Deleting(TestRes),
}

/// A form field of the add/edit modals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    PatientName,
    TestType,
    Result,
    TestDate,
    Notes,
}

impl DraftField {
    pub const ALL: [DraftField; 5] = [
        DraftField::PatientName,
        DraftField::TestType,
        DraftField::Result,
        DraftField::TestDate,
        DraftField::Notes,
    ];

    /// Wire name of the field, also used as the form input name.
    pub fn name(self) -> &'static str {
        match self {
            DraftField::PatientName => "patientName",
            DraftField::TestType => "testType",
            DraftField::Result => "result",
            DraftField::TestDate => "testDate",
            DraftField::Notes => "notes",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DraftField::PatientName => "Patient Name",
            DraftField::TestType => "Test Type",
            DraftField::Result => "Result",
            DraftField::TestDate => "Test Date",
            DraftField::Notes => "Notes",
        }
    }
}

impl FromStr for DraftField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DraftField::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| format!("unknown form field: '{}'", s))
    }
}

/// In-progress field values for a record being created or edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub patient_name: String,
    pub test_type: String,
    pub result: String,
    /// Empty means "now" when creating.
    pub test_date: String,
    pub notes: String,
}

impl Draft {
    pub fn from_record(test: &TestRes) -> Self {
        Self {
            patient_name: test.patient_name.clone(),
            test_type: test.test_type.clone(),
            result: test.result.clone(),
            test_date: test.test_date.clone(),
            notes: test.notes.clone(),
        }
    }

    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::PatientName => &self.patient_name,
            DraftField::TestType => &self.test_type,
            DraftField::Result => &self.result,
            DraftField::TestDate => &self.test_date,
            DraftField::Notes => &self.notes,
        }
    }

    pub fn set(&mut self, field: DraftField, value: String) {
        let slot = match field {
            DraftField::PatientName => &mut self.patient_name,
            DraftField::TestType => &mut self.test_type,
            DraftField::Result => &mut self.result,
            DraftField::TestDate => &mut self.test_date,
            DraftField::Notes => &mut self.notes,
        };
        *slot = value;
    }

    /// Build the request body for this draft.
    ///
    /// A blank test date is replaced with `now`; the other fields are sent as typed and left
    /// for the server to validate.
    pub fn to_request(&self, now: impl FnOnce() -> String) -> TestReq {
        let test_date = if self.test_date.trim().is_empty() {
            now()
        } else {
            self.test_date.clone()
        };

        TestReq {
            patient_name: Some(self.patient_name.clone()),
            test_type: Some(self.test_type.clone()),
            result: Some(self.result.clone()),
            test_date: Some(test_date),
            notes: Some(self.notes.clone()),
        }
    }
}

/// Everything the test list view renders from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestListState {
    /// Cached copy of the collection, in the order the server returned it.
    pub tests: Vec<TestRes>,
    pub add_open: bool,
    pub target: Target,
    pub draft: Draft,
}

impl TestListState {
    /// Replace the cached collection with a freshly fetched one.
    pub fn loaded(&mut self, tests: Vec<TestRes>) {
        self.tests = tests;
    }

    pub fn find(&self, id: &str) -> Option<&TestRes> {
        self.tests.iter().find(|t| t.id == id)
    }

    pub fn open_add(&mut self) {
        if matches!(self.target, Target::Editing(_)) {
            self.draft = Draft::default();
        }
        self.target = Target::None;
        self.add_open = true;
    }

    /// Seed the draft from the cached record and open the edit modal.
    ///
    /// Returns `false` (and changes nothing) if no cached record has this ID.
    pub fn open_edit(&mut self, id: &str) -> bool {
        let Some(test) = self.find(id).cloned() else {
            return false;
        };
        self.add_open = false;
        self.draft = Draft::from_record(&test);
        self.target = Target::Editing(test);
        true
    }

    /// Open the delete confirmation for the cached record.
    ///
    /// Returns `false` (and changes nothing) if no cached record has this ID.
    pub fn open_delete(&mut self, id: &str) -> bool {
        let Some(test) = self.find(id).cloned() else {
            return false;
        };
        if matches!(self.target, Target::Editing(_)) {
            self.draft = Draft::default();
        }
        self.add_open = false;
        self.target = Target::Deleting(test);
        true
    }

    /// Update one field of the draft.
    pub fn input(&mut self, field: DraftField, value: String) {
        self.draft.set(field, value);
    }

    /// Close whatever modal or confirmation is open.
    ///
    /// A create draft survives closing the add modal; a draft seeded for an edit does not.
    pub fn cancel(&mut self) {
        if matches!(self.target, Target::Editing(_)) {
            self.draft = Draft::default();
        }
        self.add_open = false;
        self.target = Target::None;
    }

    /// Append a record the server just created.
    pub fn created(&mut self, test: TestRes) {
        self.tests.push(test);
        self.add_open = false;
        self.draft = Draft::default();
    }

    /// Replace the cached record with the same ID as `test`.
    pub fn updated(&mut self, test: TestRes) {
        if let Some(slot) = self.tests.iter_mut().find(|t| t.id == test.id) {
            *slot = test;
        }
        self.target = Target::None;
        self.draft = Draft::default();
    }

    /// Drop the cached record with this ID.
    pub fn deleted(&mut self, id: &str) {
        self.tests.retain(|t| t.id != id);
        self.target = Target::None;
    }

    pub fn editing(&self) -> Option<&TestRes> {
        match &self.target {
            Target::Editing(test) => Some(test),
            _ => None,
        }
    }

    pub fn deleting(&self) -> Option<&TestRes> {
        match &self.target {
            Target::Deleting(test) => Some(test),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, patient: &str) -> TestRes {
        TestRes {
            id: id.into(),
            patient_name: patient.into(),
            test_type: "Urinalysis".into(),
            result: "Clear".into(),
            test_date: "2024-01-15T09:00:00.000Z".into(),
            notes: String::new(),
        }
    }

    fn loaded_state() -> TestListState {
        let mut state = TestListState::default();
        state.loaded(vec![record("a1", "Ada"), record("b2", "Grace")]);
        state
    }

    #[test]
    fn test_draft_field_names_round_trip() {
        for field in DraftField::ALL {
            assert_eq!(field.name().parse::<DraftField>(), Ok(field));
        }
        assert!("dob".parse::<DraftField>().is_err());
    }

    #[test]
    fn test_blank_draft_date_uses_now() {
        let draft = Draft {
            patient_name: "Ada".into(),
            ..Draft::default()
        };

        let req = draft.to_request(|| "2024-07-01T12:00:00.000Z".into());

        assert_eq!(req.patient_name.as_deref(), Some("Ada"));
        assert_eq!(req.test_date.as_deref(), Some("2024-07-01T12:00:00.000Z"));
    }

    #[test]
    fn test_open_edit_seeds_draft_from_record() {
        let mut state = loaded_state();

        assert!(state.open_edit("b2"));

        assert_eq!(state.editing().map(|t| t.id.as_str()), Some("b2"));
        assert_eq!(state.draft.patient_name, "Grace");
        assert_eq!(state.draft.test_date, "2024-01-15T09:00:00.000Z");
        assert!(!state.add_open);
    }

    #[test]
    fn test_open_edit_unknown_id_changes_nothing() {
        let mut state = loaded_state();
        let before = state.clone();

        assert!(!state.open_edit("zz"));
        assert!(!state.open_delete("zz"));
        assert_eq!(state, before);
    }

    #[test]
    fn test_cancel_edit_discards_seeded_draft_but_keeps_create_draft() {
        let mut state = loaded_state();
        state.open_add();
        state.input(DraftField::PatientName, "Katherine".into());
        state.cancel();
        assert_eq!(state.draft.patient_name, "Katherine");

        state.open_edit("a1");
        state.cancel();
        assert_eq!(state.draft, Draft::default());
        assert_eq!(state.target, Target::None);
    }

    #[test]
    fn test_created_appends_and_resets() {
        let mut state = loaded_state();
        state.open_add();
        state.input(DraftField::Result, "Positive".into());

        state.created(record("c3", "Katherine"));

        assert_eq!(state.tests.len(), 3);
        assert_eq!(state.tests[2].id, "c3");
        assert!(!state.add_open);
        assert_eq!(state.draft, Draft::default());
    }

    #[test]
    fn test_updated_replaces_by_id_in_place() {
        let mut state = loaded_state();
        state.open_edit("a1");

        state.updated(record("a1", "Ada Lovelace"));

        assert_eq!(state.tests[0].patient_name, "Ada Lovelace");
        assert_eq!(state.tests[1].patient_name, "Grace");
        assert_eq!(state.target, Target::None);
    }

    #[test]
    fn test_deleted_removes_by_id() {
        let mut state = loaded_state();
        state.open_delete("a1");

        state.deleted("a1");

        assert_eq!(state.tests.len(), 1);
        assert!(state.find("a1").is_none());
        assert_eq!(state.deleting(), None);
    }
}
