//! Add, edit and delete-confirmation modals.
//!
//! These only turn the current draft or target into text; all state changes go through
//! [`crate::state::TestListState`].

use crate::state::{Draft, DraftField};
use api_shared::TestRes;

pub const ADD_TITLE: &str = "Add Test Result";
pub const EDIT_TITLE: &str = "Edit Test Result";
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this test?";

pub fn render_add(draft: &Draft) -> String {
    render_form(ADD_TITLE, draft)
}

pub fn render_edit(draft: &Draft) -> String {
    render_form(EDIT_TITLE, draft)
}

pub fn render_delete_confirmation(test: &TestRes) -> String {
    format!(
        "{DELETE_PROMPT}\n  {} / {} / {}\n  [Yes, Delete] [Cancel]\n",
        test.patient_name, test.test_type, test.test_date
    )
}

fn render_form(title: &str, draft: &Draft) -> String {
    let width = DraftField::ALL
        .iter()
        .map(|f| f.label().len())
        .max()
        .unwrap_or(0);

    let mut out = format!("{title}\n");
    for field in DraftField::ALL {
        out.push_str(&format!("  {:<width$} : {}\n", field.label(), draft.get(field)));
    }
    out
}
