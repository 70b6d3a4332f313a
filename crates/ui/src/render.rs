//! Plain-text rendering of the test list view.

use crate::modal;
use crate::state::{Target, TestListState};
use api_shared::TestRes;

pub const TITLE: &str = "Test Results";

const HEADERS: [&str; 6] = [
    "ID",
    "Patient Name",
    "Test Type",
    "Result",
    "Test Date",
    "Notes",
];

/// Render the list, followed by whichever modal is open.
///
/// Rows appear in the cached collection's order.
pub fn render(state: &TestListState) -> String {
    let mut out = format!("{TITLE}\n\n");
    out.push_str(&render_table(&state.tests));

    if state.add_open {
        out.push('\n');
        out.push_str(&modal::render_add(&state.draft));
    }
    match &state.target {
        Target::None => {}
        Target::Editing(_) => {
            out.push('\n');
            out.push_str(&modal::render_edit(&state.draft));
        }
        Target::Deleting(test) => {
            out.push('\n');
            out.push_str(&modal::render_delete_confirmation(test));
        }
    }
    out
}

fn cells(test: &TestRes) -> [&str; 6] {
    [
        &test.id,
        &test.patient_name,
        &test.test_type,
        &test.result,
        &test.test_date,
        &test.notes,
    ]
}

pub fn render_table(tests: &[TestRes]) -> String {
    let mut widths = HEADERS.map(|h| h.chars().count());
    for test in tests {
        for (width, cell) in widths.iter_mut().zip(cells(test)) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = render_row(&HEADERS, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("-+-"));
    out.push('\n');
    for test in tests {
        out.push_str(&render_row(&cells(test), &widths));
    }
    if tests.is_empty() {
        out.push_str("(no test results)\n");
    }
    out
}

fn render_row(cells: &[&str; 6], widths: &[usize; 6]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    format!("{}\n", padded.join(" | ").trim_end())
}
