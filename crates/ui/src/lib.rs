//! # Labtrack UI
//!
//! The test list view: a cached copy of the test collection, the add/edit/delete modals, and
//! the calls that keep both in step with the REST API.
//!
//! - [`state`]: the explicit view state and its pure transitions
//! - [`view`]: the controller that performs requests and applies their results
//! - [`modal`] and [`render`]: text rendering of the list and the open modal
//! - [`api`]: the [`TestsApi`] seam and its HTTP implementation

pub mod api;
pub mod modal;
pub mod render;
pub mod state;
pub mod view;

pub use api::{ApiClientError, HttpTestsApi, TestsApi};
pub use state::{Draft, DraftField, Target, TestListState};
pub use view::TestListView;
