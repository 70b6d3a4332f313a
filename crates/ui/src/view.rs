//! The test list view controller.
//!
//! [`TestListView`] pairs a [`TestListState`] with a [`TestsApi`]. Each user action issues at
//! most one request; the cached collection is only changed after the server confirms. Failures
//! are logged and leave the state exactly as it was.

use crate::api::{ApiClientError, TestsApi};
use crate::render;
use crate::state::{DraftField, TestListState};
use chrono::{SecondsFormat, Utc};

pub struct TestListView<A> {
    api: A,
    state: TestListState,
    mounted: bool,
}

impl<A: TestsApi> TestListView<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: TestListState::default(),
            mounted: false,
        }
    }

    pub fn state(&self) -> &TestListState {
        &self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Fetch the collection once.
    ///
    /// Later calls do nothing. A failed fetch is logged and leaves the list empty.
    pub async fn mount(&mut self) -> Result<(), ApiClientError> {
        if self.mounted {
            return Ok(());
        }
        self.mounted = true;

        match self.api.list().await {
            Ok(tests) => {
                tracing::debug!("fetched {} test results", tests.len());
                self.state.loaded(tests);
                Ok(())
            }
            Err(e) => {
                tracing::error!("Error fetching test results: {}", e);
                Err(e)
            }
        }
    }

    pub fn open_add(&mut self) {
        self.state.open_add();
    }

    pub fn open_edit(&mut self, id: &str) -> bool {
        self.state.open_edit(id)
    }

    pub fn open_delete(&mut self, id: &str) -> bool {
        self.state.open_delete(id)
    }

    pub fn input(&mut self, field: DraftField, value: impl Into<String>) {
        self.state.input(field, value.into());
    }

    pub fn cancel(&mut self) {
        self.state.cancel();
    }

    /// Send the draft as a new record.
    ///
    /// On success the server's copy (with its ID and normalised date) is appended to the list.
    pub async fn submit_create(&mut self) -> Result<(), ApiClientError> {
        let req = self
            .state
            .draft
            .to_request(|| Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));

        match self.api.create(&req).await {
            Ok(created) => {
                tracing::info!("added test result {}", created.id);
                self.state.created(created);
                Ok(())
            }
            Err(e) => {
                tracing::error!("Error adding test: {}", e);
                Err(e)
            }
        }
    }

    /// Send the draft as a replacement for the record being edited.
    ///
    /// Does nothing if no edit is in progress.
    pub async fn submit_edit(&mut self) -> Result<(), ApiClientError> {
        let Some(id) = self.state.editing().map(|t| t.id.clone()) else {
            tracing::warn!("submit_edit called with no test selected for editing");
            return Ok(());
        };
        let req = self.state.draft.to_request(String::new);

        match self.api.update(&id, &req).await {
            Ok(updated) => {
                tracing::info!("updated test result {}", updated.id);
                self.state.updated(updated);
                Ok(())
            }
            Err(e) => {
                tracing::error!("Error updating test: {}", e);
                Err(e)
            }
        }
    }

    /// Delete the record awaiting confirmation.
    ///
    /// Does nothing if no delete confirmation is open.
    pub async fn confirm_delete(&mut self) -> Result<(), ApiClientError> {
        let Some(id) = self.state.deleting().map(|t| t.id.clone()) else {
            tracing::warn!("confirm_delete called with no test selected for deletion");
            return Ok(());
        };

        match self.api.delete(&id).await {
            Ok(_) => {
                tracing::info!("deleted test result {}", id);
                self.state.deleted(&id);
                Ok(())
            }
            Err(e) => {
                tracing::error!("Error deleting test: {}", e);
                Err(e)
            }
        }
    }

    pub fn render(&self) -> String {
        render::render(&self.state)
    }
}
