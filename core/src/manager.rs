//! Orchestration of the add, update, delete and lookup flows.
//!
//! # Design
//! `RecipeManager` owns the store, the stateless client and a host-supplied
//! `Transport`. Each handler runs to completion, blocking on the transport,
//! and absorbs every failure into the status message; nothing is returned
//! as `Err`. The returned `Outcome` lets a front end react without parsing
//! the status text.
//!
//! After a successful mutation the whole list is fetched again rather than
//! reconciled locally. Overlapping submissions are not guarded against.

use tracing::{debug, warn};

use crate::client::RecipeClient;
use crate::error::{ApiError, GatewayError};
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::store::RecipeStore;
use crate::types::{Recipe, RecipeField, RecipeId};
use crate::validate::{validate, FieldMissing};
use crate::view::{self, ViewOptions};

pub const MSG_ADDED: &str = "Recipe added successfully!";
pub const MSG_UPDATED: &str = "Recipe updated successfully!";
pub const MSG_DELETED: &str = "Recipe deleted successfully!";
pub const MSG_MISSING_QUERY: &str = "Please enter an ID to fetch.";
pub const MSG_ID_LOCKED: &str = "Recipe ID cannot be changed while editing.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManagerOptions {
    /// Show the find-by-id panel and allow lookups.
    pub lookup_panel: bool,
}

impl Default for ManagerOptions {
    fn default() -> Self {
        Self { lookup_panel: true }
    }
}

/// Result of one user action. The status message has already been updated.
#[derive(Debug)]
pub enum Outcome {
    Completed,
    /// The form failed validation; no request was sent.
    Invalid(FieldMissing),
    /// The lookup query was blank; no request was sent.
    MissingQuery,
    /// The lookup panel is turned off.
    Disabled,
    Failed(GatewayError),
}

impl Outcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed)
    }
}

pub struct RecipeManager<T> {
    client: RecipeClient,
    store: RecipeStore,
    transport: T,
    options: ManagerOptions,
}

impl<T: Transport> RecipeManager<T> {
    pub fn new(client: RecipeClient, transport: T, options: ManagerOptions) -> Self {
        Self {
            client,
            store: RecipeStore::new(),
            transport,
            options,
        }
    }

    pub fn store(&self) -> &RecipeStore {
        &self.store
    }

    pub fn options(&self) -> ManagerOptions {
        self.options
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn render(&self) -> String {
        view::render(
            &self.store,
            &ViewOptions {
                lookup_panel: self.options.lookup_panel,
            },
        )
    }

    /// Initial load.
    pub fn mount(&mut self) -> Outcome {
        self.refresh()
    }

    /// Replace the table with a fresh copy of every recipe.
    pub fn refresh(&mut self) -> Outcome {
        let request = self.client.build_list_recipes();
        let result = self
            .round_trip(request)
            .and_then(|response| self.client.parse_list_recipes(response))
            .map_err(GatewayError::FetchFailed);
        match result {
            Ok(records) => {
                self.store.set_records(records);
                Outcome::Completed
            }
            Err(err) => {
                self.store.clear_records();
                self.fail(err)
            }
        }
    }

    /// Returns `false` when the edit is refused: the identifier of the
    /// record under edit is fixed.
    pub fn set_field(&mut self, field: RecipeField, value: impl Into<String>) -> bool {
        let accepted = self.store.set_form_field(field, value);
        if !accepted {
            debug!(%field, "field locked while editing");
            self.store.set_status(MSG_ID_LOCKED);
        }
        accepted
    }

    pub fn set_lookup_query(&mut self, query: impl Into<String>) {
        self.store.set_lookup_query(query);
    }

    pub fn edit(&mut self, record: &Recipe) {
        self.store.begin_edit(record);
    }

    pub fn cancel_edit(&mut self) {
        self.store.reset_form();
    }

    /// The form's single action button: add in add mode, update in edit mode.
    pub fn submit(&mut self) -> Outcome {
        if self.store.is_editing() {
            self.update()
        } else {
            self.add()
        }
    }

    pub fn add(&mut self) -> Outcome {
        if let Err(missing) = validate(self.store.form()) {
            return self.reject(missing);
        }
        let result = self
            .client
            .build_create_recipe(self.store.form())
            .and_then(|request| self.round_trip(request))
            .and_then(|response| self.client.parse_create_recipe(response))
            .map_err(GatewayError::CreateFailed);
        self.finish_save(result, MSG_ADDED)
    }

    pub fn update(&mut self) -> Outcome {
        if let Err(missing) = validate(self.store.form()) {
            return self.reject(missing);
        }
        let result = self
            .client
            .build_update_recipe(self.store.form())
            .and_then(|request| self.round_trip(request))
            .and_then(|response| self.client.parse_update_recipe(response))
            .map_err(GatewayError::UpdateFailed);
        self.finish_save(result, MSG_UPDATED)
    }

    pub fn delete(&mut self, id: &RecipeId) -> Outcome {
        let request = self.client.build_delete_recipe(id);
        let result = self
            .round_trip(request)
            .and_then(|response| self.client.parse_delete_recipe(response))
            .map_err(GatewayError::DeleteFailed);
        if let Err(err) = result {
            return self.fail(err);
        }
        self.store.set_status(MSG_DELETED);
        self.refresh();
        if self.store.clear_lookup_if_matches(id) {
            debug!(%id, "cleared lookup result for deleted recipe");
        }
        Outcome::Completed
    }

    /// Fetch the recipe named by the lookup query into the detail panel.
    pub fn lookup(&mut self) -> Outcome {
        if !self.options.lookup_panel {
            return Outcome::Disabled;
        }
        let query = RecipeId::new(self.store.lookup_query().trim());
        if query.as_str().is_empty() {
            self.store.set_status(MSG_MISSING_QUERY);
            return Outcome::MissingQuery;
        }
        let request = self.client.build_get_recipe(&query);
        let result = self
            .round_trip(request)
            .and_then(|response| self.client.parse_get_recipe(response))
            .map_err(GatewayError::LookupFailed);
        match result {
            Ok(record) => {
                self.store.set_lookup_result(record);
                self.store.clear_status();
                Outcome::Completed
            }
            Err(err) => {
                self.store.clear_lookup();
                self.fail(err)
            }
        }
    }

    fn finish_save(&mut self, result: Result<(), GatewayError>, success: &str) -> Outcome {
        if let Err(err) = result {
            return self.fail(err);
        }
        self.store.set_status(success);
        self.refresh();
        self.store.reset_form();
        Outcome::Completed
    }

    fn reject(&mut self, missing: FieldMissing) -> Outcome {
        debug!(field = %missing.0, "form rejected");
        self.store.set_status(missing.to_string());
        Outcome::Invalid(missing)
    }

    fn fail(&mut self, err: GatewayError) -> Outcome {
        warn!(error = %err.cause(), "{}", err.status_message());
        self.store.set_status(err.status_message());
        Outcome::Failed(err)
    }

    fn round_trip(&mut self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = %request.method, path = %request.path, "sending request");
        let response = self
            .transport
            .execute(request)
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        debug!(status = response.status, "received response");
        Ok(response)
    }
}
