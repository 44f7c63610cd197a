//! Restaurant administration view
//!
//! Modes: `Idle → {All, Filter}`. The fetch that produced the current rows is
//! kept as a [`RestaurantQuery`] and replayed after every successful
//! mutation, so the table always mirrors the service.
//!
//! Per row the view is either viewing or editing one row through an
//! [`EditBuffer`]. Deletes go through [`ConfirmState`]. A creation draft row
//! is offered only while the client-side filtered set is empty.

use mesa_client::{ClientResult, MesaApi};
use shared::{Restaurant, RestaurantCreate, RestaurantFilter, RestaurantUpdate};

use super::{ConfirmState, LOAD_FAILED, REQUEST_FAILED, banner_text};
use crate::engine::{ColumnFilters, RestaurantField, filter_restaurants};

/// The fetch currently backing the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestaurantQuery {
    All,
    Filtered(RestaurantFilter),
}

impl RestaurantQuery {
    pub fn filter(&self) -> Option<&RestaurantFilter> {
        match self {
            Self::All => None,
            Self::Filtered(filter) => Some(filter),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListMode {
    #[default]
    Idle,
    All,
    Filter,
}

/// Text fields of a restaurant being created or edited
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestaurantDraft {
    pub name: String,
    pub description: String,
    pub address: String,
    pub city: String,
    pub image_url: String,
}

impl RestaurantDraft {
    pub fn from_restaurant(restaurant: &Restaurant) -> Self {
        let text = |field: RestaurantField| field.get(restaurant).unwrap_or_default().to_string();
        Self {
            name: text(RestaurantField::Name),
            description: text(RestaurantField::Description),
            address: text(RestaurantField::Address),
            city: text(RestaurantField::City),
            image_url: text(RestaurantField::ImageUrl),
        }
    }

    pub fn get(&self, field: RestaurantField) -> &str {
        match field {
            RestaurantField::Name => &self.name,
            RestaurantField::Description => &self.description,
            RestaurantField::Address => &self.address,
            RestaurantField::City => &self.city,
            RestaurantField::ImageUrl => &self.image_url,
        }
    }

    pub fn set(&mut self, field: RestaurantField, value: impl Into<String>) {
        let slot = match field {
            RestaurantField::Name => &mut self.name,
            RestaurantField::Description => &mut self.description,
            RestaurantField::Address => &mut self.address,
            RestaurantField::City => &mut self.city,
            RestaurantField::ImageUrl => &mut self.image_url,
        };
        *slot = value.into();
    }

    /// Name, description, address and city are all required
    pub fn is_complete(&self) -> bool {
        [&self.name, &self.description, &self.address, &self.city]
            .iter()
            .all(|v| !v.is_empty())
    }

    fn image_url(&self) -> Option<String> {
        (!self.image_url.is_empty()).then(|| self.image_url.clone())
    }

    pub fn to_create(&self) -> RestaurantCreate {
        RestaurantCreate {
            name: self.name.clone(),
            description: self.description.clone(),
            address: self.address.clone(),
            city: self.city.clone(),
            image_url: self.image_url(),
        }
    }
}

/// Snapshot of a row under edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBuffer {
    pub id: i64,
    pub fields: RestaurantDraft,
    had_image_url: bool,
}

impl EditBuffer {
    pub fn snapshot(restaurant: &Restaurant) -> Self {
        Self {
            id: restaurant.id,
            fields: RestaurantDraft::from_restaurant(restaurant),
            had_image_url: restaurant.image_url.is_some(),
        }
    }

    /// Full-row update; an image URL the row never had is not invented
    pub fn to_update(&self) -> RestaurantUpdate {
        let f = &self.fields;
        let image_url = if f.image_url.is_empty() && !self.had_image_url {
            None
        } else {
            Some(f.image_url.clone())
        };
        RestaurantUpdate {
            name: Some(f.name.clone()),
            description: Some(f.description.clone()),
            address: Some(f.address.clone()),
            city: Some(f.city.clone()),
            image_url,
        }
    }
}

/// Server-side filter form (letter + city)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterForm {
    pub letter: String,
    pub city: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestaurantCommand {
    List(RestaurantQuery),
    Create(RestaurantCreate),
    Update(i64, RestaurantUpdate),
    Delete(i64),
}

impl RestaurantCommand {
    /// Perform the command's single request
    pub async fn execute(self, api: &dyn MesaApi) -> RestaurantEvent {
        match self {
            Self::List(query) => {
                let result = api.list_restaurants(query.filter()).await;
                RestaurantEvent::Listed(query, result)
            }
            Self::Create(data) => RestaurantEvent::Created(api.create_restaurant(&data).await),
            Self::Update(id, data) => {
                RestaurantEvent::Updated(api.update_restaurant(id, &data).await)
            }
            Self::Delete(id) => RestaurantEvent::Deleted(api.delete_restaurant(id).await),
        }
    }
}

#[derive(Debug)]
pub enum RestaurantEvent {
    Listed(RestaurantQuery, ClientResult<Vec<Restaurant>>),
    Created(ClientResult<Restaurant>),
    Updated(ClientResult<Restaurant>),
    Deleted(ClientResult<()>),
}

/// Restaurant administration state
#[derive(Debug, Default)]
pub struct RestaurantsView {
    mode: ListMode,
    query: Option<RestaurantQuery>,
    filter_form: FilterForm,
    rows: Vec<Restaurant>,
    table_visible: bool,
    loading: bool,
    filters: ColumnFilters,
    editing: Option<EditBuffer>,
    draft: RestaurantDraft,
    confirm: ConfirmState,
    banner: Option<String>,
}

impl RestaurantsView {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Accessors ==========

    pub fn mode(&self) -> ListMode {
        self.mode
    }

    pub fn query(&self) -> Option<&RestaurantQuery> {
        self.query.as_ref()
    }

    pub fn filter_form(&self) -> &FilterForm {
        &self.filter_form
    }

    /// Rows as last returned by the service
    pub fn rows(&self) -> &[Restaurant] {
        &self.rows
    }

    pub fn is_table_visible(&self) -> bool {
        self.table_visible
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn column_filters(&self) -> &ColumnFilters {
        &self.filters
    }

    pub fn editing(&self) -> Option<&EditBuffer> {
        self.editing.as_ref()
    }

    pub fn draft(&self) -> &RestaurantDraft {
        &self.draft
    }

    pub fn confirm(&self) -> ConfirmState {
        self.confirm
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    /// Rows after the client-side column filters
    pub fn visible_rows(&self) -> Vec<&Restaurant> {
        filter_restaurants(&self.rows, &self.filters)
    }

    // ========== Fetching ==========

    /// Fetch every restaurant
    pub fn list_all(&mut self) -> RestaurantCommand {
        self.mode = ListMode::All;
        self.table_visible = true;
        self.start(RestaurantQuery::All)
    }

    /// Open the server-side filter form; the table stays hidden until searched
    pub fn show_filter(&mut self) {
        self.mode = ListMode::Filter;
        self.query = None;
        self.table_visible = false;
        self.loading = false;
        self.rows.clear();
        self.filter_form = FilterForm::default();
        self.filters.clear();
        self.editing = None;
    }

    /// Only the first character of `letter` is kept
    pub fn set_filter_letter(&mut self, letter: &str) {
        self.filter_form.letter = letter.chars().take(1).collect();
    }

    pub fn set_filter_city(&mut self, city: &str) {
        self.filter_form.city = city.to_string();
    }

    pub fn can_search(&self) -> bool {
        self.mode == ListMode::Filter && !self.loading
    }

    /// Fetch restaurants filtered by the service
    pub fn search(&mut self) -> Option<RestaurantCommand> {
        if !self.can_search() {
            return None;
        }
        self.table_visible = true;
        let filter = RestaurantFilter::new(&self.filter_form.letter, &self.filter_form.city);
        Some(self.start(RestaurantQuery::Filtered(filter)))
    }

    fn start(&mut self, query: RestaurantQuery) -> RestaurantCommand {
        self.query = Some(query.clone());
        self.loading = true;
        RestaurantCommand::List(query)
    }

    /// Re-run whichever fetch produced the current rows
    fn replay(&mut self) -> Option<RestaurantCommand> {
        let query = self.query.clone()?;
        Some(self.start(query))
    }

    pub fn set_column_filter(&mut self, field: RestaurantField, value: &str) {
        self.filters.set(field, value);
    }

    // ========== Editing ==========

    /// Snapshot a listed row into the edit buffer
    pub fn begin_edit(&mut self, id: i64) -> bool {
        match self.rows.iter().find(|r| r.id == id) {
            Some(row) => {
                self.editing = Some(EditBuffer::snapshot(row));
                true
            }
            None => false,
        }
    }

    pub fn edit_field(&mut self, field: RestaurantField, value: &str) {
        if let Some(buffer) = self.editing.as_mut() {
            buffer.fields.set(field, value);
        }
    }

    /// Send the edit buffer; the buffer is released either way
    pub fn save_edit(&mut self) -> Option<RestaurantCommand> {
        let buffer = self.editing.take()?;
        Some(RestaurantCommand::Update(buffer.id, buffer.to_update()))
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    // ========== Deleting ==========

    pub fn request_delete(&mut self, id: i64) {
        self.confirm = ConfirmState::ConfirmingDelete(id);
    }

    pub fn cancel_delete(&mut self) {
        self.confirm = ConfirmState::Closed;
    }

    pub fn confirm_delete(&mut self) -> Option<RestaurantCommand> {
        self.confirm.take().map(RestaurantCommand::Delete)
    }

    // ========== Creating ==========

    /// The draft row shows while a table is displayed with no visible rows
    pub fn creation_row_visible(&self) -> bool {
        self.table_visible && self.visible_rows().is_empty()
    }

    pub fn set_draft_field(&mut self, field: RestaurantField, value: &str) {
        self.draft.set(field, value);
    }

    pub fn can_create(&self) -> bool {
        self.creation_row_visible() && self.draft.is_complete()
    }

    pub fn create(&mut self) -> Option<RestaurantCommand> {
        if !self.can_create() {
            return None;
        }
        Some(RestaurantCommand::Create(self.draft.to_create()))
    }

    // ========== Results ==========

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    /// Fold a finished request into the view, possibly asking for a refetch
    pub fn handle(&mut self, event: RestaurantEvent) -> Option<RestaurantCommand> {
        match event {
            RestaurantEvent::Listed(query, result) => {
                if self.query.as_ref() != Some(&query) {
                    tracing::debug!(?query, "dropping result of superseded fetch");
                    return None;
                }
                self.loading = false;
                match result {
                    Ok(rows) => {
                        tracing::debug!(count = rows.len(), "restaurants loaded");
                        self.rows = rows;
                        self.filters.clear();
                    }
                    Err(e) => self.banner = Some(banner_text(&e, LOAD_FAILED)),
                }
                None
            }
            RestaurantEvent::Created(result) => match result {
                Ok(created) => {
                    tracing::info!(id = created.id, "restaurant created");
                    self.draft = RestaurantDraft::default();
                    self.replay()
                }
                Err(e) => {
                    self.banner = Some(banner_text(&e, REQUEST_FAILED));
                    None
                }
            },
            RestaurantEvent::Updated(result) => match result {
                Ok(updated) => {
                    tracing::info!(id = updated.id, "restaurant updated");
                    self.replay()
                }
                Err(e) => {
                    self.banner = Some(banner_text(&e, REQUEST_FAILED));
                    None
                }
            },
            RestaurantEvent::Deleted(result) => match result {
                Ok(()) => {
                    tracing::info!("restaurant deleted");
                    self.replay()
                }
                Err(e) => {
                    self.banner = Some(banner_text(&e, REQUEST_FAILED));
                    None
                }
            },
        }
    }
}
