// List view state: query params + edit lifecycle over an owned collection
//
// The engine in `query` is pure; the rules that depend on history (filter
// changes snap back to page 1, deleting the record being edited clears the
// form) live here.

use crate::collection::Collection;
use crate::query::{self, QueryPage, QueryParams, StatusFilter};
use crate::record::Record;
use chrono::NaiveDate;
use eyre::{Result, eyre};
use tracing::debug;

/// What the form at the top of a list view is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    Idle,
    /// A blank form for a record that does not exist yet
    Creating,
    /// Editing the record with this id
    Editing(u64),
}

/// One resource list view: owned collection, current query, edit state
#[derive(Debug, Clone)]
pub struct ListView<T: Record> {
    collection: Collection<T>,
    params: QueryParams,
    edit: EditState,
}

impl<T: Record> ListView<T> {
    pub fn new(collection: Collection<T>) -> Self {
        Self {
            collection,
            params: QueryParams::default(),
            edit: EditState::Idle,
        }
    }

    pub fn params(&self) -> &QueryParams {
        &self.params
    }

    pub fn records(&self) -> &[T] {
        self.collection.records()
    }

    pub fn edit_state(&self) -> EditState {
        self.edit
    }

    /// Serve the current page of the filtered collection
    pub fn page(&self) -> QueryPage<T> {
        query::query(self.collection.records(), &self.params)
    }

    // Any non-pagination parameter change resets to page 1 so the user is
    // never left on a now-out-of-range page.

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.params.search = term.into();
        self.params.page = 1;
    }

    pub fn set_status_filter(&mut self, status: StatusFilter) {
        self.params.status = status;
        self.params.page = 1;
    }

    pub fn set_date_filter(&mut self, date: Option<NaiveDate>) {
        self.params.date = date;
        self.params.page = 1;
    }

    /// Zero is ignored: a page size must stay positive
    pub fn set_page_size(&mut self, page_size: usize) {
        if page_size == 0 {
            debug!("ignoring zero page size");
            return;
        }
        self.params.page_size = page_size;
        self.params.page = 1;
    }

    /// Select a page, clamped against the current filtered set
    pub fn set_page(&mut self, page: usize) {
        self.params.page = page;
        self.clamp_page();
    }

    pub fn begin_create(&mut self) {
        self.edit = EditState::Creating;
    }

    pub fn begin_edit(&mut self, id: u64) -> Result<&T> {
        let record = self
            .collection
            .get(id)
            .ok_or_else(|| eyre!("No {} record with id {}", T::collection_name(), id))?;
        self.edit = EditState::Editing(id);
        Ok(record)
    }

    pub fn cancel_edit(&mut self) {
        self.edit = EditState::Idle;
    }

    /// Commit the form: append when creating, replace by id when editing
    pub fn save(&mut self, draft: T) -> Result<u64> {
        let id = match self.edit {
            EditState::Creating => self.collection.create(draft),
            EditState::Editing(id) => {
                self.collection.update(id, draft)?;
                id
            }
            EditState::Idle => return Err(eyre!("no edit in progress")),
        };
        self.edit = EditState::Idle;
        self.clamp_page();
        Ok(id)
    }

    /// Remove a record; if it was the one being edited, the form is cleared
    /// so no state points at a removed record
    pub fn delete(&mut self, id: u64) -> Result<T> {
        let removed = self.collection.delete(id)?;
        if self.edit == EditState::Editing(id) {
            self.edit = EditState::Idle;
        }
        self.clamp_page();
        Ok(removed)
    }

    /// Install a freshly fetched collection
    pub fn load(&mut self, records: Vec<T>) {
        self.collection.replace_all(records);
        self.clamp_page();
    }

    fn clamp_page(&mut self) {
        let total = self
            .collection
            .records()
            .iter()
            .filter(|record| query::matches(*record, &self.params))
            .count();
        let total_pages = total.div_ceil(self.params.page_size.max(1)).max(1);
        self.params.page = self.params.page.clamp(1, total_pages);
    }
}
