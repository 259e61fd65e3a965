//! View model: interaction state in, visible page out.

use votereg_core::{Field, VoterRegistrationRecord};

use crate::columns::{ColumnDef, ViewportClass};
use crate::error::TableError;
use crate::filter::Filter;
use crate::pagination::Pagination;
use crate::sort::{SortModel, sort_records};

/// Shown in place of rows when the fetch failed.
pub const ERROR_INDICATOR: &str = "Error loading data";

/// Everything the user can change about the table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableState {
    pub viewport_width: u32,
    pub sort: SortModel,
    filter: Option<Filter>,
    pagination: Pagination,
}

impl TableState {
    pub fn new(viewport_width: u32) -> Self {
        Self {
            viewport_width,
            sort: SortModel::default(),
            filter: None,
            pagination: Pagination::default(),
        }
    }

    pub fn viewport(&self) -> ViewportClass {
        ViewportClass::from_width(self.viewport_width)
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn filter(&self) -> Option<&Filter> {
        self.filter.as_ref()
    }

    pub fn toggle_sort(&mut self, field: Field) {
        self.sort.toggle(field);
    }

    pub fn set_page(&mut self, page: usize) {
        self.pagination.set_page(page);
    }

    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), TableError> {
        self.pagination.set_page_size(page_size)
    }

    /// A new filter changes the row set, so the page goes back to 0.
    pub fn set_filter(&mut self, filter: Option<Filter>) {
        self.filter = filter;
        self.pagination.set_page(0);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStatus {
    Loading,
    Ready,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    /// The row's state, unique per record.
    pub id: String,
    /// Cell text in column order.
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub columns: &'static [ColumnDef],
    pub rows: Vec<TableRow>,
    /// Rows left after filtering, across all pages.
    pub total_rows: usize,
    pub page: usize,
    pub page_size: usize,
    pub page_count: usize,
    pub status: TableStatus,
}

impl TableView {
    pub fn present(records: &[VoterRegistrationRecord], state: &TableState) -> Self {
        let mut visible: Vec<VoterRegistrationRecord> = match state.filter() {
            Some(filter) => records.iter().filter(|r| filter.matches(r)).cloned().collect(),
            None => records.to_vec(),
        };
        sort_records(&mut visible, state.sort);

        let columns = state.viewport().columns();
        let pagination = state.pagination();
        let total_rows = visible.len();
        let rows = visible[pagination.window(total_rows)]
            .iter()
            .map(|record| TableRow {
                id: record.state.clone(),
                cells: columns.iter().map(|c| record.get(c.field).to_owned()).collect(),
            })
            .collect();

        tracing::debug!(
            total = records.len(),
            filtered = total_rows,
            page = pagination.page(),
            "table view rebuilt"
        );
        Self {
            columns,
            rows,
            total_rows,
            page: pagination.page(),
            page_size: pagination.page_size(),
            page_count: pagination.page_count(total_rows),
            status: TableStatus::Ready,
        }
    }

    pub fn loading(state: &TableState) -> Self {
        Self { status: TableStatus::Loading, ..Self::present(&[], state) }
    }

    pub fn failed(state: &TableState) -> Self {
        Self { status: TableStatus::Error, ..Self::present(&[], state) }
    }

    pub fn error_message(&self) -> Option<&'static str> {
        (self.status == TableStatus::Error).then_some(ERROR_INDICATOR)
    }
}
