//! Stable single-column sort.

use std::cmp::Ordering;

use votereg_core::{Field, VoterRegistrationRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub const fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortModel {
    pub field: Field,
    pub direction: SortDirection,
}

impl Default for SortModel {
    fn default() -> Self {
        Self { field: Field::State, direction: SortDirection::Ascending }
    }
}

impl SortModel {
    pub const fn new(field: Field, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Header click: the active column flips direction, any other column
    /// becomes active in ascending order.
    pub fn toggle(&mut self, field: Field) {
        if self.field == field {
            self.direction = self.direction.reversed();
        } else {
            *self = Self::new(field, SortDirection::Ascending);
        }
    }

    fn compare(&self, a: &VoterRegistrationRecord, b: &VoterRegistrationRecord) -> Ordering {
        let ordering = a.get(self.field).cmp(b.get(self.field));
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Sort in place. Equal keys keep their relative order in both directions.
pub fn sort_records(records: &mut [VoterRegistrationRecord], model: SortModel) {
    records.sort_by(|a, b| model.compare(a, b));
}
