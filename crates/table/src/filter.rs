//! Quick filter on a single field.

use std::str::FromStr;

use votereg_core::{Field, VoterRegistrationRecord};

use crate::error::TableError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterOperator {
    /// Case-insensitive substring match.
    #[default]
    Contains,
    /// Exact match.
    Equals,
}

impl FilterOperator {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Contains => "contains",
            Self::Equals => "equals",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub field: Field,
    pub operator: FilterOperator,
    pub value: String,
}

impl Filter {
    pub fn contains(field: Field, value: impl Into<String>) -> Self {
        Self { field, operator: FilterOperator::Contains, value: value.into() }
    }

    pub fn equals(field: Field, value: impl Into<String>) -> Self {
        Self { field, operator: FilterOperator::Equals, value: value.into() }
    }

    pub fn matches(&self, record: &VoterRegistrationRecord) -> bool {
        let cell = record.get(self.field);
        match self.operator {
            FilterOperator::Contains => cell.to_lowercase().contains(&self.value.to_lowercase()),
            FilterOperator::Equals => cell == self.value,
        }
    }
}

/// `FIELD=VALUE` parses as a contains filter, `FIELD==VALUE` as an exact one.
impl FromStr for Filter {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, rest) = s.split_once('=').ok_or_else(|| TableError::InvalidFilter(s.to_owned()))?;
        let field = name.parse::<Field>().map_err(|_| TableError::UnknownColumn(name.to_owned()))?;
        Ok(match rest.strip_prefix('=') {
            Some(exact) => Self::equals(field, exact),
            None => Self::contains(field, rest),
        })
    }
}
