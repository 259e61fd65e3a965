//! Header schema: maps raw CSV rows onto the canonical record.
//!
//! Source datasets do not agree on header names, so every field carries a list
//! of accepted headers. A header row is resolved once into column positions;
//! rows are then normalized positionally. Matching ignores ASCII case,
//! surrounding whitespace and a leading byte-order mark.
//!
//! Only the key column is required. Any other missing column is reported and
//! yields empty strings. Values are trimmed but otherwise kept verbatim.

use std::collections::HashMap;

use crate::error::CoreError;
use crate::record::{Field, VoterRegistrationRecord};

#[derive(Debug, Clone)]
pub struct HeaderSchema {
    aliases: Vec<(Field, Vec<String>)>,
}

impl Default for HeaderSchema {
    fn default() -> Self {
        Self {
            aliases: Field::ALL
                .into_iter()
                .map(|field| {
                    let names = field.known_headers().iter().map(|h| normalize_header(h)).collect();
                    (field, names)
                })
                .collect(),
        }
    }
}

impl HeaderSchema {
    /// Accept `header` as an additional source name for `field`.
    #[must_use]
    pub fn with_alias(mut self, field: Field, header: &str) -> Self {
        let header = normalize_header(header);
        if let Some((_, names)) = self.aliases.iter_mut().find(|(f, _)| *f == field) {
            if !names.contains(&header) {
                names.push(header);
            }
        }
        self
    }

    fn matches(&self, field: Field, header: &str) -> bool {
        let header = normalize_header(header);
        self.aliases
            .iter()
            .find(|(f, _)| *f == field)
            .is_some_and(|(_, names)| names.iter().any(|n| *n == header))
    }

    /// Resolve a header row into column positions.
    ///
    /// Fails only when no column maps to [`Field::State`].
    pub fn resolve<'a, I>(&self, headers: I) -> Result<ResolvedSchema, CoreError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let headers: Vec<&str> = headers.into_iter().collect();
        let mut positions = [None; 7];
        for (slot, field) in positions.iter_mut().zip(Field::ALL) {
            *slot = headers.iter().position(|h| self.matches(field, h));
        }

        if positions[0].is_none() {
            return Err(CoreError::MissingKeyColumn(Field::State.csv_header()));
        }

        let resolved = ResolvedSchema { positions };
        let missing = resolved.missing_fields();
        if !missing.is_empty() {
            let names: Vec<&str> = missing.iter().map(|f| f.csv_header()).collect();
            tracing::warn!(missing = ?names, "source columns not found, values will be empty");
        }
        Ok(resolved)
    }

    /// Normalize a single header→value mapping without resolving positions.
    ///
    /// When several headers name the same field, an exact known header wins in
    /// [`Field::known_headers`] order, then aliases in registration order. Ties
    /// between case variants go to the lexically smallest header.
    pub fn normalize_map(&self, row: &HashMap<String, String>) -> VoterRegistrationRecord {
        let mut record = VoterRegistrationRecord::default();
        for field in Field::ALL {
            if let Some(value) = self.lookup(field, row) {
                record.set(field, value.trim());
            }
        }
        record
    }

    fn lookup<'r>(&self, field: Field, row: &'r HashMap<String, String>) -> Option<&'r str> {
        if let Some(value) = field.known_headers().iter().find_map(|h| row.get(*h)) {
            return Some(value);
        }
        let names = self.aliases.iter().find(|(f, _)| *f == field).map(|(_, names)| names)?;
        names.iter().find_map(|name| {
            row.iter()
                .filter(|(header, _)| normalize_header(header) == *name)
                .min_by(|a, b| a.0.cmp(b.0))
                .map(|(_, value)| value.as_str())
        })
    }
}

/// Column positions of each canonical field within a specific header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSchema {
    positions: [Option<usize>; 7],
}

impl ResolvedSchema {
    pub fn position(&self, field: Field) -> Option<usize> {
        Field::ALL.iter().position(|f| *f == field).and_then(|i| self.positions[i])
    }

    pub fn missing_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .zip(self.positions)
            .filter_map(|(field, pos)| pos.is_none().then_some(field))
            .collect()
    }

    /// Map a positional row. Short rows and unmapped fields yield empty strings.
    pub fn normalize<S: AsRef<str>>(&self, row: &[S]) -> VoterRegistrationRecord {
        let mut record = VoterRegistrationRecord::default();
        for (field, pos) in Field::ALL.into_iter().zip(self.positions) {
            if let Some(value) = pos.and_then(|p| row.get(p)) {
                record.set(field, value.as_ref().trim());
            }
        }
        record
    }
}

fn normalize_header(header: &str) -> String {
    header.trim_start_matches('\u{feff}').trim().to_ascii_lowercase()
}
