//! Canonical voter registration record and its field enumeration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;

/// One row per U.S. state or territory. `state` is the sole identity.
///
/// Deadlines stay strings: the source mixes ISO dates with descriptive text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoterRegistrationRecord {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub state: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub deadline_in_person: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub deadline_by_mail: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub deadline_online: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub election_day_registration: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub online_registration_link: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
}

impl VoterRegistrationRecord {
    /// Record with only the key set; every other field empty.
    pub fn new(state: impl Into<String>) -> Self {
        Self { state: state.into(), ..Self::default() }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::State => &self.state,
            Field::DeadlineInPerson => &self.deadline_in_person,
            Field::DeadlineByMail => &self.deadline_by_mail,
            Field::DeadlineOnline => &self.deadline_online,
            Field::ElectionDayRegistration => &self.election_day_registration,
            Field::OnlineRegistrationLink => &self.online_registration_link,
            Field::Description => &self.description,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::State => &mut self.state,
            Field::DeadlineInPerson => &mut self.deadline_in_person,
            Field::DeadlineByMail => &mut self.deadline_by_mail,
            Field::DeadlineOnline => &mut self.deadline_online,
            Field::ElectionDayRegistration => &mut self.election_day_registration,
            Field::OnlineRegistrationLink => &mut self.online_registration_link,
            Field::Description => &mut self.description,
        };
        *slot = value.into();
    }

    #[must_use]
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// True when the key is blank and the record can never be stored.
    pub fn has_empty_key(&self) -> bool {
        self.state.trim().is_empty()
    }
}

// The Python data server emitted `null` for NULL columns.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// The seven canonical fields, in wire and column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    State,
    DeadlineInPerson,
    DeadlineByMail,
    DeadlineOnline,
    ElectionDayRegistration,
    OnlineRegistrationLink,
    Description,
}

impl Field {
    pub const ALL: [Self; 7] = [
        Self::State,
        Self::DeadlineInPerson,
        Self::DeadlineByMail,
        Self::DeadlineOnline,
        Self::ElectionDayRegistration,
        Self::OnlineRegistrationLink,
        Self::Description,
    ];

    /// Key in the `GET /data` JSON objects.
    pub const fn json_key(self) -> &'static str {
        match self {
            Self::State => "state",
            Self::DeadlineInPerson => "deadlineInPerson",
            Self::DeadlineByMail => "deadlineByMail",
            Self::DeadlineOnline => "deadlineOnline",
            Self::ElectionDayRegistration => "electionDayRegistration",
            Self::OnlineRegistrationLink => "onlineRegistrationLink",
            Self::Description => "description",
        }
    }

    /// Quoted column name in the persisted table.
    pub const fn column_name(self) -> &'static str {
        match self {
            Self::State => "State",
            Self::DeadlineInPerson => "DeadlineInPerson",
            Self::DeadlineByMail => "DeadlineByMail",
            Self::DeadlineOnline => "DeadlineOnline",
            Self::ElectionDayRegistration => "ElectionDayRegistration",
            Self::OnlineRegistrationLink => "OnlineRegistrationLink",
            Self::Description => "Description",
        }
    }

    /// Header of the seed CSV, also used as the desktop column label.
    pub const fn csv_header(self) -> &'static str {
        match self {
            Self::State => "State",
            Self::DeadlineInPerson => "Registration Deadline In-Person",
            Self::DeadlineByMail => "Registration Deadline By Mail",
            Self::DeadlineOnline => "Registration Deadline Online",
            Self::ElectionDayRegistration => "Election Day Registration",
            Self::OnlineRegistrationLink => "Online Registration Link",
            Self::Description => "Description",
        }
    }

    /// Every header naming convention accepted for this field.
    pub const fn known_headers(self) -> [&'static str; 3] {
        [self.csv_header(), self.column_name(), self.json_key()]
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.json_key())
    }
}

impl FromStr for Field {
    type Err = CoreError;

    /// Accepts any known header convention, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|field| field.known_headers().iter().any(|h| h.eq_ignore_ascii_case(wanted)))
            .ok_or_else(|| CoreError::UnknownField(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_camel_case_keys_in_field_order() {
        let record = VoterRegistrationRecord::new("Alabama")
            .with(Field::DeadlineInPerson, "2018-10-22")
            .with(Field::OnlineRegistrationLink, "https://example.org");
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"state":"Alabama","deadlineInPerson":"2018-10-22","deadlineByMail":"","deadlineOnline":"","electionDayRegistration":"","onlineRegistrationLink":"https://example.org","description":""}"#
        );
    }

    #[test]
    fn deserializes_nulls_and_missing_keys_as_empty() {
        let record: VoterRegistrationRecord =
            serde_json::from_str(r#"{"state":"Ohio","deadlineByMail":null}"#).unwrap();
        assert_eq!(record.state, "Ohio");
        assert_eq!(record.deadline_by_mail, "");
        assert_eq!(record.description, "");
    }

    #[test]
    fn get_and_set_cover_every_field() {
        let mut record = VoterRegistrationRecord::default();
        for (i, field) in Field::ALL.into_iter().enumerate() {
            record.set(field, format!("v{i}"));
        }
        for (i, field) in Field::ALL.into_iter().enumerate() {
            assert_eq!(record.get(field), format!("v{i}"));
        }
    }

    #[test]
    fn field_parses_from_any_header_convention() {
        assert_eq!("deadlineOnline".parse::<Field>().unwrap(), Field::DeadlineOnline);
        assert_eq!("DeadlineOnline".parse::<Field>().unwrap(), Field::DeadlineOnline);
        assert_eq!(
            "registration deadline online".parse::<Field>().unwrap(),
            Field::DeadlineOnline
        );
        assert!(matches!("zip".parse::<Field>(), Err(CoreError::UnknownField(_))));
    }

    #[test]
    fn blank_state_is_an_empty_key() {
        assert!(VoterRegistrationRecord::new("  ").has_empty_key());
        assert!(!VoterRegistrationRecord::new("Iowa").has_empty_key());
    }
}
