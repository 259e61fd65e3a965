use votereg_core::VoterRegistrationRecord;

/// Lifecycle of one data load.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchState {
    #[default]
    Loading,
    Loaded(Vec<VoterRegistrationRecord>),
    /// The fetch failed; there are no rows.
    Failed { reason: String },
}

impl FetchState {
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Rows to display. Empty while loading and after a failure.
    pub fn records(&self) -> &[VoterRegistrationRecord] {
        match self {
            Self::Loaded(records) => records,
            Self::Loading | Self::Failed { .. } => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed { reason } => Some(reason),
            Self::Loading | Self::Loaded(_) => None,
        }
    }
}
