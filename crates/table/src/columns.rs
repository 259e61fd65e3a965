//! Column schemas for the two viewport classes.

use serde::Serialize;
use votereg_core::Field;

/// Widths at or below this many pixels use the mobile schema.
pub const MOBILE_BREAKPOINT_PX: u32 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDef {
    pub field: Field,
    pub header_name: &'static str,
    /// Minimum width in pixels.
    pub width: u32,
    /// Share of the remaining width.
    pub flex: f32,
}

impl ColumnDef {
    const fn new(field: Field, header_name: &'static str, width: u32, flex: f32) -> Self {
        Self { field, header_name, width, flex }
    }
}

pub const DESKTOP_COLUMNS: [ColumnDef; 7] = [
    ColumnDef::new(Field::State, "State", 130, 0.5),
    ColumnDef::new(Field::DeadlineInPerson, "Registration Deadline In-Person", 200, 1.0),
    ColumnDef::new(Field::DeadlineByMail, "Registration Deadline By Mail", 200, 1.0),
    ColumnDef::new(Field::DeadlineOnline, "Registration Deadline Online", 200, 1.0),
    ColumnDef::new(Field::ElectionDayRegistration, "Election Day Registration", 200, 1.0),
    ColumnDef::new(Field::OnlineRegistrationLink, "Online Registration Link", 500, 1.5),
    ColumnDef::new(Field::Description, "Description", 400, 1.0),
];

pub const MOBILE_COLUMNS: [ColumnDef; 3] = [
    ColumnDef::new(Field::State, "State", 100, 0.8),
    ColumnDef::new(Field::DeadlineOnline, "Registration Deadline Online", 200, 1.0),
    ColumnDef::new(Field::OnlineRegistrationLink, "Register", 130, 1.0),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportClass {
    Mobile,
    Desktop,
}

impl ViewportClass {
    pub const fn from_width(width_px: u32) -> Self {
        if width_px <= MOBILE_BREAKPOINT_PX { Self::Mobile } else { Self::Desktop }
    }

    pub const fn columns(self) -> &'static [ColumnDef] {
        match self {
            Self::Mobile => &MOBILE_COLUMNS,
            Self::Desktop => &DESKTOP_COLUMNS,
        }
    }
}

pub fn columns_for(width_px: u32) -> &'static [ColumnDef] {
    ViewportClass::from_width(width_px).columns()
}
