use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Fare tier. Cabins are stacked front to back in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum CabinClass {
    First,
    Business,
    Economy,
}

impl CabinClass {
    pub const ALL: [CabinClass; 3] = [CabinClass::First, CabinClass::Business, CabinClass::Economy];

    /// Cabin preselected when a flight is picked.
    pub const DEFAULT: CabinClass = CabinClass::Economy;

    pub const fn layout(self) -> CabinLayout {
        match self {
            CabinClass::First => CabinLayout {
                cabin: CabinClass::First,
                row_count: 5,
                seats_per_row: 4,
                start_row: 1,
                row_prefix: 'F',
            },
            CabinClass::Business => CabinLayout {
                cabin: CabinClass::Business,
                row_count: 5,
                seats_per_row: 6,
                start_row: 6,
                row_prefix: 'B',
            },
            CabinClass::Economy => CabinLayout {
                cabin: CabinClass::Economy,
                row_count: 10,
                seats_per_row: 7,
                start_row: 11,
                row_prefix: 'E',
            },
        }
    }

    /// Label used by the upstream API and shown to users.
    pub const fn label(self) -> &'static str {
        match self {
            CabinClass::First => "First Class",
            CabinClass::Business => "Business Class",
            CabinClass::Economy => "Economy Class",
        }
    }

    pub fn from_prefix(prefix: char) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.layout().row_prefix == prefix)
    }
}

pub fn layout_for(cabin: CabinClass) -> CabinLayout {
    cabin.layout()
}

impl fmt::Display for CabinClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<CabinClass> for &'static str {
    fn from(value: CabinClass) -> Self {
        value.label()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown cabin class: {0}")]
pub struct ParseCabinError(pub String);

impl FromStr for CabinClass {
    type Err = ParseCabinError;

    /// Accepts "Economy Class", "economy", "ECONOMY" and so on.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let name = normalized
            .strip_suffix("class")
            .map(str::trim_end)
            .unwrap_or(&normalized);

        match name {
            "first" => Ok(CabinClass::First),
            "business" => Ok(CabinClass::Business),
            "economy" => Ok(CabinClass::Economy),
            _ => Err(ParseCabinError(s.to_string())),
        }
    }
}

impl TryFrom<String> for CabinClass {
    type Error = ParseCabinError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Fixed seat geometry of one cabin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CabinLayout {
    pub cabin: CabinClass,
    pub row_count: u16,
    pub seats_per_row: u8,
    pub start_row: u16,
    pub row_prefix: char,
}

impl CabinLayout {
    pub const fn total_seats(&self) -> usize {
        self.row_count as usize * self.seats_per_row as usize
    }

    /// Physical row numbers occupied by this cabin.
    pub fn rows(&self) -> RangeInclusive<u16> {
        self.start_row..=self.start_row + self.row_count - 1
    }

    pub fn contains_row(&self, row: u16) -> bool {
        self.rows().contains(&row)
    }

    /// Seats left of the aisle. The right block takes the odd seat.
    pub const fn left_block_len(&self) -> u8 {
        self.seats_per_row / 2
    }

    pub const fn right_block_len(&self) -> u8 {
        self.seats_per_row - self.left_block_len()
    }

    /// "Economy Class (70 seats)"
    pub fn class_indicator(&self) -> String {
        format!("{} ({} seats)", self.cabin.label(), self.total_seats())
    }
}

/// Letters available for seat columns: A..Z without I.
pub const MAX_COLUMNS: u8 = 25;

// Index 8 would be 'I', which reads like the digit 1 on a seat label.
const SKIPPED_FROM: u8 = 8;

/// Maps a 0-based column index to its seat letter, skipping `I`.
/// Returns `None` past `Z`.
pub const fn column_letter(index: u8) -> Option<char> {
    if index >= MAX_COLUMNS {
        return None;
    }
    let shifted = if index >= SKIPPED_FROM { index + 1 } else { index };
    Some((b'A' + shifted) as char)
}

/// Inverse of [`column_letter`].
pub fn column_index(letter: char) -> Option<u8> {
    if !letter.is_ascii_uppercase() || letter == 'I' {
        return None;
    }
    let raw = letter as u8 - b'A';
    Some(if raw > SKIPPED_FROM { raw - 1 } else { raw })
}
