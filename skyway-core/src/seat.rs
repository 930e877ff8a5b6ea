use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::cabin::{column_index, column_letter, CabinClass, CabinLayout};

/// One physical seat, written `{prefix}{row}-{letter}` (e.g. `E11-A`).
///
/// Rows are numbered across the whole aircraft, so the derived ordering is
/// front-to-back, then left-to-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct SeatId {
    row: u16,
    column: u8,
    cabin: CabinClass,
}

impl SeatId {
    /// Seat at `row_offset` rows into the cabin and `column` seats from the
    /// left. `None` when either is outside the cabin.
    pub fn new(cabin: CabinClass, row_offset: u16, column: u8) -> Option<Self> {
        let layout = cabin.layout();
        if row_offset >= layout.row_count || column >= layout.seats_per_row {
            return None;
        }
        Some(Self::in_layout(&layout, row_offset, column))
    }

    pub(crate) fn in_layout(layout: &CabinLayout, row_offset: u16, column: u8) -> Self {
        Self {
            row: layout.start_row + row_offset,
            column,
            cabin: layout.cabin,
        }
    }

    pub fn cabin(&self) -> CabinClass {
        self.cabin
    }

    /// Physical row number.
    pub fn row(&self) -> u16 {
        self.row
    }

    pub fn column_index(&self) -> u8 {
        self.column
    }

    pub fn column_letter(&self) -> char {
        column_letter(self.column).unwrap_or('?')
    }

    pub fn belongs_to(&self, cabin: CabinClass) -> bool {
        self.cabin == cabin
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}-{}",
            self.cabin.layout().row_prefix,
            self.row,
            self.column_letter()
        )
    }
}

impl From<SeatId> for String {
    fn from(value: SeatId) -> Self {
        value.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseSeatError {
    #[error("Malformed seat number: {0}")]
    Malformed(String),
    #[error("Unknown cabin prefix in seat number: {0}")]
    UnknownCabin(String),
    #[error("Seat {0} does not exist in its cabin")]
    OutOfCabin(String),
}

impl FromStr for SeatId {
    type Err = ParseSeatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let malformed = || ParseSeatError::Malformed(s.to_string());

        let mut chars = s.chars();
        let prefix = chars.next().ok_or_else(malformed)?;
        let (row, letter) = chars.as_str().split_once('-').ok_or_else(malformed)?;

        let cabin = CabinClass::from_prefix(prefix)
            .ok_or_else(|| ParseSeatError::UnknownCabin(s.to_string()))?;
        // Digits only, no leading zero, so a parsed seat prints back unchanged.
        if row.is_empty() || row.starts_with('0') || !row.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let row: u16 = row.parse().map_err(|_| malformed())?;

        let mut letters = letter.chars();
        let column = match (letters.next(), letters.next()) {
            (Some(c), None) => column_index(c).ok_or_else(malformed)?,
            _ => return Err(malformed()),
        };

        let layout = cabin.layout();
        if !layout.contains_row(row) || column >= layout.seats_per_row {
            return Err(ParseSeatError::OutOfCabin(s.to_string()));
        }

        Ok(Self { row, column, cabin })
    }
}

impl TryFrom<String> for SeatId {
    type Error = ParseSeatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Seats that cannot be selected. Read-only input refreshed from upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TakenSeats(HashSet<SeatId>);

impl<'de> Deserialize<'de> for TakenSeats {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<String>::deserialize(deserializer).map(TakenSeats::from_labels)
    }
}

impl TakenSeats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the set from upstream seat labels, skipping any that do not
    /// name a real seat.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let seats = labels
            .into_iter()
            .filter_map(|label| match label.as_ref().parse::<SeatId>() {
                Ok(seat) => Some(seat),
                Err(e) => {
                    tracing::warn!("Ignoring taken seat entry: {}", e);
                    None
                }
            })
            .collect();
        Self(seats)
    }

    pub fn contains(&self, seat: &SeatId) -> bool {
        self.0.contains(seat)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SeatId> {
        self.0.iter()
    }
}

impl FromIterator<SeatId> for TakenSeats {
    fn from_iter<T: IntoIterator<Item = SeatId>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_format() {
        let seat = SeatId::new(CabinClass::Economy, 0, 0).unwrap();
        assert_eq!(seat.to_string(), "E11-A");

        let seat = SeatId::new(CabinClass::First, 4, 3).unwrap();
        assert_eq!(seat.to_string(), "F5-D");
    }

    #[test]
    fn test_new_rejects_outside_cabin() {
        assert!(SeatId::new(CabinClass::First, 5, 0).is_none());
        assert!(SeatId::new(CabinClass::First, 0, 4).is_none());
    }

    #[test]
    fn test_parse() {
        let seat: SeatId = "B7-F".parse().unwrap();
        assert_eq!(seat.cabin(), CabinClass::Business);
        assert_eq!(seat.row(), 7);
        assert_eq!(seat.column_index(), 5);
        assert_eq!(seat.to_string(), "B7-F");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!("".parse::<SeatId>(), Err(ParseSeatError::Malformed(_))));
        assert!(matches!("E11A".parse::<SeatId>(), Err(ParseSeatError::Malformed(_))));
        assert!(matches!("E11-AB".parse::<SeatId>(), Err(ParseSeatError::Malformed(_))));
        assert!(matches!("E11-I".parse::<SeatId>(), Err(ParseSeatError::Malformed(_))));
        assert!(matches!("X11-A".parse::<SeatId>(), Err(ParseSeatError::UnknownCabin(_))));
        // Row 3 belongs to First, not Economy.
        assert!(matches!("E3-D".parse::<SeatId>(), Err(ParseSeatError::OutOfCabin(_))));
        // Economy rows have seven seats, A..G.
        assert!(matches!("E11-H".parse::<SeatId>(), Err(ParseSeatError::OutOfCabin(_))));
    }

    #[test]
    fn test_parse_rejects_non_canonical_rows() {
        assert!(matches!("E+11-A".parse::<SeatId>(), Err(ParseSeatError::Malformed(_))));
        assert!(matches!("E011-A".parse::<SeatId>(), Err(ParseSeatError::Malformed(_))));
        assert!(matches!("E-A".parse::<SeatId>(), Err(ParseSeatError::Malformed(_))));
        assert!(matches!("E 11-A".parse::<SeatId>(), Err(ParseSeatError::Malformed(_))));
    }

    #[test]
    fn test_taken_seats_skip_garbage() {
        let taken = TakenSeats::from_labels(["E11-A", "nonsense", "F1-B", "E11-A"]);
        assert_eq!(taken.len(), 2);
        assert!(taken.contains(&"F1-B".parse().unwrap()));
    }

    #[test]
    fn test_taken_seats_json() {
        let taken: TakenSeats = serde_json::from_str(r#"["E12-C"]"#).unwrap();
        assert!(taken.contains(&"E12-C".parse().unwrap()));
    }

    #[test]
    fn test_taken_seats_json_drops_bad_labels() {
        let taken: TakenSeats = serde_json::from_str(r#"["E12-C", "junk", "E011-A", "F1-A"]"#).unwrap();
        assert_eq!(taken.len(), 2);
        assert!(taken.contains(&"F1-A".parse().unwrap()));
    }
}
