use serde::Serialize;

use crate::cabin::{CabinClass, CabinLayout};
use crate::seat::{SeatId, TakenSeats};
use crate::{CoreError, CoreResult};

/// Every seat of a cabin in row-major order.
///
/// Cheap to clone; a clone restarts from wherever the original was.
#[derive(Debug, Clone)]
pub struct Seats {
    layout: CabinLayout,
    next: usize,
}

pub fn enumerate_seats(cabin: CabinClass) -> Seats {
    Seats {
        layout: cabin.layout(),
        next: 0,
    }
}

impl Iterator for Seats {
    type Item = SeatId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.layout.total_seats() {
            return None;
        }
        let per_row = self.layout.seats_per_row as usize;
        let row_offset = (self.next / per_row) as u16;
        let column = (self.next % per_row) as u8;
        self.next += 1;
        Some(SeatId::in_layout(&self.layout, row_offset, column))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.layout.total_seats().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Seats {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatStatus {
    Available,
    Taken,
    Selected,
}

/// A taken seat stays `Taken` even if it is also the selection.
pub fn classify(seat: &SeatId, taken: &TakenSeats, selected: Option<&SeatId>) -> SeatStatus {
    if taken.contains(seat) {
        SeatStatus::Taken
    } else if selected == Some(seat) {
        SeatStatus::Selected
    } else {
        SeatStatus::Available
    }
}

/// Validates a click on `seat`. The returned seat replaces any previous
/// selection; storing it is up to the caller.
pub fn select_seat(seat: SeatId, taken: &TakenSeats) -> CoreResult<SeatId> {
    if taken.contains(&seat) {
        tracing::debug!("Rejected selection of taken seat {}", seat);
        return Err(CoreError::SelectionRejected(seat));
    }
    Ok(seat)
}

#[derive(Debug, Clone, Serialize)]
pub struct SeatCell {
    pub seat: SeatId,
    pub status: SeatStatus,
}

/// One row of the map, split at the aisle.
#[derive(Debug, Clone, Serialize)]
pub struct SeatRow {
    pub number: u16,
    pub left: Vec<SeatCell>,
    pub right: Vec<SeatCell>,
}

/// Renderable seat map of one cabin.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatMap {
    pub cabin: CabinClass,
    pub class_indicator: String,
    pub total_seats: usize,
    pub available_seats: usize,
    pub rows: Vec<SeatRow>,
}

impl SeatMap {
    pub fn build(cabin: CabinClass, taken: &TakenSeats, selected: Option<&SeatId>) -> Self {
        let layout = cabin.layout();
        let per_row = layout.seats_per_row as usize;
        let split = layout.left_block_len() as usize;

        let seats: Vec<SeatCell> = enumerate_seats(cabin)
            .map(|seat| SeatCell {
                status: classify(&seat, taken, selected),
                seat,
            })
            .collect();

        let available_seats = seats
            .iter()
            .filter(|cell| cell.status != SeatStatus::Taken)
            .count();

        let rows = seats
            .chunks(per_row)
            .zip(layout.rows())
            .map(|(cells, number)| {
                let (left, right) = cells.split_at(split);
                SeatRow {
                    number,
                    left: left.to_vec(),
                    right: right.to_vec(),
                }
            })
            .collect();

        Self {
            cabin,
            class_indicator: layout.class_indicator(),
            total_seats: layout.total_seats(),
            available_seats,
            rows,
        }
    }

    pub fn cells(&self) -> impl Iterator<Item = &SeatCell> {
        self.rows
            .iter()
            .flat_map(|row| row.left.iter().chain(row.right.iter()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn seat(label: &str) -> SeatId {
        label.parse().unwrap()
    }

    #[test]
    fn test_enumerate_counts_and_uniqueness() {
        let mut all = HashSet::new();
        for cabin in CabinClass::ALL {
            let seats: Vec<SeatId> = enumerate_seats(cabin).collect();
            assert_eq!(seats.len(), cabin.layout().total_seats());
            assert_eq!(enumerate_seats(cabin).len(), seats.len());

            let labels: HashSet<String> = seats.iter().map(ToString::to_string).collect();
            assert_eq!(labels.len(), seats.len());
            for label in labels {
                assert!(all.insert(label), "seat collides across cabins");
            }
        }
        assert_eq!(all.len(), 120);
    }

    #[test]
    fn test_first_class_rows() {
        let labels: Vec<String> = enumerate_seats(CabinClass::First).map(|s| s.to_string()).collect();
        assert_eq!(labels.len(), 20);
        assert_eq!(&labels[..4], ["F1-A", "F1-B", "F1-C", "F1-D"]);
        assert_eq!(&labels[16..], ["F5-A", "F5-B", "F5-C", "F5-D"]);
    }

    #[test]
    fn test_enumeration_is_restartable() {
        let mut seats = enumerate_seats(CabinClass::Business);
        seats.next();
        let resumed = seats.clone();
        assert_eq!(resumed.len(), 29);
        assert_eq!(enumerate_seats(CabinClass::Business).next(), Some(seat("B6-A")));
    }

    #[test]
    fn test_no_seat_uses_letter_i() {
        for cabin in CabinClass::ALL {
            assert!(enumerate_seats(cabin).all(|s| s.column_letter() != 'I'));
        }
    }

    #[test]
    fn test_classify_priority() {
        let taken = TakenSeats::from_labels(["E11-A"]);
        let a = seat("E11-A");
        let b = seat("E11-B");

        assert_eq!(classify(&a, &taken, Some(&a)), SeatStatus::Taken);
        assert_eq!(classify(&a, &taken, None), SeatStatus::Taken);
        assert_eq!(classify(&b, &taken, Some(&b)), SeatStatus::Selected);
        assert_eq!(classify(&b, &taken, Some(&a)), SeatStatus::Available);
    }

    #[test]
    fn test_select_seat() {
        let taken = TakenSeats::from_labels(["E11-A"]);
        assert!(matches!(
            select_seat(seat("E11-A"), &taken),
            Err(CoreError::SelectionRejected(s)) if s == seat("E11-A")
        ));
        assert_eq!(select_seat(seat("E11-A"), &TakenSeats::new()).unwrap(), seat("E11-A"));
    }

    #[test]
    fn test_select_every_free_seat() {
        let taken = TakenSeats::from_labels(["B6-A", "B8-C"]);
        for s in enumerate_seats(CabinClass::Business) {
            assert_eq!(select_seat(s, &taken).is_ok(), !taken.contains(&s));
        }
    }

    #[test]
    fn test_seat_map_blocks() {
        let taken = TakenSeats::from_labels(["E12-D"]);
        let selected = seat("E11-B");
        let map = SeatMap::build(CabinClass::Economy, &taken, Some(&selected));

        assert_eq!(map.rows.len(), 10);
        assert_eq!(map.total_seats, 70);
        assert_eq!(map.available_seats, 69);
        assert_eq!(map.class_indicator, "Economy Class (70 seats)");

        let first_row = &map.rows[0];
        assert_eq!(first_row.number, 11);
        assert_eq!(first_row.left.len(), 3);
        assert_eq!(first_row.right.len(), 4);
        assert_eq!(first_row.right[0].seat.to_string(), "E11-D");
        assert_eq!(first_row.left[1].status, SeatStatus::Selected);

        assert_eq!(map.rows[1].right[0].status, SeatStatus::Taken);
        assert_eq!(map.cells().count(), 70);
    }
}
