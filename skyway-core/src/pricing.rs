use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use skyway_shared::models::Flight;

use crate::cabin::CabinClass;

/// USD amount held in cents. Serialized as a plain dollar number, the way
/// the upstream API sends prices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money {
    cents: i64,
}

impl Money {
    pub const ZERO: Money = Money { cents: 0 };

    pub const fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Negative or non-finite amounts collapse to zero.
    pub fn from_dollars(amount: f64) -> Self {
        if !amount.is_finite() || amount <= 0.0 {
            return Self::ZERO;
        }
        Self {
            cents: (amount * 100.0).round() as i64,
        }
    }

    pub const fn cents(&self) -> i64 {
        self.cents
    }

    pub fn as_dollars(&self) -> f64 {
        self.cents as f64 / 100.0
    }

    pub const fn is_zero(&self) -> bool {
        self.cents == 0
    }
}

impl fmt::Display for Money {
    /// `$1,234.50`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.unsigned_abs();
        let dollars = (abs / 100).to_string();

        let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
        for (i, digit) in dollars.chars().enumerate() {
            if i > 0 && (dollars.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }

        write!(f, "{}${}.{:02}", sign, grouped, abs % 100)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_dollars())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(Money::from_dollars)
    }
}

/// Per-cabin prices of one flight. Entries may be missing on partial
/// flight records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceTable {
    pub first: Option<Money>,
    pub business: Option<Money>,
    pub economy: Option<Money>,
}

impl PriceTable {
    pub fn get(&self, cabin: CabinClass) -> Option<Money> {
        match cabin {
            CabinClass::First => self.first,
            CabinClass::Business => self.business,
            CabinClass::Economy => self.economy,
        }
    }
}

impl From<&Flight> for PriceTable {
    fn from(flight: &Flight) -> Self {
        Self {
            first: flight.first_class_price.map(Money::from_dollars),
            business: flight.business_class_price.map(Money::from_dollars),
            economy: flight.economy_class_price.map(Money::from_dollars),
        }
    }
}

/// Price of `cabin`, or zero when the flight record has none.
pub fn price_for(cabin: CabinClass, prices: &PriceTable) -> Money {
    prices.get(cabin).unwrap_or(Money::ZERO)
}

/// Same as [`price_for`] for a cabin label straight from a form or record.
/// Unrecognised labels price at zero.
pub fn price_for_label(label: &str, prices: &PriceTable) -> Money {
    match label.parse::<CabinClass>() {
        Ok(cabin) => price_for(cabin, prices),
        Err(e) => {
            tracing::debug!("{}; pricing at zero", e);
            Money::ZERO
        }
    }
}
