//! Named decimal places

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Place {
    Ones,
    Tens,
    Hundreds,
    Thousands,
    TenThousands,
    HundredThousands,
    Millions,
    TenMillions,
}

impl Place {
    pub const ALL: [Place; 8] = [
        Place::Ones,
        Place::Tens,
        Place::Hundreds,
        Place::Thousands,
        Place::TenThousands,
        Place::HundredThousands,
        Place::Millions,
        Place::TenMillions,
    ];

    /// Power of ten this place stands for
    pub fn multiplier(&self) -> u64 {
        match self {
            Place::Ones => 1,
            Place::Tens => 10,
            Place::Hundreds => 100,
            Place::Thousands => 1_000,
            Place::TenThousands => 10_000,
            Place::HundredThousands => 100_000,
            Place::Millions => 1_000_000,
            Place::TenMillions => 10_000_000,
        }
    }

    /// Place whose multiplier is exactly `power`, if it has a name
    pub fn from_multiplier(power: u64) -> Option<Place> {
        Place::ALL.into_iter().find(|p| p.multiplier() == power)
    }
}

/// Digit (0-9) held at `place`: digit_at(347, Tens) == 4
pub fn digit_at(n: u64, place: Place) -> u64 {
    (n / place.multiplier()) % 10
}

/// Value the digit at `place` stands for: place_value_at(347, Tens) == 40
pub fn place_value_at(n: u64, place: Place) -> u64 {
    digit_at(n, place) * place.multiplier()
}
