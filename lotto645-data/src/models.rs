use std::borrow::Cow;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Numbers are drawn from 1..=POOL_SIZE.
pub const POOL_SIZE: u8 = 45;
pub const PICK_COUNT: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DrawRecord")]
pub struct Draw {
    pub draw_no: u32,
    pub numbers: [u8; PICK_COUNT],
}

impl Draw {
    pub fn new(draw_no: u32, numbers: [u8; PICK_COUNT]) -> Result<Self, ValidationError> {
        validate_draw(draw_no, &numbers)?;
        Ok(Self { draw_no, numbers })
    }

    pub fn contains(&self, number: u8) -> bool {
        self.numbers.contains(&number)
    }
}

/// A draw as it arrives from an external feed, before any shape check.
#[derive(Debug, Clone, Deserialize)]
pub struct DrawRecord {
    pub draw_no: u32,
    pub numbers: Vec<RawNumber>,
}

/// Feeds are inconsistent about quoting: `7` and `"7"` are both accepted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Int(i64),
    Text(String),
}

impl RawNumber {
    fn value(&self, draw_no: u32) -> Result<i64, ValidationError> {
        match self {
            RawNumber::Int(n) => Ok(*n),
            RawNumber::Text(s) => s.trim().parse::<i64>().map_err(|_| ValidationError::UnparsableNumber {
                draw_no,
                raw: s.clone(),
            }),
        }
    }
}

impl TryFrom<DrawRecord> for Draw {
    type Error = ValidationError;

    fn try_from(record: DrawRecord) -> Result<Self, Self::Error> {
        let DrawRecord { draw_no, numbers } = record;
        if numbers.len() != PICK_COUNT {
            return Err(ValidationError::WrongCount {
                draw_no,
                count: numbers.len(),
            });
        }

        let mut parsed = [0u8; PICK_COUNT];
        for (slot, raw) in parsed.iter_mut().zip(&numbers) {
            let value = raw.value(draw_no)?;
            *slot = u8::try_from(value)
                .ok()
                .filter(|n| (1..=POOL_SIZE).contains(n))
                .ok_or(ValidationError::OutOfRange { draw_no, number: value })?;
        }

        Draw::new(draw_no, parsed)
    }
}

pub fn validate_draw(draw_no: u32, numbers: &[u8]) -> Result<(), ValidationError> {
    if draw_no == 0 {
        return Err(ValidationError::InvalidDrawNo);
    }
    if numbers.len() != PICK_COUNT {
        return Err(ValidationError::WrongCount {
            draw_no,
            count: numbers.len(),
        });
    }
    for &n in numbers {
        if !(1..=POOL_SIZE).contains(&n) {
            return Err(ValidationError::OutOfRange {
                draw_no,
                number: n as i64,
            });
        }
    }
    for i in 0..numbers.len() {
        for j in (i + 1)..numbers.len() {
            if numbers[i] == numbers[j] {
                return Err(ValidationError::DuplicateNumber {
                    draw_no,
                    number: numbers[i],
                });
            }
        }
    }
    Ok(())
}

/// Checks every draw and rejects repeated draw numbers. Order is not checked.
pub fn validate_history(draws: &[Draw]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(draws.len());
    for draw in draws {
        validate_draw(draw.draw_no, &draw.numbers)?;
        if !seen.insert(draw.draw_no) {
            return Err(ValidationError::DuplicateDrawNo {
                draw_no: draw.draw_no,
            });
        }
    }
    Ok(())
}

/// Ascending by draw_no. Borrows when the input is already in order.
pub fn chronological(draws: &[Draw]) -> Cow<'_, [Draw]> {
    if draws.windows(2).all(|w| w[0].draw_no < w[1].draw_no) {
        Cow::Borrowed(draws)
    } else {
        let mut sorted = draws.to_vec();
        sorted.sort_by_key(|d| d.draw_no);
        Cow::Owned(sorted)
    }
}

/// Deterministic fixture: draw i holds the six numbers following `7 * (i % 6)`,
/// so multiples of 7 and 43..=45 never appear.
pub fn make_test_draws(first_draw_no: u32, n: usize) -> Vec<Draw> {
    (0..n)
        .map(|i| {
            let base = ((i % 6) * 7) as u8;
            Draw {
                draw_no: first_draw_no + i as u32,
                numbers: [base + 1, base + 2, base + 3, base + 4, base + 5, base + 6],
            }
        })
        .collect()
}
