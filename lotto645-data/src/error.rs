use thiserror::Error;

/// Shape violations in a draw record or in a draw history.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("draw {draw_no}: expected 6 numbers, got {count}")]
    WrongCount { draw_no: u32, count: usize },

    #[error("draw {draw_no}: number {number} out of range (1-45)")]
    OutOfRange { draw_no: u32, number: i64 },

    #[error("draw {draw_no}: duplicate number {number}")]
    DuplicateNumber { draw_no: u32, number: u8 },

    #[error("draw {draw_no}: cannot parse number '{raw}'")]
    UnparsableNumber { draw_no: u32, raw: String },

    #[error("draw number must be positive")]
    InvalidDrawNo,

    #[error("draw {draw_no} appears more than once")]
    DuplicateDrawNo { draw_no: u32 },
}
