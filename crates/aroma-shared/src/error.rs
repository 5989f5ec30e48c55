use thiserror::Error;

use crate::time::TimeUnit;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SharedError {
    #[error("Unknown {kind} name: {name}")]
    UnknownName { kind: &'static str, name: String },

    #[error("Length of time overflows: {value} {unit}")]
    LengthOfTimeOverflow { value: i64, unit: TimeUnit },
}
