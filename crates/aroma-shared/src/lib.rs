//! # aroma-shared
//!
//! Wire-level data structures shared by every Aroma service tier.
//!
//! These structs mirror the platform's interface definitions: every field is
//! public, identifiers are canonical UUID strings and timestamps are
//! milliseconds since the Unix epoch.  The data layer reads and writes these
//! fields but never adds behaviour of its own to them.

#[macro_use]
mod macros;

pub mod activity;
pub mod constants;
pub mod devices;
pub mod error;
pub mod media;
pub mod reactions;
pub mod time;
pub mod types;

pub use activity::{Event, EventType};
pub use devices::MobileDevice;
pub use error::SharedError;
pub use media::{Dimension, Image, ImageType};
pub use reactions::{Action, Matcher, Reaction};
pub use time::{LengthOfTime, TimeUnit};
pub use types::*;
