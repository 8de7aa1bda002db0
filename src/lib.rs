extern crate byteorder;
extern crate chrono;
extern crate serde;
extern crate thiserror;

mod error;
mod fields;
mod filetime;
mod state;

pub use crate::error::{FileTimeError, Result};
pub use crate::fields::{decode_field_name, FieldValue};
pub use crate::filetime::{from_unix_time, FileTime, TICKS_BETWEEN_EPOCHS};
