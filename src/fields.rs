use crate::error::{FileTimeError, Result};
use crate::filetime::FileTime;

pub const FIELD_FILETIME: &str = "filetime";
pub const FIELD_UNIXTIME: &str = "unixtime";

/// A field value as it appears in serialized state: raw ticks are stored
/// as integers, Unix seconds as floats.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldValue {
    Int(i64),
    Float(f64),
}

impl FieldValue {
    fn to_i64(self) -> i64 {
        match self {
            FieldValue::Int(value) => value,
            FieldValue::Float(value) => value.round() as i64,
        }
    }

    fn to_f64(self) -> f64 {
        match self {
            FieldValue::Int(value) => value as f64,
            FieldValue::Float(value) => value,
        }
    }
}

/// Decodes a field name from legacy serialized state, where names were
/// written as byte strings rather than text.
pub fn decode_field_name(raw: &[u8]) -> Result<&str> {
    if !raw.is_ascii() {
        return Err(FileTimeError::FieldNameEncoding);
    }
    std::str::from_utf8(raw).map_err(|_| FileTimeError::FieldNameEncoding)
}

impl FileTime {
    /// Reads a field by name. Only `filetime` and its derived `unixtime`
    /// view exist; any other name is reported as missing.
    pub fn field(&self, name: &str) -> Result<FieldValue> {
        match name {
            FIELD_FILETIME => Ok(FieldValue::Int(self.filetime())),
            FIELD_UNIXTIME => Ok(FieldValue::Float(self.unix_time())),
            _ => Err(FileTimeError::AttributeNotFound(name.to_string())),
        }
    }

    /// Writes a field by name. Assigning `unixtime` rewrites the stored
    /// tick count; assigning `filetime` stores the value directly.
    pub fn set_field(&mut self, name: &str, value: FieldValue) -> Result<()> {
        match name {
            FIELD_FILETIME => self.set_filetime(value.to_i64()),
            FIELD_UNIXTIME => self.set_unix_time(value.to_f64()),
            _ => return Err(FileTimeError::AttributeNotFound(name.to_string())),
        }
        Ok(())
    }

    /// Rebuilds a FileTime from serialized state entries whose names may be
    /// byte-encoded, decoding each name to ASCII text before assignment.
    pub fn from_state<'a, I>(entries: I) -> Result<FileTime>
    where
        I: IntoIterator<Item = (&'a [u8], FieldValue)>,
    {
        let mut filetime = FileTime::new(0);
        for (raw_name, value) in entries {
            let name = decode_field_name(raw_name)?;
            filetime.set_field(name, value)?;
        }
        Ok(filetime)
    }
}
