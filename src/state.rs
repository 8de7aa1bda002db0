use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::fields::{decode_field_name, FIELD_FILETIME, FIELD_UNIXTIME};
use crate::filetime::FileTime;

const FIELDS: &[&str] = &[FIELD_FILETIME, FIELD_UNIXTIME];

impl Serialize for FileTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("FileTime", 1)?;
        state.serialize_field(FIELD_FILETIME, &self.filetime())?;
        state.end()
    }
}

enum Field {
    Filetime,
    Unixtime,
}

struct FieldVisitor;

impl<'de> Visitor<'de> for FieldVisitor {
    type Value = Field;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("`filetime` or `unixtime`")
    }

    fn visit_str<E>(self, value: &str) -> Result<Field, E>
    where
        E: de::Error,
    {
        match value {
            FIELD_FILETIME => Ok(Field::Filetime),
            FIELD_UNIXTIME => Ok(Field::Unixtime),
            _ => Err(de::Error::unknown_field(value, FIELDS)),
        }
    }

    // Legacy state written by older versions encodes field names as byte
    // strings; decode them as ASCII before matching.
    fn visit_bytes<E>(self, value: &[u8]) -> Result<Field, E>
    where
        E: de::Error,
    {
        match decode_field_name(value) {
            Ok(name) => self.visit_str(name),
            Err(_) => Err(de::Error::invalid_value(
                de::Unexpected::Bytes(value),
                &"an ASCII field name",
            )),
        }
    }
}

impl<'de> Deserialize<'de> for Field {
    fn deserialize<D>(deserializer: D) -> Result<Field, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_identifier(FieldVisitor)
    }
}

struct FileTimeVisitor;

impl<'de> Visitor<'de> for FileTimeVisitor {
    type Value = FileTime;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("struct FileTime")
    }

    fn visit_map<A>(self, mut map: A) -> Result<FileTime, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut filetime = FileTime::new(0);
        while let Some(field) = map.next_key::<Field>()? {
            match field {
                Field::Filetime => filetime.set_filetime(map.next_value::<i64>()?),
                Field::Unixtime => filetime.set_unix_time(map.next_value::<f64>()?),
            }
        }
        Ok(filetime)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<FileTime, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let ticks = seq
            .next_element::<i64>()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;
        Ok(FileTime::new(ticks))
    }
}

impl<'de> Deserialize<'de> for FileTime {
    fn deserialize<D>(deserializer: D) -> Result<FileTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_struct("FileTime", FIELDS, FileTimeVisitor)
    }
}
