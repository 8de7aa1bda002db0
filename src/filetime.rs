use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use chrono::{DateTime, TimeZone, Utc};
use std::io::{Read, Write};

use crate::error::Result;

/// Number of 100ns ticks between 1601-01-01 and 1970-01-01.
pub const TICKS_BETWEEN_EPOCHS: i64 = 116_444_736_000_000_000;

const TICKS_PER_SECOND: i64 = 10_000_000;

/// A Windows FILETIME: 100-nanosecond ticks since 1601-01-01T00:00:00Z.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileTime {
    filetime: i64,
}

impl FileTime {
    /// Wraps a raw tick count verbatim, with no validation.
    pub fn new(filetime: i64) -> FileTime {
        FileTime { filetime }
    }

    pub fn filetime(&self) -> i64 {
        self.filetime
    }

    pub fn set_filetime(&mut self, filetime: i64) {
        self.filetime = filetime;
    }

    /// Seconds since the Unix epoch, derived from the stored tick count.
    pub fn unix_time(&self) -> f64 {
        (self.filetime as i128 - TICKS_BETWEEN_EPOCHS as i128) as f64 / TICKS_PER_SECOND as f64
    }

    /// Overwrites the stored tick count from a Unix seconds value.
    pub fn set_unix_time(&mut self, secs: f64) {
        self.filetime = (secs * TICKS_PER_SECOND as f64 + TICKS_BETWEEN_EPOCHS as f64).round() as i64;
    }

    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        let ticks = self.filetime as i128 - TICKS_BETWEEN_EPOCHS as i128;
        let seconds = i64::try_from(ticks.div_euclid(TICKS_PER_SECOND as i128)).ok()?;
        let nanoseconds = (ticks.rem_euclid(TICKS_PER_SECOND as i128) * 100) as u32;
        Utc.timestamp_opt(seconds, nanoseconds).single()
    }

    /// Reads a FILETIME as it appears on the wire: 8 bytes, little-endian.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<FileTime> {
        let filetime = reader.read_i64::<LittleEndian>()?;
        Ok(FileTime::new(filetime))
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_i64::<LittleEndian>(self.filetime)?;
        Ok(())
    }
}

impl std::fmt::Display for FileTime {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.to_datetime() {
            Some(datetime) => write!(f, "{}", datetime.format("%Y/%m/%d %H:%M:%S GMT")),
            // Values chrono cannot represent render as the raw tick count.
            None => write!(f, "{}", self.filetime),
        }
    }
}

/// Builds a FileTime from Unix seconds without the caller touching ticks.
pub fn from_unix_time(secs: f64) -> FileTime {
    let mut filetime = FileTime::new(0);
    filetime.set_unix_time(secs);
    filetime
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    pub fn stores_raw_ticks_verbatim() {
        assert_eq!(FileTime::new(0).filetime(), 0);
        assert_eq!(FileTime::new(-42).filetime(), -42);
        assert_eq!(FileTime::new(i64::MAX).filetime(), i64::MAX);
    }

    #[test]
    pub fn epoch_boundary_is_zero_unix_time() {
        let epoch = FileTime::new(TICKS_BETWEEN_EPOCHS);
        assert_eq!(epoch.unix_time(), 0.0);
    }

    #[test]
    pub fn unix_time_round_trips_through_ticks() {
        let filetime = from_unix_time(1234567890.0);
        assert_eq!(filetime.filetime(), 12345678900000000 + TICKS_BETWEEN_EPOCHS);
        assert_eq!(filetime.unix_time(), 1234567890.0);
    }

    #[test]
    pub fn fractional_seconds_round_to_whole_ticks() {
        let filetime = from_unix_time(0.5);
        assert_eq!(filetime.filetime(), TICKS_BETWEEN_EPOCHS + 5_000_000);
        assert_eq!(filetime.unix_time(), 0.5);
    }

    #[test]
    pub fn negative_unix_time_reaches_back_to_1601() {
        let filetime = from_unix_time(-11644473600.0);
        assert_eq!(filetime.filetime(), 0);
    }

    #[test]
    pub fn setter_overwrites_ticks() {
        let mut filetime = FileTime::new(7);
        filetime.set_unix_time(0.0);
        assert_eq!(filetime.filetime(), TICKS_BETWEEN_EPOCHS);
        filetime.set_filetime(7);
        assert_eq!(filetime.filetime(), 7);
    }

    #[test]
    pub fn renders_unix_epoch_as_gmt() {
        assert_eq!(from_unix_time(0.0).to_string(), "1970/01/01 00:00:00 GMT");
        assert_eq!(
            from_unix_time(1234567890.0).to_string(),
            "2009/02/13 23:31:30 GMT"
        );
    }

    #[test]
    pub fn renders_tick_zero_as_1601() {
        assert_eq!(FileTime::new(0).to_string(), "1601/01/01 00:00:00 GMT");
    }

    #[test]
    pub fn rendering_never_panics_at_extremes() {
        // Either a date string or the raw ticks, but always a string.
        let rendered = FileTime::new(i64::MAX).to_string();
        assert!(!rendered.is_empty());
        let rendered = FileTime::new(i64::MIN).to_string();
        assert!(!rendered.is_empty());
    }

    #[test]
    pub fn rendering_floors_to_whole_seconds() {
        let just_before_epoch = FileTime::new(TICKS_BETWEEN_EPOCHS - 5_000_000);
        assert_eq!(just_before_epoch.to_string(), "1969/12/31 23:59:59 GMT");
    }

    #[test]
    pub fn to_datetime_keeps_subsecond_ticks() {
        let filetime = FileTime::new(TICKS_BETWEEN_EPOCHS + 1);
        let datetime = filetime.to_datetime().unwrap();
        assert_eq!(datetime.timestamp(), 0);
        assert_eq!(datetime.timestamp_subsec_nanos(), 100);
    }

    #[test]
    pub fn equal_ticks_compare_equal() {
        assert_eq!(FileTime::new(12345), FileTime::new(12345));
        assert_ne!(FileTime::new(12345), FileTime::new(12346));
    }

    #[test]
    pub fn orders_by_raw_ticks() {
        assert!(FileTime::new(1) < FileTime::new(2));
        assert!(FileTime::new(-1) < FileTime::new(0));
        assert!(from_unix_time(10.0) > from_unix_time(-10.0));
    }
}
