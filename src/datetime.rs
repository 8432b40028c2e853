//! Calendar value and register conversion for the DS3231.
//!
//! [`DateTime`] is an immutable broken-down calendar timestamp. Every
//! constructor fully validates and simultaneously derives the day of week,
//! day of year, and two cached epoch scalars: seconds since the Unix epoch
//! (1970-01-01) and seconds since 2000-01-01. The two scalars always differ
//! by exactly [`UNIX_OFFSET`].
//!
//! [`RawDateTime`] is the crate-internal image of the chip's 7 date/time
//! registers and handles the BCD packing, the 12/24-hour split, and the
//! century flag.
//!
//! Errors are reported via [`DateTimeError`]. Interop with chrono's
//! `NaiveDateTime` is provided for callers already living in that ecosystem.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::registers::{
    Date, Day, Hours, Minutes, Month, Seconds, TimeRepresentation, Year,
};

/// Seconds between 1970-01-01T00:00:00 and 2000-01-01T00:00:00.
pub const UNIX_OFFSET: i64 = 946_684_800;

/// Default render pattern: abbreviated weekday, abbreviated month, date,
/// time, year. Example: `Thu Sep 08 14:30:00 2022`.
pub const DEFAULT_FORMAT: &str = "%a %h %d %T %Y";

const SECONDS_PER_DAY: i64 = 86_400;
const SECONDS_PER_HOUR: i64 = 3_600;

const DAYS_IN_MONTH: [u8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

const WEEKDAY_ABBREVIATIONS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Errors from [`DateTime`] construction, parsing, and conversion.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DateTimeError {
    /// A field is out of range, or the combination does not name a real
    /// calendar instant (e.g. February 30th).
    InvalidDateTime,
    /// The instant predates 1970-01-01 and has no non-negative Unix time.
    BeforeUnixEpoch,
    /// The year is outside the chip's representable range (2000-2199).
    UnrepresentableYear,
    /// A date or time string did not match the expected layout.
    Parse,
}

/// Gregorian leap year rule: divisible by 4, except centuries not divisible
/// by 400.
#[must_use]
pub const fn is_leap_year(year: u16) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

const fn days_in_year(year: u16) -> i64 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

fn days_in_month(year: u16, month: u8) -> u8 {
    let base = DAYS_IN_MONTH[usize::from(month) - 1];
    if month == 2 && is_leap_year(year) {
        base + 1
    } else {
        base
    }
}

/// An immutable calendar timestamp.
///
/// Constructed via [`DateTime::new`], [`DateTime::from_unix_time`],
/// [`DateTime::from_y2k_time`], or [`DateTime::parse`]. All derived fields
/// (weekday, day of year, both epoch scalars) are computed once at
/// construction; accessors are free.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DateTime {
    year: u16,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    weekday: u8,
    yearday: u16,
    dst: bool,
    unix_time: i64,
    y2k_time: i64,
}

impl DateTime {
    /// Builds a timestamp from broken-down fields, validating every field
    /// and the day-of-month against the month length.
    ///
    /// `year` is the full year (e.g. 2022); years before 1970 are rejected
    /// so both epoch scalars stay non-negative-based.
    pub fn new(
        year: u16,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Result<Self, DateTimeError> {
        if year < 1970 {
            return Err(DateTimeError::BeforeUnixEpoch);
        }
        if !(1..=12).contains(&month) || hour > 23 || minute > 59 || second > 59 {
            return Err(DateTimeError::InvalidDateTime);
        }
        if day < 1 || day > days_in_month(year, month) {
            return Err(DateTimeError::InvalidDateTime);
        }

        let mut days: i64 = 0;
        for y in 1970..year {
            days += days_in_year(y);
        }
        let mut yearday: u16 = 0;
        for m in 1..month {
            yearday += u16::from(days_in_month(year, m));
        }
        yearday += u16::from(day) - 1;
        days += i64::from(yearday);

        // 1970-01-01 was a Thursday; 1 = Sunday.
        let weekday = u8::try_from((days + 4).rem_euclid(7) + 1)
            .map_err(|_| DateTimeError::InvalidDateTime)?;

        let unix_time = days * SECONDS_PER_DAY
            + i64::from(hour) * SECONDS_PER_HOUR
            + i64::from(minute) * 60
            + i64::from(second);

        Ok(DateTime {
            year,
            month,
            day,
            hour,
            minute,
            second,
            weekday,
            yearday,
            dst: false,
            unix_time,
            y2k_time: unix_time - UNIX_OFFSET,
        })
    }

    /// Rebuilds the full timestamp from seconds since 1970-01-01T00:00:00.
    /// Negative values are rejected.
    pub fn from_unix_time(timestamp: i64) -> Result<Self, DateTimeError> {
        if timestamp < 0 {
            return Err(DateTimeError::BeforeUnixEpoch);
        }
        let mut days = timestamp / SECONDS_PER_DAY;
        let mut remainder = timestamp % SECONDS_PER_DAY;

        let hour = u8::try_from(remainder / SECONDS_PER_HOUR)
            .map_err(|_| DateTimeError::InvalidDateTime)?;
        remainder %= SECONDS_PER_HOUR;
        let minute = u8::try_from(remainder / 60).map_err(|_| DateTimeError::InvalidDateTime)?;
        let second = u8::try_from(remainder % 60).map_err(|_| DateTimeError::InvalidDateTime)?;

        let mut year: u16 = 1970;
        while days >= days_in_year(year) {
            days -= days_in_year(year);
            year = year.checked_add(1).ok_or(DateTimeError::InvalidDateTime)?;
        }
        let mut month: u8 = 1;
        while days >= i64::from(days_in_month(year, month)) {
            days -= i64::from(days_in_month(year, month));
            month += 1;
        }
        let day = u8::try_from(days + 1).map_err(|_| DateTimeError::InvalidDateTime)?;

        DateTime::new(year, month, day, hour, minute, second)
    }

    /// Rebuilds the full timestamp from seconds since 2000-01-01T00:00:00.
    pub fn from_y2k_time(timestamp: i64) -> Result<Self, DateTimeError> {
        let unix = timestamp
            .checked_add(UNIX_OFFSET)
            .ok_or(DateTimeError::InvalidDateTime)?;
        DateTime::from_unix_time(unix)
    }

    /// Parses compile-timestamp style strings: `date` as `"Mmm dd yyyy"`
    /// (e.g. `"Sep  8 2022"`, day may be space-padded) and `time` as
    /// `"HH:MM:SS"`. This is the layout of the C `__DATE__` and `__TIME__`
    /// macros.
    pub fn parse(date: &str, time: &str) -> Result<Self, DateTimeError> {
        let date = date.trim();
        let time = time.trim();
        if date.len() < 5 {
            return Err(DateTimeError::Parse);
        }

        let month_name = date.get(0..3).ok_or(DateTimeError::Parse)?;
        let month = MONTH_ABBREVIATIONS
            .iter()
            .position(|&m| m.eq_ignore_ascii_case(month_name))
            .ok_or(DateTimeError::Parse)?;
        let month = u8::try_from(month + 1).map_err(|_| DateTimeError::Parse)?;

        let mut rest = date[3..].trim_start().splitn(2, ' ');
        let day: u8 = rest
            .next()
            .ok_or(DateTimeError::Parse)?
            .parse()
            .map_err(|_| DateTimeError::Parse)?;
        let year: u16 = rest
            .next()
            .ok_or(DateTimeError::Parse)?
            .trim()
            .parse()
            .map_err(|_| DateTimeError::Parse)?;

        let mut clock = time.splitn(3, ':');
        let hour: u8 = clock
            .next()
            .ok_or(DateTimeError::Parse)?
            .parse()
            .map_err(|_| DateTimeError::Parse)?;
        let minute: u8 = clock
            .next()
            .ok_or(DateTimeError::Parse)?
            .parse()
            .map_err(|_| DateTimeError::Parse)?;
        let second: u8 = clock
            .next()
            .ok_or(DateTimeError::Parse)?
            .parse()
            .map_err(|_| DateTimeError::Parse)?;

        DateTime::new(year, month, day, hour, minute, second)
    }

    /// Marks the timestamp as daylight-saving local time. Purely
    /// informational; no field or scalar is adjusted.
    #[must_use]
    pub fn with_dst(mut self, dst: bool) -> Self {
        self.dst = dst;
        self
    }

    /// Builds a timestamp from a chrono `NaiveDateTime`.
    pub fn from_naive(naive: &NaiveDateTime) -> Result<Self, DateTimeError> {
        let year = u16::try_from(naive.year()).map_err(|_| DateTimeError::InvalidDateTime)?;
        DateTime::new(
            year,
            u8::try_from(naive.month()).map_err(|_| DateTimeError::InvalidDateTime)?,
            u8::try_from(naive.day()).map_err(|_| DateTimeError::InvalidDateTime)?,
            u8::try_from(naive.hour()).map_err(|_| DateTimeError::InvalidDateTime)?,
            u8::try_from(naive.minute()).map_err(|_| DateTimeError::InvalidDateTime)?,
            u8::try_from(naive.second()).map_err(|_| DateTimeError::InvalidDateTime)?,
        )
    }

    /// Converts to a chrono `NaiveDateTime`.
    pub fn to_naive(&self) -> Result<NaiveDateTime, DateTimeError> {
        NaiveDate::from_ymd_opt(
            i32::from(self.year),
            u32::from(self.month),
            u32::from(self.day),
        )
        .and_then(|d| {
            d.and_hms_opt(
                u32::from(self.hour),
                u32::from(self.minute),
                u32::from(self.second),
            )
        })
        .ok_or(DateTimeError::InvalidDateTime)
    }

    /// Full year, e.g. 2022.
    #[must_use]
    pub fn year(&self) -> u16 {
        self.year
    }

    /// Month of year, 1-12.
    #[must_use]
    pub fn month(&self) -> u8 {
        self.month
    }

    /// Day of month, 1-31.
    #[must_use]
    pub fn day(&self) -> u8 {
        self.day
    }

    /// Hour of day, 0-23.
    #[must_use]
    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// Minute, 0-59.
    #[must_use]
    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Second, 0-59.
    #[must_use]
    pub fn second(&self) -> u8 {
        self.second
    }

    /// Day of week, 1-7 with 1 = Sunday.
    #[must_use]
    pub fn weekday(&self) -> u8 {
        self.weekday
    }

    /// Day of year, 0-based (January 1st is 0).
    #[must_use]
    pub fn yearday(&self) -> u16 {
        self.yearday
    }

    /// Daylight-saving marker set via [`DateTime::with_dst`].
    #[must_use]
    pub fn dst(&self) -> bool {
        self.dst
    }

    /// Seconds since 1970-01-01T00:00:00.
    #[must_use]
    pub fn unix_time(&self) -> i64 {
        self.unix_time
    }

    /// Seconds since 2000-01-01T00:00:00. Always `unix_time() -
    /// UNIX_OFFSET`; negative for instants before 2000.
    #[must_use]
    pub fn y2k_time(&self) -> i64 {
        self.y2k_time
    }

    /// Renders the timestamp into `buffer` following `format_spec` and
    /// returns the number of bytes written. Output is truncated at the
    /// buffer's end, never past it.
    ///
    /// Codes: `%a` weekday name, `%b`/`%h` month name, `%d` day, `%H` hour,
    /// `%M` minute, `%S` second, `%Y` year, `%T` = `%H:%M:%S`, `%%` literal
    /// percent. Numeric codes are zero-padded to two digits (`%Y` to four).
    /// Unknown codes are copied through verbatim.
    pub fn format_into(&self, format_spec: &str, buffer: &mut [u8]) -> usize {
        let mut cursor = ByteCursor::new(buffer);
        self.render(format_spec, &mut cursor);
        cursor.written
    }

    fn render(&self, format_spec: &str, cursor: &mut ByteCursor<'_>) {
        let mut chars = format_spec.chars();
        while let Some(c) = chars.next() {
            if c != '%' {
                cursor.push_char(c);
                continue;
            }
            match chars.next() {
                Some('a') => {
                    cursor.push_str(WEEKDAY_ABBREVIATIONS[usize::from(self.weekday - 1)]);
                }
                Some('b') | Some('h') => {
                    cursor.push_str(MONTH_ABBREVIATIONS[usize::from(self.month - 1)]);
                }
                Some('d') => cursor.push_padded(u16::from(self.day), 2),
                Some('H') => cursor.push_padded(u16::from(self.hour), 2),
                Some('M') => cursor.push_padded(u16::from(self.minute), 2),
                Some('S') => cursor.push_padded(u16::from(self.second), 2),
                Some('Y') => cursor.push_padded(self.year, 4),
                Some('T') => {
                    cursor.push_padded(u16::from(self.hour), 2);
                    cursor.push_char(':');
                    cursor.push_padded(u16::from(self.minute), 2);
                    cursor.push_char(':');
                    cursor.push_padded(u16::from(self.second), 2);
                }
                Some('%') => cursor.push_char('%'),
                Some(other) => {
                    cursor.push_char('%');
                    cursor.push_char(other);
                }
                None => cursor.push_char('%'),
            }
        }
    }
}

/// Truncating byte writer over a caller-provided buffer.
struct ByteCursor<'a> {
    buffer: &'a mut [u8],
    written: usize,
}

impl<'a> ByteCursor<'a> {
    fn new(buffer: &'a mut [u8]) -> Self {
        ByteCursor { buffer, written: 0 }
    }

    fn push_byte(&mut self, byte: u8) {
        if self.written < self.buffer.len() {
            self.buffer[self.written] = byte;
            self.written += 1;
        }
    }

    fn push_char(&mut self, c: char) {
        let mut utf8 = [0u8; 4];
        for &byte in c.encode_utf8(&mut utf8).as_bytes() {
            self.push_byte(byte);
        }
    }

    fn push_str(&mut self, s: &str) {
        for &byte in s.as_bytes() {
            self.push_byte(byte);
        }
    }

    fn push_padded(&mut self, value: u16, width: usize) {
        let mut digits = [0u8; 5];
        let mut n = value;
        let mut count = 0;
        loop {
            digits[count] = b'0' + (n % 10) as u8;
            n /= 10;
            count += 1;
            if n == 0 {
                break;
            }
        }
        for _ in count..width {
            self.push_byte(b'0');
        }
        while count > 0 {
            count -= 1;
            self.push_byte(digits[count]);
        }
    }
}

/// Image of the chip's 7 date/time registers (0x00-0x06).
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct RawDateTime {
    pub(crate) seconds: Seconds,
    pub(crate) minutes: Minutes,
    pub(crate) hours: Hours,
    pub(crate) day: Day,
    pub(crate) date: Date,
    pub(crate) month: Month,
    pub(crate) year: Year,
}

impl RawDateTime {
    /// Packs a validated timestamp into register form. The hour register is
    /// encoded in `mode`; the century flag carries years 2100-2199. Years
    /// outside 2000-2199 do not fit the chip.
    pub(crate) fn from_datetime(
        datetime: &DateTime,
        mode: TimeRepresentation,
    ) -> Result<Self, DateTimeError> {
        if !(2000..=2199).contains(&datetime.year()) {
            return Err(DateTimeError::UnrepresentableYear);
        }
        let century = datetime.year() >= 2100;
        let short_year = u8::try_from(datetime.year() % 100)
            .map_err(|_| DateTimeError::InvalidDateTime)?;

        let mut seconds = Seconds::default();
        seconds.set_ten_seconds(datetime.second() / 10);
        seconds.set_seconds(datetime.second() % 10);

        let mut minutes = Minutes::default();
        minutes.set_ten_minutes(datetime.minute() / 10);
        minutes.set_minutes(datetime.minute() % 10);

        let mut day = Day::default();
        day.set_day(datetime.weekday());

        let mut date = Date::default();
        date.set_ten_date(datetime.day() / 10);
        date.set_date(datetime.day() % 10);

        let mut year = Year::default();
        year.set_ten_year(short_year / 10);
        year.set_year(short_year % 10);

        Ok(RawDateTime {
            seconds,
            minutes,
            hours: Hours::encode(datetime.hour(), mode),
            day,
            date,
            month: Month::encode(datetime.month(), century),
            year,
        })
    }

    /// Unpacks register bytes into a validated timestamp. A set century
    /// flag shifts the year into 2100-2199.
    pub(crate) fn into_datetime(self) -> Result<DateTime, DateTimeError> {
        let (month, century) = self.month.decode();
        let base: u16 = if century { 2100 } else { 2000 };
        let year = base + u16::from(10 * self.year.ten_year() + self.year.year());
        let day = 10 * self.date.ten_date() + self.date.date();
        let minute = 10 * self.minutes.ten_minutes() + self.minutes.minutes();
        let second = 10 * self.seconds.ten_seconds() + self.seconds.seconds();
        DateTime::new(year, month, day, self.hours.hour24(), minute, second)
    }
}

impl From<[u8; 7]> for RawDateTime {
    fn from(data: [u8; 7]) -> Self {
        RawDateTime {
            seconds: data[0].into(),
            minutes: data[1].into(),
            hours: data[2].into(),
            day: data[3].into(),
            date: data[4].into(),
            month: data[5].into(),
            year: data[6].into(),
        }
    }
}

impl From<&RawDateTime> for [u8; 7] {
    fn from(raw: &RawDateTime) -> Self {
        [
            raw.seconds.into(),
            raw.minutes.into(),
            raw.hours.into(),
            raw.day.into(),
            raw.date.into(),
            raw.month.into(),
            raw.year.into(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_year_rule() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2400));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2100));
        assert!(!is_leap_year(2023));
    }

    #[test]
    fn epoch_scalars_differ_by_unix_offset() {
        let dt = DateTime::new(2022, 9, 8, 14, 30, 0).unwrap();
        assert_eq!(dt.unix_time(), 1_662_647_400);
        assert_eq!(dt.y2k_time(), 1_662_647_400 - UNIX_OFFSET);
        assert_eq!(dt.unix_time() - dt.y2k_time(), UNIX_OFFSET);
    }

    #[test]
    fn derived_fields() {
        // 2022-09-08 was a Thursday (weekday 5, 1 = Sunday).
        let dt = DateTime::new(2022, 9, 8, 14, 30, 0).unwrap();
        assert_eq!(dt.weekday(), 5);
        assert_eq!(dt.yearday(), 250);

        let jan1 = DateTime::new(2022, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(jan1.yearday(), 0);
        assert_eq!(jan1.weekday(), 7); // Saturday
    }

    #[test]
    fn unix_time_round_trip() {
        for &ts in &[
            0i64,
            86_399,
            86_400,
            UNIX_OFFSET,
            1_662_647_400,
            4_102_444_799, // 2099-12-31T23:59:59
        ] {
            let dt = DateTime::from_unix_time(ts).unwrap();
            assert_eq!(dt.unix_time(), ts, "round trip failed for {}", ts);
        }
    }

    #[test]
    fn from_unix_time_matches_field_construction() {
        let a = DateTime::from_unix_time(1_662_647_400).unwrap();
        let b = DateTime::new(2022, 9, 8, 14, 30, 0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn y2k_construction() {
        let dt = DateTime::from_y2k_time(0).unwrap();
        assert_eq!(dt.year(), 2000);
        assert_eq!(dt.month(), 1);
        assert_eq!(dt.day(), 1);
        assert_eq!(dt.unix_time(), UNIX_OFFSET);
    }

    #[test]
    fn leap_day_handling() {
        let dt = DateTime::new(2024, 2, 29, 12, 0, 0).unwrap();
        assert_eq!(dt.yearday(), 59);
        assert_eq!(
            DateTime::new(2023, 2, 29, 12, 0, 0),
            Err(DateTimeError::InvalidDateTime)
        );
        // 2100 is not a leap year.
        assert_eq!(
            DateTime::new(2100, 2, 29, 0, 0, 0),
            Err(DateTimeError::InvalidDateTime)
        );

        let before = DateTime::new(2024, 2, 28, 23, 59, 59).unwrap();
        let after = DateTime::from_unix_time(before.unix_time() + 1).unwrap();
        assert_eq!((after.month(), after.day()), (2, 29));
    }

    #[test]
    fn field_validation() {
        assert_eq!(
            DateTime::new(2022, 13, 1, 0, 0, 0),
            Err(DateTimeError::InvalidDateTime)
        );
        assert_eq!(
            DateTime::new(2022, 4, 31, 0, 0, 0),
            Err(DateTimeError::InvalidDateTime)
        );
        assert_eq!(
            DateTime::new(2022, 1, 1, 24, 0, 0),
            Err(DateTimeError::InvalidDateTime)
        );
        assert_eq!(
            DateTime::new(1969, 12, 31, 23, 59, 59),
            Err(DateTimeError::BeforeUnixEpoch)
        );
        assert_eq!(
            DateTime::from_unix_time(-1),
            Err(DateTimeError::BeforeUnixEpoch)
        );
    }

    #[test]
    fn parse_compile_timestamps() {
        let dt = DateTime::parse("Sep 08 2022", "14:30:00").unwrap();
        assert_eq!(dt, DateTime::new(2022, 9, 8, 14, 30, 0).unwrap());

        // __DATE__ pads single-digit days with a space.
        let dt = DateTime::parse("Sep  8 2022", "14:30:00").unwrap();
        assert_eq!(dt.day(), 8);

        assert_eq!(
            DateTime::parse("Xyz 08 2022", "14:30:00"),
            Err(DateTimeError::Parse)
        );
        assert_eq!(
            DateTime::parse("Sep 08 2022", "14-30-00"),
            Err(DateTimeError::Parse)
        );
    }

    #[test]
    fn chrono_interop_agrees() {
        let dt = DateTime::new(2022, 9, 8, 14, 30, 0).unwrap();
        let naive = dt.to_naive().unwrap();
        assert_eq!(naive.and_utc().timestamp(), dt.unix_time());
        assert_eq!(DateTime::from_naive(&naive).unwrap(), dt);
    }

    #[test]
    fn dst_marker_does_not_shift_scalars() {
        let plain = DateTime::new(2022, 7, 1, 12, 0, 0).unwrap();
        let dst = plain.with_dst(true);
        assert!(dst.dst());
        assert_eq!(dst.unix_time(), plain.unix_time());
    }

    #[test]
    fn default_format_rendering() {
        let dt = DateTime::new(2022, 9, 8, 14, 30, 0).unwrap();
        let mut buffer = [0u8; 32];
        let n = dt.format_into(DEFAULT_FORMAT, &mut buffer);
        assert_eq!(&buffer[..n], b"Thu Sep 08 14:30:00 2022");
    }

    #[test]
    fn format_codes() {
        let dt = DateTime::new(2024, 2, 29, 5, 7, 9).unwrap();
        let mut buffer = [0u8; 48];
        let n = dt.format_into("%Y-%d %b [%H.%M.%S] %% %q", &mut buffer);
        assert_eq!(&buffer[..n], b"2024-29 Feb [05.07.09] % %q");
    }

    #[test]
    fn format_truncates_at_buffer_end() {
        let dt = DateTime::new(2022, 9, 8, 14, 30, 0).unwrap();
        let mut buffer = [0u8; 7];
        let n = dt.format_into(DEFAULT_FORMAT, &mut buffer);
        assert_eq!(n, 7);
        assert_eq!(&buffer, b"Thu Sep");

        let mut empty: [u8; 0] = [];
        assert_eq!(dt.format_into(DEFAULT_FORMAT, &mut empty), 0);
    }

    #[test]
    fn register_pack_24_hour() {
        let dt = DateTime::new(2022, 9, 8, 14, 30, 0).unwrap();
        let raw = RawDateTime::from_datetime(&dt, TimeRepresentation::TwentyFourHour).unwrap();
        let bytes: [u8; 7] = (&raw).into();
        assert_eq!(bytes, [0x00, 0x30, 0x14, 0x05, 0x08, 0x09, 0x22]);
        assert_eq!(RawDateTime::from(bytes).into_datetime().unwrap(), dt);
    }

    #[test]
    fn register_pack_12_hour() {
        let dt = DateTime::new(2022, 9, 8, 14, 30, 0).unwrap();
        let raw = RawDateTime::from_datetime(&dt, TimeRepresentation::TwelveHour).unwrap();
        let bytes: [u8; 7] = (&raw).into();
        // 2 PM: mode bit 6, PM bit 5, hour 2
        assert_eq!(bytes[2], 0x62);
        assert_eq!(RawDateTime::from(bytes).into_datetime().unwrap(), dt);
    }

    #[test]
    fn century_flag_extends_year_range() {
        let dt = DateTime::new(2150, 6, 15, 0, 0, 0).unwrap();
        let raw = RawDateTime::from_datetime(&dt, TimeRepresentation::TwentyFourHour).unwrap();
        let bytes: [u8; 7] = (&raw).into();
        assert_eq!(bytes[5] & 0x80, 0x80);
        assert_eq!(bytes[6], 0x50);
        assert_eq!(RawDateTime::from(bytes).into_datetime().unwrap().year(), 2150);
    }

    #[test]
    fn register_pack_rejects_out_of_range_years() {
        let dt = DateTime::new(1999, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(
            RawDateTime::from_datetime(&dt, TimeRepresentation::TwentyFourHour),
            Err(DateTimeError::UnrepresentableYear)
        );
        let dt = DateTime::new(2200, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(
            RawDateTime::from_datetime(&dt, TimeRepresentation::TwentyFourHour),
            Err(DateTimeError::UnrepresentableYear)
        );
    }
}
