//! Alarm register codec for the DS3231.
//!
//! The chip carries two alarms: alarm 1 has seconds precision (4 registers,
//! 0x07-0x0A), alarm 2 fires at 00 seconds (3 registers, 0x0B-0x0D). Each
//! register's top bit is a match-mask bit (A1M1-A1M4, A2M2-A2M4); the
//! day/date register additionally carries the DY/DT select that decides
//! whether 4 bits of day-of-week or 6 bits of BCD date are compared.
//!
//! Decoding gathers the mask bits into a caller-held accumulator byte using
//! the classic layout: A1M1-A1M4 in bits 0-3, A2M2-A2M4 in bits 4-6. The
//! accumulator is only ever ORed into so one byte can collect both alarms'
//! masks across calls; clear it between reads if that is not wanted.
//! Encoding reads the same bit positions back out.
//!
//! Time fields are not range-checked here. The registers hold whatever BCD
//! the caller provides, matching how the chip itself behaves.

use crate::registers::{
    AlarmDayDate, AlarmHours, AlarmMinutes, AlarmSeconds, DayDateSelect, Hours,
    TimeRepresentation,
};

/// A1M1 position in the accumulator byte.
pub const A1M1: u8 = 0b0000_0001;
/// A1M2 position in the accumulator byte.
pub const A1M2: u8 = 0b0000_0010;
/// A1M3 position in the accumulator byte.
pub const A1M3: u8 = 0b0000_0100;
/// A1M4 position in the accumulator byte.
pub const A1M4: u8 = 0b0000_1000;
/// A2M2 position in the accumulator byte.
pub const A2M2: u8 = 0b0001_0000;
/// A2M3 position in the accumulator byte.
pub const A2M3: u8 = 0b0010_0000;
/// A2M4 position in the accumulator byte.
pub const A2M4: u8 = 0b0100_0000;

/// Decoded alarm time fields. `second` is always 0 for alarm 2.
///
/// `is_pm` is `Some` when the alarm's hour register is in 12-hour mode,
/// carrying the PM flag; `None` means `hour` is a 24-hour value.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmTime {
    /// Day of week (1-7) or date of month (1-31), per `day_date_select`.
    pub day_or_date: u8,
    /// Hour, 0-23 or 1-12 per `is_pm`.
    pub hour: u8,
    /// Minute, 0-59.
    pub minute: u8,
    /// Second, 0-59. Ignored by alarm 2.
    pub second: u8,
    /// Whether `day_or_date` names a weekday or a date.
    pub day_date_select: DayDateSelect,
    /// PM flag in 12-hour mode, `None` in 24-hour mode.
    pub is_pm: Option<bool>,
}

/// Decodes the four alarm 1 registers. Mask bits are ORed into bits 0-3 of
/// `alarm_bits`; existing accumulator contents are kept.
pub fn decode_alarm1(raw: [u8; 4], alarm_bits: &mut u8) -> AlarmTime {
    let seconds = AlarmSeconds::from(raw[0]);
    let minutes = AlarmMinutes::from(raw[1]);
    let hours = AlarmHours::from(raw[2]);
    let day_date = AlarmDayDate::from(raw[3]);

    *alarm_bits |= u8::from(seconds.alarm_mask1()) * A1M1;
    *alarm_bits |= u8::from(minutes.alarm_mask2()) * A1M2;
    *alarm_bits |= u8::from(hours.alarm_mask3()) * A1M3;
    *alarm_bits |= u8::from(day_date.alarm_mask4()) * A1M4;

    let (hour, is_pm) = Hours::from(raw[2] & 0x7F).decode();
    AlarmTime {
        day_or_date: decode_day_or_date(day_date),
        hour,
        minute: 10 * minutes.ten_minutes() + minutes.minutes(),
        second: 10 * seconds.ten_seconds() + seconds.seconds(),
        day_date_select: day_date.day_date_select(),
        is_pm,
    }
}

/// Encodes alarm 1 registers from `time`, placing bits 0-3 of `alarm_bits`
/// into the A1M1-A1M4 positions. The exact inverse of [`decode_alarm1`].
#[must_use]
pub fn encode_alarm1(time: &AlarmTime, alarm_bits: u8) -> [u8; 4] {
    let mut seconds = AlarmSeconds::default();
    seconds.set_ten_seconds(time.second / 10);
    seconds.set_seconds(time.second % 10);
    seconds.set_alarm_mask1(alarm_bits & A1M1 != 0);

    let mut minutes = AlarmMinutes::default();
    minutes.set_ten_minutes(time.minute / 10);
    minutes.set_minutes(time.minute % 10);
    minutes.set_alarm_mask2(alarm_bits & A1M2 != 0);

    let mut hours = AlarmHours::from(encode_hour(time));
    hours.set_alarm_mask3(alarm_bits & A1M3 != 0);

    let mut day_date = encode_day_or_date(time);
    day_date.set_alarm_mask4(alarm_bits & A1M4 != 0);

    [
        seconds.into(),
        minutes.into(),
        hours.into(),
        day_date.into(),
    ]
}

/// Decodes the three alarm 2 registers. Mask bits are ORed into bits 4-6 of
/// `alarm_bits`; existing accumulator contents are kept.
pub fn decode_alarm2(raw: [u8; 3], alarm_bits: &mut u8) -> AlarmTime {
    let minutes = AlarmMinutes::from(raw[0]);
    let hours = AlarmHours::from(raw[1]);
    let day_date = AlarmDayDate::from(raw[2]);

    *alarm_bits |= u8::from(minutes.alarm_mask2()) * A2M2;
    *alarm_bits |= u8::from(hours.alarm_mask3()) * A2M3;
    *alarm_bits |= u8::from(day_date.alarm_mask4()) * A2M4;

    let (hour, is_pm) = Hours::from(raw[1] & 0x7F).decode();
    AlarmTime {
        day_or_date: decode_day_or_date(day_date),
        hour,
        minute: 10 * minutes.ten_minutes() + minutes.minutes(),
        second: 0,
        day_date_select: day_date.day_date_select(),
        is_pm,
    }
}

/// Encodes alarm 2 registers from `time`, placing bits 4-6 of `alarm_bits`
/// into the A2M2-A2M4 positions. `time.second` is ignored.
#[must_use]
pub fn encode_alarm2(time: &AlarmTime, alarm_bits: u8) -> [u8; 3] {
    let mut minutes = AlarmMinutes::default();
    minutes.set_ten_minutes(time.minute / 10);
    minutes.set_minutes(time.minute % 10);
    minutes.set_alarm_mask2(alarm_bits & A2M2 != 0);

    let mut hours = AlarmHours::from(encode_hour(time));
    hours.set_alarm_mask3(alarm_bits & A2M3 != 0);

    let mut day_date = encode_day_or_date(time);
    day_date.set_alarm_mask4(alarm_bits & A2M4 != 0);

    [minutes.into(), hours.into(), day_date.into()]
}

fn encode_hour(time: &AlarmTime) -> u8 {
    match time.is_pm {
        None => Hours::encode(time.hour, TimeRepresentation::TwentyFourHour).into(),
        Some(pm) => {
            // A 24-hour value handed in with a PM flag still lands on the
            // right register bits.
            let hour = if time.hour > 12 {
                time.hour - 12
            } else {
                time.hour
            };
            let mut value = Hours::encode(hour, TimeRepresentation::TwelveHour);
            value.set_pm_or_twenty_hours(u8::from(pm || time.hour > 12));
            value.into()
        }
    }
}

fn decode_day_or_date(day_date: AlarmDayDate) -> u8 {
    match day_date.day_date_select() {
        // Day of week uses only the low 4 bits.
        DayDateSelect::Day => day_date.day_or_date(),
        // Date of month is BCD across 6 bits.
        DayDateSelect::Date => 10 * day_date.ten_date() + day_date.day_or_date(),
    }
}

fn encode_day_or_date(time: &AlarmTime) -> AlarmDayDate {
    let mut day_date = AlarmDayDate::default();
    day_date.set_day_date_select(time.day_date_select);
    match time.day_date_select {
        DayDateSelect::Day => day_date.set_day_or_date(time.day_or_date),
        DayDateSelect::Date => {
            day_date.set_ten_date(time.day_or_date / 10);
            day_date.set_day_or_date(time.day_or_date % 10);
        }
    }
    day_date
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alarm1_decode_accumulates_mask_bits() {
        // All four mask bits set: fire every second.
        let mut bits = 0u8;
        let time = decode_alarm1([0x80, 0x80, 0x80, 0x80], &mut bits);
        assert_eq!(bits, A1M1 | A1M2 | A1M3 | A1M4);
        assert_eq!(time.second, 0);
        assert_eq!(time.minute, 0);
        assert_eq!(time.hour, 0);
    }

    #[test]
    fn accumulator_is_never_cleared() {
        let mut bits = 0u8;
        decode_alarm1([0x80, 0x00, 0x00, 0x00], &mut bits);
        assert_eq!(bits, A1M1);
        // A second decode with no mask bits set leaves the old bits alone.
        decode_alarm1([0x00, 0x00, 0x00, 0x00], &mut bits);
        assert_eq!(bits, A1M1);
        // Alarm 2 bits join the same byte.
        decode_alarm2([0x80, 0x80, 0x80], &mut bits);
        assert_eq!(bits, A1M1 | A2M2 | A2M3 | A2M4);
    }

    #[test]
    fn alarm1_time_fields() {
        // 14:30:45 daily (A1M4 set), date mode.
        let mut bits = 0u8;
        let time = decode_alarm1([0x45, 0x30, 0x14, 0x80], &mut bits);
        assert_eq!(bits, A1M4);
        assert_eq!(time.second, 45);
        assert_eq!(time.minute, 30);
        assert_eq!(time.hour, 14);
        assert_eq!(time.is_pm, None);
        assert_eq!(time.day_date_select, DayDateSelect::Date);
    }

    #[test]
    fn alarm1_round_trip() {
        let time = AlarmTime {
            day_or_date: 25,
            hour: 7,
            minute: 45,
            second: 30,
            day_date_select: DayDateSelect::Date,
            is_pm: None,
        };
        let raw = encode_alarm1(&time, A1M1 | A1M3);
        assert_eq!(raw, [0x80 | 0x30, 0x45, 0x80 | 0x07, 0x25]);

        let mut bits = 0u8;
        assert_eq!(decode_alarm1(raw, &mut bits), time);
        assert_eq!(bits, A1M1 | A1M3);
    }

    #[test]
    fn alarm2_round_trip() {
        let time = AlarmTime {
            day_or_date: 3,
            hour: 22,
            minute: 15,
            second: 0,
            day_date_select: DayDateSelect::Day,
            is_pm: None,
        };
        let raw = encode_alarm2(&time, A2M4);
        assert_eq!(raw, [0x15, 0x22, 0x80 | 0x40 | 0x03]);

        let mut bits = 0u8;
        assert_eq!(decode_alarm2(raw, &mut bits), time);
        assert_eq!(bits, A2M4);
    }

    #[test]
    fn day_mode_uses_four_bits_date_mode_six() {
        let day = AlarmTime {
            day_or_date: 7,
            hour: 0,
            minute: 0,
            second: 0,
            day_date_select: DayDateSelect::Day,
            is_pm: None,
        };
        assert_eq!(encode_alarm1(&day, 0)[3], 0x47);

        let date = AlarmTime {
            day_or_date: 31,
            ..day
        };
        let date = AlarmTime {
            day_date_select: DayDateSelect::Date,
            ..date
        };
        assert_eq!(encode_alarm1(&date, 0)[3], 0x31);
    }

    #[test]
    fn twelve_hour_alarm_encoding() {
        // 9 PM in 12-hour mode.
        let time = AlarmTime {
            day_or_date: 1,
            hour: 9,
            minute: 0,
            second: 0,
            day_date_select: DayDateSelect::Date,
            is_pm: Some(true),
        };
        let raw = encode_alarm1(&time, 0);
        assert_eq!(raw[2], 0x40 | 0x20 | 0x09);

        let mut bits = 0u8;
        let decoded = decode_alarm1(raw, &mut bits);
        assert_eq!(decoded.hour, 9);
        assert_eq!(decoded.is_pm, Some(true));
    }

    #[test]
    fn twelve_hour_alarm_accepts_24_hour_input() {
        // Hour 21 with a 12-hour request lands as 9 PM.
        let time = AlarmTime {
            day_or_date: 1,
            hour: 21,
            minute: 0,
            second: 0,
            day_date_select: DayDateSelect::Date,
            is_pm: Some(false),
        };
        let raw = encode_alarm1(&time, 0);
        assert_eq!(raw[2], 0x40 | 0x20 | 0x09);
    }
}
