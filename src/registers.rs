//! Register map and bitfield types for the DS3231.
//!
//! Each register is wrapped in a [`bitfield`] type mirroring the chip's
//! packed layout: BCD nibbles for time/date values, independent flag bits
//! for control and status. The hour and month registers carry extra state
//! (12/24-hour mode, century rollover) and get dedicated encode/decode
//! helpers here.

use bitfield::bitfield;

use crate::bcd::{decimal_to_packed, packed_to_decimal};

/// Register addresses, 0x00 through 0x12.
#[allow(unused)]
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegAddr {
    /// Seconds (0-59)
    Seconds = 0x00,
    /// Minutes (0-59)
    Minutes = 0x01,
    /// Hours (1-12 + AM/PM, or 0-23)
    Hours = 0x02,
    /// Day of week (1-7)
    Day = 0x03,
    /// Date of month (1-31)
    Date = 0x04,
    /// Month (1-12) with century flag
    Month = 0x05,
    /// Year (0-99)
    Year = 0x06,
    /// Alarm 1 seconds
    Alarm1Seconds = 0x07,
    /// Alarm 1 minutes
    Alarm1Minutes = 0x08,
    /// Alarm 1 hours
    Alarm1Hours = 0x09,
    /// Alarm 1 day/date
    Alarm1DayDate = 0x0A,
    /// Alarm 2 minutes
    Alarm2Minutes = 0x0B,
    /// Alarm 2 hours
    Alarm2Hours = 0x0C,
    /// Alarm 2 day/date
    Alarm2DayDate = 0x0D,
    /// Control
    Control = 0x0E,
    /// Control/Status
    ControlStatus = 0x0F,
    /// Aging offset
    AgingOffset = 0x10,
    /// Temperature MSB
    MSBTemp = 0x11,
    /// Temperature LSB
    LSBTemp = 0x12,
}

/// Hour register format: bit 6 of the hour register selects the mode.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeRepresentation {
    /// 24-hour format (0-23)
    TwentyFourHour = 0,
    /// 12-hour format (1-12 + AM/PM)
    TwelveHour = 1,
}
impl From<u8> for TimeRepresentation {
    /// # Panics
    /// Panics if the value is not 0 or 1.
    fn from(v: u8) -> Self {
        match v {
            0 => TimeRepresentation::TwentyFourHour,
            1 => TimeRepresentation::TwelveHour,
            _ => panic!("Invalid value for TimeRepresentation: {}", v),
        }
    }
}
impl From<TimeRepresentation> for u8 {
    fn from(v: TimeRepresentation) -> Self {
        v as u8
    }
}

/// Oscillator control (EOSC bit; 0 = running).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Oscillator {
    /// Oscillator runs (also on battery)
    Enabled = 0,
    /// Oscillator stops when main power is lost
    Disabled = 1,
}
impl From<u8> for Oscillator {
    /// # Panics
    /// Panics if the value is not 0 or 1.
    fn from(v: u8) -> Self {
        match v {
            0 => Oscillator::Enabled,
            1 => Oscillator::Disabled,
            _ => panic!("Invalid value for Oscillator: {}", v),
        }
    }
}
impl From<Oscillator> for u8 {
    fn from(v: Oscillator) -> Self {
        v as u8
    }
}

/// Function of the INT/SQW pin (INTCN bit).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterruptControl {
    /// Square wave output
    SquareWave = 0,
    /// Alarm interrupt output
    Interrupt = 1,
}
impl From<u8> for InterruptControl {
    /// # Panics
    /// Panics if the value is not 0 or 1.
    fn from(v: u8) -> Self {
        match v {
            0 => InterruptControl::SquareWave,
            1 => InterruptControl::Interrupt,
            _ => panic!("Invalid value for InterruptControl: {}", v),
        }
    }
}
impl From<InterruptControl> for u8 {
    fn from(v: InterruptControl) -> Self {
        v as u8
    }
}

/// Square wave output frequency (RS2/RS1 bits).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SquareWaveFrequency {
    /// 1 Hz
    Hz1 = 0b00,
    /// 1.024 kHz
    Hz1024 = 0b01,
    /// 4.096 kHz
    Hz4096 = 0b10,
    /// 8.192 kHz
    Hz8192 = 0b11,
}
impl From<u8> for SquareWaveFrequency {
    /// # Panics
    /// Panics if the value is not a 2-bit value.
    fn from(v: u8) -> Self {
        match v {
            0b00 => SquareWaveFrequency::Hz1,
            0b01 => SquareWaveFrequency::Hz1024,
            0b10 => SquareWaveFrequency::Hz4096,
            0b11 => SquareWaveFrequency::Hz8192,
            _ => panic!("Invalid value for SquareWaveFrequency: {}", v),
        }
    }
}
impl From<SquareWaveFrequency> for u8 {
    fn from(v: SquareWaveFrequency) -> Self {
        v as u8
    }
}

/// DY/DT bit of the alarm day/date registers: selects whether the alarm
/// matches a day of the week or a date of the month.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DayDateSelect {
    /// Match the date of the month (1-31)
    Date = 0,
    /// Match the day of the week (1-7, 1 = Sunday)
    Day = 1,
}
impl From<u8> for DayDateSelect {
    /// # Panics
    /// Panics if the value is not 0 or 1.
    fn from(v: u8) -> Self {
        match v {
            0 => DayDateSelect::Date,
            1 => DayDateSelect::Day,
            _ => panic!("Invalid value for DayDateSelect: {}", v),
        }
    }
}
impl From<DayDateSelect> for u8 {
    fn from(v: DayDateSelect) -> Self {
        v as u8
    }
}

// Generates the From<u8>/Into<u8> pair for a register newtype.
macro_rules! from_register_u8 {
    ($typ:ty) => {
        impl From<u8> for $typ {
            fn from(v: u8) -> Self {
                paste::paste!([< $typ >](v))
            }
        }
        impl From<$typ> for u8 {
            fn from(v: $typ) -> Self {
                v.0
            }
        }
    };
}

bitfield! {
    /// Seconds register, BCD.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Seconds(u8);
    impl Debug;
    /// Tens digit (0-5)
    pub ten_seconds, set_ten_seconds: 6, 4;
    /// Units digit (0-9)
    pub seconds, set_seconds: 3, 0;
}
from_register_u8!(Seconds);

bitfield! {
    /// Minutes register, BCD.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Minutes(u8);
    impl Debug;
    /// Tens digit (0-5)
    pub ten_minutes, set_ten_minutes: 6, 4;
    /// Units digit (0-9)
    pub minutes, set_minutes: 3, 0;
}
from_register_u8!(Minutes);

bitfield! {
    /// Hours register. Bit 6 selects 12/24-hour mode; bit 5 is the PM flag
    /// in 12-hour mode or the twenty-hours digit in 24-hour mode.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Hours(u8);
    impl Debug;
    /// 12/24-hour mode select
    pub from into TimeRepresentation, time_representation, set_time_representation: 6, 6;
    /// PM flag (12-hour) or twenty-hours bit (24-hour)
    pub pm_or_twenty_hours, set_pm_or_twenty_hours: 5, 5;
    /// Ten-hours bit
    pub ten_hours, set_ten_hours: 4, 4;
    /// Units digit
    pub hours, set_hours: 3, 0;
}
from_register_u8!(Hours);

impl Hours {
    /// Encodes a 24-hour value (0-23) into the register, keeping `mode`
    /// exactly as given. The driver reads the current mode bit from the chip
    /// before calling this so an hour write never flips the mode.
    ///
    /// In 12-hour mode: 0 becomes 12 AM, 12 becomes 12 PM, 13-23 become
    /// 1-11 PM.
    #[must_use]
    pub fn encode(hour: u8, mode: TimeRepresentation) -> Self {
        let mut value = Hours::default();
        value.set_time_representation(mode);
        match mode {
            TimeRepresentation::TwentyFourHour => {
                value.set_hours(hour % 10);
                value.set_ten_hours(u8::from((10..20).contains(&hour)));
                value.set_pm_or_twenty_hours(u8::from(hour >= 20));
            }
            TimeRepresentation::TwelveHour => {
                let (hour12, pm) = match hour {
                    0 => (12, false),
                    1..=11 => (hour, false),
                    12 => (12, true),
                    _ => (hour - 12, true),
                };
                value.set_hours(hour12 % 10);
                value.set_ten_hours(hour12 / 10);
                value.set_pm_or_twenty_hours(u8::from(pm));
            }
        }
        value
    }

    /// Decodes the register into the raw hour plus the PM flag.
    ///
    /// Returns `(hour, None)` in 24-hour mode (hour 0-23), or
    /// `(hour, Some(is_pm))` in 12-hour mode (hour 1-12). Callers wanting a
    /// normalized 24-hour value use [`Hours::hour24`].
    #[must_use]
    pub fn decode(self) -> (u8, Option<bool>) {
        let hour = 10 * self.ten_hours() + self.hours();
        match self.time_representation() {
            TimeRepresentation::TwentyFourHour => {
                (hour + 20 * self.pm_or_twenty_hours(), None)
            }
            TimeRepresentation::TwelveHour => (hour, Some(self.pm_or_twenty_hours() != 0)),
        }
    }

    /// Decodes and normalizes to a 24-hour value regardless of mode.
    #[must_use]
    pub fn hour24(self) -> u8 {
        match self.decode() {
            (hour, None) => hour,
            (12, Some(false)) => 0,
            (12, Some(true)) => 12,
            (hour, Some(false)) => hour,
            (hour, Some(true)) => hour + 12,
        }
    }
}

bitfield! {
    /// Day-of-week register (1-7, 1 = Sunday).
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Day(u8);
    impl Debug;
    /// Day of week
    pub day, set_day: 2, 0;
}
from_register_u8!(Day);

bitfield! {
    /// Date-of-month register, BCD.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Date(u8);
    impl Debug;
    /// Tens digit (0-3)
    pub ten_date, set_ten_date: 5, 4;
    /// Units digit (0-9)
    pub date, set_date: 3, 0;
}
from_register_u8!(Date);

bitfield! {
    /// Month register, BCD in bits 6:0 plus the century flag in bit 7.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Month(u8);
    impl Debug;
    /// Century rollover flag
    pub century, set_century: 7;
    /// Tens digit (0-1)
    pub ten_month, set_ten_month: 4, 4;
    /// Units digit (0-9)
    pub month, set_month: 3, 0;
}
from_register_u8!(Month);

impl Month {
    /// Encodes a month (1-12) with the century flag.
    #[must_use]
    pub fn encode(month: u8, century: bool) -> Self {
        let mut value = Month(decimal_to_packed(month));
        value.set_century(century);
        value
    }

    /// Decodes into `(month, century)`. The century flag is independent of
    /// the BCD month value.
    #[must_use]
    pub fn decode(self) -> (u8, bool) {
        (packed_to_decimal(self.0 & 0x7F), self.century())
    }
}

bitfield! {
    /// Year register, BCD 0-99.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Year(u8);
    impl Debug;
    /// Tens digit
    pub ten_year, set_ten_year: 7, 4;
    /// Units digit
    pub year, set_year: 3, 0;
}
from_register_u8!(Year);

bitfield! {
    /// Control register (0x0E).
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Control(u8);
    impl Debug;
    /// EOSC: oscillator enable (inverted sense)
    pub from into Oscillator, oscillator_enable, set_oscillator_enable: 7, 7;
    /// BBSQW: square wave on battery power
    pub battery_backed_square_wave, set_battery_backed_square_wave: 6;
    /// CONV: force temperature conversion
    pub convert_temperature, set_convert_temperature: 5;
    /// RS2/RS1: square wave frequency
    pub from into SquareWaveFrequency, square_wave_frequency, set_square_wave_frequency: 4, 3;
    /// INTCN: INT/SQW pin function
    pub from into InterruptControl, interrupt_control, set_interrupt_control: 2, 2;
    /// A2IE: alarm 2 interrupt enable
    pub alarm2_interrupt_enable, set_alarm2_interrupt_enable: 1;
    /// A1IE: alarm 1 interrupt enable
    pub alarm1_interrupt_enable, set_alarm1_interrupt_enable: 0;
}
from_register_u8!(Control);

bitfield! {
    /// Status register (0x0F).
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Status(u8);
    impl Debug;
    /// OSF: the oscillator stopped at some point; time may be invalid
    pub oscillator_stop_flag, set_oscillator_stop_flag: 7;
    /// EN32kHz: 32kHz output enable
    pub enable_32khz_output, set_enable_32khz_output: 3;
    /// BSY: temperature conversion in progress
    pub busy, set_busy: 2;
    /// A2F: alarm 2 matched
    pub alarm2_flag, set_alarm2_flag: 1;
    /// A1F: alarm 1 matched
    pub alarm1_flag, set_alarm1_flag: 0;
}
from_register_u8!(Status);

bitfield! {
    /// Aging offset register, two's complement.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct AgingOffset(u8);
    impl Debug;
    /// Offset in crystal-dependent steps (-128 to 127)
    pub i8, aging_offset, set_aging_offset: 7, 0;
}
from_register_u8!(AgingOffset);

bitfield! {
    /// Temperature integer part, two's complement degrees Celsius.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Temperature(u8);
    impl Debug;
    /// Whole degrees
    pub i8, temperature, set_temperature: 7, 0;
}
from_register_u8!(Temperature);

bitfield! {
    /// Temperature fraction, quarter degrees in bits 7:6.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct TemperatureFraction(u8);
    impl Debug;
    /// Quarter-degree count (0-3)
    pub temperature_fraction, set_temperature_fraction: 7, 6;
}
from_register_u8!(TemperatureFraction);

bitfield! {
    /// Alarm 1 seconds register: BCD seconds plus the A1M1 mask bit.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct AlarmSeconds(u8);
    impl Debug;
    /// A1M1 match mask
    pub alarm_mask1, set_alarm_mask1: 7;
    /// Tens digit (0-5)
    pub ten_seconds, set_ten_seconds: 6, 4;
    /// Units digit (0-9)
    pub seconds, set_seconds: 3, 0;
}
from_register_u8!(AlarmSeconds);

bitfield! {
    /// Alarm minutes register: BCD minutes plus the A1M2/A2M2 mask bit.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct AlarmMinutes(u8);
    impl Debug;
    /// A1M2/A2M2 match mask
    pub alarm_mask2, set_alarm_mask2: 7;
    /// Tens digit (0-5)
    pub ten_minutes, set_ten_minutes: 6, 4;
    /// Units digit (0-9)
    pub minutes, set_minutes: 3, 0;
}
from_register_u8!(AlarmMinutes);

bitfield! {
    /// Alarm hours register: same layout as [`Hours`] plus the A1M3/A2M3
    /// mask bit.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct AlarmHours(u8);
    impl Debug;
    /// A1M3/A2M3 match mask
    pub alarm_mask3, set_alarm_mask3: 7;
    /// 12/24-hour mode select
    pub from into TimeRepresentation, time_representation, set_time_representation: 6, 6;
    /// PM flag (12-hour) or twenty-hours bit (24-hour)
    pub pm_or_twenty_hours, set_pm_or_twenty_hours: 5, 5;
    /// Ten-hours bit
    pub ten_hours, set_ten_hours: 4, 4;
    /// Units digit
    pub hours, set_hours: 3, 0;
}
from_register_u8!(AlarmHours);

bitfield! {
    /// Alarm day/date register: the A1M4/A2M4 mask bit, the DY/DT select,
    /// and either a 4-bit day of week or a 6-bit BCD date depending on it.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct AlarmDayDate(u8);
    impl Debug;
    /// A1M4/A2M4 match mask
    pub alarm_mask4, set_alarm_mask4: 7;
    /// DY/DT: day-of-week vs date-of-month select
    pub from into DayDateSelect, day_date_select, set_day_date_select: 6, 6;
    /// Date tens digit (unused in day mode)
    pub ten_date, set_ten_date: 5, 4;
    /// Day of week, or date units digit
    pub day_or_date, set_day_or_date: 3, 0;
}
from_register_u8!(AlarmDayDate);
