//! Platform-agnostic DS3231 real-time clock driver.
//!
//! The DS3231 is an I2C RTC with an integrated temperature-compensated
//! crystal oscillator, two alarms, and a programmable square wave output.
//! This crate talks to it through the `embedded-hal` 1.0 [`I2c`] trait
//! (or `embedded-hal-async` with the `async` feature, see [`asynch`]).
//!
//! Timestamps are exchanged as [`DateTime`], an immutable calendar value
//! carrying both a Unix and a year-2000 epoch scalar, with text parsing and
//! buffer-based formatting for `no_std` targets. chrono interop is
//! available via [`DateTime::from_naive`] / [`DateTime::to_naive`].
//!
//! # Example
//!
//! ```rust,ignore
//! use ds3231_rtc::{DateTime, DS3231, DEFAULT_ADDRESS};
//!
//! let mut rtc = DS3231::new(i2c, DEFAULT_ADDRESS);
//! rtc.set_datetime(&DateTime::new(2022, 9, 8, 14, 30, 0)?)?;
//! let now = rtc.datetime()?;
//! ```

#![no_std]

pub mod alarm;
#[cfg(feature = "async")]
pub mod asynch;
pub mod bcd;
pub mod datetime;
pub mod registers;

use embedded_hal::i2c::I2c;

pub use crate::alarm::AlarmTime;
pub use crate::datetime::{DateTime, DateTimeError, DEFAULT_FORMAT, UNIX_OFFSET};
pub use crate::registers::{
    AgingOffset, Control, Date, Day, DayDateSelect, Hours, InterruptControl, Minutes, Month,
    Oscillator, RegAddr, Seconds, SquareWaveFrequency, Status, Temperature, TemperatureFraction,
    TimeRepresentation, Year,
};

use crate::datetime::RawDateTime;

/// Factory-fixed I2C address of the DS3231.
pub const DEFAULT_ADDRESS: u8 = 0x68;

/// Device configuration applied by [`DS3231::configure`].
pub struct Config {
    /// 12 or 24-hour representation for the time registers.
    pub time_representation: TimeRepresentation,
    /// Square wave output frequency.
    pub square_wave_frequency: SquareWaveFrequency,
    /// INT/SQW pin function.
    pub interrupt_control: InterruptControl,
    /// Keep the square wave running on battery power.
    pub battery_backed_square_wave: bool,
    /// Oscillator behavior on battery power.
    pub oscillator_enable: Oscillator,
}

/// Driver errors: either the bus failed or a timestamp was invalid.
#[derive(Debug)]
pub enum DS3231Error<I2CE> {
    /// I2C bus error
    I2c(I2CE),
    /// Calendar conversion error
    DateTime(DateTimeError),
}

impl<I2CE> From<I2CE> for DS3231Error<I2CE> {
    fn from(e: I2CE) -> Self {
        DS3231Error::I2c(e)
    }
}

/// Selects one of the chip's two alarms.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Alarm {
    /// Alarm 1, seconds precision
    One,
    /// Alarm 2, fires at 00 seconds
    Two,
}

/// DS3231 driver over a blocking I2C bus.
pub struct DS3231<I2C: I2c> {
    i2c: I2C,
    address: u8,
    time_representation: TimeRepresentation,
}

impl<I2C: I2c> DS3231<I2C> {
    /// Creates a driver on `i2c` at `address` (normally
    /// [`DEFAULT_ADDRESS`]). The hour registers are assumed to be in
    /// 24-hour mode until [`configure`](Self::configure) or
    /// [`set_clock_mode`](Self::set_clock_mode) says otherwise.
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            time_representation: TimeRepresentation::TwentyFourHour,
        }
    }

    /// Releases the I2C bus.
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Applies `config` to the control register and the hour-mode bit.
    pub fn configure(&mut self, config: &Config) -> Result<(), DS3231Error<I2C::Error>> {
        let mut control = self.control()?;
        control.set_oscillator_enable(config.oscillator_enable);
        control.set_battery_backed_square_wave(config.battery_backed_square_wave);
        control.set_square_wave_frequency(config.square_wave_frequency);
        control.set_interrupt_control(config.interrupt_control);
        #[cfg(feature = "log")]
        log::debug!("control: {:?}", control);
        self.set_control(control)?;

        let mut hours = self.hour()?;
        hours.set_time_representation(config.time_representation);
        self.set_hour(hours)?;
        self.time_representation = config.time_representation;
        Ok(())
    }

    fn read_raw_datetime(&mut self) -> Result<RawDateTime, DS3231Error<I2C::Error>> {
        let mut data = [0; 7];
        self.i2c
            .write_read(self.address, &[RegAddr::Seconds as u8], &mut data)?;
        Ok(data.into())
    }

    fn write_raw_datetime(&mut self, raw: &RawDateTime) -> Result<(), DS3231Error<I2C::Error>> {
        let data: [u8; 7] = raw.into();
        self.i2c.write(
            self.address,
            &[
                RegAddr::Seconds as u8,
                data[0],
                data[1],
                data[2],
                data[3],
                data[4],
                data[5],
                data[6],
            ],
        )?;
        Ok(())
    }

    /// Reads the current date and time in one 7-byte burst.
    pub fn datetime(&mut self) -> Result<DateTime, DS3231Error<I2C::Error>> {
        let raw = self.read_raw_datetime()?;
        raw.into_datetime().map_err(DS3231Error::DateTime)
    }

    /// Writes `datetime` to the clock registers in one burst, then clears
    /// the oscillator-stop flag: the time is now known good.
    pub fn set_datetime(&mut self, datetime: &DateTime) -> Result<(), DS3231Error<I2C::Error>> {
        let raw = RawDateTime::from_datetime(datetime, self.time_representation)
            .map_err(DS3231Error::DateTime)?;
        self.write_raw_datetime(&raw)?;
        self.clear_oscillator_stop_flag()
    }

    /// Sets the clock from seconds since the Unix epoch.
    pub fn set_epoch(&mut self, timestamp: i64) -> Result<(), DS3231Error<I2C::Error>> {
        let datetime = DateTime::from_unix_time(timestamp).map_err(DS3231Error::DateTime)?;
        self.set_datetime(&datetime)
    }

    /// Reads the hour register decoded: `(hour, None)` in 24-hour mode,
    /// `(hour, Some(is_pm))` in 12-hour mode.
    pub fn hour_of_day(&mut self) -> Result<(u8, Option<bool>), DS3231Error<I2C::Error>> {
        Ok(self.hour()?.decode())
    }

    /// Writes the hour (0-23), re-encoded into whatever 12/24-hour mode the
    /// chip currently has. The mode bit is read first and never changed.
    pub fn set_hour_of_day(&mut self, hour: u8) -> Result<(), DS3231Error<I2C::Error>> {
        let mode = self.hour()?.time_representation();
        self.set_hour(Hours::encode(hour, mode))
    }

    /// Switches the hour register between 12 and 24-hour mode, re-encoding
    /// the current hour so the instant is unchanged.
    pub fn set_clock_mode(&mut self, mode: TimeRepresentation) -> Result<(), DS3231Error<I2C::Error>> {
        let hour = self.hour()?.hour24();
        self.set_hour(Hours::encode(hour, mode))?;
        self.time_representation = mode;
        Ok(())
    }

    /// Reads alarm 1 in one 4-byte burst. Match-mask bits are ORed into
    /// bits 0-3 of `alarm_bits` (see [`alarm`]); when `clear` is set, the
    /// accumulator is zeroed first.
    pub fn alarm1_time(
        &mut self,
        alarm_bits: &mut u8,
        clear: bool,
    ) -> Result<AlarmTime, DS3231Error<I2C::Error>> {
        if clear {
            *alarm_bits = 0;
        }
        let mut data = [0; 4];
        self.i2c
            .write_read(self.address, &[RegAddr::Alarm1Seconds as u8], &mut data)?;
        Ok(alarm::decode_alarm1(data, alarm_bits))
    }

    /// Writes alarm 1 in one burst, taking the A1M1-A1M4 match masks from
    /// bits 0-3 of `alarm_bits`.
    pub fn set_alarm1_time(
        &mut self,
        time: &AlarmTime,
        alarm_bits: u8,
    ) -> Result<(), DS3231Error<I2C::Error>> {
        let data = alarm::encode_alarm1(time, alarm_bits);
        self.i2c.write(
            self.address,
            &[
                RegAddr::Alarm1Seconds as u8,
                data[0],
                data[1],
                data[2],
                data[3],
            ],
        )?;
        Ok(())
    }

    /// Reads alarm 2 in one 3-byte burst. Match-mask bits are ORed into
    /// bits 4-6 of `alarm_bits`; when `clear` is set, the accumulator is
    /// zeroed first.
    pub fn alarm2_time(
        &mut self,
        alarm_bits: &mut u8,
        clear: bool,
    ) -> Result<AlarmTime, DS3231Error<I2C::Error>> {
        if clear {
            *alarm_bits = 0;
        }
        let mut data = [0; 3];
        self.i2c
            .write_read(self.address, &[RegAddr::Alarm2Minutes as u8], &mut data)?;
        Ok(alarm::decode_alarm2(data, alarm_bits))
    }

    /// Writes alarm 2 in one burst, taking the A2M2-A2M4 match masks from
    /// bits 4-6 of `alarm_bits`.
    pub fn set_alarm2_time(
        &mut self,
        time: &AlarmTime,
        alarm_bits: u8,
    ) -> Result<(), DS3231Error<I2C::Error>> {
        let data = alarm::encode_alarm2(time, alarm_bits);
        self.i2c.write(
            self.address,
            &[RegAddr::Alarm2Minutes as u8, data[0], data[1], data[2]],
        )?;
        Ok(())
    }

    /// Enables the interrupt for `which`, routing the INT/SQW pin to alarm
    /// interrupts (INTCN set).
    pub fn enable_alarm(&mut self, which: Alarm) -> Result<(), DS3231Error<I2C::Error>> {
        let mut control = self.control()?;
        control.set_interrupt_control(InterruptControl::Interrupt);
        match which {
            Alarm::One => control.set_alarm1_interrupt_enable(true),
            Alarm::Two => control.set_alarm2_interrupt_enable(true),
        }
        self.set_control(control)
    }

    /// Disables the interrupt for `which`. The INT/SQW pin function is left
    /// alone.
    pub fn disable_alarm(&mut self, which: Alarm) -> Result<(), DS3231Error<I2C::Error>> {
        let mut control = self.control()?;
        match which {
            Alarm::One => control.set_alarm1_interrupt_enable(false),
            Alarm::Two => control.set_alarm2_interrupt_enable(false),
        }
        self.set_control(control)
    }

    /// Whether the interrupt for `which` is enabled.
    pub fn alarm_enabled(&mut self, which: Alarm) -> Result<bool, DS3231Error<I2C::Error>> {
        let control = self.control()?;
        Ok(match which {
            Alarm::One => control.alarm1_interrupt_enable(),
            Alarm::Two => control.alarm2_interrupt_enable(),
        })
    }

    /// Whether `which` has fired since its flag was last cleared. With
    /// `clear` set, a set flag is written back cleared (the other alarm's
    /// flag is untouched: the status write keeps its current value).
    pub fn alarm_fired(
        &mut self,
        which: Alarm,
        clear: bool,
    ) -> Result<bool, DS3231Error<I2C::Error>> {
        let mut status = self.status()?;
        let fired = match which {
            Alarm::One => status.alarm1_flag(),
            Alarm::Two => status.alarm2_flag(),
        };
        if fired && clear {
            match which {
                Alarm::One => status.set_alarm1_flag(false),
                Alarm::Two => status.set_alarm2_flag(false),
            }
            self.set_status(status)?;
        }
        Ok(fired)
    }

    /// Controls the oscillator and square wave output. With `enable` the
    /// oscillator runs on battery and the INT/SQW pin outputs a square wave
    /// at `frequency` (`battery_backed` keeps it running on battery power);
    /// without it the oscillator stops on battery power.
    pub fn enable_oscillator(
        &mut self,
        enable: bool,
        battery_backed: bool,
        frequency: SquareWaveFrequency,
    ) -> Result<(), DS3231Error<I2C::Error>> {
        let mut control = self.control()?;
        control.set_oscillator_enable(if enable {
            Oscillator::Enabled
        } else {
            Oscillator::Disabled
        });
        control.set_battery_backed_square_wave(battery_backed);
        control.set_square_wave_frequency(frequency);
        control.set_interrupt_control(InterruptControl::SquareWave);
        self.set_control(control)
    }

    /// Enables or disables the 32kHz output pin.
    pub fn enable_32khz_output(&mut self, enable: bool) -> Result<(), DS3231Error<I2C::Error>> {
        let mut status = self.status()?;
        status.set_enable_32khz_output(enable);
        self.set_status(status)
    }

    /// Whether the oscillator has stopped since the flag was last cleared.
    /// A set flag means the time registers may be stale.
    pub fn oscillator_stopped(&mut self) -> Result<bool, DS3231Error<I2C::Error>> {
        Ok(self.status()?.oscillator_stop_flag())
    }

    /// Clears the oscillator-stop flag.
    pub fn clear_oscillator_stop_flag(&mut self) -> Result<(), DS3231Error<I2C::Error>> {
        let mut status = self.status()?;
        status.set_oscillator_stop_flag(false);
        self.set_status(status)
    }

    /// Reads the die temperature in degrees Celsius, 0.25° resolution.
    /// Both temperature registers are read in one burst.
    pub fn temperature_celsius(&mut self) -> Result<f32, DS3231Error<I2C::Error>> {
        let mut data = [0; 2];
        self.i2c
            .write_read(self.address, &[RegAddr::MSBTemp as u8], &mut data)?;
        Ok(f32::from(i16::from_be_bytes([data[0], data[1] & 0xC0])) / 256.0)
    }
}

// Register access implementations
macro_rules! impl_register_access {
    ($(($name:ident, $regaddr:expr, $typ:ty)),+) => {
        impl<I2C: I2c> DS3231<I2C> {
            $(
                paste::paste! {
                    #[doc = concat!("Gets the value of the ", stringify!($name), " register.")]
                    pub fn $name(&mut self) -> Result<$typ, DS3231Error<I2C::Error>> {
                        let mut data = [0];
                        self.i2c
                            .write_read(self.address, &[$regaddr as u8], &mut data)?;
                        Ok(<$typ>::from(data[0]))
                    }

                    #[doc = concat!("Sets the value of the ", stringify!($name), " register.")]
                    pub fn [<set_ $name>](&mut self, value: $typ) -> Result<(), DS3231Error<I2C::Error>> {
                        self.i2c.write(
                            self.address,
                            &[$regaddr as u8, value.into()],
                        )?;
                        Ok(())
                    }
                }
            )+
        }
    }
}

impl_register_access!(
    (second, RegAddr::Seconds, Seconds),
    (minute, RegAddr::Minutes, Minutes),
    (hour, RegAddr::Hours, Hours),
    (day, RegAddr::Day, Day),
    (date, RegAddr::Date, Date),
    (month, RegAddr::Month, Month),
    (year, RegAddr::Year, Year),
    (control, RegAddr::Control, Control),
    (status, RegAddr::ControlStatus, Status),
    (aging_offset, RegAddr::AgingOffset, AgingOffset),
    (temperature, RegAddr::MSBTemp, Temperature),
    (temperature_fraction, RegAddr::LSBTemp, TemperatureFraction)
);
