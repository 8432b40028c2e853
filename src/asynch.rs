//! Async DS3231 driver over `embedded-hal-async`, available with the
//! `async` feature.
//!
//! Mirrors the blocking [`DS3231`](crate::DS3231) API: the same operations,
//! awaited.
//!
//! # Example
//!
//! ```rust,ignore
//! use ds3231_rtc::asynch::DS3231;
//! use ds3231_rtc::DEFAULT_ADDRESS;
//!
//! let mut rtc = DS3231::new(i2c, DEFAULT_ADDRESS);
//! rtc.configure(&config).await?;
//! let now = rtc.datetime().await?;
//! ```

use embedded_hal_async::i2c::I2c;
use paste::paste;

use crate::alarm::{self, AlarmTime};
use crate::datetime::{DateTime, RawDateTime};
use crate::registers::{
    AgingOffset, Control, Date, Day, Hours, InterruptControl, Minutes, Month, Oscillator, RegAddr,
    Seconds, SquareWaveFrequency, Status, Temperature, TemperatureFraction, TimeRepresentation,
    Year,
};
use crate::{Alarm, Config, DS3231Error};

/// DS3231 driver over an async I2C bus.
pub struct DS3231<I2C: I2c> {
    i2c: I2C,
    address: u8,
    time_representation: TimeRepresentation,
}

impl<I2C: I2c> DS3231<I2C> {
    /// Creates a driver on `i2c` at `address` (normally
    /// [`DEFAULT_ADDRESS`](crate::DEFAULT_ADDRESS)).
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
    pub async fn configure(&mut self, config: &Config) -> Result<(), DS3231Error<I2C::Error>> {
        let mut control = self.control().await?;
        control.set_oscillator_enable(config.oscillator_enable);
        control.set_battery_backed_square_wave(config.battery_backed_square_wave);
        control.set_square_wave_frequency(config.square_wave_frequency);
        control.set_interrupt_control(config.interrupt_control);
        #[cfg(feature = "log")]
        log::debug!("control: {:?}", control);
        self.set_control(control).await?;

        let mut hours = self.hour().await?;
        hours.set_time_representation(config.time_representation);
        self.set_hour(hours).await?;
        self.time_representation = config.time_representation;
        Ok(())
    }

    async fn read_raw_datetime(&mut self) -> Result<RawDateTime, DS3231Error<I2C::Error>> {
        let mut data = [0; 7];
        self.i2c
            .write_read(self.address, &[RegAddr::Seconds as u8], &mut data)
            .await?;
        Ok(data.into())
    }

    async fn write_raw_datetime(
        &mut self,
        raw: &RawDateTime,
    ) -> Result<(), DS3231Error<I2C::Error>> {
        let data: [u8; 7] = raw.into();
        self.i2c
            .write(
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
            )
            .await?;
        Ok(())
    }

    /// Reads the current date and time in one 7-byte burst.
    pub async fn datetime(&mut self) -> Result<DateTime, DS3231Error<I2C::Error>> {
        let raw = self.read_raw_datetime().await?;
        raw.into_datetime().map_err(DS3231Error::DateTime)
    }

    /// Writes `datetime` to the clock registers in one burst, then clears
    /// the oscillator-stop flag.
    pub async fn set_datetime(
        &mut self,
        datetime: &DateTime,
    ) -> Result<(), DS3231Error<I2C::Error>> {
        let raw = RawDateTime::from_datetime(datetime, self.time_representation)
            .map_err(DS3231Error::DateTime)?;
        self.write_raw_datetime(&raw).await?;
        self.clear_oscillator_stop_flag().await
    }

    /// Sets the clock from seconds since the Unix epoch.
    pub async fn set_epoch(&mut self, timestamp: i64) -> Result<(), DS3231Error<I2C::Error>> {
        let datetime = DateTime::from_unix_time(timestamp).map_err(DS3231Error::DateTime)?;
        self.set_datetime(&datetime).await
    }

    /// Reads the hour register decoded: `(hour, None)` in 24-hour mode,
    /// `(hour, Some(is_pm))` in 12-hour mode.
    pub async fn hour_of_day(&mut self) -> Result<(u8, Option<bool>), DS3231Error<I2C::Error>> {
        Ok(self.hour().await?.decode())
    }

    /// Writes the hour (0-23), re-encoded into whatever 12/24-hour mode the
    /// chip currently has.
    pub async fn set_hour_of_day(&mut self, hour: u8) -> Result<(), DS3231Error<I2C::Error>> {
        let mode = self.hour().await?.time_representation();
        self.set_hour(Hours::encode(hour, mode)).await
    }

    /// Switches the hour register between 12 and 24-hour mode, re-encoding
    /// the current hour so the instant is unchanged.
    pub async fn set_clock_mode(
        &mut self,
        mode: TimeRepresentation,
    ) -> Result<(), DS3231Error<I2C::Error>> {
        let hour = self.hour().await?.hour24();
        self.set_hour(Hours::encode(hour, mode)).await?;
        self.time_representation = mode;
        Ok(())
    }

    /// Reads alarm 1 in one 4-byte burst, ORing its match-mask bits into
    /// `alarm_bits` (zeroed first when `clear` is set).
    pub async fn alarm1_time(
        &mut self,
        alarm_bits: &mut u8,
        clear: bool,
    ) -> Result<AlarmTime, DS3231Error<I2C::Error>> {
        if clear {
            *alarm_bits = 0;
        }
        let mut data = [0; 4];
        self.i2c
            .write_read(self.address, &[RegAddr::Alarm1Seconds as u8], &mut data)
            .await?;
        Ok(alarm::decode_alarm1(data, alarm_bits))
    }

    /// Writes alarm 1 in one burst with the A1M1-A1M4 masks from
    /// bits 0-3 of `alarm_bits`.
    pub async fn set_alarm1_time(
        &mut self,
        time: &AlarmTime,
        alarm_bits: u8,
    ) -> Result<(), DS3231Error<I2C::Error>> {
        let data = alarm::encode_alarm1(time, alarm_bits);
        self.i2c
            .write(
                self.address,
                &[
                    RegAddr::Alarm1Seconds as u8,
                    data[0],
                    data[1],
                    data[2],
                    data[3],
                ],
            )
            .await?;
        Ok(())
    }

    /// Reads alarm 2 in one 3-byte burst, ORing its match-mask bits into
    /// `alarm_bits` (zeroed first when `clear` is set).
    pub async fn alarm2_time(
        &mut self,
        alarm_bits: &mut u8,
        clear: bool,
    ) -> Result<AlarmTime, DS3231Error<I2C::Error>> {
        if clear {
            *alarm_bits = 0;
        }
        let mut data = [0; 3];
        self.i2c
            .write_read(self.address, &[RegAddr::Alarm2Minutes as u8], &mut data)
            .await?;
        Ok(alarm::decode_alarm2(data, alarm_bits))
    }

    /// Writes alarm 2 in one burst with the A2M2-A2M4 masks from
    /// bits 4-6 of `alarm_bits`.
    pub async fn set_alarm2_time(
        &mut self,
        time: &AlarmTime,
        alarm_bits: u8,
    ) -> Result<(), DS3231Error<I2C::Error>> {
        let data = alarm::encode_alarm2(time, alarm_bits);
        self.i2c
            .write(
                self.address,
                &[RegAddr::Alarm2Minutes as u8, data[0], data[1], data[2]],
            )
            .await?;
        Ok(())
    }

    /// Enables the interrupt for `which`, routing the INT/SQW pin to alarm
    /// interrupts.
    pub async fn enable_alarm(&mut self, which: Alarm) -> Result<(), DS3231Error<I2C::Error>> {
        let mut control = self.control().await?;
        control.set_interrupt_control(InterruptControl::Interrupt);
        match which {
            Alarm::One => control.set_alarm1_interrupt_enable(true),
            Alarm::Two => control.set_alarm2_interrupt_enable(true),
        }
        self.set_control(control).await
    }

    /// Disables the interrupt for `which`.
    pub async fn disable_alarm(&mut self, which: Alarm) -> Result<(), DS3231Error<I2C::Error>> {
        let mut control = self.control().await?;
        match which {
            Alarm::One => control.set_alarm1_interrupt_enable(false),
            Alarm::Two => control.set_alarm2_interrupt_enable(false),
        }
        self.set_control(control).await
    }

    /// Whether the interrupt for `which` is enabled.
    pub async fn alarm_enabled(&mut self, which: Alarm) -> Result<bool, DS3231Error<I2C::Error>> {
        let control = self.control().await?;
        Ok(match which {
            Alarm::One => control.alarm1_interrupt_enable(),
            Alarm::Two => control.alarm2_interrupt_enable(),
        })
    }

    /// Whether `which` has fired since its flag was last cleared; with
    /// `clear` set, a set flag is written back cleared.
    pub async fn alarm_fired(
        &mut self,
        which: Alarm,
        clear: bool,
    ) -> Result<bool, DS3231Error<I2C::Error>> {
        let mut status = self.status().await?;
        let fired = match which {
            Alarm::One => status.alarm1_flag(),
            Alarm::Two => status.alarm2_flag(),
        };
        if fired && clear {
            match which {
                Alarm::One => status.set_alarm1_flag(false),
                Alarm::Two => status.set_alarm2_flag(false),
            }
            self.set_status(status).await?;
        }
        Ok(fired)
    }

    /// Controls the oscillator and square wave output; see the blocking
    /// [`enable_oscillator`](crate::DS3231::enable_oscillator).
    pub async fn enable_oscillator(
        &mut self,
        enable: bool,
        battery_backed: bool,
        frequency: SquareWaveFrequency,
    ) -> Result<(), DS3231Error<I2C::Error>> {
        let mut control = self.control().await?;
        control.set_oscillator_enable(if enable {
            Oscillator::Enabled
        } else {
            Oscillator::Disabled
        });
        control.set_battery_backed_square_wave(battery_backed);
        control.set_square_wave_frequency(frequency);
        control.set_interrupt_control(InterruptControl::SquareWave);
        self.set_control(control).await
    }

    /// Enables or disables the 32kHz output pin.
    pub async fn enable_32khz_output(
        &mut self,
        enable: bool,
    ) -> Result<(), DS3231Error<I2C::Error>> {
        let mut status = self.status().await?;
        status.set_enable_32khz_output(enable);
        self.set_status(status).await
    }

    /// Whether the oscillator has stopped since the flag was last cleared.
    pub async fn oscillator_stopped(&mut self) -> Result<bool, DS3231Error<I2C::Error>> {
        Ok(self.status().await?.oscillator_stop_flag())
    }

    /// Clears the oscillator-stop flag.
    pub async fn clear_oscillator_stop_flag(&mut self) -> Result<(), DS3231Error<I2C::Error>> {
        let mut status = self.status().await?;
        status.set_oscillator_stop_flag(false);
        self.set_status(status).await
    }

    /// Reads the die temperature in degrees Celsius, 0.25° resolution.
    pub async fn temperature_celsius(&mut self) -> Result<f32, DS3231Error<I2C::Error>> {
        let mut data = [0; 2];
        self.i2c
            .write_read(self.address, &[RegAddr::MSBTemp as u8], &mut data)
            .await?;
        Ok(f32::from(i16::from_be_bytes([data[0], data[1] & 0xC0])) / 256.0)
    }
}

// Register access implementations
macro_rules! impl_register_access {
    ($(($name:ident, $regaddr:expr, $typ:ty)),+) => {
        impl<I2C: I2c> DS3231<I2C> {
            $(
                paste! {
                    #[doc = concat!("Gets the value of the ", stringify!($name), " register.")]
                    pub async fn $name(&mut self) -> Result<$typ, DS3231Error<I2C::Error>> {
                        let mut data = [0];
                        self.i2c
                            .write_read(self.address, &[$regaddr as u8], &mut data)
                            .await?;
                        Ok(<$typ>::from(data[0]))
                    }

                    #[doc = concat!("Sets the value of the ", stringify!($name), " register.")]
                    pub async fn [<set_ $name>](&mut self, value: $typ) -> Result<(), DS3231Error<I2C::Error>> {
                        self.i2c.write(
                            self.address,
                            &[$regaddr as u8, value.into()],
                        ).await?;
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

#[cfg(test)]
mod tests {
    extern crate alloc;
    use alloc::vec;

    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTrans};

    use super::*;
    use crate::Oscillator;

    const DEVICE_ADDRESS: u8 = 0x68;

    #[tokio::test]
    async fn test_async_read_control() {
        let mock = I2cMock::new(&[I2cTrans::write_read(
            DEVICE_ADDRESS,
            vec![RegAddr::Control as u8],
            vec![0b0000_0000],
        )]);
        let mut dev = DS3231::new(mock, DEVICE_ADDRESS);

        let control = dev.control().await.unwrap();
        assert_eq!(control.oscillator_enable(), Oscillator::Enabled);
        assert_eq!(control.square_wave_frequency(), SquareWaveFrequency::Hz1);
        dev.i2c.done();
    }

    #[tokio::test]
    async fn test_async_read_datetime() {
        // 2022-09-08 14:30:00, Thursday
        let mock = I2cMock::new(&[I2cTrans::write_read(
            DEVICE_ADDRESS,
            vec![RegAddr::Seconds as u8],
            vec![0x00, 0x30, 0x14, 0x05, 0x08, 0x09, 0x22],
        )]);
        let mut dev = DS3231::new(mock, DEVICE_ADDRESS);

        let dt = dev.datetime().await.unwrap();
        assert_eq!(dt.hour(), 14);
        assert_eq!(dt.minute(), 30);
        assert_eq!(dt.day(), 8);
        assert_eq!(dt.month(), 9);
        assert_eq!(dt.year(), 2022);
        assert_eq!(dt.unix_time(), 1_662_647_400);
        dev.i2c.done();
    }

    #[tokio::test]
    async fn test_async_set_datetime() {
        let dt = DateTime::new(2022, 9, 8, 14, 30, 0).unwrap();

        let mock = I2cMock::new(&[
            I2cTrans::write(
                DEVICE_ADDRESS,
                vec![
                    RegAddr::Seconds as u8,
                    0x00,
                    0x30,
                    0x14,
                    0x05,
                    0x08,
                    0x09,
                    0x22,
                ],
            ),
            I2cTrans::write_read(
                DEVICE_ADDRESS,
                vec![RegAddr::ControlStatus as u8],
                vec![0x80],
            ),
            I2cTrans::write(DEVICE_ADDRESS, vec![RegAddr::ControlStatus as u8, 0x00]),
        ]);
        let mut dev = DS3231::new(mock, DEVICE_ADDRESS);

        dev.set_datetime(&dt).await.unwrap();
        dev.i2c.done();
    }

    #[tokio::test]
    async fn test_async_alarm_round_trip() {
        let time = AlarmTime {
            day_or_date: 3,
            hour: 22,
            minute: 15,
            second: 0,
            day_date_select: crate::DayDateSelect::Day,
            is_pm: None,
        };

        let mock = I2cMock::new(&[
            I2cTrans::write(
                DEVICE_ADDRESS,
                vec![RegAddr::Alarm2Minutes as u8, 0x15, 0x22, 0xC3],
            ),
            I2cTrans::write_read(
                DEVICE_ADDRESS,
                vec![RegAddr::Alarm2Minutes as u8],
                vec![0x15, 0x22, 0xC3],
            ),
        ]);
        let mut dev = DS3231::new(mock, DEVICE_ADDRESS);

        dev.set_alarm2_time(&time, alarm::A2M4).await.unwrap();

        let mut bits = 0u8;
        let read_back = dev.alarm2_time(&mut bits, false).await.unwrap();
        assert_eq!(read_back, time);
        assert_eq!(bits, alarm::A2M4);
        dev.i2c.done();
    }

    #[tokio::test]
    async fn test_async_read_temperature() {
        let mock = I2cMock::new(&[I2cTrans::write_read(
            DEVICE_ADDRESS,
            vec![RegAddr::MSBTemp as u8],
            vec![0x19, 0x40],
        )]);
        let mut dev = DS3231::new(mock, DEVICE_ADDRESS);

        assert_eq!(dev.temperature_celsius().await.unwrap(), 25.25);
        dev.i2c.done();
    }

    #[tokio::test]
    async fn test_async_alarm_fired_and_cleared() {
        let mock = I2cMock::new(&[
            I2cTrans::write_read(
                DEVICE_ADDRESS,
                vec![RegAddr::ControlStatus as u8],
                vec![0x02],
            ),
            I2cTrans::write(DEVICE_ADDRESS, vec![RegAddr::ControlStatus as u8, 0x00]),
        ]);
        let mut dev = DS3231::new(mock, DEVICE_ADDRESS);

        assert!(dev.alarm_fired(Alarm::Two, true).await.unwrap());
        dev.i2c.done();
    }
}
