//! Echonet Lite Smart-Meter Register Decoder
//!
//! Turns the raw hex property values reported for a smart electric energy meter into
//! power readings.
//!
//! # Calculation
//!
//! Cumulative energy follows the Nature Remo guide for smart-meter values:
//!
//! ```text
//! max   = 10 ^ d7
//! delta = e0 + max - e3
//! if delta > max { delta -= max }
//! value = delta * unit(e1) * d3
//! ```
//!
//! The wraparound correction is applied at most once. If the two counters drift apart by
//! more than one full wrap the result is wrong; this is a known limitation of the upstream
//! calculation and is not compensated for here.
//!
//! Instantaneous power (`e7`) is reported as-is in watts.
//!
//! # Lifecycle
//!
//! A [`RegisterSet`] is built fresh for every appliance on every collection cycle and
//! dropped afterwards, so values never leak between cycles or appliances.
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use natureremo_exporter::echonet::RegisterSet;
//!
//! let now = Utc::now();
//! let mut registers = RegisterSet::new();
//! registers.set_value("e7", "00000110", now).unwrap();
//!
//! let reading = registers.instantaneous_power().unwrap();
//! assert_eq!(reading.value, 272.0);
//! assert_eq!(reading.observed_at, Some(now));
//! ```

mod property;

pub use property::Property;

use crate::error::EchonetError;
use chrono::{DateTime, Utc};
use property::parse_hex;

/// A single register value and the time the cloud API last reported it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Register<T> {
    pub value: T,
    pub observed_at: Option<DateTime<Utc>>,
}

impl<T> Register<T> {
    fn with_default(value: T) -> Self {
        Self {
            value,
            observed_at: None,
        }
    }

    fn store(&mut self, value: T, observed_at: DateTime<Utc>) {
        self.value = value;
        self.observed_at = Some(observed_at);
    }
}

/// A derived power value with the observation time of its source register
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub value: f64,
    pub observed_at: Option<DateTime<Utc>>,
}

/// Kind of derived power reading, used as the `type` metric label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerKind {
    Cumulative,
    Instantaneous,
}

impl PowerKind {
    pub const ALL: [PowerKind; 2] = [PowerKind::Cumulative, PowerKind::Instantaneous];

    pub fn label(self) -> &'static str {
        match self {
            PowerKind::Cumulative => "cumulative_power",
            PowerKind::Instantaneous => "instantaneous_power",
        }
    }
}

/// Multiplier selected by the cumulative energy unit code (`e1`)
pub fn unit_scale(code: u8) -> Result<f64, EchonetError> {
    let scale = match code {
        0x00 => 1.0,
        0x01 => 0.1,
        0x02 => 0.01,
        0x03 => 0.001,
        0x04 => 0.0001,
        0x0A => 10.0,
        0x0B => 100.0,
        0x0C => 1000.0,
        0x0D => 10000.0,
        _ => return Err(EchonetError::UnexpectedUnitCode { code }),
    };
    Ok(scale)
}

/// Accumulated register state for one smart-meter appliance
#[derive(Debug, Clone, PartialEq)]
pub struct RegisterSet {
    normal_cumulative: Register<u32>,
    reverse_cumulative: Register<u32>,
    coefficient: Register<u32>,
    unit: Register<u8>,
    effective_digits: Register<u8>,
    instantaneous: Register<i32>,
}

impl Default for RegisterSet {
    fn default() -> Self {
        Self {
            normal_cumulative: Register::with_default(0),
            reverse_cumulative: Register::with_default(0),
            coefficient: Register::with_default(1),
            unit: Register::with_default(0),
            effective_digits: Register::with_default(1),
            instantaneous: Register::with_default(0),
        }
    }
}

impl RegisterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a register set from `(epc, hex value, observed at)` triples.
    ///
    /// Stops at the first property that fails to decode.
    pub fn from_properties<'a, I>(properties: I) -> Result<Self, EchonetError>
    where
        I: IntoIterator<Item = (&'a str, &'a str, DateTime<Utc>)>,
    {
        let mut registers = Self::new();
        for (epc, value, observed_at) in properties {
            registers.set_value(epc, value, observed_at)?;
        }
        Ok(registers)
    }

    /// Store a raw hex value for the register selected by `epc`.
    ///
    /// On any error the register set is left untouched, including the timestamp of the
    /// targeted register.
    pub fn set_value(
        &mut self,
        epc: &str,
        value: &str,
        observed_at: DateTime<Utc>,
    ) -> Result<(), EchonetError> {
        let property: Property = epc.parse()?;

        match property {
            Property::NormalDirectionCumulative => self
                .normal_cumulative
                .store(parse_hex(property, value)?, observed_at),
            Property::ReverseDirectionCumulative => self
                .reverse_cumulative
                .store(parse_hex(property, value)?, observed_at),
            Property::Coefficient => self
                .coefficient
                .store(parse_hex(property, value)?, observed_at),
            Property::CumulativeUnit => self.unit.store(parse_hex(property, value)?, observed_at),
            Property::EffectiveDigits => self
                .effective_digits
                .store(parse_hex(property, value)?, observed_at),
            // Read as a positive magnitude; anything above 0x7fffffff overflows
            Property::InstantaneousPower => self
                .instantaneous
                .store(parse_hex(property, value)?, observed_at),
        }

        Ok(())
    }

    /// Raw value and observation time of a single register
    pub fn register(&self, property: Property) -> (i64, Option<DateTime<Utc>>) {
        match property {
            Property::NormalDirectionCumulative => raw(&self.normal_cumulative),
            Property::ReverseDirectionCumulative => raw(&self.reverse_cumulative),
            Property::Coefficient => raw(&self.coefficient),
            Property::CumulativeUnit => raw(&self.unit),
            Property::EffectiveDigits => raw(&self.effective_digits),
            Property::InstantaneousPower => raw(&self.instantaneous),
        }
    }

    /// Cumulative energy, timestamped with the `e0` observation
    pub fn cumulative_power(&self) -> Result<Reading, EchonetError> {
        let unit = unit_scale(self.unit.value)?;
        let max_value = 10f64.powi(i32::from(self.effective_digits.value));
        let coefficient = f64::from(self.coefficient.value);

        let mut value = f64::from(self.normal_cumulative.value);
        value += max_value;
        value -= f64::from(self.reverse_cumulative.value);
        if value > max_value {
            value -= max_value;
        }

        value *= unit * coefficient;
        Ok(Reading {
            value,
            observed_at: self.normal_cumulative.observed_at,
        })
    }

    /// Instantaneous power in watts, timestamped with the `e7` observation.
    ///
    /// Never fails; returns a `Result` to match [`RegisterSet::cumulative_power`].
    pub fn instantaneous_power(&self) -> Result<Reading, EchonetError> {
        Ok(Reading {
            value: f64::from(self.instantaneous.value),
            observed_at: self.instantaneous.observed_at,
        })
    }

    pub fn reading(&self, kind: PowerKind) -> Result<Reading, EchonetError> {
        match kind {
            PowerKind::Cumulative => self.cumulative_power(),
            PowerKind::Instantaneous => self.instantaneous_power(),
        }
    }
}

fn raw<T: Copy + Into<i64>>(register: &Register<T>) -> (i64, Option<DateTime<Utc>>) {
    (register.value.into(), register.observed_at)
}
