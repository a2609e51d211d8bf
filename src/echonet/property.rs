//! Echonet Lite property codes (EPC) reported by a low-voltage smart electric energy meter
//!
//! Only the six properties needed to derive power readings are understood. The codes are
//! matched exactly as the cloud API reports them: two lowercase hex characters.

use crate::error::{EchonetError, ParseFailure};
use std::fmt;
use std::str::FromStr;

/// Smart-meter property understood by [`RegisterSet`](super::RegisterSet)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    /// `e0` - measured cumulative amount of electric energy (normal direction)
    NormalDirectionCumulative,
    /// `e3` - measured cumulative amount of electric energy (reverse direction)
    ReverseDirectionCumulative,
    /// `d3` - coefficient applied to the cumulative amounts
    Coefficient,
    /// `e1` - unit for cumulative amounts of electric energy
    CumulativeUnit,
    /// `d7` - number of effective digits for cumulative amounts
    EffectiveDigits,
    /// `e7` - measured instantaneous electric power in watts
    InstantaneousPower,
}

impl Property {
    pub const ALL: [Property; 6] = [
        Property::NormalDirectionCumulative,
        Property::ReverseDirectionCumulative,
        Property::Coefficient,
        Property::CumulativeUnit,
        Property::EffectiveDigits,
        Property::InstantaneousPower,
    ];

    /// The EPC as it appears on the wire
    pub fn epc(self) -> &'static str {
        match self {
            Property::NormalDirectionCumulative => "e0",
            Property::ReverseDirectionCumulative => "e3",
            Property::Coefficient => "d3",
            Property::CumulativeUnit => "e1",
            Property::EffectiveDigits => "d7",
            Property::InstantaneousPower => "e7",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.epc())
    }
}

impl FromStr for Property {
    type Err = EchonetError;

    fn from_str(epc: &str) -> Result<Self, Self::Err> {
        Property::ALL
            .into_iter()
            .find(|p| p.epc() == epc)
            .ok_or_else(|| EchonetError::UnsupportedProperty {
                epc: epc.to_string(),
            })
    }
}

/// Parse a big-endian hex register value into an unsigned integer of width `T`.
///
/// The value must be a non-empty, even-length run of hex digits with no sign or `0x`
/// prefix, and must fit in `T`.
pub(crate) fn parse_hex<T>(property: Property, value: &str) -> Result<T, EchonetError>
where
    T: TryFrom<u64>,
{
    let fail = |reason: ParseFailure| EchonetError::Parse {
        property,
        value: value.to_string(),
        reason,
    };

    if value.is_empty() {
        return Err(fail(ParseFailure::Empty));
    }
    if !value.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(fail(ParseFailure::InvalidDigit));
    }
    if value.len() % 2 != 0 {
        return Err(fail(ParseFailure::OddLength));
    }

    let bits = (std::mem::size_of::<T>() * 8) as u32;
    u64::from_str_radix(value, 16)
        .ok()
        .and_then(|v| T::try_from(v).ok())
        .ok_or_else(|| fail(ParseFailure::Overflow { bits }))
}
