//! Rival feature report encoding.
//!
//! Short commands shared by both variants:
//!   - 0x03 CPI:          [0x03, slot, cpi / 50]
//!   - 0x04 polling rate: [0x04, 0x00, code] with 1000/500/250/125 Hz -> 1/2/3/4
//!   - 0x07 LED style:    [0x07, led, style]
//!   - 0x09 commit:       [0x09]
//!
//! LED color is where the variants diverge:
//!   - generic:           [0x08, led, r, g, b]
//!   - second generation: [0x05, 0x00, r, g, b] zero-padded to 32 bytes;
//!     one report drives both LEDs.
//!
//! Protocol reference: libratbag SteelSeries driver (MIT), rival (GPLv2).

use crate::color::Color;
use crate::device::{Cpi, CpiSlot, DeviceKind, LedId, LedStyle, PollingRate};
use crate::error::Result;
use std::fmt;

pub const OP_CPI: u8 = 0x03;
pub const OP_POLLING_RATE: u8 = 0x04;
pub const OP_SHARED_LED_COLOR: u8 = 0x05;
pub const OP_LED_STYLE: u8 = 0x07;
pub const OP_LED_COLOR: u8 = 0x08;
pub const OP_COMMIT: u8 = 0x09;

/// Fixed length of the second-generation color report.
pub const SHARED_COLOR_REPORT_LEN: usize = 32;

/// One feature report, compared byte-for-byte when diffing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Command(Vec<u8>);

impl Command {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Opcode byte.
    pub fn opcode(&self) -> Option<u8> {
        self.0.first().copied()
    }
}

impl From<Vec<u8>> for Command {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Command {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{byte:02X}")?;
        }
        Ok(())
    }
}

impl DeviceKind {
    /// Whether logo and wheel colors are separate reports on this hardware.
    pub fn has_independent_leds(&self) -> bool {
        match self {
            Self::Generic => true,
            Self::SecondGeneration => false,
        }
    }
}

/// LED color report for the given variant.
///
/// On the second generation `led` is ignored: the report always addresses
/// LED 0 and changes both.
pub fn led_color(kind: DeviceKind, led: LedId, color: Color) -> Command {
    let [r, g, b] = color.as_bytes();
    match kind {
        DeviceKind::Generic => Command(vec![OP_LED_COLOR, led.as_byte(), r, g, b]),
        DeviceKind::SecondGeneration => {
            let mut report = vec![OP_SHARED_LED_COLOR, 0x00, r, g, b];
            report.resize(SHARED_COLOR_REPORT_LEN, 0x00);
            Command(report)
        }
    }
}

/// LED color report from an unchecked LED number.
pub fn led_color_raw(kind: DeviceKind, led: i64, color: Color) -> Result<Command> {
    Ok(led_color(kind, LedId::from_raw(led)?, color))
}

pub fn led_style(led: LedId, style: LedStyle) -> Command {
    Command(vec![OP_LED_STYLE, led.as_byte(), style.as_byte()])
}

/// LED style report from unchecked LED number and style.
pub fn led_style_raw(led: i64, style: i64) -> Result<Command> {
    Ok(led_style(LedId::from_raw(led)?, LedStyle::from_raw(style)?))
}

pub fn cpi(slot: CpiSlot, value: Cpi) -> Command {
    Command(vec![OP_CPI, slot.as_byte(), value.steps()])
}

/// CPI report from unchecked slot and value.
pub fn cpi_raw(slot: i64, value: i64) -> Result<Command> {
    Ok(cpi(CpiSlot::from_raw(slot)?, Cpi::new(value)?))
}

fn polling_rate_code(rate: PollingRate) -> u8 {
    match rate {
        PollingRate::Hz1000 => 0x01,
        PollingRate::Hz500 => 0x02,
        PollingRate::Hz250 => 0x03,
        PollingRate::Hz125 => 0x04,
    }
}

pub fn polling_rate(rate: PollingRate) -> Command {
    Command(vec![OP_POLLING_RATE, 0x00, polling_rate_code(rate)])
}

/// Polling rate report from a raw Hz value; fails for anything but
/// 1000/500/250/125.
pub fn polling_rate_hz(hz: i64) -> Result<Command> {
    Ok(polling_rate(PollingRate::from_hz(hz)?))
}

/// Persist the settings sent so far as the active configuration.
pub fn commit() -> Command {
    Command(vec![OP_COMMIT])
}
