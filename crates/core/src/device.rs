//! Device model: hardware identity, protocol variant selection, and the
//! typed settings the firmware understands.

use crate::error::{Error, Result};
use crate::{pids, STEELSERIES_VID};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// HID identity of the generic Rival family (Rival 300 and friends).
pub const RIVAL_HID_ID: &str = "0003:00001038:00001384";
/// HID identity of the Rival 100.
pub const RIVAL100_HID_ID: &str = "0003:00001038:00001702";

/// Bus/vendor/product triple as printed in a udev `HID_ID` property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HidId {
    pub bus: u16,
    pub vendor: u16,
    pub product: u16,
}

impl FromStr for HidId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let unsupported = || Error::UnsupportedHardware(s.to_string());
        let mut parts = s.split(':');
        let mut field = || -> Result<u16> {
            let part = parts.next().ok_or_else(unsupported)?;
            let value = u32::from_str_radix(part, 16).map_err(|_| unsupported())?;
            u16::try_from(value).map_err(|_| unsupported())
        };
        let id = HidId {
            bus: field()?,
            vendor: field()?,
            product: field()?,
        };
        if parts.next().is_some() {
            return Err(unsupported());
        }
        Ok(id)
    }
}

impl fmt::Display for HidId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}:{:08X}:{:08X}", self.bus, self.vendor, self.product)
    }
}

/// Protocol variant spoken by an opened device.
///
/// Resolved once when the device is opened; every encoder matches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    /// Rival (300 family): independent logo and wheel LEDs.
    Generic,
    /// Rival 100: one 32-byte color report drives both LEDs.
    SecondGeneration,
}

impl DeviceKind {
    /// Probe order: the second generation claims its id first, the generic
    /// variant is the fallback.
    pub const PROBE_ORDER: [DeviceKind; 2] = [DeviceKind::SecondGeneration, DeviceKind::Generic];

    /// The HID identity this variant answers to.
    pub fn hid_id(&self) -> &'static str {
        match self {
            Self::Generic => RIVAL_HID_ID,
            Self::SecondGeneration => RIVAL100_HID_ID,
        }
    }

    /// USB product ID.
    pub fn pid(&self) -> u16 {
        match self {
            Self::Generic => pids::RIVAL,
            Self::SecondGeneration => pids::RIVAL_100,
        }
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Generic => "SteelSeries Rival",
            Self::SecondGeneration => "SteelSeries Rival 100",
        }
    }

    /// Capability check: does this variant drive the given device?
    pub fn matches(&self, id: &HidId) -> bool {
        id.vendor == STEELSERIES_VID && id.product == self.pid()
    }

    /// Resolve the variant for a udev-style HID identity string.
    pub fn probe(hid_id: &str) -> Result<Self> {
        let id: HidId = hid_id.parse()?;
        for kind in Self::PROBE_ORDER {
            if kind.matches(&id) {
                debug!(hid_id, kind = kind.name(), "Protocol variant matched");
                return Ok(kind);
            }
            debug!(hid_id, kind = kind.name(), "Protocol variant rejected, trying next");
        }
        Err(Error::UnsupportedHardware(hid_id.to_string()))
    }

    /// Resolve the variant from USB vendor/product ids.
    pub fn from_ids(vendor: u16, product: u16) -> Option<Self> {
        let id = HidId {
            bus: 0x0003,
            vendor,
            product,
        };
        Self::PROBE_ORDER.into_iter().find(|kind| kind.matches(&id))
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Addressable LEDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum LedId {
    Logo = 1,
    Wheel = 2,
}

impl LedId {
    pub fn from_raw(raw: i64) -> Result<Self> {
        match raw {
            1 => Ok(Self::Logo),
            2 => Ok(Self::Wheel),
            other => Err(Error::InvalidLed(other)),
        }
    }

    pub fn as_byte(&self) -> u8 {
        *self as u8
    }
}

/// LED animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum LedStyle {
    #[default]
    Steady = 1,
    BreatheSlow = 2,
    BreatheMedium = 3,
    BreatheFast = 4,
}

impl LedStyle {
    pub const ALL: &'static [LedStyle] = &[
        LedStyle::Steady,
        LedStyle::BreatheSlow,
        LedStyle::BreatheMedium,
        LedStyle::BreatheFast,
    ];

    pub fn from_raw(raw: i64) -> Result<Self> {
        match raw {
            1 => Ok(Self::Steady),
            2 => Ok(Self::BreatheSlow),
            3 => Ok(Self::BreatheMedium),
            4 => Ok(Self::BreatheFast),
            other => Err(Error::InvalidStyle(other)),
        }
    }

    pub fn as_byte(&self) -> u8 {
        *self as u8
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Steady => "steady",
            Self::BreatheSlow => "breathe (slow)",
            Self::BreatheMedium => "breathe (medium)",
            Self::BreatheFast => "breathe (fast)",
        }
    }
}

impl Serialize for LedStyle {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_byte())
    }
}

impl<'de> Deserialize<'de> for LedStyle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        Self::from_raw(raw).map_err(serde::de::Error::custom)
    }
}

/// One of the two CPI presets toggled by the button behind the wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CpiSlot {
    One = 1,
    Two = 2,
}

impl CpiSlot {
    pub fn from_raw(raw: i64) -> Result<Self> {
        match raw {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            other => Err(Error::InvalidCpiSlot(other)),
        }
    }

    pub fn as_byte(&self) -> u8 {
        *self as u8
    }
}

/// Sensor sensitivity, always a multiple of [`Cpi::STEP`] within range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cpi(u16);

impl Cpi {
    pub const MIN: u16 = 50;
    pub const MAX: u16 = 6500;
    pub const STEP: u16 = 50;

    pub fn new(value: i64) -> Result<Self> {
        let in_range = (Self::MIN as i64..=Self::MAX as i64).contains(&value);
        if !in_range || value % Self::STEP as i64 != 0 {
            return Err(Error::InvalidCpiValue(value));
        }
        Ok(Self(value as u16))
    }

    /// For compile-time constants already known to be valid.
    pub(crate) const fn new_unchecked(value: u16) -> Self {
        Self(value)
    }

    pub fn get(&self) -> u16 {
        self.0
    }

    /// Firmware unit: CPI divided by the step size.
    pub fn steps(&self) -> u8 {
        (self.0 / Self::STEP) as u8
    }
}

impl fmt::Display for Cpi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Cpi {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.0)
    }
}

impl<'de> Deserialize<'de> for Cpi {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

/// USB polling rates the firmware accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u16)]
pub enum PollingRate {
    Hz125 = 125,
    Hz250 = 250,
    Hz500 = 500,
    #[default]
    Hz1000 = 1000,
}

impl PollingRate {
    /// Convert from raw Hz value.
    pub fn from_hz(hz: i64) -> Result<Self> {
        match hz {
            125 => Ok(Self::Hz125),
            250 => Ok(Self::Hz250),
            500 => Ok(Self::Hz500),
            1000 => Ok(Self::Hz1000),
            other => Err(Error::InvalidPollingRate(other)),
        }
    }

    /// Get the Hz value.
    pub fn as_hz(&self) -> u16 {
        *self as u16
    }

    /// All supported rates.
    pub const ALL: &'static [PollingRate] = &[
        PollingRate::Hz125,
        PollingRate::Hz250,
        PollingRate::Hz500,
        PollingRate::Hz1000,
    ];
}

impl fmt::Display for PollingRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Hz", self.as_hz())
    }
}

impl Serialize for PollingRate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.as_hz())
    }
}

impl<'de> Deserialize<'de> for PollingRate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        Self::from_hz(raw).map_err(serde::de::Error::custom)
    }
}
