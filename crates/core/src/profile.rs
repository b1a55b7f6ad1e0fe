//! Mouse configuration profiles: validated settings, factory defaults,
//! mapping overlay, YAML load/save, and command generation.

use crate::color::{self, Color, ColorSpec};
use crate::device::{Cpi, CpiSlot, DeviceKind, LedId, LedStyle, PollingRate};
use crate::error::{Error, Result};
use crate::protocol::{self, Command};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, info};

/// Settings a profile document may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    LogoColor,
    WheelColor,
    LogoStyle,
    WheelStyle,
    Cpi1,
    Cpi2,
    PollingRate,
}

impl ProfileField {
    pub const ALL: [ProfileField; 7] = [
        ProfileField::LogoColor,
        ProfileField::WheelColor,
        ProfileField::LogoStyle,
        ProfileField::WheelStyle,
        ProfileField::Cpi1,
        ProfileField::Cpi2,
        ProfileField::PollingRate,
    ];

    /// Document key for this field.
    pub fn key(&self) -> &'static str {
        match self {
            Self::LogoColor => "logo_color",
            Self::WheelColor => "wheel_color",
            Self::LogoStyle => "logo_style",
            Self::WheelStyle => "wheel_style",
            Self::Cpi1 => "cpi1",
            Self::Cpi2 => "cpi2",
            Self::PollingRate => "polling_rate",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }
}

/// A complete set of device settings.
///
/// Fields are only reachable through validating setters, so a `Profile` is
/// always encodable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    logo_color: Color,
    wheel_color: Color,
    logo_style: LedStyle,
    wheel_style: LedStyle,
    cpi1: Cpi,
    cpi2: Cpi,
    polling_rate: PollingRate,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            logo_color: Color::BLACK,
            wheel_color: Color::BLACK,
            logo_style: LedStyle::Steady,
            wheel_style: LedStyle::Steady,
            cpi1: Cpi::new_unchecked(800),
            cpi2: Cpi::new_unchecked(1600),
            polling_rate: PollingRate::Hz1000,
        }
    }
}

impl Profile {
    /// Out-of-the-box settings for a hardware variant.
    pub fn factory(kind: DeviceKind) -> Self {
        let (cpi1, cpi2) = match kind {
            DeviceKind::Generic => (Cpi::new_unchecked(800), Cpi::new_unchecked(1600)),
            DeviceKind::SecondGeneration => (Cpi::new_unchecked(1000), Cpi::new_unchecked(2000)),
        };
        Self {
            logo_color: Color::new(255, 24, 0),
            wheel_color: Color::new(255, 24, 0),
            logo_style: LedStyle::BreatheSlow,
            wheel_style: LedStyle::BreatheSlow,
            cpi1,
            cpi2,
            polling_rate: PollingRate::Hz1000,
        }
    }

    pub fn logo_color(&self) -> Color {
        self.logo_color
    }

    pub fn wheel_color(&self) -> Color {
        self.wheel_color
    }

    pub fn logo_style(&self) -> LedStyle {
        self.logo_style
    }

    pub fn wheel_style(&self) -> LedStyle {
        self.wheel_style
    }

    pub fn cpi1(&self) -> Cpi {
        self.cpi1
    }

    pub fn cpi2(&self) -> Cpi {
        self.cpi2
    }

    pub fn cpi(&self, slot: CpiSlot) -> Cpi {
        match slot {
            CpiSlot::One => self.cpi1,
            CpiSlot::Two => self.cpi2,
        }
    }

    pub fn polling_rate(&self) -> PollingRate {
        self.polling_rate
    }

    pub fn set_logo_color(&mut self, color: impl Into<ColorSpec>) -> Result<()> {
        self.logo_color = color::normalize(color)?;
        Ok(())
    }

    pub fn set_wheel_color(&mut self, color: impl Into<ColorSpec>) -> Result<()> {
        self.wheel_color = color::normalize(color)?;
        Ok(())
    }

    pub fn set_logo_style(&mut self, style: i64) -> Result<()> {
        self.logo_style = LedStyle::from_raw(style)?;
        Ok(())
    }

    pub fn set_wheel_style(&mut self, style: i64) -> Result<()> {
        self.wheel_style = LedStyle::from_raw(style)?;
        Ok(())
    }

    /// Set CPI slot 1 or 2 to a multiple of 50 in 50..=6500.
    pub fn set_cpi(&mut self, slot: i64, value: i64) -> Result<()> {
        let slot = CpiSlot::from_raw(slot)?;
        let value = Cpi::new(value)?;
        match slot {
            CpiSlot::One => self.cpi1 = value,
            CpiSlot::Two => self.cpi2 = value,
        }
        Ok(())
    }

    pub fn set_polling_rate(&mut self, rate: i64) -> Result<()> {
        self.polling_rate = PollingRate::from_hz(rate)?;
        Ok(())
    }

    /// Overlay a loaded key/value mapping onto a copy of `defaults`.
    ///
    /// Unknown keys are skipped. The first rejected value aborts the whole
    /// load with an error naming its key.
    pub fn from_mapping(defaults: &Profile, overrides: &Map<String, Value>) -> Result<Profile> {
        let mut profile = defaults.clone();
        for (key, value) in overrides {
            profile.apply_field(key, value)?;
        }
        Ok(profile)
    }

    fn apply_field(&mut self, key: &str, value: &Value) -> Result<()> {
        let Some(field) = ProfileField::from_key(key) else {
            debug!(key, "Ignoring unknown profile key");
            return Ok(());
        };
        let applied = match field {
            ProfileField::LogoColor => {
                ColorSpec::try_from(value).and_then(|c| self.set_logo_color(c))
            }
            ProfileField::WheelColor => {
                ColorSpec::try_from(value).and_then(|c| self.set_wheel_color(c))
            }
            ProfileField::LogoStyle => as_integer(value).and_then(|s| self.set_logo_style(s)),
            ProfileField::WheelStyle => as_integer(value).and_then(|s| self.set_wheel_style(s)),
            ProfileField::Cpi1 => as_integer(value).and_then(|v| self.set_cpi(1, v)),
            ProfileField::Cpi2 => as_integer(value).and_then(|v| self.set_cpi(2, v)),
            ProfileField::PollingRate => as_integer(value).and_then(|r| self.set_polling_rate(r)),
        };
        applied.map_err(|e| e.in_field(field.key()))
    }

    /// Parse a YAML (or JSON) document and overlay it onto `defaults`.
    pub fn from_yaml_str(defaults: &Profile, text: &str) -> Result<Profile> {
        let document: Value = serde_yaml::from_str(text)
            .map_err(|e| Error::ProfileResolution(format!("unable to parse profile: {e}")))?;
        match document {
            Value::Object(map) => Self::from_mapping(defaults, &map),
            // An empty document leaves every default in place.
            Value::Null => Ok(defaults.clone()),
            other => Err(Error::ProfileResolution(format!(
                "profile must be a mapping of settings, got {other}"
            ))),
        }
    }

    /// Serialize the seven settings as YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| Error::ProfileResolution(format!("unable to serialize profile: {e}")))
    }

    /// Encode the full profile, or only what differs from `current`.
    ///
    /// Order: wheel color, wheel style, logo color, logo style, cpi1, cpi2,
    /// polling rate. On hardware with a single shared color report the two
    /// color commands collapse into one, carrying the logo color.
    pub fn to_commands(&self, kind: DeviceKind, current: Option<&[Command]>) -> Vec<Command> {
        let mut commands = Vec::with_capacity(7);
        if kind.has_independent_leds() {
            commands.push(protocol::led_color(kind, LedId::Wheel, self.wheel_color));
            commands.push(protocol::led_style(LedId::Wheel, self.wheel_style));
            commands.push(protocol::led_color(kind, LedId::Logo, self.logo_color));
        } else {
            commands.push(protocol::led_color(kind, LedId::Logo, self.logo_color));
            commands.push(protocol::led_style(LedId::Wheel, self.wheel_style));
        }
        commands.push(protocol::led_style(LedId::Logo, self.logo_style));
        commands.push(protocol::cpi(CpiSlot::One, self.cpi1));
        commands.push(protocol::cpi(CpiSlot::Two, self.cpi2));
        commands.push(protocol::polling_rate(self.polling_rate));

        let Some(current) = current else {
            return commands;
        };
        let total = commands.len();
        commands.retain(|cmd| !current.contains(cmd));
        debug!(
            kind = kind.name(),
            total,
            changed = commands.len(),
            "Diffed profile against current state"
        );
        commands
    }
}

fn as_integer(value: &Value) -> Result<i64> {
    value.as_i64().ok_or_else(|| Error::InvalidType {
        expected: "an integer",
        value: value.to_string(),
    })
}

/// Read a profile file and overlay it onto `defaults`.
pub fn load_profile(path: &Path, defaults: &Profile) -> Result<Profile> {
    let text = std::fs::read_to_string(path)?;
    let profile = Profile::from_yaml_str(defaults, &text)?;
    info!(path = %path.display(), "Loaded profile");
    Ok(profile)
}

/// Write a profile as YAML.
pub fn save_profile(path: &Path, profile: &Profile) -> Result<()> {
    std::fs::write(path, profile.to_yaml()?)?;
    info!(path = %path.display(), "Saved profile");
    Ok(())
}
