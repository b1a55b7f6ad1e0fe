//! rival-core: feature report encoding and profiles for SteelSeries Rival mice.
//!
//! This crate turns a profile of semantic settings (LED colors and styles,
//! two CPI presets, polling rate) into the feature reports understood by
//! each supported hardware generation.

pub mod color;
pub mod device;
pub mod error;
#[cfg(test)]
mod integration_tests;
pub mod profile;
pub mod protocol;
pub mod storage;
pub mod transport;

/// SteelSeries USB Vendor ID.
pub const STEELSERIES_VID: u16 = 0x1038;

/// Known Rival product IDs.
pub mod pids {
    /// Rival (300 family), generic protocol.
    pub const RIVAL: u16 = 0x1384;
    /// Rival 100, second-generation protocol.
    pub const RIVAL_100: u16 = 0x1702;
}
