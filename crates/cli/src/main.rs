//! rival CLI: apply profiles and individual settings to a Rival mouse.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rival_core::device::DeviceKind;
use rival_core::error::Error as CoreError;
use rival_core::profile::{self, Profile};
use rival_core::protocol::Command;
use rival_core::transport::{apply_commands, FeatureReportTransport};
use rival_core::{storage, STEELSERIES_VID};
use std::ffi::CString;
use std::path::PathBuf;
use tracing::{debug, info};

const PERMISSION_HINT: &str = "\
Run with sudo, or give your user write access to the hidraw node, e.g. with a udev rule:
  KERNEL==\"hidraw*\", ATTRS{idVendor}==\"1038\", MODE=\"0660\", GROUP=\"plugdev\"";

struct CliHidTransport {
    device: hidapi::HidDevice,
}

impl FeatureReportTransport for CliHidTransport {
    fn send_feature_report(&self, data: &[u8]) -> rival_core::error::Result<()> {
        // hidapi expects the report ID first; Rival reports are unnumbered.
        let mut report = Vec::with_capacity(data.len() + 1);
        report.push(0x00);
        report.extend_from_slice(data);
        self.device
            .send_feature_report(&report)
            .map_err(|e| CoreError::Hid(format!("send_feature_report: {e}")))
    }
}

/// A supported mouse found during enumeration.
struct FoundDevice {
    kind: DeviceKind,
    path: CString,
}

fn discover_devices(api: &hidapi::HidApi) -> Vec<FoundDevice> {
    let mut found = Vec::new();
    for info in api.device_list() {
        if info.vendor_id() != STEELSERIES_VID || info.interface_number() > 0 {
            continue;
        }
        if let Some(kind) = DeviceKind::from_ids(info.vendor_id(), info.product_id()) {
            info!(
                model = kind.name(),
                pid = format_args!("0x{:04X}", info.product_id()),
                path = %info.path().to_string_lossy(),
                "Found Rival device"
            );
            found.push(FoundDevice {
                kind,
                path: info.path().to_owned(),
            });
        }
    }
    debug!(count = found.len(), "Device enumeration complete");
    found
}

/// Open the requested (or first supported) device and resolve its variant.
fn open_device(
    explicit_path: Option<&str>,
    kind_override: Option<KindArg>,
) -> Result<(CliHidTransport, DeviceKind)> {
    let api = hidapi::HidApi::new().map_err(|e| anyhow::anyhow!("hidapi init: {e}"))?;
    let devices = discover_devices(&api);

    let (path, detected) = match explicit_path {
        Some(p) => {
            let path = CString::new(p).context("device path contains a NUL byte")?;
            let detected = devices.iter().find(|d| d.path == path).map(|d| d.kind);
            (path, detected)
        }
        None => {
            let first = devices.first().ok_or_else(|| {
                CoreError::DeviceNotFound("no supported SteelSeries Rival found".to_string())
            })?;
            (first.path.clone(), Some(first.kind))
        }
    };

    let kind = kind_override
        .map(DeviceKind::from)
        .or(detected)
        .ok_or_else(|| {
            CoreError::UnsupportedHardware(format!(
                "{} is not a recognized Rival; pass --kind to force a protocol",
                path.to_string_lossy()
            ))
        })?;

    let device = api.open_path(&path).map_err(|e| {
        let msg = e.to_string();
        if msg.to_lowercase().contains("permission") {
            anyhow::Error::new(CoreError::PermissionDenied(format!(
                "{}: {msg}",
                path.to_string_lossy()
            )))
            .context(PERMISSION_HINT)
        } else {
            anyhow::anyhow!("open HID device {}: {msg}", path.to_string_lossy())
        }
    })?;

    info!(kind = kind.name(), "Opened device");
    Ok((CliHidTransport { device }, kind))
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    /// Rival 300 family.
    Generic,
    /// Rival 100.
    Gen2,
}

impl From<KindArg> for DeviceKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Generic => DeviceKind::Generic,
            KindArg::Gen2 => DeviceKind::SecondGeneration,
        }
    }
}

#[derive(Parser)]
#[command(
    name = "rival",
    version,
    about = "Configure SteelSeries Rival mice"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Individual settings layered on top of the selected profile.
#[derive(Args, Debug, Default)]
struct SettingArgs {
    /// Logo LED color: #rrggbb, #rgb, or a color name.
    #[arg(long)]
    logo_color: Option<String>,
    /// Wheel LED color: #rrggbb, #rgb, or a color name.
    #[arg(long)]
    wheel_color: Option<String>,
    /// Logo LED style: 1 steady, 2-4 breathe slow/medium/fast.
    #[arg(long)]
    logo_style: Option<i64>,
    /// Wheel LED style: 1 steady, 2-4 breathe slow/medium/fast.
    #[arg(long)]
    wheel_style: Option<i64>,
    /// CPI preset 1 (50-6500, multiple of 50).
    #[arg(long)]
    cpi1: Option<i64>,
    /// CPI preset 2 (50-6500, multiple of 50).
    #[arg(long)]
    cpi2: Option<i64>,
    /// Polling rate in Hz (125, 250, 500, or 1000).
    #[arg(long)]
    polling_rate: Option<i64>,
}

impl SettingArgs {
    fn apply(&self, profile: &mut Profile) -> rival_core::error::Result<()> {
        if let Some(c) = &self.logo_color {
            profile.set_logo_color(c.as_str())?;
        }
        if let Some(c) = &self.wheel_color {
            profile.set_wheel_color(c.as_str())?;
        }
        if let Some(s) = self.logo_style {
            profile.set_logo_style(s)?;
        }
        if let Some(s) = self.wheel_style {
            profile.set_wheel_style(s)?;
        }
        if let Some(v) = self.cpi1 {
            profile.set_cpi(1, v)?;
        }
        if let Some(v) = self.cpi2 {
            profile.set_cpi(2, v)?;
        }
        if let Some(r) = self.polling_rate {
            profile.set_polling_rate(r)?;
        }
        Ok(())
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List connected Rival mice.
    ListDevices,
    /// Apply a profile and/or individual settings.
    Apply {
        /// Profile name or path (searched in ., then ~/.rival).
        #[arg(long, short)]
        profile: Option<String>,
        /// Only send settings that differ from this previously applied profile.
        #[arg(long)]
        since: Option<String>,
        #[command(flatten)]
        settings: SettingArgs,
        /// Persist the settings across power cycles.
        #[arg(long)]
        commit: bool,
        /// Print the reports instead of sending them.
        #[arg(long)]
        dry_run: bool,
        /// hidraw device path (default: first supported device).
        #[arg(long)]
        device: Option<String>,
        /// Force a protocol variant instead of detecting it.
        #[arg(long, value_enum)]
        kind: Option<KindArg>,
        /// Also write the resulting profile to this YAML file.
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Restore the factory profile.
    Reset {
        /// Persist the settings across power cycles.
        #[arg(long)]
        commit: bool,
        /// hidraw device path (default: first supported device).
        #[arg(long)]
        device: Option<String>,
        /// Force a protocol variant instead of detecting it.
        #[arg(long, value_enum)]
        kind: Option<KindArg>,
    },
    /// Print a resolved profile and its reports without touching hardware.
    Show {
        /// Profile name or path (default: factory profile).
        #[arg(long, short)]
        profile: Option<String>,
        /// Protocol variant to encode for.
        #[arg(long, value_enum, default_value = "generic")]
        kind: KindArg,
    },
}

fn load_profile(name: Option<&str>, kind: DeviceKind) -> rival_core::error::Result<Profile> {
    match name {
        Some(name) => storage::load_named_profile(name, kind),
        None => Ok(Profile::factory(kind)),
    }
}

fn print_commands(commands: &[Command]) {
    if commands.is_empty() {
        println!("(no changes)");
    }
    for command in commands {
        println!("{command}");
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::ListDevices => {
            let api = hidapi::HidApi::new().map_err(|e| anyhow::anyhow!("hidapi init: {e}"))?;
            let devices = discover_devices(&api);
            if devices.is_empty() {
                println!("No SteelSeries Rival mice found.");
            }
            for dev in &devices {
                println!(
                    "{} (HID id {}, path: {})",
                    dev.kind.name(),
                    dev.kind.hid_id(),
                    dev.path.to_string_lossy()
                );
            }
        }
        Commands::Apply {
            profile,
            since,
            settings,
            commit,
            dry_run,
            device,
            kind,
            save,
        } => {
            let (transport, kind) = if dry_run {
                (None, kind.map(DeviceKind::from).unwrap_or(DeviceKind::Generic))
            } else {
                let (transport, kind) = open_device(device.as_deref(), kind)?;
                (Some(transport), kind)
            };

            let mut target = load_profile(profile.as_deref(), kind)?;
            settings.apply(&mut target)?;

            let current = since
                .as_deref()
                .map(|name| load_profile(Some(name), kind).map(|p| p.to_commands(kind, None)))
                .transpose()?;
            let commands = target.to_commands(kind, current.as_deref());

            if let Some(path) = &save {
                profile::save_profile(path, &target)?;
                println!("Profile saved to {}", path.display());
            }

            match transport {
                None => {
                    print_commands(&commands);
                    if commit {
                        println!("{}", rival_core::protocol::commit());
                    }
                }
                Some(transport) => {
                    let sent = apply_commands(&transport, &commands, commit)?;
                    println!("Sent {sent} report(s) to {}", kind.name());
                }
            }
        }
        Commands::Reset {
            commit,
            device,
            kind,
        } => {
            let (transport, kind) = open_device(device.as_deref(), kind)?;
            let commands = Profile::factory(kind).to_commands(kind, None);
            apply_commands(&transport, &commands, commit)?;
            println!("{} restored to factory settings", kind.name());
        }
        Commands::Show { profile, kind } => {
            let kind = DeviceKind::from(kind);
            let resolved = load_profile(profile.as_deref(), kind)?;
            print!("{}", resolved.to_yaml()?);
            println!("---");
            print_commands(&resolved.to_commands(kind, None));
        }
    }

    Ok(())
}
