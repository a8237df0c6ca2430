//! Interactive device picker: arrow-key menu over the device list plus
//! volume/mute entries when those controls are actually reachable.

use std::fmt;

use anyhow::{bail, Context, Result};
use dialoguer::{theme::ColorfulTheme, Input, Select};

use audioswitch_core::{DeviceDirectory, Error, VolumeControl};

use crate::commands;

/// Relative step used by the quick volume entries.
const VOLUME_STEP: i16 = 10;

/// One selectable row of the interactive menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    Device { label: String, active: bool },
    ToggleMute,
    ShowVolume,
    RaiseVolume,
    LowerVolume,
    AdjustVolume,
}

impl fmt::Display for MenuEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuEntry::Device { label, active: true } => write!(f, "{label} (active)"),
            MenuEntry::Device { label, active: false } => write!(f, "{label}"),
            MenuEntry::ToggleMute => write!(f, "-- Toggle mute --"),
            MenuEntry::ShowVolume => write!(f, "-- Show volume --"),
            MenuEntry::RaiseVolume => write!(f, "-- Increase volume (+{VOLUME_STEP}%) --"),
            MenuEntry::LowerVolume => write!(f, "-- Decrease volume (-{VOLUME_STEP}%) --"),
            MenuEntry::AdjustVolume => write!(f, "-- Adjust volume... --"),
        }
    }
}

/// Assemble the menu: all devices first (active one marked), then the
/// control entries that probed as available.
pub fn build_menu(
    devices: &[String],
    current: Option<&str>,
    mute_available: bool,
    volume_available: bool,
) -> Vec<MenuEntry> {
    let mut entries: Vec<MenuEntry> = devices
        .iter()
        .map(|label| MenuEntry::Device {
            label: label.clone(),
            active: current == Some(label.as_str()),
        })
        .collect();
    if mute_available {
        entries.push(MenuEntry::ToggleMute);
    }
    if volume_available {
        entries.push(MenuEntry::ShowVolume);
        entries.push(MenuEntry::RaiseVolume);
        entries.push(MenuEntry::LowerVolume);
        entries.push(MenuEntry::AdjustVolume);
    }
    entries
}

/// Run the picker loop once: show the menu, apply the chosen action.
pub fn run(dir: &impl DeviceDirectory, ctl: &impl VolumeControl) -> Result<()> {
    let devices = dir
        .devices()
        .context("failed to list audio output devices")?;
    if devices.is_empty() {
        return Err(Error::NoDevices.into());
    }
    let current = dir.current().context("failed to query current device")?;

    // Probe the controls without changing anything; entries for
    // unreachable controls are simply left out.
    let mute_available = ctl.muted().is_ok();
    let volume_available = ctl.volume().is_ok();

    let entries = build_menu(
        &devices,
        current.as_deref(),
        mute_available,
        volume_available,
    );
    let items: Vec<String> = entries.iter().map(ToString::to_string).collect();

    let theme = ColorfulTheme::default();
    let selection = Select::with_theme(&theme)
        .with_prompt("Please select audio output device")
        .items(&items)
        .default(0)
        .interact_opt()
        .context("failed to read selection")?;
    let Some(index) = selection else {
        bail!("Aborted.");
    };

    match &entries[index] {
        MenuEntry::Device { label, .. } => {
            dir.activate(label)
                .with_context(|| format!("failed to switch to '{label}'"))?;
            println!("Switched audio output to: {label}");
            Ok(())
        }
        MenuEntry::ToggleMute => commands::toggle_mute(ctl),
        MenuEntry::ShowVolume => commands::show_volume(ctl),
        MenuEntry::RaiseVolume => commands::adjust_volume(ctl, VOLUME_STEP),
        MenuEntry::LowerVolume => commands::adjust_volume(ctl, -VOLUME_STEP),
        MenuEntry::AdjustVolume => {
            let input: String = Input::with_theme(&theme)
                .with_prompt("Enter volume (0-100%)")
                .validate_with(|text: &String| match text.parse::<u8>() {
                    Ok(level) if level <= 100 => Ok(()),
                    _ => Err("enter a number between 0 and 100"),
                })
                .interact_text()
                .context("failed to read volume")?;
            let level: u8 = input.parse().context("volume was not a number")?;
            commands::set_volume(ctl, level)
        }
    }
}
