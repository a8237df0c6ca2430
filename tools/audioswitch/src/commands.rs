//! Command dispatch: each CLI operation as a thin function over the core
//! traits, so everything here is testable against in-memory fakes.

use anyhow::{bail, Context, Result};
use serde_json::json;

use audioswitch_core::{resolve, DeviceDirectory, ResolutionResult, VolumeControl};

/// The device a switch request settles on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchTarget {
    /// Exact label to hand to the directory.
    pub label: String,
    /// True when the label came out of fuzzy resolution rather than an
    /// exact user-supplied name.
    pub fuzzy: bool,
}

/// Pick the device a query should switch to, if any.
///
/// An exact label match short-circuits resolution entirely. An ambiguous
/// resolution auto-picks the first survivor - the ranking puts the
/// shortest, most specific label there.
pub fn select_target(query: &str, devices: &[String]) -> Option<SwitchTarget> {
    if devices.iter().any(|d| d == query) {
        return Some(SwitchTarget {
            label: query.to_string(),
            fuzzy: false,
        });
    }
    match resolve(query, devices) {
        ResolutionResult::Unique(label) => Some(SwitchTarget { label, fuzzy: true }),
        ResolutionResult::Ambiguous(set) => {
            tracing::debug!(?set, "ambiguous resolution, picking first");
            set.into_iter()
                .next()
                .map(|label| SwitchTarget { label, fuzzy: true })
        }
        ResolutionResult::NoMatch => None,
    }
}

/// Switch the audio output to whatever `query` resolves to.
pub fn switch(dir: &impl DeviceDirectory, query: &str) -> Result<()> {
    let devices = dir
        .devices()
        .context("failed to list audio output devices")?;
    let Some(target) = select_target(query, &devices) else {
        bail!("{}", no_match_message(query, &devices));
    };
    if target.fuzzy {
        println!("Similar device found: '{}'", target.label);
    }
    dir.activate(&target.label)
        .with_context(|| format!("failed to switch to '{}'", target.label))?;
    println!("Switched audio output to: {}", target.label);
    Ok(())
}

/// List devices with an `(active)` marker, or as JSON with `--json`.
pub fn list(dir: &impl DeviceDirectory, json: bool) -> Result<()> {
    let devices = dir
        .devices()
        .context("failed to list audio output devices")?;
    let current = dir.current().context("failed to query current device")?;
    if json {
        let doc = json!({ "devices": devices, "current": current });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }
    println!("Available output devices:");
    for device in &devices {
        let marker = if current.as_deref() == Some(device) {
            " (active)"
        } else {
            ""
        };
        println!("  • {device}{marker}");
    }
    Ok(())
}

/// Print the currently active output device.
pub fn show_current(dir: &impl DeviceDirectory) -> Result<()> {
    match dir.current().context("failed to query current device")? {
        Some(device) => {
            println!("{device}");
            Ok(())
        }
        None => bail!("could not determine the current audio output device"),
    }
}

pub fn show_volume(ctl: &impl VolumeControl) -> Result<()> {
    let level = ctl.volume()?;
    println!("Current volume: {level}%");
    Ok(())
}

pub fn set_volume(ctl: &impl VolumeControl, level: u8) -> Result<()> {
    let applied = ctl.set_volume(level)?;
    println!("Volume set to {applied}%");
    Ok(())
}

pub fn adjust_volume(ctl: &impl VolumeControl, delta: i16) -> Result<()> {
    let applied = ctl.adjust_volume(delta)?;
    println!("Volume set to {applied}%");
    Ok(())
}

pub fn toggle_mute(ctl: &impl VolumeControl) -> Result<()> {
    let muted = ctl.toggle_mute()?;
    println!("Audio {}", if muted { "muted" } else { "unmuted" });
    Ok(())
}

fn no_match_message(query: &str, devices: &[String]) -> String {
    let mut msg = format!("No matching device found for '{query}'.\n\nAvailable devices:");
    for device in devices {
        msg.push_str("\n  • ");
        msg.push_str(device);
    }
    msg
}

#[cfg(test)]
mod tests {
    use super::*;
    use audioswitch_core::Result as CoreResult;
    use std::cell::RefCell;

    struct FakeDirectory {
        devices: Vec<String>,
        current: Option<String>,
        activated: RefCell<Vec<String>>,
    }

    impl FakeDirectory {
        fn new(devices: &[&str]) -> Self {
            FakeDirectory {
                devices: devices.iter().map(|s| s.to_string()).collect(),
                current: None,
                activated: RefCell::new(Vec::new()),
            }
        }
    }

    impl DeviceDirectory for FakeDirectory {
        fn devices(&self) -> CoreResult<Vec<String>> {
            Ok(self.devices.clone())
        }

        fn current(&self) -> CoreResult<Option<String>> {
            Ok(self.current.clone())
        }

        fn activate(&self, label: &str) -> CoreResult<()> {
            self.activated.borrow_mut().push(label.to_string());
            Ok(())
        }
    }

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_select_target_exact_name_is_not_fuzzy() {
        let devices = labels(&["AirPods Pro", "HDMI Output"]);
        let target = select_target("AirPods Pro", &devices).unwrap();
        assert_eq!(target.label, "AirPods Pro");
        assert!(!target.fuzzy);
    }

    #[test]
    fn test_select_target_fuzzy_unique() {
        let devices = labels(&["MacBook Pro Speakers", "HDMI Output"]);
        let target = select_target("spekers", &devices).unwrap();
        assert_eq!(target.label, "MacBook Pro Speakers");
        assert!(target.fuzzy);
    }

    #[test]
    fn test_select_target_ambiguous_picks_first() {
        let devices = labels(&["AirPods Pro", "AirPods Max"]);
        let target = select_target("airpods", &devices).unwrap();
        assert_eq!(target.label, "AirPods Pro");
        assert!(target.fuzzy);
    }

    #[test]
    fn test_select_target_no_match() {
        let devices = labels(&["AirPods Pro"]);
        assert!(select_target("Bluetooth Gizmo", &devices).is_none());
    }

    #[test]
    fn test_switch_activates_resolved_device() {
        let dir = FakeDirectory::new(&["MacBook Pro Speakers", "AirPods Pro"]);
        switch(&dir, "speakers").unwrap();
        assert_eq!(*dir.activated.borrow(), vec!["MacBook Pro Speakers"]);
    }

    #[test]
    fn test_switch_unknown_device_fails_listing_devices() {
        let dir = FakeDirectory::new(&["AirPods Pro"]);
        let err = switch(&dir, "Bluetooth Gizmo").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("No matching device found for 'Bluetooth Gizmo'"));
        assert!(msg.contains("AirPods Pro"));
        assert!(dir.activated.borrow().is_empty());
    }

    #[test]
    fn test_show_current_fails_when_unknown() {
        let dir = FakeDirectory::new(&["AirPods Pro"]);
        assert!(show_current(&dir).is_err());
    }
}
