//! macOS audio output facility.
//!
//! Implements the core [`DeviceDirectory`] and [`VolumeControl`] traits by
//! shelling out to `SwitchAudioSource` (device enumeration and switching)
//! and `osascript` (volume and mute). Volume and mute each try a short list
//! of AppleScript variants in order, because the plain form is blocked on
//! some locked-down systems while the System Events form still works;
//! device switching keeps working either way.

use std::process::Command;

use audioswitch_core::{DeviceDirectory, Error, Result, VolumeControl};

const SWITCH_AUDIO_SOURCE: &str = "SwitchAudioSource";
const OSASCRIPT: &str = "osascript";
const BREW_HINT: &str = "brew install switchaudio-osx";

/// AppleScript variants for reading the output volume.
const VOLUME_GET_SCRIPTS: &[&str] = &[
    "output volume of (get volume settings)",
    "tell application \"System Events\" to get output volume of (get volume settings)",
];

/// AppleScript variants for reading the mute state.
const MUTE_GET_SCRIPTS: &[&str] = &[
    "output muted of (get volume settings)",
    "tell application \"System Events\" to get output muted of (get volume settings)",
];

/// The live system backend. Stateless; every call is a fresh subprocess
/// round-trip.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemAudio;

impl SystemAudio {
    pub fn new() -> Self {
        SystemAudio
    }
}

impl DeviceDirectory for SystemAudio {
    fn devices(&self) -> Result<Vec<String>> {
        let stdout = run_switch_audio(&["-t", "output", "-a"])?;
        Ok(parse_device_list(&stdout))
    }

    fn current(&self) -> Result<Option<String>> {
        match run_switch_audio(&["-c", "-t", "output"]) {
            Ok(stdout) => {
                let name = stdout.trim();
                Ok((!name.is_empty()).then(|| name.to_string()))
            }
            // The original tool treats a failed current-device query as
            // "unknown", not fatal, so listing still works.
            Err(Error::CommandFailed { .. }) => Ok(None),
            Err(other) => Err(other),
        }
    }

    fn activate(&self, label: &str) -> Result<()> {
        run_switch_audio(&["-t", "output", "-s", label])?;
        Ok(())
    }
}

impl VolumeControl for SystemAudio {
    fn volume(&self) -> Result<u8> {
        for script in VOLUME_GET_SCRIPTS {
            if let Some(output) = query_osascript(script) {
                if let Ok(level) = output.parse::<i64>() {
                    return Ok(level.clamp(0, 100) as u8);
                }
            }
        }
        Err(Error::ControlUnavailable { control: "volume" })
    }

    fn set_volume(&self, level: u8) -> Result<u8> {
        let level = level.min(100);
        let scripts = [
            format!("set volume output volume {level}"),
            format!("tell application \"System Events\" to set volume output volume {level}"),
            // Legacy form takes 0-10.
            format!("set volume {:.1}", f64::from(level) / 10.0),
        ];
        for script in &scripts {
            if run_osascript(script).is_some() {
                return Ok(level);
            }
        }
        Err(Error::ControlUnavailable { control: "volume" })
    }

    fn muted(&self) -> Result<bool> {
        for script in MUTE_GET_SCRIPTS {
            if let Some(output) = query_osascript(script) {
                match output.as_str() {
                    "true" => return Ok(true),
                    "false" => return Ok(false),
                    _ => continue,
                }
            }
        }
        Err(Error::ControlUnavailable { control: "mute" })
    }

    fn set_muted(&self, muted: bool) -> Result<()> {
        let scripts = [
            format!("set volume output muted {muted}"),
            format!("tell application \"System Events\" to set volume output muted {muted}"),
        ];
        for script in &scripts {
            if run_osascript(script).is_some() {
                return Ok(());
            }
        }
        Err(Error::ControlUnavailable { control: "mute" })
    }
}

/// One device label per line; blank lines skipped.
fn parse_device_list(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn run_switch_audio(args: &[&str]) -> Result<String> {
    tracing::debug!(?args, "running {SWITCH_AUDIO_SOURCE}");
    let output = Command::new(SWITCH_AUDIO_SOURCE)
        .args(args)
        .output()
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::ToolMissing {
                tool: SWITCH_AUDIO_SOURCE,
                hint: BREW_HINT,
            },
            _ => Error::Io(e),
        })?;
    if !output.status.success() {
        return Err(Error::CommandFailed {
            command: format!("{SWITCH_AUDIO_SOURCE} {}", args.join(" ")),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Run one AppleScript snippet. Returns trimmed stdout on a successful
/// exit (possibly empty - setters produce no output), `None` when the
/// command failed or could not start.
fn run_osascript(script: &str) -> Option<String> {
    tracing::debug!(script, "running {OSASCRIPT}");
    let output = Command::new(OSASCRIPT)
        .args(["-e", script])
        .output()
        .ok()?;
    if !output.status.success() {
        tracing::debug!(
            script,
            stderr = %String::from_utf8_lossy(&output.stderr).trim(),
            "osascript variant failed, trying next"
        );
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Like [`run_osascript`] but for readbacks: empty output and the
/// AppleScript "missing value" sentinel both count as no answer.
fn query_osascript(script: &str) -> Option<String> {
    let output = run_osascript(script)?;
    if output.is_empty() || output == "missing value" {
        return None;
    }
    Some(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_device_list_skips_blank_lines() {
        let stdout = "MacBook Pro Speakers\n\n  AirPods Pro  \nHDMI Output\n";
        assert_eq!(
            parse_device_list(stdout),
            vec!["MacBook Pro Speakers", "AirPods Pro", "HDMI Output"]
        );
    }

    #[test]
    fn test_parse_device_list_empty_output() {
        assert!(parse_device_list("").is_empty());
        assert!(parse_device_list("\n \n").is_empty());
    }
}
