//! Collaborator traits consumed by the dispatcher.
//!
//! The resolver only needs an ordered list of labels; everything that
//! actually talks to the operating system sits behind these traits so the
//! dispatch logic can be exercised against in-memory fakes.

use crate::error::Result;

/// Supplies the candidate device labels and the currently active device.
///
/// Implementations fetch a fresh list on every call - the core never
/// caches device lists, so staleness is entirely the caller's concern.
pub trait DeviceDirectory {
    /// All available output device labels, in the order the system
    /// reports them.
    fn devices(&self) -> Result<Vec<String>>;

    /// The currently active output device, if it can be determined.
    fn current(&self) -> Result<Option<String>>;

    /// Make `label` the active output device. `label` must be one of the
    /// exact strings returned by [`DeviceDirectory::devices`].
    fn activate(&self, label: &str) -> Result<()>;
}

/// Volume and mute control for the active output.
///
/// All of these may return [`Error::ControlUnavailable`] on systems where
/// the scripting interface is locked down; device switching is unaffected.
///
/// [`Error::ControlUnavailable`]: crate::error::Error::ControlUnavailable
pub trait VolumeControl {
    /// Current output volume, 0-100.
    fn volume(&self) -> Result<u8>;

    /// Set the output volume. Values are clamped to 0-100; returns the
    /// level actually applied.
    fn set_volume(&self, level: u8) -> Result<u8>;

    /// Whether the output is currently muted.
    fn muted(&self) -> Result<bool>;

    /// Mute or unmute the output.
    fn set_muted(&self, muted: bool) -> Result<()>;

    /// Shift the volume by `delta`, clamping the result to 0-100.
    /// Returns the level actually applied.
    fn adjust_volume(&self, delta: i16) -> Result<u8> {
        let current = i16::from(self.volume()?);
        let target = (current + delta).clamp(0, 100) as u8;
        self.set_volume(target)
    }

    /// Flip the mute state. Returns the new state (true = muted).
    fn toggle_mute(&self) -> Result<bool> {
        let muted = self.muted()?;
        self.set_muted(!muted)?;
        Ok(!muted)
    }
}
