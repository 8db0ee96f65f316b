//! Settings Store
//!
//! One `DrawSettings` per process:
//! - read once from the backend at startup
//! - absent, unreadable, corrupt or invalid entries fall back to defaults
//! - every accepted update overwrites the whole entry
//! - write failures are logged and the session continues in memory

use ld_core::{DrawSettings, LdResult, SettingsPatch};

use crate::backend::{MemoryBackend, SettingsBackend};

/// Where the current settings came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsOrigin {
    /// Loaded from the backend
    Stored,
    /// Nothing usable was stored
    Defaults,
    /// Set by an update during this session
    Updated,
}

/// Persistent holder of the draw settings
pub struct SettingsStore {
    backend: Box<dyn SettingsBackend>,
    settings: DrawSettings,
    origin: SettingsOrigin,
    last_write_failed: bool,
}

impl SettingsStore {
    /// Load from `backend`, falling back to defaults
    pub fn load(backend: impl SettingsBackend + 'static) -> Self {
        let (settings, origin) = Self::read_settings(&backend);
        log::info!(
            "Settings loaded from {} ({:?}): tickets {}..={}, {} prizes",
            backend.describe(),
            origin,
            settings.ticket_start,
            settings.ticket_end,
            settings.number_of_prizes
        );

        Self {
            backend: Box::new(backend),
            settings,
            origin,
            last_write_failed: false,
        }
    }

    /// Store that never touches disk
    pub fn in_memory() -> Self {
        Self::load(MemoryBackend::new())
    }

    fn read_settings(backend: &dyn SettingsBackend) -> (DrawSettings, SettingsOrigin) {
        let content = match backend.read() {
            Ok(Some(content)) => content,
            Ok(None) => return (DrawSettings::default(), SettingsOrigin::Defaults),
            Err(e) => {
                log::warn!("Failed to read settings from {}: {}", backend.describe(), e);
                return (DrawSettings::default(), SettingsOrigin::Defaults);
            }
        };

        let settings: DrawSettings = match serde_json::from_str(&content) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Stored settings are corrupt, using defaults: {}", e);
                return (DrawSettings::default(), SettingsOrigin::Defaults);
            }
        };

        if let Err(e) = settings.validate() {
            log::warn!("Stored settings rejected, using defaults: {}", e);
            return (DrawSettings::default(), SettingsOrigin::Defaults);
        }

        (settings, SettingsOrigin::Stored)
    }

    pub fn settings(&self) -> &DrawSettings {
        &self.settings
    }

    pub fn origin(&self) -> SettingsOrigin {
        self.origin
    }

    /// Whether the most recent write could not be persisted
    pub fn last_write_failed(&self) -> bool {
        self.last_write_failed
    }

    pub fn backend(&self) -> &dyn SettingsBackend {
        self.backend.as_ref()
    }

    /// Merge `patch` over the current settings, validate, persist
    pub fn update(&mut self, patch: &SettingsPatch) -> LdResult<&DrawSettings> {
        let next = self.settings.merged(patch);
        self.replace(next)
    }

    /// Replace the settings wholesale, validate, persist.
    ///
    /// Invalid settings are rejected and the current ones kept.
    pub fn replace(&mut self, settings: DrawSettings) -> LdResult<&DrawSettings> {
        settings.validate()?;
        if !settings.has_unique_capacity() {
            log::warn!(
                "{} prizes but only {} tickets; the pool will run out",
                settings.number_of_prizes,
                settings.total_tickets()
            );
        }

        self.settings = settings;
        self.origin = SettingsOrigin::Updated;
        self.persist();
        Ok(&self.settings)
    }

    fn persist(&mut self) {
        let json = match serde_json::to_string_pretty(&self.settings) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Failed to serialize settings: {}", e);
                self.last_write_failed = true;
                return;
            }
        };

        match self.backend.write(&json) {
            Ok(()) => {
                self.last_write_failed = false;
                log::debug!("Settings saved to {}", self.backend.describe());
            }
            Err(e) => {
                self.last_write_failed = true;
                log::warn!(
                    "Failed to save settings to {}: {} (continuing in memory)",
                    self.backend.describe(),
                    e
                );
            }
        }
    }
}
