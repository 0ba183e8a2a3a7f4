//! Loads the double doors settings from the settings file, and writes them back whenever they change.
//!
//! The settings are checked when they are read - a file with values out of bounds is rejected as a whole
//! and the defaults are used instead.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::Context;
use bevy::prelude::*;
use doubledoors_core::settings::DoubleDoorsSettings;

#[derive(Resource, Debug, Clone, PartialEq, Eq)]
/// The file the settings are saved to
pub struct SettingsFile(pub PathBuf);

/// Reads the settings stored at this path.
///
/// Returns `Ok(None)` if there is no settings file yet.
pub fn load_settings_file(path: &Path) -> anyhow::Result<Option<DoubleDoorsSettings>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("Unable to read settings file {}", path.display())),
    };

    let settings = toml::from_str::<DoubleDoorsSettings>(&contents)
        .with_context(|| format!("Invalid settings in {}", path.display()))?;

    Ok(Some(settings))
}

/// Writes these settings to the given path, creating its directory if needed.
pub fn save_settings_file(path: &Path, settings: &DoubleDoorsSettings) -> anyhow::Result<()> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir).with_context(|| format!("Unable to create settings directory {}", dir.display()))?;
    }

    let serialized = toml::to_string(settings).context("Error serializing settings into toml")?;

    fs::write(path, serialized).with_context(|| format!("Error saving settings file {}", path.display()))
}

fn initial_settings(settings_file: Option<&Path>) -> DoubleDoorsSettings {
    let Some(path) = settings_file else {
        return DoubleDoorsSettings::default();
    };

    match load_settings_file(path) {
        Ok(Some(settings)) => settings,
        Ok(None) => {
            info!("No settings file at {} - using default double doors settings.", path.display());
            DoubleDoorsSettings::default()
        }
        Err(e) => {
            warn!("{e:#} - using default double doors settings.");
            DoubleDoorsSettings::default()
        }
    }
}

fn serialize_settings(settings: Res<DoubleDoorsSettings>, settings_file: Res<SettingsFile>) {
    if let Err(e) = save_settings_file(&settings_file.0, &settings) {
        warn!("{e:#}");
    }
}

pub(super) fn register(app: &mut App, settings_file: Option<PathBuf>) {
    app.insert_resource(initial_settings(settings_file.as_deref()));

    if let Some(path) = settings_file {
        app.insert_resource(SettingsFile(path));
    }

    app.add_systems(
        Update,
        serialize_settings
            .run_if(resource_exists::<SettingsFile>)
            .run_if(resource_changed::<DoubleDoorsSettings>),
    );
}
