//! Preferences module - per-user settings with documented defaults.

mod settings;

pub use settings::{
    Language, NotificationSettings, Preferences, PreferencesPatch, PrivacySettings, Theme,
};
