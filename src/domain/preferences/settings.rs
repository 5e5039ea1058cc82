//! Per-user display and notification preferences.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::domain::foundation::ValidationError;

/// UI colour theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Auto,
}

impl Theme {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            "auto" => Some(Self::Auto),
            _ => None,
        }
    }
}

/// Interface language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    En,
    Es,
    Fr,
    De,
    Ja,
}

impl Language {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "en" => Some(Self::En),
            "es" => Some(Self::Es),
            "fr" => Some(Self::Fr),
            "de" => Some(Self::De),
            "ja" => Some(Self::Ja),
            _ => None,
        }
    }
}

/// Channels a user wants to be notified through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    pub email: bool,
    pub push: bool,
    pub sms: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email: true,
            push: true,
            sms: false,
        }
    }
}

/// Profile visibility settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrivacySettings {
    pub profile_visible: bool,
    pub show_email: bool,
}

impl Default for PrivacySettings {
    fn default() -> Self {
        Self {
            profile_visible: true,
            show_email: false,
        }
    }
}

/// Stored preferences for one user.
///
/// Keys outside the known set are kept verbatim in `extra`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub notifications: NotificationSettings,
    #[serde(default)]
    pub privacy: PrivacySettings,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Preferences {
    /// Returns a copy with the patch merged over these values.
    pub fn merged(&self, patch: PreferencesPatch) -> Self {
        let mut next = self.clone();
        if let Some(theme) = patch.theme {
            next.theme = theme;
        }
        if let Some(language) = patch.language {
            next.language = language;
        }
        if let Some(notifications) = patch.notifications {
            next.notifications = notifications;
        }
        if let Some(privacy) = patch.privacy {
            next.privacy = privacy;
        }
        next.extra.extend(patch.extra);
        next
    }
}

/// Validated partial preferences update.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PreferencesPatch {
    pub theme: Option<Theme>,
    pub language: Option<Language>,
    pub notifications: Option<NotificationSettings>,
    pub privacy: Option<PrivacySettings>,
    pub extra: BTreeMap<String, Value>,
}

impl PreferencesPatch {
    /// Builds a patch from a JSON object, validating each known key.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` if the value is not an object, or a known key has
    ///   a value of the wrong shape
    pub fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let object = value
            .as_object()
            .ok_or_else(|| ValidationError::invalid_format("preferences", "expected an object"))?;
        Self::from_map(object)
    }

    fn from_map(object: &Map<String, Value>) -> Result<Self, ValidationError> {
        let mut patch = Self::default();
        for (key, value) in object {
            match key.as_str() {
                "theme" => {
                    patch.theme = Some(
                        value
                            .as_str()
                            .and_then(Theme::parse)
                            .ok_or_else(|| invalid_value(key))?,
                    );
                }
                "language" => {
                    patch.language = Some(
                        value
                            .as_str()
                            .and_then(Language::parse)
                            .ok_or_else(|| invalid_value(key))?,
                    );
                }
                "notifications" => {
                    patch.notifications = Some(object_value(key, value)?);
                }
                "privacy" => {
                    patch.privacy = Some(object_value(key, value)?);
                }
                _ => {
                    patch.extra.insert(key.clone(), value.clone());
                }
            }
        }
        Ok(patch)
    }
}

fn invalid_value(key: &str) -> ValidationError {
    ValidationError::invalid_format(key, format!("Invalid preference value for {}", key))
}

fn object_value<T: serde::de::DeserializeOwned>(key: &str, value: &Value) -> Result<T, ValidationError> {
    if !value.is_object() {
        return Err(invalid_value(key));
    }
    serde_json::from_value(value.clone()).map_err(|_| invalid_value(key))
}
