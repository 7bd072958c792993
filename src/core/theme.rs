use std::fmt;
use std::str::FromStr;

/// Persisted appearance preference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Auto,
    Night,
    Day,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme mode `{0}`")]
pub struct ParseThemeError(pub String);

impl ThemeMode {
    pub const ALL: [ThemeMode; 3] = [ThemeMode::Auto, ThemeMode::Night, ThemeMode::Day];

    /// Reads a stored value; anything missing or unrecognised is `Auto`.
    pub fn from_stored(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }

    /// Auto → Night → Day → Auto.
    pub fn next(self) -> Self {
        match self {
            ThemeMode::Auto => ThemeMode::Night,
            ThemeMode::Night => ThemeMode::Day,
            ThemeMode::Day => ThemeMode::Auto,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Auto => "auto",
            ThemeMode::Night => "night",
            ThemeMode::Day => "day",
        }
    }

    /// Label shown on the toggle control.
    pub fn label(self) -> &'static str {
        match self {
            ThemeMode::Auto => "AUTO",
            ThemeMode::Night => "DARK",
            ThemeMode::Day => "LIGHT",
        }
    }

    /// Whether night colours apply given the OS colour-scheme preference.
    pub fn is_night(self, prefers_dark: bool) -> bool {
        match self {
            ThemeMode::Auto => prefers_dark,
            ThemeMode::Night => true,
            ThemeMode::Day => false,
        }
    }

    pub fn blend_target(self, prefers_dark: bool) -> f32 {
        if self.is_night(prefers_dark) {
            1.0
        } else {
            0.0
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(ThemeMode::Auto),
            "night" => Ok(ThemeMode::Night),
            "day" => Ok(ThemeMode::Day),
            other => Err(ParseThemeError(other.to_string())),
        }
    }
}
