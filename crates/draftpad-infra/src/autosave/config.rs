use std::time::Duration;

/// Autosave timing configuration.
#[derive(Debug, Clone)]
pub struct AutosaveConfig {
    /// Quiet period after the last edit before an autosave fires.
    pub debounce: Duration,
    /// How long the `saved` status stays up before reverting to `idle`.
    pub saved_display: Duration,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(5000),
            saved_display: Duration::from_millis(3000),
        }
    }
}

impl AutosaveConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            debounce: std::env::var("AUTOSAVE_DEBOUNCE_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.debounce),
            saved_display: std::env::var("SAVED_DISPLAY_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.saved_display),
        }
    }
}
