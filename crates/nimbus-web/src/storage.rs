use web_sys::{Storage, Window};

use nimbus_engine::{DashboardError, PreferenceStore};

const DARK_MODE_KEY: &str = "darkMode";

/// Manual-dark flag in `localStorage["darkMode"]` as "true"/"false".
pub struct LocalStoragePreferences {
    storage: Option<Storage>,
}

impl LocalStoragePreferences {
    /// Storage can be missing (privacy mode, sandboxed iframe); reads then
    /// report `false` and writes fail.
    pub fn new(window: &Window) -> Self {
        let storage = window.local_storage().ok().flatten();
        if storage.is_none() {
            log::warn!("localStorage unavailable; theme preference will not persist");
        }
        Self { storage }
    }
}

impl PreferenceStore for LocalStoragePreferences {
    fn manual_dark(&self) -> bool {
        self.storage
            .as_ref()
            .and_then(|s| s.get_item(DARK_MODE_KEY).ok().flatten())
            .is_some_and(|value| value == "true")
    }

    fn set_manual_dark(&self, enabled: bool) -> Result<(), DashboardError> {
        let storage = self
            .storage
            .as_ref()
            .ok_or_else(|| DashboardError::Preference("localStorage unavailable".into()))?;
        storage
            .set_item(DARK_MODE_KEY, if enabled { "true" } else { "false" })
            .map_err(|_| DashboardError::Preference("localStorage write rejected".into()))
    }
}
