use super::codec::{decode_dark_mode, encode_dark_mode};
use super::kv::KeyValueStore;
use crate::domain::Appearance;
use anyhow::Result;

/// Storage key for the appearance flag
pub const DARK_MODE_KEY: &str = "darkMode";

/// Load the remembered appearance, falling back to light on any problem
pub fn load_appearance(store: &dyn KeyValueStore) -> Appearance {
    let raw = match store.get(DARK_MODE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Appearance::default(),
        Err(e) => {
            tracing::warn!(error = %e, "could not read appearance, using light");
            return Appearance::default();
        }
    };

    match decode_dark_mode(&raw) {
        Ok(dark) => Appearance::from_dark(dark),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring stored appearance");
            Appearance::default()
        }
    }
}

/// Persist the appearance flag (no expiry)
pub fn save_appearance(store: &mut dyn KeyValueStore, appearance: Appearance) -> Result<()> {
    store.set(DARK_MODE_KEY, &encode_dark_mode(appearance.is_dark()), None)
}
