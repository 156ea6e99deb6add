use super::root::{DocumentRoot, THEME_ATTRIBUTE};
use crate::services::preferences::PreferenceStore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

pub const THEME_STORAGE_KEY: &str = "dashboard-theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn is_dark(self) -> bool {
        self == ThemeMode::Dark
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn from_stored(value: &str) -> Option<Self> {
        match value {
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            _ => None,
        }
    }

    /// Reads the persisted mode without writing anything back. Missing,
    /// unrecognised or unreadable values give `None`.
    pub fn read_from(store: &dyn PreferenceStore) -> Option<Self> {
        match store.get(THEME_STORAGE_KEY) {
            Ok(Some(stored)) => {
                let mode = ThemeMode::from_stored(&stored);
                if mode.is_none() {
                    debug!(%stored, "ignoring unrecognised stored theme");
                }
                mode
            }
            Ok(None) => None,
            Err(err) => {
                warn!(error = %err, "failed to read theme preference");
                None
            }
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Light/dark state with persistence through a [`PreferenceStore`].
pub struct ThemeResolver {
    store: Arc<dyn PreferenceStore>,
    mode: ThemeMode,
    mounted: bool,
}

impl ThemeResolver {
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self {
            store,
            mode: ThemeMode::default(),
            mounted: false,
        }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn is_dark(&self) -> bool {
        self.mode.is_dark()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn mount(&mut self, root: &mut dyn DocumentRoot) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        if let Some(mode) = ThemeMode::read_from(self.store.as_ref()) {
            self.mode = mode;
        }
        self.commit(root);
    }

    pub fn set(&mut self, mode: ThemeMode, root: &mut dyn DocumentRoot) {
        if mode == self.mode {
            return;
        }
        self.mode = mode;
        if self.mounted {
            self.commit(root);
        }
    }

    pub fn toggle(&mut self, root: &mut dyn DocumentRoot) {
        self.set(self.mode.toggled(), root);
    }

    fn commit(&self, root: &mut dyn DocumentRoot) {
        root.set_attribute(THEME_ATTRIBUTE, self.mode.as_str());
        if let Err(err) = self.store.set(THEME_STORAGE_KEY, self.mode.as_str()) {
            warn!(error = %err, mode = %self.mode, "failed to persist theme preference");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::DocumentAttributes;
    use crate::services::preferences::testing::MemoryStore;

    fn mounted(store: &Arc<MemoryStore>) -> (ThemeResolver, DocumentAttributes) {
        let mut root = DocumentAttributes::new();
        let mut resolver = ThemeResolver::new(store.clone());
        resolver.mount(&mut root);
        (resolver, root)
    }

    #[test]
    fn starts_light_without_touching_the_root() {
        let store = Arc::new(MemoryStore::new());
        let resolver = ThemeResolver::new(store.clone());
        assert_eq!(resolver.mode(), ThemeMode::Light);
        assert!(!resolver.is_dark());
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn mount_applies_and_persists_default() {
        let store = Arc::new(MemoryStore::new());
        let (resolver, root) = mounted(&store);
        assert!(resolver.is_mounted());
        assert_eq!(root.theme(), Some("light"));
        assert_eq!(store.value(THEME_STORAGE_KEY).as_deref(), Some("light"));
    }

    #[test]
    fn stored_modes_round_trip_through_a_fresh_mount() {
        for mode in [ThemeMode::Light, ThemeMode::Dark] {
            let store = Arc::new(MemoryStore::new());
            {
                let (mut resolver, mut root) = mounted(&store);
                resolver.set(mode, &mut root);
            }
            let (resolver, root) = mounted(&store);
            assert_eq!(resolver.mode(), mode);
            assert_eq!(root.theme(), Some(mode.as_str()));
        }
    }

    #[test]
    fn unrecognised_stored_value_is_ignored() {
        for stored in ["Dark", "blue", "", " dark"] {
            let store = Arc::new(MemoryStore::with_value(THEME_STORAGE_KEY, stored));
            let (resolver, _) = mounted(&store);
            assert_eq!(resolver.mode(), ThemeMode::Light, "{stored:?}");
            assert_eq!(store.value(THEME_STORAGE_KEY).as_deref(), Some("light"));
        }
    }

    #[test]
    fn setting_the_same_mode_twice_writes_once() {
        let store = Arc::new(MemoryStore::new());
        let (mut resolver, mut root) = mounted(&store);
        let after_mount = store.writes();

        resolver.set(ThemeMode::Dark, &mut root);
        resolver.set(ThemeMode::Dark, &mut root);

        assert_eq!(resolver.mode(), ThemeMode::Dark);
        assert_eq!(store.writes(), after_mount + 1);
        assert_eq!(store.value(THEME_STORAGE_KEY).as_deref(), Some("dark"));
    }

    #[test]
    fn toggle_flips_and_persists() {
        let store = Arc::new(MemoryStore::new());
        let (mut resolver, mut root) = mounted(&store);

        resolver.toggle(&mut root);
        assert!(resolver.is_dark());
        assert_eq!(root.theme(), Some("dark"));

        resolver.toggle(&mut root);
        assert_eq!(resolver.mode(), ThemeMode::Light);
        assert_eq!(store.value(THEME_STORAGE_KEY).as_deref(), Some("light"));
    }

    #[test]
    fn changes_before_mount_stay_in_memory() {
        let store = Arc::new(MemoryStore::with_value(THEME_STORAGE_KEY, "light"));
        let mut root = DocumentAttributes::new();
        let mut resolver = ThemeResolver::new(store.clone());

        resolver.toggle(&mut root);
        assert!(resolver.is_dark());
        assert!(root.is_empty());
        assert_eq!(store.writes(), 0);

        resolver.mount(&mut root);
        assert_eq!(resolver.mode(), ThemeMode::Light);
    }

    #[test]
    fn reading_the_stored_mode_never_writes() {
        let store = MemoryStore::with_value(THEME_STORAGE_KEY, "dark");
        assert_eq!(ThemeMode::read_from(&store), Some(ThemeMode::Dark));
        assert_eq!(ThemeMode::read_from(&MemoryStore::new()), None);
        assert_eq!(ThemeMode::read_from(&MemoryStore::failing()), None);
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn read_failures_keep_the_default() {
        let store = Arc::new(MemoryStore::failing());
        let mut root = DocumentAttributes::new();
        let mut resolver = ThemeResolver::new(store);
        resolver.mount(&mut root);
        assert_eq!(resolver.mode(), ThemeMode::Light);
        assert_eq!(root.theme(), Some("light"));
    }
}
