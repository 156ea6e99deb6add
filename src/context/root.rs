use std::collections::BTreeMap;

pub const STYLE_ATTRIBUTE: &str = "data-style";
pub const THEME_ATTRIBUTE: &str = "data-theme";

/// Attribute sink on the outermost rendering surface.
pub trait DocumentRoot {
    fn set_attribute(&mut self, name: &str, value: &str);
    fn remove_attribute(&mut self, name: &str);
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DocumentAttributes {
    values: BTreeMap<String, String>,
    revision: u64,
}

impl DocumentAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn style(&self) -> Option<&str> {
        self.get(STYLE_ATTRIBUTE)
    }

    pub fn theme(&self) -> Option<&str> {
        self.get(THEME_ATTRIBUTE)
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl DocumentRoot for DocumentAttributes {
    fn set_attribute(&mut self, name: &str, value: &str) {
        if self.get(name) == Some(value) {
            return;
        }
        self.values.insert(name.to_string(), value.to_string());
        self.revision += 1;
    }

    fn remove_attribute(&mut self, name: &str) {
        if self.values.remove(name).is_some() {
            self.revision += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revision_tracks_real_changes_only() {
        let mut root = DocumentAttributes::new();
        assert!(root.is_empty());

        root.set_attribute(THEME_ATTRIBUTE, "dark");
        root.set_attribute(THEME_ATTRIBUTE, "dark");
        assert_eq!(root.revision(), 1);
        assert_eq!(root.theme(), Some("dark"));

        root.remove_attribute(STYLE_ATTRIBUTE);
        assert_eq!(root.revision(), 1);

        root.set_attribute(STYLE_ATTRIBUTE, "retro");
        root.remove_attribute(STYLE_ATTRIBUTE);
        assert_eq!(root.revision(), 3);
        assert_eq!(root.style(), None);
    }
}
