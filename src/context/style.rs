use super::root::{DocumentRoot, STYLE_ATTRIBUTE};
use super::ThemeMode;
use crate::styles::{ChartPalette, StyleDefinition, StyleRegistry};
use tracing::debug;

#[derive(Debug, Clone, Copy)]
pub struct ActiveStyle<'r> {
    registry: &'r StyleRegistry,
    definition: &'r StyleDefinition,
}

impl<'r> ActiveStyle<'r> {
    pub fn definition(&self) -> &'r StyleDefinition {
        self.definition
    }

    pub fn slug(&self) -> &'r str {
        self.definition.slug
    }

    pub fn all(&self) -> &'r [StyleDefinition] {
        self.registry.all()
    }

    pub fn palette(&self, mode: ThemeMode) -> ChartPalette {
        self.definition.chart_palette(mode)
    }
}

/// Resolves the route's style slug against the registry.
#[derive(Debug)]
pub struct StyleResolver<'r> {
    registry: &'r StyleRegistry,
    current: &'r StyleDefinition,
    mounted: bool,
}

impl<'r> StyleResolver<'r> {
    pub fn new(registry: &'r StyleRegistry, slug: Option<&str>) -> Self {
        Self {
            registry,
            current: resolve(registry, slug),
            mounted: false,
        }
    }

    pub fn active(&self) -> ActiveStyle<'r> {
        ActiveStyle {
            registry: self.registry,
            definition: self.current,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Post-mount effect. Only the first call writes.
    pub fn mount(&mut self, root: &mut dyn DocumentRoot) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.apply(root);
    }

    pub fn unmount(&mut self, root: &mut dyn DocumentRoot) {
        if self.mounted {
            root.remove_attribute(STYLE_ATTRIBUTE);
            self.mounted = false;
        }
    }

    pub fn navigate(&mut self, slug: Option<&str>, root: &mut dyn DocumentRoot) {
        self.current = resolve(self.registry, slug);
        if self.mounted {
            self.apply(root);
        }
    }

    fn apply(&self, root: &mut dyn DocumentRoot) {
        debug!(style = self.current.slug, "applying style attribute");
        root.set_attribute(STYLE_ATTRIBUTE, self.current.slug);
    }
}

fn resolve<'r>(registry: &'r StyleRegistry, slug: Option<&str>) -> &'r StyleDefinition {
    match slug.and_then(|slug| registry.lookup(slug)) {
        Some(definition) => definition,
        None => {
            debug!(requested = ?slug, "unknown style, using default");
            registry.default_style()
        }
    }
}
