use super::{ActiveStyle, ThemeMode};
use crate::styles::ChartPalette;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContextError {
    #[error("{accessor} must be used within a {provider}")]
    OutsideProvider {
        accessor: &'static str,
        provider: &'static str,
    },
}

/// The providers visible to a widget.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderScope<'r> {
    style: Option<ActiveStyle<'r>>,
    theme: Option<ThemeMode>,
}

impl<'r> RenderScope<'r> {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn with_theme(mut self, mode: ThemeMode) -> Self {
        self.theme = Some(mode);
        self
    }

    pub fn with_style(mut self, style: ActiveStyle<'r>) -> Self {
        self.style = Some(style);
        self
    }

    pub fn style(&self) -> Result<ActiveStyle<'r>, ContextError> {
        self.style.ok_or(ContextError::OutsideProvider {
            accessor: "style",
            provider: "StyleResolver",
        })
    }

    pub fn theme(&self) -> Result<ThemeMode, ContextError> {
        self.theme.ok_or(ContextError::OutsideProvider {
            accessor: "theme",
            provider: "ThemeResolver",
        })
    }

    pub fn is_dark(&self) -> Result<bool, ContextError> {
        self.theme().map(ThemeMode::is_dark)
    }

    pub fn palette(&self) -> Result<ChartPalette, ContextError> {
        let style = self.style()?;
        Ok(style.palette(self.theme()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::StyleResolver;
    use crate::styles::StyleRegistry;

    #[test]
    fn unbound_providers_report_misuse() {
        let scope = RenderScope::root();
        assert_eq!(
            scope.style().unwrap_err(),
            ContextError::OutsideProvider {
                accessor: "style",
                provider: "StyleResolver",
            }
        );
        assert!(scope.theme().is_err());
        assert!(scope.palette().is_err());
    }

    #[test]
    fn theme_only_scope_still_rejects_style_access() {
        let scope = RenderScope::root().with_theme(ThemeMode::Dark);
        assert_eq!(scope.is_dark(), Ok(true));
        let error = scope.style().unwrap_err();
        assert_eq!(error.to_string(), "style must be used within a StyleResolver");
    }

    #[test]
    fn bound_scope_exposes_palette() {
        let resolver = StyleResolver::new(StyleRegistry::builtin(), Some("luxury"));
        let scope = RenderScope::root()
            .with_theme(ThemeMode::Light)
            .with_style(resolver.active());
        let palette = scope.palette().unwrap();
        assert_eq!(palette.revenue, "#c9a227");
        assert_eq!(scope.style().unwrap().slug(), "luxury");
    }
}
