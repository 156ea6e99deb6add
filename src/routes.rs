use crate::styles::StyleRegistry;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Gallery,
    Dashboard { style: String },
    NotFound { path: String },
}

impl Route {
    /// Parses an app path. Dashboard routes only exist for registered slugs;
    /// anything else is [`Route::NotFound`].
    pub fn parse(path: &str, registry: &StyleRegistry) -> Self {
        let trimmed = path.trim().trim_matches('/');
        let segments: Vec<&str> = if trimmed.is_empty() {
            Vec::new()
        } else {
            trimmed.split('/').collect()
        };

        match segments.as_slice() {
            [] => Route::Gallery,
            ["dashboard", slug] if registry.lookup(slug).is_some() => Route::dashboard(*slug),
            _ => Route::NotFound {
                path: path.trim().to_string(),
            },
        }
    }

    pub fn dashboard(style: impl Into<String>) -> Self {
        Route::Dashboard {
            style: style.into(),
        }
    }

    pub fn dashboards(registry: &StyleRegistry) -> Vec<Route> {
        registry
            .all()
            .iter()
            .map(|style| Route::dashboard(style.slug))
            .collect()
    }

    pub fn style(&self) -> Option<&str> {
        match self {
            Route::Dashboard { style } => Some(style),
            _ => None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Gallery => "/".into(),
            Route::Dashboard { style } => format!("/dashboard/{style}"),
            Route::NotFound { path } => path.clone(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
