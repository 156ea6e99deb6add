mod root;
mod scope;
mod style;
mod theme;

pub use root::DocumentAttributes;
#[cfg(test)]
pub use root::{DocumentRoot, STYLE_ATTRIBUTE, THEME_ATTRIBUTE};
pub use scope::{ContextError, RenderScope};
pub use style::{ActiveStyle, StyleResolver};
pub use theme::{ThemeMode, ThemeResolver};
#[cfg(test)]
pub use theme::THEME_STORAGE_KEY;
