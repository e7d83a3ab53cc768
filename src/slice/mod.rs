//! Slice domain: identifiers, content, the package registry, and live
//! bindings.

pub mod content;
pub mod live;
pub mod registry;
pub mod uri;

pub use content::{Shortcut, Slice, SliceRow};
pub use live::{LiveSlice, SliceBinder, SliceUpdate};
pub use registry::{PackageInfo, PackageRegistry, ProviderInfo};
pub use uri::SliceUri;

use serde::{Deserialize, Serialize};

/// Display density for the slice pane. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Large,
    Small,
    Shortcut,
}

impl DisplayMode {
    pub const ALL: [DisplayMode; 3] = [DisplayMode::Large, DisplayMode::Small, DisplayMode::Shortcut];

    pub fn label(self) -> &'static str {
        match self {
            DisplayMode::Large => "Large",
            DisplayMode::Small => "Small",
            DisplayMode::Shortcut => "Shortcut",
        }
    }
}
