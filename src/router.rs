//! The view router's vocabulary: which top-level screen is current and how
//! the two navigation surfaces highlight it.

/// Top-level screens. Navigation is cyclic: any view is reachable from any
/// other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    MyCollections,
    Santa,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Home => "home",
            View::MyCollections => "mycolls",
            View::Santa => "santa",
        }
    }

    /// The top tab highlighting this view. Home and MyCollections share one
    /// tab; the bottom nav (see [`View::nav_highlight`]) keeps them apart.
    pub fn top_tab(&self) -> TopTab {
        match self {
            View::Home | View::MyCollections => TopTab::Collect,
            View::Santa => TopTab::Santa,
        }
    }

    /// Whether the bottom-nav item for `item` is highlighted while this view
    /// is current. Exactly one item ever is.
    pub fn nav_highlight(&self, item: View) -> bool {
        *self == item
    }
}

/// The upper tab bar, which collapses the two collection views into one tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopTab {
    Collect,
    Santa,
}
