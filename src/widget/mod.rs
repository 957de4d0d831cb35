//! Host widget abstraction
//!
//! The remapper never sees a concrete toolkit type. A host adapter exposes its
//! nodes through [`Locatable`] (enough to walk and search the tree) and
//! [`HostWidget`] (the handful of actions the remapper performs on the nodes it
//! found).

pub mod locate;
pub mod tree;
pub mod walk;

use std::fmt;

pub use locate::{MenuTargets, WindowLandmarks};
pub use tree::Widget;
pub use walk::TreeWalker;

/// Stable identity of a host node for the lifetime of that node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(pub u64);

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Coarse node type, the only type information the locator relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    Window,
    Container,
    /// Split container with exactly two children.
    Paned,
    Toolbar,
    MenuBar,
    Menu,
    MenuItem,
    Entry,
    /// Row-based directory listing.
    ListView,
    /// Icon-grid directory listing.
    GridView,
    Other,
}

impl WidgetKind {
    pub fn is_directory_listing(self) -> bool {
        matches!(self, WidgetKind::ListView | WidgetKind::GridView)
    }
}

/// Read-only view of a host node.
///
/// Handles are cheap to clone and compare by [`WidgetId`].
pub trait Locatable: Clone {
    fn id(&self) -> WidgetId;

    /// Internal (not user-visible) name. Not guaranteed unique.
    fn name(&self) -> String;

    fn kind(&self) -> WidgetKind;

    /// Ordered children. Empty for leaves.
    fn children(&self) -> Vec<Self>;

    /// Secondary substructure, i.e. the submenu of a menu item.
    fn submenu(&self) -> Option<Self>;

    fn parent(&self) -> Option<Self>;
}

/// Operations the remapper performs on nodes it has located.
pub trait HostWidget: Locatable {
    /// Trigger the node's default action (menu item activation).
    fn activate(&self);

    /// Current text of an entry-like node.
    fn text(&self) -> Option<String>;

    /// Keyboard focus of a toplevel window.
    fn focus(&self) -> Option<Self>;

    /// URIs selected in a directory listing, in selection order.
    fn selected_uris(&self) -> Vec<String>;

    /// Append a new menu item to this menu (or to the submenu of this item).
    /// Returns `None` when the host refuses.
    fn append_menu_item(&self, name: &str, label: &str) -> Option<Self>;
}
