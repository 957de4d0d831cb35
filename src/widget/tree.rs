//! In-memory widget tree
//!
//! A reference host adapter: reference-counted nodes with weak parent links,
//! mirroring how toolkit widgets are owned by their container.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use super::{HostWidget, Locatable, WidgetId, WidgetKind};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

struct Node {
    id: WidgetId,
    name: String,
    kind: WidgetKind,
    label: String,
    text: RefCell<String>,
    children: RefCell<Vec<Widget>>,
    submenu: RefCell<Option<Widget>>,
    parent: RefCell<Weak<Node>>,
    focus: RefCell<Weak<Node>>,
    selection: RefCell<Vec<String>>,
    activations: Cell<usize>,
}

/// Handle to a node of an in-memory widget tree.
#[derive(Clone)]
pub struct Widget(Rc<Node>);

impl Widget {
    pub fn new(kind: WidgetKind, name: impl Into<String>) -> Self {
        Self::with_label(kind, name, String::new())
    }

    pub fn with_label(kind: WidgetKind, name: impl Into<String>, label: impl Into<String>) -> Self {
        let id = WidgetId(NEXT_ID.fetch_add(1, Ordering::Relaxed));
        Widget(Rc::new(Node {
            id,
            name: name.into(),
            kind,
            label: label.into(),
            text: RefCell::new(String::new()),
            children: RefCell::new(Vec::new()),
            submenu: RefCell::new(None),
            parent: RefCell::new(Weak::new()),
            focus: RefCell::new(Weak::new()),
            selection: RefCell::new(Vec::new()),
            activations: Cell::new(0),
        }))
    }

    /// Append `child`, re-parenting it under this node.
    pub fn add(&self, child: &Widget) {
        *child.0.parent.borrow_mut() = Rc::downgrade(&self.0);
        self.0.children.borrow_mut().push(child.clone());
    }

    /// Builder form of [`Widget::add`].
    pub fn child(self, child: Widget) -> Self {
        self.add(&child);
        self
    }

    /// Attach `menu` as this item's submenu. The menu's parent is the item.
    pub fn set_submenu(&self, menu: &Widget) {
        *menu.0.parent.borrow_mut() = Rc::downgrade(&self.0);
        *self.0.submenu.borrow_mut() = Some(menu.clone());
    }

    pub fn submenu_of(self, menu: Widget) -> Self {
        self.set_submenu(&menu);
        self
    }

    pub fn set_text(&self, text: &str) {
        *self.0.text.borrow_mut() = text.to_string();
    }

    pub fn with_text(self, text: &str) -> Self {
        self.set_text(text);
        self
    }

    pub fn set_focus(&self, widget: &Widget) {
        *self.0.focus.borrow_mut() = Rc::downgrade(&widget.0);
    }

    pub fn set_selection<S: Into<String>>(&self, uris: impl IntoIterator<Item = S>) {
        *self.0.selection.borrow_mut() = uris.into_iter().map(Into::into).collect();
    }

    pub fn label(&self) -> &str {
        &self.0.label
    }

    pub fn activation_count(&self) -> usize {
        self.0.activations.get()
    }
}

impl PartialEq for Widget {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Widget {}

impl fmt::Debug for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Widget")
            .field("id", &self.0.id)
            .field("name", &self.0.name)
            .field("kind", &self.0.kind)
            .finish()
    }
}

impl Locatable for Widget {
    fn id(&self) -> WidgetId {
        self.0.id
    }

    fn name(&self) -> String {
        self.0.name.clone()
    }

    fn kind(&self) -> WidgetKind {
        self.0.kind
    }

    fn children(&self) -> Vec<Self> {
        self.0.children.borrow().clone()
    }

    fn submenu(&self) -> Option<Self> {
        self.0.submenu.borrow().clone()
    }

    fn parent(&self) -> Option<Self> {
        self.0.parent.borrow().upgrade().map(Widget)
    }
}

impl HostWidget for Widget {
    fn activate(&self) {
        self.0.activations.set(self.0.activations.get() + 1);
    }

    fn text(&self) -> Option<String> {
        match self.0.kind {
            WidgetKind::Entry => Some(self.0.text.borrow().clone()),
            _ => None,
        }
    }

    fn focus(&self) -> Option<Self> {
        self.0.focus.borrow().upgrade().map(Widget)
    }

    fn selected_uris(&self) -> Vec<String> {
        if self.0.kind.is_directory_listing() {
            self.0.selection.borrow().clone()
        } else {
            Vec::new()
        }
    }

    fn append_menu_item(&self, name: &str, label: &str) -> Option<Self> {
        let item = Widget::with_label(WidgetKind::MenuItem, name, label);
        match self.submenu() {
            Some(menu) => menu.add(&item),
            None => self.add(&item),
        }
        Some(item)
    }
}
