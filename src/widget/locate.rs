//! Name-based widget discovery
//!
//! Host widgets are found by their internal names. Missing nodes are reported
//! as `None`, never as errors; callers degrade the features that need them.

use super::{Locatable, TreeWalker, WidgetKind};
use crate::config::LandmarkNames;

/// First node named `name` in pre-order, submenus included.
pub fn find_by_name<N: Locatable>(root: Option<&N>, name: &str) -> Option<N> {
    TreeWalker::new(root.cloned(), true).find(|w| w.name() == name)
}

/// Nearest strict ancestor of `start` satisfying `pred`.
pub fn find_ancestor<N, F>(start: &N, pred: F) -> Option<N>
where
    N: Locatable,
    F: Fn(&N) -> bool,
{
    let mut node = start.parent();
    while let Some(w) = node {
        if pred(&w) {
            return Some(w);
        }
        node = w.parent();
    }
    None
}

/// Ancestor-climbing discovery: find the landmark `name`, then the closest
/// ancestor of it satisfying `pred`.
pub fn find_enclosing<N, F>(root: &N, name: &str, pred: F) -> Option<N>
where
    N: Locatable,
    F: Fn(&N) -> bool,
{
    let landmark = find_by_name(Some(root), name)?;
    find_ancestor(&landmark, pred)
}

/// Bounded-descent discovery: find `name` but never look inside nodes named
/// in `prune` (the landmarks themselves are still candidates).
pub fn find_bounded<N: Locatable>(root: &N, name: &str, prune: &[&str]) -> Option<N> {
    let mut walker = TreeWalker::all(root);
    while let Some(w) = walker.next() {
        let w_name = w.name();
        if w_name == name {
            return Some(w);
        }
        if prune.contains(&w_name.as_str()) {
            walker.skip_children();
        }
    }
    None
}

fn is_paned<N: Locatable>(w: &N) -> bool {
    w.kind() == WidgetKind::Paned
}

/// The two structural landmarks of a file-manager window.
#[derive(Debug, Clone)]
pub struct WindowLandmarks<N> {
    /// Split container enclosing the toolbar.
    pub main_paned: Option<N>,
    pub menubar: Option<N>,
}

impl<N: Locatable> WindowLandmarks<N> {
    /// One pass over the window, submenus excluded. Neither the toolbar nor
    /// the menu bar is descended into once seen.
    pub fn discover(window: &N, names: &LandmarkNames) -> Self {
        let mut main_paned = None;
        let mut menubar = None;

        let mut walker = TreeWalker::new(Some(window.clone()), false);
        while let Some(w) = walker.next() {
            let name = w.name();
            if name == names.toolbar {
                if main_paned.is_none() {
                    main_paned = find_ancestor(&w, is_paned);
                }
                walker.skip_children();
            } else if name == names.menubar {
                if menubar.is_none() {
                    menubar = Some(w);
                }
                walker.skip_children();
            }
        }

        Self { main_paned, menubar }
    }

    /// Location entry of pane `index` (0 or 1) of the main split container.
    pub fn location_entry(&self, index: usize, names: &LandmarkNames) -> Option<N> {
        let pane = self.main_paned.as_ref()?.children().into_iter().nth(index)?;
        find_bounded(
            &pane,
            &names.location_entry,
            &[names.toolbar.as_str(), names.menubar.as_str()],
        )
    }
}

/// Menu items the remapper triggers, found under the menu bar.
#[derive(Debug, Clone)]
pub struct MenuTargets<N> {
    pub copy: Option<N>,
    pub move_to: Option<N>,
    pub mkdir: Option<N>,
    pub trash: Option<N>,
    pub edit_menu: Option<N>,
    pub extra_pane: Option<N>,
}

impl<N> Default for MenuTargets<N> {
    fn default() -> Self {
        Self {
            copy: None,
            move_to: None,
            mkdir: None,
            trash: None,
            edit_menu: None,
            extra_pane: None,
        }
    }
}

impl<N: Locatable> MenuTargets<N> {
    /// First match of each name in pre-order, submenus included.
    pub fn discover(menubar: &N, names: &LandmarkNames) -> Self {
        let mut targets = Self::default();
        for w in TreeWalker::all(menubar) {
            let name = w.name();
            let slot = if name == names.copy_item {
                &mut targets.copy
            } else if name == names.move_item {
                &mut targets.move_to
            } else if name == names.mkdir_item {
                &mut targets.mkdir
            } else if name == names.trash_item {
                &mut targets.trash
            } else if name == names.edit_menu {
                &mut targets.edit_menu
            } else if name == names.extra_pane_item {
                &mut targets.extra_pane
            } else {
                continue;
            };
            slot.get_or_insert(w);
        }
        targets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::Widget;

    fn c(name: &str) -> Widget {
        Widget::new(WidgetKind::Container, name)
    }

    #[test]
    fn test_find_by_name_missing_returns_none() {
        let root = c("root").child(c("a")).child(c("b"));
        assert!(find_by_name(Some(&root), "X").is_none());
        assert!(find_by_name::<Widget>(None, "root").is_none());
    }

    #[test]
    fn test_find_by_name_returns_first_in_preorder() {
        let first = c("dup");
        let second = c("dup");
        let root = c("root").child(c("a").child(first.clone())).child(second);
        assert_eq!(find_by_name(Some(&root), "dup"), Some(first));
    }

    #[test]
    fn test_find_by_name_searches_submenus() {
        let target = Widget::new(WidgetKind::MenuItem, "Trash");
        let file = Widget::new(WidgetKind::MenuItem, "File")
            .submenu_of(Widget::new(WidgetKind::Menu, "m").child(target.clone()));
        let bar = Widget::new(WidgetKind::MenuBar, "MenuBar").child(file);
        assert_eq!(find_by_name(Some(&bar), "Trash"), Some(target));
    }

    #[test]
    fn test_ancestor_climb_three_levels() {
        let toolbar = Widget::new(WidgetKind::Toolbar, "NautilusToolbar");
        let paned = Widget::new(WidgetKind::Paned, "").child(
            c("l1").child(c("l2").child(toolbar)),
        );
        let outer = Widget::new(WidgetKind::Paned, "outer");
        let root = Widget::new(WidgetKind::Window, "win").child(outer.clone().child(paned.clone()));

        let found = find_enclosing(&root, "NautilusToolbar", is_paned);
        assert_eq!(found, Some(paned));
    }

    #[test]
    fn test_ancestor_climb_without_match() {
        let root = c("root").child(c("mid").child(c("NautilusToolbar")));
        assert!(find_enclosing(&root, "NautilusToolbar", is_paned).is_none());
        assert!(find_enclosing(&root, "Nope", is_paned).is_none());
    }

    #[test]
    fn test_bounded_descent_skips_pruned_subtrees() {
        let decoy = Widget::new(WidgetKind::Entry, "NautilusLocationEntry");
        let real = Widget::new(WidgetKind::Entry, "NautilusLocationEntry");
        let root = c("pane")
            .child(Widget::new(WidgetKind::MenuBar, "MenuBar").child(decoy))
            .child(c("box").child(real.clone()));

        let found = find_bounded(&root, "NautilusLocationEntry", &["MenuBar"]);
        assert_eq!(found, Some(real));
    }

    #[test]
    fn test_window_landmarks() {
        let names = LandmarkNames::default();
        let menubar = Widget::new(WidgetKind::MenuBar, "MenuBar");
        let paned = Widget::new(WidgetKind::Paned, "")
            .child(c("vbox").child(Widget::new(WidgetKind::Toolbar, "NautilusToolbar")))
            .child(c("other"));
        let window = Widget::new(WidgetKind::Window, "NautilusWindow")
            .child(c("box").child(menubar.clone()).child(paned.clone()));

        let landmarks = WindowLandmarks::discover(&window, &names);
        assert_eq!(landmarks.main_paned, Some(paned));
        assert_eq!(landmarks.menubar, Some(menubar));
    }

    #[test]
    fn test_menu_targets_first_match_wins() {
        let names = LandmarkNames::default();
        let trash = Widget::new(WidgetKind::MenuItem, "Trash");
        let menu = Widget::new(WidgetKind::Menu, "m")
            .child(trash.clone())
            .child(Widget::new(WidgetKind::MenuItem, "Trash"));
        let edit = Widget::new(WidgetKind::MenuItem, "Edit").submenu_of(menu);
        let bar = Widget::new(WidgetKind::MenuBar, "MenuBar").child(edit.clone());

        let targets = MenuTargets::discover(&bar, &names);
        assert_eq!(targets.trash, Some(trash));
        assert_eq!(targets.edit_menu, Some(edit));
        assert!(targets.copy.is_none());
        assert!(targets.extra_pane.is_none());
    }
}
