//! Test doubles: a two-pane file-manager window and recording collaborators.

use std::cell::RefCell;

use super::Prompter;
use crate::error::{OrthokeysError, Result};
use crate::services::{DesktopConfig, LaunchRequest, Launcher};
use crate::widget::{Widget, WidgetId, WidgetKind};

pub struct MenuItems {
    pub copy: Option<Widget>,
    pub move_to: Option<Widget>,
    pub mkdir: Option<Widget>,
    pub trash: Option<Widget>,
    pub extra_pane: Option<Widget>,
}

pub struct Fixture {
    pub window: Widget,
    pub paned: Widget,
    pub panes: Vec<Widget>,
    pub entries: Vec<Widget>,
    /// List view in pane 0, grid view in pane 1
    pub views: Vec<Widget>,
    pub menubar: Widget,
    /// The "Edit" menu item
    pub edit: Widget,
    pub items: MenuItems,
}

fn container(name: &str) -> Widget {
    Widget::new(WidgetKind::Container, name)
}

fn item(name: &str) -> Widget {
    Widget::new(WidgetKind::MenuItem, name)
}

/// window > vbox > [MenuBar, paned > [pane0, pane1]]
///
/// Pane 0 carries the toolbar. Pane `i` gets a location entry showing
/// `locations[i]` when present. With `full_menu` the menu bar has File, Edit
/// and View menus holding every item the remapper looks for; otherwise it has
/// an empty Edit menu only.
pub fn window(locations: &[&str], full_menu: bool) -> Fixture {
    let menubar = Widget::new(WidgetKind::MenuBar, "MenuBar");
    let edit_menu = Widget::new(WidgetKind::Menu, "EditMenu");
    let edit = item("Edit").submenu_of(edit_menu.clone());

    let mut items = MenuItems {
        copy: None,
        move_to: None,
        mkdir: None,
        trash: None,
        extra_pane: None,
    };
    if full_menu {
        let copy = item("Copy to next pane");
        let move_to = item("Move to next pane");
        let mkdir = item("New Folder");
        let trash = item("Trash");
        let extra_pane = item("Show Hide Extra Pane");

        let file = item("File").submenu_of(
            Widget::new(WidgetKind::Menu, "FileMenu")
                .child(mkdir.clone())
                .child(copy.clone())
                .child(move_to.clone()),
        );
        edit_menu.add(&trash);
        let view_menu = Widget::new(WidgetKind::Menu, "ViewMenu").child(extra_pane.clone());
        let view = item("View").submenu_of(view_menu);

        menubar.add(&file);
        menubar.add(&edit);
        menubar.add(&view);
        items = MenuItems {
            copy: Some(copy),
            move_to: Some(move_to),
            mkdir: Some(mkdir),
            trash: Some(trash),
            extra_pane: Some(extra_pane),
        };
    } else {
        menubar.add(&edit);
    }

    let views = vec![
        Widget::new(WidgetKind::ListView, "tree"),
        Widget::new(WidgetKind::GridView, "grid"),
    ];
    let view_names = ["NautilusListView", "NautilusIconView"];

    let paned = Widget::new(WidgetKind::Paned, "");
    let mut panes = Vec::new();
    let mut entries = Vec::new();
    for i in 0..2 {
        let pane = container("NautilusWindowPane");
        if i == 0 {
            let toolbar = Widget::new(WidgetKind::Toolbar, "NautilusToolbar");
            pane.add(&container("toolbox").child(toolbar));
        }
        if let Some(location) = locations.get(i) {
            let entry = Widget::new(WidgetKind::Entry, "NautilusLocationEntry").with_text(location);
            pane.add(&container("location bar").child(entry.clone()));
            entries.push(entry);
        }
        pane.add(&container(view_names[i]).child(views[i].clone()));
        paned.add(&pane);
        panes.push(pane);
    }

    let window = Widget::new(WidgetKind::Window, "NautilusWindow")
        .child(container("vbox").child(menubar.clone()).child(paned.clone()));

    Fixture {
        window,
        paned,
        panes,
        entries,
        views,
        menubar,
        edit,
        items,
    }
}

/// Records launches instead of spawning.
#[derive(Default)]
pub struct RecordingLauncher {
    launched: RefCell<Vec<LaunchRequest>>,
    fail: bool,
}

impl RecordingLauncher {
    pub fn failing() -> Self {
        Self {
            launched: RefCell::new(Vec::new()),
            fail: true,
        }
    }

    pub fn launched(&self) -> Vec<LaunchRequest> {
        self.launched.borrow().clone()
    }
}

impl Launcher for RecordingLauncher {
    fn launch(&self, request: &LaunchRequest) -> Result<()> {
        if self.fail {
            return Err(OrthokeysError::Launch {
                program: request.program.clone(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
            });
        }
        self.launched.borrow_mut().push(request.clone());
        Ok(())
    }
}

/// Answers every question the same way and remembers the titles asked.
pub struct ScriptedPrompter {
    answer: bool,
    asked: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            asked: RefCell::new(Vec::new()),
        }
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, _window: WidgetId, title: &str, _message: &str) -> bool {
        self.asked.borrow_mut().push(title.to_string());
        self.answer
    }
}

pub struct FixedDesktop(pub Option<String>);

impl DesktopConfig for FixedDesktop {
    fn terminal_command(&self) -> Option<String> {
        self.0.clone()
    }
}
