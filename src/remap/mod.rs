//! Orthodox shortcut remapping
//!
//! Each host window gets a [`WindowState`] the first time it is seen. Setting
//! one up walks the window to find the widgets the shortcuts act on, frees
//! the host keys that collide with the orthodox scheme and registers the
//! window's key handlers in the shared [`AcceleratorTable`].
//!
//! Missing widgets are not errors: the shortcuts depending on them are simply
//! not registered, and a warning is logged once.

pub mod compare;
#[cfg(test)]
pub(crate) mod fixtures;

use std::collections::HashMap;
use std::fmt;

use crate::config::{HostActions, LandmarkNames, OrthodoxKeys, Settings, ToolSettings};
use crate::error::{OrthokeysError, Result};
use crate::keybindings::{AcceleratorTable, ActionPath, Binding, Dispatch, KeyBind};
use crate::services::{DesktopConfig, LaunchRequest, Launcher};
use crate::widget::{HostWidget, MenuTargets, WidgetId, WindowLandmarks};

/// Internal name of the menu item appended to the Edit menu.
pub const SHORTCUTS_ITEM_NAME: &str = "OrthokeysKeyboardShortcuts";
pub const SHORTCUTS_ITEM_LABEL: &str = "Keyboard Shortcuts…";

/// Operations bound to per-window key handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrthodoxOp {
    Edit,
    Copy,
    Move,
    Mkdir,
    Delete,
    Terminal,
    VcsClient,
}

impl OrthodoxOp {
    pub const ALL: [OrthodoxOp; 7] = [
        OrthodoxOp::Edit,
        OrthodoxOp::Copy,
        OrthodoxOp::Move,
        OrthodoxOp::Mkdir,
        OrthodoxOp::Delete,
        OrthodoxOp::Terminal,
        OrthodoxOp::VcsClient,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OrthodoxOp::Edit => "edit",
            OrthodoxOp::Copy => "copy",
            OrthodoxOp::Move => "move",
            OrthodoxOp::Mkdir => "mkdir",
            OrthodoxOp::Delete => "delete",
            OrthodoxOp::Terminal => "terminal",
            OrthodoxOp::VcsClient => "vcs client",
        }
    }

    /// Title and question asked before running, for operations that need it.
    fn confirmation(self) -> Option<(&'static str, &'static str)> {
        match self {
            OrthodoxOp::Copy => Some(("Copy", "Do you want to copy selected files/directories?")),
            OrthodoxOp::Move => Some(("Move", "Do you want to move selected files/directories?")),
            OrthodoxOp::Delete => Some((
                "Delete",
                "Do you want to move selected files/directories to trash?",
            )),
            _ => None,
        }
    }
}

impl fmt::Display for OrthodoxOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub type Accelerators = AcceleratorTable<OrthodoxOp>;

/// How the host should treat a key event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Consumed by an orthodox handler; no further propagation.
    Handled,
    /// Bound to a host action the host should run.
    Action(ActionPath),
    Ignored,
}

/// Yes/no question shown before destructive operations.
pub trait Prompter {
    fn confirm(&self, window: WidgetId, title: &str, message: &str) -> bool;
}

/// External collaborators used while running a handler.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub prompter: &'a dyn Prompter,
    pub launcher: &'a dyn Launcher,
    pub desktop: &'a dyn DesktopConfig,
}

/// Orthodox keys parsed from settings. Bad key strings disable the operation.
#[derive(Debug, Clone, Default)]
pub struct OrthodoxBindings {
    pub view: Option<KeyBind>,
    ops: HashMap<OrthodoxOp, KeyBind>,
}

impl OrthodoxBindings {
    pub fn from_settings(keys: &OrthodoxKeys) -> Self {
        let parse = |what: &str, s: &str| {
            let key = KeyBind::parse(s);
            if key.is_none() {
                log::warn!("invalid key {:?} for {}; shortcut disabled", s, what);
            }
            key
        };

        let mut ops = HashMap::new();
        let pairs = [
            (OrthodoxOp::Edit, &keys.edit),
            (OrthodoxOp::Copy, &keys.copy),
            (OrthodoxOp::Move, &keys.move_to),
            (OrthodoxOp::Mkdir, &keys.mkdir),
            (OrthodoxOp::Delete, &keys.delete),
            (OrthodoxOp::Terminal, &keys.terminal),
            (OrthodoxOp::VcsClient, &keys.vcs_client),
        ];
        for (op, s) in pairs {
            if let Some(key) = parse(op.name(), s) {
                ops.insert(op, key);
            }
        }

        Self {
            view: parse("view", &keys.view),
            ops,
        }
    }

    pub fn key(&self, op: OrthodoxOp) -> Option<KeyBind> {
        self.ops.get(&op).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemapState {
    Initializing,
    Ready,
    Destroyed,
}

/// Widgets located in one host window.
#[derive(Debug)]
pub struct WindowState<N> {
    window: N,
    state: RemapState,
    main_paned: Option<N>,
    location_entries: [Option<N>; 2],
    menu: MenuTargets<N>,
    shortcuts_item: Option<N>,
}

impl<N: HostWidget> WindowState<N> {
    fn new(window: &N) -> Self {
        Self {
            window: window.clone(),
            state: RemapState::Initializing,
            main_paned: None,
            location_entries: [None, None],
            menu: MenuTargets::default(),
            shortcuts_item: None,
        }
    }

    pub fn id(&self) -> WidgetId {
        self.window.id()
    }

    pub fn window(&self) -> &N {
        &self.window
    }

    pub fn state(&self) -> RemapState {
        self.state
    }

    pub fn main_paned(&self) -> Option<&N> {
        self.main_paned.as_ref()
    }

    pub fn location_entry(&self, pane: usize) -> Option<&N> {
        self.location_entries.get(pane).and_then(Option::as_ref)
    }

    pub fn has_locations(&self) -> bool {
        self.location_entries.iter().all(Option::is_some)
    }

    pub fn shortcuts_item(&self) -> Option<&N> {
        self.shortcuts_item.as_ref()
    }

    fn menu_item(&self, op: OrthodoxOp) -> Option<&N> {
        match op {
            OrthodoxOp::Copy => self.menu.copy.as_ref(),
            OrthodoxOp::Move => self.menu.move_to.as_ref(),
            OrthodoxOp::Mkdir => self.menu.mkdir.as_ref(),
            OrthodoxOp::Delete => self.menu.trash.as_ref(),
            _ => None,
        }
    }

    /// Locate widgets, fix up the host accelerators and register handlers.
    /// The steps run in order; each may use what the previous one found.
    fn initialize(
        &mut self,
        names: &LandmarkNames,
        host_actions: &HostActions,
        keys: &OrthodoxBindings,
        table: &mut Accelerators,
    ) {
        let id = self.id();

        let landmarks = WindowLandmarks::discover(&self.window, names);
        self.main_paned = landmarks.main_paned.clone();
        if self.main_paned.is_none() {
            log::warn!("window {}: main split container not found", id);
        }

        match &landmarks.menubar {
            Some(menubar) => {
                self.menu = MenuTargets::discover(menubar, names);
                // Always toggled once; the host treats an already shown
                // extra pane as a no-op.
                if let Some(item) = &self.menu.extra_pane {
                    item.activate();
                }
            }
            None => log::warn!("window {}: menu bar not found", id),
        }

        if self.main_paned.is_some() {
            for pane in 0..2 {
                self.location_entries[pane] = landmarks.location_entry(pane, names);
            }
        }
        if !self.has_locations() {
            log::warn!(
                "window {}: location entries not found; terminal and vcs shortcuts disabled",
                id
            );
        }

        table.unbind(&ActionPath::new(host_actions.extra_pane.as_str()));
        table.unbind(&ActionPath::new(host_actions.next_pane.as_str()));
        if let Some(view) = keys.view {
            table.rebind(&ActionPath::new(host_actions.open.as_str()), Binding::Key(view));
        }

        for op in OrthodoxOp::ALL {
            let available = match op {
                OrthodoxOp::Edit => true,
                OrthodoxOp::Terminal | OrthodoxOp::VcsClient => self.has_locations(),
                _ => self.menu_item(op).is_some(),
            };
            if !available {
                continue;
            }
            let Some(key) = keys.key(op) else {
                continue;
            };
            if let Err(e) = table.register_handler(id, key, op) {
                log::error!("window {}: {} shortcut not installed: {}", id, op, e);
            }
        }

        if let Some(edit) = &self.menu.edit_menu {
            self.shortcuts_item = edit.append_menu_item(SHORTCUTS_ITEM_NAME, SHORTCUTS_ITEM_LABEL);
        } else {
            log::warn!("window {}: Edit menu not found", id);
        }

        self.state = RemapState::Ready;
        log::debug!("window {}: ready, {} handlers", id, table.handler_count(id));
    }

    /// URIs selected in the focused directory listing. Anything else focused
    /// gives an empty selection.
    pub fn selection(&self, names: &LandmarkNames) -> Vec<String> {
        let Some(focus) = self.window.focus() else {
            return Vec::new();
        };
        if !focus.kind().is_directory_listing() {
            return Vec::new();
        }
        let in_directory_view = focus
            .parent()
            .map(|p| names.directory_views.iter().any(|v| *v == p.name()))
            .unwrap_or(false);
        if !in_directory_view {
            return Vec::new();
        }
        focus.selected_uris()
    }

    /// Directory shown in the pane holding keyboard focus.
    pub fn focused_location(&self) -> Result<String> {
        let paned = self
            .main_paned
            .as_ref()
            .ok_or(OrthokeysError::WidgetMissing("main split container"))?;
        let panes = paned.children();

        let mut node = self.window.focus();
        while let Some(w) = node {
            if let Some(index) = panes.iter().take(2).position(|p| p.id() == w.id()) {
                let entry = self
                    .location_entry(index)
                    .ok_or(OrthokeysError::WidgetMissing("location entry"))?;
                return entry
                    .text()
                    .ok_or(OrthokeysError::WidgetMissing("location entry text"));
            }
            node = w.parent();
        }
        Err(OrthokeysError::FocusOutsidePanes)
    }

    fn run(
        &self,
        op: OrthodoxOp,
        tools: &ToolSettings,
        names: &LandmarkNames,
        collab: Collaborators<'_>,
    ) -> Result<()> {
        match op {
            OrthodoxOp::Copy | OrthodoxOp::Move | OrthodoxOp::Mkdir | OrthodoxOp::Delete => {
                let item = self
                    .menu_item(op)
                    .ok_or(OrthokeysError::WidgetMissing("menu item"))?;
                if let Some((title, message)) = op.confirmation() {
                    if !collab.prompter.confirm(self.id(), title, message) {
                        return Ok(());
                    }
                }
                item.activate();
                Ok(())
            }
            OrthodoxOp::Edit => {
                let selection = self.selection(names);
                log::debug!("edit: {:?}", selection);
                let files = selection.iter().map(|uri| match compare::local_path(uri) {
                    Some(path) => path.to_string_lossy().into_owned(),
                    None => uri.clone(),
                });
                let request = LaunchRequest::from_command(&tools.editor, "editor")?.args(files);
                collab.launcher.launch(&request)
            }
            OrthodoxOp::Terminal => {
                let location = self.focused_location()?;
                log::debug!("terminal: location={}", location);
                let command = collab
                    .desktop
                    .terminal_command()
                    .unwrap_or_else(|| tools.terminal.clone());
                let request =
                    LaunchRequest::from_command(&command, "terminal")?.current_dir(&location);
                collab.launcher.launch(&request)
            }
            OrthodoxOp::VcsClient => {
                let location = self.focused_location()?;
                log::debug!("vcs client: location={}", location);
                let request = LaunchRequest::from_command(&tools.vcs_client, "vcs_client")?
                    .current_dir(&location);
                collab.launcher.launch(&request)
            }
        }
    }
}

/// Registry of window states, keyed by window identity.
pub struct ShortcutRemapper<N> {
    landmarks: LandmarkNames,
    host_actions: HostActions,
    tools: ToolSettings,
    keys: OrthodoxBindings,
    windows: HashMap<WidgetId, WindowState<N>>,
}

impl<N: HostWidget> ShortcutRemapper<N> {
    pub fn new(settings: &Settings) -> Self {
        Self {
            landmarks: settings.landmarks.clone(),
            host_actions: settings.host_actions.clone(),
            tools: settings.tools.clone(),
            keys: OrthodoxBindings::from_settings(&settings.orthodox),
            windows: HashMap::new(),
        }
    }

    /// Set up `window` unless it already has a state.
    pub fn attach(&mut self, window: &N, table: &mut Accelerators) -> &WindowState<N> {
        let id = window.id();
        if !self.windows.contains_key(&id) {
            let mut state = WindowState::new(window);
            state.initialize(&self.landmarks, &self.host_actions, &self.keys, table);
            self.windows.insert(id, state);
        }
        &self.windows[&id]
    }

    /// Forget a destroyed window. Its widget handles are never used again.
    pub fn detach(&mut self, id: WidgetId, table: &mut Accelerators) -> Option<WindowState<N>> {
        let mut state = self.windows.remove(&id)?;
        let removed = table.remove_handlers(id);
        state.state = RemapState::Destroyed;
        log::debug!("window {}: destroyed, {} handlers removed", id, removed);
        Some(state)
    }

    pub fn window(&self, id: WidgetId) -> Option<&WindowState<N>> {
        self.windows.get(&id)
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Resolve a key event in window `id` and run the orthodox handler if
    /// one matches. Handler failures are logged; the event still counts as
    /// handled so the host does not also act on it.
    pub fn handle_key(
        &self,
        id: WidgetId,
        key: &KeyBind,
        table: &Accelerators,
        collab: Collaborators<'_>,
    ) -> KeyOutcome {
        match table.dispatch(id, key) {
            Some(Dispatch::Handler(op)) => {
                match self.windows.get(&id) {
                    Some(state) => {
                        guarded(op, id, || state.run(op, &self.tools, &self.landmarks, collab))
                    }
                    None => log::error!("{} for unknown window {}", op, id),
                }
                KeyOutcome::Handled
            }
            Some(Dispatch::Action(path)) => KeyOutcome::Action(path),
            None => KeyOutcome::Ignored,
        }
    }

    /// Run `op` for window `id` directly, as its key handler would.
    pub fn trigger(&self, id: WidgetId, op: OrthodoxOp, collab: Collaborators<'_>) {
        if let Some(state) = self.windows.get(&id) {
            guarded(op, id, || state.run(op, &self.tools, &self.landmarks, collab));
        }
    }

    pub fn is_shortcuts_item(&self, id: WidgetId, item: &N) -> bool {
        self.windows
            .get(&id)
            .and_then(WindowState::shortcuts_item)
            .map(|s| s.id() == item.id())
            .unwrap_or(false)
    }
}

/// Handler boundary: failures are logged, never propagated to the host.
fn guarded<F: FnOnce() -> Result<()>>(op: OrthodoxOp, window: WidgetId, body: F) {
    if let Err(e) = body() {
        log::error!("window {}: {} failed: {}", window, op, e);
    }
}
