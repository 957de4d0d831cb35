//! Host-facing service object
//!
//! A host adapter owns one [`Extension`] for the whole process and forwards
//! its events here: new windows, destroyed windows, key presses, menu
//! activations and file context-menu queries.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crossterm::event::{KeyCode, KeyModifiers};

use crate::config::Settings;
use crate::error::Result;
use crate::keybindings::KeyBind;
use crate::remap::compare::{self, ContextMenuEntry};
use crate::remap::{
    Accelerators, Collaborators, KeyOutcome, Prompter, ShortcutRemapper, WindowState,
};
use crate::services::{DesktopConfig, GsettingsDesktop, Launcher, ProcessLauncher};
use crate::ui::shortcut_editor::{ShortcutEditorView, ShortcutsDialog};
use crate::widget::{HostWidget, WidgetId};

/// Accelerator table from `path` layered over the host defaults. A missing
/// or unreadable file leaves the defaults in place.
pub fn load_accelerators(settings: &Settings, path: Option<&Path>) -> Accelerators {
    let Some(path) = path else {
        return Accelerators::from_key_strings(&settings.host_defaults);
    };
    match Accelerators::load(path, &settings.host_defaults) {
        Ok(table) => table,
        Err(e) => {
            log::warn!("{}: {}; using host defaults", path.display(), e);
            Accelerators::from_key_strings(&settings.host_defaults)
        }
    }
}

pub struct Extension<N: HostWidget> {
    settings: Settings,
    accels: Accelerators,
    accels_path: Option<PathBuf>,
    remapper: ShortcutRemapper<N>,
    dialog: ShortcutsDialog,
    // window whose menu last brought the editor up
    dialog_owner: Option<WidgetId>,
    prompter: Rc<dyn Prompter>,
    launcher: Rc<dyn Launcher>,
    desktop: Rc<dyn DesktopConfig>,
}

impl<N: HostWidget> Extension<N> {
    /// Real process launcher and GNOME desktop lookup.
    pub fn new(settings: Settings, accels: Accelerators, prompter: Rc<dyn Prompter>) -> Self {
        Self::with_collaborators(
            settings,
            accels,
            prompter,
            Rc::new(ProcessLauncher),
            Rc::new(GsettingsDesktop),
        )
    }

    pub fn with_collaborators(
        settings: Settings,
        accels: Accelerators,
        prompter: Rc<dyn Prompter>,
        launcher: Rc<dyn Launcher>,
        desktop: Rc<dyn DesktopConfig>,
    ) -> Self {
        Self {
            remapper: ShortcutRemapper::new(&settings),
            settings,
            accels,
            accels_path: None,
            dialog: ShortcutsDialog::default(),
            dialog_owner: None,
            prompter,
            launcher,
            desktop,
        }
    }

    /// Save the accelerator table to `path` whenever the editor closes.
    pub fn persist_to(mut self, path: impl Into<PathBuf>) -> Self {
        self.accels_path = Some(path.into());
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn accelerators(&self) -> &Accelerators {
        &self.accels
    }

    pub fn accelerators_mut(&mut self) -> &mut Accelerators {
        &mut self.accels
    }

    fn collab(&self) -> Collaborators<'_> {
        Collaborators {
            prompter: self.prompter.as_ref(),
            launcher: self.launcher.as_ref(),
            desktop: self.desktop.as_ref(),
        }
    }

    /// A window started showing `uri`. Sets the window up the first time it
    /// is seen; returns false when the location is ignored.
    pub fn location_widget_requested(&mut self, uri: &str, window: &N) -> bool {
        if self.settings.is_ignored_uri(uri) {
            log::debug!("ignoring window {} at {}", window.id(), uri);
            return false;
        }
        self.remapper.attach(window, &mut self.accels);
        true
    }

    /// Tears the window down. An editor opened from its menu closes with it.
    pub fn window_destroyed(&mut self, id: WidgetId) {
        if self.remapper.detach(id, &mut self.accels).is_none() {
            log::debug!("window {} was never set up", id);
        }
        if self.dialog_owner == Some(id) {
            log::debug!("window {} closed its shortcuts editor", id);
            self.close_shortcuts_dialog();
        }
    }

    pub fn window_state(&self, id: WidgetId) -> Option<&WindowState<N>> {
        self.remapper.window(id)
    }

    pub fn window_count(&self) -> usize {
        self.remapper.len()
    }

    pub fn key_pressed(&self, id: WidgetId, key: &KeyBind) -> KeyOutcome {
        self.remapper.handle_key(id, key, &self.accels, self.collab())
    }

    /// Returns true when the item was ours and has been handled.
    pub fn menu_item_activated(&mut self, id: WidgetId, item: &N) -> bool {
        if self.remapper.is_shortcuts_item(id, item) {
            self.shortcuts_dialog();
            self.dialog_owner = Some(id);
            true
        } else {
            false
        }
    }

    pub fn file_items(&self, uris: &[String]) -> Option<ContextMenuEntry> {
        compare::compare_entry(uris)
    }

    /// Run the diff tool on the two selected files. Any other selection is
    /// left alone, the same as when no entry was offered.
    pub fn compare(&self, uris: &[String]) {
        if compare::compare_entry(uris).is_none() {
            log::debug!("compare needs exactly two local files, got {}", uris.len());
            return;
        }
        let result = compare::compare_request(&self.settings.tools.diff, uris)
            .and_then(|request| self.launcher.launch(&request));
        if let Err(e) = result {
            log::error!("compare failed: {}", e);
        }
    }

    /// Open the editor, or bring the open one back.
    pub fn shortcuts_dialog(&mut self) -> Rc<RefCell<ShortcutEditorView>> {
        self.dialog.present()
    }

    pub fn dialog(&self) -> &ShortcutsDialog {
        &self.dialog
    }

    /// Close the editor, saving the table if persistence is configured.
    pub fn close_shortcuts_dialog(&mut self) -> bool {
        self.dialog_owner = None;
        if !self.dialog.close() {
            return false;
        }
        if let Err(e) = self.save_accelerators() {
            log::error!("saving shortcuts failed: {}", e);
        }
        true
    }

    /// Feed a key to the open editor. Returns true if the editor closed.
    pub fn editor_input(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        let Some(view) = self.dialog.current() else {
            return false;
        };
        let close = view.borrow_mut().handle_input(&mut self.accels, code, modifiers);
        if close {
            self.close_shortcuts_dialog();
        }
        close
    }

    pub fn save_accelerators(&self) -> Result<()> {
        match &self.accels_path {
            Some(path) => self.accels.save(path),
            None => Ok(()),
        }
    }
}
