use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::path::Path;
use crossterm::event::{KeyCode, KeyModifiers};
use serde::{Deserialize, Serialize};

use crate::error::{OrthokeysError, Result};
use crate::widget::WidgetId;

// ─── Keys ──────────────────────────────────────────────────────────────

/// A key combination (key code + modifiers).
///
/// Alphabetic characters are stored lower-case; only Ctrl, Shift and Alt
/// are kept from the modifier mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

const MODIFIER_MASK: KeyModifiers = KeyModifiers::CONTROL
    .union(KeyModifiers::SHIFT)
    .union(KeyModifiers::ALT);

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        let code = match code {
            KeyCode::Char(ch) if ch.is_ascii_alphabetic() => KeyCode::Char(ch.to_ascii_lowercase()),
            other => other,
        };
        Self { code, modifiers: modifiers & MODIFIER_MASK }
    }

    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    /// Parse a key string like `"ctrl+shift+c"`, `"f3"`, `"q"`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        if s.is_empty() {
            return None;
        }
        // "+" and "ctrl++" bind the plus key
        let (mods_part, key_part) = if s == "+" {
            ("", "+")
        } else {
            match s.strip_suffix("++") {
                Some(rest) => (rest, "+"),
                None => match s.rsplit_once('+') {
                    Some((mods, key)) => (mods, key),
                    None => ("", s.as_str()),
                },
            }
        };

        let mut modifiers = KeyModifiers::NONE;
        for part in mods_part.split('+').filter(|p| !p.is_empty()) {
            match part {
                "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                "alt" => modifiers |= KeyModifiers::ALT,
                _ => return None,
            }
        }

        code_from_name(key_part).map(|code| Self::new(code, modifiers))
    }

    /// Canonical key string (`"ctrl+o"`), the inverse of [`KeyBind::parse`].
    pub fn to_key_string(&self) -> Option<String> {
        let mut out = String::new();
        for (flag, name) in modifier_names() {
            if self.modifiers.contains(flag) {
                out.push_str(name);
                out.push('+');
            }
        }
        out.push_str(&code_name(self.code)?);
        Some(out)
    }

    /// User-facing label: `"Ctrl+Shift+N"`, `"F3"`, `"PgUp"`.
    pub fn label(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl".into());
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            parts.push("Shift".into());
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            parts.push("Alt".into());
        }
        parts.push(code_label(self.code));
        parts.join("+")
    }
}

impl fmt::Display for KeyBind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

fn modifier_names() -> [(KeyModifiers, &'static str); 3] {
    [
        (KeyModifiers::CONTROL, "ctrl"),
        (KeyModifiers::SHIFT, "shift"),
        (KeyModifiers::ALT, "alt"),
    ]
}

fn code_from_name(name: &str) -> Option<KeyCode> {
    let code = match name {
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "space" => KeyCode::Char(' '),
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "insert" | "ins" => KeyCode::Insert,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "backtab" => KeyCode::BackTab,
        "capslock" => KeyCode::CapsLock,
        "scrolllock" => KeyCode::ScrollLock,
        "numlock" => KeyCode::NumLock,
        "printscreen" => KeyCode::PrintScreen,
        "pause" => KeyCode::Pause,
        "menu" => KeyCode::Menu,
        "keypadbegin" => KeyCode::KeypadBegin,
        s if s.len() > 1 && s.starts_with('f') => {
            let n: u8 = s[1..].parse().ok()?;
            if !(1..=24).contains(&n) {
                return None;
            }
            KeyCode::F(n)
        }
        s => {
            let mut chars = s.chars();
            let ch = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            KeyCode::Char(ch)
        }
    };
    Some(code)
}

fn code_name(code: KeyCode) -> Option<String> {
    let name = match code {
        KeyCode::Up => "up".into(),
        KeyCode::Down => "down".into(),
        KeyCode::Left => "left".into(),
        KeyCode::Right => "right".into(),
        KeyCode::Enter => "enter".into(),
        KeyCode::Esc => "esc".into(),
        KeyCode::Tab => "tab".into(),
        KeyCode::Char(' ') => "space".into(),
        KeyCode::Backspace => "backspace".into(),
        KeyCode::Delete => "delete".into(),
        KeyCode::Insert => "insert".into(),
        KeyCode::Home => "home".into(),
        KeyCode::End => "end".into(),
        KeyCode::PageUp => "pageup".into(),
        KeyCode::PageDown => "pagedown".into(),
        KeyCode::BackTab => "backtab".into(),
        KeyCode::CapsLock => "capslock".into(),
        KeyCode::ScrollLock => "scrolllock".into(),
        KeyCode::NumLock => "numlock".into(),
        KeyCode::PrintScreen => "printscreen".into(),
        KeyCode::Pause => "pause".into(),
        KeyCode::Menu => "menu".into(),
        KeyCode::KeypadBegin => "keypadbegin".into(),
        KeyCode::F(n) => format!("f{}", n),
        KeyCode::Char(ch) => ch.to_string(),
        _ => return None,
    };
    Some(name)
}

fn code_label(code: KeyCode) -> String {
    match code {
        KeyCode::Up => "Up".into(),
        KeyCode::Down => "Down".into(),
        KeyCode::Left => "Left".into(),
        KeyCode::Right => "Right".into(),
        KeyCode::Enter => "Enter".into(),
        KeyCode::Esc => "Esc".into(),
        KeyCode::Tab => "Tab".into(),
        KeyCode::Char(' ') => "Space".into(),
        KeyCode::Backspace => "BkSp".into(),
        KeyCode::Delete => "Del".into(),
        KeyCode::Insert => "Ins".into(),
        KeyCode::Home => "Home".into(),
        KeyCode::End => "End".into(),
        KeyCode::PageUp => "PgUp".into(),
        KeyCode::PageDown => "PgDn".into(),
        KeyCode::BackTab => "BackTab".into(),
        KeyCode::F(n) => format!("F{}", n),
        KeyCode::Char(ch) => ch.to_uppercase().to_string(),
        other => format!("{:?}", other),
    }
}

// ─── Bindings and action paths ─────────────────────────────────────────

/// Key assigned to an action path, or nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Binding {
    #[default]
    Unbound,
    Key(KeyBind),
}

impl Binding {
    /// Empty string parses as `Unbound`.
    pub fn parse(s: &str) -> Result<Self> {
        if s.trim().is_empty() {
            return Ok(Binding::Unbound);
        }
        KeyBind::parse(s)
            .map(Binding::Key)
            .ok_or_else(|| OrthokeysError::InvalidKey(s.to_string()))
    }

    pub fn key(&self) -> Option<KeyBind> {
        match self {
            Binding::Unbound => None,
            Binding::Key(k) => Some(*k),
        }
    }

    pub fn is_bound(&self) -> bool {
        matches!(self, Binding::Key(_))
    }

    pub fn label(&self) -> String {
        match self {
            Binding::Unbound => "Disabled".to_string(),
            Binding::Key(k) => k.label(),
        }
    }

    pub fn to_key_string(&self) -> String {
        self.key().and_then(|k| k.to_key_string()).unwrap_or_default()
    }
}

impl From<KeyBind> for Binding {
    fn from(key: KeyBind) -> Self {
        Binding::Key(key)
    }
}

/// Identifier of one rebindable host operation,
/// e.g. `<Actions>/DirViewActions/Open`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionPath(String);

impl ActionPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ActionPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for ActionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ─── Accelerator table ─────────────────────────────────────────────────

/// Result of resolving a key event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch<H> {
    /// A handler registered for the window.
    Handler(H),
    /// A host action bound to the key.
    Action(ActionPath),
}

/// Process-wide accelerator registry.
///
/// Holds two things: the action path → binding map shared by all windows,
/// and per-window key handlers of payload `H`. A non-unbound binding is held
/// by at most one action path; [`AcceleratorTable::rebind`] enforces it.
pub struct AcceleratorTable<H> {
    entries: BTreeMap<ActionPath, Binding>,
    handlers: HashMap<(WidgetId, KeyBind), H>,
}

impl<H> Default for AcceleratorTable<H> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            handlers: HashMap::new(),
        }
    }
}

impl<H: Copy + fmt::Debug> AcceleratorTable<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `path → key string` pairs. Bad key strings are
    /// logged and stored as unbound.
    pub fn from_key_strings(map: &BTreeMap<String, String>) -> Self {
        let mut table = Self::new();
        table.merge_key_strings(map);
        table
    }

    /// Apply `path → key string` pairs on top of the current contents.
    pub fn merge_key_strings(&mut self, map: &BTreeMap<String, String>) {
        for (path, key) in map {
            let binding = Binding::parse(key).unwrap_or_else(|e| {
                log::warn!("{} for {}; leaving it unbound", e, path);
                Binding::Unbound
            });
            self.rebind(&ActionPath::new(path.as_str()), binding);
        }
    }

    pub fn to_key_strings(&self) -> BTreeMap<String, String> {
        self.entries
            .iter()
            .map(|(path, binding)| (path.to_string(), binding.to_key_string()))
            .collect()
    }

    /// Binding of `path`; `Unbound` if the path was never set.
    pub fn lookup(&self, path: &ActionPath) -> Binding {
        self.entries.get(path).copied().unwrap_or_default()
    }

    pub fn contains(&self, path: &ActionPath) -> bool {
        self.entries.contains_key(path)
    }

    /// Action path currently holding `key`.
    pub fn holder_of(&self, key: &KeyBind) -> Option<&ActionPath> {
        self.entries
            .iter()
            .find(|(_, b)| b.key().as_ref() == Some(key))
            .map(|(path, _)| path)
    }

    /// Set the binding of `path`. Any other path holding the same key is
    /// unbound first; the displaced paths are returned.
    pub fn rebind(&mut self, path: &ActionPath, binding: Binding) -> Vec<ActionPath> {
        let mut displaced = Vec::new();
        if let Binding::Key(key) = binding {
            for (other, held) in self.entries.iter_mut() {
                if other != path && *held == binding {
                    *held = Binding::Unbound;
                    displaced.push(other.clone());
                }
            }
            for other in &displaced {
                log::warn!("{} moved from {} to {}", key, other, path);
            }
        }
        log::debug!("accel {} = {}", path, binding.label());
        self.entries.insert(path.clone(), binding);
        displaced
    }

    pub fn unbind(&mut self, path: &ActionPath) {
        self.rebind(path, Binding::Unbound);
    }

    /// `(path, binding label)` pairs in action path order.
    pub fn enumerate(&self) -> impl Iterator<Item = (&ActionPath, String)> + '_ {
        self.entries.iter().map(|(path, binding)| (path, binding.label()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Install a key handler for window `scope`. A second handler for the
    /// same key in the same window is refused.
    pub fn register_handler(&mut self, scope: WidgetId, key: KeyBind, handler: H) -> Result<()> {
        if self.handlers.contains_key(&(scope, key)) {
            return Err(OrthokeysError::DuplicateHandler { key: key.label() });
        }
        if let Some(path) = self.holder_of(&key) {
            log::warn!("handler {:?} on {} shadows {}", handler, key, path);
        }
        self.handlers.insert((scope, key), handler);
        Ok(())
    }

    /// Drop every handler of window `scope`; returns how many were removed.
    pub fn remove_handlers(&mut self, scope: WidgetId) -> usize {
        let before = self.handlers.len();
        self.handlers.retain(|(s, _), _| *s != scope);
        before - self.handlers.len()
    }

    pub fn handler(&self, scope: WidgetId, key: &KeyBind) -> Option<H> {
        self.handlers.get(&(scope, *key)).copied()
    }

    pub fn handler_count(&self, scope: WidgetId) -> usize {
        self.handlers.keys().filter(|(s, _)| *s == scope).count()
    }

    /// Resolve a key event in window `scope`: window handlers first, then
    /// the action path holding the key.
    pub fn dispatch(&self, scope: WidgetId, key: &KeyBind) -> Option<Dispatch<H>> {
        let resolve = |k: &KeyBind| {
            if let Some(h) = self.handler(scope, k) {
                return Some(Dispatch::Handler(h));
            }
            self.holder_of(k).map(|p| Dispatch::Action(p.clone()))
        };
        if let Some(found) = resolve(key) {
            return Some(found);
        }
        // Terminals report shifted symbols (e.g. '*' = Shift+8) with SHIFT set.
        if let KeyCode::Char(_) = key.code {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                return resolve(&KeyBind::new(key.code, key.modifiers & !KeyModifiers::SHIFT));
            }
        }
        None
    }

    /// Read a table saved by [`AcceleratorTable::save`] on top of `defaults`.
    pub fn load(path: &Path, defaults: &BTreeMap<String, String>) -> Result<Self> {
        let mut table = Self::from_key_strings(defaults);
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let saved: BTreeMap<String, String> = serde_json::from_str(&content)?;
            table.merge_key_strings(&saved);
        }
        Ok(table)
    }

    /// Write the action path bindings as JSON using atomic write pattern.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }
        let content = serde_json::to_string_pretty(&self.to_key_strings())?;
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Table = AcceleratorTable<u8>;

    fn key(s: &str) -> KeyBind {
        KeyBind::parse(s).unwrap()
    }

    // -- KeyBind parsing / display --

    #[test]
    fn test_parse_function_and_modifiers() {
        assert_eq!(key("F3"), KeyBind::plain(KeyCode::F(3)));
        assert_eq!(
            key("ctrl+o"),
            KeyBind::new(KeyCode::Char('o'), KeyModifiers::CONTROL)
        );
        assert_eq!(
            key("Ctrl+Shift+N"),
            KeyBind::new(KeyCode::Char('n'), KeyModifiers::CONTROL | KeyModifiers::SHIFT)
        );
        assert_eq!(key("ctrl++"), KeyBind::new(KeyCode::Char('+'), KeyModifiers::CONTROL));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(KeyBind::parse("").is_none());
        assert!(KeyBind::parse("hyper+x").is_none());
        assert!(KeyBind::parse("f99").is_none());
        assert!(KeyBind::parse("ctrl+nothing").is_none());
    }

    #[test]
    fn test_uppercase_char_normalized() {
        let event = KeyBind::new(KeyCode::Char('G'), KeyModifiers::CONTROL);
        assert_eq!(event, key("ctrl+g"));
    }

    #[test]
    fn test_label_and_key_string() {
        let k = key("shift+ctrl+pageup");
        assert_eq!(k.label(), "Ctrl+Shift+PgUp");
        assert_eq!(k.to_key_string().as_deref(), Some("ctrl+shift+pageup"));
        assert_eq!(key("f8").label(), "F8");
        assert_eq!(key("space").label(), "Space");
    }

    #[test]
    fn test_binding_parse_empty_is_unbound() {
        assert_eq!(Binding::parse("").unwrap(), Binding::Unbound);
        assert_eq!(Binding::Unbound.label(), "Disabled");
        assert_eq!(Binding::Unbound.to_key_string(), "");
        assert!(matches!(Binding::parse("bogus+"), Err(OrthokeysError::InvalidKey(_))));
    }

    // -- AcceleratorTable --

    #[test]
    fn test_lookup_unknown_is_unbound() {
        let table = Table::new();
        assert_eq!(table.lookup(&"never/set".into()), Binding::Unbound);
    }

    #[test]
    fn test_rebind_overrides_previous_value() {
        let mut table = Table::new();
        let open = ActionPath::from("open");
        table.rebind(&open, key("ctrl+o").into());
        table.rebind(&open, key("f3").into());
        assert_eq!(table.lookup(&open), Binding::Key(key("f3")));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_rebind_displaces_holder() {
        let mut table = Table::new();
        let pane = ActionPath::from("pane");
        let open = ActionPath::from("open");
        table.rebind(&pane, key("f3").into());
        let displaced = table.rebind(&open, key("f3").into());
        assert_eq!(displaced, vec![pane.clone()]);
        assert_eq!(table.lookup(&pane), Binding::Unbound);
        assert_eq!(table.holder_of(&key("f3")), Some(&open));
    }

    #[test]
    fn test_rebind_same_path_same_key_no_displacement() {
        let mut table = Table::new();
        let open = ActionPath::from("open");
        table.rebind(&open, key("f3").into());
        assert!(table.rebind(&open, key("f3").into()).is_empty());
    }

    #[test]
    fn test_enumerate_sorted_by_path() {
        let mut table = Table::new();
        table.rebind(&"c".into(), key("f1").into());
        table.rebind(&"a".into(), Binding::Unbound);
        table.rebind(&"b".into(), key("ctrl+b").into());
        let rows: Vec<(String, String)> = table
            .enumerate()
            .map(|(p, l)| (p.to_string(), l))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("a".to_string(), "Disabled".to_string()),
                ("b".to_string(), "Ctrl+B".to_string()),
                ("c".to_string(), "F1".to_string()),
            ]
        );
    }

    #[test]
    fn test_duplicate_handler_rejected_per_scope() {
        let mut table = Table::new();
        let w1 = WidgetId(1);
        let w2 = WidgetId(2);
        table.register_handler(w1, key("f5"), 5).unwrap();
        assert!(matches!(
            table.register_handler(w1, key("f5"), 6),
            Err(OrthokeysError::DuplicateHandler { .. })
        ));
        table.register_handler(w2, key("f5"), 7).unwrap();
        assert_eq!(table.handler(w1, &key("f5")), Some(5));
        assert_eq!(table.handler(w2, &key("f5")), Some(7));
    }

    #[test]
    fn test_remove_handlers_only_for_scope() {
        let mut table = Table::new();
        table.register_handler(WidgetId(1), key("f5"), 1).unwrap();
        table.register_handler(WidgetId(1), key("f6"), 2).unwrap();
        table.register_handler(WidgetId(2), key("f5"), 3).unwrap();
        assert_eq!(table.remove_handlers(WidgetId(1)), 2);
        assert_eq!(table.handler_count(WidgetId(1)), 0);
        assert_eq!(table.handler_count(WidgetId(2)), 1);
    }

    #[test]
    fn test_dispatch_prefers_handler_then_action() {
        let mut table = Table::new();
        let w = WidgetId(9);
        table.rebind(&"open".into(), key("f3").into());
        table.register_handler(w, key("f4"), 4).unwrap();

        assert_eq!(table.dispatch(w, &key("f4")), Some(Dispatch::Handler(4)));
        assert_eq!(table.dispatch(w, &key("f3")), Some(Dispatch::Action("open".into())));
        assert_eq!(table.dispatch(w, &key("f12")), None);
        assert_eq!(table.dispatch(WidgetId(10), &key("f4")), None);
    }

    #[test]
    fn test_dispatch_shifted_symbol() {
        let mut table = Table::new();
        table.rebind(&"select-all".into(), key("*").into());
        let event = KeyBind::new(KeyCode::Char('*'), KeyModifiers::SHIFT);
        assert_eq!(
            table.dispatch(WidgetId(1), &event),
            Some(Dispatch::Action("select-all".into()))
        );
    }

    #[test]
    fn test_from_key_strings_bad_entry_unbound() {
        let mut map = BTreeMap::new();
        map.insert("good".to_string(), "f2".to_string());
        map.insert("bad".to_string(), "meta+q".to_string());
        let table = Table::from_key_strings(&map);
        assert_eq!(table.lookup(&"good".into()), Binding::Key(key("f2")));
        assert_eq!(table.lookup(&"bad".into()), Binding::Unbound);
        assert!(table.contains(&"bad".into()));
    }

    #[test]
    fn test_save_and_load_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("accels.json");

        let mut defaults = BTreeMap::new();
        defaults.insert("pane".to_string(), "f3".to_string());
        defaults.insert("open".to_string(), "ctrl+o".to_string());
        defaults.insert("reload".to_string(), "ctrl+r".to_string());

        let mut table = Table::from_key_strings(&defaults);
        table.rebind(&"open".into(), key("f3").into());
        table.save(&path).unwrap();

        let loaded = Table::load(&path, &defaults).unwrap();
        assert_eq!(loaded.lookup(&"open".into()), Binding::Key(key("f3")));
        assert_eq!(loaded.lookup(&"pane".into()), Binding::Unbound);
        assert_eq!(loaded.lookup(&"reload".into()), Binding::Key(key("ctrl+r")));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_plus_key_parses_alone_and_with_modifiers() {
        assert_eq!(key("+"), KeyBind::plain(KeyCode::Char('+')));
        assert_eq!(key("shift++"), KeyBind::new(KeyCode::Char('+'), KeyModifiers::SHIFT));
        assert_eq!(KeyBind::plain(KeyCode::Char('+')).to_key_string().as_deref(), Some("+"));
    }

    #[test]
    fn test_media_keys_have_no_key_string() {
        use crossterm::event::MediaKeyCode;
        assert!(KeyBind::plain(KeyCode::Media(MediaKeyCode::Play)).to_key_string().is_none());
        assert!(KeyBind::plain(KeyCode::Null).to_key_string().is_none());
    }

    #[test]
    fn test_uncommon_keys_survive_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("accels.json");
        let bound = [
            ("zoom", KeyBind::plain(KeyCode::Char('+'))),
            ("prev", KeyBind::new(KeyCode::BackTab, KeyModifiers::SHIFT)),
            ("shot", KeyBind::plain(KeyCode::PrintScreen)),
            ("ctx", KeyBind::new(KeyCode::Menu, KeyModifiers::CONTROL)),
            ("bigger", KeyBind::new(KeyCode::Char('+'), KeyModifiers::CONTROL)),
        ];

        let mut table = Table::new();
        for (name, k) in bound {
            table.rebind(&name.into(), k.into());
        }
        table.save(&path).unwrap();

        let loaded = Table::load(&path, &BTreeMap::new()).unwrap();
        for (name, k) in bound {
            assert_eq!(loaded.lookup(&name.into()), Binding::Key(k), "{}", name);
        }
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let mut defaults = BTreeMap::new();
        defaults.insert("open".to_string(), "ctrl+o".to_string());
        let table = Table::load(&dir.path().join("none.json"), &defaults).unwrap();
        assert_eq!(table.lookup(&"open".into()), Binding::Key(key("ctrl+o")));
    }
}
