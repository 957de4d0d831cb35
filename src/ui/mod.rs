pub mod shortcut_editor;
