//! Keyboard shortcuts editor
//!
//! A live view over the accelerator table: one row per action path with its
//! current key. Changing a row rebinds it in the table right away; there is
//! no separate save step inside the view.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Cell, Clear, Paragraph, Row, Scrollbar, ScrollbarOrientation,
        ScrollbarState, Table,
    },
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::keybindings::{AcceleratorTable, ActionPath, Binding, KeyBind};

const TITLE: &str = " Keyboard Shortcuts ";
const BORDER: Color = Color::Cyan;
const HEADER: Color = Color::Yellow;
const SELECTED_BG: Color = Color::Blue;
const CAPTURE_BG: Color = Color::Red;
const DISABLED: Color = Color::DarkGray;
const HINT: Color = Color::Gray;
const CAPTURE_PROMPT: &str = "New shortcut…";

#[derive(Debug, Default)]
pub struct ShortcutEditorView {
    pub selected: usize,
    pub scroll_offset: usize,
    pub visible_height: usize,
    capturing: bool,
}

impl ShortcutEditorView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_capturing(&self) -> bool {
        self.capturing
    }

    /// Action path of the highlighted row.
    pub fn selected_path<H: Copy + fmt::Debug>(
        &self,
        table: &AcceleratorTable<H>,
    ) -> Option<ActionPath> {
        table.enumerate().nth(self.selected).map(|(p, _)| p.clone())
    }

    fn clamp(&mut self, rows: usize) {
        if rows == 0 {
            self.selected = 0;
            self.scroll_offset = 0;
            return;
        }
        self.selected = self.selected.min(rows - 1);
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        }
        let height = self.visible_height.max(1);
        if self.selected >= self.scroll_offset + height {
            self.scroll_offset = self.selected + 1 - height;
        }
    }

    /// Handle keyboard input.
    /// Returns true if the editor should be closed
    pub fn handle_input<H: Copy + fmt::Debug>(
        &mut self,
        table: &mut AcceleratorTable<H>,
        code: KeyCode,
        modifiers: KeyModifiers,
    ) -> bool {
        if self.capturing {
            self.capture(table, code, modifiers);
            return false;
        }

        let rows = table.len();
        let page = self.visible_height.saturating_sub(1).max(1);
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected += 1;
            }
            KeyCode::PageUp => {
                self.selected = self.selected.saturating_sub(page);
            }
            KeyCode::PageDown => {
                self.selected += page;
            }
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = rows.saturating_sub(1),
            KeyCode::Enter => {
                if rows > 0 {
                    self.capturing = true;
                }
            }
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => return true,
            _ => {}
        }
        self.clamp(rows);
        false
    }

    fn capture<H: Copy + fmt::Debug>(
        &mut self,
        table: &mut AcceleratorTable<H>,
        code: KeyCode,
        modifiers: KeyModifiers,
    ) {
        let binding = match code {
            KeyCode::Esc => {
                self.capturing = false;
                return;
            }
            KeyCode::Backspace if modifiers.is_empty() => Binding::Unbound,
            // Lone modifier presses (keyboard enhancement mode) are not combos.
            KeyCode::Modifier(_) => return,
            _ => {
                let key = KeyBind::new(code, modifiers);
                // keys without a saved name (media, null) could not be reloaded
                if key.to_key_string().is_none() {
                    log::debug!("shortcut editor: {:?} cannot be bound", code);
                    return;
                }
                Binding::Key(key)
            }
        };
        self.capturing = false;
        let Some(path) = self.selected_path(table) else {
            return;
        };
        log::debug!("shortcut editor: {} -> {}", path, binding.label());
        table.rebind(&path, binding);
    }
}

/// Draw the editor as a centered dialog
pub fn draw<H: Copy + fmt::Debug>(
    frame: &mut Frame,
    view: &mut ShortcutEditorView,
    table: &AcceleratorTable<H>,
    area: Rect,
) {
    let width = ((area.width as u32 * 80 / 100) as u16).clamp(40.min(area.width), 100);
    let height = ((area.height as u32 * 80 / 100) as u16).clamp(10.min(area.height), 40);
    if width < 30 || height < 8 {
        return;
    }

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    let dialog_area = Rect::new(x, y, width, height);
    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .title(TITLE)
        .title_style(Style::default().fg(BORDER).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BORDER));
    let inner = block.inner(dialog_area);
    frame.render_widget(block, dialog_area);

    // header row + table + one hint line
    let list_height = inner.height.saturating_sub(2) as usize;
    let total = table.len();
    view.visible_height = list_height;
    view.clamp(total);

    let entries: Vec<(&ActionPath, String)> = table.enumerate().collect();
    let key_width = entries
        .iter()
        .map(|(_, label)| label.width())
        .max()
        .unwrap_or(0)
        .max("Shortcut".len())
        .max(CAPTURE_PROMPT.width()) as u16;

    let rows: Vec<Row> = entries
        .iter()
        .enumerate()
        .skip(view.scroll_offset)
        .take(list_height)
        .map(|(i, (path, label))| {
            let key_style = if table.lookup(path).is_bound() {
                Style::default()
            } else {
                Style::default().fg(DISABLED)
            };
            let key_text = if i == view.selected && view.capturing {
                CAPTURE_PROMPT.to_string()
            } else {
                label.clone()
            };
            let row = Row::new(vec![
                Cell::from(path.as_str().to_string()),
                Cell::from(Span::styled(key_text, key_style)),
            ]);
            if i == view.selected {
                let bg = if view.capturing { CAPTURE_BG } else { SELECTED_BG };
                row.style(Style::default().bg(bg).add_modifier(Modifier::BOLD))
            } else {
                row
            }
        })
        .collect();

    let header = Row::new(vec!["Action", "Shortcut"])
        .style(Style::default().fg(HEADER).add_modifier(Modifier::BOLD));
    let table_area = Rect::new(inner.x, inner.y, inner.width, inner.height.saturating_sub(1));
    let widget = Table::new(rows, [Constraint::Min(10), Constraint::Length(key_width + 1)])
        .header(header)
        .column_spacing(2);
    frame.render_widget(widget, table_area);

    let hint = if view.capturing {
        "Press the new shortcut. Backspace: disable  Esc: cancel"
    } else {
        "Enter: change  Esc/q: close"
    };
    let hint_area = Rect::new(inner.x, inner.y + inner.height.saturating_sub(1), inner.width, 1);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(format!(" {}", hint), Style::default().fg(HINT)))),
        hint_area,
    );

    if total > list_height {
        let scrollbar_area = Rect::new(
            dialog_area.x + dialog_area.width - 1,
            dialog_area.y + 2,
            1,
            list_height as u16,
        );
        let scrollbar = Scrollbar::default()
            .orientation(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("^"))
            .end_symbol(Some("v"));
        let mut scrollbar_state =
            ScrollbarState::new(total.saturating_sub(list_height) + 1).position(view.scroll_offset);
        frame.render_stateful_widget(scrollbar, scrollbar_area, &mut scrollbar_state);
    }
}

/// Slot holding the one open editor.
///
/// Presenting while open hands back the same view. Closing drops it, so the
/// next presentation starts from a fresh view.
#[derive(Debug, Default)]
pub struct ShortcutsDialog {
    slot: Option<Rc<RefCell<ShortcutEditorView>>>,
    presented: usize,
}

impl ShortcutsDialog {
    pub fn present(&mut self) -> Rc<RefCell<ShortcutEditorView>> {
        self.presented += 1;
        self.slot
            .get_or_insert_with(|| Rc::new(RefCell::new(ShortcutEditorView::new())))
            .clone()
    }

    pub fn current(&self) -> Option<Rc<RefCell<ShortcutEditorView>>> {
        self.slot.clone()
    }

    pub fn is_open(&self) -> bool {
        self.slot.is_some()
    }

    /// Returns false if nothing was open.
    pub fn close(&mut self) -> bool {
        self.slot.take().is_some()
    }

    /// How many times the dialog was brought to the front.
    pub fn presented(&self) -> usize {
        self.presented
    }
}
