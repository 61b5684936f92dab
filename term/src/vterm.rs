//! The virtual terminal: grid(s), cursor, margins, modes and SGR state
//! driven by [`vte_core::Actor`] callbacks from the parser.

use vte_core::{Actor, CsiParam};

use crate::cell::{cell_default, Attrs, Cell};
use crate::color::Color;
use crate::config::VTermConfig;
use crate::cursor::{Cursor, SavedCursor};
use crate::grid::{Grid, ScrollbackHistory};
use crate::margins::Margins;
use crate::mode::Modes;
use crate::tabs::TabStops;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Screen {
    Main,
    Alt,
}

type ReplySink = Box<dyn FnMut(&[u8]) + Send>;
type TitleCallback = Box<dyn FnMut(&str) + Send>;
type PasteCallback = Box<dyn FnMut(bool) + Send>;

/// The virtual terminal state machine.
///
/// A `VTerm` is exclusively owned by one driver context (typically whatever
/// reads bytes off a PTY) and every operation is meant to run synchronously
/// on that single context; it is `Send` only so it can be handed to, and
/// parked behind a lock on, a different thread than the one that created it
/// (e.g. a render pipeline's card), never so it can be mutated concurrently.
pub struct VTerm {
    width: usize,
    height: usize,
    main: Grid,
    alt: Grid,
    history: ScrollbackHistory,
    active: Screen,
    cursor: Cursor,
    saved_main: SavedCursor,
    saved_alt: SavedCursor,
    margins: Margins,
    modes: Modes,
    tabs: TabStops,
    sgr_fg: Color,
    sgr_bg: Color,
    sgr_attrs: Attrs,
    default_fg: Color,
    default_bg: Color,
    last_graphic_char: Option<char>,
    config: VTermConfig,
    reply_sink: Option<ReplySink>,
    title_callback: Option<TitleCallback>,
    paste_callback: Option<PasteCallback>,
}

impl VTerm {
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_config(width, height, VTermConfig::default())
    }

    pub fn with_config(width: usize, height: usize, config: VTermConfig) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        VTerm {
            width,
            height,
            main: Grid::new(width, height),
            alt: Grid::new(width, height),
            history: ScrollbackHistory::new(config.scrollback_capacity),
            active: Screen::Main,
            cursor: Cursor {
                visible: config.default_cursor_visible,
                ..Cursor::default()
            },
            saved_main: SavedCursor::home(),
            saved_alt: SavedCursor::home(),
            margins: Margins::full(width, height),
            modes: Modes::default(),
            tabs: TabStops::with_spacing(width, config.tab_width),
            sgr_fg: Color::Default,
            sgr_bg: Color::Default,
            sgr_attrs: Attrs::empty(),
            default_fg: Color::Default,
            default_bg: Color::Default,
            last_graphic_char: None,
            config,
            reply_sink: None,
            title_callback: None,
            paste_callback: None,
        }
    }

    pub fn set_reply_sink<F: FnMut(&[u8]) + Send + 'static>(&mut self, f: F) {
        self.reply_sink = Some(Box::new(f));
    }

    pub fn set_title_callback<F: FnMut(&str) + Send + 'static>(&mut self, f: F) {
        self.title_callback = Some(Box::new(f));
    }

    pub fn set_bracketed_paste_callback<F: FnMut(bool) + Send + 'static>(&mut self, f: F) {
        self.paste_callback = Some(Box::new(f));
    }

    fn reply(&mut self, bytes: &[u8]) {
        if let Some(sink) = self.reply_sink.as_mut() {
            sink(bytes);
        }
    }

    // -- screen & grid access -------------------------------------------

    fn active_grid(&self) -> &Grid {
        match self.active {
            Screen::Main => &self.main,
            Screen::Alt => &self.alt,
        }
    }

    fn active_grid_mut(&mut self) -> &mut Grid {
        match self.active {
            Screen::Main => &mut self.main,
            Screen::Alt => &mut self.alt,
        }
    }

    /// The currently visible grid, every line padded out to full width.
    pub fn grid(&self) -> Vec<Vec<Cell>> {
        self.active_grid().snapshot()
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.cursor.x, self.cursor.y)
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor.visible && self.modes.contains(Modes::CURSOR_VISIBLE)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Resizes both grids: preserves cells in bounds, clears new area,
    /// clamps the cursor, resets margins to full, and keeps the main
    /// screen's history. A non-positive dimension is refused silently.
    pub fn resize(&mut self, width: usize, height: usize) {
        if width == 0 || height == 0 {
            return;
        }
        self.main.resize(width, height);
        self.alt.resize(width, height);
        self.tabs.resize(width);
        self.margins.reset(width, height);
        self.width = width;
        self.height = height;
        self.cursor.x = self.cursor.x.min(width - 1);
        self.cursor.y = self.cursor.y.min(height - 1);
        self.cursor.wrap_next = false;
    }

    fn effective_columns(&self) -> (usize, usize) {
        self.margins
            .effective_columns(self.modes.contains(Modes::LEFT_RIGHT_MARGIN), self.width)
    }

    fn cursor_within_margins(&self) -> bool {
        let (left, right) = self.effective_columns();
        self.cursor_row_within_region() && self.cursor.x >= left && self.cursor.x <= right
    }

    /// Whether the cursor's row is inside the top/bottom scroll region,
    /// ignoring left/right margins entirely — vertical movement (CUU/CUD)
    /// clamps at the scroll region regardless of which column band the
    /// cursor sits in, even when DECLRMM is active.
    fn cursor_row_within_region(&self) -> bool {
        self.cursor.y >= self.margins.top && self.cursor.y <= self.margins.bottom
    }

    fn is_full_screen_scroll(&self) -> bool {
        self.active == Screen::Main
            && self.margins.top == 0
            && self.margins.bottom == self.height - 1
            && self
                .margins
                .is_full_width(self.modes.contains(Modes::LEFT_RIGHT_MARGIN), self.width)
    }

    // -- cursor movement --------------------------------------------------

    pub fn place_char(&mut self, r: char) {
        let (left, right) = self.effective_columns();
        if self.cursor.wrap_next {
            self.cursor.wrap_next = false;
            self.cursor.x = left;
            self.advance_line();
        }
        if self.modes.contains(Modes::INSERT) {
            self.insert_cells(self.cursor.y, self.cursor.x, right, 1);
        }
        let cell = Cell {
            rune: r,
            fg: self.sgr_fg,
            bg: self.sgr_bg,
            attrs: self.sgr_attrs,
        };
        self.active_grid_mut().set_cell(self.cursor.x, self.cursor.y, cell);
        self.last_graphic_char = Some(r);
        if self.cursor.x >= right {
            self.cursor.wrap_next = self.modes.contains(Modes::AUTOWRAP);
            self.cursor.x = right;
        } else {
            self.cursor.x += 1;
        }
    }

    pub fn carriage_return(&mut self) {
        let (left, right) = self.effective_columns();
        let inside_lr = self.modes.contains(Modes::LEFT_RIGHT_MARGIN)
            && self.cursor.x >= left
            && self.cursor.x <= right;
        let decom_lr = self.modes.contains(Modes::ORIGIN) && self.modes.contains(Modes::LEFT_RIGHT_MARGIN);
        self.cursor.x = if inside_lr || decom_lr { left } else { 0 };
        self.cursor.wrap_next = false;
    }

    /// IND: move down one row, scrolling the region when at the bottom
    /// margin. Shared by LF/VT/FF and the `ESC D` escape.
    fn advance_line(&mut self) {
        self.cursor.wrap_next = false;
        let (left, right) = self.effective_columns();
        let within_columns = self.cursor.x >= left && self.cursor.x <= right;
        if self.cursor.y == self.margins.bottom && within_columns {
            self.scroll_up_region(1);
        } else {
            self.cursor.y = (self.cursor.y + 1).min(self.height - 1);
        }
    }

    pub fn line_feed(&mut self) {
        self.advance_line();
    }

    pub fn vertical_tab(&mut self) {
        self.advance_line();
    }

    pub fn form_feed(&mut self) {
        self.advance_line();
    }

    fn reverse_index(&mut self) {
        self.cursor.wrap_next = false;
        let (left, right) = self.effective_columns();
        let within_columns = self.cursor.x >= left && self.cursor.x <= right;
        if self.cursor.y == self.margins.top && within_columns {
            self.scroll_down_region(1);
        } else {
            self.cursor.y = self.cursor.y.saturating_sub(1);
        }
    }

    fn index(&mut self) {
        self.advance_line();
    }

    pub fn backspace(&mut self) {
        self.cursor.wrap_next = false;
        let (left, _right) = self.effective_columns();
        // Only clamp at the left margin when the cursor started inside it;
        // a cursor already left of the margin backs up toward column 0
        // instead of snapping rightward onto the margin.
        let limit = if self.cursor.x >= left { left } else { 0 };
        self.cursor.x = self.cursor.x.saturating_sub(1).max(limit);
    }

    pub fn tab(&mut self) {
        self.cursor_horizontal_tab(1);
    }

    pub fn cursor_horizontal_tab(&mut self, n: usize) {
        self.cursor.wrap_next = false;
        let (_left, right) = self.effective_columns();
        self.cursor.x = self.tabs.next_n(self.cursor.x, n.max(1), right);
    }

    pub fn cursor_backward_tab(&mut self, n: usize) {
        self.cursor.wrap_next = false;
        self.cursor.x = self.tabs.prev_n(self.cursor.x, n.max(1));
    }

    // -- scrolling ---------------------------------------------------------

    fn scroll_up_region(&mut self, n: usize) {
        let (left, right) = self.effective_columns();
        let history_eligible = self.is_full_screen_scroll();
        let top = self.margins.top;
        let bottom = self.margins.bottom;
        let departed = self.active_grid_mut().scroll_up_region(top, bottom, left, right, n);
        if history_eligible {
            for line in departed {
                self.history.push(line);
            }
        }
    }

    fn scroll_down_region(&mut self, n: usize) {
        let (left, right) = self.effective_columns();
        let top = self.margins.top;
        let bottom = self.margins.bottom;
        self.active_grid_mut().scroll_down_region(top, bottom, left, right, n);
    }

    fn scroll_left_columns(&mut self, top: usize, bottom: usize, left: usize, right: usize, n: usize) {
        for row in top..=bottom {
            self.delete_cells(row, left, right, n);
        }
    }

    fn scroll_right_columns(&mut self, top: usize, bottom: usize, left: usize, right: usize, n: usize) {
        for row in top..=bottom {
            self.insert_cells(row, left, right, n);
        }
    }

    fn back_index(&mut self) {
        let (left, right) = self.effective_columns();
        if self.cursor.x == left {
            self.scroll_right_columns(self.margins.top, self.margins.bottom, left, right, 1);
        } else {
            self.cursor.x -= 1;
        }
    }

    fn forward_index(&mut self) {
        let (left, right) = self.effective_columns();
        if self.cursor.x == right {
            self.scroll_left_columns(self.margins.top, self.margins.bottom, left, right, 1);
        } else {
            self.cursor.x += 1;
        }
    }

    // -- row/column cell shifting -------------------------------------------

    fn insert_cells(&mut self, row: usize, at: usize, right: usize, n: usize) {
        if at > right || row >= self.height {
            return;
        }
        let width = right - at + 1;
        let n = n.min(width);
        let grid = self.active_grid_mut();
        let mut segment: Vec<Cell> = (at..=right).map(|x| grid.cell(x, row)).collect();
        segment.truncate(width - n);
        let mut new_segment = vec![cell_default(); n];
        new_segment.extend(segment);
        for (i, x) in (at..=right).enumerate() {
            grid.set_cell(x, row, new_segment[i]);
        }
    }

    fn delete_cells(&mut self, row: usize, at: usize, right: usize, n: usize) {
        if at > right || row >= self.height {
            return;
        }
        let width = right - at + 1;
        let n = n.min(width);
        let grid = self.active_grid_mut();
        let mut segment: Vec<Cell> = (at..=right).map(|x| grid.cell(x, row)).collect();
        segment.drain(0..n);
        segment.extend(vec![cell_default(); n]);
        for (i, x) in (at..=right).enumerate() {
            grid.set_cell(x, row, segment[i]);
        }
    }

    fn erase_cells(&mut self, row: usize, at: usize, count: usize) {
        let bg = self.sgr_bg;
        let width = self.width;
        let grid = self.active_grid_mut();
        for x in at..(at + count).min(width) {
            grid.set_cell(
                x,
                row,
                Cell {
                    rune: ' ',
                    fg: Color::Default,
                    bg,
                    attrs: Attrs::empty(),
                },
            );
        }
    }

    fn clear_row_range(&mut self, row: usize, from: usize, to_inclusive: usize) {
        let grid = self.active_grid_mut();
        for x in from..=to_inclusive.min(grid.width().saturating_sub(1)) {
            grid.set_cell(x, row, cell_default());
        }
    }

    // -- DA/DA2/DSR ----------------------------------------------------

    fn report_device_attributes(&mut self) {
        self.reply(b"\x1b[?62;1;2c");
    }

    fn report_secondary_device_attributes(&mut self) {
        self.reply(b"\x1b[>0;10;1c");
    }

    fn report_status(&mut self) {
        self.reply(b"\x1b[0n");
    }

    fn report_cursor_position(&mut self) {
        let (row, col) = if self.modes.contains(Modes::ORIGIN) {
            (
                self.cursor.y.saturating_sub(self.margins.top) + 1,
                self.cursor.x.saturating_sub(self.effective_columns().0) + 1,
            )
        } else {
            (self.cursor.y + 1, self.cursor.x + 1)
        };
        let reply = format!("\x1b[{row};{col}R");
        self.reply(reply.as_bytes());
    }

    // -- save/restore/reset ------------------------------------------------

    fn save_cursor(&mut self) {
        let snap = SavedCursor {
            x: self.cursor.x,
            y: self.cursor.y,
            fg: self.sgr_fg,
            bg: self.sgr_bg,
            attrs: self.sgr_attrs,
            origin_mode: self.modes.contains(Modes::ORIGIN),
        };
        match self.active {
            Screen::Main => self.saved_main = snap,
            Screen::Alt => self.saved_alt = snap,
        }
    }

    fn restore_cursor(&mut self) {
        let snap = match self.active {
            Screen::Main => self.saved_main,
            Screen::Alt => self.saved_alt,
        };
        self.cursor.x = snap.x.min(self.width - 1);
        self.cursor.y = snap.y.min(self.height - 1);
        self.cursor.wrap_next = false;
        self.sgr_fg = snap.fg;
        self.sgr_bg = snap.bg;
        self.sgr_attrs = snap.attrs;
        self.modes.set(Modes::ORIGIN, snap.origin_mode);
    }

    fn enter_alt_screen(&mut self) {
        if self.active == Screen::Alt {
            return;
        }
        self.save_cursor();
        self.active = Screen::Alt;
        self.alt.clear_all();
        self.cursor.x = 0;
        self.cursor.y = 0;
        self.cursor.wrap_next = false;
        self.modes.insert(Modes::ALT_SCREEN);
    }

    fn leave_alt_screen(&mut self) {
        if self.active == Screen::Main {
            return;
        }
        self.active = Screen::Main;
        self.restore_cursor();
        self.modes.remove(Modes::ALT_SCREEN);
    }

    fn soft_reset(&mut self) {
        self.modes.remove(Modes::INSERT);
        self.modes.remove(Modes::ORIGIN);
        self.modes.insert(Modes::AUTOWRAP);
        self.margins.reset(self.width, self.height);
        self.sgr_fg = Color::Default;
        self.sgr_bg = Color::Default;
        self.sgr_attrs = Attrs::empty();
        self.saved_alt = SavedCursor::home();
    }

    fn hard_reset(&mut self) {
        let width = self.width;
        let height = self.height;
        self.main = Grid::new(width, height);
        self.alt = Grid::new(width, height);
        self.history.clear();
        self.active = Screen::Main;
        self.cursor = Cursor {
            visible: self.config.default_cursor_visible,
            ..Cursor::default()
        };
        self.saved_main = SavedCursor::home();
        self.saved_alt = SavedCursor::home();
        self.margins = Margins::full(width, height);
        self.modes = Modes::default();
        self.tabs = TabStops::with_spacing(width, self.config.tab_width);
        self.sgr_fg = Color::Default;
        self.sgr_bg = Color::Default;
        self.sgr_attrs = Attrs::empty();
        self.default_fg = Color::Default;
        self.default_bg = Color::Default;
        self.last_graphic_char = None;
    }

    fn screen_alignment_pattern(&mut self) {
        self.margins.reset(self.width, self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                self.active_grid_mut().set_cell(
                    x,
                    y,
                    Cell {
                        rune: 'E',
                        ..cell_default()
                    },
                );
            }
        }
        self.cursor.x = 0;
        self.cursor.y = 0;
        self.cursor.wrap_next = false;
    }

    // -- absolute/relative movement -----------------------------------

    fn move_up(&mut self, n: usize) {
        self.cursor.wrap_next = false;
        let floor = if self.cursor_row_within_region() { self.margins.top } else { 0 };
        self.cursor.y = self.cursor.y.saturating_sub(n).max(floor);
    }

    fn move_down(&mut self, n: usize) {
        self.cursor.wrap_next = false;
        let ceil = if self.cursor_row_within_region() {
            self.margins.bottom
        } else {
            self.height - 1
        };
        self.cursor.y = (self.cursor.y + n).min(ceil);
    }

    fn move_left(&mut self, n: usize) {
        self.cursor.wrap_next = false;
        let (left, right) = self.effective_columns();
        let floor = if self.cursor.x >= left && self.cursor.x <= right { left } else { 0 };
        self.cursor.x = self.cursor.x.saturating_sub(n).max(floor);
    }

    fn move_right(&mut self, n: usize) {
        self.cursor.wrap_next = false;
        let (left, right) = self.effective_columns();
        let ceil = if self.cursor.x >= left && self.cursor.x <= right {
            right
        } else {
            self.width - 1
        };
        self.cursor.x = (self.cursor.x + n).min(ceil);
    }

    fn set_column(&mut self, col0: usize) {
        self.cursor.wrap_next = false;
        if self.modes.contains(Modes::ORIGIN) {
            let (left, right) = self.effective_columns();
            self.cursor.x = (left + col0).min(right);
        } else {
            self.cursor.x = col0.min(self.width - 1);
        }
    }

    fn set_row(&mut self, row0: usize) {
        self.cursor.wrap_next = false;
        if self.modes.contains(Modes::ORIGIN) {
            self.cursor.y = (self.margins.top + row0).min(self.margins.bottom);
        } else {
            self.cursor.y = row0.min(self.height - 1);
        }
    }

    fn set_position(&mut self, row0: usize, col0: usize) {
        self.cursor.wrap_next = false;
        if self.modes.contains(Modes::ORIGIN) {
            let (left, right) = self.effective_columns();
            self.cursor.y = (self.margins.top + row0).min(self.margins.bottom);
            self.cursor.x = (left + col0).min(right);
        } else {
            self.cursor.y = row0.min(self.height - 1);
            self.cursor.x = col0.min(self.width - 1);
        }
    }

    fn home_cursor_to_origin(&mut self) {
        if self.modes.contains(Modes::ORIGIN) {
            let (left, _right) = self.effective_columns();
            self.cursor.y = self.margins.top;
            self.cursor.x = left;
        } else {
            self.cursor.y = 0;
            self.cursor.x = 0;
        }
        self.cursor.wrap_next = false;
    }

    // -- erase operations ------------------------------------------------

    fn erase_in_display(&mut self, mode: i64) {
        let (y, h) = (self.cursor.y, self.height);
        match mode {
            0 => {
                self.clear_row_range(y, self.cursor.x, self.width - 1);
                for row in (y + 1)..h {
                    self.clear_row_range(row, 0, self.width - 1);
                }
            }
            1 => {
                for row in 0..y {
                    self.clear_row_range(row, 0, self.width - 1);
                }
                self.clear_row_range(y, 0, self.cursor.x);
            }
            2 => {
                for row in 0..h {
                    self.clear_row_range(row, 0, self.width - 1);
                }
            }
            3 => {
                if self.active == Screen::Main {
                    self.history.clear();
                }
            }
            _ => {}
        }
    }

    fn erase_in_line(&mut self, mode: i64) {
        let y = self.cursor.y;
        match mode {
            0 => self.clear_row_range(y, self.cursor.x, self.width - 1),
            1 => self.clear_row_range(y, 0, self.cursor.x),
            2 => self.clear_row_range(y, 0, self.width - 1),
            _ => {}
        }
    }

    // -- SGR ---------------------------------------------------------------

    fn apply_sgr(&mut self, params: &[i64]) {
        if params.is_empty() {
            self.sgr_fg = self.default_fg;
            self.sgr_bg = self.default_bg;
            self.sgr_attrs = Attrs::empty();
            return;
        }
        let mut i = 0;
        while i < params.len() {
            match params[i] {
                0 => {
                    self.sgr_fg = self.default_fg;
                    self.sgr_bg = self.default_bg;
                    self.sgr_attrs = Attrs::empty();
                }
                1 => self.sgr_attrs.insert(Attrs::BOLD),
                2 => self.sgr_attrs.insert(Attrs::DIM),
                3 => self.sgr_attrs.insert(Attrs::ITALIC),
                4 => self.sgr_attrs.insert(Attrs::UNDERLINE),
                7 => self.sgr_attrs.insert(Attrs::REVERSE),
                22 => {
                    self.sgr_attrs.remove(Attrs::BOLD);
                    self.sgr_attrs.remove(Attrs::DIM);
                }
                23 => self.sgr_attrs.remove(Attrs::ITALIC),
                24 => self.sgr_attrs.remove(Attrs::UNDERLINE),
                27 => self.sgr_attrs.remove(Attrs::REVERSE),
                5 | 6 => self.sgr_attrs.insert(Attrs::BLINK),
                25 => self.sgr_attrs.remove(Attrs::BLINK),
                n @ 30..=37 => self.sgr_fg = Color::Standard((n - 30) as u8),
                n @ 40..=47 => self.sgr_bg = Color::Standard((n - 40) as u8),
                n @ 90..=97 => self.sgr_fg = Color::Standard((n - 90 + 8) as u8),
                n @ 100..=107 => self.sgr_bg = Color::Standard((n - 100 + 8) as u8),
                39 => self.sgr_fg = self.default_fg,
                49 => self.sgr_bg = self.default_bg,
                38 => {
                    i += 1;
                    if let Some(color) = self.parse_extended_color(params, &mut i) {
                        self.sgr_fg = color;
                    }
                    continue;
                }
                48 => {
                    i += 1;
                    if let Some(color) = self.parse_extended_color(params, &mut i) {
                        self.sgr_bg = color;
                    }
                    continue;
                }
                _ => {}
            }
            i += 1;
        }
    }

    /// Parses the `5;n` or `2;r;g;b` tail of an extended SGR color
    /// sequence, advancing `i` past whatever it consumed.
    fn parse_extended_color(&self, params: &[i64], i: &mut usize) -> Option<Color> {
        match params.get(*i) {
            Some(&5) => {
                let n = *params.get(*i + 1)?;
                *i += 2;
                Some(Color::Palette256(n.clamp(0, 255) as u8))
            }
            Some(&2) => {
                let r = *params.get(*i + 1)?;
                let g = *params.get(*i + 2)?;
                let b = *params.get(*i + 3)?;
                *i += 4;
                Some(Color::Rgb {
                    r: r.clamp(0, 255) as u8,
                    g: g.clamp(0, 255) as u8,
                    b: b.clamp(0, 255) as u8,
                })
            }
            _ => None,
        }
    }

    // -- REP ---------------------------------------------------------------

    fn repeat_last(&mut self, n: usize) {
        if let Some(ch) = self.last_graphic_char {
            for _ in 0..n {
                self.place_char(ch);
            }
        }
    }

    // -- DECSET/DECRESET -----------------------------------------------

    fn set_private_mode(&mut self, code: i64, enabled: bool) {
        match code {
            6 => {
                self.modes.set(Modes::ORIGIN, enabled);
                self.home_cursor_to_origin();
            }
            7 => self.modes.set(Modes::AUTOWRAP, enabled),
            25 => self.modes.set(Modes::CURSOR_VISIBLE, enabled),
            69 => self.modes.set(Modes::LEFT_RIGHT_MARGIN, enabled),
            1049 => {
                if enabled {
                    self.enter_alt_screen();
                } else {
                    self.leave_alt_screen();
                }
            }
            2004 => {
                self.modes.set(Modes::BRACKETED_PASTE, enabled);
                if let Some(cb) = self.paste_callback.as_mut() {
                    cb(enabled);
                }
            }
            1000 => self.modes.set(Modes::MOUSE_CLICK, enabled),
            1002 => self.modes.set(Modes::MOUSE_DRAG, enabled),
            1003 => self.modes.set(Modes::MOUSE_MOTION, enabled),
            1005 => self.modes.set(Modes::MOUSE_UTF8, enabled),
            1006 => self.modes.set(Modes::MOUSE_SGR, enabled),
            _ => log::debug!("ignoring private mode {code}"),
        }
    }

    fn set_ansi_mode(&mut self, code: i64, enabled: bool) {
        match code {
            4 => self.modes.set(Modes::INSERT, enabled),
            _ => log::debug!("ignoring ANSI mode {code}"),
        }
    }

    // -- DECSTBM / DECSLRM -----------------------------------------------

    fn set_top_bottom_margins(&mut self, top1: i64, bottom1: i64) {
        if top1 == 0 && bottom1 == 0 {
            self.margins.top = 0;
            self.margins.bottom = self.height - 1;
        } else {
            let top = (top1.max(1) - 1) as usize;
            let bottom = (bottom1.max(1) - 1) as usize;
            self.margins.set_top_bottom(top, bottom, self.height);
        }
        self.home_cursor_to_origin();
    }

    fn set_left_right_margins(&mut self, left1: i64, right1: i64) {
        if !self.modes.contains(Modes::LEFT_RIGHT_MARGIN) {
            return;
        }
        if left1 == 0 && right1 == 0 {
            self.margins.left = 0;
            self.margins.right = self.width - 1;
        } else {
            let left = (left1.max(1) - 1) as usize;
            let right = (right1.max(1) - 1) as usize;
            self.margins.set_left_right(left, right, self.width);
        }
        self.home_cursor_to_origin();
    }

    // -- OSC ---------------------------------------------------------------

    fn osc_title(&mut self, payload: &[u8]) {
        if let Ok(text) = std::str::from_utf8(payload) {
            if let Some(cb) = self.title_callback.as_mut() {
                cb(text);
            }
        }
    }

    fn osc_set_default_color(&mut self, which_fg: bool, payload: &[u8]) {
        if let Some((r, g, b)) = parse_rgb_spec(payload) {
            if which_fg {
                self.default_fg = Color::Rgb { r, g, b };
            } else {
                self.default_bg = Color::Rgb { r, g, b };
            }
        }
    }
}

/// Parses `rgb:rrrr/gggg/bbbb` (4 hex digits per channel) into 8-bit
/// components, scaling down by integer division by 257.
fn parse_rgb_spec(payload: &[u8]) -> Option<(u8, u8, u8)> {
    let text = std::str::from_utf8(payload).ok()?;
    let rest = text.strip_prefix("rgb:")?;
    let mut parts = rest.split('/');
    let r = u16::from_str_radix(parts.next()?, 16).ok()?;
    let g = u16::from_str_radix(parts.next()?, 16).ok()?;
    let b = u16::from_str_radix(parts.next()?, 16).ok()?;
    Some(((r / 257) as u8, (g / 257) as u8, (b / 257) as u8))
}

/// Splits parsed CSI parameters into a leading private-mode prefix byte
/// (one of `< = > ?`), the numeric parameters in order, and any other
/// intermediate bytes (0x20..=0x2F) encountered along the way.
///
/// `CsiParam::P` also carries the `;` (and `:`) parameter separators the
/// parser emits between numeric fields; those are not intermediates and
/// must not be collected, or every multi-parameter CSI (CUP, DECSTBM,
/// compound SGR, …) would spuriously land in the `intermediates` slot.
fn classify_params(params: &[CsiParam]) -> (Option<u8>, Vec<i64>, Vec<u8>) {
    let mut prefix = None;
    let mut ints = Vec::new();
    let mut intermediates = Vec::new();
    for p in params {
        match p {
            CsiParam::Integer(n) => ints.push(*n),
            CsiParam::P(b) if ints.is_empty() && prefix.is_none() && matches!(b, b'<' | b'=' | b'>' | b'?') => {
                prefix = Some(*b)
            }
            CsiParam::P(b) if (0x20..=0x2f).contains(b) => intermediates.push(*b),
            CsiParam::P(_) => {}
        }
    }
    (prefix, ints, intermediates)
}

fn arg(ints: &[i64], index: usize, default: i64) -> i64 {
    match ints.get(index) {
        Some(&0) | None => default,
        Some(&n) => n,
    }
}

impl Actor for VTerm {
    fn print(&mut self, c: char) {
        self.place_char(c);
    }

    fn execute(&mut self, byte: u8) {
        match byte {
            0x08 => self.backspace(),
            0x09 => self.tab(),
            0x0A | 0x0B | 0x0C => self.line_feed(),
            0x0D => self.carriage_return(),
            _ => {}
        }
    }

    fn hook(&mut self, _byte: u8, _params: &[i64], _intermediates: &[u8], _ignored: bool) {
        log::trace!("DCS hook ignored: not acted on by this core");
    }

    fn put(&mut self, _byte: u8) {}

    fn unhook(&mut self) {}

    fn esc_dispatch(&mut self, _params: &[i64], intermediates: &[u8], _ignored: bool, byte: u8) {
        match (intermediates, byte) {
            ([], b'D') => self.index(),
            ([], b'M') => self.reverse_index(),
            ([], b'E') => {
                self.carriage_return();
                self.index();
            }
            ([], b'7') => self.save_cursor(),
            ([], b'8') => self.restore_cursor(),
            ([], b'6') => self.back_index(),
            ([], b'9') => self.forward_index(),
            ([], b'c') => self.hard_reset(),
            ([], b'H') => self.tabs.set(self.cursor.x),
            ([0x23], b'8') => self.screen_alignment_pattern(),
            ([b'='], _) | ([b'>'], _) => {}
            _ => log::debug!("ignoring ESC sequence {intermediates:?} {byte:#04x}"),
        }
    }

    fn csi_dispatch(&mut self, params: &[CsiParam], _truncated: bool, byte: u8) {
        let (prefix, ints, intermediates) = classify_params(params);
        let n = || arg(&ints, 0, 1).max(0) as usize;

        match (prefix, intermediates.as_slice(), byte) {
            (None, [], b'A') => self.move_up(n()),
            (None, [], b'B') => self.move_down(n()),
            (None, [], b'C') => self.move_right(n()),
            (None, [], b'D') => self.move_left(n()),
            (None, [], b'G') | (None, [], b'`') => {
                let col = (arg(&ints, 0, 1).max(1) - 1) as usize;
                self.set_column(col);
            }
            (None, [], b'd') => {
                let row = (arg(&ints, 0, 1).max(1) - 1) as usize;
                self.set_row(row);
            }
            (None, [], b'a') => self.move_right(n()),
            (None, [], b'e') => self.move_down(n()),
            (None, [], b'E') => {
                self.move_down(n());
                self.cursor.x = 0;
            }
            (None, [], b'F') => {
                self.move_up(n());
                self.cursor.x = 0;
            }
            (None, [], b'H') | (None, [], b'f') => {
                let row = (arg(&ints, 0, 1).max(1) - 1) as usize;
                let col = (arg(&ints, 1, 1).max(1) - 1) as usize;
                self.set_position(row, col);
            }
            (None, [], b'I') => self.cursor_horizontal_tab(n()),
            (None, [], b'Z') => self.cursor_backward_tab(n()),
            (None, [], b'@') => {
                let (_l, right) = self.effective_columns();
                if self.cursor_within_margins() {
                    self.insert_cells(self.cursor.y, self.cursor.x, right, n());
                }
            }
            (None, [], b'P') => {
                let (_l, right) = self.effective_columns();
                if self.cursor_within_margins() {
                    self.delete_cells(self.cursor.y, self.cursor.x, right, n());
                }
            }
            (None, [], b'X') => {
                let row = self.cursor.y;
                let at = self.cursor.x;
                self.erase_cells(row, at, n());
            }
            (None, [], b'L') => {
                if self.cursor_within_margins() {
                    let (left, right) = self.effective_columns();
                    let top = self.cursor.y;
                    let bottom = self.margins.bottom;
                    self.active_grid_mut().scroll_down_region(top, bottom, left, right, n());
                }
            }
            (None, [], b'M') => {
                if self.cursor_within_margins() {
                    let (left, right) = self.effective_columns();
                    let top = self.cursor.y;
                    let bottom = self.margins.bottom;
                    let _ = self.active_grid_mut().scroll_up_region(top, bottom, left, right, n());
                }
            }
            (None, [], b'J') => self.erase_in_display(arg(&ints, 0, 0)),
            (None, [], b'K') => self.erase_in_line(arg(&ints, 0, 0)),
            (None, [], b'S') => self.scroll_up_region(n()),
            (None, [], b'T') => self.scroll_down_region(n()),
            (None, [], b'r') => self.set_top_bottom_margins(arg(&ints, 0, 0), arg(&ints, 1, 0)),
            (None, [], b's') => self.set_left_right_margins(arg(&ints, 0, 0), arg(&ints, 1, 0)),
            (Some(b'?'), [], b'h') => {
                for &code in &ints {
                    self.set_private_mode(code, true);
                }
            }
            (Some(b'?'), [], b'l') => {
                for &code in &ints {
                    self.set_private_mode(code, false);
                }
            }
            (None, [], b'h') => {
                for &code in &ints {
                    self.set_ansi_mode(code, true);
                }
            }
            (None, [], b'l') => {
                for &code in &ints {
                    self.set_ansi_mode(code, false);
                }
            }
            (None, [b'!'], b'p') => self.soft_reset(),
            (None, [b'\''], b'}') => {
                if self.cursor_within_margins() {
                    let (left, right) = self.effective_columns();
                    self.scroll_right_columns(self.margins.top, self.margins.bottom, left, right, n());
                }
            }
            (None, [b'\''], b'~') => {
                if self.cursor_within_margins() {
                    let (left, right) = self.effective_columns();
                    self.scroll_left_columns(self.margins.top, self.margins.bottom, left, right, n());
                }
            }
            (None, [], b'b') => self.repeat_last(n()),
            (None, [], b'g') => match arg(&ints, 0, 0) {
                0 => self.tabs.clear(self.cursor.x),
                3 => self.tabs.clear_all(),
                _ => {}
            },
            (None, [], b'm') => self.apply_sgr(&ints),
            (None, [], b'c') => self.report_device_attributes(),
            (Some(b'>'), [], b'c') => self.report_secondary_device_attributes(),
            (None, [], b'n') => match arg(&ints, 0, 0) {
                5 => self.report_status(),
                6 => self.report_cursor_position(),
                _ => {}
            },
            _ => log::debug!("ignoring CSI {params:?} {byte:#04x}"),
        }
    }

    fn osc_dispatch(&mut self, params: &[&[u8]]) {
        let Some(&command) = params.first() else { return };
        let Ok(code) = std::str::from_utf8(command).unwrap_or("").parse::<u32>() else {
            return;
        };
        match code {
            0 | 2 => {
                if let Some(&payload) = params.get(1) {
                    self.osc_title(payload);
                }
            }
            10 => {
                if let Some(&payload) = params.get(1) {
                    self.osc_set_default_color(true, payload);
                }
            }
            11 => {
                if let Some(&payload) = params.get(1) {
                    self.osc_set_default_color(false, payload);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(term: &mut VTerm, bytes: &[u8]) {
        let mut parser = vte_core::Parser::new();
        parser.advance(bytes, term);
    }

    #[test]
    fn grid_bounds_stay_in_range_after_arbitrary_input() {
        let mut term = VTerm::new(10, 5);
        feed(&mut term, b"hello\r\nworld\x1b[20Bxyz\x1b[50C");
        let (x, y) = term.cursor();
        assert!(x < term.width());
        assert!(y < term.height());
    }

    #[test]
    fn sgr_reset_clears_fg_bg_attrs() {
        let mut term = VTerm::new(10, 3);
        feed(&mut term, b"\x1b[1;31;44m\x1b[0mX");
        let grid = term.grid();
        let cell = grid[0][0];
        assert_eq!(cell.fg, Color::Default);
        assert_eq!(cell.bg, Color::Default);
        assert_eq!(cell.attrs, Attrs::empty());
    }

    #[test]
    fn autowrap_latches_at_right_edge() {
        let mut term = VTerm::new(5, 3);
        feed(&mut term, b"abcde");
        let (x, y) = term.cursor();
        assert_eq!((x, y), (4, 0));
        assert!(term.cursor.wrap_next);
        feed(&mut term, b"f");
        let (x, y) = term.cursor();
        assert_eq!((x, y), (1, 1));
    }

    #[test]
    fn tab_default_lands_on_column_eight() {
        let mut term = VTerm::new(40, 3);
        feed(&mut term, b"\x1bc\t");
        assert_eq!(term.cursor().0, 8);
    }

    #[test]
    fn rectangular_scroll_respects_left_right_margins() {
        let mut term = VTerm::new(10, 5);
        feed(&mut term, b"\x1b[?69h\x1b[2;5s");
        for col in 0..10 {
            feed(&mut term, format!("\x1b[1;{}H{}", col + 1, (b'a' + col as u8) as char).as_bytes());
        }
        feed(&mut term, b"\x1b[1;1H\x1b[1S");
        let grid = term.grid();
        assert_eq!(grid[0][0].rune, 'a');
        assert_eq!(grid[0][9].rune, 'j');
    }

    #[test]
    fn idempotent_reset() {
        let mut a = VTerm::new(20, 5);
        feed(&mut a, b"hello\x1b[31mworld\x1b[2;2H\x1bc");
        let mut b = VTerm::new(20, 5);
        feed(&mut b, b"\x1bc");
        assert_eq!(a.cursor(), b.cursor());
        assert_eq!(a.grid()[0][0].rune, b.grid()[0][0].rune);
    }

    #[test]
    fn decom_cursor_report_is_relative_to_margins() {
        let mut term = VTerm::new(10, 10);
        let replies = std::sync::Arc::new(std::sync::Mutex::new(Vec::<u8>::new()));
        let replies2 = replies.clone();
        term.set_reply_sink(move |bytes| replies2.lock().unwrap().extend_from_slice(bytes));
        feed(&mut term, b"\x1b[4;8r\x1b[?6h\x1b[3;3H\x1b[6n");
        let got = String::from_utf8(replies.lock().unwrap().clone()).unwrap();
        assert_eq!(got, "\x1b[3;3R");
    }

    #[test]
    fn device_attributes_reply_shape() {
        let mut term = VTerm::new(80, 24);
        let replies = std::sync::Arc::new(std::sync::Mutex::new(Vec::<u8>::new()));
        let replies2 = replies.clone();
        term.set_reply_sink(move |bytes| replies2.lock().unwrap().extend_from_slice(bytes));
        feed(&mut term, b"\x1b[c");
        let got = String::from_utf8(replies.lock().unwrap().clone()).unwrap();
        assert!(got.starts_with("\x1b[?"));
        assert!(got.ends_with('c'));
        assert!(got.contains("62"));
    }

    #[test]
    fn palette256_foreground_is_tracked_exactly() {
        let mut term = VTerm::new(10, 3);
        feed(&mut term, b"\x1b[38;5;196mR");
        let cell = term.grid()[0][0];
        assert_eq!(cell.fg, Color::Palette256(196));
        assert_eq!(cell.bg, Color::Default);
    }
}
