//! Fixed screen geometry shared by the renderer and click handling.

use crate::config::WheelConfig;

const PADDING: i32 = 16;
const ROW_HEIGHT: i32 = 24;
const HEADER_HEIGHT: i32 = 28;
const INPUT_HEIGHT: i32 = 32;
const SPIN_BUTTON_HEIGHT: i32 = 36;
const ADD_BUTTON_WIDTH: i32 = 68;
const CLEAR_BUTTON_WIDTH: i32 = 96;
const ROW_BUTTON_SIZE: i32 = 20;
const DIALOG_WIDTH: i32 = 420;
const DIALOG_HEIGHT: i32 = 220;
const DIALOG_BUTTON_WIDTH: i32 = 170;
const DIALOG_BUTTON_HEIGHT: i32 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn center(&self) -> (i32, i32) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }
}

/// Something on screen a click can land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiTarget {
    Wheel,
    InputBox,
    AddButton,
    SpinButton,
    RemoveItem(usize),
    ClearItems,
    ClearHistory,
    RemoveWinner,
    KeepWinner,
}

/// What the hit test needs to know about the current frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct HitContext {
    pub dialog_open: bool,
    pub item_count: usize,
    pub item_scroll: usize,
}

#[derive(Debug, Clone)]
pub struct Layout {
    pub window: Rect,
    pub wheel_area: Rect,
    pub wheel_cx: i32,
    pub wheel_cy: i32,
    pub wheel_radius: i32,
    pub panel: Rect,
    pub input_box: Rect,
    pub add_button: Rect,
    pub spin_button: Rect,
    pub items_header: Rect,
    pub clear_items_button: Rect,
    pub items_list: Rect,
    pub history_header: Rect,
    pub clear_history_button: Rect,
    pub history_list: Rect,
    pub dialog: Rect,
    pub remove_winner_button: Rect,
    pub keep_winner_button: Rect,
    pub row_height: i32,
}

impl Layout {
    pub fn new(config: &WheelConfig) -> Self {
        let size = config.wheel_size as i32;
        let window = Rect::new(0, 0, config.window_width() as i32, config.window_height() as i32);
        let wheel_area = Rect::new(0, 0, size, size);
        let panel = Rect::new(size, 0, config.panel_width as i32, window.h);

        let inner_x = panel.x + PADDING;
        let inner_w = panel.w - 2 * PADDING;
        let input_box = Rect::new(inner_x, PADDING, inner_w - ADD_BUTTON_WIDTH - 8, INPUT_HEIGHT);
        let add_button = Rect::new(
            inner_x + inner_w - ADD_BUTTON_WIDTH,
            PADDING,
            ADD_BUTTON_WIDTH,
            INPUT_HEIGHT,
        );

        let spin_button = Rect::new(inner_x, input_box.bottom() + 8, inner_w, SPIN_BUTTON_HEIGHT);

        let items_top = spin_button.bottom() + PADDING;
        let items_header = Rect::new(inner_x, items_top, inner_w, HEADER_HEIGHT);
        let clear_items_button = Rect::new(
            inner_x + inner_w - CLEAR_BUTTON_WIDTH,
            items_top,
            CLEAR_BUTTON_WIDTH,
            HEADER_HEIGHT,
        );
        let list_top = items_header.bottom() + 8;
        let list_rows = (window.h / 2 + 40 - list_top) / ROW_HEIGHT;
        let items_list = Rect::new(inner_x, list_top, inner_w, list_rows.max(1) * ROW_HEIGHT);

        let history_top = items_list.bottom() + PADDING;
        let history_header = Rect::new(inner_x, history_top, inner_w, HEADER_HEIGHT);
        let clear_history_button = Rect::new(
            inner_x + inner_w - CLEAR_BUTTON_WIDTH,
            history_top,
            CLEAR_BUTTON_WIDTH,
            HEADER_HEIGHT,
        );
        let history_list_top = history_header.bottom() + 8;
        let history_rows = (window.h - PADDING - history_list_top) / ROW_HEIGHT;
        let history_list = Rect::new(
            inner_x,
            history_list_top,
            inner_w,
            history_rows.max(1) * ROW_HEIGHT,
        );

        let dialog = Rect::new(
            (window.w - DIALOG_WIDTH) / 2,
            (window.h - DIALOG_HEIGHT) / 2,
            DIALOG_WIDTH,
            DIALOG_HEIGHT,
        );
        let button_y = dialog.bottom() - DIALOG_BUTTON_HEIGHT - 24;
        let remove_winner_button = Rect::new(
            dialog.x + 30,
            button_y,
            DIALOG_BUTTON_WIDTH,
            DIALOG_BUTTON_HEIGHT,
        );
        let keep_winner_button = Rect::new(
            dialog.right() - 30 - DIALOG_BUTTON_WIDTH,
            button_y,
            DIALOG_BUTTON_WIDTH,
            DIALOG_BUTTON_HEIGHT,
        );

        Self {
            window,
            wheel_area,
            wheel_cx: size / 2,
            wheel_cy: size / 2,
            wheel_radius: size / 2 - config.wheel_margin,
            panel,
            input_box,
            add_button,
            spin_button,
            items_header,
            clear_items_button,
            items_list,
            history_header,
            clear_history_button,
            history_list,
            dialog,
            remove_winner_button,
            keep_winner_button,
            row_height: ROW_HEIGHT,
        }
    }

    pub fn visible_item_rows(&self) -> usize {
        (self.items_list.h / self.row_height) as usize
    }

    pub fn visible_history_rows(&self) -> usize {
        (self.history_list.h / self.row_height) as usize
    }

    /// Largest useful scroll offset for a list of `item_count` entries.
    pub fn max_item_scroll(&self, item_count: usize) -> usize {
        item_count.saturating_sub(self.visible_item_rows())
    }

    pub fn item_row(&self, slot: usize) -> Rect {
        list_row(self.items_list, slot, self.row_height)
    }

    pub fn item_remove_button(&self, slot: usize) -> Rect {
        let row = self.item_row(slot);
        Rect::new(
            row.right() - ROW_BUTTON_SIZE - 2,
            row.y + (row.h - ROW_BUTTON_SIZE) / 2,
            ROW_BUTTON_SIZE,
            ROW_BUTTON_SIZE,
        )
    }

    pub fn history_row(&self, slot: usize) -> Rect {
        list_row(self.history_list, slot, self.row_height)
    }

    pub fn hit_test(&self, x: i32, y: i32, context: HitContext) -> Option<UiTarget> {
        if context.dialog_open {
            return if self.remove_winner_button.contains(x, y) {
                Some(UiTarget::RemoveWinner)
            } else if self.keep_winner_button.contains(x, y) {
                Some(UiTarget::KeepWinner)
            } else {
                None
            };
        }

        if self.wheel_area.contains(x, y) {
            return Some(UiTarget::Wheel);
        }
        if self.add_button.contains(x, y) {
            return Some(UiTarget::AddButton);
        }
        if self.input_box.contains(x, y) {
            return Some(UiTarget::InputBox);
        }
        if context.item_count > 0 && self.spin_button.contains(x, y) {
            return Some(UiTarget::SpinButton);
        }
        if context.item_count > 0 && self.clear_items_button.contains(x, y) {
            return Some(UiTarget::ClearItems);
        }
        if self.clear_history_button.contains(x, y) {
            return Some(UiTarget::ClearHistory);
        }
        if self.items_list.contains(x, y) {
            let slot = ((y - self.items_list.y) / self.row_height) as usize;
            let index = context.item_scroll + slot;
            if index < context.item_count && self.item_remove_button(slot).contains(x, y) {
                return Some(UiTarget::RemoveItem(index));
            }
        }
        None
    }
}

fn list_row(list: Rect, slot: usize, row_height: i32) -> Rect {
    Rect::new(list.x, list.y + slot as i32 * row_height, list.w, row_height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn layout() -> Layout {
        Layout::new(&WheelConfig::default())
    }

    #[test]
    fn wheel_fills_the_left_square() {
        let layout = layout();
        assert_eq!(layout.wheel_area, Rect::new(0, 0, 600, 600));
        assert_eq!((layout.wheel_cx, layout.wheel_cy), (300, 300));
        assert_eq!(layout.wheel_radius, 290);
        assert_eq!(layout.panel.x, 600);
    }

    #[test]
    fn panel_sections_stay_inside_the_window() {
        let layout = layout();
        for rect in [
            layout.input_box,
            layout.add_button,
            layout.spin_button,
            layout.items_list,
            layout.history_list,
            layout.clear_history_button,
        ] {
            assert!(rect.x >= layout.panel.x);
            assert!(rect.right() <= layout.window.right());
            assert!(rect.bottom() <= layout.window.bottom());
        }
        assert!(layout.items_list.bottom() < layout.history_header.y);
        assert!(layout.visible_item_rows() >= 5);
        assert!(layout.visible_history_rows() >= 5);
    }

    #[test]
    fn clicks_on_the_wheel_spin() {
        let layout = layout();
        let context = HitContext {
            item_count: 3,
            ..HitContext::default()
        };
        assert_eq!(layout.hit_test(300, 300, context), Some(UiTarget::Wheel));
        assert_eq!(layout.hit_test(5, 590, context), Some(UiTarget::Wheel));
    }

    #[test]
    fn spin_button_needs_items() {
        let layout = layout();
        let (x, y) = layout.spin_button.center();
        assert!(layout.spin_button.y >= layout.input_box.bottom());
        assert!(layout.spin_button.bottom() < layout.items_header.y);
        assert_eq!(layout.hit_test(x, y, HitContext::default()), None);
        let context = HitContext {
            item_count: 1,
            ..HitContext::default()
        };
        assert_eq!(layout.hit_test(x, y, context), Some(UiTarget::SpinButton));
    }

    #[test]
    fn row_buttons_account_for_scroll() {
        let layout = layout();
        let context = HitContext {
            dialog_open: false,
            item_count: 20,
            item_scroll: 3,
        };
        let (x, y) = layout.item_remove_button(2).center();
        assert_eq!(layout.hit_test(x, y, context), Some(UiTarget::RemoveItem(5)));

        let (x, y) = layout.item_row(2).center();
        assert_eq!(layout.hit_test(x - 100, y, context), None);
    }

    #[test]
    fn empty_rows_have_no_remove_button() {
        let layout = layout();
        let context = HitContext {
            item_count: 1,
            ..HitContext::default()
        };
        let (x, y) = layout.item_remove_button(3).center();
        assert_eq!(layout.hit_test(x, y, context), None);
    }

    #[test]
    fn clear_all_needs_items() {
        let layout = layout();
        let (x, y) = layout.clear_items_button.center();
        assert_eq!(layout.hit_test(x, y, HitContext::default()), None);
        let context = HitContext {
            item_count: 2,
            ..HitContext::default()
        };
        assert_eq!(layout.hit_test(x, y, context), Some(UiTarget::ClearItems));
    }

    #[test]
    fn open_dialog_captures_clicks() {
        let layout = layout();
        let context = HitContext {
            dialog_open: true,
            item_count: 3,
            item_scroll: 0,
        };
        assert_eq!(layout.hit_test(20, 20, context), None);
        let (x, y) = layout.remove_winner_button.center();
        assert_eq!(layout.hit_test(x, y, context), Some(UiTarget::RemoveWinner));
        let (x, y) = layout.keep_winner_button.center();
        assert_eq!(layout.hit_test(x, y, context), Some(UiTarget::KeepWinner));
    }

    #[test]
    fn scroll_limit_tracks_list_length() {
        let layout = layout();
        let rows = layout.visible_item_rows();
        assert_eq!(layout.max_item_scroll(rows), 0);
        assert_eq!(layout.max_item_scroll(rows + 4), 4);
    }
}
