pub mod ui;

use crate::api::BookingRecord;

/// Staff dashboard: the booking list plus the status picker popup.
pub struct AdminPanel {
    pub bookings: Vec<BookingRecord>,
    pub selected: usize,
    pub show_status_picker: bool,
    pub picker_cursor: usize,
    pub loaded: bool,
}

impl AdminPanel {
    pub fn new() -> Self {
        Self {
            bookings: Vec::new(),
            selected: 0,
            show_status_picker: false,
            picker_cursor: 0,
            loaded: false,
        }
    }

    pub fn set_bookings(&mut self, bookings: Vec<BookingRecord>) {
        self.bookings = bookings;
        self.loaded = true;
        if self.selected >= self.bookings.len() {
            self.selected = self.bookings.len().saturating_sub(1);
        }
    }

    pub fn selected_booking(&self) -> Option<&BookingRecord> {
        self.bookings.get(self.selected)
    }

    pub fn select_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_down(&mut self) {
        if self.selected + 1 < self.bookings.len() {
            self.selected += 1;
        }
    }

    /// Open the stage picker with the cursor on the booking's current stage.
    pub fn open_picker(&mut self, stages: &[String]) {
        let Some(booking) = self.selected_booking() else {
            return;
        };
        self.picker_cursor = stages
            .iter()
            .position(|s| *s == booking.status)
            .unwrap_or(0);
        self.show_status_picker = true;
    }

    pub fn close_picker(&mut self) {
        self.show_status_picker = false;
    }

    pub fn picker_up(&mut self) {
        self.picker_cursor = self.picker_cursor.saturating_sub(1);
    }

    pub fn picker_down(&mut self, stage_count: usize) {
        if self.picker_cursor + 1 < stage_count {
            self.picker_cursor += 1;
        }
    }
}

impl Default for AdminPanel {
    fn default() -> Self {
        Self::new()
    }
}
