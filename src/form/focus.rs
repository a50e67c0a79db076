//! Focus cycling over a fixed number of slots

/// Common focus navigation for anything with an ordered set of slots
pub trait FocusRing {
    fn slot_count(&self) -> usize;
    fn focused_slot(&self) -> usize;
    fn set_focused_slot(&mut self, index: usize);
    fn focus_next(&mut self) {
        let count = self.slot_count();
        if count == 0 {
            return;
        }
        let current = self.focused_slot();
        self.set_focused_slot((current + 1) % count);
    }
    fn focus_prev(&mut self) {
        let count = self.slot_count();
        if count == 0 {
            return;
        }
        let current = self.focused_slot();
        if current == 0 {
            self.set_focused_slot(count - 1);
        } else {
            self.set_focused_slot(current - 1);
        }
    }
}
