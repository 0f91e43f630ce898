use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::game::Direction;

/// Minimum drag distance, in terminal cells, that counts as a swipe
pub const DEFAULT_SWIPE_THRESHOLD: u16 = 2;

/// Turns a mouse drag into a swipe direction
///
/// A swipe starts on left-button press and resolves as soon as the pointer
/// has moved far enough, so the player gets the turn mid-drag instead of on
/// release. One drag yields at most one direction.
#[derive(Debug)]
pub struct SwipeTracker {
    origin: Option<(u16, u16)>,
    threshold: u16,
}

impl SwipeTracker {
    pub fn new(threshold: u16) -> Self {
        Self {
            origin: None,
            threshold: threshold.max(1),
        }
    }

    pub fn handle_mouse_event(&mut self, event: MouseEvent) -> Option<Direction> {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.origin = Some((event.column, event.row));
                None
            }
            MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Up(MouseButton::Left) => {
                let (x0, y0) = self.origin?;
                let dx = event.column as i32 - x0 as i32;
                let dy = event.row as i32 - y0 as i32;

                if dx.unsigned_abs().max(dy.unsigned_abs()) < self.threshold as u32 {
                    if matches!(event.kind, MouseEventKind::Up(_)) {
                        self.origin = None;
                    }
                    return None;
                }

                self.origin = None;
                Direction::from_swipe(dx, dy)
            }
            _ => None,
        }
    }
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new(DEFAULT_SWIPE_THRESHOLD)
    }
}
