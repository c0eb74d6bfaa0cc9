//! Selection state and marquee selection helpers.

mod manager;
mod utils;

pub use manager::{ListenerId, SelectionChangeEvent, SelectionListener, SelectionManager};
pub use utils::{
    Containment, SelectionMode, is_object_completely_in_rect, is_object_intersecting_rect,
    normalize_rect, objects_in_rect, update_selection,
};
