pub mod actions;
mod app_state;
mod bubble_list;
mod completions;
mod conversation;
pub mod events;
mod scroll;

pub use app_state::*;
pub use bubble_list::*;
pub use completions::*;
pub use conversation::*;
pub use scroll::*;
