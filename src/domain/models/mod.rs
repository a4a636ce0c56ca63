mod action;
mod backend;
mod event;
mod loading;
mod review;
mod slash_commands;
mod submission;
mod textarea;
mod turn;
mod variant;

pub use action::*;
pub use backend::*;
pub use event::*;
pub use loading::*;
pub use review::*;
pub use slash_commands::*;
pub use submission::*;
pub use textarea::*;
pub use turn::*;
pub use variant::*;
