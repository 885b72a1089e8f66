//! Panels and the desk that owns them

mod config;
mod desk;
#[allow(clippy::module_inception)]
mod panel;
mod result;

pub use config::{PanelConfig, PanelHooks};
pub use desk::Desk;
pub use panel::Panel;
pub use result::{InputResult, Interaction};
