//! Handler modules for keyboard input and panel state.

mod input_handler;
mod panel_handler;

pub use input_handler::InputHandler;
pub use panel_handler::PanelHandler;
