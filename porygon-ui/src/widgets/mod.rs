//! Built-in widgets for debug panels.

mod button;
mod label;
mod panel;
mod scroll_panel;
mod text_input;

pub use button::Button;
pub use label::Label;
pub use panel::Panel;
pub use scroll_panel::{ScrollPanel, ScrollTrack};
pub use text_input::TextInput;
