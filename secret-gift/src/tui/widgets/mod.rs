// TUI widget modules, one per screen plus modal overlays.

pub mod big_number;
pub mod menu;
pub mod notice;
pub mod quit_confirm;
pub mod register;
pub mod reveal;
pub mod welcome;
