// Components module - reusable UI building blocks
//
// Shell components are rendered on every frame:
// - Title bar: brand label, slide dots, navigation labels
// - Status bar: uptime, slide position, scramble statistics
// - Logs panel: system log entries (toggled)
// - Toast: transient notifications
//
// The slide component renders the deck's active slide, and scramble_label is
// the building block every animated label goes through.

pub mod logs_panel;
pub mod scramble_label;
pub mod slide;
pub mod status_bar;
pub mod title_bar;
pub mod toast;

pub use toast::Toast;
