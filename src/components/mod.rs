//! Reusable UI components.

pub mod graph_canvas;
pub mod modal;
pub mod project_card;
pub mod property_list;
pub mod toast;
