//! Form rendering

mod entity_form;
mod field_renderer;

pub use entity_form::draw;
