//! Form domain layer
//!
//! Type-safe field values and the generic form state shared by every
//! screen.

mod field;
mod form_state;

pub use field::{FieldError, FormField};
pub use form_state::{EntityForm, Form, FormKind, FormMessage, MessageKind};
