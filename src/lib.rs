//! Scrawlpad Core Library
//!
//! Platform-agnostic shape model, hit-testing, interaction state machine and
//! undo history for a hand-drawn diagram editor. The embedding shell owns
//! the window, the toolbar and the paint loop; it reduces its native events
//! to [`input`] types, feeds them to an [`Editor`], and after every call
//! repaints the [`Editor::shapes`] snapshot by stroking each element's
//! [`Element::drawable`] descriptor.

mod drawable;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod history;
pub mod hit;
pub mod input;
pub mod shapes;

pub use editor::{Action, Editor, Tool};
pub use error::EditorError;
pub use history::History;
pub use hit::{CursorKind, Position, cursor_for, element_at, position_within};
pub use input::{KeyEvent, Modifiers, MouseButton, PointerEvent};
pub use shapes::{Element, ElementId, ShapeKind, SketchStyle, update_element};
