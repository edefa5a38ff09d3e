mod gesture;
mod stack;
mod undoable;


pub use gesture::{GestureFamily, GestureState, SessionId};
pub use stack::{PushOutcome, StackState, UndoStack};
pub use undoable::Undoable;
