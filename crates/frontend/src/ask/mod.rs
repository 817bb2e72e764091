//! Ask UI Module (MVVM Standard)
//!
//! Structure:
//! - model.rs: file reading, the generateContent call, Answer
//! - view_model.rs: AskPageVm with RwSignals and ResponseState
//! - view.rs: Main component AskPage
//! - file_drop.rs: Drag-and-drop / click-to-browse file picker

mod file_drop;
mod model;
mod view;
mod view_model;

pub use file_drop::FileDropZone;
pub use view::AskPage;
pub use view_model::{AskPageVm, ResponseState};
