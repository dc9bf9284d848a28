//! # WupKit Editor
//!
//! Line-accurate edits of a parsed [`WallModel`](wupkit_parser::WallModel).
//!
//! Entities are located by editor id only. Every edit rewrites the
//! statements behind the entity and then either patches the model or
//! re-parses the whole document, depending on [`EditStrategy`]. The result
//! is swapped into a [`ModelHandle`] as a fresh snapshot.
//!
//! ```rust,ignore
//! use wupkit_editor::{EditorOptions, WallEditor};
//! use wupkit_parser::WupParser;
//!
//! let mut editor = WallEditor::from_text(text, WupParser::default(), EditorOptions::default())?;
//! editor.assign_editor_ids();
//! editor.translate(1, 10.0, 0.0)?;
//! println!("{}", editor.to_wup());
//! ```

mod editor;
pub mod error;
mod handle;
mod options;

pub use editor::WallEditor;
pub use error::{EditorError, EditorResult};
pub use handle::ModelHandle;
pub use options::{format_number, EditStrategy, EditorOptions};
