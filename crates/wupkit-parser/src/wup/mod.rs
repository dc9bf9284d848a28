//! WUP text handling: statements, commands and the model builder.

pub mod command;
pub mod parser;
pub mod resolve;
pub mod serializer;
pub mod state;
pub mod statement;

pub use command::CommandKind;
pub use parser::{parse_wup, WupParser};
pub use serializer::{serialize, EMPTY_DOCUMENT_MARKER};
pub use statement::{is_numeric_token, parse_number, split_statements, Statement};
