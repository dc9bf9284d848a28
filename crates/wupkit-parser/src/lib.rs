//! # WupKit Parser
//!
//! Parsing and geometric reconstruction for WUP wall-panel machine files.
//! Turns statement text into a [`WallModel`] and serializes it back without
//! disturbing untouched lines.

pub mod error;
pub mod geometry;
pub mod model;
pub mod options;
pub mod wup;

pub use error::{ParseError, ParseResult};
pub use geometry::{
    solve_arc, ArcDirection, ArcFlag, ArcSegment, ArcSize, ArcSolver, AssembledPath,
    PathAssembler, PathCommand, PathSegment,
};
pub use model::{
    CircleCut, CutAttributes, DrillDirection, DrillOperation, DrillTarget, EditorId, EntityRef,
    Layer, MemberKind, Module, ModelSummary, NailRow, Orientation, PafRouting, PathCut,
    PlateRole, RoutingSegment, SheathingPanel, StructuralRect, UnhandledReason,
    UnhandledStatement, Wall, WallModel,
};
pub use options::ParserOptions;
pub use wup::{
    parse_wup, serialize, split_statements, CommandKind, Statement, WupParser,
    EMPTY_DOCUMENT_MARKER,
};
