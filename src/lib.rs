//! # WupKit
//!
//! Parser, geometric model and line-preserving editor for WUP wall-panel
//! machine files.
//!
//! ## Architecture
//!
//! WupKit is organized as a workspace with multiple crates:
//!
//! 1. **wupkit-core** - Points, bounds tracking, tolerances, shared errors
//! 2. **wupkit-parser** - Tokenizer, arc solver, path assembler, model builder, serializer
//! 3. **wupkit-editor** - Id-based translate/delete with statement rewrites
//! 4. **wupkit-settings** - Parser, editor and output configuration
//! 5. **wupkit** - Library re-exports and the `wupkit` binary

pub mod commands;

pub use wupkit_core::{Bounds2D, Error, Point2D, Point3D, Result};
pub use wupkit_editor::{
    EditStrategy, EditorError, EditorOptions, EditorResult, ModelHandle, WallEditor,
};
pub use wupkit_parser::{
    parse_wup, serialize, ArcSegment, DrillOperation, EditorId, EntityRef, NailRow, PafRouting,
    ParseError, ParserOptions, RoutingSegment, SheathingPanel, StructuralRect, WallModel,
    WupParser,
};
pub use wupkit_settings::{default_config_path, Config, OutputSettings, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr so command output on stdout stays clean
/// - RUST_LOG environment variable support, `warn` otherwise
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
