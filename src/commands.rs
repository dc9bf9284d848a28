//! Implementations behind the `wupkit` subcommands.

use anyhow::{Context, Result};
use std::fmt::Write;
use wupkit_editor::{EditStrategy, WallEditor};
use wupkit_parser::{EditorId, EntityRef, RoutingSegment, WallModel, WupParser};
use wupkit_settings::{Config, OutputSettings};

/// Parse `text` with the configured options and assign editor ids
pub fn open_editor(text: &str, config: &Config) -> Result<WallEditor> {
    let parser = WupParser::new(config.parser.clone());
    let mut editor = WallEditor::from_text(text, parser, config.editor.clone())
        .context("Failed to parse WUP input")?;
    editor.assign_editor_ids();
    Ok(editor)
}

/// Human readable summary of a model
pub fn inspect(model: &WallModel, output: &OutputSettings) -> Result<String> {
    let summary = model.summary();
    let mut out = String::new();

    writeln!(out, "statements: {}", summary.statements)?;
    match &model.wall {
        Some(wall) => writeln!(
            out,
            "wall: {} x {} x {} (side {:+})",
            wall.width, wall.height, wall.thickness, wall.side
        )?,
        None => writeln!(out, "wall: none")?,
    }
    writeln!(out, "modules: {}", summary.modules)?;
    writeln!(
        out,
        "members: {} studs, {} blockings, {} plates",
        summary.studs, summary.blockings, summary.plates
    )?;
    writeln!(out, "panels: {}", summary.panels)?;

    writeln!(out, "nail rows: {}", summary.nail_rows)?;
    for row in &model.nail_rows {
        writeln!(
            out,
            "  {} {} -> {}",
            id_label(row.editor_id),
            row.start,
            row.end
        )?;
    }

    writeln!(
        out,
        "routings: {} ({} segments)",
        summary.routings, summary.routing_segments
    )?;
    for routing in &model.routings {
        let kinds: Vec<&str> = routing
            .segments
            .iter()
            .map(|segment| match segment {
                RoutingSegment::Circle(_) => "circle",
                RoutingSegment::Polygon(_) => "polygon",
                RoutingSegment::Polyline(_) => "polyline",
            })
            .collect();
        writeln!(
            out,
            "  {} statements {:?}: {}",
            id_label(routing.editor_id),
            routing.statement_indices,
            kinds.join(", ")
        )?;
    }

    writeln!(out, "drillings: {}", summary.drillings)?;
    for drill in &model.drillings {
        let target = drill
            .target
            .map(|t| format!("{} #{}", t.kind, t.element_index))
            .unwrap_or_else(|| "no target".to_string());
        writeln!(
            out,
            "  {} {} d={} depth={} ({})",
            id_label(drill.editor_id),
            drill.position,
            drill.diameter,
            drill.depth,
            target
        )?;
    }

    if model.bounds.is_valid() {
        writeln!(
            out,
            "bounds: x [{:.3}, {:.3}] y [{:.3}, {:.3}]",
            model.bounds.min_x, model.bounds.max_x, model.bounds.min_y, model.bounds.max_y
        )?;
    }

    writeln!(out, "unhandled: {}", summary.unhandled)?;
    if output.show_unhandled {
        for entry in &model.unhandled {
            writeln!(
                out,
                "  [{}] {} {} ({:?})",
                entry.statement_index, entry.command, entry.body, entry.reason
            )?;
        }
    }
    Ok(out)
}

fn id_label(id: Option<EditorId>) -> String {
    id.map(|id| format!("#{}", id))
        .unwrap_or_else(|| "#-".to_string())
}

/// Model as JSON
pub fn to_json(model: &WallModel, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(model)?
    } else {
        serde_json::to_string(model)?
    };
    Ok(json)
}

/// Move one entity and return the edited document
pub fn translate(
    editor: &mut WallEditor,
    id: EditorId,
    dx: f64,
    dy: f64,
    reparse: bool,
) -> Result<String> {
    if reparse {
        editor.set_strategy(EditStrategy::Reparse);
    }
    editor
        .translate(id, dx, dy)
        .with_context(|| format!("Failed to translate entity {}", id))?;
    Ok(editor.to_wup())
}

/// Delete one entity and return the edited document
pub fn delete(editor: &mut WallEditor, id: EditorId) -> Result<String> {
    let entity = editor.locate(id)?;
    editor
        .delete(id)
        .with_context(|| format!("Failed to delete {}", describe(entity)))?;
    Ok(editor.to_wup())
}

fn describe(entity: EntityRef) -> String {
    match entity {
        EntityRef::NailRow(i) => format!("nail row {}", i),
        EntityRef::Drilling(i) => format!("drilling {}", i),
        EntityRef::Routing(i) => format!("routing {}", i),
    }
}
