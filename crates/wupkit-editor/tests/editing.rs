//! Translate, delete and re-parse through the editor

use wupkit_editor::{EditStrategy, EditorError, EditorOptions, WallEditor};
use wupkit_parser::{EntityRef, ParseError, RoutingSegment, WupParser};

const DOC: &str = "ELM 2400,2600;
QS 2480,60,0,100,60;
NR 10, 10, 10, 2590, 150;
PAF 1;
PP 500,800,-15;
PP 700,800,-15;
KB 700,1000,100,-15,-0;
PP 500,1000,-15;
PP 500,800,-15;
BOY 30,40,20,-60;";

const ROW: u64 = 1;
const DRILL: u64 = 2;
const ROUTING: u64 = 3;

fn editor(strategy: EditStrategy) -> WallEditor {
    let options = EditorOptions {
        strategy,
        ..Default::default()
    };
    let mut editor = WallEditor::from_text(DOC, WupParser::default(), options).unwrap();
    editor.assign_editor_ids();
    editor
}

fn statement(editor: &WallEditor, index: usize) -> Option<&str> {
    editor.model().statements[index].as_deref()
}

#[test]
fn test_ids_follow_collection_order() {
    let mut editor = editor(EditStrategy::Patch);
    assert_eq!(editor.locate(ROW).unwrap(), EntityRef::NailRow(0));
    assert_eq!(editor.locate(DRILL).unwrap(), EntityRef::Drilling(0));
    assert_eq!(editor.locate(ROUTING).unwrap(), EntityRef::Routing(0));

    let generation = editor.generation();
    editor.assign_editor_ids();
    assert_eq!(editor.generation(), generation);
    assert_eq!(editor.model().next_id, 4);
}

#[test]
fn test_translate_nail_row_rewrites_its_line() {
    let mut editor = editor(EditStrategy::Patch);
    let generation = editor.generation();
    editor.translate(ROW, 5.5, -10.0).unwrap();

    assert_eq!(editor.generation(), generation + 1);
    assert_eq!(statement(&editor, 2), Some("NR 15.5, 0, 15.5, 2580, 150"));
    let row = &editor.model().nail_rows[0];
    assert_eq!((row.start.x, row.start.y), (15.5, 0.0));
    assert_eq!((row.end.x, row.end.y), (15.5, 2580.0));
    assert_eq!(row.editor_id, Some(ROW));
}

#[test]
fn test_translate_drilling_moves_along_x_only() {
    let mut editor = editor(EditStrategy::Patch);
    let before = editor.model().drillings[0].position;
    assert_eq!((before.x, before.y), (130.0, 2540.0));

    editor.translate(DRILL, 12.25, 99.0).unwrap();
    assert_eq!(statement(&editor, 9), Some("BOY 42.25,40,20,-60"));
    let drill = &editor.model().drillings[0];
    assert_eq!(drill.local_x, 42.25);
    assert_eq!(drill.position.x, 142.25);
    assert_eq!(drill.position.y, 2540.0);
}

#[test]
fn test_translate_routing_keeps_header_and_flags() {
    let mut editor = editor(EditStrategy::Patch);
    editor.translate(ROUTING, 100.0, 0.0).unwrap();

    assert_eq!(statement(&editor, 3), Some("PAF 1"));
    assert_eq!(statement(&editor, 4), Some("PP 600,800,-15"));
    assert_eq!(statement(&editor, 6), Some("KB 800,1000,100,-15,-0"));
    assert_eq!(statement(&editor, 8), Some("PP 600,800,-15"));

    let RoutingSegment::Polygon(cut) = &editor.model().routings[0].segments[0] else {
        panic!("expected a polygon");
    };
    assert_eq!(cut.points[0].x, 600.0);
    let arc = cut
        .path
        .iter()
        .find_map(|segment| match segment {
            wupkit_parser::PathSegment::Arc(arc) => Some(arc),
            _ => None,
        })
        .unwrap();
    assert!((arc.center.x - 800.0).abs() < 1e-9);
    assert!((arc.center.y - 900.0).abs() < 1e-9);
}

#[test]
fn test_patch_and_reparse_agree() {
    let mut patched = editor(EditStrategy::Patch);
    let mut reparsed = editor(EditStrategy::Reparse);
    for editor in [&mut patched, &mut reparsed] {
        editor.translate(ROW, 5.5, -10.0).unwrap();
        editor.translate(DRILL, 12.25, 0.0).unwrap();
        editor.translate(ROUTING, 100.0, 50.0).unwrap();
    }

    let (a, b) = (patched.model(), reparsed.model());
    assert_eq!(a.statements, b.statements);
    assert_eq!(a.nail_rows, b.nail_rows);
    assert_eq!(a.drillings, b.drillings);
    assert_eq!(a.next_id, b.next_id);

    let points = |model: &wupkit_parser::WallModel| match &model.routings[0].segments[0] {
        RoutingSegment::Polygon(cut) => cut.points.clone(),
        other => panic!("unexpected segment {:?}", other),
    };
    let (pa, pb) = (points(a), points(b));
    assert_eq!(pa.len(), pb.len());
    for (p, q) in pa.iter().zip(&pb) {
        assert!(p.approx_eq(q, 1e-6), "{} vs {}", p, q);
    }
    assert!((a.bounds.max_y - b.bounds.max_y).abs() < 1e-6);
}

#[test]
fn test_ids_survive_reparse_edits() {
    let mut editor = editor(EditStrategy::Reparse);
    editor.translate(ROW, 1.0, 1.0).unwrap();
    editor.translate(ROUTING, 1.0, 1.0).unwrap();
    assert_eq!(editor.locate(ROW).unwrap(), EntityRef::NailRow(0));
    assert_eq!(editor.locate(ROUTING).unwrap(), EntityRef::Routing(0));
    assert_eq!(editor.locate(DRILL).unwrap(), EntityRef::Drilling(0));
    assert_eq!(editor.model().next_id, 4);
}

#[test]
fn test_delete_routing_nulls_all_its_statements() {
    for strategy in [EditStrategy::Patch, EditStrategy::Reparse] {
        let mut editor = editor(strategy);
        editor.delete(ROUTING).unwrap();

        assert!(editor.model().routings.is_empty());
        for index in 3..=8 {
            assert_eq!(statement(&editor, index), None);
        }
        assert_eq!(editor.to_wup().lines().count(), 4);
        assert_eq!(editor.locate(ROUTING), Err(EditorError::EntityNotFound(ROUTING)));
        assert_eq!(editor.locate(DRILL).unwrap(), EntityRef::Drilling(0));
        assert_eq!(editor.model().drillings[0].target.unwrap().element_index, 0);
    }
}

#[test]
fn test_delete_nail_row_shrinks_bounds() {
    let mut editor =
        WallEditor::from_text("ELM 100,100; NR 0,0,500,0;", WupParser::default(), EditorOptions::default())
            .unwrap();
    editor.assign_editor_ids();
    assert_eq!(editor.model().bounds.max_x, 500.0);
    editor.delete(1).unwrap();
    assert_eq!(editor.model().bounds.max_x, 100.0);
    assert_eq!(editor.to_wup(), "ELM 100,100;");
}

#[test]
fn test_failed_edits_leave_model_alone() {
    let mut editor = editor(EditStrategy::Patch);
    let generation = editor.generation();
    let text = editor.to_wup();

    assert_eq!(
        editor.translate(99, 1.0, 1.0),
        Err(EditorError::EntityNotFound(99))
    );
    editor.delete(ROUTING).unwrap();
    assert_eq!(
        editor.delete(ROUTING),
        Err(EditorError::EntityNotFound(ROUTING))
    );
    assert_eq!(editor.generation(), generation + 1);
    assert_ne!(editor.to_wup(), text);
}

#[test]
fn test_mixed_separators_translate() {
    let mut editor = WallEditor::from_text(
        "ELM 100,100; NR 10 10, 10 20, 150;",
        WupParser::default(),
        EditorOptions::default(),
    )
    .unwrap();
    editor.assign_editor_ids();

    editor.translate(1, 1.0, 2.5).unwrap();
    assert_eq!(
        editor.model().statements[1].as_deref(),
        Some("NR 11 12.5, 11 22.5, 150")
    );
    let row = &editor.model().nail_rows[0];
    assert_eq!((row.start.x, row.start.y), (11.0, 12.5));
}

#[test]
fn test_malformed_statement_declines_translate() {
    let mut editor = WallEditor::from_text(
        "ELM 100,100; NR 10,,10,20,30;",
        WupParser::default(),
        EditorOptions::default(),
    )
    .unwrap();
    editor.assign_editor_ids();
    let generation = editor.generation();

    let err = editor.translate(1, 1.0, 1.0).unwrap_err();
    assert_eq!(
        err,
        EditorError::MalformedStatement {
            index: 1,
            reason: "token 1 is not a number".to_string()
        }
    );
    assert_eq!(editor.generation(), generation);
    assert_eq!(editor.model().statements[1].as_deref(), Some("NR 10,,10,20,30"));
}

#[test]
fn test_replace_statement_reparses() {
    let mut editor = editor(EditStrategy::Patch);
    editor.replace_statement(2, "NR 0,0,0,100;").unwrap();
    assert_eq!(statement(&editor, 2), Some("NR 0,0,0,100"));
    let row = &editor.model().nail_rows[0];
    assert_eq!(row.end.y, 100.0);
    assert_eq!(row.editor_id, Some(ROW));

    editor.replace_statement(9, "  ").unwrap();
    assert!(editor.model().drillings.is_empty());
    assert_eq!(editor.locate(DRILL), Err(EditorError::EntityNotFound(DRILL)));

    assert_eq!(
        editor.replace_statement(50, "NR 0,0,1,1"),
        Err(EditorError::StatementOutOfRange { index: 50, len: 10 })
    );
}

#[test]
fn test_replace_statement_rejects_empty_geometry() {
    let mut editor =
        WallEditor::from_text("ELM 100,100;", WupParser::default(), EditorOptions::default()).unwrap();
    let err = editor.replace_statement(0, "XYZ 1").unwrap_err();
    assert_eq!(err, EditorError::Parse(ParseError::NoGeometry { statements: 1 }));
    assert_eq!(editor.to_wup(), "ELM 100,100;");
    assert_eq!(editor.generation(), 0);
}

#[test]
fn test_reparse_is_a_no_op_on_clean_model() {
    let mut editor = editor(EditStrategy::Patch);
    let before = editor.model().clone();
    editor.reparse().unwrap();
    assert_eq!(editor.model().nail_rows, before.nail_rows);
    assert_eq!(editor.model().routings, before.routings);
    assert_eq!(editor.model().next_id, before.next_id);
}
