//! Point statements between an open sheathing panel and a routing

use wupkit_parser::{parse_wup, Layer, RoutingSegment, UnhandledReason};

#[test]
fn test_points_after_routing_header_stay_on_panel() {
    let model = parse_wup(
        "ELM 2400,2400; PLA 1200,2400,12,0,0,0 OSB; PAF 1; PP 0,0; PP 1200,0; PP 1200,2400; NR 10,10,10,2000,150;",
    )
    .unwrap();

    let panel = &model.panels[0];
    assert_eq!(panel.material.as_deref(), Some("OSB"));
    assert_eq!(panel.points.len(), 3);
    assert_eq!(panel.statement_indices, vec![1, 3, 4, 5]);

    assert!(model.routings.is_empty());
    assert_eq!(model.unhandled.len(), 1);
    assert_eq!(model.unhandled[0].reason, UnhandledReason::EmptyRouting);
    assert_eq!(model.unhandled[0].statement_index, 2);

    assert_eq!(model.nail_rows[0].layer, Some(Layer::Outer));
    assert_eq!(model.nail_rows[0].nail_count(), Some(14));
}

#[test]
fn test_member_closes_panel_for_routing() {
    let model = parse_wup(
        "ELM 2400,2400; PLA 1200,2400,12,0,0,0; QS 2400,38,0,0,0; PAF; PP 10,10; PP 50,10; ENDMODUL;",
    )
    .unwrap();

    assert!(model.panels[0].points.is_empty());
    let routing = &model.routings[0];
    assert_eq!(routing.statement_indices, vec![3, 4, 5]);
    assert!(matches!(routing.segments[0], RoutingSegment::Polyline(_)));
}

#[test]
fn test_layer_survives_panel_end() {
    let model =
        parse_wup("ELM 2400,2400; PLI 1200,2400,12,0,0,0; QS 2400,38,0,0,0; NR 0,0,0,100;").unwrap();
    assert_eq!(model.nail_rows[0].layer, Some(Layer::Inner));

    let bare = parse_wup("ELM 2400,2400; NR 0,0,0,100;").unwrap();
    assert_eq!(bare.nail_rows[0].layer, None);
}

#[test]
fn test_unknown_command_finalizes_routing() {
    let model = parse_wup("ELM 500,500; PAF; KRS 100,100,10; XYZ 1; KRS 50,50,5;").unwrap();
    assert_eq!(model.routings.len(), 1);
    assert_eq!(model.routings[0].segments.len(), 1);
    let reasons: Vec<_> = model.unhandled.iter().map(|u| &u.reason).collect();
    assert_eq!(
        reasons,
        vec![&UnhandledReason::UnknownCommand, &UnhandledReason::InvalidContext]
    );
}

#[test]
fn test_short_statement_keeps_routing_open() {
    let model = parse_wup("ELM 500,500; PAF; KRS 100,100,10; KRS 1,2; KRS 200,200,10;").unwrap();
    assert_eq!(model.routings.len(), 1);
    assert_eq!(model.routings[0].segments.len(), 2);
    assert_eq!(model.routings[0].statement_indices, vec![1, 2, 4]);
}

#[test]
fn test_new_routing_header_finalizes_previous() {
    let model = parse_wup("ELM 500,500; PAF 1; KRS 100,100,10; PAF 2; PP 0,0; PP 10,0;").unwrap();
    assert_eq!(model.routings.len(), 2);
    assert_eq!(model.routings[0].tool, Some(1.0));
    assert_eq!(model.routings[1].tool, Some(2.0));
    assert_eq!(model.routings[1].statement_indices, vec![3, 4, 5]);
}
