//! Every entity coordinate lies inside the model bounds

use wupkit_parser::{parse_wup, RoutingSegment, WallModel};

const TOLERANCE: f64 = 1e-9;

fn assert_inside(model: &WallModel, x: f64, y: f64) {
    assert!(
        model.bounds.contains(x, y, TOLERANCE),
        "({}, {}) outside {:?}",
        x,
        y,
        model.bounds
    );
}

fn check_model(model: &WallModel) {
    assert!(model.bounds.is_valid());
    for rect in &model.structural {
        assert_inside(model, rect.x, rect.y);
        assert_inside(model, rect.right(), rect.top());
    }
    for panel in &model.panels {
        assert_inside(model, panel.origin.x, panel.origin.y);
        for point in &panel.points {
            assert_inside(model, point.x, point.y);
        }
    }
    for row in &model.nail_rows {
        assert_inside(model, row.start.x, row.start.y);
        assert_inside(model, row.end.x, row.end.y);
    }
    for drill in &model.drillings {
        assert_inside(model, drill.position.x, drill.position.y);
    }
    for segment in model.routings.iter().flat_map(|r| &r.segments) {
        match segment {
            RoutingSegment::Circle(circle) => {
                assert_inside(model, circle.center.x - circle.radius, circle.center.y);
                assert_inside(model, circle.center.x + circle.radius, circle.center.y);
            }
            RoutingSegment::Polygon(cut) | RoutingSegment::Polyline(cut) => {
                for point in &cut.points {
                    assert_inside(model, point.x, point.y);
                }
            }
        }
    }
}

#[test]
fn test_entities_outside_wall_grow_bounds() {
    let model = parse_wup(
        "ELM 1000,1000;
         MODUL 600,1000,90,900,0,0;
         QS 1000,38,0,500,0;
         ENDMODUL;
         NR -50,10,-50,1200;
         PAF; KRS 1100,500,80;
         PAF; PP 0,1100; KB 200,1100,100,-5,-0; PP 200,1300;
         BOY 0,0,40,10;",
    )
    .unwrap();

    check_model(&model);
    assert_eq!(model.bounds.min_x, -50.0);
    assert_eq!(model.bounds.max_x, 1500.0);
    assert!(model.bounds.max_y >= 1300.0);
}

#[test]
fn test_recomputed_bounds_match_parse() {
    let mut model = parse_wup(
        "ELM 2400,2600; QS 2480,60,0,0,60; PLA 1250,2600,15,0,0,0; PP 0,0; PP -20,2700;
         NR 10,10,10,2590; PAF; PP 500,800; PP 700,800; KB 700,1000,100,-15,-0; KRS 1800,1300,40;
         BOY 30,40,20,-60;",
    )
    .unwrap();
    let parsed = model.bounds;
    model.recompute_bounds();
    assert_eq!(model.bounds, parsed);
    check_model(&model);
}

#[test]
fn test_unhandled_statements_do_not_grow_bounds() {
    let model = parse_wup("ELM 100,100; PP 5000,5000; XYZ -900,-900;").unwrap();
    assert_eq!(model.bounds.max_x, 100.0);
    assert_eq!(model.bounds.min_x, 0.0);
}
