use super::*;
use crate::diagnostics::Diagnostic;
use crate::geometry::bezier::BezierCurve;
use crate::geometry::point::Point2;


fn line(a: Point2, b: Point2) -> BezierCurve {
    let d = (b - a) / 3.0;
    BezierCurve::new(a, a + d, b - d, b)
}

#[test]
fn stitched_groups_feed_the_network() {
    // trunk: (0,0) -> (2,0) -> (4,0), given back to front.
    // branch: (2,0) -> (2,3).
    let inputs = vec![
        (
            "trunk".to_string(),
            vec![
                line(Point2::new(2.0, 0.0), Point2::new(4.0, 0.0)),
                line(Point2::new(0.0, 0.0), Point2::new(2.0, 0.0)),
            ],
        ),
        (
            "branch".to_string(),
            vec![line(Point2::new(2.0, 0.0), Point2::new(2.0, 3.0))],
        ),
    ];
    let mut sink: Vec<Diagnostic> = Vec::new();
    let groups = stitch_groups(&inputs, &mut sink);
    assert!(sink.is_empty());
    assert_eq!(groups[0].ends(), (Point2::new(0.0, 0.0), Point2::new(4.0, 0.0)));

    let ends: Vec<_> = groups
        .iter()
        .map(|g| {
            let (s, e) = g.ends();
            (g.name(), s, e)
        })
        .collect();
    let insertion = BranchInsertion {
        group: "branch".into(),
        parent: "trunk".into(),
        offset: 0.5,
        point: Point2::new(2.0, 0.0),
        parent_location: Point2::new(2.0, 0.0),
        distance: 0.0,
    };
    let net = assemble_network(&ends, &[insertion]);
    assert_eq!(net.edge("trunk").unwrap().labels, ["point_1", "point_3", "point_2"]);
    assert_eq!(net.edge("branch").unwrap().labels, ["point_3", "point_4"]);
}
