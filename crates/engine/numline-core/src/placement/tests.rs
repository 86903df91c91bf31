use super::*;
use numline_api_core::Range;

fn unit() -> Range {
    Range::new(0.0, 1.0).expect("valid range")
}

fn node(target: f64, on_correct: Branch, on_incorrect: Branch) -> DiagnosticNode {
    DiagnosticNode::new(target, unit(), on_correct, on_incorrect)
}

/// 0 -> (1 | 2); 1 -> (L3 | L2); 2 -> (L2 | L1)
fn ladder() -> DiagnosticGraph {
    DiagnosticGraph::new(
        0,
        vec![
            node(0.5, Branch::Node(1), Branch::Node(2)),
            node(0.75, Branch::Level(3), Branch::Level(2)),
            node(0.25, Branch::Level(2), Branch::Level(1)),
        ],
    )
}

#[test]
fn all_correct_answers_reach_top_level() {
    let graph = ladder();
    graph.validate().expect("ladder is well formed");
    let outcome = run(&graph, |_, n| n.target).expect("walk completes");
    assert_eq!(outcome.level, 3);
    assert_eq!(outcome.passed_levels, vec![1, 2, 3]);
    assert_eq!(outcome.history.len(), 2);
    assert!(outcome.history.iter().all(|s| s.correct));
}

#[test]
fn scripted_walk_is_deterministic() {
    let graph = ladder();
    let first = run(&graph, |_, n| n.target).unwrap();
    for _ in 0..5 {
        assert_eq!(run(&graph, |_, n| n.target).unwrap(), first);
    }
}

#[test]
fn incorrect_answers_follow_the_other_branch() {
    let graph = ladder();
    let outcome = run(&graph, |_, n| n.range.end()).unwrap();
    assert_eq!(outcome.level, 1);
    assert_eq!(outcome.passed_levels, vec![1]);
    let visited: Vec<NodeIndex> = outcome.history.iter().map(|s| s.node).collect();
    assert_eq!(visited, vec![0, 2]);
}

#[test]
fn generous_ratio_accepts_close_answers() {
    let graph = ladder();
    // 0.59 is 0.09 away from 0.5: correct; 0.64 is 0.11 away from 0.75: incorrect.
    let mut script = vec![0.59, 0.64].into_iter();
    let outcome = run(&graph, |_, _| script.next().unwrap_or(0.0)).unwrap();
    assert_eq!(outcome.level, 2);
    assert!(outcome.history[0].correct);
    assert!(!outcome.history[1].correct);
}

#[test]
fn walker_exposes_each_suspension_point() {
    let graph = ladder();
    let mut walker = PlacementWalker::new(&graph).unwrap();
    assert_eq!(walker.current(), 0);
    assert_eq!(walker.current_node(&graph).unwrap().target, 0.5);

    assert_eq!(walker.answer(&graph, 0.5).unwrap(), WalkStep::Continue(1));
    assert_eq!(walker.current(), 1);

    match walker.answer(&graph, 0.0).unwrap() {
        WalkStep::Placed(outcome) => assert_eq!(outcome.level, 2),
        other => panic!("expected placement, got {other:?}"),
    }
    assert!(walker.is_finished());
    assert!(walker.current_node(&graph).is_none());
    assert_eq!(walker.answer(&graph, 0.5), Err(PlacementError::Finished));
}

#[test]
fn walker_rejects_non_finite_answers() {
    let graph = ladder();
    let mut walker = PlacementWalker::new(&graph).unwrap();
    assert!(matches!(
        walker.answer(&graph, f64::NAN),
        Err(PlacementError::InvalidAnswer(_))
    ));
    assert_eq!(walker.current(), 0);
    assert!(walker.history().is_empty());
}

#[test]
fn step_ceiling_stops_cyclic_graph() {
    let graph = DiagnosticGraph::new(
        0,
        vec![
            node(0.5, Branch::Node(1), Branch::Level(1)),
            node(0.5, Branch::Node(0), Branch::Level(1)),
        ],
    );
    assert!(matches!(
        graph.validate(),
        Err(GraphValidationError::Cycle { .. })
    ));
    let err = run(&graph, |_, n| n.target).unwrap_err();
    assert_eq!(err, PlacementError::StepLimitExceeded(graph.step_ceiling()));
}

#[test]
fn empty_and_dangling_graphs() {
    let empty = DiagnosticGraph::default();
    assert_eq!(empty.validate(), Err(GraphValidationError::Empty));
    assert_eq!(
        PlacementWalker::new(&empty).unwrap_err(),
        PlacementError::EmptyGraph
    );

    let dangling = DiagnosticGraph::new(0, vec![node(0.5, Branch::Node(7), Branch::Level(1))]);
    assert_eq!(
        dangling.validate(),
        Err(GraphValidationError::DanglingReference { node: 0, target: 7 })
    );
    assert_eq!(
        run(&dangling, |_, n| n.target).unwrap_err(),
        PlacementError::UnknownNode(7)
    );

    let bad_start = DiagnosticGraph::new(3, ladder().nodes);
    assert!(matches!(
        bad_start.validate(),
        Err(GraphValidationError::StartOutOfBounds { start: 3, len: 3 })
    ));
}

#[test]
fn validation_checks_ratios_and_targets() {
    let mut graph = ladder();
    graph.nodes[1].acceptable_error_ratio = -0.5;
    assert!(matches!(
        graph.validate(),
        Err(GraphValidationError::InvalidErrorRatio { node: 1, .. })
    ));

    let mut graph = ladder();
    graph.nodes[2].target = 4.0;
    assert!(matches!(
        graph.validate(),
        Err(GraphValidationError::TargetOutsideRange { node: 2, .. })
    ));
}

#[test]
fn reachability_and_levels() {
    let mut graph = ladder();
    graph
        .nodes
        .push(node(0.1, Branch::Level(9), Branch::Level(1)));
    let reachable = graph.reachable();
    assert_eq!(reachable.len(), 3);
    assert!(!reachable.contains(&3));
    assert_eq!(graph.max_level(), Some(9));
}

#[test]
fn graph_json_uses_tagged_branches_and_numeric_text() {
    let json = r#"{
        "start": 0,
        "nodes": [
            { "target": "1/2", "range": { "start": 0, "end": "1" },
              "on_correct": { "level": 2 }, "on_incorrect": { "level": 1 } }
        ]
    }"#;
    let graph: DiagnosticGraph = serde_json::from_str(json).unwrap();
    assert_eq!(graph.nodes[0].target, 0.5);
    assert_eq!(graph.nodes[0].acceptable_error_ratio, DEFAULT_DIAGNOSTIC_ERROR_RATIO);
    assert_eq!(graph.nodes[0].on_correct, Branch::Level(2));
    graph.validate().unwrap();

    let encoded = serde_json::to_value(&graph.nodes[0].on_incorrect).unwrap();
    assert_eq!(encoded, serde_json::json!({ "level": 1 }));
}

#[test]
fn dangling_branch_leaves_walker_unchanged() {
    let graph = DiagnosticGraph::new(0, vec![node(0.5, Branch::Node(7), Branch::Level(1))]);
    let mut walker = PlacementWalker::new(&graph).unwrap();
    for _ in 0..2 {
        assert_eq!(walker.answer(&graph, 0.5), Err(PlacementError::UnknownNode(7)));
    }
    assert!(walker.history().is_empty());
    assert_eq!(walker.current(), 0);
    assert!(!walker.is_finished());

    // The other branch is still usable and its history starts clean.
    match walker.answer(&graph, 1.0).unwrap() {
        WalkStep::Placed(outcome) => {
            assert_eq!(outcome.level, 1);
            assert_eq!(outcome.history.len(), 1);
        }
        other => panic!("expected placement, got {other:?}"),
    }
}
