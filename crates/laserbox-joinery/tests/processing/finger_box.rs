//! End-to-end checks of the panel sequence produced by the box maker

use approx::assert_relative_eq;
use laserbox_core::Unit;
use laserbox_joinery::{
    BoxOptions, Color, DocumentSink, FingerBoxMaker, JoineryError, Panel, PathPoint, SinkError,
};

const EPS: f64 = 1e-9;

fn px_options() -> BoxOptions {
    BoxOptions {
        unit: Unit::Px,
        ..BoxOptions::default()
    }
}

fn start_of(panel: &Panel) -> PathPoint {
    panel.path.trace()[0]
}

/// Accepts a fixed number of panels, then refuses everything
struct LimitedSink {
    accepted: Vec<Panel>,
    limit: usize,
}

impl DocumentSink for LimitedSink {
    fn insert(&mut self, panel: Panel) -> Result<(), SinkError> {
        if self.accepted.len() == self.limit {
            return Err(SinkError::Rejected {
                label: panel.label().to_string(),
                reason: "document full".to_string(),
            });
        }
        self.accepted.push(panel);
        Ok(())
    }
}

#[test]
fn test_separate_sides_emit_in_order() {
    let maker = FingerBoxMaker::new(px_options()).expect("Failed to create FingerBoxMaker");
    let panels = maker.panels().expect("Failed to generate box");

    let labels: Vec<&str> = panels.iter().map(|p| p.label()).collect();
    assert_eq!(labels, vec!["front", "back", "right", "left", "bottom", "top"]);
    assert!(panels.iter().all(|p| p.path.is_closed()));
    assert!(panels.iter().all(|p| p.style.fill.is_some()));
}

#[test]
fn test_panel_placement() {
    let maker = FingerBoxMaker::new(px_options()).unwrap();
    let panels = maker.panels().unwrap();
    let d = maker.dimensions();

    let expected = [
        (0.0, 0.0),
        (d.outside_width, 0.0),
        (2.0 * d.outside_width, 0.0),
        (2.0 * d.outside_width + d.outside_depth, 0.0),
        (d.thickness, d.outside_height + d.thickness),
        (d.thickness + d.outside_width, d.outside_height + d.thickness),
    ];
    for (panel, (x, y)) in panels.iter().zip(expected) {
        let start = start_of(panel);
        assert_relative_eq!(start.x, x, epsilon = EPS);
        assert_relative_eq!(start.y, y, epsilon = EPS);
    }
    assert_eq!(start_of(&panels[3]), PathPoint::new(260.0, 0.0));
    assert_eq!(start_of(&panels[5]), PathPoint::new(103.0, 53.0));
}

#[test]
fn test_every_panel_closes_on_its_start() {
    for side_indent_count in 1..=6 {
        for include_lid in [true, false] {
            let maker = FingerBoxMaker::new(BoxOptions {
                side_indent_count,
                include_lid,
                ..px_options()
            })
            .unwrap();
            for panel in maker.panels().unwrap() {
                let trace = panel.path.trace();
                let before_close = trace[trace.len() - 2];
                if include_lid || matches!(panel.label(), "bottom" | "top") {
                    assert!(
                        before_close.approx_eq(&trace[0], EPS),
                        "{} with {} side teeth ended at {:?}",
                        panel.label(),
                        side_indent_count,
                        before_close
                    );
                }
            }
        }
    }
}

#[test]
fn test_without_lid_there_is_no_top() {
    let maker = FingerBoxMaker::new(BoxOptions {
        include_lid: false,
        ..px_options()
    })
    .unwrap();
    let panels = maker.panels().unwrap();
    let labels: Vec<&str> = panels.iter().map(|p| p.label()).collect();
    assert_eq!(labels, vec!["front", "back", "right", "left", "bottom"]);
    assert_relative_eq!(maker.dimensions().outside_height, 50.0);
    assert_relative_eq!(maker.dimensions().inside_height, 47.0);
}

#[test]
fn test_generation_is_repeatable() {
    let maker = FingerBoxMaker::new(BoxOptions {
        top_width_indent_count: 4,
        ..px_options()
    })
    .unwrap();
    let first = maker.panels().unwrap();
    let second = maker.panels().unwrap();
    assert_eq!(first, second);
    assert_eq!(maker.warnings().len(), 1);
}

#[test]
fn test_sink_error_stops_generation() {
    let maker = FingerBoxMaker::new(px_options()).unwrap();
    let mut sink = LimitedSink {
        accepted: Vec::new(),
        limit: 2,
    };

    let err = maker.generate(&mut sink).unwrap_err();
    match err {
        JoineryError::Sink(SinkError::Rejected { label, .. }) => assert_eq!(label, "right"),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(sink.accepted.len(), 2);
}

#[test]
fn test_invalid_options_fail_before_generation() {
    let result = FingerBoxMaker::new(BoxOptions {
        thickness: -1.0,
        ..px_options()
    });
    assert!(matches!(result, Err(JoineryError::Parameter(_))));
}

#[test]
fn test_box_options_deserialize_with_defaults() {
    let options: BoxOptions =
        serde_json::from_str(r#"{ "thickness": 4.0, "unit": "in", "merge_sides": true }"#)
            .unwrap();
    assert_eq!(options.thickness, 4.0);
    assert_eq!(options.unit, Unit::In);
    assert!(options.merge_sides);
    assert_eq!(options.side_indent_count, 5);
    assert!(options.include_lid);
}

#[test]
fn test_configured_colours_reach_every_panel() {
    let options: BoxOptions = serde_json::from_str(
        r##"{ "unit": "px", "merge_sides": true,
              "stroke_color": "4278190335", "fill_color": "#00FF00" }"##,
    )
    .unwrap();
    let maker = FingerBoxMaker::new(options).unwrap();
    let panels = maker.panels().unwrap();

    let red = Color::rgb(0xFF, 0, 0);
    let green = Color::rgb(0, 0xFF, 0);
    for panel in &panels {
        assert_eq!(panel.style.stroke, red, "{}", panel.label());
        match panel.label() {
            "cut0" | "cut1" | "cut2" => assert_eq!(panel.style.fill, None),
            _ => assert_eq!(panel.style.fill, Some(green)),
        }
    }
}
