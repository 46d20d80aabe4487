//! The unrolled wall strip and its seam lines

use approx::assert_relative_eq;
use laserbox_core::Unit;
use laserbox_joinery::{BoxOptions, FingerBoxMaker, PathPoint};

fn merged_options() -> BoxOptions {
    BoxOptions {
        unit: Unit::Px,
        merge_sides: true,
        ..BoxOptions::default()
    }
}

#[test]
fn test_merged_emits_strip_then_cuts() {
    let maker = FingerBoxMaker::new(merged_options()).unwrap();
    let panels = maker.panels().unwrap();

    let labels: Vec<&str> = panels.iter().map(|p| p.label()).collect();
    assert_eq!(labels, vec!["sides", "cut0", "cut1", "cut2", "bottom", "top"]);

    for cut in &panels[1..4] {
        assert!(cut.style.fill.is_none());
        assert!(!cut.path.is_closed());
    }
    assert!(panels[0].style.fill.is_some());
    assert!(panels[0].path.is_closed());
}

#[test]
fn test_seam_positions() {
    let maker = FingerBoxMaker::new(merged_options()).unwrap();
    let panels = maker.panels().unwrap();
    let d = maker.dimensions();

    let width_run = d.inside_width + d.thickness;
    let depth_run = d.inside_depth + d.thickness;
    let expected = [width_run, 2.0 * width_run, 2.0 * width_run + depth_run];
    for (cut, x) in panels[1..4].iter().zip(expected) {
        assert_eq!(cut.path.trace()[0], PathPoint::new(x, 0.0));
    }
    assert_eq!(expected, [97.0, 194.0, 251.0]);
}

/// Each wall run advances `inside + t`, so the strip spans
/// `2(iw+t) + 2(id+t)` plus one thickness for the teeth of the closing edge,
/// four thicknesses short of `2ow + 2od + t`.
#[test]
fn test_strip_width() {
    let maker = FingerBoxMaker::new(merged_options()).unwrap();
    let panels = maker.panels().unwrap();
    let d = maker.dimensions();

    let bounds = panels[0].path.bounds().unwrap();
    assert_relative_eq!(
        bounds.width(),
        2.0 * (d.inside_width + d.thickness) + 2.0 * (d.inside_depth + d.thickness) + d.thickness,
        epsilon = 1e-9
    );
    assert_relative_eq!(bounds.height(), d.outside_height, epsilon = 1e-9);
}

#[test]
fn test_bottom_row_follows_strip() {
    let maker = FingerBoxMaker::new(merged_options()).unwrap();
    let panels = maker.panels().unwrap();
    assert_eq!(panels[4].path.trace()[0], PathPoint::new(3.0, 53.0));
    assert_eq!(panels[5].path.trace()[0], PathPoint::new(103.0, 53.0));
}
