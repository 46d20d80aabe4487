//! Rendering a generated box into an SVG document

use laserbox_core::Unit;
use laserbox_joinery::{BoxOptions, FingerBoxMaker, SvgDocument};

#[test]
fn test_svg_contains_every_panel() {
    let maker = FingerBoxMaker::new(BoxOptions {
        unit: Unit::Px,
        merge_sides: true,
        ..BoxOptions::default()
    })
    .unwrap();

    let mut doc = SvgDocument::new().with_layer("LaserBox");
    maker.generate(&mut doc).unwrap();
    assert_eq!(doc.panels().len(), 6);

    let svg = doc.to_svg_string();
    for label in ["sides", "cut0", "cut1", "cut2", "bottom", "top"] {
        assert!(
            svg.contains(&format!("inkscape:label=\"{}\"", label)),
            "missing {}",
            label
        );
    }
    assert_eq!(svg.matches("fill:none").count(), 3);
    assert_eq!(svg.matches("fill:#808080").count(), 3);
    assert!(svg.contains("stroke-width:0.1"));
    assert!(svg.contains("d=\"M 0.000000,0.000000 l "));
}

#[test]
fn test_svg_coordinates_use_six_decimals() {
    let maker = FingerBoxMaker::new(BoxOptions {
        unit: Unit::Px,
        ..BoxOptions::default()
    })
    .unwrap();
    let mut doc = SvgDocument::new();
    maker.generate(&mut doc).unwrap();

    let svg = doc.to_svg_string();
    assert!(svg.contains("M 100.000000,0.000000"));
    assert!(svg.contains("M 3.000000,53.000000"));
}

#[test]
fn test_write_svg_to_file() {
    let maker = FingerBoxMaker::new(BoxOptions::default()).unwrap();
    let mut doc = SvgDocument::new();
    maker.generate(&mut doc).unwrap();

    let mut buffer = Vec::new();
    doc.write_to(&mut buffer).unwrap();
    let text = String::from_utf8(buffer).unwrap();
    assert!(text.starts_with("<?xml"));
    assert_eq!(text.matches("<path ").count(), 6);
}
