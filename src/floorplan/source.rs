//! Floorplan parsing.
//!
//! A floor is described by an SVG document whose named drawing layers carry
//! the markers the map needs: amenity icons, department zones, space and
//! gallery labels, landmark labels. Positions come out in authoring units,
//! with every ancestor `transform` applied.

use super::records::{normalize_name, AmenityType, FloorplanRecords, LandmarkKind, LandmarkRecord};
use crate::{
    core::{bounds::Bounds, geo::Point},
    traits::MatrixTransform,
    MapError, Result,
};
use roxmltree::{Document, Node};
use std::path::Path;

const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

type Matrix = [f64; 6];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LayerKind {
    Amenities,
    Departments,
    Spaces,
    Landmarks,
    Galleries,
}

impl LayerKind {
    fn from_id(id: &str) -> Option<Self> {
        match normalize_name(id).as_str() {
            "amenities" | "amenity" | "icons" => Some(LayerKind::Amenities),
            "departments" | "department" => Some(LayerKind::Departments),
            "spaces" | "space" | "rooms" => Some(LayerKind::Spaces),
            "landmarks" | "landmark" => Some(LayerKind::Landmarks),
            "galleries" | "gallery" => Some(LayerKind::Galleries),
            _ => None,
        }
    }
}

/// Parses per-floor vector descriptions into landmark records
#[derive(Debug, Default, Clone, Copy)]
pub struct FloorplanSource;

impl FloorplanSource {
    /// Reads and parses a floorplan file
    pub fn load(path: impl AsRef<Path>, floor: usize) -> Result<FloorplanRecords> {
        let path = path.as_ref();
        let svg = std::fs::read_to_string(path)?;
        log::info!("parsing floorplan {} for floor {}", path.display(), floor);
        Self::parse(&svg, floor)
    }

    /// Parses an SVG document. Only malformed XML is an error; unknown
    /// markers are skipped and counted in [`FloorplanRecords::skipped`].
    pub fn parse(svg: &str, floor: usize) -> Result<FloorplanRecords> {
        let document = Document::parse(svg)
            .map_err(|e| MapError::ParseError(format!("floor {}: {}", floor, e)))?;
        let root = document.root_element();

        let mut parser = Parser {
            records: FloorplanRecords::empty(floor),
        };
        parser.records.view_box = parse_view_box(&root);
        parser.walk_for_layers(root, Point::identity_matrix());

        let records = parser.records;
        if records.skipped > 0 {
            log::warn!(
                "floor {}: skipped {} unsupported floorplan markers",
                floor,
                records.skipped
            );
        }
        log::debug!("floor {}: parsed {} landmark records", floor, records.len());
        Ok(records)
    }
}

struct Parser {
    records: FloorplanRecords,
}

impl Parser {
    /// Finds recognised layer groups anywhere in the tree
    fn walk_for_layers(&mut self, node: Node<'_, '_>, ctm: Matrix) {
        for child in node.children().filter(|n| n.is_element()) {
            let child_ctm = Point::combine_matrices(&ctm, &own_transform(&child));
            let layer = if child.has_tag_name("g") {
                child.attribute("id").and_then(LayerKind::from_id)
            } else {
                None
            };

            match layer {
                Some(LayerKind::Amenities) => self.walk_amenities(child, child_ctm, None),
                Some(kind) => self.walk_labels(child, child_ctm, kind),
                None => self.walk_for_layers(child, child_ctm),
            }
        }
    }

    fn walk_amenities(&mut self, group: Node<'_, '_>, ctm: Matrix, inherited: Option<AmenityType>) {
        for child in group.children().filter(|n| n.is_element()) {
            let named = marker_name(&child).map(|name| name.parse::<AmenityType>());
            let amenity = match &named {
                Some(Ok(amenity)) => Some(*amenity),
                _ => inherited,
            };

            if child.has_tag_name("g") && has_named_markers(&child) {
                let child_ctm = Point::combine_matrices(&ctm, &own_transform(&child));
                self.walk_amenities(child, child_ctm, amenity);
                continue;
            }

            match (amenity, anchor(&child, &ctm)) {
                (Some(amenity), Some(position)) => self.records.amenities.push(LandmarkRecord {
                    kind: LandmarkKind::Amenity(amenity),
                    position,
                    floor: self.records.floor,
                }),
                _ => {
                    if let Some(Err(name)) = named {
                        log::debug!(
                            "floor {}: unknown amenity kind '{}'",
                            self.records.floor,
                            name
                        );
                    }
                    self.records.skipped += 1;
                }
            }
        }
    }

    fn walk_labels(&mut self, node: Node<'_, '_>, ctm: Matrix, kind: LayerKind) {
        for child in node.children().filter(|n| n.is_element()) {
            if child.has_tag_name("text") {
                let text = text_content(&child);
                match anchor(&child, &ctm) {
                    Some(position) if !text.is_empty() => self.push_label(kind, text, position),
                    _ => self.records.skipped += 1,
                }
            } else if child.has_tag_name("g") {
                let child_ctm = Point::combine_matrices(&ctm, &own_transform(&child));
                self.walk_labels(child, child_ctm, kind);
            } else if child.is_element() && !is_decoration(&child) {
                self.records.skipped += 1;
            }
        }
    }

    fn push_label(&mut self, kind: LayerKind, text: String, position: Point) {
        let floor = self.records.floor;
        let (kind, target) = match kind {
            LayerKind::Departments => {
                (LandmarkKind::Department(text), &mut self.records.departments)
            }
            LayerKind::Spaces => (LandmarkKind::Space(text), &mut self.records.spaces),
            LayerKind::Landmarks => (LandmarkKind::Landmark(text), &mut self.records.landmarks),
            LayerKind::Galleries => (LandmarkKind::Gallery(text), &mut self.records.galleries),
            LayerKind::Amenities => return,
        };
        target.push(LandmarkRecord {
            kind,
            position,
            floor,
        });
    }
}

/// Shapes that outline a zone but never carry a label of their own
fn is_decoration(node: &Node<'_, '_>) -> bool {
    matches!(
        node.tag_name().name(),
        "path" | "polygon" | "polyline" | "rect" | "line" | "defs" | "style" | "title" | "desc"
    )
}

fn marker_name<'a>(node: &Node<'a, '_>) -> Option<&'a str> {
    node.attribute("data-type")
        .or_else(|| node.attribute("id"))
        .or_else(|| {
            node.attribute((XLINK_NS, "href"))
                .or_else(|| node.attribute("href"))
                .map(|href| href.trim_start_matches('#'))
        })
}

fn has_named_markers(group: &Node<'_, '_>) -> bool {
    group
        .children()
        .filter(|n| n.is_element())
        .any(|n| marker_name(&n).is_some_and(|name| name.parse::<AmenityType>().is_ok()))
}

fn text_content(node: &Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Where a marker sits, in page coordinates
fn anchor(node: &Node<'_, '_>, ctm: &Matrix) -> Option<Point> {
    let full = Point::combine_matrices(ctm, &own_transform(node));
    let number = |name: &str| node.attribute(name).and_then(parse_length);

    let local = match node.tag_name().name() {
        "circle" | "ellipse" => {
            Point::new(number("cx").unwrap_or(0.0), number("cy").unwrap_or(0.0))
        }
        "rect" | "image" | "use" => Point::new(
            number("x").unwrap_or(0.0) + number("width").unwrap_or(0.0) / 2.0,
            number("y").unwrap_or(0.0) + number("height").unwrap_or(0.0) / 2.0,
        ),
        "text" => Point::new(number("x").unwrap_or(0.0), number("y").unwrap_or(0.0)),
        "polygon" | "polyline" => {
            let values = parse_numbers(node.attribute("points")?)?;
            if values.len() < 2 {
                return None;
            }
            let pairs = values.chunks_exact(2);
            let count = pairs.len() as f64;
            let (sx, sy) = pairs.fold((0.0, 0.0), |(sx, sy), p| (sx + p[0], sy + p[1]));
            Point::new(sx / count, sy / count)
        }
        "g" => {
            return node
                .children()
                .filter(|n| n.is_element())
                .find_map(|child| anchor(&child, &full));
        }
        _ => return None,
    };

    Some(local.apply_transform(&full))
}

fn own_transform(node: &Node<'_, '_>) -> Matrix {
    match node.attribute("transform") {
        Some(value) => parse_transform(value).unwrap_or_else(|| {
            log::warn!("ignoring unparseable transform '{}'", value);
            Point::identity_matrix()
        }),
        None => Point::identity_matrix(),
    }
}

/// Parses an SVG transform list into a single matrix
pub(crate) fn parse_transform(value: &str) -> Option<Matrix> {
    let mut matrix = Point::identity_matrix();
    for chunk in value.split(')') {
        let chunk = chunk.trim_matches(|c: char| c.is_whitespace() || c == ',');
        if chunk.is_empty() {
            continue;
        }
        let (name, args) = chunk.split_once('(')?;
        let args = parse_numbers(args)?;
        let step = match (name.trim(), args.as_slice()) {
            ("matrix", [a, b, c, d, e, f]) => [*a, *b, *c, *d, *e, *f],
            ("translate", [tx]) => [1.0, 0.0, 0.0, 1.0, *tx, 0.0],
            ("translate", [tx, ty]) => [1.0, 0.0, 0.0, 1.0, *tx, *ty],
            ("scale", [s]) => [*s, 0.0, 0.0, *s, 0.0, 0.0],
            ("scale", [sx, sy]) => [*sx, 0.0, 0.0, *sy, 0.0, 0.0],
            ("rotate", [angle]) => rotation(*angle),
            ("rotate", [angle, cx, cy]) => {
                let to_origin = [1.0, 0.0, 0.0, 1.0, -cx, -cy];
                let back = [1.0, 0.0, 0.0, 1.0, *cx, *cy];
                let rotated = Point::combine_matrices(&rotation(*angle), &to_origin);
                Point::combine_matrices(&back, &rotated)
            }
            ("skewX", [angle]) => [1.0, 0.0, angle.to_radians().tan(), 1.0, 0.0, 0.0],
            ("skewY", [angle]) => [1.0, angle.to_radians().tan(), 0.0, 1.0, 0.0, 0.0],
            _ => return None,
        };
        matrix = Point::combine_matrices(&matrix, &step);
    }
    Some(matrix)
}

fn rotation(degrees: f64) -> Matrix {
    let (sin, cos) = degrees.to_radians().sin_cos();
    [cos, sin, -sin, cos, 0.0, 0.0]
}

fn parse_numbers(value: &str) -> Option<Vec<f64>> {
    value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<f64>().ok())
        .collect()
}

/// First number of a length or length list, unit suffix ignored
fn parse_length(value: &str) -> Option<f64> {
    let first = value
        .split(|c: char| c == ',' || c.is_whitespace())
        .find(|s| !s.is_empty())?;
    first
        .trim_end_matches(|c: char| c.is_ascii_alphabetic() || c == '%')
        .parse()
        .ok()
}

fn parse_view_box(root: &Node<'_, '_>) -> Option<Bounds> {
    if let Some(values) = root.attribute("viewBox").and_then(parse_numbers) {
        if let [x, y, width, height] = values.as_slice() {
            return Some(Bounds::from_origin_and_size(*x, *y, *width, *height));
        }
    }
    let width = root.attribute("width").and_then(parse_length)?;
    let height = root.attribute("height").and_then(parse_length)?;
    Some(Bounds::from_origin_and_size(0.0, 0.0, width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLOOR_ONE: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" viewBox="0 0 2000 1400">
  <g id="Layer_1">
    <g id="Amenities">
      <circle id="Elevator" cx="100" cy="200" r="8"/>
      <use xlink:href="#dining" x="290" y="390" width="20" height="20"/>
      <g id="Restroom_2_" transform="translate(500 600)">
        <rect x="-10" y="-10" width="20" height="20"/>
      </g>
      <g id="Information">
        <circle id="info_1_" cx="10" cy="10" r="4"/>
        <circle id="info_2_" cx="30" cy="10" r="4"/>
      </g>
      <circle id="Helipad" cx="0" cy="0" r="4"/>
    </g>
  </g>
  <g id="Departments" transform="translate(1000 0)">
    <path d="M0 0 L10 10"/>
    <text x="10" y="20">Modern <tspan>Art</tspan></text>
  </g>
  <g id="Galleries">
    <text transform="matrix(1 0 0 1 400 450)">Gallery 201</text>
    <text x="5" y="5">   </text>
  </g>
  <g id="Spaces"><text x="700" y="710">Griffin Court</text></g>
  <g id="Landmarks"><text x="50" y="60">Grand Staircase</text></g>
</svg>"##;

    #[test]
    fn test_parse_floor_layers() {
        let records = FloorplanSource::parse(FLOOR_ONE, 1).unwrap();

        assert_eq!(records.view_box, Some(Bounds::from_coords(0.0, 0.0, 2000.0, 1400.0)));

        let amenities: Vec<_> = records
            .amenities
            .iter()
            .map(|r| (r.kind.clone(), r.position))
            .collect();
        assert_eq!(
            amenities,
            vec![
                (LandmarkKind::Amenity(AmenityType::Elevator), Point::new(100.0, 200.0)),
                (LandmarkKind::Amenity(AmenityType::Dining), Point::new(300.0, 400.0)),
                (LandmarkKind::Amenity(AmenityType::Restroom), Point::new(500.0, 600.0)),
                (LandmarkKind::Amenity(AmenityType::Information), Point::new(10.0, 10.0)),
                (LandmarkKind::Amenity(AmenityType::Information), Point::new(30.0, 10.0)),
            ]
        );

        assert_eq!(records.departments.len(), 1);
        assert_eq!(
            records.departments[0].kind,
            LandmarkKind::Department("Modern Art".to_string())
        );
        assert_eq!(records.departments[0].position, Point::new(1010.0, 20.0));

        assert_eq!(records.galleries.len(), 1);
        assert_eq!(records.galleries[0].position, Point::new(400.0, 450.0));
        assert_eq!(records.spaces[0].kind.text(), Some("Griffin Court"));
        assert_eq!(records.landmarks[0].kind.text(), Some("Grand Staircase"));
        assert!(records.iter().all(|r| r.floor == 1));

        // the helipad marker and the blank gallery label
        assert_eq!(records.skipped, 2);
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        let err = FloorplanSource::parse("<svg><g></svg>", 0).unwrap_err();
        assert!(matches!(err, MapError::ParseError(_)));
    }

    #[test]
    fn test_document_without_layers_is_empty() {
        let records = FloorplanSource::parse(r#"<svg width="800px" height="600px"/>"#, 2).unwrap();
        assert!(records.is_empty());
        assert_eq!(records.view_box, Some(Bounds::from_coords(0.0, 0.0, 800.0, 600.0)));
    }

    #[test]
    fn test_transform_lists() {
        let m = parse_transform("translate(10, 20) scale(2)").unwrap();
        assert_eq!(Point::new(1.0, 1.0).apply_transform(&m), Point::new(12.0, 22.0));

        let r = parse_transform("rotate(90 10 10)").unwrap();
        let p = Point::new(20.0, 10.0).apply_transform(&r);
        assert!((p.x - 10.0).abs() < 1e-9 && (p.y - 20.0).abs() < 1e-9);

        assert!(parse_transform("wobble(3)").is_none());
    }
}
