use std::f64::consts::SQRT_2;

use ::svg::node::element::{Polygon, Text};
use ::svg::node::Text as TextNode;
use ::svg::Document;

use crate::catalog::{Catalog, Color};
use crate::error::{Error, Result};
use crate::topology::{Lattice, Topology};

const STROKE_WIDTH: f64 = 2.0;
const U: f64 = 15.0;
const INSIDE: f64 = U;
const OUTSIDE: f64 = 2.0 * U;
/// Distance between neighboring major centers: the diagonal of a `4U` square.
const DIAG: f64 = 4.0 * U * SQRT_2;

/// A plus-shaped outline around the origin, before rotation.
const CROSS: [(f64, f64); 12] = [
    (INSIDE, OUTSIDE),
    (INSIDE, INSIDE),
    (OUTSIDE, INSIDE),
    (OUTSIDE, -INSIDE),
    (INSIDE, -INSIDE),
    (INSIDE, -OUTSIDE),
    (-INSIDE, -OUTSIDE),
    (-INSIDE, -INSIDE),
    (-OUTSIDE, -INSIDE),
    (-OUTSIDE, INSIDE),
    (-INSIDE, INSIDE),
    (-INSIDE, OUTSIDE),
];

/// Rotate 45 degrees clockwise in screen coordinates.
fn rotate((x, y): (f64, f64)) -> (f64, f64) {
    let h = 0.5 * SQRT_2;
    (x * h + y * h, -x * h + y * h)
}

/// Center of square `index`. Minor squares sit on the corners shared by four
/// major squares.
pub fn center(index: usize, topology: &Topology) -> Result<(f64, f64)> {
    let square = topology.square(index)?;
    let offset = match square.lattice {
        Lattice::Major => 0.5,
        Lattice::Minor => 1.0,
    };
    Ok(((offset + square.col as f64) * DIAG, (offset + square.row as f64) * DIAG))
}

fn square_element(document: Document, (cx, cy): (f64, f64), color: &Color) -> Document {
    let points = CROSS
        .iter()
        .map(|&p| {
            let (x, y) = rotate(p);
            format!("{:.2},{:.2}", cx + x, cy + y)
        })
        .collect::<Vec<_>>()
        .join(" ");
    let glyph = Polygon::new()
        .set("points", points)
        .set("stroke", "black")
        .set("fill", color.display.as_str())
        .set("stroke-width", STROKE_WIDTH);
    let label = Text::new()
        .set("x", cx)
        .set("y", cy)
        .set("fill", "black")
        .set("text-anchor", "middle")
        .set("dominant-baseline", "middle")
        .set("font-size", 13)
        .add(TextNode::new(color.name.as_str()));
    document.add(glyph).add(label)
}

/// An SVG document of one solved quilt.
pub fn render_solution(solution: &[usize], topology: &Topology, catalog: &Catalog) -> Result<Document> {
    let mut document = Document::new()
        .set("width", topology.major_width() as f64 * DIAG)
        .set("height", topology.major_height() as f64 * DIAG);
    for (idx, &c) in solution.iter().enumerate() {
        let color = catalog.get(c).ok_or_else(|| Error::Engine(format!("square {} has unknown color {}", idx, c)))?;
        document = square_element(document, center(idx, topology)?, color);
    }
    Ok(document)
}
