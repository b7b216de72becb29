use crossterm::style::Stylize;

use crate::catalog::Catalog;
use crate::error::Result;
use crate::topology::Topology;

use super::display_color;

/// Color `text` with the display token's color, if any and if `styled`.
fn paint(out: &mut String, text: &str, display: Option<&str>, styled: bool) {
    match display.and_then(display_color).filter(|_| styled) {
        Some(color) => out.push_str(&text.with(color).to_string()),
        None => out.push_str(text),
    }
}

/// One line per color: `index: name (countx)`.
pub fn format_colors(catalog: &Catalog, styled: bool) -> String {
    let mut res = String::new();
    for (idx, color) in catalog.iter() {
        paint(&mut res, &format!("{}: {} ({}x)", idx, color.name, color.count), Some(color.display.as_str()), styled);
        res.push('\n');
    }
    res
}

/// Color indices laid out as the quilt: each major row is followed by the
/// minor row sitting below it, shifted right by one column.
pub fn format_solution(solution: &[usize], topology: &Topology, catalog: &Catalog, styled: bool) -> Result<String> {
    let mut res = String::new();
    let cell = |res: &mut String, idx: usize| {
        let color = solution.get(idx).copied();
        let label = color.map_or_else(|| "?".to_string(), |c| c.to_string());
        paint(res, &label, color.and_then(|c| catalog.display(c)), styled);
        res.push(' ');
    };

    for row in 0..topology.major_height() {
        for col in 0..topology.major_width() {
            cell(&mut res, topology.major_idx(row, col)?);
        }
        res.push('\n');

        if row >= topology.minor_height() {
            continue;
        }
        res.push(' ');
        for col in 0..topology.minor_width() {
            cell(&mut res, topology.minor_idx(row, col)?);
        }
        res.push('\n');
    }
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Color;
    use crossterm::style::Color as Term;

    fn quilt() -> (Topology, Catalog) {
        let topology = Topology::new(3, 2).unwrap();
        let catalog = Catalog::new(
            vec![Color::new("blue", 3, "#0000ff"), Color::new("orange", 3, "#d78700"), Color::new("x", 2, "plain")],
            &topology,
        )
        .unwrap();
        (topology, catalog)
    }

    fn blue(text: &str) -> String {
        text.with(Term::Rgb { r: 0, g: 0, b: 255 }).to_string()
    }

    fn orange(text: &str) -> String {
        text.with(Term::Rgb { r: 215, g: 135, b: 0 }).to_string()
    }

    #[test]
    fn legend() {
        let (_, catalog) = quilt();
        assert_eq!(format_colors(&catalog, false), "0: blue (3x)\n1: orange (3x)\n2: x (2x)\n");
        let styled = format_colors(&catalog, true);
        assert_eq!(styled, format!("{}\n{}\n2: x (2x)\n", blue("0: blue (3x)"), orange("1: orange (3x)")));
        assert!(styled.contains("38;2;0;0;255"));
    }

    #[test]
    fn grid_layout() {
        let (topology, catalog) = quilt();
        let text = format_solution(&[0, 1, 0, 1, 0, 1, 2, 2], &topology, &catalog, false).unwrap();
        assert_eq!(text, "0 1 0 \n 2 2 \n1 0 1 \n");
    }

    #[test]
    fn styled_cells() {
        let (topology, catalog) = quilt();
        let text = format_solution(&[0, 1, 0, 1, 0, 1, 2, 2], &topology, &catalog, true).unwrap();
        let first_row = format!("{} {} {} \n", blue("0"), orange("1"), blue("0"));
        assert!(text.starts_with(&first_row), "{:?}", text);
        assert!(text.contains("\n 2 2 \n"));
        assert!(text.contains("38;2;215;135;0"));
    }
}
