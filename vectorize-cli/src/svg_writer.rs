//! Renders a [`vectorize_core::SplineListArray`] as an SVG document.
//!
//! Each [`vectorize_core::SplineList`] becomes one `<path>`: a `M` to the
//! first point, a `C`/`L` per spline, and a trailing `Z` if the list is
//! closed. The document's viewBox is `(0, 0, width, height)` — the same
//! pixel coordinate space the bitmap was traced in, so no separate
//! transform is needed.

use svg::node::element::path::Data;
use svg::node::element::Path;
use svg::Document;
use vectorize_core::{Spline, SplineListArray};

pub struct SvgWriteOptions {
    /// Decimal places kept in emitted path coordinates.
    pub decimal_precision: u8,
    /// Emit a `<!-- spline list N -->` comment before each path.
    pub include_comments: bool,
}

impl Default for SvgWriteOptions {
    fn default() -> Self {
        Self {
            decimal_precision: 2,
            include_comments: false,
        }
    }
}

pub fn write_svg(splines: &SplineListArray, width: u32, height: u32, opts: &SvgWriteOptions) -> String {
    let mut document = Document::new()
        .set("viewBox", (0, 0, width, height))
        .set("width", width)
        .set("height", height)
        .set("xmlns", "http://www.w3.org/2000/svg");

    for (i, list) in splines.iter().enumerate() {
        if list.is_empty() {
            continue;
        }
        if opts.include_comments {
            document = document.add(svg::node::Comment::new(format!(" spline list {i} ")));
        }
        let path = Path::new()
            .set("d", path_data(list, opts.decimal_precision))
            .set("fill", "none")
            .set("stroke", "black")
            .set("stroke-width", "1");
        document = document.add(path);
    }

    document.to_string()
}

fn path_data(list: &vectorize_core::SplineList, precision: u8) -> Data {
    let round = |v: f64| {
        let factor = 10f64.powi(precision as i32);
        (v * factor).round() / factor
    };

    let first = list.splines[0].start();
    let mut data = Data::new().move_to((round(first.x), round(first.y)));

    for spline in &list.splines {
        data = match spline {
            Spline::Line { end, .. } => data.line_to((round(end.x), round(end.y))),
            Spline::Cubic {
                control1,
                control2,
                end,
                ..
            } => data.cubic_curve_to((
                round(control1.x),
                round(control1.y),
                round(control2.x),
                round(control2.y),
                round(end.x),
                round(end.y),
            )),
        };
    }

    if list.closed {
        data = data.close();
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use vectorize_core::{Point, SplineList};

    #[test]
    fn empty_array_yields_bare_document() {
        let svg = write_svg(&vec![], 100, 50, &SvgWriteOptions::default());
        assert!(svg.contains("viewBox=\"0 0 100 50\""));
        assert!(!svg.contains("<path"));
    }

    #[test]
    fn closed_list_emits_closed_path() {
        let mut list = SplineList::new(true);
        list.push(Spline::Line {
            start: Point::xy(0.0, 0.0),
            end: Point::xy(10.0, 0.0),
        });
        list.push(Spline::Line {
            start: Point::xy(10.0, 0.0),
            end: Point::xy(0.0, 0.0),
        });
        let svg = write_svg(&vec![list], 20, 20, &SvgWriteOptions::default());
        assert!(svg.contains("<path"));
        assert!(svg.contains('Z') || svg.contains('z'));
    }

    #[test]
    fn cubic_spline_emits_c_command() {
        let mut list = SplineList::new(false);
        list.push(Spline::Cubic {
            start: Point::xy(0.0, 0.0),
            control1: Point::xy(1.0, 2.0),
            control2: Point::xy(3.0, 2.0),
            end: Point::xy(4.0, 0.0),
        });
        let svg = write_svg(&vec![list], 10, 10, &SvgWriteOptions::default());
        assert!(svg.contains('C') || svg.contains('c'));
    }
}
