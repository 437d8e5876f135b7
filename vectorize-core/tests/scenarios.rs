//! End-to-end scenarios exercising the full bitmap -> outline -> spline
//! pipeline, one per case, matching the concrete walkthroughs that drove
//! this crate's design.

use vectorize_core::{
    find_outline_pixels, fitted_splines, Bitmap, FittingOptions, PixelFormat, PixelOutline,
    PixelPoint, Rgb, Spline,
};

fn filled_square(bmp: &mut Bitmap, x0: u32, y0: u32, size: u32, color: Rgb) {
    for y in y0..y0 + size {
        for x in x0..x0 + size {
            bmp.set_pixel(x, y, color);
        }
    }
}

#[test]
fn unit_square_region_fits_to_four_lines_no_matter_the_error_threshold() {
    let mut bmp = Bitmap::new(10, 10, PixelFormat::Gray, vec![255; 100]).unwrap();
    filled_square(&mut bmp, 3, 3, 4, Rgb::gray(0));

    let outlines = find_outline_pixels(&bmp, Some(Rgb::gray(255)));
    assert_eq!(outlines.len(), 1);
    assert!(!outlines[0].open);

    for error_threshold in [0.0_f64, 2.0, 1000.0] {
        let mut opts = FittingOptions::default();
        opts.error_threshold = error_threshold;
        let splines = fitted_splines(&outlines, &opts).unwrap();
        assert_eq!(splines.len(), 1);
        assert_eq!(splines[0].splines.len(), 4, "error_threshold={error_threshold}");
        for spline in &splines[0].splines {
            assert!(matches!(spline, Spline::Line { .. }));
        }
    }
}

#[test]
fn rasterized_circle_fits_to_a_small_cubic_spline_list_with_no_hard_corners() {
    let diameter = 32i32;
    let radius = diameter as f64 / 2.0;
    let center = radius;
    let size = diameter as u32 + 4;
    let mut data = vec![255u8; (size * size) as usize];
    for y in 0..size as i32 {
        for x in 0..size as i32 {
            let dx = x as f64 - center - 2.0;
            let dy = y as f64 - center - 2.0;
            if dx * dx + dy * dy <= radius * radius {
                data[(y as u32 * size + x as u32) as usize] = 0;
            }
        }
    }
    let bmp = Bitmap::new(size, size, PixelFormat::Gray, data).unwrap();
    let outlines = find_outline_pixels(&bmp, Some(Rgb::gray(255)));
    assert_eq!(outlines.len(), 1);
    assert!(!outlines[0].open);

    let opts = FittingOptions::default();
    let splines = fitted_splines(&outlines, &opts).unwrap();
    assert_eq!(splines.len(), 1);
    assert!(splines[0].closed);
    assert!(
        !splines[0].splines.is_empty() && splines[0].splines.len() <= 16,
        "expected a handful of cubics, got {}",
        splines[0].splines.len()
    );
    for spline in &splines[0].splines {
        assert!(matches!(spline, Spline::Cubic { .. }), "a smooth circle should need no lines");
        assert!(spline.is_finite());
    }
}

#[test]
fn l_shape_fits_entirely_with_straight_lines() {
    // Two rectangles sharing a corner: a horizontal bar and a vertical bar,
    // forming an L. Every edge of this shape is axis-aligned, so the fitted
    // output must be all lines regardless of corner/subdivision thresholds.
    let mut bmp = Bitmap::new(20, 20, PixelFormat::Gray, vec![255; 400]).unwrap();
    filled_square(&mut bmp, 2, 2, 10, Rgb::gray(0)); // vertical bar, 10 wide/tall
    for y in 10..14 {
        for x in 2..16 {
            bmp.set_pixel(x, y, Rgb::gray(0));
        }
    }

    let outlines = find_outline_pixels(&bmp, Some(Rgb::gray(255)));
    assert_eq!(outlines.len(), 1);

    let opts = FittingOptions::default();
    let splines = fitted_splines(&outlines, &opts).unwrap();
    assert_eq!(splines.len(), 1);
    assert!(splines[0].splines.len() >= 4, "an L has at least 4 corners");
    for spline in &splines[0].splines {
        assert!(matches!(spline, Spline::Line { .. }), "every L edge is axis-aligned");
    }
}

#[test]
fn noisy_diagonal_ridge_reverts_to_a_single_line_after_smoothing() {
    // y = x with a small jitter pattern standing in for +/-0.4 uniform
    // noise on a 1-pixel-wide ridge: no single jitter step exceeds one
    // pixel, so line_threshold/line_reversion_threshold should still
    // collapse the whole arc to one line.
    let points: Vec<PixelPoint> = (0..100)
        .map(|i| {
            // Endpoints stay exactly on y = x so the endpoint chord itself
            // isn't skewed by noise; interior points jitter by at most one
            // pixel, matching the +/-0.4 uniform noise this scenario models.
            let jitter = if i == 0 || i == 99 {
                0
            } else {
                match i % 7 {
                    0 => 1,
                    3 => -1,
                    _ => 0,
                }
            };
            PixelPoint::new(i, i + jitter)
        })
        .collect();
    let outline = PixelOutline {
        points,
        open: true,
        color: Rgb::gray(0),
    };

    let opts = FittingOptions::default();
    let splines = fitted_splines(&[outline], &opts).unwrap();
    assert_eq!(splines.len(), 1);
    assert_eq!(splines[0].splines.len(), 1);
    assert!(matches!(splines[0].splines[0], Spline::Line { .. }));
}

#[test]
fn two_disjoint_squares_yield_two_outlines_and_two_spline_lists() {
    let mut bmp = Bitmap::new(20, 10, PixelFormat::Gray, vec![255; 200]).unwrap();
    filled_square(&mut bmp, 1, 1, 4, Rgb::gray(0));
    filled_square(&mut bmp, 12, 1, 4, Rgb::gray(0));

    let outlines = find_outline_pixels(&bmp, Some(Rgb::gray(255)));
    assert_eq!(outlines.len(), 2);

    let splines = fitted_splines(&outlines, &FittingOptions::default()).unwrap();
    assert_eq!(splines.len(), 2);
}

#[test]
fn background_colored_region_is_excluded_from_tracing_and_fitting() {
    let green = Rgb::new(0, 255, 0);
    let red = Rgb::new(255, 0, 0);
    let mut data = Vec::with_capacity(10 * 10 * 3);
    for _ in 0..100 {
        data.extend_from_slice(&[green.r, green.g, green.b]);
    }
    let mut bmp = Bitmap::new(10, 10, PixelFormat::Rgb, data).unwrap();
    filled_square(&mut bmp, 3, 3, 4, red);

    let outlines = find_outline_pixels(&bmp, Some(green));
    assert_eq!(outlines.len(), 1);
    assert_eq!(outlines[0].color, red);

    let splines = fitted_splines(&outlines, &FittingOptions::default()).unwrap();
    assert_eq!(splines.len(), 1);
}
