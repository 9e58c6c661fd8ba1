//! Geometric properties of the shape rasterizer, checked by exhaustive
//! sweeps over small coordinate ranges.

mod common;

use std::collections::{BTreeMap, BTreeSet};

use common::{Op, Recorder};
use gfx::raster::{
    circle, fill_circle, fill_rect, fill_round_rect, fill_triangle, line, rect, round_rect,
};
use gfx::{Color, PixelSink};

const RANGE: std::ops::RangeInclusive<i16> = -5..=5;

#[test]
fn test_line_pixel_count_and_endpoints() {
    for x0 in RANGE {
        for y0 in RANGE {
            for x1 in RANGE {
                for y1 in RANGE {
                    let mut rec = Recorder::new();
                    line(&mut rec, x0, y0, x1, y1, Color::WHITE);
                    let points = rec.points();

                    let expected = (x1 - x0).abs().max((y1 - y0).abs()) as usize + 1;
                    assert_eq!(points.len(), expected, "({x0},{y0})-({x1},{y1})");
                    assert_eq!(rec.point_set().len(), expected, "duplicate pixel");
                    assert_eq!(points.iter().filter(|&&p| p == (x0, y0)).count(), 1);
                    assert_eq!(points.iter().filter(|&&p| p == (x1, y1)).count(), 1);
                }
            }
        }
    }
}

#[test]
fn test_line_stays_within_half_pixel() {
    for x0 in RANGE {
        for y0 in RANGE {
            for x1 in RANGE {
                for y1 in RANGE {
                    let mut rec = Recorder::new();
                    line(&mut rec, x0, y0, x1, y1, Color::WHITE);

                    let (dx, dy) = (i32::from(x1 - x0), i32::from(y1 - y0));
                    for (x, y) in rec.points() {
                        let (px, py) = (i32::from(x - x0), i32::from(y - y0));
                        // Distance along the minor axis, doubled to stay integral.
                        if dx.abs() >= dy.abs() {
                            if dx != 0 {
                                assert!((2 * py * dx - 2 * px * dy).abs() <= dx.abs());
                            }
                        } else {
                            assert!((2 * px * dy - 2 * py * dx).abs() <= dy.abs());
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn test_line_scenario() {
    let mut rec = Recorder::new();
    line(&mut rec, 0, 0, 4, 2, Color::RED);
    assert_eq!(rec.points(), vec![(0, 0), (1, 1), (2, 1), (3, 2), (4, 2)]);
    assert!(rec.pixels().iter().all(|p| p.2 == Color::RED));
}

#[test]
fn test_circle_points_lie_on_radius() {
    for r in 0..40 {
        let mut rec = Recorder::new();
        circle(&mut rec, 3, -2, r, Color::WHITE);
        let r = i32::from(r);
        for (x, y) in rec.points() {
            let (dx, dy) = (i32::from(x) - 3, i32::from(y) + 2);
            let d2 = 4 * (dx * dx + dy * dy);
            // (r - 1/2)^2 <= d^2 <= (r + 1/2)^2
            assert!((2 * r - 1).pow(2) <= d2 && d2 <= (2 * r + 1).pow(2), "r={r} ({dx},{dy})");
        }
    }
}

#[test]
fn test_circle_is_eightfold_symmetric() {
    for r in 1..30 {
        let mut rec = Recorder::new();
        circle(&mut rec, 0, 0, r, Color::WHITE);
        let set = rec.point_set();
        for &(x, y) in &set {
            for p in [(x, -y), (-x, y), (-x, -y), (y, x), (-y, x), (y, -x), (-y, -x)] {
                assert!(set.contains(&p), "r={r}: ({x},{y}) has no mirror {p:?}");
            }
        }
    }
}

#[test]
fn test_fill_circle_covers_outline() {
    let mut outline = Recorder::new();
    circle(&mut outline, 10, 10, 7, Color::WHITE);
    let mut disk = Recorder::new();
    fill_circle(&mut disk, 10, 10, 7, Color::WHITE);
    assert!(outline.point_set().is_subset(&disk.point_set()));
}

/// Row extents computed directly from the edge equations
fn expected_spans(v: [(i16, i16); 3]) -> BTreeMap<i64, (i64, i64)> {
    let mut v = v.map(|(x, y)| (i64::from(x), i64::from(y)));
    v.sort_by_key(|p| p.1);
    let [(x0, y0), (x1, y1), (x2, y2)] = v;
    let mut spans = BTreeMap::new();
    if y0 == y2 {
        let xs = [x0, x1, x2];
        spans.insert(y0, (*xs.iter().min().unwrap(), *xs.iter().max().unwrap()));
        return spans;
    }

    let last = if y1 == y2 { y1 } else { y1 - 1 };
    for y in y0..=y2 {
        let b = x0 + (x2 - x0) * (y - y0) / (y2 - y0);
        let a = if y <= last {
            x0 + (x1 - x0) * (y - y0) / (y1 - y0)
        } else {
            x1 + (x2 - x1) * (y - y1) / (y2 - y1)
        };
        spans.insert(y, (a.min(b), a.max(b)));
    }
    spans
}

/// One `(first, last)` column pair per row.
///
/// Runs wider than `i16::MAX` arrive in adjacent pieces and are joined;
/// any other repeat of a row fails.
fn triangle_rows(rec: &Recorder) -> BTreeMap<i64, (i64, i64)> {
    let mut rows: BTreeMap<i64, (i64, i64)> = BTreeMap::new();
    for op in &rec.ops {
        let Op::HRun(x, y, len, _) = *op else {
            panic!("fill_triangle emitted {op:?}");
        };
        let (x, len) = (i64::from(x), i64::from(len));
        match rows.get_mut(&i64::from(y)) {
            Some(row) => {
                assert_eq!(row.1 + 1, x, "row {y} drawn twice");
                row.1 = x + len - 1;
            }
            None => {
                rows.insert(i64::from(y), (x, x + len - 1));
            }
        }
    }
    rows
}

#[test]
fn test_fill_triangle_matches_edge_intersections() {
    let coords = [-4i16, -1, 0, 2, 5];
    for &x0 in &coords {
        for &y0 in &coords {
            for &x1 in &coords {
                for &y1 in &coords {
                    for &(x2, y2) in &[(3i16, -3i16), (-2, 4), (6, 1), (0, 0)] {
                        let mut rec = Recorder::new();
                        fill_triangle(&mut rec, x0, y0, x1, y1, x2, y2, Color::WHITE);

                        let rows = triangle_rows(&rec);
                        let expected = expected_spans([(x0, y0), (x1, y1), (x2, y2)]);
                        assert_eq!(rows, expected);
                    }
                }
            }
        }
    }
}

#[test]
fn test_degenerate_rects_draw_nothing() {
    let mut rec = Recorder::new();
    for (w, h) in [(0, 5), (5, 0), (-3, 4), (4, -3)] {
        rect(&mut rec, 1, 1, w, h, Color::WHITE);
        fill_rect(&mut rec, 1, 1, w, h, Color::WHITE);
    }
    assert!(rec.ops.is_empty());
}

#[test]
fn test_fill_rect_is_column_runs() {
    let mut rec = Recorder::new();
    fill_rect(&mut rec, 2, 3, 4, 5, Color::BLUE);
    assert_eq!(rec.ops.len(), 4);
    let expected: BTreeSet<_> = (2..6).flat_map(|x| (3..8).map(move |y| (x, y))).collect();
    assert_eq!(rec.point_set(), expected);
}

#[test]
fn test_large_triangles_match_edge_intersections() {
    let cases: [[(i16, i16); 3]; 4] = [
        [(i16::MIN, i16::MIN), (0, 0), (i16::MAX, i16::MAX)],
        [(-30000, -20000), (25000, 100), (-100, 30000)],
        [(i16::MAX, i16::MIN), (i16::MIN, 0), (100, i16::MAX)],
        [(20000, -32000), (-32000, 31000), (31000, 30000)],
    ];
    for v in cases {
        let mut rec = Recorder::new();
        let [(x0, y0), (x1, y1), (x2, y2)] = v;
        fill_triangle(&mut rec, x0, y0, x1, y1, x2, y2, Color::WHITE);
        assert_eq!(triangle_rows(&rec), expected_spans(v), "{v:?}");
    }
}

/// Rounded rectangle decomposed into two crossed slabs and four corner disks
fn expected_round_fill(x: i16, y: i16, w: i16, h: i16, r: i16) -> BTreeSet<(i16, i16)> {
    let mut rec = Recorder::new();
    fill_rect(&mut rec, x + r, y, w - 2 * r, h, Color::WHITE);
    fill_rect(&mut rec, x, y + r, w, h - 2 * r, Color::WHITE);
    for (cx, cy) in corner_centres(x, y, w, h, r) {
        fill_circle(&mut rec, cx, cy, r, Color::WHITE);
    }
    rec.point_set()
}

fn corner_centres(x: i16, y: i16, w: i16, h: i16, r: i16) -> [(i16, i16); 4] {
    let (left, right) = (x + r, x + w - r - 1);
    let (top, bottom) = (y + r, y + h - r - 1);
    [(left, top), (right, top), (left, bottom), (right, bottom)]
}

#[test]
fn test_fill_round_rect_is_slabs_and_corner_disks() {
    let (x, y) = (-3, 2);
    for r in 0..8 {
        for w in 2 * r + 1..2 * r + 8 {
            for h in 2 * r + 1..2 * r + 8 {
                let mut rec = Recorder::new();
                fill_round_rect(&mut rec, x, y, w, h, r, Color::WHITE);
                let points = rec.point_set();
                assert_eq!(points, expected_round_fill(x, y, w, h, r), "w={w} h={h} r={r}");

                for row in [y + r, y + h - r - 1] {
                    let full = (x..x + w).all(|col| points.contains(&(col, row)));
                    assert!(full, "row {row} not full for w={w} h={h} r={r}");
                }
            }
        }
    }
}

#[test]
fn test_round_rect_is_edges_and_corner_arcs() {
    let (x, y) = (4, -6);
    for r in 0..8 {
        for w in 2 * r + 1..2 * r + 8 {
            for h in 2 * r + 1..2 * r + 8 {
                let mut rec = Recorder::new();
                round_rect(&mut rec, x, y, w, h, r, Color::WHITE);

                let mut edges = Recorder::new();
                edges.hrun(x + r, y, w - 2 * r, Color::WHITE);
                edges.hrun(x + r, y + h - 1, w - 2 * r, Color::WHITE);
                edges.vrun(x, y + r, h - 2 * r, Color::WHITE);
                edges.vrun(x + w - 1, y + r, h - 2 * r, Color::WHITE);
                let mut expected = edges.point_set();

                // Each corner keeps the quadrant of its circle facing outwards.
                let outward = [(-1, -1), (1, -1), (-1, 1), (1, 1)];
                for ((cx, cy), (sx, sy)) in corner_centres(x, y, w, h, r).into_iter().zip(outward) {
                    let mut ring = Recorder::new();
                    circle(&mut ring, cx, cy, r, Color::WHITE);
                    expected.extend(
                        ring.point_set()
                            .into_iter()
                            .filter(|&(px, py)| (px - cx) * sx >= 0 && (py - cy) * sy >= 0),
                    );
                }

                assert_eq!(rec.point_set(), expected, "w={w} h={h} r={r}");
            }
        }
    }
}
