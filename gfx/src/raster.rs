//! Scan conversion of lines, circles, rounded rectangles and triangles.
//!
//! Everything here is integer-only and talks to the display through
//! [`PixelSink`] alone. Arguments are `i16` like the panel coordinates;
//! intermediate arithmetic is widened to `i32` so large shapes cannot
//! overflow. Results are narrowed again at the sink; whatever falls
//! outside the `i16` plane is dropped rather than wrapped around.
//!
//! Shapes are not validated: a rounded-rect radius larger than half the
//! shorter side, or a "triangle" with crossed vertices, draws whatever the
//! arithmetic yields. Only non-positive run lengths are filtered out.

use core::mem::swap;
use core::ops::BitOr;

use shared::Color;

use crate::sink::PixelSink;

/// Quarter-circle selector for [`circle_helper`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Corners(u8);

impl Corners {
    pub const TOP_LEFT: Corners = Corners(0x1);
    pub const TOP_RIGHT: Corners = Corners(0x2);
    pub const BOTTOM_RIGHT: Corners = Corners(0x4);
    pub const BOTTOM_LEFT: Corners = Corners(0x8);
    pub const ALL: Corners = Corners(0xF);

    /// Build from the legacy 4-bit corner mask
    pub const fn from_bits(bits: u8) -> Self {
        Corners(bits & 0xF)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: Corners) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for Corners {
    type Output = Corners;

    fn bitor(self, rhs: Corners) -> Corners {
        Corners(self.0 | rhs.0)
    }
}

/// Half-disk selector for [`fill_circle_helper`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sides(u8);

impl Sides {
    pub const RIGHT: Sides = Sides(0x1);
    pub const LEFT: Sides = Sides(0x2);
    pub const BOTH: Sides = Sides(0x3);

    pub const fn from_bits(bits: u8) -> Self {
        Sides(bits & 0x3)
    }

    pub const fn contains(self, other: Sides) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for Sides {
    type Output = Sides;

    fn bitor(self, rhs: Sides) -> Sides {
        Sides(self.0 | rhs.0)
    }
}

/// Midpoint-circle recurrence for one octant.
///
/// Yields `(x, y)` offsets with `0 < x <= y` (up to the diagonal); callers
/// mirror them into the other octants. The four axis points are not
/// produced.
#[derive(Debug, Clone)]
pub struct MidpointArc {
    f: i32,
    ddf_x: i32,
    ddf_y: i32,
    x: i32,
    y: i32,
}

impl MidpointArc {
    pub fn new(r: i16) -> Self {
        let r = i32::from(r);
        Self {
            f: 1 - r,
            ddf_x: 1,
            ddf_y: -2 * r,
            x: 0,
            y: r,
        }
    }
}

impl Iterator for MidpointArc {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.x >= self.y {
            return None;
        }
        if self.f >= 0 {
            self.y -= 1;
            self.ddf_y += 2;
            self.f += self.ddf_y;
        }
        self.x += 1;
        self.ddf_x += 2;
        self.f += self.ddf_x;
        Some((self.x, self.y))
    }
}

// Narrows widened coordinates back to the sink's i16 space. Points off
// that space are dropped and runs are cut at its edges, never wrapped.
struct Pen<'a, S: PixelSink + ?Sized> {
    sink: &'a mut S,
    color: Color,
}

impl<'a, S: PixelSink + ?Sized> Pen<'a, S> {
    fn new(sink: &'a mut S, color: Color) -> Self {
        Self { sink, color }
    }

    fn plot(&mut self, x: i32, y: i32) {
        if let (Ok(x), Ok(y)) = (i16::try_from(x), i16::try_from(y)) {
            self.sink.plot(x, y, self.color);
        }
    }

    fn hrun(&mut self, x: i32, y: i32, len: i32) {
        let Ok(y) = i16::try_from(y) else { return };
        let (sink, color) = (&mut *self.sink, self.color);
        for_each_chunk(x, len, |x, len| sink.hrun(x, y, len, color));
    }

    fn vrun(&mut self, x: i32, y: i32, len: i32) {
        let Ok(x) = i16::try_from(x) else { return };
        let (sink, color) = (&mut *self.sink, self.color);
        for_each_chunk(y, len, |y, len| sink.vrun(x, y, len, color));
    }
}

// Splits `start..start + len`, clipped to i16, into runs of at most i16::MAX.
fn for_each_chunk(start: i32, len: i32, mut emit: impl FnMut(i16, i16)) {
    if len <= 0 {
        return;
    }
    let end = start.saturating_add(len - 1).min(i32::from(i16::MAX));
    let mut start = start.max(i32::from(i16::MIN));
    while start <= end {
        let chunk = (end - start + 1).min(i32::from(i16::MAX));
        emit(start as i16, chunk as i16);
        start += chunk;
    }
}

/// Bresenham line, both endpoints included.
///
/// Emits exactly `max(|dx|, |dy|) + 1` pixels. Exact half-pixel ties step
/// the minor axis towards the far endpoint, so `(0,0)-(4,2)` lights
/// `(0,0) (1,1) (2,1) (3,2) (4,2)`. The result does not depend on the
/// order of the endpoints.
pub fn line<S: PixelSink + ?Sized>(
    sink: &mut S,
    x0: i16,
    y0: i16,
    x1: i16,
    y1: i16,
    color: Color,
) {
    let (mut x0, mut y0, mut x1, mut y1) = (
        i32::from(x0),
        i32::from(y0),
        i32::from(x1),
        i32::from(y1),
    );

    let steep = (y1 - y0).abs() > (x1 - x0).abs();
    if steep {
        swap(&mut x0, &mut y0);
        swap(&mut x1, &mut y1);
    }
    if x0 > x1 {
        swap(&mut x0, &mut x1);
        swap(&mut y0, &mut y1);
    }

    let dx = x1 - x0;
    let dy = (y1 - y0).abs();
    let ystep = if y0 < y1 { 1 } else { -1 };

    // Half-pixel units: the error starts at dx/2 without truncation.
    let mut err = dx;
    let mut y = y0;
    let mut pen = Pen::new(sink, color);

    for x in x0..=x1 {
        if steep {
            pen.plot(y, x);
        } else {
            pen.plot(x, y);
        }
        err -= 2 * dy;
        if err <= 0 {
            y += ystep;
            err += 2 * dx;
        }
    }
}

/// Rectangle outline as two horizontal and two vertical runs
pub fn rect<S: PixelSink + ?Sized>(sink: &mut S, x: i16, y: i16, w: i16, h: i16, color: Color) {
    if w <= 0 || h <= 0 {
        return;
    }
    let (x, y, w, h) = (i32::from(x), i32::from(y), i32::from(w), i32::from(h));
    let mut pen = Pen::new(sink, color);
    pen.hrun(x, y, w);
    pen.hrun(x, y + h - 1, w);
    pen.vrun(x, y, h);
    pen.vrun(x + w - 1, y, h);
}

/// Solid rectangle as `w` vertical runs
pub fn fill_rect<S: PixelSink + ?Sized>(
    sink: &mut S,
    x: i16,
    y: i16,
    w: i16,
    h: i16,
    color: Color,
) {
    let mut pen = Pen::new(sink, color);
    fill_area(&mut pen, i32::from(x), i32::from(y), i32::from(w), i32::from(h));
}

fn fill_area<S: PixelSink + ?Sized>(pen: &mut Pen<'_, S>, x: i32, y: i32, w: i32, h: i32) {
    if w <= 0 || h <= 0 {
        return;
    }
    for i in 0..w {
        pen.vrun(x + i, y, h);
    }
}

/// Circle outline centred on `(cx, cy)`
pub fn circle<S: PixelSink + ?Sized>(sink: &mut S, cx: i16, cy: i16, r: i16, color: Color) {
    let (cx, cy) = (i32::from(cx), i32::from(cy));
    let r32 = i32::from(r);
    let mut pen = Pen::new(sink, color);

    pen.plot(cx, cy + r32);
    pen.plot(cx, cy - r32);
    pen.plot(cx + r32, cy);
    pen.plot(cx - r32, cy);

    for (x, y) in MidpointArc::new(r) {
        pen.plot(cx + x, cy + y);
        pen.plot(cx - x, cy + y);
        pen.plot(cx + x, cy - y);
        pen.plot(cx - x, cy - y);
        pen.plot(cx + y, cy + x);
        pen.plot(cx - y, cy + x);
        pen.plot(cx + y, cy - x);
        pen.plot(cx - y, cy - x);
    }
}

/// Quarter-circle arcs of radius `r`, one per corner selected in `corners`
pub fn circle_helper<S: PixelSink + ?Sized>(
    sink: &mut S,
    cx: i16,
    cy: i16,
    r: i16,
    corners: Corners,
    color: Color,
) {
    let mut pen = Pen::new(sink, color);
    corner_arcs(&mut pen, i32::from(cx), i32::from(cy), r, corners);
}

fn corner_arcs<S: PixelSink + ?Sized>(
    pen: &mut Pen<'_, S>,
    cx: i32,
    cy: i32,
    r: i16,
    corners: Corners,
) {
    for (x, y) in MidpointArc::new(r) {
        if corners.contains(Corners::BOTTOM_RIGHT) {
            pen.plot(cx + x, cy + y);
            pen.plot(cx + y, cy + x);
        }
        if corners.contains(Corners::TOP_RIGHT) {
            pen.plot(cx + x, cy - y);
            pen.plot(cx + y, cy - x);
        }
        if corners.contains(Corners::BOTTOM_LEFT) {
            pen.plot(cx - y, cy + x);
            pen.plot(cx - x, cy + y);
        }
        if corners.contains(Corners::TOP_LEFT) {
            pen.plot(cx - y, cy - x);
            pen.plot(cx - x, cy - y);
        }
    }
}

/// Solid disk: the centre column plus both halves from [`fill_circle_helper`]
pub fn fill_circle<S: PixelSink + ?Sized>(sink: &mut S, cx: i16, cy: i16, r: i16, color: Color) {
    let r32 = i32::from(r);
    Pen::new(&mut *sink, color).vrun(i32::from(cx), i32::from(cy) - r32, 2 * r32 + 1);
    fill_circle_helper(sink, cx, cy, r, Sides::BOTH, 0, color);
}

/// Half-disk as vertical strips anchored on the horizontal midline.
///
/// Every strip is stretched downwards by `delta` pixels so that two
/// half-disks `delta` rows apart merge into a rounded slab.
pub fn fill_circle_helper<S: PixelSink + ?Sized>(
    sink: &mut S,
    cx: i16,
    cy: i16,
    r: i16,
    sides: Sides,
    delta: i16,
    color: Color,
) {
    let mut pen = Pen::new(sink, color);
    let (cx, cy) = (i32::from(cx), i32::from(cy));
    half_disks(&mut pen, cx, cy, r, sides, i32::from(delta));
}

fn half_disks<S: PixelSink + ?Sized>(
    pen: &mut Pen<'_, S>,
    cx: i32,
    cy: i32,
    r: i16,
    sides: Sides,
    delta: i32,
) {
    for (x, y) in MidpointArc::new(r) {
        if sides.contains(Sides::RIGHT) {
            pen.vrun(cx + x, cy - y, 2 * y + 1 + delta);
            pen.vrun(cx + y, cy - x, 2 * x + 1 + delta);
        }
        if sides.contains(Sides::LEFT) {
            pen.vrun(cx - x, cy - y, 2 * y + 1 + delta);
            pen.vrun(cx - y, cy - x, 2 * x + 1 + delta);
        }
    }
}

/// Rounded rectangle outline with corner radius `r`
pub fn round_rect<S: PixelSink + ?Sized>(
    sink: &mut S,
    x: i16,
    y: i16,
    w: i16,
    h: i16,
    r: i16,
    color: Color,
) {
    let (x32, y32, w32, h32, r32) = (
        i32::from(x),
        i32::from(y),
        i32::from(w),
        i32::from(h),
        i32::from(r),
    );
    let mut pen = Pen::new(sink, color);
    pen.hrun(x32 + r32, y32, w32 - 2 * r32);
    pen.hrun(x32 + r32, y32 + h32 - 1, w32 - 2 * r32);
    pen.vrun(x32, y32 + r32, h32 - 2 * r32);
    pen.vrun(x32 + w32 - 1, y32 + r32, h32 - 2 * r32);

    let (left, right) = (x32 + r32, x32 + w32 - r32 - 1);
    let (top, bottom) = (y32 + r32, y32 + h32 - r32 - 1);
    corner_arcs(&mut pen, left, top, r, Corners::TOP_LEFT);
    corner_arcs(&mut pen, right, top, r, Corners::TOP_RIGHT);
    corner_arcs(&mut pen, right, bottom, r, Corners::BOTTOM_RIGHT);
    corner_arcs(&mut pen, left, bottom, r, Corners::BOTTOM_LEFT);
}

/// Solid rounded rectangle: a central slab plus two stretched half-disks
pub fn fill_round_rect<S: PixelSink + ?Sized>(
    sink: &mut S,
    x: i16,
    y: i16,
    w: i16,
    h: i16,
    r: i16,
    color: Color,
) {
    let (x32, y32, w32, h32, r32) = (
        i32::from(x),
        i32::from(y),
        i32::from(w),
        i32::from(h),
        i32::from(r),
    );
    let mut pen = Pen::new(sink, color);
    fill_area(&mut pen, x32 + r32, y32, w32 - 2 * r32, h32);

    let delta = h32 - 2 * r32 - 1;
    let top = y32 + r32;
    half_disks(&mut pen, x32 + w32 - r32 - 1, top, r, Sides::RIGHT, delta);
    half_disks(&mut pen, x32 + r32, top, r, Sides::LEFT, delta);
}

/// Triangle outline
pub fn triangle<S: PixelSink + ?Sized>(
    sink: &mut S,
    x0: i16,
    y0: i16,
    x1: i16,
    y1: i16,
    x2: i16,
    y2: i16,
    color: Color,
) {
    line(sink, x0, y0, x1, y1, color);
    line(sink, x1, y1, x2, y2, color);
    line(sink, x2, y2, x0, y0, color);
}

/// Solid triangle as one horizontal run per scanline.
///
/// Vertices are sorted by Y, then the upper part (edges 0-1 and 0-2) and
/// the lower part (edges 1-2 and 0-2) are scanned with running
/// numerators. The middle scanline belongs to the upper loop only when the
/// bottom edge is flat, so each row from top to bottom is emitted once.
pub fn fill_triangle<S: PixelSink + ?Sized>(
    sink: &mut S,
    x0: i16,
    y0: i16,
    x1: i16,
    y1: i16,
    x2: i16,
    y2: i16,
    color: Color,
) {
    // Numerators reach |dx * dy|, past i32 for full-range vertices.
    let mut v = [
        (i64::from(x0), i64::from(y0)),
        (i64::from(x1), i64::from(y1)),
        (i64::from(x2), i64::from(y2)),
    ];
    if v[0].1 > v[1].1 {
        v.swap(0, 1);
    }
    if v[1].1 > v[2].1 {
        v.swap(1, 2);
    }
    if v[0].1 > v[1].1 {
        v.swap(0, 1);
    }
    let [(x0, y0), (x1, y1), (x2, y2)] = v;
    let mut pen = Pen::new(sink, color);

    if y0 == y2 {
        span(&mut pen, x0.min(x1).min(x2), x0.max(x1).max(x2), y0);
        return;
    }

    let (dx01, dy01) = (x1 - x0, y1 - y0);
    let (dx02, dy02) = (x2 - x0, y2 - y0);
    let (dx12, dy12) = (x2 - x1, y2 - y1);

    let last = if y1 == y2 { y1 } else { y1 - 1 };

    let mut sa = 0;
    let mut sb = 0;
    let mut y = y0;
    while y <= last {
        let a = x0 + sa / dy01;
        let b = x0 + sb / dy02;
        sa += dx01;
        sb += dx02;
        span(&mut pen, a, b, y);
        y += 1;
    }

    sa = dx12 * (y - y1);
    sb = dx02 * (y - y0);
    while y <= y2 {
        let a = x1 + sa / dy12;
        let b = x0 + sb / dy02;
        sa += dx12;
        sb += dx02;
        span(&mut pen, a, b, y);
        y += 1;
    }
}

// Edge intersections stay within the vertex range, so they fit in i32.
fn span<S: PixelSink + ?Sized>(pen: &mut Pen<'_, S>, a: i64, b: i64, y: i64) {
    let (a, b) = if a > b { (b, a) } else { (a, b) };
    pen.hrun(a as i32, y as i32, (b - a + 1) as i32);
}
