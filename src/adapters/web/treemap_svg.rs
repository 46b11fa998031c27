//! Squarified treemap SVG rendering.
//!
//! Tiles are packed with the squarified algorithm: rows of tiles laid
//! along the shorter side of the remaining free area, each row grown while
//! its worst aspect ratio keeps improving. Fill colors come from a
//! diverging red/gray/green palette centered at zero and scaled so the
//! strongest mover in the layout saturates one end.

use crate::domain::layout::{Tile, TreemapLayout};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

const COLOR_STOPS: [(f64, [u8; 3]); 5] = [
    (0.0, [0xc6, 0x28, 0x28]),
    (0.45, [0xe5, 0x73, 0x73]),
    (0.5, [0x78, 0x90, 0x9c]),
    (0.55, [0x66, 0xbb, 0x6a]),
    (1.0, [0x2e, 0x7d, 0x32]),
];

/// Compute tile rectangles for the given sizing weights inside a
/// `width` x `height` canvas. Rectangles come back in input order and
/// tile their whole canvas: each area is proportional to its weight.
pub fn layout_rects(sizes: &[f64], width: f64, height: f64) -> Vec<Rect> {
    let total: f64 = sizes.iter().sum();
    if sizes.is_empty() || total <= 0.0 || width <= 0.0 || height <= 0.0 {
        return Vec::new();
    }

    let scale = width * height / total;
    let areas: Vec<f64> = sizes.iter().map(|s| s * scale).collect();

    let mut rects = Vec::with_capacity(areas.len());
    let mut free = Rect {
        x: 0.0,
        y: 0.0,
        w: width,
        h: height,
    };

    let mut start = 0;
    while start < areas.len() {
        let side = free.w.min(free.h);
        let mut end = start + 1;
        let mut row_sum = areas[start];
        let mut worst = worst_ratio(&areas[start..end], row_sum, side);

        while end < areas.len() {
            let next_sum = row_sum + areas[end];
            let next_worst = worst_ratio(&areas[start..end + 1], next_sum, side);
            if next_worst > worst {
                break;
            }
            row_sum = next_sum;
            worst = next_worst;
            end += 1;
        }

        lay_row(&areas[start..end], row_sum, &mut free, &mut rects);
        start = end;
    }

    rects
}

/// Worst aspect ratio in a row of `areas` laid along a side of the given
/// length, where 1.0 is a perfect square.
fn worst_ratio(areas: &[f64], row_sum: f64, side: f64) -> f64 {
    let thickness = row_sum / side;
    let mut worst = 1.0f64;
    for &area in areas {
        let length = area / thickness;
        let ratio = if length > thickness {
            length / thickness
        } else {
            thickness / length
        };
        worst = worst.max(ratio);
    }
    worst
}

fn lay_row(areas: &[f64], row_sum: f64, free: &mut Rect, out: &mut Vec<Rect>) {
    if free.w >= free.h {
        // column against the left edge of the free area
        let strip_w = row_sum / free.h;
        let mut y = free.y;
        for &area in areas {
            let h = area / strip_w;
            out.push(Rect {
                x: free.x,
                y,
                w: strip_w,
                h,
            });
            y += h;
        }
        free.x += strip_w;
        free.w -= strip_w;
    } else {
        // row against the top edge
        let strip_h = row_sum / free.w;
        let mut x = free.x;
        for &area in areas {
            let w = area / strip_h;
            out.push(Rect {
                x,
                y: free.y,
                w,
                h: strip_h,
            });
            x += w;
        }
        free.y += strip_h;
        free.h -= strip_h;
    }
}

/// Map a percent change to a fill color. `limit` is the largest absolute
/// change in the layout; zero always lands on the neutral gray.
pub fn diverging_color(change_pct: f64, limit: f64) -> String {
    let limit = if limit > 0.0 { limit } else { 1.0 };
    let t = ((change_pct / limit).clamp(-1.0, 1.0) + 1.0) / 2.0;

    let mut rgb = COLOR_STOPS[COLOR_STOPS.len() - 1].1;
    for pair in COLOR_STOPS.windows(2) {
        let (p0, c0) = pair[0];
        let (p1, c1) = pair[1];
        if t <= p1 {
            let f = if p1 > p0 { (t - p0) / (p1 - p0) } else { 0.0 };
            rgb = [
                lerp_channel(c0[0], c1[0], f),
                lerp_channel(c0[1], c1[1], f),
                lerp_channel(c0[2], c1[2], f),
            ];
            break;
        }
    }

    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}

fn lerp_channel(a: u8, b: u8, f: f64) -> u8 {
    (a as f64 + (b as f64 - a as f64) * f).round() as u8
}

/// Render the layout as an SVG document string.
pub fn render_treemap_svg(layout: &TreemapLayout, width: f64, height: f64) -> String {
    if layout.tiles.is_empty() {
        return String::from("<p class=\"empty\">No holdings to draw.</p>");
    }

    let limit = layout
        .tiles
        .iter()
        .map(|t| t.color_value.abs())
        .fold(0.0, f64::max);
    let sizes: Vec<f64> = layout.tiles.iter().map(|t| t.size).collect();
    let rects = layout_rects(&sizes, width, height);

    let mut svg = format!(
        "<svg viewBox=\"0 0 {:.0} {:.0}\" xmlns=\"http://www.w3.org/2000/svg\" \
         preserveAspectRatio=\"xMidYMid meet\" role=\"img\">",
        width, height
    );

    for (tile, rect) in layout.tiles.iter().zip(&rects) {
        svg.push_str(&format!(
            "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" \
             fill=\"{}\" stroke=\"#263238\" stroke-width=\"2\"/>",
            rect.x,
            rect.y,
            rect.w,
            rect.h,
            diverging_color(tile.color_value, limit)
        ));
        push_label(&mut svg, tile, rect);
    }

    svg.push_str("</svg>");
    svg
}

fn font_size(idx: usize, lines: usize) -> f64 {
    match (idx, lines) {
        (0, _) => 16.0,
        (1, _) => 20.0,
        (i, n) if i + 1 == n => 10.0,
        (2, 5) => 12.0,
        _ => 14.0,
    }
}

fn push_label(svg: &mut String, tile: &Tile, rect: &Rect) {
    // small tiles show at most the ticker line, tiny ones nothing
    let lines: &[String] = if rect.h >= 110.0 && rect.w >= 130.0 {
        &tile.label
    } else if rect.h >= 26.0 && rect.w >= 50.0 && !tile.label.is_empty() {
        &tile.label[..1]
    } else {
        return;
    };

    let cx = rect.x + rect.w / 2.0;
    let heights: Vec<f64> = (0..lines.len())
        .map(|i| font_size(i, tile.label.len()) * 1.35)
        .collect();
    let block: f64 = heights.iter().sum();
    let mut baseline = rect.y + rect.h / 2.0 - block / 2.0;

    for (i, line) in lines.iter().enumerate() {
        let size = font_size(i, tile.label.len());
        baseline += heights[i];
        let weight = if i <= 1 { " font-weight=\"bold\"" } else { "" };
        svg.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"{:.0}\" fill=\"#ffffff\" \
             text-anchor=\"middle\" font-family=\"Helvetica, Arial, sans-serif\"{}>{}</text>",
            cx,
            baseline - size * 0.35,
            size,
            weight,
            line
        ));
    }
}
