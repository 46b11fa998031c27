//! Treemap layout description.
//!
//! A pure projection of one snapshot through one view: which tiles exist,
//! how large each is, what colors them and what its label says. Rendering
//! geometry (rectangles, fonts, the SVG itself) is an adapter concern.

use super::rotation::ViewKind;
use super::snapshot::PortfolioSnapshot;

/// One treemap tile.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub ticker: String,
    /// Sizing weight, the holding's market value.
    pub size: f64,
    /// Color driver, the percent change for the active view.
    pub color_value: f64,
    /// Label lines, top to bottom.
    pub label: Vec<String>,
}

/// The full chart description for one view.
#[derive(Debug, Clone, PartialEq)]
pub struct TreemapLayout {
    pub view: ViewKind,
    pub title: &'static str,
    pub tiles: Vec<Tile>,
}

impl TreemapLayout {
    pub fn empty(view: ViewKind) -> Self {
        Self {
            view,
            title: title_for(view),
            tiles: Vec::new(),
        }
    }
}

fn title_for(view: ViewKind) -> &'static str {
    match view {
        ViewKind::Day => "Day Change",
        ViewKind::Week => "7-Day Change",
        ViewKind::Total => "Total Gain/Loss",
    }
}

/// Build the layout for one view of the snapshot. An absent snapshot
/// yields a layout with zero tiles; tile order follows the snapshot.
pub fn build_layout(snapshot: Option<&PortfolioSnapshot>, view: ViewKind) -> TreemapLayout {
    let Some(snapshot) = snapshot else {
        return TreemapLayout::empty(view);
    };

    let tiles = snapshot
        .metrics
        .iter()
        .map(|metric| {
            let (change_pct, change_val) = match view {
                ViewKind::Day => (metric.change_pct_day, metric.change_val_day),
                ViewKind::Week => (metric.change_pct_week, metric.change_val_week),
                ViewKind::Total => (metric.change_pct_total, metric.change_val_total),
            };

            let glyph = if change_pct >= 0.0 { "▲" } else { "▼" };
            let sign = if change_pct >= 0.0 { "+" } else { "" };

            let mut label = vec![
                format!("{} {}", metric.ticker, glyph),
                format!("$ {:.2}", metric.price),
            ];
            if view == ViewKind::Total {
                label.push(format!("Avg: $ {:.2}", metric.avg_price));
            }
            label.push(format!(
                "{sign}{:.2}% | {sign}$ {:.2}",
                change_pct, change_val
            ));
            label.push(format!("Participation: {:.2}%", metric.participation_pct));

            Tile {
                ticker: metric.ticker.clone(),
                size: metric.value,
                color_value: change_pct,
                label,
            }
        })
        .collect();

    TreemapLayout {
        view,
        title: title_for(view),
        tiles,
    }
}
