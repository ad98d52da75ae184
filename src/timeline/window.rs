//! Row virtualization
//!
//! Given the vertical scroll offset and viewport height, decide which rows the
//! renderer must materialize. Rows outside the window are replaced by one
//! spacer above and one below, so the total scroll height stays correct.

use crate::config::EngineConfig;
use serde::Serialize;
use tracing::trace;

/// Rows to materialize for the current scroll position
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VisibleWindow {
    /// First row to render (inclusive)
    pub start_index: usize,
    /// Last row to render (exclusive)
    pub end_index: usize,
    /// Height of the spacer standing in for rows `0..start_index`
    pub before_extent: f64,
    /// Height of the spacer standing in for rows `end_index..row_count`
    pub after_extent: f64,
    /// False when every row is rendered
    pub virtualized: bool,
}

impl VisibleWindow {
    /// Window covering every row
    pub fn all(row_count: usize) -> Self {
        Self {
            start_index: 0,
            end_index: row_count,
            before_extent: 0.0,
            after_extent: 0.0,
            virtualized: false,
        }
    }

    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.start_index..self.end_index).contains(&index)
    }
}

/// Compute the rows to materialize
///
/// # Arguments
/// * `row_count` - Total number of rows
/// * `row_height` - Fixed height of every row
/// * `scroll_top` - Vertical scroll offset of the body
/// * `viewport_height` - Visible body height
/// * `overscan` - Extra rows rendered on each side
/// * `threshold` - Virtualization only applies when `row_count > threshold`
///
/// # Description
/// `start = max(0, floor(scroll_top / row_height) - overscan)` and
/// `end = min(row_count, ceil((scroll_top + viewport_height) / row_height) + overscan)`.
/// A non-finite or non-positive row height renders everything.
pub fn compute_visible_window(
    row_count: usize,
    row_height: f64,
    scroll_top: f64,
    viewport_height: f64,
    overscan: usize,
    threshold: usize,
) -> VisibleWindow {
    if row_count <= threshold || !row_height.is_finite() || row_height <= 0.0 {
        return VisibleWindow::all(row_count);
    }

    let scroll_top = if scroll_top.is_finite() { scroll_top.max(0.0) } else { 0.0 };
    let viewport_height = if viewport_height.is_finite() { viewport_height.max(0.0) } else { 0.0 };

    let first_visible = (scroll_top / row_height).floor() as usize;
    let last_visible = ((scroll_top + viewport_height) / row_height).ceil() as usize;

    let start_index = first_visible.saturating_sub(overscan).min(row_count);
    let end_index = last_visible.saturating_add(overscan).min(row_count).max(start_index);

    trace!(row_count, scroll_top, start_index, end_index, "visible window");

    VisibleWindow {
        start_index,
        end_index,
        before_extent: start_index as f64 * row_height,
        after_extent: (row_count - end_index) as f64 * row_height,
        virtualized: true,
    }
}

/// Scroll-state controller for the timeline body
///
/// Owns the inputs of [`compute_visible_window`] and caches the latest result,
/// so hosts can feed it scroll and resize events and read back the window.
#[derive(Debug, Clone)]
pub struct TimelineViewport {
    row_count: usize,
    row_height: f64,
    overscan: usize,
    threshold: usize,
    scroll_top: f64,
    viewport_height: f64,
    window: VisibleWindow,
}

impl TimelineViewport {
    pub fn new(config: &EngineConfig, row_count: usize, viewport_height: f64) -> Self {
        let mut viewport = Self {
            row_count,
            row_height: config.row_height,
            overscan: config.overscan,
            threshold: config.virtualization_threshold,
            scroll_top: 0.0,
            viewport_height,
            window: VisibleWindow::all(row_count),
        };
        viewport.recompute();
        viewport
    }

    fn recompute(&mut self) {
        self.scroll_top = self.clamp_scroll(self.scroll_top);
        self.window = compute_visible_window(
            self.row_count,
            self.row_height,
            self.scroll_top,
            self.viewport_height,
            self.overscan,
            self.threshold,
        );
    }

    /// Total height of all rows
    pub fn content_height(&self) -> f64 {
        self.row_count as f64 * self.row_height
    }

    /// Largest scroll offset that still fills the viewport
    pub fn max_scroll_top(&self) -> f64 {
        (self.content_height() - self.viewport_height).max(0.0)
    }

    fn clamp_scroll(&self, scroll_top: f64) -> f64 {
        if scroll_top.is_finite() {
            scroll_top.clamp(0.0, self.max_scroll_top())
        } else {
            0.0
        }
    }

    pub fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    pub fn window(&self) -> VisibleWindow {
        self.window
    }

    /// Handle a body scroll event; returns the new window
    pub fn set_scroll_top(&mut self, scroll_top: f64) -> VisibleWindow {
        self.scroll_top = scroll_top;
        self.recompute();
        self.window
    }

    /// Handle a viewport resize; returns the new window
    pub fn set_viewport_height(&mut self, viewport_height: f64) -> VisibleWindow {
        self.viewport_height = viewport_height.max(0.0);
        self.recompute();
        self.window
    }

    /// Handle a new model with a different number of rows
    pub fn set_row_count(&mut self, row_count: usize) -> VisibleWindow {
        self.row_count = row_count;
        self.recompute();
        self.window
    }

    /// Scroll offset that brings `index` to the top of the viewport
    pub fn scroll_to_row(&mut self, index: usize) -> VisibleWindow {
        let index = index.min(self.row_count.saturating_sub(1));
        self.set_scroll_top(index as f64 * self.row_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_lists_render_everything() {
        let window = compute_visible_window(50, 36.0, 900.0, 360.0, 6, 50);
        assert_eq!(window, VisibleWindow::all(50));
        assert!(!window.virtualized);
    }

    #[test]
    fn test_window_at_top_is_clamped() {
        let window = compute_visible_window(200, 36.0, 0.0, 360.0, 6, 50);
        assert_eq!(window.start_index, 0);
        assert_eq!(window.end_index, 16);
        assert_eq!(window.before_extent, 0.0);
        assert_eq!(window.after_extent, 184.0 * 36.0);
    }

    #[test]
    fn test_window_in_middle() {
        // rows 50..60 visible, plus 6 overscan each side
        let window = compute_visible_window(200, 36.0, 50.0 * 36.0, 360.0, 6, 50);
        assert_eq!(window.start_index, 44);
        assert_eq!(window.end_index, 66);
        assert_eq!(window.len(), 10 + 2 * 6);
    }

    #[test]
    fn test_invalid_row_height_renders_everything() {
        let all = VisibleWindow::all(100);
        assert_eq!(compute_visible_window(100, 0.0, 10.0, 300.0, 6, 50), all);
        assert_eq!(compute_visible_window(100, f64::NAN, 10.0, 300.0, 6, 50), all);
    }

    #[test]
    fn test_viewport_clamps_scroll() {
        let config = EngineConfig::default();
        let mut viewport = TimelineViewport::new(&config, 100, 360.0);
        viewport.set_scroll_top(1.0e9);
        assert_eq!(viewport.scroll_top(), 100.0 * 36.0 - 360.0);
        assert_eq!(viewport.window().end_index, 100);

        viewport.set_scroll_top(-50.0);
        assert_eq!(viewport.scroll_top(), 0.0);
        assert_eq!(viewport.window().start_index, 0);
    }

    #[test]
    fn test_viewport_row_count_change() {
        let config = EngineConfig::default();
        let mut viewport = TimelineViewport::new(&config, 500, 360.0);
        viewport.scroll_to_row(400);
        assert!(viewport.window().contains(400));

        let window = viewport.set_row_count(20);
        assert_eq!(window, VisibleWindow::all(20));
        assert_eq!(viewport.scroll_top(), 20.0 * 36.0 - 360.0);
    }
}
