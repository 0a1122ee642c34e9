//! Per-event render pass over the tail of the line store.
//!
//! Each UI event (keystroke, resize, tick) produces a fresh [`Frame`]: the filter text
//! is parsed, the store is locked and walked from the newest line backward until
//! enough matches fill the viewport, and the matches are laid out oldest-first above
//! the filter input row and the status row.
//!
//! The scan stops early once the window is full, so its cost tracks the number of
//! matches needed rather than the store size, except when a highly selective filter
//! forces a walk over a long non-matching tail.

use crate::filter::Query;
use crate::store::{LineStore, Snapshot};
use std::time::Instant;

/// Scans slower than this are traced.
const SLOW_SCAN_MICROS: u128 = 20_000;

/// Smallest usable reserve: the input row and the status row.
pub const MIN_RESERVED_ROWS: usize = 2;

/// Terminal dimensions used for a render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: usize,
    pub height: usize,
}

impl Viewport {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Longest line prefix that fits, in characters.
    pub fn line_limit(&self) -> usize {
        self.width.saturating_sub(1)
    }
}

/// Row budgeting for the match window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Rows subtracted from the viewport height to cap the number of matches
    pub reserved_rows: usize,
    /// When set, blank rows are added above short results up to `height - pad`
    pub pad_reserve: Option<usize>,
}

impl RenderOptions {
    /// Maximum number of match rows for a viewport.
    ///
    /// Reserves below [`MIN_RESERVED_ROWS`] are raised to it.
    pub fn max_matches(&self, viewport: Viewport) -> usize {
        viewport
            .height
            .saturating_sub(self.reserved_rows.max(MIN_RESERVED_ROWS))
    }

    /// Row count short results are padded up to, if padding is enabled.
    pub fn pad_target(&self, viewport: Viewport) -> Option<usize> {
        self.pad_reserve
            .map(|reserve| viewport.height.saturating_sub(reserve.max(MIN_RESERVED_ROWS)))
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            reserved_rows: 3,
            pad_reserve: Some(2),
        }
    }
}

/// Output of one render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Display rows, top to bottom: padding, matches, input row, status row
    pub rows: Vec<String>,
    /// Store length at the instant of the scan
    pub total_lines: usize,
    /// Query the frame was rendered with
    pub query: Query,
}

impl Frame {
    /// The whole frame as one newline-joined block.
    pub fn text(&self) -> String {
        self.rows.join("\n")
    }

    /// Rows above the input and status rows.
    pub fn content_rows(&self) -> &[String] {
        let end = self.rows.len().saturating_sub(2);
        &self.rows[..end]
    }

    pub fn input_row(&self) -> Option<&str> {
        self.rows.len().checked_sub(2).map(|i| self.rows[i].as_str())
    }

    pub fn status_row(&self) -> Option<&str> {
        self.rows.last().map(String::as_str)
    }
}

/// Builds frames from the shared line store.
#[derive(Debug, Clone, Default)]
pub struct RenderPipeline {
    options: RenderOptions,
}

impl RenderPipeline {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Run one render pass.
    ///
    /// `input_row` is the filter widget's rendered form; it is placed verbatim below
    /// the matches.
    pub fn render(
        &self,
        store: &LineStore,
        filter_text: &str,
        input_row: &str,
        viewport: Viewport,
    ) -> Frame {
        let query = Query::parse(filter_text);
        let max_matches = self.options.max_matches(viewport);

        let started = Instant::now();
        let (mut rows, total_lines) = {
            let snapshot = store.snapshot();
            let window = collect_window(&snapshot, &query, viewport.line_limit(), max_matches);
            (window, snapshot.len())
        };
        let elapsed = started.elapsed().as_micros();
        if elapsed > SLOW_SCAN_MICROS {
            log::trace!(
                "render scan took {elapsed}us over {total_lines} lines ({} matches)",
                rows.len()
            );
        }

        if let Some(target) = self.options.pad_target(viewport) {
            while rows.len() < target {
                rows.push(String::new());
            }
        }
        rows.reverse();

        rows.push(input_row.to_string());
        rows.push(status_line(&query, total_lines));

        Frame {
            rows,
            total_lines,
            query,
        }
    }
}

/// Walk the snapshot newest-first, keeping up to `max_matches` matching lines.
///
/// Lines are truncated to `line_limit` characters with one trailing newline removed.
/// The result is newest-first; callers reverse it for display.
pub fn collect_window(
    snapshot: &Snapshot<'_>,
    query: &Query,
    line_limit: usize,
    max_matches: usize,
) -> Vec<String> {
    let mut window = Vec::with_capacity(max_matches.min(snapshot.len()));
    if max_matches == 0 {
        return window;
    }

    for line in snapshot.iter_rev() {
        if !query.matches(line) {
            continue;
        }
        let shown = truncate_chars(line, line_limit);
        let shown = shown.strip_suffix('\n').unwrap_or(shown);
        window.push(shown.to_string());
        if window.len() >= max_matches {
            break;
        }
    }

    window
}

/// Prefix of `line` holding at most `limit` characters.
pub fn truncate_chars(line: &str, limit: usize) -> &str {
    match line.char_indices().nth(limit) {
        Some((byte_idx, _)) => &line[..byte_idx],
        None => line,
    }
}

/// Summary of the active terms and the total number of lines received.
pub fn status_line(query: &Query, total_lines: usize) -> String {
    format!(
        "Including: [{}], Excluding: [{}], Total Lines: {} (exclude with !term)",
        query.positive.join(", "),
        query.negative.join(", "),
        total_lines
    )
}
