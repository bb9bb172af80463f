//! Path Consolidator
//!
//! Reduces a depth grid to straight cutting segments. Consecutive cells with
//! the same depth along a scan line become one segment (a run). Neighbouring
//! runs whose depths differ by no more than `margin_edge` are joined by a
//! short sloped transition instead of a tool lift.
//!
//! ```text
//!  __                   __
//! |  |__               |  \__
//! |     |              |     |
//!  1  0.5               1  0.5
//! margin_edge < 0.5    margin_edge >= 0.5
//! ```
//!
//! The left-to-right scan always runs. In [`ConsolidationMode::Both`] a
//! column-major scan over the same grid appends vertical strokes after it.

use heightcarve_core::{CarvingParameters, DepthGrid, Point3, Segment};

/// Relationship between two neighbouring depths on one scan line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuity {
    /// Identical depth, the run continues
    SameRun,
    /// Different depth within the smoothing tolerance, runs are linked by a slope
    Bridgeable,
    /// The tool lifts between the two cells
    Discontinuous,
}

impl Continuity {
    /// Classify the step from depth `a` to depth `b`
    pub fn classify(a: f64, b: f64, margin_edge: f64) -> Self {
        if same_run(a, b) {
            Self::SameRun
        } else if bridgeable(a, b, margin_edge) {
            Self::Bridgeable
        } else {
            Self::Discontinuous
        }
    }
}

/// Exact equality; only this extends a run
pub fn same_run(a: f64, b: f64) -> bool {
    a == b
}

/// Depths close enough to be carved as one continuous surface
pub fn bridgeable(a: f64, b: f64, margin_edge: f64) -> bool {
    (a - b).abs() <= margin_edge
}

#[derive(Debug, Clone, Copy)]
enum ScanOrder {
    RowMajor,
    ColumnMajor,
}

impl ScanOrder {
    fn cell_at(self, grid: &DepthGrid, step: usize) -> usize {
        match self {
            Self::RowMajor => step,
            Self::ColumnMajor => grid.index(step % grid.height, step / grid.height),
        }
    }

    fn same_line(self, grid: &DepthGrid, a: usize, b: usize) -> bool {
        match self {
            Self::RowMajor => grid.real_y(a) == grid.real_y(b),
            Self::ColumnMajor => grid.real_x(a) == grid.real_x(b),
        }
    }
}

/// Turns a [`DepthGrid`] into an ordered list of [`Segment`]s
pub struct PathConsolidator<'a> {
    params: &'a CarvingParameters,
}

impl<'a> PathConsolidator<'a> {
    /// Create a new consolidator for the given parameters
    pub fn new(params: &'a CarvingParameters) -> Self {
        Self { params }
    }

    /// Run the scans selected by `consolidation_mode`
    pub fn consolidate(&self, grid: &DepthGrid) -> Vec<Segment> {
        let mut segments = Vec::new();
        self.left_to_right(grid, &mut segments);
        let horizontal = segments.len();

        if self.params.consolidation_mode.includes_up_to_down() {
            self.up_to_down(grid, &mut segments);
        }

        tracing::debug!(
            horizontal,
            vertical = segments.len() - horizontal,
            mode = %self.params.consolidation_mode,
            "Consolidated depth grid"
        );
        segments
    }

    /// Row-major scan, appending horizontal strokes to `segments`
    pub fn left_to_right(&self, grid: &DepthGrid, segments: &mut Vec<Segment>) {
        self.scan(grid, ScanOrder::RowMajor, segments);
    }

    /// Column-major scan, appending vertical strokes to `segments`
    pub fn up_to_down(&self, grid: &DepthGrid, segments: &mut Vec<Segment>) {
        self.scan(grid, ScanOrder::ColumnMajor, segments);
    }

    fn scan(&self, grid: &DepthGrid, order: ScanOrder, segments: &mut Vec<Segment>) {
        if grid.is_empty() {
            return;
        }

        let mut run_start = order.cell_at(grid, 0);
        let mut run_end = run_start;

        for step in 1..grid.len() {
            let cell = order.cell_at(grid, step);
            let run_depth = grid.value(run_start);

            let continuity = if order.same_line(grid, run_start, cell) {
                Continuity::classify(run_depth, grid.value(cell), self.params.margin_edge)
            } else {
                Continuity::Discontinuous
            };

            if continuity == Continuity::SameRun {
                run_end = cell;
                continue;
            }

            let cell_depth = grid.value(cell);
            if run_depth != 0.0 {
                segments.push(self.segment_between(grid, run_start, run_end));
            }
            // Surface cells never anchor a segment, not even a transition
            if continuity == Continuity::Bridgeable && run_depth != 0.0 && cell_depth != 0.0 {
                segments.push(self.segment_between(grid, run_end, cell));
            }

            run_start = cell;
            run_end = cell;
        }

        if grid.value(run_start) != 0.0 {
            segments.push(self.segment_between(grid, run_start, run_end));
        }
    }

    fn segment_between(&self, grid: &DepthGrid, a: usize, b: usize) -> Segment {
        Segment::new(self.cell_point(grid, a), self.cell_point(grid, b))
    }

    fn cell_point(&self, grid: &DepthGrid, index: usize) -> Point3 {
        Point3::new(
            grid.real_x(index),
            grid.real_y(index),
            self.params.real_z(grid.value(index)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heightcarve_core::ConsolidationMode;

    fn params(margin_edge: f64, mode: ConsolidationMode) -> CarvingParameters {
        CarvingParameters {
            margin_edge,
            consolidation_mode: mode,
            ..Default::default()
        }
    }

    fn pt(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn test_predicates() {
        assert!(same_run(0.5, 0.5));
        assert!(!same_run(0.5, 0.50001));
        assert!(bridgeable(0.4, 0.5, 0.1));
        assert!(!bridgeable(0.4, 0.5, 0.05));
        assert_eq!(Continuity::classify(0.3, 0.3, 0.0), Continuity::SameRun);
        assert_eq!(Continuity::classify(0.3, 0.35, 0.1), Continuity::Bridgeable);
        assert_eq!(Continuity::classify(0.3, 0.9, 0.1), Continuity::Discontinuous);
    }

    #[test]
    fn test_full_black_rows() {
        let p = params(0.0, ConsolidationMode::LeftToRight);
        let grid = DepthGrid::new(2, 2, 1.0, vec![1.0; 4]);
        let segments = PathConsolidator::new(&p).consolidate(&grid);

        assert_eq!(
            segments,
            vec![
                Segment::new(pt(0.5, 1.5, -1.0), pt(1.5, 1.5, -1.0)),
                Segment::new(pt(0.5, 0.5, -1.0), pt(1.5, 0.5, -1.0)),
            ]
        );
    }

    #[test]
    fn test_single_cell_is_a_point() {
        let p = params(0.0, ConsolidationMode::LeftToRight);
        let grid = DepthGrid::new(1, 1, 0.25, vec![0.5]);
        let segments = PathConsolidator::new(&p).consolidate(&grid);

        assert_eq!(segments.len(), 1);
        assert!(segments[0].is_point());
        assert_eq!(segments[0].start, pt(0.125, 0.125, -0.5));
    }

    #[test]
    fn test_blank_grid_yields_nothing() {
        let p = params(0.5, ConsolidationMode::Both);
        let grid = DepthGrid::new(3, 2, 1.0, vec![0.0; 6]);
        assert!(PathConsolidator::new(&p).consolidate(&grid).is_empty());
    }

    #[test]
    fn test_empty_grid_yields_nothing() {
        let p = params(0.0, ConsolidationMode::Both);
        let grid = DepthGrid::empty(1.0);
        assert!(PathConsolidator::new(&p).consolidate(&grid).is_empty());
    }

    #[test]
    fn test_smoothing_links_runs() {
        let p = params(0.1, ConsolidationMode::LeftToRight);
        let grid = DepthGrid::new(2, 1, 1.0, vec![0.4, 0.5]);
        let segments = PathConsolidator::new(&p).consolidate(&grid);

        assert_eq!(
            segments,
            vec![
                Segment::new(pt(0.5, 0.5, -0.4), pt(0.5, 0.5, -0.4)),
                Segment::new(pt(0.5, 0.5, -0.4), pt(1.5, 0.5, -0.5)),
                Segment::new(pt(1.5, 0.5, -0.5), pt(1.5, 0.5, -0.5)),
            ]
        );
    }

    #[test]
    fn test_tight_margin_leaves_runs_disconnected() {
        let p = params(0.05, ConsolidationMode::LeftToRight);
        let grid = DepthGrid::new(2, 1, 1.0, vec![0.4, 0.5]);
        let segments = PathConsolidator::new(&p).consolidate(&grid);

        assert_eq!(segments.len(), 2);
        assert!(segments.iter().all(Segment::is_point));
    }

    #[test]
    fn test_no_bridge_across_rows() {
        // Last cell of row 0 and first cell of row 1 are adjacent in memory only
        let p = params(1.0, ConsolidationMode::LeftToRight);
        let grid = DepthGrid::new(2, 2, 1.0, vec![0.2, 0.2, 0.3, 0.3]);
        let segments = PathConsolidator::new(&p).consolidate(&grid);

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].start.y, segments[0].end.y);
        assert_eq!(segments[1].start.y, segments[1].end.y);
    }

    #[test]
    fn test_zero_cells_split_runs() {
        let p = params(0.0, ConsolidationMode::LeftToRight);
        let grid = DepthGrid::new(5, 1, 1.0, vec![1.0, 1.0, 0.0, 1.0, 0.0]);
        let segments = PathConsolidator::new(&p).consolidate(&grid);

        assert_eq!(
            segments,
            vec![
                Segment::new(pt(0.5, 0.5, -1.0), pt(1.5, 0.5, -1.0)),
                Segment::new(pt(3.5, 0.5, -1.0), pt(3.5, 0.5, -1.0)),
            ]
        );
    }

    #[test]
    fn test_no_transition_to_surface() {
        // The step 0.2 -> 0 is within the margin but the surface cell is skipped
        let p = params(0.25, ConsolidationMode::LeftToRight);
        let grid = DepthGrid::new(3, 1, 1.0, vec![0.0, 0.2, 0.0]);
        let segments = PathConsolidator::new(&p).consolidate(&grid);

        assert_eq!(
            segments,
            vec![Segment::new(pt(1.5, 0.5, -0.2), pt(1.5, 0.5, -0.2))]
        );
    }

    #[test]
    fn test_vertical_transition_links_runs() {
        let p = params(0.1, ConsolidationMode::Both);
        // 1 wide, 2 tall: 0.4 on top, 0.5 below
        let grid = DepthGrid::new(1, 2, 1.0, vec![0.4, 0.5]);
        let mut vertical = Vec::new();
        PathConsolidator::new(&p).up_to_down(&grid, &mut vertical);

        assert_eq!(
            vertical,
            vec![
                Segment::new(pt(0.5, 1.5, -0.4), pt(0.5, 1.5, -0.4)),
                Segment::new(pt(0.5, 1.5, -0.4), pt(0.5, 0.5, -0.5)),
                Segment::new(pt(0.5, 0.5, -0.5), pt(0.5, 0.5, -0.5)),
            ]
        );

        let both = PathConsolidator::new(&p).consolidate(&grid);
        assert_eq!(both.len(), 2 + vertical.len());
        assert_eq!(&both[2..], vertical.as_slice());
    }

    #[test]
    fn test_tight_margin_leaves_columns_disconnected() {
        let p = params(0.05, ConsolidationMode::Both);
        let grid = DepthGrid::new(1, 2, 1.0, vec![0.4, 0.5]);
        let mut vertical = Vec::new();
        PathConsolidator::new(&p).up_to_down(&grid, &mut vertical);

        assert_eq!(vertical.len(), 2);
        assert!(vertical.iter().all(Segment::is_point));
    }

    #[test]
    fn test_up_to_down_appends_columns() {
        let p = params(0.0, ConsolidationMode::Both);
        // 2 wide, 3 tall; column 0 fully carved, column 1 only at the bottom
        let grid = DepthGrid::new(2, 3, 1.0, vec![1.0, 0.0, 1.0, 0.0, 1.0, 1.0]);
        let segments = PathConsolidator::new(&p).consolidate(&grid);

        let mut horizontal = Vec::new();
        PathConsolidator::new(&p).left_to_right(&grid, &mut horizontal);
        assert_eq!(&segments[..horizontal.len()], horizontal.as_slice());

        let vertical = &segments[horizontal.len()..];
        assert_eq!(
            vertical,
            &[
                Segment::new(pt(0.5, 2.5, -1.0), pt(0.5, 0.5, -1.0)),
                Segment::new(pt(1.5, 0.5, -1.0), pt(1.5, 0.5, -1.0)),
            ]
        );
    }

    #[test]
    fn test_trailing_column_run_is_flushed() {
        let p = params(0.0, ConsolidationMode::Both);
        let grid = DepthGrid::new(2, 2, 1.0, vec![0.0, 0.7, 0.0, 0.7]);
        let mut vertical = Vec::new();
        PathConsolidator::new(&p).up_to_down(&grid, &mut vertical);

        assert_eq!(
            vertical,
            vec![Segment::new(pt(1.5, 1.5, -0.7), pt(1.5, 0.5, -0.7))]
        );
    }
}
