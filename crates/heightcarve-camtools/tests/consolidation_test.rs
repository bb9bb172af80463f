use heightcarve_camtools::PathConsolidator;
use heightcarve_core::{CarvingParameters, ConsolidationMode, DepthGrid, Segment};
use proptest::prelude::*;

/// Grids up to 8x8 with depths in quarter steps, so equal depths are exact
fn depth_grid() -> impl Strategy<Value = DepthGrid> {
    (1usize..=8, 1usize..=8).prop_flat_map(|(width, height)| {
        prop::collection::vec(0u8..=4, width * height).prop_map(move |levels| {
            let values = levels.into_iter().map(|l| f64::from(l) / 4.0).collect();
            DepthGrid::new(width, height, 0.5, values)
        })
    })
}

fn margin_edge() -> impl Strategy<Value = f64> {
    prop::sample::select(vec![0.0, 0.1, 0.25, 0.5, 1.0])
}

fn params(margin_edge: f64, consolidation_mode: ConsolidationMode) -> CarvingParameters {
    CarvingParameters {
        margin_edge,
        max_carving_depth: 1.0,
        consolidation_mode,
        ..Default::default()
    }
}

fn horizontal_segments(grid: &DepthGrid, margin_edge: f64) -> Vec<Segment> {
    let params = params(margin_edge, ConsolidationMode::LeftToRight);
    let mut segments = Vec::new();
    PathConsolidator::new(&params).left_to_right(grid, &mut segments);
    segments
}

/// Runs keep one depth; transitions always change depth
fn is_run(segment: &Segment) -> bool {
    segment.start.z == segment.end.z
}

proptest! {
    #[test]
    fn every_carved_cell_in_exactly_one_run(grid in depth_grid(), margin in margin_edge()) {
        let segments = horizontal_segments(&grid, margin);
        let runs: Vec<&Segment> = segments.iter().filter(|s| is_run(s)).collect();

        for index in 0..grid.len() {
            let x = grid.real_x(index);
            let y = grid.real_y(index);
            let covering = runs
                .iter()
                .filter(|s| s.start.y == y && s.start.x <= x && x <= s.end.x)
                .count();

            let expected = if grid.value(index) == 0.0 { 0 } else { 1 };
            prop_assert_eq!(covering, expected, "cell {}", index);
        }
    }

    #[test]
    fn segments_are_row_ordered_and_horizontal(grid in depth_grid(), margin in margin_edge()) {
        let segments = horizontal_segments(&grid, margin);

        let mut previous: Option<(f64, f64)> = None;
        for segment in &segments {
            prop_assert_eq!(segment.start.y, segment.end.y);
            prop_assert!(segment.start.x <= segment.end.x);

            // Top row first, left to right within a row
            let key = (-segment.start.y, segment.start.x);
            if let Some(prev) = previous {
                prop_assert!(prev <= key, "{:?} then {:?}", prev, key);
            }
            previous = Some(key);
        }
    }

    #[test]
    fn transitions_stay_within_margin(grid in depth_grid(), margin in margin_edge()) {
        let segments = horizontal_segments(&grid, margin);

        for segment in segments.iter().filter(|s| !is_run(s)) {
            let step = (segment.start.z - segment.end.z).abs();
            prop_assert!(step > 0.0 && step <= margin);
            prop_assert_eq!(segment.end.x - segment.start.x, grid.cell_size);
        }
    }

    #[test]
    fn no_endpoint_at_surface(grid in depth_grid(), margin in margin_edge()) {
        let params = params(margin, ConsolidationMode::Both);
        let segments = PathConsolidator::new(&params).consolidate(&grid);

        for segment in &segments {
            prop_assert!(segment.start.z < 0.0, "{:?}", segment);
            prop_assert!(segment.end.z < 0.0, "{:?}", segment);
        }
    }

    #[test]
    fn both_mode_appends_vertical_strokes(grid in depth_grid(), margin in margin_edge()) {
        let params = params(margin, ConsolidationMode::Both);
        let both = PathConsolidator::new(&params).consolidate(&grid);
        let horizontal = horizontal_segments(&grid, margin);

        prop_assert!(both.len() >= horizontal.len());
        prop_assert_eq!(&both[..horizontal.len()], horizontal.as_slice());
        for segment in &both[horizontal.len()..] {
            prop_assert_eq!(segment.start.x, segment.end.x);
            prop_assert!(segment.start.y >= segment.end.y);
        }
    }
}

#[test]
fn test_all_surface_grid_yields_nothing() {
    let grid = DepthGrid::new(4, 3, 0.5, vec![0.0; 12]);
    let params = params(1.0, ConsolidationMode::Both);
    assert!(PathConsolidator::new(&params).consolidate(&grid).is_empty());
}
