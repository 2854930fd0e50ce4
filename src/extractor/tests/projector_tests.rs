//! Tests for central-slice projection

use ndarray::{Array3, Axis};

use crate::errors::TomoError;
use crate::extractor::projector::project_central_slices;

fn ramp_volume(depth: usize) -> Array3<f32> {
    // Each section z is constant z + 1, so a window sum identifies
    // exactly which sections were included
    Array3::from_shape_fn((depth, 2, 2), |(z, _, _)| (z + 1) as f32)
}

#[test]
fn test_single_slice_takes_middle_section() {
    let volume = ramp_volume(4);
    let image = project_central_slices(&volume, 1).unwrap();
    // depth 4: mid = 2, window [2, 3)
    assert_eq!(image[[0, 0]], 3.0);
}

#[test]
fn test_window_is_centered() {
    let volume = ramp_volume(5);
    let image = project_central_slices(&volume, 3).unwrap();
    // depth 5: mid = 2, window [1, 4) -> 2 + 3 + 4
    assert_eq!(image[[0, 0]], 9.0);
}

#[test]
fn test_n_larger_than_depth_clamps_to_full_depth() {
    let volume = ramp_volume(3);
    let image = project_central_slices(&volume, 10).unwrap();
    assert_eq!(image[[0, 0]], 1.0 + 2.0 + 3.0);
}

#[test]
fn test_window_shifts_at_edge_without_shrinking() {
    let volume = ramp_volume(4);
    let image = project_central_slices(&volume, 4).unwrap();
    // depth 4, n 4: the centered start (mid - 2 = 0) already touches the
    // low edge; the window must still span all 4 sections
    assert_eq!(image[[0, 0]], 1.0 + 2.0 + 3.0 + 4.0);

    let volume = ramp_volume(5);
    let image = project_central_slices(&volume, 4).unwrap();
    // depth 5, n 4: start = max(0, 2 - 2) = 0, window [0, 4)
    assert_eq!(image[[0, 0]], 1.0 + 2.0 + 3.0 + 4.0);
}

#[test]
fn test_full_depth_equals_axis_sum() {
    let volume = Array3::from_shape_fn((6, 3, 3), |(z, y, x)| (z * 9 + y * 3 + x) as f32);
    let image = project_central_slices(&volume, 6).unwrap();
    assert_eq!(image, volume.sum_axis(Axis(0)));
}

#[test]
fn test_zero_slices_is_invalid() {
    let volume = ramp_volume(4);
    assert!(matches!(
        project_central_slices(&volume, 0),
        Err(TomoError::InvalidParameter(_))
    ));
}

#[test]
fn test_lateral_shape_is_preserved() {
    let volume = Array3::<f32>::zeros((8, 5, 7));
    let image = project_central_slices(&volume, 3).unwrap();
    assert_eq!(image.dim(), (5, 7));
}
