//! Integration tests for the extraction and projection pipeline

use ndarray::Array3;
use std::fs;
use std::path::PathBuf;

use tomokit::star::labels;
use tomokit::{
    ExtractionConfig, MrcReader, MrcWriter, ProjectionConfig, StarReader, TomoError, Tomokit,
};

/// Creates a fresh workspace directory under the system temp dir
fn workspace(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("tomokit_it_{}_{}", std::process::id(), name));
    fs::remove_dir_all(&dir).ok();
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// Writes a 100x100x100 ramp tomogram plus its list and coords files
fn write_fixture(dir: &PathBuf, coords: &str) -> ExtractionConfig {
    let vol_dir = dir.join("vols");
    let coord_dir = dir.join("coords");
    fs::create_dir_all(&vol_dir).unwrap();
    fs::create_dir_all(&coord_dir).unwrap();

    let tomogram = Array3::from_shape_fn((100, 100, 100), |(z, y, x)| {
        (z * 10000 + y * 100 + x) as f32
    });
    MrcWriter::write_volume(&vol_dir.join("tomo1.mrc"), &tomogram, 1.5).unwrap();
    fs::write(coord_dir.join("tomo1.coords"), coords).unwrap();

    let list = dir.join("tomograms.txt");
    fs::write(&list, "tomo1\n").unwrap();

    ExtractionConfig {
        tomogram_list: list,
        volume_dir: vol_dir,
        coordinate_dir: coord_dir,
        output_dir: dir.join("out"),
        box_size: 20,
        particle_id: "spike".to_string(),
        project: false,
        slices: 1,
    }
}

#[test]
fn test_extraction_single_coordinate() {
    let dir = workspace("single");
    let config = write_fixture(&dir, "50.0 50.0 50.0\n");

    let summary = Tomokit::new().extract(&config).unwrap();
    assert_eq!(summary.tomograms, 1);
    assert_eq!(summary.subvolumes_written, 1);
    assert_eq!(summary.coordinates_skipped, 0);

    // Exactly one subvolume, named with the compacted counter
    let subvolume_path = dir.join("out/3D_subvolumes/tomo1_spike_0001.mrc");
    assert!(subvolume_path.is_file());

    let mut reader = MrcReader::new();
    let subvolume = reader.load(&subvolume_path).unwrap();
    assert_eq!(subvolume.shape(), &[20, 20, 20]);
    assert!((subvolume.voxel_size - 1.5).abs() < 1e-6);

    // Contrast is inverted relative to the source tomogram
    let cube = subvolume.into_3d().unwrap();
    assert_eq!(cube[[0, 0, 0]], -404040.0);

    // The 3D table has one row binding the coordinate to the file
    let mut star_reader = StarReader::new();
    let tables = star_reader
        .load(&dir.join("out/extracted_subvolumes.star"))
        .unwrap();
    let table = StarReader::select_particles(tables).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table.get_f64(0, labels::COORDINATE_X).unwrap(), Some(50.0));
    assert_eq!(
        table.get(0, labels::IMAGE_NAME),
        Some("3D_subvolumes/tomo1_spike_0001.mrc")
    );
    assert_eq!(table.get(0, labels::TOMO_NAME), Some("tomo1"));
    assert_eq!(table.get(0, labels::MICROGRAPH_NAME), Some("tomo1"));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_extraction_out_of_bounds_writes_nothing() {
    let dir = workspace("oob");
    let config = write_fixture(&dir, "5.0 5.0 5.0\n");

    let summary = Tomokit::new().extract(&config).unwrap();
    assert_eq!(summary.subvolumes_written, 0);
    assert_eq!(summary.coordinates_skipped, 1);
    assert!(!dir.join("out/3D_subvolumes/tomo1_spike_0001.mrc").exists());

    // The table is still written, with zero rows
    let mut star_reader = StarReader::new();
    let tables = star_reader
        .load(&dir.join("out/extracted_subvolumes.star"))
        .unwrap();
    let table = StarReader::select_particles(tables).unwrap();
    assert_eq!(table.len(), 0);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_extraction_with_projection() {
    let dir = workspace("project");
    let mut config = write_fixture(&dir, "50.0 50.0 50.0\n");
    config.project = true;
    config.slices = 4;

    let summary = Tomokit::new().extract(&config).unwrap();
    assert_eq!(summary.subvolumes_written, 1);
    assert_eq!(summary.projections_written, 1);

    let projection_path = dir.join("out/2D_projections/2D_tomo1_spike_0001.mrc");
    assert!(projection_path.is_file());

    let mut reader = MrcReader::new();
    let projection = reader.load(&projection_path).unwrap();
    assert_eq!(projection.shape(), &[1, 20, 20]);
    assert!((projection.voxel_size - 1.5).abs() < 1e-6);

    // Depth 20, 4 central sections: window [8, 12) of the subvolume,
    // i.e. tomogram sections 48..52 at (y, x) = (40, 40), inverted
    let image = projection.into_3d().unwrap();
    let expected: f32 = -(48..52).map(|z| (z * 10000 + 40 * 100 + 40) as f32).sum::<f32>();
    assert_eq!(image[[0, 0, 0]], expected);

    // The 2D table carries the source coordinate and tomogram
    let mut star_reader = StarReader::new();
    let tables = star_reader
        .load(&dir.join("out/extracted_subvolumes_2D.star"))
        .unwrap();
    let table = StarReader::select_particles(tables).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(
        table.get(0, labels::IMAGE_NAME),
        Some("2D_projections/2D_tomo1_spike_0001.mrc")
    );
    assert_eq!(table.get(0, labels::MICROGRAPH_NAME), Some("tomo1"));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_extraction_counter_compacts_over_skips() {
    let dir = workspace("compact");
    // Middle coordinate is out of bounds on every axis
    let config = write_fixture(&dir, "50.0 50.0 50.0\n5.0 5.0 5.0\n60.0 60.0 60.0\n");

    let summary = Tomokit::new().extract(&config).unwrap();
    assert_eq!(summary.subvolumes_written, 2);
    assert_eq!(summary.coordinates_skipped, 1);
    assert!(dir.join("out/3D_subvolumes/tomo1_spike_0001.mrc").is_file());
    assert!(dir.join("out/3D_subvolumes/tomo1_spike_0002.mrc").is_file());
    assert!(!dir.join("out/3D_subvolumes/tomo1_spike_0003.mrc").exists());

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_projection_mode_defaults_missing_columns() {
    let dir = workspace("star_mode");

    // Two small subvolumes on disk, referenced relative to the STAR file
    let sub_dir = dir.join("subs");
    fs::create_dir_all(&sub_dir).unwrap();
    let cube = Array3::from_elem((6, 6, 6), 2.0f32);
    MrcWriter::write_volume(&sub_dir.join("a.mrc"), &cube, 1.0).unwrap();
    MrcWriter::write_volume(&sub_dir.join("b.mrc"), &cube, 1.0).unwrap();

    let star_path = dir.join("input.star");
    fs::write(
        &star_path,
        "data_particles\n\nloop_\n_rlnImageName #1\nsubs/a.mrc\nsubs/b.mrc\n",
    )
    .unwrap();

    let config = ProjectionConfig {
        star_path,
        output_dir: dir.join("out"),
        slices: 2,
    };
    let summary = Tomokit::new().project_from_star(&config).unwrap();
    assert_eq!(summary.projections_written, 2);
    assert!(dir.join("out/2D_projections/2D_a.mrc").is_file());
    assert!(dir.join("out/2D_projections/2D_b.mrc").is_file());

    // Missing coordinate columns default to zero in the output table
    let mut star_reader = StarReader::new();
    let tables = star_reader
        .load(&dir.join("out/extracted_subvolumes_2D.star"))
        .unwrap();
    let table = StarReader::select_particles(tables).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.get_f64(0, labels::COORDINATE_X).unwrap(), Some(0.0));
    assert_eq!(table.get_f64(1, labels::COORDINATE_Z).unwrap(), Some(0.0));
    assert_eq!(table.get(0, labels::TOMO_NAME), Some(""));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_projection_mode_requires_image_column() {
    let dir = workspace("star_missing_col");

    let star_path = dir.join("input.star");
    fs::write(
        &star_path,
        "data_particles\n\nloop_\n_rlnCoordinateX #1\n_rlnCoordinateY #2\n1.0 2.0\n",
    )
    .unwrap();

    let config = ProjectionConfig {
        star_path,
        output_dir: dir.join("out"),
        slices: 1,
    };
    let result = Tomokit::new().project_from_star(&config);
    assert!(matches!(result, Err(TomoError::MissingColumn(_))));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_projection_mode_unresolvable_path() {
    let dir = workspace("star_missing_file");

    let star_path = dir.join("input.star");
    fs::write(
        &star_path,
        "data_particles\n\nloop_\n_rlnImageName #1\nsubs/nowhere.mrc\n",
    )
    .unwrap();

    let config = ProjectionConfig {
        star_path,
        output_dir: dir.join("out"),
        slices: 1,
    };
    let result = Tomokit::new().project_from_star(&config);
    assert!(matches!(result, Err(TomoError::SubvolumeNotFound(_))));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_projection_mode_keeps_micrograph_fallback() {
    let dir = workspace("star_fallback");

    let sub_dir = dir.join("subs");
    fs::create_dir_all(&sub_dir).unwrap();
    let cube = Array3::from_elem((4, 4, 4), 1.0f32);
    MrcWriter::write_volume(&sub_dir.join("a.mrc"), &cube, 1.0).unwrap();

    // Only the micrograph label is present; it must feed the tomogram field
    let star_path = dir.join("input.star");
    fs::write(
        &star_path,
        "data_particles\n\nloop_\n_rlnImageName #1\n_rlnMicrographName #2\nsubs/a.mrc tomo_x\n",
    )
    .unwrap();

    let config = ProjectionConfig {
        star_path,
        output_dir: dir.join("out"),
        slices: 1,
    };
    Tomokit::new().project_from_star(&config).unwrap();

    let mut star_reader = StarReader::new();
    let tables = star_reader
        .load(&dir.join("out/extracted_subvolumes_2D.star"))
        .unwrap();
    let table = StarReader::select_particles(tables).unwrap();
    assert_eq!(table.get(0, labels::TOMO_NAME), Some("tomo_x"));
    assert_eq!(table.get(0, labels::MICROGRAPH_NAME), Some("tomo_x"));

    fs::remove_dir_all(&dir).ok();
}
