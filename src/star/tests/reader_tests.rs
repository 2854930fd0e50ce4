//! Tests for STAR parsing

use crate::errors::TomoError;
use crate::star::labels;
use crate::star::reader::StarReader;

const SIMPLE: &str = "\
data_particles

loop_
_rlnCoordinateX #1
_rlnCoordinateY #2
_rlnCoordinateZ #3
_rlnImageName #4
100.0  200.0  50.0  3D_subvolumes/tomo1_spike_0001.mrc
110.0  210.0  60.0  3D_subvolumes/tomo1_spike_0002.mrc
";

#[test]
fn test_parse_simple_loop() {
    let mut reader = StarReader::new();
    let tables = reader.read(SIMPLE).unwrap();
    assert_eq!(tables.len(), 1);

    let table = &tables[0];
    assert_eq!(table.name(), "particles");
    assert_eq!(table.labels().len(), 4);
    assert_eq!(table.len(), 2);
    assert_eq!(
        table.get(1, labels::IMAGE_NAME),
        Some("3D_subvolumes/tomo1_spike_0002.mrc")
    );
    assert_eq!(table.get_f64(0, labels::COORDINATE_X).unwrap(), Some(100.0));
    assert_eq!(table.get_f64(0, "rlnDefocusU").unwrap(), None);
}

#[test]
fn test_parse_skips_comments_and_key_values() {
    let content = "\
# written by tomokit
data_optics

_rlnVoltage 300.0

data_particles

loop_
_rlnImageName #1
a.mrc
";
    let mut reader = StarReader::new();
    let tables = reader.read(content).unwrap();

    // The optics block has no loop, so only the particles table survives
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].name(), "particles");
    assert_eq!(tables[0].len(), 1);
}

#[test]
fn test_select_particles_prefers_named_block() {
    let content = "\
data_extra

loop_
_rlnImageName #1
x.mrc

data_particles

loop_
_rlnImageName #1
y.mrc
";
    let mut reader = StarReader::new();
    let tables = reader.read(content).unwrap();
    let table = StarReader::select_particles(tables).unwrap();
    assert_eq!(table.name(), "particles");
    assert_eq!(table.get(0, labels::IMAGE_NAME), Some("y.mrc"));
}

#[test]
fn test_select_particles_falls_back_to_first() {
    let content = "\
data_images

loop_
_rlnImageName #1
x.mrc
";
    let mut reader = StarReader::new();
    let tables = reader.read(content).unwrap();
    let table = StarReader::select_particles(tables).unwrap();
    assert_eq!(table.name(), "images");
}

#[test]
fn test_row_arity_mismatch_fails() {
    let content = "\
data_particles

loop_
_rlnCoordinateX #1
_rlnCoordinateY #2
1.0
";
    let mut reader = StarReader::new();
    assert!(matches!(
        reader.read(content),
        Err(TomoError::ParseError(_))
    ));
}

#[test]
fn test_empty_file_selects_nothing() {
    let mut reader = StarReader::new();
    let tables = reader.read("").unwrap();
    assert!(tables.is_empty());
    assert!(StarReader::select_particles(tables).is_err());
}
