//! Tests for the extraction core

mod projector_tests;
