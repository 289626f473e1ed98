//! Crate-level test module

mod unit_tests;
