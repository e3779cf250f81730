//! Root module for test modules, so that the tests are built into a single binary.

mod end_to_end;
mod properties;

const fn main() {}
