//! Integration tests for the benchtier harness

mod binary;
mod concurrency;
mod custom_defaults_file;
mod precedence;
mod test_utils;
