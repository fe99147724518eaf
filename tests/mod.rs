//! Test module organization.
//!
//! This module organizes all integration tests for the test bench driver.





/// Test bench descriptor lifecycle tests.
mod testbench_tests;
