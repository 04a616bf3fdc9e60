//! Integration tests entry point
//!
//! This file includes all integration test modules from the integration/ subdirectory.

mod integration;
