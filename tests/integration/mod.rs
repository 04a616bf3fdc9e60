//! Integration tests for the envimix variant generator

mod cli_generate;
mod config_integration;
mod scenario;
mod test_utils;
mod variant_properties;
