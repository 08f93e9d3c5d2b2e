//! Integration tests for the modelgen generation engine

mod author_scenario;
mod config_loading;
mod pipeline_driver;
mod rest_resource_tests;
mod settings_mapping;
mod storage_kinds;
mod test_utils;
