//! End-to-end tests for the crawl and integrate pipelines

mod crawl_tests;
mod integrate_tests;
