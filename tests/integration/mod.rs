//! Integration test modules.

mod session_analytics_test;
mod session_tracking_test;
