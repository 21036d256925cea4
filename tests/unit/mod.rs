//! Unit test modules.

mod fatigue_analysis_test;
mod model_catalog_test;
mod shadow_selection_test;
