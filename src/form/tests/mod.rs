//! Workflow tests for the profile form.
//!
//! State tests drive the pure transitions directly; controller tests run the
//! full load / select / submit sequences against an in-memory backend.
