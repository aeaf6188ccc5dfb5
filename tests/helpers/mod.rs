// ABOUTME: Test helper modules shared by integration tests
// ABOUTME: Currently hosts the axum request/response test harness

pub mod axum_test;
