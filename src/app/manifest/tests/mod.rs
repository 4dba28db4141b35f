//! Integration tests for manifest functionality
//!
//! These tests exercise the complete load, validate and query workflow
//! across formats, including the original legacy spec file text.
