//! Integration tests for Layer 1: Extract
//!
//! Tests for fact extraction, attribute handling, and naming rules.

mod extraction;
mod naming;
