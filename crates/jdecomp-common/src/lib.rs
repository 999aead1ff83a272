//! Common types and utilities for the jdecomp decompiler.
//!
//! This crate provides foundational values used across all jdecomp crates:
//! - Recursion and search limits shared by the AST, matcher and transforms

// Centralized limits and thresholds
pub mod limits;
