//! Centralized limits and thresholds for the decompiler rewrite passes.
//!
//! Every recursive walk in the workspace bounds itself with one of these
//! values so that pathological input (deeply nested expressions produced by
//! obfuscators, long `a.b.c.d...` chains) degrades into a skipped rewrite
//! instead of a stack overflow.

// =============================================================================
// Recursion Depth Limits
// =============================================================================

/// Maximum depth for the conversion-insertion transform.
///
/// Counts nested visits, including the re-entry performed on freshly inserted
/// replacement nodes. When the limit is hit the transform stops descending and
/// leaves the remaining subtree untouched.
///
/// # Java example
///
/// ```java
/// // Bytecode for deeply nested string building produces chains such as:
/// x = ((((((a + b) + c) + d) + e) /* ... 500 levels ... */));
/// ```
pub const MAX_TRANSFORM_DEPTH: u32 = 500;

/// Maximum depth for static type resolution of a single expression.
///
/// The resolver recurses through operands of conditionals and binary
/// operators; exceeding this depth yields "no result".
pub const MAX_RESOLVE_DEPTH: u32 = 256;

/// Maximum depth when walking a supertype hierarchy.
///
/// Class files are loaded lazily and may contain inheritance cycles when the
/// input jar is corrupt or partially obfuscated. Walks that exceed this depth
/// report "not a subtype" / "not found".
pub const MAX_SUPERTYPE_DEPTH: u32 = 64;

// =============================================================================
// Search Limits
// =============================================================================

/// Maximum number of choice points explored by a single collection match.
///
/// Backtracking over repeat placeholders is exponential in the worst case.
/// Real patterns contain at most a handful of repeats, so the cap is never
/// hit in practice; when it is, the match reports "no match".
pub const MAX_BACKTRACKING_STEPS: usize = 100_000;
