//! Identifier types for metadata records.

/// Opaque string identifier used as a primary or foreign key.
///
/// Tokens carry no semantics beyond byte-wise equality; the source data
/// uses 32-character hex strings, but nothing here depends on that.
pub type Token = String;

/// Numeric scene identifier extracted from a scene name ("scene-0061" -> 61).
pub type SceneId = u32;
