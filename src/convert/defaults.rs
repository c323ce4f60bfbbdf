//! Conversion thresholds and sampling constants (SVG user units)

/// Lines and path segments at or below this length are dropped
pub const MIN_LINE_LENGTH: f64 = 0.01;
/// Sampled segments of elliptical arcs at or below this length are dropped
pub const MIN_SAMPLE_LENGTH: f64 = 0.001;
/// Arc endpoints closer than this have no solvable center
pub const MIN_CHORD: f64 = 0.001;

/// Radii closer than this are treated as a circle
pub const CIRCULAR_TOLERANCE: f64 = 0.1;
/// Divisor used instead of 2 when the chord exceeds the diameter
pub const OVERSIZE_CHORD_DIVISOR: f64 = 1.999;

/// Segments used for elliptical rect corners, and the minimum for path arcs
pub const ARC_SEGMENTS: u32 = 64;
/// Arc length covered by one segment of a long path arc
pub const UNITS_PER_SEGMENT: f64 = 2.0;
/// Upper bound on the segments of any one sampled arc
pub const MAX_ARC_SEGMENTS: u32 = 4096;
