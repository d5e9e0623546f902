//! Public library API for exporting and importing dynamic-bone setups as JSON.

/// Node hierarchy, component model, document pivot, formatter, and the export/import flows.
pub mod bone;
