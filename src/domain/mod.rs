pub mod classify;
pub mod fields;
pub mod lifecycle;
pub mod projections;
pub mod validate;
