//! XPBD constraint projections and the obstacle contact pass.
pub mod distance;
pub mod bending;
pub mod contact;
