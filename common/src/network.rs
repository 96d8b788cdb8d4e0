//! Network primitives shared by the scanner and its callers.

pub mod interface;
pub mod mac;
pub mod range;
