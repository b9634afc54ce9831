//! Property-based tests for the design layer

mod decode_properties;
mod derivation_properties;
mod window_properties;
