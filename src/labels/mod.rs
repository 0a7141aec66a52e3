//! Label encoding.

pub mod label_encoder;

pub use label_encoder::LabelEncoder;
