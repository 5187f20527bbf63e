pub mod format;
pub mod parity;
pub mod profile_compare;
pub mod vector_compare;
