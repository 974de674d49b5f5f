pub mod compare;
pub mod index;
