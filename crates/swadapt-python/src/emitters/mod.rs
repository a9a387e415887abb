pub mod adapter;
pub mod docs;
