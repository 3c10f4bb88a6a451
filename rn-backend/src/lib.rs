pub mod client;
pub mod records;
pub mod storage;

pub use client::SupabaseClient;
pub use storage::SupabaseStorage;
