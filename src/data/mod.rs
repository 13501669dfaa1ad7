pub mod store;
pub mod vectors;

pub use store::{ByteStore, FileStore, MemoryStore};
pub use vectors::{Mismatch, VerificationReport};
