pub mod error;
pub mod export;
pub mod probe;
pub mod transcode;
