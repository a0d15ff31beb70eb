// src/writer/mod.rs
mod chunker;
mod log_writer;

pub use chunker::{chunk_for_write, LogHeader, WriteBatch, WriteChunker, WriteChunks};
pub use log_writer::{LogDataWriter, WriteSummary};
