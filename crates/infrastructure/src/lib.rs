//! Sinkhole DNS Infrastructure Layer
pub mod cache;
pub mod dns;
pub mod oracle;
