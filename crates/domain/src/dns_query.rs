use bytes::Bytes;
use std::sync::Arc;

/// The single question of a client query plus who asked it.
///
/// `qname` is kept exactly as received from the wire (case-preserving,
/// dot-terminated). Uses `Arc<str>` so racing tasks can clone it freely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub qname: Arc<str>,
    pub client_address: Arc<str>,
}

impl Query {
    pub fn new(qname: impl Into<Arc<str>>, client_address: impl Into<Arc<str>>) -> Self {
        Self {
            qname: qname.into(),
            client_address: client_address.into(),
        }
    }

    /// The qname without its trailing root dot, as sent to the oracle.
    pub fn trimmed_qname(&self) -> &str {
        trim_root_dot(&self.qname)
    }
}

/// Strips a single trailing `.` from a name.
pub fn trim_root_dot(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}

/// A client query ready to be forwarded: the parsed question and the raw
/// wire bytes that upstream nameservers receive verbatim.
#[derive(Debug, Clone)]
pub struct DnsRequest {
    pub query: Query,
    pub wire: Bytes,
}

impl DnsRequest {
    pub fn new(query: Query, wire: impl Into<Bytes>) -> Self {
        Self {
            query,
            wire: wire.into(),
        }
    }
}
