use crate::config::ResolverMode;
use md5::{Digest, Md5};
use std::fmt;

/// Key of the verdict cache: md5 over query value, client address and
/// trimmed qname. The client address is left out in local-resolver mode so
/// that every client shares the same cached verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestFingerprint([u8; 16]);

impl RequestFingerprint {
    pub fn compute(
        query_value: &str,
        trimmed_qname: &str,
        client_address: &str,
        mode: ResolverMode,
    ) -> Self {
        let mut hasher = Md5::new();
        hasher.update(query_value.as_bytes());
        if mode != ResolverMode::LocalResolver {
            hasher.update(client_address.as_bytes());
        }
        hasher.update(trimmed_qname.as_bytes());
        Self(to_array(&hasher.finalize()))
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

/// Key of the policy lists: md5 over the trimmed qname alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NameFingerprint([u8; 16]);

impl NameFingerprint {
    pub fn compute(trimmed_qname: &str) -> Self {
        Self(to_array(&Md5::digest(trimmed_qname.as_bytes())))
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

fn to_array(digest: &[u8]) -> [u8; 16] {
    let mut out = [0u8; 16];
    out.copy_from_slice(digest);
    out
}

fn write_hex(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
    for byte in bytes {
        write!(f, "{:02x}", byte)?;
    }
    Ok(())
}

impl fmt::Display for RequestFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_hex(f, &self.0)
    }
}

impl fmt::Display for NameFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_hex(f, &self.0)
    }
}
