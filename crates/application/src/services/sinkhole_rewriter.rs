use sinkhole_dns_domain::{Config, ResolvedMessage, ResourceRecord};
use std::net::IpAddr;

/// Replaces a message's whole answer section with one record pointing at
/// the sinkhole. CNAME chains and every other answer are discarded.
#[derive(Debug, Clone, Copy)]
pub struct SinkholeRewriter {
    ttl: u32,
    address: IpAddr,
}

impl SinkholeRewriter {
    pub fn new(ttl: u32, address: IpAddr) -> Self {
        Self { ttl, address }
    }

    /// `None` when the configured sinkhole address is not an IP.
    pub fn from_config(config: &Config) -> Option<Self> {
        config
            .sinkhole
            .parsed_address()
            .map(|address| Self::new(config.sinkhole.ttl, address))
    }

    pub fn rewrite(&self, message: &mut ResolvedMessage, qname: &str) {
        message.replace_answers(vec![self.record_for(qname)]);
    }

    pub fn record_for(&self, qname: &str) -> ResourceRecord {
        ResourceRecord::synthetic(qname, self.ttl, self.address)
    }
}
