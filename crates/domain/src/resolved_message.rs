use crate::dns_query::Query;
use bytes::Bytes;
use std::fmt;
use std::net::IpAddr;

/// Answers under this suffix are never submitted to the oracle.
pub const ROOT_SERVERS_SUFFIX: &str = ".root-servers.net.";

const VALUE_BEARING_TYPES: [&str; 3] = ["A", "AAAA", "CNAME"];

/// One answer record in presentation form: whitespace-separated
/// `name ttl class type value...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord(String);

impl ResourceRecord {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The record a sinkholed answer is replaced with.
    pub fn synthetic(name: &str, ttl: u32, address: IpAddr) -> Self {
        let record_type = match address {
            IpAddr::V4(_) => "A",
            IpAddr::V6(_) => "AAAA",
        };
        Self(format!("{name}\t{ttl}\tIN\t{record_type}\t{address}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.split_whitespace()
    }

    /// The field following the first A, AAAA or CNAME token (case-insensitive).
    pub fn typed_value(&self) -> Option<&str> {
        let mut fields = self.fields();
        fields
            .by_ref()
            .find(|field| VALUE_BEARING_TYPES.iter().any(|t| field.eq_ignore_ascii_case(t)))?;
        fields.next()
    }

    /// Decodes `name ttl IN A|AAAA addr`; `None` for any other shape.
    pub fn as_address_record(&self) -> Option<AddressRecord<'_>> {
        let fields: Vec<&str> = self.fields().collect();
        let [name, ttl, class, record_type, value] = fields.as_slice() else {
            return None;
        };
        if !class.eq_ignore_ascii_case("IN") {
            return None;
        }
        let address: IpAddr = value.parse().ok()?;
        let type_matches = match address {
            IpAddr::V4(_) => record_type.eq_ignore_ascii_case("A"),
            IpAddr::V6(_) => record_type.eq_ignore_ascii_case("AAAA"),
        };
        if !type_matches {
            return None;
        }
        Some(AddressRecord {
            name: *name,
            ttl: ttl.parse().ok()?,
            address,
        })
    }
}

impl fmt::Display for ResourceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressRecord<'a> {
    pub name: &'a str,
    pub ttl: u32,
    pub address: IpAddr,
}

/// An upstream reply for a single question.
///
/// `wire` holds the upstream bytes as received; once `rewritten` is set the
/// `answers` replace the wire answer section when the reply is encoded.
#[derive(Debug, Clone)]
pub struct ResolvedMessage {
    pub question: Query,
    pub rcode: u16,
    pub answers: Vec<ResourceRecord>,
    pub wire: Bytes,
    rewritten: bool,
}

impl ResolvedMessage {
    pub fn new(question: Query, rcode: u16, answers: Vec<ResourceRecord>, wire: Bytes) -> Self {
        Self {
            question,
            rcode,
            answers,
            wire,
            rewritten: false,
        }
    }

    /// NOERROR
    pub fn is_success(&self) -> bool {
        self.rcode == 0
    }

    pub fn is_rewritten(&self) -> bool {
        self.rewritten
    }

    pub fn replace_answers(&mut self, answers: Vec<ResourceRecord>) {
        self.answers = answers;
        self.rewritten = true;
    }
}
