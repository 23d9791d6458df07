//! hickory-proto adapter between wire bytes and the domain's message types.

use bytes::Bytes;
use hickory_proto::op::{Message, MessageType, ResponseCode};
use hickory_proto::rr::rdata::{A, AAAA};
use hickory_proto::rr::{Name, RData, Record};
use sinkhole_dns_domain::{DnsRequest, DomainError, Query, ResolvedMessage, ResourceRecord};
use std::net::IpAddr;
use std::str::FromStr;

pub fn parse_message(wire: &[u8]) -> Result<Message, DomainError> {
    Message::from_vec(wire)
        .map_err(|e| DomainError::InvalidDnsMessage(format!("Failed to parse DNS message: {}", e)))
}

/// Builds the forwardable request from a decoded client query. Exactly one
/// question is required.
pub fn request_from_message(
    message: &Message,
    wire: &[u8],
    client_ip: IpAddr,
) -> Result<DnsRequest, DomainError> {
    if message.message_type() != MessageType::Query {
        return Err(DomainError::InvalidDnsMessage(
            "Expected a query, got a response".to_string(),
        ));
    }

    let [question] = message.queries() else {
        return Err(DomainError::InvalidDnsMessage(format!(
            "Expected exactly one question, got {}",
            message.queries().len()
        )));
    };

    let query = Query::new(question.name().to_string(), client_ip.to_string());
    Ok(DnsRequest::new(query, Bytes::copy_from_slice(wire)))
}

/// Transaction id of a raw message.
pub fn message_id(wire: &[u8]) -> Option<u16> {
    match wire {
        [hi, lo, ..] => Some(u16::from_be_bytes([*hi, *lo])),
        _ => None,
    }
}

/// Decodes an upstream reply into the domain representation. Answers are
/// kept in presentation form.
pub fn decode_response(question: Query, wire: Vec<u8>) -> Result<ResolvedMessage, DomainError> {
    let message = Message::from_vec(&wire)
        .map_err(|e| DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e)))?;

    if message.message_type() != MessageType::Response {
        return Err(DomainError::InvalidDnsResponse(
            "Upstream sent a query instead of a response".to_string(),
        ));
    }

    let answers = message
        .answers()
        .iter()
        .map(|record| ResourceRecord::new(record.to_string()))
        .collect();

    Ok(ResolvedMessage::new(
        question,
        u16::from(message.response_code()),
        answers,
        Bytes::from(wire),
    ))
}

/// Encodes the reply for the client: the upstream message with the client's
/// id, and the synthetic answer section when the message was rewritten.
pub fn encode_response(resolved: &ResolvedMessage, id: u16) -> Result<Vec<u8>, DomainError> {
    let mut message = Message::from_vec(&resolved.wire)
        .map_err(|e| DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e)))?;
    message.set_id(id);

    if resolved.is_rewritten() {
        message.take_answers();
        for record in &resolved.answers {
            message.add_answer(to_address_record(record)?);
        }
    }

    message
        .to_vec()
        .map_err(|e| DomainError::InvalidDnsResponse(format!("Failed to encode DNS response: {}", e)))
}

/// Reply carrying only the question and `code` (FORMERR, SERVFAIL).
pub fn error_response(request: &Message, code: ResponseCode) -> Result<Vec<u8>, DomainError> {
    let mut message = request.clone();
    message.take_answers();
    message.take_name_servers();
    message.take_additionals();
    message
        .set_message_type(MessageType::Response)
        .set_response_code(code)
        .set_recursion_available(true);

    message
        .to_vec()
        .map_err(|e| DomainError::InvalidDnsMessage(format!("Failed to encode error response: {}", e)))
}

fn to_address_record(record: &ResourceRecord) -> Result<Record, DomainError> {
    let parsed = record.as_address_record().ok_or_else(|| {
        DomainError::InvalidAnswerValue(format!("Not an address record: {}", record))
    })?;

    let name = Name::from_str(parsed.name)
        .map_err(|e| DomainError::InvalidQueryName(format!("{}: {}", parsed.name, e)))?;

    let rdata = match parsed.address {
        IpAddr::V4(v4) => RData::A(A(v4)),
        IpAddr::V6(v6) => RData::AAAA(AAAA(v6)),
    };

    Ok(Record::from_rdata(name, parsed.ttl, rdata))
}
