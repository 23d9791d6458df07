use crate::errors::DomainError;

pub const MIN_NAME_LEN: usize = 3;
pub const MAX_NAME_LEN: usize = 250;
pub const MIN_CLIENT_ADDRESS_LEN: usize = 3;
pub const MAX_CLIENT_ADDRESS_LEN: usize = 41;

const QUERY_NAME_FORBIDDEN: &[char] = &[' ', ',', '*', '/'];
const ANSWER_VALUE_FORBIDDEN: &[char] = &[' ', ',', '*'];

/// Checks a trimmed qname before it is fingerprinted or sent to the oracle.
pub fn validate_query_name(trimmed_qname: &str) -> Result<(), DomainError> {
    if trimmed_qname.contains(QUERY_NAME_FORBIDDEN) {
        return Err(DomainError::InvalidQueryName(format!(
            "'{}' contains a forbidden character",
            trimmed_qname
        )));
    }

    let len = trimmed_qname.len();
    if !(MIN_NAME_LEN..=MAX_NAME_LEN).contains(&len) {
        return Err(DomainError::InvalidQueryName(format!(
            "'{}' has length {} (allowed {}-{})",
            trimmed_qname, len, MIN_NAME_LEN, MAX_NAME_LEN
        )));
    }

    Ok(())
}

pub fn validate_client_address(client_address: &str) -> Result<(), DomainError> {
    let len = client_address.len();
    if !(MIN_CLIENT_ADDRESS_LEN..=MAX_CLIENT_ADDRESS_LEN).contains(&len) {
        return Err(DomainError::InvalidClientAddress(format!(
            "'{}' has length {} (allowed {}-{})",
            client_address, len, MIN_CLIENT_ADDRESS_LEN, MAX_CLIENT_ADDRESS_LEN
        )));
    }
    Ok(())
}

/// Checks an answer-record value extracted for IP-address warming.
pub fn validate_answer_value(value: &str) -> Result<(), DomainError> {
    if value.contains(ANSWER_VALUE_FORBIDDEN) {
        return Err(DomainError::InvalidAnswerValue(format!(
            "'{}' contains a forbidden character",
            value
        )));
    }

    let len = value.len();
    if !(MIN_NAME_LEN..=MAX_NAME_LEN).contains(&len) {
        return Err(DomainError::InvalidAnswerValue(format!(
            "'{}' has length {} (allowed {}-{})",
            value, len, MIN_NAME_LEN, MAX_NAME_LEN
        )));
    }

    Ok(())
}

pub fn validate_dns_request(client_address: &str, trimmed_qname: &str) -> Result<(), DomainError> {
    validate_query_name(trimmed_qname)?;
    validate_client_address(client_address)
}
