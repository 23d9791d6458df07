use serde::Deserialize;
use sinkhole_dns_domain::{DomainError, Verdict};

/// Bodies shorter than this ("null", stray bytes) carry no verdict.
pub const MIN_VERDICT_BODY_LEN: usize = 6;

#[derive(Debug, Deserialize)]
struct SinkholeResponse {
    #[serde(default, alias = "Sinkhole")]
    sinkhole: Option<String>,
}

/// Decodes an oracle body. A non-empty `sinkhole` field means sink; a JSON
/// `null`, padded or not, carries no verdict.
pub fn parse_verdict(body: &[u8]) -> Result<Verdict, DomainError> {
    if body.len() < MIN_VERDICT_BODY_LEN {
        return Ok(Verdict::Allow);
    }

    let response: Option<SinkholeResponse> = serde_json::from_slice(body).map_err(|e| {
        DomainError::OracleDecode(format!(
            "{}: {}",
            e,
            String::from_utf8_lossy(body)
        ))
    })?;

    Ok(Verdict::from_sink_flag(
        response
            .and_then(|r| r.sinkhole)
            .is_some_and(|target| !target.is_empty()),
    ))
}
