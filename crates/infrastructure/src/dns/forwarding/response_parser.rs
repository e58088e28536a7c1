use dnsprobe_domain::DomainError;
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::RData;
use std::net::Ipv4Addr;
use tracing::debug;

/// The parts of an upstream reply the resolver cares about.
#[derive(Debug, Clone)]
pub struct UpstreamAnswer {
    /// A records of the answer section, in wire order.
    pub a_records: Vec<Ipv4Addr>,

    pub rcode: ResponseCode,

    pub truncated: bool,
}

impl UpstreamAnswer {
    pub fn is_server_error(&self) -> bool {
        matches!(
            self.rcode,
            ResponseCode::ServFail | ResponseCode::Refused | ResponseCode::NotImp
        )
    }
}

pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(response_bytes: &[u8]) -> Result<UpstreamAnswer, DomainError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("failed to parse DNS response: {}", e))
        })?;

        let rcode = message.response_code();
        let truncated = message.truncated();

        // CNAME chains and other record types are skipped; the A records
        // that follow them are what the caller connects to.
        let a_records: Vec<Ipv4Addr> = message
            .answers()
            .iter()
            .filter_map(|record| match record.data() {
                RData::A(a) => Some(a.0),
                _ => None,
            })
            .collect();

        debug!(
            rcode = Self::rcode_to_status(rcode),
            a_records = a_records.len(),
            truncated = truncated,
            "DNS response parsed"
        );

        Ok(UpstreamAnswer {
            a_records,
            rcode,
            truncated,
        })
    }

    /// Reads the transaction id without decoding the rest of the message.
    pub fn transaction_id(response_bytes: &[u8]) -> Option<u16> {
        match response_bytes {
            [hi, lo, ..] => Some(u16::from_be_bytes([*hi, *lo])),
            _ => None,
        }
    }

    pub fn rcode_to_status(rcode: ResponseCode) -> &'static str {
        match rcode {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::FormErr => "FORMERR",
            _ => "UNKNOWN",
        }
    }
}
