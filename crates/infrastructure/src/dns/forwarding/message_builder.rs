//! DNS Message Builder
//!
//! Constructs A-record query messages in wire format using `hickory-proto`.

use dnsprobe_domain::DomainError;
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name, RecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::str::FromStr;

pub struct MessageBuilder;

impl MessageBuilder {
    /// Build a recursive IN/A query for `hostname`.
    ///
    /// Returns the random transaction id together with the serialized bytes
    /// so the caller can match the reply.
    pub fn build_a_query(hostname: &str) -> Result<(u16, Vec<u8>), DomainError> {
        if hostname.trim().is_empty() {
            return Err(DomainError::InvalidHostname("empty hostname".to_string()));
        }

        let name = Name::from_str(hostname).map_err(|e| {
            DomainError::InvalidHostname(format!("'{}': {}", hostname, e))
        })?;

        let mut query = Query::new();
        query.set_name(name);
        query.set_query_type(RecordType::A);
        query.set_query_class(DNSClass::IN);

        let id = fastrand::u16(..);

        let mut message = Message::new(id, MessageType::Query, OpCode::Query);
        message.set_recursion_desired(true);
        message.add_query(query);

        let bytes = Self::serialize_message(&message)?;
        Ok((id, bytes))
    }

    fn serialize_message(message: &Message) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message.emit(&mut encoder).map_err(|e| {
            DomainError::InvalidHostname(format!("failed to serialize DNS query: {}", e))
        })?;

        Ok(buf)
    }
}
