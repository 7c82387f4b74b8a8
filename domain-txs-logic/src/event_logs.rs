use crate::{error::DecodeError, types::HexString};
use alloy_primitives::{hex, keccak256};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

lazy_static! {
    static ref TRANSFER_SIGNATURE: HexString = signature_hash("Transfer(address,address,uint256)");
    static ref NEW_URI_SIGNATURE: HexString = signature_hash("NewURI(uint256,string)");
    static ref SET_RECORD_SIGNATURE: HexString =
        signature_hash("Set(uint256,string,string,string,string)");
    static ref NEW_KEY_SIGNATURE: HexString = signature_hash("NewKey(uint256,string,string)");
    static ref RESET_RECORDS_SIGNATURE: HexString = signature_hash("ResetRecords(uint256)");
}

fn signature_hash(signature: &str) -> HexString {
    HexString::from_bytes(keccak256(signature.as_bytes()))
}

/// Registry events that can tell which domain a transaction touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum EventType {
    Transfer,
    NewUri,
    SetRecord,
    NewKey,
    ResetRecords,
}

impl EventType {
    pub fn from_signature(signature: &HexString) -> Option<Self> {
        use strum::IntoEnumIterator;
        EventType::iter().find(|event_type| event_type.signature() == signature)
    }

    pub fn signature(&self) -> &'static HexString {
        match self {
            EventType::Transfer => &TRANSFER_SIGNATURE,
            EventType::NewUri => &NEW_URI_SIGNATURE,
            EventType::SetRecord => &SET_RECORD_SIGNATURE,
            EventType::NewKey => &NEW_KEY_SIGNATURE,
            EventType::ResetRecords => &RESET_RECORDS_SIGNATURE,
        }
    }

    /// Position of the domain token id inside `topics`.
    ///
    /// `NewKey` logs carry no usable domain identity and have no index.
    pub fn domain_id_field_index(&self) -> Option<usize> {
        match self {
            EventType::Transfer => Some(3),
            EventType::NewUri => Some(1),
            EventType::SetRecord => Some(2),
            EventType::ResetRecords => Some(0),
            EventType::NewKey => None,
        }
    }
}

/// Raw event log attached to a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLogEntry {
    pub topics: Vec<HexString>,
    #[serde(default)]
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedEvent {
    pub event_type: EventType,
    pub domain_token_id: Option<HexString>,
    pub domain_name: Option<String>,
}

/// Domain identity learned from a list of logs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainIdentity {
    pub domain_token_id: Option<HexString>,
    pub domain_name: Option<String>,
}

impl DomainIdentity {
    pub fn is_empty(&self) -> bool {
        self.domain_token_id.is_none() && self.domain_name.is_none()
    }
}

impl EventLogEntry {
    pub fn new(topics: Vec<HexString>, data: &str) -> Self {
        Self {
            topics,
            data: data.to_string(),
        }
    }

    pub fn event_type(&self) -> Result<EventType, DecodeError> {
        let signature = self
            .topics
            .first()
            .ok_or(DecodeError::MissingEventSignature)?;
        EventType::from_signature(signature)
            .ok_or_else(|| DecodeError::UnknownEventSignature(signature.to_string()))
    }

    pub fn decode(&self) -> Result<DecodedEvent, DecodeError> {
        let event_type = self.event_type()?;
        let domain_token_id = event_type
            .domain_id_field_index()
            .and_then(|index| self.topic_at(event_type, index));
        Ok(DecodedEvent {
            event_type,
            domain_token_id,
            domain_name: self.ascii_data(),
        })
    }

    fn topic_at(&self, event_type: EventType, index: usize) -> Option<HexString> {
        let topic = self.topics.get(index).cloned();
        if topic.is_none() {
            tracing::warn!(
                event_type = %event_type,
                index,
                topics_count = self.topics.len(),
                "event log is missing the domain id topic"
            );
        }
        topic
    }

    /// Payload decoded as ASCII text, `None` for empty or `0x` data.
    fn ascii_data(&self) -> Option<String> {
        let data = self.data.trim();
        if data.is_empty() || data == "0x" {
            return None;
        }
        let bytes = match hex::decode(data.trim_start_matches("0x")) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::debug!(data, "event log data is not hex: {err}");
                return None;
            }
        };
        if !bytes.is_ascii() {
            tracing::debug!(data, "event log data is not ascii");
            return None;
        }
        let text: String = bytes.into_iter().map(char::from).collect();
        let text = text.trim_matches(|c: char| c == '\0' || c.is_whitespace());
        (!text.is_empty()).then(|| text.to_string())
    }
}

/// Folds logs into a single domain identity. Logs that don't decode and
/// `NewKey` logs are skipped; for both fields the last non-empty value wins.
pub fn fold_domain_identity(logs: &[EventLogEntry]) -> DomainIdentity {
    logs.iter()
        .filter_map(|log| log.decode().ok())
        .filter(|event| event.event_type != EventType::NewKey)
        .fold(DomainIdentity::default(), |mut identity, event| {
            if let Some(token_id) = event.domain_token_id {
                identity.domain_token_id = Some(token_id);
            }
            if let Some(name) = event.domain_name {
                identity.domain_name = Some(name);
            }
            identity
        })
}
