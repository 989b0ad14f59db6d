//! Legacy response envelope

use serde::Deserialize;

/// Legacy API response shape: a status object wrapping the payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    /// Status code and message
    pub status: Status,

    /// Response payload, absent for void services
    #[serde(default)]
    pub data: Option<T>,
}

/// Status object of the legacy envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct Status {
    /// Backend status message
    pub message: String,

    /// Status code, wire name `type`
    #[serde(rename = "type")]
    pub kind: String,
}

/// Payload for legacy services that have no response data.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralResponse {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Account {
        id: u64,
    }

    #[test]
    fn test_envelope_with_payload() {
        let envelope: Envelope<Account> = serde_json::from_str(
            r#"{"status": {"type": "success", "message": "ok"}, "data": {"id": 7}}"#,
        )
        .unwrap();

        assert_eq!(envelope.status.kind, "success");
        assert_eq!(envelope.data.map(|a| a.id), Some(7));
    }

    #[test]
    fn test_envelope_without_payload() {
        let envelope: Envelope<Account> =
            serde_json::from_str(r#"{"status": {"type": "success", "message": "ok"}}"#).unwrap();
        assert!(envelope.data.is_none());
    }

    #[test]
    fn test_general_response_accepts_empty_object() {
        let envelope: Envelope<GeneralResponse> = serde_json::from_str(
            r#"{"status": {"type": "success", "message": "ok"}, "data": {}}"#,
        )
        .unwrap();
        assert!(envelope.data.is_some());
    }
}
