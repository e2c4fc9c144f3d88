/// Deserialization tests for Messages API payloads.
#[cfg(test)]
mod unit {
    use crate::types::{ContentBlock, MessagesResponse};

    fn parse(json: &str) -> MessagesResponse {
        serde_json::from_str(json).expect("failed to parse response")
    }

    #[test]
    fn parse_text_response() {
        let resp = parse(
            r#"{
                "id": "msg_01",
                "type": "message",
                "role": "assistant",
                "model": "claude-3-5-sonnet-20241022",
                "content": [{"type": "text", "text": "Hello there"}],
                "stop_reason": "end_turn",
                "usage": {"input_tokens": 10, "output_tokens": 3}
            }"#,
        );
        assert_eq!(resp.id, "msg_01");
        assert_eq!(resp.text().as_deref(), Some("Hello there"));
        assert_eq!(resp.usage.output_tokens, 3);
        assert_eq!(resp.stop_reason.as_deref(), Some("end_turn"));
    }

    #[test]
    fn unknown_block_types_are_skipped() {
        let resp = parse(
            r#"{
                "content": [
                    {"type": "thinking", "thinking": "hmm", "signature": "x"},
                    {"type": "text", "text": "answer"}
                ]
            }"#,
        );
        assert!(matches!(resp.content[0], ContentBlock::Other));
        assert_eq!(resp.text().as_deref(), Some("answer"));
    }

    #[test]
    fn whitespace_only_text_counts_as_empty() {
        let resp = parse(r#"{"content": [{"type": "text", "text": "  \n"}]}"#);
        assert!(resp.text().is_none());
    }

    #[test]
    fn missing_usage_defaults_to_zero() {
        let resp = parse(r#"{"content": []}"#);
        assert_eq!(resp.usage.input_tokens, 0);
        assert!(resp.text().is_none());
    }
}
