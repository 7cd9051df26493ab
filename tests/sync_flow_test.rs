//! End-to-end flow over the in-memory transport: encode a request, send
//! it, decode the scripted response. No network, no game client.

use fellowship_protocol::transport::{HttpMethod, MemoryTransport, Transport, TransportResponse};
use fellowship_protocol::{decoder, encoder, headers, json, ResponseType};

#[tokio::test]
async fn test_heartbeat_flow_with_legacy_response_shape() {
    let transport = MemoryTransport::new();
    transport.push_response(TransportResponse::ok(
        r#"{"protocolVersion":"2.0.0","type":"HeartbeatResponse","success":true,"friends":[{"name":"boro","isOnline":true,"zone":"Qufim Island"}],"events":[{"requestId":"r1","fromCharacterName":"tilde","status":"pending"}]}"#,
    ));

    let request = encoder::encode_get_heartbeat("Ayla", 100, 200, "1.4.2");
    let response = transport
        .send(HttpMethod::Post, "/api/heartbeat", "key", "Ayla", &request)
        .await;
    assert_eq!(response.status_code, 200);

    let msg = decoder::decode(&response.body).expect("decode failed");
    assert_eq!(msg.kind, ResponseType::Heartbeat);
    assert!(msg.success);

    let heartbeat = decoder::decode_heartbeat_payload(&msg.payload).expect("payload failed");
    assert_eq!(heartbeat.statuses.len(), 1);
    assert_eq!(heartbeat.statuses[0].character_name, "boro");
    assert!(heartbeat.statuses[0].is_online);
    assert_eq!(heartbeat.events.len(), 1);
    assert_eq!(heartbeat.events[0].request_id, "r1");

    let sent = transport.sent_requests();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, HttpMethod::Post);
    assert_eq!(sent[0].body, request);
    assert_eq!(sent[0].character_name, "Ayla");
}

#[tokio::test]
async fn test_send_mail_then_read_unread_count() {
    let transport = MemoryTransport::new();
    transport.push_response(TransportResponse::ok(
        r#"{"protocolVersion":"2.0.0","type":"MailSentResponse","success":true,"messageId":"m-1","sentAt":1700}"#,
    ));
    transport.push_response(TransportResponse::ok(
        r#"{"protocolVersion":"2.0.0","type":"UnreadCountResponse","success":true,"unreadCount":2}"#,
    ));

    let request = encoder::encode_send_mail("boro", "hello", "see you at the auction house");
    let response = transport
        .send(HttpMethod::Post, "/api/mail", "key", "Ayla", &request)
        .await;

    let msg = decoder::decode(&response.body).expect("decode failed");
    assert_eq!(msg.kind, ResponseType::Mail);
    assert_eq!(msg.payload, r#"{"messageId":"m-1","createdAt":1700}"#);
    let mail = decoder::decode_mail_payload(&msg.payload).expect("payload failed");
    assert_eq!(mail.message_id, "m-1");

    let request = encoder::encode_get_mail_unread_count();
    let response = transport
        .send(HttpMethod::Get, "/api/mail/unread-count", "key", "Ayla", &request)
        .await;

    let msg = decoder::decode(&response.body).expect("decode failed");
    let count = decoder::decode_mail_unread_count_payload(&msg.payload).expect("payload failed");
    assert_eq!(count.count, 2);
}

#[tokio::test]
async fn test_failed_response_carries_error_description() {
    let transport = MemoryTransport::new();
    transport.push_response(TransportResponse {
        status_code: 403,
        body: r#"{"protocolVersion":"2.0.0","type":"Error","success":false,"error":"api key revoked","errorCode":"E403"}"#.to_string(),
        error: None,
    });

    let request = encoder::encode_get_friend_list();
    let response = transport
        .send(HttpMethod::Get, "/api/friends", "stale-key", "Ayla", &request)
        .await;

    let msg = decoder::decode(&response.body).expect("decode failed");
    assert_eq!(msg.kind, ResponseType::Error);
    assert!(!msg.success);
    assert_eq!(msg.error, "api key revoked");
    assert_eq!(msg.error_code, "E403");
}

#[tokio::test]
async fn test_transport_error_short_circuits_before_decoding() {
    let transport = MemoryTransport::new();

    let request = encoder::encode_get_notes();
    let response = transport
        .send(HttpMethod::Get, "/api/notes", "key", "Ayla", &request)
        .await;

    assert!(response.error.is_some());
    assert!(response.body.is_empty());
}

#[test]
fn test_request_line_and_headers_assemble() {
    // Everything the transport needs for one request, built purely.
    let ctx = headers::RequestContext {
        api_key: "key123".to_string(),
        character_name: "Ayla".to_string(),
        ..headers::RequestContext::default()
    };
    let header_block = headers::build(&ctx);
    assert!(header_block.contains("X-API-Key: key123\r\n"));
    assert!(header_block.contains("X-Protocol-Version: 2.0.0\r\n"));

    let body = encoder::encode_get_status("Ayla");
    assert!(json::is_valid_json(&body));
    assert!(headers::has_required_headers(&headers::build_header_list(
        &ctx
    )));
}
