use fellowship_protocol::decoder;
use fellowship_protocol::{DecodeError, ResponseType};

#[test]
fn test_decode_canonical_payload_field_is_taken_verbatim() {
    let body = r#"{"protocolVersion":"2.0.0","type":"HeartbeatResponse","success":true,"payload":{"statuses":[],"events":[],"lastEventTimestamp":5}}"#;

    let msg = decoder::decode(body).expect("decode failed");
    assert_eq!(msg.protocol_version, "2.0.0");
    assert_eq!(msg.kind, ResponseType::Heartbeat);
    assert!(msg.success);
    assert_eq!(
        msg.payload,
        r#"{"statuses":[],"events":[],"lastEventTimestamp":5}"#
    );
}

#[test]
fn test_decode_error_response() {
    let body = r#"{"protocolVersion":"2.0.0","type":"Error","success":false,"error":"Invalid request","errorCode":"E400"}"#;

    let msg = decoder::decode(body).expect("decode failed");
    assert_eq!(msg.kind, ResponseType::Error);
    assert!(!msg.success);
    assert_eq!(msg.error, "Invalid request");
    assert_eq!(msg.error_code, "E400");
}

#[test]
fn test_decode_picks_up_request_id_and_details() {
    let body = r#"{"protocolVersion":"2.0.0","type":"SendFriendRequestResponse","success":true,"requestId":"req-7","details":{"queued":true}}"#;

    let msg = decoder::decode(body).expect("decode failed");
    assert_eq!(msg.kind, ResponseType::FriendRequest);
    assert_eq!(msg.request_id, "req-7");
    assert_eq!(msg.details, r#"{"queued":true}"#);
}

#[test]
fn test_decode_rejects_incompatible_version() {
    let body = r#"{"protocolVersion":"99.0.0","type":"FriendsListResponse","success":true}"#;
    assert_eq!(decoder::decode(body), Err(DecodeError::InvalidVersion));
}

#[test]
fn test_decode_rejects_unparsable_version() {
    let body = r#"{"protocolVersion":"2.0","type":"FriendsListResponse","success":true}"#;
    assert_eq!(decoder::decode(body), Err(DecodeError::InvalidVersion));
}

#[test]
fn test_decode_rejects_unknown_type() {
    let body = r#"{"protocolVersion":"2.0.0","type":"InvalidType","success":true}"#;
    assert_eq!(decoder::decode(body), Err(DecodeError::InvalidType));
}

#[test]
fn test_decode_missing_envelope_fields() {
    let no_version = r#"{"type":"FriendsListResponse","success":true}"#;
    assert_eq!(decoder::decode(no_version), Err(DecodeError::MissingField));

    let no_type = r#"{"protocolVersion":"2.0.0","success":true}"#;
    assert_eq!(decoder::decode(no_type), Err(DecodeError::MissingField));

    let no_success = r#"{"protocolVersion":"2.0.0","type":"FriendsListResponse"}"#;
    assert_eq!(decoder::decode(no_success), Err(DecodeError::MissingField));
}

// -------------------------------------------------------------------
// Legacy payload synthesis, shape by shape
// -------------------------------------------------------------------

#[test]
fn test_synthesis_friends_becomes_statuses() {
    let body = r#"{"protocolVersion":"2.0.0","type":"FriendsListResponse","success":true,"friends":[]}"#;

    let msg = decoder::decode(body).expect("decode failed");
    assert_eq!(msg.kind, ResponseType::FriendList);
    assert_eq!(msg.payload, r#"{"statuses":[]}"#);
}

#[test]
fn test_synthesis_friends_and_events_heartbeat_shape() {
    let body = r#"{"protocolVersion":"2.0.0","type":"HeartbeatResponse","success":true,"friends":[{"name":"ayla"}],"events":[]}"#;

    let msg = decoder::decode(body).expect("decode failed");
    assert_eq!(
        msg.payload,
        r#"{"statuses":[{"name":"ayla"}],"events":[]}"#
    );
}

#[test]
fn test_synthesis_statuses_passthrough_wrap() {
    let body = r#"{"protocolVersion":"2.0.0","type":"StateUpdateResponse","success":true,"statuses":[{"name":"boro"}]}"#;

    let msg = decoder::decode(body).expect("decode failed");
    assert_eq!(msg.kind, ResponseType::StateUpdate);
    assert_eq!(msg.payload, r#"{"statuses":[{"name":"boro"}]}"#);
}

#[test]
fn test_synthesis_messages() {
    let body = r#"{"protocolVersion":"2.0.0","type":"MailListResponse","success":true,"messages":[{"messageId":"m1"}]}"#;

    let msg = decoder::decode(body).expect("decode failed");
    assert_eq!(msg.payload, r#"{"messages":[{"messageId":"m1"}]}"#);
}

#[test]
fn test_synthesis_incoming_outgoing() {
    let both = r#"{"protocolVersion":"2.0.0","type":"FriendRequestsResponse","success":true,"incoming":[{"requestId":"r1"}],"outgoing":[]}"#;
    let msg = decoder::decode(both).expect("decode failed");
    assert_eq!(
        msg.payload,
        r#"{"incoming":[{"requestId":"r1"}],"outgoing":[]}"#
    );

    // A missing side is filled with an empty array.
    let incoming_only = r#"{"protocolVersion":"2.0.0","type":"FriendRequestsResponse","success":true,"incoming":[{"requestId":"r1"}]}"#;
    let msg = decoder::decode(incoming_only).expect("decode failed");
    assert_eq!(
        msg.payload,
        r#"{"incoming":[{"requestId":"r1"}],"outgoing":[]}"#
    );

    let outgoing_only = r#"{"protocolVersion":"2.0.0","type":"FriendRequestsResponse","success":true,"outgoing":[{"requestId":"r2"}]}"#;
    let msg = decoder::decode(outgoing_only).expect("decode failed");
    assert_eq!(
        msg.payload,
        r#"{"incoming":[],"outgoing":[{"requestId":"r2"}]}"#
    );
}

#[test]
fn test_synthesis_unread_count() {
    let body = r#"{"protocolVersion":"2.0.0","type":"UnreadCountResponse","success":true,"unreadCount":3}"#;

    let msg = decoder::decode(body).expect("decode failed");
    assert_eq!(msg.kind, ResponseType::MailUnreadCount);
    assert_eq!(msg.payload, r#"{"unreadCount":3}"#);

    let payload = decoder::decode_mail_unread_count_payload(&msg.payload).unwrap();
    assert_eq!(payload.count, 3);
}

#[test]
fn test_synthesis_preferences_passthrough_not_rewrapped() {
    let body = r#"{"protocolVersion":"2.0.0","type":"PreferencesResponse","success":true,"preferences":{"useServerNotes":true}}"#;

    let msg = decoder::decode(body).expect("decode failed");
    assert_eq!(msg.payload, r#"{"useServerNotes":true}"#);

    let prefs = decoder::decode_preferences_payload(&msg.payload).unwrap();
    assert!(prefs.use_server_notes);
}

#[test]
fn test_synthesis_notes_and_note() {
    let list = r#"{"protocolVersion":"2.0.0","type":"NotesListResponse","success":true,"notes":[{"friendName":"a","note":"n","updatedAt":1}]}"#;
    let msg = decoder::decode(list).expect("decode failed");
    assert_eq!(
        msg.payload,
        r#"{"notes":[{"friendName":"a","note":"n","updatedAt":1}]}"#
    );

    let single = r#"{"protocolVersion":"2.0.0","type":"NoteResponse","success":true,"note":{"friendName":"a","note":"n","updatedAt":1}}"#;
    let msg = decoder::decode(single).expect("decode failed");
    assert_eq!(
        msg.payload,
        r#"{"note":{"friendName":"a","note":"n","updatedAt":1}}"#
    );
}

#[test]
fn test_synthesis_scenarios() {
    let body = r#"{"protocolVersion":"2.0.0","type":"SyncFriendsResponse","success":true,"scenarios":[{"id":1}]}"#;

    let msg = decoder::decode(body).expect("decode failed");
    assert_eq!(msg.kind, ResponseType::Success);
    assert_eq!(msg.payload, r#"{"scenarios":[{"id":1}]}"#);
}

#[test]
fn test_synthesis_linked_characters() {
    let body = r#"{"protocolVersion":"2.0.0","type":"MeResponse","success":true,"characterName":"Ayla","linkedCharacters":["Ayla","Mule"]}"#;

    let msg = decoder::decode(body).expect("decode failed");
    assert_eq!(msg.kind, ResponseType::AuthEnsureResponse);
    assert_eq!(
        msg.payload,
        r#"{"characterName":"Ayla","linkedCharacters":["Ayla","Mule"]}"#
    );
}

#[test]
fn test_synthesis_message_id_with_sent_at() {
    let body = r#"{"protocolVersion":"2.0.0","type":"MailSentResponse","success":true,"messageId":"m-9","sentAt":1700}"#;

    let msg = decoder::decode(body).expect("decode failed");
    assert_eq!(msg.payload, r#"{"messageId":"m-9","createdAt":1700}"#);

    // Without sentAt the timestamp falls back to 0.
    let body = r#"{"protocolVersion":"2.0.0","type":"MailSentResponse","success":true,"messageId":"m-9"}"#;
    let msg = decoder::decode(body).expect("decode failed");
    assert_eq!(msg.payload, r#"{"messageId":"m-9","createdAt":0}"#);
}

#[test]
fn test_synthesis_request_id_action_message_combinations() {
    let all = r#"{"protocolVersion":"2.0.0","type":"AcceptFriendRequestResponse","success":true,"requestId":"r1","action":"accepted","message":"ok"}"#;
    let msg = decoder::decode(all).expect("decode failed");
    assert_eq!(
        msg.payload,
        r#"{"requestId":"r1","action":"accepted","message":"ok"}"#
    );

    let id_only = r#"{"protocolVersion":"2.0.0","type":"AcceptFriendRequestResponse","success":true,"requestId":"r1"}"#;
    let msg = decoder::decode(id_only).expect("decode failed");
    assert_eq!(msg.payload, r#"{"requestId":"r1"}"#);

    let message_only = r#"{"protocolVersion":"2.0.0","type":"AddFriendResponse","success":true,"message":"added"}"#;
    let msg = decoder::decode(message_only).expect("decode failed");
    assert_eq!(msg.kind, ResponseType::Success);
    assert_eq!(msg.payload, r#"{"message":"added"}"#);
}

#[test]
fn test_no_matching_shape_leaves_payload_empty() {
    let body = r#"{"protocolVersion":"2.0.0","type":"RemoveFriendResponse","success":true}"#;

    let msg = decoder::decode(body).expect("decode failed");
    assert_eq!(msg.kind, ResponseType::Success);
    assert!(msg.payload.is_empty());
}

// -------------------------------------------------------------------
// Payload sub-decoders
// -------------------------------------------------------------------

#[test]
fn test_friend_list_payload_canonical() {
    let payload = r#"{"statuses":[{"name":"user1","friendedAs":"User1"},{"name":"user2","friendedAs":"User2"}]}"#;

    let list = decoder::decode_friend_list_payload(payload).unwrap();
    assert_eq!(list.friends.len(), 2);
    assert_eq!(list.friends[0].name, "user1");
    assert_eq!(list.friends[0].friended_as, "User1");
    assert_eq!(list.friends[1].name, "user2");
}

#[test]
fn test_friend_list_payload_optional_fields_default() {
    let list = decoder::decode_friend_list_payload(r#"{"statuses":[{"name":"friend1"}]}"#).unwrap();
    assert_eq!(list.friends.len(), 1);
    assert_eq!(list.friends[0].friended_as, "");
    assert!(list.friends[0].linked_characters.is_empty());
}

#[test]
fn test_friend_list_payload_rejects_non_canonical_friends_key() {
    // A bare "friends" array is normalized at envelope level only; the
    // sub-decoder takes the canonical key or nothing.
    assert_eq!(
        decoder::decode_friend_list_payload(r#"{"friends":["a","b"]}"#),
        Err(DecodeError::MissingField)
    );
}

#[test]
fn test_friend_list_payload_rejects_bad_shapes() {
    assert_eq!(
        decoder::decode_friend_list_payload(""),
        Err(DecodeError::MissingField)
    );
    assert_eq!(
        decoder::decode_friend_list_payload("{}"),
        Err(DecodeError::MissingField)
    );
    assert_eq!(
        decoder::decode_friend_list_payload(r#"{"statuses":"not an array"}"#),
        Err(DecodeError::InvalidPayload)
    );
    assert_eq!(
        decoder::decode_friend_list_payload(r#"{"statuses":{"name":"friend1"}}"#),
        Err(DecodeError::InvalidPayload)
    );
}

#[test]
fn test_friend_list_payload_double_encoded() {
    // The service once returned the whole payload as a JSON-encoded
    // string; one layer is peeled.
    let payload = r#""{\"statuses\":[{\"name\":\"user1\"}]}""#;

    let list = decoder::decode_friend_list_payload(payload).unwrap();
    assert_eq!(list.friends.len(), 1);
    assert_eq!(list.friends[0].name, "user1");
}

#[test]
fn test_friend_list_payload_empty_array() {
    let list = decoder::decode_friend_list_payload(r#"{"statuses":[]}"#).unwrap();
    assert!(list.friends.is_empty());
}

#[test]
fn test_status_payload_full_record() {
    let payload = r#"{"statuses":[{"name":"user1","friendedAsName":"User1","isOnline":true,"job":"WAR75","rank":"10","zone":"Bastok Markets","nation":1,"lastSeenAt":1700,"linkedCharacters":["user1","mule1"]}]}"#;

    let status = decoder::decode_status_payload(payload).unwrap();
    assert_eq!(status.statuses.len(), 1);
    let s = &status.statuses[0];
    assert_eq!(s.character_name, "user1");
    assert_eq!(s.display_name, "user1");
    assert!(s.is_online);
    assert_eq!(s.job, "WAR75");
    assert_eq!(s.rank, "10");
    assert_eq!(s.zone, "Bastok Markets");
    assert_eq!(s.nation, 1);
    assert_eq!(s.last_seen_at, 1700);
    assert_eq!(s.friended_as, "User1");
    assert!(s.is_linked_character);
}

#[test]
fn test_status_payload_braces_inside_string_values() {
    // Braces inside an escaped string value must not corrupt the
    // object-splitting scan.
    let payload = r#"{"statuses":[{"name":"ayla","zone":"Dynamis {S}","job":"B\"{L}\"M"},{"name":"boro"}]}"#;

    let status = decoder::decode_status_payload(payload).unwrap();
    assert_eq!(status.statuses.len(), 2);
    assert_eq!(status.statuses[0].zone, "Dynamis {S}");
    assert_eq!(status.statuses[0].job, "B\"{L}\"M");
    assert_eq!(status.statuses[1].character_name, "boro");
}

#[test]
fn test_friend_requests_payload() {
    let payload = r#"{"incoming":[{"requestId":"req1","fromCharacterName":"user1","toCharacterName":"me","fromAccountId":1,"toAccountId":2,"status":"pending","createdAt":1000}],"outgoing":[{"requestId":"req2","fromCharacterName":"me","toCharacterName":"user2","fromAccountId":2,"toAccountId":3,"status":"pending","createdAt":2000}]}"#;

    let requests = decoder::decode_friend_requests_payload(payload).unwrap();
    assert_eq!(requests.incoming.len(), 1);
    assert_eq!(requests.incoming[0].request_id, "req1");
    assert_eq!(requests.incoming[0].from_character_name, "user1");
    assert_eq!(requests.incoming[0].created_at, 1000);
    assert_eq!(requests.outgoing.len(), 1);
    assert_eq!(requests.outgoing[0].request_id, "req2");
    assert_eq!(requests.outgoing[0].to_character_name, "user2");
}

#[test]
fn test_friend_requests_payload_sides_optional() {
    let requests = decoder::decode_friend_requests_payload("{}").unwrap();
    assert!(requests.incoming.is_empty());
    assert!(requests.outgoing.is_empty());
}

#[test]
fn test_heartbeat_payload_skips_unreadable_events() {
    // The events array mixes shapes; entries without a requestId are
    // dropped, not fatal.
    let payload = r#"{"statuses":[{"name":"ayla"}],"events":[{"requestId":"r1"},{"kind":"online","characterName":"boro"},{"requestId":"r2"}],"lastEventTimestamp":10,"lastRequestEventTimestamp":20}"#;

    let heartbeat = decoder::decode_heartbeat_payload(payload).unwrap();
    assert_eq!(heartbeat.statuses.len(), 1);
    assert_eq!(heartbeat.events.len(), 2);
    assert_eq!(heartbeat.events[0].request_id, "r1");
    assert_eq!(heartbeat.events[1].request_id, "r2");
    assert_eq!(heartbeat.last_event_timestamp, 10);
    assert_eq!(heartbeat.last_request_event_timestamp, 20);
}

#[test]
fn test_heartbeat_payload_empty_is_fine() {
    let heartbeat = decoder::decode_heartbeat_payload("{}").unwrap();
    assert!(heartbeat.statuses.is_empty());
    assert!(heartbeat.events.is_empty());
    assert_eq!(heartbeat.last_event_timestamp, 0);
}

#[test]
fn test_mail_list_mixed_body_presence() {
    let payload = r#"{"messages":[{"messageId":"msg1","fromName":"sender1","toName":"recipient","subject":"Test1","body":"Body1","sentAt":1000,"isRead":false},{"messageId":"msg2","fromName":"sender2","toName":"recipient","subject":"Test2","sentAt":2000,"isRead":false}]}"#;

    let list = decoder::decode_mail_list_payload(payload).unwrap();
    assert_eq!(list.messages.len(), 2);
    assert_eq!(list.messages[0].body, "Body1");
    assert_eq!(list.messages[1].body, "");
    assert_eq!(list.messages[1].created_at, 2000);
}

#[test]
fn test_mail_list_accepts_bare_array() {
    let list = decoder::decode_mail_list_payload(r#"[{"messageId":"m1"}]"#).unwrap();
    assert_eq!(list.messages.len(), 1);
    assert_eq!(
        decoder::decode_mail_list_payload("{}"),
        Err(DecodeError::MissingField)
    );
}

#[test]
fn test_notes_list_payload() {
    let payload = r#"{"notes":[{"friendName":"friend1","note":"Note 1","updatedAt":1000},{"friendName":"friend2","note":"Note 2","updatedAt":2000}]}"#;

    let notes = decoder::decode_notes_list_payload(payload).unwrap();
    assert_eq!(notes.notes.len(), 2);
    assert_eq!(notes.notes[0].friend_name, "friend1");
    assert_eq!(notes.notes[1].updated_at, 2000);

    assert!(decoder::decode_notes_list_payload(r#"{"notes":[]}"#)
        .unwrap()
        .notes
        .is_empty());
    assert_eq!(
        decoder::decode_notes_list_payload("{}"),
        Err(DecodeError::MissingField)
    );
    assert_eq!(
        decoder::decode_notes_list_payload(r#"{"notes":"not an array"}"#),
        Err(DecodeError::InvalidPayload)
    );
}

#[test]
fn test_note_payload() {
    let payload = r#"{"note":{"friendName":"testfriend","note":"Test note text","updatedAt":1234567890}}"#;

    let note = decoder::decode_note_payload(payload).unwrap();
    assert_eq!(note.note.friend_name, "testfriend");
    assert_eq!(note.note.note, "Test note text");
    assert_eq!(note.note.updated_at, 1234567890);

    assert_eq!(
        decoder::decode_note_payload("{}"),
        Err(DecodeError::MissingField)
    );
    assert_eq!(
        decoder::decode_note_payload(r#"{"note":{"friendName":"x"}}"#),
        Err(DecodeError::MissingField)
    );
}

#[test]
fn test_note_with_special_characters() {
    let payload = r#"{"note":{"friendName":"testfriend","note":"Note with \"quotes\" and\nnewlines","updatedAt":1000}}"#;

    let note = decoder::decode_note_payload(payload).unwrap();
    assert_eq!(note.note.note, "Note with \"quotes\" and\nnewlines");
}

#[test]
fn test_feedback_and_issue_payloads() {
    let body = r#"{"protocolVersion":"2.0.0","type":"FeedbackResponse","success":true,"feedbackId":123}"#;
    let msg = decoder::decode(body).unwrap();
    assert_eq!(msg.kind, ResponseType::FeedbackResponse);
    // The id rides at top level, not inside a payload object.
    let feedback = decoder::decode_feedback_payload(body).unwrap();
    assert_eq!(feedback.feedback_id, 123);

    let body = r#"{"protocolVersion":"2.0.0","type":"IssueResponse","success":true,"issueId":456}"#;
    let msg = decoder::decode(body).unwrap();
    assert_eq!(msg.kind, ResponseType::IssueResponse);
    let issue = decoder::decode_issue_payload(body).unwrap();
    assert_eq!(issue.issue_id, 456);

    assert_eq!(
        decoder::decode_feedback_payload("{}"),
        Err(DecodeError::MissingField)
    );
    assert_eq!(
        decoder::decode_issue_payload("{}"),
        Err(DecodeError::MissingField)
    );
}

#[test]
fn test_single_friend_request_payload() {
    let payload = r#"{"requestId":"req123","fromCharacterName":"user1","toCharacterName":"user2","fromAccountId":1,"toAccountId":2,"status":"pending","createdAt":1234567890}"#;

    let request = decoder::decode_friend_request_payload(payload).unwrap();
    assert_eq!(request.request_id, "req123");
    assert_eq!(request.from_character_name, "user1");
    assert_eq!(request.to_character_name, "user2");
    assert_eq!(request.from_account_id, 1);
    assert_eq!(request.to_account_id, 2);
    assert_eq!(request.status, "pending");
    assert_eq!(request.created_at, 1234567890);
}
