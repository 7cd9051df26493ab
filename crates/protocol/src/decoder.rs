//! Response decoding for the fellowship wire protocol
//!
//! [`decode`] turns a raw response body into a normalized
//! [`ResponseMessage`]. The service's response shape drifted over time:
//! newer responses wrap their data in a `payload` object, older ones put
//! arrays and scalars at the top level. When no `payload` field is present
//! the decoder synthesizes one from an ordered list of known legacy
//! shapes, first match wins, so downstream payload decoders only ever see
//! the canonical form.
//!
//! The payload sub-decoders are strict about canonical keys (`statuses`,
//! `messages`, `notes`, `note`, `incoming`/`outgoing`): legacy spellings
//! are normalized once, at envelope level, and nowhere else.
//!
//! All decoding is pure and per-call; nothing is cached between calls.

use crate::error::{DecodeError, DecodeResult};
use crate::json;
use crate::messages::{
    FeedbackPayload, FriendData, FriendListPayload, FriendRequestData, FriendRequestsPayload,
    FriendStatusData, HeartbeatPayload, IssuePayload, MailListPayload, MailMessageData,
    MailUnreadCountPayload, NoteData, NotePayload, NotesListPayload, PreferencesPayload,
    ResponseMessage, ResponseType, StatusPayload,
};
use crate::version::{current_version, Version};

/// Decodes a response envelope.
///
/// Validation order: JSON well-formedness, protocol version presence and
/// major-compatibility, response type, `success` flag. The `payload`
/// field is taken verbatim when present, otherwise synthesized from
/// legacy top-level fields. `error`, `errorCode`, `details`, and
/// `requestId` are picked up opportunistically; their absence is normal.
pub fn decode(json_text: &str) -> DecodeResult<ResponseMessage> {
    if !json::is_valid_json(json_text) {
        return Err(DecodeError::InvalidJson);
    }

    let version_raw =
        json::extract_field(json_text, "protocolVersion").ok_or(DecodeError::MissingField)?;
    let protocol_version = json::decode_string(version_raw).ok_or(DecodeError::MissingField)?;

    let version = Version::parse(&protocol_version).map_err(|_| DecodeError::InvalidVersion)?;
    if !version.is_compatible_with(&current_version()) {
        return Err(DecodeError::InvalidVersion);
    }

    let type_raw = json::extract_field(json_text, "type").ok_or(DecodeError::MissingField)?;
    let type_str = json::decode_string(type_raw).ok_or(DecodeError::MissingField)?;
    let kind = ResponseType::from_wire(&type_str).ok_or(DecodeError::InvalidType)?;

    let success = json::extract_boolean_field(json_text, "success").ok_or(DecodeError::MissingField)?;

    let mut payload = json::extract_field(json_text, "payload")
        .map(str::to_string)
        .unwrap_or_default();
    if payload.is_empty() {
        if let Some(synthesized) = synthesize_payload(json_text) {
            tracing::debug!(kind = type_str.as_str(), "synthesized payload from legacy response shape");
            payload = synthesized;
        }
    }

    Ok(ResponseMessage {
        protocol_version,
        kind,
        success,
        payload,
        error: json::extract_string_field(json_text, "error").unwrap_or_default(),
        error_code: json::extract_string_field(json_text, "errorCode").unwrap_or_default(),
        details: json::extract_field(json_text, "details")
            .map(str::to_string)
            .unwrap_or_default(),
        request_id: json::extract_string_field(json_text, "requestId").unwrap_or_default(),
    })
}

/// Builds a canonical payload object from legacy top-level response
/// fields. Shapes are tried in a fixed order and the first match wins;
/// every branch is best-effort and nothing here fails.
fn synthesize_payload(json_text: &str) -> Option<String> {
    let friends = json::extract_field(json_text, "friends");
    let events = json::extract_field(json_text, "events");
    if let (Some(friends), Some(events)) = (friends, events) {
        // Heartbeat shape: the service sends "friends", the payload
        // decoders expect "statuses".
        return Some(format!("{{\"statuses\":{friends},\"events\":{events}}}"));
    }
    if let Some(friends) = friends {
        return Some(format!("{{\"statuses\":{friends}}}"));
    }

    if let Some(statuses) = json::extract_field(json_text, "statuses") {
        return Some(format!("{{\"statuses\":{statuses}}}"));
    }

    if let Some(messages) = json::extract_field(json_text, "messages") {
        return Some(format!("{{\"messages\":{messages}}}"));
    }

    let incoming = json::extract_field(json_text, "incoming");
    let outgoing = json::extract_field(json_text, "outgoing");
    if incoming.is_some() || outgoing.is_some() {
        return Some(format!(
            "{{\"incoming\":{},\"outgoing\":{}}}",
            incoming.unwrap_or("[]"),
            outgoing.unwrap_or("[]")
        ));
    }

    if let Some(count) = json::extract_number_field::<i64>(json_text, "unreadCount") {
        return Some(format!("{{\"unreadCount\":{count}}}"));
    }

    if let Some(preferences) = json::extract_field(json_text, "preferences") {
        // Passed through directly, not re-wrapped.
        return Some(preferences.to_string());
    }

    if let Some(notes) = json::extract_field(json_text, "notes") {
        return Some(format!("{{\"notes\":{notes}}}"));
    }

    if let Some(note) = json::extract_field(json_text, "note") {
        return Some(format!("{{\"note\":{note}}}"));
    }

    if let Some(scenarios) = json::extract_field(json_text, "scenarios") {
        return Some(format!("{{\"scenarios\":{scenarios}}}"));
    }

    if let Some(linked) = json::extract_field(json_text, "linkedCharacters") {
        let name = json::extract_string_field(json_text, "characterName").unwrap_or_default();
        return Some(format!(
            "{{\"characterName\":\"{name}\",\"linkedCharacters\":{linked}}}"
        ));
    }

    if let Some(message_id) = json::extract_string_field(json_text, "messageId") {
        let sent_at: i64 = json::extract_number_field(json_text, "sentAt").unwrap_or(0);
        return Some(format!(
            "{{\"messageId\":\"{message_id}\",\"createdAt\":{sent_at}}}"
        ));
    }

    // Often sent together on friend-request and add-friend responses.
    let request_id = json::extract_string_field(json_text, "requestId");
    let action = json::extract_string_field(json_text, "action");
    let message = json::extract_string_field(json_text, "message");
    if request_id.is_some() || action.is_some() || message.is_some() {
        let mut fields = Vec::new();
        if let Some(v) = request_id {
            fields.push(format!("\"requestId\":\"{v}\""));
        }
        if let Some(v) = action {
            fields.push(format!("\"action\":\"{v}\""));
        }
        if let Some(v) = message {
            fields.push(format!("\"message\":\"{v}\""));
        }
        return Some(format!("{{{}}}", fields.join(",")));
    }

    None
}

/// Decodes a friend-list payload.
///
/// Tolerates one layer of JSON-string encoding around the whole payload
/// (a double-encoding the service produced at one point). The `statuses`
/// key is required; a bare `friends` array is not accepted here.
pub fn decode_friend_list_payload(payload: &str) -> DecodeResult<FriendListPayload> {
    if payload.is_empty() {
        return Err(DecodeError::MissingField);
    }

    let peeled;
    let payload = if payload.starts_with('"') && payload.len() > 1 {
        match json::decode_string(payload) {
            Some(inner) => {
                peeled = inner;
                peeled.as_str()
            }
            None => payload,
        }
    } else {
        payload
    };

    let statuses = json::extract_field(payload, "statuses").ok_or(DecodeError::MissingField)?;
    if !statuses.starts_with('[') {
        return Err(DecodeError::InvalidPayload);
    }

    let mut friends = Vec::new();
    for object in split_object_array(statuses)? {
        friends.push(decode_friend_data(object)?);
    }
    Ok(FriendListPayload { friends })
}

/// Decodes a status payload. Requires the canonical `statuses` array key.
pub fn decode_status_payload(payload: &str) -> DecodeResult<StatusPayload> {
    let statuses = json::extract_field(payload, "statuses").ok_or(DecodeError::MissingField)?;
    if !statuses.starts_with('[') {
        return Err(DecodeError::InvalidPayload);
    }

    let mut out = Vec::new();
    for object in split_object_array(statuses)? {
        out.push(decode_friend_status_data(object)?);
    }
    Ok(StatusPayload { statuses: out })
}

/// Decodes a single friend-request payload.
pub fn decode_friend_request_payload(payload: &str) -> DecodeResult<FriendRequestData> {
    decode_friend_request_data(payload)
}

/// Decodes the incoming/outgoing friend-request lists. Either list may be
/// absent; a present key whose value is not an array is ignored.
pub fn decode_friend_requests_payload(payload: &str) -> DecodeResult<FriendRequestsPayload> {
    let mut out = FriendRequestsPayload::default();

    if let Some(incoming) = json::extract_field(payload, "incoming") {
        if incoming.starts_with('[') {
            for object in split_object_array(incoming)? {
                out.incoming.push(decode_friend_request_data(object)?);
            }
        }
    }

    if let Some(outgoing) = json::extract_field(payload, "outgoing") {
        if outgoing.starts_with('[') {
            for object in split_object_array(outgoing)? {
                out.outgoing.push(decode_friend_request_data(object)?);
            }
        }
    }

    Ok(out)
}

/// Decodes a heartbeat payload. Never fails: a heartbeat that decodes at
/// envelope level always yields a payload, with whatever parts were
/// readable.
///
/// The events array is mixed-shape on the wire (online events, request
/// events); entries that do not decode as friend-request events are
/// skipped rather than failing the heartbeat.
pub fn decode_heartbeat_payload(payload: &str) -> DecodeResult<HeartbeatPayload> {
    let mut out = HeartbeatPayload::default();

    if let Some(statuses) = json::extract_field(payload, "statuses") {
        let rewrapped = format!("{{\"statuses\":{statuses}}}");
        if let Ok(status_payload) = decode_status_payload(&rewrapped) {
            out.statuses = status_payload.statuses;
        }
    }

    if let Some(events) = json::extract_field(payload, "events") {
        if events.starts_with('[') {
            for object in split_object_array_lenient(events) {
                match decode_friend_request_data(object) {
                    Ok(event) => out.events.push(event),
                    Err(_) => {
                        tracing::debug!("skipping unreadable heartbeat event");
                    }
                }
            }
        }
    }

    if let Some(ts) = json::extract_number_field(payload, "lastEventTimestamp") {
        out.last_event_timestamp = ts;
    }
    if let Some(ts) = json::extract_number_field(payload, "lastRequestEventTimestamp") {
        out.last_request_event_timestamp = ts;
    }

    Ok(out)
}

/// Decodes one friend status object. `name` is the only required field.
pub fn decode_friend_status_data(json_text: &str) -> DecodeResult<FriendStatusData> {
    let character_name =
        json::extract_string_field(json_text, "name").ok_or(DecodeError::MissingField)?;

    let mut status = FriendStatusData {
        display_name: character_name.clone(),
        character_name,
        ..FriendStatusData::default()
    };

    if let Some(v) = json::extract_boolean_field(json_text, "isOnline") {
        status.is_online = v;
    }
    if let Some(v) = json::extract_string_field(json_text, "job") {
        status.job = v;
    }
    if let Some(v) = json::extract_string_field(json_text, "rank") {
        status.rank = v;
    }
    if let Some(v) = json::extract_string_field(json_text, "zone") {
        status.zone = v;
    }

    // lastSeenAt arrives as a number or null; 0 means "never".
    if let Some(raw) = json::extract_field(json_text, "lastSeenAt") {
        if raw == "null" || raw.is_empty() {
            status.last_seen_at = 0;
        } else {
            status.last_seen_at = json::decode_number(raw).unwrap_or(0);
        }
    }

    // nation arrives as a number or null; -1 means hidden/not set.
    if let Some(nation) = json::extract_number_field::<i32>(json_text, "nation") {
        status.nation = nation;
    }

    if let Some(v) = json::extract_string_field(json_text, "friendedAsName") {
        status.friended_as = v;
    }
    if let Some(v) = json::extract_string_array_field(json_text, "linkedCharacters") {
        status.linked_characters = v;
    }

    if let Some(v) = json::extract_boolean_field(json_text, "sharesOnlineStatus") {
        status.show_online_status = v;
    }
    if !status.show_online_status {
        // Default to true if not specified.
        status.show_online_status = true;
    }

    status.is_linked_character = status.linked_characters.len() > 1;

    Ok(status)
}

/// Decodes one friend entry. Accepts `name` or `characterName` for the
/// active name, and `friendedAsName` or `friendedAs` for the alias.
pub fn decode_friend_data(json_text: &str) -> DecodeResult<FriendData> {
    let name = json::extract_string_field(json_text, "name")
        .or_else(|| json::extract_string_field(json_text, "characterName"))
        .ok_or(DecodeError::MissingField)?;

    let friended_as = json::extract_string_field(json_text, "friendedAsName")
        .or_else(|| json::extract_string_field(json_text, "friendedAs"))
        .unwrap_or_default();

    let linked_characters =
        json::extract_string_array_field(json_text, "linkedCharacters").unwrap_or_default();

    Ok(FriendData {
        name,
        friended_as,
        linked_characters,
    })
}

/// Decodes one friend-request object. `requestId` is required.
pub fn decode_friend_request_data(json_text: &str) -> DecodeResult<FriendRequestData> {
    let request_id =
        json::extract_string_field(json_text, "requestId").ok_or(DecodeError::MissingField)?;

    Ok(FriendRequestData {
        request_id,
        from_character_name: json::extract_string_field(json_text, "fromCharacterName")
            .unwrap_or_default(),
        to_character_name: json::extract_string_field(json_text, "toCharacterName")
            .unwrap_or_default(),
        from_account_id: json::extract_number_field(json_text, "fromAccountId").unwrap_or(0),
        to_account_id: json::extract_number_field(json_text, "toAccountId").unwrap_or(0),
        status: json::extract_string_field(json_text, "status").unwrap_or_default(),
        created_at: json::extract_number_field(json_text, "createdAt").unwrap_or(0),
    })
}

/// Decodes preferences. Every field is optional over the documented
/// defaults, so this never fails.
pub fn decode_preferences_payload(payload: &str) -> DecodeResult<PreferencesPayload> {
    let mut prefs = PreferencesPayload::default();

    let bool_field = |key: &str, slot: &mut bool| {
        if let Some(v) = json::extract_boolean_field(payload, key) {
            *slot = v;
        }
    };

    bool_field("useServerNotes", &mut prefs.use_server_notes);
    bool_field("shareFriendsAcrossAlts", &mut prefs.share_friends_across_alts);
    bool_field("showFriendedAsColumn", &mut prefs.show_friended_as_column);
    bool_field("showJobColumn", &mut prefs.show_job_column);
    bool_field("showRankColumn", &mut prefs.show_rank_column);
    bool_field("showNationColumn", &mut prefs.show_nation_column);
    bool_field("showZoneColumn", &mut prefs.show_zone_column);
    bool_field("showLastSeenColumn", &mut prefs.show_last_seen_column);
    bool_field(
        "quickOnlineShowFriendedAsColumn",
        &mut prefs.quick_online_show_friended_as_column,
    );
    bool_field("quickOnlineShowJobColumn", &mut prefs.quick_online_show_job_column);
    bool_field("quickOnlineShowRankColumn", &mut prefs.quick_online_show_rank_column);
    bool_field(
        "quickOnlineShowNationColumn",
        &mut prefs.quick_online_show_nation_column,
    );
    bool_field("quickOnlineShowZoneColumn", &mut prefs.quick_online_show_zone_column);
    bool_field(
        "quickOnlineShowLastSeenColumn",
        &mut prefs.quick_online_show_last_seen_column,
    );

    Ok(prefs)
}

/// Decodes one mail message. `messageId` is required; `body` is optional
/// because meta-mode listings omit it.
pub fn decode_mail_message_data(json_text: &str) -> DecodeResult<MailMessageData> {
    let message_id =
        json::extract_string_field(json_text, "messageId").ok_or(DecodeError::MissingField)?;

    Ok(MailMessageData {
        message_id,
        from_name: json::extract_string_field(json_text, "fromName").unwrap_or_default(),
        to_name: json::extract_string_field(json_text, "toName").unwrap_or_default(),
        subject: json::extract_string_field(json_text, "subject").unwrap_or_default(),
        body: json::extract_string_field(json_text, "body").unwrap_or_default(),
        created_at: json::extract_number_field(json_text, "sentAt").unwrap_or(0),
        read_at: json::extract_number_field(json_text, "readAt").unwrap_or(0),
        is_read: json::extract_boolean_field(json_text, "isRead").unwrap_or(false),
    })
}

/// Decodes a single-message payload.
pub fn decode_mail_payload(payload: &str) -> DecodeResult<MailMessageData> {
    decode_mail_message_data(payload)
}

/// Decodes a mail-list payload: a `messages` array, or the bare array
/// itself when the payload is one.
pub fn decode_mail_list_payload(payload: &str) -> DecodeResult<MailListPayload> {
    let messages = match json::extract_field(payload, "messages") {
        Some(messages) => messages,
        None if payload.starts_with('[') => payload,
        None => return Err(DecodeError::MissingField),
    };

    let mut out = MailListPayload::default();
    if messages.starts_with('[') {
        for object in split_object_array(messages)? {
            out.messages.push(decode_mail_message_data(object)?);
        }
    }
    Ok(out)
}

/// Decodes an unread-count payload; a missing count stays 0.
pub fn decode_mail_unread_count_payload(payload: &str) -> DecodeResult<MailUnreadCountPayload> {
    Ok(MailUnreadCountPayload {
        count: json::extract_number_field(payload, "unreadCount").unwrap_or(0),
    })
}

/// Decodes a notes-list payload: a `notes` array, or the bare array
/// itself.
pub fn decode_notes_list_payload(payload: &str) -> DecodeResult<NotesListPayload> {
    let notes = match json::extract_field(payload, "notes") {
        Some(notes) => notes,
        None if payload.starts_with('[') => payload,
        None => return Err(DecodeError::MissingField),
    };

    if !notes.starts_with('[') {
        return Err(DecodeError::InvalidPayload);
    }

    let mut out = NotesListPayload::default();
    for object in split_object_array(notes)? {
        out.notes.push(decode_note_data(object)?);
    }
    Ok(out)
}

/// Decodes a single-note payload wrapped under a `note` key.
pub fn decode_note_payload(payload: &str) -> DecodeResult<NotePayload> {
    let note = json::extract_field(payload, "note").ok_or(DecodeError::MissingField)?;
    Ok(NotePayload {
        note: decode_note_data(note)?,
    })
}

/// Decodes one note object; all three fields are required.
pub fn decode_note_data(json_text: &str) -> DecodeResult<NoteData> {
    Ok(NoteData {
        friend_name: json::extract_string_field(json_text, "friendName")
            .ok_or(DecodeError::MissingField)?,
        note: json::extract_string_field(json_text, "note").ok_or(DecodeError::MissingField)?,
        updated_at: json::extract_number_field(json_text, "updatedAt")
            .ok_or(DecodeError::MissingField)?,
    })
}

/// Decodes a feedback acknowledgement; the id arrives at top level.
pub fn decode_feedback_payload(payload: &str) -> DecodeResult<FeedbackPayload> {
    Ok(FeedbackPayload {
        feedback_id: json::extract_number_field(payload, "feedbackId")
            .ok_or(DecodeError::MissingField)?,
    })
}

/// Decodes an issue acknowledgement; the id arrives at top level.
pub fn decode_issue_payload(payload: &str) -> DecodeResult<IssuePayload> {
    Ok(IssuePayload {
        issue_id: json::extract_number_field(payload, "issueId")
            .ok_or(DecodeError::MissingField)?,
    })
}

/// Splits a JSON array of objects into per-object substrings using
/// brace-depth counting with string-aware skipping. An element that is
/// not an object fails the split.
fn split_object_array(array: &str) -> DecodeResult<Vec<&str>> {
    let bytes = array.as_bytes();
    let mut items = Vec::new();
    let mut pos = 1usize;

    while pos < bytes.len() {
        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        if pos >= bytes.len() || bytes[pos] == b']' {
            break;
        }
        if bytes[pos] != b'{' {
            return Err(DecodeError::InvalidPayload);
        }

        let (end, depth) = scan_object(bytes, pos);
        if depth != 0 {
            return Err(DecodeError::InvalidPayload);
        }
        items.push(array.get(pos..end).ok_or(DecodeError::InvalidPayload)?);

        pos = end;
        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        if pos < bytes.len() && bytes[pos] == b',' {
            pos += 1;
        }
    }

    Ok(items)
}

/// Best-effort variant of [`split_object_array`] for mixed-shape arrays:
/// stops at the first element that is not an object instead of failing.
fn split_object_array_lenient(array: &str) -> Vec<&str> {
    let bytes = array.as_bytes();
    let mut items = Vec::new();
    let mut pos = 1usize;

    while pos < bytes.len() {
        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        if pos >= bytes.len() || bytes[pos] == b']' || bytes[pos] != b'{' {
            break;
        }

        let (end, _) = scan_object(bytes, pos);
        match array.get(pos..end) {
            Some(object) => items.push(object),
            None => break,
        }

        pos = end;
        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        if pos < bytes.len() && bytes[pos] == b',' {
            pos += 1;
        }
    }

    items
}

/// Scans one object starting at `start` (which must index a `{`).
/// Returns the exclusive end offset and the final brace depth (0 when the
/// object closed properly).
fn scan_object(bytes: &[u8], start: usize) -> (usize, i32) {
    let mut depth = 1i32;
    let mut end = start + 1;

    while end < bytes.len() && depth > 0 {
        match bytes[end] {
            b'{' => depth += 1,
            b'}' => depth -= 1,
            b'"' => {
                end += 1;
                while end < bytes.len() && bytes[end] != b'"' {
                    if bytes[end] == b'\\' && end + 1 < bytes.len() {
                        end += 2;
                    } else {
                        end += 1;
                    }
                }
            }
            _ => {}
        }
        end += 1;
    }

    (end.min(bytes.len()), depth)
}
