//! Canonical request encoding for the fellowship wire protocol
//!
//! Every builder here produces the full envelope
//! `{"protocolVersion":"<current>","type":"<kind>","payload":{...}}` as a
//! JSON string, with only the documented keys for that operation. Builders
//! are pure: same inputs, same bytes out.

use crate::json;
use crate::messages::{Friend, Preferences, Presence, RequestMessage, RequestType};
use crate::version::PROTOCOL_VERSION;

/// Serializes an already-assembled request envelope.
///
/// The payload is embedded verbatim; an empty payload omits the field.
pub fn encode(request: &RequestMessage) -> String {
    let mut fields = vec![
        ("protocolVersion", json::encode_string(&request.protocol_version)),
        ("type", json::encode_string(request.kind.as_wire())),
    ];
    if !request.payload.is_empty() {
        fields.push(("payload", request.payload.clone()));
    }
    json::encode_object(&fields)
}

fn build(kind: RequestType, payload: String) -> String {
    encode(&RequestMessage {
        protocol_version: PROTOCOL_VERSION.to_string(),
        kind,
        payload,
    })
}

pub fn encode_get_friend_list() -> String {
    build(RequestType::GetFriendList, "{}".to_string())
}

/// Uploads the full friend collection.
///
/// Canonical format wraps the friends under a `statuses` array of
/// `{"name": ...}` objects; `friendedAs` is included only when it differs
/// from the active name.
pub fn encode_set_friend_list(friends: &[Friend]) -> String {
    let mut statuses = String::from("[");
    for (i, friend) in friends.iter().enumerate() {
        if i > 0 {
            statuses.push(',');
        }
        statuses.push('{');
        statuses.push_str(&json::encode_string("name"));
        statuses.push(':');
        statuses.push_str(&json::encode_string(&friend.name));
        if !friend.friended_as.is_empty() && friend.friended_as != friend.name {
            statuses.push(',');
            statuses.push_str(&json::encode_string("friendedAs"));
            statuses.push(':');
            statuses.push_str(&json::encode_string(&friend.friended_as));
        }
        if !friend.linked_characters.is_empty() {
            statuses.push(',');
            statuses.push_str(&json::encode_string("linkedCharacters"));
            statuses.push(':');
            statuses.push_str(&json::encode_string_array(&friend.linked_characters));
        }
        statuses.push('}');
    }
    statuses.push(']');

    let payload = json::encode_object(&[("statuses", statuses)]);
    build(RequestType::SetFriendList, payload)
}

pub fn encode_get_status(character_name: &str) -> String {
    let payload = json::encode_object(&[("characterName", json::encode_string(character_name))]);
    build(RequestType::GetStatus, payload)
}

/// Uploads the full presence record for the local character.
pub fn encode_update_presence(presence: &Presence) -> String {
    let payload = json::encode_object(&[
        ("characterName", json::encode_string(&presence.character_name)),
        ("job", json::encode_string(&presence.job)),
        ("rank", json::encode_string(&presence.rank)),
        ("nation", presence.nation.to_string()),
        ("zone", json::encode_string(&presence.zone)),
        ("isAnonymous", json::encode_boolean(presence.is_anonymous).to_string()),
        ("timestamp", presence.timestamp.to_string()),
    ]);
    build(RequestType::UpdatePresence, payload)
}

pub fn encode_update_my_status(
    show_online_status: bool,
    share_location: bool,
    is_anonymous: bool,
    share_job_when_anonymous: bool,
) -> String {
    let payload = json::encode_object(&[
        ("showOnlineStatus", json::encode_boolean(show_online_status).to_string()),
        ("shareLocation", json::encode_boolean(share_location).to_string()),
        ("isAnonymous", json::encode_boolean(is_anonymous).to_string()),
        (
            "shareJobWhenAnonymous",
            json::encode_boolean(share_job_when_anonymous).to_string(),
        ),
    ]);
    build(RequestType::UpdateMyStatus, payload)
}

pub fn encode_send_friend_request(to_user_id: &str) -> String {
    let payload = json::encode_object(&[("toUserId", json::encode_string(to_user_id))]);
    build(RequestType::SendFriendRequest, payload)
}

pub fn encode_accept_friend_request(request_id: &str) -> String {
    let payload = json::encode_object(&[("requestId", json::encode_string(request_id))]);
    build(RequestType::AcceptFriendRequest, payload)
}

pub fn encode_reject_friend_request(request_id: &str) -> String {
    let payload = json::encode_object(&[("requestId", json::encode_string(request_id))]);
    build(RequestType::RejectFriendRequest, payload)
}

pub fn encode_cancel_friend_request(request_id: &str) -> String {
    let payload = json::encode_object(&[("requestId", json::encode_string(request_id))]);
    build(RequestType::CancelFriendRequest, payload)
}

pub fn encode_get_friend_requests(character_name: &str) -> String {
    let payload = json::encode_object(&[("characterName", json::encode_string(character_name))]);
    build(RequestType::GetFriendRequests, payload)
}

/// Builds the keepalive poll.
///
/// Heartbeat is alive-only: the payload carries the character name, the
/// two event cursors, and optionally the client version. Presence fields
/// (job, rank, nation, zone, isAnonymous) never ride the heartbeat; they
/// belong to `UpdatePresence`.
pub fn encode_get_heartbeat(
    character_name: &str,
    last_event_timestamp: u64,
    last_request_event_timestamp: u64,
    client_version: &str,
) -> String {
    let mut fields = vec![
        ("characterName", json::encode_string(character_name)),
        ("lastEventTimestamp", last_event_timestamp.to_string()),
        (
            "lastRequestEventTimestamp",
            last_request_event_timestamp.to_string(),
        ),
    ];
    if !client_version.is_empty() {
        fields.push(("clientVersion", json::encode_string(client_version)));
    }
    build(RequestType::GetHeartbeat, json::encode_object(&fields))
}

pub fn encode_get_preferences() -> String {
    build(RequestType::GetPreferences, "{}".to_string())
}

/// Uploads preferences, flattening the per-view column settings into the
/// service's column-key format. Nation and rank columns share one toggle.
pub fn encode_set_preferences(prefs: &Preferences) -> String {
    let main = &prefs.main_friend_view;
    let quick = &prefs.quick_online_friend_view;
    let payload = json::encode_object(&[
        ("useServerNotes", json::encode_boolean(prefs.use_server_notes).to_string()),
        (
            "shareFriendsAcrossAlts",
            json::encode_boolean(prefs.share_friends_across_alts).to_string(),
        ),
        ("showJobColumn", json::encode_boolean(main.show_job).to_string()),
        ("showZoneColumn", json::encode_boolean(main.show_zone).to_string()),
        ("showNationColumn", json::encode_boolean(main.show_nation_rank).to_string()),
        ("showRankColumn", json::encode_boolean(main.show_nation_rank).to_string()),
        ("showLastSeenColumn", json::encode_boolean(main.show_last_seen).to_string()),
        (
            "quickOnlineShowJobColumn",
            json::encode_boolean(quick.show_job).to_string(),
        ),
        (
            "quickOnlineShowZoneColumn",
            json::encode_boolean(quick.show_zone).to_string(),
        ),
        (
            "quickOnlineShowNationColumn",
            json::encode_boolean(quick.show_nation_rank).to_string(),
        ),
        (
            "quickOnlineShowRankColumn",
            json::encode_boolean(quick.show_nation_rank).to_string(),
        ),
        (
            "quickOnlineShowLastSeenColumn",
            json::encode_boolean(quick.show_last_seen).to_string(),
        ),
    ]);
    build(RequestType::SetPreferences, payload)
}

pub fn encode_send_mail(to_user_id: &str, subject: &str, body: &str) -> String {
    let payload = json::encode_object(&[
        ("toUserId", json::encode_string(to_user_id)),
        ("subject", json::encode_string(subject)),
        ("body", json::encode_string(body)),
    ]);
    build(RequestType::SendMail, payload)
}

pub fn encode_get_mail_inbox(limit: i32, offset: i32) -> String {
    let payload = json::encode_object(&[
        ("limit", limit.to_string()),
        ("offset", offset.to_string()),
    ]);
    build(RequestType::GetMailInbox, payload)
}

/// Meta-mode inbox listing carries no body; the `?mode=meta` query
/// parameter on the URL selects it.
pub fn encode_get_mail_inbox_meta() -> String {
    String::new()
}

pub fn encode_get_mail_all(folder: &str, limit: i32, offset: i32, since: u64) -> String {
    let mut fields = vec![
        ("folder", json::encode_string(folder)),
        ("limit", limit.to_string()),
        ("offset", offset.to_string()),
    ];
    if since > 0 {
        fields.push(("since", since.to_string()));
    }
    build(RequestType::GetMailAll, json::encode_object(&fields))
}

/// Meta-mode variant of the all-folders listing; body-less like
/// [`encode_get_mail_inbox_meta`].
pub fn encode_get_mail_all_meta() -> String {
    String::new()
}

pub fn encode_get_mail_batch(mailbox: &str, message_ids: &[String]) -> String {
    let payload = json::encode_object(&[
        ("mailbox", json::encode_string(mailbox)),
        ("ids", json::encode_string_array(message_ids)),
    ]);
    build(RequestType::GetMailBatch, payload)
}

pub fn encode_get_mail_unread_count() -> String {
    build(RequestType::GetMailUnreadCount, "{}".to_string())
}

pub fn encode_mark_mail_read(message_id: &str) -> String {
    let payload = json::encode_object(&[("messageId", json::encode_string(message_id))]);
    build(RequestType::MarkMailRead, payload)
}

pub fn encode_delete_mail(message_id: &str) -> String {
    let payload = json::encode_object(&[("messageId", json::encode_string(message_id))]);
    build(RequestType::DeleteMail, payload)
}

pub fn encode_get_notes() -> String {
    build(RequestType::GetNotes, "{}".to_string())
}

pub fn encode_get_note(friend_name: &str) -> String {
    let payload = json::encode_object(&[("friendName", json::encode_string(friend_name))]);
    build(RequestType::GetNote, payload)
}

pub fn encode_put_note(friend_name: &str, note_text: &str) -> String {
    let payload = json::encode_object(&[
        ("friendName", json::encode_string(friend_name)),
        ("note", json::encode_string(note_text)),
    ]);
    build(RequestType::PutNote, payload)
}

pub fn encode_delete_note(friend_name: &str) -> String {
    let payload = json::encode_object(&[("friendName", json::encode_string(friend_name))]);
    build(RequestType::DeleteNote, payload)
}

pub fn encode_submit_feedback(subject: &str, message: &str) -> String {
    let payload = json::encode_object(&[
        ("subject", json::encode_string(subject)),
        ("message", json::encode_string(message)),
    ]);
    build(RequestType::SubmitFeedback, payload)
}

pub fn encode_submit_issue(subject: &str, message: &str) -> String {
    let payload = json::encode_object(&[
        ("subject", json::encode_string(subject)),
        ("message", json::encode_string(message)),
    ]);
    build(RequestType::SubmitIssue, payload)
}
