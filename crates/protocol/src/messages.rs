//! Message types for the fellowship wire protocol
//!
//! Every exchange with the sync service is an envelope
//! `{protocolVersion, type, payload}` (requests) or
//! `{protocolVersion, type, success, payload, ...}` (responses). This
//! module defines the closed request/response type sets, their wire-string
//! mappings, and the plain data records carried in payloads.
//!
//! Request type strings map one-to-one. Response type strings map
//! many-to-one: the service renamed several response types over its
//! lifetime, and the alias table keeps every historical spelling decodable.

/// Outbound request kinds. The wire mapping is a total bijection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestType {
    GetFriendList,
    SetFriendList,
    GetStatus,
    UpdatePresence,
    UpdateMyStatus,
    SendFriendRequest,
    AcceptFriendRequest,
    RejectFriendRequest,
    CancelFriendRequest,
    GetFriendRequests,
    GetHeartbeat,
    GetPreferences,
    SetPreferences,
    SendMail,
    GetMailInbox,
    GetMailInboxMeta,
    GetMailAll,
    GetMailAllMeta,
    GetMailBatch,
    GetMailUnreadCount,
    MarkMailRead,
    DeleteMail,
    GetNotes,
    GetNote,
    PutNote,
    DeleteNote,
    SetActiveCharacter,
    SubmitFeedback,
    SubmitIssue,
}

impl RequestType {
    /// Every request kind, for exhaustive iteration in tests.
    pub const ALL: [RequestType; 29] = [
        RequestType::GetFriendList,
        RequestType::SetFriendList,
        RequestType::GetStatus,
        RequestType::UpdatePresence,
        RequestType::UpdateMyStatus,
        RequestType::SendFriendRequest,
        RequestType::AcceptFriendRequest,
        RequestType::RejectFriendRequest,
        RequestType::CancelFriendRequest,
        RequestType::GetFriendRequests,
        RequestType::GetHeartbeat,
        RequestType::GetPreferences,
        RequestType::SetPreferences,
        RequestType::SendMail,
        RequestType::GetMailInbox,
        RequestType::GetMailInboxMeta,
        RequestType::GetMailAll,
        RequestType::GetMailAllMeta,
        RequestType::GetMailBatch,
        RequestType::GetMailUnreadCount,
        RequestType::MarkMailRead,
        RequestType::DeleteMail,
        RequestType::GetNotes,
        RequestType::GetNote,
        RequestType::PutNote,
        RequestType::DeleteNote,
        RequestType::SetActiveCharacter,
        RequestType::SubmitFeedback,
        RequestType::SubmitIssue,
    ];

    /// Canonical wire string for this request kind.
    pub fn as_wire(self) -> &'static str {
        match self {
            RequestType::GetFriendList => "GetFriendList",
            RequestType::SetFriendList => "SetFriendList",
            RequestType::GetStatus => "GetStatus",
            RequestType::UpdatePresence => "UpdatePresence",
            RequestType::UpdateMyStatus => "UpdateMyStatus",
            RequestType::SendFriendRequest => "SendFriendRequest",
            RequestType::AcceptFriendRequest => "AcceptFriendRequest",
            RequestType::RejectFriendRequest => "RejectFriendRequest",
            RequestType::CancelFriendRequest => "CancelFriendRequest",
            RequestType::GetFriendRequests => "GetFriendRequests",
            RequestType::GetHeartbeat => "GetHeartbeat",
            RequestType::GetPreferences => "GetPreferences",
            RequestType::SetPreferences => "SetPreferences",
            RequestType::SendMail => "SendMail",
            RequestType::GetMailInbox => "GetMailInbox",
            RequestType::GetMailInboxMeta => "GetMailInboxMeta",
            RequestType::GetMailAll => "GetMailAll",
            RequestType::GetMailAllMeta => "GetMailAllMeta",
            RequestType::GetMailBatch => "GetMailBatch",
            RequestType::GetMailUnreadCount => "GetMailUnreadCount",
            RequestType::MarkMailRead => "MarkMailRead",
            RequestType::DeleteMail => "DeleteMail",
            RequestType::GetNotes => "GetNotes",
            RequestType::GetNote => "GetNote",
            RequestType::PutNote => "PutNote",
            RequestType::DeleteNote => "DeleteNote",
            RequestType::SetActiveCharacter => "SetActiveCharacter",
            RequestType::SubmitFeedback => "SubmitFeedback",
            RequestType::SubmitIssue => "SubmitIssue",
        }
    }

    /// Maps a wire string back to a request kind. Unknown strings fail.
    pub fn from_wire(s: &str) -> Option<RequestType> {
        RequestType::ALL.iter().copied().find(|t| t.as_wire() == s)
    }
}

/// Inbound response kinds after alias normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseType {
    FriendList,
    Status,
    Presence,
    AuthEnsureResponse,
    FriendRequest,
    FriendRequests,
    Heartbeat,
    Preferences,
    Mail,
    MailList,
    MailUnreadCount,
    NotesList,
    Note,
    StateUpdate,
    FeedbackResponse,
    IssueResponse,
    AltVisibility,
    Success,
    Error,
}

/// Ordered alias table mapping historical server response-type strings to
/// normalized kinds. Scanned front to back; a string listed in more than
/// one row resolves to its first row.
const RESPONSE_ALIASES: &[(&[&str], ResponseType)] = &[
    (&["FriendsListResponse"], ResponseType::FriendList),
    (
        &["AuthEnsureResponse", "MeResponse", "AddCharacterResponse"],
        ResponseType::AuthEnsureResponse,
    ),
    (&["FriendRequestsResponse"], ResponseType::FriendRequests),
    (
        &[
            "SendFriendRequestResponse",
            "AcceptFriendRequestResponse",
            "RejectFriendRequestResponse",
            "CancelFriendRequestResponse",
        ],
        ResponseType::FriendRequest,
    ),
    (&["HeartbeatResponse"], ResponseType::Heartbeat),
    (
        &["PreferencesResponse", "PreferencesUpdateResponse"],
        ResponseType::Preferences,
    ),
    (
        &["MailSentResponse", "MailMessageResponse"],
        ResponseType::Mail,
    ),
    (&["MailListResponse"], ResponseType::MailList),
    (&["UnreadCountResponse"], ResponseType::MailUnreadCount),
    (&["StateUpdateResponse"], ResponseType::StateUpdate),
    (&["NotesListResponse"], ResponseType::NotesList),
    (
        &["NoteResponse", "NoteUpdateResponse", "NoteDeleteResponse"],
        ResponseType::Note,
    ),
    (&["Error"], ResponseType::Error),
    (
        &[
            "AddFriendResponse",
            "RemoveFriendResponse",
            "RemoveFriendVisibilityResponse",
            "SyncFriendsResponse",
        ],
        ResponseType::Success,
    ),
    (
        &[
            "StateUpdateResponse",
            "PrivacyUpdateResponse",
            "SetActiveCharacterResponse",
            "CharactersListResponse",
        ],
        ResponseType::Success,
    ),
    (
        &[
            "BatchMarkReadResponse",
            "MarkReadResponse",
            "MailDeleteResponse",
        ],
        ResponseType::Success,
    ),
    (&["FeedbackResponse"], ResponseType::FeedbackResponse),
    (&["IssueResponse"], ResponseType::IssueResponse),
];

impl ResponseType {
    /// Canonical string for this response kind.
    ///
    /// Lossy by design for kinds with multiple wire aliases: decoding a
    /// legacy alias and re-encoding yields the canonical spelling, not
    /// the alias.
    pub fn as_wire(self) -> &'static str {
        match self {
            ResponseType::FriendList => "FriendList",
            ResponseType::Status => "Status",
            ResponseType::Presence => "Presence",
            ResponseType::AuthEnsureResponse => "AuthEnsureResponse",
            ResponseType::FriendRequest => "FriendRequest",
            ResponseType::FriendRequests => "FriendRequests",
            ResponseType::Heartbeat => "Heartbeat",
            ResponseType::Preferences => "Preferences",
            ResponseType::Mail => "Mail",
            ResponseType::MailList => "MailList",
            ResponseType::MailUnreadCount => "MailUnreadCount",
            ResponseType::NotesList => "NotesList",
            ResponseType::Note => "Note",
            ResponseType::StateUpdate => "StateUpdate",
            ResponseType::FeedbackResponse => "FeedbackResponse",
            ResponseType::IssueResponse => "IssueResponse",
            ResponseType::AltVisibility => "AltVisibility",
            ResponseType::Success => "Success",
            ResponseType::Error => "Error",
        }
    }

    /// Maps a server response-type string through the alias table.
    /// Unknown strings fail.
    pub fn from_wire(s: &str) -> Option<ResponseType> {
        RESPONSE_ALIASES
            .iter()
            .find(|(aliases, _)| aliases.contains(&s))
            .map(|&(_, kind)| kind)
    }
}

/// Outbound envelope. Built fresh per call, serialized, then discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestMessage {
    pub protocol_version: String,
    pub kind: RequestType,
    /// Raw JSON object text; empty means no payload field on the wire.
    pub payload: String,
}

/// Inbound envelope after decoding and payload normalization.
///
/// When `success` is false, `error` and `error_code` carry the
/// authoritative failure description. `payload` is always normalized JSON
/// object text (possibly synthesized from legacy top-level fields) or
/// empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseMessage {
    pub protocol_version: String,
    pub kind: ResponseType,
    pub success: bool,
    pub payload: String,
    pub error: String,
    pub error_code: String,
    pub details: String,
    pub request_id: String,
}

impl Default for ResponseMessage {
    fn default() -> Self {
        Self {
            protocol_version: String::new(),
            kind: ResponseType::Error,
            success: false,
            payload: String::new(),
            error: String::new(),
            error_code: String::new(),
            details: String::new(),
            request_id: String::new(),
        }
    }
}

// ---------------------------------------------------------------------
// Payload records (decode output)
// ---------------------------------------------------------------------

/// One friend entry in a friend-list response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FriendData {
    /// Active character name.
    pub name: String,
    /// Name under which the friendship was originally made.
    pub friended_as: String,
    /// All character names linked to this friend's account.
    pub linked_characters: Vec<String>,
}

/// One friend's presence snapshot in a status or heartbeat response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FriendStatusData {
    pub character_name: String,
    pub display_name: String,
    pub is_online: bool,
    pub job: String,
    pub rank: String,
    /// Nation id, or `-1` when hidden/not set.
    pub nation: i32,
    pub zone: String,
    /// Milliseconds since epoch; `0` means never seen.
    pub last_seen_at: u64,
    pub show_online_status: bool,
    pub is_linked_character: bool,
    pub is_on_alt_character: bool,
    pub alt_character_name: String,
    pub friended_as: String,
    pub linked_characters: Vec<String>,
}

impl Default for FriendStatusData {
    fn default() -> Self {
        Self {
            character_name: String::new(),
            display_name: String::new(),
            is_online: false,
            job: String::new(),
            rank: String::new(),
            nation: -1,
            zone: String::new(),
            last_seen_at: 0,
            show_online_status: true,
            is_linked_character: false,
            is_on_alt_character: false,
            alt_character_name: String::new(),
            friended_as: String::new(),
            linked_characters: Vec::new(),
        }
    }
}

/// Friend-list response payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FriendListPayload {
    pub friends: Vec<FriendData>,
}

/// Status response payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusPayload {
    pub statuses: Vec<FriendStatusData>,
}

/// One friend request, incoming or outgoing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FriendRequestData {
    pub request_id: String,
    pub from_character_name: String,
    pub to_character_name: String,
    pub from_account_id: i32,
    pub to_account_id: i32,
    pub status: String,
    pub created_at: u64,
}

/// Friend-requests response payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FriendRequestsPayload {
    pub incoming: Vec<FriendRequestData>,
    pub outgoing: Vec<FriendRequestData>,
}

/// Heartbeat response payload: presence snapshots plus queued events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeartbeatPayload {
    pub statuses: Vec<FriendStatusData>,
    pub events: Vec<FriendRequestData>,
    pub last_event_timestamp: u64,
    pub last_request_event_timestamp: u64,
}

/// Server-held preferences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferencesPayload {
    pub use_server_notes: bool,
    pub share_friends_across_alts: bool,
    pub show_friended_as_column: bool,
    pub show_job_column: bool,
    pub show_rank_column: bool,
    pub show_nation_column: bool,
    pub show_zone_column: bool,
    pub show_last_seen_column: bool,
    pub quick_online_show_friended_as_column: bool,
    pub quick_online_show_job_column: bool,
    pub quick_online_show_rank_column: bool,
    pub quick_online_show_nation_column: bool,
    pub quick_online_show_zone_column: bool,
    pub quick_online_show_last_seen_column: bool,
}

impl Default for PreferencesPayload {
    fn default() -> Self {
        Self {
            use_server_notes: false,
            share_friends_across_alts: true,
            show_friended_as_column: true,
            show_job_column: true,
            show_rank_column: true,
            show_nation_column: true,
            show_zone_column: true,
            show_last_seen_column: true,
            quick_online_show_friended_as_column: false,
            quick_online_show_job_column: false,
            quick_online_show_rank_column: false,
            quick_online_show_nation_column: false,
            quick_online_show_zone_column: false,
            quick_online_show_last_seen_column: false,
        }
    }
}

/// One mail message. `body` is empty in meta-list mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MailMessageData {
    pub message_id: String,
    pub from_name: String,
    pub to_name: String,
    pub subject: String,
    pub body: String,
    pub created_at: u64,
    pub read_at: u64,
    pub is_read: bool,
}

/// Mail-list response payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MailListPayload {
    pub messages: Vec<MailMessageData>,
}

/// Unread-count response payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MailUnreadCountPayload {
    pub count: i32,
}

/// One server-side friend note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteData {
    pub friend_name: String,
    pub note: String,
    pub updated_at: u64,
}

/// Notes-list response payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotesListPayload {
    pub notes: Vec<NoteData>,
}

/// Single-note response payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePayload {
    pub note: NoteData,
}

/// Feedback submission acknowledgement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedbackPayload {
    pub feedback_id: i32,
}

/// Issue submission acknowledgement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IssuePayload {
    pub issue_id: i32,
}

// ---------------------------------------------------------------------
// Encoder input models
// ---------------------------------------------------------------------

/// A friend entry as held locally and uploaded via `SetFriendList`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Friend {
    pub name: String,
    pub friended_as: String,
    pub linked_characters: Vec<String>,
}

/// The local player's presence record uploaded via `UpdatePresence`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Presence {
    pub character_name: String,
    pub job: String,
    pub rank: String,
    pub nation: i32,
    pub zone: String,
    pub is_anonymous: bool,
    pub timestamp: u64,
}

/// Column toggles for one friend-list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FriendViewSettings {
    pub show_job: bool,
    pub show_zone: bool,
    pub show_nation_rank: bool,
    pub show_last_seen: bool,
}

impl Default for FriendViewSettings {
    fn default() -> Self {
        Self {
            show_job: true,
            show_zone: false,
            show_nation_rank: false,
            show_last_seen: false,
        }
    }
}

/// Preferences uploaded via `SetPreferences`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    pub use_server_notes: bool,
    pub share_friends_across_alts: bool,
    pub main_friend_view: FriendViewSettings,
    pub quick_online_friend_view: FriendViewSettings,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            use_server_notes: false,
            share_friends_across_alts: true,
            main_friend_view: FriendViewSettings::default(),
            quick_online_friend_view: FriendViewSettings::default(),
        }
    }
}
