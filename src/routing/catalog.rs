// ============================================================================
// CATALOG - Endpoints documentados de la API de CUB
// ============================================================================
// Tabla estática; el router busca por clave (fragmento sin '#')
// ============================================================================

use std::collections::HashMap;
use crate::models::endpoint::{
    EndpointDescriptor, ErrorCode, HttpMethod, Note, ParamKind, ParamLocation, ParamSpec,
};

const AUTH_NOTE: Note = Note {
    title: "To access this API method, you need to be authorized.",
    content: r##"To do this, please enter your token. If you don't have one, you can <a href="#device-add" class="underline text-[#aa566f]">get it here</a>."##,
};

const AUTH_REQUIRED_NOTE: Note = Note {
    title: "Authentication Required",
    content: "This API method requires user authentication.",
};

const PUBLIC_NOTE: Note = Note {
    title: "Authorization is not required for this API method.",
    content: "",
};

const NO_NOTE: Note = Note { title: "", content: "" };

const BOOKMARK_TYPES: &[&str] = &["book", "history", "like", "wath"];

const CARD_FIELDS: &[&str] = &[
    "poster_path", "overview", "release_date", "genre_ids", "id", "original_title",
    "original_language", "title", "backdrop_path", "popularity", "vote_count",
    "vote_average", "imdb_id", "kinopoisk_id", "original_name", "name",
    "first_air_date", "origin_country", "status", "pg", "release_quality",
    "imdb_rating", "kp_rating", "source", "number_of_seasons",
    "number_of_episodes", "next_episode_to_air", "img", "poster",
    "background_image",
];

const ERR_DATA: ErrorCode = ErrorCode { status: 300, description: "Error in data" };

const fn param(
    name: &'static str,
    kind: ParamKind,
    location: ParamLocation,
    description: &'static str,
    default_value: Option<&'static str>,
    options: &'static [&'static str],
) -> ParamSpec {
    ParamSpec { name, kind, location, description, default_value, options }
}

use ParamKind::{Array, Boolean, Integer, Object, String as Str};
use ParamLocation::{Body, Path, Query};

pub static ENDPOINTS: &[EndpointDescriptor] = &[
    EndpointDescriptor {
        key: "bookmarks-all",
        title: "Bookmarks All",
        description: "Returns the user's list of bookmarks.",
        method: HttpMethod::Get,
        path: "/bookmarks/all",
        params: &[
            param("full", Integer, Query, "Returns the entire list. By default, unique cards without history are returned.", Some("0"), &[]),
            param("type", Str, Query, "Bookmark type.", Some("book"), BOOKMARK_TYPES),
        ],
        example_response: r#"[{"type":"like","count":7},{"type":"wath","count":6}]"#,
        requires_auth: true,
        error_codes: &[ERR_DATA],
        note: AUTH_NOTE,
        default_status: 200,
        email_default: false,
    },
    EndpointDescriptor {
        key: "bookmarks-add",
        title: "Bookmarks Add",
        description: "Add a new bookmark.",
        method: HttpMethod::Post,
        path: "/bookmarks/add",
        params: &[
            param("data", Object, Body, "JSON card with required fields:", Some(r#"{"id": "123456789", "title": "Example Movie"}"#), CARD_FIELDS),
            param("type", Str, Body, "Type: book, history, like, wath (required).", Some("book"), BOOKMARK_TYPES),
        ],
        example_response: r#"{"success":true}"#,
        requires_auth: true,
        error_codes: &[ERR_DATA, ErrorCode { status: 555, description: "No premium access" }],
        note: AUTH_NOTE,
        default_status: 200,
        email_default: false,
    },
    EndpointDescriptor {
        key: "bookmarks-remove",
        title: "Bookmarks Remove",
        description: "Remove an existing bookmark.",
        method: HttpMethod::Post,
        path: "/bookmarks/remove",
        params: &[
            param("id", Integer, Body, "ID of the entry.", Some("9938938"), &[]),
            param("list", Array, Body, "Or a list of entry IDs (e.g., [455, 333, 7854, 3222...]).", Some("[455,333]"), &[]),
        ],
        example_response: r#"{"success":true}"#,
        requires_auth: true,
        error_codes: &[ERR_DATA],
        note: AUTH_NOTE,
        default_status: 200,
        email_default: false,
    },
    EndpointDescriptor {
        key: "card-season",
        title: "Card Season",
        description: "Retrieve information about the current season.",
        method: HttpMethod::Post,
        path: "/card/season",
        params: &[
            param("id", Integer, Body, "Card ID required", Some("95396"), &[]),
            param("original_name", Str, Body, "Original card name, used to generate time-code hash required", Some("Severance"), &[]),
            param("season", Integer, Body, "Season number required", Some("1"), &[]),
        ],
        example_response: r#"{"season":"Spring 2025"}"#,
        requires_auth: true,
        error_codes: &[],
        note: AUTH_NOTE,
        default_status: 200,
        email_default: false,
    },
    EndpointDescriptor {
        key: "card-subscribed",
        title: "Card Subscribed",
        description: "Check if the authenticated user is subscribed to premium.",
        method: HttpMethod::Post,
        path: "/card/subscribed",
        params: &[param("id", Integer, Body, "ID of the card (required).", Some("95396"), &[])],
        example_response: r#"{"subscribed":true}"#,
        requires_auth: true,
        error_codes: &[ErrorCode { status: 466, description: "No subscriptions" }],
        note: AUTH_NOTE,
        default_status: 200,
        email_default: false,
    },
    EndpointDescriptor {
        key: "card-translations",
        title: "Card Translations",
        description: "Retrieve card translations.",
        method: HttpMethod::Post,
        path: "/card/translations",
        params: &[
            param("id", Integer, Body, "ID of the card (required).", Some("95396"), &[]),
            param("season", Integer, Body, "Season number (required).", Some("1"), &[]),
        ],
        example_response: r#"{"lang":"en","title":"Title"}"#,
        requires_auth: true,
        error_codes: &[],
        note: AUTH_NOTE,
        default_status: 200,
        email_default: false,
    },
    EndpointDescriptor {
        key: "card-unsubscribe",
        title: "Card Unsubscribe",
        description: "Unsubscribe the authenticated user from premium.",
        method: HttpMethod::Post,
        path: "/card/unsubscribe",
        params: &[param("id", Integer, Body, "ID of the card (required).", Some("95396"), &[])],
        example_response: r#"{"success":true}"#,
        requires_auth: true,
        error_codes: &[ErrorCode {
            status: 500,
            description: "An unexpected error occurred or did not subscribe to the translation",
        }],
        note: AUTH_NOTE,
        default_status: 200,
        email_default: false,
    },
    EndpointDescriptor {
        key: "notice-all",
        title: "Notice All",
        description: "Retrieve all notices for the authenticated user.",
        method: HttpMethod::Get,
        path: "/notice/all",
        params: &[],
        example_response: "[]",
        requires_auth: true,
        error_codes: &[],
        note: AUTH_NOTE,
        default_status: 200,
        email_default: false,
    },
    EndpointDescriptor {
        key: "notice-clear",
        title: "Notice Clear",
        description: "Clear all notifications for the authenticated user.",
        method: HttpMethod::Get,
        path: "/notice/clear",
        params: &[],
        example_response: r#"{"success":true}"#,
        requires_auth: true,
        error_codes: &[],
        note: AUTH_NOTE,
        default_status: 200,
        email_default: false,
    },
    EndpointDescriptor {
        key: "notifications-all",
        title: "Notifications All",
        description: "Retrieve all notifications for the authenticated user.",
        method: HttpMethod::Get,
        path: "/notifications/all",
        params: &[],
        example_response: "[]",
        requires_auth: true,
        error_codes: &[],
        note: AUTH_NOTE,
        default_status: 200,
        email_default: false,
    },
    EndpointDescriptor {
        key: "notifications-add",
        title: "Notifications Add",
        description: "Add a new notification.",
        method: HttpMethod::Post,
        path: "/notifications/add",
        params: &[
            param("data", Object, Body, "JSON card with required fields:", Some("{...}"), CARD_FIELDS),
            param("voice", Str, Body, r##"Name of the translation, e.g., LostFilm. <a href="#card-translations" class="underline text-[#aa566f]">Get a list of available translations</a> (required)."##, Some(""), &[]),
            param("season", Integer, Body, "Season number to stop at (default 1).", Some("1"), &[]),
            param("episode", Integer, Body, "Episode number to stop at (default 1).", Some("1"), &[]),
        ],
        example_response: r#"{"success":true}"#,
        requires_auth: true,
        error_codes: &[ERR_DATA, ErrorCode { status: 429, description: "Notification limit exceeded" }],
        note: AUTH_NOTE,
        default_status: 200,
        email_default: false,
    },
    EndpointDescriptor {
        key: "notifications-remove",
        title: "Notifications Remove",
        description: "Remove an existing notification.",
        method: HttpMethod::Post,
        path: "/notifications/remove",
        params: &[param("id", Integer, Body, "ID of the notification to remove (required).", Some("1"), &[])],
        example_response: r#"{"success":true}"#,
        requires_auth: true,
        error_codes: &[],
        note: AUTH_NOTE,
        default_status: 200,
        email_default: false,
    },
    EndpointDescriptor {
        key: "notifications-status",
        title: "Notifications Status",
        description: "Set the notification status for a specific entry.",
        method: HttpMethod::Post,
        path: "/notifications/status",
        params: &[
            param("id", Integer, Body, "Notification ID (required).", Some("18"), &[]),
            param("status", Integer, Body, "Status (0 or 1, required). 0 means disabled, 1 means enabled.", Some("1"), &["0", "1"]),
        ],
        example_response: r#"{"enabled":true,"unread_count":5}"#,
        requires_auth: true,
        error_codes: &[
            ErrorCode { status: 400, description: "Notification ID and a valid status (0 or 1) are required." },
            ErrorCode { status: 404, description: "Notification not found or not authorized for this user/profile." },
        ],
        note: AUTH_NOTE,
        default_status: 200,
        email_default: false,
    },
    EndpointDescriptor {
        key: "timeline-all",
        title: "Timeline All",
        description: "Returns the user's timeline data.",
        method: HttpMethod::Get,
        path: "/timeline/all",
        params: &[param("full", Boolean, Query, "Returns the entire timeline. Defaults to false.", Some("false"), &[])],
        example_response: r#"{"secuses":true,"timelines":{}}"#,
        requires_auth: true,
        error_codes: &[ErrorCode { status: 500, description: "Internal server error." }],
        note: AUTH_NOTE,
        default_status: 200,
        email_default: false,
    },
    EndpointDescriptor {
        key: "profiles-all",
        title: "Profiles All",
        description: "Retrieve all profiles for the authenticated user.",
        method: HttpMethod::Get,
        path: "/profiles/all",
        params: &[],
        example_response: r#"{"secuses":true,"profiles":[{"id":536380,"cid":520688,"name":"Общий","main":1,"icon":"l_1"},{"id":536831,"cid":520688,"name":"New Name","main":0,"icon":"l_1"},{"id":536880,"cid":520688,"name":"New Profile Name","main":0,"icon":"l_1"}]}"#,
        requires_auth: true,
        error_codes: &[],
        note: AUTH_NOTE,
        default_status: 200,
        email_default: false,
    },
    EndpointDescriptor {
        key: "profiles-change",
        title: "Profiles Change",
        description: "Change an existing profile.",
        method: HttpMethod::Post,
        path: "/profiles/change",
        params: &[
            param("id", Integer, Body, "ID of the profile to change (required).", Some("0"), &[]),
            param("name", Str, Body, "New name for the profile (required).", Some("New Name"), &[]),
        ],
        example_response: r#"{"success":true}"#,
        requires_auth: true,
        error_codes: &[ERR_DATA],
        note: AUTH_NOTE,
        default_status: 200,
        email_default: false,
    },
    EndpointDescriptor {
        key: "profiles-create",
        title: "Profiles Create",
        description: "Create a new profile.",
        method: HttpMethod::Post,
        path: "/profiles/create",
        params: &[param("name", Str, Body, "Name of the profile (required).", Some(""), &[])],
        example_response: r#"{"secuses":true,"profile":{"id":537503,"cid":520688,"name":"DEMO"}}"#,
        requires_auth: true,
        error_codes: &[
            ErrorCode { status: 300, description: "Error in data." },
            ErrorCode { status: 400, description: "Maximum number of profiles created." },
        ],
        note: AUTH_NOTE,
        default_status: 200,
        email_default: false,
    },
    EndpointDescriptor {
        key: "profiles-remove",
        title: "Profiles Remove",
        description: "Removes a user profile by ID.",
        method: HttpMethod::Post,
        path: "/profiles/remove",
        params: &[param("id", Integer, Body, "The ID of the profile to remove.", None, &[])],
        example_response: r#"{"success":true,"message":"Profile removed successfully."}"#,
        requires_auth: true,
        error_codes: &[],
        note: NO_NOTE,
        default_status: 200,
        email_default: false,
    },
    EndpointDescriptor {
        key: "profiles-active",
        title: "Profiles Active",
        description: "Sets the active profile for the authenticated user.",
        method: HttpMethod::Post,
        path: "/profiles/active",
        params: &[param("id", Integer, Body, "The ID of the profile to set as active.", None, &[])],
        example_response: r#"{"success":true,"message":"Active profile updated successfully."}"#,
        requires_auth: true,
        error_codes: &[],
        note: AUTH_REQUIRED_NOTE,
        default_status: 200,
        email_default: false,
    },
    EndpointDescriptor {
        key: "reactions-add",
        title: "Reactions Add",
        description: "Adds a reaction to content.",
        method: HttpMethod::Get,
        path: "/reactions/add/:content_id/:type",
        params: &[
            param("content_id", Str, Path, "The ID of the content to react to.", None, &[]),
            param("type", Str, Path, "The type of reaction.", None, &["like", "dislike", "fire", "heart"]),
        ],
        example_response: r#"{"secuses":true}"#,
        requires_auth: true,
        error_codes: &[],
        note: AUTH_REQUIRED_NOTE,
        default_status: 200,
        email_default: false,
    },
    EndpointDescriptor {
        key: "reactions-get",
        title: "Reactions Get",
        description: "Get reactions for specific content.",
        method: HttpMethod::Get,
        path: "/reactions/get/{id}",
        params: &[param(
            "id",
            Str,
            Path,
            r#"Type + card ID, e.g., <span class="px-2 py-0.5 bg-gray-100 text-gray-600 rounded-full text-xs">movie_id</span> | <span class="px-2 py-0.5 bg-gray-100 text-gray-600 rounded-full text-xs">tv_id</span>."#,
            Some("tv_125988"),
            &[],
        )],
        example_response: r#"{"secuses":true,"result":[{"card_id":"tv_125988","type":"think","counter":416},{"card_id":"tv_125988","type":"nice","counter":1434},{"card_id":"tv_125988","type":"fire","counter":6000},{"card_id":"tv_125988","type":"bore","counter":304},{"card_id":"tv_125988","type":"shit","counter":352}]}"#,
        requires_auth: false,
        error_codes: &[],
        note: PUBLIC_NOTE,
        default_status: 200,
        email_default: false,
    },
    EndpointDescriptor {
        key: "users-find",
        title: "Users Find",
        description: "Find a user by email address.",
        method: HttpMethod::Get,
        path: "/users/find",
        params: &[param("email", Str, Query, "User email (required).", Some("test@example.com"), &[])],
        example_response: r#"{"id":"user_id","email":"example@email.com"}"#,
        requires_auth: false,
        error_codes: &[
            ErrorCode { status: 400, description: "Email cannot be empty." },
            ErrorCode { status: 300, description: "User not found." },
        ],
        note: PUBLIC_NOTE,
        default_status: 200,
        email_default: true,
    },
    EndpointDescriptor {
        key: "users-get",
        title: "Users Get",
        description: "Get information about the authenticated user.",
        method: HttpMethod::Get,
        path: "/users/get",
        params: &[],
        example_response: r#"{"secuses":true,"user":{"id":1,"email":"dummy@example.com","profile":1,"telegram_id":0,"telegram_chat":0,"n_movie":1,"n_tv":1,"n_voice":1,"premium":0,"backup":0,"permission":0,"bet":"","payout":0}}"#,
        requires_auth: true,
        error_codes: &[],
        note: AUTH_NOTE,
        default_status: 200,
        email_default: false,
    },
    EndpointDescriptor {
        key: "users-give",
        title: "Users Give",
        description: "Gift CUB Premium subscription to another user.",
        method: HttpMethod::Post,
        path: "/users/give",
        params: &[
            param("to", Integer, Body, "ID of the user to gift (required).", Some("1"), &[]),
            param("days", Integer, Body, r#"Number of days, minimum <span class="px-1 bg-[rgb(238,237,255)] text-[rgb(123,121,255)] rounded">5 days</span> (required)."#, Some("30"), &[]),
            param("password", Str, Body, "Your password for confirmation (required).", Some("password"), &[]),
        ],
        example_response: r#"{"success":true}"#,
        requires_auth: true,
        error_codes: &[
            ErrorCode { status: 455, description: "Cannot gift to yourself." },
            ErrorCode { status: 456, description: "You do not have CUB Premium." },
            ErrorCode { status: 457, description: "Password does not match." },
            ErrorCode { status: 458, description: "Insufficient CUB Premium days." },
            ErrorCode { status: 459, description: "User not found." },
        ],
        note: AUTH_NOTE,
        default_status: 200,
        email_default: false,
    },
];

lazy_static::lazy_static! {
    static ref BY_KEY: HashMap<&'static str, &'static EndpointDescriptor> =
        ENDPOINTS.iter().map(|e| (e.key, e)).collect();
}

/// Busca un endpoint por clave
pub fn find(key: &str) -> Option<&'static EndpointDescriptor> {
    BY_KEY.get(key).copied()
}

/// Secciones del sidebar en orden de aparición
pub fn sections() -> Vec<(&'static str, Vec<&'static EndpointDescriptor>)> {
    let mut grouped: Vec<(&'static str, Vec<&'static EndpointDescriptor>)> = Vec::new();
    for endpoint in ENDPOINTS {
        let section = endpoint.section();
        match grouped.iter_mut().find(|(name, _)| *name == section) {
            Some((_, items)) => items.push(endpoint),
            None => grouped.push((section, vec![endpoint])),
        }
    }
    grouped
}
