//! Canonical conversion from raw backend documents to view-models.
//!
//! Mapping never fails. Missing or mistyped optional fields fall back to
//! empty strings, zero, empty lists and the document's own creation time.

use ::chrono::{DateTime, Utc};
use ::serde_json::Value;

use crate::model::{
    fields, Author, Comment, CommentAuthor, Content, ContentType,
    SavedContent, UserProfile, Visibility,
};
use crate::store::{parse_timestamp, Document};

pub const EXCERPT_LENGTH: usize = 150;

/// First 150 characters of `body` followed by `...`. The ellipsis is
/// appended even when nothing was cut.
pub fn excerpt(body: &str) -> String {
    let mut excerpt: String = body.chars().take(EXCERPT_LENGTH).collect();
    excerpt.push_str("...");
    excerpt
}

fn string_field(document: &Document, name: &str) -> String {
    document.str_field(name).unwrap_or_default().to_string()
}

fn u64_field(document: &Document, name: &str) -> Option<u64> {
    match document.data.get(name)? {
        Value::Number(number) => number
            .as_u64()
            .or_else(|| number.as_i64().map(|value| value.max(0) as u64)),
        _ => None,
    }
}

fn time_field(document: &Document, name: &str) -> DateTime<Utc> {
    document
        .str_field(name)
        .and_then(parse_timestamp)
        .unwrap_or(document.created_at)
}

fn string_list_field(document: &Document, name: &str) -> Vec<String> {
    match document.data.get(name) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(|item| item.to_string())
            .collect(),
        _ => vec![],
    }
}

fn content_with_type(
    document: &Document,
    content_type: ContentType,
    time_field_name: &str,
) -> Content {
    let body = string_field(document, fields::BODY);
    let liked_by = string_list_field(document, fields::LIKED_BY);
    let username = string_field(document, fields::USERNAME);

    Content {
        id: document.id.clone(),
        title: string_field(document, fields::TITLE),
        slug: document.id.clone(),
        excerpt: excerpt(&body),
        body,
        content_type,
        author: Author {
            id: string_field(document, fields::USER_ID),
            name: username.clone(),
            username,
        },
        created_at: time_field(document, time_field_name),
        likes: u64_field(document, fields::LIKES)
            .unwrap_or(liked_by.len() as u64),
        liked_by,
        comment_count: u64_field(document, fields::COMMENT_COUNT).unwrap_or(0),
        featured: document
            .data
            .get(fields::FEATURED)
            .and_then(Value::as_bool)
            .unwrap_or(false),
        visibility: document
            .str_field(fields::VISIBILITY)
            .and_then(Visibility::parse),
    }
}

/// Maps a document of the generic content collection. Documents with an
/// unknown discriminator map as poetry.
pub fn document_to_content(document: &Document) -> Content {
    let content_type = document
        .str_field(fields::TYPE)
        .and_then(ContentType::from_discriminator)
        .unwrap_or(ContentType::Poetry);

    content_with_type(document, content_type, fields::PUBLISHED_AT)
}

/// Maps a document of the blog collection.
pub fn document_to_blog_post(document: &Document) -> Content {
    let mut content =
        content_with_type(document, ContentType::Blog, fields::CREATED_AT);
    content.visibility = Some(content.visibility.unwrap_or_default());
    content
}

pub fn document_to_profile(document: &Document) -> UserProfile {
    let username = string_field(document, fields::USERNAME);
    let display_name = document
        .str_field(fields::DISPLAY_NAME)
        .filter(|name| !name.trim().is_empty())
        .map(|name| name.to_string())
        .unwrap_or_else(|| username.clone());

    UserProfile {
        id: document.id.clone(),
        user_id: string_field(document, fields::USER_ID),
        username,
        display_name,
        bio: string_field(document, fields::BIO),
        avatar_file_id: document
            .str_field(fields::AVATAR_FILE_ID)
            .filter(|id| !id.is_empty())
            .map(|id| id.to_string()),
        avatar_url: None,
        created_at: document.created_at,
        publication_count: None,
    }
}

pub fn document_to_comment(document: &Document) -> Comment {
    Comment {
        id: document.id.clone(),
        content_id: string_field(document, fields::CONTENT_ID),
        author: CommentAuthor {
            id: string_field(document, fields::USER_ID),
            username: string_field(document, fields::USERNAME),
        },
        body: string_field(document, fields::COMMENT_BODY),
        created_at: time_field(document, fields::CREATED_AT),
    }
}

pub fn document_to_saved(document: &Document) -> SavedContent {
    SavedContent {
        id: document.id.clone(),
        user_id: string_field(document, fields::USER_ID),
        content_id: string_field(document, fields::CONTENT_ID),
        saved_at: time_field(document, fields::SAVED_AT),
        content: None,
    }
}
