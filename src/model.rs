use ::chrono::{DateTime, Utc};
use ::serde::{Deserialize, Serialize};

/// Field names shared by the document collections.
pub mod fields {
    pub const ID: &str = "$id";
    pub const TITLE: &str = "title";
    pub const BODY: &str = "body";
    pub const TYPE: &str = "type";
    pub const USER_ID: &str = "userId";
    pub const USERNAME: &str = "username";
    pub const DISPLAY_NAME: &str = "displayName";
    pub const BIO: &str = "bio";
    pub const AVATAR_FILE_ID: &str = "avatarFileId";
    pub const PUBLISHED_AT: &str = "PublishedAt";
    pub const CREATED_AT: &str = "createdAt";
    pub const LIKES: &str = "likes";
    pub const LIKED_BY: &str = "likedBy";
    pub const COMMENT_COUNT: &str = "commentCount";
    pub const FEATURED: &str = "featured";
    pub const VISIBILITY: &str = "visibility";
    pub const CONTENT_ID: &str = "contentId";
    pub const COMMENT_BODY: &str = "commentBody";
    pub const SAVED_AT: &str = "savedAt";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Poetry,
    Fiction,
    Article,
    Blog,
}

/// Which collection a content type lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    Content,
    Blog,
}

struct ContentTypeEntry {
    content_type: ContentType,
    discriminator: &'static str,
    route_segment: &'static str,
    label: &'static str,
    collection: CollectionKind,
}

static CONTENT_TYPES: [ContentTypeEntry; 4] = [
    ContentTypeEntry {
        content_type: ContentType::Poetry,
        discriminator: "poetry",
        route_segment: "poetry",
        label: "Poetry",
        collection: CollectionKind::Content,
    },
    ContentTypeEntry {
        content_type: ContentType::Fiction,
        discriminator: "fiction",
        route_segment: "fiction",
        label: "Fiction",
        collection: CollectionKind::Content,
    },
    ContentTypeEntry {
        content_type: ContentType::Article,
        discriminator: "article",
        route_segment: "articles",
        label: "Article",
        collection: CollectionKind::Content,
    },
    ContentTypeEntry {
        content_type: ContentType::Blog,
        discriminator: "blog",
        route_segment: "blog",
        label: "Blog",
        collection: CollectionKind::Blog,
    },
];

// Old links used `/stories` before fiction was renamed.
const LEGACY_FICTION_SEGMENT: &str = "stories";

impl ContentType {
    pub const ALL: [ContentType; 4] = [
        ContentType::Poetry,
        ContentType::Fiction,
        ContentType::Article,
        ContentType::Blog,
    ];

    fn entry(self) -> &'static ContentTypeEntry {
        // every variant has a row
        CONTENT_TYPES
            .iter()
            .find(|entry| entry.content_type == self)
            .unwrap_or(&CONTENT_TYPES[0])
    }

    pub fn discriminator(self) -> &'static str {
        self.entry().discriminator
    }

    pub fn route_segment(self) -> &'static str {
        self.entry().route_segment
    }

    pub fn label(self) -> &'static str {
        self.entry().label
    }

    pub fn collection(self) -> CollectionKind {
        self.entry().collection
    }

    pub fn from_discriminator(value: &str) -> Option<ContentType> {
        CONTENT_TYPES
            .iter()
            .find(|entry| entry.discriminator == value)
            .map(|entry| entry.content_type)
    }

    pub fn from_route_segment(segment: &str) -> Option<ContentType> {
        if segment == LEGACY_FICTION_SEGMENT {
            return Some(ContentType::Fiction);
        }

        CONTENT_TYPES
            .iter()
            .find(|entry| entry.route_segment == segment)
            .map(|entry| entry.content_type)
    }
}

impl ::std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
        f.write_str(self.discriminator())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

impl Visibility {
    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
        }
    }

    pub fn parse(value: &str) -> Option<Visibility> {
        match value {
            "public" => Some(Visibility::Public),
            "private" => Some(Visibility::Private),
            _ => None,
        }
    }
}

/// Collection and bucket identifiers inside the backend database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collections {
    pub content: String,
    pub user_profiles: String,
    pub comments: String,
    pub saved_content: String,
    pub blog: String,
    pub profile_pictures: String,
}

impl Collections {
    pub fn for_kind(&self, kind: CollectionKind) -> &str {
        match kind {
            CollectionKind::Content => &self.content,
            CollectionKind::Blog => &self.blog,
        }
    }
}

impl Default for Collections {
    fn default() -> Self {
        Self {
            content: "content".to_string(),
            user_profiles: "user_profiles".to_string(),
            comments: "comments".to_string(),
            saved_content: "saved_content".to_string(),
            blog: "user_blog".to_string(),
            profile_pictures: "profile_pictures".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: String,
    pub name: String,
    pub username: String,
}

/// A published piece of writing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub excerpt: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub author: Author,
    pub created_at: DateTime<Utc>,
    pub likes: u64,
    pub liked_by: Vec<String>,
    pub comment_count: u64,
    pub featured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
}

/// Public profile, distinct from the authentication identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub user_id: String,
    pub username: String,
    pub display_name: String,
    pub bio: String,
    pub avatar_file_id: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub publication_count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentAuthor {
    pub id: String,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub content_id: String,
    pub author: CommentAuthor,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedContent {
    pub id: String,
    pub user_id: String,
    pub content_id: String,
    pub saved_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
}

/// The authenticated viewer of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub name: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_table_round_trips() {
        for content_type in ContentType::ALL {
            assert_eq!(
                ContentType::from_discriminator(content_type.discriminator()),
                Some(content_type)
            );
            assert_eq!(
                ContentType::from_route_segment(content_type.route_segment()),
                Some(content_type)
            );
        }
    }

    #[test]
    fn test_articles_route_differs_from_discriminator() {
        assert_eq!(ContentType::Article.discriminator(), "article");
        assert_eq!(ContentType::Article.route_segment(), "articles");
        assert_eq!(ContentType::from_route_segment("article"), None);
    }

    #[test]
    fn test_stories_alias() {
        assert_eq!(
            ContentType::from_route_segment("stories"),
            Some(ContentType::Fiction)
        );
        assert_eq!(ContentType::from_discriminator("story"), None);
    }

    #[test]
    fn test_blog_uses_blog_collection() {
        assert_eq!(ContentType::Blog.collection(), CollectionKind::Blog);
        assert_eq!(ContentType::Poetry.collection(), CollectionKind::Content);
        let collections = Collections::default();
        assert_eq!(collections.for_kind(CollectionKind::Blog), "user_blog");
    }

    #[test]
    fn test_content_type_serializes_lowercase() {
        assert_eq!(
            ::serde_json::to_string(&ContentType::Fiction).unwrap(),
            "\"fiction\""
        );
    }
}
