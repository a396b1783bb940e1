//! The single table of tools and resources. Listing and dispatch both read it.

use crate::core::tool::{FieldDefault, FieldSpec, ResourceDescriptor, ToolDescriptor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolOp {
    TestConnection,
    GetProfile,
    ValidateToken,
    GetTokenInfo,
    CreateTextPost,
    CreateArticlePost,
    CreateImagePost,
    CreatePost,
    GetConnections,
    SearchPeople,
    GetCompanyInfo,
    SendMessage,
    LikePost,
    CommentOnPost,
    GetProfileViews,
}

impl ToolOp {
    /// Operations backed by a capability the platform withholds from standard apps.
    pub fn is_restricted(self) -> bool {
        matches!(
            self,
            ToolOp::GetConnections
                | ToolOp::SearchPeople
                | ToolOp::GetCompanyInfo
                | ToolOp::SendMessage
                | ToolOp::LikePost
                | ToolOp::CommentOnPost
                | ToolOp::GetProfileViews
        )
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ToolEntry {
    pub descriptor: ToolDescriptor,
    pub op: ToolOp,
    /// Hidden entries are callable but not advertised by `tools/list`.
    pub listed: bool,
    /// Headline placed above the JSON body on success.
    pub success_prefix: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceOp {
    Profile,
    TokenInfo,
    ApiStatus,
    Connections,
}

#[derive(Debug, Clone, Copy)]
pub struct ResourceEntry {
    pub descriptor: ResourceDescriptor,
    pub op: ResourceOp,
}

const VISIBILITIES: &[&str] = &["PUBLIC", "CONNECTIONS"];

const VISIBILITY: FieldSpec = FieldSpec::string("visibility", "Post visibility: PUBLIC or CONNECTIONS")
    .one_of(VISIBILITIES)
    .default(FieldDefault::Str("PUBLIC"));

const START: FieldSpec = FieldSpec::number("start", "Starting index for pagination (default: 0)")
    .default(FieldDefault::Number(0));

const TEXT: FieldSpec = FieldSpec::string("text", "The text content of the post").required();

pub const DEFAULT_CONNECTIONS_COUNT: u32 = 50;
pub const DEFAULT_SEARCH_COUNT: u32 = 10;

const TEXT_POST_FIELDS: &[FieldSpec] = &[TEXT, VISIBILITY];
const LEGACY_POST_FIELDS: &[FieldSpec] = &[TEXT];

const ARTICLE_FIELDS: &[FieldSpec] = &[
    TEXT,
    FieldSpec::string("articleUrl", "URL of the article to share").required(),
    FieldSpec::string("articleTitle", "Title for the article (optional)"),
    FieldSpec::string("articleDescription", "Description for the article (optional)"),
    VISIBILITY,
];

const IMAGE_FIELDS: &[FieldSpec] = &[
    TEXT,
    FieldSpec::string("imagePath", "Local file path to the image to upload").required(),
    FieldSpec::string("imageTitle", "Title for the image (optional)"),
    FieldSpec::string("imageDescription", "Description for the image (optional)"),
    VISIBILITY,
];

const CONNECTIONS_FIELDS: &[FieldSpec] = &[
    START,
    FieldSpec::number("count", "Number of connections to retrieve (default: 50, max: 500)")
        .default(FieldDefault::Number(DEFAULT_CONNECTIONS_COUNT)),
];

const SEARCH_FIELDS: &[FieldSpec] = &[
    FieldSpec::string("keywords", "Keywords to search for").required(),
    START,
    FieldSpec::number("count", "Number of results to retrieve (default: 10)")
        .default(FieldDefault::Number(DEFAULT_SEARCH_COUNT)),
];

const COMPANY_FIELDS: &[FieldSpec] = &[FieldSpec::string("companyId", "The LinkedIn company ID").required()];

const MESSAGE_FIELDS: &[FieldSpec] = &[
    FieldSpec::string("recipientId", "The LinkedIn ID of the recipient").required(),
    FieldSpec::string("message", "The message to send").required(),
];

const LIKE_FIELDS: &[FieldSpec] = &[FieldSpec::string("postId", "The LinkedIn post ID").required()];

const COMMENT_FIELDS: &[FieldSpec] = &[
    FieldSpec::string("postId", "The LinkedIn post ID").required(),
    FieldSpec::string("comment", "The comment text").required(),
];

const fn tool(
    name: &'static str,
    description: &'static str,
    fields: &'static [FieldSpec],
    op: ToolOp,
) -> ToolEntry {
    ToolEntry {
        descriptor: ToolDescriptor { name, description, fields },
        op,
        listed: true,
        success_prefix: None,
    }
}

const fn with_prefix(mut entry: ToolEntry, prefix: &'static str) -> ToolEntry {
    entry.success_prefix = Some(prefix);
    entry
}

const fn hidden(mut entry: ToolEntry) -> ToolEntry {
    entry.listed = false;
    entry
}

pub const TOOLS: &[ToolEntry] = &[
    tool(
        "test_connection",
        "✅ Test LinkedIn API connection and token validity (Always available)",
        &[],
        ToolOp::TestConnection,
    ),
    tool(
        "get_profile",
        "✅ Get your LinkedIn profile information using OpenID Connect (Always available)",
        &[],
        ToolOp::GetProfile,
    ),
    tool(
        "validate_token",
        "✅ Validate if your access token is still valid (Always available)",
        &[],
        ToolOp::ValidateToken,
    ),
    tool(
        "get_token_info",
        "✅ Get detailed information about your access token and scopes (Always available)",
        &[],
        ToolOp::GetTokenInfo,
    ),
    with_prefix(
        tool(
            "create_text_post",
            "⚠️ Create a simple text post on LinkedIn (Requires w_member_social scope)",
            TEXT_POST_FIELDS,
            ToolOp::CreateTextPost,
        ),
        "Text post created successfully ✅",
    ),
    with_prefix(
        tool(
            "create_article_post",
            "⚠️ Create a post with an article/URL on LinkedIn (Requires w_member_social scope)",
            ARTICLE_FIELDS,
            ToolOp::CreateArticlePost,
        ),
        "Article post created successfully ✅",
    ),
    with_prefix(
        tool(
            "create_image_post",
            "⚠️ Create a post with an image on LinkedIn (Requires w_member_social scope)",
            IMAGE_FIELDS,
            ToolOp::CreateImagePost,
        ),
        "Image post created successfully ✅",
    ),
    hidden(with_prefix(
        tool(
            "create_post",
            "⚠️ Create a text post on LinkedIn (legacy alias of create_text_post)",
            LEGACY_POST_FIELDS,
            ToolOp::CreatePost,
        ),
        "Post created successfully ✅",
    )),
    tool(
        "get_connections",
        "❌ Get your LinkedIn connections (Requires special partnership approval)",
        CONNECTIONS_FIELDS,
        ToolOp::GetConnections,
    ),
    tool(
        "search_people",
        "❌ Search for people on LinkedIn (Requires special partnership approval)",
        SEARCH_FIELDS,
        ToolOp::SearchPeople,
    ),
    tool(
        "get_company_info",
        "❌ Get information about a LinkedIn company (Limited access)",
        COMPANY_FIELDS,
        ToolOp::GetCompanyInfo,
    ),
    with_prefix(
        tool(
            "send_message",
            "❌ Send a message to a LinkedIn connection (Requires special partnership approval)",
            MESSAGE_FIELDS,
            ToolOp::SendMessage,
        ),
        "Message sent successfully ✅",
    ),
    with_prefix(
        tool(
            "like_post",
            "❌ Like a LinkedIn post (Requires special partnership approval)",
            LIKE_FIELDS,
            ToolOp::LikePost,
        ),
        "Post liked successfully ✅",
    ),
    with_prefix(
        tool(
            "comment_on_post",
            "❌ Comment on a LinkedIn post (Requires special partnership approval)",
            COMMENT_FIELDS,
            ToolOp::CommentOnPost,
        ),
        "Comment added successfully ✅",
    ),
    tool(
        "get_profile_views",
        "❌ Get analytics about your profile views (Requires special partnership approval)",
        &[],
        ToolOp::GetProfileViews,
    ),
];

pub const RESOURCES: &[ResourceEntry] = &[
    ResourceEntry {
        descriptor: ResourceDescriptor {
            uri: "linkedin://profile",
            name: "Current LinkedIn Profile",
            mime_type: "application/json",
            description: "Your current LinkedIn profile information using OpenID Connect",
        },
        op: ResourceOp::Profile,
    },
    ResourceEntry {
        descriptor: ResourceDescriptor {
            uri: "linkedin://token-info",
            name: "Access Token Information",
            mime_type: "application/json",
            description: "Information about your LinkedIn access token and scopes",
        },
        op: ResourceOp::TokenInfo,
    },
    ResourceEntry {
        descriptor: ResourceDescriptor {
            uri: "linkedin://api-status",
            name: "LinkedIn API Status",
            mime_type: "application/json",
            description: "Current status and connection test for LinkedIn API",
        },
        op: ResourceOp::ApiStatus,
    },
    ResourceEntry {
        descriptor: ResourceDescriptor {
            uri: "linkedin://connections",
            name: "LinkedIn Connections (Restricted)",
            mime_type: "application/json",
            description: "Your LinkedIn connections list - Requires special partnership approval",
        },
        op: ResourceOp::Connections,
    },
];

pub fn find_tool(name: &str) -> Option<&'static ToolEntry> {
    TOOLS.iter().find(|t| t.descriptor.name == name)
}

pub fn find_resource(uri: &str) -> Option<&'static ResourceEntry> {
    RESOURCES.iter().find(|r| r.descriptor.uri == uri)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_and_uris_are_unique() {
        let names: HashSet<_> = TOOLS.iter().map(|t| t.descriptor.name).collect();
        assert_eq!(names.len(), TOOLS.len());
        let uris: HashSet<_> = RESOURCES.iter().map(|r| r.descriptor.uri).collect();
        assert_eq!(uris.len(), RESOURCES.len());
    }

    #[test]
    fn legacy_alias_is_callable_but_hidden() {
        let entry = find_tool("create_post").unwrap();
        assert!(!entry.listed);
        assert_eq!(entry.op, ToolOp::CreatePost);
        assert_eq!(TOOLS.iter().filter(|t| t.listed).count(), 14);
    }

    #[test]
    fn restricted_ops_match_partnership_marker() {
        for t in TOOLS {
            assert_eq!(
                t.op.is_restricted(),
                t.descriptor.description.starts_with('❌'),
                "{}",
                t.descriptor.name
            );
        }
    }

    #[test]
    fn resource_uris_use_linkedin_scheme() {
        assert!(RESOURCES.iter().all(|r| r.descriptor.uri.starts_with("linkedin://")));
        assert!(find_resource("linkedin://api-status").is_some());
        assert!(find_resource("linkedin://nope").is_none());
    }
}
