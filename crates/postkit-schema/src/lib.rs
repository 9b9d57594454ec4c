//! schema.org `BlogPosting` structured data.
//!
//! Search engines read JSON-LD blocks to build rich results. This crate
//! turns post metadata into a `BlogPosting` object and the `<script>` tag
//! that carries it. Empty optional fields are omitted from the output
//! rather than serialized as empty strings.

use serde::Serialize;

/// Post fields that feed the structured-data block.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PostInfo {
    pub title: String,
    pub description: String,
    /// Canonical URL of the post.
    pub url: String,
    pub image_url: Option<String>,
    pub author_name: String,
    /// ISO 8601 publication timestamp.
    pub published: Option<String>,
    /// ISO 8601 last-modified timestamp.
    pub modified: Option<String>,
    pub tags: Vec<String>,
    /// Site or organization publishing the post.
    pub publisher_name: String,
}

#[derive(Serialize)]
struct BlogPosting<'a> {
    #[serde(rename = "@context")]
    context: &'static str,
    #[serde(rename = "@type")]
    r#type: &'static str,
    headline: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<Entity<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    publisher: Option<Entity<'a>>,
    #[serde(rename = "datePublished", skip_serializing_if = "Option::is_none")]
    date_published: Option<&'a str>,
    #[serde(rename = "dateModified", skip_serializing_if = "Option::is_none")]
    date_modified: Option<&'a str>,
    #[serde(skip_serializing_if = "str::is_empty")]
    keywords: &'a str,
}

/// A named schema.org entity (`Person`, `Organization`).
#[derive(Serialize)]
struct Entity<'a> {
    #[serde(rename = "@type")]
    r#type: &'static str,
    name: &'a str,
}

impl<'a> BlogPosting<'a> {
    fn from_post(post: &'a PostInfo, keywords: &'a str) -> Self {
        Self {
            context: "https://schema.org",
            r#type: "BlogPosting",
            headline: &post.title,
            description: &post.description,
            url: &post.url,
            image: post.image_url.as_deref(),
            author: (!post.author_name.is_empty()).then_some(Entity {
                r#type: "Person",
                name: &post.author_name,
            }),
            publisher: (!post.publisher_name.is_empty()).then_some(Entity {
                r#type: "Organization",
                name: &post.publisher_name,
            }),
            date_published: post.published.as_deref(),
            date_modified: post.modified.as_deref(),
            keywords,
        }
    }
}

/// Build the `BlogPosting` object as a JSON value.
#[must_use]
pub fn blog_posting(post: &PostInfo) -> serde_json::Value {
    let keywords = post.tags.join(", ");
    // Serializing a struct of strings cannot fail.
    serde_json::to_value(BlogPosting::from_post(post, &keywords))
        .unwrap_or(serde_json::Value::Null)
}

/// Render the complete `<script type="application/ld+json">` tag.
#[must_use]
pub fn json_ld_script(post: &PostInfo) -> String {
    format!(
        "<script type=\"application/ld+json\">{}</script>",
        blog_posting(post)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample() -> PostInfo {
        PostInfo {
            title: "Baking rye bread".to_owned(),
            description: "A weekend rye loaf, start to finish.".to_owned(),
            url: "https://blog.example.com/rye-bread".to_owned(),
            image_url: Some("https://static.wixstatic.com/media/abc123".to_owned()),
            author_name: "R. Baker".to_owned(),
            published: Some("2024-03-01T09:00:00Z".to_owned()),
            modified: None,
            tags: vec!["baking".to_owned(), "rye".to_owned()],
            publisher_name: "The Bread Blog".to_owned(),
        }
    }

    #[test]
    fn test_full_blog_posting() {
        assert_eq!(
            blog_posting(&sample()),
            json!({
                "@context": "https://schema.org",
                "@type": "BlogPosting",
                "headline": "Baking rye bread",
                "description": "A weekend rye loaf, start to finish.",
                "url": "https://blog.example.com/rye-bread",
                "image": "https://static.wixstatic.com/media/abc123",
                "author": { "@type": "Person", "name": "R. Baker" },
                "publisher": { "@type": "Organization", "name": "The Bread Blog" },
                "datePublished": "2024-03-01T09:00:00Z",
                "keywords": "baking, rye",
            })
        );
    }

    #[test]
    fn test_empty_optionals_omitted() {
        let post = PostInfo {
            title: "Untitled draft".to_owned(),
            ..PostInfo::default()
        };
        assert_eq!(
            blog_posting(&post),
            json!({
                "@context": "https://schema.org",
                "@type": "BlogPosting",
                "headline": "Untitled draft",
            })
        );
    }

    #[test]
    fn test_script_tag_wrapping() {
        let tag = json_ld_script(&sample());
        assert!(tag.starts_with("<script type=\"application/ld+json\">{"));
        assert!(tag.ends_with("}</script>"));
        assert!(tag.contains("\"@type\":\"BlogPosting\""));
    }
}
