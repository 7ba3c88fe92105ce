//! The fixed catalog of content types a prompt can be generated as.

use serde::{Deserialize, Serialize};

/// One of the six kinds of content the backend knows how to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Blog,
    Tweet,
    Comment,
    Email,
    Tag,
    Idea,
}

/// Display colour family for a content type tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    Blue,
    Green,
    Purple,
    Orange,
    Yellow,
}

impl ContentType {
    /// Catalog order, as shown in the tile grid
    pub const ALL: [ContentType; 6] = [
        ContentType::Blog,
        ContentType::Tweet,
        ContentType::Comment,
        ContentType::Email,
        ContentType::Tag,
        ContentType::Idea,
    ];

    /// Wire identifier sent as the request `type`
    pub fn id(&self) -> &'static str {
        match self {
            ContentType::Blog => "blog",
            ContentType::Tweet => "tweet",
            ContentType::Comment => "comment",
            ContentType::Email => "email",
            ContentType::Tag => "tag",
            ContentType::Idea => "idea",
        }
    }

    pub fn from_id(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "blog" => Some(ContentType::Blog),
            "tweet" => Some(ContentType::Tweet),
            "comment" => Some(ContentType::Comment),
            "email" => Some(ContentType::Email),
            "tag" => Some(ContentType::Tag),
            "idea" => Some(ContentType::Idea),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ContentType::Blog => "Blog Post",
            ContentType::Tweet => "Tweet",
            ContentType::Comment => "Comment",
            ContentType::Email => "Email",
            ContentType::Tag => "Tag",
            ContentType::Idea => "Idea",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ContentType::Blog => "Generate engaging blog articles and posts",
            ContentType::Tweet => "Create compelling tweets and social posts",
            ContentType::Comment => "Generate thoughtful comments and replies",
            ContentType::Email => "Craft professional emails and messages",
            ContentType::Tag => "Create relevant tags and hashtags",
            ContentType::Idea => "Generate creative ideas and concepts",
        }
    }

    pub fn accent(&self) -> Accent {
        match self {
            ContentType::Blog | ContentType::Tweet => Accent::Blue,
            ContentType::Comment => Accent::Green,
            ContentType::Email => Accent::Purple,
            ContentType::Tag => Accent::Orange,
            ContentType::Idea => Accent::Yellow,
        }
    }

    /// Position in [`ContentType::ALL`]
    pub fn index(&self) -> usize {
        ContentType::ALL
            .iter()
            .position(|t| t == self)
            .unwrap_or(0)
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order_and_ids() {
        let ids: Vec<&str> = ContentType::ALL.iter().map(|t| t.id()).collect();
        assert_eq!(ids, vec!["blog", "tweet", "comment", "email", "tag", "idea"]);
    }

    #[test]
    fn test_from_id_roundtrips_every_entry() {
        for t in ContentType::ALL {
            assert_eq!(ContentType::from_id(t.id()), Some(t));
        }
    }

    #[test]
    fn test_from_id_is_case_insensitive() {
        assert_eq!(ContentType::from_id(" Tweet "), Some(ContentType::Tweet));
        assert_eq!(ContentType::from_id("EMAIL"), Some(ContentType::Email));
        assert_eq!(ContentType::from_id("novel"), None);
    }

    #[test]
    fn test_index_matches_catalog_position() {
        for (i, t) in ContentType::ALL.iter().enumerate() {
            assert_eq!(t.index(), i);
        }
    }

    #[test]
    fn test_serializes_as_wire_id() {
        let json = serde_json::to_string(&ContentType::Idea).unwrap();
        assert_eq!(json, "\"idea\"");
    }
}
