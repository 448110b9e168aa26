//! Threaded cell comments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellCommentReply {
    pub id: String,
    pub author: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellComment {
    pub id: String,
    pub author: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub resolved: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub replies: Vec<CellCommentReply>,
}

impl CellComment {
    pub fn new(id: impl Into<String>, author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            author: author.into(),
            text: text.into(),
            created_at: Utc::now(),
            updated_at: None,
            resolved: false,
            replies: Vec::new(),
        }
    }

    pub fn edit(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.updated_at = Some(Utc::now());
    }

    pub fn add_reply(
        &mut self,
        id: impl Into<String>,
        author: impl Into<String>,
        text: impl Into<String>,
    ) {
        self.replies.push(CellCommentReply {
            id: id.into(),
            author: author.into(),
            text: text.into(),
            created_at: Utc::now(),
        });
        self.updated_at = Some(Utc::now());
    }
}
