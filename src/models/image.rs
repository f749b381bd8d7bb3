use serde::{Deserialize, Serialize};

/// An image document as returned by the document store.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub hyperlink: String,
    pub description: String,
    #[serde(default)]
    pub scripts_using: Vec<String>,
    #[serde(default)]
    pub reports: Vec<String>,
    #[serde(rename = "authorID")]
    pub author_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub hyperlink: String,
    pub description: String,
    pub scripts_using: Vec<String>,
    pub reports: Vec<String>,
    #[serde(rename = "authorID")]
    pub author_id: String,
}

/// List entry with a name that can be dropped into a URL path segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageListItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub url_name: String,
    pub hyperlink: String,
    pub description: String,
    pub scripts_using: Vec<String>,
    pub reports: Vec<String>,
    #[serde(rename = "authorID")]
    pub author_id: String,
}
