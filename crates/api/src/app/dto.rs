//! Request DTOs.

use serde::Deserialize;

use coursekit_content::{Category, Visibility};

#[derive(Debug, Deserialize)]
pub struct CreateContentRequest {
    pub title: String,
    pub body: String,
    pub category: Category,
    pub visibility: Visibility,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RecordProgressRequest {
    pub completed_sections: u32,
    pub total_sections: u32,
}

#[derive(Debug, Deserialize)]
pub struct ListContentQuery {
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExplainQuery {
    pub action: String,
    pub resource: String,
}
