//! Device and post models.
//!
//! This module defines the [`Device`] and [`Post`] records that own the
//! schedule templates fed to the coverage engine.

use serde::{Deserialize, Serialize};

/// A site or installation owning a set of posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// Unique identifier for the device.
    pub id: i64,
    /// The display name of the device.
    pub name: String,
}

/// A staffed position with its own weekly schedule template.
///
/// # Examples
///
/// ```
/// use coverage_engine::models::Post;
///
/// let post = Post {
///     id: 7,
///     device_id: 1,
///     name: "Accueil".to_string(),
/// };
/// assert!(post.belongs_to(1));
/// assert!(!post.belongs_to(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Unique identifier for the post.
    pub id: i64,
    /// The device this post is attached to.
    #[serde(default)]
    pub device_id: i64,
    /// The display name of the post.
    pub name: String,
}

impl Post {
    /// Returns true if the post is attached to the given device.
    pub fn belongs_to(&self, device_id: i64) -> bool {
        self.device_id == device_id
    }
}
