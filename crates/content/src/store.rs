//! Storage abstractions for the catalog.
//!
//! Traits keep the HTTP layer backend-agnostic; the in-memory
//! implementations serve tests and single-process deployments. Poisoned
//! locks degrade to empty reads rather than panicking.

use std::collections::HashMap;
use std::sync::RwLock;

use coursekit_core::{ContentId, UserId};

use crate::item::{Category, ContentItem, Visibility};
use crate::profile::Profile;
use crate::progress::CourseProgress;

/// Content catalog storage abstraction.
pub trait ContentStore: Send + Sync {
    fn get(&self, id: &ContentId) -> Option<ContentItem>;
    fn upsert(&self, item: ContentItem);
    fn remove(&self, id: &ContentId) -> Option<ContentItem>;
    /// Published items in a visibility tier, newest publication first.
    fn list_published(
        &self,
        visibility: Visibility,
        category: Option<Category>,
    ) -> Vec<ContentItem>;
    fn list_all(&self) -> Vec<ContentItem>;
}

/// Profile storage abstraction.
pub trait ProfileStore: Send + Sync {
    fn get(&self, user_id: &UserId) -> Option<Profile>;
    fn upsert(&self, profile: Profile);
    fn count(&self) -> usize;
}

/// Course progress storage abstraction.
pub trait ProgressStore: Send + Sync {
    fn get(&self, user_id: &UserId, content_id: &ContentId) -> Option<CourseProgress>;
    fn upsert(&self, progress: CourseProgress);
    fn list_for_user(&self, user_id: &UserId) -> Vec<CourseProgress>;
}

/// In-memory content store.
#[derive(Debug, Default)]
pub struct InMemoryContentStore {
    inner: RwLock<HashMap<ContentId, ContentItem>>,
}

impl InMemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ContentStore for InMemoryContentStore {
    fn get(&self, id: &ContentId) -> Option<ContentItem> {
        let map = self.inner.read().ok()?;
        map.get(id).cloned()
    }

    fn upsert(&self, item: ContentItem) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(item.id, item);
        }
    }

    fn remove(&self, id: &ContentId) -> Option<ContentItem> {
        let mut map = self.inner.write().ok()?;
        map.remove(id)
    }

    fn list_published(
        &self,
        visibility: Visibility,
        category: Option<Category>,
    ) -> Vec<ContentItem> {
        let map = match self.inner.read() {
            Ok(m) => m,
            Err(_) => return vec![],
        };

        let mut items: Vec<ContentItem> = map
            .values()
            .filter(|item| {
                item.is_published()
                    && item.visibility == visibility
                    && category.is_none_or(|c| item.category == c)
            })
            .cloned()
            .collect();

        items.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        items
    }

    fn list_all(&self) -> Vec<ContentItem> {
        let map = match self.inner.read() {
            Ok(m) => m,
            Err(_) => return vec![],
        };

        let mut items: Vec<ContentItem> = map.values().cloned().collect();
        items.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        items
    }
}

/// In-memory profile store.
#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    inner: RwLock<HashMap<UserId, Profile>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProfileStore for InMemoryProfileStore {
    fn get(&self, user_id: &UserId) -> Option<Profile> {
        let map = self.inner.read().ok()?;
        map.get(user_id).cloned()
    }

    fn upsert(&self, profile: Profile) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(profile.user_id, profile);
        }
    }

    fn count(&self) -> usize {
        self.inner.read().map(|map| map.len()).unwrap_or(0)
    }
}

/// In-memory progress store.
#[derive(Debug, Default)]
pub struct InMemoryProgressStore {
    inner: RwLock<HashMap<(UserId, ContentId), CourseProgress>>,
}

impl InMemoryProgressStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressStore for InMemoryProgressStore {
    fn get(&self, user_id: &UserId, content_id: &ContentId) -> Option<CourseProgress> {
        let map = self.inner.read().ok()?;
        map.get(&(*user_id, *content_id)).copied()
    }

    fn upsert(&self, progress: CourseProgress) {
        if let Ok(mut map) = self.inner.write() {
            map.insert((progress.user_id, progress.content_id), progress);
        }
    }

    fn list_for_user(&self, user_id: &UserId) -> Vec<CourseProgress> {
        let map = match self.inner.read() {
            Ok(m) => m,
            Err(_) => return vec![],
        };

        map.iter()
            .filter_map(|((u, _), p)| if u == user_id { Some(*p) } else { None })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn published(visibility: Visibility, category: Category) -> ContentItem {
        let mut item = ContentItem::draft(
            ContentId::new(),
            UserId::new(),
            "title",
            "body",
            category,
            visibility,
            Utc::now(),
        )
        .unwrap();
        item.publish(Utc::now()).unwrap();
        item
    }

    #[test]
    fn drafts_never_show_up_in_published_listings() {
        let store = InMemoryContentStore::new();

        let draft = ContentItem::draft(
            ContentId::new(),
            UserId::new(),
            "draft",
            "body",
            Category::Blog,
            Visibility::Public,
            Utc::now(),
        )
        .unwrap();
        store.upsert(draft);
        store.upsert(published(Visibility::Public, Category::Blog));

        let listed = store.list_published(Visibility::Public, None);
        assert_eq!(listed.len(), 1);
        assert!(listed[0].is_published());
        assert_eq!(store.list_all().len(), 2);
    }

    #[test]
    fn listings_are_split_by_visibility_and_category() {
        let store = InMemoryContentStore::new();
        store.upsert(published(Visibility::Public, Category::Blog));
        store.upsert(published(Visibility::Premium, Category::Course));
        store.upsert(published(Visibility::Premium, Category::Notebook));

        assert_eq!(store.list_published(Visibility::Public, None).len(), 1);
        assert_eq!(store.list_published(Visibility::Premium, None).len(), 2);
        assert_eq!(
            store
                .list_published(Visibility::Premium, Some(Category::Course))
                .len(),
            1
        );
    }

    #[test]
    fn remove_returns_the_stored_item() {
        let store = InMemoryContentStore::new();
        let item = published(Visibility::Public, Category::Blog);
        let id = item.id;
        store.upsert(item);

        assert!(store.remove(&id).is_some());
        assert!(store.get(&id).is_none());
    }

    #[test]
    fn progress_is_keyed_per_user_and_course() {
        let store = InMemoryProgressStore::new();
        let user_a = UserId::new();
        let user_b = UserId::new();
        let course = ContentId::new();

        store.upsert(CourseProgress::start(user_a, course, 4, Utc::now()).unwrap());
        store.upsert(CourseProgress::start(user_b, course, 4, Utc::now()).unwrap());

        assert_eq!(store.list_for_user(&user_a).len(), 1);
        assert!(store.get(&user_a, &course).is_some());

        let other_course = ContentId::new();
        assert!(store.get(&user_a, &other_course).is_none());
    }
}
