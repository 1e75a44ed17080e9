use super::IEntityTitleRepo;
use std::{collections::HashMap, sync::Mutex};

pub struct InMemoryEntityTitleRepo {
    titles: Mutex<HashMap<String, String>>,
}

impl InMemoryEntityTitleRepo {
    pub fn new() -> Self {
        Self {
            titles: Mutex::new(HashMap::new()),
        }
    }

    pub fn insert(&self, related_id: &str, title: &str) {
        let mut titles = self.titles.lock().unwrap();
        titles.insert(related_id.to_string(), title.to_string());
    }
}

#[async_trait::async_trait]
impl IEntityTitleRepo for InMemoryEntityTitleRepo {
    async fn find_title(&self, related_id: &str) -> anyhow::Result<Option<String>> {
        let titles = self.titles.lock().unwrap();
        Ok(titles.get(related_id).cloned())
    }
}
