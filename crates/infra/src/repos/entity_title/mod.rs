mod inmemory;
mod postgres;

pub use inmemory::InMemoryEntityTitleRepo;
use nudge_domain::RelatedType;
pub use postgres::PostgresEntityTitleRepo;
use std::sync::Arc;

/// Looks up the human readable title of the entities of one `RelatedType`
#[async_trait::async_trait]
pub trait IEntityTitleRepo: Send + Sync {
    async fn find_title(&self, related_id: &str) -> anyhow::Result<Option<String>>;
}

/// One title lookup per `RelatedType`
#[derive(Clone)]
pub struct EntityTitleRepos {
    pub grids: Arc<dyn IEntityTitleRepo>,
    pub projects: Arc<dyn IEntityTitleRepo>,
    pub deliveries: Arc<dyn IEntityTitleRepo>,
}

impl EntityTitleRepos {
    pub fn for_type(&self, related_type: RelatedType) -> &dyn IEntityTitleRepo {
        match related_type {
            RelatedType::Grid => self.grids.as_ref(),
            RelatedType::Project => self.projects.as_ref(),
            RelatedType::Delivery => self.deliveries.as_ref(),
        }
    }
}
