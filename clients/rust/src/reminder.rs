use crate::{APIResponse, BaseClient, RelatedType, ID};
use nudge_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct ReminderClient {
    base: Arc<BaseClient>,
}

pub struct StartTrackingInput {
    pub user_id: ID,
    pub related_type: RelatedType,
    pub related_id: String,
}

pub struct RelatedEntityInput {
    pub related_type: RelatedType,
    pub related_id: String,
}

impl RelatedEntityInput {
    fn path(&self) -> String {
        format!("reminders/{}/{}", self.related_type, self.related_id)
    }
}

impl ReminderClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn start_tracking(
        &self,
        input: StartTrackingInput,
    ) -> APIResponse<start_tracking::APIResponse> {
        let body = start_tracking::RequestBody {
            user_id: input.user_id,
            related_type: input.related_type.to_string(),
            related_id: input.related_id,
        };
        self.base
            .post(body, "reminders".into(), StatusCode::OK)
            .await
    }

    pub async fn resolve(
        &self,
        input: RelatedEntityInput,
    ) -> APIResponse<resolve_reminder::APIResponse> {
        self.base
            .put((), format!("{}/resolve", input.path()), StatusCode::OK)
            .await
    }

    pub async fn get(&self, input: RelatedEntityInput) -> APIResponse<get_reminders::APIResponse> {
        self.base.get(input.path(), StatusCode::OK).await
    }

    pub async fn run_sweep(&self) -> APIResponse<run_sweep::APIResponse> {
        self.base
            .post((), "reminders/sweep".into(), StatusCode::OK)
            .await
    }
}
