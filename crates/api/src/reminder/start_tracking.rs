use crate::shared::{
    auth::protect_cron_route,
    guard::Guard,
    usecase::{execute, UseCase},
};
use crate::error::NudgeError;
use actix_web::{web, HttpRequest, HttpResponse};
use nudge_api_structs::start_tracking::*;
use nudge_domain::{RelatedType, Reminder, ID};
use nudge_infra::NudgeContext;
use tracing::{error, info};

pub async fn start_tracking_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<NudgeContext>,
) -> Result<HttpResponse, NudgeError> {
    protect_cron_route(&http_req, &ctx)?;

    let body = body.0;
    let usecase = StartTrackingUseCase {
        user_id: body.user_id,
        related_type: Guard::against_malformed_related_type(&body.related_type)?,
        related_id: Guard::against_empty_related_id(body.related_id)?,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.created, res.reminder)))
        .map_err(NudgeError::from)
}

/// Starts reminding `user_id` about the given entity until the
/// `Reminder` is resolved or escalated.
///
/// This is a side effect of some other action of the user (e.g. submitting a
/// delivery) and must never make that action fail, so store errors are only
/// logged.
#[derive(Debug)]
pub struct StartTrackingUseCase {
    pub user_id: ID,
    pub related_type: RelatedType,
    pub related_id: String,
}

#[derive(Debug)]
pub struct UseCaseRes {
    /// `true` if this call created the `Reminder`
    pub created: bool,
    /// The active `Reminder` for the entity, if it could be stored or found
    pub reminder: Option<Reminder>,
}

#[derive(Debug)]
pub enum UseCaseError {}

impl From<UseCaseError> for NudgeError {
    fn from(e: UseCaseError) -> Self {
        match e {}
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for StartTrackingUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "StartTracking";

    async fn execute(&mut self, ctx: &NudgeContext) -> Result<Self::Response, Self::Error> {
        let not_tracked = UseCaseRes {
            created: false,
            reminder: None,
        };

        match ctx
            .repos
            .reminders
            .find_active_by(self.related_type, &self.related_id)
            .await
        {
            Ok(Some(existing)) => {
                return Ok(UseCaseRes {
                    created: false,
                    reminder: Some(existing),
                })
            }
            Ok(None) => (),
            Err(e) => {
                error!(
                    "Unable to look up reminder for {} {}: {:?}",
                    self.related_type, self.related_id, e
                );
                return Ok(not_tracked);
            }
        }

        let now = ctx.sys.get_timestamp_millis();
        let reminder = Reminder::new(
            self.user_id.clone(),
            self.related_type,
            self.related_id.clone(),
            now,
        );

        match ctx.repos.reminders.insert(&reminder).await {
            Ok(_) => {
                info!(
                    reminder_id = %reminder.id,
                    "Tracking {} {} for user {}",
                    self.related_type,
                    self.related_id,
                    self.user_id
                );
                Ok(UseCaseRes {
                    created: true,
                    reminder: Some(reminder),
                })
            }
            Err(e) => {
                error!(
                    "Unable to store reminder for {} {}: {:?}",
                    self.related_type, self.related_id, e
                );
                Ok(not_tracked)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_utils::{setup, FaultyReminderRepo, DAY, T0};
    use nudge_domain::ReminderStatus;
    use std::sync::Arc;

    fn usecase(user_id: &ID, related_id: &str) -> StartTrackingUseCase {
        StartTrackingUseCase {
            user_id: user_id.clone(),
            related_type: RelatedType::Project,
            related_id: related_id.into(),
        }
    }

    #[actix_web::test]
    async fn creates_active_reminder_due_in_one_day() {
        let t = setup().await;

        let res = execute(usecase(&t.client.id, "p1"), &t.ctx).await.unwrap();
        assert!(res.created);

        let stored = t
            .ctx
            .repos
            .reminders
            .find_by_related(RelatedType::Project, "p1")
            .await
            .unwrap();
        assert_eq!(stored.len(), 1);
        let reminder = &stored[0];
        assert_eq!(reminder.user_id, t.client.id);
        assert_eq!(reminder.status, ReminderStatus::Active);
        assert_eq!(reminder.reminder_count, 0);
        assert_eq!(reminder.last_sent_at, None);
        assert_eq!(reminder.next_send_at, Some(T0 + DAY));
        assert_eq!(res.reminder.as_ref(), Some(reminder));
    }

    #[actix_web::test]
    async fn tracking_twice_keeps_one_reminder() {
        let t = setup().await;

        let first = execute(usecase(&t.client.id, "p1"), &t.ctx).await.unwrap();
        t.sys.set(T0 + 1000);
        let second = execute(usecase(&t.client.id, "p1"), &t.ctx).await.unwrap();

        assert!(first.created);
        assert!(!second.created);
        assert_eq!(
            second.reminder.map(|r| r.id),
            first.reminder.map(|r| r.id)
        );
        let stored = t
            .ctx
            .repos
            .reminders
            .find_by_related(RelatedType::Project, "p1")
            .await
            .unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].next_send_at, Some(T0 + DAY));
    }

    #[actix_web::test]
    async fn tracks_again_after_resolution() {
        let t = setup().await;
        let first = execute(usecase(&t.client.id, "p1"), &t.ctx)
            .await
            .unwrap()
            .reminder
            .unwrap();
        let mut resolved = first.clone();
        resolved.resolve(T0 + 10).unwrap();
        t.ctx
            .repos
            .reminders
            .update_by_id(&resolved, 0)
            .await
            .unwrap();

        let res = execute(usecase(&t.client.id, "p1"), &t.ctx).await.unwrap();
        assert!(res.created);
        assert_ne!(res.reminder.unwrap().id, first.id);
    }

    #[actix_web::test]
    async fn store_failures_are_swallowed() {
        let mut t = setup().await;
        let mut repo = FaultyReminderRepo::new();
        repo.fail_all = true;
        t.ctx.repos.reminders = Arc::new(repo);

        let res = execute(usecase(&t.client.id, "p1"), &t.ctx).await;
        assert!(res.is_ok());
        let res = res.unwrap();
        assert!(!res.created);
        assert!(res.reminder.is_none());
    }
}
