use crate::error::NudgeError;
use crate::shared::{
    auth::protect_cron_route,
    guard::Guard,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use nudge_api_structs::resolve_reminder::*;
use nudge_domain::{RelatedType, Reminder};
use nudge_infra::NudgeContext;
use tracing::{error, info, warn};

pub async fn resolve_reminder_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    ctx: web::Data<NudgeContext>,
) -> Result<HttpResponse, NudgeError> {
    protect_cron_route(&http_req, &ctx)?;

    let path = path.into_inner();
    let usecase = ResolveReminderUseCase {
        related_type: Guard::against_malformed_related_type(&path.related_type)?,
        related_id: Guard::against_empty_related_id(path.related_id)?,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(NudgeError::from)
}

/// The client performed the awaited action, so the active `Reminder` of the
/// entity (if any) stops. Escalated `Reminder`s are left as they are.
///
/// Like `StartTrackingUseCase` this runs as a side effect of a user action,
/// store errors are logged and never returned.
#[derive(Debug)]
pub struct ResolveReminderUseCase {
    pub related_type: RelatedType,
    pub related_id: String,
}

impl ResolveReminderUseCase {
    /// A sweep can update the `Reminder` between our read and our write
    const MAX_ATTEMPTS: usize = 3;
}

#[derive(Debug)]
pub enum UseCaseError {}

impl From<UseCaseError> for NudgeError {
    fn from(e: UseCaseError) -> Self {
        match e {}
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for ResolveReminderUseCase {
    /// The resolved `Reminder`, if there was an active one
    type Response = Option<Reminder>;

    type Error = UseCaseError;

    const NAME: &'static str = "ResolveReminder";

    async fn execute(&mut self, ctx: &NudgeContext) -> Result<Self::Response, Self::Error> {
        for _ in 0..Self::MAX_ATTEMPTS {
            let mut reminder = match ctx
                .repos
                .reminders
                .find_active_by(self.related_type, &self.related_id)
                .await
            {
                Ok(Some(reminder)) => reminder,
                Ok(None) => return Ok(None),
                Err(e) => {
                    error!(
                        "Unable to look up reminder for {} {}: {:?}",
                        self.related_type, self.related_id, e
                    );
                    return Ok(None);
                }
            };

            let expected_count = reminder.reminder_count;
            if let Err(e) = reminder.resolve(ctx.sys.get_timestamp_millis()) {
                warn!("Unable to resolve reminder {}: {:?}", reminder.id, e);
                return Ok(None);
            }

            match ctx
                .repos
                .reminders
                .update_by_id(&reminder, expected_count)
                .await
            {
                Ok(res) if res.matched => {
                    info!(
                        reminder_id = %reminder.id,
                        "Resolved reminder for {} {}",
                        self.related_type,
                        self.related_id
                    );
                    return Ok(Some(reminder));
                }
                Ok(_) => {
                    warn!(
                        reminder_id = %reminder.id,
                        "Reminder changed while resolving it, retrying"
                    );
                }
                Err(e) => {
                    error!("Unable to resolve reminder {}: {:?}", reminder.id, e);
                    return Ok(None);
                }
            }
        }

        error!(
            "Gave up resolving reminder for {} {} after {} attempts",
            self.related_type,
            self.related_id,
            Self::MAX_ATTEMPTS
        );
        Ok(None)
    }
}
