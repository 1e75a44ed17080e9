use crate::error::NudgeError;
use crate::shared::{
    auth::protect_cron_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use nudge_api_structs::run_sweep::APIResponse;
use nudge_domain::{Reminder, ReminderError, ReminderMessage, ReminderStep, ID};
use nudge_infra::NudgeContext;
use tracing::{error, info, warn};

pub async fn run_sweep_controller(
    http_req: HttpRequest,
    ctx: web::Data<NudgeContext>,
) -> Result<HttpResponse, NudgeError> {
    protect_cron_route(&http_req, &ctx)?;

    execute(RunSweepUseCase {}, &ctx)
        .await
        .map(|summary| {
            HttpResponse::Ok().json(APIResponse {
                processed: summary.processed,
                escalated: summary.escalated,
                skipped: summary.skipped,
                message: summary.message(),
            })
        })
        .map_err(NudgeError::from)
}

/// Acts on every due `Reminder`: sends the next reminder to the client and
/// reschedules it, or escalates it to the admins on the third strike.
///
/// Each `Reminder` is handled on its own. If anything fails for one of them it
/// is left untouched, so the next sweep picks it up again.
#[derive(Debug)]
pub struct RunSweepUseCase {}

#[derive(Debug, Default, PartialEq)]
pub struct SweepSummary {
    pub processed: usize,
    pub escalated: usize,
    pub skipped: usize,
}

impl SweepSummary {
    pub fn message(&self) -> String {
        if self.processed == 0 && self.skipped == 0 {
            return "No reminders were due".into();
        }
        format!(
            "Processed {} reminders ({} escalated, {} skipped)",
            self.processed, self.escalated, self.skipped
        )
    }
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
    SweepInProgress,
}

impl From<UseCaseError> for NudgeError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
            UseCaseError::SweepInProgress => {
                Self::Conflict("A reminder sweep is already running".into())
            }
        }
    }
}

#[derive(Debug)]
enum ReminderOutcome {
    Reminded,
    Escalated,
    /// Someone else changed the `Reminder` after we read it
    LostRace,
}

#[derive(Debug)]
enum ProcessingError {
    State(ReminderError),
    Store(anyhow::Error),
    Notify(anyhow::Error),
}

async fn find_entity_title(reminder: &Reminder, ctx: &NudgeContext) -> Option<String> {
    match ctx
        .repos
        .entity_titles
        .for_type(reminder.related_type)
        .find_title(&reminder.related_id)
        .await
    {
        Ok(Some(title)) => Some(title),
        Ok(None) => {
            warn!(
                "No title found for {} {}",
                reminder.related_type, reminder.related_id
            );
            None
        }
        Err(e) => {
            warn!(
                "Unable to look up title of {} {}: {:?}",
                reminder.related_type, reminder.related_id, e
            );
            None
        }
    }
}

async fn find_client_name(user_id: &ID, ctx: &NudgeContext) -> String {
    const FALLBACK_CLIENT_NAME: &str = "cliente";

    match ctx.repos.users.find(user_id).await {
        Ok(Some(user)) => user.name,
        Ok(None) => {
            warn!("Client {} of escalated reminder was not found", user_id);
            FALLBACK_CLIENT_NAME.into()
        }
        Err(e) => {
            warn!("Unable to look up client {}: {:?}", user_id, e);
            FALLBACK_CLIENT_NAME.into()
        }
    }
}

async fn notify(
    user_id: &ID,
    message: ReminderMessage,
    now: i64,
    ctx: &NudgeContext,
) -> Result<(), ProcessingError> {
    let notification = message.into_notification(user_id.clone(), now);
    ctx.repos
        .notifications
        .insert(&notification)
        .await
        .map_err(ProcessingError::Notify)
}

/// Notifications go out before the new state is stored. A crash in between
/// means a duplicate notification on the next sweep, never a lost one.
async fn process_reminder(
    mut reminder: Reminder,
    now: i64,
    ctx: &NudgeContext,
) -> Result<ReminderOutcome, ProcessingError> {
    let expected_count = reminder.reminder_count;
    let step = reminder.next_step().map_err(ProcessingError::State)?;
    let entity_title = find_entity_title(&reminder, ctx).await;

    match step {
        ReminderStep::Remind { .. } => {
            let message =
                ReminderMessage::for_client(&step, reminder.related_type, entity_title.as_deref());
            notify(&reminder.user_id, message, now, ctx).await?;
        }
        ReminderStep::Escalate { count } => {
            let admins = ctx
                .repos
                .users
                .find_active_admins()
                .await
                .map_err(ProcessingError::Store)?;
            if admins.is_empty() {
                warn!(
                    reminder_id = %reminder.id,
                    "There are no active admins to escalate the reminder to"
                );
            }
            let client_name = find_client_name(&reminder.user_id, ctx).await;
            for admin in &admins {
                let message = ReminderMessage::for_admins(
                    count,
                    reminder.related_type,
                    entity_title.as_deref(),
                    &client_name,
                );
                notify(&admin.id, message, now, ctx).await?;
            }
            let message =
                ReminderMessage::for_client(&step, reminder.related_type, entity_title.as_deref());
            notify(&reminder.user_id, message, now, ctx).await?;
        }
    }

    reminder.advance(now).map_err(ProcessingError::State)?;
    let res = ctx
        .repos
        .reminders
        .update_by_id(&reminder, expected_count)
        .await
        .map_err(ProcessingError::Store)?;
    if !res.matched {
        return Ok(ReminderOutcome::LostRace);
    }

    if step.is_escalation() {
        info!(
            reminder_id = %reminder.id,
            "Escalated {} {} after {} reminders",
            reminder.related_type,
            reminder.related_id,
            reminder.reminder_count
        );
        Ok(ReminderOutcome::Escalated)
    } else {
        Ok(ReminderOutcome::Reminded)
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for RunSweepUseCase {
    type Response = SweepSummary;

    type Error = UseCaseError;

    const NAME: &'static str = "RunSweep";

    async fn execute(&mut self, ctx: &NudgeContext) -> Result<Self::Response, Self::Error> {
        let _sweep_guard = ctx
            .sweep_lock
            .try_lock()
            .map_err(|_| UseCaseError::SweepInProgress)?;

        let now = ctx.sys.get_timestamp_millis();
        let due_reminders = ctx
            .repos
            .reminders
            .list_due_active(now)
            .await
            .map_err(|e| {
                error!("Unable to list due reminders: {:?}", e);
                UseCaseError::StorageError
            })?;

        let mut summary = SweepSummary::default();
        for reminder in due_reminders {
            let reminder_id = reminder.id.clone();
            match process_reminder(reminder, now, ctx).await {
                Ok(ReminderOutcome::Reminded) => summary.processed += 1,
                Ok(ReminderOutcome::Escalated) => {
                    summary.processed += 1;
                    summary.escalated += 1;
                }
                Ok(ReminderOutcome::LostRace) => {
                    warn!(
                        reminder_id = %reminder_id,
                        "Reminder was changed by someone else during the sweep, skipping it"
                    );
                    summary.skipped += 1;
                }
                Err(e) => {
                    error!(
                        reminder_id = %reminder_id,
                        "Unable to process reminder: {:?}", e
                    );
                    summary.skipped += 1;
                }
            }
        }

        info!(
            processed = summary.processed,
            escalated = summary.escalated,
            skipped = summary.skipped,
            "Reminder sweep done"
        );
        Ok(summary)
    }
}
