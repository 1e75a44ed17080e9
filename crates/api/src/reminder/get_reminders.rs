use crate::error::NudgeError;
use crate::shared::{
    auth::protect_cron_route,
    guard::Guard,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use nudge_api_structs::get_reminders::*;
use nudge_domain::{RelatedType, Reminder};
use nudge_infra::NudgeContext;

pub async fn get_reminders_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    ctx: web::Data<NudgeContext>,
) -> Result<HttpResponse, NudgeError> {
    protect_cron_route(&http_req, &ctx)?;

    let path = path.into_inner();
    let usecase = GetRemindersUseCase {
        related_type: Guard::against_malformed_related_type(&path.related_type)?,
        related_id: Guard::against_empty_related_id(path.related_id)?,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminders| HttpResponse::Ok().json(APIResponse::new(reminders)))
        .map_err(NudgeError::from)
}

/// Every `Reminder` an entity ever had, including the terminal ones
#[derive(Debug)]
pub struct GetRemindersUseCase {
    pub related_type: RelatedType,
    pub related_id: String,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for NudgeError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetRemindersUseCase {
    type Response = Vec<Reminder>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetReminders";

    async fn execute(&mut self, ctx: &NudgeContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .reminders
            .find_by_related(self.related_type, &self.related_id)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
