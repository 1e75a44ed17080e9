use actix_web::{web, HttpResponse};
use nudge_api_structs::get_service_health::*;
use nudge_infra::NudgeContext;

async fn status(ctx: web::Data<NudgeContext>) -> HttpResponse {
    let sweep_running = ctx.sweep_lock.try_lock().is_err();

    HttpResponse::Ok().json(APIResponse {
        message: "Yo! We are up!\r\n".into(),
        sweep_running,
    })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(status));
}
