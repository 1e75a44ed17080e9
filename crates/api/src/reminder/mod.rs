mod get_reminders;
mod resolve_reminder;
pub mod run_sweep;
mod start_tracking;

use actix_web::web;
use get_reminders::get_reminders_controller;
use resolve_reminder::resolve_reminder_controller;
use run_sweep::run_sweep_controller;
use start_tracking::start_tracking_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/reminders", web::post().to(start_tracking_controller));

    // Cron schedulers trigger the sweep with either method
    cfg.route("/reminders/sweep", web::post().to(run_sweep_controller));
    cfg.route("/reminders/sweep", web::get().to(run_sweep_controller));

    cfg.route(
        "/reminders/{relatedType}/{relatedId}",
        web::get().to(get_reminders_controller),
    );
    cfg.route(
        "/reminders/{relatedType}/{relatedId}/resolve",
        web::put().to(resolve_reminder_controller),
    );
}
