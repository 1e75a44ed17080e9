mod telemetry;

use nudge_api::Application;
use nudge_infra::{run_migration, setup_context};
use telemetry::{get_subscriber, init_subscriber};
use tracing::error;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    openssl_probe::init_ssl_cert_env_vars();

    let subscriber = get_subscriber("nudge_server".into(), "info".into());
    init_subscriber(subscriber);

    if let Err(e) = run_migration().await {
        error!("Unable to run the database migrations: {:?}", e);
        return Err(std::io::Error::new(
            std::io::ErrorKind::Other,
            "Database migrations failed",
        ));
    }

    let context = setup_context().await;

    let app = Application::new(context).await?;
    app.start().await
}
