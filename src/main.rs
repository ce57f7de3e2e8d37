mod telemetry;

use cart_reminder_api::Application;
use cart_reminder_infra::setup_context;
use telemetry::{get_subscriber, init_subscriber};
use tracing::info;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let subscriber = get_subscriber("cart_reminder".into(), "info".into());
    init_subscriber(subscriber);

    let context = setup_context();
    let app = Application::new(context);
    let jobs = app.start_job_schedulers();

    tokio::signal::ctrl_c().await?;
    info!("Shutting down cart reminder");
    for job in jobs {
        job.abort();
    }
    Ok(())
}
