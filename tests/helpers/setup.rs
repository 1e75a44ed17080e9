use nudge_api::Application;
use nudge_domain::{User, UserRole};
use nudge_infra::{ISys, InMemoryEntityTitleRepo, NudgeContext};
use nudge_sdk::NudgeSDK;
use std::sync::{
    atomic::{AtomicI64, Ordering},
    Arc,
};

pub const DAY: i64 = 1000 * 60 * 60 * 24;
pub const T0: i64 = 1613862000000;

pub struct TestClock {
    now: AtomicI64,
}

impl TestClock {
    pub fn set(&self, now: i64) {
        self.now.store(now, Ordering::SeqCst);
    }
}

impl ISys for TestClock {
    fn get_timestamp_millis(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

pub struct TestApp {
    pub ctx: NudgeContext,
    pub clock: Arc<TestClock>,
    pub address: String,
    pub client: User,
    pub admins: Vec<User>,
}

impl TestApp {
    pub fn sdk(&self, cron_secret: &str) -> NudgeSDK {
        NudgeSDK::new(self.address.clone(), cron_secret)
    }
}

pub async fn spawn_app() -> (TestApp, NudgeSDK) {
    let app = spawn_app_with_secret(None).await;
    let sdk = app.sdk("");
    (app, sdk)
}

// Launch the application as a background task
pub async fn spawn_app_with_secret(cron_secret: Option<&str>) -> TestApp {
    let mut ctx = NudgeContext::create_inmemory();
    ctx.config.port = 0; // Random port
    ctx.config.cron_secret = cron_secret.map(String::from);
    ctx.config.sweep_interval_secs = None;
    let clock = Arc::new(TestClock {
        now: AtomicI64::new(T0),
    });
    ctx.sys = clock.clone();

    let client = User::new("Acme".into(), UserRole::Client);
    ctx.repos.users.insert(&client).await.unwrap();
    let admins = vec![User::new("Ana".into(), UserRole::Admin)];
    for admin in &admins {
        ctx.repos.users.insert(admin).await.unwrap();
    }
    let deliveries = InMemoryEntityTitleRepo::new();
    deliveries.insert("d1", "Logo final");
    ctx.repos.entity_titles.deliveries = Arc::new(deliveries);

    let application = Application::new(ctx.clone())
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}", application.port());
    actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    TestApp {
        ctx,
        clock,
        address,
        client,
        admins,
    }
}
