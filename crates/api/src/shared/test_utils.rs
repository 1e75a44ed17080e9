use nudge_domain::{RelatedType, Reminder, User, UserRole, ID};
use nudge_infra::{
    IReminderRepo, ISys, InMemoryEntityTitleRepo, InMemoryReminderRepo, NudgeContext,
    UpdateResult,
};
use std::sync::{
    atomic::{AtomicI64, Ordering},
    Arc, Mutex,
};

pub const DAY: i64 = Reminder::INTERVAL_MILLIS;
pub const T0: i64 = 1613862000000;

/// Clock the tests can move around
pub struct StaticSys {
    now: AtomicI64,
}

impl StaticSys {
    pub fn new(now: i64) -> Self {
        Self {
            now: AtomicI64::new(now),
        }
    }

    pub fn set(&self, now: i64) {
        self.now.store(now, Ordering::SeqCst);
    }
}

impl ISys for StaticSys {
    fn get_timestamp_millis(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

pub struct TestContext {
    pub ctx: NudgeContext,
    pub sys: Arc<StaticSys>,
    pub client: User,
    pub admins: Vec<User>,
}

/// In-memory context at `T0` with one client, two active admins, one inactive
/// admin and a title for project `p1`
pub async fn setup() -> TestContext {
    let mut ctx = NudgeContext::create_inmemory();
    ctx.config.cron_secret = None;
    let sys = Arc::new(StaticSys::new(T0));
    ctx.sys = sys.clone();

    let client = User::new("Acme".into(), UserRole::Client);
    ctx.repos.users.insert(&client).await.unwrap();
    let admins = vec![
        User::new("Ana".into(), UserRole::Admin),
        User::new("Bruno".into(), UserRole::Admin),
    ];
    for admin in &admins {
        ctx.repos.users.insert(admin).await.unwrap();
    }
    let mut former_admin = User::new("Carla".into(), UserRole::Admin);
    former_admin.active = false;
    ctx.repos.users.insert(&former_admin).await.unwrap();

    let projects = InMemoryEntityTitleRepo::new();
    projects.insert("p1", "Rebranding");
    ctx.repos.entity_titles.projects = Arc::new(projects);

    TestContext {
        ctx,
        sys,
        client,
        admins,
    }
}

/// Reminder repo that can be told to fail or to hand out stale data
pub struct FaultyReminderRepo {
    pub inner: InMemoryReminderRepo,
    /// Every call fails
    pub fail_all: bool,
    /// Listing due reminders fails
    pub fail_list: bool,
    /// Updates of reminders watching this related id fail
    pub fail_updates_for: Mutex<Option<String>>,
    /// Returned by `list_due_active` instead of the stored reminders
    pub stale_due: Mutex<Option<Vec<Reminder>>>,
}

impl FaultyReminderRepo {
    pub fn new() -> Self {
        Self {
            inner: InMemoryReminderRepo::new(),
            fail_all: false,
            fail_list: false,
            fail_updates_for: Mutex::new(None),
            stale_due: Mutex::new(None),
        }
    }

    fn check(&self) -> anyhow::Result<()> {
        if self.fail_all {
            anyhow::bail!("reminder store is down");
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl IReminderRepo for FaultyReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        self.check()?;
        self.inner.insert(reminder).await
    }

    async fn find_active_by(
        &self,
        related_type: RelatedType,
        related_id: &str,
    ) -> anyhow::Result<Option<Reminder>> {
        self.check()?;
        self.inner.find_active_by(related_type, related_id).await
    }

    async fn find_by_related(
        &self,
        related_type: RelatedType,
        related_id: &str,
    ) -> anyhow::Result<Vec<Reminder>> {
        self.check()?;
        self.inner.find_by_related(related_type, related_id).await
    }

    async fn list_due_active(&self, now: i64) -> anyhow::Result<Vec<Reminder>> {
        self.check()?;
        if self.fail_list {
            anyhow::bail!("unable to list reminders");
        }
        let stale = self.stale_due.lock().unwrap().take();
        match stale {
            Some(reminders) => Ok(reminders),
            None => self.inner.list_due_active(now).await,
        }
    }

    async fn update_by_id(
        &self,
        reminder: &Reminder,
        expected_count: i64,
    ) -> anyhow::Result<UpdateResult> {
        self.check()?;
        let failing = self.fail_updates_for.lock().unwrap().clone();
        if failing.as_deref() == Some(reminder.related_id.as_str()) {
            anyhow::bail!("unable to update reminder {}", reminder.id);
        }
        self.inner.update_by_id(reminder, expected_count).await
    }
}

pub fn new_reminder(user_id: &ID, related_id: &str, now: i64) -> Reminder {
    Reminder::new(
        user_id.clone(),
        RelatedType::Project,
        related_id.into(),
        now,
    )
}
