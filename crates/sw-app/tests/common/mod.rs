#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use sw_app::{FlowController, FlowDeps, MarkSetupComplete};
use sw_core::ports::{FlowEventPort, SetupStatusPort};
use sw_core::setup::SetupStatus;
use sw_core::{
    ActivityOutcome, Page, PageAction, PageBehavior, PageList, PageSnapshot, Position,
    RequestCode, SettingsAccumulator, SettingsWriter,
};
use sw_infra::InMemorySettingsStore;

static TRACE_INIT: Once = Once::new();

/// Routes engine logs through the test writer; `RUST_LOG` picks the level.
pub fn init_tracing() {
    TRACE_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Loaded(String),
    TreeChanged,
    Finished,
}

#[derive(Default)]
pub struct RecordingEvents {
    log: Mutex<Vec<Event>>,
}

impl RecordingEvents {
    pub fn events(&self) -> Vec<Event> {
        self.log.lock().unwrap().clone()
    }

    pub fn loaded(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Loaded(key) => Some(key),
                _ => None,
            })
            .collect()
    }

    pub fn finish_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| **e == Event::Finished)
            .count()
    }
}

#[async_trait]
impl FlowEventPort for RecordingEvents {
    async fn on_page_loaded(&self, page: PageSnapshot) {
        self.log
            .lock()
            .unwrap()
            .push(Event::Loaded(page.key.into_inner()));
    }

    async fn on_page_tree_changed(&self) {
        self.log.lock().unwrap().push(Event::TreeChanged);
    }

    async fn on_finish(&self) {
        self.log.lock().unwrap().push(Event::Finished);
    }
}

#[derive(Default)]
pub struct MemoryStatus {
    status: Mutex<SetupStatus>,
}

impl MemoryStatus {
    pub fn has_completed(&self) -> bool {
        self.status.lock().unwrap().has_completed
    }
}

#[async_trait]
impl SetupStatusPort for MemoryStatus {
    async fn get_status(&self) -> anyhow::Result<SetupStatus> {
        Ok(self.status.lock().unwrap().clone())
    }

    async fn set_status(&self, status: &SetupStatus) -> anyhow::Result<()> {
        *self.status.lock().unwrap() = status.clone();
        Ok(())
    }
}

/// Scriptable page: optional skip flag, optional owned request codes and a
/// value it writes under `writes` when left forward.
pub struct ScriptedPage {
    skip: Arc<AtomicBool>,
    codes: Vec<RequestCode>,
    writes: Option<(String, i64)>,
    leaves: Arc<Mutex<Vec<bool>>>,
    loads: Arc<AtomicUsize>,
}

impl ScriptedPage {
    pub fn plain() -> Self {
        Self {
            skip: Arc::new(AtomicBool::new(false)),
            codes: Vec::new(),
            writes: None,
            leaves: Arc::new(Mutex::new(Vec::new())),
            loads: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn skipping() -> Self {
        let page = Self::plain();
        page.skip.store(true, Ordering::SeqCst);
        page
    }

    pub fn with_skip_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.skip = flag;
        self
    }

    pub fn claiming(mut self, code: RequestCode) -> Self {
        self.codes.push(code);
        self
    }

    pub fn writing(mut self, key: &str, value: i64) -> Self {
        self.writes = Some((key.to_string(), value));
        self
    }

    pub fn leave_log(&self) -> Arc<Mutex<Vec<bool>>> {
        self.leaves.clone()
    }

    pub fn load_counter(&self) -> Arc<AtomicUsize> {
        self.loads.clone()
    }
}

impl PageBehavior for ScriptedPage {
    fn on_load(&mut self, _settings: &SettingsAccumulator) {
        self.loads.fetch_add(1, Ordering::SeqCst);
    }

    fn on_leave(&mut self, forward: bool, settings: &mut SettingsWriter<'_>) {
        self.leaves.lock().unwrap().push(forward);
        if let (true, Some((key, value))) = (forward, &self.writes) {
            settings.put_int(key, *value);
        }
    }

    fn should_skip(&self) -> bool {
        self.skip.load(Ordering::SeqCst)
    }

    fn request_codes(&self) -> &[RequestCode] {
        &self.codes
    }

    fn on_activity_result(
        &mut self,
        _code: RequestCode,
        outcome: ActivityOutcome,
        settings: &mut SettingsWriter<'_>,
    ) -> PageAction {
        if outcome.is_ok() {
            settings.put_bool("result_ok", true);
            PageAction::Advance
        } else {
            PageAction::Stay
        }
    }
}

pub fn page(key: &str, position: Position) -> Page {
    Page::new(key, position, ScriptedPage::plain())
}

pub struct Harness {
    pub controller: FlowController,
    pub store: Arc<InMemorySettingsStore>,
    pub events: Arc<RecordingEvents>,
    pub status: Arc<MemoryStatus>,
}

pub fn harness(pages: Vec<Page>) -> Harness {
    harness_with(PageList::build(pages).unwrap(), SettingsAccumulator::new())
}

pub fn harness_with(pages: PageList, seed: SettingsAccumulator) -> Harness {
    init_tracing();
    let store = Arc::new(InMemorySettingsStore::new());
    let events = Arc::new(RecordingEvents::default());
    let status = Arc::new(MemoryStatus::default());
    let controller = FlowController::with_initial_settings(
        pages,
        seed,
        FlowDeps {
            settings_store: store.clone(),
            events: events.clone(),
            mark_setup_complete: Arc::new(MarkSetupComplete::new(status.clone(), store.clone())),
        },
    );
    Harness {
        controller,
        store,
        events,
        status,
    }
}

pub fn key_of(snapshot: &sw_app::FlowSnapshot) -> Option<&str> {
    snapshot.current.as_ref().map(|page| page.key.as_str())
}
