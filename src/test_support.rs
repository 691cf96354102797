//! In-memory collaborators for unit tests.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::future::Future;
use std::rc::Rc;
use std::task::{Context, Waker};

use async_trait::async_trait;
use profile_api::{
    AccessToken, ApiError, ProfileApi, ProfilePayload, ProfileUpdate, UpdateOutcome, UploadFile,
};

use crate::form::{ImageFile, ImageKind};
use crate::page::{Navigator, Notice, Notifier};
use crate::picker::FileChooser;
use crate::runtime::{LocalTask, Spawner};

pub const TOKEN: &str = "test-token";

pub fn token() -> AccessToken {
    AccessToken::new(TOKEN)
}

/// A PNG-typed file of exactly `size` bytes.
pub fn png_file(name: &str, size: usize) -> ImageFile {
    let mut bytes = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    bytes.resize(size.max(bytes.len()), 0);
    bytes.truncate(size);
    ImageFile::new(name, "image/png", bytes)
}

pub fn profile_payload(name: &str) -> ProfilePayload {
    ProfilePayload {
        name: Some(name.to_string()),
        ..Default::default()
    }
}

/// Scripted backend. Unscripted calls succeed: no profile, an upload URL
/// derived from the file name, and an accepted update.
#[derive(Default)]
pub struct FakeProfileApi {
    fetch_responses: RefCell<VecDeque<Result<Option<ProfilePayload>, ApiError>>>,
    upload_responses: RefCell<VecDeque<Result<Option<String>, ApiError>>>,
    update_responses: RefCell<VecDeque<Result<UpdateOutcome, ApiError>>>,
    hold_fetches: Cell<bool>,
    fetches: RefCell<Vec<AccessToken>>,
    uploads: RefCell<Vec<UploadFile>>,
    updates: RefCell<Vec<ProfileUpdate>>,
}

impl FakeProfileApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond_fetch(&self, response: Result<Option<ProfilePayload>, ApiError>) {
        self.fetch_responses.borrow_mut().push_back(response);
    }

    pub fn respond_upload(&self, response: Result<Option<String>, ApiError>) {
        self.upload_responses.borrow_mut().push_back(response);
    }

    pub fn respond_update(&self, response: Result<UpdateOutcome, ApiError>) {
        self.update_responses.borrow_mut().push_back(response);
    }

    /// Make every later fetch wait forever.
    pub fn hold_fetches(&self) {
        self.hold_fetches.set(true);
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.borrow().len()
    }

    pub fn fetch_tokens(&self) -> Vec<AccessToken> {
        self.fetches.borrow().clone()
    }

    pub fn uploads(&self) -> Vec<UploadFile> {
        self.uploads.borrow().clone()
    }

    pub fn updates(&self) -> Vec<ProfileUpdate> {
        self.updates.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.fetch_count() + self.uploads.borrow().len() + self.updates.borrow().len()
    }
}

#[async_trait(?Send)]
impl ProfileApi for FakeProfileApi {
    async fn fetch_profile(&self, token: &AccessToken) -> Result<Option<ProfilePayload>, ApiError> {
        self.fetches.borrow_mut().push(token.clone());
        if self.hold_fetches.get() {
            std::future::pending::<()>().await;
        }
        self.fetch_responses
            .borrow_mut()
            .pop_front()
            .unwrap_or(Ok(None))
    }

    async fn upload_image(
        &self,
        _token: &AccessToken,
        file: UploadFile,
    ) -> Result<Option<String>, ApiError> {
        let default_url = format!("https://cdn.example.com/{}", file.file_name);
        self.uploads.borrow_mut().push(file);
        self.upload_responses
            .borrow_mut()
            .pop_front()
            .unwrap_or(Ok(Some(default_url)))
    }

    async fn update_profile(
        &self,
        _token: &AccessToken,
        update: &ProfileUpdate,
    ) -> Result<UpdateOutcome, ApiError> {
        self.updates.borrow_mut().push(update.clone());
        self.update_responses.borrow_mut().pop_front().unwrap_or(Ok(UpdateOutcome {
            status: 200,
            success: Some(true),
        }))
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    visited: RefCell<Vec<String>>,
    back: Cell<usize>,
}

impl RecordingNavigator {
    pub fn visited(&self) -> Vec<String> {
        self.visited.borrow().clone()
    }

    pub fn back_count(&self) -> usize {
        self.back.get()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate_to(&self, path: &str) {
        self.visited.borrow_mut().push(path.to_string());
    }

    fn navigate_back(&self) {
        self.back.set(self.back.get() + 1);
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    notices: RefCell<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.borrow_mut().push(notice);
    }
}

/// File chooser that returns queued answers. Clones share the queue.
#[derive(Clone, Default)]
pub struct ScriptedChooser {
    answers: Rc<RefCell<VecDeque<Option<ImageFile>>>>,
    requests: Rc<RefCell<Vec<ImageKind>>>,
}

impl ScriptedChooser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, answer: Option<ImageFile>) {
        self.answers.borrow_mut().push_back(answer);
    }

    pub fn requests(&self) -> Vec<ImageKind> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl FileChooser for ScriptedChooser {
    async fn choose(&self, kind: ImageKind) -> Option<ImageFile> {
        self.requests.borrow_mut().push(kind);
        self.answers.borrow_mut().pop_front().flatten()
    }
}

/// Spawner that keeps tasks until the test runs them.
#[derive(Default)]
pub struct QueuedSpawner {
    tasks: RefCell<VecDeque<LocalTask>>,
}

impl QueuedSpawner {
    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }

    /// Poll every queued task once; unfinished ones stay queued.
    pub fn poll_once(&self) {
        let mut cx = Context::from_waker(Waker::noop());
        let tasks: Vec<LocalTask> = self.tasks.borrow_mut().drain(..).collect();
        for mut task in tasks {
            if task.as_mut().poll(&mut cx).is_pending() {
                self.tasks.borrow_mut().push_back(task);
            }
        }
    }

    /// Run tasks to completion, including the ones they spawn.
    pub fn run_until_idle(&self) {
        loop {
            let Some(task) = self.tasks.borrow_mut().pop_front() else {
                return;
            };
            pollster::block_on(task);
        }
    }
}

impl Spawner for QueuedSpawner {
    fn spawn(&self, task: LocalTask) {
        self.tasks.borrow_mut().push_back(task);
    }
}
