//! Drives a [`ProfilePage`] from a host event loop.
//!
//! Hosts hand every event to [`PageHandle::send`]. The page is borrowed only
//! while `update` runs; the command it returns is spawned as a detached task
//! and its result comes back through `send`. Events that arrive while a
//! request is in flight are applied right away, and `render` always sees the
//! current state.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use crate::callback::Callback;
use crate::message::PageMessage;
use crate::page::{PageView, ProfilePage};

/// A boxed single-threaded task.
pub type LocalTask = Pin<Box<dyn Future<Output = ()>>>;

/// Runs detached tasks on the host's executor.
pub trait Spawner {
    fn spawn(&self, task: LocalTask);
}

/// Shared handle to a running page. Clones drive the same page.
#[derive(Clone)]
pub struct PageHandle {
    inner: Rc<Inner>,
}

struct Inner {
    page: RefCell<ProfilePage>,
    queue: RefCell<VecDeque<PageMessage>>,
    spawner: Rc<dyn Spawner>,
    on_change: Callback<(), ()>,
}

impl PageHandle {
    pub fn new(page: ProfilePage, spawner: Rc<dyn Spawner>) -> Self {
        Self::with_on_change(page, spawner, Callback::none())
    }

    /// Like [`PageHandle::new`], calling `on_change` after every state update.
    pub fn with_on_change(
        page: ProfilePage,
        spawner: Rc<dyn Spawner>,
        on_change: Callback<(), ()>,
    ) -> Self {
        Self {
            inner: Rc::new(Inner {
                page: RefCell::new(page),
                queue: RefCell::new(VecDeque::new()),
                spawner,
                on_change,
            }),
        }
    }

    /// Queue a message and process everything queued.
    pub fn send(&self, message: PageMessage) {
        self.inner.queue.borrow_mut().push_back(message);
        self.drain();
    }

    /// Current view. `None` only when called from inside an update, e.g. by
    /// a navigator or notifier reacting to it.
    pub fn render(&self) -> Option<PageView> {
        self.inner.page.try_borrow().ok().map(|page| page.render())
    }

    /// Read the page outside of an update.
    pub fn with_page<R>(&self, f: impl FnOnce(&ProfilePage) -> R) -> Option<R> {
        self.inner.page.try_borrow().ok().map(|page| f(&page))
    }

    /// Messages waiting for the page.
    pub fn queued(&self) -> usize {
        self.inner.queue.borrow().len()
    }

    fn drain(&self) {
        loop {
            // An outer frame is mid-update and will pick the queue up
            let Ok(mut page) = self.inner.page.try_borrow_mut() else {
                return;
            };
            let Some(message) = self.inner.queue.borrow_mut().pop_front() else {
                return;
            };
            log::trace!("Updating page with {:?}", message);
            let command = page.update(message);
            drop(page);

            self.inner.on_change.call(());

            if !command.is_none() {
                let handle = self.clone();
                self.inner.spawner.spawn(Box::pin(async move {
                    if let Some(message) = command.perform().await {
                        handle.send(message);
                    }
                }));
            }
        }
    }
}
