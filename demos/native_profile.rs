//! Runs the profile page against a live backend from the terminal.
//!
//! ```text
//! PROFILE_EDITOR_TOKEN=... cargo run --example native_profile [new-nickname]
//! ```
//!
//! Loads the profile, prints the view as JSON and, when a nickname is given,
//! saves it. Notices appear as native message boxes.

use std::error::Error;
use std::rc::Rc;

use profile_editor::callback::Callback;
use profile_editor::form::FormField;
use profile_editor::logging;
use profile_editor::native::{DialogNotifier, HistoryNavigator};
use profile_editor::{
    AccessToken, AuthSession, EditorConfig, HttpProfileApi, LocalTask, PageHandle, PageMessage,
    PageView, ProfileFormController, ProfilePage, RfdFileChooser, Spawner,
};
use tokio::sync::Notify;

const TOKEN_VAR: &str = "PROFILE_EDITOR_TOKEN";
const START_ROUTE: &str = "/profile/edit";

/// Spawns page tasks on the surrounding `LocalSet`.
struct LocalSpawner;

impl Spawner for LocalSpawner {
    fn spawn(&self, task: LocalTask) {
        tokio::task::spawn_local(task);
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = EditorConfig::load_or_default();
    logging::init(config.log_level);

    tokio::task::LocalSet::new().run_until(run(config)).await
}

async fn run(config: EditorConfig) -> Result<(), Box<dyn Error>> {
    let session = match std::env::var(TOKEN_VAR) {
        Ok(token) if !token.is_empty() => AuthSession::authenticated(AccessToken::new(token)),
        _ => {
            log::warn!("{} is not set; the page will redirect to login", TOKEN_VAR);
            AuthSession::anonymous()
        }
    };

    let api = HttpProfileApi::new(config.api.clone())?;
    let navigator = Rc::new(HistoryNavigator::new(START_ROUTE));
    let page = ProfilePage::new(
        ProfileFormController::new(session, Rc::new(api)),
        Rc::new(RfdFileChooser),
        navigator.clone(),
        Rc::new(DialogNotifier),
    )
    .with_routes(config.routes);

    let changed = Rc::new(Notify::new());
    let notify = Rc::clone(&changed);
    let handle = PageHandle::with_on_change(
        page,
        Rc::new(LocalSpawner),
        Callback::new(move |()| notify.notify_one()),
    );

    handle.send(PageMessage::Mounted);
    while matches!(handle.render(), Some(PageView::Loading(_))) {
        changed.notified().await;
    }
    print_view(&handle)?;

    if let Some(nickname) = std::env::args().nth(1) {
        handle.send(PageMessage::FieldChanged(FormField::Name, nickname));
        handle.send(PageMessage::Submit);
        while handle
            .with_page(|page| page.controller().is_submitting())
            .unwrap_or(true)
        {
            changed.notified().await;
        }
        print_view(&handle)?;
    }

    println!("route: {}", navigator.current().unwrap_or_default());
    Ok(())
}

fn print_view(handle: &PageHandle) -> Result<(), Box<dyn Error>> {
    if let Some(view) = handle.render() {
        println!("{}", serde_json::to_string_pretty(&view)?);
    }
    Ok(())
}
