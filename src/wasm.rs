//! Browser entry point and window-backed collaborators.

use std::rc::Rc;

use profile_api::{AccessToken, ClientSettings, HttpProfileApi};
use wasm_bindgen::prelude::*;

use crate::auth::AuthSession;
use crate::callback::Callback;
use crate::config::EditorConfig;
use crate::form::{FormField, ImageKind, ProfileFormController};
use crate::logging;
use crate::message::PageMessage;
use crate::page::{Navigator, Notice, Notifier, ProfilePage};
use crate::picker::{RfdFileChooser, TileEvent};
use crate::runtime::{LocalTask, PageHandle, Spawner};

#[wasm_bindgen(start)]
pub fn start() {
    let config = EditorConfig::load_or_default();
    logging::init(config.log_level);
    log::info!("Profile editor loaded");
}

/// Navigation through `window.location` and `window.history`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebNavigator;

impl Navigator for WebNavigator {
    fn navigate_to(&self, path: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(e) = window.location().set_href(path) {
            log::warn!("Navigation to {} failed: {:?}", path, e);
        }
    }

    fn navigate_back(&self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(e) = window.history().and_then(|history| history.back()) {
            log::warn!("History back failed: {:?}", e);
        }
    }
}

/// Notices shown with `window.alert`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebNotifier;

impl Notifier for WebNotifier {
    fn notify(&self, notice: Notice) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(e) = window.alert_with_message(&notice.message) {
            log::warn!("Alert failed: {:?}", e);
        }
    }
}

/// API settings for the page's own origin unless the stored config names a
/// different backend.
fn api_settings(config: &EditorConfig) -> ClientSettings {
    let mut settings = config.api.clone();
    if settings.base_url == ClientSettings::default().base_url {
        if let Some(origin) = web_sys::window().and_then(|w| w.location().origin().ok()) {
            settings.base_url = origin;
        }
    }
    settings
}

fn session_for(access_token: Option<String>) -> AuthSession {
    match access_token.filter(|t| !t.is_empty()) {
        Some(token) => AuthSession::authenticated(AccessToken::new(token)),
        None => AuthSession::anonymous(),
    }
}

fn parse_kind(kind: &str) -> Result<ImageKind, JsValue> {
    match kind {
        "profile" => Ok(ImageKind::Profile),
        "background" => Ok(ImageKind::Background),
        other => Err(JsValue::from_str(&format!("Unknown image kind '{}'", other))),
    }
}

/// Runs page tasks on the browser's microtask queue.
#[derive(Debug, Clone, Copy, Default)]
pub struct WasmSpawner;

impl Spawner for WasmSpawner {
    fn spawn(&self, task: LocalTask) {
        wasm_bindgen_futures::spawn_local(task);
    }
}

fn change_callback(on_change: Option<js_sys::Function>) -> Callback<(), ()> {
    match on_change {
        Some(f) => Callback::new(move |()| {
            if let Err(e) = f.call0(&JsValue::NULL) {
                log::warn!("onChange callback threw: {:?}", e);
            }
        }),
        None => Callback::none(),
    }
}

/// The profile page exposed to JavaScript.
///
/// `on_change` is called with no arguments after every state change; the
/// host calls `render` from it to refresh the screen.
#[wasm_bindgen]
pub struct ProfileEditor {
    handle: PageHandle,
}

#[wasm_bindgen]
impl ProfileEditor {
    #[wasm_bindgen(constructor)]
    pub fn new(
        access_token: Option<String>,
        on_change: Option<js_sys::Function>,
    ) -> Result<ProfileEditor, JsValue> {
        let config = EditorConfig::load_or_default();
        let api = HttpProfileApi::new(api_settings(&config))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let controller = ProfileFormController::new(session_for(access_token), Rc::new(api));
        let page = ProfilePage::new(
            controller,
            Rc::new(RfdFileChooser),
            Rc::new(WebNavigator),
            Rc::new(WebNotifier),
        )
        .with_routes(config.routes);

        Ok(ProfileEditor {
            handle: PageHandle::with_on_change(
                page,
                Rc::new(WasmSpawner),
                change_callback(on_change),
            ),
        })
    }

    pub fn mount(&self) {
        self.handle.send(PageMessage::Mounted);
    }

    #[wasm_bindgen(js_name = setAccessToken)]
    pub fn set_access_token(&self, access_token: Option<String>) {
        self.handle
            .send(PageMessage::SessionChanged(session_for(access_token)));
    }

    #[wasm_bindgen(js_name = setField)]
    pub fn set_field(&self, name: &str, value: String) -> Result<(), JsValue> {
        let field: FormField = name
            .parse()
            .map_err(|e: crate::form::UnknownFieldError| JsValue::from_str(&e.to_string()))?;
        self.handle.send(PageMessage::FieldChanged(field, value));
        Ok(())
    }

    #[wasm_bindgen(js_name = chooseImage)]
    pub fn choose_image(&self, kind: &str) -> Result<(), JsValue> {
        let kind = parse_kind(kind)?;
        self.handle.send(PageMessage::Tile(kind, TileEvent::Click));
        Ok(())
    }

    pub fn submit(&self) {
        self.handle.send(PageMessage::Submit);
    }

    pub fn cancel(&self) {
        self.handle.send(PageMessage::Cancel);
    }

    /// Current view as JSON. `undefined` only when called re-entrantly from
    /// an alert or navigation the page itself triggered.
    pub fn render(&self) -> Result<Option<String>, JsValue> {
        let Some(view) = self.handle.render() else {
            return Ok(None);
        };
        serde_json::to_string(&view)
            .map(Some)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
