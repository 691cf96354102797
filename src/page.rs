//! The profile page: composes the image picker and the form fields, and
//! makes the submit, cancel and redirect decisions.
//!
//! Events flow through [`ProfilePage::update`], which mutates the controller
//! synchronously and returns a [`PageCommand`]. The command owns its async
//! work and reports back with a follow-up message. [`ProfilePage::dispatch`]
//! loops the two until nothing is left; hosts that keep rendering while a
//! request runs go through [`crate::runtime::PageHandle`] instead.

use std::rc::Rc;

use serde::Serialize;

use crate::config::RouteConfig;
use crate::constants::{labels, notice};
use crate::form::{FormField, ImageKind, ProfileFormController, SubmitError};
use crate::message::{PageCommand, PageMessage};
use crate::picker::{FileChooser, ImagePicker, PickerView};

/// Route changes requested by the page.
pub trait Navigator {
    fn navigate_to(&self, path: &str);
    fn navigate_back(&self);
}

/// User-facing notifications (alerts, toasts).
pub trait Notifier {
    fn notify(&self, notice: Notice);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Failure,
    Error,
    Warning,
}

/// A message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Success, message)
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Failure, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Warning, message)
    }
}

/// The three mutually exclusive renderings of the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "camelCase")]
pub enum PageView {
    /// Not signed in; the navigator was sent to `to`
    Redirect { to: String },
    Loading(LoadingView),
    Ready(FormView),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadingView {
    pub title: &'static str,
    pub message: &'static str,
    /// Global navigation bar is shown above the page
    pub show_nav_bar: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldWidth {
    Full,
    Half,
}

/// One bound text input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldView {
    pub field: FormField,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub required: bool,
    pub width: FieldWidth,
    pub value: String,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonView {
    pub label: &'static str,
    pub enabled: bool,
}

/// The editable form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormView {
    pub title: &'static str,
    pub show_nav_bar: bool,
    pub picker: PickerView,
    pub fields: Vec<FieldView>,
    pub cancel: ButtonView,
    pub save: ButtonView,
}

impl FormView {
    pub fn field(&self, field: FormField) -> Option<&FieldView> {
        self.fields.iter().find(|f| f.field == field)
    }
}

struct FieldLayout {
    field: FormField,
    label: &'static str,
    placeholder: &'static str,
    required: bool,
    width: FieldWidth,
}

const FIELD_LAYOUT: [FieldLayout; 6] = [
    FieldLayout {
        field: FormField::Name,
        label: labels::NICKNAME,
        placeholder: labels::NICKNAME_PLACEHOLDER,
        required: true,
        width: FieldWidth::Full,
    },
    FieldLayout {
        field: FormField::LastName,
        label: labels::LAST_NAME,
        placeholder: labels::LAST_NAME_PLACEHOLDER,
        required: false,
        width: FieldWidth::Half,
    },
    FieldLayout {
        field: FormField::FirstName,
        label: labels::FIRST_NAME,
        placeholder: labels::FIRST_NAME_PLACEHOLDER,
        required: false,
        width: FieldWidth::Half,
    },
    FieldLayout {
        field: FormField::PhoneNumber,
        label: labels::PHONE_NUMBER,
        placeholder: labels::PHONE_NUMBER_PLACEHOLDER,
        required: false,
        width: FieldWidth::Full,
    },
    FieldLayout {
        field: FormField::Address1,
        label: labels::ADDRESS1,
        placeholder: labels::ADDRESS1_PLACEHOLDER,
        required: false,
        width: FieldWidth::Full,
    },
    FieldLayout {
        field: FormField::Address2,
        label: labels::ADDRESS2,
        placeholder: labels::ADDRESS2_PLACEHOLDER,
        required: false,
        width: FieldWidth::Full,
    },
];

/// Profile editing screen.
pub struct ProfilePage {
    controller: ProfileFormController,
    picker: ImagePicker<PageMessage>,
    navigator: Rc<dyn Navigator>,
    notifier: Rc<dyn Notifier>,
    routes: RouteConfig,
}

impl ProfilePage {
    pub fn new(
        controller: ProfileFormController,
        chooser: Rc<dyn FileChooser>,
        navigator: Rc<dyn Navigator>,
        notifier: Rc<dyn Notifier>,
    ) -> Self {
        let picker = ImagePicker::new(chooser)
            .on_select(|(file, kind)| PageMessage::ImageChosen(file, kind));
        Self {
            controller,
            picker,
            navigator,
            notifier,
            routes: RouteConfig::default(),
        }
    }

    pub fn with_routes(mut self, routes: RouteConfig) -> Self {
        self.routes = routes;
        self
    }

    pub fn controller(&self) -> &ProfileFormController {
        &self.controller
    }

    /// Apply a message and return the async work it requires.
    ///
    /// Never awaits; state changes are visible to `render` as soon as this
    /// returns.
    pub fn update(&mut self, message: PageMessage) -> PageCommand {
        match message {
            PageMessage::Mounted => self.load(),
            PageMessage::SessionChanged(session) => {
                if self.controller.replace_session(session) {
                    self.load()
                } else {
                    PageCommand::None
                }
            }
            PageMessage::ProfileLoaded(response) => {
                self.controller.finish_load(response);
                PageCommand::None
            }
            PageMessage::FieldChanged(field, value) => {
                self.controller.handle_field_change(field, value);
                PageCommand::None
            }
            PageMessage::Tile(kind, event) => {
                if ImagePicker::<PageMessage>::is_activation(event) {
                    PageCommand::OpenChooser(self.picker.clone(), kind)
                } else {
                    PageCommand::None
                }
            }
            PageMessage::ImageChosen(file, kind) => {
                match self.controller.handle_image_select(Some(file), kind) {
                    Ok(read) => PageCommand::ReadImage(read),
                    Err(rejection) => {
                        self.notifier.notify(Notice::warning(rejection.to_string()));
                        PageCommand::None
                    }
                }
            }
            PageMessage::ImageRead(image) => {
                self.controller.complete_image_read(image);
                PageCommand::None
            }
            PageMessage::Submit => {
                if self.controller.is_submitting() {
                    log::debug!("Ignoring submit while a save is in flight");
                    return PageCommand::None;
                }
                match self.controller.prepare_submit() {
                    Ok(Some(request)) => PageCommand::SubmitProfile(request),
                    Ok(None) => {
                        self.report_submit(Ok(false));
                        PageCommand::None
                    }
                    Err(e) => {
                        self.report_submit(Err(e));
                        PageCommand::None
                    }
                }
            }
            PageMessage::SubmitFinished(response) => {
                let result = self.controller.finish_submit(response);
                self.report_submit(result);
                PageCommand::None
            }
            PageMessage::Cancel => {
                if !self.controller.is_submitting() {
                    self.navigator.navigate_back();
                }
                PageCommand::None
            }
        }
    }

    fn load(&mut self) -> PageCommand {
        match self.controller.begin_load() {
            Some(request) => PageCommand::LoadProfile(request),
            None => PageCommand::None,
        }
    }

    /// Process a message and every follow-up it produces, in order.
    pub async fn dispatch(&mut self, message: PageMessage) {
        let mut next = Some(message);
        while let Some(message) = next.take() {
            let command = self.update(message);
            next = command.perform().await;
        }
    }

    fn report_submit(&self, result: Result<bool, SubmitError>) {
        match result {
            Ok(true) => {
                self.notifier.notify(Notice::success(notice::SAVED));
                self.navigator.navigate_to(&self.routes.home);
            }
            Ok(false) => {
                self.notifier.notify(Notice::failure(notice::SAVE_FAILED));
            }
            Err(e) => {
                log::error!("Saving the profile failed: {}", e);
                let message = e.server_message().unwrap_or(notice::SAVE_ERROR);
                self.notifier.notify(Notice::error(message));
            }
        }
    }

    /// Describe the current screen. An unauthenticated visitor is sent to
    /// the login route.
    pub fn render(&self) -> PageView {
        if !self.controller.session().is_authenticated {
            self.navigator.navigate_to(&self.routes.login);
            return PageView::Redirect {
                to: self.routes.login.clone(),
            };
        }

        if self.controller.is_loading_profile() {
            return PageView::Loading(LoadingView {
                title: labels::PAGE_TITLE,
                message: labels::LOADING,
                show_nav_bar: true,
            });
        }

        let data = self.controller.form_data();
        let errors = self.controller.errors();
        let fields = FIELD_LAYOUT
            .iter()
            .map(|layout| FieldView {
                field: layout.field,
                label: layout.label,
                placeholder: layout.placeholder,
                required: layout.required,
                width: layout.width,
                value: data.get(layout.field).to_string(),
                error: errors.message(layout.field),
            })
            .collect();

        let enabled = !self.controller.is_submitting();
        PageView::Ready(FormView {
            title: labels::PAGE_TITLE,
            show_nav_bar: true,
            picker: self.picker.view(
                self.controller.preview(ImageKind::Profile),
                self.controller.preview(ImageKind::Background),
            ),
            fields,
            cancel: ButtonView {
                label: labels::CANCEL,
                enabled,
            },
            save: ButtonView {
                label: labels::SAVE,
                enabled,
            },
        })
    }
}
