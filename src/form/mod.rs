//! Profile form: the editable record, validation, image selection and the
//! controller that ties them to the backend.

mod controller;
mod errors;
mod fields;
mod image;
mod state;

#[cfg(test)]
mod tests;

pub use controller::{
    LoadOutcome, LoadRequest, LoadResponse, ProfileFormController, SubmitError, SubmitRequest,
    SubmitResponse, UploadReport,
};
pub use errors::{FieldError, FormErrors};
pub use fields::{FormField, ProfileFormData, UnknownFieldError};
pub use image::{
    ImageFile, ImageKind, ImageRejection, ImageSlot, LoadedImage, PendingRead, check_selection,
    has_image_extension, is_data_uri, sniff_content_type,
};
pub use state::{
    LoadingState, ProfileFormState, SlotSnapshot, SubmitPlan, sanitize_image_url,
};
