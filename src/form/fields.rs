//! Editable profile record and its field names.

use std::fmt;
use std::str::FromStr;

use profile_api::ProfilePayload;
use serde::Serialize;
use thiserror::Error;

/// Every field of [`ProfileFormData`], named as on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    UserId,
    Email,
    Name,
    ProfileImage,
    Provider,
    UserProfileId,
    LastName,
    FirstName,
    PhoneNumber,
    Address1,
    Address2,
    BgImage,
    CreatedAt,
}

impl FormField {
    pub const ALL: [FormField; 13] = [
        FormField::UserId,
        FormField::Email,
        FormField::Name,
        FormField::ProfileImage,
        FormField::Provider,
        FormField::UserProfileId,
        FormField::LastName,
        FormField::FirstName,
        FormField::PhoneNumber,
        FormField::Address1,
        FormField::Address2,
        FormField::BgImage,
        FormField::CreatedAt,
    ];

    /// Wire / input name of the field.
    pub fn name(self) -> &'static str {
        match self {
            FormField::UserId => "userId",
            FormField::Email => "email",
            FormField::Name => "name",
            FormField::ProfileImage => "profileImage",
            FormField::Provider => "provider",
            FormField::UserProfileId => "userProfileId",
            FormField::LastName => "lastName",
            FormField::FirstName => "firstName",
            FormField::PhoneNumber => "phoneNumber",
            FormField::Address1 => "address1",
            FormField::Address2 => "address2",
            FormField::BgImage => "bgImage",
            FormField::CreatedAt => "createdAt",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A change event named a field the form doesn't have.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown form field '{0}'")]
pub struct UnknownFieldError(pub String);

impl FromStr for FormField {
    type Err = UnknownFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormField::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| UnknownFieldError(s.to_string()))
    }
}

/// The values being edited. All fields default to the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileFormData {
    pub user_id: String,
    pub email: String,
    pub name: String,
    pub profile_image: String,
    pub provider: String,
    pub user_profile_id: String,
    pub last_name: String,
    pub first_name: String,
    pub phone_number: String,
    pub address1: String,
    pub address2: String,
    pub bg_image: String,
    pub created_at: String,
}

impl ProfileFormData {
    /// Build the form from a loaded profile.
    ///
    /// Only the fields the profile endpoint returns are copied; identifiers,
    /// timestamps and image URLs stay empty.
    pub fn from_payload(payload: &ProfilePayload) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        Self {
            email: text(&payload.email),
            name: text(&payload.name),
            provider: text(&payload.provider),
            last_name: text(&payload.last_name),
            first_name: text(&payload.first_name),
            phone_number: text(&payload.phone_number),
            address1: text(&payload.address1),
            address2: text(&payload.address2),
            ..Self::default()
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::UserId => &self.user_id,
            FormField::Email => &self.email,
            FormField::Name => &self.name,
            FormField::ProfileImage => &self.profile_image,
            FormField::Provider => &self.provider,
            FormField::UserProfileId => &self.user_profile_id,
            FormField::LastName => &self.last_name,
            FormField::FirstName => &self.first_name,
            FormField::PhoneNumber => &self.phone_number,
            FormField::Address1 => &self.address1,
            FormField::Address2 => &self.address2,
            FormField::BgImage => &self.bg_image,
            FormField::CreatedAt => &self.created_at,
        }
    }

    fn slot_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::UserId => &mut self.user_id,
            FormField::Email => &mut self.email,
            FormField::Name => &mut self.name,
            FormField::ProfileImage => &mut self.profile_image,
            FormField::Provider => &mut self.provider,
            FormField::UserProfileId => &mut self.user_profile_id,
            FormField::LastName => &mut self.last_name,
            FormField::FirstName => &mut self.first_name,
            FormField::PhoneNumber => &mut self.phone_number,
            FormField::Address1 => &mut self.address1,
            FormField::Address2 => &mut self.address2,
            FormField::BgImage => &mut self.bg_image,
            FormField::CreatedAt => &mut self.created_at,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        *self.slot_mut(field) = value.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_round_trip() {
        for field in FormField::ALL {
            assert_eq!(field.name().parse::<FormField>(), Ok(field));
        }
    }

    #[test]
    fn test_unknown_field_name() {
        let err = "nickname".parse::<FormField>().unwrap_err();
        assert_eq!(err, UnknownFieldError("nickname".to_string()));
    }

    #[test]
    fn test_set_touches_only_one_field() {
        let mut data = ProfileFormData::default();
        data.set(FormField::Address2, "Apt 301");
        for field in FormField::ALL {
            let expected = if field == FormField::Address2 { "Apt 301" } else { "" };
            assert_eq!(data.get(field), expected, "field {}", field);
        }
    }

    #[test]
    fn test_from_payload_leaves_unlisted_fields_empty() {
        let payload = ProfilePayload {
            name: Some("Alice".to_string()),
            email: Some("a@x.com".to_string()),
            profile_image: Some("https://cdn/p.png".to_string()),
            ..Default::default()
        };
        let data = ProfileFormData::from_payload(&payload);
        assert_eq!(data.name, "Alice");
        assert_eq!(data.email, "a@x.com");
        assert_eq!(data.profile_image, "");
        assert_eq!(data.user_id, "");
        assert_eq!(data.created_at, "");
    }
}
