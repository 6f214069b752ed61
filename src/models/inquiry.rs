use serde::Deserialize;

use crate::error::AppError;

/// Raw `POST /api/contact` body. Every field is optional at this stage so that
/// absent and blank values reach validation instead of failing deserialization.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct InquiryRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub budget: Option<String>,
    #[serde(default)]
    pub timeline: Option<String>,
}

/// An inquiry whose required fields are present and non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inquiry {
    pub name: String,
    pub email: String,
    pub message: String,
    pub company: Option<String>,
    pub budget: Option<String>,
    pub timeline: Option<String>,
}

/// Optional inquiry fields a form schema may display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionalField {
    Company,
    Budget,
    Timeline,
}

impl InquiryRequest {
    pub fn validate(self) -> Result<Inquiry, AppError> {
        let (Some(name), Some(email), Some(message)) = (
            present(self.name),
            present(self.email),
            present(self.message),
        ) else {
            return Err(AppError::MissingFields);
        };

        Ok(Inquiry {
            name,
            email,
            message,
            company: present(self.company),
            budget: present(self.budget),
            timeline: present(self.timeline),
        })
    }
}

impl Inquiry {
    pub fn optional(&self, field: OptionalField) -> Option<&str> {
        match field {
            OptionalField::Company => self.company.as_deref(),
            OptionalField::Budget => self.budget.as_deref(),
            OptionalField::Timeline => self.timeline.as_deref(),
        }
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
