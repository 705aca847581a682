use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::services::is_valid_email;
use crate::error::{FieldError, ValidationError};

/// Inbound contact-form payload. `projectType` keeps the public form's
/// camelCase name; stored records use `project_type`.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactRequestCreate {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(rename = "projectType")]
    pub project_type: String,
    #[serde(default)]
    pub budget: Option<String>,
    #[serde(default)]
    pub timeline: Option<String>,
    pub description: String,
}

impl ContactRequestCreate {
    /// Trims `name` and `description`, then checks every constraint,
    /// collecting all failures at once so the client sees the full list.
    pub fn validate(mut self) -> Result<Self, ValidationError> {
        self.name = self.name.trim().to_owned();
        self.description = self.description.trim().to_owned();

        let mut errors = Vec::new();

        let name_len = self.name.chars().count();
        if !(2..=100).contains(&name_len) {
            errors.push(FieldError {
                field: "name",
                message: "debe tener entre 2 y 100 caracteres".into(),
            });
        }
        if !is_valid_email(&self.email) {
            errors.push(FieldError {
                field: "email",
                message: "dirección de correo inválida".into(),
            });
        }
        if let Some(phone) = &self.phone {
            if phone.chars().count() > 20 {
                errors.push(FieldError {
                    field: "phone",
                    message: "no debe superar 20 caracteres".into(),
                });
            }
        }
        if let Some(company) = &self.company {
            if company.chars().count() > 100 {
                errors.push(FieldError {
                    field: "company",
                    message: "no debe superar 100 caracteres".into(),
                });
            }
        }
        if self.project_type.trim().is_empty() {
            errors.push(FieldError {
                field: "projectType",
                message: "es obligatorio".into(),
            });
        }
        let description_len = self.description.chars().count();
        if !(10..=2000).contains(&description_len) {
            errors.push(FieldError {
                field: "description",
                message: "debe tener entre 10 y 2000 caracteres".into(),
            });
        }

        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ValidationError { errors })
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ContactRequestResponse {
    pub success: bool,
    pub message: String,
    pub id: Uuid,
}
