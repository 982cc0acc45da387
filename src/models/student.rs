use serde::{Deserialize, Serialize};

/// Full student record as served by the student records API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: i64,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub dob: Option<String>,
    #[serde(alias = "class")]
    pub class_name: Option<String>,
    pub section: Option<String>,
    pub roll: Option<i64>,
    pub admission_date: Option<String>,
    pub current_address: Option<String>,
    pub permanent_address: Option<String>,
    pub father_name: Option<String>,
    pub father_phone: Option<String>,
    pub mother_name: Option<String>,
    pub mother_phone: Option<String>,
    pub guardian_name: Option<String>,
    pub guardian_phone: Option<String>,
    pub system_access: Option<bool>,
}

impl Student {
    /// Non-empty name parts joined by single spaces.
    pub fn format_name(&self) -> String {
        [
            Some(self.first_name.as_str()),
            self.middle_name.as_deref(),
            Some(self.last_name.as_str()),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }

    pub fn status(&self) -> &'static str {
        match self.system_access {
            Some(true) => "Active",
            Some(false) => "Inactive",
            None => "Unknown",
        }
    }
}

/// Summary row returned by the student list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudentListItem {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    #[serde(alias = "class")]
    pub class_name: Option<String>,
    pub section: Option<String>,
    pub roll: Option<i64>,
    pub system_access: Option<bool>,
}
