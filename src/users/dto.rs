use serde::Deserialize;

use crate::validation::{is_valid_email, require_non_negative, require_text, Validate};

pub const DEFAULT_CALORIE_TARGET: i32 = 2000;
pub const DEFAULT_PROTEIN_TARGET: i32 = 100;
pub const DEFAULT_CARBS_TARGET: i32 = 250;
pub const DEFAULT_FAT_TARGET: i32 = 67;
pub const DEFAULT_DIET_TYPE: &str = "balanced";

/// Request body for `POST /api/users`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub calorie_target: Option<i32>,
    pub protein_target: Option<i32>,
    pub carbs_target: Option<i32>,
    pub fat_target: Option<i32>,
    pub diet_type: Option<String>,
    pub allergens: Option<Vec<String>>,
}

/// Request body for `PATCH /api/users/:id`. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub calorie_target: Option<i32>,
    pub protein_target: Option<i32>,
    pub carbs_target: Option<i32>,
    pub fat_target: Option<i32>,
    pub diet_type: Option<String>,
    pub allergens: Option<Vec<String>>,
}

fn check_targets(problems: &mut Vec<String>, targets: [(&str, Option<i32>); 4]) {
    for (field, value) in targets {
        if let Some(v) = value {
            require_non_negative(problems, field, v);
        }
    }
}

impl Validate for NewUser {
    fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        require_text(&mut problems, "username", &self.username);
        require_text(&mut problems, "firstName", &self.first_name);
        require_text(&mut problems, "lastName", &self.last_name);
        if self.password.len() < 8 {
            problems.push("password must be at least 8 characters".into());
        }
        if !is_valid_email(self.email.trim()) {
            problems.push("email is invalid".into());
        }
        check_targets(
            &mut problems,
            [
                ("calorieTarget", self.calorie_target),
                ("proteinTarget", self.protein_target),
                ("carbsTarget", self.carbs_target),
                ("fatTarget", self.fat_target),
            ],
        );
        problems
    }
}

impl Validate for UserPatch {
    fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if let Some(first_name) = &self.first_name {
            require_text(&mut problems, "firstName", first_name);
        }
        if let Some(last_name) = &self.last_name {
            require_text(&mut problems, "lastName", last_name);
        }
        if let Some(email) = &self.email {
            if !is_valid_email(email.trim()) {
                problems.push("email is invalid".into());
            }
        }
        check_targets(
            &mut problems,
            [
                ("calorieTarget", self.calorie_target),
                ("proteinTarget", self.protein_target),
                ("carbsTarget", self.carbs_target),
                ("fatTarget", self.fat_target),
            ],
        );
        problems
    }
}
