use serde::{Deserialize, Serialize};

/// Identifier the directory assigns to a user.
pub type UserId = u64;

/// A user record as served by the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub avatar: String,
}

impl User {
    /// Creates a user record without an avatar.
    pub fn new(
        id: UserId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            avatar: String::new(),
        }
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = avatar.into();
        self
    }

    /// Whether `needle` occurs in the first name, last name, or email.
    ///
    /// `needle` must already be lower-cased; the record's fields are
    /// lower-cased here so the comparison is case-insensitive.
    pub fn matches(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.first_name.to_lowercase().contains(needle)
            || self.last_name.to_lowercase().contains(needle)
            || self.email.to_lowercase().contains(needle)
    }

    /// Shallow-merges the editable fields of `draft` into this record.
    pub fn merge(&mut self, draft: &UserDraft) {
        self.first_name = draft.first_name.clone();
        self.last_name = draft.last_name.clone();
        self.email = draft.email.clone();
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Editable fields of a user, detached from the list while an edit is open.
///
/// Also the body of the directory's update request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl UserDraft {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }

    /// Checks that every field is filled in and the email looks like one.
    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("first name", &self.first_name),
            ("last name", &self.last_name),
            ("email", &self.email),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(format!("{name} is required"));
            }
        }
        if !self.email.contains('@') {
            return Err(format!("invalid email address: {}", self.email));
        }
        Ok(())
    }
}

impl From<&User> for UserDraft {
    fn from(user: &User) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
        }
    }
}

/// One page of the directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPage {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub total: u32,
    pub total_pages: u32,
    pub data: Vec<User>,
}

impl UserPage {
    pub fn new(page: u32, total_pages: u32, data: Vec<User>) -> Self {
        Self {
            page,
            per_page: data.len() as u32,
            total: data.len() as u32,
            total_pages,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_is_case_insensitive_on_every_field() {
        let user = User::new(7, "George", "Edwards", "george.edwards@reqres.in");
        assert!(user.matches("geo"));
        assert!(user.matches("edw"));
        assert!(user.matches("reqres"));
        assert!(!user.matches("janet"));
    }

    #[test]
    fn merge_keeps_id_and_avatar() {
        let mut user = User::new(2, "Janet", "Weaver", "janet.weaver@reqres.in")
            .with_avatar("https://reqres.in/img/faces/2-image.jpg");
        user.merge(&UserDraft::new("Jan", "Weaver-Smith", "jan@example.com"));
        assert_eq!(user.id, 2);
        assert_eq!(user.avatar, "https://reqres.in/img/faces/2-image.jpg");
        assert_eq!(user.first_name, "Jan");
        assert_eq!(user.last_name, "Weaver-Smith");
        assert_eq!(user.email, "jan@example.com");
    }

    #[test]
    fn draft_validation() {
        assert!(UserDraft::new("a", "b", "c@d").validate().is_ok());
        assert!(UserDraft::new(" ", "b", "c@d").validate().is_err());
        assert!(UserDraft::new("a", "", "c@d").validate().is_err());
        assert!(UserDraft::new("a", "b", "not-an-email").validate().is_err());
    }

    #[test]
    fn page_decodes_directory_payload() {
        let body = r#"{
            "page": 2, "per_page": 6, "total": 12, "total_pages": 2,
            "data": [{"id": 7, "email": "michael.lawson@reqres.in",
                      "first_name": "Michael", "last_name": "Lawson",
                      "avatar": "https://reqres.in/img/faces/7-image.jpg"}],
            "support": {"url": "https://reqres.in/#support-heading"}
        }"#;
        let page: UserPage = serde_json::from_str(body).unwrap();
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.data[0].first_name, "Michael");
    }
}
