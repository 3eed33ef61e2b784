use std::collections::HashMap;

/// Canonical contact fields a CSV column can feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    FirstName,
    LastName,
    Email,
    Company,
    Role,
    ProfileUrl,
    Phone,
    Notes,
    Labels,
}

/// Accepted header spellings per field, compared after trimming and
/// lowercasing the header. Earlier spellings take precedence when a file
/// carries more than one of them.
pub const HEADER_ALIASES: &[(ContactField, &[&str])] = &[
    (ContactField::FirstName, &["first name", "firstname", "first_name"]),
    (ContactField::LastName, &["last name", "lastname", "last_name"]),
    (
        ContactField::Email,
        &["email address", "email", "emailaddress", "email_address"],
    ),
    (ContactField::Company, &["company", "organization", "employer"]),
    (ContactField::Role, &["position", "title", "job title", "role"]),
    (
        ContactField::ProfileUrl,
        &["url", "profile url", "linkedin url", "profile"],
    ),
    (
        ContactField::Phone,
        &["phone", "phone number", "mobile", "mobile phone", "phone 1 - value"],
    ),
    (ContactField::Notes, &["notes"]),
    (
        ContactField::Labels,
        &["labels", "group membership", "groups", "categories"],
    ),
];

/// Resolved column position for each field the file actually has.
#[derive(Debug, Default)]
pub struct HeaderMap {
    columns: HashMap<ContactField, usize>,
}

impl HeaderMap {
    pub fn from_headers<'a>(headers: impl IntoIterator<Item = &'a str>) -> Self {
        let normalized: HashMap<String, usize> = headers
            .into_iter()
            .enumerate()
            .map(|(i, h)| (h.trim().to_lowercase(), i))
            .collect();

        let mut columns = HashMap::new();
        for (field, aliases) in HEADER_ALIASES {
            if let Some(position) = aliases.iter().find_map(|alias| normalized.get(*alias)) {
                columns.insert(*field, *position);
            }
        }

        Self { columns }
    }

    pub fn column(&self, field: ContactField) -> Option<usize> {
        self.columns.get(&field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linkedin_headers() {
        let map = HeaderMap::from_headers([
            "First Name",
            "Last Name",
            "URL",
            "Email Address",
            "Company",
            "Position",
            "Connected On",
        ]);

        assert_eq!(map.column(ContactField::FirstName), Some(0));
        assert_eq!(map.column(ContactField::LastName), Some(1));
        assert_eq!(map.column(ContactField::ProfileUrl), Some(2));
        assert_eq!(map.column(ContactField::Email), Some(3));
        assert_eq!(map.column(ContactField::Company), Some(4));
        assert_eq!(map.column(ContactField::Role), Some(5));
        assert_eq!(map.column(ContactField::Phone), None);
    }

    #[test]
    fn test_case_and_padding_are_ignored() {
        let map = HeaderMap::from_headers(["  FIRSTNAME ", "employer", "Job Title"]);

        assert_eq!(map.column(ContactField::FirstName), Some(0));
        assert_eq!(map.column(ContactField::Company), Some(1));
        assert_eq!(map.column(ContactField::Role), Some(2));
    }

    #[test]
    fn test_alias_precedence_follows_table_order() {
        // "Email" appears first in the file but "Email Address" is the
        // preferred spelling.
        let map = HeaderMap::from_headers(["Email", "Email Address"]);
        assert_eq!(map.column(ContactField::Email), Some(1));
    }

    #[test]
    fn test_address_book_group_column() {
        let map = HeaderMap::from_headers(["First Name", "Group Membership"]);
        assert_eq!(map.column(ContactField::Labels), Some(1));
    }

    #[test]
    fn test_unknown_headers() {
        let map = HeaderMap::from_headers(["Connected On", "Foo"]);
        assert!(map.is_empty());
    }
}
