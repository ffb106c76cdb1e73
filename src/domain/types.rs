/// Record types tracked by kolab
///
/// Every record serializes with camelCase keys. References to other records are
/// carried as flat id fields (`industryId`, `responsibleId`, ...). Required strings
/// default to empty when omitted so the rule tables report them as missing; required
/// non-string values are `Option`s for the same reason.

use crate::domain::{
    entity::{Entity, Lookup},
    rules::{Check, Rules, UniqueField, EMAIL_PATTERN},
};
use chrono::{DateTime, FixedOffset};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn render(id: Option<Uuid>) -> Option<String> {
    id.map(|id| id.to_string())
}

/// Business sector a company operates in (e.g. "Tech", "Finance")
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Industry {
    pub id: Uuid,
    /// 2-100 characters, unique
    pub name: String,
}

impl Entity for Industry {
    const KIND: &'static str = "Industry";
    const TABLE: &'static str = "industries";
    const LOOKUPS: &'static [Lookup] = &[];

    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }

    fn rules() -> &'static Rules<Self> {
        static RULES: Lazy<Rules<Industry>> = Lazy::new(|| Rules {
            checks: vec![
                Check::NotBlank(|i| i.name.as_str(), "Industry name is required"),
                Check::Length(
                    |i| i.name.as_str(),
                    2,
                    100,
                    "Industry name must be between 2 and 100 characters",
                ),
            ],
            unique: Some(UniqueField {
                subject: "Industry",
                field: "name",
                column: "name",
                value: |i| i.name.as_str(),
            }),
        });
        &RULES
    }

    fn lookup_value(&self, _name: &str) -> Option<String> {
        None
    }
}

/// Project category (e.g. "Sponsorship", "Hackathon")
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    /// 2-50 characters, unique
    pub name: String,
}

impl Entity for Category {
    const KIND: &'static str = "Category";
    const TABLE: &'static str = "categories";
    const LOOKUPS: &'static [Lookup] = &[];

    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }

    fn rules() -> &'static Rules<Self> {
        static RULES: Lazy<Rules<Category>> = Lazy::new(|| Rules {
            checks: vec![
                Check::NotBlank(|c| c.name.as_str(), "Category name is required"),
                Check::Length(
                    |c| c.name.as_str(),
                    2,
                    50,
                    "Category name must be between 2 and 50 characters",
                ),
            ],
            unique: Some(UniqueField {
                subject: "Category",
                field: "name",
                column: "name",
                value: |c| c.name.as_str(),
            }),
        });
        &RULES
    }

    fn lookup_value(&self, _name: &str) -> Option<String> {
        None
    }
}

/// Application user, responsible for projects and collaborations
///
/// `authorization` is an opaque role string; nothing in kolab enforces it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub surname: String,
    pub nickname: Option<String>,
    pub email: String,
    pub authorization: String,
    pub description: Option<String>,
}

impl Entity for User {
    const KIND: &'static str = "User";
    const TABLE: &'static str = "users";
    const LOOKUPS: &'static [Lookup] = &[Lookup::field("email", "email")];

    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }

    fn rules() -> &'static Rules<Self> {
        static RULES: Lazy<Rules<User>> = Lazy::new(|| Rules {
            checks: vec![
                Check::Matches(|u| u.email.as_str(), &EMAIL_PATTERN, "Invalid email format"),
                Check::NotBlank(|u| u.name.as_str(), "Name is required"),
                Check::NotBlank(|u| u.surname.as_str(), "Surname is required"),
                Check::NotBlank(|u| u.authorization.as_str(), "Authorization is required"),
            ],
            unique: None,
        });
        &RULES
    }

    fn lookup_value(&self, name: &str) -> Option<String> {
        match name {
            "email" => Some(self.email.clone()),
            _ => None,
        }
    }
}

/// A company that may collaborate on projects
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Company {
    pub id: Uuid,
    pub industry_id: Option<Uuid>,
    pub name: String,
    pub categorization: Option<String>,
    pub budget_planning_month: Option<String>,
    pub country: String,
    pub zip: Option<i64>,
    pub city: String,
    pub address: Option<String>,
    pub web_link: Option<String>,
    pub description: Option<String>,
    pub contact_in_future: bool,
}

impl Entity for Company {
    const KIND: &'static str = "Company";
    const TABLE: &'static str = "companies";
    const LOOKUPS: &'static [Lookup] = &[Lookup::reference("industry", "industry_id")];

    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }

    fn rules() -> &'static Rules<Self> {
        static RULES: Lazy<Rules<Company>> = Lazy::new(|| Rules {
            checks: vec![
                Check::NotBlank(|c| c.name.as_str(), "Name is required"),
                Check::NotBlank(|c| c.country.as_str(), "Country is required"),
                Check::NotBlank(|c| c.city.as_str(), "City is required"),
                Check::Present(|c| c.zip.is_some(), "ZIP code is required"),
                Check::Present(|c| c.industry_id.is_some(), "Industry is required"),
            ],
            unique: Some(UniqueField {
                subject: "Company",
                field: "name",
                column: "name",
                value: |c| c.name.as_str(),
            }),
        });
        &RULES
    }

    fn lookup_value(&self, name: &str) -> Option<String> {
        match name {
            "industry" => render(self.industry_id),
            _ => None,
        }
    }
}

/// A person to contact at a company
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompanyContact {
    pub id: Uuid,
    pub company_id: Option<Uuid>,
    pub first_name: String,
    pub last_name: String,
    pub position: String,
    /// Unique across all contacts
    pub email: String,
    pub phone: Option<String>,
}

impl Entity for CompanyContact {
    const KIND: &'static str = "Company contact";
    const TABLE: &'static str = "company_contacts";
    const LOOKUPS: &'static [Lookup] = &[Lookup::reference("company", "company_id")];

    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }

    fn rules() -> &'static Rules<Self> {
        static RULES: Lazy<Rules<CompanyContact>> = Lazy::new(|| Rules {
            checks: vec![
                Check::NotBlank(|c| c.first_name.as_str(), "First name is required"),
                Check::NotBlank(|c| c.last_name.as_str(), "Last name is required"),
                Check::NotBlank(|c| c.position.as_str(), "Position is required"),
                Check::NotBlank(|c| c.email.as_str(), "Email is required"),
                Check::Matches(|c| c.email.as_str(), &EMAIL_PATTERN, "Email should be valid"),
                Check::Present(|c| c.company_id.is_some(), "Company is required"),
            ],
            unique: Some(UniqueField {
                subject: "Contact",
                field: "email",
                column: "email",
                value: |c| c.email.as_str(),
            }),
        });
        &RULES
    }

    fn lookup_value(&self, name: &str) -> Option<String> {
        match name {
            "company" => render(self.company_id),
            _ => None,
        }
    }
}

/// A project run under a category by a responsible user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub category_id: Option<Uuid>,
    pub name: String,
    #[serde(rename = "type")]
    pub project_type: String,
    pub start_date: Option<DateTime<FixedOffset>>,
    pub end_date: Option<DateTime<FixedOffset>>,
    /// Target value the collaborations work towards
    pub goal: Option<i64>,
    pub responsible_id: Option<Uuid>,
}

impl Entity for Project {
    const KIND: &'static str = "Project";
    const TABLE: &'static str = "projects";
    const LOOKUPS: &'static [Lookup] = &[
        Lookup::reference("category", "category_id"),
        Lookup::reference("responsible", "responsible_id"),
    ];

    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }

    fn rules() -> &'static Rules<Self> {
        static RULES: Lazy<Rules<Project>> = Lazy::new(|| Rules {
            checks: vec![
                Check::NotBlank(|p| p.name.as_str(), "Name is required"),
                Check::NotBlank(|p| p.project_type.as_str(), "Type is required"),
                Check::Present(|p| p.start_date.is_some(), "Start date is required"),
                Check::Present(|p| p.category_id.is_some(), "Category is required"),
                Check::Present(|p| p.responsible_id.is_some(), "Responsible user is required"),
            ],
            unique: Some(UniqueField {
                subject: "Project",
                field: "name",
                column: "name",
                value: |p| p.name.as_str(),
            }),
        });
        &RULES
    }

    fn lookup_value(&self, name: &str) -> Option<String> {
        match name {
            "category" => render(self.category_id),
            "responsible" => render(self.responsible_id),
            _ => None,
        }
    }
}

/// A company's engagement with a project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Collaboration {
    pub id: Uuid,
    pub project_id: Option<Uuid>,
    pub company_id: Option<Uuid>,
    pub contact_id: Option<Uuid>,
    pub responsible_id: Option<Uuid>,
    /// Free-text kind of engagement, unrelated to project categories
    pub category: String,
    pub status: String,
    pub comment: Option<String>,
    /// Progress towards the project's goal
    pub achieved_value: Option<i64>,
}

impl Entity for Collaboration {
    const KIND: &'static str = "Collaboration";
    const TABLE: &'static str = "collaborations";
    const LOOKUPS: &'static [Lookup] = &[
        Lookup::reference("project", "project_id"),
        Lookup::reference("company", "company_id"),
        Lookup::reference("contact", "contact_id"),
        Lookup::reference("responsible", "responsible_id"),
    ];

    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }

    fn rules() -> &'static Rules<Self> {
        static RULES: Lazy<Rules<Collaboration>> = Lazy::new(|| Rules {
            checks: vec![
                Check::Present(|c| c.project_id.is_some(), "Project is required"),
                Check::Present(|c| c.company_id.is_some(), "Company is required"),
                Check::NotBlank(|c| c.category.as_str(), "Category is required"),
                Check::NotBlank(|c| c.status.as_str(), "Status is required"),
            ],
            unique: None,
        });
        &RULES
    }

    fn lookup_value(&self, name: &str) -> Option<String> {
        match name {
            "project" => render(self.project_id),
            "company" => render(self.company_id),
            "contact" => render(self.contact_id),
            "responsible" => render(self.responsible_id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn company_payload_uses_camel_case_and_defaults_missing_fields() {
        let industry = Uuid::new_v4();
        let company: Company = serde_json::from_value(json!({
            "name": "Acme",
            "industryId": industry,
            "zip": 10115,
            "webLink": "https://acme.example",
            "contactInFuture": true
        }))
        .unwrap();

        assert_eq!(company.id, Uuid::nil());
        assert_eq!(company.industry_id, Some(industry));
        assert_eq!(company.web_link.as_deref(), Some("https://acme.example"));
        assert!(company.contact_in_future);
        assert_eq!(company.country, "");
        assert_eq!(Company::rules().validate(&company), Err("Country is required"));
    }

    #[test]
    fn project_type_is_serialized_as_type() {
        let project: Project = serde_json::from_value(json!({
            "name": "Summer camp",
            "type": "event",
            "startDate": "2024-06-01T09:00:00+02:00"
        }))
        .unwrap();
        assert_eq!(project.project_type, "event");
        assert!(project.start_date.is_some());

        let value = serde_json::to_value(&project).unwrap();
        assert_eq!(value["type"], "event");
        assert_eq!(value["responsibleId"], serde_json::Value::Null);
    }

    #[test]
    fn project_without_responsible_is_rejected() {
        let project = Project {
            name: "Summer camp".into(),
            project_type: "event".into(),
            start_date: DateTime::parse_from_rfc3339("2024-06-01T09:00:00+02:00").ok(),
            category_id: Some(Uuid::new_v4()),
            ..Default::default()
        };
        assert_eq!(Project::rules().validate(&project), Err("Responsible user is required"));
    }

    #[test]
    fn collaboration_checks_references_before_text_fields() {
        let collaboration = Collaboration::default();
        assert_eq!(Collaboration::rules().validate(&collaboration), Err("Project is required"));

        let collaboration = Collaboration {
            project_id: Some(Uuid::new_v4()),
            company_id: Some(Uuid::new_v4()),
            category: "sponsor".into(),
            ..Default::default()
        };
        assert_eq!(Collaboration::rules().validate(&collaboration), Err("Status is required"));
    }

    #[test]
    fn industry_and_category_names_are_bounded() {
        let industry = |name: String| Industry { name, ..Default::default() };
        assert_eq!(
            Industry::rules().validate(&industry("X".into())),
            Err("Industry name must be between 2 and 100 characters")
        );
        assert_eq!(Industry::rules().validate(&industry("x".repeat(100))), Ok(()));
        assert!(Industry::rules().validate(&industry("x".repeat(101))).is_err());

        let category = |name: String| Category { name, ..Default::default() };
        assert_eq!(Category::rules().validate(&category("x".repeat(50))), Ok(()));
        assert_eq!(
            Category::rules().validate(&category("x".repeat(51))),
            Err("Category name must be between 2 and 50 characters")
        );
    }

    #[test]
    fn contact_email_must_look_like_an_address() {
        let contact = CompanyContact {
            company_id: Some(Uuid::new_v4()),
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            position: "CTO".into(),
            email: "not an email".into(),
            ..Default::default()
        };
        assert_eq!(CompanyContact::rules().validate(&contact), Err("Email should be valid"));

        let contact = CompanyContact { email: "jane@acme.example".into(), ..contact };
        assert_eq!(CompanyContact::rules().validate(&contact), Ok(()));
    }

    #[test]
    fn user_email_is_checked_first() {
        let user = User { email: "not-an-email".into(), ..Default::default() };
        assert_eq!(User::rules().validate(&user), Err("Invalid email format"));
    }

    #[test]
    fn lookup_values_render_reference_ids() {
        let project = Uuid::new_v4();
        let collaboration = Collaboration { project_id: Some(project), ..Default::default() };
        assert_eq!(collaboration.lookup_value("project"), Some(project.to_string()));
        assert_eq!(collaboration.lookup_value("contact"), None);
        assert_eq!(collaboration.lookup_value("unknown"), None);
        assert!(Collaboration::lookup("responsible").is_some());
        assert!(Company::lookup("category").is_none());
    }

    #[test]
    fn unique_value_follows_rule_table() {
        let contact = CompanyContact { email: "jane@acme.example".into(), ..Default::default() };
        assert_eq!(contact.unique_value(), Some("jane@acme.example"));
        let user = User { email: "jane@acme.example".into(), ..Default::default() };
        assert_eq!(user.unique_value(), None);
    }
}
