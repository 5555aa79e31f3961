use std::fmt;

use serde::Serialize;

use crate::error::ScenarioError;
use crate::harness::session::TestSession;

/// Tag used to select scenarios from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    Smoke,
    Negative,
    Login,
    Signup,
    Products,
    Cart,
    Checkout,
    Payment,
    ContactUs,
    Subscription,
    Brand,
    Category,
    Navigation,
    Performance,
    PageLoad,
    Network,
    ResponseTime,
    ResourceMetrics,
    Optimization,
    Security,
    Https,
    Headers,
    Xss,
    SqlInjection,
    Cookies,
    Authentication,
    Session,
    DataExposure,
    FileUpload,
    ErrorHandling,
}

impl Category {
    pub const ALL: [Category; 30] = [
        Category::Smoke,
        Category::Negative,
        Category::Login,
        Category::Signup,
        Category::Products,
        Category::Cart,
        Category::Checkout,
        Category::Payment,
        Category::ContactUs,
        Category::Subscription,
        Category::Brand,
        Category::Category,
        Category::Navigation,
        Category::Performance,
        Category::PageLoad,
        Category::Network,
        Category::ResponseTime,
        Category::ResourceMetrics,
        Category::Optimization,
        Category::Security,
        Category::Https,
        Category::Headers,
        Category::Xss,
        Category::SqlInjection,
        Category::Cookies,
        Category::Authentication,
        Category::Session,
        Category::DataExposure,
        Category::FileUpload,
        Category::ErrorHandling,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Smoke => "Smoke",
            Category::Negative => "Negative",
            Category::Login => "Login",
            Category::Signup => "Signup",
            Category::Products => "Products",
            Category::Cart => "Cart",
            Category::Checkout => "Checkout",
            Category::Payment => "Payment",
            Category::ContactUs => "ContactUs",
            Category::Subscription => "Subscription",
            Category::Brand => "Brand",
            Category::Category => "Category",
            Category::Navigation => "Navigation",
            Category::Performance => "Performance",
            Category::PageLoad => "PageLoad",
            Category::Network => "Network",
            Category::ResponseTime => "ResponseTime",
            Category::ResourceMetrics => "ResourceMetrics",
            Category::Optimization => "Optimization",
            Category::Security => "Security",
            Category::Https => "HTTPS",
            Category::Headers => "Headers",
            Category::Xss => "XSS",
            Category::SqlInjection => "SQLInjection",
            Category::Cookies => "Cookies",
            Category::Authentication => "Authentication",
            Category::Session => "Session",
            Category::DataExposure => "DataExposure",
            Category::FileUpload => "FileUpload",
            Category::ErrorHandling => "ErrorHandling",
        }
    }

    /// Case-insensitive lookup by tag name.
    pub fn parse(name: &str) -> Option<Category> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extra setup performed after the site root has loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FixtureKind {
    /// Site root loaded, cookie banner dismissed
    #[default]
    Base,
    /// Base + a freshly generated, not yet registered account
    Signup,
    /// Signup + the account registered and logged out again
    Login,
}

pub type ScenarioFn = fn(&TestSession) -> Result<(), ScenarioError>;

/// One registered end-to-end scenario.
#[derive(Clone, Copy)]
pub struct Scenario {
    /// "TC01"
    pub id: &'static str,
    /// "Login_WithValidCredentials_ShouldSucceed"
    pub name: &'static str,
    pub categories: &'static [Category],
    pub fixture: FixtureKind,
    /// Reason the scenario is skipped, when it is
    pub ignore: Option<&'static str>,
    pub body: ScenarioFn,
}

impl Scenario {
    /// "TC01_Login_WithValidCredentials_ShouldSucceed"
    pub fn full_name(&self) -> String {
        format!("{}_{}", self.id, self.name)
    }

    pub fn has_category(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }

    /// Case-insensitive substring match on the full name.
    pub fn matches(&self, filter: &str) -> bool {
        self.full_name()
            .to_lowercase()
            .contains(&filter.to_lowercase())
    }
}

impl fmt::Debug for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scenario")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("categories", &self.categories)
            .field("fixture", &self.fixture)
            .field("ignore", &self.ignore)
            .finish()
    }
}

/// Scenarios carrying `category` (when given) whose name contains `filter`
/// (when given). Registration order is kept.
pub fn select(
    scenarios: Vec<Scenario>,
    category: Option<Category>,
    filter: Option<&str>,
) -> Vec<Scenario> {
    scenarios
        .into_iter()
        .filter(|s| category.map_or(true, |c| s.has_category(c)))
        .filter(|s| filter.map_or(true, |f| s.matches(f)))
        .collect()
}
