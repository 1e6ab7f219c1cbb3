pub mod invoices;
pub mod organizations;
pub mod plans;
pub mod subscriptions;

pub use invoices::InvoicesPage;
pub use organizations::OrganizationsPage;
pub use plans::PlansPage;
pub use subscriptions::SubscriptionsPage;
