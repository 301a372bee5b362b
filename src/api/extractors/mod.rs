mod identity;

pub use identity::{AuthenticatedIdentity, IdentityExtractor};
