/*!
 * Authenticated identity extractor
 *
 * Responsibility:
 * - Provide the authenticated caller (AuthenticatedIdentity) to handlers
 * - axum-specific code stays in core, the type lives in types
 */

mod core;
mod types;

pub use self::core::IdentityExtractor;
pub use self::types::AuthenticatedIdentity;
