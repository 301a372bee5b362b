//! Greeting for the authenticated caller.
//!
//! Pure: no I/O, no shared state. Safe to call from any number of requests at once.

use thiserror::Error;

use crate::api::extractors::AuthenticatedIdentity;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GreetingError {
    /// Reached with an empty principal, which authentication must never let through.
    #[error("authenticated identity has an empty principal name")]
    InvalidIdentity,
}

/// Render `Hello, <principal>!`.
pub fn greet(identity: &AuthenticatedIdentity) -> Result<String, GreetingError> {
    if identity.principal_name.is_empty() {
        return Err(GreetingError::InvalidIdentity);
    }

    Ok(format!("Hello, {}!", identity.principal_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(name: &str) -> AuthenticatedIdentity {
        AuthenticatedIdentity::new(name, "00u1abcd")
    }

    #[test]
    fn greets_single_word_principal() {
        assert_eq!(greet(&identity("alice")).unwrap(), "Hello, alice!");
    }

    #[test]
    fn greets_principal_with_spaces() {
        assert_eq!(greet(&identity("Bob Smith")).unwrap(), "Hello, Bob Smith!");
    }

    #[test]
    fn principal_is_inserted_verbatim() {
        for name in ["a", " ", "x@example.com", "Zoë", "!", "Hello, !"] {
            assert_eq!(greet(&identity(name)).unwrap(), format!("Hello, {name}!"));
        }
    }

    #[test]
    fn same_identity_gives_same_greeting() {
        let id = identity("carol");
        let first = greet(&id).unwrap();
        let second = greet(&id).unwrap();

        assert_eq!(first, second);
        assert_eq!(id, identity("carol"));
    }

    #[test]
    fn empty_principal_is_rejected() {
        assert_eq!(greet(&identity("")), Err(GreetingError::InvalidIdentity));
    }
}
