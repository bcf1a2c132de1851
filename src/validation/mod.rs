/// Extracts a canonical address from free-form input.
///
/// # Examples
/// ```
/// use trusted_email_validator::validation::normalize::normalize_email;
///
/// assert_eq!(normalize_email("testing@gmail.com "), "testing@gmail.com");
/// ```
pub mod normalize;

/// Strict structural check of a normalized address.
///
/// # Examples
/// ```
/// use trusted_email_validator::validation::syntax::is_email_shaped;
///
/// assert!(is_email_shaped("shane@ima.museum"));
/// assert!(!is_email_shaped(""));
/// ```
pub mod syntax;

/// MX lookups behind the [`dnsmx::LookupMx`] seam, with a trust-dns
/// implementation and failure classification.
pub mod dnsmx;

/// Load-once store for the free-provider and common-username lists.
pub mod reference;

/// Membership tests against the reference lists.
pub mod classify;
