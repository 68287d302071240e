//! `navguard-auth`: token-derived role resolution.
//!
//! Decodes the locally held session token into [`Claims`] and answers a single
//! question: does this session carry administrator privilege? Every failure
//! path answers "no".

pub mod claims;
pub mod decode;
pub mod resolver;
pub mod session;

pub use claims::Claims;
pub use decode::{ClaimsError, Hs256Decoder, TokenDecoder, UnverifiedDecoder};
pub use resolver::{ClaimsResolver, PrivilegeResolver};
pub use session::SessionContext;
