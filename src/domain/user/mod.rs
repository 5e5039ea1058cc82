//! User module - accounts and their credentials.
//!
//! # Domain Invariants
//!
//! 1. Email addresses are validated on every write
//! 2. Passwords are stored only as salted hashes
//! 3. Ids are allocated by the repository and never reused

pub mod account;
pub mod values;

pub use account::{Role, User, UserPatch, UserStatus};
pub use values::{
    is_valid_email, is_valid_password, Email, Password, PasswordHash, PhoneNumber,
    MIN_PASSWORD_LENGTH,
};
