//! Credential store: registration, authentication, password change, and
//! account deletion for both account kinds.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use tracing::info;

use bridge_db::{Database, Error, queries};
use bridge_types::{AccountKind, Session};

/// Registration form payload for an investor account.
pub struct NewInvestor {
    pub full_name: String,
    pub email: String,
    /// Must be an explicit choice at registration even though the stored
    /// column is nullable.
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub password: String,
    pub confirm_password: String,
}

/// Registration form payload for a company account.
pub struct NewCompany {
    pub tax_id: String,
    pub trade_name: String,
    pub legal_name: String,
    pub street: Option<String>,
    pub street_number: Option<String>,
    pub unit: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

pub fn register_investor(db: &Database, new: &NewInvestor) -> Result<i64, Error> {
    require_field(&new.full_name, "full name")?;
    require_field(&new.email, "email")?;
    require_password_pair(&new.password, &new.confirm_password)?;
    let gender = match new.gender.as_deref().map(str::trim) {
        Some(g) if !g.is_empty() => g,
        _ => return Err(Error::Validation("select a gender".into())),
    };

    let password_hash = hash_password(&new.password)?;
    let id = db.insert_investor(&queries::NewInvestor {
        full_name: new.full_name.trim(),
        email: new.email.trim(),
        gender: Some(gender),
        phone: new.phone.as_deref(),
        password_hash: &password_hash,
    })?;

    info!("Registered investor {}", id);
    Ok(id)
}

pub fn register_company(db: &Database, new: &NewCompany) -> Result<i64, Error> {
    require_field(&new.tax_id, "tax id")?;
    require_field(&new.trade_name, "trade name")?;
    require_field(&new.legal_name, "legal name")?;
    require_field(&new.email, "email")?;
    require_password_pair(&new.password, &new.confirm_password)?;

    let password_hash = hash_password(&new.password)?;
    let id = db.insert_company(&queries::NewCompany {
        tax_id: new.tax_id.trim(),
        trade_name: new.trade_name.trim(),
        legal_name: new.legal_name.trim(),
        street: new.street.as_deref(),
        street_number: new.street_number.as_deref(),
        unit: new.unit.as_deref(),
        city: new.city.as_deref(),
        state: new.state.as_deref(),
        postal_code: new.postal_code.as_deref(),
        email: new.email.trim(),
        password_hash: &password_hash,
    })?;

    info!("Registered company {}", id);
    Ok(id)
}

/// Looks the email up in the investor table first, then companies. Emails
/// are unique across both tables, so the ordering only matters for stores
/// created before that rule; the investor match wins there.
pub fn authenticate(db: &Database, email: &str, password: &str) -> Result<Session, Error> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(Error::Validation("fill in email and password".into()));
    }

    if let Some(investor) = db.investor_by_email(email)? {
        if verify_password(password, &investor.password_hash)? {
            return Ok(Session {
                account_id: investor.id,
                kind: AccountKind::Investor,
                display_name: investor.full_name,
            });
        }
        return Err(Error::InvalidCredentials);
    }

    if let Some(company) = db.company_by_email(email)? {
        if verify_password(password, &company.password_hash)? {
            return Ok(Session {
                account_id: company.id,
                kind: AccountKind::Company,
                display_name: company.trade_name,
            });
        }
    }

    Err(Error::InvalidCredentials)
}

/// The stored hash is only overwritten once the current password verifies.
pub fn change_password(
    db: &Database,
    account_id: i64,
    kind: AccountKind,
    current_password: &str,
    new_password: &str,
    confirm_password: &str,
) -> Result<(), Error> {
    require_password_pair(new_password, confirm_password)?;

    let stored = db
        .password_hash_for(account_id, kind)?
        .ok_or(Error::NotFound)?;
    if !verify_password(current_password, &stored)? {
        return Err(Error::InvalidCredentials);
    }

    let new_hash = hash_password(new_password)?;
    db.set_password_hash(account_id, kind, &new_hash)?;
    info!("Password changed for {} {}", kind, account_id);
    Ok(())
}

pub fn delete_account(db: &Database, account_id: i64, kind: AccountKind) -> Result<(), Error> {
    db.delete_account(account_id, kind)?;
    info!("Deleted {} account {}", kind, account_id);
    Ok(())
}

fn require_field(value: &str, name: &str) -> Result<(), Error> {
    if value.trim().is_empty() {
        return Err(Error::Validation(format!("{name} is required")));
    }
    Ok(())
}

fn require_password_pair(password: &str, confirm: &str) -> Result<(), Error> {
    if password.is_empty() {
        return Err(Error::Validation("password is required".into()));
    }
    if password != confirm {
        return Err(Error::Validation("passwords do not match".into()));
    }
    Ok(())
}

/// Argon2id with a fresh random salt per account.
fn hash_password(password: &str) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| Error::Hashing(e.to_string()))
}

fn verify_password(password: &str, stored_hash: &str) -> Result<bool, Error> {
    let parsed = PasswordHash::new(stored_hash).map_err(|e| Error::Hashing(e.to_string()))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(Error::Hashing(e.to_string())),
    }
}
