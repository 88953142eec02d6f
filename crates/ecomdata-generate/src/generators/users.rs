use std::collections::HashSet;

use chrono::NaiveDate;
use fake::Fake;
use fake::faker::internet::en::FreeEmail;
use fake::faker::name::en::Name;

use crate::errors::GenerationError;
use crate::random::RandomSource;
use crate::records::User;

use super::DateWindow;

/// Draws allowed per record before a unique value is considered exhausted.
pub const MAX_UNIQUE_ATTEMPTS: usize = 1000;

/// Generate `n` users with sequential ids and run-wide unique e-mails.
pub fn generate_users(
    n: usize,
    reference_date: NaiveDate,
    random: &mut RandomSource,
) -> Result<Vec<User>, GenerationError> {
    let window = DateWindow::signup(reference_date)?;
    let mut seen_emails = HashSet::with_capacity(n);
    let mut users = Vec::with_capacity(n);

    for index in 0..n {
        let faker = &mut random.faker;
        let name: String = Name().fake_with_rng(faker);
        let email = draw_unique(&mut seen_emails, MAX_UNIQUE_ATTEMPTS, "users.email", || {
            FreeEmail().fake_with_rng(faker)
        })?;
        let signup_date = window.sample(faker);

        users.push(User {
            user_id: index as u64 + 1,
            name,
            email,
            signup_date,
        });
    }

    Ok(users)
}

/// Redraw until `draw` yields a value not yet in `seen`.
pub(crate) fn draw_unique<F>(
    seen: &mut HashSet<String>,
    max_attempts: usize,
    field: &str,
    mut draw: F,
) -> Result<String, GenerationError>
where
    F: FnMut() -> String,
{
    for _ in 0..max_attempts {
        let candidate = draw();
        if !seen.contains(&candidate) {
            seen.insert(candidate.clone());
            return Ok(candidate);
        }
    }

    Err(GenerationError::integrity(
        "users",
        format!(
            "no unique {field} after {max_attempts} attempts ({} values taken)",
            seen.len()
        ),
    ))
}
