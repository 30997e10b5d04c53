//! Card markup for a list of users.
//!
//! Every user-supplied value goes through [`escape_html`] before interpolation,
//! initials included.

use crate::directory::types::{CardView, UserRecord};
use std::fmt::Write;

/// Animation delay added per card, in milliseconds.
pub const DELAY_STEP_MS: usize = 60;

/// Static notice that replaces the grid when a load fails.
pub const ERROR_NOTICE: &str = r#"<p class="error-detail">Could not load user data. Please check your connection and try again.</p>"#;

/// Replace markup-significant characters with entities.
#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// First letter of each of the first two space-separated words, uppercased.
/// Empty words (leading or doubled spaces) contribute nothing.
#[must_use]
pub fn initials(name: &str) -> String {
    name.split(' ')
        .take(2)
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

impl<'a> From<&'a UserRecord> for CardView<'a> {
    fn from(user: &'a UserRecord) -> Self {
        CardView {
            initials: initials(&user.name),
            name: &user.name,
            email: &user.email,
            city: user.city_or_default(),
        }
    }
}

/// Markup for a single card at position `index`.
#[must_use]
pub fn render_card(index: usize, card: &CardView<'_>) -> String {
    let mut html = String::new();
    write_card(&mut html, index, card);
    html
}

/// Markup for all cards, in input order, as a single batch.
#[must_use]
pub fn render_cards(users: &[UserRecord]) -> String {
    users
        .iter()
        .enumerate()
        .fold(String::new(), |mut html, (index, user)| {
            write_card(&mut html, index, &CardView::from(user));
            html
        })
}

fn write_card(html: &mut String, index: usize, card: &CardView<'_>) {
    let delay = index.saturating_mul(DELAY_STEP_MS);
    let initials = escape_html(&card.initials);
    let name = escape_html(card.name);
    let email = escape_html(card.email);
    let city = escape_html(card.city);

    // Writing into a String cannot fail.
    let _ = write!(
        html,
        r#"<div class="user-card" style="--delay: {delay}ms">
  <div class="card-avatar" aria-hidden="true">{initials}</div>
  <div class="card-body">
    <h2 class="card-name">{name}</h2>
    <p class="card-detail">
      <span class="card-icon" aria-label="Email">✉</span>
      <a href="mailto:{email}" class="card-link">{email}</a>
    </p>
    <p class="card-detail">
      <span class="card-icon" aria-label="City">📍</span>
      <span>{city}</span>
    </p>
  </div>
</div>
"#
    );
}
