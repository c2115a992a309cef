//! Fake-value provider backed by the `fake` crate.
//!
//! Exposes categorized scalar generators plus the placeholder-token table
//! used by example-driven generation. Values are non-cryptographic and not
//! reproducible across runs.

use chrono::{Duration, Utc};
use fake::faker::address::en::{CityName, CountryName, StreetName, ZipCode};
use fake::faker::company::en::{BsNoun, Buzzword, CompanyName};
use fake::faker::internet::en::{SafeEmail, Username};
use fake::faker::lorem::en::{Paragraph, Sentence, Word};
use fake::faker::name::en::{FirstName, LastName, Name};
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde_json::{json, Value};

pub fn word() -> String {
    Word().fake()
}

pub fn sentence() -> String {
    Sentence(3..8).fake()
}

pub fn paragraph() -> String {
    Paragraph(1..3).fake()
}

pub fn full_name() -> String {
    Name().fake()
}

pub fn first_name() -> String {
    FirstName().fake()
}

pub fn last_name() -> String {
    LastName().fake()
}

pub fn email() -> String {
    SafeEmail().fake()
}

pub fn username() -> String {
    Username().fake()
}

pub fn url() -> String {
    format!("https://www.{}.com", word().to_lowercase())
}

pub fn street_address() -> String {
    let number: u16 = rand::thread_rng().gen_range(1..=9999);
    format!("{} {}", number, StreetName().fake::<String>())
}

pub fn city() -> String {
    CityName().fake()
}

pub fn zip_code() -> String {
    ZipCode().fake()
}

pub fn country() -> String {
    CountryName().fake()
}

pub fn phone_number() -> String {
    PhoneNumber().fake()
}

pub fn company_name() -> String {
    CompanyName().fake()
}

pub fn product_name() -> String {
    format!(
        "{} {}",
        Buzzword().fake::<String>(),
        BsNoun().fake::<String>()
    )
}

/// Full-range integer, the kind returned for a bare `integer` schema node.
pub fn integer() -> i64 {
    i64::from(rand::thread_rng().gen::<i32>())
}

/// Uniform float in `[0, 1)`.
pub fn number() -> f64 {
    rand::thread_rng().gen()
}

pub fn boolean() -> bool {
    rand::thread_rng().gen()
}

/// Uniform integer in `[lo, hi]`; bounds are reordered when reversed.
pub fn integer_between(lo: i64, hi: i64) -> i64 {
    let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
    rand::thread_rng().gen_range(lo..=hi)
}

/// Uniform float in `[lo, hi]`; bounds are reordered when reversed.
pub fn float_between(lo: f64, hi: f64) -> f64 {
    let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
    if lo == hi {
        return lo;
    }
    rand::thread_rng().gen_range(lo..=hi)
}

/// Random element count for generated arrays.
pub fn element_count() -> usize {
    rand::thread_rng().gen_range(1..=5)
}

/// Same-length random alphanumeric replacement for a literal string.
pub fn masked(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Pick one of the given choices.
pub fn pick<'a>(choices: &[&'a str]) -> &'a str {
    choices[rand::thread_rng().gen_range(0..choices.len())]
}

pub fn uuid() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// RFC 3339 instant up to a year in the past.
pub fn past_date() -> String {
    let offset = rand::thread_rng().gen_range(1..=365 * 24 * 60) as i64;
    (Utc::now() - Duration::minutes(offset)).to_rfc3339()
}

/// RFC 3339 instant up to a year in the future.
pub fn future_date() -> String {
    let offset = rand::thread_rng().gen_range(1..=365 * 24 * 60) as i64;
    (Utc::now() + Duration::minutes(offset)).to_rfc3339()
}

/// RFC 3339 instant within the last day.
pub fn recent_date() -> String {
    let offset = rand::thread_rng().gen_range(1..=24 * 60) as i64;
    (Utc::now() - Duration::minutes(offset)).to_rfc3339()
}

/// Currency amount with two decimals.
pub fn amount() -> f64 {
    let cents: i64 = rand::thread_rng().gen_range(1..=1_000_000);
    cents as f64 / 100.0
}

/// Price formatted with two decimals.
pub fn price() -> String {
    format!("{:.2}", float_between(1.0, 100.0))
}

/// Eight-digit account number.
pub fn account() -> String {
    let mut rng = rand::thread_rng();
    (0..8).map(|_| char::from(b'0' + rng.gen_range(0..10))).collect()
}

/// Placeholder-token table: `provider.method` token to value producer.
///
/// New tokens are additions to this table, not new code paths.
pub static PLACEHOLDERS: &[(&str, fn() -> Value)] = &[
    ("name.fullName", || json!(full_name())),
    ("name.firstName", || json!(first_name())),
    ("name.lastName", || json!(last_name())),
    ("internet.email", || json!(email())),
    ("internet.url", || json!(url())),
    ("internet.userName", || json!(username())),
    ("address.streetAddress", || json!(street_address())),
    ("address.city", || json!(city())),
    ("address.zipCode", || json!(zip_code())),
    ("address.country", || json!(country())),
    ("phone.phoneNumber", || json!(phone_number())),
    ("lorem.word", || json!(word())),
    ("lorem.sentence", || json!(sentence())),
    ("lorem.paragraph", || json!(paragraph())),
    ("date.past", || json!(past_date())),
    ("date.future", || json!(future_date())),
    ("date.recent", || json!(recent_date())),
    ("finance.amount", || json!(amount())),
    ("finance.account", || json!(account())),
    ("random.uuid", || json!(uuid())),
    ("random.number", || json!(integer_between(0, 1000))),
    ("commerce.price", || json!(price())),
    ("commerce.productName", || json!(product_name())),
    ("company.companyName", || json!(company_name())),
];

/// Resolve a recognized placeholder token to a generated value.
pub fn resolve_token(token: &str) -> Option<Value> {
    PLACEHOLDERS
        .iter()
        .find(|(name, _)| *name == token)
        .map(|(_, produce)| produce())
}
