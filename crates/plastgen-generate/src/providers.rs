//! Domain value providers: stateless functions that turn randomness into
//! semantically plausible attribute values. Pure given the RNG; no errors.

use chrono::{Days, NaiveDate, NaiveTime};
use fake::Fake;
use fake::faker::address::en::{BuildingNumber, CityName, PostCode, StreetName};
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::FreeEmail;
use fake::faker::name::en::Name;
use rand::Rng;

use plastgen_core::PlasticCategory;

const PRODUCT_PREFIXES: [&str; 5] = [
    "Flexible",
    "Rigid",
    "Durable",
    "High-Performance",
    "Eco-Friendly",
];
const PRODUCT_MATERIALS: [&str; 5] = [
    "Polyethylene",
    "Polypropylene",
    "Polyvinyl Chloride",
    "Polystyrene",
    "Polyethylene Terephthalate",
];
const PRODUCT_FORMS: [&str; 9] = [
    "Container",
    "Bottle",
    "Packaging",
    "Film",
    "Sheet",
    "Tube",
    "Pipe",
    "Injection Molded Product",
    "Extruded Product",
];
const MATERIAL_MODIFIERS: [&str; 5] = [
    "High-Quality",
    "Recycled",
    "Virgin",
    "Industrial Grade",
    "Biodegradable",
];
const MATERIAL_NAMES: [&str; 5] = [
    "Polyethylene Resin",
    "Polypropylene Granules",
    "PVC Polymer",
    "Polystyrene Beads",
    "PET Pellets",
];

/// Earliest date produced by [`past_date`]; the window spans ten years.
const DATE_WINDOW_START: (i32, u32, u32) = (2015, 1, 1);
const DATE_WINDOW_DAYS: u64 = 3_650;

pub fn full_name<R: Rng>(rng: &mut R) -> String {
    Name().fake_with_rng(rng)
}

pub fn email<R: Rng>(rng: &mut R) -> String {
    FreeEmail().fake_with_rng(rng)
}

pub fn street_address<R: Rng>(rng: &mut R) -> String {
    let number: String = BuildingNumber().fake_with_rng(rng);
    let street: String = StreetName().fake_with_rng(rng);
    let city: String = CityName().fake_with_rng(rng);
    let postcode: String = PostCode().fake_with_rng(rng);
    format!("{number} {street}, {city} {postcode}")
}

pub fn company_name<R: Rng>(rng: &mut R) -> String {
    CompanyName().fake_with_rng(rng)
}

/// Nine-digit Peru mobile number (prefix 9).
pub fn phone_number<R: Rng>(rng: &mut R) -> String {
    rng.random_range(900_000_000..=999_999_999u32).to_string()
}

pub fn plastic_category<R: Rng>(rng: &mut R) -> PlasticCategory {
    PlasticCategory::ALL[rng.random_range(0..PlasticCategory::ALL.len())]
}

/// Combinatorial product name: prefix x material x form.
pub fn product_name<R: Rng>(rng: &mut R) -> String {
    format!(
        "{} {} {}",
        pick(&PRODUCT_PREFIXES, rng),
        pick(&PRODUCT_MATERIALS, rng),
        pick(&PRODUCT_FORMS, rng)
    )
}

/// Combinatorial raw-material name: modifier x material.
pub fn raw_material_name<R: Rng>(rng: &mut R) -> String {
    format!("{} {}", pick(&MATERIAL_MODIFIERS, rng), pick(&MATERIAL_NAMES, rng))
}

/// Random date within the fixed ten-year window.
pub fn past_date<R: Rng>(rng: &mut R) -> NaiveDate {
    let (y, m, d) = DATE_WINDOW_START;
    let start = NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();
    start + Days::new(rng.random_range(0..DATE_WINDOW_DAYS))
}

/// Random time of day with second resolution.
pub fn clock_time<R: Rng>(rng: &mut R) -> NaiveTime {
    NaiveTime::from_num_seconds_from_midnight_opt(rng.random_range(0..86_400), 0)
        .unwrap_or_default()
}

/// Non-negative integer with at most `max_digits` decimal digits. Used for
/// monetary amounts, stock levels, and costs.
pub fn amount<R: Rng>(rng: &mut R, max_digits: u32) -> i64 {
    rng.random_range(0..10i64.pow(max_digits))
}

/// Like [`amount`], but with a floor of 1: relationship quantities must be
/// strictly positive.
pub fn quantity<R: Rng>(rng: &mut R, max_digits: u32) -> i64 {
    rng.random_range(1..10i64.pow(max_digits))
}

fn pick<'a, R: Rng>(values: &[&'a str], rng: &mut R) -> &'a str {
    values[rng.random_range(0..values.len())]
}
