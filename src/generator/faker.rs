//! Fake scalar values for generated entities
//!
//! [`FakeData`] is the seam: the stages only ask for "a name", "an address",
//! "a timestamp this year". [`EnglishFaker`] answers with the `fake` crate's
//! English-locale providers.

use super::ids::round_to;
use chrono::{DateTime, Datelike, TimeZone, Utc};
use fake::faker::address::en::{
    BuildingNumber, CityName, CountryName, Latitude, Longitude, StateAbbr, StreetName, ZipCode,
};
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::{Paragraph, Word, Words};
use fake::faker::name::en::{FirstName, Name};
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use rand::{Rng, RngCore};

/// Source of locale-plausible scalar values.
///
/// Every method draws from the supplied random source only, so a seeded
/// source reproduces the same values.
pub trait FakeData {
    fn person_name(&self, rng: &mut dyn RngCore) -> String;
    fn email(&self, rng: &mut dyn RngCore) -> String;
    fn phone_number(&self, rng: &mut dyn RngCore) -> String;
    /// Multi-line postal address
    fn address(&self, rng: &mut dyn RngCore) -> String;
    fn city(&self, rng: &mut dyn RngCore) -> String;
    fn country(&self, rng: &mut dyn RngCore) -> String;
    fn latitude(&self, rng: &mut dyn RngCore) -> f64;
    fn longitude(&self, rng: &mut dyn RngCore) -> f64;
    fn company(&self, rng: &mut dyn RngCore) -> String;
    fn company_email(&self, rng: &mut dyn RngCore) -> String;
    fn product_name(&self, rng: &mut dyn RngCore) -> String;
    /// Sentences of at most `max_chars` bytes
    fn text(&self, rng: &mut dyn RngCore, max_chars: usize) -> String;
    fn word(&self, rng: &mut dyn RngCore) -> String;
    /// Instant between the start of the current year and now
    fn date_time_this_year(&self, rng: &mut dyn RngCore) -> DateTime<Utc>;
    /// The generator's notion of "now"
    fn now(&self) -> DateTime<Utc>;
}

/// [`FakeData`] backed by `fake`'s `en` providers
#[derive(Debug, Clone)]
pub struct EnglishFaker {
    now: DateTime<Utc>,
}

impl EnglishFaker {
    /// Anchor "now" at the current wall-clock time
    pub fn new() -> Self {
        Self { now: Utc::now() }
    }

    /// Anchor "now" at a fixed instant, making timestamps reproducible
    pub fn anchored_at(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    fn start_of_year(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(self.now.year(), 1, 1, 0, 0, 0)
            .single()
            .unwrap_or(self.now)
    }
}

impl Default for EnglishFaker {
    fn default() -> Self {
        Self::new()
    }
}

/// Longest prefix of `text` that fits in `max` bytes
fn clip(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut cut = max;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    &text[..cut]
}

/// Lowercase ASCII alphanumerics only, for domain labels
fn slug(text: &str) -> String {
    text.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn capitalized(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// `fake_with_rng` is called with `&mut rng` where `rng: &mut dyn RngCore`,
// so the providers see a sized `&mut dyn RngCore` source.
impl FakeData for EnglishFaker {
    fn person_name(&self, mut rng: &mut dyn RngCore) -> String {
        Name().fake_with_rng(&mut rng)
    }

    fn email(&self, mut rng: &mut dyn RngCore) -> String {
        SafeEmail().fake_with_rng(&mut rng)
    }

    fn phone_number(&self, mut rng: &mut dyn RngCore) -> String {
        PhoneNumber().fake_with_rng(&mut rng)
    }

    fn address(&self, mut rng: &mut dyn RngCore) -> String {
        let number: String = BuildingNumber().fake_with_rng(&mut rng);
        let street: String = StreetName().fake_with_rng(&mut rng);
        let city: String = CityName().fake_with_rng(&mut rng);
        let state: String = StateAbbr().fake_with_rng(&mut rng);
        let zip: String = ZipCode().fake_with_rng(&mut rng);
        format!("{} {}\n{}, {} {}", number, street, city, state, zip)
    }

    fn city(&self, mut rng: &mut dyn RngCore) -> String {
        CityName().fake_with_rng(&mut rng)
    }

    fn country(&self, mut rng: &mut dyn RngCore) -> String {
        CountryName().fake_with_rng(&mut rng)
    }

    fn latitude(&self, mut rng: &mut dyn RngCore) -> f64 {
        let raw: String = Latitude().fake_with_rng(&mut rng);
        round_to(raw.parse::<f64>().unwrap_or_default().clamp(-90.0, 90.0), 6)
    }

    fn longitude(&self, mut rng: &mut dyn RngCore) -> f64 {
        let raw: String = Longitude().fake_with_rng(&mut rng);
        round_to(raw.parse::<f64>().unwrap_or_default().clamp(-180.0, 180.0), 6)
    }

    fn company(&self, mut rng: &mut dyn RngCore) -> String {
        CompanyName().fake_with_rng(&mut rng)
    }

    fn company_email(&self, mut rng: &mut dyn RngCore) -> String {
        let first: String = FirstName().fake_with_rng(&mut rng);
        let company: String = CompanyName().fake_with_rng(&mut rng);
        let mut domain = slug(&company);
        if domain.is_empty() {
            domain.push_str("company");
        }
        format!("{}@{}.example.com", slug(&first), domain)
    }

    fn product_name(&self, mut rng: &mut dyn RngCore) -> String {
        let words: Vec<String> = Words(2..4).fake_with_rng(&mut rng);
        words
            .iter()
            .map(|w| capitalized(w))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn text(&self, mut rng: &mut dyn RngCore, max_chars: usize) -> String {
        let paragraph: String = Paragraph(1..4).fake_with_rng(&mut rng);
        let clipped = clip(&paragraph, max_chars);
        if clipped.len() == paragraph.len() {
            return paragraph;
        }

        // End on a whole sentence, else on a whole word
        let text = match clipped.rfind('.') {
            Some(end) => &clipped[..=end],
            None => clipped
                .rfind(' ')
                .map(|end| &clipped[..end])
                .unwrap_or_default(),
        };
        if !text.trim().is_empty() {
            return text.trim_end().to_string();
        }

        let word: String = Word().fake_with_rng(&mut rng);
        clip(&word, max_chars).to_string()
    }

    fn word(&self, mut rng: &mut dyn RngCore) -> String {
        Word().fake_with_rng(&mut rng)
    }

    fn date_time_this_year(&self, rng: &mut dyn RngCore) -> DateTime<Utc> {
        let start = self.start_of_year().timestamp_millis();
        let end = self.now.timestamp_millis();
        if end <= start {
            return self.now;
        }
        let ms = rng.gen_range(start..=end);
        Utc.timestamp_millis_opt(ms).single().unwrap_or(self.now)
    }

    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn faker() -> EnglishFaker {
        EnglishFaker::anchored_at(Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap())
    }

    #[test]
    fn test_text_respects_max_chars() {
        let faker = faker();
        let mut rng = StdRng::seed_from_u64(1);
        for max in [1, 5, 20, 80, 200] {
            for _ in 0..50 {
                let text = faker.text(&mut rng, max);
                assert!(!text.is_empty());
                assert!(text.len() <= max, "{} > {}", text.len(), max);
            }
        }
    }

    #[test]
    fn test_clip_stays_on_char_boundary() {
        assert_eq!(clip("héllo", 2), "h");
        assert_eq!(clip("abc", 10), "abc");
        assert_eq!(clip("abc", 0), "");
    }

    #[test]
    fn test_dates_fall_in_current_year() {
        let faker = faker();
        let mut rng = StdRng::seed_from_u64(2);
        let start = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        for _ in 0..200 {
            let dt = faker.date_time_this_year(&mut rng);
            assert!(dt >= start && dt <= faker.now());
        }
    }

    #[test]
    fn test_coordinates_in_range() {
        let faker = faker();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            assert!((-90.0..=90.0).contains(&faker.latitude(&mut rng)));
            assert!((-180.0..=180.0).contains(&faker.longitude(&mut rng)));
        }
    }

    #[test]
    fn test_same_seed_same_values() {
        let faker = faker();
        let mut a = StdRng::seed_from_u64(4);
        let mut b = StdRng::seed_from_u64(4);
        assert_eq!(faker.person_name(&mut a), faker.person_name(&mut b));
        assert_eq!(faker.address(&mut a), faker.address(&mut b));
        assert_eq!(faker.text(&mut a, 200), faker.text(&mut b, 200));
        assert_eq!(faker.date_time_this_year(&mut a), faker.date_time_this_year(&mut b));
    }

    #[test]
    fn test_shapes() {
        let faker = faker();
        let mut rng = StdRng::seed_from_u64(5);
        assert!(faker.email(&mut rng).contains('@'));
        let company_email = faker.company_email(&mut rng);
        assert!(company_email.contains('@'));
        assert!(company_email.ends_with(".example.com"));
        assert!(faker.address(&mut rng).contains('\n'));
        assert!(!faker.phone_number(&mut rng).is_empty());
        assert!((2..4).contains(&faker.product_name(&mut rng).split(' ').count()));
        assert!(!faker.word(&mut rng).is_empty());
    }
}
