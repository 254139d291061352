use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::keywords::KeywordChips;

/// Fixed option sets rendered as menus by front-ends.
pub trait ChoiceOption: Copy + PartialEq + Sized + 'static {
    fn all() -> &'static [Self];

    /// Human readable label shown in menus.
    fn label(&self) -> &'static str;

    /// Serialized value.
    fn wire(&self) -> &'static str;

    /// Resolves either the label or the wire value, ignoring case.
    fn parse(value: &str) -> Option<Self> {
        let needle = value.trim();
        Self::all().iter().copied().find(|option| {
            option.label().eq_ignore_ascii_case(needle) || option.wire().eq_ignore_ascii_case(needle)
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocalLanguage {
    #[default]
    English,
    Thai,
    Japanese,
    #[serde(rename = "Simplified Chinese")]
    SimplifiedChinese,
    #[serde(rename = "Traditional Chinese")]
    TraditionalChinese,
}

impl ChoiceOption for LocalLanguage {
    fn all() -> &'static [Self] {
        &[
            LocalLanguage::English,
            LocalLanguage::Thai,
            LocalLanguage::Japanese,
            LocalLanguage::SimplifiedChinese,
            LocalLanguage::TraditionalChinese,
        ]
    }

    fn label(&self) -> &'static str {
        self.wire()
    }

    fn wire(&self) -> &'static str {
        match self {
            LocalLanguage::English => "English",
            LocalLanguage::Thai => "Thai",
            LocalLanguage::Japanese => "Japanese",
            LocalLanguage::SimplifiedChinese => "Simplified Chinese",
            LocalLanguage::TraditionalChinese => "Traditional Chinese",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonPeriod {
    #[default]
    PreviousPeriod,
    PreviousYear,
    None,
}

impl ChoiceOption for ComparisonPeriod {
    fn all() -> &'static [Self] {
        &[
            ComparisonPeriod::PreviousPeriod,
            ComparisonPeriod::PreviousYear,
            ComparisonPeriod::None,
        ]
    }

    fn label(&self) -> &'static str {
        match self {
            ComparisonPeriod::PreviousPeriod => "Previous Period (e.g. previous 30 days)",
            ComparisonPeriod::PreviousYear => "Previous Year (YoY)",
            ComparisonPeriod::None => "No Comparison",
        }
    }

    fn wire(&self) -> &'static str {
        match self {
            ComparisonPeriod::PreviousPeriod => "previous_period",
            ComparisonPeriod::PreviousYear => "previous_year",
            ComparisonPeriod::None => "none",
        }
    }
}

/// Online travel agencies a listing can be linked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Ota {
    #[serde(rename = "Booking.com")]
    BookingCom,
    Agoda,
    Expedia,
    Other,
}

impl Ota {
    /// Example listing URL shown as a placeholder.
    pub fn placeholder(&self) -> &'static str {
        match self {
            Ota::BookingCom => "https://www.booking.com/...",
            Ota::Agoda => "https://www.agoda.com/...",
            Ota::Expedia => "https://www.expedia.com/...",
            Ota::Other => "https://...",
        }
    }
}

impl ChoiceOption for Ota {
    fn all() -> &'static [Self] {
        &[Ota::BookingCom, Ota::Agoda, Ota::Expedia, Ota::Other]
    }

    fn label(&self) -> &'static str {
        self.wire()
    }

    fn wire(&self) -> &'static str {
        match self {
            Ota::BookingCom => "Booking.com",
            Ota::Agoda => "Agoda",
            Ota::Expedia => "Expedia",
            Ota::Other => "Other",
        }
    }
}

impl fmt::Display for Ota {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecentChanges {
    Yes,
    No,
}

impl ChoiceOption for RecentChanges {
    fn all() -> &'static [Self] {
        &[RecentChanges::Yes, RecentChanges::No]
    }

    fn label(&self) -> &'static str {
        self.wire()
    }

    fn wire(&self) -> &'static str {
        match self {
            RecentChanges::Yes => "Yes",
            RecentChanges::No => "No",
        }
    }
}

/// Optional social media references. None of these are validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiktok: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagged_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiktok_search_url: Option<String>,
}

impl SocialLinks {
    fn merge(&mut self, other: SocialLinks) {
        merge_option(&mut self.instagram, other.instagram);
        merge_option(&mut self.facebook, other.facebook);
        merge_option(&mut self.tiktok, other.tiktok);
        merge_option(&mut self.youtube, other.youtube);
        merge_option(&mut self.tagged_location, other.tagged_location);
        merge_option(&mut self.tiktok_search_url, other.tiktok_search_url);
    }

    /// Number of links that carry a non-blank value.
    pub fn filled(&self) -> usize {
        [
            &self.instagram,
            &self.facebook,
            &self.tiktok,
            &self.youtube,
            &self.tagged_location,
            &self.tiktok_search_url,
        ]
        .into_iter()
        .filter(|value| value.as_deref().is_some_and(|v| !v.trim().is_empty()))
        .count()
    }
}

/// Free-text internal context captured on the last step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextNotes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_guest_issues: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recent_changes: Option<RecentChanges>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recent_changes_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
}

impl ContextNotes {
    fn merge(&mut self, other: ContextNotes) {
        merge_option(&mut self.top_guest_issues, other.top_guest_issues);
        merge_option(&mut self.recent_changes, other.recent_changes);
        merge_option(&mut self.recent_changes_notes, other.recent_changes_notes);
        merge_option(&mut self.additional_notes, other.additional_notes);
    }
}

fn merge_option<T>(slot: &mut Option<T>, incoming: Option<T>) {
    if incoming.is_some() {
        *slot = incoming;
    }
}

/// Aggregate of everything collected across the wizard steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormRecord {
    pub hotel_name: String,
    pub brand: String,
    pub country: String,
    pub city: String,
    pub keywords: KeywordChips,
    pub local_language: LocalLanguage,
    pub start_date: String,
    pub end_date: String,
    pub comparison_period: ComparisonPeriod,
    pub google_maps_url: String,
    pub trip_advisor_url: String,
    #[serde(rename = "selectedOTAs", deserialize_with = "deserialize_otas")]
    pub selected_otas: Vec<Ota>,
    pub ota_urls: BTreeMap<Ota, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_reviews: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<String>,
    pub social_links: SocialLinks,
    pub notes: ContextNotes,
}

impl FormRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh record seeded with the two preference-driven defaults.
    pub fn with_defaults(language: LocalLanguage, comparison: ComparisonPeriod) -> Self {
        Self {
            local_language: language,
            comparison_period: comparison,
            ..Self::default()
        }
    }

    /// Merges `patch` into the record. Only the fields carried by the patch change.
    pub fn apply(&mut self, patch: FormPatch) {
        let FormPatch {
            hotel_name,
            brand,
            country,
            city,
            keywords,
            local_language,
            start_date,
            end_date,
            comparison_period,
            google_maps_url,
            trip_advisor_url,
            selected_otas,
            ota_urls,
            total_reviews,
            average_rating,
            social_links,
            notes,
        } = patch;

        merge_value(&mut self.hotel_name, hotel_name);
        merge_value(&mut self.brand, brand);
        merge_value(&mut self.country, country);
        merge_value(&mut self.city, city);
        merge_value(&mut self.keywords, keywords);
        merge_value(&mut self.local_language, local_language);
        merge_value(&mut self.start_date, start_date);
        merge_value(&mut self.end_date, end_date);
        merge_value(&mut self.comparison_period, comparison_period);
        merge_value(&mut self.google_maps_url, google_maps_url);
        merge_value(&mut self.trip_advisor_url, trip_advisor_url);
        merge_value(&mut self.selected_otas, selected_otas.map(unique_otas));
        self.ota_urls.extend(ota_urls);
        merge_option(&mut self.total_reviews, total_reviews);
        merge_option(&mut self.average_rating, average_rating);
        if let Some(links) = social_links {
            self.social_links.merge(links);
        }
        if let Some(notes) = notes {
            self.notes.merge(notes);
        }
    }

    pub fn is_ota_selected(&self, ota: Ota) -> bool {
        self.selected_otas.contains(&ota)
    }

    /// Selection list after toggling `ota`, preserving selection order.
    pub fn toggled_otas(&self, ota: Ota) -> Vec<Ota> {
        if self.is_ota_selected(ota) {
            self.selected_otas
                .iter()
                .copied()
                .filter(|candidate| *candidate != ota)
                .collect()
        } else {
            let mut next = self.selected_otas.clone();
            next.push(ota);
            next
        }
    }

    pub fn ota_url(&self, ota: Ota) -> Option<&str> {
        self.ota_urls.get(&ota).map(String::as_str)
    }
}

/// Drops repeated OTAs, keeping the first occurrence's position.
fn unique_otas(otas: Vec<Ota>) -> Vec<Ota> {
    let mut unique = Vec::with_capacity(otas.len());
    for ota in otas {
        if !unique.contains(&ota) {
            unique.push(ota);
        }
    }
    unique
}

fn deserialize_otas<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Ota>, D::Error> {
    Vec::<Ota>::deserialize(deserializer).map(unique_otas)
}

fn merge_value<T>(slot: &mut T, incoming: Option<T>) {
    if let Some(value) = incoming {
        *slot = value;
    }
}

/// Partial update produced by a step panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormPatch {
    pub hotel_name: Option<String>,
    pub brand: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub keywords: Option<KeywordChips>,
    pub local_language: Option<LocalLanguage>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub comparison_period: Option<ComparisonPeriod>,
    pub google_maps_url: Option<String>,
    pub trip_advisor_url: Option<String>,
    pub selected_otas: Option<Vec<Ota>>,
    pub ota_urls: BTreeMap<Ota, String>,
    pub total_reviews: Option<String>,
    pub average_rating: Option<String>,
    pub social_links: Option<SocialLinks>,
    pub notes: Option<ContextNotes>,
}

impl FormPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn hotel_name(mut self, value: impl Into<String>) -> Self {
        self.hotel_name = Some(value.into());
        self
    }

    pub fn brand(mut self, value: impl Into<String>) -> Self {
        self.brand = Some(value.into());
        self
    }

    pub fn country(mut self, value: impl Into<String>) -> Self {
        self.country = Some(value.into());
        self
    }

    pub fn city(mut self, value: impl Into<String>) -> Self {
        self.city = Some(value.into());
        self
    }

    pub fn keywords(mut self, value: KeywordChips) -> Self {
        self.keywords = Some(value);
        self
    }

    pub fn local_language(mut self, value: LocalLanguage) -> Self {
        self.local_language = Some(value);
        self
    }

    pub fn start_date(mut self, value: impl Into<String>) -> Self {
        self.start_date = Some(value.into());
        self
    }

    pub fn end_date(mut self, value: impl Into<String>) -> Self {
        self.end_date = Some(value.into());
        self
    }

    pub fn comparison_period(mut self, value: ComparisonPeriod) -> Self {
        self.comparison_period = Some(value);
        self
    }

    pub fn google_maps_url(mut self, value: impl Into<String>) -> Self {
        self.google_maps_url = Some(value.into());
        self
    }

    pub fn trip_advisor_url(mut self, value: impl Into<String>) -> Self {
        self.trip_advisor_url = Some(value.into());
        self
    }

    pub fn selected_otas(mut self, value: Vec<Ota>) -> Self {
        self.selected_otas = Some(value);
        self
    }

    pub fn ota_url(mut self, ota: Ota, value: impl Into<String>) -> Self {
        self.ota_urls.insert(ota, value.into());
        self
    }

    pub fn total_reviews(mut self, value: impl Into<String>) -> Self {
        self.total_reviews = Some(value.into());
        self
    }

    pub fn average_rating(mut self, value: impl Into<String>) -> Self {
        self.average_rating = Some(value.into());
        self
    }

    pub fn social_links(mut self, value: SocialLinks) -> Self {
        self.social_links = Some(value);
        self
    }

    pub fn notes(mut self, value: ContextNotes) -> Self {
        self.notes = Some(value);
        self
    }
}
