//! Field-by-field entry for the four wizard step panels.
//!
//! A panel's field list is recomputed from the record after every answer, so
//! fields that depend on earlier answers (OTA listing URLs, the description of
//! recent changes) appear as soon as they apply. Accepted answers are pushed
//! into the [`WizardController`] as [`FormPatch`]es; panels never hold a copy
//! of the record.

use std::collections::BTreeSet;

use crate::cli::output;
use crate::cli::ui::prompts::{parse_yes_no, suggest};
use crate::domain::{
    ChoiceOption, ComparisonPeriod, ContextNotes, FormPatch, FormRecord, LocalLanguage, Ota,
    RecentChanges, SocialLinks,
};
use crate::wizard::validation::{
    is_blank, parse_date, provider_url_ok, GOOGLE_MAPS_HOST, TRIPADVISOR_HOST,
};
use crate::wizard::{StepReport, SubmissionCollaborator, ValidationError, WizardController, WizardStep};

/// Describes how prompts can be answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResponse {
    /// User supplied a concrete value.
    Value(String),
    /// User chose to keep the current value.
    Keep,
    /// Abort the whole wizard.
    Cancel,
    /// Go back to the previous field; on a keyword list, drop the last chip.
    Back,
    /// Request additional information for the current field.
    Help,
}

/// Responses accepted before the record is handed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationResponse {
    Confirm,
    Back,
    Cancel,
}

/// Groups of optional fields that stay collapsed until asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Section {
    ReviewTotals,
    SocialLinks,
    ContextNotes,
}

impl Section {
    pub fn question(self) -> &'static str {
        match self {
            Section::ReviewTotals => "Add total reviews and average rating?",
            Section::SocialLinks => "Add social media links?",
            Section::ContextNotes => "Add internal context notes?",
        }
    }

    fn has_data(self, record: &FormRecord) -> bool {
        match self {
            Section::ReviewTotals => {
                record.total_reviews.is_some() || record.average_rating.is_some()
            }
            Section::SocialLinks => record.social_links.filled() > 0,
            Section::ContextNotes => record.notes != ContextNotes::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Date,
    Url,
    Number,
    Choice(Vec<String>),
    /// Repeated entry into a keyword list; a blank answer finishes.
    Chips,
    /// Repeated selection that toggles entries on and off; a blank answer finishes.
    Toggles(Vec<String>),
    /// Yes/no question that expands an optional section.
    Gate(Section),
}

/// Binds a field to its slot in the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKey {
    HotelName,
    Brand,
    Country,
    City,
    Keywords,
    LocalLanguage,
    StartDate,
    EndDate,
    ComparisonPeriod,
    GoogleMapsUrl,
    TripAdvisorUrl,
    SelectedOtas,
    OtaUrl(Ota),
    TotalReviews,
    AverageRating,
    Instagram,
    Facebook,
    Tiktok,
    Youtube,
    TaggedLocation,
    TiktokSearchUrl,
    TopGuestIssues,
    RecentChanges,
    RecentChangesNotes,
    AdditionalNotes,
    Section(Section),
}

impl FieldKey {
    /// Current value rendered for display, if any.
    pub fn current(self, record: &FormRecord) -> Option<String> {
        let text = |value: &str| (!is_blank(value)).then(|| value.to_string());
        let optional = |value: &Option<String>| value.as_deref().and_then(text);
        match self {
            FieldKey::HotelName => text(&record.hotel_name),
            FieldKey::Brand => text(&record.brand),
            FieldKey::Country => text(&record.country),
            FieldKey::City => text(&record.city),
            FieldKey::Keywords => (!record.keywords.is_empty())
                .then(|| record.keywords.iter().collect::<Vec<_>>().join(", ")),
            FieldKey::LocalLanguage => Some(record.local_language.label().to_string()),
            FieldKey::StartDate => text(&record.start_date),
            FieldKey::EndDate => text(&record.end_date),
            FieldKey::ComparisonPeriod => Some(record.comparison_period.label().to_string()),
            FieldKey::GoogleMapsUrl => text(&record.google_maps_url),
            FieldKey::TripAdvisorUrl => text(&record.trip_advisor_url),
            FieldKey::SelectedOtas => (!record.selected_otas.is_empty()).then(|| {
                record
                    .selected_otas
                    .iter()
                    .map(|ota| ota.label())
                    .collect::<Vec<_>>()
                    .join(", ")
            }),
            FieldKey::OtaUrl(ota) => record.ota_url(ota).and_then(text),
            FieldKey::TotalReviews => optional(&record.total_reviews),
            FieldKey::AverageRating => optional(&record.average_rating),
            FieldKey::Instagram => optional(&record.social_links.instagram),
            FieldKey::Facebook => optional(&record.social_links.facebook),
            FieldKey::Tiktok => optional(&record.social_links.tiktok),
            FieldKey::Youtube => optional(&record.social_links.youtube),
            FieldKey::TaggedLocation => optional(&record.social_links.tagged_location),
            FieldKey::TiktokSearchUrl => optional(&record.social_links.tiktok_search_url),
            FieldKey::TopGuestIssues => optional(&record.notes.top_guest_issues),
            FieldKey::RecentChanges => record
                .notes
                .recent_changes
                .map(|answer| answer.label().to_string()),
            FieldKey::RecentChangesNotes => optional(&record.notes.recent_changes_notes),
            FieldKey::AdditionalNotes => optional(&record.notes.additional_notes),
            FieldKey::Section(_) => None,
        }
    }

    /// Patch storing a free-text answer. `None` for keys that are not plain text.
    fn text_patch(self, value: String) -> Option<FormPatch> {
        let patch = FormPatch::new();
        let social = |links: SocialLinks| Some(FormPatch::new().social_links(links));
        let notes = |notes: ContextNotes| Some(FormPatch::new().notes(notes));
        match self {
            FieldKey::HotelName => Some(patch.hotel_name(value)),
            FieldKey::Brand => Some(patch.brand(value)),
            FieldKey::Country => Some(patch.country(value)),
            FieldKey::City => Some(patch.city(value)),
            FieldKey::StartDate => Some(patch.start_date(value)),
            FieldKey::EndDate => Some(patch.end_date(value)),
            FieldKey::GoogleMapsUrl => Some(patch.google_maps_url(value)),
            FieldKey::TripAdvisorUrl => Some(patch.trip_advisor_url(value)),
            FieldKey::OtaUrl(ota) => Some(patch.ota_url(ota, value)),
            FieldKey::TotalReviews => Some(patch.total_reviews(value)),
            FieldKey::AverageRating => Some(patch.average_rating(value)),
            FieldKey::Instagram => social(SocialLinks {
                instagram: Some(value),
                ..SocialLinks::default()
            }),
            FieldKey::Facebook => social(SocialLinks {
                facebook: Some(value),
                ..SocialLinks::default()
            }),
            FieldKey::Tiktok => social(SocialLinks {
                tiktok: Some(value),
                ..SocialLinks::default()
            }),
            FieldKey::Youtube => social(SocialLinks {
                youtube: Some(value),
                ..SocialLinks::default()
            }),
            FieldKey::TaggedLocation => social(SocialLinks {
                tagged_location: Some(value),
                ..SocialLinks::default()
            }),
            FieldKey::TiktokSearchUrl => social(SocialLinks {
                tiktok_search_url: Some(value),
                ..SocialLinks::default()
            }),
            FieldKey::TopGuestIssues => notes(ContextNotes {
                top_guest_issues: Some(value),
                ..ContextNotes::default()
            }),
            FieldKey::RecentChangesNotes => notes(ContextNotes {
                recent_changes_notes: Some(value),
                ..ContextNotes::default()
            }),
            FieldKey::AdditionalNotes => notes(ContextNotes {
                additional_notes: Some(value),
                ..ContextNotes::default()
            }),
            _ => None,
        }
    }

    fn choice_patch(self, raw: &str) -> Option<FormPatch> {
        match self {
            FieldKey::LocalLanguage => {
                resolve_choice::<LocalLanguage>(raw).map(|value| FormPatch::new().local_language(value))
            }
            FieldKey::ComparisonPeriod => resolve_choice::<ComparisonPeriod>(raw)
                .map(|value| FormPatch::new().comparison_period(value)),
            FieldKey::RecentChanges => resolve_choice::<RecentChanges>(raw).map(|value| {
                FormPatch::new().notes(ContextNotes {
                    recent_changes: Some(value),
                    ..ContextNotes::default()
                })
            }),
            _ => None,
        }
    }

    /// Whether `issue` from a step report points at this field.
    fn matches_issue(self, record: &FormRecord, issue: &ValidationError) -> bool {
        match self {
            FieldKey::HotelName => issue.field == "hotel_name",
            FieldKey::Brand => issue.field == "brand",
            FieldKey::Country => issue.field == "country",
            FieldKey::City => issue.field == "city",
            FieldKey::Keywords => issue.field == "keywords",
            FieldKey::StartDate => issue.field == "start_date" || issue.field == "date_range",
            FieldKey::EndDate => issue.field == "end_date",
            FieldKey::GoogleMapsUrl => issue.field == "google_maps_url",
            FieldKey::TripAdvisorUrl => issue.field == "trip_advisor_url",
            FieldKey::OtaUrl(ota) => {
                issue.field == "ota_urls" && record.ota_url(ota).map_or(true, is_blank)
            }
            _ => false,
        }
    }
}

/// Accepts a label, a wire value or a 1-based menu number.
pub fn resolve_choice<T: ChoiceOption>(raw: &str) -> Option<T> {
    let trimmed = raw.trim();
    if let Ok(number) = trimmed.parse::<usize>() {
        return number.checked_sub(1).and_then(|index| T::all().get(index)).copied();
    }
    T::parse(trimmed)
}

pub fn choice_labels<T: ChoiceOption>() -> Vec<String> {
    T::all().iter().map(|option| option.label().to_string()).collect()
}

/// Declarative description of a single form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub key: FieldKey,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    pub help: Option<&'static str>,
    pub placeholder: Option<&'static str>,
}

impl FieldDescriptor {
    pub fn new(key: FieldKey, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            key,
            label: label.into(),
            kind,
            required: true,
            help: None,
            placeholder: None,
        }
    }

    pub fn with_optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }

    pub fn with_placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }
}

/// Everything an interaction needs to render one prompt.
pub struct PromptContext<'a> {
    pub step: WizardStep,
    pub descriptor: &'a FieldDescriptor,
    pub current: Option<String>,
    pub index: usize,
    pub total: usize,
}

/// Interaction surface used by the panels. The terminal implementation lives
/// in the shell; tests drive panels with queued responses.
pub trait FormInteraction {
    fn prompt_field(&mut self, context: &PromptContext<'_>) -> PromptResponse;

    fn confirm(&mut self, summary: &[String]) -> ConfirmationResponse;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelOutcome {
    Completed,
    /// Back was requested on the first field.
    Back,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldEvent {
    Advance,
    Repeat,
    Back,
    Cancel,
}

/// Field walk for one wizard step.
pub struct StepPanel {
    step: WizardStep,
    expand_optional: bool,
    opened: BTreeSet<Section>,
}

impl StepPanel {
    /// Sections that already hold data start expanded.
    pub fn new(step: WizardStep, record: &FormRecord, expand_optional: bool) -> Self {
        let opened = [Section::ReviewTotals, Section::SocialLinks, Section::ContextNotes]
            .into_iter()
            .filter(|section| section.has_data(record))
            .collect();
        Self {
            step,
            expand_optional,
            opened,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    fn is_open(&self, section: Section) -> bool {
        self.expand_optional || self.opened.contains(&section)
    }

    fn push_section(
        &self,
        fields: &mut Vec<FieldDescriptor>,
        section: Section,
        body: impl FnOnce(&mut Vec<FieldDescriptor>),
    ) {
        if !self.expand_optional {
            fields.push(
                FieldDescriptor::new(FieldKey::Section(section), section.question(), FieldKind::Gate(section))
                    .with_optional(),
            );
        }
        if self.is_open(section) {
            body(fields);
        }
    }

    /// Fields currently shown for this step, in prompt order.
    pub fn fields(&self, record: &FormRecord) -> Vec<FieldDescriptor> {
        let mut fields = Vec::new();
        match self.step {
            WizardStep::Property => {
                fields.push(
                    FieldDescriptor::new(FieldKey::HotelName, "Hotel name", FieldKind::Text)
                        .with_placeholder("Grand Resort & Spa"),
                );
                fields.push(
                    FieldDescriptor::new(FieldKey::Brand, "Brand", FieldKind::Text)
                        .with_help("Chain or brand name; use \"Independent\" if there is none.")
                        .with_placeholder("Independent"),
                );
                fields.push(FieldDescriptor::new(FieldKey::Country, "Country", FieldKind::Text));
                fields.push(FieldDescriptor::new(FieldKey::City, "City/Area", FieldKind::Text));
                fields.push(
                    FieldDescriptor::new(FieldKey::Keywords, "Search keywords", FieldKind::Chips)
                        .with_help(
                            "Names guests use to find the hotel. Add at least 2. Enter a blank \
                             line when done; :back removes the last keyword.",
                        ),
                );
                fields.push(FieldDescriptor::new(
                    FieldKey::LocalLanguage,
                    "Local language",
                    FieldKind::Choice(choice_labels::<LocalLanguage>()),
                ));
            }
            WizardStep::TimePeriod => {
                fields.push(
                    FieldDescriptor::new(FieldKey::StartDate, "Start date", FieldKind::Date)
                        .with_placeholder("YYYY-MM-DD"),
                );
                fields.push(
                    FieldDescriptor::new(FieldKey::EndDate, "End date", FieldKind::Date)
                        .with_help("At most 180 days after the start date.")
                        .with_placeholder("YYYY-MM-DD"),
                );
                fields.push(FieldDescriptor::new(
                    FieldKey::ComparisonPeriod,
                    "Compare against",
                    FieldKind::Choice(choice_labels::<ComparisonPeriod>()),
                ));
            }
            WizardStep::Reviews => {
                fields.push(
                    FieldDescriptor::new(FieldKey::GoogleMapsUrl, "Google Maps URL", FieldKind::Url)
                        .with_placeholder("https://www.google.com/maps/place/..."),
                );
                fields.push(
                    FieldDescriptor::new(FieldKey::TripAdvisorUrl, "TripAdvisor URL", FieldKind::Url)
                        .with_placeholder("https://www.tripadvisor.com/Hotel_Review-..."),
                );
                fields.push(
                    FieldDescriptor::new(
                        FieldKey::SelectedOtas,
                        "OTA listings",
                        FieldKind::Toggles(choice_labels::<Ota>()),
                    )
                    .with_optional()
                    .with_help("Select an OTA to toggle it. Enter a blank line when done."),
                );
                for ota in &record.selected_otas {
                    fields.push(
                        FieldDescriptor::new(
                            FieldKey::OtaUrl(*ota),
                            format!("{} URL", ota.label()),
                            FieldKind::Text,
                        )
                        .with_placeholder(ota.placeholder()),
                    );
                }
                self.push_section(&mut fields, Section::ReviewTotals, |fields| {
                    fields.push(
                        FieldDescriptor::new(FieldKey::TotalReviews, "Total reviews", FieldKind::Number)
                            .with_optional(),
                    );
                    fields.push(
                        FieldDescriptor::new(FieldKey::AverageRating, "Average rating", FieldKind::Number)
                            .with_optional()
                            .with_placeholder("4.5"),
                    );
                });
            }
            WizardStep::Social => {
                self.push_section(&mut fields, Section::SocialLinks, |fields| {
                    let links = [
                        (FieldKey::Instagram, "Instagram"),
                        (FieldKey::Facebook, "Facebook"),
                        (FieldKey::Tiktok, "TikTok"),
                        (FieldKey::Youtube, "YouTube"),
                        (FieldKey::TaggedLocation, "Tagged location"),
                        (FieldKey::TiktokSearchUrl, "TikTok search URL"),
                    ];
                    for (key, label) in links {
                        fields.push(FieldDescriptor::new(key, label, FieldKind::Text).with_optional());
                    }
                });
                self.push_section(&mut fields, Section::ContextNotes, |fields| {
                    fields.push(
                        FieldDescriptor::new(FieldKey::TopGuestIssues, "Top guest issues", FieldKind::Text)
                            .with_optional()
                            .with_help("What guests complain about most, in your own words."),
                    );
                    fields.push(
                        FieldDescriptor::new(
                            FieldKey::RecentChanges,
                            "Any recent renovations or changes?",
                            FieldKind::Choice(choice_labels::<RecentChanges>()),
                        )
                        .with_optional(),
                    );
                    if record.notes.recent_changes == Some(RecentChanges::Yes) {
                        fields.push(
                            FieldDescriptor::new(
                                FieldKey::RecentChangesNotes,
                                "Describe the changes",
                                FieldKind::Text,
                            )
                            .with_optional(),
                        );
                    }
                    fields.push(
                        FieldDescriptor::new(FieldKey::AdditionalNotes, "Additional notes", FieldKind::Text)
                            .with_optional(),
                    );
                });
            }
        }
        fields
    }

    /// Index of the first field named by `report`, so a blocked step resumes
    /// where the problem is.
    pub fn first_issue_index(&self, record: &FormRecord, report: &StepReport) -> usize {
        self.fields(record)
            .iter()
            .position(|field| {
                report
                    .issues
                    .iter()
                    .any(|issue| field.key.matches_issue(record, issue))
            })
            .unwrap_or(0)
    }

    /// Prompts fields from `start` until the list is exhausted, Back leaves the
    /// first field, or the user cancels.
    pub fn run<I: FormInteraction, S: SubmissionCollaborator>(
        &mut self,
        controller: &mut WizardController<S>,
        interaction: &mut I,
        start: usize,
    ) -> PanelOutcome {
        let mut index = start;
        loop {
            let fields = self.fields(controller.record());
            let Some(field) = fields.get(index) else {
                return PanelOutcome::Completed;
            };
            let current = match field.kind {
                FieldKind::Gate(section) => {
                    Some(if self.is_open(section) { "Yes" } else { "No" }.to_string())
                }
                _ => field.key.current(controller.record()),
            };
            let context = PromptContext {
                step: self.step,
                descriptor: field,
                current,
                index,
                total: fields.len(),
            };
            let response = interaction.prompt_field(&context);
            match self.apply_response(field, response, controller) {
                FieldEvent::Advance => index += 1,
                FieldEvent::Repeat => {}
                FieldEvent::Back if index == 0 => return PanelOutcome::Back,
                FieldEvent::Back => index -= 1,
                FieldEvent::Cancel => return PanelOutcome::Cancelled,
            }
        }
    }

    fn apply_response<S: SubmissionCollaborator>(
        &mut self,
        field: &FieldDescriptor,
        response: PromptResponse,
        controller: &mut WizardController<S>,
    ) -> FieldEvent {
        match response {
            PromptResponse::Cancel => FieldEvent::Cancel,
            PromptResponse::Help => {
                output::info(field.help.unwrap_or("No additional information available for this field."));
                FieldEvent::Repeat
            }
            PromptResponse::Back => match field.kind {
                FieldKind::Chips if !controller.record().keywords.is_empty() => {
                    let mut keywords = controller.record().keywords.clone();
                    if let Some(removed) = keywords.remove_last() {
                        output::info(format!("Removed keyword `{removed}`."));
                    }
                    controller.update(FormPatch::new().keywords(keywords));
                    FieldEvent::Repeat
                }
                _ => FieldEvent::Back,
            },
            PromptResponse::Keep => self.keep(field, controller.record()),
            PromptResponse::Value(raw) => self.accept(field, raw, controller),
        }
    }

    fn keep(&self, field: &FieldDescriptor, record: &FormRecord) -> FieldEvent {
        if matches!(field.kind, FieldKind::Chips | FieldKind::Toggles(_)) {
            return FieldEvent::Advance;
        }
        if field.required && field.key.current(record).is_none() {
            output::warning(format!("{} is required.", field.label));
            return FieldEvent::Repeat;
        }
        FieldEvent::Advance
    }

    fn accept<S: SubmissionCollaborator>(
        &mut self,
        field: &FieldDescriptor,
        raw: String,
        controller: &mut WizardController<S>,
    ) -> FieldEvent {
        let value = raw.trim().to_string();
        match &field.kind {
            FieldKind::Chips => {
                if value.is_empty() {
                    return FieldEvent::Advance;
                }
                let mut keywords = controller.record().keywords.clone();
                if !keywords.add(&value) {
                    output::warning(format!("`{value}` is already in the list."));
                    return FieldEvent::Repeat;
                }
                controller.update(FormPatch::new().keywords(keywords));
                FieldEvent::Repeat
            }
            FieldKind::Toggles(options) => {
                if value.is_empty() {
                    return FieldEvent::Advance;
                }
                match resolve_choice::<Ota>(&value) {
                    Some(ota) => {
                        let selected = controller.record().toggled_otas(ota);
                        controller.update(FormPatch::new().selected_otas(selected));
                    }
                    None => warn_unknown_choice(&value, options),
                }
                FieldEvent::Repeat
            }
            FieldKind::Gate(section) => match parse_yes_no(&value) {
                Some(true) => {
                    self.opened.insert(*section);
                    FieldEvent::Advance
                }
                Some(false) => {
                    self.opened.remove(section);
                    FieldEvent::Advance
                }
                None if value.is_empty() => FieldEvent::Advance,
                None => {
                    output::warning("Answer yes or no.");
                    FieldEvent::Repeat
                }
            },
            FieldKind::Choice(options) => {
                if value.is_empty() {
                    return self.keep(field, controller.record());
                }
                match field.key.choice_patch(&value) {
                    Some(patch) => {
                        controller.update(patch);
                        FieldEvent::Advance
                    }
                    None => {
                        warn_unknown_choice(&value, options);
                        FieldEvent::Repeat
                    }
                }
            }
            FieldKind::Text | FieldKind::Date | FieldKind::Url | FieldKind::Number => {
                if value.is_empty() {
                    if field.required {
                        output::warning(format!("{} is required.", field.label));
                        return FieldEvent::Repeat;
                    }
                    if field.key.current(controller.record()).is_none() {
                        return FieldEvent::Advance;
                    }
                }
                if let Some(message) = field_format_error(field.key, &value) {
                    output::warning(message);
                    return FieldEvent::Repeat;
                }
                if let Some(patch) = field.key.text_patch(value) {
                    controller.update(patch);
                }
                FieldEvent::Advance
            }
        }
    }
}

/// Per-field format checks applied before a value is stored. Range and
/// cross-field rules stay with the step report.
fn field_format_error(key: FieldKey, value: &str) -> Option<&'static str> {
    if value.is_empty() {
        return None;
    }
    match key {
        FieldKey::StartDate | FieldKey::EndDate if parse_date(value).is_none() => {
            Some("Use YYYY-MM-DD format")
        }
        FieldKey::GoogleMapsUrl if !provider_url_ok(value, GOOGLE_MAPS_HOST) => {
            Some("Please enter a valid Google Maps URL")
        }
        FieldKey::TripAdvisorUrl if !provider_url_ok(value, TRIPADVISOR_HOST) => {
            Some("Please enter a valid TripAdvisor URL")
        }
        _ => None,
    }
}

fn warn_unknown_choice(value: &str, options: &[String]) {
    output::warning(format!("Value must be one of: {}", options.join(", ")));
    if let Some(best) = suggest(value, options) {
        output::hint(format!("Did you mean `{best}`?"));
    }
}

/// Review lines shown before submitting.
pub fn summary_lines(record: &FormRecord) -> Vec<String> {
    let or_dash = |value: Option<String>| value.unwrap_or_else(|| "-".to_string());
    let mut lines = vec![
        format!("Hotel: {}", record.hotel_name.trim()),
        format!("Brand: {}", record.brand.trim()),
        format!("Location: {}, {}", record.city.trim(), record.country.trim()),
        format!("Keywords: {}", or_dash(FieldKey::Keywords.current(record))),
        format!("Local language: {}", record.local_language.label()),
        format!(
            "Analysis period: {} to {} (compare: {})",
            record.start_date.trim(),
            record.end_date.trim(),
            record.comparison_period.label()
        ),
        format!("Google Maps: {}", record.google_maps_url.trim()),
        format!("TripAdvisor: {}", record.trip_advisor_url.trim()),
    ];
    for ota in &record.selected_otas {
        lines.push(format!("{}: {}", ota.label(), record.ota_url(*ota).unwrap_or("").trim()));
    }
    lines.push(format!("Social links: {}", record.social_links.filled()));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    struct MockInteraction {
        prompts: VecDeque<PromptResponse>,
        seen: Vec<String>,
    }

    impl MockInteraction {
        fn new(prompts: Vec<PromptResponse>) -> Self {
            Self {
                prompts: prompts.into(),
                seen: Vec::new(),
            }
        }
    }

    impl FormInteraction for MockInteraction {
        fn prompt_field(&mut self, context: &PromptContext<'_>) -> PromptResponse {
            self.seen.push(context.descriptor.label.clone());
            self.prompts.pop_front().unwrap_or(PromptResponse::Cancel)
        }

        fn confirm(&mut self, _summary: &[String]) -> ConfirmationResponse {
            ConfirmationResponse::Confirm
        }
    }

    fn value(text: &str) -> PromptResponse {
        PromptResponse::Value(text.to_string())
    }

    fn run_step(
        controller: &mut WizardController,
        prompts: Vec<PromptResponse>,
    ) -> (PanelOutcome, MockInteraction) {
        let mut interaction = MockInteraction::new(prompts);
        let mut panel = StepPanel::new(controller.current_step(), controller.record(), false);
        let outcome = panel.run(controller, &mut interaction, 0);
        (outcome, interaction)
    }

    #[test]
    fn property_panel_fills_record() {
        let mut controller = WizardController::new();
        let (outcome, _) = run_step(
            &mut controller,
            vec![
                value("Grand Resort"),
                value("Independent"),
                value("Thailand"),
                value("Phuket"),
                value("Grand Resort"),
                value(" GR Phuket "),
                value(""),
                value("thai"),
            ],
        );
        assert_eq!(outcome, PanelOutcome::Completed);
        let record = controller.record();
        assert_eq!(record.city, "Phuket");
        assert_eq!(record.keywords.as_slice(), ["Grand Resort", "GR Phuket"]);
        assert_eq!(record.local_language, LocalLanguage::Thai);
        assert!(controller.can_advance());
    }

    #[test]
    fn back_on_keywords_removes_last_chip_before_leaving() {
        let mut controller = WizardController::new();
        controller.update(
            FormPatch::new()
                .hotel_name("Grand Resort")
                .brand("Independent")
                .country("Thailand")
                .city("Phuket"),
        );
        let mut interaction = MockInteraction::new(vec![
            value("Spa"),
            value("Spa"),
            PromptResponse::Back,
            PromptResponse::Back,
        ]);
        let mut panel = StepPanel::new(WizardStep::Property, controller.record(), false);
        let outcome = panel.run(&mut controller, &mut interaction, 4);

        assert!(controller.record().keywords.is_empty());
        // The second Back leaves the empty keyword list for the City/Area field.
        assert_eq!(interaction.seen.len(), 5);
        assert_eq!(interaction.seen.last().map(String::as_str), Some("City/Area"));
        assert_eq!(outcome, PanelOutcome::Cancelled);
    }

    #[test]
    fn required_field_repeats_until_filled() {
        let mut controller = WizardController::new();
        let (outcome, interaction) =
            run_step(&mut controller, vec![value(""), PromptResponse::Keep, value("Grand")]);
        assert_eq!(outcome, PanelOutcome::Cancelled);
        assert_eq!(interaction.seen[..3], ["Hotel name", "Hotel name", "Hotel name"]);
        assert_eq!(controller.record().hotel_name, "Grand");
    }

    #[test]
    fn back_on_first_field_leaves_panel() {
        let mut controller = WizardController::new();
        let (outcome, _) = run_step(&mut controller, vec![PromptResponse::Back]);
        assert_eq!(outcome, PanelOutcome::Back);
    }

    #[test]
    fn malformed_date_is_not_stored() {
        let mut controller = WizardController::new();
        let mut interaction =
            MockInteraction::new(vec![value("01/02/2025"), value("2025-01-02")]);
        let mut panel = StepPanel::new(WizardStep::TimePeriod, controller.record(), false);
        panel.run(&mut controller, &mut interaction, 0);
        assert_eq!(controller.record().start_date, "2025-01-02");
        assert_eq!(interaction.seen[..2], ["Start date", "Start date"]);
    }

    #[test]
    fn selecting_an_ota_adds_its_url_field() {
        let mut controller = WizardController::new();
        let mut interaction = MockInteraction::new(vec![
            value("https://www.google.com/maps/place/grand"),
            value("https://www.tripadvisor.com/Hotel_Review-grand"),
            value("agoda"),
            value("3"),
            value("Expedia"),
            value(""),
            value("https://www.agoda.com/grand"),
            value("no"),
        ]);
        let mut panel = StepPanel::new(WizardStep::Reviews, controller.record(), false);
        let outcome = panel.run(&mut controller, &mut interaction, 0);

        assert_eq!(outcome, PanelOutcome::Completed);
        assert_eq!(controller.record().selected_otas, vec![Ota::Agoda]);
        assert_eq!(controller.record().ota_url(Ota::Agoda), Some("https://www.agoda.com/grand"));
        assert!(interaction.seen.contains(&"Agoda URL".to_string()));
        assert!(!interaction.seen.contains(&"Total reviews".to_string()));
    }

    #[test]
    fn recent_changes_notes_only_after_yes() {
        let record = FormRecord::new();
        let panel = StepPanel::new(WizardStep::Social, &record, true);
        let labels: Vec<_> = panel.fields(&record).into_iter().map(|f| f.key).collect();
        assert!(!labels.contains(&FieldKey::RecentChangesNotes));
        assert!(!labels.iter().any(|key| matches!(key, FieldKey::Section(_))));

        let mut record = FormRecord::new();
        record.apply(FormPatch::new().notes(ContextNotes {
            recent_changes: Some(RecentChanges::Yes),
            ..ContextNotes::default()
        }));
        let keys: Vec<_> = panel.fields(&record).into_iter().map(|f| f.key).collect();
        assert!(keys.contains(&FieldKey::RecentChangesNotes));
    }

    #[test]
    fn gate_expands_optional_section() {
        let mut controller = WizardController::new();
        let mut interaction = MockInteraction::new(vec![
            value("yes"),
            value("@grandresort"),
            value(""),
            value(""),
            value(""),
            value(""),
            value(""),
            value("no"),
        ]);
        let mut panel = StepPanel::new(WizardStep::Social, controller.record(), false);
        let outcome = panel.run(&mut controller, &mut interaction, 0);

        assert_eq!(outcome, PanelOutcome::Completed);
        assert_eq!(controller.record().social_links.instagram.as_deref(), Some("@grandresort"));
        assert_eq!(controller.record().social_links.facebook, None);
    }

    #[test]
    fn blocked_report_points_at_first_problem_field() {
        let mut record = FormRecord::new();
        record.apply(
            FormPatch::new()
                .google_maps_url("https://www.google.com/maps/x")
                .trip_advisor_url("https://www.tripadvisor.com/x")
                .selected_otas(vec![Ota::BookingCom]),
        );
        let panel = StepPanel::new(WizardStep::Reviews, &record, false);
        let report = crate::wizard::validate_step(WizardStep::Reviews, &record);
        assert_eq!(panel.first_issue_index(&record, &report), 3);
    }

    #[test]
    fn choices_resolve_by_number_or_label() {
        assert_eq!(resolve_choice::<Ota>("1"), Some(Ota::BookingCom));
        assert_eq!(resolve_choice::<Ota>("booking.com"), Some(Ota::BookingCom));
        assert_eq!(resolve_choice::<Ota>("0"), None);
        assert_eq!(
            resolve_choice::<ComparisonPeriod>("previous_year"),
            Some(ComparisonPeriod::PreviousYear)
        );
    }
}
