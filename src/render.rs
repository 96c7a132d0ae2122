//! Projection of query results into what the list area, the signup form and the message area display
//!
//! [`ListView`] and [`SelectOption`] are plain view models, replaced as a whole on every render.
//! [`HtmlRenderer`] turns them into (escaped) HTML.

use std::error::Error;

use serde::Serialize;
use tera::{Context, Tera};

use crate::activity::{Activity, ActivityCollection};
use crate::category::CategoryIndex;
use crate::config;
use crate::controller::Command;
use crate::feedback::StatusMessage;


/// The removal button of a participant
///
/// It carries everything the unregister request needs, so that a single handler on the list can serve every button.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RemovalAction {
    pub activity: String,
    pub email: String,
}

impl RemovalAction {
    pub fn new<S: ToString, T: ToString>(activity: S, email: T) -> Self {
        Self { activity: activity.to_string(), email: email.to_string() }
    }

    /// Rebuild an action from the `data-activity` and `data-email` attributes of a clicked element.
    ///
    /// Returns `None` in case the element is not a removal button
    pub fn from_data_attributes(activity: Option<&str>, email: Option<&str>) -> Option<Self> {
        match (activity, email) {
            (Some(activity), Some(email)) => Some(Self::new(activity, email)),
            _ => None,
        }
    }

    pub fn into_command(self) -> Command {
        Command::Unregister(self)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ParticipantEntry {
    pub email: String,
    pub removal: RemovalAction,
}

/// Everything that is displayed about an activity
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ActivityCard {
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub spots_left: i64,
    pub participants: Vec<ParticipantEntry>,
}

impl ActivityCard {
    pub fn new(name: &str, activity: &Activity) -> Self {
        let participants = activity.participants().iter()
            .map(|email| ParticipantEntry {
                email: email.clone(),
                removal: RemovalAction::new(name, email),
            })
            .collect();

        Self {
            name: name.to_string(),
            description: activity.description().to_string(),
            schedule: activity.schedule().to_string(),
            spots_left: activity.spots_left(),
            participants,
        }
    }
}

/// The content of the list area
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListView {
    /// No fetch has completed yet
    Loading,
    /// The last fetch failed
    LoadFailed,
    /// Nothing matches the current search and filters
    Empty,
    Cards(Vec<ActivityCard>),
}

impl Default for ListView {
    fn default() -> Self {
        ListView::Loading
    }
}

impl ListView {
    /// Build the list area from a query result
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a Activity)>,
    {
        let cards: Vec<ActivityCard> = entries.into_iter()
            .map(|(name, activity)| ActivityCard::new(name, activity))
            .collect();

        if cards.is_empty() {
            ListView::Empty
        } else {
            ListView::Cards(cards)
        }
    }

    pub fn cards(&self) -> &[ActivityCard] {
        match self {
            ListView::Cards(cards) => cards,
            _ => &[],
        }
    }

    /// The text shown instead of the cards, if any
    pub fn placeholder_text(&self) -> Option<&'static str> {
        match self {
            ListView::Loading => Some(config::LOADING),
            ListView::LoadFailed => Some(config::LOAD_FAILURE),
            ListView::Empty => Some(config::NO_ACTIVITIES_FOUND),
            ListView::Cards(_) => None,
        }
    }

    /// Find the removal button of a participant, the way a click handler on the whole list would
    pub fn find_removal(&self, activity: &str, email: &str) -> Option<&RemovalAction> {
        self.cards().iter()
            .filter(|card| card.name == activity)
            .flat_map(|card| card.participants.iter())
            .map(|participant| &participant.removal)
            .find(|removal| removal.email == email)
    }
}


/// An entry of a drop-down control
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new<S: ToString, T: ToString>(value: S, label: T) -> Self {
        Self { value: value.to_string(), label: label.to_string() }
    }
}

/// The options of the activity drop-down of the signup form: a placeholder, then every activity in server order
pub fn activity_options(activities: &ActivityCollection) -> Vec<SelectOption> {
    std::iter::once(SelectOption::new("", config::ACTIVITY_PLACEHOLDER))
        .chain(activities.names().map(|name| SelectOption::new(name, name)))
        .collect()
}

/// The options of the category filter: "every category", then each known category
pub fn category_options(categories: &CategoryIndex) -> Vec<SelectOption> {
    std::iter::once(SelectOption::new("", config::ALL_CATEGORIES))
        .chain(categories.labels().into_iter().map(|label| SelectOption::new(label, label)))
        .collect()
}



static LIST_TEMPLATE: &str = r#"{% if placeholder %}<p>{{ placeholder }}</p>{% else %}{% for card in cards %}
<div class="activity-card">
  <h4>{{ card.name }}</h4>
  <p>{{ card.description }}</p>
  <p><strong>Schedule:</strong> {{ card.schedule }}</p>
  <p><strong>Availability:</strong> {{ card.spots_left }} spots left</p>
  <div class="participants-container">
{%- if card.participants %}
    <div class="participants-section">
      <h5>Participants:</h5>
      <ul class="participants-list">
{%- for participant in card.participants %}
        <li><span class="participant-email">{{ participant.email }}</span><button class="delete-btn" data-activity="{{ participant.removal.activity }}" data-email="{{ participant.removal.email }}">&#10060;</button></li>
{%- endfor %}
      </ul>
    </div>
{%- else %}
    <p><em>{{ no_participants }}</em></p>
{%- endif %}
  </div>
</div>
{%- endfor %}{% endif %}
"#;

static OPTIONS_TEMPLATE: &str = r#"{% for option in options %}<option value="{{ option.value }}"{% if option.value == selected %} selected{% endif %}>{{ option.label }}</option>
{% endfor %}"#;

static MESSAGE_TEMPLATE: &str = r#"{% if message %}<div id="message" class="{{ class }}">{{ message }}</div>{% else %}<div id="message" class="hidden"></div>{% endif %}"#;


/// Renders view models into HTML fragments.
///
/// Every value is HTML-escaped
pub struct HtmlRenderer {
    tera: Tera,
}

impl HtmlRenderer {
    pub fn new() -> Result<Self, Box<dyn Error>> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("activities.html", LIST_TEMPLATE),
            ("options.html", OPTIONS_TEMPLATE),
            ("message.html", MESSAGE_TEMPLATE),
        ])?;
        Ok(Self { tera })
    }

    /// The whole content of the list area
    pub fn render_list(&self, view: &ListView) -> Result<String, Box<dyn Error>> {
        let mut context = Context::new();
        context.insert("placeholder", &view.placeholder_text());
        context.insert("cards", view.cards());
        context.insert("no_participants", config::NO_PARTICIPANTS);
        Ok(self.tera.render("activities.html", &context)?)
    }

    /// The whole content of a drop-down control
    pub fn render_options(&self, options: &[SelectOption], selected: &str) -> Result<String, Box<dyn Error>> {
        let mut context = Context::new();
        context.insert("options", options);
        context.insert("selected", selected);
        Ok(self.tera.render("options.html", &context)?)
    }

    /// The message area
    pub fn render_message(&self, message: Option<&StatusMessage>) -> Result<String, Box<dyn Error>> {
        let mut context = Context::new();
        context.insert("message", &message.map(|m| m.text.as_str()));
        context.insert("class", message.map(|m| m.kind.css_class()).unwrap_or("hidden"));
        Ok(self.tera.render("message.html", &context)?)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn chess_collection() -> ActivityCollection {
        vec![
            ("Chess Club".to_string(), Activity::new("d", "s", 10, vec!["a@x.com".to_string()])),
            ("Gym Class".to_string(), Activity::new("Sports", "Mondays", 30, vec![])),
        ].into_iter().collect()
    }

    #[test]
    fn empty_results_show_a_placeholder() {
        let view = ListView::from_entries(Vec::new());
        assert_eq!(view, ListView::Empty);
        assert!(view.cards().is_empty());

        let html = HtmlRenderer::new().unwrap().render_list(&view).unwrap();
        assert_eq!(html.trim(), "<p>No activities found.</p>");
        assert!(html.contains("activity-card") == false);
    }

    #[test]
    fn cards_carry_removal_actions() {
        let collection = chess_collection();
        let view = ListView::from_entries(collection.iter());
        let chess = &view.cards()[0];
        assert_eq!(chess.spots_left, 9);
        assert_eq!(chess.participants[0].removal, RemovalAction::new("Chess Club", "a@x.com"));

        assert!(view.find_removal("Chess Club", "a@x.com").is_some());
        assert!(view.find_removal("Gym Class", "a@x.com").is_none());
    }

    #[test]
    fn html_list() {
        let collection = chess_collection();
        let view = ListView::from_entries(collection.iter());
        let html = HtmlRenderer::new().unwrap().render_list(&view).unwrap();

        assert_eq!(html.matches("class=\"activity-card\"").count(), 2);
        assert!(html.contains("<strong>Availability:</strong> 9 spots left"));
        assert!(html.contains(r#"data-activity="Chess Club" data-email="a@x.com""#));
        assert!(html.contains("<em>No participants yet</em>"));
    }

    #[test]
    fn overbooked_cards_are_not_clamped() {
        let collection: ActivityCollection = vec![
            ("Tiny Club".to_string(), Activity::new("d", "s", 1, vec!["a@x.com".to_string(), "b@x.com".to_string()])),
        ].into_iter().collect();
        let view = ListView::from_entries(collection.iter());
        assert_eq!(view.cards()[0].spots_left, -1);

        let html = HtmlRenderer::new().unwrap().render_list(&view).unwrap();
        assert!(html.contains("<strong>Availability:</strong> -1 spots left"));
    }

    #[test]
    fn html_is_escaped() {
        let collection: ActivityCollection = vec![
            ("<script>".to_string(), Activity::new("\"quoted\" & <b>bold</b>", "s", 1, vec!["x@y.com\" onclick=\"evil()".to_string()])),
        ].into_iter().collect();
        let view = ListView::from_entries(collection.iter());
        let html = HtmlRenderer::new().unwrap().render_list(&view).unwrap();

        assert!(html.contains("<script>") == false);
        assert!(html.contains("<b>bold</b>") == false);
        assert!(html.contains("onclick=\"evil()") == false);
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn failure_placeholder() {
        let html = HtmlRenderer::new().unwrap().render_list(&ListView::LoadFailed).unwrap();
        assert_eq!(html.trim(), "<p>Failed to load activities. Please try again later.</p>");
    }

    #[test]
    fn activity_options_start_with_a_placeholder() {
        let options = activity_options(&chess_collection());
        assert_eq!(options, vec![
            SelectOption::new("", "-- Select an activity --"),
            SelectOption::new("Chess Club", "Chess Club"),
            SelectOption::new("Gym Class", "Gym Class"),
        ]);

        let html = HtmlRenderer::new().unwrap().render_options(&options, "Gym Class").unwrap();
        assert_eq!(html.matches("<option").count(), 3);
        assert!(html.contains(r#"<option value="Gym Class" selected>Gym Class</option>"#));
    }

    #[test]
    fn category_options_list_every_label() {
        let options = category_options(&CategoryIndex::school_defaults());
        let values: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["", "Academic", "Arts", "Sports"]);
    }

    #[test]
    fn message_area() {
        let renderer = HtmlRenderer::new().unwrap();
        let html = renderer.render_message(Some(&StatusMessage::error("Already full"))).unwrap();
        assert_eq!(html, r#"<div id="message" class="error">Already full</div>"#);

        let html = renderer.render_message(None).unwrap();
        assert_eq!(html, r#"<div id="message" class="hidden"></div>"#);
    }
}
