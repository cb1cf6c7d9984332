//! Partner details: profile, engagement cards, scoped graph and users.

use iced::widget::{
    Column, Row, button, column, container, row, rule, scrollable, text, text_input, toggler,
};
use iced::{Alignment, Element, Length, Theme};

use partnerdash_common::{DisplayConfig, Partner, User};

use crate::message::{ChartTarget, Message};
use crate::view::chart::{ChartState, chart_panel};
use crate::view::dashboard::{avatar, card_style, stat_card};
use crate::view::formatting::{format_count, format_date};
use crate::view::theme;

/// State for the selected partner.
#[derive(Debug)]
pub struct PartnerDetailState {
    pub partner_id: String,
    /// `None` until the users have been fetched.
    pub users: Option<Vec<User>>,
    pub search: String,
    pub chart: ChartState,
}

impl PartnerDetailState {
    pub fn new(partner_id: impl Into<String>, display: &DisplayConfig) -> Self {
        Self {
            partner_id: partner_id.into(),
            users: None,
            search: String::new(),
            chart: ChartState::new(
                "Partner Activity",
                display.partner_metrics.clone(),
                display.default_range,
            ),
        }
    }

    /// Users matching the search box.
    pub fn filtered_users(&self) -> Vec<&User> {
        self.users
            .iter()
            .flatten()
            .filter(|u| u.matches(&self.search))
            .collect()
    }

    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().flatten().find(|u| u.id == id)
    }

    /// Replace a user after a write.
    pub fn replace_user(&mut self, user: User) {
        if let Some(slot) = self
            .users
            .iter_mut()
            .flatten()
            .find(|u| u.id == user.id)
        {
            *slot = user;
        }
    }
}

/// Render a partner's page.
pub fn partner_view<'a>(
    partner: &'a Partner,
    state: &'a PartnerDetailState,
) -> Element<'a, Message> {
    let content = column![
        render_header(partner),
        render_engagement(partner),
        rule::horizontal(1),
        chart_panel(&state.chart, ChartTarget::Partner),
        rule::horizontal(1),
        render_users(state),
    ]
    .spacing(16)
    .padding(20);

    scrollable(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn render_header(partner: &Partner) -> Element<'_, Message> {
    let back = button(text("Back").size(14))
        .on_press(Message::ClosePartner)
        .style(button::secondary);

    let muted = |t: &Theme| text::Style {
        color: Some(theme::colors(t).text_muted()),
    };

    let mut details = column![
        text(&partner.company_name).size(24),
        text(format!("{} · @{}", partner.contact_name(), partner.username))
            .size(13)
            .style(muted),
        text(&partner.email).size(13).style(muted),
        text(format!("Partner since {}", format_date(&partner.created_at)))
            .size(12)
            .style(muted),
    ]
    .spacing(4)
    .width(Length::Fill);

    if !partner.description.is_empty() {
        details = details.push(text(&partner.description).size(13));
    }

    let id = partner.id.clone();
    let active = toggler(partner.is_active)
        .label(if partner.is_active { "Active" } else { "Inactive" })
        .on_toggle(move |active| Message::TogglePartnerActive(id.clone(), active))
        .width(Length::Shrink);

    column![
        back,
        row![avatar(&partner.id, partner.initial(), 64.0), details, active]
            .spacing(16)
            .align_y(Alignment::Center),
    ]
    .spacing(12)
    .into()
}

fn render_engagement(partner: &Partner) -> Element<'_, Message> {
    let engagement = &partner.engagement;
    let cards = [
        ("Users", partner.users_count),
        ("Managers", partner.managers_count),
        ("Collections", engagement.collections_count),
        ("Activations", engagement.activations_count),
        ("Scans", engagement.scans_count),
        ("Likes", engagement.likes_count),
        ("Views", engagement.views_count),
    ]
    .into_iter()
    .map(|(label, value)| stat_card(label, value));

    Row::with_children(cards).spacing(10).wrap().into()
}

fn render_users(state: &PartnerDetailState) -> Element<'_, Message> {
    let search = text_input("Search users...", &state.search)
        .on_input(Message::SearchUsers)
        .padding(8)
        .width(Length::Fixed(320.0));

    let header = row![text("Users").size(18), search]
        .spacing(20)
        .align_y(Alignment::Center);

    let body: Element<'_, Message> = match &state.users {
        None => text("Loading users...").size(14).into(),
        Some(users) if users.is_empty() => text("No users yet").size(14).into(),
        Some(_) => {
            let users = state.filtered_users();
            if users.is_empty() {
                text("No users match your search").size(14).into()
            } else {
                let mut list = Column::new().spacing(8);
                for user in users {
                    list = list.push(render_user_row(user));
                }
                list.into()
            }
        }
    };

    column![header, body].spacing(12).into()
}

fn render_user_row(user: &User) -> Element<'_, Message> {
    let name = column![
        button(text(user.display_name()).size(15))
            .on_press(Message::SelectUser(user.id.clone()))
            .padding(0)
            .style(button::text),
        text(format!("@{} · {}", user.username, user.email))
            .size(12)
            .style(|t: &Theme| text::Style {
                color: Some(theme::colors(t).text_muted()),
            }),
    ]
    .spacing(2)
    .width(Length::Fill);

    let engagement = &user.engagement;
    let counts = text(format!(
        "{} collections · {} activations · {} scans",
        format_count(engagement.collections_count),
        format_count(engagement.activations_count),
        format_count(engagement.scans_count)
    ))
    .size(12);

    let id = user.id.clone();
    let active = toggler(user.is_active)
        .label(if user.is_active { "Active" } else { "Inactive" })
        .on_toggle(move |active| Message::ToggleUserActive(id.clone(), active))
        .width(Length::Shrink);

    let content = row![avatar(&user.id, user.initial(), 32.0), name, counts, active]
        .spacing(12)
        .align_y(Alignment::Center);

    container(content)
        .padding(10)
        .width(Length::Fill)
        .style(card_style)
        .into()
}
