//! Overview: platform totals, leaderboard, global graph and partner list.

use iced::widget::{
    Column, Row, button, column, container, row, rule, scrollable, text, text_input, toggler,
};
use iced::{Alignment, Element, Length, Theme};

use partnerdash_common::{
    DisplayConfig, LeaderboardCategory, OverallMetrics, Partner, top_partner,
};

use crate::message::{ChartTarget, Message};
use crate::view::chart::{ChartState, chart_panel};
use crate::view::formatting::format_count;
use crate::view::theme;

/// Overview state.
#[derive(Debug)]
pub struct DashboardState {
    /// All partners, in store order.
    pub partners: Vec<Partner>,
    /// `None` until the totals have been fetched.
    pub metrics: Option<OverallMetrics>,
    pub search: String,
    pub leaderboard_open: bool,
    pub chart: ChartState,
}

impl DashboardState {
    pub fn new(display: &DisplayConfig) -> Self {
        Self {
            partners: Vec::new(),
            metrics: None,
            search: String::new(),
            leaderboard_open: true,
            chart: ChartState::new(
                "Platform Activity",
                display.overview_metrics.clone(),
                display.default_range,
            ),
        }
    }

    /// Partners matching the search box.
    pub fn filtered_partners(&self) -> Vec<&Partner> {
        self.partners
            .iter()
            .filter(|p| p.matches(&self.search))
            .collect()
    }

    pub fn partner(&self, id: &str) -> Option<&Partner> {
        self.partners.iter().find(|p| p.id == id)
    }

    /// Replace a partner after a write.
    pub fn replace_partner(&mut self, partner: Partner) {
        if let Some(slot) = self.partners.iter_mut().find(|p| p.id == partner.id) {
            *slot = partner;
        }
    }
}

/// Render the overview.
pub fn dashboard_view(state: &DashboardState) -> Element<'_, Message> {
    let content = column![
        render_header(state),
        render_metric_cards(state),
        render_leaderboard(state),
        rule::horizontal(1),
        chart_panel(&state.chart, ChartTarget::Overview),
        rule::horizontal(1),
        render_partner_list(state),
    ]
    .spacing(16)
    .padding(20);

    scrollable(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn render_header(state: &DashboardState) -> Element<'_, Message> {
    let title = text("Partner Dashboard").size(24);
    let partner_count = text(format!("{} partners", state.partners.len())).size(14);

    let refresh = button(text("Refresh").size(14))
        .on_press(Message::Refresh)
        .style(button::secondary);

    row![title, partner_count, refresh]
        .spacing(20)
        .align_y(Alignment::Center)
        .into()
}

fn render_metric_cards(state: &DashboardState) -> Element<'_, Message> {
    let Some(metrics) = &state.metrics else {
        return text("Loading metrics...").size(14).into();
    };

    let cards = metrics
        .entries()
        .into_iter()
        .map(|(label, value)| stat_card(label, value));

    Row::with_children(cards).spacing(10).wrap().into()
}

/// Labelled count in a card.
pub(crate) fn stat_card<'a>(label: &'a str, value: u64) -> Element<'a, Message> {
    let content = column![
        text(label).size(12).style(|t: &Theme| text::Style {
            color: Some(theme::colors(t).text_muted()),
        }),
        text(format_count(value)).size(22),
    ]
    .spacing(4);

    container(content)
        .padding(12)
        .width(Length::Fixed(150.0))
        .style(card_style)
        .into()
}

fn render_leaderboard(state: &DashboardState) -> Element<'_, Message> {
    let toggle_label = if state.leaderboard_open {
        "Hide Leaderboard"
    } else {
        "Show Leaderboard"
    };

    let header = row![
        text("Partner Leaderboard").size(18),
        button(text(toggle_label).size(12))
            .on_press(Message::ToggleLeaderboard)
            .style(button::text),
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    if !state.leaderboard_open {
        return header.into();
    }

    let cards = LeaderboardCategory::ALL.iter().filter_map(|category| {
        let winner = top_partner(&state.partners, *category)?;
        let content = column![
            text(category.title()).size(12).style(|t: &Theme| text::Style {
                color: Some(theme::colors(t).text_muted()),
            }),
            button(text(&winner.company_name).size(15))
                .on_press(Message::SelectPartner(winner.id.clone()))
                .padding(0)
                .style(button::text),
            text(format!(
                "{} {}",
                format_count(category.value(winner)),
                category.unit()
            ))
            .size(13),
        ]
        .spacing(4);

        Some(
            container(content)
                .padding(12)
                .width(Length::Fixed(190.0))
                .style(card_style)
                .into(),
        )
    });

    column![header, Row::with_children(cards).spacing(10).wrap()]
        .spacing(10)
        .into()
}

fn render_partner_list(state: &DashboardState) -> Element<'_, Message> {
    let search = text_input("Search partners...", &state.search)
        .on_input(Message::SearchPartners)
        .padding(8)
        .width(Length::Fixed(320.0));

    let header = row![text("Partners").size(18), search]
        .spacing(20)
        .align_y(Alignment::Center);

    let partners = state.filtered_partners();

    let body: Element<'_, Message> = if partners.is_empty() {
        let message = if state.partners.is_empty() {
            "Loading partners..."
        } else {
            "No partners match your search"
        };
        text(message).size(14).into()
    } else {
        let mut list = Column::new().spacing(8);
        for partner in partners {
            list = list.push(render_partner_row(partner));
        }
        list.into()
    };

    column![header, body].spacing(12).into()
}

fn render_partner_row(partner: &Partner) -> Element<'_, Message> {
    let name = column![
        button(text(&partner.company_name).size(15))
            .on_press(Message::SelectPartner(partner.id.clone()))
            .padding(0)
            .style(button::text),
        text(format!("{} · @{}", partner.contact_name(), partner.username))
            .size(12)
            .style(|t: &Theme| text::Style {
                color: Some(theme::colors(t).text_muted()),
            }),
    ]
    .spacing(2)
    .width(Length::Fill);

    let counts = text(format!(
        "{} users · {} scans",
        format_count(partner.users_count),
        format_count(partner.engagement.scans_count)
    ))
    .size(12);

    let id = partner.id.clone();
    let active = toggler(partner.is_active)
        .label(if partner.is_active { "Active" } else { "Inactive" })
        .on_toggle(move |active| Message::TogglePartnerActive(id.clone(), active))
        .width(Length::Shrink);

    let content = row![
        avatar(&partner.id, partner.initial(), 36.0),
        name,
        counts,
        active
    ]
    .spacing(12)
    .align_y(Alignment::Center);

    container(content)
        .padding(10)
        .width(Length::Fill)
        .style(card_style)
        .into()
}

/// Initial on a pastel circle seeded by `seed`.
pub(crate) fn avatar<'a>(seed: &str, initial: char, size: f32) -> Element<'a, Message> {
    let background = theme::avatar_color(seed);

    container(
        text(initial.to_string())
            .size(size * 0.45)
            .style(|_t: &Theme| text::Style {
                color: Some(iced::Color::from_rgb(0.15, 0.15, 0.2)),
            }),
    )
    .width(Length::Fixed(size))
    .height(Length::Fixed(size))
    .center_x(Length::Fixed(size))
    .center_y(Length::Fixed(size))
    .style(move |_theme: &Theme| container::Style {
        background: Some(iced::Background::Color(background)),
        border: iced::Border {
            radius: (size / 2.0).into(),
            ..Default::default()
        },
        ..Default::default()
    })
    .into()
}

/// Bordered card background.
pub(crate) fn card_style(t: &Theme) -> container::Style {
    let colors = theme::colors(t);
    container::Style {
        background: Some(iced::Background::Color(colors.card_background())),
        border: iced::Border {
            color: colors.border(),
            width: 1.0,
            radius: 6.0.into(),
        },
        ..Default::default()
    }
}
