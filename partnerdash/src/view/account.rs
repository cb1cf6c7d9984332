//! User account page with the user's collections and activations.

use iced::widget::{Column, button, column, container, row, rule, scrollable, text, toggler};
use iced::{Alignment, Element, Length, Theme};

use partnerdash_common::{Activation, Collection, ExternalLink, User};

use crate::message::{AccountTab, Message};
use crate::view::dashboard::{avatar, card_style};
use crate::view::formatting::{format_count, format_date};
use crate::view::theme;

/// State for the selected user.
#[derive(Debug)]
pub struct AccountState {
    pub user: User,
    pub tab: AccountTab,
    /// `None` until fetched.
    pub collections: Option<Vec<Collection>>,
    /// `None` until fetched.
    pub activations: Option<Vec<Activation>>,
}

impl AccountState {
    pub fn new(user: User) -> Self {
        Self {
            user,
            tab: AccountTab::default(),
            collections: None,
            activations: None,
        }
    }

    pub fn remove_collection(&mut self, id: &str) {
        if let Some(collections) = &mut self.collections {
            collections.retain(|c| c.id != id);
        }
    }

    pub fn remove_activation(&mut self, id: &str) {
        if let Some(activations) = &mut self.activations {
            activations.retain(|a| a.id != id);
        }
    }
}

/// Render a user's account page.
pub fn account_view(state: &AccountState) -> Element<'_, Message> {
    let body = match state.tab {
        AccountTab::Collections => render_collections(state.collections.as_deref()),
        AccountTab::Activations => render_activations(state.activations.as_deref()),
    };

    let content = column![
        render_header(&state.user),
        render_tabs(state),
        rule::horizontal(1),
        body,
    ]
    .spacing(16)
    .padding(20);

    scrollable(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn muted(t: &Theme) -> text::Style {
    text::Style {
        color: Some(theme::colors(t).text_muted()),
    }
}

fn render_header(user: &User) -> Element<'_, Message> {
    let back = button(text("Back").size(14))
        .on_press(Message::CloseUser)
        .style(button::secondary);

    let mut details = column![
        text(user.display_name()).size(24),
        text(format!("@{}", user.username)).size(13).style(muted),
        text(&user.email).size(13).style(muted),
        text(format!("Joined {}", format_date(&user.created_at)))
            .size(12)
            .style(muted),
    ]
    .spacing(4)
    .width(Length::Fill);

    let socials = &user.social_links;
    let handles: Vec<String> = [
        ("X", &socials.x),
        ("Instagram", &socials.instagram),
        ("TikTok", &socials.tiktok),
    ]
    .into_iter()
    .filter(|(_, handle)| !handle.is_empty())
    .map(|(network, handle)| format!("{network}: {handle}"))
    .collect();

    if !handles.is_empty() {
        details = details.push(text(handles.join("   ")).size(12));
    }

    let id = user.id.clone();
    let active = toggler(user.is_active)
        .label(if user.is_active { "Active" } else { "Inactive" })
        .on_toggle(move |active| Message::ToggleUserActive(id.clone(), active))
        .width(Length::Shrink);

    column![
        back,
        row![avatar(&user.id, user.initial(), 64.0), details, active]
            .spacing(16)
            .align_y(Alignment::Center),
    ]
    .spacing(12)
    .into()
}

fn render_tabs(state: &AccountState) -> Element<'_, Message> {
    let count = |len: Option<usize>| len.map_or(String::new(), |n| format!(" ({n})"));

    let tab = |label: String, target: AccountTab| {
        button(text(label).size(14))
            .on_press(Message::SelectAccountTab(target))
            .style(if state.tab == target {
                button::primary
            } else {
                button::secondary
            })
    };

    row![
        tab(
            format!("Collections{}", count(state.collections.as_ref().map(Vec::len))),
            AccountTab::Collections
        ),
        tab(
            format!("Activations{}", count(state.activations.as_ref().map(Vec::len))),
            AccountTab::Activations
        ),
    ]
    .spacing(8)
    .into()
}

fn render_collections(collections: Option<&[Collection]>) -> Element<'_, Message> {
    let Some(collections) = collections else {
        return text("Loading collections...").size(14).into();
    };
    if collections.is_empty() {
        return text("No collections yet").size(14).into();
    }

    let mut list = Column::new().spacing(8);
    for collection in collections {
        list = list.push(render_collection(collection));
    }
    list.into()
}

fn render_collection(collection: &Collection) -> Element<'_, Message> {
    let mut details = column![
        text(&collection.title).size(16),
        text(format!(
            "{} · {} activations · created {}",
            collection.category.as_deref().unwrap_or("Uncategorized"),
            format_count(collection.activation_ids.len() as u64),
            format_date(&collection.created_at)
        ))
        .size(12)
        .style(muted),
    ]
    .spacing(4)
    .width(Length::Fill);

    if let Some(description) = &collection.description {
        details = details.push(text(description).size(13));
    }
    if let Some(link) = &collection.external_link {
        details = details.push(render_link(link));
    }

    record_card(details, Message::DeleteCollection(collection.id.clone()))
}

fn render_activations(activations: Option<&[Activation]>) -> Element<'_, Message> {
    let Some(activations) = activations else {
        return text("Loading activations...").size(14).into();
    };
    if activations.is_empty() {
        return text("No activations yet").size(14).into();
    }

    let mut list = Column::new().spacing(8);
    for activation in activations {
        list = list.push(render_activation(activation));
    }
    list.into()
}

fn render_activation(activation: &Activation) -> Element<'_, Message> {
    let mut details = column![
        text(&activation.title).size(16),
        text(format!("Created {}", format_date(&activation.created_at)))
            .size(12)
            .style(muted),
    ]
    .spacing(4)
    .width(Length::Fill);

    if let Some(description) = &activation.description {
        details = details.push(text(description).size(13));
    }

    details = details
        .push(text(format!("Trigger image: {}", activation.trigger_image_url)).size(12))
        .push(text(format!("Video: {}", activation.video_url)).size(12));

    if let Some(link) = &activation.external_link {
        details = details.push(render_link(link));
    }

    record_card(details, Message::DeleteActivation(activation.id.clone()))
}

fn render_link(link: &ExternalLink) -> Element<'_, Message> {
    text(format!("Link: {} ({})", link.title, link.url))
        .size(12)
        .into()
}

/// Card with a delete button on the right.
fn record_card<'a>(details: Column<'a, Message>, on_delete: Message) -> Element<'a, Message> {
    let delete = button(text("Delete").size(13))
        .on_press(on_delete)
        .style(button::danger);

    container(
        row![details, delete]
            .spacing(12)
            .align_y(Alignment::Center),
    )
    .padding(12)
    .width(Length::Fill)
    .style(card_style)
    .into()
}
