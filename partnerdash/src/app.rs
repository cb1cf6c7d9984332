//! PartnerDash Iced application.

use std::future::Future;
use std::sync::Arc;

use iced::widget::{button, column, container, row, text};
use iced::{Alignment, Element, Length, Task, Theme};

use partnerdash_common::{DisplayConfig, PartnerUpdate, Series, UserUpdate};
use partnerdash_store::{DataSource, SeriesScope};

use crate::message::{ChartTarget, Message};
use crate::view::account::{AccountState, account_view};
use crate::view::chart::ChartState;
use crate::view::dashboard::{DashboardState, dashboard_view};
use crate::view::partner::{PartnerDetailState, partner_view};
use crate::view::theme;

/// The main PartnerDash application.
pub struct PartnerDash {
    /// Backend every request goes through.
    store: Arc<dyn DataSource>,
    /// Graph defaults.
    display: DisplayConfig,
    /// Overview state.
    dashboard: DashboardState,
    /// Currently selected partner (if any).
    selected_partner: Option<PartnerDetailState>,
    /// Currently selected user of that partner (if any).
    selected_user: Option<AccountState>,
    /// Last failed request, shown as a banner.
    last_error: Option<String>,
}

impl PartnerDash {
    /// Boot the application (called by iced::application).
    pub fn boot(store: Arc<dyn DataSource>, display: DisplayConfig) -> (Self, Task<Message>) {
        let app = Self {
            store,
            dashboard: DashboardState::new(&display),
            display,
            selected_partner: None,
            selected_user: None,
            last_error: None,
        };

        let task = app.load_overview();
        (app, task)
    }

    /// Get the window title.
    pub fn title(&self) -> String {
        if let Some(account) = &self.selected_user {
            format!("PartnerDash - {}", account.user.display_name())
        } else if let Some(partner) = self
            .selected_partner
            .as_ref()
            .and_then(|detail| self.dashboard.partner(&detail.partner_id))
        {
            format!("PartnerDash - {}", partner.company_name)
        } else {
            "PartnerDash".to_string()
        }
    }

    /// Handle incoming messages.
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PartnersLoaded(result) => match result {
                Ok(partners) => {
                    tracing::debug!(count = partners.len(), "Partners loaded");
                    self.dashboard.partners = partners;
                }
                Err(error) => self.report("load partners", error),
            },

            Message::MetricsLoaded(result) => match result {
                Ok(metrics) => self.dashboard.metrics = Some(metrics),
                Err(error) => self.report("load metrics", error),
            },

            Message::SeriesLoaded(scope, result) => match result {
                Ok(series) => {
                    if let Some(chart) = self.chart_mut(&scope) {
                        chart.set_series(series);
                    }
                }
                Err(error) => {
                    // Only a first load falls back to an empty graph.
                    if let Some(chart) = self.chart_mut(&scope).filter(|c| c.is_loading()) {
                        chart.set_series(Arc::new(Series::empty()));
                    }
                    self.report("load metric series", error);
                }
            },

            Message::Refresh => {
                tracing::info!("Refreshing");
                return self.refresh();
            }

            Message::DismissError => {
                self.last_error = None;
            }

            Message::SearchPartners(query) => {
                self.dashboard.search = query;
            }

            Message::ToggleLeaderboard => {
                self.dashboard.leaderboard_open = !self.dashboard.leaderboard_open;
            }

            Message::SelectPartner(partner_id) => {
                return self.select_partner(partner_id);
            }

            Message::ClosePartner => {
                self.selected_partner = None;
                self.selected_user = None;
            }

            Message::TogglePartnerActive(partner_id, active) => {
                let store = self.store.clone();
                return perform(
                    async move {
                        store
                            .update_partner(&partner_id, PartnerUpdate::active(active))
                            .await
                    },
                    Message::PartnerUpdated,
                );
            }

            Message::PartnerUpdated(result) => match result {
                Ok(partner) => {
                    tracing::info!(partner = %partner.id, active = partner.is_active, "Partner updated");
                    self.dashboard.replace_partner(partner);
                }
                Err(error) => self.report("update partner", error),
            },

            Message::UsersLoaded(partner_id, result) => {
                let error = match self.partner_detail_mut(&partner_id) {
                    Some(detail) => match result {
                        Ok(users) => {
                            detail.users = Some(users);
                            None
                        }
                        Err(error) => {
                            detail.users = Some(Vec::new());
                            Some(error)
                        }
                    },
                    None => result.err(),
                };
                if let Some(error) = error {
                    self.report("load users", error);
                }
            }

            Message::SearchUsers(query) => {
                if let Some(detail) = &mut self.selected_partner {
                    detail.search = query;
                }
            }

            Message::ToggleUserActive(user_id, active) => {
                let store = self.store.clone();
                return perform(
                    async move { store.update_user(&user_id, UserUpdate::active(active)).await },
                    Message::UserUpdated,
                );
            }

            Message::UserUpdated(result) => match result {
                Ok(user) => {
                    tracing::info!(user = %user.id, active = user.is_active, "User updated");
                    if let Some(account) = &mut self.selected_user {
                        if account.user.id == user.id {
                            account.user = user.clone();
                        }
                    }
                    if let Some(detail) = &mut self.selected_partner {
                        detail.replace_user(user);
                    }
                }
                Err(error) => self.report("update user", error),
            },

            Message::SelectUser(user_id) => {
                return self.select_user(&user_id);
            }

            Message::CloseUser => {
                self.selected_user = None;
            }

            Message::SelectAccountTab(tab) => {
                if let Some(account) = &mut self.selected_user {
                    account.tab = tab;
                }
            }

            Message::CollectionsLoaded(user_id, result) => match result {
                Ok(collections) => {
                    if let Some(account) = self.account_mut(&user_id) {
                        account.collections = Some(collections);
                    }
                }
                Err(error) => {
                    if let Some(account) = self.account_mut(&user_id) {
                        account.collections = Some(Vec::new());
                    }
                    self.report("load collections", error);
                }
            },

            Message::ActivationsLoaded(user_id, result) => match result {
                Ok(activations) => {
                    if let Some(account) = self.account_mut(&user_id) {
                        account.activations = Some(activations);
                    }
                }
                Err(error) => {
                    if let Some(account) = self.account_mut(&user_id) {
                        account.activations = Some(Vec::new());
                    }
                    self.report("load activations", error);
                }
            },

            Message::DeleteCollection(id) => {
                let store = self.store.clone();
                let key = id.clone();
                return perform(
                    async move { store.delete_collection(&id).await },
                    move |result| Message::CollectionDeleted(key, result),
                );
            }

            Message::CollectionDeleted(id, result) => match result {
                Ok(()) => {
                    tracing::info!(collection = %id, "Collection deleted");
                    if let Some(account) = &mut self.selected_user {
                        account.remove_collection(&id);
                    }
                }
                Err(error) => self.report("delete collection", error),
            },

            Message::DeleteActivation(id) => {
                let store = self.store.clone();
                let key = id.clone();
                return perform(
                    async move { store.delete_activation(&id).await },
                    move |result| Message::ActivationDeleted(key, result),
                );
            }

            Message::ActivationDeleted(id, result) => match result {
                Ok(()) => {
                    tracing::info!(activation = %id, "Activation deleted");
                    if let Some(account) = &mut self.selected_user {
                        account.remove_activation(&id);
                    }
                }
                Err(error) => self.report("delete activation", error),
            },

            Message::Chart(target, chart_message) => match target {
                ChartTarget::Overview => self.dashboard.chart.update(chart_message),
                ChartTarget::Partner => {
                    if let Some(detail) = &mut self.selected_partner {
                        detail.chart.update(chart_message);
                    }
                }
            },
        }

        Task::none()
    }

    /// Render the view.
    pub fn view(&self) -> Element<'_, Message> {
        let page = if let Some(account) = &self.selected_user {
            account_view(account)
        } else if let Some((partner, detail)) = self.selected_partner.as_ref().and_then(|detail| {
            self.dashboard
                .partner(&detail.partner_id)
                .map(|partner| (partner, detail))
        }) {
            partner_view(partner, detail)
        } else {
            dashboard_view(&self.dashboard)
        };

        match &self.last_error {
            Some(error) => column![error_banner(error), page].into(),
            None => page,
        }
    }

    /// Get the application theme.
    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    pub fn dashboard(&self) -> &DashboardState {
        &self.dashboard
    }

    pub fn selected_partner(&self) -> Option<&PartnerDetailState> {
        self.selected_partner.as_ref()
    }

    pub fn selected_user(&self) -> Option<&AccountState> {
        self.selected_user.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Partners, totals and the global series.
    fn load_overview(&self) -> Task<Message> {
        let store = self.store.clone();
        let partners = perform(
            async move { store.list_partners().await },
            Message::PartnersLoaded,
        );

        let store = self.store.clone();
        let metrics = perform(
            async move { store.overall_metrics().await },
            Message::MetricsLoaded,
        );

        Task::batch([partners, metrics, self.load_series(SeriesScope::Global)])
    }

    fn load_series(&self, scope: SeriesScope) -> Task<Message> {
        let store = self.store.clone();
        let key = scope.clone();
        perform(
            async move { store.metric_series(scope).await.map(Arc::new) },
            move |result| Message::SeriesLoaded(key, result),
        )
    }

    fn load_users(&self, partner_id: String) -> Task<Message> {
        let store = self.store.clone();
        let key = partner_id.clone();
        perform(
            async move { store.list_users(&partner_id).await },
            move |result| Message::UsersLoaded(key, result),
        )
    }

    /// Collections and activations of a user.
    fn load_account(&self, user_id: &str) -> Task<Message> {
        let store = self.store.clone();
        let (id, key) = (user_id.to_string(), user_id.to_string());
        let collections = perform(
            async move { store.list_collections(&id).await },
            move |result| Message::CollectionsLoaded(key, result),
        );

        let store = self.store.clone();
        let (id, key) = (user_id.to_string(), user_id.to_string());
        let activations = perform(
            async move { store.list_activations(&id).await },
            move |result| Message::ActivationsLoaded(key, result),
        );

        Task::batch([collections, activations])
    }

    /// Reload everything currently on screen.
    fn refresh(&self) -> Task<Message> {
        let mut tasks = vec![self.load_overview()];

        if let Some(detail) = &self.selected_partner {
            tasks.push(self.load_users(detail.partner_id.clone()));
            tasks.push(self.load_series(SeriesScope::Partner(detail.partner_id.clone())));
        }
        if let Some(account) = &self.selected_user {
            tasks.push(self.load_account(&account.user.id));
        }

        Task::batch(tasks)
    }

    fn select_partner(&mut self, partner_id: String) -> Task<Message> {
        tracing::info!(partner = %partner_id, "Selected partner");

        self.selected_user = None;
        self.selected_partner = Some(PartnerDetailState::new(partner_id.clone(), &self.display));

        Task::batch([
            self.load_users(partner_id.clone()),
            self.load_series(SeriesScope::Partner(partner_id)),
        ])
    }

    fn select_user(&mut self, user_id: &str) -> Task<Message> {
        let Some(user) = self
            .selected_partner
            .as_ref()
            .and_then(|detail| detail.user(user_id))
            .cloned()
        else {
            tracing::warn!(user = %user_id, "Selected user is not loaded");
            return Task::none();
        };

        tracing::info!(user = %user_id, "Selected user");
        self.selected_user = Some(AccountState::new(user));
        self.load_account(user_id)
    }

    /// Graph showing the given scope, if it is on screen.
    fn chart_mut(&mut self, scope: &SeriesScope) -> Option<&mut ChartState> {
        match scope {
            SeriesScope::Global => Some(&mut self.dashboard.chart),
            SeriesScope::Partner(partner_id) => self
                .partner_detail_mut(partner_id)
                .map(|detail| &mut detail.chart),
        }
    }

    /// Selected partner's state if it is `partner_id`. Stale responses are dropped.
    fn partner_detail_mut(&mut self, partner_id: &str) -> Option<&mut PartnerDetailState> {
        self.selected_partner
            .as_mut()
            .filter(|detail| detail.partner_id == partner_id)
    }

    fn account_mut(&mut self, user_id: &str) -> Option<&mut AccountState> {
        self.selected_user
            .as_mut()
            .filter(|account| account.user.id == user_id)
    }

    fn report(&mut self, action: &str, error: String) {
        tracing::warn!(action, error = %error, "Store request failed");
        self.last_error = Some(format!("Failed to {action}: {error}"));
    }
}

/// Run a store call and map its outcome to a message.
fn perform<T, F>(
    future: F,
    to_message: impl FnOnce(Result<T, String>) -> Message + Send + 'static,
) -> Task<Message>
where
    T: Send + 'static,
    F: Future<Output = partnerdash_store::Result<T>> + Send + 'static,
{
    Task::perform(
        async move { future.await.map_err(|e| e.to_string()) },
        to_message,
    )
}

fn error_banner(error: &str) -> Element<'_, Message> {
    let content = row![
        text(error).size(14).width(Length::Fill),
        button(text("Dismiss").size(13))
            .on_press(Message::DismissError)
            .style(button::secondary),
    ]
    .spacing(12)
    .align_y(Alignment::Center);

    container(content)
        .padding(10)
        .width(Length::Fill)
        .style(|t: &Theme| {
            let colors = theme::colors(t);
            container::Style {
                background: Some(iced::Background::Color(colors.danger())),
                text_color: Some(colors.danger_text()),
                ..Default::default()
            }
        })
        .into()
}
