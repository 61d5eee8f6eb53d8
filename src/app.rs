//! Core application state and Iced Application implementation
//!
//! Searches run as Iced tasks and report back through [`Message`], so all
//! state mutation happens inside `update` on the UI thread.

use std::collections::HashMap;

use iced::keyboard::Key;
use iced::widget::{button, column, container, row, scrollable, text, Space};
use iced::{
    keyboard, task, Alignment, Background, Border, Color, Element, Event, Length, Padding,
    Subscription, Task, Theme,
};

use crate::backend::{RecordId, ResultSet, SearchClient, SearchOutcome, SearchSequence, SearchTicket};
use crate::config::Config;
use crate::ui::artwork::{self, ArtworkPhase};
use crate::ui::search_bar;
use crate::ui::theme::DarkTheme;

// ============================================================================
// UI State Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchStatus {
    #[default]
    Idle,
    Loading,
    Found(usize),
    NoMatches,
    /// The request went out but produced no usable answer
    Failed(String),
    /// The request could not be built; the previous results stay
    Aborted(String),
}

impl From<&SearchOutcome> for SearchStatus {
    fn from(outcome: &SearchOutcome) -> Self {
        match outcome {
            SearchOutcome::Results(records) => Self::Found(records.len()),
            SearchOutcome::NoResults => Self::NoMatches,
            failure => Self::Failed(failure.summary()),
        }
    }
}

// ============================================================================
// Application State
// ============================================================================

pub struct TuneSearch {
    search_term: String,
    results: ResultSet,
    status: SearchStatus,
    artwork: HashMap<RecordId, ArtworkPhase>,
    client: SearchClient,
    sequence: SearchSequence,
    in_flight: Option<task::Handle>,
    artwork_in_flight: Option<task::Handle>,
}

#[derive(Debug, Clone)]
pub enum Message {
    TermChanged(String),
    Submit,
    SearchComplete(SearchTicket, SearchOutcome),
    ArtworkLoaded(SearchTicket, RecordId, Result<Vec<u8>, String>),
    CopyPreview(RecordId),
    Escape,
    IcedEvent(Event),
}

impl TuneSearch {
    pub fn new(config: &Config) -> (Self, Task<Message>) {
        let app = Self {
            search_term: String::new(),
            results: Vec::new(),
            status: SearchStatus::Idle,
            artwork: HashMap::new(),
            client: SearchClient::new(config),
            sequence: SearchSequence::new(),
            in_flight: None,
            artwork_in_flight: None,
        };
        (app, Task::none())
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::TermChanged(term) => {
                self.search_term = term;
                Task::none()
            }

            Message::Submit => self.start_search(),

            Message::SearchComplete(ticket, outcome) => {
                if !self.sequence.is_current(ticket) {
                    tracing::debug!("Discarding stale search {}", ticket);
                    return Task::none();
                }

                self.in_flight = None;
                self.status = SearchStatus::from(&outcome);
                self.results = outcome.into_results();
                self.load_artwork(ticket)
            }

            Message::ArtworkLoaded(ticket, id, result) => {
                if !self.sequence.is_current(ticket) {
                    return Task::none();
                }
                if let Some(phase) = self.artwork.get_mut(&id) {
                    *phase = ArtworkPhase::from_download(result);
                }
                Task::none()
            }

            Message::CopyPreview(id) => {
                let preview = self
                    .results
                    .iter()
                    .find(|record| record.id == id)
                    .and_then(|record| record.preview.as_ref());

                match preview {
                    Some(url) => {
                        tracing::info!("Copied preview link {}", url);
                        iced::clipboard::write(url.to_string())
                    }
                    None => Task::none(),
                }
            }

            Message::Escape => {
                self.search_term.clear();
                Task::none()
            }

            Message::IcedEvent(event) => {
                if let Event::Keyboard(keyboard::Event::KeyPressed {
                    key: Key::Named(keyboard::key::Named::Escape),
                    ..
                }) = event
                {
                    return self.update(Message::Escape);
                }
                Task::none()
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let search_bar = search_bar::view(&self.search_term, Message::TermChanged, Message::Submit);

        let content = column![
            search_bar,
            Space::with_height(8),
            self.view_status(),
            Space::with_height(8),
            self.view_results(),
        ]
        .spacing(0);

        container(container(content).padding(16).width(Length::Fill).height(Length::Fill))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(Background::Color(DarkTheme::BACKGROUND)),
                border: Border {
                    color: DarkTheme::BORDER,
                    width: 1.0,
                    radius: 16.0.into(),
                },
                ..Default::default()
            })
            .into()
    }

    fn view_status(&self) -> Element<'_, Message> {
        let (label, color) = match &self.status {
            SearchStatus::Idle => ("Press Enter to search".to_string(), DarkTheme::TEXT_MUTED),
            SearchStatus::Loading => ("Searching...".to_string(), DarkTheme::TEXT_MUTED),
            SearchStatus::Found(1) => ("1 result".to_string(), DarkTheme::TEXT_MUTED),
            SearchStatus::Found(n) => (format!("{} results", n), DarkTheme::TEXT_MUTED),
            SearchStatus::NoMatches => ("No matches".to_string(), DarkTheme::TEXT_MUTED),
            SearchStatus::Failed(reason) => (reason.clone(), DarkTheme::ERROR),
            SearchStatus::Aborted(reason) => (format!("Search not sent: {}", reason), DarkTheme::ERROR),
        };

        container(text(label).size(13).color(color))
            .padding(Padding::from([0.0, 4.0]))
            .into()
    }

    fn view_results(&self) -> Element<'_, Message> {
        let items: Vec<Element<'_, Message>> = self
            .results
            .iter()
            .map(|record| {
                let item_content = row![
                    artwork::view(self.artwork.get(&record.id)),
                    column![
                        text(&record.title).size(15).color(DarkTheme::TEXT),
                        text(&record.artist).size(12).color(DarkTheme::TEXT_MUTED),
                    ]
                    .spacing(2),
                    Space::with_width(Length::Fill),
                    text(&record.media_kind).size(12).color(DarkTheme::TEXT_MUTED),
                    text(if record.preview.is_some() { "▶" } else { "" })
                        .size(12)
                        .color(DarkTheme::PRIMARY),
                ]
                .spacing(12)
                .align_y(Alignment::Center);

                button(item_content)
                    .on_press(Message::CopyPreview(record.id))
                    .padding(Padding::from([6.0, 12.0]))
                    .width(Length::Fill)
                    .style(|_theme, status| button::Style {
                        background: Some(Background::Color(
                            if status == button::Status::Hovered {
                                DarkTheme::SELECTION
                            } else {
                                Color::TRANSPARENT
                            },
                        )),
                        text_color: DarkTheme::TEXT,
                        border: Border::default().rounded(8),
                        ..button::Style::default()
                    })
                    .into()
            })
            .collect();

        scrollable(column(items).spacing(4))
            .height(Length::Fill)
            .into()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        iced::event::listen().map(Message::IcedEvent)
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    // ========================================================================
    // Business Logic
    // ========================================================================

    fn start_search(&mut self) -> Task<Message> {
        let url = match self.client.request_url(&self.search_term) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Search for {:?} aborted: {}", self.search_term, e);
                self.status = SearchStatus::Aborted(e.to_string());
                return Task::none();
            }
        };

        if let Some(previous) = self.in_flight.take() {
            previous.abort();
        }
        self.cancel_artwork();

        let ticket = self.sequence.begin();
        tracing::info!("Search {} started for {:?}", ticket, self.search_term);
        self.status = SearchStatus::Loading;

        let client = self.client.clone();
        let (task, handle) = Task::perform(async move { client.search_url(url).await }, move |outcome| {
            Message::SearchComplete(ticket, outcome)
        })
        .abortable();

        self.in_flight = Some(handle);
        task
    }

    fn load_artwork(&mut self, ticket: SearchTicket) -> Task<Message> {
        self.cancel_artwork();
        self.artwork.clear();

        let mut downloads = Vec::new();
        for record in &self.results {
            let Some(url) = record.artwork.clone() else {
                self.artwork.insert(record.id, ArtworkPhase::Missing);
                continue;
            };

            self.artwork.insert(record.id, ArtworkPhase::Pending);
            let client = self.client.clone();
            let id = record.id;
            downloads.push(Task::perform(
                async move { client.fetch_artwork(url).await },
                move |result| Message::ArtworkLoaded(ticket, id, result),
            ));
        }

        let (task, handle) = Task::batch(downloads).abortable();
        self.artwork_in_flight = Some(handle);
        task
    }

    /// Abort outstanding artwork downloads; rows still waiting fall back to
    /// the placeholder
    fn cancel_artwork(&mut self) {
        if let Some(downloads) = self.artwork_in_flight.take() {
            downloads.abort();
        }
        for phase in self.artwork.values_mut() {
            if matches!(phase, ArtworkPhase::Pending) {
                *phase = ArtworkPhase::Failed;
            }
        }
    }
}
