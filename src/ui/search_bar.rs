//! Search bar widget

use iced::widget::{container, text_input};
use iced::{Background, Border, Color, Element, Length, Padding};

use super::theme::DarkTheme;

/// Search bar component. Searches only run on submit.
pub fn view<'a, Message: Clone + 'a>(
    value: &str,
    on_input: impl Fn(String) -> Message + 'a,
    on_submit: Message,
) -> Element<'a, Message> {
    container(
        text_input("Search songs, albums, podcasts...", value)
            .on_input(on_input)
            .on_submit(on_submit)
            .padding(Padding::new(14.0))
            .size(18)
            .style(|_theme, _status| text_input::Style {
                background: Background::Color(Color::TRANSPARENT),
                border: Border::default(),
                icon: DarkTheme::TEXT_MUTED,
                placeholder: DarkTheme::TEXT_PLACEHOLDER,
                value: DarkTheme::TEXT,
                selection: DarkTheme::PRIMARY,
            }),
    )
    .padding(Padding::from([6.0, 12.0]))
    .width(Length::Fill)
    .style(|_theme| container::Style {
        background: Some(Background::Color(DarkTheme::SURFACE)),
        border: Border {
            color: DarkTheme::BORDER,
            width: 1.0,
            radius: 12.0.into(),
        },
        ..Default::default()
    })
    .into()
}
