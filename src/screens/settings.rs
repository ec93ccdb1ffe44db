use iced::{widget::{column, text, Container, vertical_space}, Length, Center, Theme};
use iced::widget::pick_list;

use crate::app::{App, Message};

pub fn settings_screen(app: &App) -> Container<Message> {
    let content = column![
        text("Настройки").size(30),
        vertical_space(),
        pick_list(Theme::ALL, Some(app.theme.clone()), Message::ThemeSelected)
            .placeholder("Выберите тему"),
    ]
        .spacing(15)
        .align_x(Center);

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(40)
}
