use iced::{widget::{column, text, Container}, Length};
use iced::widget::container::bordered_box;

use crate::app::{App, Message};

pub fn profile_screen(app: &App) -> Container<Message> {
    let content = match &app.session {
        Some(session) => {
            let user = &session.user;
            column![
                text(format!("ФИО: {}", user.name)).size(24),
                text(format!("Почта: {}", user.email)).size(24),
                text(format!("Роль: {}", user.role)).size(24),
                text(format!(
                    "Дата рождения: {}",
                    user.dob.as_deref().unwrap_or("не указана")
                ))
                .size(24),
                text(format!(
                    "Телефон: {}",
                    user.phone.as_deref().unwrap_or("не указан")
                ))
                .size(24),
            ]
            .spacing(10)
        }
        None => column![text("Сессия не найдена").size(24)],
    };

    let card = Container::new(content)
        .style(move |_| bordered_box(&app.theme))
        .width(Length::Fill)
        .padding(10);
    Container::new(card)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(20)
}
