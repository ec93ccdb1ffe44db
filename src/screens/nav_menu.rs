use iced::{widget::{button, column}, Alignment, Element, Length, Renderer, Theme};
use iced::widget::{text, vertical_space, Container, Row};
use iced_font_awesome::fa_icon_solid;

use crate::api::types::Role;
use crate::app::{App, Message, Screen};

fn icon_button_content<'a>(
    icon_element: impl Into<Element<'a, Message, Theme, Renderer>>,
    label: &'a str,
) -> Row<'a, Message> {
    Row::new()
        .align_y(Alignment::Center)
        .spacing(5)
        .push(icon_element)
        .push(text(label))
}

pub fn nav_menu(app: &App) -> Container<Message> {
    let item = |icon: &str, label: &'static str, screen: Screen| {
        button(icon_button_content(
            fa_icon_solid(icon).style(move |_| text::base(&app.theme)),
            label,
        ))
        .on_press(Message::Navigate(screen))
        .width(Length::Fill)
    };

    let mut content = column![item("address-card", "Профиль", Screen::Profile)].spacing(10);

    // набор разделов зависит от роли вошедшего
    match app.role() {
        Some(Role::Manager) => {
            content = content
                .push(item("user", "Пользователи", Screen::Users))
                .push(item("users", "Классы", Screen::Classes))
                .push(item("calendar-days", "Расписание", Screen::Schedules))
                .push(item("file-invoice-dollar", "Оплата обучения", Screen::Tuition))
                .push(item("money-check-dollar", "Зарплата", Screen::Payroll))
                .push(item("comment", "Отзывы", Screen::Reviews))
                .push(item("graduation-cap", "Оценки", Screen::Evaluations));
        }
        Some(Role::Teacher) => {
            content = content
                .push(item("calendar-days", "Расписание", Screen::Schedules))
                .push(item("graduation-cap", "Оценки", Screen::Evaluations));
        }
        Some(Role::Student) | Some(Role::Parent) => {
            content = content
                .push(item("file-invoice-dollar", "Оплата обучения", Screen::Tuition))
                .push(item("graduation-cap", "Оценки", Screen::Evaluations));
        }
        None => {}
    }

    content = content
        .push(vertical_space())
        .push(item("gear", "Настройки", Screen::Settings))
        .push(
            button(icon_button_content(
                fa_icon_solid("arrow-right-from-bracket").style(move |_| text::base(&app.theme)),
                "Выход",
            ))
            .on_press(Message::Logout)
            .width(Length::Fill),
        );

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(10)
}
