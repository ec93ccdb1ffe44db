use iced::{widget::{column, text, text_input, button, vertical_space, Container}, Length, Center};
use crate::app::{App, Message};

pub fn login_screen(app: &App) -> Container<Message> {
    let submit = if app.login_in_progress {
        button("Входим...").padding(10)
    } else {
        button("Войти").on_press(Message::SubmitLogin).padding(10)
    };

    let content = column![
        text("Вход").size(30),
        vertical_space(),
        text_input("Почта", &app.login_email)
            .on_input(Message::LoginEmailChanged)
            .padding(10)
            .size(18)
            .width(Length::Fixed(350.0)),
        text_input("Пароль", &app.login_password)
            .on_input(Message::LoginPasswordChanged)
            .secure(true)
            .on_submit(Message::SubmitLogin)
            .padding(10)
            .size(18)
            .width(Length::Fixed(350.0)),
        submit,
        text(&app.error_message).size(20),
        vertical_space(),
    ]
        .spacing(15)
        .width(Length::Fill)
        .align_x(Center);

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(40)
}
