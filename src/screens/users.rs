use iced::{widget::{Button, Column, Container, Row, Stack, Text, TextInput, mouse_area, Scrollable}, Alignment, Color, Length};
use iced::widget::container::{background, bordered_box};
use iced::widget::{horizontal_space, text, PickList};
use iced_font_awesome::fa_icon_solid;

use crate::api::types::Role;
use crate::app::{App, Message};
use crate::screens::notice_bar;

const GENDERS: [&str; 2] = ["Мужской", "Женский"];

pub fn users_screen(app: &App) -> Container<Message> {
    let needle = app.user_filter_text.trim().to_lowercase();
    let filtered: Vec<_> = app
        .users
        .iter()
        .filter(|u| {
            let text_ok = needle.is_empty()
                || u.name.to_lowercase().contains(&needle)
                || u.email.to_lowercase().contains(&needle);
            let role_ok = app.user_role_filter.is_none_or(|r| u.role == r);
            text_ok && role_ok
        })
        .collect();

    let header = Row::new()
        .push(Text::new("Пользователи").size(30))
        .push(horizontal_space())
        .push(
            Button::new(fa_icon_solid("plus").style(move |_| text::base(&app.theme)))
                .on_press(Message::OpenUserModal(None)),
        )
        .align_y(Alignment::Center)
        .width(Length::Fill);

    let filter_row = Row::new()
        .push(
            TextInput::new("Поиск по имени или почте", &app.user_filter_text)
                .on_input(Message::UserFilterChanged)
                .width(Length::Fixed(300.0)),
        )
        .push(
            PickList::new(Role::ALL, app.user_role_filter, Message::UserRoleFilterChanged)
                .placeholder("Все роли"),
        )
        .push(Button::new(Text::new("Сбросить")).on_press(Message::ClearUserRoleFilter))
        .spacing(10)
        .align_y(Alignment::Center);

    let mut list = Column::new().spacing(15);
    for user in filtered {
        let actions = Row::new()
            .push(
                Button::new(Text::new("Редактировать"))
                    .on_press(Message::OpenUserModal(Some(user.clone()))),
            )
            .push(horizontal_space())
            .push(Button::new(Text::new("X")).on_press(Message::AskDeleteUser(user.clone())))
            .width(Length::Fill);

        let mut info = Column::new()
            .spacing(5)
            .push(Text::new(user.name.clone()).size(18))
            .push(Text::new(format!("Email: {}", user.email)))
            .push(Text::new(format!("Роль: {}", user.role)));
        if let Some(dob) = &user.dob {
            info = info.push(Text::new(format!("Дата рождения: {dob}")));
        }
        if let Some(phone) = &user.phone {
            info = info.push(Text::new(format!("Телефон: {phone}")));
        }

        list = list.push(
            Container::new(Column::new().push(actions).push(info).spacing(10))
                .padding(10)
                .style(move |_| bordered_box(&app.theme))
                .width(Length::Fill),
        );
    }

    let base = Column::new()
        .push(header)
        .push(notice_bar(app))
        .push(filter_row)
        .push(Scrollable::new(list).height(Length::Fill))
        .spacing(15)
        .padding(20);

    let mut ui_stack = Stack::new().push(base);

    if app.show_user_modal {
        let title = if app.editing_user_id.is_some() {
            "Редактирование пользователя"
        } else {
            "Новый пользователь"
        };
        let selected_gender = if app.user_form_gender.is_empty() {
            None
        } else {
            Some(app.user_form_gender.as_str())
        };
        let mut form = Column::new()
            .spacing(10)
            .push(Text::new(title).size(24))
            .push(TextInput::new("ФИО", &app.user_form_name).on_input(Message::UserFormNameChanged))
            .push(
                TextInput::new("Почта", &app.user_form_email)
                    .on_input(Message::UserFormEmailChanged),
            )
            .push(
                TextInput::new("Дата рождения (ГГГГ-ММ-ДД)", &app.user_form_dob)
                    .on_input(Message::UserFormDobChanged),
            )
            .push(
                TextInput::new("Телефон", &app.user_form_phone)
                    .on_input(Message::UserFormPhoneChanged),
            )
            .push(
                PickList::new(GENDERS, selected_gender, |g| {
                    Message::UserFormGenderChanged(g.to_string())
                })
                .placeholder("Пол"),
            )
            .push(
                PickList::new(Role::ALL, app.user_form_role, Message::UserFormRoleChanged)
                    .placeholder("Роль"),
            );
        if let Some(error) = &app.user_form_error {
            form = form.push(text(error.clone()).style(text::danger));
        }
        let form = form.push(
            Row::new()
                .spacing(10)
                .push(Button::new(Text::new("Сохранить")).on_press(Message::SubmitUserForm))
                .push(Button::new(Text::new("Отмена")).on_press(Message::CloseUserModal)),
        );

        let modal = Container::new(form)
            .padding(20)
            .width(Length::Fixed(450.0))
            .style(move |_| bordered_box(&app.theme));
        let overlay = Container::new(
            mouse_area(Container::new(modal).center(Length::Fill))
                .on_press(Message::CloseUserModal),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .style(move |_| background(Color { r: 0.0, g: 0.0, b: 0.0, a: 0.7 }));
        ui_stack = ui_stack.push(overlay);
    }

    if let Some(user) = &app.confirm_delete_user {
        let dialog = Column::new()
            .spacing(15)
            .push(Text::new(format!("Удалить пользователя «{}»?", user.name)).size(20))
            .push(
                Row::new()
                    .spacing(10)
                    .push(Button::new(Text::new("Удалить")).on_press(Message::ConfirmDeleteUser))
                    .push(Button::new(Text::new("Отмена")).on_press(Message::CancelDeleteUser)),
            );
        let modal = Container::new(dialog)
            .padding(20)
            .style(move |_| bordered_box(&app.theme));
        let overlay = Container::new(
            mouse_area(Container::new(modal).center(Length::Fill))
                .on_press(Message::CancelDeleteUser),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .style(move |_| background(Color { r: 0.0, g: 0.0, b: 0.0, a: 0.7 }));
        ui_stack = ui_stack.push(overlay);
    }

    Container::new(ui_stack)
        .width(Length::Fill)
        .height(Length::Fill)
}
