use iced::{widget::{Button, Column, Container, Row, Stack, Text, TextInput, mouse_area, Scrollable}, Alignment, Color, Length};
use iced::widget::container::{background, bordered_box};
use iced::widget::{horizontal_space, text, PickList};
use iced_font_awesome::fa_icon_solid;

use crate::app::{App, Message};
use crate::screens::notice_bar;

pub fn classes_screen(app: &App) -> Container<Message> {
    let needle = app.class_filter_text.trim().to_lowercase();
    let filtered: Vec<_> = app
        .classes
        .iter()
        .filter(|c| needle.is_empty() || c.name.to_lowercase().contains(&needle))
        .collect();

    let header = Row::new()
        .push(Text::new("Классы").size(30))
        .push(horizontal_space())
        .push(
            Button::new(fa_icon_solid("plus").style(move |_| text::base(&app.theme)))
                .on_press(Message::OpenClassModal(None)),
        )
        .align_y(Alignment::Center)
        .width(Length::Fill);

    let filter_row = Row::new()
        .push(
            TextInput::new("Поиск по названию", &app.class_filter_text)
                .on_input(Message::ClassFilterChanged)
                .width(Length::Fixed(300.0)),
        )
        .spacing(10)
        .align_y(Alignment::Center);

    let mut list = Column::new().spacing(15);
    for class in filtered {
        let actions = Row::new()
            .push(
                Button::new(Text::new("Редактировать"))
                    .on_press(Message::OpenClassModal(Some(class.clone()))),
            )
            .push(horizontal_space())
            .push(Button::new(Text::new("X")).on_press(Message::AskDeleteClass(class.clone())))
            .width(Length::Fill);

        let mut info = Column::new()
            .spacing(5)
            .push(Text::new(class.name.clone()).size(18));
        if let Some(grade) = &class.grade {
            info = info.push(Text::new(format!("Параллель: {grade}")));
        }
        info = info.push(Text::new(format!(
            "Классный руководитель: {}",
            class.teacher_name.as_deref().unwrap_or("не назначен")
        )));
        if let Some(count) = class.student_count {
            info = info.push(Text::new(format!("Студентов: {count}")));
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

    if app.show_class_modal {
        let title = if app.editing_class_id.is_some() {
            "Редактирование класса"
        } else {
            "Новый класс"
        };
        let teachers = app.teachers();
        let mut form = Column::new()
            .spacing(10)
            .push(Text::new(title).size(24))
            .push(
                TextInput::new("Название", &app.class_form_name)
                    .on_input(Message::ClassFormNameChanged),
            )
            .push(
                TextInput::new("Параллель", &app.class_form_grade)
                    .on_input(Message::ClassFormGradeChanged),
            )
            .push(
                PickList::new(
                    teachers,
                    app.class_form_teacher.clone(),
                    Message::ClassFormTeacherChanged,
                )
                .placeholder("Классный руководитель"),
            );
        if let Some(error) = &app.class_form_error {
            form = form.push(text(error.clone()).style(text::danger));
        }
        let form = form.push(
            Row::new()
                .spacing(10)
                .push(Button::new(Text::new("Сохранить")).on_press(Message::SubmitClassForm))
                .push(Button::new(Text::new("Отмена")).on_press(Message::CloseClassModal)),
        );

        let modal = Container::new(form)
            .padding(20)
            .width(Length::Fixed(450.0))
            .style(move |_| bordered_box(&app.theme));
        let overlay = Container::new(
            mouse_area(Container::new(modal).center(Length::Fill))
                .on_press(Message::CloseClassModal),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .style(move |_| background(Color { r: 0.0, g: 0.0, b: 0.0, a: 0.7 }));
        ui_stack = ui_stack.push(overlay);
    }

    if let Some(class) = &app.confirm_delete_class {
        let dialog = Column::new()
            .spacing(15)
            .push(Text::new(format!("Удалить класс «{}»?", class.name)).size(20))
            .push(
                Row::new()
                    .spacing(10)
                    .push(Button::new(Text::new("Удалить")).on_press(Message::ConfirmDeleteClass))
                    .push(Button::new(Text::new("Отмена")).on_press(Message::CancelDeleteClass)),
            );
        let modal = Container::new(dialog)
            .padding(20)
            .style(move |_| bordered_box(&app.theme));
        let overlay = Container::new(
            mouse_area(Container::new(modal).center(Length::Fill))
                .on_press(Message::CancelDeleteClass),
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
