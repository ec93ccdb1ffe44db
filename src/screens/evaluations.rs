use iced::{widget::{Button, Column, Container, Row, Stack, Text, TextInput, mouse_area, Scrollable}, Alignment, Color, Length};
use iced::widget::container::{background, bordered_box};
use iced::widget::{horizontal_space, text, PickList};
use iced_font_awesome::fa_icon_solid;

use crate::app::{App, Message};
use crate::screens::notice_bar;

pub fn evaluations_screen(app: &App) -> Container<Message> {
    let needle = app.evaluation_filter_text.trim().to_lowercase();
    let filtered: Vec<_> = app
        .evaluations
        .iter()
        .filter(|e| {
            needle.is_empty()
                || e.student_name.to_lowercase().contains(&needle)
                || e.class_name
                    .as_deref()
                    .is_some_and(|n| n.to_lowercase().contains(&needle))
        })
        .collect();

    let header = Row::new()
        .push(Text::new("Оценки").size(30))
        .push(horizontal_space())
        .push(
            Button::new(fa_icon_solid("plus").style(move |_| text::base(&app.theme)))
                .on_press(Message::OpenEvaluationModal(None)),
        )
        .align_y(Alignment::Center)
        .width(Length::Fill);

    let filter_row = Row::new()
        .push(
            TextInput::new("Поиск по студенту или классу", &app.evaluation_filter_text)
                .on_input(Message::EvaluationFilterChanged)
                .width(Length::Fixed(300.0)),
        )
        .spacing(10)
        .align_y(Alignment::Center);

    let mut list = Column::new().spacing(15);
    for evaluation in filtered {
        let actions = Row::new()
            .push(
                Button::new(Text::new("Редактировать"))
                    .on_press(Message::OpenEvaluationModal(Some(evaluation.clone()))),
            )
            .push(horizontal_space())
            .push(
                Button::new(Text::new("X"))
                    .on_press(Message::AskDeleteEvaluation(evaluation.clone())),
            )
            .width(Length::Fill);

        let mut info = Column::new()
            .spacing(5)
            .push(Text::new(evaluation.student_name.clone()).size(18))
            .push(Text::new(format!("Балл: {}", evaluation.score)))
            .push(Text::new(format!("Дата: {}", evaluation.date)));
        if let Some(class_name) = &evaluation.class_name {
            info = info.push(Text::new(format!("Класс: {class_name}")));
        }
        if let Some(comment) = &evaluation.comment {
            info = info.push(Text::new(comment.clone()));
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

    if app.show_evaluation_modal {
        let title = if app.editing_evaluation_id.is_some() {
            "Редактирование оценки"
        } else {
            "Новая оценка"
        };
        let mut form = Column::new()
            .spacing(10)
            .push(Text::new(title).size(24))
            .push(
                PickList::new(
                    app.students(),
                    app.evaluation_form_student.clone(),
                    Message::EvaluationFormStudentChanged,
                )
                .placeholder("Студент"),
            )
            .push(
                PickList::new(
                    app.classes.clone(),
                    app.evaluation_form_class.clone(),
                    Message::EvaluationFormClassChanged,
                )
                .placeholder("Класс"),
            )
            .push(
                TextInput::new("Балл (0–100)", &app.evaluation_form_score)
                    .on_input(Message::EvaluationFormScoreChanged),
            )
            .push(
                TextInput::new("Комментарий", &app.evaluation_form_comment)
                    .on_input(Message::EvaluationFormCommentChanged),
            );
        if let Some(error) = &app.evaluation_form_error {
            form = form.push(text(error.clone()).style(text::danger));
        }
        let form = form.push(
            Row::new()
                .spacing(10)
                .push(Button::new(Text::new("Сохранить")).on_press(Message::SubmitEvaluationForm))
                .push(Button::new(Text::new("Отмена")).on_press(Message::CloseEvaluationModal)),
        );

        let modal = Container::new(form)
            .padding(20)
            .width(Length::Fixed(450.0))
            .style(move |_| bordered_box(&app.theme));
        let overlay = Container::new(
            mouse_area(Container::new(modal).center(Length::Fill))
                .on_press(Message::CloseEvaluationModal),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .style(move |_| background(Color { r: 0.0, g: 0.0, b: 0.0, a: 0.7 }));
        ui_stack = ui_stack.push(overlay);
    }

    if let Some(evaluation) = &app.confirm_delete_evaluation {
        let dialog = Column::new()
            .spacing(15)
            .push(
                Text::new(format!(
                    "Удалить оценку студента «{}» от {}?",
                    evaluation.student_name, evaluation.date
                ))
                .size(20),
            )
            .push(
                Row::new()
                    .spacing(10)
                    .push(
                        Button::new(Text::new("Удалить"))
                            .on_press(Message::ConfirmDeleteEvaluation),
                    )
                    .push(
                        Button::new(Text::new("Отмена"))
                            .on_press(Message::CancelDeleteEvaluation),
                    ),
            );
        let modal = Container::new(dialog)
            .padding(20)
            .style(move |_| bordered_box(&app.theme));
        let overlay = Container::new(
            mouse_area(Container::new(modal).center(Length::Fill))
                .on_press(Message::CancelDeleteEvaluation),
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
