use iced::{widget::{Button, Column, Container, Row, Stack, Text, TextInput, mouse_area, Scrollable}, Alignment, Color, Length};
use iced::widget::container::{background, bordered_box};
use iced::widget::{horizontal_space, text, PickList};
use iced_font_awesome::fa_icon_solid;

use crate::app::{App, Message};
use crate::money;
use crate::screens::notice_bar;

const STATUS_LABELS: [&str; 2] = ["Оплачен", "Не оплачен"];

fn status_to_label(status: &str) -> &str {
    match status {
        "paid" => "Оплачен",
        "unpaid" => "Не оплачен",
        other => other,
    }
}

fn label_to_status(label: &str) -> &'static str {
    if label == "Оплачен" { "paid" } else { "unpaid" }
}

pub fn tuition_screen(app: &App) -> Container<Message> {
    let needle = app.tuition_filter_text.trim().to_lowercase();
    let min = money::parse_amount(&app.tuition_min_amount);
    let max = money::parse_amount(&app.tuition_max_amount);
    let filtered: Vec<_> = app
        .tuitions
        .iter()
        .filter(|t| {
            let text_ok = needle.is_empty() || t.student_name.to_lowercase().contains(&needle);
            let status_ok = app
                .tuition_status_filter
                .as_deref()
                .is_none_or(|s| t.status == s);
            let min_ok = min.is_none_or(|m| t.amount >= m);
            let max_ok = max.is_none_or(|m| t.amount <= m);
            text_ok && status_ok && min_ok && max_ok
        })
        .collect();

    let header = Row::new()
        .push(Text::new("Оплата обучения").size(30))
        .push(horizontal_space())
        .push(
            Button::new(fa_icon_solid("plus").style(move |_| text::base(&app.theme)))
                .on_press(Message::OpenTuitionModal(None)),
        )
        .align_y(Alignment::Center)
        .width(Length::Fill);

    let selected_status = app
        .tuition_status_filter
        .as_deref()
        .map(status_to_label);
    let filter_row = Row::new()
        .push(
            TextInput::new("Поиск по студенту", &app.tuition_filter_text)
                .on_input(Message::TuitionFilterChanged)
                .width(Length::Fixed(250.0)),
        )
        .push(
            PickList::new(STATUS_LABELS, selected_status, |label| {
                Message::TuitionStatusFilterChanged(label_to_status(label).to_string())
            })
            .placeholder("Все статусы"),
        )
        .push(Button::new(Text::new("Сбросить")).on_press(Message::ClearTuitionStatusFilter))
        .push(
            TextInput::new("Сумма от", &app.tuition_min_amount)
                .on_input(Message::TuitionMinAmountChanged)
                .width(Length::Fixed(120.0)),
        )
        .push(
            TextInput::new("до", &app.tuition_max_amount)
                .on_input(Message::TuitionMaxAmountChanged)
                .width(Length::Fixed(120.0)),
        )
        .spacing(10)
        .align_y(Alignment::Center);

    let mut list = Column::new().spacing(15);
    for invoice in filtered {
        let actions = Row::new()
            .push(
                Button::new(Text::new("Редактировать"))
                    .on_press(Message::OpenTuitionModal(Some(invoice.clone()))),
            )
            .push(horizontal_space())
            .push(
                Button::new(Text::new("X")).on_press(Message::AskDeleteTuition(invoice.clone())),
            )
            .width(Length::Fill);

        let mut info = Column::new()
            .spacing(5)
            .push(Text::new(invoice.student_name.clone()).size(18))
            .push(Text::new(format!(
                "Сумма: {}",
                money::format_amount(invoice.amount)
            )))
            .push(Text::new(format!("Месяц: {}", invoice.month)))
            .push(Text::new(format!(
                "Статус: {}",
                status_to_label(&invoice.status)
            )));
        if let Some(class_name) = &invoice.class_name {
            info = info.push(Text::new(format!("Класс: {class_name}")));
        }
        if let Some(due) = invoice.due_date {
            info = info.push(Text::new(format!("Срок оплаты: {due}")));
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

    if app.show_tuition_modal {
        let title = if app.editing_tuition_id.is_some() {
            "Редактирование счёта"
        } else {
            "Новый счёт"
        };
        let selected_form_status = app
            .tuition_form_status
            .as_deref()
            .map(status_to_label);
        let mut form = Column::new()
            .spacing(10)
            .push(Text::new(title).size(24))
            .push(
                PickList::new(
                    app.students(),
                    app.tuition_form_student.clone(),
                    Message::TuitionFormStudentChanged,
                )
                .placeholder("Студент"),
            )
            .push(
                PickList::new(
                    app.classes.clone(),
                    app.tuition_form_class.clone(),
                    Message::TuitionFormClassChanged,
                )
                .placeholder("Класс"),
            )
            .push(
                TextInput::new("Сумма", &app.tuition_form_amount)
                    .on_input(Message::TuitionFormAmountChanged),
            )
            .push(
                TextInput::new("Месяц (ГГГГ-ММ)", &app.tuition_form_month)
                    .on_input(Message::TuitionFormMonthChanged),
            )
            .push(
                PickList::new(STATUS_LABELS, selected_form_status, |label| {
                    Message::TuitionFormStatusChanged(label_to_status(label).to_string())
                })
                .placeholder("Статус"),
            );
        if let Some(error) = &app.tuition_form_error {
            form = form.push(text(error.clone()).style(text::danger));
        }
        let form = form.push(
            Row::new()
                .spacing(10)
                .push(Button::new(Text::new("Сохранить")).on_press(Message::SubmitTuitionForm))
                .push(Button::new(Text::new("Отмена")).on_press(Message::CloseTuitionModal)),
        );

        let modal = Container::new(form)
            .padding(20)
            .width(Length::Fixed(450.0))
            .style(move |_| bordered_box(&app.theme));
        let overlay = Container::new(
            mouse_area(Container::new(modal).center(Length::Fill))
                .on_press(Message::CloseTuitionModal),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .style(move |_| background(Color { r: 0.0, g: 0.0, b: 0.0, a: 0.7 }));
        ui_stack = ui_stack.push(overlay);
    }

    if let Some(invoice) = &app.confirm_delete_tuition {
        let dialog = Column::new()
            .spacing(15)
            .push(
                Text::new(format!(
                    "Удалить счёт студента «{}» за {}?",
                    invoice.student_name, invoice.month
                ))
                .size(20),
            )
            .push(
                Row::new()
                    .spacing(10)
                    .push(
                        Button::new(Text::new("Удалить")).on_press(Message::ConfirmDeleteTuition),
                    )
                    .push(
                        Button::new(Text::new("Отмена")).on_press(Message::CancelDeleteTuition),
                    ),
            );
        let modal = Container::new(dialog)
            .padding(20)
            .style(move |_| bordered_box(&app.theme));
        let overlay = Container::new(
            mouse_area(Container::new(modal).center(Length::Fill))
                .on_press(Message::CancelDeleteTuition),
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
