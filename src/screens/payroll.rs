use iced::{widget::{Button, Column, Container, Row, Stack, Text, TextInput, mouse_area, Scrollable}, Alignment, Color, Length};
use iced::widget::container::{background, bordered_box};
use iced::widget::{horizontal_space, text, PickList};
use iced_font_awesome::fa_icon_solid;

use crate::app::{App, Message};
use crate::money;
use crate::screens::notice_bar;

pub fn payroll_screen(app: &App) -> Container<Message> {
    let needle = app.payroll_filter_text.trim().to_lowercase();
    let month = app.payroll_month_filter.trim();
    let filtered: Vec<_> = app
        .payrolls
        .iter()
        .filter(|p| {
            let text_ok = needle.is_empty() || p.teacher_name.to_lowercase().contains(&needle);
            let month_ok = month.is_empty() || p.month == month;
            text_ok && month_ok
        })
        .collect();

    let header = Row::new()
        .push(Text::new("Зарплата").size(30))
        .push(horizontal_space())
        .push(
            Button::new(fa_icon_solid("plus").style(move |_| text::base(&app.theme)))
                .on_press(Message::OpenPayrollModal(None)),
        )
        .align_y(Alignment::Center)
        .width(Length::Fill);

    let filter_row = Row::new()
        .push(
            TextInput::new("Поиск по преподавателю", &app.payroll_filter_text)
                .on_input(Message::PayrollFilterChanged)
                .width(Length::Fixed(250.0)),
        )
        .push(
            TextInput::new("Месяц (ГГГГ-ММ)", &app.payroll_month_filter)
                .on_input(Message::PayrollMonthFilterChanged)
                .width(Length::Fixed(150.0)),
        )
        .spacing(10)
        .align_y(Alignment::Center);

    let mut list = Column::new().spacing(15);
    for entry in filtered {
        let actions = Row::new()
            .push(
                Button::new(Text::new("Редактировать"))
                    .on_press(Message::OpenPayrollModal(Some(entry.clone()))),
            )
            .push(horizontal_space())
            .push(Button::new(Text::new("X")).on_press(Message::AskDeletePayroll(entry.clone())))
            .width(Length::Fill);

        let info = Column::new()
            .spacing(5)
            .push(Text::new(entry.teacher_name.clone()).size(18))
            .push(Text::new(format!("Месяц: {}", entry.month)))
            .push(Text::new(format!(
                "Оклад: {}",
                money::format_amount(entry.base_salary)
            )))
            .push(Text::new(format!(
                "Премия: {}",
                money::format_amount(entry.bonus)
            )))
            .push(Text::new(format!(
                "Удержания: {}",
                money::format_amount(entry.deductions)
            )))
            .push(Text::new(format!("Итого: {}", money::format_amount(entry.total))).size(16));

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

    if app.show_payroll_modal {
        let title = if app.editing_payroll_id.is_some() {
            "Редактирование начисления"
        } else {
            "Новое начисление"
        };
        let mut form = Column::new()
            .spacing(10)
            .push(Text::new(title).size(24))
            .push(
                PickList::new(
                    app.teachers(),
                    app.payroll_form_teacher.clone(),
                    Message::PayrollFormTeacherChanged,
                )
                .placeholder("Преподаватель"),
            )
            .push(
                TextInput::new("Месяц (ГГГГ-ММ)", &app.payroll_form_month)
                    .on_input(Message::PayrollFormMonthChanged),
            )
            .push(
                TextInput::new("Оклад", &app.payroll_form_base)
                    .on_input(Message::PayrollFormBaseChanged),
            )
            .push(
                TextInput::new("Премия", &app.payroll_form_bonus)
                    .on_input(Message::PayrollFormBonusChanged),
            )
            .push(
                TextInput::new("Удержания", &app.payroll_form_deductions)
                    .on_input(Message::PayrollFormDeductionsChanged),
            );
        if let Some(error) = &app.payroll_form_error {
            form = form.push(text(error.clone()).style(text::danger));
        }
        let form = form.push(
            Row::new()
                .spacing(10)
                .push(Button::new(Text::new("Сохранить")).on_press(Message::SubmitPayrollForm))
                .push(Button::new(Text::new("Отмена")).on_press(Message::ClosePayrollModal)),
        );

        let modal = Container::new(form)
            .padding(20)
            .width(Length::Fixed(450.0))
            .style(move |_| bordered_box(&app.theme));
        let overlay = Container::new(
            mouse_area(Container::new(modal).center(Length::Fill))
                .on_press(Message::ClosePayrollModal),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .style(move |_| background(Color { r: 0.0, g: 0.0, b: 0.0, a: 0.7 }));
        ui_stack = ui_stack.push(overlay);
    }

    if let Some(entry) = &app.confirm_delete_payroll {
        let dialog = Column::new()
            .spacing(15)
            .push(
                Text::new(format!(
                    "Удалить начисление «{}» за {}?",
                    entry.teacher_name, entry.month
                ))
                .size(20),
            )
            .push(
                Row::new()
                    .spacing(10)
                    .push(
                        Button::new(Text::new("Удалить")).on_press(Message::ConfirmDeletePayroll),
                    )
                    .push(
                        Button::new(Text::new("Отмена")).on_press(Message::CancelDeletePayroll),
                    ),
            );
        let modal = Container::new(dialog)
            .padding(20)
            .style(move |_| bordered_box(&app.theme));
        let overlay = Container::new(
            mouse_area(Container::new(modal).center(Length::Fill))
                .on_press(Message::CancelDeletePayroll),
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
